use anyhow::Result;
use tracing::info;
use tracing_subscriber::EnvFilter;

use dc311rn_bot::{Worker, WorkerOptions};
use dc311rn_client::Dc311Client;
use dc311rn_common::Config;
use twitter_client::{OauthCredentials, TwitterClient};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("dc311rn_bot=info".parse()?))
        .init();

    info!("dc311rn status bot starting...");

    // Load config
    let config = Config::from_env();
    config.log_redacted();

    let twitter = TwitterClient::with_base_url(
        OauthCredentials {
            consumer_key: config.twitter_consumer_key.clone(),
            consumer_secret: config.twitter_consumer_secret.clone(),
            access_token: config.twitter_access_token_key.clone(),
            access_token_secret: config.twitter_access_token_secret.clone(),
        },
        config.twitter_api_base.clone(),
    );
    let lookup = Dc311Client::with_base_url(config.dc311rn_api_base.clone());

    let worker = Worker::new(
        Box::new(twitter.clone()),
        Box::new(lookup),
        Box::new(twitter),
        WorkerOptions::from_config(&config),
    );

    // A timeline fetch failure propagates out of main so the periodic
    // trigger sees a failed invocation.
    let report = worker.run().await?;
    info!("{report}");

    Ok(())
}
