use std::env;

use tracing::info;

/// Account IDs stripped from auto-populated reply mentions. These are the DC
/// agency accounts that 311dcgov tags in its status tweets; replying to all of
/// them would spam agencies that never asked.
pub const DEFAULT_EXCLUDED_MENTION_IDS: &[&str] = &[
    "633993114",          // @DCDHCD
    "18768730",           // @DC_HSEMA
    "22509067",           // @dcdmv
    "745716766643523585", // @OUC_DC
    "2964352984",         // @DCMOCA
    "86340250",           // @DCDPW
    "21789369",           // @DDOTDC
    "301494181",          // @DC_Housing
];

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    // Twitter OAuth 1.0a credentials
    pub twitter_consumer_key: String,
    pub twitter_consumer_secret: String,
    pub twitter_access_token_key: String,
    pub twitter_access_token_secret: String,

    // API endpoints (overridable for staging/tests)
    pub twitter_api_base: String,
    pub dc311rn_api_base: String,

    // Accounts
    /// Account whose timeline is scanned for service request numbers.
    pub mention_account: String,
    /// Account the bot posts from; its timeline is the replied-to evidence.
    pub reply_account: String,

    // Eligibility window
    /// Posts newer than now minus this many minutes are left for a later run,
    /// so the reply timeline has time to propagate.
    pub lookback_minutes: i64,

    /// Account IDs excluded from auto-populated reply mentions.
    pub excluded_mention_ids: Vec<String>,
}

impl Config {
    /// Load configuration from environment variables.
    /// Panics with a clear message if required vars are missing.
    pub fn from_env() -> Self {
        Self {
            twitter_consumer_key: required_env("TWITTER_CONSUMER_KEY"),
            twitter_consumer_secret: required_env("TWITTER_CONSUMER_SECRET"),
            twitter_access_token_key: required_env("TWITTER_ACCESS_TOKEN_KEY"),
            twitter_access_token_secret: required_env("TWITTER_ACCESS_TOKEN_SECRET"),
            twitter_api_base: env::var("TWITTER_API_BASE")
                .unwrap_or_else(|_| "https://api.twitter.com/1.1".to_string()),
            dc311rn_api_base: env::var("DC311RN_API_BASE")
                .unwrap_or_else(|_| "https://api.dc311rn.com".to_string()),
            mention_account: env::var("MENTION_QUERY_ACCOUNT")
                .unwrap_or_else(|_| "311dcgov".to_string()),
            reply_account: env::var("REPLY_ACCOUNT").unwrap_or_else(|_| "dc311rn".to_string()),
            lookback_minutes: env::var("LOOKBACK_MINUTES")
                .unwrap_or_else(|_| "60".to_string())
                .parse()
                .expect("LOOKBACK_MINUTES must be a number"),
            excluded_mention_ids: env::var("EXCLUDED_MENTION_IDS")
                .map(|v| {
                    v.split(',')
                        .map(|s| s.trim().to_string())
                        .filter(|s| !s.is_empty())
                        .collect()
                })
                .unwrap_or_else(|_| {
                    DEFAULT_EXCLUDED_MENTION_IDS
                        .iter()
                        .map(|s| s.to_string())
                        .collect()
                }),
        }
    }

    /// Log the non-secret parts of the configuration.
    pub fn log_redacted(&self) {
        info!(
            twitter_api_base = self.twitter_api_base.as_str(),
            dc311rn_api_base = self.dc311rn_api_base.as_str(),
            mention_account = self.mention_account.as_str(),
            reply_account = self.reply_account.as_str(),
            lookback_minutes = self.lookback_minutes,
            excluded_mentions = self.excluded_mention_ids.len(),
            "Loaded config"
        );
    }
}

fn required_env(key: &str) -> String {
    env::var(key).unwrap_or_else(|_| panic!("{key} environment variable is required"))
}
