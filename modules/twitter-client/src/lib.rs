pub mod auth;
pub mod error;
pub mod types;

pub use auth::OauthCredentials;
pub use error::{Result, TwitterError};
pub use types::{PostedStatus, SearchResponse, StatusUpdate, Tweet};

use reqwest::header;

pub const DEFAULT_BASE_URL: &str = "https://api.twitter.com/1.1";

/// Minimal Twitter v1.1 REST client: recent-tweet search, user timelines,
/// and status updates, all signed with OAuth 1.0a.
#[derive(Clone)]
pub struct TwitterClient {
    client: reqwest::Client,
    credentials: OauthCredentials,
    base_url: String,
}

impl TwitterClient {
    pub fn new(credentials: OauthCredentials) -> Self {
        Self::with_base_url(credentials, DEFAULT_BASE_URL.to_string())
    }

    pub fn with_base_url(credentials: OauthCredentials, base_url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            credentials,
            base_url,
        }
    }

    /// Search recent tweets. `query` is the standard search syntax,
    /// e.g. `from:311dcgov`.
    pub async fn search_recent(&self, query: &str, count: u32) -> Result<Vec<Tweet>> {
        let params = vec![
            ("q".to_string(), query.to_string()),
            ("result_type".to_string(), "recent".to_string()),
            ("tweet_mode".to_string(), "extended".to_string()),
            ("count".to_string(), count.to_string()),
        ];
        let url = format!("{}/search/tweets.json", self.base_url);
        let resp = self
            .client
            .get(&url)
            .header(
                header::AUTHORIZATION,
                self.credentials.authorization_header("GET", &url, &params),
            )
            .query(&params)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(TwitterError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let search: SearchResponse = resp.json().await?;
        tracing::debug!(query, count = search.statuses.len(), "Fetched search results");
        Ok(search.statuses)
    }

    /// Fetch a user's timeline, optionally including their replies.
    pub async fn user_timeline(&self, screen_name: &str, include_replies: bool) -> Result<Vec<Tweet>> {
        let params = vec![
            ("screen_name".to_string(), screen_name.to_string()),
            (
                "exclude_replies".to_string(),
                (!include_replies).to_string(),
            ),
            ("tweet_mode".to_string(), "extended".to_string()),
        ];
        let url = format!("{}/statuses/user_timeline.json", self.base_url);
        let resp = self
            .client
            .get(&url)
            .header(
                header::AUTHORIZATION,
                self.credentials.authorization_header("GET", &url, &params),
            )
            .query(&params)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(TwitterError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let tweets: Vec<Tweet> = resp.json().await?;
        tracing::debug!(screen_name, count = tweets.len(), "Fetched user timeline");
        Ok(tweets)
    }

    /// Post a status update (a reply, in this bot's case).
    pub async fn update_status(&self, update: &StatusUpdate) -> Result<PostedStatus> {
        let params = update.to_params();
        let url = format!("{}/statuses/update.json", self.base_url);
        let resp = self
            .client
            .post(&url)
            .header(
                header::AUTHORIZATION,
                self.credentials.authorization_header("POST", &url, &params),
            )
            .form(&params)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(TwitterError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let posted: PostedStatus = resp.json().await?;
        tracing::info!(
            id = posted.id_str.as_str(),
            in_reply_to = update.in_reply_to_status_id.as_str(),
            "Posted status update"
        );
        Ok(posted)
    }
}
