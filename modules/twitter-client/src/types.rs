use chrono::{DateTime, Utc};
use serde::Deserialize;

use dc311rn_common::Post;

/// A single status from the Twitter v1.1 API in extended tweet mode.
#[derive(Debug, Clone, Deserialize)]
pub struct Tweet {
    pub id_str: String,
    pub full_text: String,
    #[serde(with = "twitter_date")]
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub in_reply_to_status_id_str: Option<String>,
}

impl Tweet {
    /// Convert to the platform-agnostic Post the pipeline works with.
    pub fn into_post(self) -> Post {
        Post {
            id: self.id_str,
            text: self.full_text,
            created_at: self.created_at,
            in_reply_to_id: self.in_reply_to_status_id_str,
        }
    }
}

/// The slice of a `statuses/update` response the bot reads. The update
/// endpoint returns `text` rather than `full_text` unless asked for
/// extended mode, so the full [`Tweet`] shape does not apply here.
#[derive(Debug, Clone, Deserialize)]
pub struct PostedStatus {
    pub id_str: String,
}

/// Wrapper for `search/tweets` responses.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchResponse {
    pub statuses: Vec<Tweet>,
}

/// Parameters for `statuses/update` posted as a reply.
#[derive(Debug, Clone, PartialEq)]
pub struct StatusUpdate {
    pub status: String,
    pub in_reply_to_status_id: String,
    /// Mirror the reply chain's @mentions instead of prefixing them to the text.
    pub auto_populate_reply_metadata: bool,
    pub lat: f64,
    pub long: f64,
    pub display_coordinates: bool,
    /// Account IDs dropped from the auto-populated mentions.
    pub exclude_reply_user_ids: Vec<String>,
}

impl StatusUpdate {
    /// Flatten into form parameters, which also feed the OAuth signature.
    pub fn to_params(&self) -> Vec<(String, String)> {
        let mut params = vec![
            ("status".to_string(), self.status.clone()),
            (
                "in_reply_to_status_id".to_string(),
                self.in_reply_to_status_id.clone(),
            ),
            (
                "auto_populate_reply_metadata".to_string(),
                self.auto_populate_reply_metadata.to_string(),
            ),
            ("lat".to_string(), self.lat.to_string()),
            ("long".to_string(), self.long.to_string()),
            (
                "display_coordinates".to_string(),
                self.display_coordinates.to_string(),
            ),
        ];
        if !self.exclude_reply_user_ids.is_empty() {
            params.push((
                "exclude_reply_user_ids".to_string(),
                self.exclude_reply_user_ids.join(","),
            ));
        }
        params
    }
}

/// Twitter's legacy `created_at` format, e.g. `Wed Oct 10 20:19:24 +0000 2018`.
mod twitter_date {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer};

    const FORMAT: &str = "%a %b %d %H:%M:%S %z %Y";

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        DateTime::parse_from_str(&s, FORMAT)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn parses_legacy_created_at_format() {
        let json = r#"{
            "id_str": "1050118621198921728",
            "full_text": "To make room for more expression, we will now count all emojis as equal.",
            "created_at": "Wed Oct 10 20:19:24 +0000 2018",
            "in_reply_to_status_id_str": null
        }"#;

        let tweet: Tweet = serde_json::from_str(json).unwrap();
        assert_eq!(
            tweet.created_at,
            Utc.with_ymd_and_hms(2018, 10, 10, 20, 19, 24).unwrap()
        );
        assert_eq!(tweet.in_reply_to_status_id_str, None);

        let post = tweet.into_post();
        assert_eq!(post.id, "1050118621198921728");
    }

    #[test]
    fn posted_status_parses_a_compact_update_response() {
        // statuses/update answers in compact mode: `text`, no `full_text`.
        let json = r#"{
            "id_str": "1050118621198921728",
            "text": "Status: https://www.dc311rn.com/24-00123456 (Pothole)",
            "created_at": "Wed Oct 10 20:19:24 +0000 2018"
        }"#;

        let posted: PostedStatus = serde_json::from_str(json).unwrap();
        assert_eq!(posted.id_str, "1050118621198921728");
    }

    #[test]
    fn status_update_flattens_excluded_ids() {
        let update = StatusUpdate {
            status: "hi".to_string(),
            in_reply_to_status_id: "42".to_string(),
            auto_populate_reply_metadata: true,
            lat: 38.9,
            long: -77.03,
            display_coordinates: true,
            exclude_reply_user_ids: vec!["1".to_string(), "2".to_string()],
        };

        let params = update.to_params();
        assert!(params.contains(&("exclude_reply_user_ids".to_string(), "1,2".to_string())));
        assert!(params.contains(&("auto_populate_reply_metadata".to_string(), "true".to_string())));
    }
}
