//! Trait seams for the bot's three external collaborators.
//!
//! The production impls live on the client structs below; tests swap in
//! in-memory mocks, so the whole pipeline runs without network access.

use async_trait::async_trait;

use dc311rn_client::{Dc311Client, Dc311Error, ServiceRequest};
use dc311rn_common::Post;
use twitter_client::{StatusUpdate, TwitterClient, TwitterError};

use crate::extract::RequestIdentifier;
use crate::reply::ReplyDraft;

#[async_trait]
pub trait TimelineSource: Send + Sync {
    /// Recent posts from the account being watched for request numbers.
    async fn recent_mentions(&self, account: &str) -> Result<Vec<Post>, TwitterError>;

    /// The bot's own timeline, replies included — the evidence of what has
    /// already been answered.
    async fn own_timeline(&self, account: &str) -> Result<Vec<Post>, TwitterError>;
}

#[async_trait]
pub trait RequestLookup: Send + Sync {
    async fn lookup(&self, id: &RequestIdentifier) -> Result<ServiceRequest, Dc311Error>;
}

#[async_trait]
pub trait ReplyTransport: Send + Sync {
    async fn post_reply(&self, draft: &ReplyDraft) -> Result<(), TwitterError>;
}

#[async_trait]
impl TimelineSource for TwitterClient {
    async fn recent_mentions(&self, account: &str) -> Result<Vec<Post>, TwitterError> {
        let tweets = self.search_recent(&format!("from:{account}"), 15).await?;
        Ok(tweets.into_iter().map(|t| t.into_post()).collect())
    }

    async fn own_timeline(&self, account: &str) -> Result<Vec<Post>, TwitterError> {
        let tweets = self.user_timeline(account, true).await?;
        Ok(tweets.into_iter().map(|t| t.into_post()).collect())
    }
}

#[async_trait]
impl RequestLookup for Dc311Client {
    async fn lookup(&self, id: &RequestIdentifier) -> Result<ServiceRequest, Dc311Error> {
        self.service_request(id.as_str()).await
    }
}

#[async_trait]
impl ReplyTransport for TwitterClient {
    async fn post_reply(&self, draft: &ReplyDraft) -> Result<(), TwitterError> {
        let update = StatusUpdate {
            status: draft.text.clone(),
            in_reply_to_status_id: draft.in_reply_to_id.clone(),
            auto_populate_reply_metadata: true,
            lat: draft.location.lat,
            long: draft.location.lng,
            display_coordinates: true,
            exclude_reply_user_ids: draft.excluded_mention_ids.clone(),
        };
        self.update_status(&update).await?;
        Ok(())
    }
}
