//! The run orchestrator: fetch both timelines, classify, fan out lookups,
//! compose and post replies, aggregate the report.

use std::collections::HashSet;

use chrono::{Duration, Utc};
use futures::future::join_all;
use thiserror::Error;
use tracing::{info, warn};

use dc311rn_common::{Config, Post};
use twitter_client::TwitterError;

use crate::classify::classify;
use crate::extract::extract;
use crate::reply::compose;
use crate::report::{PostOutcome, ProcessOutcome, RunReport};
use crate::resolve::{resolve_all, LookupOutcome};
use crate::traits::{ReplyTransport, RequestLookup, TimelineSource};

/// The one fatal error class: classification is meaningless without both
/// timelines, so either fetch failing aborts the whole run. Everything else
/// is contained inside a per-post outcome.
#[derive(Debug, Error)]
pub enum BotError {
    #[error("timeline fetch failed: {0}")]
    TimelineFetch(#[from] TwitterError),
}

/// Worker knobs, split from [`Config`] so tests build them directly.
#[derive(Debug, Clone)]
pub struct WorkerOptions {
    pub mention_account: String,
    pub reply_account: String,
    pub lookback_minutes: i64,
    pub excluded_mention_ids: Vec<String>,
}

impl WorkerOptions {
    pub fn from_config(config: &Config) -> Self {
        Self {
            mention_account: config.mention_account.clone(),
            reply_account: config.reply_account.clone(),
            lookback_minutes: config.lookback_minutes,
            excluded_mention_ids: config.excluded_mention_ids.clone(),
        }
    }
}

pub struct Worker {
    timeline: Box<dyn TimelineSource>,
    lookup: Box<dyn RequestLookup>,
    transport: Box<dyn ReplyTransport>,
    options: WorkerOptions,
}

impl Worker {
    pub fn new(
        timeline: Box<dyn TimelineSource>,
        lookup: Box<dyn RequestLookup>,
        transport: Box<dyn ReplyTransport>,
        options: WorkerOptions,
    ) -> Self {
        Self {
            timeline,
            lookup,
            transport,
            options,
        }
    }

    /// One full run. All per-post subflows run concurrently and
    /// independently; their failures land in the report, not here.
    pub async fn run(&self) -> Result<RunReport, BotError> {
        let (mentions, own) = tokio::try_join!(
            self.timeline.recent_mentions(&self.options.mention_account),
            self.timeline.own_timeline(&self.options.reply_account),
        )?;
        info!(
            mentions = mentions.len(),
            own = own.len(),
            "Fetched both timelines"
        );

        // Replied state is reconstructed each run from our own timeline:
        // a post counts as answered if any of our posts reply to it.
        let already_replied: HashSet<String> =
            own.iter().filter_map(|p| p.in_reply_to_id.clone()).collect();

        let threshold = Utc::now() - Duration::minutes(self.options.lookback_minutes);
        let classification = classify(mentions, threshold, &already_replied);
        info!(
            no_identifier = classification.no_identifier.len(),
            already_replied = classification.already_replied.len(),
            outside_window = classification.outside_window.len(),
            actionable = classification.actionable.len(),
            "Classified mentions"
        );

        let outcomes = join_all(
            classification
                .actionable
                .iter()
                .map(|post| self.process_post(post)),
        )
        .await;

        Ok(RunReport {
            threshold: classification.threshold,
            no_identifier: ids_of(&classification.no_identifier),
            already_replied: ids_of(&classification.already_replied),
            outside_window: ids_of(&classification.outside_window),
            outcomes,
        })
    }

    /// One actionable post's subflow: resolve → compose → post. The first
    /// non-Found resolution short-circuits the post, in identifier order.
    async fn process_post(&self, post: &Post) -> PostOutcome {
        let ids = extract(&post.text);
        let resolutions = resolve_all(&*self.lookup, &ids).await;

        let mut records = Vec::with_capacity(resolutions.len());
        for (id, resolution) in ids.iter().zip(resolutions) {
            match resolution {
                LookupOutcome::Found(record) => records.push(record),
                LookupOutcome::NotFound => {
                    warn!(post = post.id.as_str(), %id, "Service request does not exist");
                    return PostOutcome {
                        post_id: post.id.clone(),
                        outcome: ProcessOutcome::NotFound {
                            detail: format!("service request {id} does not exist"),
                        },
                    };
                }
                LookupOutcome::UpstreamUnavailable => {
                    warn!(post = post.id.as_str(), %id, "Lookup upstream unavailable");
                    return PostOutcome {
                        post_id: post.id.clone(),
                        outcome: ProcessOutcome::Errored {
                            detail: format!("lookup for {id}: upstream unavailable"),
                        },
                    };
                }
                LookupOutcome::UnknownError(detail) => {
                    warn!(post = post.id.as_str(), %id, detail = detail.as_str(), "Lookup failed");
                    return PostOutcome {
                        post_id: post.id.clone(),
                        outcome: ProcessOutcome::Errored {
                            detail: format!("lookup for {id}: {detail}"),
                        },
                    };
                }
            }
        }

        let draft = compose(post, &records, &self.options.excluded_mention_ids);
        match self.transport.post_reply(&draft).await {
            Ok(()) => {
                info!(post = post.id.as_str(), "Replied");
                PostOutcome {
                    post_id: post.id.clone(),
                    outcome: ProcessOutcome::Replied,
                }
            }
            Err(err) => {
                warn!(post = post.id.as_str(), error = %err, "Could not post reply");
                PostOutcome {
                    post_id: post.id.clone(),
                    outcome: ProcessOutcome::Errored {
                        detail: format!("could not post reply: {err}"),
                    },
                }
            }
        }
    }
}

fn ids_of(posts: &[Post]) -> Vec<String> {
    posts.iter().map(|p| p.id.clone()).collect()
}
