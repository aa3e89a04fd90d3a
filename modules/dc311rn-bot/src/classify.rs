//! Partition a batch of candidate posts into disjoint outcome buckets.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use tracing::debug;

use dc311rn_common::Post;

use crate::extract::extract;

/// The result of classifying one batch. Every input post lands in exactly
/// one bucket; bucket order follows input order.
#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    pub threshold: DateTime<Utc>,
    /// No service request number in the text.
    pub no_identifier: Vec<Post>,
    /// A prior reply of ours references this post.
    pub already_replied: Vec<Post>,
    /// Newer than the threshold — left for a later run so the reply
    /// timeline has had time to propagate.
    pub outside_window: Vec<Post>,
    pub actionable: Vec<Post>,
}

/// Classify `posts` against the eligibility `threshold` and the set of post
/// ids we have already replied to. Pure: same inputs, same partition.
///
/// Rules apply in fixed priority order, first match wins:
/// no identifier → already replied → outside window → actionable.
pub fn classify(
    posts: Vec<Post>,
    threshold: DateTime<Utc>,
    already_replied_ids: &HashSet<String>,
) -> Classification {
    let mut result = Classification {
        threshold,
        no_identifier: Vec::new(),
        already_replied: Vec::new(),
        outside_window: Vec::new(),
        actionable: Vec::new(),
    };

    for post in posts {
        if extract(&post.text).is_empty() {
            debug!(id = post.id.as_str(), "Excluded: no service request number");
            result.no_identifier.push(post);
        } else if already_replied_ids.contains(&post.id) {
            debug!(id = post.id.as_str(), "Excluded: already replied");
            result.already_replied.push(post);
        } else if post.created_at > threshold {
            debug!(
                id = post.id.as_str(),
                created_at = %post.created_at,
                threshold = %threshold,
                "Excluded: newer than eligibility threshold"
            );
            result.outside_window.push(post);
        } else {
            result.actionable.push(post);
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn post(id: &str, text: &str, age_minutes: i64) -> Post {
        Post {
            id: id.to_string(),
            text: text.to_string(),
            created_at: Utc::now() - Duration::minutes(age_minutes),
            in_reply_to_id: None,
        }
    }

    fn threshold() -> DateTime<Utc> {
        Utc::now() - Duration::minutes(60)
    }

    #[test]
    fn actionable_when_identifier_present_unreplied_and_old_enough() {
        let posts = vec![post("1", "Report 10-00000001", 90)];
        let result = classify(posts, threshold(), &HashSet::new());
        assert_eq!(result.actionable.len(), 1);
        assert_eq!(result.actionable[0].id, "1");
    }

    #[test]
    fn already_replied_wins_over_eligibility() {
        let posts = vec![post("1", "Report 10-00000001", 90)];
        let replied: HashSet<String> = ["1".to_string()].into();
        let result = classify(posts, threshold(), &replied);
        assert_eq!(result.already_replied.len(), 1);
        assert!(result.actionable.is_empty());
    }

    #[test]
    fn no_identifier_wins_over_everything() {
        // Also in the replied set — no_identifier is checked first.
        let posts = vec![post("1", "thanks for the help!", 90)];
        let replied: HashSet<String> = ["1".to_string()].into();
        let result = classify(posts, threshold(), &replied);
        assert_eq!(result.no_identifier.len(), 1);
        assert!(result.already_replied.is_empty());
    }

    #[test]
    fn recent_posts_wait_outside_the_window() {
        let posts = vec![post("1", "Report 10-00000001", 30)];
        let result = classify(posts, threshold(), &HashSet::new());
        assert_eq!(result.outside_window.len(), 1);
        assert!(result.actionable.is_empty());
    }

    #[test]
    fn partition_is_exhaustive_and_disjoint() {
        let posts = vec![
            post("a", "no number", 90),
            post("b", "Report 11-11111111", 90),
            post("c", "Report 22-22222222", 90),
            post("d", "Report 33-33333333", 5),
            post("e", "", 90),
        ];
        let input_ids: HashSet<String> = posts.iter().map(|p| p.id.clone()).collect();
        let replied: HashSet<String> = ["c".to_string()].into();

        let result = classify(posts, threshold(), &replied);

        let buckets = [
            &result.no_identifier,
            &result.already_replied,
            &result.outside_window,
            &result.actionable,
        ];
        let total: usize = buckets.iter().map(|b| b.len()).sum();
        assert_eq!(total, input_ids.len());

        let mut seen = HashSet::new();
        for bucket in buckets {
            for p in bucket.iter() {
                assert!(seen.insert(p.id.clone()), "post {} in two buckets", p.id);
            }
        }
        assert_eq!(seen, input_ids);
    }

    #[test]
    fn classification_is_idempotent() {
        let posts = vec![
            post("a", "no number", 90),
            post("b", "Report 11-11111111", 90),
            post("c", "Report 22-22222222", 10),
        ];
        let t = threshold();
        let replied: HashSet<String> = ["b".to_string()].into();

        let first = classify(posts.clone(), t, &replied);
        let second = classify(posts, t, &replied);
        assert_eq!(first, second);
    }

    #[test]
    fn bucket_order_matches_input_order() {
        let posts = vec![
            post("2", "Report 11-11111111", 90),
            post("1", "Report 22-22222222", 90),
        ];
        let result = classify(posts, threshold(), &HashSet::new());
        let ids: Vec<&str> = result.actionable.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["2", "1"]);
    }
}
