//! Reply composition: resolved service requests → reply text + geotag.

use dc311rn_client::ServiceRequest;
use dc311rn_common::{GeoPoint, Post};

/// Public status page, one URL per referenced request.
pub const STATUS_BASE_URL: &str = "https://www.dc311rn.com";

/// Everything needed to post one reply. Composition is pure; posting it is
/// the transport's job.
#[derive(Debug, Clone, PartialEq)]
pub struct ReplyDraft {
    pub in_reply_to_id: String,
    pub text: String,
    pub location: GeoPoint,
    pub excluded_mention_ids: Vec<String>,
}

/// Compose the reply for `post` from its resolved records. `records` must be
/// non-empty and hold one `Found` record per extracted identifier — the
/// orchestrator short-circuits before composing otherwise.
///
/// The geotag comes from the first record only. Known limitation carried
/// over from the original behavior: a multi-request post anchors its pin to
/// the first request's location.
pub fn compose(post: &Post, records: &[ServiceRequest], excluded_mention_ids: &[String]) -> ReplyDraft {
    let urls: Vec<String> = records
        .iter()
        .map(|sr| {
            format!(
                "{}/{} ({})",
                STATUS_BASE_URL, sr.service_request_id, sr.service_order.service.service_name
            )
        })
        .collect();
    let label = if urls.len() > 1 { "Statuses" } else { "Status" };
    let text = format!("{}: {} \u{2728}", label, urls.join(", "));

    ReplyDraft {
        in_reply_to_id: post.id.clone(),
        text,
        location: GeoPoint {
            lat: records[0].location.latitude,
            lng: records[0].location.longitude,
        },
        excluded_mention_ids: excluded_mention_ids.to_vec(),
    }
}
