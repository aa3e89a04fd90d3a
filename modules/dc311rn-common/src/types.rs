use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single post from a timeline, normalized from the Twitter v1.1 payload.
/// Immutable once built; never written back anywhere.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    /// Opaque status id (`id_str` upstream — the numeric `id` field loses
    /// precision in JSON parsers, so the string form is canonical).
    pub id: String,
    /// Full untruncated text (`full_text` in extended tweet mode).
    pub text: String,
    pub created_at: DateTime<Utc>,
    /// Set when this post is itself a reply to another post.
    pub in_reply_to_id: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}
