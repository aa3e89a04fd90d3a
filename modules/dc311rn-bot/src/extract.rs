//! Service request number extraction from free text.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;

/// A normalized service request number, `NN-NNNNNNNN`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RequestIdentifier(String);

impl RequestIdentifier {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RequestIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// Two-digit fiscal-year prefix, a hyphen or space, eight digits. A bare run
// of ten digits is not a service request number (it is usually a phone
// number), so the separator is required.
fn pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"(\d{2})[- ](\d{8})").expect("valid regex"))
}

/// Scan `text` left-to-right for service request numbers, normalized to
/// `NN-NNNNNNNN`. First-occurrence order, duplicates preserved. A post with
/// no matches yields an empty vec.
pub fn extract(text: &str) -> Vec<RequestIdentifier> {
    pattern()
        .captures_iter(text)
        .map(|caps| RequestIdentifier(format!("{}-{}", &caps[1], &caps[2])))
        .collect()
}
