//! Concurrent lookup fan-out: one outcome per identifier, in input order.

use futures::future::join_all;

use dc311rn_client::{Dc311Error, ServiceRequest};

use crate::extract::RequestIdentifier;
use crate::traits::RequestLookup;

/// What happened to one identifier's lookup. Exactly one per attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum LookupOutcome {
    Found(ServiceRequest),
    NotFound,
    UpstreamUnavailable,
    UnknownError(String),
}

/// Resolve every identifier concurrently. Returns one outcome per input,
/// order-preserving; a failing lookup never cancels its siblings, and the
/// fan-out itself cannot fail. Duplicate identifiers are looked up twice.
pub async fn resolve_all(
    lookup: &dyn RequestLookup,
    ids: &[RequestIdentifier],
) -> Vec<LookupOutcome> {
    join_all(ids.iter().map(|id| async move {
        match lookup.lookup(id).await {
            Ok(record) => LookupOutcome::Found(record),
            Err(Dc311Error::NotFound) => LookupOutcome::NotFound,
            Err(Dc311Error::Unavailable) => LookupOutcome::UpstreamUnavailable,
            Err(err) => LookupOutcome::UnknownError(err.to_string()),
        }
    }))
    .await
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicU32, Ordering};

    use async_trait::async_trait;
    use dc311rn_client::{Location, Service, ServiceOrder};

    use super::*;
    use crate::extract::extract;

    fn record(id: &str) -> ServiceRequest {
        ServiceRequest {
            service_request_id: id.to_string(),
            service_order: ServiceOrder {
                service: Service {
                    service_name: "Pothole".to_string(),
                },
            },
            location: Location {
                latitude: 38.9,
                longitude: -77.03,
            },
        }
    }

    /// Mock lookup keyed by identifier; unknown identifiers are 404s.
    struct MapLookup {
        records: HashMap<String, ServiceRequest>,
        unavailable: Vec<String>,
        calls: AtomicU32,
    }

    impl MapLookup {
        fn new(records: &[&str]) -> Self {
            Self {
                records: records
                    .iter()
                    .map(|id| (id.to_string(), record(id)))
                    .collect(),
                unavailable: Vec::new(),
                calls: AtomicU32::new(0),
            }
        }
    }

    #[async_trait]
    impl RequestLookup for MapLookup {
        async fn lookup(&self, id: &RequestIdentifier) -> Result<ServiceRequest, Dc311Error> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.unavailable.contains(&id.as_str().to_string()) {
                return Err(Dc311Error::Unavailable);
            }
            self.records
                .get(id.as_str())
                .cloned()
                .ok_or(Dc311Error::NotFound)
        }
    }

    #[tokio::test]
    async fn one_outcome_per_identifier_in_input_order() {
        let lookup = MapLookup::new(&["11-11111111", "33-33333333"]);
        let ids = extract("11-11111111 then 22-22222222 then 33-33333333");

        let outcomes = resolve_all(&lookup, &ids).await;

        assert_eq!(outcomes.len(), 3);
        assert!(matches!(outcomes[0], LookupOutcome::Found(_)));
        assert_eq!(outcomes[1], LookupOutcome::NotFound);
        assert!(matches!(outcomes[2], LookupOutcome::Found(_)));
    }

    #[tokio::test]
    async fn failure_does_not_abort_siblings() {
        let mut lookup = MapLookup::new(&["11-11111111"]);
        lookup.unavailable.push("22-22222222".to_string());
        let ids = extract("22-22222222 and 11-11111111");

        let outcomes = resolve_all(&lookup, &ids).await;

        assert_eq!(outcomes[0], LookupOutcome::UpstreamUnavailable);
        assert!(matches!(outcomes[1], LookupOutcome::Found(_)));
    }

    #[tokio::test]
    async fn duplicate_identifiers_are_looked_up_twice() {
        let lookup = MapLookup::new(&["11-11111111"]);
        let ids = extract("11-11111111 and again 11-11111111");

        let outcomes = resolve_all(&lookup, &ids).await;

        assert_eq!(outcomes.len(), 2);
        assert_eq!(lookup.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn empty_input_yields_empty_output() {
        let lookup = MapLookup::new(&[]);
        let outcomes = resolve_all(&lookup, &[]).await;
        assert!(outcomes.is_empty());
    }
}
