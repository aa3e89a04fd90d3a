use serde::Deserialize;

/// A service request as returned by `GET /service_requests/{id}`.
/// Only the fields the bot reads are modeled; the API returns more.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ServiceRequest {
    pub service_request_id: String,
    pub service_order: ServiceOrder,
    pub location: Location,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ServiceOrder {
    pub service: Service,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Service {
    pub service_name: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
}
