pub mod error;
pub mod types;

pub use error::{Dc311Error, Result};
pub use types::{Location, Service, ServiceOrder, ServiceRequest};

pub const DEFAULT_BASE_URL: &str = "https://api.dc311rn.com";

const USER_AGENT: &str = "dc311rn-twitterbot";

/// Client for the dc311rn service-request lookup API.
#[derive(Clone)]
pub struct Dc311Client {
    client: reqwest::Client,
    base_url: String,
}

impl Dc311Client {
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL.to_string())
    }

    pub fn with_base_url(base_url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url,
        }
    }

    /// Look up a service request by its normalized number (`NN-NNNNNNNN`).
    ///
    /// 404 and 504 get their own variants — callers treat "doesn't exist"
    /// and "upstream is down" very differently.
    pub async fn service_request(&self, id: &str) -> Result<ServiceRequest> {
        let url = format!("{}/service_requests/{}", self.base_url, id);
        let resp = self
            .client
            .get(&url)
            .header(reqwest::header::USER_AGENT, USER_AGENT)
            .send()
            .await?;

        let status = resp.status();
        match status.as_u16() {
            404 => return Err(Dc311Error::NotFound),
            504 => return Err(Dc311Error::Unavailable),
            _ if !status.is_success() => {
                let body = resp.text().await.unwrap_or_default();
                return Err(Dc311Error::Api {
                    status: status.as_u16(),
                    message: body,
                });
            }
            _ => {}
        }

        let sr: ServiceRequest = resp.json().await?;
        tracing::debug!(id, service = sr.service_order.service.service_name.as_str(), "Fetched service request");
        Ok(sr)
    }
}

impl Default for Dc311Client {
    fn default() -> Self {
        Self::new()
    }
}
