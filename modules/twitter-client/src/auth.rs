//! OAuth 1.0a request signing (RFC 5849) for the Twitter v1.1 REST API.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use hmac::{Hmac, Mac};
use rand::{distr::Alphanumeric, Rng};
use sha1::Sha1;

type HmacSha1 = Hmac<Sha1>;

#[derive(Debug, Clone)]
pub struct OauthCredentials {
    pub consumer_key: String,
    pub consumer_secret: String,
    pub access_token: String,
    pub access_token_secret: String,
}

impl OauthCredentials {
    /// Build the `Authorization: OAuth ...` header value for a request.
    /// `params` must contain every query/form parameter the request carries,
    /// unencoded — they are part of the signature base string.
    pub fn authorization_header(&self, method: &str, url: &str, params: &[(String, String)]) -> String {
        let nonce: String = rand::rng()
            .sample_iter(Alphanumeric)
            .take(32)
            .map(char::from)
            .collect();
        let timestamp = chrono::Utc::now().timestamp().to_string();
        self.header_with(method, url, params, &nonce, &timestamp)
    }

    fn header_with(
        &self,
        method: &str,
        url: &str,
        params: &[(String, String)],
        nonce: &str,
        timestamp: &str,
    ) -> String {
        let oauth_params = [
            ("oauth_consumer_key", self.consumer_key.as_str()),
            ("oauth_nonce", nonce),
            ("oauth_signature_method", "HMAC-SHA1"),
            ("oauth_timestamp", timestamp),
            ("oauth_token", self.access_token.as_str()),
            ("oauth_version", "1.0"),
        ];

        // Parameter string: all params percent-encoded, sorted by encoded
        // key/value, joined k=v with '&'.
        let mut encoded: Vec<(String, String)> = params
            .iter()
            .map(|(k, v)| (percent(k), percent(v)))
            .chain(oauth_params.iter().map(|(k, v)| (percent(k), percent(v))))
            .collect();
        encoded.sort();
        let param_string = encoded
            .iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect::<Vec<_>>()
            .join("&");

        let base = format!(
            "{}&{}&{}",
            method.to_uppercase(),
            percent(url),
            percent(&param_string)
        );
        let signing_key = format!(
            "{}&{}",
            percent(&self.consumer_secret),
            percent(&self.access_token_secret)
        );

        let mut mac = HmacSha1::new_from_slice(signing_key.as_bytes())
            .expect("HMAC can take key of any size");
        mac.update(base.as_bytes());
        let signature = STANDARD.encode(mac.finalize().into_bytes());

        let mut header_params: Vec<(String, String)> = oauth_params
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        header_params.push(("oauth_signature".to_string(), signature));
        header_params.sort();

        let fields = header_params
            .iter()
            .map(|(k, v)| format!("{}=\"{}\"", percent(k), percent(v)))
            .collect::<Vec<_>>()
            .join(", ");
        format!("OAuth {fields}")
    }
}

/// RFC 3986 percent-encoding — everything but ALPHA / DIGIT / '-' / '.' /
/// '_' / '~', which is exactly what OAuth 1.0a requires.
fn percent(s: &str) -> String {
    urlencoding::encode(s).into_owned()
}
