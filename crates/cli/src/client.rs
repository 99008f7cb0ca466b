//! Signed HTTP client for the digital asset API.

use std::sync::Arc;

use http::header::{ACCEPT, CONTENT_TYPE};
use http::{HeaderMap, HeaderValue, Method};
use layer1_signer::{HttpSigner, RequestDescriptor, SignRequestError};
use reqwest::Url;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};

use crate::config::Config;

const APPLICATION_JSON: &str = "application/json";

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error(transparent)]
    Sign(#[from] SignRequestError),

    #[error("invalid request URL: {0}")]
    Url(String),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("failed to encode request body: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("failed to decode response body: {0}")]
    Decode(#[source] serde_json::Error),
}

/// Every request carries `Content-Digest` (when it has a body),
/// `Signature-Input` and `Signature` for the exact URL and bytes sent.
#[derive(Debug, Clone)]
pub struct Layer1Client {
    base_url: String,
    http: reqwest::Client,
    signer: Arc<HttpSigner>,
}

impl Layer1Client {
    pub fn new(config: &Config, signer: Arc<HttpSigner>) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            http,
            signer,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Joins `path` onto the base URL and appends form-encoded query pairs.
    pub fn endpoint(&self, path: &str, query: &[(&str, &str)]) -> Result<Url, ClientError> {
        let raw = format!("{}{}", self.base_url, path);
        let mut url = Url::parse(&raw).map_err(|e| ClientError::Url(format!("{raw}: {e}")))?;
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }
        Ok(url)
    }

    pub async fn get<T: DeserializeOwned>(&self, url: Url) -> Result<T, ClientError> {
        self.send(Method::GET, url, None).await
    }

    pub async fn post<B, T>(&self, url: Url, body: &B) -> Result<T, ClientError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        // Serialized once: these bytes are both digested and sent.
        let bytes = serde_json::to_vec(body).map_err(ClientError::Encode)?;
        self.send(Method::POST, url, Some(bytes)).await
    }

    #[instrument(level = "debug", skip_all, fields(method = %method, url = %url))]
    async fn send<T: DeserializeOwned>(
        &self,
        method: Method,
        url: Url,
        body: Option<Vec<u8>>,
    ) -> Result<T, ClientError> {
        let descriptor = RequestDescriptor::new(&method, url.as_str(), body.as_deref());
        let signed = self.signer.sign(&descriptor)?;

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(APPLICATION_JSON));
        if body.is_some() {
            headers.insert(CONTENT_TYPE, HeaderValue::from_static(APPLICATION_JSON));
        }
        signed.apply(&mut headers);

        let mut request = self.http.request(method, url).headers(headers);
        if let Some(body) = body {
            request = request.body(body);
        }

        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;
        debug!(status = status.as_u16(), body_len = text.len(), "response received");

        if !status.is_success() {
            return Err(ClientError::Status {
                status: status.as_u16(),
                body: text,
            });
        }

        serde_json::from_str(&text).map_err(ClientError::Decode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use layer1_signer::SigningIdentity;
    use std::path::PathBuf;
    use std::time::Duration;

    const PKCS8_PEM: &str = include_str!("../../signer/tests/fixtures/client_key_pkcs8.pem");

    fn client(base_url: &str) -> Layer1Client {
        let config = Config {
            base_url: base_url.to_string(),
            client_id: "client-123".to_string(),
            key_file: PathBuf::from("unused.pem"),
            timeout: Duration::from_secs(5),
        };
        let identity = SigningIdentity::from_pem(PKCS8_PEM, "client-123").unwrap();
        Layer1Client::new(&config, Arc::new(HttpSigner::new(identity))).unwrap()
    }

    #[test]
    fn endpoint_without_query() {
        let url = client("https://api.example.com/")
            .endpoint("/digital/v1/addresses", &[])
            .unwrap();
        assert_eq!(url.as_str(), "https://api.example.com/digital/v1/addresses");
    }

    #[test]
    fn endpoint_encodes_query_values() {
        let url = client("https://api.example.com")
            .endpoint(
                "/digital/v1/transactions",
                &[
                    ("assetPoolId", "pool 1"),
                    ("q", "reference:REF&1 type:(deposit withdrawal)"),
                ],
            )
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.example.com/digital/v1/transactions?assetPoolId=pool+1&q=reference%3AREF%261+type%3A%28deposit+withdrawal%29"
        );
        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert_eq!(pairs[1].1, "reference:REF&1 type:(deposit withdrawal)");
    }

    #[test]
    fn endpoint_rejects_unparseable_base() {
        let err = client("not a url").endpoint("/x", &[]).unwrap_err();
        assert!(matches!(err, ClientError::Url(_)));
    }

    #[test]
    fn status_error_message() {
        let err = ClientError::Status {
            status: 401,
            body: "{\"error\":\"bad signature\"}".into(),
        };
        assert_eq!(err.to_string(), "API returned 401: {\"error\":\"bad signature\"}");
    }
}
