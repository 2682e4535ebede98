//! Geocoding client.
//!
//! Returns every match in the geocoder's own order; choosing among them is
//! left to the caller.

use std::time::Duration;

use reqwest::{Client, Url};

use crate::client::normalise_base_url;
use crate::error::ProviderError;
use crate::types::{GeocodeMatch, GeocodeResponse};

const STATUS_OK: &str = "OK";
const STATUS_ZERO_RESULTS: &str = "ZERO_RESULTS";

#[derive(Debug, Clone)]
pub struct GeocodeClient {
    client: Client,
    api_key: String,
    base_url: Url,
}

impl GeocodeClient {
    /// # Errors
    ///
    /// Returns [`ProviderError::Http`] if the `reqwest::Client` cannot be
    /// built, or [`ProviderError::InvalidBaseUrl`] for a malformed base URL.
    pub fn new(api_key: &str, base_url: &str, timeout_secs: u64) -> Result<Self, ProviderError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("fieldbook/0.1 (survey-booking)")
            .build()?;
        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            base_url: normalise_base_url(base_url)?,
        })
    }

    fn build_url(&self, address: &str) -> Url {
        let mut url = self
            .base_url
            .join("geocode/json")
            .unwrap_or_else(|_| self.base_url.clone());
        url.query_pairs_mut()
            .append_pair("address", address)
            .append_pair("key", &self.api_key);
        url
    }

    /// Geocodes a single-line address. An empty vector means no match.
    ///
    /// # Errors
    ///
    /// - [`ProviderError::Http`] on network failure or non-2xx status.
    /// - [`ProviderError::Api`] when the geocoder reports a status other than
    ///   `OK` / `ZERO_RESULTS` (quota, denied key, ...).
    /// - [`ProviderError::Deserialize`] if the body has an unexpected shape.
    pub async fn geocode(&self, address: &str) -> Result<Vec<GeocodeMatch>, ProviderError> {
        let url = self.build_url(address);
        let response = self.client.get(url).send().await?.error_for_status()?;
        let text = response.text().await?;
        let parsed: GeocodeResponse =
            serde_json::from_str(&text).map_err(|source| ProviderError::Deserialize {
                context: "geocode".to_owned(),
                source,
            })?;

        match parsed.status.as_str() {
            STATUS_OK => Ok(parsed.results.into_iter().map(GeocodeMatch::from).collect()),
            STATUS_ZERO_RESULTS => Ok(Vec::new()),
            other => Err(ProviderError::Api {
                status: 200,
                code: Some(other.to_owned()),
                message: parsed
                    .error_message
                    .unwrap_or_else(|| format!("geocoder status {other}")),
                body: serde_json::Value::Null,
            }),
        }
    }
}
