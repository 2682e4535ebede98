//! HTTP client for the scheduling provider's REST API.
//!
//! Wraps `reqwest` with API key management, per-call deadlines and the
//! provider's `{"success": false, "code": ...}` error envelope. Duplicate
//! order numbers and ambiguous geocoding are surfaced as dedicated
//! [`ProviderError`] variants so the booking layer can recover from them.

use std::time::Duration;

use reqwest::{Client, Method, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{ProviderError, ERR_DUPLICATE_ORDER, ERR_MULTIPLE_GEOCODING_RESULTS};
use crate::types::{Envelope, ErrorFields};

/// Default back-off base for retried calls.
const DEFAULT_BACKOFF_BASE_MS: u64 = 250;

/// Client for the scheduling provider.
///
/// Use [`SchedulingClient::new`] with values from `AppConfig`; tests point it
/// at a wiremock server and disable back-off via [`SchedulingClient::with_retry_policy`].
#[derive(Debug, Clone)]
pub struct SchedulingClient {
    pub(crate) client: Client,
    api_key: String,
    base_url: Url,
    pub(crate) max_retries: u32,
    pub(crate) backoff_base_ms: u64,
}

impl SchedulingClient {
    /// Creates a client. Every request is bounded by `timeout_secs`.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`ProviderError::InvalidBaseUrl`] if
    /// `base_url` does not parse.
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
            max_retries: 1,
            backoff_base_ms: DEFAULT_BACKOFF_BASE_MS,
        })
    }

    #[must_use]
    pub fn with_retry_policy(mut self, max_retries: u32, backoff_base_ms: u64) -> Self {
        self.max_retries = max_retries;
        self.backoff_base_ms = backoff_base_ms;
        self
    }

    /// Builds the endpoint URL with the API key as a query parameter.
    pub(crate) fn build_url(&self, endpoint: &str, extra: &[(&str, &str)]) -> Url {
        let mut url = self
            .base_url
            .join(endpoint)
            .unwrap_or_else(|_| self.base_url.clone());
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("key", &self.api_key);
            for (k, v) in extra {
                pairs.append_pair(k, v);
            }
        }
        url
    }

    /// Builds a JSON POST request for `endpoint`.
    pub(crate) fn post_request<B>(&self, endpoint: &str, body: &B) -> reqwest::RequestBuilder
    where
        B: Serialize + ?Sized,
    {
        let url = self.build_url(endpoint, &[]);
        self.client.request(Method::POST, url).json(body)
    }

    /// POSTs `body` as JSON and returns the decoded envelope payload.
    pub(crate) async fn post<B, T>(
        &self,
        endpoint: &str,
        order_no: Option<&str>,
        body: &B,
    ) -> Result<T, ProviderError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self.post_request(endpoint, body);
        self.execute(endpoint, order_no, request).await
    }

    /// GETs `endpoint` with extra query parameters.
    pub(crate) async fn get<T>(
        &self,
        endpoint: &str,
        query: &[(&str, &str)],
    ) -> Result<T, ProviderError>
    where
        T: DeserializeOwned,
    {
        let url = self.build_url(endpoint, query);
        let request = self.client.request(Method::GET, url);
        self.execute(endpoint, None, request).await
    }

    async fn execute<T>(
        &self,
        endpoint: &str,
        order_no: Option<&str>,
        request: reqwest::RequestBuilder,
    ) -> Result<T, ProviderError>
    where
        T: DeserializeOwned,
    {
        let body = self.execute_raw(endpoint, order_no, request).await?;
        let envelope: Envelope<T> =
            serde_json::from_value(body).map_err(|source| ProviderError::Deserialize {
                context: endpoint.to_owned(),
                source,
            })?;
        Ok(envelope.data)
    }

    /// Sends the request and returns the full JSON body once the envelope
    /// reports success.
    pub(crate) async fn execute_raw(
        &self,
        endpoint: &str,
        order_no: Option<&str>,
        request: reqwest::RequestBuilder,
    ) -> Result<serde_json::Value, ProviderError> {
        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;

        let body: serde_json::Value = if text.trim().is_empty() {
            serde_json::Value::Null
        } else {
            match serde_json::from_str(&text) {
                Ok(v) => v,
                Err(source) if status.is_success() => {
                    return Err(ProviderError::Deserialize {
                        context: endpoint.to_owned(),
                        source,
                    })
                }
                Err(_) => serde_json::json!({ "success": false, "message": text }),
            }
        };

        Self::check_envelope(status, order_no, &body)?;
        Ok(body)
    }

    /// Maps a failure envelope or non-2xx status to a [`ProviderError`].
    fn check_envelope(
        status: StatusCode,
        order_no: Option<&str>,
        body: &serde_json::Value,
    ) -> Result<(), ProviderError> {
        let success = body
            .get("success")
            .and_then(serde_json::Value::as_bool)
            .unwrap_or(false);
        if status.is_success() && success {
            return Ok(());
        }

        let fields: ErrorFields = serde_json::from_value(body.clone()).unwrap_or_default();
        match fields.code.as_deref() {
            Some(ERR_DUPLICATE_ORDER) => Err(ProviderError::DuplicateOrder {
                order_no: order_no.unwrap_or_default().to_owned(),
            }),
            Some(ERR_MULTIPLE_GEOCODING_RESULTS) if !fields.geocoding_results.is_empty() => {
                Err(ProviderError::AmbiguousLocation {
                    candidates: fields.geocoding_results,
                })
            }
            _ => Err(ProviderError::Api {
                status: status.as_u16(),
                code: fields.code,
                message: fields
                    .message
                    .unwrap_or_else(|| "unknown provider error".to_owned()),
                body: body.clone(),
            }),
        }
    }
}

/// Ensures the base URL ends with exactly one slash so relative endpoint
/// names join beneath it instead of replacing the last path segment.
pub(crate) fn normalise_base_url(base_url: &str) -> Result<Url, ProviderError> {
    let normalised = format!("{}/", base_url.trim_end_matches('/'));
    Url::parse(&normalised).map_err(|e| ProviderError::InvalidBaseUrl {
        url: base_url.to_owned(),
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_client(base_url: &str) -> SchedulingClient {
        SchedulingClient::new("test-key", base_url, 10)
            .expect("client construction should not fail")
    }

    #[test]
    fn build_url_appends_endpoint_and_key() {
        let client = test_client("https://provider.example/api/v1");
        let url = client.build_url("create_order", &[]);
        assert_eq!(
            url.as_str(),
            "https://provider.example/api/v1/create_order?key=test-key"
        );
    }

    #[test]
    fn build_url_strips_duplicate_trailing_slash() {
        let client = test_client("https://provider.example/api/v1//");
        let url = client.build_url("get_orders", &[("orderNo", "SO 1&2")]);
        assert!(
            url.as_str()
                .starts_with("https://provider.example/api/v1/get_orders?key=test-key&orderNo="),
            "unexpected url: {url}"
        );
        assert!(!url.as_str().contains("SO 1&2"), "query must be encoded: {url}");
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        let result = SchedulingClient::new("k", "not a url", 10);
        assert!(matches!(result, Err(ProviderError::InvalidBaseUrl { .. })));
    }

    #[test]
    fn duplicate_code_maps_to_duplicate_order() {
        let body = serde_json::json!({ "success": false, "code": "ERR_DUP_ORDER_NO", "message": "dup" });
        let err = SchedulingClient::check_envelope(StatusCode::OK, Some("SO-1"), &body).unwrap_err();
        assert!(matches!(err, ProviderError::DuplicateOrder { ref order_no } if order_no == "SO-1"));
    }

    #[test]
    fn multiple_results_without_candidates_is_a_plain_api_error() {
        let body = serde_json::json!({ "success": false, "code": "ERR_LOC_MULTIPLE_RESULTS" });
        let err = SchedulingClient::check_envelope(StatusCode::OK, None, &body).unwrap_err();
        assert!(matches!(err, ProviderError::Api { ref code, .. } if code.as_deref() == Some("ERR_LOC_MULTIPLE_RESULTS")));
    }

    #[test]
    fn non_2xx_with_success_flag_is_still_an_error() {
        let body = serde_json::json!({ "success": true });
        let err = SchedulingClient::check_envelope(StatusCode::BAD_GATEWAY, None, &body).unwrap_err();
        assert_eq!(err.status(), 502);
    }
}
