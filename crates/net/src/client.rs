//! HTTP client for the car-rental backend

use std::time::Duration;

use carhire_core::config::{ApiConfig, Config};
use reqwest::{Method, RequestBuilder, Response, Url};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::auth::AuthService;
use crate::cars::CarService;
use crate::error::{Error, Result};
use crate::payments::PaymentService;
use crate::rentals::RentalService;
use crate::users::UserService;

/// Header carrying the per-request correlation id
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Handle to the REST backend.
///
/// Cheap to clone; the underlying connection pool is shared.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
}

impl ApiClient {
    /// Build a client with the configured timeout
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Self::with_http(http, &config.base_url)
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(&config.api)
    }

    /// Use an existing `reqwest` client
    pub fn with_http(http: reqwest::Client, base_url: &str) -> Result<Self> {
        let base_url = Url::parse(base_url.trim_end_matches('/'))
            .map_err(|e| Error::InvalidUrl(format!("{}: {}", base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(Error::InvalidUrl(base_url.to_string()));
        }
        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Absolute URL for a path below the base URL
    pub fn url(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| Error::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    pub(crate) fn request(&self, method: Method, segments: &[&str]) -> Result<RequestBuilder> {
        let url = self.url(segments)?;
        Ok(self
            .http
            .request(method, url)
            .header(REQUEST_ID_HEADER, Uuid::new_v4().to_string()))
    }

    /// Send a request, turning non-success statuses into [`Error::Api`].
    ///
    /// The error message is whatever the backend explained, or `fallback`.
    pub(crate) async fn execute(&self, builder: RequestBuilder, fallback: &str) -> Result<Response> {
        let request = builder.build()?;
        let request_id = request
            .headers()
            .get(REQUEST_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();
        debug!(
            method = %request.method(),
            path = %request.url().path(),
            request_id = %request_id,
            "Sending request"
        );

        let response = self.http.execute(request).await?;
        let status = response.status();
        if status.is_success() {
            debug!(status = status.as_u16(), request_id = %request_id, "Request succeeded");
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = error_message(&body).unwrap_or_else(|| fallback.to_string());
        warn!(
            status = status.as_u16(),
            request_id = %request_id,
            message = %message,
            "Request failed"
        );
        Err(Error::Api {
            status: status.as_u16(),
            message,
        })
    }

    /// Send and decode a JSON body. An empty body decodes as `null`.
    pub(crate) async fn send_json<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
        fallback: &str,
    ) -> Result<T> {
        let response = self.execute(builder, fallback).await?;
        let bytes = response.bytes().await?;
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(serde_json::from_value(Value::Null)?);
        }
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// Send and ignore whatever the backend returns
    pub(crate) async fn send(&self, builder: RequestBuilder, fallback: &str) -> Result<()> {
        self.execute(builder, fallback).await?;
        Ok(())
    }

    pub fn auth(&self) -> AuthService<'_> {
        AuthService::new(self)
    }

    pub fn cars(&self) -> CarService<'_> {
        CarService::new(self)
    }

    pub fn rentals(&self) -> RentalService<'_> {
        RentalService::new(self)
    }

    pub fn payments(&self) -> PaymentService<'_> {
        PaymentService::new(self)
    }

    pub fn users(&self) -> UserService<'_> {
        UserService::new(self)
    }
}

/// Pull a human-readable message out of an error body
fn error_message(body: &str) -> Option<String> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return None;
    }
    match serde_json::from_str::<Value>(trimmed) {
        Ok(Value::Object(map)) => ["message", "error"]
            .iter()
            .filter_map(|key| map.get(*key).and_then(Value::as_str))
            .map(str::trim)
            .find(|s| !s.is_empty())
            .map(str::to_string),
        Ok(Value::String(s)) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Ok(_) => None,
        Err(_) => Some(trimmed.to_string()),
    }
}
