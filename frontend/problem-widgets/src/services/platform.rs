use reqwest::{header, Client};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use url::Url;

use crate::error::ClientError;
use crate::metrics::track_platform_call;
use crate::middlewares::csrf::CSRF_HEADER_NAME;

/// JSON-over-HTTP channel to the course platform.
///
/// Every request carries the page's CSRF token and, when known, the caller's
/// session cookie.
#[derive(Debug, Clone)]
pub struct PlatformTransport {
    http: Client,
    base_url: Url,
    csrf_token: String,
    cookie: Option<String>,
}

impl PlatformTransport {
    pub fn new(
        http: Client,
        base_url: Url,
        csrf_token: impl Into<String>,
    ) -> Result<Self, ClientError> {
        let csrf_token = csrf_token.into();
        if csrf_token.trim().is_empty() {
            return Err(ClientError::MissingCsrfToken);
        }
        Ok(Self {
            http,
            base_url: normalize_base_url(base_url),
            csrf_token,
            cookie: None,
        })
    }

    pub fn with_cookie(mut self, cookie: Option<String>) -> Self {
        self.cookie = cookie;
        self
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Relative paths resolve against the base, `/`-prefixed ones against the host.
    pub fn resolve(&self, path: &str) -> Result<Url, ClientError> {
        Ok(self.base_url.join(path)?)
    }

    pub async fn post_json<B, T>(&self, endpoint: &str, path: &str, body: &B) -> Result<T, ClientError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.resolve(path)?;
        track_platform_call(endpoint, self.send(url, body)).await
    }

    async fn send<B, T>(&self, url: Url, body: &B) -> Result<T, ClientError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        tracing::debug!(url = %url, "POST to platform");

        let mut request = self
            .http
            .post(url.clone())
            .header(CSRF_HEADER_NAME, &self.csrf_token)
            .json(body);
        if let Some(cookie) = &self.cookie {
            request = request.header(header::COOKIE, cookie);
        }

        let response = request.send().await?;
        let status = response.status();
        let raw = response.text().await?;

        match decode_body(&raw) {
            Ok(decoded) => Ok(decoded),
            Err(_) if !status.is_success() => {
                tracing::warn!(url = %url, status = %status, "Platform returned an error status");
                Err(ClientError::Status { status, body: raw })
            }
            Err(e) => Err(e),
        }
    }
}

/// Decode a platform response body.
///
/// Some endpoints serialise their result twice, so the body is a JSON string
/// holding the document. A second decode is applied only in that case.
pub fn decode_body<T: DeserializeOwned>(raw: &str) -> Result<T, ClientError> {
    let value: Value = serde_json::from_str(raw)?;
    Ok(decode_value(value)?)
}

/// Decode an already parsed value, unwrapping one level of string encoding.
pub fn decode_value<T: DeserializeOwned>(value: Value) -> Result<T, serde_json::Error> {
    match value {
        Value::String(inner) => serde_json::from_str(&inner),
        other => serde_json::from_value(other),
    }
}

/// Ensure the base path ends with `/` so joins keep its last segment.
pub fn normalize_base_url(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}
