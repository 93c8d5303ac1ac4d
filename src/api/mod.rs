//! Backend API Wrappers
//!
//! Frontend bindings to the REST backend behind the same-origin proxy route,
//! organized by domain.

mod project;
mod task;

use futures::future::{self, Either};
use gloo_timers::future::TimeoutFuture;
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::AppConfig;
use crate::error::ApiError;

// Re-export all public items
pub use project::*;
pub use task::*;

/// Shared HTTP client. Cheap to clone.
#[derive(Clone, Debug)]
pub struct ApiClient {
    http: reqwest::Client,
    base: String,
    timeout_ms: u32,
}

impl ApiClient {
    pub fn new(config: &AppConfig, origin: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            base: config.resolve_api_base(origin),
            timeout_ms: config.request_timeout_ms,
        }
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    /// Absolute URL for an API path
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base, path.trim_start_matches('/'))
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.http.request(method, self.url(path))
    }

    /// Send with the configured timeout and map non-2xx to [`ApiError::Status`]
    async fn send(&self, builder: RequestBuilder) -> Result<Response, ApiError> {
        let request = Box::pin(builder.send());
        let timer = Box::pin(TimeoutFuture::new(self.timeout_ms));

        let response = match future::select(request, timer).await {
            Either::Left((result, _)) => result?,
            Either::Right(_) => return Err(ApiError::Timeout(self.timeout_ms)),
        };

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::from_status(status.as_u16(), &body));
        }
        Ok(response)
    }

    /// Decode a JSON body; empty bodies and 204 yield `None`
    async fn decode_optional<T: DeserializeOwned>(response: Response) -> Result<Option<T>, ApiError> {
        if response.status() == StatusCode::NO_CONTENT {
            return Ok(None);
        }
        let body = response.text().await?;
        decode_body(&body)
    }

    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let response = self.send(self.request(Method::GET, path)).await?;
        Ok(response.json::<T>().await?)
    }

    pub async fn get_json_with_query<T, Q>(&self, path: &str, query: &Q) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let response = self.send(self.request(Method::GET, path).query(query)).await?;
        Ok(response.json::<T>().await?)
    }

    pub async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self.send(self.request(Method::POST, path).json(body)).await?;
        Ok(response.json::<T>().await?)
    }

    pub async fn patch_json<B, T>(&self, path: &str, body: &B) -> Result<Option<T>, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self.send(self.request(Method::PATCH, path).json(body)).await?;
        Self::decode_optional(response).await
    }
}

/// `None` for blank bodies, otherwise the parsed JSON
pub fn decode_body<T: DeserializeOwned>(body: &str) -> Result<Option<T>, ApiError> {
    if body.trim().is_empty() {
        return Ok(None);
    }
    Ok(Some(serde_json::from_str(body)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Task;

    #[test]
    fn test_url_joins_base_and_path() {
        let client = ApiClient::new(&AppConfig::default(), "https://app.test");
        assert_eq!(client.base(), "https://app.test/api/proxy");
        assert_eq!(client.url("/tasks/4"), "https://app.test/api/proxy/tasks/4");
        assert_eq!(client.url("projects"), "https://app.test/api/proxy/projects");
    }

    #[test]
    fn test_decode_blank_body_is_none() {
        let decoded: Option<Task> = decode_body("  ").unwrap();
        assert!(decoded.is_none());
    }

    #[test]
    fn test_decode_bad_body_is_decode_error() {
        let result: Result<Option<Task>, ApiError> = decode_body("{\"id\": ");
        assert!(matches!(result, Err(ApiError::Decode(_))));
    }
}
