use std::time::Instant;

use reqwest::{header::HeaderValue, Method, RequestBuilder, Response, Url};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tracing::{info_span, warn, Instrument};

use super::instrument::ClientSpan;
use crate::config::ApiConfig;
use crate::error::{AppError, AppResult};
use crate::telemetry::RequestMetrics;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Thin REST client for the backend. One request per call: no retries,
/// no batching, no pagination.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
    metrics: RequestMetrics,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: Option<String>,
    message: Option<String>,
}

impl ApiClient {
    pub fn new(config: &ApiConfig) -> AppResult<Self> {
        let http = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self::with_http_client(http, config.base_url.clone()))
    }

    pub fn with_http_client(http: reqwest::Client, base_url: Url) -> Self {
        Self {
            http,
            base_url,
            metrics: RequestMetrics::new("backend-api"),
        }
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Build `{base}/seg1/seg2/.../` with every segment percent-encoded.
    pub fn endpoint(&self, segments: &[&str]) -> AppResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| AppError::InvalidInput(format!("{} cannot be a base URL", self.base_url)))?
            .pop_if_empty()
            .extend(segments)
            .push("");
        Ok(url)
    }

    pub async fn get_json<T: DeserializeOwned>(
        &self,
        route: &'static str,
        url: Url,
        query: &[(&str, &str)],
    ) -> AppResult<T> {
        let builder = self.http.get(url.clone()).query(query);
        let response = self.execute(Method::GET, route, &url, builder).await?;
        decode(response).await
    }

    pub async fn post_json<B, T>(&self, route: &'static str, url: Url, body: &B) -> AppResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let builder = self.http.post(url.clone()).json(body);
        let response = self.execute(Method::POST, route, &url, builder).await?;
        decode(response).await
    }

    pub async fn put_json<B, T>(&self, route: &'static str, url: Url, body: &B) -> AppResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let builder = self.http.put(url.clone()).json(body);
        let response = self.execute(Method::PUT, route, &url, builder).await?;
        decode(response).await
    }

    /// DELETE; the backend answers 204 with no body.
    pub async fn delete(&self, route: &'static str, url: Url) -> AppResult<()> {
        let builder = self.http.delete(url.clone());
        self.execute(Method::DELETE, route, &url, builder).await?;
        Ok(())
    }

    async fn execute(
        &self,
        method: Method,
        route: &'static str,
        url: &Url,
        builder: RequestBuilder,
    ) -> AppResult<Response> {
        let request_id = uuid::Uuid::now_v7().to_string();
        let span = ClientSpan::start(&method, url, route, &request_id);
        let tracing_span = info_span!(
            "http_request",
            method = %method,
            route = %route,
            request_id = %request_id,
        );

        let mut builder = builder;
        if let Ok(value) = HeaderValue::from_str(&request_id) {
            builder = builder.header(REQUEST_ID_HEADER, value);
        }

        let start_time = Instant::now();
        let result = builder.send().instrument(tracing_span.clone()).await;
        let duration = start_time.elapsed();

        let response = match result {
            Ok(response) => response,
            Err(err) => {
                self.metrics.record_failure(method.as_str(), route, duration);
                span.fail(&err);
                tracing_span.in_scope(|| warn!(error = %err, "Request failed"));
                return Err(AppError::Network(err));
            }
        };

        let status = response.status();
        self.metrics
            .record(method.as_str(), route, status.as_u16(), duration);
        span.finish(status.as_u16(), duration);

        if status.is_success() {
            return Ok(response);
        }

        let text = response.text().await.unwrap_or_default();
        let message = error_message(&text)
            .unwrap_or_else(|| status.canonical_reason().unwrap_or("Request failed").to_string());
        tracing_span.in_scope(|| warn!(status = status.as_u16(), %message, "Backend rejected request"));
        Err(AppError::from_status(status, message))
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> AppResult<T> {
    let bytes = response.bytes().await?;
    Ok(serde_json::from_slice(&bytes)?)
}

/// Pull a readable message out of an error body: `{"error": ..}`,
/// `{"message": ..}`, or the raw text.
fn error_message(body: &str) -> Option<String> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return None;
    }
    match serde_json::from_str::<ErrorBody>(trimmed) {
        Ok(ErrorBody { error: Some(e), .. }) => Some(e),
        Ok(ErrorBody { message: Some(m), .. }) => Some(m),
        _ => Some(trimmed.to_string()),
    }
}
