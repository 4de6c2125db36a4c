use crate::application::json_path::JsonPath;
use crate::application::specification::Specification;
use crate::domain::error::{SuiteError, SuiteResult};
use crate::infrastructure::config::SuiteConfig;
use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderMap};
use reqwest::{Method, StatusCode, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::time::{Duration, Instant};
use tracing::{debug, error, info, instrument};
use uuid::Uuid;

pub const REQUEST_ID_HEADER: &str = "x-request-id";
pub const API_KEY_HEADER: &str = "x-api-key";

/// Everything captured from one HTTP exchange.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    method: Method,
    url: Url,
    status: StatusCode,
    headers: HeaderMap,
    body: Vec<u8>,
    elapsed: Duration,
    request_id: String,
}

impl ApiResponse {
    pub fn new(
        method: Method,
        url: Url,
        status: StatusCode,
        headers: HeaderMap,
        body: Vec<u8>,
        elapsed: Duration,
        request_id: String,
    ) -> Self {
        Self {
            method,
            url,
            status,
            headers,
            body,
            elapsed,
            request_id,
        }
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn content_type(&self) -> Option<&str> {
        self.headers.get(CONTENT_TYPE).and_then(|v| v.to_str().ok())
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub fn request_id(&self) -> &str {
        &self.request_id
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    pub fn is_empty(&self) -> bool {
        self.body.iter().all(u8::is_ascii_whitespace)
    }

    /// Deserializes the whole body; missing required fields are an error.
    pub fn extract<T: DeserializeOwned>(&self) -> SuiteResult<T> {
        serde_json::from_slice(&self.body).map_err(|e| {
            error!(
                request_id = %self.request_id,
                target = std::any::type_name::<T>(),
                error = %e,
                body = %self.text(),
                "Failed to deserialize response body"
            );
            SuiteError::deserialization::<T>(e)
        })
    }

    pub fn json(&self) -> SuiteResult<serde_json::Value> {
        self.extract()
    }

    pub fn json_path(&self) -> SuiteResult<JsonPath> {
        Ok(JsonPath::new(self.json()?))
    }
}

/// Thin async HTTP client that checks every response against its specification.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
}

impl ApiClient {
    pub fn new(config: &SuiteConfig) -> SuiteResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()?;
        Ok(Self { http })
    }

    pub async fn get(&self, spec: &Specification, path: &str) -> SuiteResult<ApiResponse> {
        self.send::<()>(spec, Method::GET, path, None).await
    }

    pub async fn post<B>(&self, spec: &Specification, path: &str, body: &B) -> SuiteResult<ApiResponse>
    where
        B: Serialize + ?Sized,
    {
        self.send(spec, Method::POST, path, Some(body)).await
    }

    pub async fn put<B>(&self, spec: &Specification, path: &str, body: &B) -> SuiteResult<ApiResponse>
    where
        B: Serialize + ?Sized,
    {
        self.send(spec, Method::PUT, path, Some(body)).await
    }

    pub async fn delete(&self, spec: &Specification, path: &str) -> SuiteResult<ApiResponse> {
        self.send::<()>(spec, Method::DELETE, path, None).await
    }

    #[instrument(skip(self, spec, body), fields(request_id))]
    async fn send<B>(
        &self,
        spec: &Specification,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> SuiteResult<ApiResponse>
    where
        B: Serialize + ?Sized,
    {
        let url = spec.request.resolve(path)?;
        let request_id = Uuid::new_v4().to_string();
        tracing::Span::current().record("request_id", request_id.as_str());

        let content_type = spec.request.content_type();
        let mut request = self
            .http
            .request(method.clone(), url.clone())
            .header(CONTENT_TYPE, content_type)
            .header(ACCEPT, content_type)
            .header(REQUEST_ID_HEADER, request_id.as_str());
        if let Some(api_key) = spec.request.api_key() {
            request = request.header(API_KEY_HEADER, api_key);
        }
        if let Some(body) = body {
            debug!(body = %serde_json::to_string(body).unwrap_or_default(), "Request body");
            request = request.json(body);
        }

        let start = Instant::now();
        let response = request.send().await.map_err(|e| {
            error!(method = %method, url = %url, error = %e, "Request failed");
            SuiteError::from(e)
        })?;
        let status = response.status();
        let headers = response.headers().clone();
        let body = response.bytes().await?.to_vec();
        let elapsed = start.elapsed();

        info!(
            method = %method,
            path = %path,
            status = %status,
            duration_ms = elapsed.as_millis(),
            request_id = %request_id,
            "Request processed"
        );

        let response = ApiResponse::new(method, url, status, headers, body, elapsed, request_id);
        debug!(body = %response.text(), "Response body");

        spec.response.verify(&response)?;
        Ok(response)
    }
}
