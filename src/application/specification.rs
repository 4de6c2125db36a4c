use crate::application::client::ApiResponse;
use crate::domain::error::{SuiteError, SuiteResult};
use crate::infrastructure::config::{DEFAULT_MAX_LATENCY, SuiteConfig, parse_base_url};
use reqwest::{StatusCode, Url};
use std::time::Duration;
use tracing::{debug, warn};

pub const JSON_CONTENT_TYPE: &str = "application/json";

/// Where requests go and how their bodies are encoded.
#[derive(Debug, Clone)]
pub struct RequestSpecification {
    base_url: Url,
    content_type: &'static str,
    api_key: Option<String>,
}

impl RequestSpecification {
    pub fn with_api_key(mut self, api_key: Option<String>) -> Self {
        self.api_key = api_key;
        self
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn content_type(&self) -> &'static str {
        self.content_type
    }

    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref()
    }

    /// Joins a relative path such as `api/users?page=2` onto the base URL.
    pub fn resolve(&self, path: &str) -> SuiteResult<Url> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(|e| SuiteError::Config(format!("cannot resolve '{}' against {}: {}", path, self.base_url, e)))
    }
}

/// What every response must satisfy before its body is looked at.
#[derive(Debug, Clone)]
pub struct ResponseSpecification {
    expected_status: StatusCode,
    max_latency: Duration,
}

impl ResponseSpecification {
    pub fn with_max_latency(mut self, max_latency: Duration) -> Self {
        self.max_latency = max_latency;
        self
    }

    pub fn expected_status(&self) -> StatusCode {
        self.expected_status
    }

    pub fn max_latency(&self) -> Duration {
        self.max_latency
    }

    pub fn verify(&self, response: &ApiResponse) -> SuiteResult<()> {
        if response.status() != self.expected_status {
            warn!(
                expected = %self.expected_status,
                actual = %response.status(),
                body = %response.text(),
                "Unexpected status code"
            );
            return Err(SuiteError::assertion(
                format!("status code of {} {}", response.method(), response.url()),
                self.expected_status.as_u16(),
                response.status().as_u16(),
            ));
        }

        if response.elapsed() >= self.max_latency {
            warn!(
                elapsed_ms = response.elapsed().as_millis(),
                max_latency_ms = self.max_latency.as_millis(),
                body = %response.text(),
                "Response time ceiling exceeded"
            );
            return Err(SuiteError::assertion(
                format!("response time of {} {} below ceiling", response.method(), response.url()),
                format!("< {}ms", self.max_latency.as_millis()),
                format!("{}ms", response.elapsed().as_millis()),
            ));
        }

        if self.expected_status == StatusCode::NO_CONTENT {
            if !response.is_empty() {
                warn!(body = %response.text(), "No-content response carried a body");
                return Err(SuiteError::assertion(
                    format!("empty body of {} {}", response.method(), response.url()),
                    "",
                    response.text(),
                ));
            }
        } else if !response.is_empty() {
            let content_type = response.content_type().unwrap_or_default();
            if !content_type.starts_with(JSON_CONTENT_TYPE) {
                warn!(content_type = %content_type, body = %response.text(), "Response is not JSON");
                return Err(SuiteError::assertion(
                    format!("content type of {} {}", response.method(), response.url()),
                    JSON_CONTENT_TYPE,
                    content_type,
                ));
            }
        }

        debug!(
            status = %response.status(),
            elapsed_ms = response.elapsed().as_millis(),
            "Response specification satisfied"
        );
        Ok(())
    }
}

/// A request/response pair handed to the client for one call.
#[derive(Debug, Clone)]
pub struct Specification {
    pub request: RequestSpecification,
    pub response: ResponseSpecification,
}

impl Specification {
    pub fn install(request: RequestSpecification, response: ResponseSpecification) -> Self {
        Self { request, response }
    }

    /// Builds the specification a scenario uses from the run configuration.
    pub fn for_config(config: &SuiteConfig, expected_status: StatusCode) -> Self {
        let request = RequestSpecification {
            base_url: config.base_url.clone(),
            content_type: JSON_CONTENT_TYPE,
            api_key: config.api_key.clone(),
        };
        let response = response_specification(expected_status).with_max_latency(config.max_latency);
        Self::install(request, response)
    }
}

pub fn request_specification(base_url: &str) -> SuiteResult<RequestSpecification> {
    Ok(RequestSpecification {
        base_url: parse_base_url(base_url)?,
        content_type: JSON_CONTENT_TYPE,
        api_key: None,
    })
}

pub fn response_specification(expected_status: StatusCode) -> ResponseSpecification {
    ResponseSpecification {
        expected_status,
        max_latency: DEFAULT_MAX_LATENCY,
    }
}

pub fn response_specification_200() -> ResponseSpecification {
    response_specification(StatusCode::OK)
}

pub fn response_specification_400() -> ResponseSpecification {
    response_specification(StatusCode::BAD_REQUEST)
}

pub fn install(request: RequestSpecification, response: ResponseSpecification) -> Specification {
    Specification::install(request, response)
}
