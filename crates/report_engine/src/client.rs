use std::time::{Duration, Instant};

use futures_util::StreamExt;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use report_logging::report_debug;
use url::Url;

use crate::{FailureKind, GeneratedReport, ReportRequest, ReportRequestError, ReportResponse};

/// Report endpoint, relative to the orchestrator base URL.
pub const REPORT_PATH: &str = "api/generate-report";

#[derive(Debug, Clone)]
pub struct ClientSettings {
    pub connect_timeout: Duration,
    /// Overall deadline per request. `None` waits for the orchestrator indefinitely.
    pub request_timeout: Option<Duration>,
    pub max_bytes: u64,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(30),
            request_timeout: None,
            max_bytes: 16 * 1024 * 1024,
        }
    }
}

impl ClientSettings {
    pub(crate) fn build_client(&self) -> Result<reqwest::Client, reqwest::Error> {
        let mut builder = reqwest::Client::builder().connect_timeout(self.connect_timeout);
        if let Some(timeout) = self.request_timeout {
            builder = builder.timeout(timeout);
        }
        builder.build()
    }
}

#[async_trait::async_trait]
pub trait ReportClient: Send + Sync {
    async fn generate(&self, request_text: &str) -> Result<GeneratedReport, ReportRequestError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestReportClient {
    client: reqwest::Client,
    endpoint: Url,
    max_bytes: u64,
}

impl ReqwestReportClient {
    pub fn new(orchestrator_url: &Url, settings: &ClientSettings) -> Result<Self, ReportRequestError> {
        let client = settings
            .build_client()
            .map_err(|err| ReportRequestError::new(FailureKind::Network, err.to_string()))?;
        Ok(Self {
            client,
            endpoint: endpoint_url(orchestrator_url)?,
            max_bytes: settings.max_bytes,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait::async_trait]
impl ReportClient for ReqwestReportClient {
    async fn generate(&self, request_text: &str) -> Result<GeneratedReport, ReportRequestError> {
        let body = serde_json::to_vec(&ReportRequest {
            request_text: request_text.to_owned(),
        })
        .map_err(|err| ReportRequestError::new(FailureKind::MalformedBody, err.to_string()))?;

        report_debug!("POST {} ({} bytes)", self.endpoint, body.len());
        let started = Instant::now();
        let response = self
            .client
            .post(self.endpoint.clone())
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json")
            .body(body)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            report_debug!("Report endpoint answered {}", status);
            return Err(ReportRequestError::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }

        if let Some(content_len) = response.content_length() {
            if content_len > self.max_bytes {
                return Err(ReportRequestError::new(
                    FailureKind::TooLarge {
                        max_bytes: self.max_bytes,
                        actual: Some(content_len),
                    },
                    "response too large",
                ));
            }
        }

        let mut bytes = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_transport_error)?;
            let next_len = bytes.len() as u64 + chunk.len() as u64;
            if next_len > self.max_bytes {
                return Err(ReportRequestError::new(
                    FailureKind::TooLarge {
                        max_bytes: self.max_bytes,
                        actual: Some(next_len),
                    },
                    "response too large",
                ));
            }
            bytes.extend_from_slice(&chunk);
        }

        let response: ReportResponse = serde_json::from_slice(&bytes)
            .map_err(|err| ReportRequestError::new(FailureKind::MalformedBody, err.to_string()))?;
        let elapsed = started.elapsed();
        report_debug!(
            "Report received: {} sections, {} chars in {:?}",
            response.report_sections.len(),
            response.assembled_report.len(),
            elapsed
        );

        Ok(GeneratedReport { response, elapsed })
    }
}

/// Joins the report path under the base URL, keeping any base path prefix.
fn endpoint_url(base: &Url) -> Result<Url, ReportRequestError> {
    if base.cannot_be_a_base() {
        return Err(ReportRequestError::new(
            FailureKind::InvalidUrl,
            format!("{base} cannot be a base url"),
        ));
    }
    let mut base = base.clone();
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    base.join(REPORT_PATH)
        .map_err(|err| ReportRequestError::new(FailureKind::InvalidUrl, err.to_string()))
}

pub(crate) fn map_transport_error(err: reqwest::Error) -> ReportRequestError {
    if err.is_timeout() {
        return ReportRequestError::new(FailureKind::Timeout, err.to_string());
    }
    ReportRequestError::new(FailureKind::Network, err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_keeps_base_path_prefix() {
        let cases = [
            ("http://orchestrator:8080", "http://orchestrator:8080/api/generate-report"),
            ("http://orchestrator:8080/", "http://orchestrator:8080/api/generate-report"),
            ("https://host/orch", "https://host/orch/api/generate-report"),
            ("https://host/orch/", "https://host/orch/api/generate-report"),
        ];
        for (base, expected) in cases {
            let url = endpoint_url(&Url::parse(base).unwrap()).unwrap();
            assert_eq!(url.as_str(), expected, "base {base}");
        }
    }

    #[test]
    fn endpoint_rejects_opaque_urls() {
        let err = endpoint_url(&Url::parse("mailto:ops@example.com").unwrap()).unwrap_err();
        assert_eq!(err.kind, FailureKind::InvalidUrl);
    }
}
