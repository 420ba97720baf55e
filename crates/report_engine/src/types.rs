use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

pub type RequestId = u64;

/// Body of `POST /api/generate-report`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportRequest {
    pub request_text: String,
}

/// One entry of `report_sections` as sent by the orchestrator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportSection {
    /// The orchestrator sends `null` when a subtask carries no title; that reads as "".
    #[serde(default, deserialize_with = "null_as_empty")]
    pub subtask_title: String,
    pub result: Value,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Response body of `POST /api/generate-report`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportResponse {
    pub report_sections: Vec<ReportSection>,
    pub assembled_report: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedReport {
    pub response: ReportResponse,
    pub elapsed: Duration,
}

#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    ReportCompleted {
        request_id: RequestId,
        result: Result<GeneratedReport, ReportRequestError>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigLoadError {
    #[error("invalid url: {0}")]
    InvalidUrl(String),
    #[error("failed to fetch runtime config: {0}")]
    Network(String),
    #[error("failed to load runtime config: http status {0}")]
    HttpStatus(u16),
    #[error("malformed runtime config: {0}")]
    Malformed(String),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct ReportRequestError {
    pub kind: FailureKind,
    pub message: String,
}

impl ReportRequestError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidUrl,
    HttpStatus(u16),
    Timeout,
    TooLarge { max_bytes: u64, actual: Option<u64> },
    MalformedBody,
    Network,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::TooLarge { max_bytes, actual } => {
                write!(f, "response too large (max {max_bytes}, actual {actual:?})")
            }
            FailureKind::MalformedBody => write!(f, "malformed response body"),
            FailureKind::Network => write!(f, "network error"),
        }
    }
}
