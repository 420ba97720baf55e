//! Report engine: HTTP collaborators and effect execution.
mod client;
mod config;
mod engine;
mod persist;
mod types;

pub use client::{ClientSettings, ReportClient, ReqwestReportClient, REPORT_PATH};
pub use config::{load_config, RuntimeConfig, CONFIG_PATH};
pub use engine::{BootstrapError, EngineHandle};
pub use persist::{ensure_report_dir, report_filename, PersistError, ReportWriter};
pub use types::{
    ConfigLoadError, EngineEvent, FailureKind, GeneratedReport, ReportRequest, ReportRequestError,
    ReportResponse, ReportSection, RequestId,
};
