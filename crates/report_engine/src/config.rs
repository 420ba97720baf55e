use reqwest::header::{CACHE_CONTROL, PRAGMA};
use report_logging::{report_debug, report_info};
use serde::Deserialize;
use url::Url;

use crate::client::{map_transport_error, ClientSettings};
use crate::ConfigLoadError;

/// Location of the runtime descriptor, relative to the serving origin.
pub const CONFIG_PATH: &str = "/config/config.json";

/// Runtime configuration, loaded once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeConfig {
    /// Base URL of the orchestrator that serves the report endpoint.
    pub orchestrator_url: Url,
}

#[derive(Debug, Deserialize)]
struct RawConfig {
    #[serde(rename = "ORCHESTRATOR_URL")]
    orchestrator_url: String,
}

/// Fetches `{origin}/config/config.json` once, bypassing caches.
///
/// There is no retry and no fallback: any failure is returned to the caller,
/// which is expected to treat it as fatal.
pub async fn load_config(
    origin: &str,
    settings: &ClientSettings,
) -> Result<RuntimeConfig, ConfigLoadError> {
    let origin = Url::parse(origin).map_err(|err| ConfigLoadError::InvalidUrl(err.to_string()))?;
    let config_url = origin
        .join(CONFIG_PATH)
        .map_err(|err| ConfigLoadError::InvalidUrl(err.to_string()))?;
    let client = settings
        .build_client()
        .map_err(|err| ConfigLoadError::Network(err.to_string()))?;

    report_debug!("Loading runtime config from {}", config_url);
    let response = client
        .get(config_url)
        .header(CACHE_CONTROL, "no-store")
        .header(PRAGMA, "no-cache")
        .send()
        .await
        .map_err(|err| ConfigLoadError::Network(map_transport_error(err).to_string()))?;

    let status = response.status();
    if !status.is_success() {
        return Err(ConfigLoadError::HttpStatus(status.as_u16()));
    }

    let body = response
        .text()
        .await
        .map_err(|err| ConfigLoadError::Network(err.to_string()))?;
    let raw: RawConfig =
        serde_json::from_str(&body).map_err(|err| ConfigLoadError::Malformed(err.to_string()))?;
    let orchestrator_url = Url::parse(&raw.orchestrator_url).map_err(|err| {
        ConfigLoadError::InvalidUrl(format!("ORCHESTRATOR_URL {:?}: {err}", raw.orchestrator_url))
    })?;

    report_info!("Orchestrator at {}", orchestrator_url);
    Ok(RuntimeConfig { orchestrator_url })
}
