use std::sync::{mpsc, Arc, Mutex};
use std::thread;
use std::time::Duration;

use report_logging::{report_debug, report_warn};
use thiserror::Error;

use crate::client::{ClientSettings, ReportClient, ReqwestReportClient};
use crate::config::{load_config, RuntimeConfig};
use crate::{ConfigLoadError, EngineEvent, ReportRequestError, RequestId};

#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error("failed to start async runtime: {0}")]
    Runtime(#[from] std::io::Error),
    #[error(transparent)]
    Config(#[from] ConfigLoadError),
    #[error("failed to build report client: {0}")]
    Client(#[from] ReportRequestError),
}

enum EngineCommand {
    Generate {
        request_id: RequestId,
        request_text: String,
    },
}

/// Handle to the engine worker thread. Clones share the same worker.
#[derive(Clone)]
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: Arc<Mutex<mpsc::Receiver<EngineEvent>>>,
}

impl EngineHandle {
    /// Loads the runtime config from `origin` and starts a worker targeting its orchestrator.
    pub fn bootstrap(
        origin: &str,
        settings: &ClientSettings,
    ) -> Result<(Self, RuntimeConfig), BootstrapError> {
        let runtime = tokio::runtime::Runtime::new()?;
        let config = runtime.block_on(load_config(origin, settings))?;
        let client = ReqwestReportClient::new(&config.orchestrator_url, settings)?;
        report_debug!("Report endpoint {}", client.endpoint());
        Ok((Self::spawn(runtime, Arc::new(client)), config))
    }

    /// Starts the worker thread on `runtime`, sending requests through `client`.
    pub fn spawn(runtime: tokio::runtime::Runtime, client: Arc<dyn ReportClient>) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();

        thread::spawn(move || {
            while let Ok(command) = cmd_rx.recv() {
                let client = client.clone();
                let event_tx = event_tx.clone();
                runtime.spawn(async move {
                    handle_command(client.as_ref(), command, event_tx).await;
                });
            }
        });

        Self {
            cmd_tx,
            event_rx: Arc::new(Mutex::new(event_rx)),
        }
    }

    pub fn generate(&self, request_id: RequestId, request_text: impl Into<String>) {
        let sent = self.cmd_tx.send(EngineCommand::Generate {
            request_id,
            request_text: request_text.into(),
        });
        if sent.is_err() {
            report_warn!("Engine worker is gone; dropping request {}", request_id);
        }
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.lock().ok()?.try_recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.event_rx.lock().ok()?.recv_timeout(timeout).ok()
    }
}

async fn handle_command(
    client: &dyn ReportClient,
    command: EngineCommand,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    match command {
        EngineCommand::Generate {
            request_id,
            request_text,
        } => {
            let result = client.generate(&request_text).await;
            if let Err(err) = &result {
                report_debug!("Report request {} failed: {}", request_id, err);
            }
            let _ = event_tx.send(EngineEvent::ReportCompleted { request_id, result });
        }
    }
}
