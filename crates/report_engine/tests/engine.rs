use std::sync::{Arc, Mutex};
use std::time::Duration;

use report_engine::{
    EngineEvent, EngineHandle, FailureKind, GeneratedReport, ReportClient, ReportRequestError,
    ReportResponse,
};

/// Answers every request from a canned result and records the texts it saw.
struct StubClient {
    seen: Arc<Mutex<Vec<String>>>,
    fail: bool,
}

#[async_trait::async_trait]
impl ReportClient for StubClient {
    async fn generate(&self, request_text: &str) -> Result<GeneratedReport, ReportRequestError> {
        self.seen.lock().unwrap().push(request_text.to_string());
        if self.fail {
            return Err(ReportRequestError {
                kind: FailureKind::Network,
                message: "connection refused".to_string(),
            });
        }
        Ok(GeneratedReport {
            response: ReportResponse {
                report_sections: Vec::new(),
                assembled_report: format!("report for {request_text}"),
            },
            elapsed: Duration::from_millis(5),
        })
    }
}

fn engine(fail: bool) -> (EngineHandle, Arc<Mutex<Vec<String>>>) {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let client = StubClient {
        seen: seen.clone(),
        fail,
    };
    let runtime = tokio::runtime::Runtime::new().unwrap();
    (EngineHandle::spawn(runtime, Arc::new(client)), seen)
}

#[test]
fn completion_carries_request_id_and_report() {
    let (engine, seen) = engine(false);

    engine.generate(7, "Summarize Q1 sales");
    let event = engine
        .recv_timeout(Duration::from_secs(5))
        .expect("engine event");

    match event {
        EngineEvent::ReportCompleted { request_id, result } => {
            assert_eq!(request_id, 7);
            let report = result.expect("report");
            assert_eq!(
                report.response.assembled_report,
                "report for Summarize Q1 sales"
            );
        }
    }
    assert_eq!(*seen.lock().unwrap(), vec!["Summarize Q1 sales".to_string()]);
}

#[test]
fn failures_are_forwarded_as_events() {
    let (engine, _seen) = engine(true);

    engine.generate(3, "x");
    let event = engine
        .recv_timeout(Duration::from_secs(5))
        .expect("engine event");

    let EngineEvent::ReportCompleted { request_id, result } = event;
    assert_eq!(request_id, 3);
    assert_eq!(result.unwrap_err().kind, FailureKind::Network);
    assert!(engine.try_recv().is_none());
}
