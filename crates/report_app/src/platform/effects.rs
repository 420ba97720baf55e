use std::io::Write;
use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use chrono::Utc;
use report_core::{Effect, Msg, ReportSection};
use report_engine::{report_filename, ReportWriter, EngineEvent, EngineHandle};
use report_logging::{report_debug, report_error, report_info};

use super::app::LoopEvent;
use super::ui::constants::FAILURE_NOTICE;

pub struct EffectRunner {
    engine: EngineHandle,
    writer: ReportWriter,
    event_tx: mpsc::Sender<LoopEvent>,
}

impl EffectRunner {
    pub fn new(engine: EngineHandle, output_dir: PathBuf, event_tx: mpsc::Sender<LoopEvent>) -> Self {
        let runner = Self {
            engine,
            writer: ReportWriter::new(output_dir),
            event_tx,
        };
        runner.spawn_event_loop();
        runner
    }

    pub fn run(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::GenerateReport {
                    request_id,
                    request_text,
                } => {
                    report_info!(
                        "GenerateReport request_id={} text_len={}",
                        request_id,
                        request_text.len()
                    );
                    self.engine.generate(request_id, request_text);
                }
                Effect::NotifyFailure { message } => {
                    report_debug!("Report request failed: {}", message);
                    let mut stderr = std::io::stderr().lock();
                    let _ = writeln!(stderr, "{}", failure_notice(&message));
                }
                Effect::SaveReport { contents } => {
                    let stamp = Utc::now().format("%Y%m%dT%H%M%SZ").to_string();
                    let msg = match self.writer.save(&report_filename(&stamp), &contents) {
                        Ok(path) => {
                            report_info!("Saved assembled report to {:?}", path);
                            Msg::ReportSaved { path }
                        }
                        Err(err) => {
                            report_error!("Failed to save assembled report: {}", err);
                            Msg::SaveFailed {
                                message: err.to_string(),
                            }
                        }
                    };
                    let _ = self.event_tx.send(LoopEvent::Dispatch(msg));
                }
            }
        }
    }

    fn spawn_event_loop(&self) {
        let engine = self.engine.clone();
        let event_tx = self.event_tx.clone();
        thread::spawn(move || loop {
            let Some(event) = engine.recv_timeout(Duration::from_millis(200)) else {
                continue;
            };
            if event_tx.send(LoopEvent::Dispatch(map_event(event))).is_err() {
                return;
            }
        });
    }
}

/// The single line shown for a failed report request.
fn failure_notice(message: &str) -> String {
    format!("{FAILURE_NOTICE} ({message})")
}

fn map_event(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::ReportCompleted { request_id, result } => match result {
            Ok(report) => Msg::ReportReceived {
                request_id,
                sections: report
                    .response
                    .report_sections
                    .into_iter()
                    .map(|section| ReportSection::new(section.subtask_title, section.result))
                    .collect(),
                assembled_report: report.response.assembled_report,
                elapsed: report.elapsed,
            },
            Err(err) => Msg::ReportFailed {
                request_id,
                message: err.to_string(),
            },
        },
    }
}
