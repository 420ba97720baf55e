use std::path::PathBuf;
use std::time::Duration;

use serde_json::Value;

use crate::view_model::{AppViewModel, HistoryItemView, SUBMIT_LABEL_BUSY, SUBMIT_LABEL_IDLE};

pub type RequestId = u64;

/// One titled step of the orchestrator's generation history.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportSection {
    pub subtask_title: String,
    pub result: Value,
}

impl ReportSection {
    pub fn new(subtask_title: impl Into<String>, result: Value) -> Self {
        Self {
            subtask_title: subtask_title.into(),
            result,
        }
    }

    /// `result` as 2-space indented JSON.
    pub fn pretty_result(&self) -> String {
        serde_json::to_string_pretty(&self.result).unwrap_or_else(|_| self.result.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppState {
    request_text: String,
    history: Vec<ReportSection>,
    assembled_report: String,
    loading: bool,
    pending_request: Option<RequestId>,
    next_request_id: RequestId,
    last_elapsed: Option<Duration>,
    status: Option<String>,
    quit_requested: bool,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> AppViewModel {
        AppViewModel {
            request_text: self.request_text.clone(),
            can_submit: self.can_submit(),
            submit_label: if self.loading {
                SUBMIT_LABEL_BUSY
            } else {
                SUBMIT_LABEL_IDLE
            },
            history: self
                .history
                .iter()
                .map(|section| HistoryItemView {
                    title: section.subtask_title.clone(),
                    body: section.pretty_result(),
                })
                .collect(),
            assembled_report: self.assembled_report.clone(),
            loading: self.loading,
            last_elapsed: self.last_elapsed,
            status: self.status.clone(),
            dirty: self.dirty,
        }
    }

    pub fn request_text(&self) -> &str {
        &self.request_text
    }

    pub fn history(&self) -> &[ReportSection] {
        &self.history
    }

    pub fn assembled_report(&self) -> &str {
        &self.assembled_report
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn pending_request(&self) -> Option<RequestId> {
        self.pending_request
    }

    /// True once a quit was requested and no report is in flight.
    pub fn should_exit(&self) -> bool {
        self.quit_requested && !self.loading
    }

    /// Returns whether the state changed since the last call, and resets the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn can_submit(&self) -> bool {
        !self.loading && !self.request_text.trim().is_empty()
    }

    pub(crate) fn set_request_text(&mut self, text: String) {
        if self.request_text != text {
            self.request_text = text;
            self.dirty = true;
        }
    }

    /// Enters the submitting state and returns the id for the new request.
    pub(crate) fn begin_request(&mut self) -> RequestId {
        self.next_request_id += 1;
        let request_id = self.next_request_id;
        self.pending_request = Some(request_id);
        self.loading = true;
        self.status = None;
        self.dirty = true;
        request_id
    }

    /// Leaves the submitting state if `request_id` is the one in flight.
    pub(crate) fn finish_request(&mut self, request_id: RequestId) -> bool {
        if self.pending_request != Some(request_id) {
            return false;
        }
        self.pending_request = None;
        self.loading = false;
        self.dirty = true;
        true
    }

    pub(crate) fn apply_report(
        &mut self,
        sections: Vec<ReportSection>,
        assembled_report: String,
        elapsed: Duration,
    ) {
        self.history = sections;
        self.assembled_report = assembled_report;
        self.last_elapsed = Some(elapsed);
        self.dirty = true;
    }

    /// Empties the content fields. `loading` belongs to the round trip in flight.
    pub(crate) fn clear(&mut self) {
        self.request_text.clear();
        self.history.clear();
        self.assembled_report.clear();
        self.last_elapsed = None;
        self.status = None;
        self.dirty = true;
    }

    pub(crate) fn request_quit(&mut self) {
        self.quit_requested = true;
    }

    pub(crate) fn set_status(&mut self, status: String) {
        self.status = Some(status);
        self.dirty = true;
    }

    pub(crate) fn saved_to(&mut self, path: PathBuf) {
        self.set_status(format!("Saved report to {}", path.display()));
    }
}
