use std::time::Duration;

pub const SUBMIT_LABEL_IDLE: &str = "Submit";
pub const SUBMIT_LABEL_BUSY: &str = "Generating...";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub request_text: String,
    pub can_submit: bool,
    pub submit_label: &'static str,
    pub history: Vec<HistoryItemView>,
    pub assembled_report: String,
    pub loading: bool,
    pub last_elapsed: Option<Duration>,
    pub status: Option<String>,
    pub dirty: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryItemView {
    pub title: String,
    /// Pretty-printed JSON of the section result.
    pub body: String,
}
