use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// User replaced the request text.
    InputChanged(String),
    /// User asked for a report to be generated from the current text.
    SubmitClicked,
    /// User asked to reset the input, history and assembled report.
    ClearClicked,
    /// User asked to write the assembled report to disk.
    SaveClicked,
    /// Engine returned a complete report.
    ReportReceived {
        request_id: crate::RequestId,
        sections: Vec<crate::ReportSection>,
        assembled_report: String,
        elapsed: Duration,
    },
    /// Engine failed to produce a report (network, status or body error).
    ReportFailed {
        request_id: crate::RequestId,
        message: String,
    },
    /// Assembled report was written.
    ReportSaved { path: PathBuf },
    /// Assembled report could not be written.
    SaveFailed { message: String },
    /// User or input stream asked to leave; honored once no report is pending.
    QuitRequested,
}
