use crate::RequestId;

/// IO requested by `update`; executed by the front end's effect runner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// POST the request text to the orchestrator's report endpoint.
    GenerateReport {
        request_id: RequestId,
        request_text: String,
    },
    /// Tell the user the last report request failed. Emitted once per failure.
    NotifyFailure { message: String },
    /// Write the assembled report to the output directory.
    SaveReport { contents: String },
}
