use crate::{AppState, Effect, Msg};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::InputChanged(text) => {
            state.set_request_text(text);
            Vec::new()
        }
        Msg::SubmitClicked => {
            // Guard: no request while one is in flight or the text is blank.
            if !state.can_submit() {
                return (state, Vec::new());
            }
            let request_id = state.begin_request();
            vec![Effect::GenerateReport {
                request_id,
                request_text: state.request_text().to_owned(),
            }]
        }
        Msg::ReportReceived {
            request_id,
            sections,
            assembled_report,
            elapsed,
        } => {
            if state.finish_request(request_id) {
                state.apply_report(sections, assembled_report, elapsed);
            }
            Vec::new()
        }
        Msg::ReportFailed {
            request_id,
            message,
        } => {
            if state.finish_request(request_id) {
                vec![Effect::NotifyFailure { message }]
            } else {
                Vec::new()
            }
        }
        Msg::ClearClicked => {
            state.clear();
            Vec::new()
        }
        Msg::SaveClicked => {
            if state.assembled_report().is_empty() {
                state.set_status("Nothing to save yet".to_owned());
                Vec::new()
            } else {
                vec![Effect::SaveReport {
                    contents: state.assembled_report().to_owned(),
                }]
            }
        }
        Msg::ReportSaved { path } => {
            state.saved_to(path);
            Vec::new()
        }
        Msg::SaveFailed { message } => {
            state.set_status(format!("Failed to save report: {message}"));
            Vec::new()
        }
        Msg::QuitRequested => {
            state.request_quit();
            Vec::new()
        }
    };

    (state, effects)
}
