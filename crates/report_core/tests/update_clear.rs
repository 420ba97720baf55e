use std::path::PathBuf;
use std::time::Duration;

use report_core::{update, AppState, Effect, Msg, ReportSection};
use serde_json::json;

fn with_report(text: &str, report: &str) -> AppState {
    let (state, _) = update(AppState::new(), Msg::InputChanged(text.to_string()));
    let (state, effects) = update(state, Msg::SubmitClicked);
    let request_id = match effects.as_slice() {
        [Effect::GenerateReport { request_id, .. }] => *request_id,
        other => panic!("unexpected effects {other:?}"),
    };
    let (state, _) = update(
        state,
        Msg::ReportReceived {
            request_id,
            sections: vec![ReportSection::new("Step 1", json!({ "ok": true }))],
            assembled_report: report.to_string(),
            elapsed: Duration::from_secs(2),
        },
    );
    state
}

fn assert_cleared(state: &AppState) {
    assert_eq!(state.request_text(), "");
    assert!(state.history().is_empty());
    assert_eq!(state.assembled_report(), "");
}

#[test]
fn clear_resets_content_from_any_state() {
    let starts = vec![
        AppState::new(),
        update(AppState::new(), Msg::InputChanged("draft".to_string())).0,
        with_report("Summarize Q1 sales", "Q1 sales grew 5%."),
    ];

    for start in starts {
        let (mut state, effects) = update(start, Msg::ClearClicked);
        assert!(effects.is_empty());
        assert_cleared(&state);
        assert!(state.consume_dirty());
        let view = state.view();
        assert!(view.history.is_empty());
        assert_eq!(view.last_elapsed, None);
        assert!(!view.can_submit);
    }
}

#[test]
fn clear_while_loading_keeps_round_trip_open() {
    let (state, _) = update(AppState::new(), Msg::InputChanged("pending".to_string()));
    let (state, effects) = update(state, Msg::SubmitClicked);
    let request_id = match effects.as_slice() {
        [Effect::GenerateReport { request_id, .. }] => *request_id,
        other => panic!("unexpected effects {other:?}"),
    };

    let (state, effects) = update(state, Msg::ClearClicked);
    assert!(effects.is_empty());
    assert_cleared(&state);
    assert!(state.is_loading());

    let (state, _) = update(
        state,
        Msg::ReportReceived {
            request_id,
            sections: Vec::new(),
            assembled_report: "late".to_string(),
            elapsed: Duration::ZERO,
        },
    );
    assert!(!state.is_loading());
    assert_eq!(state.assembled_report(), "late");
}

#[test]
fn save_emits_effect_only_when_report_present() {
    let (state, effects) = update(AppState::new(), Msg::SaveClicked);
    assert!(effects.is_empty());
    assert_eq!(state.view().status.as_deref(), Some("Nothing to save yet"));

    let state = with_report("text", "= Report\n\nBody");
    let (state, effects) = update(state, Msg::SaveClicked);
    assert_eq!(
        effects,
        vec![Effect::SaveReport {
            contents: "= Report\n\nBody".to_string()
        }]
    );

    let (state, _) = update(
        state,
        Msg::ReportSaved {
            path: PathBuf::from("reports/report-1.adoc"),
        },
    );
    assert_eq!(
        state.view().status.as_deref(),
        Some("Saved report to reports/report-1.adoc")
    );

    let (state, _) = update(
        state,
        Msg::SaveFailed {
            message: "disk full".to_string(),
        },
    );
    assert_eq!(
        state.view().status.as_deref(),
        Some("Failed to save report: disk full")
    );
}
