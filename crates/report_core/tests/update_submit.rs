use std::sync::Once;
use std::time::Duration;

use pretty_assertions::assert_eq;
use report_core::{
    update, AppState, Effect, HistoryItemView, Msg, ReportSection, RequestId, SUBMIT_LABEL_BUSY,
    SUBMIT_LABEL_IDLE,
};
use serde_json::json;

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(report_logging::initialize_for_tests);
}

fn type_and_submit(state: AppState, input: &str) -> (AppState, Vec<Effect>) {
    let (state, _) = update(state, Msg::InputChanged(input.to_string()));
    update(state, Msg::SubmitClicked)
}

fn request_id_of(effects: &[Effect]) -> RequestId {
    effects
        .iter()
        .find_map(|effect| match effect {
            Effect::GenerateReport { request_id, .. } => Some(*request_id),
            _ => None,
        })
        .expect("generate effect")
}

fn q1_sections() -> Vec<ReportSection> {
    vec![ReportSection::new("Step 1", json!({ "ok": true }))]
}

#[test]
fn blank_input_never_requests_a_report() {
    init_logging();
    for input in ["", "   ", "\n\t  \n"] {
        let (mut next, effects) = type_and_submit(AppState::new(), input);
        let view = next.view();

        assert!(effects.is_empty(), "input {input:?} produced effects");
        assert!(!view.can_submit);
        assert!(!view.loading);
        assert_eq!(view.submit_label, SUBMIT_LABEL_IDLE);
        // Only the text edit marked the state dirty, not the submit.
        assert_eq!(next.consume_dirty(), !input.is_empty());
    }
}

#[test]
fn submit_posts_text_as_typed_and_enters_loading() {
    init_logging();
    let (state, effects) = type_and_submit(AppState::new(), "Summarize Q1 sales");

    assert_eq!(
        effects,
        vec![Effect::GenerateReport {
            request_id: 1,
            request_text: "Summarize Q1 sales".to_string(),
        }]
    );
    let view = state.view();
    assert!(view.loading);
    assert!(!view.can_submit);
    assert_eq!(view.submit_label, SUBMIT_LABEL_BUSY);
    assert_eq!(state.pending_request(), Some(1));
}

#[test]
fn submit_while_loading_is_ignored() {
    init_logging();
    let (state, _) = type_and_submit(AppState::new(), "first");
    let before = state.clone();

    let (state, effects) = update(state, Msg::SubmitClicked);

    assert!(effects.is_empty());
    assert_eq!(state, before);
}

#[test]
fn successful_report_replaces_history_and_report_exactly() {
    init_logging();
    let (state, effects) = type_and_submit(AppState::new(), "Summarize Q1 sales");
    let request_id = request_id_of(&effects);

    let (mut state, effects) = update(
        state,
        Msg::ReportReceived {
            request_id,
            sections: q1_sections(),
            assembled_report: "Q1 sales grew 5%.".to_string(),
            elapsed: Duration::from_millis(1500),
        },
    );

    assert!(effects.is_empty());
    assert_eq!(state.history(), q1_sections().as_slice());
    assert_eq!(state.assembled_report(), "Q1 sales grew 5%.");
    assert!(!state.is_loading());
    assert!(state.consume_dirty());

    let view = state.view();
    assert_eq!(
        view.history,
        vec![HistoryItemView {
            title: "Step 1".to_string(),
            body: "{\n  \"ok\": true\n}".to_string(),
        }]
    );
    assert_eq!(view.assembled_report, "Q1 sales grew 5%.");
    assert_eq!(view.last_elapsed, Some(Duration::from_millis(1500)));
    assert_eq!(view.request_text, "Summarize Q1 sales");
    assert!(view.can_submit);
}

#[test]
fn later_report_replaces_earlier_one_wholesale() {
    init_logging();
    let (state, effects) = type_and_submit(AppState::new(), "one");
    let (state, _) = update(
        state,
        Msg::ReportReceived {
            request_id: request_id_of(&effects),
            sections: vec![
                ReportSection::new("a", json!(1)),
                ReportSection::new("b", json!(2)),
            ],
            assembled_report: "first".to_string(),
            elapsed: Duration::ZERO,
        },
    );

    let (state, effects) = update(state, Msg::SubmitClicked);
    let sections = vec![
        ReportSection::new("z", json!([null, "x"])),
        ReportSection::new("y", json!({ "nested": { "deep": 1.5 } })),
        ReportSection::new("x", json!("plain")),
    ];
    let (state, _) = update(
        state,
        Msg::ReportReceived {
            request_id: request_id_of(&effects),
            sections: sections.clone(),
            assembled_report: "second".to_string(),
            elapsed: Duration::ZERO,
        },
    );

    assert_eq!(state.history(), sections.as_slice());
    let titles: Vec<_> = state.view().history.into_iter().map(|h| h.title).collect();
    assert_eq!(titles, vec!["z", "y", "x"]);
    assert_eq!(state.assembled_report(), "second");
}

#[test]
fn failure_keeps_prior_report_and_notifies_once() {
    init_logging();
    let (state, effects) = type_and_submit(AppState::new(), "one");
    let (state, _) = update(
        state,
        Msg::ReportReceived {
            request_id: request_id_of(&effects),
            sections: q1_sections(),
            assembled_report: "kept".to_string(),
            elapsed: Duration::ZERO,
        },
    );

    let (state, effects) = update(state, Msg::SubmitClicked);
    let request_id = request_id_of(&effects);
    let (state, effects) = update(
        state,
        Msg::ReportFailed {
            request_id,
            message: "http status 502".to_string(),
        },
    );

    assert_eq!(
        effects,
        vec![Effect::NotifyFailure {
            message: "http status 502".to_string()
        }]
    );
    assert_eq!(state.history(), q1_sections().as_slice());
    assert_eq!(state.assembled_report(), "kept");
    assert!(!state.is_loading());

    // A duplicate completion for the same request is not reported again.
    let (state, effects) = update(
        state,
        Msg::ReportFailed {
            request_id,
            message: "http status 502".to_string(),
        },
    );
    assert!(effects.is_empty());
    assert_eq!(state.assembled_report(), "kept");
}

#[test]
fn loading_spans_submit_to_resolution_on_every_path() {
    init_logging();
    let state = AppState::new();
    assert!(!state.is_loading());

    let (state, effects) = type_and_submit(state, "ok path");
    assert!(state.is_loading());
    let (state, _) = update(
        state,
        Msg::ReportReceived {
            request_id: request_id_of(&effects),
            sections: Vec::new(),
            assembled_report: String::new(),
            elapsed: Duration::ZERO,
        },
    );
    assert!(!state.is_loading());

    let (state, effects) = update(state, Msg::SubmitClicked);
    assert!(state.is_loading());
    let (state, _) = update(state, Msg::InputChanged("edited meanwhile".to_string()));
    assert!(state.is_loading());
    let (state, _) = update(
        state,
        Msg::ReportFailed {
            request_id: request_id_of(&effects),
            message: "network error".to_string(),
        },
    );
    assert!(!state.is_loading());
}

#[test]
fn completion_for_unknown_request_is_ignored() {
    init_logging();
    let (state, effects) = type_and_submit(AppState::new(), "current");
    let current = request_id_of(&effects);
    let before = state.clone();

    let (state, effects) = update(
        state,
        Msg::ReportReceived {
            request_id: current + 41,
            sections: q1_sections(),
            assembled_report: "stale".to_string(),
            elapsed: Duration::ZERO,
        },
    );

    assert!(effects.is_empty());
    assert_eq!(state, before);
    assert!(state.is_loading());
}
