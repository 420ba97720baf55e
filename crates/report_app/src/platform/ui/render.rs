use std::fmt::Write;

use report_core::{AppViewModel, HistoryItemView};
use url::Url;

use super::constants::*;

const RULE: &str = "------------------------------------------------------------";

pub fn banner(orchestrator_url: &Url) -> String {
    format!("{TITLE}\nOrchestrator: {orchestrator_url}\nType :help for commands.\n")
}

/// Renders the whole screen for the current view.
pub fn render(view: &AppViewModel) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{RULE}\n{TITLE}\n{RULE}");

    if view.request_text.is_empty() {
        let _ = writeln!(out, "> {INPUT_PLACEHOLDER}");
    } else {
        for line in view.request_text.lines() {
            let _ = writeln!(out, "> {line}");
        }
    }
    let _ = writeln!(out, "{}", button_row(view));
    if let Some(status) = &view.status {
        let _ = writeln!(out, "{status}");
    }

    let _ = writeln!(out, "\n## {HISTORY_HEADING}");
    if view.history.is_empty() {
        let _ = writeln!(out, "{EMPTY_HISTORY}");
    }
    for item in &view.history {
        render_history_item(&mut out, item);
    }

    let _ = writeln!(out, "\n## {REPORT_HEADING}");
    if let Some(elapsed) = view.last_elapsed {
        let _ = writeln!(out, "(generated in {:.2}s)", elapsed.as_secs_f64());
    }
    let _ = writeln!(out, "{}", view.assembled_report);
    out
}

fn button_row(view: &AppViewModel) -> String {
    let submit = if view.can_submit {
        format!("[{}]", view.submit_label)
    } else {
        format!("[{} (disabled)]", view.submit_label)
    };
    format!("{submit} [{CLEAR_LABEL}]")
}

fn render_history_item(out: &mut String, item: &HistoryItemView) {
    let _ = writeln!(out, "### {}", item.title);
    for line in item.body.lines() {
        let _ = writeln!(out, "    {line}");
    }
}
