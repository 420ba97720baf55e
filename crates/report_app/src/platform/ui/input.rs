//! Maps typed lines onto state machine messages.

use report_core::Msg;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Add a line to the request text.
    Append(String),
    /// Replace the request text.
    Set(String),
    Submit,
    Clear,
    Save,
    Help,
    Quit,
    Unknown(String),
}

pub fn parse_line(line: &str) -> Command {
    let line = line.trim_end_matches(['\r', '\n']);
    if let Some(escaped) = line.strip_prefix("::") {
        return Command::Append(format!(":{escaped}"));
    }
    let Some(command) = line.strip_prefix(':') else {
        return Command::Append(line.to_owned());
    };

    let (name, rest) = match command.split_once(char::is_whitespace) {
        Some((name, rest)) => (name, rest),
        None => (command, ""),
    };
    match name {
        "submit" | "s" => Command::Submit,
        "clear" | "c" => Command::Clear,
        "save" | "w" => Command::Save,
        "set" => Command::Set(rest.to_owned()),
        "help" | "h" | "?" => Command::Help,
        "quit" | "q" => Command::Quit,
        other => Command::Unknown(other.to_owned()),
    }
}

/// Message for a state-changing command. `current` is the request text before the edit.
pub fn to_msg(command: Command, current: &str) -> Option<Msg> {
    match command {
        Command::Append(text) if current.is_empty() => Some(Msg::InputChanged(text)),
        Command::Append(text) => Some(Msg::InputChanged(format!("{current}\n{text}"))),
        Command::Set(text) => Some(Msg::InputChanged(text)),
        Command::Submit => Some(Msg::SubmitClicked),
        Command::Clear => Some(Msg::ClearClicked),
        Command::Save => Some(Msg::SaveClicked),
        Command::Help | Command::Quit | Command::Unknown(_) => None,
    }
}
