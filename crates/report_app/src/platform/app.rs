use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;

use report_core::{update, AppState, AppViewModel, Msg};
use report_engine::EngineHandle;
use report_logging::{report_debug, report_info, report_warn};
use url::Url;

use super::effects::EffectRunner;
use super::ui;
use super::ui::input::{self, Command};

/// Everything the front-end loop reacts to.
pub(crate) enum LoopEvent {
    /// A line typed on stdin.
    Line(String),
    /// A message produced outside the loop (engine completions, save results).
    Dispatch(Msg),
    /// Stdin closed.
    InputClosed,
}

pub fn run_app(engine: EngineHandle, orchestrator_url: &Url, output_dir: PathBuf) -> anyhow::Result<()> {
    let (event_tx, event_rx) = mpsc::channel::<LoopEvent>();
    let runner = EffectRunner::new(engine, output_dir, event_tx.clone());
    spawn_stdin_reader(event_tx);

    let mut app = App::new(runner);
    app.print(&ui::render::banner(orchestrator_url))?;
    app.render()?;

    while let Ok(event) = event_rx.recv() {
        match event {
            LoopEvent::Line(line) => match input::parse_line(&line) {
                Command::Quit => app.dispatch(Msg::QuitRequested)?,
                Command::Help => app.print(ui::constants::HELP_TEXT)?,
                Command::Unknown(name) => {
                    app.print(&format!("Unknown command :{name} (try :help)\n"))?
                }
                command => {
                    if let Some(msg) = input::to_msg(command, app.state.request_text()) {
                        app.dispatch(msg)?;
                    }
                }
            },
            LoopEvent::Dispatch(msg) => app.dispatch(msg)?,
            LoopEvent::InputClosed => app.dispatch(Msg::QuitRequested)?,
        }
        if app.state.should_exit() {
            break;
        }
    }

    report_info!("Leaving report_app");
    Ok(())
}

struct App {
    state: AppState,
    runner: EffectRunner,
}

impl App {
    fn new(runner: EffectRunner) -> Self {
        Self {
            state: AppState::new(),
            runner,
        }
    }

    fn dispatch(&mut self, msg: Msg) -> io::Result<()> {
        report_debug!("dispatch {:?}", msg);
        if msg == Msg::QuitRequested && self.state.is_loading() {
            report_info!("Waiting for the pending report before exiting");
        }
        let state = std::mem::take(&mut self.state);
        let (state, effects) = update(state, msg);
        self.state = state;
        self.runner.run(effects);
        if self.state.consume_dirty() {
            self.render()?;
        }
        Ok(())
    }

    fn render(&self) -> io::Result<()> {
        let view: AppViewModel = self.state.view();
        self.print(&ui::render::render(&view))
    }

    fn print(&self, text: &str) -> io::Result<()> {
        let mut stdout = io::stdout().lock();
        stdout.write_all(text.as_bytes())?;
        stdout.flush()
    }
}

fn spawn_stdin_reader(event_tx: mpsc::Sender<LoopEvent>) {
    thread::spawn(move || {
        let mut stdin = io::stdin().lock();
        let mut buf = Vec::new();
        loop {
            buf.clear();
            match stdin.read_until(b'\n', &mut buf) {
                Ok(0) => break,
                Ok(_) => {
                    let line = decode_line(&buf);
                    if event_tx.send(LoopEvent::Line(line)).is_err() {
                        return;
                    }
                }
                Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
                Err(err) => {
                    report_warn!("Stopped reading stdin: {}", err);
                    break;
                }
            }
        }
        let _ = event_tx.send(LoopEvent::InputClosed);
    });
}

/// Decodes one raw stdin line; invalid UTF-8 becomes U+FFFD instead of ending input.
fn decode_line(raw: &[u8]) -> String {
    let raw = raw.strip_suffix(b"\n").unwrap_or(raw);
    let raw = raw.strip_suffix(b"\r").unwrap_or(raw);
    String::from_utf8_lossy(raw).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_line_strips_line_endings() {
        assert_eq!(decode_line(b"Summarize Q1 sales\n"), "Summarize Q1 sales");
        assert_eq!(decode_line(b":submit\r\n"), ":submit");
        assert_eq!(decode_line(b"last line without newline"), "last line without newline");
        assert_eq!(decode_line(b"\n"), "");
    }

    #[test]
    fn decode_line_keeps_invalid_utf8_as_replacement() {
        assert_eq!(decode_line(b"\xff\n"), "\u{FFFD}");
        assert_eq!(decode_line(b"caf\xe9 report\n"), "caf\u{FFFD} report");
    }
}
