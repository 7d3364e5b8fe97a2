use std::path::PathBuf;
use std::sync::mpsc::{self, RecvTimeoutError};
use std::time::Duration;

use anyhow::Context;
use chat_core::{update, AnswerStatus, AppState, AppViewModel, Msg};
use chat_engine::{BackendSettings, EngineHandle};
use chat_logging::chat_info;
use log::LevelFilter;

use super::effects::EffectRunner;
use super::input::{self, Command, InputEvent, HELP_TEXT};
use super::render::Screen;
use super::settings;

const LOG_FILENAME: &str = "chat_client.log";
const TICK: Duration = Duration::from_millis(50);

/// Wall-clock time as shown next to transcript entries.
pub fn display_time() -> String {
    chrono::Local::now().format("%H:%M:%S").to_string()
}

pub fn run_app() -> anyhow::Result<()> {
    let work_dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let loaded = settings::read_settings(&work_dir);
    let settings = loaded.as_ref().cloned().unwrap_or_default();
    if let Some(destination) = settings.log_destination() {
        chat_logging::initialize(destination, &work_dir.join(LOG_FILENAME), LevelFilter::Info);
    }
    settings::report_settings(&loaded);

    let backend = BackendSettings::default();
    chat_info!("Starting chat client against {}", backend.base_url);
    let engine = EngineHandle::with_settings(backend).context("starting backend engine")?;

    let runner = EffectRunner::new(engine);
    let mut screen = Screen::default();
    let mut state = AppState::new(display_time()).with_ordering(settings.ordering_policy());
    println!("{HELP_TEXT}");
    print_lines(screen.render(&state.view()));

    let (input_tx, input_rx) = mpsc::channel();
    input::spawn_reader(input_tx);

    let mut input_open = true;
    loop {
        if input_open {
            match input_rx.recv_timeout(TICK) {
                Ok(InputEvent::Line(Command::Quit)) => break,
                Ok(InputEvent::Line(Command::Help)) => println!("{HELP_TEXT}"),
                Ok(InputEvent::Line(command)) => {
                    for msg in input::command_msgs(command, display_time()) {
                        state = dispatch(state, msg, &runner, &mut screen);
                    }
                }
                Ok(InputEvent::Closed) | Err(RecvTimeoutError::Disconnected) => {
                    input_open = false;
                }
                Err(RecvTimeoutError::Timeout) => {
                    state = dispatch(state, Msg::Tick, &runner, &mut screen);
                }
            }
        } else {
            // Input is gone; stay only until outstanding requests settle.
            if is_idle(&state.view()) {
                break;
            }
            std::thread::sleep(TICK);
        }

        while let Some(msg) = runner.poll() {
            state = dispatch(state, msg, &runner, &mut screen);
        }
    }

    chat_info!("Chat client exiting");
    Ok(())
}

/// Applies one message, hands its effects to the engine and prints what changed.
fn dispatch(state: AppState, msg: Msg, runner: &EffectRunner, screen: &mut Screen) -> AppState {
    let (mut state, effects) = update(state, msg);
    runner.enqueue(effects);
    if state.consume_dirty() {
        print_lines(screen.render(&state.view()));
    }
    state
}

fn is_idle(view: &AppViewModel) -> bool {
    view.answer_status == AnswerStatus::Idle && view.searches_pending == 0 && !view.uploading
}

fn print_lines(lines: Vec<String>) {
    for line in lines {
        println!("{line}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chat_core::SearchResult;

    fn search(state: AppState, query: &str) -> AppState {
        let (state, _) = update(state, Msg::SearchInputChanged(query.into()));
        update(state, Msg::SearchSubmitted).0
    }

    #[test]
    fn not_idle_while_an_older_search_is_outstanding() {
        let state = search(search(AppState::new("09:00:00"), "older"), "newer");

        let (state, _) = update(
            state,
            Msg::SearchCompleted {
                request_id: 2,
                outcome: Ok(vec![SearchResult {
                    title: "N".into(),
                    url: "http://n".into(),
                    snippet: None,
                }]),
            },
        );
        assert!(!state.view().search_loading);
        assert!(!is_idle(&state.view()));

        let (state, _) = update(
            state,
            Msg::SearchCompleted {
                request_id: 1,
                outcome: Ok(Vec::new()),
            },
        );
        assert!(is_idle(&state.view()));
    }

    #[test]
    fn fresh_session_is_idle() {
        assert!(is_idle(&AppState::new("09:00:00").view()));
    }
}
