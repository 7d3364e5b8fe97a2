use std::fs;
use std::io::BufRead;
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::thread;

use chat_core::{Msg, PickedFile};
use chat_logging::{chat_debug, chat_warn};

pub const HELP_TEXT: &str = "\
Type a message and press Enter to ask.
  /search <query>   search the web
  /upload <path>    upload a file and show its summary
  /help             show this help
  /quit             leave";

/// One line of user input, classified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Chat(String),
    Search(String),
    Upload(Option<PathBuf>),
    Help,
    Quit,
}

#[derive(Debug)]
pub enum InputEvent {
    Line(Command),
    Closed,
}

pub fn parse_line(line: &str) -> Command {
    let line = line.trim_end_matches(['\r', '\n']);
    let trimmed = line.trim_start();

    if let Some(rest) = strip_command(trimmed, "/search") {
        return Command::Search(rest.to_string());
    }
    if let Some(rest) = strip_command(trimmed, "/upload") {
        let path = rest.trim();
        return Command::Upload((!path.is_empty()).then(|| PathBuf::from(path)));
    }
    match trimmed.trim_end() {
        "/help" => Command::Help,
        "/quit" | "/exit" => Command::Quit,
        _ => Command::Chat(line.to_string()),
    }
}

/// `"/search foo"` -> `Some("foo")`; `"/searching"` -> `None`.
fn strip_command<'a>(line: &'a str, name: &str) -> Option<&'a str> {
    let rest = line.strip_prefix(name)?;
    if rest.is_empty() {
        return Some(rest);
    }
    rest.strip_prefix(' ')
}

/// State messages for a command; `now` stamps the chat echo.
pub fn command_msgs(command: Command, now: String) -> Vec<Msg> {
    match command {
        Command::Chat(text) => vec![
            Msg::ChatInputChanged(text),
            Msg::SendSubmitted { timestamp: now },
        ],
        Command::Search(query) => vec![Msg::SearchInputChanged(query), Msg::SearchSubmitted],
        Command::Upload(path) => vec![Msg::FilePicked(path.as_deref().and_then(read_picked_file))],
        Command::Help | Command::Quit => Vec::new(),
    }
}

/// Reads the chosen file. Unreadable files count as no file chosen.
fn read_picked_file(path: &Path) -> Option<PickedFile> {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(err) => {
            chat_warn!("Failed to read {:?}: {}", path, err);
            return None;
        }
    };
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    Some(PickedFile { name, bytes })
}

/// Forwards stdin lines until EOF or until the receiver is dropped.
pub fn spawn_reader(tx: mpsc::Sender<InputEvent>) {
    thread::spawn(move || {
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            let line = match line {
                Ok(line) => line,
                Err(err) => {
                    chat_warn!("stdin read failed: {}", err);
                    break;
                }
            };
            if tx.send(InputEvent::Line(parse_line(&line))).is_err() {
                return;
            }
        }
        chat_debug!("stdin closed");
        let _ = tx.send(InputEvent::Closed);
    });
}
