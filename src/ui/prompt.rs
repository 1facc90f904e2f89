//! Interactive prompt: turns a typed line into controller commands

use dialoguer::Input;
use dialoguer::theme::ColorfulTheme;

use crate::core::controller::Command;
use crate::types::SortMode;

pub const HELP: &str = "\
  /<text>          search for <text> (\"/\" alone returns to the full list)
  n / p            next / previous page
  s                toggle sort (date <-> title)
  sort date|title  set sort order
  r                reload the current page
  q                quit";

/// A parsed prompt line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptInput {
    Run(Vec<Command>),
    Help,
    Unknown(String),
}

pub fn parse_line(line: &str) -> PromptInput {
    let line = line.trim();

    if let Some(text) = line.strip_prefix('/') {
        return PromptInput::Run(vec![Command::Input(text.to_string()), Command::Submit]);
    }

    let lowered = line.to_lowercase();
    if let Some(mode) = lowered.strip_prefix("sort ") {
        return match mode.parse::<SortMode>() {
            Ok(mode) => PromptInput::Run(vec![Command::SetSort(mode)]),
            Err(e) => PromptInput::Unknown(e),
        };
    }

    match lowered.as_str() {
        "" => PromptInput::Run(Vec::new()),
        "n" | "next" => PromptInput::Run(vec![Command::Next]),
        "p" | "prev" | "previous" => PromptInput::Run(vec![Command::Previous]),
        "s" | "sort" => PromptInput::Run(vec![Command::ToggleSort]),
        "r" | "reload" => PromptInput::Run(vec![Command::Refresh]),
        "q" | "quit" | "exit" => PromptInput::Run(vec![Command::Quit]),
        "?" | "h" | "help" => PromptInput::Help,
        other => PromptInput::Unknown(format!("unknown command '{}' (? for help)", other)),
    }
}

/// Read one line from the terminal. Blocks; run it off the async runtime.
///
/// EOF or an interrupted prompt reads as "quit".
pub fn read_line() -> PromptInput {
    let theme = ColorfulTheme::default();
    match Input::<String>::with_theme(&theme)
        .with_prompt("video-dash")
        .allow_empty(true)
        .interact_text()
    {
        Ok(line) => parse_line(&line),
        Err(_) => PromptInput::Run(vec![Command::Quit]),
    }
}
