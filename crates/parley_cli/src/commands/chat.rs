//! `parley chat`: interactive REPL.

use std::borrow::Cow::{self, Borrowed, Owned};
use std::path::PathBuf;

use anyhow::Result;
use console::style;
use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::history::DefaultHistory;
use rustyline::validate::Validator;
use rustyline::{Context, Editor, Helper};

use super::{build_runtime, models::print_catalog, print_image_notice};
use crate::attachments::{attach, detach, UploadSlot};
use crate::output;
use crate::surface::TerminalSurface;

const COMMANDS: &[&str] = &[
    "/attach", "/detach", "/reset", "/model", "/models", "/help", "/quit",
];

/// One line of REPL input
#[derive(Debug, PartialEq, Eq)]
enum ReplInput {
    Empty,
    Prompt(String),
    Attach(Option<PathBuf>),
    Detach,
    Reset,
    Model(Option<String>),
    Models,
    Help,
    Quit,
    Unknown(String),
}

fn parse_line(line: &str) -> ReplInput {
    let line = line.trim();
    if line.is_empty() {
        return ReplInput::Empty;
    }
    if !line.starts_with('/') {
        return ReplInput::Prompt(line.to_string());
    }

    let (command, rest) = match line.split_once(char::is_whitespace) {
        Some((command, rest)) => (command, rest.trim()),
        None => (line, ""),
    };
    let arg = (!rest.is_empty()).then(|| rest.to_string());

    match command {
        "/attach" | "/file" => ReplInput::Attach(arg.map(PathBuf::from)),
        "/detach" => ReplInput::Detach,
        "/reset" | "/clear" => ReplInput::Reset,
        "/model" => ReplInput::Model(arg),
        "/models" => ReplInput::Models,
        "/help" | "/?" => ReplInput::Help,
        "/quit" | "/exit" => ReplInput::Quit,
        other => ReplInput::Unknown(other.to_string()),
    }
}

/// Slash-command completion and hints for rustyline
struct ReplHelper;

impl Helper for ReplHelper {}

impl Completer for ReplHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let line = &line[..pos];
        if !line.starts_with('/') || line.contains(' ') {
            return Ok((0, Vec::new()));
        }

        let candidates = COMMANDS
            .iter()
            .filter(|cmd| cmd.starts_with(line))
            .map(|cmd| Pair {
                display: cmd.to_string(),
                replacement: cmd.to_string(),
            })
            .collect();
        Ok((0, candidates))
    }
}

impl Highlighter for ReplHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        if line.starts_with('/') {
            Owned(style(line).cyan().to_string())
        } else {
            Borrowed(line)
        }
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _forced: bool) -> bool {
        true
    }
}

impl Hinter for ReplHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> Option<String> {
        let line = &line[..pos];
        if !line.starts_with('/') || line.contains(' ') {
            return None;
        }
        COMMANDS
            .iter()
            .find(|cmd| cmd.starts_with(line) && cmd.len() > line.len())
            .map(|cmd| cmd[line.len()..].to_string())
    }
}

impl Validator for ReplHelper {}

fn print_help() {
    output::header("Commands");
    output::kv("/attach <path>", "load a .txt, .pdf or image file as context");
    output::kv("/detach", "drop the current file context");
    output::kv("/reset", "clear chat history and file context");
    output::kv("/model [name]", "show or switch the model");
    output::kv("/models", "list available models");
    output::kv("/quit", "exit");
}

pub async fn handle(model: Option<String>, file: Option<PathBuf>) -> Result<()> {
    let mut runtime = build_runtime(model)?;
    let mut slot = UploadSlot::new();

    output::header(&format!(
        "parley · {} via {}",
        runtime.model().display_name,
        runtime.provider_id()
    ));
    output::dim("Type a message, /help for commands, /quit to exit.");

    if let Some(path) = file {
        if let Err(e) = attach(&mut runtime, &mut slot, &path) {
            output::error(&format!("{:#}", e));
        }
    }

    let mut rl: Editor<ReplHelper, DefaultHistory> = Editor::new()?;
    rl.set_helper(Some(ReplHelper));

    loop {
        let line = match rl.readline(&format!("{} ", style("you ›").green().bold())) {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) => {
                output::dim("Interrupted. Type /quit to exit.");
                continue;
            }
            Err(ReadlineError::Eof) => break,
            Err(e) => return Err(e.into()),
        };

        let input = parse_line(&line);
        if input != ReplInput::Empty {
            let _ = rl.add_history_entry(line.as_str());
        }

        match input {
            ReplInput::Empty => {}
            ReplInput::Quit => break,
            ReplInput::Help => print_help(),
            ReplInput::Prompt(prompt) => {
                print_image_notice(runtime.image_notice(), &runtime.model().display_name);
                let mut surface = TerminalSurface::new();
                // A failed turn leaves history as it was; keep the session going.
                if let Err(e) = runtime.send(&prompt, &mut surface).await {
                    output::error(&e.to_string());
                }
            }
            ReplInput::Attach(Some(path)) => {
                if let Err(e) = attach(&mut runtime, &mut slot, &path) {
                    output::error(&format!("{:#}", e));
                }
            }
            ReplInput::Attach(None) => output::warning("Usage: /attach <path>"),
            ReplInput::Detach => {
                if detach(&mut runtime, &mut slot) {
                    output::success("File context removed.");
                } else {
                    output::dim("No file context loaded.");
                }
            }
            ReplInput::Reset => {
                runtime.reset();
                slot.clear();
                output::success("Chat history cleared.");
            }
            ReplInput::Model(None) => {
                let model = runtime.model();
                output::kv("model", &model.display_name);
                output::kv("deployment", &model.deployment_id);
                output::kv(
                    "images",
                    if model.supports_image_input { "yes" } else { "no" },
                );
            }
            ReplInput::Model(Some(name)) => match runtime.select_model(&name) {
                Ok(model) => output::success(&format!("Using {}.", model.display_name)),
                Err(e) => output::error(&e.to_string()),
            },
            ReplInput::Models => {
                print_catalog(runtime.catalog(), Some(&runtime.model().display_name));
            }
            ReplInput::Unknown(command) => {
                output::warning(&format!("Unknown command {}. Try /help.", command));
            }
        }
    }

    output::dim("Bye.");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_prompt_and_empty() {
        assert_eq!(parse_line("   "), ReplInput::Empty);
        assert_eq!(
            parse_line("  What is Rust? "),
            ReplInput::Prompt("What is Rust?".into())
        );
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(
            parse_line("/attach ./docs/My File.pdf"),
            ReplInput::Attach(Some(PathBuf::from("./docs/My File.pdf")))
        );
        assert_eq!(parse_line("/attach"), ReplInput::Attach(None));
        assert_eq!(parse_line("/reset"), ReplInput::Reset);
        assert_eq!(parse_line("/model GPT-3.5 Turbo"), ReplInput::Model(Some("GPT-3.5 Turbo".into())));
        assert_eq!(parse_line("/model"), ReplInput::Model(None));
        assert_eq!(parse_line("/models"), ReplInput::Models);
        assert_eq!(parse_line("/exit"), ReplInput::Quit);
        assert_eq!(parse_line("/frobnicate now"), ReplInput::Unknown("/frobnicate".into()));
    }

    #[test]
    fn test_commands_table_matches_parser() {
        for command in COMMANDS {
            assert!(!matches!(parse_line(command), ReplInput::Unknown(_)));
        }
    }
}
