//! Streams a reply onto the terminal.
//!
//! Text is written incrementally: each update prints only the new suffix,
//! followed by a one-column cursor marker that is erased before the next
//! write. When stdout is not a terminal the marker is skipped entirely, and
//! in JSON mode nothing is written until the reply is complete.

use console::{style, Term};
use indicatif::ProgressBar;
use parley_runtime::{DisplaySurface, CURSOR};

use crate::output;

pub struct TerminalSurface {
    term: Term,
    /// Reply text already on screen, without the marker
    shown: String,
    cursor_visible: bool,
    interactive: bool,
    waiting: Option<ProgressBar>,
}

impl TerminalSurface {
    pub fn new() -> Self {
        let term = Term::stdout();
        let interactive = term.is_term() && !output::is_json();
        Self {
            term,
            shown: String::new(),
            cursor_visible: false,
            interactive,
            waiting: Some(output::spinner("Thinking...")),
        }
    }

    fn stop_waiting(&mut self) {
        if let Some(spinner) = self.waiting.take() {
            spinner.finish_and_clear();
        }
    }

    fn hide_cursor(&mut self) {
        if self.cursor_visible {
            let _ = self.term.clear_chars(1);
            self.cursor_visible = false;
        }
    }

    /// Print whatever part of `text` is not on screen yet.
    fn write_suffix(&mut self, text: &str) {
        if output::is_json() {
            return;
        }
        let suffix = text.strip_prefix(self.shown.as_str()).unwrap_or(text);
        if !suffix.is_empty() {
            let _ = self.term.write_str(suffix);
            self.shown.push_str(suffix);
        }
    }
}

impl Default for TerminalSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl DisplaySurface for TerminalSurface {
    fn update(&mut self, display: &str) {
        self.stop_waiting();
        self.hide_cursor();

        let text = display.strip_suffix(CURSOR).unwrap_or(display);
        self.write_suffix(text);

        if self.interactive {
            let _ = self.term.write_str(&style(CURSOR).dim().to_string());
            self.cursor_visible = true;
        }
        let _ = self.term.flush();
    }

    fn finish(&mut self, text: &str) {
        self.stop_waiting();
        self.hide_cursor();
        self.write_suffix(text);

        if !output::is_json() {
            let _ = self.term.write_line("");
        }
        let _ = self.term.flush();
    }

    fn abort(&mut self) {
        self.stop_waiting();
        self.hide_cursor();
        if !self.shown.is_empty() && !output::is_json() {
            let _ = self.term.write_line("");
        }
        let _ = self.term.flush();
    }
}
