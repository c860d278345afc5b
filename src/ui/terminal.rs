//! Terminal UI.

use console::Term;
use std::io::Write;

use super::{
    should_use_colors, OutputMode, ProgressSpinner, SpinnerHandle, TomeTheme, UserInterface,
};

/// Terminal UI implementation.
///
/// Status goes to stdout; warnings and errors go to stderr so they survive
/// `--quiet` and redirection.
pub struct TerminalUI {
    out: Term,
    err: Term,
    theme: TomeTheme,
    mode: OutputMode,
}

impl TerminalUI {
    /// Create a new terminal UI.
    pub fn new(mode: OutputMode) -> Self {
        let theme = if should_use_colors() {
            TomeTheme::new()
        } else {
            TomeTheme::plain()
        };

        Self {
            out: Term::stdout(),
            err: Term::stderr(),
            theme,
            mode,
        }
    }
}

impl UserInterface for TerminalUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn message(&mut self, msg: &str) {
        if self.mode.shows_status() {
            writeln!(self.out, "  {}", msg).ok();
        }
    }

    fn success(&mut self, msg: &str) {
        if self.mode.shows_status() {
            writeln!(self.out, "  {}", self.theme.format_success(msg)).ok();
        }
    }

    fn warning(&mut self, msg: &str) {
        writeln!(self.err, "  {}", self.theme.format_warning(msg)).ok();
    }

    fn error(&mut self, msg: &str) {
        writeln!(self.err, "{}", self.theme.format_error(msg)).ok();
    }

    fn command(&mut self, line: &str) {
        if self.mode.shows_status() {
            let echoed = self.theme.format_command(&format!("$ {}", line));
            writeln!(self.out, "  {}", echoed).ok();
        }
    }

    fn section(&mut self, title: &str) {
        if self.mode.shows_status() {
            writeln!(self.out, "{}", self.theme.format_section(title)).ok();
        }
    }

    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle> {
        if self.mode.shows_spinners() && self.out.is_term() {
            Box::new(ProgressSpinner::new(message, self.theme.clone()))
        } else {
            if self.mode.shows_status() {
                writeln!(self.out, "  {}", message).ok();
            }
            Box::new(ProgressSpinner::hidden())
        }
    }

    fn show_header(&mut self, title: &str) {
        if self.mode.shows_status() {
            writeln!(self.out, "\n{}\n", self.theme.format_header(title)).ok();
        }
    }
}

/// Create the UI for the current terminal.
pub fn create_ui(mode: OutputMode) -> Box<dyn UserInterface> {
    Box::new(TerminalUI::new(mode))
}
