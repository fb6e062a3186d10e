//! UI context for environment detection.

use std::io::IsTerminal;

use super::mode::OutputMode;

/// Terminal and environment context for UI decisions.
#[derive(Debug, Clone)]
pub struct UiContext {
    /// Whether color output is enabled
    pub color: bool,
    /// Whether unicode symbols are enabled
    pub unicode: bool,
    /// Terminal width (columns)
    pub width: usize,
    /// Resolved output mode
    pub mode: OutputMode,
}

impl UiContext {
    /// Create context from the environment and the `--json` flag.
    ///
    /// Color is off when stdout is not a TTY, `NO_COLOR` is set, or
    /// `TERM=dumb`.
    pub fn from_env(json_flag: bool) -> Self {
        let is_tty = std::io::stdout().is_terminal();
        let term_is_dumb = std::env::var("TERM").map(|v| v == "dumb").unwrap_or(false);
        let no_color_env = std::env::var("NO_COLOR").is_ok();

        Self {
            color: is_tty && !no_color_env && !term_is_dumb,
            unicode: !term_is_dumb,
            width: terminal_width().unwrap_or(80),
            mode: OutputMode::resolve(json_flag, is_tty, term_is_dumb),
        }
    }
}

/// Terminal width from `COLUMNS`.
fn terminal_width() -> Option<usize> {
    std::env::var("COLUMNS")
        .ok()
        .and_then(|cols| cols.parse::<usize>().ok())
        .filter(|width| *width > 0)
}
