//! Column layout and hard wrapping for a single [`LogRecord`].
//!
//! Layout: `TIMESTAMP PID LVL TAG: message`, where the first three columns
//! have fixed widths and the message wraps under its own start column.

use crate::record::LogRecord;
use crate::theme::ColorTheme;

pub const TIMESTAMP_WIDTH: usize = 12;
pub const PID_WIDTH: usize = 6;
pub const LEVEL_WIDTH: usize = 3;

/// Fallback when the terminal size cannot be queried (e.g. output is piped).
pub const DEFAULT_TERMINAL_WIDTH: usize = 80;

/// Layout parameters, fixed for the whole run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderConfig {
    pub terminal_width: usize,
    pub timestamp_width: usize,
    pub pid_width: usize,
    pub level_width: usize,
}

impl RenderConfig {
    pub const fn new(terminal_width: usize) -> Self {
        Self {
            terminal_width,
            timestamp_width: TIMESTAMP_WIDTH,
            pid_width: PID_WIDTH,
            level_width: LEVEL_WIDTH,
        }
    }

    /// Width of the three fixed columns plus their trailing spaces.
    pub const fn header_width(&self) -> usize {
        self.timestamp_width + 1 + self.pid_width + 1 + self.level_width + 1
    }

    /// Column at which the message starts for a given tag (`TAG: `).
    pub fn indent_for(&self, tag: &str) -> usize {
        self.header_width() + tag.chars().count() + 2
    }
}

fn center(text: &str, width: usize) -> String {
    format!("{text:^width$}")
}

/// Render one record as a (possibly multi-line) block without a trailing newline.
pub fn render(record: &LogRecord, theme: &ColorTheme, config: &RenderConfig) -> String {
    let level = theme.level(record.level);
    let mut out = String::with_capacity(record.message.len() + 64);

    out.push_str(&theme.paint(
        theme.timestamp,
        &center(&record.timestamp, config.timestamp_width),
    ));
    out.push(' ');
    out.push_str(&theme.paint(theme.process, &center(&record.pid, config.pid_width)));
    out.push(' ');
    out.push_str(&theme.paint(
        level.banner,
        &center(&record.level.as_char().to_string(), config.level_width),
    ));
    out.push(' ');
    out.push_str(&theme.paint(theme.tag, &format!("{}:", record.tag)));
    out.push(' ');

    let indent = config.indent_for(&record.tag);
    let body = wrap(&record.message, indent, config.terminal_width);
    out.push_str(&theme.paint(theme.message(record.level), &body));
    out
}

/// Hard-wrap `text` every `width - indent` characters, ignoring word boundaries.
///
/// Continuation lines are prefixed with `indent` spaces. When the terminal is
/// too narrow to leave any room after the indent, the text is left unwrapped.
pub fn wrap(text: &str, indent: usize, width: usize) -> String {
    let Some(wrap_len) = width.checked_sub(indent).filter(|n| *n > 0) else {
        return text.to_string();
    };
    let chars: Vec<char> = text.chars().collect();
    if chars.len() <= wrap_len {
        return text.to_string();
    }

    let separator = format!("\n{}", " ".repeat(indent));
    chars
        .chunks(wrap_len)
        .map(|segment| segment.iter().collect::<String>())
        .collect::<Vec<_>>()
        .join(&separator)
}
