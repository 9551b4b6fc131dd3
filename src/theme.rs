//! ANSI color table for rendered log lines.
//!
//! Each level has a *banner* style (white on a colored background, used for the
//! level badge) and a *text* style (foreground only, used for the message).

use crate::record::LogLevel;

/// Banner/text pair for one severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelStyle {
    pub banner: &'static str,
    pub text: &'static str,
}

/// Immutable color table, built once at startup and passed to the renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorTheme {
    pub silent: LevelStyle,
    pub verbose: LevelStyle,
    pub info: LevelStyle,
    pub debug: LevelStyle,
    pub warning: LevelStyle,
    pub error: LevelStyle,
    pub fatal: LevelStyle,
    pub timestamp: &'static str,
    pub process: &'static str,
    pub tag: &'static str,
    pub reset: &'static str,
}

const NO_STYLE: LevelStyle = LevelStyle {
    banner: "",
    text: "",
};

impl ColorTheme {
    /// 256-color palette.
    pub const fn ansi256() -> Self {
        Self {
            silent: LevelStyle {
                banner: "\x1b[0;38;5;255;48;5;248m",
                text: "\x1b[0;38;5;248m",
            },
            verbose: LevelStyle {
                banner: "\x1b[0;38;5;255;48;5;36m",
                text: "\x1b[0;38;5;36m",
            },
            info: LevelStyle {
                banner: "\x1b[0;38;5;255;48;5;40m",
                text: "\x1b[0;38;5;40m",
            },
            debug: LevelStyle {
                banner: "\x1b[0;38;5;255;48;5;33m",
                text: "\x1b[0;38;5;33m",
            },
            warning: LevelStyle {
                banner: "\x1b[0;38;5;255;48;5;208m",
                text: "\x1b[0;38;5;208m",
            },
            error: LevelStyle {
                banner: "\x1b[0;38;5;255;48;5;124m",
                text: "\x1b[0;38;5;124m",
            },
            fatal: LevelStyle {
                banner: "\x1b[0;38;5;255;48;5;196m",
                text: "\x1b[0;38;5;196m",
            },
            timestamp: "\x1b[0;38;5;134m",
            process: "\x1b[0;38;5;36;48;5;236m",
            tag: "\x1b[0;38;5;255;48;5;236m",
            reset: "\x1b[0m",
        }
    }

    /// Every code empty: used when `NO_COLOR` is set.
    pub const fn plain() -> Self {
        Self {
            silent: NO_STYLE,
            verbose: NO_STYLE,
            info: NO_STYLE,
            debug: NO_STYLE,
            warning: NO_STYLE,
            error: NO_STYLE,
            fatal: NO_STYLE,
            timestamp: "",
            process: "",
            tag: "",
            reset: "",
        }
    }

    pub const fn level(&self, level: LogLevel) -> LevelStyle {
        match level {
            LogLevel::Silent => self.silent,
            LogLevel::Verbose => self.verbose,
            LogLevel::Info => self.info,
            LogLevel::Debug => self.debug,
            LogLevel::Warning => self.warning,
            LogLevel::Error => self.error,
            LogLevel::Fatal => self.fatal,
        }
    }

    /// Style for the message body. Fatal messages use the banner so they stand out.
    pub const fn message(&self, level: LogLevel) -> &'static str {
        let style = self.level(level);
        match level {
            LogLevel::Fatal => style.banner,
            _ => style.text,
        }
    }

    /// Wrap `text` in `start` and the reset code.
    pub fn paint(&self, start: &str, text: &str) -> String {
        format!("{start}{text}{}", self.reset)
    }
}
