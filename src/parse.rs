use anyhow::Context;
use regex::{Captures, Regex};

use crate::record::{LogLevel, LogRecord};

/// `adb logcat -v time` line shape: `MM-DD HH:MM:SS.mmm L/TAG(  PID):MESSAGE`.
const LINE_PATTERN: &str = r"^([0-9]{2}-[0-9]{2}) ([0-9]{2}:[0-9]{2}:[0-9]{2}\.[0-9]{3}) ([VDIWEFS])/(.*)(\(\s*[0-9]+\)):(.*)$";

/// Compiled logcat line grammar. Build once per run and reuse for every line.
#[derive(Debug, Clone)]
pub struct LineParser {
    re: Regex,
}

impl LineParser {
    /// # Errors
    ///
    /// Returns an error if the line grammar fails to compile.
    pub fn new() -> anyhow::Result<Self> {
        let re = Regex::new(LINE_PATTERN).context("failed to compile logcat line pattern")?;
        Ok(Self { re })
    }

    /// Parse one line (without its trailing newline).
    ///
    /// Returns `None` for anything that is not a log line: blank lines,
    /// stack-trace continuations, `--------- beginning of main` banners.
    pub fn parse(&self, line: &str) -> Option<LogRecord> {
        let caps = self.re.captures(line)?;
        Some(record_from_captures(&caps))
    }
}

fn group<'a>(caps: &'a Captures<'_>, idx: usize) -> &'a str {
    caps.get(idx).map_or("", |m| m.as_str())
}

fn record_from_captures(caps: &Captures<'_>) -> LogRecord {
    let letter = group(caps, 3).chars().next().unwrap_or('S');
    let level = LogLevel::from_char(letter).unwrap_or_else(|| {
        log::debug!("unknown severity '{letter}', using silent");
        LogLevel::default()
    });
    let pid = group(caps, 5)
        .trim_start_matches('(')
        .trim_end_matches(')')
        .trim();

    LogRecord {
        date: group(caps, 1).to_string(),
        timestamp: group(caps, 2).to_string(),
        level,
        tag: group(caps, 4).trim().to_string(),
        pid: pid.to_string(),
        message: group(caps, 6).to_string(),
    }
}
