//! Runtime configuration: optional TOML file plus environment overrides.
//!
//! File: `$COLOREDLOGCAT_CONFIG`, else `{config_dir}/coloredlogcat/config.toml`.
//!
//! ```toml
//! logcat_command = "adb -s emulator-5554 logcat -v time"
//! ps_command = "adb -s emulator-5554 shell ps"
//! width = 160
//! ```
//!
//! Environment variables take precedence over the file:
//! - `COLOREDLOGCAT_WIDTH` — fixed wrap width instead of the terminal's
//! - `NO_COLOR` — any non-empty value disables color codes
//!
//! `COLUMNS` is honoured below both explicit widths and above the measured terminal size.

use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::render::DEFAULT_TERMINAL_WIDTH;

pub const CONFIG_ENV: &str = "COLOREDLOGCAT_CONFIG";
pub const WIDTH_ENV: &str = "COLOREDLOGCAT_WIDTH";
pub const NO_COLOR_ENV: &str = "NO_COLOR";
pub const COLUMNS_ENV: &str = "COLUMNS";

pub const DEFAULT_LOGCAT_COMMAND: &str = "adb logcat -v time";
pub const DEFAULT_PS_COMMAND: &str = "adb shell ps";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Command spawned when stdin is a terminal.
    pub logcat_command: String,
    /// Command listing device processes, used to resolve a package to a pid.
    pub ps_command: String,
    /// Fixed output width; `None` means measure the terminal.
    pub width: Option<usize>,
    /// `$COLUMNS`, used when no explicit width is configured.
    pub columns: Option<usize>,
    pub color: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            logcat_command: DEFAULT_LOGCAT_COMMAND.to_string(),
            ps_command: DEFAULT_PS_COMMAND.to_string(),
            width: None,
            columns: None,
            color: true,
        }
    }
}

/// On-disk shape of `config.toml`.
#[derive(serde::Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    logcat_command: Option<String>,
    ps_command: Option<String>,
    width: Option<usize>,
}

/// `$COLOREDLOGCAT_CONFIG` if set, else the platform config dir.
pub fn default_config_path() -> Option<PathBuf> {
    std::env::var_os(CONFIG_ENV)
        .map(PathBuf::from)
        .or_else(|| dirs::config_dir().map(|d| d.join("coloredlogcat").join("config.toml")))
}

/// Read the config file. A missing or unreadable file yields `Ok(None)`.
fn read_file(path: &Path) -> anyhow::Result<Option<ConfigFile>> {
    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            log::debug!("no config file at {}", path.display());
            return Ok(None);
        }
        Err(e) => {
            log::warn!("ignoring unreadable config file {}: {e}", path.display());
            return Ok(None);
        }
    };
    let file: ConfigFile = toml::from_str(&content)
        .with_context(|| format!("failed to parse config file: {}", path.display()))?;
    Ok(Some(file))
}

fn parse_width(raw: &str) -> Option<usize> {
    raw.trim().parse::<usize>().ok().filter(|w| *w > 0)
}

impl Config {
    /// Load from the default path and the process environment.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but is not valid TOML.
    pub fn load() -> anyhow::Result<Self> {
        let path = default_config_path();
        Self::load_from(path.as_deref(), |key| std::env::var(key).ok())
    }

    /// Load from an explicit path and environment lookup. Useful for testing.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but is not valid TOML.
    pub fn load_from(
        path: Option<&Path>,
        env: impl Fn(&str) -> Option<String>,
    ) -> anyhow::Result<Self> {
        let mut config = Self::default();
        if let Some(path) = path
            && let Some(file) = read_file(path)?
        {
            config.apply_file(file);
        }
        config.apply_env(env);
        Ok(config)
    }

    fn apply_file(&mut self, file: ConfigFile) {
        if let Some(cmd) = file.logcat_command.filter(|c| !c.trim().is_empty()) {
            self.logcat_command = cmd;
        }
        if let Some(cmd) = file.ps_command.filter(|c| !c.trim().is_empty()) {
            self.ps_command = cmd;
        }
        if let Some(width) = file.width {
            if width > 0 {
                self.width = Some(width);
            } else {
                log::warn!("ignoring config width 0");
            }
        }
    }

    fn apply_env(&mut self, env: impl Fn(&str) -> Option<String>) {
        if let Some(raw) = env(WIDTH_ENV) {
            match parse_width(&raw) {
                Some(width) => self.width = Some(width),
                None => log::warn!("ignoring invalid {WIDTH_ENV}={raw:?}"),
            }
        }
        self.columns = env(COLUMNS_ENV).and_then(|raw| parse_width(&raw));
        if env(NO_COLOR_ENV).is_some_and(|v| !v.is_empty()) {
            self.color = false;
        }
    }

    /// Output width for this run: the configured override, else `$COLUMNS`,
    /// else the current terminal width, else 80.
    pub fn terminal_width(&self) -> usize {
        resolve_width(self.width.or(self.columns), measure_terminal_width())
    }
}

/// Current terminal column count, if stdout is attached to one.
pub fn measure_terminal_width() -> Option<usize> {
    crossterm::terminal::size()
        .ok()
        .map(|(cols, _rows)| usize::from(cols))
        .filter(|cols| *cols > 0)
}

pub fn resolve_width(configured: Option<usize>, measured: Option<usize>) -> usize {
    configured.or(measured).unwrap_or(DEFAULT_TERMINAL_WIDTH)
}
