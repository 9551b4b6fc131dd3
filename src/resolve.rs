//! Package name → process id lookup for the pid filter.

use std::process::{Command, Stdio};

use anyhow::Context;

pub trait ProcessResolver {
    /// Return the pid of the first running process matching `package`, if any.
    fn resolve(&self, package: &str) -> Option<String>;
}

/// Resolves pids by running a process listing command (e.g. `adb shell ps`).
#[derive(Debug, Clone)]
pub struct CommandResolver {
    command: String,
}

impl CommandResolver {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
        }
    }

    fn list(&self) -> anyhow::Result<String> {
        let mut parts = self.command.split_whitespace();
        let program = parts
            .next()
            .ok_or_else(|| anyhow::anyhow!("empty process listing command"))?;
        let output = Command::new(program)
            .args(parts)
            .stdin(Stdio::null())
            .stderr(Stdio::null())
            .output()
            .with_context(|| format!("failed to run `{}`", self.command))?;
        String::from_utf8(output.stdout).context("process listing is not valid UTF-8")
    }
}

impl ProcessResolver for CommandResolver {
    fn resolve(&self, package: &str) -> Option<String> {
        let package = package.trim();
        if package.is_empty() {
            return None;
        }
        let listing = match self.list() {
            Ok(listing) => listing,
            Err(e) => {
                log::warn!("process lookup failed ({e:#}), showing all processes");
                return None;
            }
        };
        let pid = find_pid(&listing, package);
        match &pid {
            Some(pid) => log::info!("filtering on pid {pid} ({package})"),
            None => log::warn!("no running process matches '{package}', showing all processes"),
        }
        pid
    }
}

/// Second whitespace-separated field of the first line mentioning `package`.
pub fn find_pid(listing: &str, package: &str) -> Option<String> {
    listing
        .lines()
        .find(|line| line.contains(package))?
        .split_whitespace()
        .nth(1)
        .map(str::to_string)
}
