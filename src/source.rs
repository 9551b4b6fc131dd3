//! Line sources feeding the stream driver: piped stdin or a spawned log command.

use std::io::{self, BufRead, BufReader, Read};
use std::process::{Child, ChildStdout, Command, Stdio};

use anyhow::Context;

use crate::signal;

/// Result of one read attempt.
#[derive(Debug)]
pub enum ReadOutcome {
    /// A complete line with its line terminator removed.
    Line(String),
    Eof,
    /// The line was not valid UTF-8 and has been consumed.
    Decode,
    /// An interrupt arrived while the read was blocked.
    Interrupted,
    Failed(io::Error),
}

pub trait LineSource {
    fn read_line(&mut self) -> ReadOutcome;
}

/// Splits any byte stream into lines.
pub struct ReaderSource<R> {
    reader: BufReader<R>,
    buf: Vec<u8>,
    stop: fn() -> bool,
}

impl<R: Read> ReaderSource<R> {
    /// Reader that stops on the process-wide interrupt flag.
    pub fn new(inner: R) -> Self {
        Self::with_stop(inner, signal::interrupted)
    }

    /// Reader with a custom stop check, consulted whenever a read is interrupted.
    pub fn with_stop(inner: R, stop: fn() -> bool) -> Self {
        Self {
            reader: BufReader::new(inner),
            buf: Vec::new(),
            stop,
        }
    }
}

fn trim_line_ending(buf: &mut Vec<u8>) {
    if buf.last() == Some(&b'\n') {
        buf.pop();
        if buf.last() == Some(&b'\r') {
            buf.pop();
        }
    }
}

impl<R: Read> LineSource for ReaderSource<R> {
    fn read_line(&mut self) -> ReadOutcome {
        self.buf.clear();
        loop {
            let available = match self.reader.fill_buf() {
                Ok(bytes) => bytes,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => {
                    if (self.stop)() {
                        return ReadOutcome::Interrupted;
                    }
                    continue;
                }
                Err(e) => return ReadOutcome::Failed(e),
            };
            if available.is_empty() {
                break;
            }
            if let Some(pos) = available.iter().position(|&b| b == b'\n') {
                self.buf.extend_from_slice(&available[..=pos]);
                self.reader.consume(pos + 1);
                break;
            }
            let len = available.len();
            self.buf.extend_from_slice(available);
            self.reader.consume(len);
        }

        if self.buf.is_empty() {
            return ReadOutcome::Eof;
        }
        trim_line_ending(&mut self.buf);
        match std::str::from_utf8(&self.buf) {
            Ok(line) => ReadOutcome::Line(line.to_string()),
            Err(_) => ReadOutcome::Decode,
        }
    }
}

/// Source reading the process's own standard input.
pub fn stdin() -> ReaderSource<io::Stdin> {
    ReaderSource::new(io::stdin())
}

/// Spawned log command (e.g. `adb logcat -v time`) whose stdout is read line by line.
///
/// The child is killed and reaped when the source is dropped.
pub struct CommandSource {
    child: Child,
    lines: ReaderSource<ChildStdout>,
}

impl CommandSource {
    /// Spawn `command`, split on whitespace into program and arguments.
    ///
    /// # Errors
    ///
    /// Returns an error if the command string is empty or the process fails to spawn.
    pub fn spawn(command: &str) -> anyhow::Result<Self> {
        let mut parts = command.split_whitespace();
        let program = parts
            .next()
            .ok_or_else(|| anyhow::anyhow!("empty log command"))?;

        let mut child = Command::new(program)
            .args(parts)
            .stdout(Stdio::piped())
            .spawn()
            .with_context(|| format!("failed to spawn `{command}`"))?;
        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| anyhow::anyhow!("stdout not captured"))?;

        log::debug!("spawned `{command}` (pid {})", child.id());
        Ok(Self {
            child,
            lines: ReaderSource::new(stdout),
        })
    }
}

impl LineSource for CommandSource {
    fn read_line(&mut self) -> ReadOutcome {
        self.lines.read_line()
    }
}

impl Drop for CommandSource {
    fn drop(&mut self) {
        if let Ok(None) = self.child.try_wait() {
            let _ = self.child.kill();
        }
        match self.child.wait() {
            Ok(status) => log::debug!("log command exited: {status}"),
            Err(e) => log::warn!("failed to reap log command: {e}"),
        }
    }
}
