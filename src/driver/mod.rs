//! The streaming loop: read → parse → filter → render → write.
//!
//! Startup (terminal width, grammar, pid filter, input choice) happens before
//! [`stream`] is called; releasing the input is the caller's drop of the source.

use std::io::{self, Write};

use crate::filter::ProcessFilter;
use crate::parse::LineParser;
use crate::render::{self, RenderConfig};
use crate::signal;
use crate::source::{LineSource, ReadOutcome};
use crate::theme::ColorTheme;

/// Everything needed to turn one raw line into an output block.
#[derive(Debug, Clone)]
pub struct Pipeline {
    parser: LineParser,
    filter: ProcessFilter,
    theme: ColorTheme,
    layout: RenderConfig,
}

impl Pipeline {
    pub const fn new(
        parser: LineParser,
        filter: ProcessFilter,
        theme: ColorTheme,
        layout: RenderConfig,
    ) -> Self {
        Self {
            parser,
            filter,
            theme,
            layout,
        }
    }

    /// Rendered block for `line`, or `None` if it is not a log line or is filtered out.
    pub fn process(&self, line: &str) -> Option<String> {
        let record = self.parser.parse(line)?;
        if !self.filter.should_emit(&record) {
            return None;
        }
        Some(render::render(&record, &self.theme, &self.layout))
    }
}

/// Why streaming ended.
#[derive(Debug)]
pub enum StopReason {
    EndOfStream,
    Interrupted,
    /// The reader of our output went away (e.g. `| head`).
    OutputClosed,
    ReadFailed(io::Error),
    WriteFailed(io::Error),
}

impl StopReason {
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::EndOfStream
            | Self::Interrupted
            | Self::OutputClosed
            | Self::ReadFailed(_) => 0,
            Self::WriteFailed(_) => 1,
        }
    }
}

#[derive(Debug)]
pub struct StreamSummary {
    pub reason: StopReason,
    pub lines_read: u64,
    pub lines_skipped: u64,
    pub records_written: u64,
}

/// Stream until end of input, interrupt, or an unrecoverable I/O error.
pub fn stream(
    pipeline: &Pipeline,
    source: &mut dyn LineSource,
    out: &mut dyn Write,
) -> StreamSummary {
    stream_until(pipeline, source, out, signal::interrupted)
}

/// [`stream`] with an explicit stop check, polled before every read.
pub fn stream_until(
    pipeline: &Pipeline,
    source: &mut dyn LineSource,
    out: &mut dyn Write,
    stop: fn() -> bool,
) -> StreamSummary {
    let mut summary = StreamSummary {
        reason: StopReason::EndOfStream,
        lines_read: 0,
        lines_skipped: 0,
        records_written: 0,
    };

    summary.reason = loop {
        if stop() {
            break StopReason::Interrupted;
        }
        match source.read_line() {
            ReadOutcome::Line(line) => {
                summary.lines_read += 1;
                let Some(block) = pipeline.process(&line) else {
                    continue;
                };
                match writeln!(out, "{block}") {
                    Ok(()) => summary.records_written += 1,
                    Err(e) if e.kind() == io::ErrorKind::BrokenPipe => {
                        break StopReason::OutputClosed;
                    }
                    Err(e) => {
                        log::error!("writing output failed: {e}");
                        break StopReason::WriteFailed(e);
                    }
                }
            }
            ReadOutcome::Eof => break StopReason::EndOfStream,
            ReadOutcome::Decode => {
                summary.lines_skipped += 1;
                log::debug!("skipping line that is not valid UTF-8");
            }
            ReadOutcome::Interrupted => break StopReason::Interrupted,
            ReadOutcome::Failed(e) => {
                if let Err(w) = writeln!(out, "{e}") {
                    log::debug!("could not print read error: {w}");
                }
                log::error!("reading log stream failed: {e}");
                break StopReason::ReadFailed(e);
            }
        }
    };

    let _ = out.flush();
    log::debug!(
        "stream ended ({:?}): {} lines read, {} skipped, {} records written",
        summary.reason,
        summary.lines_read,
        summary.lines_skipped,
        summary.records_written
    );
    summary
}

#[cfg(test)]
mod tests;
