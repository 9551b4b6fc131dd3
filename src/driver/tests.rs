#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::collections::VecDeque;

use super::*;

/// In-memory line source replaying scripted outcomes, then EOF.
struct Scripted {
    outcomes: VecDeque<ReadOutcome>,
}

impl Scripted {
    fn lines(lines: &[&str]) -> Self {
        Self {
            outcomes: lines
                .iter()
                .map(|l| ReadOutcome::Line((*l).to_string()))
                .collect(),
        }
    }

    fn outcomes(outcomes: Vec<ReadOutcome>) -> Self {
        Self {
            outcomes: outcomes.into(),
        }
    }
}

impl LineSource for Scripted {
    fn read_line(&mut self) -> ReadOutcome {
        self.outcomes.pop_front().unwrap_or(ReadOutcome::Eof)
    }
}

/// Writer whose reader has gone away.
struct ClosedPipe;

impl Write for ClosedPipe {
    fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
        Err(io::Error::from(io::ErrorKind::BrokenPipe))
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn never() -> bool {
    false
}

fn always() -> bool {
    true
}

fn pipeline(filter: ProcessFilter) -> Pipeline {
    Pipeline::new(
        LineParser::new().unwrap(),
        filter,
        ColorTheme::plain(),
        RenderConfig::new(80),
    )
}

fn run(pipeline: &Pipeline, source: &mut dyn LineSource) -> (StreamSummary, String) {
    let mut out = Vec::new();
    let summary = stream_until(pipeline, source, &mut out, never);
    (summary, String::from_utf8(out).unwrap())
}

const ERROR_LINE: &str = "06-12 14:33:01.123 E/MyTag(  123): Something failed";
const OTHER_PID_LINE: &str = "06-12 14:33:02.000 I/Other(  999): hello";

// --- pipeline ---

#[test]
fn process_renders_matching_line() {
    let block = pipeline(ProcessFilter::disabled()).process(ERROR_LINE).unwrap();
    assert_eq!(block, "14:33:01.123  123    E  MyTag:  Something failed");
}

#[test]
fn process_drops_non_log_line() {
    assert!(pipeline(ProcessFilter::disabled()).process("not a log line").is_none());
}

#[test]
fn process_drops_other_pid() {
    assert!(pipeline(ProcessFilter::for_pid("999")).process(ERROR_LINE).is_none());
}

// --- streaming ---

#[test]
fn writes_one_block_per_matching_line() {
    let p = pipeline(ProcessFilter::disabled());
    let mut src = Scripted::lines(&[ERROR_LINE, OTHER_PID_LINE]);
    let (summary, out) = run(&p, &mut src);

    assert!(matches!(summary.reason, StopReason::EndOfStream));
    assert_eq!(summary.lines_read, 2);
    assert_eq!(summary.records_written, 2);
    assert_eq!(out.lines().count(), 2);
    assert!(out.ends_with('\n'));
}

#[test]
fn noise_lines_produce_nothing_and_do_not_stop_stream() {
    let p = pipeline(ProcessFilter::disabled());
    let mut src = Scripted::lines(&["not a log line", "", ERROR_LINE]);
    let (summary, out) = run(&p, &mut src);

    assert!(matches!(summary.reason, StopReason::EndOfStream));
    assert_eq!(summary.lines_read, 3);
    assert_eq!(summary.records_written, 1);
    assert!(out.contains("Something failed"));
}

#[test]
fn pid_filter_only_passes_target() {
    let p = pipeline(ProcessFilter::for_pid("999"));
    let mut src = Scripted::lines(&[ERROR_LINE, OTHER_PID_LINE, ERROR_LINE]);
    let (summary, out) = run(&p, &mut src);

    assert_eq!(summary.records_written, 1);
    assert!(out.contains("Other:"));
    assert!(!out.contains("MyTag"));
}

#[test]
fn mismatched_filter_emits_nothing() {
    let p = pipeline(ProcessFilter::for_pid("999"));
    let mut src = Scripted::lines(&[ERROR_LINE]);
    let (_, out) = run(&p, &mut src);
    assert!(out.is_empty());
}

#[test]
fn decode_errors_are_skipped() {
    let p = pipeline(ProcessFilter::disabled());
    let mut src = Scripted::outcomes(vec![
        ReadOutcome::Decode,
        ReadOutcome::Line(ERROR_LINE.to_string()),
        ReadOutcome::Decode,
    ]);
    let (summary, out) = run(&p, &mut src);

    assert!(matches!(summary.reason, StopReason::EndOfStream));
    assert_eq!(summary.lines_skipped, 2);
    assert_eq!(summary.records_written, 1);
    assert_eq!(out.lines().count(), 1);
}

#[test]
fn read_failure_is_printed_and_ends_stream() {
    let p = pipeline(ProcessFilter::disabled());
    let mut src = Scripted::outcomes(vec![
        ReadOutcome::Line(ERROR_LINE.to_string()),
        ReadOutcome::Failed(io::Error::other("device offline")),
        ReadOutcome::Line(ERROR_LINE.to_string()),
    ]);
    let (summary, out) = run(&p, &mut src);

    assert!(matches!(summary.reason, StopReason::ReadFailed(_)));
    assert_eq!(summary.reason.exit_code(), 0);
    assert_eq!(summary.records_written, 1);
    assert!(out.ends_with("device offline\n"));
}

#[test]
fn interrupted_read_ends_cleanly() {
    let p = pipeline(ProcessFilter::disabled());
    let mut src = Scripted::outcomes(vec![
        ReadOutcome::Interrupted,
        ReadOutcome::Line(ERROR_LINE.to_string()),
    ]);
    let (summary, out) = run(&p, &mut src);

    assert!(matches!(summary.reason, StopReason::Interrupted));
    assert_eq!(summary.reason.exit_code(), 0);
    assert!(out.is_empty());
}

#[test]
fn stop_request_is_checked_before_reading() {
    let p = pipeline(ProcessFilter::disabled());
    let mut src = Scripted::lines(&[ERROR_LINE]);
    let mut out = Vec::new();
    let summary = stream_until(&p, &mut src, &mut out, always);

    assert!(matches!(summary.reason, StopReason::Interrupted));
    assert_eq!(summary.lines_read, 0);
    assert!(out.is_empty());
}

#[test]
fn closed_output_ends_quietly() {
    let p = pipeline(ProcessFilter::disabled());
    let mut src = Scripted::lines(&[ERROR_LINE, ERROR_LINE]);
    let summary = stream_until(&p, &mut src, &mut ClosedPipe, never);

    assert!(matches!(summary.reason, StopReason::OutputClosed));
    assert_eq!(summary.reason.exit_code(), 0);
    assert_eq!(summary.lines_read, 1);
}

#[test]
fn empty_input_is_end_of_stream() {
    let p = pipeline(ProcessFilter::disabled());
    let mut src = Scripted::lines(&[]);
    let (summary, out) = run(&p, &mut src);
    assert!(matches!(summary.reason, StopReason::EndOfStream));
    assert_eq!(summary.reason.exit_code(), 0);
    assert!(out.is_empty());
}

#[test]
fn read_failure_with_closed_output_still_ends_stream() {
    let p = pipeline(ProcessFilter::disabled());
    let mut src = Scripted::outcomes(vec![ReadOutcome::Failed(io::Error::other("gone"))]);
    let summary = stream_until(&p, &mut src, &mut ClosedPipe, never);

    assert!(matches!(summary.reason, StopReason::ReadFailed(_)));
    assert_eq!(summary.reason.exit_code(), 0);
}
