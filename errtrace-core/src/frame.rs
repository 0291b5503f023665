use std::fmt;

use crate::{
    error_ext::ErrorExt,
    stack_trace::{FrameError, StackFrame, StackTrace},
};

/// A resolved `<file>:<line>:<column>` position.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FrameLocation {
    pub file: Box<str>,
    pub line: u32,
    pub column: u32,
}

impl fmt::Display for FrameLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.file, self.line, self.column)
    }
}

fn resolve(frame: &dyn StackFrame) -> Result<Option<FrameLocation>, FrameError> {
    let file = match frame.file_name()? {
        Some(file) if !file.is_empty() => file,
        _ => return Ok(None),
    };

    Ok(Some(FrameLocation {
        file: file.into(),
        line: frame.line_number()?,
        column: frame.column_number()?,
    }))
}

/// Best-effort location of a single frame.
///
/// `None` for frames without a file name and for frames the capture facility
/// failed to read.
pub fn frame_location(frame: &dyn StackFrame) -> Option<FrameLocation> {
    match resolve(frame) {
        Ok(location) => location,
        Err(e) => {
            tracing::trace!(error = %e, "dropping unresolved stack frame");
            None
        }
    }
}

/// Location lines for a sequence of frames, keeping their order.
pub fn location_lines<'a, I>(frames: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a dyn StackFrame>,
{
    frames
        .into_iter()
        .filter_map(frame_location)
        .map(|location| location.to_string())
        .collect()
}

/// Location lines of the error's own frames, most recent call first.
pub fn trace_lines(error: Option<&dyn ErrorExt>) -> Vec<String> {
    match error {
        Some(error) => location_lines(error.frames()),
        None => Vec::new(),
    }
}

/// Location lines of a raw stack snapshot.
pub fn stack_trace_lines(trace: Option<&StackTrace>) -> Vec<String> {
    match trace {
        Some(trace) => location_lines(trace.frames()),
        None => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{location::Location, stack_trace::Frame, traced::TracedError};

    fn is_location_line(line: &str) -> bool {
        let mut parts = line.rsplitn(3, ':');

        let column = parts.next().unwrap_or_default();
        let line_no = parts.next().unwrap_or_default();
        let file = parts.next().unwrap_or_default();

        !file.is_empty()
            && !line_no.is_empty()
            && !column.is_empty()
            && line_no.bytes().all(|b| b.is_ascii_digit())
            && column.bytes().all(|b| b.is_ascii_digit())
    }

    #[test]
    fn test_absent_inputs() {
        assert!(trace_lines(None).is_empty());
        assert!(stack_trace_lines(None).is_empty());
        assert!(stack_trace_lines(Some(&StackTrace::new())).is_empty());
    }

    #[test]
    fn test_frames_without_file_are_dropped() {
        let trace: StackTrace = [
            Frame::new("src/a.rs", 10, 5),
            Frame::without_file().with_line(3),
            Frame::new("", 1, 1),
            Frame::new("src/b.rs", 20, 1),
        ]
        .into_iter()
        .collect();

        assert_eq!(
            stack_trace_lines(Some(&trace)),
            ["src/a.rs:10:5", "src/b.rs:20:1"]
        );
    }

    #[test]
    fn test_one_bad_frame_keeps_the_rest() {
        let trace: StackTrace = [
            Frame::new("src/a.rs", 1, 2),
            Frame::unresolved("dbghelp returned null"),
            Frame::unavailable(),
            Frame::new("src/c.rs", 3, 4),
        ]
        .into_iter()
        .collect();

        assert_eq!(
            stack_trace_lines(Some(&trace)),
            ["src/a.rs:1:2", "src/c.rs:3:4"]
        );
    }

    #[test]
    fn test_error_frames_keep_order_and_drop_bad_entries() {
        let mut err = TracedError::new("failed");
        let raised_at = line!() - 1;

        err.push_frame(Frame::new("src/handler.rs", 12, 9));
        err.push_frame(Frame::without_file().with_line(40).with_column(2));
        err.push_frame(Frame::unresolved("symbol lookup failed"));
        err.push_frame(Frame::unavailable());
        err.push_frame(Frame::new("src/main.rs", 3, 5));

        let lines = trace_lines(Some(&err));

        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with(&format!("{}:{raised_at}:", file!())));
        assert_eq!(lines[1], "src/handler.rs:12:9");
        assert_eq!(lines[2], "src/main.rs:3:5");
        assert!(lines.iter().all(|l| is_location_line(l)));
    }

    #[test]
    fn test_location_line_pattern() {
        let location = Location::caller();
        let line = frame_location(&location).unwrap().to_string();

        assert!(is_location_line(&line), "{line}");
        assert!(line.starts_with(file!()));
        assert!(!is_location_line("'x' Error: y"));
    }
}
