use std::{fmt, slice};

use snafu::Snafu;

use crate::location::Location;

/// One entry of a captured call stack.
///
/// Every accessor may fail: a stack-capture facility is allowed to report a
/// transient fault for a single frame. Consumers that only need a best-effort
/// location should go through [`frame_location`](crate::frame::frame_location),
/// which turns such faults into an omitted frame.
pub trait StackFrame {
    /// The source file of this frame, `None` when the frame carries no debug info.
    fn file_name(&self) -> Result<Option<&str>, FrameError>;

    fn line_number(&self) -> Result<u32, FrameError>;

    fn column_number(&self) -> Result<u32, FrameError>;
}

#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum FrameError {
    #[snafu(display("frame location is unavailable"))]
    Unavailable {
        #[snafu(implicit)]
        location: Location,
    },

    #[snafu(display("failed to resolve frame: {reason}"))]
    Unresolved {
        #[snafu(implicit)]
        location: Location,
        reason: Box<str>,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
enum Resolution {
    #[default]
    Resolved,
    Unavailable,
    Unresolved(Box<str>),
}

/// An owned frame snapshot handed over by an external stack-capture facility.
///
/// A missing line or column reads as `0`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Frame {
    file: Option<Box<str>>,
    line: Option<u32>,
    column: Option<u32>,
    resolution: Resolution,
}

impl Frame {
    pub fn new<F>(file: F, line: u32, column: u32) -> Self
    where
        F: Into<Box<str>>,
    {
        Self {
            file: Some(file.into()),
            line: Some(line),
            column: Some(column),
            resolution: Resolution::Resolved,
        }
    }

    /// A frame captured without debug symbols.
    pub fn without_file() -> Self {
        Self::default()
    }

    /// A frame whose location could not be read at all.
    pub fn unavailable() -> Self {
        Self {
            resolution: Resolution::Unavailable,
            ..Default::default()
        }
    }

    /// A frame whose symbol lookup failed with the given reason.
    pub fn unresolved<R>(reason: R) -> Self
    where
        R: Into<Box<str>>,
    {
        Self {
            resolution: Resolution::Unresolved(reason.into()),
            ..Default::default()
        }
    }

    pub fn with_file<F>(mut self, file: F) -> Self
    where
        F: Into<Box<str>>,
    {
        self.file = Some(file.into());
        self
    }

    pub fn with_line(mut self, line: u32) -> Self {
        self.line = Some(line);
        self
    }

    pub fn with_column(mut self, column: u32) -> Self {
        self.column = Some(column);
        self
    }

    pub fn file(&self) -> Option<&str> {
        self.file.as_deref()
    }

    pub fn line(&self) -> Option<u32> {
        self.line
    }

    pub fn column(&self) -> Option<u32> {
        self.column
    }

    fn check(&self) -> Result<(), FrameError> {
        match &self.resolution {
            Resolution::Resolved => Ok(()),
            Resolution::Unavailable => UnavailableSnafu.fail(),
            Resolution::Unresolved(reason) => UnresolvedSnafu {
                reason: reason.clone(),
            }
            .fail(),
        }
    }
}

impl StackFrame for Frame {
    fn file_name(&self) -> Result<Option<&str>, FrameError> {
        self.check()?;
        Ok(self.file.as_deref())
    }

    fn line_number(&self) -> Result<u32, FrameError> {
        self.check()?;
        Ok(self.line.unwrap_or_default())
    }

    fn column_number(&self) -> Result<u32, FrameError> {
        self.check()?;
        Ok(self.column.unwrap_or_default())
    }
}

impl From<Location> for Frame {
    fn from(location: Location) -> Self {
        Frame::new(location.file(), location.line(), location.column())
    }
}

/// A call-stack snapshot, most recent call first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StackTrace(Vec<Frame>);

impl StackTrace {
    pub fn new() -> Self {
        Self::default()
    }

    /// A snapshot holding only the caller's location.
    #[track_caller]
    pub fn caller() -> Self {
        Location::caller().into()
    }

    pub fn push(&mut self, frame: Frame) {
        self.0.push(frame);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> slice::Iter<'_, Frame> {
        self.0.iter()
    }

    pub fn frames(&self) -> Vec<&dyn StackFrame> {
        self.0.iter().map(|f| f as &dyn StackFrame).collect()
    }
}

impl From<Location> for StackTrace {
    fn from(location: Location) -> Self {
        Self(vec![location.into()])
    }
}

impl FromIterator<Frame> for StackTrace {
    fn from_iter<T: IntoIterator<Item = Frame>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Extend<Frame> for StackTrace {
    fn extend<T: IntoIterator<Item = Frame>>(&mut self, iter: T) {
        self.0.extend(iter);
    }
}

impl<'a> IntoIterator for &'a StackTrace {
    type Item = &'a Frame;
    type IntoIter = slice::Iter<'a, Frame>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl fmt::Display for StackTrace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, frame) in self.0.iter().enumerate() {
            if idx > 0 {
                f.write_str("\n")?;
            }

            match frame.file() {
                Some(file) => write!(
                    f,
                    "{idx}: {file}:{}:{}",
                    frame.line.unwrap_or_default(),
                    frame.column.unwrap_or_default()
                )?,
                None => write!(f, "{idx}: <unknown>")?,
            }
        }

        Ok(())
    }
}
