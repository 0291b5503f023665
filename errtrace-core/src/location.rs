use std::{fmt, panic};

use snafu::GenerateImplicitData;

use crate::{
    frame::FrameLocation,
    stack_trace::{FrameError, StackFrame},
};

/// The source position an error was raised at, captured through `#[track_caller]`.
///
/// Unlike a frame from an external capture facility this always resolves, so
/// it is the frame every [`TracedError`](crate::traced::TracedError) starts with.
#[derive(Copy, Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Location(&'static panic::Location<'static>);

impl Location {
    #[track_caller]
    #[inline]
    pub const fn caller() -> Self {
        Self(panic::Location::caller())
    }

    #[inline]
    pub const fn file(&self) -> &'static str {
        self.0.file()
    }

    #[inline]
    pub const fn line(&self) -> u32 {
        self.0.line()
    }

    #[inline]
    pub const fn column(&self) -> u32 {
        self.0.column()
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.file(), self.line(), self.column())
    }
}

impl From<Location> for FrameLocation {
    fn from(location: Location) -> Self {
        FrameLocation {
            file: location.file().into(),
            line: location.line(),
            column: location.column(),
        }
    }
}

impl GenerateImplicitData for Location {
    #[track_caller]
    #[inline]
    fn generate() -> Self {
        Self::caller()
    }
}

impl StackFrame for Location {
    fn file_name(&self) -> Result<Option<&str>, FrameError> {
        Ok(Some(self.file()))
    }

    fn line_number(&self) -> Result<u32, FrameError> {
        Ok(self.line())
    }

    fn column_number(&self) -> Result<u32, FrameError> {
        Ok(self.column())
    }
}
