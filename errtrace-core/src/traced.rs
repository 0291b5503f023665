use std::{error::Error, fmt};

use crate::{
    error_ext::{ErrorExt, NextError},
    location::Location,
    stack_trace::{Frame, StackFrame, StackTrace},
};

/// Alias for a type-erased, chain-aware error.
pub type BoxErrorExt = Box<dyn ErrorExt + Send + Sync>;

#[derive(Debug)]
enum Cause {
    Traced(Box<TracedError>),
    Other(BoxErrorExt),
}

/// A ready-made error carrying a message, its raise location and an optional cause.
///
/// The cause is reachable through [`ErrorExt::inner`]; [`Error::source`] stays
/// `None` because the cause is stored as a chain-aware trait object.
#[derive(Debug)]
pub struct TracedError {
    type_name: &'static str,
    message: Box<str>,
    cause: Option<Cause>,
    trace: StackTrace,
}

impl TracedError {
    #[track_caller]
    pub fn new<M>(message: M) -> Self
    where
        M: Into<Box<str>>,
    {
        Self {
            type_name: std::any::type_name::<Self>(),
            message: message.into(),
            cause: None,
            trace: StackTrace::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn with_cause<M>(message: M, cause: TracedError) -> Self
    where
        M: Into<Box<str>>,
    {
        let mut err = Self::new(message);
        err.cause = Some(Cause::Traced(Box::new(cause)));
        err
    }

    #[track_caller]
    pub fn caused_by<M, E>(message: M, cause: E) -> Self
    where
        M: Into<Box<str>>,
        E: ErrorExt + Send + Sync + 'static,
    {
        let mut err = Self::new(message);
        err.cause = Some(Cause::Other(Box::new(cause)));
        err
    }

    /// Reports `type_name` instead of this type's own path.
    pub fn with_type_name(mut self, type_name: &'static str) -> Self {
        self.type_name = type_name;
        self
    }

    /// Replaces the captured frames.
    pub fn with_trace(mut self, trace: StackTrace) -> Self {
        self.trace = trace;
        self
    }

    pub fn push_frame(&mut self, frame: Frame) {
        self.trace.push(frame);
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn trace(&self) -> &StackTrace {
        &self.trace
    }

    pub fn cause(&self) -> Option<&dyn ErrorExt> {
        match self.cause.as_ref()? {
            Cause::Traced(e) => Some(&**e as &dyn ErrorExt),
            Cause::Other(e) => Some(&**e as &dyn ErrorExt),
        }
    }
}

impl fmt::Display for TracedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl Error for TracedError {}

impl ErrorExt for TracedError {
    fn type_name(&self) -> &'static str {
        self.type_name
    }

    fn frames(&self) -> Vec<&dyn StackFrame> {
        self.trace.frames()
    }

    fn inner(&self) -> NextError<'_> {
        match self.cause() {
            Some(cause) => NextError::Ext(cause),
            None => NextError::None,
        }
    }
}

impl Drop for TracedError {
    fn drop(&mut self) {
        // unlink nested causes one at a time so long chains don't recurse on drop
        let mut next = self.cause.take();

        while let Some(Cause::Traced(mut e)) = next {
            next = e.cause.take();
        }
    }
}
