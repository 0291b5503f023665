use std::{any, error::Error, fmt};

use crate::{chain::ChainFormatter, stack_trace::StackFrame};

/// The type name reported for causes only known as `dyn Error`.
pub const OPAQUE_TYPE_NAME: &str = "dyn core::error::Error";

/// The cause of an error, as handed out by [`ErrorExt::inner`].
pub enum NextError<'a> {
    /// A cause that knows its own type name and frames.
    Ext(&'a dyn ErrorExt),
    /// A plain standard error, walked further through [`Error::source`].
    Std(&'static str, &'a (dyn Error + 'static)),
    None,
}

impl<'a> NextError<'a> {
    /// Wraps a standard error whose concrete type is known here.
    pub fn std<E>(error: &'a E) -> Self
    where
        E: Error + 'static,
    {
        NextError::Std(any::type_name::<E>(), error)
    }

    pub fn opaque(error: &'a (dyn Error + 'static)) -> Self {
        NextError::Std(OPAQUE_TYPE_NAME, error)
    }

    pub fn into_link(self) -> Option<Link<'a>> {
        match self {
            NextError::Ext(e) => Some(Link::Ext(e)),
            NextError::Std(type_name, error) => Some(Link::Std { type_name, error }),
            NextError::None => None,
        }
    }
}

/// An error that can report its type name, its own captured frames and its cause.
///
/// The default methods make any [`Error`] usable: the type name comes from
/// [`any::type_name`], there are no frames, and [`Error::source`] is followed
/// as an opaque cause.
pub trait ErrorExt: Error {
    fn type_name(&self) -> &'static str {
        any::type_name::<Self>()
    }

    fn frames(&self) -> Vec<&dyn StackFrame> {
        Vec::new()
    }

    fn inner(&self) -> NextError<'_> {
        match self.source() {
            Some(source) => NextError::opaque(source),
            None => NextError::None,
        }
    }

    /// Renders this error and its causes with the default depth bound.
    fn error_chain(&self) -> String
    where
        Self: Sized,
    {
        ChainFormatter::new().format(Some(self as &dyn ErrorExt))
    }
}

/// A borrowed view of one entry in a cause chain.
#[derive(Clone, Copy)]
pub enum Link<'a> {
    Ext(&'a dyn ErrorExt),
    Std {
        type_name: &'static str,
        error: &'a (dyn Error + 'static),
    },
}

impl<'a> Link<'a> {
    pub fn opaque(error: &'a (dyn Error + 'static)) -> Self {
        Link::Std {
            type_name: OPAQUE_TYPE_NAME,
            error,
        }
    }

    pub fn type_name(&self) -> &'static str {
        match *self {
            Link::Ext(e) => e.type_name(),
            Link::Std { type_name, .. } => type_name,
        }
    }

    pub fn message(&self) -> String {
        match self {
            Link::Ext(e) => e.to_string(),
            Link::Std { error, .. } => error.to_string(),
        }
    }

    pub fn frames(&self) -> Vec<&'a dyn StackFrame> {
        match *self {
            Link::Ext(e) => e.frames(),
            Link::Std { .. } => Vec::new(),
        }
    }

    pub fn inner(&self) -> Option<Link<'a>> {
        match *self {
            Link::Ext(e) => e.inner().into_link(),
            Link::Std { error, .. } => error.source().map(Link::opaque),
        }
    }

    /// Identity of the underlying error object, used to notice a chain that loops back.
    ///
    /// The wide pointer keeps the vtable, so a value and a field stored at the
    /// same address stay distinct.
    pub(crate) fn key(&self) -> LinkKey<'a> {
        match *self {
            Link::Ext(e) => LinkKey::Ext(e),
            Link::Std { error, .. } => LinkKey::Std(error),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum LinkKey<'a> {
    Ext(*const (dyn ErrorExt + 'a)),
    Std(*const (dyn Error + 'static)),
}

impl<'a> From<&'a dyn ErrorExt> for Link<'a> {
    fn from(error: &'a dyn ErrorExt) -> Self {
        Link::Ext(error)
    }
}

impl fmt::Debug for Link<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Link")
            .field("type_name", &self.type_name())
            .field("message", &self.message())
            .finish()
    }
}
