use std::error::Error;

use crate::{
    depth::link_depth,
    error_ext::{ErrorExt, Link},
    error_stack::ErrorStack,
};

/// The number of chain levels rendered before the rest is elided.
pub const MAX_DEPTH: usize = 20;

/// Renders an error and its causes, outermost first, up to a depth bound.
///
/// The walk is a loop whose budget is checked before each step into a cause,
/// so cyclic or arbitrarily long chains never grow the call stack. When the
/// budget runs out while errors remain, a final notice reports how many were
/// not rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChainFormatter {
    max_depth: usize,
}

impl Default for ChainFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl ChainFormatter {
    pub const fn new() -> Self {
        Self {
            max_depth: MAX_DEPTH,
        }
    }

    pub const fn with_max_depth(max_depth: usize) -> Self {
        Self { max_depth }
    }

    pub const fn max_depth(&self) -> usize {
        self.max_depth
    }

    pub fn blocks(&self, error: Option<&dyn ErrorExt>) -> ErrorStack {
        self.walk(error.map(Link::Ext))
    }

    pub fn blocks_std(&self, error: Option<&(dyn Error + 'static)>) -> ErrorStack {
        self.walk(error.map(Link::opaque))
    }

    /// The formatted chain, empty when `error` is absent.
    pub fn format(&self, error: Option<&dyn ErrorExt>) -> String {
        self.blocks(error).finish()
    }

    pub fn format_std(&self, error: Option<&(dyn Error + 'static)>) -> String {
        self.blocks_std(error).finish()
    }

    fn walk(&self, mut cursor: Option<Link<'_>>) -> ErrorStack {
        let mut stack = ErrorStack::default();
        let mut remaining = self.max_depth;

        while let Some(link) = cursor {
            if remaining == 0 {
                let elided = link_depth(Some(link));

                tracing::debug!(
                    max_depth = self.max_depth,
                    elided,
                    "error chain exceeds the depth bound"
                );

                stack.push_elided(elided);
                break;
            }

            stack.push(&link);
            remaining -= 1;
            cursor = link.inner();
        }

        stack
    }
}

/// [`ChainFormatter::format`] with the default bound.
pub fn format(error: Option<&dyn ErrorExt>) -> String {
    ChainFormatter::new().format(error)
}

/// [`ChainFormatter::format_std`] with the default bound.
pub fn format_std(error: Option<&(dyn Error + 'static)>) -> String {
    ChainFormatter::new().format_std(error)
}
