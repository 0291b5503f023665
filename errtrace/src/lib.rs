//! Human-readable diagnostics for error cause chains.
//!
//! ```
//! use errtrace::{chain::format, traced::TracedError};
//!
//! let inner = TracedError::new("connection refused");
//! let err = TracedError::with_cause("failed to load profile", inner);
//!
//! let report = format(Some(&err));
//! assert!(report.contains("Inner: "));
//! ```
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod config;
pub mod environment;
pub mod error;
mod logger;
pub mod reporter;

pub use errtrace_core::{
    chain, depth, error_ext, error_stack, frame, location, stack_trace, stopwatch, traced,
};
pub use logger::init_logger;
