pub mod chain;
pub mod depth;
pub mod error_ext;
pub mod error_stack;
pub mod frame;
pub mod location;
pub mod stack_trace;
pub mod stopwatch;
pub mod traced;
