//! Error types for the step compiler.
//!
//! - [`CompileError`]: Raised while turning a step definition into an executable unit.
//! - [`MergeError`]: Raised by a merge strategy while processing a message.
//! - [`ProcessError`]: Raised by a compiled unit on the message path.
//! - [`ErrorContext`]: Structured error metadata (code, retryability, severity).

pub mod compile_error;
pub mod error_context;
pub mod merge_error;

pub use compile_error::CompileError;
pub use error_context::{ErrorCode, ErrorContext, ErrorRetryability, ErrorSeverity};
pub use merge_error::{MergeError, ProcessError};

/// Convenience alias for compile-time results.
pub type CompileResult<T> = Result<T, CompileError>;
/// Convenience alias for merge results.
pub type MergeResult<T> = Result<T, MergeError>;
