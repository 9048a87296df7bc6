use thiserror::Error;
use xroute_types::ProducerError;

use super::error_context::{ErrorCode, ErrorContext, ErrorSeverity};
use crate::registry::Capability;

/// Errors raised while compiling a step definition.
///
/// All of them are deterministic: compiling the same definition against the
/// same registry fails the same way, so none of them is retryable.
#[derive(Debug, Error)]
pub enum CompileError {
    #[error("Configuration error: {0}")]
    ConfigurationError(String),
    #[error("No component registered under '{key}'")]
    NotFound { key: String },
    #[error("Component '{key}' is not a {expected} (provides: {provided})")]
    TypeMismatch {
        key: String,
        expected: Capability,
        provided: String,
    },
    #[error("Endpoint error: {0}")]
    EndpointError(#[from] ProducerError),
    #[error("DSL parse error: {0}")]
    DslParseError(String),
    #[error("Step '{step_id}' ({label}) failed to compile: {source}")]
    Step {
        step_id: String,
        label: String,
        #[source]
        source: Box<CompileError>,
    },
}

impl CompileError {
    /// Attach the originating step to an error.
    pub fn in_step(self, step_id: impl Into<String>, label: impl Into<String>) -> Self {
        CompileError::Step {
            step_id: step_id.into(),
            label: label.into(),
            source: Box::new(self),
        }
    }

    /// The error without any step wrapping.
    pub fn root_cause(&self) -> &CompileError {
        match self {
            CompileError::Step { source, .. } => source.root_cause(),
            other => other,
        }
    }

    /// Id of the step that failed, if known.
    pub fn step_id(&self) -> Option<&str> {
        match self {
            CompileError::Step { step_id, .. } => Some(step_id),
            _ => None,
        }
    }

    pub fn error_code(&self) -> ErrorCode {
        match self {
            CompileError::ConfigurationError(_) => ErrorCode::ConfigError,
            CompileError::NotFound { .. } => ErrorCode::NotFound,
            CompileError::TypeMismatch { .. } => ErrorCode::TypeMismatch,
            CompileError::EndpointError(_) => ErrorCode::EndpointError,
            CompileError::DslParseError(_) => ErrorCode::DslParseError,
            CompileError::Step { source, .. } => source.error_code(),
        }
    }

    pub fn error_context(&self) -> ErrorContext {
        ErrorContext::non_retryable(self.error_code(), self.to_string())
            .with_severity(ErrorSeverity::Fatal)
    }
}
