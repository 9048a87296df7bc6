use thiserror::Error;
use xroute_types::ProducerError;

use super::error_context::{ErrorCode, ErrorContext};

/// Errors raised by a merge strategy on the message path.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum MergeError {
    /// The adapted method is missing or cannot take the supplied operands.
    #[error("Adaptation error: {0}")]
    AdaptationError(String),
    /// A missing operand was supplied while nulls are disallowed.
    #[error("Precondition violation: {0}")]
    PreconditionViolation(String),
    /// The strategy itself reported a failure.
    #[error("Merge strategy failed: {0}")]
    StrategyFailed(String),
}

impl MergeError {
    pub fn error_code(&self) -> ErrorCode {
        match self {
            MergeError::AdaptationError(_) => ErrorCode::AdaptationError,
            MergeError::PreconditionViolation(_) => ErrorCode::PreconditionViolation,
            MergeError::StrategyFailed(_) => ErrorCode::StrategyFailed,
        }
    }
}

/// Errors raised by a compiled unit while processing one exchange.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ProcessError {
    #[error(transparent)]
    Producer(#[from] ProducerError),
    #[error(transparent)]
    Merge(#[from] MergeError),
}

impl ProcessError {
    pub fn error_context(&self) -> ErrorContext {
        match self {
            // Only a failed call may succeed on a later attempt.
            ProcessError::Producer(e @ ProducerError::Failed { .. }) => {
                ErrorContext::retryable(ErrorCode::ProducerFailed, e.to_string())
            }
            ProcessError::Producer(e) => {
                ErrorContext::non_retryable(ErrorCode::ProducerFailed, e.to_string())
            }
            ProcessError::Merge(e) => ErrorContext::non_retryable(e.error_code(), e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorRetryability;

    #[test]
    fn test_merge_error_display() {
        assert!(MergeError::AdaptationError("m".into()).to_string().contains("Adaptation"));
        assert!(MergeError::PreconditionViolation("p".into())
            .to_string()
            .contains("Precondition"));
    }

    #[test]
    fn test_process_error_context_codes() {
        let err: ProcessError = MergeError::PreconditionViolation("old".into()).into();
        assert_eq!(err.error_context().code, ErrorCode::PreconditionViolation);

        let err: ProcessError = ProducerError::Failed {
            uri: "svc:pricing".into(),
            message: "down".into(),
        }
        .into();
        let ctx = err.error_context();
        assert_eq!(ctx.code, ErrorCode::ProducerFailed);
        assert_eq!(ctx.retryability, ErrorRetryability::Retryable);
        assert!(ctx.message.contains("svc:pricing"));

        let err: ProcessError = ProducerError::Create {
            uri: "svc:pricing".into(),
            message: "no pool".into(),
        }
        .into();
        assert_eq!(err.error_context().retryability, ErrorRetryability::NonRetryable);
    }
}
