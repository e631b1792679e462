//! Unified error handling for Workshop Core.
//!
//! This module provides a unified error type that wraps domain and application
//! errors, with rich context and user-actionable suggestions.

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::{DomainError, PipelineStep};

/// Root error type for Workshop Core operations.
///
/// This enum wraps all possible errors that can occur when using
/// workshop-core, providing a unified interface for error handling.
#[derive(Debug, Error, Clone)]
pub enum WorkshopError {
    /// Errors from the domain layer (business rule violations).
    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    /// Errors from the application layer (resolution and orchestration failures).
    #[error("Application error: {0}")]
    Application(#[from] ApplicationError),

    /// Configuration or setup errors.
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Unexpected internal errors (bugs).
    #[error("Internal error: {message}. This is a bug, please report it.")]
    Internal { message: String },
}

impl WorkshopError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Domain(e) => e.suggestions(),
            Self::Application(e) => e.suggestions(),
            Self::Configuration { message } => vec![
                format!("Configuration issue: {}", message),
                "Check your setup and try again".into(),
            ],
            Self::Internal { .. } => vec![
                "This appears to be a bug in the workshop pipeline".into(),
                "Please report this issue at: https://github.com/cosecruz/workshop/issues".into(),
            ],
        }
    }

    /// Get error category for display/styling purposes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Domain(e) => match e.category() {
                crate::domain::ErrorCategory::Validation => ErrorCategory::Validation,
                crate::domain::ErrorCategory::Capacity => ErrorCategory::Capacity,
                crate::domain::ErrorCategory::Internal => ErrorCategory::Internal,
            },
            Self::Application(e) => e.category(),
            Self::Configuration { .. } => ErrorCategory::Configuration,
            Self::Internal { .. } => ErrorCategory::Internal,
        }
    }

    /// The pipeline step that failed, if this error came out of one.
    pub fn failed_step(&self) -> Option<PipelineStep> {
        match self {
            Self::Application(ApplicationError::StepFailed { step, .. }) => Some(*step),
            _ => None,
        }
    }

    /// Check if this error is retryable.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Domain(DomainError::CapacityExhausted { .. })
            | Self::Application(ApplicationError::LockPoisoned { .. }) => true,
            Self::Application(ApplicationError::StepFailed { source, .. }) => {
                source.is_retryable()
            }
            _ => false,
        }
    }
}

/// Error categories for UI display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Capacity,
    NotFound,
    Configuration,
    Internal,
}

/// Convenient result type alias.
pub type WorkshopResult<T> = Result<T, WorkshopError>;

/// Extension trait for adding context to errors.
pub trait Context<T> {
    /// Add context to an error.
    fn context(self, msg: impl Into<String>) -> WorkshopResult<T>;
}

impl<T, E> Context<T> for Result<T, E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn context(self, msg: impl Into<String>) -> WorkshopResult<T> {
        self.map_err(|e| WorkshopError::Internal {
            message: format!("{}: {}", msg.into(), e),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn step_failed(source: WorkshopError) -> WorkshopError {
        ApplicationError::StepFailed {
            step: PipelineStep::Production,
            source: Box::new(source),
        }
        .into()
    }

    #[test]
    fn step_failure_inherits_category_of_cause() {
        let err = step_failed(
            DomainError::CapacityExhausted {
                requested: 60,
                remaining: 10,
            }
            .into(),
        );
        assert_eq!(err.category(), ErrorCategory::Capacity);
        assert_eq!(err.failed_step(), Some(PipelineStep::Production));
    }

    #[test]
    fn capacity_exhaustion_is_retryable_through_step_wrapper() {
        let err = step_failed(
            DomainError::CapacityExhausted {
                requested: 60,
                remaining: 10,
            }
            .into(),
        );
        assert!(err.is_retryable());
    }

    #[test]
    fn validation_is_not_retryable() {
        let err: WorkshopError = DomainError::InvalidRequest("empty".into()).into();
        assert!(!err.is_retryable());
        assert_eq!(err.failed_step(), None);
    }

    #[test]
    fn step_failure_message_names_step_and_cause() {
        let err = step_failed(DomainError::InvalidRequest("bad".into()).into());
        let text = err.to_string();
        assert!(text.contains("production step failed"));
        assert!(text.contains("bad"));
    }

    #[test]
    fn unknown_strategy_is_not_found() {
        let err: WorkshopError = ApplicationError::UnknownStrategy {
            capability: PipelineStep::Discount,
            selector: "unknown-x".into(),
        }
        .into();
        assert_eq!(err.category(), ErrorCategory::NotFound);
        assert!(err.suggestions().iter().any(|s| s.contains("--strict")));
    }

    #[test]
    fn context_wraps_foreign_errors() {
        let result: Result<(), std::io::Error> = Err(std::io::Error::other("disk on fire"));
        let err = result.context("writing letter").unwrap_err();
        assert!(matches!(err, WorkshopError::Internal { ref message } if message.contains("writing letter")));
    }
}
