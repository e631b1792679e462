//! Application layer errors.
//!
//! These errors represent failures in resolution and orchestration, not
//! business rules. Business rule violations are `DomainError` from
//! `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::domain::PipelineStep;
use crate::error::{ErrorCategory, WorkshopError};

/// Errors that occur while wiring or running the pipeline.
#[derive(Debug, Error, Clone)]
pub enum ApplicationError {
    /// Selector matched no catalog key (strict resolution, or registration).
    #[error("Unknown {capability} strategy '{selector}'")]
    UnknownStrategy {
        capability: PipelineStep,
        selector: String,
    },

    /// Catalog key is valid but nothing was registered for it.
    #[error("No {capability} strategy registered for '{key}'")]
    StrategyNotRegistered {
        capability: PipelineStep,
        key: &'static str,
    },

    /// Registry completeness check failed.
    #[error("{capability} registry is missing strategies: {}", .missing.join(", "))]
    IncompleteRegistry {
        capability: PipelineStep,
        missing: Vec<&'static str>,
    },

    /// A pipeline step failed; the remaining steps were not run.
    #[error("{step} step failed: {source}")]
    StepFailed {
        step: PipelineStep,
        #[source]
        source: Box<WorkshopError>,
    },

    /// A request file could not be read or parsed.
    #[error("Failed to load requests from {path}: {reason}")]
    RequestLoad { path: PathBuf, reason: String },

    /// A notification channel could not write its message.
    #[error("Notification channel '{channel}' failed: {reason}")]
    NotificationFailed { channel: String, reason: String },

    /// Shared state lock poisoned.
    #[error("Shared state lock poisoned: {resource}")]
    LockPoisoned { resource: &'static str },
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::UnknownStrategy { capability, .. } => vec![
                format!("No {} strategy is known by that name", capability),
                format!("Try: workshop strategies --capability {}", capability),
                "Or drop --strict to fall back to the default strategy".into(),
            ],
            Self::StrategyNotRegistered { capability, key } => vec![
                format!("'{}' is listed for {} but has no implementation", key, capability),
                "This is likely a wiring error at startup".into(),
            ],
            Self::IncompleteRegistry { missing, .. } => vec![
                format!("Register implementations for: {}", missing.join(", ")),
                "This is likely a wiring error at startup".into(),
            ],
            Self::StepFailed { step, source } => {
                let mut suggestions = vec![format!("The {} step aborted the request", step)];
                suggestions.extend(source.suggestions());
                suggestions
            }
            Self::RequestLoad { path, .. } => vec![
                format!("Check the request file: {}", path.display()),
                "Files must be .toml or .json with a top-level `requests` list".into(),
            ],
            Self::NotificationFailed { .. } => vec![
                "The notification could not be written".into(),
                "Try --notify log".into(),
            ],
            Self::LockPoisoned { .. } => vec![
                "A previous operation panicked while holding shared state".into(),
                "Try again in a moment".into(),
            ],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::UnknownStrategy { .. } => ErrorCategory::NotFound,
            Self::StrategyNotRegistered { .. } | Self::IncompleteRegistry { .. } => {
                ErrorCategory::Configuration
            }
            Self::StepFailed { source, .. } => source.category(),
            Self::RequestLoad { .. } => ErrorCategory::Validation,
            Self::NotificationFailed { .. } | Self::LockPoisoned { .. } => ErrorCategory::Internal,
        }
    }
}
