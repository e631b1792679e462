// ============================================================================
// domain/error.rs - DOMAIN ERROR TAXONOMY
// ============================================================================

use chrono::NaiveDate;
use thiserror::Error;

use crate::domain::{
    entities::line_item::{MAX_BUILD_MINUTES, MAX_COST_CENTS},
    value_objects::Money,
};

/// Root domain error type.
///
/// All errors are:
/// - Cloneable (results are cloned into batch reports)
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    // ========================================================================
    // Validation Errors (400-level equivalent)
    // ========================================================================
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Invalid line item '{item}': {reason}")]
    InvalidLineItem { item: String, reason: String },

    #[error("Nice score {score} is out of range (0-100)")]
    NiceScoreOutOfRange { score: u32 },

    #[error("Request has {count} items, the maximum is {max}")]
    TooManyItems { count: usize, max: usize },

    #[error("Unknown {kind}: '{value}'")]
    UnknownValue { kind: &'static str, value: String },

    #[error("Required field missing: {field}")]
    MissingRequiredField { field: &'static str },

    #[error("arrival {days} day(s) after {dispatch} is past the end of the calendar")]
    ArrivalOutOfRange { dispatch: NaiveDate, days: u32 },

    // ========================================================================
    // Strategy Invariant Violations (500-level equivalent)
    // ========================================================================
    #[error("discount of {discount} exceeds the subtotal of {subtotal}")]
    DiscountExceedsSubtotal { discount: String, subtotal: String },

    #[error("discount rate {rate}% is above 100%")]
    DiscountRateTooHigh { rate: u8 },

    #[error("wrapping produced {parcels} parcels for {items} items")]
    ParcelCountMismatch { parcels: usize, items: usize },

    // ========================================================================
    // Resource Limits
    // ========================================================================
    #[error("workshop capacity exhausted: {requested} minutes requested, {remaining} remaining")]
    CapacityExhausted { requested: u64, remaining: u64 },
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidRequest(msg) => vec![
                "Check the gift request fields".into(),
                format!("Details: {}", msg),
            ],
            Self::InvalidLineItem { item, .. } => vec![
                format!("Fix the line item '{}'", item),
                format!(
                    "Items need a name, a build time of 1 to {MAX_BUILD_MINUTES} minutes \
                     and a cost of at most {}",
                    Money::from_cents(MAX_COST_CENTS)
                ),
            ],
            Self::NiceScoreOutOfRange { .. } => {
                vec!["Nice scores range from 0 (naughty) to 100 (angelic)".into()]
            }
            Self::TooManyItems { max, .. } => vec![
                format!("Split the request into batches of at most {} items", max),
            ],
            Self::UnknownValue { kind, .. } => vec![
                format!("Use a supported {}", kind),
                "Try: workshop strategies --help for the accepted spellings".into(),
            ],
            Self::ArrivalOutOfRange { .. } => {
                vec!["Use a dispatch date within the supported calendar".into()]
            }
            Self::CapacityExhausted { .. } => vec![
                "The workshop has no build minutes left for this request".into(),
                "Raise workshop.capacity_minutes or use --produce simulated".into(),
            ],
            Self::DiscountExceedsSubtotal { .. }
            | Self::DiscountRateTooHigh { .. }
            | Self::ParcelCountMismatch { .. } => vec![
                "A strategy violated its contract".into(),
                "Select a different strategy or report the issue".into(),
            ],
            _ => vec!["See documentation for more details".into()],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidRequest(_)
            | Self::InvalidLineItem { .. }
            | Self::NiceScoreOutOfRange { .. }
            | Self::TooManyItems { .. }
            | Self::UnknownValue { .. }
            | Self::MissingRequiredField { .. }
            | Self::ArrivalOutOfRange { .. } => ErrorCategory::Validation,
            Self::CapacityExhausted { .. } => ErrorCategory::Capacity,
            Self::DiscountExceedsSubtotal { .. }
            | Self::DiscountRateTooHigh { .. }
            | Self::ParcelCountMismatch { .. } => ErrorCategory::Internal,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Capacity,
    Internal,
}
