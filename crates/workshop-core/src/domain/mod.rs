// ============================================================================
//  CLEAN MODULE BOUNDARIES
// ============================================================================

//! Core domain layer for the workshop pipeline.
//!
//! This module contains pure business logic with no I/O. Strategies,
//! notification channels and capacity tracking are reached through ports
//! (traits) defined in the application layer.
//!
//! ## Hexagonal Architecture Compliance
//!
//! - **No async**: Domain logic is synchronous
//! - **No I/O**: No filesystem, network, or logging calls
//! - **Few crates**: std + thiserror, serde, chrono, uuid
//! - **Immutable entities**: All domain objects are Clone + PartialEq
//!
// Public API - what the world sees
pub mod catalog;
pub mod entities;
pub mod error;
pub mod value_objects;

// Private implementation details - not visible outside domain
mod validation;

// Re-exports for convenience
pub use catalog::{STRATEGY_CATALOG, StrategyDef};

pub use entities::{
    gift_request::{
        GiftRequest, GiftRequestBuilder, HasRecipient, LATEST_DISPATCH_YEAR, MAX_ITEMS,
        MAX_RECIPIENT_LEN, NoRecipient, RequestId,
    },
    line_item::{LineItem, MAX_BUILD_MINUTES, MAX_COST_CENTS},
    processing_result::{
        DeliveryEstimate, DiscountOutcome, Notice, NotificationReceipt, ProcessingResult,
        ProductionRecord, WrappedParcel, WrappingOutcome,
    },
};

pub use error::{DomainError, ErrorCategory};

pub use value_objects::{Category, Money, NiceScore, PipelineStep, Region};

pub use validation::DomainValidator;
