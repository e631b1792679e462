//! Application layer for the workshop pipeline.
//!
//! This layer contains:
//! - **Ports**: one trait per pipeline step, plus the capacity ledger
//! - **Registry**: selector → strategy resolution with fallback or strict policy
//! - **Services**: the orchestrator (`GiftProcessor`), the `WorkshopFacade`
//!   and the catalog listing service
//! - **Errors**: application-specific error types
//!
//! The application layer coordinates the domain layer but contains no
//! business logic itself. All business rules live in `crate::domain`.

pub mod error;
pub mod ports;
pub mod registry;
pub mod services;

pub use services::{
    BatchReport, GiftProcessor, StrategyCatalogService, StrategyInfo, WorkshopFacade,
};

pub use registry::{
    ResolutionPolicy, Resolved, ResolvedKey, StrategyRegistries, StrategyRegistry,
    StrategySelection, StrategySet,
};

// Re-export port traits (for adapter implementation)
pub use ports::{
    CapacityLedger, DeliveryStrategy, DiscountPolicy, Notifier, ProductionRecorder,
    WrappingStrategy,
};

pub use error::ApplicationError;
