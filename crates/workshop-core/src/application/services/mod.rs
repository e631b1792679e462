//! Application services - orchestrate use cases.
//!
//! Services coordinate the domain layer and ports to accomplish
//! high-level use cases like "process a gift request" or "list strategies".

pub mod catalog_service;
pub mod gift_processor;
pub mod workshop_facade;

pub use catalog_service::{StrategyCatalogService, StrategyInfo};
pub use gift_processor::GiftProcessor;
pub use workshop_facade::{BatchFailure, BatchReport, BatchSummary, WorkshopFacade};
