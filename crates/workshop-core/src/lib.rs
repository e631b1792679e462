//! Workshop Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for the gift
//! workshop pipeline: a request is priced, wrapped, scheduled, announced and
//! built by interchangeable strategies chosen at runtime by key.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │          workshop-cli (CLI)             │
//! │     (Implements Driving Ports)          │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │  (WorkshopFacade, GiftProcessor,        │
//! │   StrategyRegistries)                   │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │ (DiscountPolicy, WrappingStrategy, ...) │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │   workshop-adapters (Infrastructure)    │
//! │ (NiceListDiscount, AtomicCapacity, ...) │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │        Domain Layer (Pure Logic)        │
//! │ (GiftRequest, Money, STRATEGY_CATALOG)  │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use workshop_core::prelude::*;
//!
//! // 1. Build a request
//! let request = GiftRequest::builder()
//!     .recipient("Ada")
//!     .region(Region::Europe)
//!     .nice_score(95).unwrap()
//!     .item(LineItem::new("Train set", Category::Toy, Money::from_cents(4999), 90))
//!     .build()
//!     .unwrap();
//!
//! // 2. Resolve strategies and process (registries filled by the adapters crate)
//! let facade = WorkshopFacade::new(registries).unwrap();
//! let selection = StrategySelection::default().with(PipelineStep::Discount, "nice-list");
//! let report = facade.process_batch(&selection, &[request]).unwrap();
//! ```

pub mod domain;

pub mod application;

pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        BatchReport, GiftProcessor, ResolutionPolicy, StrategyCatalogService, StrategyInfo,
        StrategyRegistries, StrategySelection, WorkshopFacade,
        ports::{
            CapacityLedger, DeliveryStrategy, DiscountPolicy, Notifier, ProductionRecorder,
            WrappingStrategy,
        },
    };
    pub use crate::domain::{
        Category, DeliveryEstimate, DiscountOutcome, GiftRequest, LineItem, Money, NiceScore,
        Notice, NotificationReceipt, PipelineStep, ProcessingResult, ProductionRecord, Region,
        RequestId, WrappedParcel, WrappingOutcome,
    };
    pub use crate::error::{WorkshopError, WorkshopResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
