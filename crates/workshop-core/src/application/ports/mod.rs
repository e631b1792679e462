//! Application ports (traits) for interchangeable behaviour.
//!
//! In hexagonal architecture, ports define interfaces that the application
//! needs from the outside world. Adapters in `workshop-adapters` implement these.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: Called by the orchestrator, implemented by adapters
//!   - `DiscountPolicy`, `WrappingStrategy`, `DeliveryStrategy`,
//!     `Notifier`, `ProductionRecorder`: one per pipeline step
//!   - `CapacityLedger`: shared remaining-capacity counter
//!
//! - **Driving (Input) Ports**: Called by external world, implemented by application
//!   - (Defined in CLI layer, implemented by services)

pub mod output;

pub use output::{
    CapacityLedger, DeliveryStrategy, DiscountPolicy, Notifier, ProductionRecorder,
    WrappingStrategy,
};

#[cfg(test)]
pub use output::{
    MockCapacityLedger, MockDeliveryStrategy, MockDiscountPolicy, MockNotifier,
    MockProductionRecorder, MockWrappingStrategy,
};
