//! Driven (output) ports - implemented by infrastructure.
//!
//! Each pipeline step is one single-method trait. Every method applies to
//! every implementation: an adapter that cannot honour a call does not
//! implement the trait. The `workshop-adapters` crate provides the built-ins.

use crate::domain::{
    DeliveryEstimate, DiscountOutcome, GiftRequest, LineItem, Notice, NotificationReceipt,
    ProductionRecord, WrappingOutcome,
};
use crate::error::WorkshopResult;

/// Port for the discount step.
///
/// Implemented by:
/// - `workshop_adapters::discount::NoDiscount` (fallback)
/// - `workshop_adapters::discount::NiceListDiscount`
/// - `workshop_adapters::discount::BulkDiscount`
///
/// The returned amount must not exceed the request subtotal; the
/// orchestrator checks this before moving on.
#[cfg_attr(test, mockall::automock)]
pub trait DiscountPolicy: Send + Sync {
    fn discount(&self, request: &GiftRequest) -> WorkshopResult<DiscountOutcome>;
}

/// Port for the wrapping step. Must return exactly one parcel per item.
#[cfg_attr(test, mockall::automock)]
pub trait WrappingStrategy: Send + Sync {
    fn wrap(&self, items: &[LineItem]) -> WorkshopResult<WrappingOutcome>;
}

/// Port for the delivery step.
///
/// Receives the wrapping outcome so that estimates can depend on the number
/// of parcels actually loaded.
#[cfg_attr(test, mockall::automock)]
pub trait DeliveryStrategy: Send + Sync {
    fn estimate(
        &self,
        request: &GiftRequest,
        wrapping: &WrappingOutcome,
    ) -> WorkshopResult<DeliveryEstimate>;
}

/// Port for the notification step. Fire-and-forget: no acknowledgement
/// beyond the returned receipt.
#[cfg_attr(test, mockall::automock)]
pub trait Notifier: Send + Sync {
    fn notify(&self, notice: &Notice) -> WorkshopResult<NotificationReceipt>;
}

/// Port for the production/telemetry step.
#[cfg_attr(test, mockall::automock)]
pub trait ProductionRecorder: Send + Sync {
    fn record(&self, request: &GiftRequest) -> WorkshopResult<ProductionRecord>;
}

/// Port for the shared remaining-capacity counter.
///
/// Implemented by:
/// - `workshop_adapters::production::AtomicCapacity`
///
/// Implementations must be safe under concurrent callers: a reservation
/// either succeeds atomically or leaves the counter untouched.
#[cfg_attr(test, mockall::automock)]
pub trait CapacityLedger: Send + Sync {
    /// Take `minutes` from the pool, returning what is left.
    fn reserve(&self, minutes: u64) -> WorkshopResult<u64>;

    /// Give `minutes` back to the pool.
    fn release(&self, minutes: u64);

    /// Minutes currently available.
    fn remaining(&self) -> u64;
}
