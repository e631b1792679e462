//! Delivery strategies.
//!
//! Transit time is derived from the region's distance band (0 = North Pole,
//! 4 = farthest). The arrival date is always `dispatch_date + days`.

use workshop_core::{
    application::ports::DeliveryStrategy,
    domain::{DeliveryEstimate, GiftRequest, WrappingOutcome},
    error::WorkshopResult,
};

/// The main sleigh run. Large loads add a day per ten parcels.
#[derive(Debug, Clone, Copy, Default)]
pub struct SleighDelivery;

impl SleighDelivery {
    const PARCELS_PER_EXTRA_DAY: usize = 10;
}

impl DeliveryStrategy for SleighDelivery {
    fn estimate(
        &self,
        request: &GiftRequest,
        wrapping: &WrappingOutcome,
    ) -> WorkshopResult<DeliveryEstimate> {
        let load_days = (wrapping.parcel_count() / Self::PARCELS_PER_EXTRA_DAY) as u32;
        let days = 2 + request.region().distance_band() + load_days;
        Ok(DeliveryEstimate::after("sleigh", request.dispatch_date(), days)?)
    }
}

/// A dedicated reindeer team.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReindeerExpress;

impl DeliveryStrategy for ReindeerExpress {
    fn estimate(
        &self,
        request: &GiftRequest,
        _wrapping: &WrappingOutcome,
    ) -> WorkshopResult<DeliveryEstimate> {
        let days = 1 + request.region().distance_band() / 2;
        Ok(DeliveryEstimate::after(
            "reindeer-express",
            request.dispatch_date(),
            days,
        )?)
    }
}

/// Elves on foot.
#[derive(Debug, Clone, Copy, Default)]
pub struct ElfCourier;

impl DeliveryStrategy for ElfCourier {
    fn estimate(
        &self,
        request: &GiftRequest,
        _wrapping: &WrappingOutcome,
    ) -> WorkshopResult<DeliveryEstimate> {
        let days = 3 + 2 * request.region().distance_band();
        Ok(DeliveryEstimate::after(
            "elf-courier",
            request.dispatch_date(),
            days,
        )?)
    }
}
