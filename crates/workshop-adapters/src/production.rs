//! Production recorders and the shared capacity ledger.
//!
//! `WorkshopFloor` books build minutes on an injected [`CapacityLedger`];
//! `SimulatedFloor` only records metrics. Both report through the `metrics`
//! facade, which is a no-op until a recorder is installed.

use std::sync::{
    Arc,
    atomic::{AtomicU64, Ordering},
};

use tracing::{debug, warn};
use workshop_core::{
    application::ports::{CapacityLedger, ProductionRecorder},
    domain::{DomainError, GiftRequest, ProductionRecord},
    error::WorkshopResult,
};

// ── Capacity ledger ──────────────────────────────────────────────────────────

/// Lock-free remaining-capacity counter, in build minutes.
#[derive(Debug)]
pub struct AtomicCapacity {
    remaining: AtomicU64,
}

impl AtomicCapacity {
    /// One eight-hour shift.
    pub const DEFAULT_MINUTES: u64 = 480;

    pub fn new(minutes: u64) -> Self {
        Self {
            remaining: AtomicU64::new(minutes),
        }
    }
}

impl Default for AtomicCapacity {
    fn default() -> Self {
        Self::new(Self::DEFAULT_MINUTES)
    }
}

impl CapacityLedger for AtomicCapacity {
    fn reserve(&self, minutes: u64) -> WorkshopResult<u64> {
        let mut current = self.remaining.load(Ordering::Acquire);
        loop {
            let Some(next) = current.checked_sub(minutes) else {
                return Err(DomainError::CapacityExhausted {
                    requested: minutes,
                    remaining: current,
                }
                .into());
            };
            match self.remaining.compare_exchange_weak(
                current,
                next,
                Ordering::AcqRel,
                Ordering::Acquire,
            ) {
                Ok(_) => return Ok(next),
                Err(actual) => current = actual,
            }
        }
    }

    fn release(&self, minutes: u64) {
        // Saturate instead of wrapping on an over-release.
        let _ = self
            .remaining
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |current| {
                Some(current.saturating_add(minutes))
            });
    }

    fn remaining(&self) -> u64 {
        self.remaining.load(Ordering::Acquire)
    }
}

// ── Recorders ────────────────────────────────────────────────────────────────

fn record_built(station: &'static str, request: &GiftRequest) {
    metrics::counter!("workshop_gifts_built_total", "station" => station)
        .increment(request.item_count() as u64);
    metrics::histogram!("workshop_build_minutes", "station" => station)
        .record(request.total_build_minutes() as f64);
}

/// Books build minutes on the shared workshop capacity.
#[derive(Clone)]
pub struct WorkshopFloor {
    ledger: Arc<dyn CapacityLedger>,
}

impl WorkshopFloor {
    pub fn new(ledger: Arc<dyn CapacityLedger>) -> Self {
        Self { ledger }
    }

    pub fn ledger(&self) -> &Arc<dyn CapacityLedger> {
        &self.ledger
    }
}

impl ProductionRecorder for WorkshopFloor {
    fn record(&self, request: &GiftRequest) -> WorkshopResult<ProductionRecord> {
        let minutes = request.total_build_minutes();

        let remaining = self.ledger.reserve(minutes).inspect_err(|e| {
            metrics::counter!("workshop_capacity_rejections_total").increment(1);
            warn!(request_id = %request.id(), minutes, error = %e, "Workshop capacity exhausted");
        })?;

        record_built("workshop", request);
        metrics::gauge!("workshop_capacity_remaining_minutes").set(remaining as f64);
        debug!(request_id = %request.id(), minutes, remaining, "Build minutes reserved");

        Ok(ProductionRecord {
            station: "workshop".into(),
            build_minutes: minutes,
            remaining_capacity: Some(remaining),
        })
    }
}

/// Records production metrics without touching capacity.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimulatedFloor;

impl ProductionRecorder for SimulatedFloor {
    fn record(&self, request: &GiftRequest) -> WorkshopResult<ProductionRecord> {
        record_built("simulated", request);
        Ok(ProductionRecord {
            station: "simulated".into(),
            build_minutes: request.total_build_minutes(),
            remaining_capacity: None,
        })
    }
}
