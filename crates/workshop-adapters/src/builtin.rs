//! Built-in strategy wiring.
//!
//! Registers one implementation for every key in the strategy catalog.
//! The result always passes `StrategyRegistries::validate`.

use std::sync::Arc;

use tracing::debug;
use workshop_core::{
    application::{CapacityLedger, ResolutionPolicy, StrategyRegistries},
    error::WorkshopResult,
};

use crate::{
    delivery::{ElfCourier, ReindeerExpress, SleighDelivery},
    discount::{BulkDiscount, NiceListDiscount, NoDiscount},
    notification::{LetterNotifier, LogNotifier, SilentNotifier},
    production::{AtomicCapacity, SimulatedFloor, WorkshopFloor},
    wrapping::{EcoWrap, FestiveWrap, PlainWrap},
};

/// Tunables for the built-in strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuiltinOptions {
    pub capacity_minutes: u64,
    pub bulk_min_items: usize,
    pub bulk_percent: u8,
    pub policy: ResolutionPolicy,
}

impl Default for BuiltinOptions {
    fn default() -> Self {
        Self {
            capacity_minutes: AtomicCapacity::DEFAULT_MINUTES,
            bulk_min_items: BulkDiscount::DEFAULT_MIN_ITEMS,
            bulk_percent: BulkDiscount::DEFAULT_PERCENT,
            policy: ResolutionPolicy::default(),
        }
    }
}

/// Registries holding every built-in strategy, with a fresh capacity ledger.
pub fn builtin_registries(options: &BuiltinOptions) -> WorkshopResult<StrategyRegistries> {
    let ledger: Arc<dyn CapacityLedger> = Arc::new(AtomicCapacity::new(options.capacity_minutes));
    builtin_registries_with(options, ledger, LetterNotifier::stdout())
}

/// Like [`builtin_registries`], with an explicit ledger and letter writer.
pub fn builtin_registries_with(
    options: &BuiltinOptions,
    ledger: Arc<dyn CapacityLedger>,
    letters: LetterNotifier,
) -> WorkshopResult<StrategyRegistries> {
    let mut r = StrategyRegistries::new(options.policy);

    r.discounts.register("none", Arc::new(NoDiscount))?;
    r.discounts.register("nice-list", Arc::new(NiceListDiscount))?;
    r.discounts.register(
        "bulk",
        Arc::new(BulkDiscount::new(options.bulk_min_items, options.bulk_percent)),
    )?;

    r.wrappings.register("plain", Arc::new(PlainWrap))?;
    r.wrappings.register("festive", Arc::new(FestiveWrap))?;
    r.wrappings.register("eco", Arc::new(EcoWrap))?;

    r.deliveries.register("sleigh", Arc::new(SleighDelivery))?;
    r.deliveries
        .register("reindeer-express", Arc::new(ReindeerExpress))?;
    r.deliveries.register("elf-courier", Arc::new(ElfCourier))?;

    r.notifiers.register("log", Arc::new(LogNotifier))?;
    r.notifiers.register("letter", Arc::new(letters))?;
    r.notifiers.register("silent", Arc::new(SilentNotifier))?;

    r.production
        .register("workshop", Arc::new(WorkshopFloor::new(ledger)))?;
    r.production.register("simulated", Arc::new(SimulatedFloor))?;

    r.validate()?;
    debug!(?options, "Built-in strategies registered");
    Ok(r)
}
