//! Strategy Catalog Service - listing and lookup for display.

use serde::Serialize;

use crate::{
    application::registry::StrategyRegistries,
    domain::{PipelineStep, STRATEGY_CATALOG, StrategyDef, catalog},
};

/// A catalog entry joined with its registration status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StrategyInfo {
    pub capability: PipelineStep,
    pub key: &'static str,
    pub aliases: &'static [&'static str],
    pub summary: &'static str,
    pub fallback: bool,
    pub registered: bool,
}

/// Read-only view over the catalog and the registries.
pub struct StrategyCatalogService<'a> {
    registries: &'a StrategyRegistries,
}

impl<'a> StrategyCatalogService<'a> {
    pub fn new(registries: &'a StrategyRegistries) -> Self {
        Self { registries }
    }

    /// Every catalog entry, optionally for one capability, in pipeline order.
    pub fn list(&self, capability: Option<PipelineStep>) -> Vec<StrategyInfo> {
        let mut entries: Vec<StrategyInfo> = STRATEGY_CATALOG
            .iter()
            .filter(|def| capability.is_none_or(|c| def.capability == c))
            .map(|def| self.info(def))
            .collect();
        entries.sort_by_key(|info| info.capability);
        entries
    }

    /// Look up one selector the way the resolver would, without falling back.
    pub fn describe(&self, capability: PipelineStep, selector: &str) -> Option<StrategyInfo> {
        catalog::find(capability, selector).map(|def| self.info(def))
    }

    fn info(&self, def: &StrategyDef) -> StrategyInfo {
        StrategyInfo {
            capability: def.capability,
            key: def.key,
            aliases: def.aliases,
            summary: def.summary,
            fallback: def.is_fallback,
            registered: self.registries.is_registered(def.capability, def.key),
        }
    }
}
