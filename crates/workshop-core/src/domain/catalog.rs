//! Strategy catalog: the selector-key vocabulary for every pipeline step.
//!
//! # Design Rationale
//!
//! Selector keys arrive as free-form strings (CLI flags, config files,
//! request manifests). Rather than letting every registry invent its own
//! spelling rules, each key is described exactly once by a [`StrategyDef`]
//! in [`STRATEGY_CATALOG`]. Canonicalization, alias matching and fallback
//! selection are table lookups over that slice.
//!
//! # Adding a New Strategy
//!
//! 1. Add one [`StrategyDef`] entry to [`STRATEGY_CATALOG`]
//! 2. Register an implementation for the key in the adapters crate
//! 3. The registry completeness check fails until step 2 is done

use crate::domain::value_objects::PipelineStep;

/// Describes one selectable strategy.
#[derive(Debug, Clone, Copy)]
pub struct StrategyDef {
    /// The step this strategy serves.
    pub capability: PipelineStep,

    /// Canonical selector key, lowercase kebab-case.
    pub key: &'static str,

    /// Alternative spellings accepted by the resolver.
    pub aliases: &'static [&'static str],

    /// One-line description for listings.
    pub summary: &'static str,

    /// Whether unknown selectors for this capability resolve to this entry.
    ///
    /// Exactly one entry per capability must be `true`.
    /// The `catalog_integrity` test enforces this invariant.
    pub is_fallback: bool,
}

/// Single source of truth for selector keys.
///
/// Ordering: within each capability the fallback entry comes first as a
/// convention, but lookup is exhaustive so order is not semantic.
pub static STRATEGY_CATALOG: &[StrategyDef] = &[
    // ── Discount ────────────────────────────────────────────────────────────
    StrategyDef {
        capability: PipelineStep::Discount,
        key: "none",
        aliases: &["no-discount", "full-price"],
        summary: "Charge full price",
        is_fallback: true,
    },
    StrategyDef {
        capability: PipelineStep::Discount,
        key: "nice-list",
        aliases: &["nice", "score"],
        summary: "Tiered discount by nice score (50: 5%, 75: 10%, 90: 20%)",
        is_fallback: false,
    },
    StrategyDef {
        capability: PipelineStep::Discount,
        key: "bulk",
        aliases: &["volume"],
        summary: "Percentage off once a request carries enough items",
        is_fallback: false,
    },
    // ── Wrapping ────────────────────────────────────────────────────────────
    StrategyDef {
        capability: PipelineStep::Wrapping,
        key: "plain",
        aliases: &["basic", "brown-paper"],
        summary: "Brown paper and string, no surcharge",
        is_fallback: true,
    },
    StrategyDef {
        capability: PipelineStep::Wrapping,
        key: "festive",
        aliases: &["premium", "deluxe"],
        summary: "Themed paper and a bow per category",
        is_fallback: false,
    },
    StrategyDef {
        capability: PipelineStep::Wrapping,
        key: "eco",
        aliases: &["fabric", "furoshiki"],
        summary: "Reusable fabric wraps",
        is_fallback: false,
    },
    // ── Delivery ────────────────────────────────────────────────────────────
    StrategyDef {
        capability: PipelineStep::Delivery,
        key: "sleigh",
        aliases: &["standard"],
        summary: "The main sleigh run, slower for large loads",
        is_fallback: true,
    },
    StrategyDef {
        capability: PipelineStep::Delivery,
        key: "reindeer-express",
        aliases: &["express", "reindeer"],
        summary: "Dedicated reindeer team, fastest",
        is_fallback: false,
    },
    StrategyDef {
        capability: PipelineStep::Delivery,
        key: "elf-courier",
        aliases: &["courier", "elf"],
        summary: "Elves on foot, slow over long distances",
        is_fallback: false,
    },
    // ── Notification ────────────────────────────────────────────────────────
    StrategyDef {
        capability: PipelineStep::Notification,
        key: "log",
        aliases: &["tracing", "console"],
        summary: "Record the notice as a structured log event",
        is_fallback: true,
    },
    StrategyDef {
        capability: PipelineStep::Notification,
        key: "letter",
        aliases: &["stdout", "print"],
        summary: "Write the notice as a letter to standard output",
        is_fallback: false,
    },
    StrategyDef {
        capability: PipelineStep::Notification,
        key: "silent",
        aliases: &["none", "quiet"],
        summary: "Send nothing",
        is_fallback: false,
    },
    // ── Production ──────────────────────────────────────────────────────────
    StrategyDef {
        capability: PipelineStep::Production,
        key: "workshop",
        aliases: &["floor", "elves"],
        summary: "Reserve build minutes on the shared workshop capacity",
        is_fallback: true,
    },
    StrategyDef {
        capability: PipelineStep::Production,
        key: "simulated",
        aliases: &["dry-run", "sim"],
        summary: "Record production metrics without using capacity",
        is_fallback: false,
    },
];

/// All catalog entries for one capability.
pub fn entries_for(capability: PipelineStep) -> impl Iterator<Item = &'static StrategyDef> {
    STRATEGY_CATALOG
        .iter()
        .filter(move |def| def.capability == capability)
}

/// Look up a selector (canonical key or alias, case-insensitive).
pub fn find(capability: PipelineStep, selector: &str) -> Option<&'static StrategyDef> {
    let selector = selector.trim().to_ascii_lowercase();
    entries_for(capability)
        .find(|def| def.key == selector || def.aliases.iter().any(|alias| *alias == selector))
}

/// The canonical key for a selector, if the catalog knows it.
pub fn canonical_key(capability: PipelineStep, selector: &str) -> Option<&'static str> {
    find(capability, selector).map(|def| def.key)
}

/// The designated fallback for a capability.
///
/// # Panics
/// Never, as long as `catalog_integrity` holds.
pub fn fallback_for(capability: PipelineStep) -> &'static StrategyDef {
    entries_for(capability)
        .find(|def| def.is_fallback)
        .expect("every capability has a fallback strategy in STRATEGY_CATALOG")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn catalog_integrity() {
        for step in PipelineStep::ORDER {
            let fallbacks = entries_for(step).filter(|d| d.is_fallback).count();
            assert_eq!(fallbacks, 1, "{step} must have exactly one fallback");
        }
    }

    #[test]
    fn keys_and_aliases_are_unique_per_capability() {
        for step in PipelineStep::ORDER {
            let mut seen = HashSet::new();
            for def in entries_for(step) {
                assert!(seen.insert(def.key), "duplicate key {}", def.key);
                for alias in def.aliases {
                    assert!(seen.insert(*alias), "duplicate alias {alias} for {step}");
                }
            }
        }
    }

    #[test]
    fn keys_are_lowercase_kebab() {
        for def in STRATEGY_CATALOG {
            assert!(
                def.key
                    .chars()
                    .all(|c| c.is_ascii_lowercase() || c == '-'),
                "{} is not kebab-case",
                def.key
            );
        }
    }

    #[test]
    fn find_matches_aliases_case_insensitively() {
        assert_eq!(
            canonical_key(PipelineStep::Delivery, "EXPRESS"),
            Some("reindeer-express")
        );
        assert_eq!(canonical_key(PipelineStep::Discount, " nice "), Some("nice-list"));
    }

    #[test]
    fn aliases_are_scoped_to_their_capability() {
        // "none" is a discount key and a notification alias
        assert_eq!(canonical_key(PipelineStep::Discount, "none"), Some("none"));
        assert_eq!(canonical_key(PipelineStep::Notification, "none"), Some("silent"));
        assert_eq!(canonical_key(PipelineStep::Wrapping, "none"), None);
    }

    #[test]
    fn fallback_keys() {
        assert_eq!(fallback_for(PipelineStep::Discount).key, "none");
        assert_eq!(fallback_for(PipelineStep::Wrapping).key, "plain");
        assert_eq!(fallback_for(PipelineStep::Delivery).key, "sleigh");
        assert_eq!(fallback_for(PipelineStep::Notification).key, "log");
        assert_eq!(fallback_for(PipelineStep::Production).key, "workshop");
    }
}
