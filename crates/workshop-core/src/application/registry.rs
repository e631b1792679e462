//! Strategy resolution: selector string → concrete strategy.
//!
//! A [`StrategyRegistry`] holds the implementations registered for one
//! pipeline step, keyed by canonical catalog key. [`StrategyRegistries`]
//! groups the five registries and turns a [`StrategySelection`] into a
//! [`StrategySet`] ready to inject into the orchestrator.
//!
//! The registries are built once at startup and checked for completeness
//! with `validate`; business logic never looks strategies up on its own.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::{
    application::{
        ApplicationError,
        ports::{DeliveryStrategy, DiscountPolicy, Notifier, ProductionRecorder, WrappingStrategy},
    },
    domain::{PipelineStep, catalog},
    error::WorkshopResult,
};

/// What to do with a selector the catalog does not know.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResolutionPolicy {
    /// Substitute the capability's fallback strategy and log a warning.
    #[default]
    Fallback,
    /// Fail with `ApplicationError::UnknownStrategy`.
    Strict,
}

/// A successful resolution.
pub struct Resolved<S: ?Sized> {
    /// Canonical key of the strategy actually returned.
    pub key: &'static str,
    pub strategy: Arc<S>,
    /// `true` when the selector was unknown and the fallback was substituted.
    pub fell_back: bool,
}

impl<S: ?Sized> Clone for Resolved<S> {
    fn clone(&self) -> Self {
        Self {
            key: self.key,
            strategy: Arc::clone(&self.strategy),
            fell_back: self.fell_back,
        }
    }
}

impl<S: ?Sized> fmt::Debug for Resolved<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Resolved")
            .field("key", &self.key)
            .field("fell_back", &self.fell_back)
            .finish_non_exhaustive()
    }
}

// ── Single-capability registry ───────────────────────────────────────────────

/// Implementations registered for one capability.
pub struct StrategyRegistry<S: ?Sized> {
    capability: PipelineStep,
    policy: ResolutionPolicy,
    entries: BTreeMap<&'static str, Arc<S>>,
}

impl<S: ?Sized> StrategyRegistry<S> {
    /// Create an empty registry using the fallback policy.
    pub fn new(capability: PipelineStep) -> Self {
        Self {
            capability,
            policy: ResolutionPolicy::default(),
            entries: BTreeMap::new(),
        }
    }

    pub fn with_policy(mut self, policy: ResolutionPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn set_policy(&mut self, policy: ResolutionPolicy) {
        self.policy = policy;
    }

    pub const fn capability(&self) -> PipelineStep {
        self.capability
    }

    pub const fn policy(&self) -> ResolutionPolicy {
        self.policy
    }

    /// Register `strategy` under `selector`.
    ///
    /// The selector is canonicalized through the catalog; selectors the
    /// catalog does not list for this capability are rejected. Registering
    /// the same key twice replaces the earlier strategy.
    pub fn register(&mut self, selector: &str, strategy: Arc<S>) -> WorkshopResult<&'static str> {
        let key = catalog::canonical_key(self.capability, selector).ok_or_else(|| {
            ApplicationError::UnknownStrategy {
                capability: self.capability,
                selector: selector.to_string(),
            }
        })?;

        if self.entries.insert(key, strategy).is_some() {
            debug!(capability = %self.capability, key, "Replaced registered strategy");
        }
        Ok(key)
    }

    /// Chaining form of [`Self::register`].
    pub fn with(mut self, selector: &str, strategy: Arc<S>) -> WorkshopResult<Self> {
        self.register(selector, strategy)?;
        Ok(self)
    }

    /// Resolve a selector to a strategy.
    ///
    /// Known selectors (keys or aliases, any case) resolve to their
    /// registered strategy. Unknown selectors follow the registry policy:
    /// the same unknown selector always yields the same fallback.
    pub fn resolve(&self, selector: &str) -> WorkshopResult<Resolved<S>> {
        if let Some(key) = catalog::canonical_key(self.capability, selector) {
            return Ok(Resolved {
                key,
                strategy: self.lookup(key)?,
                fell_back: false,
            });
        }

        match self.policy {
            ResolutionPolicy::Strict => Err(ApplicationError::UnknownStrategy {
                capability: self.capability,
                selector: selector.to_string(),
            }
            .into()),
            ResolutionPolicy::Fallback => {
                let key = catalog::fallback_for(self.capability).key;
                warn!(
                    capability = %self.capability,
                    selector,
                    fallback = key,
                    "Unknown strategy selector, using fallback"
                );
                Ok(Resolved {
                    key,
                    strategy: self.lookup(key)?,
                    fell_back: true,
                })
            }
        }
    }

    /// Completeness check: every catalog key for this capability is registered.
    pub fn validate(&self) -> WorkshopResult<()> {
        let missing: Vec<&'static str> = catalog::entries_for(self.capability)
            .map(|def| def.key)
            .filter(|key| !self.entries.contains_key(key))
            .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(ApplicationError::IncompleteRegistry {
                capability: self.capability,
                missing,
            }
            .into())
        }
    }

    pub fn is_registered(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Registered canonical keys, sorted.
    pub fn keys(&self) -> Vec<&'static str> {
        self.entries.keys().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn lookup(&self, key: &'static str) -> WorkshopResult<Arc<S>> {
        self.entries.get(key).cloned().ok_or_else(|| {
            ApplicationError::StrategyNotRegistered {
                capability: self.capability,
                key,
            }
            .into()
        })
    }
}

// ── Selection ─────────────────────────────────────────────────────────────────

/// One selector string per capability, as supplied by config or flags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StrategySelection {
    pub discount: String,
    pub wrapping: String,
    pub delivery: String,
    pub notification: String,
    pub production: String,
}

impl Default for StrategySelection {
    /// Every capability's fallback key.
    fn default() -> Self {
        Self {
            discount: catalog::fallback_for(PipelineStep::Discount).key.into(),
            wrapping: catalog::fallback_for(PipelineStep::Wrapping).key.into(),
            delivery: catalog::fallback_for(PipelineStep::Delivery).key.into(),
            notification: catalog::fallback_for(PipelineStep::Notification).key.into(),
            production: catalog::fallback_for(PipelineStep::Production).key.into(),
        }
    }
}

impl StrategySelection {
    pub fn selector(&self, step: PipelineStep) -> &str {
        match step {
            PipelineStep::Discount => &self.discount,
            PipelineStep::Wrapping => &self.wrapping,
            PipelineStep::Delivery => &self.delivery,
            PipelineStep::Notification => &self.notification,
            PipelineStep::Production => &self.production,
        }
    }

    pub fn set(&mut self, step: PipelineStep, selector: impl Into<String>) {
        let selector = selector.into();
        match step {
            PipelineStep::Discount => self.discount = selector,
            PipelineStep::Wrapping => self.wrapping = selector,
            PipelineStep::Delivery => self.delivery = selector,
            PipelineStep::Notification => self.notification = selector,
            PipelineStep::Production => self.production = selector,
        }
    }

    /// Builder-style [`Self::set`].
    pub fn with(mut self, step: PipelineStep, selector: impl Into<String>) -> Self {
        self.set(step, selector);
        self
    }
}

/// How one selector was resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedKey {
    pub step: PipelineStep,
    pub selector: String,
    pub key: &'static str,
    pub fell_back: bool,
}

/// One strategy per capability, ready for injection.
#[derive(Clone)]
pub struct StrategySet {
    pub discount: Arc<dyn DiscountPolicy>,
    pub wrapping: Arc<dyn WrappingStrategy>,
    pub delivery: Arc<dyn DeliveryStrategy>,
    pub notifier: Arc<dyn Notifier>,
    pub production: Arc<dyn ProductionRecorder>,
}

// ── All registries ────────────────────────────────────────────────────────────

/// The five per-capability registries.
pub struct StrategyRegistries {
    pub discounts: StrategyRegistry<dyn DiscountPolicy>,
    pub wrappings: StrategyRegistry<dyn WrappingStrategy>,
    pub deliveries: StrategyRegistry<dyn DeliveryStrategy>,
    pub notifiers: StrategyRegistry<dyn Notifier>,
    pub production: StrategyRegistry<dyn ProductionRecorder>,
}

impl StrategyRegistries {
    /// Empty registries sharing one policy.
    pub fn new(policy: ResolutionPolicy) -> Self {
        Self {
            discounts: StrategyRegistry::new(PipelineStep::Discount).with_policy(policy),
            wrappings: StrategyRegistry::new(PipelineStep::Wrapping).with_policy(policy),
            deliveries: StrategyRegistry::new(PipelineStep::Delivery).with_policy(policy),
            notifiers: StrategyRegistry::new(PipelineStep::Notification).with_policy(policy),
            production: StrategyRegistry::new(PipelineStep::Production).with_policy(policy),
        }
    }

    pub fn set_policy(&mut self, policy: ResolutionPolicy) {
        self.discounts.set_policy(policy);
        self.wrappings.set_policy(policy);
        self.deliveries.set_policy(policy);
        self.notifiers.set_policy(policy);
        self.production.set_policy(policy);
    }

    /// Completeness check across every capability.
    pub fn validate(&self) -> WorkshopResult<()> {
        self.discounts.validate()?;
        self.wrappings.validate()?;
        self.deliveries.validate()?;
        self.notifiers.validate()?;
        self.production.validate()
    }

    pub fn is_registered(&self, step: PipelineStep, key: &str) -> bool {
        match step {
            PipelineStep::Discount => self.discounts.is_registered(key),
            PipelineStep::Wrapping => self.wrappings.is_registered(key),
            PipelineStep::Delivery => self.deliveries.is_registered(key),
            PipelineStep::Notification => self.notifiers.is_registered(key),
            PipelineStep::Production => self.production.is_registered(key),
        }
    }

    /// Resolve every selector in `selection`.
    ///
    /// Returns the strategies plus a note per capability, in pipeline order.
    pub fn select(
        &self,
        selection: &StrategySelection,
    ) -> WorkshopResult<(StrategySet, Vec<ResolvedKey>)> {
        let mut notes = Vec::with_capacity(PipelineStep::ORDER.len());
        let mut note = |step: PipelineStep, key: &'static str, fell_back: bool| {
            notes.push(ResolvedKey {
                step,
                selector: selection.selector(step).to_string(),
                key,
                fell_back,
            });
        };

        let discount = self.discounts.resolve(&selection.discount)?;
        note(PipelineStep::Discount, discount.key, discount.fell_back);
        let wrapping = self.wrappings.resolve(&selection.wrapping)?;
        note(PipelineStep::Wrapping, wrapping.key, wrapping.fell_back);
        let delivery = self.deliveries.resolve(&selection.delivery)?;
        note(PipelineStep::Delivery, delivery.key, delivery.fell_back);
        let notifier = self.notifiers.resolve(&selection.notification)?;
        note(PipelineStep::Notification, notifier.key, notifier.fell_back);
        let production = self.production.resolve(&selection.production)?;
        note(PipelineStep::Production, production.key, production.fell_back);

        let set = StrategySet {
            discount: discount.strategy,
            wrapping: wrapping.strategy,
            delivery: delivery.strategy,
            notifier: notifier.strategy,
            production: production.strategy,
        };
        Ok((set, notes))
    }
}

impl Default for StrategyRegistries {
    fn default() -> Self {
        Self::new(ResolutionPolicy::default())
    }
}
