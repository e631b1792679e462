//! Workshop Facade - one entry point from selection to results.
//!
//! Owns the validated registries. Callers hand over a [`StrategySelection`]
//! and a batch of requests; the facade resolves the strategies once and runs
//! every request through a [`GiftProcessor`].

use serde::Serialize;
use tracing::{info, instrument};

use crate::{
    application::{
        registry::{ResolvedKey, StrategyRegistries, StrategySelection},
        services::gift_processor::GiftProcessor,
    },
    domain::{GiftRequest, ProcessingResult},
    error::{WorkshopError, WorkshopResult},
};

/// Entry point wiring resolution and orchestration together.
pub struct WorkshopFacade {
    registries: StrategyRegistries,
}

impl WorkshopFacade {
    /// Wrap a set of registries, failing if any catalog key is unregistered.
    pub fn new(registries: StrategyRegistries) -> WorkshopResult<Self> {
        registries.validate()?;
        Ok(Self { registries })
    }

    pub fn registries(&self) -> &StrategyRegistries {
        &self.registries
    }

    /// Resolve a selection into a ready processor.
    pub fn processor_for(
        &self,
        selection: &StrategySelection,
    ) -> WorkshopResult<(GiftProcessor, Vec<ResolvedKey>)> {
        let (set, resolutions) = self.registries.select(selection)?;
        Ok((GiftProcessor::from_set(set), resolutions))
    }

    /// Resolve once, then process every request.
    ///
    /// Resolution errors fail the whole call. Per-request failures are kept
    /// in the report.
    pub fn process_batch(
        &self,
        selection: &StrategySelection,
        requests: &[GiftRequest],
    ) -> WorkshopResult<BatchReport> {
        self.process_batch_with(selection, requests, |_, _| {})
    }

    /// [`process_batch`](Self::process_batch) with a callback after each
    /// request, for progress reporting.
    #[instrument(skip_all, fields(requests = requests.len()))]
    pub fn process_batch_with<F>(
        &self,
        selection: &StrategySelection,
        requests: &[GiftRequest],
        on_done: F,
    ) -> WorkshopResult<BatchReport>
    where
        F: FnMut(usize, &WorkshopResult<ProcessingResult>),
    {
        let (processor, resolutions) = self.processor_for(selection)?;
        let outcomes = processor.process_each(requests, on_done);

        let report = BatchReport {
            resolutions,
            outcomes,
        };
        info!(
            succeeded = report.succeeded(),
            failed = report.failed(),
            "Batch processed"
        );
        Ok(report)
    }
}

/// Outcome of a batch run.
#[derive(Debug, Clone)]
pub struct BatchReport {
    /// How each selector was resolved.
    pub resolutions: Vec<ResolvedKey>,
    /// One entry per request, in input order.
    pub outcomes: Vec<WorkshopResult<ProcessingResult>>,
}

impl BatchReport {
    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_ok()).count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.succeeded()
    }

    pub fn first_error(&self) -> Option<&WorkshopError> {
        self.outcomes.iter().find_map(|o| o.as_ref().err())
    }

    pub fn results(&self) -> impl Iterator<Item = &ProcessingResult> {
        self.outcomes.iter().filter_map(|o| o.as_ref().ok())
    }

    /// Selectors that fell back to a default.
    pub fn fallbacks(&self) -> impl Iterator<Item = &ResolvedKey> {
        self.resolutions.iter().filter(|r| r.fell_back)
    }

    /// Serializable summary for JSON output.
    pub fn summary(&self) -> BatchSummary<'_> {
        BatchSummary {
            resolutions: &self.resolutions,
            results: self.results().collect(),
            errors: self
                .outcomes
                .iter()
                .enumerate()
                .filter_map(|(index, o)| {
                    o.as_ref().err().map(|e| BatchFailure {
                        index,
                        step: e.failed_step().map(|s| s.as_str()),
                        error: e.to_string(),
                    })
                })
                .collect(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct BatchSummary<'a> {
    pub resolutions: &'a [ResolvedKey],
    pub results: Vec<&'a ProcessingResult>,
    pub errors: Vec<BatchFailure>,
}

#[derive(Debug, Serialize)]
pub struct BatchFailure {
    pub index: usize,
    pub step: Option<&'static str>,
    pub error: String,
}
