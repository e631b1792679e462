//! Gift Processor - the pipeline orchestrator.
//!
//! Runs one request through the five steps in fixed order:
//! 1. Discount
//! 2. Wrapping
//! 3. Delivery
//! 4. Notification
//! 5. Production
//!
//! Each step is served by exactly one injected strategy. The first failing
//! step aborts the request; nothing already done is undone.

use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use crate::{
    application::{
        ApplicationError,
        ports::{DeliveryStrategy, DiscountPolicy, Notifier, ProductionRecorder, WrappingStrategy},
        registry::StrategySet,
    },
    domain::{DomainValidator as validator, GiftRequest, Notice, PipelineStep, ProcessingResult},
    error::{WorkshopError, WorkshopResult},
};

/// Orchestrates the processing of gift requests.
///
/// Holds no per-request state, so one processor can be reused for any
/// number of requests.
#[derive(Clone)]
pub struct GiftProcessor {
    discount: Arc<dyn DiscountPolicy>,
    wrapping: Arc<dyn WrappingStrategy>,
    delivery: Arc<dyn DeliveryStrategy>,
    notifier: Arc<dyn Notifier>,
    production: Arc<dyn ProductionRecorder>,
}

impl GiftProcessor {
    /// Create a processor from one strategy per step.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use workshop_core::application::GiftProcessor;
    ///
    /// let processor = GiftProcessor::new(
    ///     discount,   // Arc<dyn DiscountPolicy>
    ///     wrapping,   // Arc<dyn WrappingStrategy>
    ///     delivery,   // Arc<dyn DeliveryStrategy>
    ///     notifier,   // Arc<dyn Notifier>
    ///     production, // Arc<dyn ProductionRecorder>
    /// );
    /// ```
    pub fn new(
        discount: Arc<dyn DiscountPolicy>,
        wrapping: Arc<dyn WrappingStrategy>,
        delivery: Arc<dyn DeliveryStrategy>,
        notifier: Arc<dyn Notifier>,
        production: Arc<dyn ProductionRecorder>,
    ) -> Self {
        Self {
            discount,
            wrapping,
            delivery,
            notifier,
            production,
        }
    }

    /// Create a processor from a resolved [`StrategySet`].
    pub fn from_set(set: StrategySet) -> Self {
        Self::new(
            set.discount,
            set.wrapping,
            set.delivery,
            set.notifier,
            set.production,
        )
    }

    /// Process one request.
    ///
    /// Validation errors surface before any strategy runs. A strategy error
    /// surfaces as `ApplicationError::StepFailed` naming the step.
    #[instrument(
        skip_all,
        fields(request_id = %request.id(), recipient = %request.recipient())
    )]
    pub fn process(&self, request: &GiftRequest) -> WorkshopResult<ProcessingResult> {
        validator::validate_request(request)?;
        let mut steps = Vec::with_capacity(PipelineStep::ORDER.len());

        // 1. Discount
        let discount = run_step(PipelineStep::Discount, || {
            let outcome = self.discount.discount(request)?;
            validator::validate_discount(request, &outcome)?;
            Ok(outcome)
        })?;
        steps.push(PipelineStep::Discount);

        // 2. Wrapping
        let wrapping = run_step(PipelineStep::Wrapping, || {
            let outcome = self.wrapping.wrap(request.items())?;
            validator::validate_wrapping(request, &outcome)?;
            Ok(outcome)
        })?;
        steps.push(PipelineStep::Wrapping);

        // 3. Delivery
        let delivery = run_step(PipelineStep::Delivery, || {
            self.delivery.estimate(request, &wrapping)
        })?;
        steps.push(PipelineStep::Delivery);

        let total = ProcessingResult::charge(request, &discount, &wrapping).ok_or_else(|| {
            WorkshopError::Internal {
                message: "total charge is out of range".into(),
            }
        })?;

        // 4. Notification
        let notice = Notice {
            request_id: request.id(),
            recipient: request.recipient().to_string(),
            item_count: request.item_count(),
            total,
            discount: discount.amount,
            carrier: delivery.carrier.clone(),
            arrives_on: delivery.arrives_on,
        };
        let notification = run_step(PipelineStep::Notification, || self.notifier.notify(&notice))?;
        steps.push(PipelineStep::Notification);

        // 5. Production
        let production = run_step(PipelineStep::Production, || self.production.record(request))?;
        steps.push(PipelineStep::Production);

        info!(total = %total, arrives_on = %delivery.arrives_on, "Request processed");

        Ok(ProcessingResult {
            request_id: request.id(),
            recipient: request.recipient().to_string(),
            subtotal: request.subtotal(),
            discount,
            wrapping,
            delivery,
            notification,
            production,
            total,
            steps,
        })
    }

    /// Process every request independently, one result per request.
    ///
    /// A failed request does not stop the batch.
    #[instrument(skip_all, fields(requests = requests.len()))]
    pub fn process_all(&self, requests: &[GiftRequest]) -> Vec<WorkshopResult<ProcessingResult>> {
        self.process_each(requests, |_, _| {})
    }

    /// Like [`process_all`](Self::process_all), calling `on_done` after each
    /// request with its index and outcome.
    pub fn process_each<F>(
        &self,
        requests: &[GiftRequest],
        mut on_done: F,
    ) -> Vec<WorkshopResult<ProcessingResult>>
    where
        F: FnMut(usize, &WorkshopResult<ProcessingResult>),
    {
        requests
            .iter()
            .enumerate()
            .map(|(index, request)| {
                let outcome = self.process(request);
                on_done(index, &outcome);
                outcome
            })
            .collect()
    }
}

fn run_step<T>(
    step: PipelineStep,
    run: impl FnOnce() -> WorkshopResult<T>,
) -> WorkshopResult<T> {
    debug!(%step, "Running step");
    run().map_err(|source| {
        warn!(%step, error = %source, "Step failed, aborting request");
        ApplicationError::StepFailed {
            step,
            source: Box::new(source),
        }
        .into()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::{
        MockDeliveryStrategy, MockDiscountPolicy, MockNotifier, MockProductionRecorder,
        MockWrappingStrategy,
    };
    use crate::domain::{
        Category, DeliveryEstimate, DiscountOutcome, DomainError, LineItem, Money,
        NotificationReceipt, ProductionRecord, Region, WrappedParcel, WrappingOutcome,
    };
    use chrono::NaiveDate;
    use mockall::Sequence;

    fn dispatch() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 12, 1).unwrap()
    }

    fn request(score: u32) -> GiftRequest {
        GiftRequest::builder()
            .recipient("Ada")
            .region(Region::Europe)
            .nice_score(score)
            .unwrap()
            .item(LineItem::new(
                "Train set",
                Category::Toy,
                Money::from_cents(5000),
                90,
            ))
            .dispatch_date(dispatch())
            .build()
            .unwrap()
    }

    fn wrapped(items: &[LineItem]) -> WrappingOutcome {
        WrappingOutcome {
            style: "plain".into(),
            parcels: items
                .iter()
                .map(|item| WrappedParcel {
                    item: item.name().to_string(),
                    description: "brown paper".into(),
                })
                .collect(),
            surcharge: Money::ZERO,
        }
    }

    fn receipt(notice: &Notice) -> NotificationReceipt {
        NotificationReceipt {
            channel: "log".into(),
            message: notice.message(),
            delivered: true,
        }
    }

    fn record(request: &GiftRequest) -> ProductionRecord {
        ProductionRecord {
            station: "workshop".into(),
            build_minutes: request.total_build_minutes(),
            remaining_capacity: Some(390),
        }
    }

    /// Mocks that each expect exactly one call, in pipeline order.
    struct Mocks {
        discount: MockDiscountPolicy,
        wrapping: MockWrappingStrategy,
        delivery: MockDeliveryStrategy,
        notifier: MockNotifier,
        production: MockProductionRecorder,
    }

    impl Mocks {
        fn happy(rate: u8) -> Self {
            let mut seq = Sequence::new();
            let mut mocks = Self {
                discount: MockDiscountPolicy::new(),
                wrapping: MockWrappingStrategy::new(),
                delivery: MockDeliveryStrategy::new(),
                notifier: MockNotifier::new(),
                production: MockProductionRecorder::new(),
            };

            mocks
                .discount
                .expect_discount()
                .times(1)
                .in_sequence(&mut seq)
                .returning(move |req| Ok(DiscountOutcome::at_rate("nice-list", rate, req.subtotal())));
            mocks
                .wrapping
                .expect_wrap()
                .times(1)
                .in_sequence(&mut seq)
                .returning(|items| Ok(wrapped(items)));
            mocks
                .delivery
                .expect_estimate()
                .times(1)
                .in_sequence(&mut seq)
                .returning(|req, _| Ok(DeliveryEstimate::after("sleigh", req.dispatch_date(), 3)?));
            mocks
                .notifier
                .expect_notify()
                .times(1)
                .in_sequence(&mut seq)
                .returning(|notice| Ok(receipt(notice)));
            mocks
                .production
                .expect_record()
                .times(1)
                .in_sequence(&mut seq)
                .returning(|req| Ok(record(req)));
            mocks
        }

        fn into_processor(self) -> GiftProcessor {
            GiftProcessor::new(
                Arc::new(self.discount),
                Arc::new(self.wrapping),
                Arc::new(self.delivery),
                Arc::new(self.notifier),
                Arc::new(self.production),
            )
        }
    }

    #[test]
    fn runs_each_step_once_in_order() {
        let processor = Mocks::happy(0).into_processor();
        let result = processor.process(&request(40)).unwrap();

        assert_eq!(result.steps, PipelineStep::ORDER.to_vec());
        assert_eq!(result.total, Money::from_cents(5000));
        assert_eq!(result.production.build_minutes, 90);
    }

    #[test]
    fn score_95_with_nice_list_discount() {
        let processor = Mocks::happy(20).into_processor();
        let result = processor.process(&request(95)).unwrap();

        assert_eq!(result.discount.rate_percent, 20);
        assert_eq!(result.discount.amount, Money::from_cents(1000));
        assert_eq!(result.total, Money::from_cents(4000));
        assert!(result.notification.message.contains("You saved $10.00"));
        assert_eq!(
            result.delivery.arrives_on,
            NaiveDate::from_ymd_opt(2026, 12, 4).unwrap()
        );
    }

    #[test]
    fn notice_carries_earlier_step_outputs() {
        let processor = Mocks::happy(10).into_processor();
        let message = processor.process(&request(80)).unwrap().notification.message;

        assert!(message.contains("1 gift ($45.00)"));
        assert!(message.contains("by sleigh on 2026-12-04"));
        assert!(message.contains("You saved $5.00"));
    }

    #[test]
    fn failing_step_aborts_the_rest() {
        let mut discount = MockDiscountPolicy::new();
        discount
            .expect_discount()
            .times(1)
            .returning(|_| Ok(DiscountOutcome::none("none")));
        let mut wrapping = MockWrappingStrategy::new();
        wrapping.expect_wrap().times(1).returning(|_| {
            Err(DomainError::InvalidRequest("out of ribbon".into()).into())
        });
        let mut delivery = MockDeliveryStrategy::new();
        delivery.expect_estimate().never();
        let mut notifier = MockNotifier::new();
        notifier.expect_notify().never();
        let mut production = MockProductionRecorder::new();
        production.expect_record().never();

        let processor = GiftProcessor::new(
            Arc::new(discount),
            Arc::new(wrapping),
            Arc::new(delivery),
            Arc::new(notifier),
            Arc::new(production),
        );
        let err = processor.process(&request(50)).unwrap_err();

        assert_eq!(err.failed_step(), Some(PipelineStep::Wrapping));
        assert!(err.to_string().contains("out of ribbon"));
    }

    #[test]
    fn discount_over_subtotal_fails_discount_step() {
        let mut discount = MockDiscountPolicy::new();
        discount.expect_discount().returning(|req| {
            Ok(DiscountOutcome {
                policy: "broken".into(),
                rate_percent: 100,
                amount: req.subtotal() + Money::from_cents(1),
            })
        });
        let mut wrapping = MockWrappingStrategy::new();
        wrapping.expect_wrap().never();

        let processor = GiftProcessor::new(
            Arc::new(discount),
            Arc::new(wrapping),
            Arc::new(MockDeliveryStrategy::new()),
            Arc::new(MockNotifier::new()),
            Arc::new(MockProductionRecorder::new()),
        );
        let err = processor.process(&request(50)).unwrap_err();

        assert_eq!(err.failed_step(), Some(PipelineStep::Discount));
    }

    #[test]
    fn unrepresentable_total_is_an_error_not_a_panic() {
        let mut discount = MockDiscountPolicy::new();
        discount
            .expect_discount()
            .returning(|_| Ok(DiscountOutcome::none("none")));
        let mut wrapping = MockWrappingStrategy::new();
        wrapping.expect_wrap().returning(|items| {
            Ok(WrappingOutcome {
                surcharge: Money::from_cents(u64::MAX),
                ..wrapped(items)
            })
        });
        let mut delivery = MockDeliveryStrategy::new();
        delivery
            .expect_estimate()
            .returning(|req, _| Ok(DeliveryEstimate::after("sleigh", req.dispatch_date(), 1)?));
        let mut notifier = MockNotifier::new();
        notifier.expect_notify().never();

        let processor = GiftProcessor::new(
            Arc::new(discount),
            Arc::new(wrapping),
            Arc::new(delivery),
            Arc::new(notifier),
            Arc::new(MockProductionRecorder::new()),
        );
        let err = processor.process(&request(50)).unwrap_err();

        assert!(matches!(err, WorkshopError::Internal { .. }));
        assert!(err.to_string().contains("total charge is out of range"));
    }

    #[test]
    fn missing_parcels_fail_wrapping_step() {
        let mut discount = MockDiscountPolicy::new();
        discount
            .expect_discount()
            .returning(|_| Ok(DiscountOutcome::none("none")));
        let mut wrapping = MockWrappingStrategy::new();
        wrapping.expect_wrap().returning(|_| Ok(wrapped(&[])));
        let mut delivery = MockDeliveryStrategy::new();
        delivery.expect_estimate().never();

        let processor = GiftProcessor::new(
            Arc::new(discount),
            Arc::new(wrapping),
            Arc::new(delivery),
            Arc::new(MockNotifier::new()),
            Arc::new(MockProductionRecorder::new()),
        );

        assert_eq!(
            processor.process(&request(50)).unwrap_err().failed_step(),
            Some(PipelineStep::Wrapping)
        );
    }

    #[test]
    fn invalid_request_never_reaches_a_strategy() {
        // Deserialization bypasses the builder, so the processor re-validates.
        let invalid: GiftRequest = serde_json::from_value(serde_json::json!({
            "id": "00000000-0000-0000-0000-000000000000",
            "recipient": "Ada",
            "region": "europe",
            "nice_score": 50,
            "items": [],
            "dispatch_date": "2026-12-01"
        }))
        .unwrap();

        let mut discount = MockDiscountPolicy::new();
        discount.expect_discount().never();
        let processor = GiftProcessor::new(
            Arc::new(discount),
            Arc::new(MockWrappingStrategy::new()),
            Arc::new(MockDeliveryStrategy::new()),
            Arc::new(MockNotifier::new()),
            Arc::new(MockProductionRecorder::new()),
        );

        let err = processor.process(&invalid).unwrap_err();
        assert!(matches!(
            err,
            WorkshopError::Domain(DomainError::InvalidRequest(_))
        ));
        assert_eq!(err.failed_step(), None);
    }

    #[test]
    fn same_request_through_fresh_processors_is_identical() {
        let req = request(95);
        let first = Mocks::happy(20).into_processor().process(&req).unwrap();
        let second = Mocks::happy(20).into_processor().process(&req).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn process_all_keeps_going_after_a_failure() {
        let mut discount = MockDiscountPolicy::new();
        discount.expect_discount().times(2).returning(|req| {
            if req.recipient() == "Bob" {
                Err(DomainError::InvalidRequest("no".into()).into())
            } else {
                Ok(DiscountOutcome::none("none"))
            }
        });
        let mut wrapping = MockWrappingStrategy::new();
        wrapping.expect_wrap().times(1).returning(|items| Ok(wrapped(items)));
        let mut delivery = MockDeliveryStrategy::new();
        delivery
            .expect_estimate()
            .times(1)
            .returning(|req, _| Ok(DeliveryEstimate::after("sleigh", req.dispatch_date(), 1)?));
        let mut notifier = MockNotifier::new();
        notifier.expect_notify().times(1).returning(|n| Ok(receipt(n)));
        let mut production = MockProductionRecorder::new();
        production.expect_record().times(1).returning(|req| Ok(record(req)));

        let processor = GiftProcessor::new(
            Arc::new(discount),
            Arc::new(wrapping),
            Arc::new(delivery),
            Arc::new(notifier),
            Arc::new(production),
        );

        let bob = GiftRequest::builder()
            .recipient("Bob")
            .region(Region::Asia)
            .nice_score(10)
            .unwrap()
            .item(LineItem::new("Sock", Category::Clothing, Money::from_cents(300), 5))
            .build()
            .unwrap();
        let results = processor.process_all(&[bob, request(60)]);

        assert_eq!(results.len(), 2);
        assert!(results[0].is_err());
        assert!(results[1].is_ok());
    }
}
