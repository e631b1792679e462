//! End-to-end pipeline tests over the built-in strategies.

use std::sync::Arc;

use chrono::NaiveDate;
use workshop_adapters::{
    AtomicCapacity, BuiltinOptions, LetterNotifier, MemoryNotifier, NiceListDiscount,
    PlainWrap, SleighDelivery, WorkshopFloor, builtin_registries_with,
};
use workshop_core::{
    application::{CapacityLedger, ResolutionPolicy},
    domain::DomainError,
    error::ErrorCategory,
    prelude::*,
};

fn request(recipient: &str, score: u32, minutes: u32) -> GiftRequest {
    GiftRequest::builder()
        .recipient(recipient)
        .region(Region::Europe)
        .nice_score(score)
        .unwrap()
        .item(LineItem::new(
            "Train set",
            Category::Toy,
            Money::from_cents(5000),
            minutes,
        ))
        .dispatch_date(NaiveDate::from_ymd_opt(2026, 12, 1).unwrap())
        .build()
        .unwrap()
}

fn facade(capacity: u64, policy: ResolutionPolicy) -> (WorkshopFacade, Arc<AtomicCapacity>) {
    let ledger = Arc::new(AtomicCapacity::new(capacity));
    let options = BuiltinOptions {
        capacity_minutes: capacity,
        policy,
        ..BuiltinOptions::default()
    };
    let registries =
        builtin_registries_with(&options, ledger.clone(), LetterNotifier::new(std::io::sink()))
            .unwrap();
    (WorkshopFacade::new(registries).unwrap(), ledger)
}

#[test]
fn score_95_with_unknown_wrapping_falls_back_to_plain() {
    let (facade, _) = facade(480, ResolutionPolicy::Fallback);
    let selection = StrategySelection::default()
        .with(PipelineStep::Discount, "nice-list")
        .with(PipelineStep::Wrapping, "unknown-x");

    let report = facade
        .process_batch(&selection, &[request("Ada", 95, 90)])
        .unwrap();
    let result = report.results().next().unwrap();

    assert_eq!(result.discount.rate_percent, 20);
    assert_eq!(result.wrapping.style, "plain");
    assert_eq!(result.total, Money::from_cents(4000));
    // Europe is band 1: 2 + 1 days by sleigh
    assert_eq!(
        result.delivery.arrives_on,
        NaiveDate::from_ymd_opt(2026, 12, 4).unwrap()
    );
    assert_eq!(result.production.remaining_capacity, Some(390));
    assert_eq!(report.fallbacks().count(), 1);
}

#[test]
fn festive_eco_and_express_change_the_outcome() {
    let (facade, _) = facade(480, ResolutionPolicy::Strict);
    let selection = StrategySelection::default()
        .with(PipelineStep::Wrapping, "festive")
        .with(PipelineStep::Delivery, "express")
        .with(PipelineStep::Notification, "silent");

    let report = facade
        .process_batch(&selection, &[request("Ada", 10, 30)])
        .unwrap();
    let result = report.results().next().unwrap();

    assert_eq!(result.total, Money::from_cents(5150));
    assert_eq!(result.delivery.carrier, "reindeer-express");
    assert_eq!(result.delivery.days, 1);
    assert!(!result.notification.delivered);
}

#[test]
fn capacity_runs_out_mid_batch() {
    let (facade, ledger) = facade(100, ResolutionPolicy::Fallback);
    let requests = [
        request("Ada", 50, 60),
        request("Bob", 50, 60),
        request("Cy", 50, 40),
    ];

    let report = facade
        .process_batch(&StrategySelection::default(), &requests)
        .unwrap();

    assert_eq!(report.succeeded(), 2);
    assert_eq!(report.failed(), 1);
    let err = report.first_error().unwrap();
    assert_eq!(err.failed_step(), Some(PipelineStep::Production));
    assert_eq!(err.category(), ErrorCategory::Capacity);
    assert!(err.is_retryable());
    assert_eq!(ledger.remaining(), 0);
}

#[test]
fn simulated_production_leaves_capacity_alone() {
    let (facade, ledger) = facade(100, ResolutionPolicy::Fallback);
    let selection = StrategySelection::default().with(PipelineStep::Production, "dry-run");

    let report = facade
        .process_batch(&selection, &[request("Ada", 50, 500)])
        .unwrap();

    assert_eq!(report.succeeded(), 1);
    assert_eq!(ledger.remaining(), 100);
}

#[test]
fn processing_twice_differs_only_in_capacity() {
    let ledger = Arc::new(AtomicCapacity::new(480));
    let processor = GiftProcessor::new(
        Arc::new(NiceListDiscount),
        Arc::new(PlainWrap),
        Arc::new(SleighDelivery),
        Arc::new(MemoryNotifier::new()),
        Arc::new(WorkshopFloor::new(ledger.clone())),
    );
    let req = request("Ada", 95, 90);

    let first = processor.process(&req).unwrap();
    let second = processor.process(&req).unwrap();

    assert_eq!(first.total, second.total);
    assert_eq!(first.delivery, second.delivery);
    assert_eq!(first.notification, second.notification);
    assert_eq!(first.production.remaining_capacity, Some(390));
    assert_eq!(second.production.remaining_capacity, Some(300));
}

#[test]
fn notifier_sees_one_notice_per_successful_request() {
    let notifier = MemoryNotifier::new();
    let processor = GiftProcessor::new(
        Arc::new(NiceListDiscount),
        Arc::new(PlainWrap),
        Arc::new(SleighDelivery),
        Arc::new(notifier.clone()),
        Arc::new(WorkshopFloor::new(Arc::new(AtomicCapacity::new(480)))),
    );

    let results = processor.process_all(&[request("Ada", 95, 10), request("Bob", 20, 10)]);

    assert!(results.iter().all(Result::is_ok));
    let sent = notifier.sent();
    assert_eq!(sent.len(), 2);
    assert_eq!(sent[0].discount, Money::from_cents(1000));
    assert_eq!(sent[1].discount, Money::ZERO);
}

#[test]
fn exhausted_capacity_error_carries_numbers() {
    let ledger = AtomicCapacity::new(5);
    let err = ledger.reserve(6).unwrap_err();
    assert!(matches!(
        err,
        WorkshopError::Domain(DomainError::CapacityExhausted {
            requested: 6,
            remaining: 5
        })
    ));
}
