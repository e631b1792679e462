//! Implementation of the `workshop process` command.
//!
//! Turns flags or a request file into [`GiftRequest`]s, builds the built-in
//! registries from config and flags, then runs every request through one
//! resolved [`GiftProcessor`](workshop_core::application::GiftProcessor).

use std::sync::Arc;

use tracing::{info, instrument, warn};

use workshop_adapters::{AtomicCapacity, LetterNotifier, builtin_registries_with, load_requests};
use workshop_core::{
    application::{BatchReport, CapacityLedger, StrategySelection, WorkshopFacade},
    domain::{GiftRequest, LineItem, Money, ProcessingResult},
    error::WorkshopError,
};

use crate::{
    cli::{ProcessArgs, ResultFormat, StrategyFlags, global::OutputFormat},
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

/// Execute the `process` command.
#[instrument(skip_all, fields(file = ?args.file, strict = args.strict))]
pub fn execute(args: ProcessArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let requests = collect_requests(&args)?;
    let selection = selection_from(&config.strategies, &args.strategies);
    let options = config.builtin_options(args.strict, args.capacity);
    let json = args.format == ResultFormat::Json || output.format() == OutputFormat::Json;

    // Letters would corrupt a JSON document on stdout.
    let letters = if json {
        LetterNotifier::new(std::io::stderr())
    } else {
        LetterNotifier::stdout()
    };
    let ledger = Arc::new(AtomicCapacity::new(options.capacity_minutes));
    let registries = builtin_registries_with(&options, ledger.clone(), letters)?;
    let facade = WorkshopFacade::new(registries)?;

    let progress = output.progress(requests.len() as u64, "Processing");
    let report = facade.process_batch_with(&selection, &requests, |index, _| {
        progress.set_message(requests[index].recipient().to_owned());
        progress.inc(1);
    })?;
    progress.finish_and_clear();

    for fallback in report.fallbacks() {
        output.warning(&format!(
            "Unknown {} strategy '{}', using '{}'",
            fallback.step, fallback.selector, fallback.key
        ))?;
    }

    info!(
        succeeded = report.succeeded(),
        failed = report.failed(),
        remaining_capacity = ledger.remaining(),
        "Requests processed"
    );

    if json {
        output.json(&report.summary())?;
    } else {
        render_table(&report, &output)?;
    }

    match report.first_error() {
        None => Ok(()),
        Some(first) => Err(CliError::BatchFailed {
            failed: report.failed(),
            total: report.outcomes.len(),
            first: first.clone(),
        }),
    }
}

/// Requests from `--file`, or a single request from the inline flags.
fn collect_requests(args: &ProcessArgs) -> CliResult<Vec<GiftRequest>> {
    if let Some(path) = &args.file {
        return Ok(load_requests(path)?);
    }

    // clap enforces these when --file is absent
    let (Some(recipient), Some(region), Some(score)) = (&args.recipient, args.region, args.score)
    else {
        return Err(CliError::InvalidInput {
            message: "--recipient, --region and --score are required without --file".into(),
            source: None,
        });
    };

    let items = args.items.iter().map(|item| {
        LineItem::new(
            item.name.clone(),
            item.category,
            Money::from_cents(item.cost_cents),
            item.build_minutes,
        )
    });

    let mut builder = GiftRequest::builder()
        .recipient(recipient.clone())
        .region(region)
        .nice_score(score)
        .map_err(WorkshopError::from)?
        .items(items);
    if let Some(date) = args.dispatch_date {
        builder = builder.dispatch_date(date);
    }
    let request = builder.build().map_err(WorkshopError::from)?;
    Ok(vec![request])
}

/// Configured selection with per-run flag overrides applied.
fn selection_from(configured: &StrategySelection, flags: &StrategyFlags) -> StrategySelection {
    let mut selection = configured.clone();
    for (step, selector) in flags.overrides() {
        selection.set(step, selector);
    }
    selection
}

fn render_table(report: &BatchReport, output: &OutputManager) -> CliResult<()> {
    let total = report.outcomes.len();
    for (index, outcome) in report.outcomes.iter().enumerate() {
        match outcome {
            Ok(result) => render_result(result, output)?,
            Err(err) => {
                warn!(index, error = %err, "Request failed");
                output.error(&format!("Request {} of {}: {}", index + 1, total, err))?;
            }
        }
    }

    if report.failed() == 0 {
        output.success(&format!("{} request(s) processed", report.succeeded()))?;
    }
    Ok(())
}

fn render_result(result: &ProcessingResult, output: &OutputManager) -> CliResult<()> {
    output.header(&format!("{} ({})", result.recipient, result.request_id))?;

    let lines = [
        ("Subtotal", result.subtotal.to_string()),
        (
            "Discount",
            format!(
                "-{} ({}, {}%)",
                result.discount.amount, result.discount.policy, result.discount.rate_percent
            ),
        ),
        (
            "Wrapping",
            format!(
                "+{} ({}, {} parcel(s))",
                result.wrapping.surcharge,
                result.wrapping.style,
                result.wrapping.parcel_count()
            ),
        ),
        ("Total", result.total.to_string()),
        (
            "Delivery",
            format!(
                "{} in {} day(s), arrives {}",
                result.delivery.carrier,
                result.delivery.days,
                result.delivery.arrives_on.format("%Y-%m-%d")
            ),
        ),
        (
            "Notice",
            format!(
                "{}{}",
                result.notification.channel,
                if result.notification.delivered { "" } else { " (not sent)" }
            ),
        ),
        (
            "Production",
            match result.production.remaining_capacity {
                Some(left) => format!(
                    "{} min at {} ({} min left)",
                    result.production.build_minutes, result.production.station, left
                ),
                None => format!(
                    "{} min at {}",
                    result.production.build_minutes, result.production.station
                ),
            },
        ),
    ];

    for (label, value) in lines {
        output.print(&format!("  {label:<11} {value}"))?;
    }
    output.print("")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{Cli, Commands};
    use clap::Parser;
    use workshop_core::domain::{PipelineStep, Region};

    fn process_args(argv: &[&str]) -> ProcessArgs {
        let cli = Cli::parse_from(std::iter::once("workshop").chain(argv.iter().copied()));
        match cli.command {
            Commands::Process(args) => args,
            other => panic!("expected process, got {other:?}"),
        }
    }

    #[test]
    fn inline_flags_build_one_request() {
        let args = process_args(&[
            "process",
            "-r",
            "Ada",
            "--region",
            "europe",
            "-s",
            "95",
            "-i",
            "Train set:toy:5000:90",
            "-i",
            "Atlas:book:1500:20",
            "--dispatch-date",
            "2026-12-01",
        ]);
        let requests = collect_requests(&args).unwrap();

        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].region(), Region::Europe);
        assert_eq!(requests[0].subtotal(), Money::from_cents(6500));
        assert_eq!(requests[0].total_build_minutes(), 110);
    }

    #[test]
    fn invalid_item_surfaces_as_user_error() {
        let args = process_args(&[
            "process", "-r", "Ada", "--region", "asia", "-s", "50", "-i", " :toy:100:5",
        ]);
        let err = collect_requests(&args).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn flags_override_configured_selection() {
        let configured = StrategySelection::default().with(PipelineStep::Discount, "bulk");
        let flags = StrategyFlags {
            wrapping: Some("eco".into()),
            ..StrategyFlags::default()
        };

        let selection = selection_from(&configured, &flags);
        assert_eq!(selection.discount, "bulk");
        assert_eq!(selection.wrapping, "eco");
        assert_eq!(selection.delivery, "sleigh");
    }
}
