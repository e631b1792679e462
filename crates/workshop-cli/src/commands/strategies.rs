//! Implementation of the `workshop strategies` command.

use std::sync::Arc;

use workshop_adapters::{AtomicCapacity, LetterNotifier, builtin_registries_with};
use workshop_core::application::{StrategyCatalogService, StrategyInfo};

use crate::{
    cli::{ListFormat, StrategiesArgs},
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
};

pub fn execute(args: StrategiesArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let options = config.builtin_options(false, None);
    let registries = builtin_registries_with(
        &options,
        Arc::new(AtomicCapacity::new(options.capacity_minutes)),
        LetterNotifier::new(std::io::sink()),
    )?;

    let service = StrategyCatalogService::new(&registries);
    let strategies = service.list(args.capability);
    let configured = |info: &StrategyInfo| config.strategies.selector(info.capability) == info.key;

    match args.format {
        ListFormat::Table => {
            output.header("Available Strategies:")?;
            let mut current = None;
            for info in &strategies {
                if current != Some(info.capability) {
                    current = Some(info.capability);
                    output.print(&format!("\n  {}", info.capability))?;
                }
                let mut marks = Vec::new();
                if info.fallback {
                    marks.push("fallback");
                }
                if configured(info) {
                    marks.push("configured");
                }
                if !info.registered {
                    marks.push("unavailable");
                }
                let marks = if marks.is_empty() {
                    String::new()
                } else {
                    format!(" [{}]", marks.join(", "))
                };
                output.print(&format!("    {:<18} {}{}", info.key, info.summary, marks))?;
                if !info.aliases.is_empty() {
                    output.print(&format!("    {:<18} aliases: {}", "", info.aliases.join(", ")))?;
                }
            }
        }

        // JSON and CSV bypass quiet mode so they stay usable in pipes.
        ListFormat::Json => output.json(&strategies)?,

        ListFormat::List => {
            for info in &strategies {
                println!("{}/{}", info.capability, info.key);
            }
        }

        ListFormat::Csv => {
            println!("capability,key,aliases,fallback,registered");
            for info in &strategies {
                println!(
                    "{},{},{},{},{}",
                    info.capability,
                    info.key,
                    info.aliases.join(";"),
                    info.fallback,
                    info.registered
                );
            }
        }
    }

    Ok(())
}
