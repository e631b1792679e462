//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums. No business logic lives here.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};
use workshop_core::domain::{Category, PipelineStep, Region};

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "workshop",
    bin_name = "workshop",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "\u{1f381} Gift requests through a pipeline of swappable strategies",
    long_about = "Workshop prices, wraps, schedules, announces and builds gift \
                  requests. Every step is a strategy picked at runtime by key.",
    after_help = "EXAMPLES:\n\
        \x20 workshop process --recipient Ada --region europe --score 95 --item \"Train set:toy:4999:90\" --discount nice-list\n\
        \x20 workshop process --file requests.toml --wrap festive --deliver express\n\
        \x20 workshop strategies --capability delivery\n\
        \x20 workshop completions bash > /usr/share/bash-completion/completions/workshop",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run gift requests through the pipeline.
    #[command(
        visible_alias = "p",
        about = "Process gift requests",
        after_help = "EXAMPLES:\n\
            \x20 workshop process -r Ada --region europe --score 95 -i \"Train set:toy:4999:90\"\n\
            \x20 workshop process -r Bo --region asia --score 40 -i Kite:toy:1200:30 -i Atlas:book:800:15 --wrap eco\n\
            \x20 workshop process --file requests.json --strict --format json"
    )]
    Process(ProcessArgs),

    /// List the strategy catalog.
    #[command(
        visible_alias = "ls",
        about = "List available strategies",
        after_help = "EXAMPLES:\n\
            \x20 workshop strategies\n\
            \x20 workshop strategies --capability wrapping\n\
            \x20 workshop ls --format json"
    )]
    Strategies(StrategiesArgs),

    /// Write a default configuration file.
    #[command(
        about = "Initialise configuration",
        after_help = "EXAMPLES:\n\
            \x20 workshop init           # platform config dir\n\
            \x20 workshop init --local   # ./workshop.toml\n\
            \x20 workshop init --force   # overwrite"
    )]
    Init(InitArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 workshop completions bash > ~/.local/share/bash-completion/completions/workshop\n\
            \x20 workshop completions zsh  > ~/.zfunc/_workshop\n\
            \x20 workshop completions fish > ~/.config/fish/completions/workshop.fish"
    )]
    Completions(CompletionsArgs),

    /// Inspect the active configuration.
    #[command(
        about = "Configuration inspection",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 workshop config get strategies.discount\n\
            \x20 workshop config list\n\
            \x20 workshop config path"
    )]
    Config(ConfigCommands),
}

// ── process ───────────────────────────────────────────────────────────────────

/// Arguments for `workshop process`.
#[derive(Debug, Args)]
pub struct ProcessArgs {
    /// Batch file (`.toml` or `.json`).
    #[arg(
        short = 'f',
        long = "file",
        value_name = "FILE",
        conflicts_with_all = ["recipient", "region", "score", "items", "dispatch_date"],
        help = "Read requests from a .toml or .json file"
    )]
    pub file: Option<PathBuf>,

    #[arg(
        short = 'r',
        long = "recipient",
        value_name = "NAME",
        required_unless_present = "file",
        help = "Who the gifts are for"
    )]
    pub recipient: Option<String>,

    #[arg(
        long = "region",
        value_name = "REGION",
        value_parser = parse_region,
        required_unless_present = "file",
        help = "Delivery region (north-pole, europe, asia, ...)"
    )]
    pub region: Option<Region>,

    #[arg(
        short = 's',
        long = "score",
        value_name = "0-100",
        value_parser = clap::value_parser!(u32).range(0..=100),
        required_unless_present = "file",
        help = "Nice score"
    )]
    pub score: Option<u32>,

    /// Repeat once per gift.
    #[arg(
        short = 'i',
        long = "item",
        value_name = "NAME:CATEGORY:COST_CENTS:MINUTES",
        value_parser = parse_item,
        required_unless_present = "file",
        help = "A gift, e.g. \"Train set:toy:4999:90\""
    )]
    pub items: Vec<ItemSpec>,

    #[arg(
        long = "dispatch-date",
        value_name = "YYYY-MM-DD",
        help = "Dispatch date (default: today)"
    )]
    pub dispatch_date: Option<NaiveDate>,

    #[command(flatten)]
    pub strategies: StrategyFlags,

    /// Fail on unknown strategy keys instead of falling back.
    #[arg(long = "strict", help = "Reject unknown strategy keys")]
    pub strict: bool,

    /// Override `workshop.capacity_minutes` for this run.
    #[arg(
        long = "capacity",
        value_name = "MINUTES",
        help = "Workshop capacity in build minutes"
    )]
    pub capacity: Option<u64>,

    #[arg(
        long = "format",
        value_enum,
        default_value = "table",
        help = "Result format"
    )]
    pub format: ResultFormat,
}

/// Per-step selector overrides. Unset flags use the configured key.
#[derive(Debug, Default, Args)]
pub struct StrategyFlags {
    #[arg(long = "discount", value_name = "KEY", help = "Discount policy")]
    pub discount: Option<String>,

    #[arg(long = "wrap", value_name = "KEY", help = "Wrapping style")]
    pub wrapping: Option<String>,

    #[arg(long = "deliver", value_name = "KEY", help = "Delivery method")]
    pub delivery: Option<String>,

    #[arg(long = "notify", value_name = "KEY", help = "Notification channel")]
    pub notification: Option<String>,

    #[arg(long = "produce", value_name = "KEY", help = "Production station")]
    pub production: Option<String>,
}

impl StrategyFlags {
    /// `(step, selector)` for every flag that was given.
    pub fn overrides(&self) -> impl Iterator<Item = (PipelineStep, &str)> {
        [
            (PipelineStep::Discount, &self.discount),
            (PipelineStep::Wrapping, &self.wrapping),
            (PipelineStep::Delivery, &self.delivery),
            (PipelineStep::Notification, &self.notification),
            (PipelineStep::Production, &self.production),
        ]
        .into_iter()
        .filter_map(|(step, value)| value.as_deref().map(|v| (step, v)))
    }
}

/// One `--item` value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemSpec {
    pub name: String,
    pub category: Category,
    pub cost_cents: u64,
    pub build_minutes: u32,
}

/// Output format for `process` results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ResultFormat {
    /// One block per request.
    Table,
    /// Results, resolutions and errors as one JSON document.
    Json,
}

// ── strategies ────────────────────────────────────────────────────────────────

/// Arguments for `workshop strategies`.
#[derive(Debug, Args)]
pub struct StrategiesArgs {
    /// Only show one capability.
    #[arg(
        short = 'C',
        long = "capability",
        value_name = "STEP",
        value_parser = parse_step,
        help = "Filter by capability (discount, wrapping, delivery, notification, production)"
    )]
    pub capability: Option<PipelineStep>,

    #[arg(
        long = "format",
        value_enum,
        default_value = "table",
        help = "Output format"
    )]
    pub format: ListFormat,
}

/// Output format for the `strategies` command.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ListFormat {
    /// Human-readable table.
    Table,
    /// One `capability/key` per line.
    List,
    /// JSON array.
    Json,
    /// CSV rows.
    Csv,
}

// ── init ──────────────────────────────────────────────────────────────────────

/// Arguments for `workshop init`.
#[derive(Debug, Args)]
pub struct InitArgs {
    /// Write `workshop.toml` in the current directory.
    #[arg(long = "local", help = "Create ./workshop.toml instead")]
    pub local: bool,

    /// Overwrite an existing config file.
    #[arg(short = 'f', long = "force", help = "Overwrite existing configuration")]
    pub force: bool,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `workshop completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── config subcommands ────────────────────────────────────────────────────────

/// Subcommands for `workshop config`.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `strategies.discount`.
        key: String,
    },
    /// Print all configuration values.
    List,
    /// Print the path of the default configuration file.
    Path,
}

// ── value parsers ─────────────────────────────────────────────────────────────

fn parse_region(s: &str) -> Result<Region, String> {
    s.parse().map_err(|e: workshop_core::domain::DomainError| e.to_string())
}

fn parse_step(s: &str) -> Result<PipelineStep, String> {
    s.parse().map_err(|e: workshop_core::domain::DomainError| e.to_string())
}

/// `name:category:cost_cents:minutes`. The name may itself contain colons.
fn parse_item(s: &str) -> Result<ItemSpec, String> {
    let mut parts = s.rsplitn(4, ':');
    let (Some(minutes), Some(cost), Some(category), Some(name)) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return Err("expected NAME:CATEGORY:COST_CENTS:MINUTES".into());
    };

    Ok(ItemSpec {
        name: name.trim().to_string(),
        category: category.parse().map_err(|e: workshop_core::domain::DomainError| e.to_string())?,
        cost_cents: cost
            .trim()
            .parse()
            .map_err(|_| format!("cost '{cost}' is not a whole number of cents"))?,
        build_minutes: minutes
            .trim()
            .parse()
            .map_err(|_| format!("build time '{minutes}' is not a whole number of minutes"))?,
    })
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn parse_inline_process() {
        let cli = Cli::parse_from([
            "workshop",
            "process",
            "--recipient",
            "Ada",
            "--region",
            "eu",
            "--score",
            "95",
            "--item",
            "Train set:toy:4999:90",
            "--discount",
            "nice-list",
        ]);
        let Commands::Process(args) = cli.command else {
            panic!("expected Process command");
        };
        assert_eq!(args.region, Some(Region::Europe));
        assert_eq!(args.items[0].cost_cents, 4999);
        assert_eq!(args.strategies.discount.as_deref(), Some("nice-list"));
        assert_eq!(args.format, ResultFormat::Table);
    }

    #[test]
    fn file_conflicts_with_inline_fields() {
        let result = Cli::try_parse_from([
            "workshop", "process", "--file", "x.toml", "--recipient", "Ada",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn inline_requires_all_fields() {
        let result = Cli::try_parse_from(["workshop", "process", "--recipient", "Ada"]);
        assert!(result.is_err());
    }

    #[test]
    fn score_out_of_range_is_rejected() {
        let result = Cli::try_parse_from([
            "workshop", "process", "-r", "Ada", "--region", "asia", "-s", "101", "-i",
            "Kite:toy:100:5",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn item_parser() {
        let item = parse_item("Lego: Castle:toy:12999:240").unwrap();
        assert_eq!(item.name, "Lego: Castle");
        assert_eq!(item.category, Category::Toy);
        assert_eq!(item.build_minutes, 240);

        assert!(parse_item("Kite:toy:12").is_err());
        assert!(parse_item("Kite:rocket:100:5").is_err());
        assert!(parse_item("Kite:toy:1.5:5").is_err());
    }

    #[test]
    fn overrides_only_list_given_flags() {
        let flags = StrategyFlags {
            wrapping: Some("eco".into()),
            production: Some("simulated".into()),
            ..StrategyFlags::default()
        };
        let overrides: Vec<_> = flags.overrides().collect();
        assert_eq!(
            overrides,
            vec![
                (PipelineStep::Wrapping, "eco"),
                (PipelineStep::Production, "simulated")
            ]
        );
    }

    #[test]
    fn strategies_capability_filter() {
        let cli = Cli::parse_from(["workshop", "ls", "-C", "deliver"]);
        let Commands::Strategies(args) = cli.command else {
            panic!("expected Strategies command");
        };
        assert_eq!(args.capability, Some(PipelineStep::Delivery));
    }

    #[test]
    fn quiet_and_verbose_conflict() {
        let result = Cli::try_parse_from(["workshop", "--quiet", "--verbose", "strategies"]);
        assert!(result.is_err());
    }
}
