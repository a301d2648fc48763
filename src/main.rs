//! autorank: vehicle total-cost-of-ownership and ranking tool
//!
//! Ranks vehicles by weighted cost, reliability, style and fuel economy.

#![allow(
    clippy::too_many_lines,
    clippy::struct_excessive_bools,
    clippy::needless_pass_by_value
)]

use anyhow::{Context, Result};
use autorank::{
    cli,
    config::{ConfigOverrides, CONFIG_FILE_NAMES},
    pipeline::exit_codes,
    reports::ReportFormat,
    scoring::{PriorityMode, StrategyKind},
};
use clap::{Args, CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use std::io;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Build long version string with supported modes
const fn build_long_version() -> &'static str {
    concat!(
        env!("CARGO_PKG_VERSION"),
        "\n\nScoring Strategies:",
        "\n  weighted, composite",
        "\n\nPriority Modes:",
        "\n  budget, luxury, efficiency, balanced, bootstrap, fundraising, stealth",
        "\n\nOutput Formats:",
        "\n  summary, table, json, csv, markdown"
    )
}

#[derive(Parser)]
#[command(name = "autorank")]
#[command(version, long_version = build_long_version())]
#[command(about = "Vehicle total-cost-of-ownership and ranking tool", long_about = None)]
#[command(after_help = "EXIT CODES:
    0  Success
    1  Best score below --min-score
    3  Error occurred

EXAMPLES:
    # Rank with auto-detected output
    autorank rank cars.json

    # Budget-first ranking, top 5, as JSON
    autorank rank cars.json --mode budget --top 5 -o json

    # Emphasize style and ignore fuel economy
    autorank rank cars.json --weight style=8 --disable fuel

    # Overlay scraped market prices
    autorank rank cars.json --live-prices live_prices.json

    # Estimate an APR
    autorank apr --make BMW --year 2019 --used --credit-score 620")]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Disable colored output (also respects `NO_COLOR` env)
    #[arg(long, global = true)]
    no_color: bool,

    /// Path to configuration file
    #[arg(long, global = true, env = "AUTORANK_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

// ============================================================================
// Command argument structs (extracted for readability)
// ============================================================================

/// Ownership and loan assumptions shared by `rank` and `tco`
#[derive(Args)]
struct OwnershipArgs {
    /// Years the vehicle will be kept
    #[arg(long)]
    years_owned: Option<u32>,

    /// Expected weekly mileage
    #[arg(long)]
    miles_per_week: Option<f64>,

    /// Borrower credit score (300-850)
    #[arg(long)]
    credit_score: Option<u32>,

    /// Loan term in months
    #[arg(long)]
    loan_term: Option<u32>,

    /// Price loans as used-vehicle loans
    #[arg(long)]
    used: bool,

    /// Reference year for vehicle age (defaults to the current year)
    #[arg(long)]
    reference_year: Option<i32>,
}

impl OwnershipArgs {
    fn apply(&self, overrides: &mut ConfigOverrides) {
        overrides.years_owned = self.years_owned;
        overrides.miles_per_week = self.miles_per_week;
        overrides.credit_score = self.credit_score;
        overrides.loan_term_months = self.loan_term;
        overrides.treat_as_used = self.used;
        overrides.reference_year = self.reference_year;
    }
}

/// Arguments for the `rank` subcommand
#[derive(Parser)]
struct RankArgs {
    /// Vehicle JSON file (array, or object with `cars`/`vehicles`)
    vehicles: PathBuf,

    /// Output format [default: auto, which picks table on a TTY and summary otherwise]
    #[arg(short, long)]
    output: Option<ReportFormat>,

    /// Output file path (stdout if not specified)
    #[arg(short = 'O', long)]
    output_file: Option<PathBuf>,

    /// Scoring strategy
    #[arg(long)]
    strategy: Option<StrategyKind>,

    /// Priority mode (budget, luxury, efficiency, balanced, bootstrap, fundraising, stealth)
    #[arg(short, long)]
    mode: Option<PriorityMode>,

    /// Category weight as CATEGORY=WEIGHT (repeatable)
    #[arg(short, long = "weight", value_name = "CATEGORY=WEIGHT")]
    weights: Vec<String>,

    /// Exclude a category from scoring (repeatable)
    #[arg(long = "disable", value_name = "CATEGORY")]
    disabled: Vec<String>,

    #[command(flatten)]
    ownership: OwnershipArgs,

    /// Live price feed JSON; matching prices supersede list prices
    #[arg(long)]
    live_prices: Option<PathBuf>,

    /// Only rank this brand
    #[arg(long)]
    brand: Option<String>,

    /// Only rank this fuel type (gas, hybrid, electric)
    #[arg(long)]
    fuel: Option<String>,

    /// Only rank vehicles at or below this price
    #[arg(long)]
    max_price: Option<f64>,

    /// Show only the best N vehicles
    #[arg(short, long)]
    top: Option<usize>,

    /// Include the population cost breakdown
    #[arg(long)]
    breakdown: bool,

    /// Exit with code 1 if the best score is below this threshold
    #[arg(long)]
    min_score: Option<f64>,
}

/// Arguments for the `apr` subcommand
#[derive(Parser)]
struct AprArgs {
    /// Vehicle make
    #[arg(long)]
    make: String,

    /// Model year (defaults to the current year)
    #[arg(long)]
    year: Option<i32>,

    /// Used-vehicle loan
    #[arg(long)]
    used: bool,

    /// Borrower credit score (300-850)
    #[arg(long, default_value_t = 750)]
    credit_score: u32,

    /// Output format (json, or plain text otherwise)
    #[arg(short, long, default_value = "summary")]
    output: ReportFormat,
}

/// Arguments for the `tco` subcommand
#[derive(Parser)]
struct TcoArgs {
    /// Vehicle JSON file
    vehicles: PathBuf,

    /// Output format (json, or text otherwise)
    #[arg(short, long)]
    output: Option<ReportFormat>,

    /// Output file path (stdout if not specified)
    #[arg(short = 'O', long)]
    output_file: Option<PathBuf>,

    #[command(flatten)]
    ownership: OwnershipArgs,
}

#[derive(Subcommand)]
enum Commands {
    /// Rank vehicles and write a report
    Rank(RankArgs),

    /// Estimate a loan APR
    Apr(AprArgs),

    /// Show per-vehicle cost of ownership without ranking
    Tco(TcoArgs),

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },

    /// Generate JSON Schema for the config file format
    ConfigSchema {
        /// Write schema to file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show, discover, or initialize configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Sub-subcommands for the `config` command
#[derive(Subcommand)]
enum ConfigAction {
    /// Print current effective configuration (merged from defaults + file)
    Show,
    /// Print config file search paths and discovered config file
    Path,
    /// Generate an example .autorank.yaml in the current directory
    Init,
}

fn main() {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "warn"
    } else {
        "info"
    };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| log_level.to_string()),
        ))
        .with(tracing_subscriber::fmt::layer().with_target(false).with_writer(io::stderr))
        .init();

    match run(cli) {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("Error: {err:#}");
            std::process::exit(exit_codes::ERROR);
        }
    }
}

fn run(cli: Cli) -> Result<i32> {
    // Dispatch to command handlers
    match cli.command {
        Commands::Rank(args) => {
            let mut overrides = ConfigOverrides {
                strategy: args.strategy,
                mode: args.mode,
                format: args.output,
                file: args.output_file,
                no_color: cli.no_color,
                top: args.top,
                breakdown: args.breakdown,
                ..ConfigOverrides::default()
            };
            for assignment in &args.weights {
                let (category, weight) = cli::parse_weight_assignment(assignment)?;
                overrides.weights.set(category, weight);
            }
            for name in &args.disabled {
                overrides.disabled.push(cli::parse_category(name)?);
            }
            args.ownership.apply(&mut overrides);

            let filter = cli::build_filter(args.brand, args.fuel.as_deref(), args.max_price)?;

            cli::run_rank(cli::RankOptions {
                vehicles: args.vehicles,
                live_prices: args.live_prices,
                config_path: cli.config,
                overrides,
                filter,
                min_score: args.min_score,
                quiet: cli.quiet,
            })
        }

        Commands::Apr(args) => cli::run_apr(
            &args.make,
            args.year,
            args.used,
            args.credit_score,
            args.output,
        ),

        Commands::Tco(args) => {
            let mut overrides = ConfigOverrides {
                format: args.output,
                file: args.output_file,
                ..ConfigOverrides::default()
            };
            args.ownership.apply(&mut overrides);

            cli::run_tco(cli::TcoOptions {
                vehicles: args.vehicles,
                config_path: cli.config,
                overrides,
                quiet: cli.quiet,
            })
        }

        Commands::Completions { shell } => {
            generate(shell, &mut Cli::command(), "autorank", &mut io::stdout());
            Ok(exit_codes::SUCCESS)
        }

        Commands::ConfigSchema { output } => {
            let schema = autorank::config::generate_json_schema()?;
            match output {
                Some(path) => {
                    std::fs::write(&path, &schema)
                        .with_context(|| format!("failed to write {}", path.display()))?;
                    eprintln!("Schema written to {}", path.display());
                }
                None => {
                    println!("{schema}");
                }
            }
            Ok(exit_codes::SUCCESS)
        }

        Commands::Config { action } => match action {
            ConfigAction::Show => {
                let (config, loaded_from) =
                    autorank::config::load_or_default(cli.config.as_deref());
                if let Some(path) = &loaded_from {
                    eprintln!("# Loaded from: {}", path.display());
                } else {
                    eprintln!("# No config file found; showing defaults");
                }
                let yaml =
                    serde_yaml::to_string(&config).context("failed to serialize config")?;
                print!("{yaml}");
                Ok(exit_codes::SUCCESS)
            }
            ConfigAction::Path => {
                let search_paths: [Option<String>; 3] = [
                    std::env::current_dir()
                        .ok()
                        .map(|p| p.display().to_string()),
                    autorank::config::user_config_dir().map(|p| p.display().to_string()),
                    dirs::home_dir().map(|p| p.display().to_string()),
                ];
                eprintln!("Config file search paths (in order):");
                for path in search_paths.into_iter().flatten() {
                    eprintln!("  {path}");
                }
                eprintln!();
                eprintln!("Recognized file names:");
                for name in CONFIG_FILE_NAMES {
                    eprintln!("  {name}");
                }
                eprintln!();
                match autorank::config::discover_config_file(cli.config.as_deref()) {
                    Some(path) => eprintln!("Active config file: {}", path.display()),
                    None => eprintln!("No config file found."),
                }
                Ok(exit_codes::SUCCESS)
            }
            ConfigAction::Init => {
                let target = std::env::current_dir()
                    .context("cannot determine current directory")?
                    .join(".autorank.yaml");
                if target.exists() {
                    anyhow::bail!(
                        "{} already exists. Remove it first to re-initialize.",
                        target.display()
                    );
                }
                let content = autorank::config::generate_full_example_config();
                std::fs::write(&target, content)
                    .with_context(|| format!("failed to write {}", target.display()))?;
                eprintln!("Created {}", target.display());
                Ok(exit_codes::SUCCESS)
            }
        },
    }
}
