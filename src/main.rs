//! kgex CLI - List registered KGE components and train models by name.

use anyhow::{Context, Result};
use clap::{Args, CommandFactory, FromArgMatches, Parser, Subcommand};
use kgex::listing::{TableFormat, write_listing, write_parameters, write_report};
use kgex::models::{ComponentKind, Config, DEFAULT_CONFIG_FILE, EXAMPLE_CONFIG};
use kgex::registry::{MODEL_SCHEMAS_ENV, catalog_with_models, load_model_schemas};
use kgex::train::{ReportingHook, TRAIN_COMMAND, build_train_command, dispatch};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::{Level, debug, info};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser)]
#[command(name = "kgex")]
#[command(version)]
#[command(about = "List registered knowledge graph embedding components and train models")]
#[command(arg_required_else_help = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Path to configuration file (default: kgex.toml if present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// List implementation details
    Ls {
        /// Listing to show (default: github-readme)
        #[command(subcommand)]
        command: Option<LsCommand>,
    },

    /// Inspect configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand)]
enum LsCommand {
    /// List models
    Models(FormatArgs),

    /// List hyper-parameter usage
    Parameters,

    /// List data sets
    Datasets(FormatArgs),

    /// List training modes
    Training(FormatArgs),

    /// List negative samplers
    Samplers(FormatArgs),

    /// List evaluators
    Evaluators(FormatArgs),

    /// List metrics
    Metrics(FormatArgs),

    /// Generate the GitHub readme's Implementation section
    GithubReadme,
}

#[derive(Args)]
struct FormatArgs {
    /// Table format: plain, rst or github (unknown values render as plain)
    #[arg(short = 'f', long)]
    tablefmt: Option<String>,
}

#[derive(Subcommand)]
enum ConfigCommand {
    /// Validate configuration file
    Validate,

    /// Show example configuration
    Example,
}

fn setup_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_thread_ids(false)
        .with_writer(io::stderr)
        .compact()
        .finish();
    tracing::subscriber::set_global_default(subscriber).expect("Failed to set subscriber");
}

fn main() -> Result<()> {
    // Registration and subcommand generation both happen before any
    // argument is parsed; a misconfigured model stops the CLI here.
    let extra_models = match std::env::var_os(MODEL_SCHEMAS_ENV) {
        Some(path) => load_model_schemas(Path::new(&path))
            .with_context(|| format!("Failed to load model schemas from {MODEL_SCHEMAS_ENV}"))?,
        None => Vec::new(),
    };
    let catalog = catalog_with_models(extra_models).context("Failed to register components")?;
    let train = build_train_command(catalog.models())
        .context("Failed to build training commands")?;

    let mut app = Cli::command().subcommand(train);
    let matches = app.clone().get_matches();
    let cli = Cli::from_arg_matches(&matches).unwrap_or_else(|e| e.exit());
    setup_logging(cli.verbose);

    let (config_path, explicit) = match cli.config {
        Some(path) => (path, true),
        None => (PathBuf::from(DEFAULT_CONFIG_FILE), false),
    };
    let config = Config::load(&config_path, explicit)
        .with_context(|| format!("Failed to load config from {config_path:?}"))?;
    config.validate().context("Invalid configuration")?;
    debug!(namespace = %config.catalog.namespace, "Configuration loaded");

    let mut stdout = io::stdout().lock();

    if let Some((TRAIN_COMMAND, train_matches)) = matches.subcommand() {
        let hook = ReportingHook::new(config.train.emit_json);
        dispatch(catalog.models(), train_matches, &hook, &mut stdout)
            .context("Failed to construct model")?;
        return Ok(());
    }

    let Some(cmd) = cli.command else {
        app.print_help().context("Failed to print help")?;
        return Ok(());
    };

    match cmd {
        Commands::Config { command } => match command {
            ConfigCommand::Example => {
                writeln!(stdout, "{EXAMPLE_CONFIG}").context("Failed to write example")?;
            }
            ConfigCommand::Validate => {
                info!("Configuration is valid");
                info!("  Namespace: {}", config.catalog.namespace);
                info!("  Rst role: :{}:", config.catalog.rst_role);
                info!(
                    "  Default table format: {}",
                    TableFormat::parse(&config.listing.tablefmt)
                );
            }
        },

        Commands::Ls { command } => {
            let format = |args: &FormatArgs| {
                TableFormat::parse(args.tablefmt.as_deref().unwrap_or(&config.listing.tablefmt))
            };
            let listing_of = |kind: ComponentKind, args: &FormatArgs, out: &mut dyn Write| {
                write_listing(out, catalog.registry(kind), format(args), &config.catalog)
            };

            match command.unwrap_or(LsCommand::GithubReadme) {
                LsCommand::Models(args) => listing_of(ComponentKind::Model, &args, &mut stdout)?,
                LsCommand::Datasets(args) => listing_of(ComponentKind::Dataset, &args, &mut stdout)?,
                LsCommand::Training(args) => {
                    listing_of(ComponentKind::TrainingLoop, &args, &mut stdout)?
                }
                LsCommand::Samplers(args) => listing_of(ComponentKind::Sampler, &args, &mut stdout)?,
                LsCommand::Evaluators(args) => {
                    listing_of(ComponentKind::Evaluator, &args, &mut stdout)?
                }
                LsCommand::Metrics(args) => listing_of(ComponentKind::Metric, &args, &mut stdout)?,
                LsCommand::Parameters => write_parameters(&mut stdout, &catalog)?,
                LsCommand::GithubReadme => write_report(&mut stdout, &catalog, &config.catalog)?,
            }
        }
    }

    Ok(())
}
