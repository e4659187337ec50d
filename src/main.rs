use std::{path::PathBuf, sync::Arc, time::Duration};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use toolkit::bulk::{print_failures, print_run_summary, BulkOptions, BulkRunner};
use toolkit::config::{load_config, parse_duration, ProfileConfig, SettingsBuilder};
use toolkit::executor::{ExecutorOptions, HttpExecutor, RetryPolicy};
use toolkit::logging::init_logging;
use toolkit::observer::{RunObserver, TracingObserver};

#[derive(Parser, Debug)]
#[command(
    name = "toolkit",
    version,
    about = "Toolkit for devops teams",
    disable_help_subcommand = true
)]
struct Cli {
    /// Enable dev mode (debug logging with source locations)
    #[arg(long, global = true)]
    dev: bool,

    /// Directory or file containing toolkit.json
    #[arg(long, global = true, env = "TOOLKIT_CONFIG")]
    config: Option<PathBuf>,

    /// Select a profile from toolkit.json
    #[arg(short = 'P', long, global = true, env = "TOOLKIT_PROFILE")]
    profile: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Elastic stack toolkit
    Es {
        #[command(subcommand)]
        command: EsCommands,
    },
    /// Print version info
    Version,
}

#[derive(Subcommand, Debug)]
enum EsCommands {
    /// Perform bulk requests to elasticsearch
    Bulk(BulkArgs),
}

#[derive(Args, Debug)]
struct BulkArgs {
    /// Request files (.yaml, .yml, .json or .list)
    #[arg(value_name = "FILE", required = true)]
    files: Vec<PathBuf>,

    #[command(flatten)]
    connection: ConnectionArgs,

    /// Maximum number of requests in flight [default: number of CPUs]
    #[arg(short = 'c', long)]
    concurrency: Option<usize>,

    /// Serial execution, parallel by default
    #[arg(long)]
    serial: bool,
}

#[derive(Args, Debug)]
struct ConnectionArgs {
    /// Elasticsearch URL
    #[arg(long, env = "TOOLKIT_ES_URL")]
    es_url: Option<String>,

    /// Username for es basic auth
    #[arg(short = 'u', long, env = "TOOLKIT_ES_USERNAME")]
    username: Option<String>,

    /// Password for user
    #[arg(short = 'p', long, env = "TOOLKIT_ES_PASSWORD", hide_env_values = true)]
    password: Option<String>,

    /// Kibana version sent in the kbn-version header [default: 7.14.2]
    #[arg(long)]
    kibana_version: Option<String>,

    /// HTTP client timeout, e.g. 500ms, 10s or 1m [default: 10s]
    #[arg(long, value_name = "DURATION", value_parser = parse_duration)]
    timeout: Option<Duration>,

    /// Simulate but not actually run
    #[arg(long)]
    dry_run: bool,
}

impl BulkArgs {
    fn overrides(&self) -> ProfileConfig {
        ProfileConfig {
            es_url: self.connection.es_url.clone(),
            username: self.connection.username.clone(),
            password: self.connection.password.clone(),
            kibana_version: self.connection.kibana_version.clone(),
            timeout: self.connection.timeout,
            concurrency: self.concurrency,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.dev);

    match cli.command {
        Commands::Version => {
            println!("{}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        Commands::Es {
            command: EsCommands::Bulk(args),
        } => run_bulk(args, cli.config, cli.profile).await,
    }
}

async fn run_bulk(
    args: BulkArgs,
    config: Option<PathBuf>,
    profile: Option<String>,
) -> Result<()> {
    let config_target = match config {
        Some(path) => path,
        None => std::env::current_dir()?,
    };
    let cfg = load_config(&config_target).context("loading configuration")?;
    let settings = SettingsBuilder::new(cfg, profile, args.overrides()).build()?;

    tracing::debug!(
        es_url = %settings.es_url,
        profile = ?settings.profile_name,
        concurrency = settings.concurrency,
        serial = args.serial,
        dry_run = args.connection.dry_run,
        "starting bulk run"
    );

    let observer: Arc<dyn RunObserver> = Arc::new(TracingObserver);
    let executor = HttpExecutor::new(
        ExecutorOptions {
            base_url: settings.es_url,
            dry_run: args.connection.dry_run,
            timeout: settings.timeout,
            kibana_version: settings.kibana_version,
            credentials: settings.credentials,
            retry: RetryPolicy::default(),
        },
        observer.clone(),
    )?;
    let runner = BulkRunner::new(
        executor,
        BulkOptions {
            concurrency: settings.concurrency,
            serial: args.serial,
        },
        observer,
    );

    match runner.run(&args.files).await {
        Ok(summary) => {
            print_run_summary(&summary, args.connection.dry_run);
            Ok(())
        }
        Err(failures) => {
            print_failures(&failures);
            Err(failures.into())
        }
    }
}
