use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use api_configurator::config::{load_env_file, EnvMap, Settings};
use api_configurator::executor::{HttpExecutor, TlsMode};
use api_configurator::{Pipeline, RunSummary};
use clap::builder::BoolishValueParser;
use clap::Parser;
use log::{error, info, warn};

#[derive(Parser, Debug)]
#[command(
    name = "api-configurator",
    version,
    about = "Applies a directory of declarative API calls to a live service",
    long_about = "Applies a directory of declarative API calls to a live service.\n\n\
        Reads CONFIGFILES_PATH, API_HOST, API_PORT, BASIC_AUTH_USERNAME and \
        BASIC_AUTH_PASSWORD from the environment. The exit code is the number \
        of calls answered with a status above 200."
)]
struct Cli {
    /// Dotenv file providing variables missing from the environment
    #[arg(long, value_name = "PATH")]
    env_file: Option<PathBuf>,

    /// Skip TLS certificate and host name verification
    #[arg(long, env = "API_TLS_INSECURE", value_parser = BoolishValueParser::new())]
    insecure: bool,

    /// Print the planned calls without sending them
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Stdout)
        .init();

    info!("===== API configurator starting =====");

    match run(cli).await {
        Ok(summary) => {
            info!("Total errors number {}", summary.errors);
            info!("===== API configurator completed =====");
            ExitCode::from(summary.exit_status())
        }
        Err(err) => {
            error!("{err:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<RunSummary> {
    let file_env = match &cli.env_file {
        Some(path) => load_env_file(path)?,
        None => EnvMap::new(),
    };
    let settings = Settings::from_env(&file_env).context("reading settings")?;

    let tls = if cli.insecure {
        warn!("TLS certificate verification is disabled");
        TlsMode::Insecure
    } else {
        TlsMode::Verify
    };

    let executor = HttpExecutor::new(settings.context.credentials.clone(), tls);
    let pipeline = Pipeline::new(settings.context, executor);

    if cli.dry_run {
        let planned = pipeline
            .dry_run(&settings.configfiles_path)
            .await
            .context("planning API requests")?;
        info!("Planned {} request(s), nothing sent", planned.len());
        return Ok(RunSummary::default());
    }

    pipeline
        .run(&settings.configfiles_path)
        .await
        .context("executing API requests")
}
