use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use cribl_examples::env::{load_dotenv, ProcessEnv};
use cribl_examples::factory::{connect_cloud, connect_mgmt};
use cribl_examples::runner;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// List Cribl worker groups and workspaces.
#[derive(Debug, Parser)]
#[command(name = "cribl-examples", version, about)]
struct Cli {
    /// Load variables from this file instead of searching for `.env`
    #[arg(long, global = true, value_name = "PATH")]
    env_file: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// List worker groups of a Cribl.Cloud workspace (OAuth client credentials)
    CloudWorkerGroups,
    /// List worker groups of an on-premise leader (username and password)
    OnpremWorkerGroups,
    /// List the workspaces of a Cribl.Cloud organization
    Workspaces,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let loaded = load_dotenv(cli.env_file.as_deref())?;
    debug!(env_file = ?loaded, command = ?cli.command, "starting");

    let stdout = io::stdout();
    let mut out = stdout.lock();

    let outcome = match cli.command {
        Commands::CloudWorkerGroups => {
            runner::cloud_worker_groups(&ProcessEnv, connect_cloud, &mut out).await
        }
        Commands::OnpremWorkerGroups => runner::onprem_worker_groups(&ProcessEnv, &mut out).await,
        Commands::Workspaces => runner::workspaces(&ProcessEnv, connect_mgmt, &mut out).await,
    }
    .context("failed to write report")?;

    out.flush().context("failed to flush stdout")?;
    Ok(ExitCode::from(outcome.exit_code()))
}

fn init_tracing(verbose: u8) {
    let filter = if std::env::var("RUST_LOG").is_ok() {
        tracing_subscriber::EnvFilter::from_default_env()
    } else {
        let level = match verbose {
            0 => "warn",
            1 => "cribl_examples=info,cribl_core=info,cribl_control_plane=info,cribl_mgmt_plane=info",
            2 => "cribl_examples=debug,cribl_core=debug,cribl_control_plane=debug,cribl_mgmt_plane=debug",
            _ => "cribl_examples=trace,cribl_core=trace,cribl_control_plane=trace,cribl_mgmt_plane=trace",
        };
        tracing_subscriber::EnvFilter::new(level)
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(io::stderr)
                .with_target(true)
                .compact(),
        )
        .init();
}
