//! telescope - Outdated dependency auditor CLI tool
//!
//! Reports which dependencies of a go.mod, poetry.lock or Pipfile.lock have
//! newer releases, grouped by MAJOR, MINOR and PATCH distance.

use clap::Parser;
use std::io::{self, Write};
use std::process::ExitCode;
use telescope::atlas::Atlas;
use telescope::cli::CliArgs;
use telescope::progress::Progress;
use telescope::registry::{create_adapter, HttpClient, DEFAULT_USER_AGENT};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize the tracing subscriber for logging on stderr.
///
/// Log level is controlled by:
/// 1. `--verbose` flag sets level to DEBUG
/// 2. `RUST_LOG` environment variable (if set)
/// 3. Default is WARN
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("telescope=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("telescope=warn"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(io::stderr))
        .with(filter)
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = CliArgs::parse();
    init_tracing(args.verbose);

    tracing::debug!("telescope starting with args: {:?}", args);

    // Run the main logic and handle errors
    match run(args).await {
        Ok(exit_code) => exit_code,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(2)
        }
    }
}

/// Main application logic
async fn run(args: CliArgs) -> anyhow::Result<ExitCode> {
    let config = args.atlas_config()?;
    let mut atlas = Atlas::from_path(&args.file, &config)?;

    let client = HttpClient::with_config(args.timeout, DEFAULT_USER_AGENT)?;
    let registry = create_adapter(atlas.ecosystem(), client, args.registry_url.as_deref());

    let mut progress = Progress::new(!args.quiet);
    progress.start(
        atlas.dependencies().len() as u64,
        &format!("Querying {}", registry.registry_name()),
    );
    atlas.resolve(registry.as_ref(), &progress).await;
    progress.finish_and_clear();

    // Output results
    let mut stdout = io::stdout().lock();
    let critical_found = atlas.report(&args.report_options(), &mut stdout)?;
    stdout.flush()?;

    if critical_found {
        Ok(ExitCode::FAILURE)
    } else {
        Ok(ExitCode::SUCCESS)
    }
}
