use color_eyre::Result;
use tracing_subscriber::EnvFilter;

use video_sync::cli::{build_store, parse_args, run_cli_command, version_string, CliCommand, USAGE};
use video_sync::config::SyncConfig;

fn init_tracing() {
    // Log to stderr; stdout is for command output (`RUST_LOG=debug` for more).
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("video_sync=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let command = parse_args(std::env::args());

    // Handle --version / --help before any initialization
    match command {
        CliCommand::Version => {
            println!("{}", version_string());
            return Ok(());
        }
        CliCommand::Help => {
            print!("{}", USAGE);
            return Ok(());
        }
        _ => {}
    }

    color_eyre::install()?;
    init_tracing();

    let config = SyncConfig::from_env();
    tracing::debug!("{:?}", config);

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async {
        let (store, notifications) = build_store(&config)?;
        run_cli_command(command, &config, store, notifications).await
    })
}
