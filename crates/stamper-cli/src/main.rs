use std::fs::File;
use std::io;

use anyhow::{Context, Result};
use clap::Parser;
use fs2::FileExt;
use stamper_core::{EventStore, TimeEngine};
use stamper_db::{Database, JsonFileStore};
use tracing_subscriber::EnvFilter;

use stamper_cli::commands::{day, overtime, set_day, stamp, status};
use stamper_cli::{Cli, Commands, Config, StorageBackend};

/// Opens the configured backend, ensuring its directory exists.
fn open_store(config: &Config) -> Result<Box<dyn EventStore>> {
    std::fs::create_dir_all(config.data_dir()).context("failed to create data directory")?;
    match config.storage {
        StorageBackend::Sqlite => {
            let db = Database::open(&config.database_path).context("failed to open database")?;
            Ok(Box::new(db))
        }
        StorageBackend::Json => Ok(Box::new(JsonFileStore::new(
            &config.json_dir,
            &config.json_file_name,
        ))),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing with verbose flag support
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    // Use try_init to avoid panic if tracing is already initialized (e.g., in tests)
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();

    let Some(command) = &cli.command else {
        // No subcommand, show help
        use clap::CommandFactory;
        Cli::command().print_help()?;
        println!();
        return Ok(());
    };

    let config = Config::load_from(cli.config.as_deref()).context("failed to load configuration")?;
    tracing::debug!(?config, "loaded configuration");
    let engine_config = config.engine_config().context("invalid configuration")?;
    let store = open_store(&config)?;
    let mut engine = TimeEngine::new(store, engine_config);

    // Held until the end of main so the read-modify-write is not interleaved
    let _lock = if command.is_mutating() {
        let lock_file = File::create(config.data_dir().join(".lock"))
            .context("failed to create lock file")?;
        lock_file
            .lock_exclusive()
            .context("failed to acquire lock")?;
        Some(lock_file)
    } else {
        None
    };

    let mut stdout = io::stdout().lock();
    match command {
        Commands::Stamp(args) => stamp::run(&mut stdout, &mut engine, args)?,
        Commands::Status { json } => status::run(&mut stdout, &engine, *json)?,
        Commands::Overtime(args) => overtime::run(&mut stdout, &engine, args)?,
        Commands::Day(args) => day::run(&mut stdout, &engine, args)?,
        Commands::SetDay(args) => set_day::run(&mut stdout, &mut engine, args)?,
    }

    Ok(())
}
