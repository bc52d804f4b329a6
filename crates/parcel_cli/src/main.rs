//! `parcel-tracker` command-line entry point.
//!
//! # Responsibility
//! - Map subcommands onto `ParcelService` use-cases.
//! - Print records as JSON and report failures on stderr.

use clap::{Parser, Subcommand};
use parcel_core::db::open_db;
use parcel_core::{
    default_log_level, init_logging, ClientId, LoggingConfig, ParcelNumber, ParcelService,
    SqliteParcelStore, TrackerConfig, DEFAULT_DB_FILE,
};
use serde::Serialize;
use std::error::Error;
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

/// Track parcels stored in a local SQLite database.
#[derive(Parser, Debug)]
#[command(name = "parcel-tracker")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Database file, created on first use
    #[arg(long, global = true, env = "PARCEL_TRACKER_DB", default_value = DEFAULT_DB_FILE)]
    db: PathBuf,

    /// Log level (trace|debug|info|warn|error)
    #[arg(long, global = true, env = "PARCEL_TRACKER_LOG_LEVEL")]
    log_level: Option<String>,

    /// Absolute directory for rolling log files; logging is off without it
    #[arg(long, global = true, env = "PARCEL_TRACKER_LOG_DIR")]
    log_dir: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Register a new parcel for a client
    Register {
        #[arg(long)]
        client: ClientId,
        #[arg(long)]
        address: String,
    },
    /// Show one parcel
    Show { number: ParcelNumber },
    /// List every parcel of a client
    Client { client: ClientId },
    /// Advance a parcel to its next status
    NextStatus { number: ParcelNumber },
    /// Change the address of a registered parcel
    SetAddress {
        number: ParcelNumber,
        address: String,
    },
    /// Delete a registered parcel
    Delete { number: ParcelNumber },
}

impl Cli {
    fn tracker_config(&self) -> Result<TrackerConfig, Box<dyn Error>> {
        let logging = match &self.log_dir {
            Some(dir) => {
                let level = self.log_level.as_deref().unwrap_or(default_log_level());
                Some(LoggingConfig::new(level, dir)?)
            }
            None => None,
        };

        Ok(TrackerConfig {
            db_path: self.db.clone(),
            logging,
        })
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let mut stdout = std::io::stdout().lock();

    match run(cli, &mut stdout) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli, out: &mut impl Write) -> Result<(), Box<dyn Error>> {
    let config = cli.tracker_config()?;
    if let Some(logging) = &config.logging {
        init_logging(logging)?;
    }

    let conn = open_db(&config.db_path)?;
    let service = ParcelService::new(SqliteParcelStore::try_new(&conn)?);

    match cli.command {
        Command::Register { client, address } => {
            write_json(out, &service.register(client, address)?)
        }
        Command::Show { number } => write_json(out, &service.get(number)?),
        Command::Client { client } => write_json(out, &service.client_parcels(client)?),
        Command::NextStatus { number } => write_json(out, &service.next_status(number)?),
        Command::SetAddress { number, address } => {
            service.change_address(number, &address)?;
            writeln!(out, "parcel {number}: address updated")?;
            Ok(())
        }
        Command::Delete { number } => {
            service.delete(number)?;
            writeln!(out, "parcel {number}: deleted")?;
            Ok(())
        }
    }
}

fn write_json(out: &mut impl Write, value: &impl Serialize) -> Result<(), Box<dyn Error>> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}
