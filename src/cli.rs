//! Command-line interface.
//!
//! Settings precedence, highest first: flags, environment, settings file, defaults.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};

use crate::connection::ops::stats;
use crate::connection::{ConnectionManager, Database, MongoDatabase};
use crate::error::Error;
use crate::helpers::database_from_uri;
use crate::models::{CollectionStats, SavedConnection, StatsOrder};
use crate::report;
use crate::state::{AppSettings, ConfigManager};

/// Storage statistics for MongoDB collections and databases
#[derive(Parser, Debug)]
#[command(name = "collstats", version, about, long_about = None)]
pub struct Cli {
    /// MongoDB connection URI
    #[arg(long, global = true, env = "COLLSTATS_URI")]
    pub uri: Option<String>,

    /// Settings file (default: <config dir>/collstats/settings.json)
    #[arg(short, long, global = true, env = "COLLSTATS_CONFIG")]
    pub config: Option<PathBuf>,

    /// Per-command timeout in seconds
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List collection names in server order
    Collections {
        /// Database name (default: the database in the URI)
        database: Option<String>,
    },
    /// Storage statistics for one or all collections
    Stats {
        /// Database name (default: the database in the URI)
        database: Option<String>,
        /// Only this collection
        #[arg(long)]
        collection: Option<String>,
        /// index-size-desc, index-size-asc, size-desc or size-asc
        #[arg(long)]
        order: Option<StatsOrder>,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Storage statistics for a database
    DbStats {
        /// Database name (default: the database in the URI)
        database: Option<String>,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Check that the server is reachable
    Ping,
    /// Write the default settings file
    InitConfig {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

#[derive(clap::Args, Debug, Clone, Copy)]
pub struct OutputArgs {
    /// Print JSON instead of a table
    #[arg(long)]
    pub json: bool,
    /// Print sizes as raw byte counts
    #[arg(long)]
    pub raw_bytes: bool,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Cli::parse()
    }

    /// Initialize env_logger. `RUST_LOG` wins over `-v`.
    pub fn init_logging(&self) {
        let level = match self.verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        };
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
    }

    fn config_manager(&self) -> Result<ConfigManager> {
        match &self.config {
            Some(path) => Ok(ConfigManager::with_settings_path(path)),
            None => ConfigManager::new(),
        }
    }

    /// Connection built from flags layered over the settings file.
    pub fn resolve_connection(&self, settings: &AppSettings) -> Result<SavedConnection> {
        let uri = self
            .uri
            .clone()
            .or_else(|| settings.connection.uri.clone())
            .context("No connection URI: pass --uri, set COLLSTATS_URI or add it to settings")?;

        let mut connection = settings.connection.connection(uri);
        if let Some(secs) = self.timeout {
            connection.command_timeout = (secs > 0).then(|| Duration::from_secs(secs));
        }
        Ok(connection)
    }
}

fn resolve_database(database: Option<String>, connection: &SavedConnection) -> Result<String> {
    database
        .or_else(|| database_from_uri(&connection.uri))
        .context("No database given and the URI does not name one")
}

/// Run the parsed command.
pub fn execute(cli: Cli) -> Result<()> {
    let config = cli.config_manager()?;

    if let Command::InitConfig { force } = cli.command {
        let path = config.settings_path();
        if path.exists() && !force {
            bail!("{} already exists (use --force to overwrite)", path.display());
        }
        config.save_settings(&AppSettings::default())?;
        println!("Wrote {}", path.display());
        return Ok(());
    }

    let settings = config.load_settings()?;
    let connection = cli.resolve_connection(&settings)?;
    let manager = ConnectionManager::new();

    if let Command::Ping = cli.command {
        let timeout = connection.command_timeout.unwrap_or(Duration::from_secs(10));
        manager.test_connection(&connection, timeout)?;
        println!("{}: ok", connection.display_uri());
        return Ok(());
    }

    let client = manager.connect(&connection)?;

    match cli.command {
        Command::Collections { database } => {
            let db = open(&manager, &client, &connection, database)?;
            for name in stats::list_collection_names(&db)? {
                println!("{name}");
            }
        }
        Command::Stats { database, collection, order, output } => {
            let db = open(&manager, &client, &connection, database)?;
            let order = order.unwrap_or(settings.report.default_order);
            let human_readable = settings.report.human_readable && !output.raw_bytes;

            if let Some(collection) = collection {
                let entry = stats::collection_stats(&db, &collection)?;
                print_collections(&[entry], output.json, human_readable)?;
                return Ok(());
            }

            match stats::all_collection_stats(&db) {
                Ok(mut entries) => {
                    order.sort(&mut entries);
                    print_collections(&entries, output.json, human_readable)?;
                }
                Err(Error::CollectionStats { collection, mut completed, source }) => {
                    order.sort(&mut completed);
                    print_collections(&completed, output.json, human_readable)?;
                    bail!(
                        "stats incomplete for {}: `{}` failed: {}",
                        db.name(),
                        collection,
                        source
                    );
                }
                Err(err) => return Err(err.into()),
            }
        }
        Command::DbStats { database, output } => {
            let db = open(&manager, &client, &connection, database)?;
            let entry = stats::database_stats(&db)?;
            if output.json {
                println!("{}", serde_json::to_string_pretty(&entry)?);
            } else {
                let human_readable = settings.report.human_readable && !output.raw_bytes;
                print!("{}", report::database_summary(&entry, human_readable));
            }
        }
        Command::Ping | Command::InitConfig { .. } => unreachable!("handled above"),
    }

    Ok(())
}

fn open(
    manager: &ConnectionManager,
    client: &mongodb::Client,
    connection: &SavedConnection,
    database: Option<String>,
) -> Result<MongoDatabase> {
    let database = resolve_database(database, connection)?;
    Ok(manager.database_for(client, connection, &database))
}

fn print_collections(
    entries: &[CollectionStats],
    json: bool,
    human_readable: bool,
) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(entries)?);
    } else {
        print!("{}", report::collection_table(entries, human_readable));
    }
    Ok(())
}
