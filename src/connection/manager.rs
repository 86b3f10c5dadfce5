//! Core ConnectionManager struct and basic connection methods.

use std::time::Duration;

use mongodb::Client;
use mongodb::bson::doc;
use mongodb::options::ClientOptions;
use tokio::runtime::Runtime;

use crate::connection::MongoDatabase;
use crate::error::{Error, Result};
use crate::helpers::validate_mongodb_uri;
use crate::models::SavedConnection;

/// Drives MongoDB's async driver from blocking callers
pub struct ConnectionManager {
    /// Tokio runtime for MongoDB async operations
    pub(crate) runtime: Runtime,
}

impl ConnectionManager {
    /// Create a new connection manager
    pub fn new() -> Self {
        let runtime = Runtime::new().expect("Failed to create Tokio runtime");
        Self { runtime }
    }

    /// Get a handle to the Tokio runtime
    pub fn runtime_handle(&self) -> tokio::runtime::Handle {
        self.runtime.handle().clone()
    }

    /// Connect to MongoDB using the saved connection config (runs in Tokio runtime)
    pub fn connect(&self, config: &SavedConnection) -> Result<Client> {
        validate_mongodb_uri(&config.uri).map_err(Error::InvalidUri)?;

        log::info!("Connecting to {}", config.display_uri());
        let uri = config.uri.clone();
        let app_name = config.app_name.clone();
        self.runtime.block_on(async {
            let mut options = ClientOptions::parse(&uri).await?;
            if app_name.is_some() {
                options.app_name = app_name;
            }
            let client = Client::with_options(options)?;

            // Ping to verify connection
            client.database("admin").run_command(doc! { "ping": 1 }).await?;

            Ok(client)
        })
    }

    /// Test connectivity with a timeout (runs in Tokio runtime)
    pub fn test_connection(&self, config: &SavedConnection, timeout: Duration) -> Result<()> {
        validate_mongodb_uri(&config.uri).map_err(Error::InvalidUri)?;

        let uri = config.uri.clone();
        self.runtime.block_on(async {
            let fut = async {
                let client = Client::with_uri_str(&uri).await?;
                client.database("admin").run_command(doc! { "ping": 1 }).await?;
                Ok::<(), mongodb::error::Error>(())
            };

            match tokio::time::timeout(timeout, fut).await {
                Ok(result) => result.map_err(Error::from),
                Err(_) => Err(Error::Timeout("Connection timed out".to_string())),
            }
        })
    }

    /// List databases for a connected client (runs in Tokio runtime)
    pub fn list_databases(&self, client: &Client) -> Result<Vec<String>> {
        let client = client.clone();
        self.runtime.block_on(async {
            let mut databases = client.list_database_names().await?;
            databases.sort_unstable_by_key(|name| name.to_lowercase());
            Ok(databases)
        })
    }

    /// Blocking command handle for one database of a connected client.
    pub fn database(&self, client: &Client, database: &str) -> MongoDatabase {
        MongoDatabase::new(client.database(database), self.runtime_handle())
    }

    /// Like [`ConnectionManager::database`], with the connection's command timeout applied.
    pub fn database_for(
        &self,
        client: &Client,
        config: &SavedConnection,
        database: &str,
    ) -> MongoDatabase {
        self.database(client, database).with_timeout(config.command_timeout)
    }
}

impl Default for ConnectionManager {
    fn default() -> Self {
        Self::new()
    }
}
