//! The command-execution capability the stats operations run against.

use std::future::Future;
use std::time::Duration;

use futures::TryStreamExt;
use mongodb::bson::Document;
use tokio::runtime::Handle;

use crate::error::{Error, Result};

/// A database that can execute administrative commands.
///
/// Calls block until the server answers.
pub trait Database {
    /// Name of the database commands are sent to.
    fn name(&self) -> &str;

    /// Run `command` and return the server's reply document.
    fn run_command(&self, command: Document) -> Result<Document>;

    /// Run a cursor-returning command such as `listCollections` and return every
    /// document the cursor yields, in server order.
    fn run_cursor_command(&self, command: Document) -> Result<Vec<Document>>;
}

/// [`Database`] backed by the MongoDB driver, driven on a Tokio runtime.
#[derive(Clone)]
pub struct MongoDatabase {
    inner: mongodb::Database,
    runtime: Handle,
    timeout: Option<Duration>,
}

impl MongoDatabase {
    pub fn new(inner: mongodb::Database, runtime: Handle) -> Self {
        Self { inner, runtime, timeout: None }
    }

    /// Fail any command that takes longer than `timeout`.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Block on `fut`, bounded by the configured timeout.
    fn block_on<T>(
        &self,
        command: &Document,
        fut: impl Future<Output = mongodb::error::Result<T>>,
    ) -> Result<T> {
        let Some(timeout) = self.timeout else {
            return self.runtime.block_on(fut).map_err(Error::from);
        };

        match self.runtime.block_on(async move { tokio::time::timeout(timeout, fut).await }) {
            Ok(result) => result.map_err(Error::from),
            Err(_) => {
                let command_name = command.keys().next().map(String::as_str).unwrap_or_default();
                Err(Error::Timeout(format!("`{command_name}` did not complete within {timeout:?}")))
            }
        }
    }
}

impl Database for MongoDatabase {
    fn name(&self) -> &str {
        self.inner.name()
    }

    fn run_command(&self, command: Document) -> Result<Document> {
        let db = self.inner.clone();
        let request = command.clone();
        self.block_on(&command, async move { db.run_command(request).await })
    }

    fn run_cursor_command(&self, command: Document) -> Result<Vec<Document>> {
        let db = self.inner.clone();
        let request = command.clone();
        self.block_on(&command, async move {
            let cursor = db.run_cursor_command(request).await?;
            cursor.try_collect().await
        })
    }
}

impl std::fmt::Debug for MongoDatabase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MongoDatabase")
            .field("name", &self.inner.name())
            .field("timeout", &self.timeout)
            .finish()
    }
}
