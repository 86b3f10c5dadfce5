//! Common test utilities for integration tests using Testcontainers.
//!
//! A single MongoDB 7.0 container is shared per test binary (Rust compiles each
//! `tests/*.rs` file as a separate binary). Per-test isolation is achieved by
//! namespacing every database name with a short UUID suffix.
//!
//! The container runs on a dedicated background thread with its own tokio runtime,
//! so it outlives every `ConnectionManager` runtime created by the tests.
//!
//! An `atexit` hook ensures the container is removed when the process exits.

#![allow(dead_code)]

pub mod fixtures;

use std::sync::OnceLock;

use collstats::{ConnectionManager, MongoDatabase, SavedConnection};
use futures::TryStreamExt;
use mongodb::Client;
use mongodb::bson::Document;
use mongodb::results::CollectionSpecification;
use testcontainers::ImageExt;
use testcontainers::runners::AsyncRunner;
use testcontainers_modules::mongo::Mongo;

/// Connection info for the shared container.
struct SharedContainer {
    connection_string: String,
}

static SHARED: OnceLock<SharedContainer> = OnceLock::new();

/// Docker container ID, stored globally so the `atexit` handler can remove it.
static CONTAINER_ID: OnceLock<String> = OnceLock::new();

unsafe extern "C" {
    fn atexit(f: extern "C" fn()) -> i32;
}

/// Called by the C runtime on process exit. Forcibly removes the shared container.
extern "C" fn remove_container() {
    if let Some(id) = CONTAINER_ID.get() {
        let _ = std::process::Command::new("docker")
            .args(["rm", "-f", id])
            .stdout(std::process::Stdio::null())
            .stderr(std::process::Stdio::null())
            .status();
    }
}

/// Initialize the shared container (called once per test binary).
fn get_or_init_shared() -> &'static SharedContainer {
    SHARED.get_or_init(|| {
        let (tx, rx) = std::sync::mpsc::sync_channel(1);

        std::thread::spawn(move || {
            let rt = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .expect("Failed to create container runtime");

            rt.block_on(async {
                let container = Mongo::default()
                    .with_tag("7.0")
                    .start()
                    .await
                    .expect("Failed to start MongoDB container");

                let _ = CONTAINER_ID.set(container.id().to_string());
                unsafe {
                    atexit(remove_container);
                }

                let host = container.get_host().await.expect("Failed to get host");
                let port = container.get_host_port_ipv4(27017).await.expect("Failed to get port");
                let connection_string = format!("mongodb://{}:{}", host, port);

                // Wait until the server answers
                let ready_client = Client::with_uri_str(&connection_string)
                    .await
                    .expect("Failed to create readiness client");
                for _ in 0..30 {
                    if ready_client.list_database_names().await.is_ok() {
                        break;
                    }
                    tokio::time::sleep(tokio::time::Duration::from_millis(100)).await;
                }
                drop(ready_client);

                tx.send(connection_string).expect("Failed to send connection string");

                // Park forever, keeping the container alive until the process exits.
                std::future::pending::<()>().await;
            });
        });

        SharedContainer {
            connection_string: rx.recv().expect("Failed to receive connection string"),
        }
    })
}

/// A handle to the shared MongoDB container with per-test isolation.
///
/// Each handle owns a `ConnectionManager` and gets a unique `test_id` so that
/// `database("foo")` targets a database named `foo_{test_id}`.
pub struct MongoTestContainer {
    pub manager: ConnectionManager,
    pub client: Client,
    pub connection: SavedConnection,
    test_id: String,
}

impl MongoTestContainer {
    /// Connect to the shared MongoDB container through a fresh `ConnectionManager`.
    pub fn start() -> Self {
        let shared = get_or_init_shared();
        let connection =
            SavedConnection::new(shared.connection_string.clone()).with_app_name("collstats-tests");

        let manager = ConnectionManager::new();
        let client = manager.connect(&connection).expect("Failed to connect");

        // Use first 8 chars of UUID v4 as a short, unique namespace suffix.
        let test_id = uuid::Uuid::new_v4().to_string()[..8].to_string();

        Self { manager, client, connection, test_id }
    }

    /// Return the namespaced database name for this test.
    pub fn db_name(&self, name: &str) -> String {
        format!("{}_{}", name, self.test_id)
    }

    /// Blocking stats handle for a namespaced database.
    pub fn database(&self, name: &str) -> MongoDatabase {
        self.manager.database(&self.client, &self.db_name(name))
    }

    /// Insert `docs` into a namespaced collection, creating it if needed.
    pub fn seed(&self, db: &str, collection: &str, docs: Vec<Document>) {
        let coll = self.client.database(&self.db_name(db)).collection::<Document>(collection);
        self.manager
            .runtime_handle()
            .block_on(async move { coll.insert_many(docs).await })
            .expect("Failed to insert");
    }

    /// Run `command` directly on the driver, for setup steps.
    pub fn setup_command(&self, db: &str, command: Document) {
        let database = self.client.database(&self.db_name(db));
        self.manager
            .runtime_handle()
            .block_on(async move { database.run_command(command).await })
            .expect("Failed to run setup command");
    }

    /// Collection names in the order the driver's own `listCollections` cursor yields them.
    pub fn server_collection_names(&self, db: &str) -> Vec<String> {
        let database = self.client.database(&self.db_name(db));
        self.manager
            .runtime_handle()
            .block_on(async move {
                let cursor = database.list_collections().await?;
                let collections: Vec<CollectionSpecification> = cursor.try_collect().await?;
                Ok::<_, mongodb::error::Error>(
                    collections.into_iter().map(|collection| collection.name).collect::<Vec<_>>(),
                )
            })
            .expect("Failed to list collections")
    }
}
