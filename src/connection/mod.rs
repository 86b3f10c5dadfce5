//! MongoDB connection management and operations.
//!
//! This module provides:
//! - `ConnectionManager`: owns the Tokio runtime and connects clients
//! - `Database` / `MongoDatabase`: blocking command execution against one database
//! - `ops`: statistics operations built on `Database`

pub mod database;
pub mod manager;
pub mod ops;

pub use database::{Database, MongoDatabase};
pub use manager::ConnectionManager;
