//! Persisted settings.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::models::{SavedConnection, StatsOrder};

/// Default application name reported to the server
pub const DEFAULT_APP_NAME: &str = "collstats";

/// Application settings
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct AppSettings {
    #[serde(default)]
    pub connection: ConnectionSettings,
    #[serde(default)]
    pub report: ReportSettings,
}

/// Default connection parameters
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ConnectionSettings {
    #[serde(default)]
    pub uri: Option<String>,
    #[serde(default = "default_app_name")]
    pub app_name: String,
    #[serde(default)]
    pub command_timeout_secs: Option<u64>,
}

impl Default for ConnectionSettings {
    fn default() -> Self {
        Self { uri: None, app_name: default_app_name(), command_timeout_secs: None }
    }
}

impl ConnectionSettings {
    /// Build a connection for `uri` with these settings applied.
    pub fn connection(&self, uri: impl Into<String>) -> SavedConnection {
        let mut connection = SavedConnection::new(uri);
        if !self.app_name.is_empty() {
            connection = connection.with_app_name(self.app_name.clone());
        }
        if let Some(secs) = self.command_timeout_secs.filter(|secs| *secs > 0) {
            connection = connection.with_command_timeout(Duration::from_secs(secs));
        }
        connection
    }
}

/// How stats are presented
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReportSettings {
    #[serde(default)]
    pub default_order: StatsOrder,
    /// Print sizes as KB/MB/GB instead of raw byte counts
    #[serde(default = "default_true")]
    pub human_readable: bool,
}

impl Default for ReportSettings {
    fn default() -> Self {
        Self { default_order: StatsOrder::default(), human_readable: true }
    }
}

fn default_app_name() -> String {
    DEFAULT_APP_NAME.to_string()
}

fn default_true() -> bool {
    true
}
