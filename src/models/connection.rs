// Connection configuration models

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::helpers::redact_uri_password;

/// Where and how to connect
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedConnection {
    pub uri: String,
    /// Reported to the server as the client application name.
    #[serde(default)]
    pub app_name: Option<String>,
    /// Deadline applied to every command; none means the driver's own.
    #[serde(default)]
    pub command_timeout: Option<Duration>,
}

impl SavedConnection {
    pub fn new(uri: impl Into<String>) -> Self {
        Self { uri: uri.into(), app_name: None, command_timeout: None }
    }

    pub fn with_app_name(mut self, app_name: impl Into<String>) -> Self {
        self.app_name = Some(app_name.into());
        self
    }

    pub fn with_command_timeout(mut self, timeout: Duration) -> Self {
        self.command_timeout = Some(timeout);
        self
    }

    /// URI safe to print or log.
    pub fn display_uri(&self) -> String {
        redact_uri_password(&self.uri)
    }
}
