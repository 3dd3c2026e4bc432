use std::{fmt, time::Duration};

use crate::library::constant::{DEFAULT_POLL_INTERVAL_SECS, DEFAULT_POLL_TIMEOUT_SECS};

/// Everything needed to talk to one cluster.
///
/// Built once at startup and handed to [`crate::library::ontap::OntapClient`];
/// nothing reads it from global state.
#[derive(Clone)]
pub struct ConnectionConfig {
    pub host: String,
    pub username: String,
    password: String,
    pub verify_ssl: bool,
}

impl ConnectionConfig {
    pub fn new(host: &str, username: &str, password: String) -> Self {
        ConnectionConfig {
            host: host.trim().to_string(),
            username: username.to_string(),
            password,
            verify_ssl: false,
        }
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    /// The cluster address as a URL prefix. Bare hosts are reached over https.
    pub fn base_url(&self) -> String {
        let host = self.host.trim_end_matches('/');

        if host.starts_with("https://") || host.starts_with("http://") {
            host.to_string()
        } else {
            format!("https://{}", host)
        }
    }
}

impl fmt::Debug for ConnectionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionConfig")
            .field("host", &self.host)
            .field("username", &self.username)
            .field("password", &"********")
            .field("verify_ssl", &self.verify_ssl)
            .finish()
    }
}

/// How long to wait on the job a mutating request hands back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollConfig {
    pub interval: Duration,
    pub timeout: Duration,
}

impl PollConfig {
    pub fn from_secs(interval: u64, timeout: u64) -> Self {
        PollConfig {
            interval: Duration::from_secs(interval),
            timeout: Duration::from_secs(timeout),
        }
    }
}

impl Default for PollConfig {
    fn default() -> Self {
        PollConfig::from_secs(DEFAULT_POLL_INTERVAL_SECS, DEFAULT_POLL_TIMEOUT_SECS)
    }
}
