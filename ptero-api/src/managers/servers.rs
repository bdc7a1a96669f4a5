//! Server endpoints: listing, details, live resources, power and console.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use ptero_core::constants::{power_signals, CLIENT_API_PREFIX};
use ptero_core::error::{PteroError, PteroResult, ValidationError};

use super::{require, server_path};
use crate::response::{ListResponse, Resource};
use crate::transport::HttpTransport;

/// Server attributes as returned by `/api/client/servers/{id}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Server {
    pub server_owner: bool,
    pub identifier: String,
    pub internal_id: Option<u64>,
    pub uuid: String,
    pub name: String,
    pub node: String,
    pub is_node_under_maintenance: bool,
    pub description: String,
    pub status: Option<String>,
    pub is_suspended: bool,
    pub is_installing: bool,
    pub is_transferring: bool,
    pub invocation: Option<String>,
    pub docker_image: Option<String>,
    pub sftp_details: Option<SftpDetails>,
    pub limits: Limits,
    pub feature_limits: FeatureLimits,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SftpDetails {
    pub ip: String,
    pub port: u16,
}

/// Resource limits. Zero means unlimited for memory, disk and cpu.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Limits {
    pub memory: i64,
    pub swap: i64,
    pub disk: i64,
    pub io: i64,
    pub cpu: i64,
    pub threads: Option<String>,
    pub oom_disabled: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FeatureLimits {
    pub databases: u32,
    pub allocations: u32,
    pub backups: u32,
}

/// Live usage from `/resources`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ResourceUsage {
    pub current_state: String,
    pub is_suspended: bool,
    pub resources: Resources,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Resources {
    pub memory_bytes: u64,
    pub cpu_absolute: f64,
    pub disk_bytes: u64,
    pub network_rx_bytes: u64,
    pub network_tx_bytes: u64,
    pub uptime: u64,
}

/// Signal accepted by the power endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PowerSignal {
    Start,
    Stop,
    Restart,
    Kill,
}

impl PowerSignal {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Start => power_signals::START,
            Self::Stop => power_signals::STOP,
            Self::Restart => power_signals::RESTART,
            Self::Kill => power_signals::KILL,
        }
    }
}

impl fmt::Display for PowerSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PowerSignal {
    type Err = PteroError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            power_signals::START => Ok(Self::Start),
            power_signals::STOP => Ok(Self::Stop),
            power_signals::RESTART => Ok(Self::Restart),
            power_signals::KILL => Ok(Self::Kill),
            other => Err(ValidationError::field(
                "signal",
                format!(
                    "unknown power signal '{other}', expected one of {}",
                    power_signals::ALL.join(", ")
                ),
            )
            .into()),
        }
    }
}

/// Server operations.
#[derive(Debug, Clone)]
pub struct ServerManager {
    http: Arc<HttpTransport>,
}

impl ServerManager {
    pub fn new(http: Arc<HttpTransport>) -> Self {
        Self { http }
    }

    /// List servers the key's user can access.
    pub async fn list(&self) -> PteroResult<ListResponse<Server>> {
        self.http.get_json(CLIENT_API_PREFIX).await
    }

    /// Get a single server by identifier.
    pub async fn get(&self, server: &str) -> PteroResult<Server> {
        let path = server_path(server, "")?;
        let resp: Resource<Server> = self.http.get_json(&path).await?;
        Ok(resp.attributes)
    }

    /// Current state and live resource usage.
    pub async fn resources(&self, server: &str) -> PteroResult<ResourceUsage> {
        let path = server_path(server, "/resources")?;
        let resp: Resource<ResourceUsage> = self.http.get_json(&path).await?;
        Ok(resp.attributes)
    }

    /// Send a power signal.
    pub async fn power(&self, server: &str, signal: PowerSignal) -> PteroResult<()> {
        let path = server_path(server, "/power")?;
        let body = serde_json::json!({ "signal": signal.as_str() });
        self.http.post(&path, &body).await?;
        Ok(())
    }

    /// Send a console command. The server must be running.
    pub async fn send_command(&self, server: &str, command: &str) -> PteroResult<()> {
        let path = server_path(server, "/command")?;
        require("command", command)?;
        let body = serde_json::json!({ "command": command });
        self.http.post(&path, &body).await?;
        Ok(())
    }

    /// Rename a server.
    pub async fn rename(&self, server: &str, name: &str) -> PteroResult<()> {
        let path = server_path(server, "/settings/rename")?;
        require("name", name)?;
        let body = serde_json::json!({ "name": name.trim() });
        self.http.post(&path, &body).await?;
        Ok(())
    }

    /// Trigger a reinstall.
    pub async fn reinstall(&self, server: &str) -> PteroResult<()> {
        let path = server_path(server, "/settings/reinstall")?;
        self.http.post_empty(&path).await?;
        Ok(())
    }
}
