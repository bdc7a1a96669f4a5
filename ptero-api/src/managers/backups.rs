//! Backup endpoints under `/servers/{id}/backups`.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use ptero_core::error::PteroResult;

use super::{path_segment, server_path};
use crate::response::{ListResponse, Resource, SignedUrl};
use crate::transport::HttpTransport;

/// Backup attributes.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Backup {
    pub uuid: String,
    pub name: String,
    pub ignored_files: Vec<String>,
    pub checksum: Option<String>,
    pub bytes: u64,
    pub is_successful: bool,
    pub is_locked: bool,
    pub created_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl Backup {
    /// Still being written by the daemon.
    pub fn is_pending(&self) -> bool {
        self.completed_at.is_none()
    }
}

/// Options for creating a backup. Every field is optional.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CreateBackupOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Newline-separated ignore patterns.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ignored: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_locked: Option<bool>,
}

impl CreateBackupOptions {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    pub fn ignore(mut self, patterns: &[&str]) -> Self {
        self.ignored = Some(patterns.join("\n"));
        self
    }

    pub fn locked(mut self, locked: bool) -> Self {
        self.is_locked = Some(locked);
        self
    }
}

/// Backup operations.
#[derive(Debug, Clone)]
pub struct BackupManager {
    http: Arc<HttpTransport>,
}

impl BackupManager {
    pub fn new(http: Arc<HttpTransport>) -> Self {
        Self { http }
    }

    /// List backups. `meta.backup_count` carries the total.
    pub async fn list(&self, server: &str) -> PteroResult<ListResponse<Backup>> {
        let path = server_path(server, "/backups")?;
        self.http.get_json(&path).await
    }

    /// Start a new backup.
    pub async fn create(&self, server: &str, options: &CreateBackupOptions) -> PteroResult<Backup> {
        let path = server_path(server, "/backups")?;
        let body = serde_json::to_value(options)?;
        let resp: Resource<Backup> = self.http.post_json(&path, &body).await?;
        Ok(resp.attributes)
    }

    /// Get a single backup.
    pub async fn get(&self, server: &str, backup: &str) -> PteroResult<Backup> {
        let path = backup_path(server, backup, "")?;
        let resp: Resource<Backup> = self.http.get_json(&path).await?;
        Ok(resp.attributes)
    }

    /// One-time download URL for a backup archive.
    pub async fn download_url(&self, server: &str, backup: &str) -> PteroResult<String> {
        let path = backup_path(server, backup, "/download")?;
        let resp: Resource<SignedUrl> = self.http.get_json(&path).await?;
        Ok(resp.attributes.url)
    }

    /// Flip the lock flag; returns the updated backup.
    pub async fn toggle_lock(&self, server: &str, backup: &str) -> PteroResult<Backup> {
        let path = backup_path(server, backup, "/lock")?;
        let resp = self.http.post_empty(&path).await?;
        let resp: Resource<Backup> = HttpTransport::parse_response(resp).await?;
        Ok(resp.attributes)
    }

    /// Restore a backup. `truncate` wipes the volume first.
    pub async fn restore(&self, server: &str, backup: &str, truncate: bool) -> PteroResult<()> {
        let path = backup_path(server, backup, "/restore")?;
        let body = serde_json::json!({ "truncate": truncate });
        self.http.post(&path, &body).await?;
        Ok(())
    }

    /// Delete a backup.
    pub async fn delete(&self, server: &str, backup: &str) -> PteroResult<()> {
        let path = backup_path(server, backup, "")?;
        self.http.delete(&path).await?;
        Ok(())
    }
}

fn backup_path(server: &str, backup: &str, rest: &str) -> PteroResult<String> {
    let base = server_path(server, "/backups")?;
    let backup = path_segment("backup", backup)?;
    Ok(format!("{base}/{backup}{rest}"))
}
