//! File manager endpoints under `/servers/{id}/files`.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use ptero_core::error::{PteroResult, ValidationError};

use super::{require, server_path};
use crate::response::{ListResponse, Resource, SignedUrl};
use crate::transport::{HttpTransport, RequestBody};

/// A file or directory entry.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileObject {
    pub name: String,
    pub mode: String,
    pub mode_bits: Option<String>,
    pub size: u64,
    pub is_file: bool,
    pub is_symlink: bool,
    pub mimetype: String,
    pub created_at: Option<DateTime<Utc>>,
    pub modified_at: Option<DateTime<Utc>>,
}

impl FileObject {
    pub fn is_directory(&self) -> bool {
        !self.is_file && !self.is_symlink
    }
}

/// File operations on a server's volume.
#[derive(Debug, Clone)]
pub struct FileManager {
    http: Arc<HttpTransport>,
}

impl FileManager {
    pub fn new(http: Arc<HttpTransport>) -> Self {
        Self { http }
    }

    /// List a directory. An empty `directory` lists the volume root.
    pub async fn list(&self, server: &str, directory: &str) -> PteroResult<Vec<FileObject>> {
        let path = server_path(server, "/files/list")?;
        let directory = if directory.trim().is_empty() { "/" } else { directory };
        let resp: ListResponse<FileObject> = self
            .http
            .get_json_query(&path, &[("directory", directory)])
            .await?;
        Ok(resp.into_attributes())
    }

    /// Raw contents of a file.
    pub async fn contents(&self, server: &str, file: &str) -> PteroResult<String> {
        let path = server_path(server, "/files/contents")?;
        require("file", file)?;
        let resp = self.http.get_query(&path, &[("file", file)]).await?;
        HttpTransport::response_text(resp).await
    }

    /// One-time download URL for a file.
    pub async fn download_url(&self, server: &str, file: &str) -> PteroResult<String> {
        let path = server_path(server, "/files/download")?;
        require("file", file)?;
        let resp: Resource<SignedUrl> = self.http.get_json_query(&path, &[("file", file)]).await?;
        Ok(resp.attributes.url)
    }

    /// One-time upload URL for the volume.
    pub async fn upload_url(&self, server: &str) -> PteroResult<String> {
        let path = server_path(server, "/files/upload")?;
        let resp: Resource<SignedUrl> = self.http.get_json(&path).await?;
        Ok(resp.attributes.url)
    }

    /// Rename or move a file relative to `root`.
    pub async fn rename(&self, server: &str, root: &str, from: &str, to: &str) -> PteroResult<()> {
        let path = server_path(server, "/files/rename")?;
        require("from", from)?;
        require("to", to)?;
        let body = serde_json::json!({
            "root": root_or_slash(root),
            "files": [{ "from": from, "to": to }],
        });
        self.http.put(&path, &body).await?;
        Ok(())
    }

    /// Duplicate a file in place.
    pub async fn copy(&self, server: &str, location: &str) -> PteroResult<()> {
        let path = server_path(server, "/files/copy")?;
        require("location", location)?;
        let body = serde_json::json!({ "location": location });
        self.http.post(&path, &body).await?;
        Ok(())
    }

    /// Overwrite (or create) a file with `contents`.
    pub async fn write(&self, server: &str, file: &str, contents: &str) -> PteroResult<()> {
        let path = server_path(server, "/files/write")?;
        require("file", file)?;
        self.http
            .send(
                reqwest::Method::POST,
                &path,
                &[("file", file)],
                RequestBody::Text(contents),
            )
            .await?;
        Ok(())
    }

    /// Archive `files` under `root`; returns the created archive.
    pub async fn compress(
        &self,
        server: &str,
        root: &str,
        files: &[&str],
    ) -> PteroResult<FileObject> {
        let path = server_path(server, "/files/compress")?;
        require_files(files)?;
        let body = serde_json::json!({ "root": root_or_slash(root), "files": files });
        let resp: Resource<FileObject> = self.http.post_json(&path, &body).await?;
        Ok(resp.attributes)
    }

    /// Extract an archive into `root`.
    pub async fn decompress(&self, server: &str, root: &str, file: &str) -> PteroResult<()> {
        let path = server_path(server, "/files/decompress")?;
        require("file", file)?;
        let body = serde_json::json!({ "root": root_or_slash(root), "file": file });
        self.http.post(&path, &body).await?;
        Ok(())
    }

    /// Delete `files` under `root`.
    pub async fn delete(&self, server: &str, root: &str, files: &[&str]) -> PteroResult<()> {
        let path = server_path(server, "/files/delete")?;
        require_files(files)?;
        let body = serde_json::json!({ "root": root_or_slash(root), "files": files });
        self.http.post(&path, &body).await?;
        Ok(())
    }

    /// Create a directory `name` under `root`.
    pub async fn create_folder(&self, server: &str, root: &str, name: &str) -> PteroResult<()> {
        let path = server_path(server, "/files/create-folder")?;
        require("name", name)?;
        let body = serde_json::json!({ "root": root_or_slash(root), "name": name });
        self.http.post(&path, &body).await?;
        Ok(())
    }
}

fn root_or_slash(root: &str) -> &str {
    if root.trim().is_empty() {
        "/"
    } else {
        root
    }
}

fn require_files(files: &[&str]) -> PteroResult<()> {
    if files.is_empty() {
        return Err(ValidationError::field("files", "at least one file is required").into());
    }
    if files.iter().any(|f| f.trim().is_empty()) {
        return Err(ValidationError::field("files", "file names must not be blank").into());
    }
    Ok(())
}
