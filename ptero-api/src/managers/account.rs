//! Account endpoints under `/api/client/account`.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use ptero_core::constants::CLIENT_API_PREFIX;
use ptero_core::error::{PteroError, PteroResult, ValidationError};

use super::{path_segment, require};
use crate::response::{DataEnvelope, ListResponse, Resource};
use crate::transport::HttpTransport;

/// The authenticated user.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Account {
    pub id: u64,
    pub admin: bool,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub language: String,
}

/// TOTP enrolment data.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TwoFactorSetup {
    /// `otpauth://` URI for QR rendering.
    pub image_url_data: String,
    pub secret: Option<String>,
}

/// A client API key. The secret is only ever returned on creation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiKey {
    pub identifier: String,
    pub description: String,
    pub allowed_ips: Vec<String>,
    pub last_used_at: Option<DateTime<Utc>>,
    pub created_at: Option<DateTime<Utc>>,
}

/// A freshly created API key with its one-time secret.
#[derive(Debug, Clone)]
pub struct CreatedApiKey {
    pub key: ApiKey,
    pub secret_token: String,
}

impl CreatedApiKey {
    /// Full token to use as a bearer key.
    pub fn token(&self) -> String {
        format!("{}{}", self.key.identifier, self.secret_token)
    }
}

/// Account operations for the key's owner.
#[derive(Debug, Clone)]
pub struct AccountManager {
    http: Arc<HttpTransport>,
}

impl AccountManager {
    pub fn new(http: Arc<HttpTransport>) -> Self {
        Self { http }
    }

    fn path(rest: &str) -> String {
        format!("{CLIENT_API_PREFIX}/account{rest}")
    }

    /// Account details.
    pub async fn details(&self) -> PteroResult<Account> {
        let resp: Resource<Account> = self.http.get_json(&Self::path("")).await?;
        Ok(resp.attributes)
    }

    /// Begin two-factor enrolment.
    pub async fn two_factor_qr(&self) -> PteroResult<TwoFactorSetup> {
        let resp: DataEnvelope<TwoFactorSetup> =
            self.http.get_json(&Self::path("/two-factor")).await?;
        Ok(resp.data)
    }

    /// Change the account email. Requires the current password.
    pub async fn update_email(&self, email: &str, password: &str) -> PteroResult<()> {
        require("email", email)?;
        if !email.contains('@') {
            return Err(ValidationError::field("email", "not an email address").into());
        }
        require("password", password)?;
        let body = serde_json::json!({ "email": email.trim(), "password": password });
        self.http.put(&Self::path("/email"), &body).await?;
        Ok(())
    }

    /// Change the account password.
    pub async fn update_password(
        &self,
        current: &str,
        new: &str,
        confirmation: &str,
    ) -> PteroResult<()> {
        require("current_password", current)?;
        require("password", new)?;
        if new != confirmation {
            return Err(
                ValidationError::field("password_confirmation", "does not match password").into(),
            );
        }
        let body = serde_json::json!({
            "current_password": current,
            "password": new,
            "password_confirmation": confirmation,
        });
        self.http.put(&Self::path("/password"), &body).await?;
        Ok(())
    }

    /// List client API keys.
    pub async fn api_keys(&self) -> PteroResult<Vec<ApiKey>> {
        let resp: ListResponse<ApiKey> = self.http.get_json(&Self::path("/api-keys")).await?;
        Ok(resp.into_attributes())
    }

    /// Create a client API key, optionally restricted to `allowed_ips`.
    pub async fn create_api_key(
        &self,
        description: &str,
        allowed_ips: &[&str],
    ) -> PteroResult<CreatedApiKey> {
        require("description", description)?;
        let body = serde_json::json!({
            "description": description.trim(),
            "allowed_ips": allowed_ips,
        });
        let resp: Resource<ApiKey> = self.http.post_json(&Self::path("/api-keys"), &body).await?;
        let secret_token = resp
            .meta
            .as_ref()
            .and_then(|m| m.get("secret_token"))
            .and_then(|v| v.as_str())
            .filter(|token| !token.is_empty())
            .ok_or_else(|| {
                PteroError::Serialization("api key response missing secret_token".into())
            })?
            .to_string();
        Ok(CreatedApiKey {
            key: resp.attributes,
            secret_token,
        })
    }

    /// Revoke a client API key.
    pub async fn delete_api_key(&self, identifier: &str) -> PteroResult<()> {
        let identifier = path_segment("identifier", identifier)?;
        let path = Self::path(&format!("/api-keys/{identifier}"));
        self.http.delete(&path).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_account_deserialize() {
        let json = serde_json::json!({
            "id": 1,
            "admin": true,
            "username": "admin",
            "email": "example@example.com",
            "first_name": "Admin",
            "last_name": "User",
            "language": "en"
        });
        let account: Account = serde_json::from_value(json).unwrap();
        assert!(account.admin);
        assert_eq!(account.username, "admin");
    }

    #[test]
    fn test_created_key_token() {
        let created = CreatedApiKey {
            key: ApiKey {
                identifier: "wwQ5DJ6X1XaFznQS".into(),
                ..ApiKey::default()
            },
            secret_token: "secret".into(),
        };
        assert_eq!(created.token(), "wwQ5DJ6X1XaFznQSsecret");
    }
}
