use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;
use toml;

#[derive(Debug, Serialize, Deserialize, Default)]
struct CredentialsData {
    #[serde(flatten)]
    data: HashMap<String, String>,
}

/// Flat key-value TOML file holding the persisted session. Lives next to
/// config.toml so `clear` can remove it in one shot.
pub struct CredentialStore {
    path: PathBuf,
    credentials: HashMap<String, String>,
}

const SESSION_KEYS: [&str; 6] = [
    "access_token",
    "refresh_token",
    "token_expires",
    "user_id",
    "user_email",
    "user_created",
];

impl CredentialStore {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            credentials: HashMap::new(),
        }
    }

    pub fn load(&mut self) -> Result<()> {
        if self.path.exists() {
            let content = std::fs::read_to_string(&self.path)?;
            let creds_data: CredentialsData = toml::from_str(&content)?;
            self.credentials = creds_data.data;
        }
        Ok(())
    }

    pub fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let creds_data = CredentialsData {
            data: self.credentials.clone(),
        };
        let content = toml::to_string_pretty(&creds_data)?;
        std::fs::write(&self.path, content)?;
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<&String> {
        self.credentials.get(key)
    }

    pub fn set(&mut self, key: String, value: String) {
        self.credentials.insert(key, value);
    }

    pub fn remove(&mut self, key: &str) {
        self.credentials.remove(key);
    }

    // Session accessors
    pub fn get_access_token(&self) -> Option<&String> {
        self.get("access_token")
    }

    pub fn set_access_token(&mut self, token: String) {
        self.set("access_token".to_string(), token);
    }

    pub fn get_refresh_token(&self) -> Option<&String> {
        self.get("refresh_token")
    }

    pub fn set_refresh_token(&mut self, token: String) {
        self.set("refresh_token".to_string(), token);
    }

    pub fn get_token_expires(&self) -> Option<DateTime<Utc>> {
        self.get("token_expires")
            .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
            .map(|dt| dt.with_timezone(&Utc))
    }

    pub fn set_token_expires(&mut self, expires: DateTime<Utc>) {
        self.set("token_expires".to_string(), expires.to_rfc3339());
    }

    pub fn get_user_id(&self) -> Option<&String> {
        self.get("user_id")
    }

    pub fn set_user_id(&mut self, id: String) {
        self.set("user_id".to_string(), id);
    }

    pub fn get_user_email(&self) -> Option<&String> {
        self.get("user_email")
    }

    pub fn set_user_email(&mut self, email: String) {
        self.set("user_email".to_string(), email);
    }

    pub fn get_user_created(&self) -> Option<DateTime<Utc>> {
        self.get("user_created")
            .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
            .map(|dt| dt.with_timezone(&Utc))
    }

    pub fn set_user_created(&mut self, created: DateTime<Utc>) {
        self.set("user_created".to_string(), created.to_rfc3339());
    }

    /// Drop every session key. Used on sign-out.
    pub fn clear_session(&mut self) {
        for key in SESSION_KEYS {
            self.credentials.remove(key);
        }
    }

    pub fn has_session(&self) -> bool {
        self.get_access_token().is_some() && self.get_refresh_token().is_some()
    }
}
