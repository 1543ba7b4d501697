use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Provider-issued identity, mirrored into shared state at login and
/// cleared at logout.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct User {
    pub id: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

/// An authenticated session against the backend.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Session {
    pub access_token: String,
    pub refresh_token: String,
    pub expires_at: DateTime<Utc>,
    pub user: User,
}

impl Session {
    /// True when the access token expires within `margin` from now.
    pub fn expires_within(&self, margin: Duration) -> bool {
        self.expires_at <= Utc::now() + margin
    }
}

/// The auth profile shown on the profile view. Username and phone live in
/// the provider's user metadata, not in the row store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Profile {
    pub id: String,
    pub email: String,
    pub username: Option<String>,
    pub phone: Option<String>,
    pub created_at: DateTime<Utc>,
}
