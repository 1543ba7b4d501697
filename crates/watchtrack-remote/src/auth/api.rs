use crate::error::RemoteError;
use chrono::{DateTime, Duration, Utc};
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use watchtrack_models::{Profile, Session, User};

const SERVICE: &str = "auth";

#[derive(Debug, Deserialize)]
struct RawUser {
    id: String,
    email: Option<String>,
    created_at: DateTime<Utc>,
    #[serde(default)]
    user_metadata: serde_json::Value,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    refresh_token: String,
    expires_in: i64,
    user: RawUser,
}

/// Sign-up response: a session when confirmation is off, a bare user when
/// the provider sent a confirmation email instead.
#[derive(Debug, Deserialize)]
struct SignUpResponse {
    access_token: Option<String>,
    refresh_token: Option<String>,
    expires_in: Option<i64>,
    user: Option<RawUser>,
}

/// The provider reports errors under several different keys depending on
/// the endpoint.
#[derive(Debug, Deserialize, Default)]
struct RawError {
    error_description: Option<String>,
    msg: Option<String>,
    message: Option<String>,
    error: Option<String>,
}

impl RawUser {
    fn into_user(self) -> User {
        User {
            email: self.email.clone().unwrap_or_default(),
            id: self.id,
            created_at: self.created_at,
        }
    }

    fn into_profile(self) -> Profile {
        let metadata = &self.user_metadata;
        let field = |key: &str| {
            metadata
                .get(key)
                .and_then(|v| v.as_str())
                .filter(|s| !s.is_empty())
                .map(|s| s.to_string())
        };
        Profile {
            username: field("username"),
            phone: field("phone"),
            email: self.email.clone().unwrap_or_default(),
            id: self.id,
            created_at: self.created_at,
        }
    }
}

fn session_from_tokens(
    access_token: String,
    refresh_token: String,
    expires_in: i64,
    user: RawUser,
) -> Session {
    Session {
        access_token,
        refresh_token,
        expires_at: Utc::now() + Duration::seconds(expires_in),
        user: user.into_user(),
    }
}

/// Turn a non-success response into the provider's own error message.
async fn provider_error(response: reqwest::Response) -> RemoteError {
    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();
    let raw: RawError = serde_json::from_str(&body).unwrap_or_default();
    let message = raw
        .error_description
        .or(raw.msg)
        .or(raw.message)
        .or(raw.error)
        .unwrap_or(body);
    RemoteError::api(SERVICE, status, message)
}

pub async fn sign_in(
    client: &Client,
    base_url: &str,
    publishable_key: &str,
    email: &str,
    password: &str,
) -> Result<Session, RemoteError> {
    let url = format!("{}/auth/v1/token?grant_type=password", base_url);
    let response = client
        .post(&url)
        .header("apikey", publishable_key)
        .json(&json!({ "email": email, "password": password }))
        .send()
        .await?;

    if !response.status().is_success() {
        return Err(provider_error(response).await);
    }

    let tokens: TokenResponse = response.json().await?;
    Ok(session_from_tokens(
        tokens.access_token,
        tokens.refresh_token,
        tokens.expires_in,
        tokens.user,
    ))
}

pub async fn refresh(
    client: &Client,
    base_url: &str,
    publishable_key: &str,
    refresh_token: &str,
) -> Result<Session, RemoteError> {
    let url = format!("{}/auth/v1/token?grant_type=refresh_token", base_url);
    let response = client
        .post(&url)
        .header("apikey", publishable_key)
        .json(&json!({ "refresh_token": refresh_token }))
        .send()
        .await?;

    if !response.status().is_success() {
        return Err(provider_error(response).await);
    }

    let tokens: TokenResponse = response.json().await?;
    Ok(session_from_tokens(
        tokens.access_token,
        tokens.refresh_token,
        tokens.expires_in,
        tokens.user,
    ))
}

/// Some(session) when the account is immediately usable, None when the
/// provider dispatched a confirmation email first.
pub async fn sign_up(
    client: &Client,
    base_url: &str,
    publishable_key: &str,
    email: &str,
    password: &str,
) -> Result<Option<Session>, RemoteError> {
    let url = format!("{}/auth/v1/signup", base_url);
    let response = client
        .post(&url)
        .header("apikey", publishable_key)
        .json(&json!({ "email": email, "password": password }))
        .send()
        .await?;

    if !response.status().is_success() {
        return Err(provider_error(response).await);
    }

    let body: SignUpResponse = response.json().await?;
    match (body.access_token, body.refresh_token, body.expires_in, body.user) {
        (Some(access), Some(refresh), Some(expires_in), Some(user)) => {
            Ok(Some(session_from_tokens(access, refresh, expires_in, user)))
        }
        // Confirmation-required flow returns the bare user record instead
        _ => Ok(None),
    }
}

pub async fn sign_out(
    client: &Client,
    base_url: &str,
    publishable_key: &str,
    access_token: &str,
) -> Result<(), RemoteError> {
    let url = format!("{}/auth/v1/logout", base_url);
    let response = client
        .post(&url)
        .header("apikey", publishable_key)
        .header("Authorization", format!("Bearer {}", access_token))
        .send()
        .await?;

    if !response.status().is_success() {
        return Err(provider_error(response).await);
    }
    Ok(())
}

pub async fn user(
    client: &Client,
    base_url: &str,
    publishable_key: &str,
    access_token: &str,
) -> Result<Profile, RemoteError> {
    let url = format!("{}/auth/v1/user", base_url);
    let response = client
        .get(&url)
        .header("apikey", publishable_key)
        .header("Authorization", format!("Bearer {}", access_token))
        .send()
        .await?;

    if !response.status().is_success() {
        return Err(provider_error(response).await);
    }

    let raw: RawUser = response.json().await?;
    Ok(raw.into_profile())
}

pub async fn recover(
    client: &Client,
    base_url: &str,
    publishable_key: &str,
    email: &str,
) -> Result<(), RemoteError> {
    let url = format!("{}/auth/v1/recover", base_url);
    let response = client
        .post(&url)
        .header("apikey", publishable_key)
        .json(&json!({ "email": email }))
        .send()
        .await?;

    if !response.status().is_success() {
        return Err(provider_error(response).await);
    }
    Ok(())
}

pub async fn update_metadata(
    client: &Client,
    base_url: &str,
    publishable_key: &str,
    access_token: &str,
    username: Option<&str>,
    phone: Option<&str>,
) -> Result<Profile, RemoteError> {
    let mut data = serde_json::Map::new();
    if let Some(username) = username {
        data.insert("username".to_string(), json!(username));
    }
    if let Some(phone) = phone {
        data.insert("phone".to_string(), json!(phone));
    }

    let url = format!("{}/auth/v1/user", base_url);
    let response = client
        .put(&url)
        .header("apikey", publishable_key)
        .header("Authorization", format!("Bearer {}", access_token))
        .json(&json!({ "data": data }))
        .send()
        .await?;

    if !response.status().is_success() {
        return Err(provider_error(response).await);
    }

    let raw: RawUser = response.json().await?;
    Ok(raw.into_profile())
}
