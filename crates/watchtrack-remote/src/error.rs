use thiserror::Error;

/// Failure of a remote call. Catalog and store clients swallow these after
/// logging; auth surfaces them so the view layer can show the provider's
/// message inline.
#[derive(Debug, Error)]
pub enum RemoteError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{service} returned {status}: {message}")]
    Api {
        service: &'static str,
        status: u16,
        message: String,
    },

    #[error("not signed in")]
    NotSignedIn,
}

impl RemoteError {
    pub fn api(service: &'static str, status: u16, message: impl Into<String>) -> Self {
        RemoteError::Api {
            service,
            status,
            message: message.into(),
        }
    }
}
