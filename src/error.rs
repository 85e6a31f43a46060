//! Error Types
//!
//! `ApiError` comes from the remote-call layer. `AuthError` and `FlowError`
//! are what the views show; their `Display` text is the user-facing notice.

/// Remote-call failures
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("server returned status {0}")]
    Status(u16),
    /// 401/403: the access token was rejected
    #[error("unauthorized")]
    Unauthorized,
    #[error("invalid response body: {0}")]
    Decode(String),
}

pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    /// Map a non-success HTTP status
    pub fn from_status(status: u16) -> Self {
        match status {
            401 | 403 => ApiError::Unauthorized,
            other => ApiError::Status(other),
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized)
    }
}

/// Login flow failures
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error("Username and password are required")]
    MissingCredentials,
    /// Any rejected exchange; the server's detail is never shown
    #[error("Invalid credentials")]
    InvalidCredentials,
    #[error("Sign-in already in progress")]
    InProgress,
}

/// Project board failures
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum FlowError {
    #[error("Project name is required")]
    MissingName,
    #[error("Please wait for the current request to finish")]
    Busy,
    #[error("Error saving project")]
    Save,
    #[error("Error deleting project")]
    Delete,
    #[error("No project selected for deletion")]
    NothingPending,
    #[error("Your session has expired, please sign in again")]
    SessionExpired,
}
