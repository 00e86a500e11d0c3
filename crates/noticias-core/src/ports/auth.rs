//! Session ports.
//!
//! Sign-in happens at an external provider; this service only issues and
//! validates the session tokens that identify a signed-in requester.

/// Claims carried by a session token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionClaims {
    /// Provider-side subject (usually the account e-mail).
    pub subject: String,
    pub name: Option<String>,
    pub exp: i64,
}

/// Token service trait for session tokens.
pub trait TokenService: Send + Sync {
    /// Issue a session token for a subject.
    fn issue(&self, subject: &str, name: Option<&str>) -> Result<String, AuthError>;

    /// Validate and decode a token.
    fn validate(&self, token: &str) -> Result<SessionClaims, AuthError>;
}

/// Authentication errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token: {0}")]
    InvalidToken(String),

    #[error("Missing session")]
    MissingSession,
}
