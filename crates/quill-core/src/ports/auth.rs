//! Authentication and authorization ports.

use uuid::Uuid;

use crate::domain::User;

/// Claims carried by an issued token.
#[derive(Debug, Clone)]
pub struct TokenClaims {
    pub user_id: Uuid,
    pub username: String,
    pub is_staff: bool,
    pub exp: i64,
}

/// Token service trait - issuance and verification of session tokens.
///
/// The same tokens back both surfaces: the API sends them as Bearer
/// headers, the page flow stores them in a session cookie.
pub trait TokenService: Send + Sync {
    /// Issue a token for a user. Staff-ness is embedded in the claims.
    fn issue(&self, user: &User) -> Result<String, AuthError>;

    /// Verify and decode a token.
    fn verify(&self, token: &str) -> Result<TokenClaims, AuthError>;

    /// Lifetime of issued tokens, in seconds.
    fn expiration_seconds(&self) -> i64;
}

/// Password hashing service.
pub trait PasswordService: Send + Sync {
    /// Hash a plain text password.
    fn hash(&self, password: &str) -> Result<String, AuthError>;

    /// Verify a password against a hash.
    fn verify(&self, password: &str, hash: &str) -> Result<bool, AuthError>;
}

/// Authentication errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token: {0}")]
    InvalidToken(String),

    #[error("Missing credentials")]
    MissingAuth,

    #[error("Insufficient permissions")]
    InsufficientPermissions,

    #[error("Hashing error: {0}")]
    HashingError(String),
}
