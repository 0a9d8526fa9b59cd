//! Bearer token type.

use std::fmt;

/// An opaque credential attached to authorized requests.
///
/// The backend issues it from `/api/auth/login` and expects it back as
/// `Authorization: Bearer <token>`.
///
/// # Security
///
/// - Never logged or displayed in Debug output
/// - Treat as opaque; do not parse or inspect
#[derive(Clone, PartialEq, Eq)]
pub struct BearerToken(String);

impl BearerToken {
    /// Wrap a token string.
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Returns the raw token.
    ///
    /// # Security
    ///
    /// Use only when building the authorization header or persisting the
    /// session.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the value of the `Authorization` header for this token.
    pub fn header_value(&self) -> String {
        format!("Bearer {}", self.0)
    }
}

// Hide token value in Debug output
impl fmt::Debug for BearerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("BearerToken").field(&"[REDACTED]").finish()
    }
}
