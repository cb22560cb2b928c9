use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// Claim set carried by access tokens.
///
/// Every field is optional on the wire so that a token missing a claim
/// decodes successfully and can be rejected as malformed afterwards,
/// instead of failing inside the deserializer.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Subject (the user's identifier)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,

    /// Expiration time (Unix timestamp, seconds)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,

    /// Issued at (Unix timestamp, seconds)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,

    /// Role granted to the subject
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

impl Claims {
    /// Create new empty claims.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create claims for a subject valid from `issued_at` until `expires_at`.
    ///
    /// # Arguments
    /// * `subject` - User identifier
    /// * `role` - Role name embedded in the token
    /// * `issued_at` - Issuance instant
    /// * `expires_at` - First instant at which the token is no longer valid
    ///
    /// # Returns
    /// Claims with sub, role, iat and exp set (whole seconds)
    pub fn for_subject(
        subject: impl ToString,
        role: impl ToString,
        issued_at: DateTime<Utc>,
        expires_at: DateTime<Utc>,
    ) -> Self {
        Self {
            sub: Some(subject.to_string()),
            exp: Some(expires_at.timestamp()),
            iat: Some(issued_at.timestamp()),
            role: Some(role.to_string()),
        }
    }

    /// Set subject.
    pub fn with_subject(mut self, sub: impl ToString) -> Self {
        self.sub = Some(sub.to_string());
        self
    }

    /// Set expiration (Unix timestamp).
    pub fn with_expiration(mut self, exp: i64) -> Self {
        self.exp = Some(exp);
        self
    }

    /// Subject, if present and non-empty.
    pub fn subject(&self) -> Option<&str> {
        self.sub.as_deref().filter(|s| !s.is_empty())
    }

    /// Check if the token is expired at `current_timestamp`.
    ///
    /// A token stops being valid at its expiry instant, so `exp == now` is expired.
    /// Claims without `exp` are reported as expired.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        self.exp.map_or(true, |exp| current_timestamp >= exp)
    }
}
