use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;

use super::claims::Claims;
use super::errors::JwtError;
use super::handler::JwtHandler;

/// Issues and validates time-bounded access tokens.
///
/// The signing key and the token lifetime are fixed at construction and
/// only read afterwards, so a single instance can be shared across tasks.
pub struct TokenService {
    handler: JwtHandler,
    lifetime: Duration,
}

/// A freshly signed token with its validity window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedToken {
    pub token: String,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

/// Identity recovered from a valid token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenIdentity {
    pub subject: String,
    pub role: Option<String>,
    pub expires_at: DateTime<Utc>,
}

impl TokenService {
    pub const DEFAULT_LIFETIME_HOURS: i64 = 24;

    /// Create a token service signing with `secret`.
    ///
    /// # Arguments
    /// * `secret` - HS256 signing key
    /// * `lifetime` - Validity window applied to every issued token
    pub fn new(secret: &[u8], lifetime: Duration) -> Self {
        Self {
            handler: JwtHandler::new(secret),
            lifetime,
        }
    }

    /// Issue a token for `subject` valid from now.
    ///
    /// # Errors
    /// * `MissingSubject` - Subject is empty
    /// * `EncodingFailed` - Signing failed
    pub fn issue(&self, subject: &str, role: &str) -> Result<IssuedToken, JwtError> {
        self.issue_at(subject, role, Utc::now())
    }

    /// Issue a token for `subject` as if the current time were `now`.
    ///
    /// The expiry is truncated to whole seconds, matching the signed `exp` claim.
    pub fn issue_at(
        &self,
        subject: &str,
        role: &str,
        now: DateTime<Utc>,
    ) -> Result<IssuedToken, JwtError> {
        if subject.is_empty() {
            return Err(JwtError::MissingSubject);
        }

        let expires_at = now
            .checked_add_signed(self.lifetime)
            .and_then(|expiry| DateTime::from_timestamp(expiry.timestamp(), 0))
            .ok_or_else(|| JwtError::EncodingFailed("token lifetime out of range".to_string()))?;

        let claims = Claims::for_subject(subject, role, now, expires_at);
        let token = self.handler.encode(&claims)?;

        Ok(IssuedToken {
            token,
            issued_at: now,
            expires_at,
        })
    }

    /// Validate a token against the current time.
    ///
    /// # Errors
    /// * `InvalidSignature` - Signature does not verify under the current key
    /// * `Expired` - Current time is at or past the token's expiry
    /// * `Malformed` - Token structure or required claims are missing
    pub fn validate(&self, token: &str) -> Result<TokenIdentity, JwtError> {
        self.validate_at(token, Utc::now())
    }

    /// Validate a token as if the current time were `now`.
    pub fn validate_at(&self, token: &str, now: DateTime<Utc>) -> Result<TokenIdentity, JwtError> {
        let claims: Claims = self.handler.decode(token)?;

        let subject = claims
            .subject()
            .ok_or_else(|| JwtError::Malformed("missing subject claim".to_string()))?
            .to_string();
        let exp = claims
            .exp
            .ok_or_else(|| JwtError::Malformed("missing expiry claim".to_string()))?;
        let expires_at = DateTime::from_timestamp(exp, 0)
            .ok_or_else(|| JwtError::Malformed("expiry out of range".to_string()))?;

        if claims.is_expired(now.timestamp()) {
            return Err(JwtError::Expired);
        }

        Ok(TokenIdentity {
            subject,
            role: claims.role,
            expires_at,
        })
    }
}
