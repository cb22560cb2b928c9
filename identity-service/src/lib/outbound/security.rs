//! Adapters binding the `auth` crate's primitives to the domain ports.

use crate::domain::user::models::AccessToken;
use crate::domain::user::models::Role;
use crate::domain::user::models::TokenIdentity;
use crate::domain::user::models::User;
use crate::user::errors::PasswordError;
use crate::user::errors::TokenError;
use crate::user::ports::PasswordHasher;
use crate::user::ports::TokenService;

impl PasswordHasher for auth::PasswordHasher {
    fn hash(&self, password: &str) -> Result<String, PasswordError> {
        auth::PasswordHasher::hash(self, password).map_err(PasswordError::from)
    }

    fn verify(&self, password: &str, hash: &str) -> Result<bool, PasswordError> {
        auth::PasswordHasher::verify(self, password, hash).map_err(PasswordError::from)
    }
}

impl From<auth::PasswordError> for PasswordError {
    fn from(err: auth::PasswordError) -> Self {
        match err {
            auth::PasswordError::HashingFailed(msg)
            | auth::PasswordError::InvalidParameters(msg) => PasswordError::HashingFailed(msg),
            auth::PasswordError::VerificationFailed(msg) => PasswordError::VerificationFailed(msg),
        }
    }
}

impl TokenService for auth::TokenService {
    fn issue(&self, user: &User) -> Result<AccessToken, TokenError> {
        let issued = auth::TokenService::issue(self, user.email.as_str(), user.role.as_str())?;

        Ok(AccessToken {
            token: issued.token,
            expires_at: issued.expires_at,
        })
    }

    fn validate(&self, token: &str) -> Result<TokenIdentity, TokenError> {
        let identity = auth::TokenService::validate(self, token)?;

        let role = identity
            .role
            .as_deref()
            .ok_or(TokenError::Malformed)?
            .parse::<Role>()
            .map_err(|_| TokenError::Malformed)?;

        Ok(TokenIdentity {
            subject: identity.subject,
            role,
        })
    }
}

impl From<auth::JwtError> for TokenError {
    fn from(err: auth::JwtError) -> Self {
        match err {
            auth::JwtError::InvalidSignature => TokenError::InvalidSignature,
            auth::JwtError::Expired => TokenError::Expired,
            auth::JwtError::Malformed(_) => TokenError::Malformed,
            auth::JwtError::MissingSubject => TokenError::MissingSubject,
            auth::JwtError::EncodingFailed(msg) => TokenError::IssuanceFailed(msg),
        }
    }
}
