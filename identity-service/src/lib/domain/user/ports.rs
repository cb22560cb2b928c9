use async_trait::async_trait;

use crate::domain::user::models::AccessToken;
use crate::domain::user::models::AuthenticateCommand;
use crate::domain::user::models::AuthenticationResult;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::RegisterCommand;
use crate::domain::user::models::TokenIdentity;
use crate::domain::user::models::User;
use crate::user::errors::AuthenticationError;
use crate::user::errors::PasswordError;
use crate::user::errors::TokenError;

/// Port for the two user-facing authentication operations.
#[async_trait]
pub trait AuthenticationServicePort: Send + Sync + 'static {
    /// Register a new user and issue a token for them.
    ///
    /// # Arguments
    /// * `command` - Validated names, email and plaintext password
    ///
    /// # Returns
    /// Token for the newly registered identity
    ///
    /// # Errors
    /// * `DuplicateIdentity` - Email is already registered
    /// * `Password` - Hashing failed
    /// * `Token` - Token issuance failed
    /// * `DatabaseError` - Store operation failed
    async fn register(
        &self,
        command: RegisterCommand,
    ) -> Result<AuthenticationResult, AuthenticationError>;

    /// Verify credentials and issue a token.
    ///
    /// # Arguments
    /// * `command` - Submitted email and plaintext password
    ///
    /// # Returns
    /// Token for the authenticated identity
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown email, malformed email, or wrong password
    /// * `Password` - Stored hash could not be verified
    /// * `Token` - Token issuance failed
    /// * `DatabaseError` - Store operation failed
    async fn authenticate(
        &self,
        command: AuthenticateCommand,
    ) -> Result<AuthenticationResult, AuthenticationError>;
}

/// Persistence operations for user records (the credential store).
#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    /// Persist a new user.
    ///
    /// Must be atomic with respect to the email: of two concurrent creates
    /// for one email, exactly one succeeds.
    ///
    /// # Returns
    /// Stored user entity
    ///
    /// # Errors
    /// * `DuplicateIdentity` - Email is already registered
    /// * `DatabaseError` - Store operation failed
    async fn create(&self, user: User) -> Result<User, AuthenticationError>;

    /// Retrieve a user by email address.
    ///
    /// # Returns
    /// Optional user entity (None if not found)
    ///
    /// # Errors
    /// * `DatabaseError` - Store operation failed
    async fn find_by_email(&self, email: &EmailAddress)
        -> Result<Option<User>, AuthenticationError>;
}

/// One-way hashing of credential secrets.
pub trait PasswordHasher: Send + Sync + 'static {
    /// Hash a plaintext password into a self-describing string.
    fn hash(&self, password: &str) -> Result<String, PasswordError>;

    /// Check a plaintext password against a stored hash.
    fn verify(&self, password: &str, hash: &str) -> Result<bool, PasswordError>;
}

/// Token issuance and validation.
pub trait TokenService: Send + Sync + 'static {
    /// Issue a signed, expiring token for `user`.
    ///
    /// # Errors
    /// * `MissingSubject` - User has no identifier
    /// * `IssuanceFailed` - Signing failed
    fn issue(&self, user: &User) -> Result<AccessToken, TokenError>;

    /// Validate a token and return the identity it asserts.
    ///
    /// # Errors
    /// * `InvalidSignature` - Signature does not verify under the current key
    /// * `Expired` - Token is past its expiry
    /// * `Malformed` - Token structure or claims are unusable
    fn validate(&self, token: &str) -> Result<TokenIdentity, TokenError>;
}
