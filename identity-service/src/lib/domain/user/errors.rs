use thiserror::Error;

/// Error for EmailAddress validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EmailError {
    #[error("Email address is empty")]
    Empty,

    #[error("Invalid email format: {0}")]
    InvalidFormat(String),
}

/// Error for first/last name validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum NameError {
    #[error("Name is empty")]
    Empty,

    #[error("Name too long: maximum {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },
}

/// Error for role parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RoleError {
    #[error("Unknown role: {0}")]
    Unknown(String),
}

/// Error for password hashing operations
#[derive(Debug, Clone, Error)]
pub enum PasswordError {
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    #[error("Password verification failed: {0}")]
    VerificationFailed(String),
}

/// Error for token issuance and validation
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("Token signature is invalid")]
    InvalidSignature,

    #[error("Token is expired")]
    Expired,

    #[error("Token is malformed")]
    Malformed,

    #[error("Token subject is missing")]
    MissingSubject,

    #[error("Token issuance failed: {0}")]
    IssuanceFailed(String),
}

/// Top-level error for register and authenticate.
#[derive(Debug, Clone, Error)]
pub enum AuthenticationError {
    // Boundary validation errors
    #[error("Invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    #[error("Invalid name: {0}")]
    InvalidName(#[from] NameError),

    #[error("Password must not be empty")]
    InvalidPassword,

    // Domain-level errors
    #[error("Email already registered: {0}")]
    DuplicateIdentity(String),

    #[error("Invalid credentials")]
    InvalidCredentials,

    // Infrastructure errors
    #[error("Password error: {0}")]
    Password(#[from] PasswordError),

    #[error("Token error: {0}")]
    Token(#[from] TokenError),

    #[error("Database error: {0}")]
    DatabaseError(String),
}

impl AuthenticationError {
    /// Whether the failure originated in a collaborator (store, hasher,
    /// signer) rather than in the request itself.
    ///
    /// Only these are candidates for a caller-side retry.
    pub fn is_infrastructure(&self) -> bool {
        matches!(
            self,
            AuthenticationError::Password(_)
                | AuthenticationError::Token(_)
                | AuthenticationError::DatabaseError(_)
        )
    }
}

impl From<RoleError> for AuthenticationError {
    fn from(err: RoleError) -> Self {
        AuthenticationError::DatabaseError(format!("Corrupt user record: {}", err))
    }
}
