use std::fmt;
use std::str::FromStr;

use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

use crate::user::errors::AuthenticationError;
use crate::user::errors::EmailError;
use crate::user::errors::NameError;
use crate::user::errors::RoleError;

/// User aggregate entity.
///
/// The email is the natural key; `id` is persistence metadata. Once built,
/// `password_hash` only ever holds a hash.
#[derive(Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub first_name: PersonName,
    pub last_name: PersonName,
    pub email: EmailAddress,
    pub password_hash: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

impl fmt::Debug for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("email", &self.email)
            .field("password_hash", &"<redacted>")
            .field("role", &self.role)
            .field("created_at", &self.created_at)
            .finish()
    }
}

/// User unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UserId(pub Uuid);

impl UserId {
    /// Generate a new random user ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Email address type
///
/// Validated with an RFC 5322 parser. Stored exactly as given: comparison
/// is case-sensitive.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Create a new validated email address.
    ///
    /// # Errors
    /// * `Empty` - Input is empty
    /// * `InvalidFormat` - Email does not conform to RFC 5322
    pub fn new(email: String) -> Result<Self, EmailError> {
        if email.is_empty() {
            return Err(EmailError::Empty);
        }
        email_address::EmailAddress::from_str(&email)
            .map(|_| EmailAddress(email))
            .map_err(|e| EmailError::InvalidFormat(e.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// First or last name.
///
/// Surrounding whitespace is trimmed; the result must be non-empty and at
/// most 100 characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonName(String);

impl PersonName {
    const MAX_LENGTH: usize = 100;

    pub fn new(name: String) -> Result<Self, NameError> {
        let trimmed = name.trim();
        let length = trimmed.chars().count();
        if length == 0 {
            Err(NameError::Empty)
        } else if length > Self::MAX_LENGTH {
            Err(NameError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            })
        } else {
            Ok(Self(trimmed.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Role granted to a user and embedded in issued tokens.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Role {
    #[default]
    User,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "USER",
            Role::Admin => "ADMIN",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = RoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "USER" => Ok(Role::User),
            "ADMIN" => Ok(Role::Admin),
            other => Err(RoleError::Unknown(other.to_string())),
        }
    }
}

/// Plaintext password as submitted by a caller.
///
/// Never printed: `Debug` is redacted and there is no `Display`.
#[derive(Clone, PartialEq, Eq)]
pub struct PlaintextPassword(String);

impl PlaintextPassword {
    /// # Errors
    /// * `InvalidPassword` - Password is empty
    pub fn new(password: String) -> Result<Self, AuthenticationError> {
        if password.is_empty() {
            return Err(AuthenticationError::InvalidPassword);
        }
        Ok(Self(password))
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for PlaintextPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PlaintextPassword(<redacted>)")
    }
}

/// Signed access token handed back to callers.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccessToken")
            .field("token", &"<redacted>")
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

/// Identity recovered from a validated token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenIdentity {
    pub subject: String,
    pub role: Role,
}

/// Outcome of a successful register or authenticate: exactly one token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticationResult {
    pub token: AccessToken,
}

/// Command to register a new user with validated fields
#[derive(Debug)]
pub struct RegisterCommand {
    pub first_name: PersonName,
    pub last_name: PersonName,
    pub email: EmailAddress,
    pub password: PlaintextPassword,
}

impl RegisterCommand {
    pub fn new(
        first_name: PersonName,
        last_name: PersonName,
        email: EmailAddress,
        password: PlaintextPassword,
    ) -> Self {
        Self {
            first_name,
            last_name,
            email,
            password,
        }
    }

    /// Validate raw request fields into a command.
    ///
    /// # Errors
    /// * `InvalidName` - First or last name is empty or too long
    /// * `InvalidEmail` - Email is empty or malformed
    /// * `InvalidPassword` - Password is empty
    pub fn parse(
        first_name: String,
        last_name: String,
        email: String,
        password: String,
    ) -> Result<Self, AuthenticationError> {
        Ok(Self::new(
            PersonName::new(first_name)?,
            PersonName::new(last_name)?,
            EmailAddress::new(email)?,
            PlaintextPassword::new(password)?,
        ))
    }
}

/// Command to authenticate with submitted credentials.
///
/// Fields stay raw: a malformed email must fail the same way as an unknown one.
#[derive(Debug)]
pub struct AuthenticateCommand {
    pub email: String,
    pub password: PlaintextPassword,
}

impl AuthenticateCommand {
    pub fn new(email: String, password: String) -> Result<Self, AuthenticationError> {
        // An empty password can never match a stored hash.
        let password =
            PlaintextPassword::new(password).map_err(|_| AuthenticationError::InvalidCredentials)?;
        Ok(Self { email, password })
    }
}
