//! Authentication primitives shared by services.
//!
//! Provides:
//! - Password hashing (Argon2id, configurable cost)
//! - JWT encoding and signature checking
//! - A token service issuing and validating expiring access tokens
//!
//! Services define their own ports and adapt these implementations, so no
//! domain types leak into this crate.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash).unwrap());
//! ```
//!
//! ## Access Tokens
//! ```
//! use auth::TokenService;
//! use chrono::Duration;
//!
//! let tokens = TokenService::new(b"secret_key_at_least_32_bytes_long!", Duration::hours(24));
//! let issued = tokens.issue("ana@x.com", "USER").unwrap();
//! let identity = tokens.validate(&issued.token).unwrap();
//! assert_eq!(identity.subject, "ana@x.com");
//! ```

pub mod jwt;
pub mod password;

pub use jwt::Claims;
pub use jwt::IssuedToken;
pub use jwt::JwtError;
pub use jwt::JwtHandler;
pub use jwt::TokenIdentity;
pub use jwt::TokenService;
pub use password::PasswordError;
pub use password::PasswordHasher;
