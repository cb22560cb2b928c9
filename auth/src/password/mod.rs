//! Argon2id password hashing with tunable cost.

mod argon2;
mod errors;

pub use self::argon2::PasswordHasher;
pub use errors::PasswordError;
