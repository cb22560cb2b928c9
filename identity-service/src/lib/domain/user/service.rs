use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::OnceCell;

use crate::domain::user::models::AuthenticateCommand;
use crate::domain::user::models::AuthenticationResult;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::PlaintextPassword;
use crate::domain::user::models::RegisterCommand;
use crate::domain::user::models::Role;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::user::errors::AuthenticationError;
use crate::user::ports::AuthenticationServicePort;
use crate::user::ports::PasswordHasher;
use crate::user::ports::TokenService;
use crate::user::ports::UserRepository;

const DECOY_PASSWORD: &str = "decoy-password-for-unknown-identities";

/// Domain service implementing registration and login.
///
/// Composed explicitly from a credential store, a password hasher and a
/// token service. Holds no mutable state of its own besides a decoy hash
/// that is computed once and then only read.
pub struct AuthenticationService<UR, PH, TS>
where
    UR: UserRepository,
    PH: PasswordHasher,
    TS: TokenService,
{
    repository: Arc<UR>,
    password_hasher: Arc<PH>,
    token_service: Arc<TS>,
    decoy_hash: OnceCell<String>,
}

impl<UR, PH, TS> AuthenticationService<UR, PH, TS>
where
    UR: UserRepository,
    PH: PasswordHasher,
    TS: TokenService,
{
    /// Create a new authentication service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - Credential store
    /// * `password_hasher` - Hashing capability for credential secrets
    /// * `token_service` - Token issuer
    pub fn new(repository: Arc<UR>, password_hasher: Arc<PH>, token_service: Arc<TS>) -> Self {
        // Computed eagerly; a failure here is retried on first use.
        let decoy_hash = match password_hasher.hash(DECOY_PASSWORD) {
            Ok(hash) => OnceCell::new_with(Some(hash)),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to prepare decoy hash at startup");
                OnceCell::new()
            }
        };

        Self {
            repository,
            password_hasher,
            token_service,
            decoy_hash,
        }
    }

    /// Spend one hash verification on a request whose identity was not found,
    /// so that it costs the same as a wrong-password attempt.
    async fn verify_against_decoy(&self, password: &PlaintextPassword) {
        let decoy = self
            .decoy_hash
            .get_or_try_init(|| async { self.password_hasher.hash(DECOY_PASSWORD) })
            .await;

        match decoy {
            Ok(hash) => {
                let _ = self.password_hasher.verify(password.expose(), hash);
            }
            Err(e) => tracing::warn!(error = %e, "Failed to prepare decoy hash"),
        }
    }
}

#[async_trait]
impl<UR, PH, TS> AuthenticationServicePort for AuthenticationService<UR, PH, TS>
where
    UR: UserRepository,
    PH: PasswordHasher,
    TS: TokenService,
{
    async fn register(
        &self,
        command: RegisterCommand,
    ) -> Result<AuthenticationResult, AuthenticationError> {
        // Cheap early rejection; the store's atomic insert remains the authority.
        if self
            .repository
            .find_by_email(&command.email)
            .await?
            .is_some()
        {
            return Err(AuthenticationError::DuplicateIdentity(
                command.email.to_string(),
            ));
        }

        let password_hash = self.password_hasher.hash(command.password.expose())?;

        let user = User {
            id: UserId::new(),
            first_name: command.first_name,
            last_name: command.last_name,
            email: command.email,
            password_hash,
            role: Role::default(),
            created_at: Utc::now(),
        };

        let created_user = self.repository.create(user).await?;
        tracing::info!(
            user_id = %created_user.id,
            email = %created_user.email,
            role = %created_user.role,
            "User registered"
        );

        let token = self.token_service.issue(&created_user)?;

        Ok(AuthenticationResult { token })
    }

    async fn authenticate(
        &self,
        command: AuthenticateCommand,
    ) -> Result<AuthenticationResult, AuthenticationError> {
        let user = match EmailAddress::new(command.email) {
            Ok(email) => self.repository.find_by_email(&email).await?,
            Err(_) => None,
        };

        let Some(user) = user else {
            self.verify_against_decoy(&command.password).await;
            tracing::debug!("Authentication rejected");
            return Err(AuthenticationError::InvalidCredentials);
        };

        if !self
            .password_hasher
            .verify(command.password.expose(), &user.password_hash)?
        {
            tracing::debug!("Authentication rejected");
            return Err(AuthenticationError::InvalidCredentials);
        }

        let token = self.token_service.issue(&user)?;
        tracing::info!(user_id = %user.id, "User authenticated");

        Ok(AuthenticationResult { token })
    }
}
