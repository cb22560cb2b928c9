use std::sync::Arc;

use chrono::Duration;
use identity_service::config::Config;
use identity_service::config::StorageBackend;
use identity_service::domain::user::ports::AuthenticationServicePort;
use identity_service::domain::user::ports::UserRepository;
use identity_service::domain::user::service::AuthenticationService;
use identity_service::inbound::http::router::create_router;
use identity_service::outbound::repositories::InMemoryUserRepository;
use identity_service::outbound::repositories::PostgresUserRepository;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "identity_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "identity-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        http_port = config.server.http_port,
        storage = ?config.storage.backend,
        token_lifetime_hours = config.jwt.expiration_hours,
        "Configuration loaded"
    );

    let password_hasher = Arc::new(auth::PasswordHasher::with_params(
        config.password.memory_kib,
        config.password.iterations,
        config.password.parallelism,
    )?);
    let token_service = Arc::new(auth::TokenService::new(
        config.jwt.secret.as_bytes(),
        Duration::hours(config.jwt.expiration_hours),
    ));

    let auth_service: Arc<dyn AuthenticationServicePort> = match config.storage.backend {
        StorageBackend::Postgres => {
            let pg_pool = PgPoolOptions::new()
                .max_connections(config.database.max_connections)
                .connect(&config.database.url)
                .await?;
            tracing::info!(
                max_connections = config.database.max_connections,
                database = "postgresql",
                "Database connection pool created"
            );

            sqlx::migrate!("./migrations").run(&pg_pool).await?;
            tracing::info!(database = "postgresql", "Database migrations completed");

            compose(
                Arc::new(PostgresUserRepository::new(pg_pool)),
                Arc::clone(&password_hasher),
                Arc::clone(&token_service),
            )
        }
        StorageBackend::Memory => {
            tracing::warn!("Using in-memory user store; registrations are lost on restart");
            compose(
                Arc::new(InMemoryUserRepository::new()),
                Arc::clone(&password_hasher),
                Arc::clone(&token_service),
            )
        }
    };

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let http_application = create_router(auth_service, token_service);
    if let Err(e) = axum::serve(http_listener, http_application).await {
        tracing::error!(error = %e, "Server error");
        return Err(e.into());
    }

    tracing::info!("Server exited successfully");
    Ok(())
}

fn compose<UR: UserRepository>(
    repository: Arc<UR>,
    password_hasher: Arc<auth::PasswordHasher>,
    token_service: Arc<auth::TokenService>,
) -> Arc<dyn AuthenticationServicePort> {
    Arc::new(AuthenticationService::new(
        repository,
        password_hasher,
        token_service,
    ))
}
