use std::sync::Arc;

use chrono::Duration;
use identity_service::domain::user::service::AuthenticationService;
use identity_service::inbound::http::router::create_router;
use identity_service::outbound::repositories::InMemoryUserRepository;

pub const JWT_SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";

/// Test application that spawns a real server over an in-memory store
pub struct TestApp {
    pub address: String,
    pub repository: InMemoryUserRepository,
    pub token_service: Arc<auth::TokenService>,
    pub api_client: reqwest::Client,
}

impl TestApp {
    /// Spawn the application in a background task and return TestApp
    pub async fn spawn() -> Self {
        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let repository = InMemoryUserRepository::new();
        // Minimal Argon2 cost keeps the suite fast.
        let password_hasher = Arc::new(
            auth::PasswordHasher::with_params(1024, 1, 1).expect("Invalid hashing parameters"),
        );
        let token_service = Arc::new(auth::TokenService::new(JWT_SECRET, Duration::hours(24)));

        let auth_service = Arc::new(AuthenticationService::new(
            Arc::new(repository.clone()),
            password_hasher,
            Arc::clone(&token_service),
        ));

        let router = create_router(auth_service, token_service.clone());

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            repository,
            token_service,
            api_client: reqwest::Client::new(),
        }
    }

    /// Helper to make GET request
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(format!("{}{}", self.address, path))
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(format!("{}{}", self.address, path))
    }

    /// Helper to make GET request with Bearer token
    pub fn get_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.get(path).bearer_auth(token)
    }

    /// Register a user and return the raw response
    pub async fn register(
        &self,
        first_name: &str,
        last_name: &str,
        email: &str,
        password: &str,
    ) -> reqwest::Response {
        self.post("/api/v1/auth/register")
            .json(&serde_json::json!({
                "firstName": first_name,
                "lastName": last_name,
                "email": email,
                "password": password
            }))
            .send()
            .await
            .expect("Failed to execute request")
    }

    /// Authenticate and return the raw response
    pub async fn authenticate(&self, email: &str, password: &str) -> reqwest::Response {
        self.post("/api/v1/auth/authenticate")
            .json(&serde_json::json!({
                "email": email,
                "password": password
            }))
            .send()
            .await
            .expect("Failed to execute request")
    }
}
