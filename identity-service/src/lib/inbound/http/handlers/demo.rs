use axum::http::StatusCode;
use axum::Extension;

use super::ApiSuccess;
use crate::inbound::http::middleware::AuthenticatedUser;

/// Protected endpoint proving a presented token was accepted.
pub async fn say_hello(Extension(user): Extension<AuthenticatedUser>) -> ApiSuccess<String> {
    tracing::debug!(email = %user.email, role = %user.role, "Secure endpoint reached");
    ApiSuccess::new(StatusCode::OK, "Hello from secure controller".to_string())
}
