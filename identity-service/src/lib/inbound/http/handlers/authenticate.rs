use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;

use super::ApiError;
use super::ApiJson;
use super::ApiSuccess;
use super::AuthenticationResponseData;
use crate::domain::user::models::AuthenticateCommand;
use crate::domain::user::ports::AuthenticationServicePort;
use crate::inbound::http::router::AppState;

pub async fn authenticate(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<AuthenticateRequest>,
) -> Result<ApiSuccess<AuthenticationResponseData>, ApiError> {
    let command = AuthenticateCommand::new(body.email, body.password)?;

    let result = state.auth_service.authenticate(command).await?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        AuthenticationResponseData {
            token: result.token.token,
        },
    ))
}

/// HTTP request body for login (raw JSON)
#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct AuthenticateRequest {
    email: String,
    password: String,
}
