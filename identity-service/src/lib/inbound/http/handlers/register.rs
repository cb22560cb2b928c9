use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;

use super::ApiError;
use super::ApiJson;
use super::ApiSuccess;
use super::AuthenticationResponseData;
use crate::domain::user::models::RegisterCommand;
use crate::domain::user::ports::AuthenticationServicePort;
use crate::inbound::http::router::AppState;

pub async fn register(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<RegisterRequest>,
) -> Result<ApiSuccess<AuthenticationResponseData>, ApiError> {
    let command = RegisterCommand::parse(body.first_name, body.last_name, body.email, body.password)?;

    state
        .auth_service
        .register(command)
        .await
        .map_err(ApiError::from)
        .map(|result| {
            ApiSuccess::new(
                StatusCode::OK,
                AuthenticationResponseData {
                    token: result.token.token,
                },
            )
        })
}

/// HTTP request body for registration (raw JSON)
#[derive(Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    first_name: String,
    last_name: String,
    email: String,
    password: String,
}
