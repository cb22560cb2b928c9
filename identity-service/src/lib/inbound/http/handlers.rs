use axum::extract::rejection::JsonRejection;
use axum::extract::FromRequest;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde::Serialize;

use crate::user::errors::AuthenticationError;
use crate::user::errors::TokenError;

pub mod authenticate;
pub mod demo;
pub mod register;

#[derive(Debug, Clone)]
pub struct ApiSuccess<T: Serialize + PartialEq>(StatusCode, Json<ApiResponseBody<T>>);

impl<T> PartialEq for ApiSuccess<T>
where
    T: Serialize + PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0 && self.1 .0 == other.1 .0
    }
}

impl<T: Serialize + PartialEq> ApiSuccess<T> {
    pub fn new(status: StatusCode, data: T) -> Self {
        ApiSuccess(status, Json(ApiResponseBody::new(status, data)))
    }
}

impl<T: Serialize + PartialEq> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> Response {
        (self.0, self.1).into_response()
    }
}

/// `Json` extractor whose rejections are rendered in the API envelope.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    InternalServerError(String),
    BadRequest(String),
    UnprocessableEntity(String),
    Conflict(String),
    Unauthorized(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::InternalServerError(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::UnprocessableEntity(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
        };

        (status, Json(ApiResponseBody::new_error(status, message))).into_response()
    }
}

impl From<AuthenticationError> for ApiError {
    fn from(err: AuthenticationError) -> Self {
        match err {
            AuthenticationError::DuplicateIdentity(_) => ApiError::Conflict(err.to_string()),
            AuthenticationError::InvalidCredentials => ApiError::Unauthorized(err.to_string()),
            AuthenticationError::InvalidEmail(_)
            | AuthenticationError::InvalidName(_)
            | AuthenticationError::InvalidPassword => {
                ApiError::UnprocessableEntity(err.to_string())
            }
            AuthenticationError::Password(_)
            | AuthenticationError::Token(_)
            | AuthenticationError::DatabaseError(_) => {
                tracing::error!(error = %err, "Authentication infrastructure failure");
                ApiError::InternalServerError("Internal server error".to_string())
            }
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        match &rejection {
            // Well-formed JSON that does not fit the request shape
            JsonRejection::JsonDataError(_) => {
                ApiError::UnprocessableEntity(rejection.body_text())
            }
            _ => ApiError::BadRequest(rejection.body_text()),
        }
    }
}

impl From<TokenError> for ApiError {
    fn from(err: TokenError) -> Self {
        tracing::warn!(error = %err, "Token rejected");
        ApiError::Unauthorized("Invalid or expired token".to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiResponseBody<T: Serialize + PartialEq> {
    status_code: u16,
    data: T,
}

impl<T: Serialize + PartialEq> ApiResponseBody<T> {
    pub fn new(status_code: StatusCode, data: T) -> Self {
        Self {
            status_code: status_code.as_u16(),
            data,
        }
    }
}

impl ApiResponseBody<ApiErrorData> {
    pub fn new_error(status_code: StatusCode, message: String) -> Self {
        Self {
            status_code: status_code.as_u16(),
            data: ApiErrorData { message },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiErrorData {
    pub message: String,
}

/// Body returned by register and authenticate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthenticationResponseData {
    pub token: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::user::errors::EmailError;

    #[test]
    fn test_error_mapping() {
        assert!(matches!(
            ApiError::from(AuthenticationError::DuplicateIdentity("ana@x.com".into())),
            ApiError::Conflict(_)
        ));
        assert_eq!(
            ApiError::from(AuthenticationError::InvalidCredentials),
            ApiError::Unauthorized("Invalid credentials".to_string())
        );
        assert!(matches!(
            ApiError::from(AuthenticationError::InvalidEmail(EmailError::Empty)),
            ApiError::UnprocessableEntity(_)
        ));
        assert!(matches!(
            ApiError::from(TokenError::Expired),
            ApiError::Unauthorized(_)
        ));
    }

    #[test]
    fn test_infrastructure_errors_are_not_leaked() {
        let err = ApiError::from(AuthenticationError::DatabaseError(
            "password authentication failed for user postgres".into(),
        ));
        assert_eq!(
            err,
            ApiError::InternalServerError("Internal server error".to_string())
        );
    }
}
