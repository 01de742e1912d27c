use axum::{Json, response::IntoResponse};
use quill_common::{caller::CallerError, views::ApiErrorResponse};
use quill_db::storage::StoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Not found")]
    NotFound,

    #[error(transparent)]
    Storage(#[from] StoreError),

    #[error(transparent)]
    CallerError(#[from] CallerError),

    #[error(transparent)]
    InternalAnyhow(#[from] anyhow::Error),
}

impl ApiError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::Forbidden(message.into())
    }

    pub fn not_found() -> Self {
        Self::NotFound
    }
}

impl From<ApiError> for ApiErrorResponse {
    fn from(err: ApiError) -> Self {
        ApiErrorResponse {
            code: match &err {
                ApiError::InvalidInput(_) => Some("InvalidInput".into()),
                ApiError::Forbidden(_) => Some("Forbidden".into()),
                ApiError::NotFound => Some("NotFound".into()),
                ApiError::Storage(_) => Some("InternalError".into()),
                ApiError::CallerError(ce) => match ce {
                    CallerError::Forbidden { .. } => Some("Forbidden".into()),
                    CallerError::Unauthorized { .. } => Some("Unauthorized".into()),
                },
                ApiError::InternalAnyhow(_) => Some("InternalError".into()),
            },

            message: match &err {
                ApiError::InvalidInput(message) => message.clone(),
                ApiError::Forbidden(message) => message.clone(),
                ApiError::NotFound => "The requested resource was not found.".into(),
                ApiError::Storage(_) => {
                    "Something went wrong on our end. Please try again later.".into()
                }
                ApiError::CallerError(ce) => match ce {
                    CallerError::Forbidden { .. } => {
                        "You do not have permission to perform this action.".into()
                    }
                    CallerError::Unauthorized { .. } => {
                        "You are not authenticated to perform this action.".into()
                    }
                },
                ApiError::InternalAnyhow(_) => {
                    "Something went wrong on our end. Please try again later.".into()
                }
            },

            #[cfg(debug_assertions)]
            details: Some(err.to_string()),

            #[cfg(not(debug_assertions))]
            details: None,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        tracing::error!("Error returned by handler: {self}");

        let status_code = match &self {
            Self::InvalidInput(_) => axum::http::StatusCode::BAD_REQUEST,
            Self::Forbidden(_) => axum::http::StatusCode::FORBIDDEN,
            Self::NotFound => axum::http::StatusCode::NOT_FOUND,
            Self::Storage(_) => axum::http::StatusCode::INTERNAL_SERVER_ERROR,
            Self::CallerError(ce) => match ce {
                CallerError::Forbidden { .. } => axum::http::StatusCode::FORBIDDEN,
                CallerError::Unauthorized { .. } => axum::http::StatusCode::UNAUTHORIZED,
            },
            Self::InternalAnyhow(_) => axum::http::StatusCode::INTERNAL_SERVER_ERROR,
        };

        (status_code, Json(Into::<ApiErrorResponse>::into(self))).into_response()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn invalid_input_keeps_its_message_on_the_wire() {
        let err = ApiError::invalid_input("Username must be lowercase");
        let response: ApiErrorResponse = err.into();
        assert_eq!(response.code.as_deref(), Some("InvalidInput"));
        assert_eq!(response.message, "Username must be lowercase");
    }

    #[test]
    fn forbidden_keeps_its_message_on_the_wire() {
        let err = ApiError::forbidden("You are not allowed to see all users");
        let response: ApiErrorResponse = err.into();
        assert_eq!(response.code.as_deref(), Some("Forbidden"));
        assert_eq!(response.message, "You are not allowed to see all users");
    }

    #[test]
    fn not_found_maps_to_its_code() {
        let response: ApiErrorResponse = ApiError::not_found().into();
        assert_eq!(response.code.as_deref(), Some("NotFound"));
    }

    #[test]
    fn unauthorized_caller_maps_to_its_code() {
        let err = ApiError::CallerError(CallerError::unauthorized(None));
        let response: ApiErrorResponse = err.into();
        assert_eq!(response.code.as_deref(), Some("Unauthorized"));
    }
}
