//! Handler error taxonomy and its mapping onto responses.

use lambda_http::http::StatusCode;
use thiserror::Error;

use crate::response::Reply;
use crate::store::StoreError;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{message}")]
    Validation {
        message: &'static str,
        detail: Option<String>,
    },

    #[error("Meal not found")]
    NotFound,

    /// `message` names the operation that failed.
    #[error("{message}: {source}")]
    Store {
        message: &'static str,
        #[source]
        source: StoreError,
    },
}

impl ApiError {
    pub fn invalid_body(e: serde_json::Error) -> Self {
        Self::Validation {
            message: "Invalid request body",
            detail: Some(e.to_string()),
        }
    }

    pub fn missing_fields() -> Self {
        Self::Validation {
            message: "mealName and mealType are required",
            detail: None,
        }
    }

    /// Adapter for `map_err` on store results.
    pub fn store(message: &'static str) -> impl FnOnce(StoreError) -> Self {
        move |source| Self::Store { message, source }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation { .. } => StatusCode::BAD_REQUEST,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Store { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<ApiError> for Reply {
    fn from(err: ApiError) -> Self {
        let status = err.status();
        match err {
            ApiError::Validation { message, detail } => Reply::failure(status, message, detail),
            ApiError::NotFound => Reply::failure(status, "Meal not found", None),
            ApiError::Store { message, source } => {
                Reply::failure(status, message, Some(source.to_string()))
            }
        }
    }
}
