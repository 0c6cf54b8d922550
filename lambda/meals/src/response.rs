//! JSON envelopes and their conversion into proxy responses.

use lambda_http::http::header::{
    ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS, ACCESS_CONTROL_ALLOW_ORIGIN,
    CONTENT_TYPE,
};
use lambda_http::http::{self, StatusCode};
use lambda_http::{Body, Response};
use serde::Serialize;
use tracing::error;

use crate::model::Meal;

pub const ALLOW_ORIGIN: &str = "*";
pub const ALLOW_METHODS: &str = "GET, POST, PUT, DELETE, OPTIONS";
pub const ALLOW_HEADERS: &str = "Content-Type, Authorization";

pub const SERIALIZATION_FAILURE_BODY: &str = r#"{"message":"Internal server error"}"#;

#[derive(Debug, Clone, Default, Serialize)]
pub struct Success {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item: Option<Meal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Vec<Meal>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl Success {
    pub fn item(meal: Meal) -> Self {
        Self {
            success: true,
            item: Some(meal),
            ..Self::default()
        }
    }

    pub fn items(meals: Vec<Meal>) -> Self {
        Self {
            success: true,
            items: Some(meals),
            ..Self::default()
        }
    }

    pub fn message(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Failure {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum Envelope {
    Success(Success),
    Failure(Failure),
}

/// `body: None` renders as an empty payload (CORS preflight).
#[derive(Debug, Clone)]
pub struct Reply {
    pub status: StatusCode,
    pub body: Option<Envelope>,
}

impl Reply {
    pub fn success(status: StatusCode, body: Success) -> Self {
        Self {
            status,
            body: Some(Envelope::Success(body)),
        }
    }

    pub fn failure(status: StatusCode, message: impl Into<String>, error: Option<String>) -> Self {
        Self {
            status,
            body: Some(Envelope::Failure(Failure {
                message: message.into(),
                error,
            })),
        }
    }

    pub fn empty(status: StatusCode) -> Self {
        Self { status, body: None }
    }

    pub fn not_found() -> Self {
        Self::failure(StatusCode::NOT_FOUND, "Not found", None)
    }

    /// An envelope that will not encode becomes the fixed 500 body.
    pub fn into_response(self) -> Result<Response<Body>, http::Error> {
        let (status, body) = match self.body.as_ref().map(serde_json::to_string) {
            None => (self.status, Body::Empty),
            Some(Ok(json)) => (self.status, Body::Text(json)),
            Some(Err(e)) => {
                error!(error = %e, "failed to encode response body");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Body::Text(SERIALIZATION_FAILURE_BODY.to_string()),
                )
            }
        };

        Response::builder()
            .status(status)
            .header(CONTENT_TYPE, "application/json")
            .header(ACCESS_CONTROL_ALLOW_ORIGIN, ALLOW_ORIGIN)
            .header(ACCESS_CONTROL_ALLOW_METHODS, ALLOW_METHODS)
            .header(ACCESS_CONTROL_ALLOW_HEADERS, ALLOW_HEADERS)
            .body(body)
    }
}
