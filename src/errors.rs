use std::collections::BTreeMap;

use axum::{http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;
use validator::ValidationErrors;

use crate::JsonResponse;

/// Field name to the messages reported against it.
pub type FieldErrors = BTreeMap<String, Vec<String>>;

#[derive(Debug, thiserror::Error)]
pub enum RequestError {
    #[error("{0}")]
    NotFound(&'static str),
    #[error("invalid input")]
    Validation(FieldErrors),
    #[error("internal server error")]
    ServerError,
    #[error("database error: {0}")]
    DatabaseError(#[from] sqlx::Error),
    #[error("template error: {0}")]
    RenderError(#[from] askama::Error),
}

#[derive(Serialize)]
pub struct RequestErrorJsonWrapper {
    errors: FieldErrors,
}

impl RequestErrorJsonWrapper {
    pub fn new(error: &str) -> RequestErrorJsonWrapper {
        let mut errors = FieldErrors::new();
        errors.insert("body".to_owned(), vec![error.to_string()]);
        RequestErrorJsonWrapper { errors }
    }

    pub fn with_fields(errors: FieldErrors) -> RequestErrorJsonWrapper {
        RequestErrorJsonWrapper { errors }
    }
}

impl From<ValidationErrors> for RequestError {
    fn from(value: ValidationErrors) -> Self {
        let errors = value
            .field_errors()
            .into_iter()
            .map(|(field, errors)| {
                let messages = errors
                    .iter()
                    .map(|error| match &error.message {
                        Some(message) => message.to_string(),
                        None => format!("invalid {}", error.code),
                    })
                    .collect();
                (field.to_string(), messages)
            })
            .collect();
        Self::Validation(errors)
    }
}

impl IntoResponse for RequestError {
    fn into_response(self) -> axum::response::Response {
        self.to_json_response().into_response()
    }
}

impl RequestError {
    pub fn field(field: &str, message: &str) -> Self {
        let mut errors = FieldErrors::new();
        errors.insert(field.to_owned(), vec![message.to_owned()]);
        Self::Validation(errors)
    }

    pub fn to_json_response(&self) -> JsonResponse<RequestErrorJsonWrapper> {
        let (status_code, json) = match self {
            RequestError::NotFound(message) => (
                StatusCode::NOT_FOUND,
                RequestErrorJsonWrapper::new(message),
            ),
            RequestError::Validation(errors) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                RequestErrorJsonWrapper::with_fields(errors.clone()),
            ),
            RequestError::ServerError => (
                StatusCode::INTERNAL_SERVER_ERROR,
                RequestErrorJsonWrapper::new("Internal Server Error"),
            ),
            RequestError::DatabaseError(e) => {
                tracing::error!(error = %e, "database error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    RequestErrorJsonWrapper::new("Internal Server Error"),
                )
            }
            RequestError::RenderError(e) => {
                tracing::error!(error = %e, "template rendering failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    RequestErrorJsonWrapper::new("Internal Server Error"),
                )
            }
        };
        (status_code, Json(json))
    }
}
