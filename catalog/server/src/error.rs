use axum::{
    Json,
    extract::{
        FromRequest, FromRequestParts, Path, Request,
        rejection::{JsonRejection, PathRejection},
    },
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Response},
};
use sea_orm::{DbErr, SqlErr};
use serde::Serialize;
use serde::de::DeserializeOwned;
use utoipa::ToSchema;

use crate::validation::{FieldError, ValidationErrors};

/// Error type shared by the user, good and order services and their handlers.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// No row matches the requested primary key.
    #[error("{resource} with ID {id} not found")]
    NotFound { resource: &'static str, id: i32 },
    /// The input violates one or more field constraints.
    #[error("Validation failed: {0}")]
    Validation(ValidationErrors),
    /// The database refused the statement because of a foreign key.
    #[error("Foreign key constraint violated: {0}")]
    ForeignKeyViolation(String),
    /// The request body could not be deserialized into the input type.
    #[error("Malformed request body: {0}")]
    MalformedBody(String),
    /// A path segment could not be parsed, e.g. a non-numeric ID.
    #[error("Malformed request path: {0}")]
    MalformedPath(String),
    /// Represents a database error.
    #[error("Database error: {0}")]
    Database(DbErr),
}

impl From<ValidationErrors> for CatalogError {
    fn from(errors: ValidationErrors) -> Self {
        CatalogError::Validation(errors)
    }
}

impl From<DbErr> for CatalogError {
    fn from(err: DbErr) -> Self {
        match err.sql_err() {
            Some(SqlErr::ForeignKeyConstraintViolation(message)) => {
                CatalogError::ForeignKeyViolation(message)
            }
            _ => CatalogError::Database(err),
        }
    }
}

impl From<JsonRejection> for CatalogError {
    fn from(rejection: JsonRejection) -> Self {
        CatalogError::MalformedBody(rejection.body_text())
    }
}

impl From<PathRejection> for CatalogError {
    fn from(rejection: PathRejection) -> Self {
        CatalogError::MalformedPath(rejection.body_text())
    }
}

/// Body returned when a lookup by id finds nothing.
#[derive(Debug, Serialize, ToSchema)]
pub struct NotFoundResponse {
    pub response: String,
}

/// JSON response for API errors.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<FieldError>,
}

impl ErrorResponse {
    fn new(error: &str, message: String) -> Self {
        Self {
            error: error.to_string(),
            message,
            fields: Vec::new(),
        }
    }
}

impl IntoResponse for CatalogError {
    fn into_response(self) -> Response {
        match self {
            CatalogError::NotFound { resource, .. } => (
                StatusCode::NOT_FOUND,
                Json(NotFoundResponse {
                    response: format!("{resource}_id Not found!"),
                }),
            )
                .into_response(),
            CatalogError::Validation(errors) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(ErrorResponse {
                    error: "VALIDATION_FAILED".to_string(),
                    message: errors.to_string(),
                    fields: errors.into_fields(),
                }),
            )
                .into_response(),
            CatalogError::ForeignKeyViolation(message) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(ErrorResponse::new(
                    "FOREIGN_KEY_VIOLATION",
                    format!("The referenced user or good does not exist, or the row is still referenced by an order: {message}"),
                )),
            )
                .into_response(),
            CatalogError::MalformedBody(message) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(ErrorResponse::new("INVALID_BODY", message)),
            )
                .into_response(),
            CatalogError::MalformedPath(message) => (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::new("INVALID_PATH", message)),
            )
                .into_response(),
            CatalogError::Database(err) => {
                tracing::error!("Database operation failed: {}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorResponse::new(
                        "DATABASE_ERROR",
                        "An unexpected error occurred while processing your request. Please try again later."
                            .to_string(),
                    )),
                )
                    .into_response()
            }
        }
    }
}

/// JSON extractor whose rejection is reported as a `CatalogError`.
#[derive(Debug)]
pub struct CatalogJson<T>(pub T);

impl<S, T> FromRequest<S> for CatalogJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = CatalogError;

    async fn from_request(request: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(request, state).await?;
        Ok(Self(value))
    }
}

/// Path extractor whose rejection is reported as a `CatalogError`.
#[derive(Debug)]
pub struct CatalogPath<T>(pub T);

impl<S, T> FromRequestParts<S> for CatalogPath<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = CatalogError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(value) = Path::<T>::from_request_parts(parts, state).await?;
        Ok(Self(value))
    }
}
