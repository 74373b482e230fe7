// src/errors.rs
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::json;
use thiserror::Error;
use validator::ValidationErrors;

/// One offending field in a validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldIssue {
    pub field: String,
    pub issue: String,
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("MongoDB error: {0}")]
    MongoDB(#[from] mongodb::error::Error),

    #[error("{message}")]
    Validation {
        message: String,
        details: Vec<FieldIssue>,
    },

    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            AppError::MongoDB(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
            AppError::Validation { .. } => (StatusCode::UNPROCESSABLE_ENTITY, "VALIDATION_ERROR"),
            AppError::Configuration(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        };

        // Driver errors can leak connection strings; keep them in the logs.
        let message = match &self {
            AppError::MongoDB(e) => {
                tracing::error!("❌ Store failure: {}", e);
                "Database error".to_string()
            }
            other => other.to_string(),
        };

        let mut error = json!({
            "code": code,
            "message": message,
        });
        if let AppError::Validation { details, .. } = &self {
            if !details.is_empty() {
                error["details"] = json!(details);
            }
        }

        (status, Json(json!({ "error": error }))).into_response()
    }
}

impl AppError {
    pub fn validation(msg: impl Into<String>) -> Self {
        AppError::Validation {
            message: msg.into(),
            details: Vec::new(),
        }
    }

    pub fn validation_with(msg: impl Into<String>, errors: &ValidationErrors) -> Self {
        let mut details: Vec<FieldIssue> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errs)| {
                let field = field.to_string();
                errs.iter().map(move |e| FieldIssue {
                    field: field.clone(),
                    issue: e
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| e.code.to_string()),
                })
            })
            .collect();
        details.sort_by(|a, b| a.field.cmp(&b.field));

        AppError::Validation {
            message: msg.into(),
            details,
        }
    }

    pub fn configuration(msg: impl Into<String>) -> Self {
        AppError::Configuration(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use serde_json::Value;

    async fn body_json(err: AppError) -> (StatusCode, Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn validation_error_uses_shared_payload() {
        let (status, body) = body_json(AppError::validation("team_a and team_b are required")).await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
        assert_eq!(body["error"]["message"], "team_a and team_b are required");
        assert!(body["error"].get("details").is_none());
    }

    #[tokio::test]
    async fn details_are_included_when_present() {
        let err = AppError::Validation {
            message: "bad query".into(),
            details: vec![FieldIssue {
                field: "season".into(),
                issue: "required".into(),
            }],
        };
        let (_, body) = body_json(err).await;

        assert_eq!(body["error"]["details"][0]["field"], "season");
        assert_eq!(body["error"]["details"][0]["issue"], "required");
    }

    #[tokio::test]
    async fn configuration_error_is_internal() {
        let (status, body) = body_json(AppError::configuration("MONGO_URI must be set")).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"]["code"], "INTERNAL_ERROR");
    }
}
