//! Common types used across the frontend application.
//!
//! This module centralizes type definitions to avoid duplication
//! and ensure consistency across components.
//!
//! # Categories
//!
//! - **Prediction Types** - Upload response interpretation
//! - **Result Types** - What the result panel renders
//! - **Auth Types** - Credentials and server messages
//! - **Error Types** - Frontend error handling

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::config::FRACTURED_LABEL;

// =============================================================================
// Prediction Types
// =============================================================================

/// Interpretation of a parsed `/upload` response body.
#[derive(Clone, Debug, PartialEq)]
pub enum PredictionOutcome {
    /// Both `bone_type` and `result` were present.
    Structured {
        bone_type: String,
        result: String,
        heatmap_url: Option<String>,
    },
    /// The body parsed but lacked the required fields.
    Malformed,
    /// The request or JSON decoding failed.
    TransportFailure,
}

impl PredictionOutcome {
    /// Classify a JSON payload returned by the prediction endpoint.
    ///
    /// Missing, empty or non-string `bone_type`/`result` make the payload
    /// malformed. An empty `heatmap_image` is treated as absent.
    pub fn from_payload(payload: &Value) -> Self {
        let field = |name: &str| {
            payload
                .get(name)
                .and_then(Value::as_str)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
        };

        match (field("bone_type"), field("result")) {
            (Some(bone_type), Some(result)) => PredictionOutcome::Structured {
                bone_type,
                result,
                heatmap_url: field("heatmap_image"),
            },
            _ => PredictionOutcome::Malformed,
        }
    }

    /// Heatmap to display instead of the local preview, if any.
    pub fn heatmap(&self) -> Option<&str> {
        match self {
            PredictionOutcome::Structured {
                result,
                heatmap_url: Some(url),
                ..
            } if result == FRACTURED_LABEL => Some(url.as_str()),
            _ => None,
        }
    }
}

// =============================================================================
// Result Types
// =============================================================================

/// Content of the result panel.
#[derive(Clone, Debug, PartialEq)]
pub enum ResultContent {
    /// A classification to display.
    Prediction { bone_type: String, result: String },
    /// A failure message, styled as an error.
    Failure(String),
}

impl ResultContent {
    /// Whether the panel should use error styling.
    pub fn is_error(&self) -> bool {
        matches!(self, ResultContent::Failure(_))
    }

    /// Plain-text rendering of the panel.
    pub fn text(&self) -> String {
        match self {
            ResultContent::Prediction { bone_type, result } => {
                format!("Bone Type: {}  Result: {}", bone_type, result)
            }
            ResultContent::Failure(message) => message.clone(),
        }
    }
}

impl From<&PredictionOutcome> for ResultContent {
    fn from(outcome: &PredictionOutcome) -> Self {
        match outcome {
            PredictionOutcome::Structured {
                bone_type, result, ..
            } => ResultContent::Prediction {
                bone_type: bone_type.clone(),
                result: result.clone(),
            },
            PredictionOutcome::Malformed => {
                ResultContent::Failure(AppError::MalformedResponse.user_message())
            }
            PredictionOutcome::TransportFailure => {
                ResultContent::Failure(AppError::Transport(String::new()).user_message())
            }
        }
    }
}

// =============================================================================
// Auth Types
// =============================================================================

/// Body of `/login` and `/signup` requests.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// Generic `{ "message": ... }` reply from the auth endpoints.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MessageResponse {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub redirect: Option<String>,
}

// =============================================================================
// Error Types
// =============================================================================

/// Frontend application errors.
///
/// Every error is local to the action that triggered it.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum AppError {
    /// Rejected locally before any request was sent.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Non-2xx reply carrying a server message.
    #[error("Server rejected request: {0}")]
    Application(String),

    /// 2xx reply without the expected fields.
    #[error("Malformed response")]
    MalformedResponse,

    /// Network failure, non-JSON body or other rejection.
    #[error("Network error: {0}")]
    Transport(String),

    /// The selected file could not be read locally.
    #[error("Preview error: {0}")]
    Preview(String),
}

impl AppError {
    /// Message shown to the user.
    ///
    /// Server detail is only surfaced for [`AppError::Application`].
    pub fn user_message(&self) -> String {
        match self {
            AppError::Validation(msg) | AppError::Application(msg) => msg.clone(),
            AppError::MalformedResponse => "Prediction failed.".to_string(),
            AppError::Transport(_) => "Server error occurred.".to_string(),
            AppError::Preview(_) => "Could not read the selected file.".to_string(),
        }
    }
}

impl From<gloo_net::Error> for AppError {
    fn from(err: gloo_net::Error) -> Self {
        AppError::Transport(err.to_string())
    }
}

/// Result type alias for frontend operations.
pub type AppResult<T> = Result<T, AppError>;
