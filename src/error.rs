use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Upstream HTTP error {status}: {body}")]
    UpstreamHttp { status: u16, body: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("External API error: {0}")]
    ExternalApi(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    /// A collaborator failure already translated into a user-facing message.
    #[error("{message} ({source})")]
    Gateway {
        message: &'static str,
        #[source]
        source: Box<AppError>,
    },

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    /// Hides the underlying failure behind `message`, logging the cause.
    pub fn into_gateway(self, route: &str, message: &'static str) -> AppError {
        match self {
            AppError::BadRequest(_) | AppError::Gateway { .. } => self,
            other => {
                tracing::error!("Error on {}: {}", route, other);
                AppError::Gateway {
                    message,
                    source: Box::new(other),
                }
            }
        }
    }

    fn code(&self) -> &'static str {
        match self {
            AppError::Configuration(_) => "CONFIGURATION_ERROR",
            AppError::UpstreamHttp { .. } => "UPSTREAM_HTTP_ERROR",
            AppError::Network(_) => "NETWORK_ERROR",
            AppError::ExternalApi(_) => "EXTERNAL_API_ERROR",
            AppError::BadRequest(_) => "BAD_REQUEST",
            AppError::Gateway { source, .. } => source.code(),
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::Network(err.to_string())
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let code = self.code().to_string();
        let (status, message) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Gateway { message, .. } => {
                (StatusCode::INTERNAL_SERVER_ERROR, message.to_string())
            }
            other => {
                tracing::error!("Unhandled error reached response layer: {}", other);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Erro interno do servidor.".to_string(),
                )
            }
        };

        (status, Json(ErrorResponse { error: message, code })).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
