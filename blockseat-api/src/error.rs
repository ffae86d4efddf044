use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use blockseat_catalog::{AssembleError, FormError};
use blockseat_core::CoreError;
use blockseat_order::{StatusError, VoucherError};
use serde_json::json;

#[derive(Debug)]
pub enum AppError {
    AuthenticationError(String),
    ValidationError(String),
    NotFoundError(String),
    ConflictError(String),
    /// The backend answered with an error; its status and message are
    /// passed on.
    UpstreamError { status: u16, message: String },
    InternalServerError(String),
    Anyhow(anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::AuthenticationError(msg) => (StatusCode::UNAUTHORIZED, msg),
            AppError::ValidationError(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::NotFoundError(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::ConflictError(msg) => (StatusCode::CONFLICT, msg),
            AppError::UpstreamError { status, message } => {
                let status = StatusCode::from_u16(status)
                    .ok()
                    .filter(|s| s.is_client_error())
                    .unwrap_or(StatusCode::BAD_GATEWAY);
                (status, message)
            }
            AppError::InternalServerError(msg) => {
                tracing::error!("Internal Server Error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error".to_string())
            }
            AppError::Anyhow(err) => {
                tracing::error!("Internal Server Error: {}", err);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error".to_string())
            }
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

impl From<CoreError> for AppError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::MissingCredential => AppError::AuthenticationError(err.to_string()),
            CoreError::Backend { status, message } => AppError::UpstreamError { status, message },
            CoreError::Transport(_) | CoreError::Decode(_) => AppError::UpstreamError {
                status: 502,
                message: err.to_string(),
            },
            CoreError::NotFound(_) => AppError::NotFoundError(err.to_string()),
            CoreError::Assemble(e) => e.into(),
            CoreError::Status(e) => e.into(),
            CoreError::Voucher(e) => e.into(),
            CoreError::Render(e) => AppError::InternalServerError(e.to_string()),
            CoreError::Internal(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl From<AssembleError> for AppError {
    fn from(err: AssembleError) -> Self {
        match err {
            AssembleError::Encoding(e) => AppError::InternalServerError(e.to_string()),
            other => AppError::ValidationError(other.to_string()),
        }
    }
}

impl From<FormError> for AppError {
    fn from(err: FormError) -> Self {
        AppError::ValidationError(err.to_string())
    }
}

impl From<StatusError> for AppError {
    fn from(err: StatusError) -> Self {
        AppError::ConflictError(err.to_string())
    }
}

impl From<VoucherError> for AppError {
    fn from(err: VoucherError) -> Self {
        match err {
            VoucherError::UnknownKind(_) => AppError::NotFoundError(err.to_string()),
            VoucherError::AmountOverflow(_) => AppError::UpstreamError {
                status: 502,
                message: err.to_string(),
            },
            other => AppError::ConflictError(other.to_string()),
        }
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Anyhow(err)
    }
}
