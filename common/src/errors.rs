//! Application error types.
//!
//! Every fallible operation returns [`AppResult`]. Errors convert into the
//! standard [`ApiResponse`] envelope when returned from a JSON handler.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::response::ApiResponse;

/// Result alias used across the workspace.
pub type AppResult<T> = Result<T, AppError>;

/// Errors produced while serving a request.
#[derive(Debug, Error)]
pub enum AppError {
    /// The backend could not be reached or answered with garbage.
    #[error("外部服务错误: {0}")]
    ExternalService(String),

    /// The backend answered with a non-zero error code.
    #[error("后端返回错误 {code}: {message}")]
    Backend { code: i64, message: String },

    /// Request parameters failed validation.
    #[error("参数校验失败: {0}")]
    Validation(String),

    /// The requested resource does not exist.
    #[error("资源未找到: {0}")]
    NotFound(String),

    /// Invalid configuration.
    #[error("配置错误: {0}")]
    Config(String),

    /// A page template failed to render.
    #[error("模板渲染失败: {0}")]
    Template(String),
}

impl AppError {
    /// Machine-readable error code sent to clients.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::ExternalService(_) => "EXTERNAL_SERVICE_ERROR",
            AppError::Backend { .. } => "BACKEND_ERROR",
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::Config(_) => "CONFIG_ERROR",
            AppError::Template(_) => "TEMPLATE_ERROR",
        }
    }

    /// HTTP status for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::ExternalService(_) | AppError::Backend { .. } => StatusCode::BAD_GATEWAY,
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Config(_) | AppError::Template(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AppError::Validation(errors.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(code = self.code(), error = %self, "请求处理失败");
        } else {
            tracing::warn!(code = self.code(), error = %self, "请求被拒绝");
        }
        let body = ApiResponse::err(self.code(), self.to_string());
        (status, Json(body)).into_response()
    }
}
