//! catalog-errors - 统一错误处理
//!
//! 基于 RFC 7807 Problem Details 规范

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// 应用错误类型
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    /// 请求体无法解码
    #[error("Malformed payload: {0}")]
    Malformed(String),

    /// 根文档存在但缺少预期的数组字段
    #[error("Structural inconsistency: {0}")]
    StructuralInconsistency(String),

    #[error("Timeout: {0}")]
    Timeout(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl AppError {
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::Malformed(msg.into())
    }

    pub fn structural(msg: impl Into<String>) -> Self {
        Self::StructuralInconsistency(msg.into())
    }

    pub fn timeout(msg: impl Into<String>) -> Self {
        Self::Timeout(msg.into())
    }

    pub fn database(msg: impl Into<String>) -> Self {
        Self::Database(msg.into())
    }

    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    /// 是否为调用方引起的错误（4xx）
    pub fn is_client_error(&self) -> bool {
        (400..500).contains(&self.status_code())
    }

    /// 转换为 HTTP 状态码
    pub fn status_code(&self) -> u16 {
        match self {
            Self::NotFound(_) => 404,
            Self::Validation(_) => 400,
            Self::Malformed(_) => 400,
            Self::StructuralInconsistency(_) => 500,
            Self::Timeout(_) => 504,
            Self::Database(_) => 500,
            Self::Configuration(_) => 500,
        }
    }

    /// 转换为 Problem Details
    pub fn to_problem_details(&self) -> ProblemDetails {
        ProblemDetails {
            r#type: self.problem_type(),
            title: self.problem_title(),
            status: self.status_code(),
            detail: self.to_string(),
            instance: None,
        }
    }

    fn problem_type(&self) -> String {
        let slug = match self {
            Self::NotFound(_) => "not-found",
            Self::Validation(_) => "validation",
            Self::Malformed(_) => "malformed",
            Self::StructuralInconsistency(_) => "structural-inconsistency",
            Self::Timeout(_) => "timeout",
            Self::Database(_) => "database",
            Self::Configuration(_) => "configuration",
        };
        format!("https://api.supply-catalog.dev/problems/{slug}")
    }

    fn problem_title(&self) -> String {
        match self {
            Self::NotFound(_) => "Resource Not Found",
            Self::Validation(_) => "Validation Error",
            Self::Malformed(_) => "Malformed Payload",
            Self::StructuralInconsistency(_) => "Structural Inconsistency",
            Self::Timeout(_) => "Store Timeout",
            Self::Database(_) => "Database Error",
            Self::Configuration(_) => "Configuration Error",
        }
        .to_string()
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let problem = self.to_problem_details();
        let status =
            StatusCode::from_u16(problem.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(problem)).into_response()
    }
}

/// RFC 7807 Problem Details
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProblemDetails {
    pub r#type: String,
    pub title: String,
    pub status: u16,
    pub detail: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instance: Option<String>,
}

/// Result 类型别名
pub type AppResult<T> = Result<T, AppError>;
