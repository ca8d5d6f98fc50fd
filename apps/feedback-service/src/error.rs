//! # Feedback Service エラー定義
//!
//! Feedback Service 固有のエラーと、HTTP レスポンスへの変換を定義する。
//!
//! API 境界ではエラー種別を区別しない。バリデーション違反も保存失敗も
//! 同じ 500 `{"error": "Server error"}` になり、種別はログにだけ残す。

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use feedback_domain::DomainError;
use feedback_infra::InfraError;
use feedback_shared::{ErrorResponse, event_log::error as log_error};
use thiserror::Error;

/// Feedback Service で発生するエラー
#[derive(Debug, Error)]
pub enum FeedbackError {
    /// 必須フィールドの欠落など
    #[error("バリデーションエラー: {0}")]
    Validation(#[from] DomainError),

    /// 保存失敗
    #[error("データベースエラー: {0}")]
    Database(#[from] InfraError),

    /// JSON として解釈できないリクエストボディ
    #[error("リクエストボディが不正: {0}")]
    InvalidBody(String),
}

impl IntoResponse for FeedbackError {
    fn into_response(self) -> Response {
        match &self {
            FeedbackError::Validation(e) => {
                tracing::error!(
                    error.category = log_error::category::INPUT,
                    error.kind = log_error::kind::VALIDATION,
                    "フィードバックを保存できません: {}",
                    e
                );
            }
            FeedbackError::Database(e) => {
                tracing::error!(
                    error.category = log_error::category::INFRASTRUCTURE,
                    error.kind = log_error::kind::DATABASE,
                    span_trace = %e.span_trace(),
                    "データベースエラー: {}",
                    e
                );
            }
            FeedbackError::InvalidBody(detail) => {
                tracing::warn!(
                    error.category = log_error::category::INPUT,
                    error.kind = log_error::kind::REQUEST_BODY,
                    "リクエストボディが不正: {}",
                    detail
                );
                return (StatusCode::BAD_REQUEST, Json(ErrorResponse::invalid_body()))
                    .into_response();
            }
        }

        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse::server_error()),
        )
            .into_response()
    }
}
