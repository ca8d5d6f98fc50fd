//! # レスポンスボディ
//!
//! フィードバック API が返す JSON ボディを提供する。
//!
//! ## 設計
//!
//! - 成功時は `{"message": ...}`、失敗時は `{"error": ...}` の 1 フィールドのみ
//! - 失敗時の文言は固定値で、内部情報を漏らさない
//! - axum の `IntoResponse` 変換は各サービスの責務（shared に axum 依存を入れない）

use serde::{Deserialize, Serialize};

/// エラーレスポンス
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }

    /// 500 Internal Server Error
    pub fn server_error() -> Self {
        Self::new("Server error")
    }

    /// 400 Bad Request（JSON として解釈できないボディ）
    pub fn invalid_body() -> Self {
        Self::new("Invalid request body")
    }
}

/// メッセージレスポンス
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
