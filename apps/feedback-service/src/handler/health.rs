//! # ヘルスチェックハンドラ
//!
//! ## エンドポイント
//!
//! ```text
//! GET /health        … プロセスの生存確認（依存サービスを見ない）
//! GET /health/ready  … MongoDB への疎通を含む readiness 確認
//! ```

use std::{collections::HashMap, sync::Arc};

use axum::{Json, extract::State, http::StatusCode};
use feedback_infra::DatabaseProbe;
use feedback_shared::{CheckStatus, HealthResponse, ReadinessResponse, ReadinessStatus};

/// Readiness チェックの共有状態
pub struct ReadinessState {
    pub database: Arc<dyn DatabaseProbe>,
}

/// ヘルスチェックエンドポイント
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status:  "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Readiness チェックエンドポイント
///
/// 依存サービスが 1 つでも利用不可なら 503 を返す。
pub async fn readiness_check(
    State(state): State<Arc<ReadinessState>>,
) -> (StatusCode, Json<ReadinessResponse>) {
    let database = match state.database.ping().await {
        Ok(()) => CheckStatus::Ok,
        Err(e) => {
            tracing::warn!(error = %e, "readiness: MongoDB への疎通確認に失敗");
            CheckStatus::Error
        }
    };

    let response = ReadinessResponse::from_checks(HashMap::from([(
        "database".to_string(),
        database,
    )]));
    let status = match response.status {
        ReadinessStatus::Ready => StatusCode::OK,
        ReadinessStatus::NotReady => StatusCode::SERVICE_UNAVAILABLE,
    };

    (status, Json(response))
}
