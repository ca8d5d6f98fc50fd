//! # `/health` と `/health/ready` のレスポンス
//!
//! liveness はプロセスが応答するかだけを返し、readiness は依存先
//! （このサービスでは MongoDB のみ）への疎通結果を名前付きで並べる。

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// `GET /health` のボディ
///
/// ```
/// use feedback_shared::HealthResponse;
///
/// let body = HealthResponse {
///     status:  "healthy".to_string(),
///     version: env!("CARGO_PKG_VERSION").to_string(),
/// };
/// assert_eq!(body.status, "healthy");
/// ```
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status:  String,
    /// 起動中バイナリのクレートバージョン
    pub version: String,
}

/// 依存先 1 件の疎通結果
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckStatus {
    Ok,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReadinessStatus {
    Ready,
    NotReady,
}

/// `GET /health/ready` のボディ
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadinessResponse {
    pub status: ReadinessStatus,
    /// 依存先名 → 結果
    pub checks: HashMap<String, CheckStatus>,
}

impl ReadinessResponse {
    /// 全件 `Ok` のときだけ `Ready` にする
    pub fn from_checks(checks: HashMap<String, CheckStatus>) -> Self {
        let status = if checks.values().all(|check| *check == CheckStatus::Ok) {
            ReadinessStatus::Ready
        } else {
            ReadinessStatus::NotReady
        };
        Self { status, checks }
    }
}
