//! # アプリケーション構築
//!
//! ルーターとミドルウェアの構成を担当する。
//! `main.rs` はインフラ初期化とサーバー起動に集中する。

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use feedback_shared::observability::{MakeRequestUuidV7, make_request_span};
use tower_http::{
    cors::CorsLayer,
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::handler::{
    FeedbackState,
    ReadinessState,
    health_check,
    readiness_check,
    submit_feedback,
};

/// ルーターを構築する
///
/// レイヤーは下から順に適用される:
/// Request ID 付与 → トレーシングスパン → Request ID のレスポンス伝搬 → CORS。
pub fn build_app(feedback_state: Arc<FeedbackState>, readiness_state: Arc<ReadinessState>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/health/ready", get(readiness_check))
        .with_state(readiness_state)
        .route("/api/feedback", post(submit_feedback))
        .with_state(feedback_state)
        .layer(CorsLayer::permissive())
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http().make_span_with(make_request_span))
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuidV7))
}
