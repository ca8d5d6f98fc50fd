//! # HTTP リクエストハンドラ
//!
//! axum のルートに対応するハンドラ関数を定義する。
//!
//! - 各ハンドラはサブモジュールに配置し、ここで re-export する
//! - ハンドラは薄く保ち、ロジックはユースケース層に委譲する

pub mod feedback;
pub mod health;

pub use feedback::{FeedbackState, SUBMITTED_MESSAGE, SubmitFeedbackRequest, submit_feedback};
pub use health::{ReadinessState, health_check, readiness_check};
