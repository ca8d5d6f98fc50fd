//! # Feedback インフラ層
//!
//! 外部システムとの接続・通信を担当するインフラストラクチャ層。
//!
//! ## 責務
//!
//! - **データベース接続**: MongoDB クライアントの作成と疎通確認
//! - **リポジトリ実装**: フィードバック記録の永続化
//! - **メール送信**: SMTP リレー経由の通知送信
//!
//! ## 依存関係
//!
//! ```text
//! feedback-service → infra → domain
//! ```
//!
//! ## モジュール構成
//!
//! - [`db`] - MongoDB 接続管理
//! - [`error`] - インフラ層エラー定義
//! - [`notification`] - メール送信
//! - [`repository`] - リポジトリ実装

pub mod db;
pub mod error;
#[cfg(any(test, feature = "test-utils"))]
pub mod mock;
pub mod notification;
pub mod repository;

pub use db::{DatabaseProbe, MongoDatabaseProbe};
pub use error::{InfraError, InfraErrorKind};
