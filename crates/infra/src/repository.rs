//! # リポジトリ実装
//!
//! - **データベース抽象化**: MongoDB 固有の処理（ドキュメント形状、ID 採番）をカプセル化
//! - **テスタビリティ**: トレイト経由でモック可能な設計

pub mod feedback_repository;

pub use feedback_repository::{FEEDBACK_COLLECTION, FeedbackRepository, MongoFeedbackRepository};
