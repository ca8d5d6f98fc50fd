//! # Feedback ドメイン層
//!
//! フィードバック受付のビジネスルールを表現するドメインモデルを定義する。
//!
//! ## 設計方針
//!
//! - **エンティティ**: 永続化済みのフィードバック（[`feedback::Feedback`]）
//! - **値オブジェクト**: 検証済みの未保存フィードバック（[`feedback::NewFeedback`]）
//! - **通知モデル**: メールメッセージと通知結果（[`notification`]）
//! - **ドメインエラー**: ビジネスルール違反を表現するエラー型
//!
//! ## 依存関係の方向
//!
//! ```text
//! feedback-service → infra → domain
//! ```
//!
//! ドメイン層はインフラ層（MongoDB、SMTP）に一切依存しない。
//!
//! ## 使用例
//!
//! ```rust
//! use feedback_domain::{DomainError, feedback::NewFeedback};
//!
//! let feedback = NewFeedback::new("Ada", "Lovelace", "ada@example.com", "hi").unwrap();
//! assert_eq!(feedback.full_name(), "Ada Lovelace");
//!
//! let error = NewFeedback::new("", "Lovelace", "ada@example.com", "hi").unwrap_err();
//! assert!(matches!(error, DomainError::Validation(_)));
//! ```

pub mod clock;
pub mod error;
pub mod feedback;
pub mod notification;

pub use error::DomainError;
