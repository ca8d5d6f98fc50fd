//! # ユースケース層
//!
//! ハンドラから呼ばれるアプリケーションロジックを定義する。

pub mod feedback;
pub mod notification;

pub use feedback::{FeedbackUseCase, FeedbackUseCaseImpl, SubmitFeedbackInput, SubmitFeedbackOutput};
pub use notification::NotificationDispatcher;
