//! # 通知ユースケース
//!
//! フィードバック受付時のメール通知を担当する。

mod dispatcher;
mod template_renderer;

pub use dispatcher::NotificationDispatcher;
pub use template_renderer::TemplateRenderer;
