//! # テンプレートレンダラー
//!
//! tera テンプレートエンジンで通知メールのプレーンテキスト本文を生成する。
//!
//! - **`include_str!` によるコンパイル時埋め込み**: テンプレートはバイナリに埋め込まれる
//! - **件名パターン**: `New feedback from {firstName} {lastName}`

use feedback_domain::{
    feedback::Feedback,
    notification::{EmailMessage, NotificationError},
};
use tera::{Context, Tera};

const FEEDBACK_RECEIVED_TEMPLATE: &str = "feedback_received.txt";

/// テンプレートレンダラー
pub struct TemplateRenderer {
    engine: Tera,
}

impl TemplateRenderer {
    pub fn new() -> Result<Self, NotificationError> {
        let mut engine = Tera::default();

        engine
            .add_raw_template(
                FEEDBACK_RECEIVED_TEMPLATE,
                include_str!("../../../templates/notifications/feedback_received.txt"),
            )
            .map_err(|e| NotificationError::TemplateFailed(e.to_string()))?;

        Ok(Self { engine })
    }

    /// フィードバックから通知メールを生成する
    pub fn render(
        &self,
        feedback: &Feedback,
        from: &str,
        to: &str,
    ) -> Result<EmailMessage, NotificationError> {
        let mut context = Context::new();
        context.insert("first_name", feedback.first_name());
        context.insert("last_name", feedback.last_name());
        context.insert("email", feedback.email());
        context.insert("message", feedback.message());

        let text_body = self
            .engine
            .render(FEEDBACK_RECEIVED_TEMPLATE, &context)
            .map_err(|e| NotificationError::TemplateFailed(e.to_string()))?;

        Ok(EmailMessage {
            from: from.to_string(),
            to: to.to_string(),
            subject: format!("New feedback from {}", feedback.full_name()),
            text_body,
        })
    }
}

#[cfg(test)]
mod tests {
    use chrono::DateTime;
    use feedback_domain::feedback::{FeedbackId, NewFeedback};
    use pretty_assertions::assert_eq;

    use super::*;

    fn feedback(message: &str) -> Feedback {
        NewFeedback::new("Ada", "Lovelace", "ada@example.com", message)
            .unwrap()
            .into_feedback(
                FeedbackId::new("000000000000000000000001"),
                DateTime::from_timestamp(1_700_000_000, 0).unwrap(),
            )
    }

    #[test]
    fn test_件名と本文が決まった形式で生成される() {
        let renderer = TemplateRenderer::new().unwrap();

        let email = renderer
            .render(&feedback("hi"), "from@mailhost.io", "to@mailhost.io")
            .unwrap();

        assert_eq!(email.from, "from@mailhost.io");
        assert_eq!(email.to, "to@mailhost.io");
        assert_eq!(email.subject, "New feedback from Ada Lovelace");
        assert_eq!(
            email.text_body,
            "Name: Ada Lovelace\nEmail: ada@example.com\n\nMessage:\nhi"
        );
    }

    #[test]
    fn test_本文はエスケープされない() {
        let renderer = TemplateRenderer::new().unwrap();

        let email = renderer
            .render(&feedback("<b>great</b> & \"fast\""), "a@b.io", "a@b.io")
            .unwrap();

        assert!(email.text_body.ends_with("Message:\n<b>great</b> & \"fast\""));
    }

    #[test]
    fn test_複数行のメッセージをそのまま埋め込む() {
        let renderer = TemplateRenderer::new().unwrap();

        let email = renderer
            .render(&feedback("line1\nline2"), "a@b.io", "a@b.io")
            .unwrap();

        assert!(email.text_body.ends_with("Message:\nline1\nline2"));
    }
}
