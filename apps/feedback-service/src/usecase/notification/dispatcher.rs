//! # 通知ディスパッチャ
//!
//! メール設定の解決 → トランスポート構築 → 接続確認 → 送信を統合する。
//!
//! ## 状態遷移（リクエスト毎、永続化しない）
//!
//! ```text
//! Configure ─(欠落)──────────────▶ Skipped(NotConfigured)
//!     │
//! Placeholder-check ─(該当)──────▶ Skipped(PlaceholderHost)
//!     │
//! Heuristic-warn（警告のみ）
//!     │
//! Build ─(失敗)──────────────────▶ Failed
//!     │
//! Verify ─(失敗)─────────────────▶ Failed
//!     │
//! Send ─(失敗)───────────────────▶ Failed
//!     │
//!     ▼
//!   Sent
//! ```
//!
//! - **fire-and-forget**: `dispatch()` はエラーを返さない。結果はログとテストのためだけに返す
//! - **リトライなし**: どの段階の失敗も 1 度きりで終える

use std::sync::Arc;

use feedback_domain::{
    feedback::Feedback,
    notification::{MailConfig, NotificationError, NotificationOutcome, SkipReason, SmtpSettings},
};
use feedback_infra::notification::MailTransportFactory;
use feedback_shared::{
    event_log::{error as log_error, event},
    log_business_event,
};

use super::TemplateRenderer;

/// 通知ディスパッチャ
pub struct NotificationDispatcher {
    config:   Arc<MailConfig>,
    factory:  Arc<dyn MailTransportFactory>,
    renderer: TemplateRenderer,
}

impl NotificationDispatcher {
    pub fn new(
        config: Arc<MailConfig>,
        factory: Arc<dyn MailTransportFactory>,
    ) -> Result<Self, NotificationError> {
        Ok(Self {
            config,
            factory,
            renderer: TemplateRenderer::new()?,
        })
    }

    /// フィードバック受付の通知を送る（fire-and-forget）
    #[tracing::instrument(skip_all, fields(feedback.id = %feedback.id()))]
    pub async fn dispatch(&self, feedback: &Feedback) -> NotificationOutcome {
        let settings = match self.config.resolve() {
            Ok(settings) => settings,
            Err(reason) => return self.skipped(feedback, reason),
        };

        if !settings.username_looks_like_email() {
            tracing::warn!(
                smtp.user = %settings.username,
                "SMTP_USER がメールアドレス形式ではありません。プロバイダによってはメールアドレス全体が必要です"
            );
        }

        let sender = match self.factory.build(&settings) {
            Ok(sender) => sender,
            Err(e) => return self.failed(feedback, &settings, e),
        };

        if let Err(e) = sender.verify().await {
            return self.failed(feedback, &settings, e);
        }

        let email = match self.renderer.render(feedback, &settings.from, &settings.to) {
            Ok(email) => email,
            Err(e) => return self.failed(feedback, &settings, e),
        };

        if let Err(e) = sender.send_email(&email).await {
            return self.failed(feedback, &settings, e);
        }

        log_business_event!(
            event.category = event::category::NOTIFICATION,
            event.action = event::action::NOTIFICATION_SENT,
            event.entity_type = event::entity_type::FEEDBACK,
            event.entity_id = %feedback.id(),
            event.result = event::result::SUCCESS,
            notification.recipient = %email.to,
            "通知メール送信成功"
        );
        NotificationOutcome::Sent
    }

    fn skipped(&self, feedback: &Feedback, reason: SkipReason) -> NotificationOutcome {
        match reason {
            SkipReason::NotConfigured => {
                tracing::info!("メール送信が設定されていないため、通知メールをスキップします");
            }
            SkipReason::PlaceholderHost => {
                tracing::warn!(
                    smtp.host = self.config.host.as_deref().unwrap_or_default().trim(),
                    "SMTP ホストがプレースホルダのため、通知メールをスキップします"
                );
            }
        }

        log_business_event!(
            event.category = event::category::NOTIFICATION,
            event.action = event::action::NOTIFICATION_SKIPPED,
            event.entity_type = event::entity_type::FEEDBACK,
            event.entity_id = %feedback.id(),
            event.result = event::result::SKIPPED,
            notification.skip_reason = %reason,
            "通知メールをスキップ"
        );
        NotificationOutcome::Skipped(reason)
    }

    fn failed(
        &self,
        feedback: &Feedback,
        settings: &SmtpSettings,
        error: NotificationError,
    ) -> NotificationOutcome {
        tracing::error!(
            error.category = log_error::category::EXTERNAL_SERVICE,
            error.kind = log_error::kind::SMTP,
            smtp.host = %settings.host,
            smtp.port = settings.port,
            error = %error,
            "フィードバック通知メールの送信に失敗しました"
        );

        log_business_event!(
            event.category = event::category::NOTIFICATION,
            event.action = event::action::NOTIFICATION_FAILED,
            event.entity_type = event::entity_type::FEEDBACK,
            event.entity_id = %feedback.id(),
            event.result = event::result::FAILURE,
            error = %error,
            "通知メール送信失敗"
        );
        NotificationOutcome::Failed(error)
    }
}
