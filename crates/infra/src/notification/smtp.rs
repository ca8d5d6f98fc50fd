//! SMTP 通知送信実装
//!
//! lettre の `AsyncSmtpTransport` を使用してメールを送信する。
//!
//! TLS はポートで決める:
//! - 465: 接続直後から TLS（`Tls::Wrapper`）
//! - それ以外: サーバーが対応していれば STARTTLS で昇格（`Tls::Opportunistic`）

use async_trait::async_trait;
use feedback_domain::notification::{EmailMessage, NotificationError, SmtpSettings, TlsMode};
use lettre::{
    AsyncSmtpTransport,
    AsyncTransport,
    Tokio1Executor,
    message::{Mailbox, Message, header::ContentType},
    transport::smtp::{
        authentication::Credentials,
        client::{Tls, TlsParameters},
    },
};

use super::{MailTransportFactory, NotificationSender};

/// SMTP 通知送信
///
/// `lettre::AsyncSmtpTransport<Tokio1Executor>` をラップする。
/// 構築時点では接続せず、`verify` / `send_email` の呼び出しで接続する。
pub struct SmtpNotificationSender {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    tls_mode:  TlsMode,
}

impl SmtpNotificationSender {
    /// 解決済み設定から SMTP 送信インスタンスを作成
    pub fn new(settings: &SmtpSettings) -> Result<Self, NotificationError> {
        let tls_parameters = TlsParameters::new(settings.host.clone())
            .map_err(|e| NotificationError::TransportBuild(format!("TLS 設定に失敗: {e}")))?;
        let tls_mode = settings.tls_mode();
        let tls = match tls_mode {
            TlsMode::Implicit => Tls::Wrapper(tls_parameters),
            TlsMode::Opportunistic => Tls::Opportunistic(tls_parameters),
        };

        let transport = AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(settings.host.as_str())
            .port(settings.port)
            .tls(tls)
            .credentials(Credentials::new(
                settings.username.clone(),
                settings.password.clone(),
            ))
            .build();

        Ok(Self {
            transport,
            tls_mode,
        })
    }

    /// 構築時に選んだ TLS の張り方
    pub fn tls_mode(&self) -> TlsMode {
        self.tls_mode
    }
}

#[async_trait]
impl NotificationSender for SmtpNotificationSender {
    async fn verify(&self) -> Result<(), NotificationError> {
        match self.transport.test_connection().await {
            Ok(true) => Ok(()),
            Ok(false) => Err(NotificationError::VerifyFailed(
                "サーバーが NOOP に応答しませんでした".to_string(),
            )),
            Err(e) => Err(NotificationError::VerifyFailed(format!(
                "{e}（TLS: {}）",
                <&'static str>::from(self.tls_mode)
            ))),
        }
    }

    async fn send_email(&self, email: &EmailMessage) -> Result<(), NotificationError> {
        let from: Mailbox = email.from.parse().map_err(|e| {
            NotificationError::InvalidAddress(format!("送信元アドレス不正 '{}': {e}", email.from))
        })?;
        let to: Mailbox = email.to.parse().map_err(|e| {
            NotificationError::InvalidAddress(format!("宛先アドレス不正 '{}': {e}", email.to))
        })?;

        let message = Message::builder()
            .from(from)
            .to(to)
            .subject(&email.subject)
            .header(ContentType::TEXT_PLAIN)
            .body(email.text_body.clone())
            .map_err(|e| NotificationError::SendFailed(format!("メッセージ構築失敗: {e}")))?;

        self.transport
            .send(message)
            .await
            .map_err(|e| NotificationError::SendFailed(format!("SMTP 送信失敗: {e}")))?;

        Ok(())
    }
}

/// `SmtpNotificationSender` を組み立てるファクトリ
#[derive(Debug, Clone, Copy, Default)]
pub struct SmtpTransportFactory;

impl MailTransportFactory for SmtpTransportFactory {
    fn build(
        &self,
        settings: &SmtpSettings,
    ) -> Result<Box<dyn NotificationSender>, NotificationError> {
        Ok(Box::new(SmtpNotificationSender::new(settings)?))
    }
}
