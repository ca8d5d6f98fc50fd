//! # 通知送信
//!
//! メール通知の送信を担当するインフラストラクチャモジュール。
//!
//! ## 設計方針
//!
//! - **trait による抽象化**: `NotificationSender` trait で接続確認と送信を抽象化
//! - **リクエスト毎の構築**: 送信設定はリクエストのたびに解決されるため、
//!   トランスポートも `MailTransportFactory` で毎回組み立てる
//! - **テスト差し替え**: ファクトリを差し替えれば、ネットワークに出ずに
//!   構築の有無・送信内容を検証できる

mod smtp;

use async_trait::async_trait;
use feedback_domain::notification::{EmailMessage, NotificationError, SmtpSettings};
pub use smtp::{SmtpNotificationSender, SmtpTransportFactory};

/// メール送信トレイト
#[async_trait]
pub trait NotificationSender: Send + Sync {
    /// サーバーへの接続と認証を確認する
    async fn verify(&self) -> Result<(), NotificationError>;

    /// メールを送信する
    async fn send_email(&self, email: &EmailMessage) -> Result<(), NotificationError>;
}

/// 解決済み設定から送信実装を組み立てるファクトリ
pub trait MailTransportFactory: Send + Sync {
    fn build(
        &self,
        settings: &SmtpSettings,
    ) -> Result<Box<dyn NotificationSender>, NotificationError>;
}
