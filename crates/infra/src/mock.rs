//! # テスト用モック
//!
//! ユースケース・ハンドラのテストで使用するインメモリ実装。
//! `test-utils` feature を有効にすることで、他クレートからも利用可能。
//!
//! ```toml
//! [dev-dependencies]
//! feedback-infra = { workspace = true, features = ["test-utils"] }
//! ```

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use feedback_domain::{
    feedback::{Feedback, FeedbackId, NewFeedback},
    notification::{EmailMessage, NotificationError, SmtpSettings},
};

use crate::{
    db::DatabaseProbe,
    error::InfraError,
    notification::{MailTransportFactory, NotificationSender},
    repository::FeedbackRepository,
};

// ===== MockFeedbackRepository =====

#[derive(Clone, Default)]
pub struct MockFeedbackRepository {
    records: Arc<Mutex<Vec<Feedback>>>,
    failing: bool,
}

impl MockFeedbackRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// 常に挿入に失敗するリポジトリ（接続断の再現用）
    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Self::default()
        }
    }

    pub fn records(&self) -> Vec<Feedback> {
        self.records.lock().unwrap().clone()
    }
}

#[async_trait]
impl FeedbackRepository for MockFeedbackRepository {
    async fn insert(
        &self,
        feedback: NewFeedback,
        created_at: DateTime<Utc>,
    ) -> Result<Feedback, InfraError> {
        if self.failing {
            return Err(InfraError::unavailable("接続が切断されました"));
        }

        let mut records = self.records.lock().unwrap();
        let id = FeedbackId::new(format!("{:024x}", records.len() + 1));
        let stored = feedback.into_feedback(id, created_at);
        records.push(stored.clone());
        Ok(stored)
    }
}

// ===== MockNotificationSender =====

#[derive(Clone, Default)]
pub struct MockNotificationSender {
    sent:         Arc<Mutex<Vec<EmailMessage>>>,
    verify_calls: Arc<Mutex<usize>>,
    verify_error: Option<NotificationError>,
    send_error:   Option<NotificationError>,
}

impl MockNotificationSender {
    pub fn new() -> Self {
        Self::default()
    }

    /// 接続確認で失敗する送信実装
    pub fn failing_verify(error: NotificationError) -> Self {
        Self {
            verify_error: Some(error),
            ..Self::default()
        }
    }

    /// 送信で失敗する送信実装
    pub fn failing_send(error: NotificationError) -> Self {
        Self {
            send_error: Some(error),
            ..Self::default()
        }
    }

    pub fn sent_emails(&self) -> Vec<EmailMessage> {
        self.sent.lock().unwrap().clone()
    }

    pub fn verify_calls(&self) -> usize {
        *self.verify_calls.lock().unwrap()
    }
}

#[async_trait]
impl NotificationSender for MockNotificationSender {
    async fn verify(&self) -> Result<(), NotificationError> {
        *self.verify_calls.lock().unwrap() += 1;
        match &self.verify_error {
            Some(e) => Err(e.clone()),
            None => Ok(()),
        }
    }

    async fn send_email(&self, email: &EmailMessage) -> Result<(), NotificationError> {
        if let Some(e) = &self.send_error {
            return Err(e.clone());
        }
        self.sent.lock().unwrap().push(email.clone());
        Ok(())
    }
}

// ===== MockMailTransportFactory =====

/// 構築要求を記録し、共有の `MockNotificationSender` を返すファクトリ
#[derive(Clone, Default)]
pub struct MockMailTransportFactory {
    sender: MockNotificationSender,
    built:  Arc<Mutex<Vec<SmtpSettings>>>,
}

impl MockMailTransportFactory {
    pub fn new(sender: MockNotificationSender) -> Self {
        Self {
            sender,
            built: Arc::default(),
        }
    }

    pub fn sender(&self) -> &MockNotificationSender {
        &self.sender
    }

    /// `build` に渡された設定（構築回数の確認用）
    pub fn built_settings(&self) -> Vec<SmtpSettings> {
        self.built.lock().unwrap().clone()
    }
}

impl MailTransportFactory for MockMailTransportFactory {
    fn build(
        &self,
        settings: &SmtpSettings,
    ) -> Result<Box<dyn NotificationSender>, NotificationError> {
        self.built.lock().unwrap().push(settings.clone());
        Ok(Box::new(self.sender.clone()))
    }
}

// ===== MockDatabaseProbe =====

#[derive(Clone, Copy)]
pub struct MockDatabaseProbe {
    healthy: bool,
}

impl MockDatabaseProbe {
    pub fn healthy() -> Self {
        Self { healthy: true }
    }

    pub fn unhealthy() -> Self {
        Self { healthy: false }
    }
}

#[async_trait]
impl DatabaseProbe for MockDatabaseProbe {
    async fn ping(&self) -> Result<(), InfraError> {
        if self.healthy {
            Ok(())
        } else {
            Err(InfraError::unavailable("ping に失敗しました"))
        }
    }
}
