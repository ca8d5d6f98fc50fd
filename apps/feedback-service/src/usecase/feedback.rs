//! # フィードバック受付ユースケース
//!
//! バリデーション → 保存 → 通知（best-effort）の順に実行する。
//!
//! - 保存に失敗したら通知は試みない
//! - 通知の結果は受付の成否に影響しない

use std::sync::Arc;

use async_trait::async_trait;
use feedback_domain::{
    clock::Clock,
    feedback::{Feedback, NewFeedback},
    notification::NotificationOutcome,
};
use feedback_infra::repository::FeedbackRepository;
use feedback_shared::{event_log::event, log_business_event};

use super::notification::NotificationDispatcher;
use crate::error::FeedbackError;

/// 受付入力（未検証）
#[derive(Debug, Clone, Default)]
pub struct SubmitFeedbackInput {
    pub first_name: String,
    pub last_name:  String,
    pub email:      String,
    pub message:    String,
}

/// 受付結果
#[derive(Debug, Clone)]
pub struct SubmitFeedbackOutput {
    pub feedback:     Feedback,
    pub notification: NotificationOutcome,
}

/// フィードバック受付ユースケーストレイト
#[async_trait]
pub trait FeedbackUseCase: Send + Sync {
    async fn submit(&self, input: SubmitFeedbackInput) -> Result<SubmitFeedbackOutput, FeedbackError>;
}

/// フィードバック受付ユースケースの実装
pub struct FeedbackUseCaseImpl<R> {
    repository: R,
    dispatcher: NotificationDispatcher,
    clock:      Arc<dyn Clock>,
}

impl<R> FeedbackUseCaseImpl<R>
where
    R: FeedbackRepository,
{
    pub fn new(repository: R, dispatcher: NotificationDispatcher, clock: Arc<dyn Clock>) -> Self {
        Self {
            repository,
            dispatcher,
            clock,
        }
    }
}

#[async_trait]
impl<R> FeedbackUseCase for FeedbackUseCaseImpl<R>
where
    R: FeedbackRepository,
{
    #[tracing::instrument(skip_all)]
    async fn submit(&self, input: SubmitFeedbackInput) -> Result<SubmitFeedbackOutput, FeedbackError> {
        let new_feedback =
            NewFeedback::new(input.first_name, input.last_name, input.email, input.message)?;

        let feedback = self.repository.insert(new_feedback, self.clock.now()).await?;

        log_business_event!(
            event.category = event::category::FEEDBACK,
            event.action = event::action::FEEDBACK_SUBMITTED,
            event.entity_type = event::entity_type::FEEDBACK,
            event.entity_id = %feedback.id(),
            event.result = event::result::SUCCESS,
            "フィードバックを受け付けました"
        );

        let notification = self.dispatcher.dispatch(&feedback).await;

        Ok(SubmitFeedbackOutput {
            feedback,
            notification,
        })
    }
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, Utc};
    use feedback_domain::{
        DomainError,
        clock::FixedClock,
        notification::{MailConfig, SkipReason},
    };
    use feedback_infra::mock::{
        MockFeedbackRepository,
        MockMailTransportFactory,
        MockNotificationSender,
    };
    use pretty_assertions::assert_eq;
    use rstest::{fixture, rstest};

    use super::*;

    #[fixture]
    fn now() -> DateTime<Utc> {
        DateTime::from_timestamp(1_700_000_000, 0).unwrap()
    }

    fn ada() -> SubmitFeedbackInput {
        SubmitFeedbackInput {
            first_name: "Ada".to_string(),
            last_name:  "Lovelace".to_string(),
            email:      "ada@example.com".to_string(),
            message:    "hi".to_string(),
        }
    }

    fn working_mail_config() -> MailConfig {
        MailConfig {
            host:     Some("smtp.mailhost.io".to_string()),
            port:     Some("465".to_string()),
            user:     Some("notifier@mailhost.io".to_string()),
            password: Some("s3cret".to_string()),
            from:     None,
            to:       None,
        }
    }

    fn sut(
        repository: MockFeedbackRepository,
        mail: MailConfig,
        factory: &MockMailTransportFactory,
        now: DateTime<Utc>,
    ) -> FeedbackUseCaseImpl<MockFeedbackRepository> {
        let dispatcher =
            NotificationDispatcher::new(Arc::new(mail), Arc::new(factory.clone())).unwrap();
        FeedbackUseCaseImpl::new(repository, dispatcher, Arc::new(FixedClock::new(now)))
    }

    #[rstest]
    #[tokio::test]
    async fn test_保存して通知を送る(now: DateTime<Utc>) {
        let repository = MockFeedbackRepository::new();
        let factory = MockMailTransportFactory::new(MockNotificationSender::new());
        let usecase = sut(repository.clone(), working_mail_config(), &factory, now);

        let output = usecase.submit(ada()).await.unwrap();

        assert_eq!(output.notification, NotificationOutcome::Sent);
        assert_eq!(output.feedback.created_at(), now);
        assert_eq!(repository.records(), vec![output.feedback.clone()]);
        assert_eq!(factory.sender().sent_emails().len(), 1);
    }

    #[rstest]
    #[tokio::test]
    async fn test_メール未設定でも保存は成功する(now: DateTime<Utc>) {
        let repository = MockFeedbackRepository::new();
        let factory = MockMailTransportFactory::new(MockNotificationSender::new());
        let usecase = sut(repository.clone(), MailConfig::default(), &factory, now);

        let output = usecase.submit(ada()).await.unwrap();

        assert_eq!(
            output.notification,
            NotificationOutcome::Skipped(SkipReason::NotConfigured)
        );
        assert_eq!(repository.records().len(), 1);
        assert!(factory.built_settings().is_empty());
    }

    #[rstest]
    #[tokio::test]
    async fn test_保存に失敗したら通知しない(now: DateTime<Utc>) {
        let factory = MockMailTransportFactory::new(MockNotificationSender::new());
        let usecase = sut(
            MockFeedbackRepository::failing(),
            working_mail_config(),
            &factory,
            now,
        );

        let result = usecase.submit(ada()).await;

        assert!(matches!(result, Err(FeedbackError::Database(_))));
        assert!(factory.built_settings().is_empty());
        assert_eq!(factory.sender().verify_calls(), 0);
    }

    #[rstest]
    #[tokio::test]
    async fn test_必須フィールドが欠けたら保存も通知もしない(now: DateTime<Utc>) {
        let repository = MockFeedbackRepository::new();
        let factory = MockMailTransportFactory::new(MockNotificationSender::new());
        let usecase = sut(repository.clone(), working_mail_config(), &factory, now);
        let input = SubmitFeedbackInput {
            message: String::new(),
            ..ada()
        };

        let result = usecase.submit(input).await;

        assert!(matches!(
            result,
            Err(FeedbackError::Validation(DomainError::Validation(_)))
        ));
        assert!(repository.records().is_empty());
        assert!(factory.built_settings().is_empty());
    }
}
