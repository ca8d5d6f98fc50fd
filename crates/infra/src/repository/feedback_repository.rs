//! # FeedbackRepository
//!
//! フィードバック記録の永続化を担当するリポジトリ。
//!
//! ## 設計方針
//!
//! - **追記のみ**: 挿入だけを提供し、更新・削除の経路は持たない
//! - **ID 採番**: `_id` は挿入時にドライバ側で ObjectId を生成する
//!   （ObjectId は生成時刻を含むため、挿入順に並ぶ）
//! - **単一ドキュメント挿入**: `insert_one` の原子性に依存し、部分的な記録は残らない
//!
//! ## ドキュメント形状
//!
//! ```text
//! feedbacks: { _id: ObjectId, firstName, lastName, email, message, createdAt: Date }
//! ```

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use feedback_domain::feedback::{Feedback, FeedbackId, NewFeedback};
use mongodb::{
    Collection,
    Database,
    bson::{self, oid::ObjectId},
};
use serde::{Deserialize, Serialize};

use crate::error::InfraError;

/// フィードバックを格納するコレクション名
pub const FEEDBACK_COLLECTION: &str = "feedbacks";

/// フィードバックリポジトリトレイト
#[async_trait]
pub trait FeedbackRepository: Send + Sync {
    /// フィードバックを挿入し、採番済みの記録を返す
    async fn insert(
        &self,
        feedback: NewFeedback,
        created_at: DateTime<Utc>,
    ) -> Result<Feedback, InfraError>;
}

/// `feedbacks` コレクションのドキュメント
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FeedbackDocument {
    #[serde(rename = "_id")]
    id:         ObjectId,
    first_name: String,
    last_name:  String,
    email:      String,
    message:    String,
    created_at: bson::DateTime,
}

impl FeedbackDocument {
    fn new(id: ObjectId, feedback: &NewFeedback, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            first_name: feedback.first_name().to_string(),
            last_name: feedback.last_name().to_string(),
            email: feedback.email().to_string(),
            message: feedback.message().to_string(),
            created_at: bson::DateTime::from_millis(created_at.timestamp_millis()),
        }
    }
}

/// MongoDB 実装の FeedbackRepository
#[derive(Debug, Clone)]
pub struct MongoFeedbackRepository {
    collection: Collection<FeedbackDocument>,
}

impl MongoFeedbackRepository {
    pub fn new(database: &Database) -> Self {
        Self {
            collection: database.collection(FEEDBACK_COLLECTION),
        }
    }
}

#[async_trait]
impl FeedbackRepository for MongoFeedbackRepository {
    #[tracing::instrument(skip_all, level = "debug")]
    async fn insert(
        &self,
        feedback: NewFeedback,
        created_at: DateTime<Utc>,
    ) -> Result<Feedback, InfraError> {
        let id = ObjectId::new();
        let document = FeedbackDocument::new(id, &feedback, created_at);

        self.collection.insert_one(&document).await?;

        Ok(feedback.into_feedback(FeedbackId::new(id.to_hex()), created_at))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_ドキュメントはcamel_caseのキーで保存される() {
        let id = ObjectId::new();
        let created_at = DateTime::from_timestamp(1_700_000_000, 0).unwrap();
        let feedback = NewFeedback::new("Ada", "Lovelace", "ada@example.com", "hi").unwrap();

        let document = bson::to_document(&FeedbackDocument::new(id, &feedback, created_at)).unwrap();

        assert_eq!(document.get_object_id("_id").unwrap(), id);
        assert_eq!(document.get_str("firstName").unwrap(), "Ada");
        assert_eq!(document.get_str("lastName").unwrap(), "Lovelace");
        assert_eq!(document.get_str("email").unwrap(), "ada@example.com");
        assert_eq!(document.get_str("message").unwrap(), "hi");
        assert_eq!(
            document.get_datetime("createdAt").unwrap().timestamp_millis(),
            1_700_000_000_000
        );
        assert_eq!(document.len(), 6);
    }

    #[test]
    fn トレイトはsendとsyncを実装している() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<MongoFeedbackRepository>();
    }
}
