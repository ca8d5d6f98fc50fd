//! # フィードバック
//!
//! 利用者から送信されたフィードバックのエンティティと値オブジェクトを定義する。
//!
//! ## ドメイン用語
//!
//! | 型 | ドメイン用語 | 説明 |
//! |---|------------|------|
//! | [`NewFeedback`] | 受付前フィードバック | 必須フィールドを検証済みで、まだ保存されていない |
//! | [`Feedback`] | フィードバック記録 | ストアが ID を採番した永続化済みの記録 |
//! | [`FeedbackId`] | フィードバック ID | ストアが採番する識別子 |
//!
//! ## 設計方針
//!
//! - **生成時バリデーション**: `NewFeedback` は [`NewFeedback::new`] 経由でのみ作成でき、
//!   4 フィールドすべてが空でないことを保証する
//! - **不変性**: 保存後の記録を変更・削除する経路は存在しない
//! - **メール形式は検証しない**: 受け付けた値をそのまま保存・通知に使う

use chrono::{DateTime, Utc};
use derive_more::Display;
use serde::{Deserialize, Serialize};

use crate::DomainError;

/// フィードバック ID
///
/// ストアが採番した識別子の文字列表現（MongoDB では ObjectId の 16 進表記）。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[display("{_0}")]
pub struct FeedbackId(String);

impl FeedbackId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// 受付前のフィードバック（検証済み）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewFeedback {
    first_name: String,
    last_name:  String,
    email:      String,
    message:    String,
}

impl NewFeedback {
    /// 必須フィールドを検証してフィードバックを作成する
    ///
    /// # バリデーション
    ///
    /// - `first_name` / `last_name` / `email` / `message` が空でない
    ///   （空白のみも空とみなす）
    ///
    /// 値はトリムせずそのまま保持する。
    ///
    /// # エラー
    ///
    /// 最初に見つかった欠落フィールドを `DomainError::Validation` で返す。
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
        message: impl Into<String>,
    ) -> Result<Self, DomainError> {
        let first_name = require("firstName", first_name.into())?;
        let last_name = require("lastName", last_name.into())?;
        let email = require("email", email.into())?;
        let message = require("message", message.into())?;

        Ok(Self {
            first_name,
            last_name,
            email,
            message,
        })
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// 「名 姓」形式の氏名
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// ストアが採番した ID と作成日時を付与して記録に変換する
    pub fn into_feedback(self, id: FeedbackId, created_at: DateTime<Utc>) -> Feedback {
        Feedback {
            id,
            content: self,
            created_at,
        }
    }
}

fn require(field: &'static str, value: String) -> Result<String, DomainError> {
    if value.trim().is_empty() {
        return Err(DomainError::Validation(format!("{field} は必須です")));
    }
    Ok(value)
}

/// 永続化済みのフィードバック記録
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feedback {
    id:         FeedbackId,
    content:    NewFeedback,
    created_at: DateTime<Utc>,
}

impl Feedback {
    pub fn id(&self) -> &FeedbackId {
        &self.id
    }

    pub fn first_name(&self) -> &str {
        self.content.first_name()
    }

    pub fn last_name(&self) -> &str {
        self.content.last_name()
    }

    pub fn email(&self) -> &str {
        self.content.email()
    }

    pub fn message(&self) -> &str {
        self.content.message()
    }

    pub fn full_name(&self) -> String {
        self.content.full_name()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::{fixture, rstest};

    use super::*;

    #[fixture]
    fn now() -> DateTime<Utc> {
        DateTime::from_timestamp(1_700_000_000, 0).unwrap()
    }

    #[fixture]
    fn ada() -> NewFeedback {
        NewFeedback::new("Ada", "Lovelace", "ada@example.com", "hi").unwrap()
    }

    #[rstest]
    fn test_4フィールドが揃っていれば作成できる(ada: NewFeedback) {
        assert_eq!(ada.first_name(), "Ada");
        assert_eq!(ada.last_name(), "Lovelace");
        assert_eq!(ada.email(), "ada@example.com");
        assert_eq!(ada.message(), "hi");
        assert_eq!(ada.full_name(), "Ada Lovelace");
    }

    #[rstest]
    #[case("", "Lovelace", "ada@example.com", "hi", "firstName")]
    #[case("Ada", "", "ada@example.com", "hi", "lastName")]
    #[case("Ada", "Lovelace", "", "hi", "email")]
    #[case("Ada", "Lovelace", "ada@example.com", "", "message")]
    #[case("Ada", "Lovelace", "ada@example.com", "  \n", "message")]
    fn test_必須フィールドの欠落を拒否する(
        #[case] first_name: &str,
        #[case] last_name: &str,
        #[case] email: &str,
        #[case] message: &str,
        #[case] field: &str,
    ) {
        let error = NewFeedback::new(first_name, last_name, email, message).unwrap_err();

        assert_eq!(error, DomainError::Validation(format!("{field} は必須です")));
    }

    #[test]
    fn test_メール形式は検証しない() {
        assert!(NewFeedback::new("Ada", "Lovelace", "not-an-email", "hi").is_ok());
    }

    #[test]
    fn test_値はトリムせずに保持する() {
        let feedback = NewFeedback::new(" Ada ", "Lovelace", "ada@example.com", "hi\n").unwrap();

        assert_eq!(feedback.first_name(), " Ada ");
        assert_eq!(feedback.message(), "hi\n");
    }

    #[rstest]
    fn test_into_feedbackでidと作成日時が付与される(ada: NewFeedback, now: DateTime<Utc>) {
        let feedback = ada.clone().into_feedback(FeedbackId::new("65f1c0ffee"), now);

        assert_eq!(feedback.id().as_str(), "65f1c0ffee");
        assert_eq!(feedback.created_at(), now);
        assert_eq!(feedback.full_name(), ada.full_name());
        assert_eq!(feedback.email(), "ada@example.com");
    }
}
