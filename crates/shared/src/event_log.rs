//! # 業務イベントのログ
//!
//! フィードバックの受付と通知の結末を、通常の診断ログと区別できる形で出す。
//! [`log_business_event!`] で出したレコードには `event.kind = "business_event"` が付く。
//! JSON ログ（`LOG_FORMAT=json`）ならキーはドット区切りのまま平坦に並ぶので、
//! 例えば通知のスキップ件数は次のように数えられる。
//!
//! ```text
//! jq 'select(.["event.action"] == "notification.skipped")' | wc -l
//! ```
//!
//! 値には下の定数を使い、文字列リテラルを散らさない。

/// 業務イベントを info レベルで出す
///
/// 呼び出し側は `event.category`・`event.action`・`event.entity_type`・
/// `event.entity_id`・`event.result` を渡す。残りの引数は `tracing::info!` と同じ。
///
/// ```
/// use feedback_shared::{event_log::event, log_business_event};
///
/// log_business_event!(
///     event.category = event::category::FEEDBACK,
///     event.action = event::action::FEEDBACK_SUBMITTED,
///     event.entity_type = event::entity_type::FEEDBACK,
///     event.entity_id = "65a4f0c2e13b5a0012345678",
///     event.result = event::result::SUCCESS,
///     "フィードバックを受け付けました"
/// );
/// ```
#[macro_export]
macro_rules! log_business_event {
    ($($fields:tt)*) => {
        ::tracing::info!(event.kind = "business_event", $($fields)*)
    };
}

/// `event.*` フィールドの値
pub mod event {
    pub mod category {
        pub const FEEDBACK: &str = "feedback";
        pub const NOTIFICATION: &str = "notification";
    }

    pub mod action {
        /// 保存まで完了した（通知の成否は別イベント）
        pub const FEEDBACK_SUBMITTED: &str = "feedback.submitted";

        pub const NOTIFICATION_SENT: &str = "notification.sent";
        pub const NOTIFICATION_FAILED: &str = "notification.failed";
        /// 設定不足またはプレースホルダのホスト
        pub const NOTIFICATION_SKIPPED: &str = "notification.skipped";
    }

    pub mod entity_type {
        pub const FEEDBACK: &str = "feedback";
    }

    pub mod result {
        pub const SUCCESS: &str = "success";
        pub const FAILURE: &str = "failure";
        pub const SKIPPED: &str = "skipped";
    }
}

/// `error.*` フィールドの値（失敗ログ用）
pub mod error {
    pub mod category {
        /// MongoDB
        pub const INFRASTRUCTURE: &str = "infrastructure";
        /// SMTP リレー
        pub const EXTERNAL_SERVICE: &str = "external_service";
        /// リクエストの中身
        pub const INPUT: &str = "input";
    }

    pub mod kind {
        pub const DATABASE: &str = "database";
        pub const SMTP: &str = "smtp";
        pub const VALIDATION: &str = "validation";
        pub const REQUEST_BODY: &str = "request_body";
    }
}

#[cfg(test)]
mod tests {
    use super::event;

    #[test]
    fn test_アクション名はカテゴリ名で始まる() {
        for action in [
            event::action::NOTIFICATION_SENT,
            event::action::NOTIFICATION_FAILED,
            event::action::NOTIFICATION_SKIPPED,
        ] {
            assert!(action.starts_with(event::category::NOTIFICATION), "{action}");
        }
        assert!(event::action::FEEDBACK_SUBMITTED.starts_with(event::category::FEEDBACK));
    }

    #[test]
    fn test_マクロはsubscriberなしでも呼び出せる() {
        log_business_event!(
            event.category = event::category::NOTIFICATION,
            event.action = event::action::NOTIFICATION_SKIPPED,
            event.entity_type = event::entity_type::FEEDBACK,
            event.entity_id = "000000000000000000000001",
            event.result = event::result::SKIPPED,
            "通知メールをスキップ"
        );
    }
}
