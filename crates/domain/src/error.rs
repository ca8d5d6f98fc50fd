//! # ドメイン層エラー定義
//!
//! ビジネスルール違反を表現するエラー型。
//!
//! API 境界ではエラー種別を区別しない（成功 / サーバーエラーの 2 値）。
//! 種別の判別はログと単体テストのために残している。

use thiserror::Error;

/// ドメイン層で発生するエラー
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DomainError {
    /// バリデーションエラー
    ///
    /// 必須フィールドの欠落・空文字列など、入力値がルールに違反している場合。
    #[error("バリデーションエラー: {0}")]
    Validation(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validationのメッセージに詳細が含まれる() {
        let error = DomainError::Validation("firstName は必須です".to_string());

        assert_eq!(
            error.to_string(),
            "バリデーションエラー: firstName は必須です"
        );
    }
}
