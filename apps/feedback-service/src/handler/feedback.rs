//! # フィードバック API ハンドラ
//!
//! ## エンドポイント
//!
//! ```text
//! POST /api/feedback
//! ```
//!
//! ## リクエスト例
//!
//! ```json
//! { "firstName": "Ada", "lastName": "Lovelace", "email": "ada@example.com", "message": "hi" }
//! ```
//!
//! ## レスポンス
//!
//! | 状況 | ステータス | ボディ |
//! |------|-----------|--------|
//! | 保存成功（通知の結果は問わない） | 201 | `{"message": "Feedback submitted successfully"}` |
//! | 必須フィールド欠落 / 保存失敗 | 500 | `{"error": "Server error"}` |
//! | JSON の構文として壊れている | 400 | `{"error": "Invalid request body"}` |
//!
//! ## ボディの解釈
//!
//! - `Content-Type` が JSON でない、またはボディが空なら全フィールド未入力として扱う
//! - 文字列・数値・真偽値のフィールドは文字列として受け取る（`123` → `"123"`）
//! - オブジェクト・配列・`null` のフィールドは未入力として扱う
//!
//! いずれもバリデーションで弾かれるので、400 になるのは構文エラーだけになる。

use std::sync::Arc;

use axum::{
    Json,
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode, header},
    response::IntoResponse,
};
use feedback_shared::MessageResponse;
use serde::Deserialize;
use serde_json::Value;

use crate::{
    error::FeedbackError,
    usecase::{FeedbackUseCase, SubmitFeedbackInput},
};

/// 受付成功時のメッセージ
pub const SUBMITTED_MESSAGE: &str = "Feedback submitted successfully";

/// フィードバック API の共有状態
pub struct FeedbackState {
    pub usecase: Arc<dyn FeedbackUseCase>,
}

/// フィードバック送信リクエスト
///
/// 値の型はここでは検査しない。文字列化できない値は [`SubmitFeedbackInput`] への
/// 変換で空文字列になり、ユースケースのバリデーションで弾かれる。
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitFeedbackRequest {
    pub first_name: Option<Value>,
    pub last_name:  Option<Value>,
    pub email:      Option<Value>,
    pub message:    Option<Value>,
}

impl SubmitFeedbackRequest {
    /// ヘッダーとボディからリクエストを組み立てる
    ///
    /// 構文エラーだけを [`FeedbackError::InvalidBody`] にする。
    pub fn decode(headers: &HeaderMap, body: &[u8]) -> Result<Self, FeedbackError> {
        if !is_json_content_type(headers) || body.trim_ascii().is_empty() {
            return Ok(Self::default());
        }

        match serde_json::from_slice(body) {
            Ok(req) => Ok(req),
            Err(e) if e.is_data() => {
                tracing::debug!(error = %e, "ボディの形がフィードバックと一致しません");
                Ok(Self::default())
            }
            Err(e) => Err(FeedbackError::InvalidBody(e.to_string())),
        }
    }
}

impl From<SubmitFeedbackRequest> for SubmitFeedbackInput {
    fn from(req: SubmitFeedbackRequest) -> Self {
        Self {
            first_name: scalar_text(req.first_name),
            last_name:  scalar_text(req.last_name),
            email:      scalar_text(req.email),
            message:    scalar_text(req.message),
        }
    }
}

/// スカラー値を文字列にする。それ以外は空文字列
fn scalar_text(value: Option<Value>) -> String {
    match value {
        Some(Value::String(s)) => s,
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        Some(Value::Null | Value::Array(_) | Value::Object(_)) | None => String::new(),
    }
}

/// `application/json` または `application/*+json`
fn is_json_content_type(headers: &HeaderMap) -> bool {
    let Some(content_type) = headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
    else {
        return false;
    };

    let essence = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();

    essence == "application/json"
        || (essence.starts_with("application/") && essence.ends_with("+json"))
}

/// POST /api/feedback
pub async fn submit_feedback(
    State(state): State<Arc<FeedbackState>>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<impl IntoResponse, FeedbackError> {
    let req = SubmitFeedbackRequest::decode(&headers, &body)?;

    let output = state.usecase.submit(req.into()).await?;

    let notification: &'static str = (&output.notification).into();
    tracing::debug!(
        feedback.id = %output.feedback.id(),
        notification,
        "フィードバック受付が完了しました"
    );

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new(SUBMITTED_MESSAGE)),
    ))
}

#[cfg(test)]
mod tests {
    use axum::http::HeaderValue;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    fn json_headers() -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers
    }

    fn decode_input(headers: &HeaderMap, body: &str) -> SubmitFeedbackInput {
        SubmitFeedbackRequest::decode(headers, body.as_bytes())
            .unwrap()
            .into()
    }

    #[test]
    fn test_リクエストはキャメルケースのフィールドを受け付ける() {
        let input = decode_input(
            &json_headers(),
            r#"{"firstName":"Ada","lastName":"Lovelace","email":"ada@example.com","message":"hi"}"#,
        );

        assert_eq!(input.first_name, "Ada");
        assert_eq!(input.last_name, "Lovelace");
        assert_eq!(input.email, "ada@example.com");
        assert_eq!(input.message, "hi");
    }

    #[test]
    fn test_欠落とnullのフィールドは空文字列になる() {
        let input = decode_input(&json_headers(), r#"{"firstName":null,"email":"ada@example.com"}"#);

        assert_eq!(input.first_name, "");
        assert_eq!(input.last_name, "");
        assert_eq!(input.message, "");
    }

    #[test]
    fn test_数値と真偽値は文字列として受け取る() {
        let input = decode_input(
            &json_headers(),
            r#"{"firstName":123,"lastName":true,"email":"a@b.c","message":1.5}"#,
        );

        assert_eq!(input.first_name, "123");
        assert_eq!(input.last_name, "true");
        assert_eq!(input.message, "1.5");
    }

    #[test]
    fn test_オブジェクトと配列のフィールドは空文字列になる() {
        let input = decode_input(
            &json_headers(),
            r#"{"firstName":{"$gt":""},"lastName":["Lovelace"],"email":"a@b.c","message":"hi"}"#,
        );

        assert_eq!(input.first_name, "");
        assert_eq!(input.last_name, "");
    }

    #[rstest]
    #[case::空ボディ("")]
    #[case::空白のみ("  \n")]
    #[case::トップレベルが文字列(r#""Ada""#)]
    #[case::トップレベルがnull("null")]
    fn test_フィードバックの形でないボディは全項目未入力になる(#[case] body: &str) {
        let input = decode_input(&json_headers(), body);

        assert_eq!(input.first_name, "");
        assert_eq!(input.message, "");
    }

    #[test]
    fn test_content_typeがjsonでなければボディを読まない() {
        let mut headers = HeaderMap::new();
        headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("text/plain"));

        let input = decode_input(&headers, r#"{"firstName":"Ada"}"#);

        assert_eq!(input.first_name, "");
    }

    #[rstest]
    #[case("application/json; charset=utf-8")]
    #[case("Application/JSON")]
    #[case("application/vnd.feedback+json")]
    fn test_json系のcontent_typeを受け付ける(#[case] content_type: &'static str) {
        let mut headers = HeaderMap::new();
        headers.insert(header::CONTENT_TYPE, HeaderValue::from_static(content_type));

        let input = decode_input(&headers, r#"{"firstName":"Ada"}"#);

        assert_eq!(input.first_name, "Ada");
    }

    #[rstest]
    #[case::閉じていない("{not json")]
    #[case::途中で切れている(r#"{"firstName":"#)]
    fn test_構文エラーだけがinvalid_bodyになる(#[case] body: &str) {
        let result = SubmitFeedbackRequest::decode(&json_headers(), body.as_bytes());

        assert!(matches!(result, Err(FeedbackError::InvalidBody(_))));
    }
}
