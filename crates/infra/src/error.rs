//! # インフラ層のエラー
//!
//! MongoDB とのやり取りで起きた失敗を、発生箇所のスパン情報と一緒に運ぶ。
//!
//! [`InfraError`] は種別 [`InfraErrorKind`] と、生成時点で取得した
//! [`SpanTrace`] を束ねる。ハンドラ層は 500 を返す前に `span_trace()` を
//! ログへ出し、どのユースケースの中で保存が失敗したかを追えるようにする。
//!
//! `?` でドライバのエラーを変換した時点、または [`InfraError::unavailable`]
//! を呼んだ時点でトレースが取られる。

use std::fmt;

use derive_more::Display;
use thiserror::Error;
use tracing_error::SpanTrace;

/// 保存・疎通確認の失敗
#[derive(Display)]
#[display("{kind}")]
pub struct InfraError {
    kind:       InfraErrorKind,
    span_trace: SpanTrace,
}

/// [`InfraError`] の中身
#[derive(Debug, Error)]
pub enum InfraErrorKind {
    /// ドライバが返したエラー（接続・書き込み・BSON 変換）
    #[error("MongoDB エラー: {0}")]
    Database(#[source] mongodb::error::Error),

    /// ドライバを介さずに判明した利用不可状態
    #[error("MongoDB を利用できません: {0}")]
    Unavailable(String),
}

impl InfraError {
    pub fn kind(&self) -> &InfraErrorKind {
        &self.kind
    }

    pub fn span_trace(&self) -> &SpanTrace {
        &self.span_trace
    }

    /// 利用不可エラーを現在のスパン付きで作る
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self::with_trace(InfraErrorKind::Unavailable(reason.into()))
    }

    fn with_trace(kind: InfraErrorKind) -> Self {
        Self {
            kind,
            span_trace: SpanTrace::capture(),
        }
    }
}

impl fmt::Debug for InfraError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InfraError")
            .field("kind", &self.kind)
            .field("span_trace", &self.span_trace)
            .finish()
    }
}

impl std::error::Error for InfraError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        std::error::Error::source(&self.kind)
    }
}

impl From<mongodb::error::Error> for InfraError {
    fn from(source: mongodb::error::Error) -> Self {
        Self::with_trace(InfraErrorKind::Database(source))
    }
}
