//! # 通知
//!
//! フィードバック受付時のメール通知に関するドメインモデルを定義する。
//!
//! ## ドメイン用語
//!
//! | 型 | ドメイン用語 | 説明 |
//! |---|------------|------|
//! | [`MailConfig`] | メール設定（未解決） | 起動時に環境から取り込んだ生の値 |
//! | [`SmtpSettings`] | メール設定（解決済み） | 正規化・妥当性確認を経た送信設定 |
//! | [`NotificationOutcome`] | 通知結果 | Skipped / Failed / Sent の 3 状態 |
//!
//! ## 設計方針
//!
//! - **fire-and-forget**: 通知の失敗はフィードバック受付の結果に影響しない
//! - **リクエスト毎に解決**: `MailConfig` は起動時に 1 度だけ作るが、
//!   `SmtpSettings` への解決は送信のたびに行い、キャッシュしない
//! - **結果の明示**: 呼び出し元は結果を捨てるが、ログとテストのために 3 状態で返す

use std::fmt;

use strum::IntoStaticStr;
use thiserror::Error;

/// 暗黙 TLS（SMTPS）を使うポート番号
pub const IMPLICIT_TLS_PORT: u16 = 465;

/// プレースホルダとみなすホスト名の部分文字列
const PLACEHOLDER_HOST_MARKERS: [&str; 2] = ["example", "placeholder"];

/// パスワードのコピー&ペーストで紛れ込むノーブレークスペース
const NO_BREAK_SPACE: char = '\u{00A0}';

/// 通知送信エラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NotificationError {
    /// トランスポートの構築に失敗
    #[error("トランスポートの構築に失敗: {0}")]
    TransportBuild(String),

    /// 接続・認証の確認に失敗
    #[error("SMTP 接続確認に失敗: {0}")]
    VerifyFailed(String),

    /// 送信元・宛先アドレスが不正
    #[error("メールアドレスが不正: {0}")]
    InvalidAddress(String),

    /// メール送信に失敗
    #[error("メール送信に失敗: {0}")]
    SendFailed(String),

    /// テンプレートレンダリングに失敗
    #[error("テンプレートレンダリングに失敗: {0}")]
    TemplateFailed(String),
}

/// 送信を見送った理由
#[derive(Debug, Clone, Copy, PartialEq, Eq, IntoStaticStr, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum SkipReason {
    /// host / port / user / pass のいずれかが未設定
    NotConfigured,
    /// ホスト名がプレースホルダ
    PlaceholderHost,
}

/// 通知結果
#[derive(Debug, Clone, PartialEq, Eq, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum NotificationOutcome {
    /// 設定不備により送信しなかった（トランスポートは構築していない）
    Skipped(SkipReason),
    /// 接続確認または送信に失敗した
    Failed(NotificationError),
    /// 送信に成功した
    Sent,
}

impl NotificationOutcome {
    pub fn is_sent(&self) -> bool {
        matches!(self, Self::Sent)
    }
}

/// メールメッセージ
///
/// テンプレートレンダリングの出力。NotificationSender に渡される。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailMessage {
    /// 送信元メールアドレス
    pub from:      String,
    /// 送信先メールアドレス
    pub to:        String,
    /// 件名
    pub subject:   String,
    /// プレーンテキスト本文
    pub text_body: String,
}

/// TLS の使い方
#[derive(Debug, Clone, Copy, PartialEq, Eq, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum TlsMode {
    /// 接続直後から TLS（ポート 465）
    Implicit,
    /// サーバーが対応していれば STARTTLS で昇格
    Opportunistic,
}

/// 起動時に取り込んだ未解決のメール設定
///
/// 各値は環境変数の生の値。空文字列は未設定と同じに扱う。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MailConfig {
    /// `SMTP_HOST`
    pub host:     Option<String>,
    /// `SMTP_PORT`
    pub port:     Option<String>,
    /// `SMTP_USER`
    pub user:     Option<String>,
    /// `SMTP_PASS`
    pub password: Option<String>,
    /// `EMAIL_FROM`
    pub from:     Option<String>,
    /// `EMAIL_TO`
    pub to:       Option<String>,
}

impl MailConfig {
    /// 送信に使える設定へ解決する
    ///
    /// 1. host / user はトリム、password は U+00A0 を除去してからトリム、port はトリムして数値化
    /// 2. いずれかが空（port は 0 または数値でない）なら [`SkipReason::NotConfigured`]
    /// 3. host が `example` / `placeholder` を含むなら [`SkipReason::PlaceholderHost`]
    ///
    /// 送信元は `from`（空でなければ）→ user、宛先は `to`（空でなければ）→ 送信元の順に決める。
    pub fn resolve(&self) -> Result<SmtpSettings, SkipReason> {
        let host = normalized(self.host.as_deref());
        let port = self
            .port
            .as_deref()
            .and_then(|p| p.trim().parse::<u16>().ok())
            .filter(|p| *p != 0);
        let username = normalized(self.user.as_deref());
        let password = self
            .password
            .as_deref()
            .map(normalize_password)
            .filter(|p| !p.is_empty());

        let (Some(host), Some(port), Some(username), Some(password)) =
            (host, port, username, password)
        else {
            return Err(SkipReason::NotConfigured);
        };

        if is_placeholder_host(&host) {
            return Err(SkipReason::PlaceholderHost);
        }

        let from = non_empty(self.from.as_deref()).unwrap_or_else(|| username.clone());
        let to = non_empty(self.to.as_deref()).unwrap_or_else(|| from.clone());

        Ok(SmtpSettings {
            host,
            port,
            username,
            password,
            from,
            to,
        })
    }
}

/// パスワードから U+00A0 を取り除き、前後の空白を削る
pub fn normalize_password(raw: &str) -> String {
    raw.chars()
        .filter(|c| *c != NO_BREAK_SPACE)
        .collect::<String>()
        .trim()
        .to_string()
}

/// ホスト名がプレースホルダかどうか（大文字小文字を区別する）
pub fn is_placeholder_host(host: &str) -> bool {
    PLACEHOLDER_HOST_MARKERS
        .iter()
        .any(|marker| host.contains(marker))
}

fn normalized(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value.filter(|v| !v.is_empty()).map(str::to_string)
}

/// 解決済みの SMTP 送信設定
#[derive(Clone, PartialEq, Eq)]
pub struct SmtpSettings {
    pub host:     String,
    pub port:     u16,
    pub username: String,
    pub password: String,
    pub from:     String,
    pub to:       String,
}

impl SmtpSettings {
    pub fn tls_mode(&self) -> TlsMode {
        if self.port == IMPLICIT_TLS_PORT {
            TlsMode::Implicit
        } else {
            TlsMode::Opportunistic
        }
    }

    /// ユーザー名がメールアドレス形式に見えるか
    ///
    /// プロバイダによってはログイン名にメールアドレス全体を要求する。
    /// 判定は警告にのみ使い、送信は止めない。
    pub fn username_looks_like_email(&self) -> bool {
        self.username.contains('@')
    }
}

impl fmt::Debug for SmtpSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SmtpSettings")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .field("from", &self.from)
            .field("to", &self.to)
            .finish()
    }
}
