//! # Feedback Service 設定
//!
//! 環境変数から Feedback Service の設定を読み込む。
//!
//! 起動時に 1 度だけ読み込み、以降は参照で渡す。
//! メール設定は生の値のまま保持し、送信のたびに解決する
//! （→ [`MailConfig::resolve`](feedback_domain::notification::MailConfig::resolve)）。

use feedback_domain::notification::MailConfig;
use thiserror::Error;

/// デフォルトのバインドアドレス
const DEFAULT_HOST: &str = "0.0.0.0";
/// デフォルトのポート番号
const DEFAULT_PORT: u16 = 5000;

/// 設定読み込みエラー
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} が設定されていません")]
    Missing(&'static str),

    #[error("{name} は有効なポート番号である必要があります: {value:?}")]
    InvalidPort { name: &'static str, value: String },
}

/// Feedback Service の設定
#[derive(Debug, Clone)]
pub struct FeedbackConfig {
    /// バインドアドレス
    pub host:      String,
    /// ポート番号
    pub port:      u16,
    /// MongoDB 接続文字列
    pub mongo_uri: String,
    /// メール通知設定（未解決）
    pub mail:      MailConfig,
}

impl FeedbackConfig {
    /// 環境変数から設定を読み込む
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// 任意の参照関数から設定を読み込む
    ///
    /// テストではプロセスの環境変数を書き換えずに値を注入するために使う。
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let host = lookup("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());
        let port = match lookup("PORT").filter(|v| !v.trim().is_empty()) {
            Some(value) => value.trim().parse().map_err(|_| ConfigError::InvalidPort {
                name: "PORT",
                value,
            })?,
            None => DEFAULT_PORT,
        };
        let mongo_uri = lookup("MONGO_URI")
            .filter(|v| !v.trim().is_empty())
            .ok_or(ConfigError::Missing("MONGO_URI"))?;

        Ok(Self {
            host,
            port,
            mongo_uri,
            mail: MailConfig {
                host:     lookup("SMTP_HOST"),
                port:     lookup("SMTP_PORT"),
                user:     lookup("SMTP_USER"),
                password: lookup("SMTP_PASS"),
                from:     lookup("EMAIL_FROM"),
                to:       lookup("EMAIL_TO"),
            },
        })
    }
}
