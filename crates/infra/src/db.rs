//! # MongoDB 接続管理
//!
//! クライアントの作成、利用するデータベースの決定、疎通確認を行う。
//!
//! ## 設計方針
//!
//! - **クライアント共有**: `mongodb::Client` は内部に接続プールを持つため、
//!   起動時に 1 度だけ作成してアプリケーション全体で共有する
//! - **遅延接続**: クライアント作成時点ではサーバーに接続しない。
//!   起動時の疎通確認は [`DatabaseProbe::ping`] で明示的に行う
//! - **データベース名**: 接続文字列のパスで指定されたものを使い、
//!   指定がなければ [`DEFAULT_DATABASE`] を使う

use async_trait::async_trait;
use mongodb::{Client, Database, bson::doc, options::ClientOptions};

use crate::error::InfraError;

/// 接続文字列にデータベース名がない場合に使うデータベース
pub const DEFAULT_DATABASE: &str = "test";

/// アプリケーション名（サーバー側のログ・`currentOp` に表示される）
const APP_NAME: &str = "feedback-service";

/// MongoDB クライアントを作成する
///
/// # 引数
///
/// * `uri` - `mongodb://` または `mongodb+srv://` 形式の接続文字列
///
/// # エラー
///
/// 接続文字列が不正な場合（SRV レコードの解決失敗を含む）に `InfraError` を返す。
pub async fn create_client(uri: &str) -> Result<Client, InfraError> {
    let mut options = ClientOptions::parse(uri).await?;
    options.app_name = Some(APP_NAME.to_string());

    Ok(Client::with_options(options)?)
}

/// 利用するデータベースを返す
pub fn database(client: &Client) -> Database {
    client
        .default_database()
        .unwrap_or_else(|| client.database(DEFAULT_DATABASE))
}

/// データベースの疎通確認
///
/// readiness チェックと起動時の接続確認で使う。
#[async_trait]
pub trait DatabaseProbe: Send + Sync {
    async fn ping(&self) -> Result<(), InfraError>;
}

/// MongoDB の `ping` コマンドによる疎通確認
#[derive(Debug, Clone)]
pub struct MongoDatabaseProbe {
    database: Database,
}

impl MongoDatabaseProbe {
    pub fn new(database: Database) -> Self {
        Self { database }
    }
}

#[async_trait]
impl DatabaseProbe for MongoDatabaseProbe {
    #[tracing::instrument(skip_all, level = "debug")]
    async fn ping(&self) -> Result<(), InfraError> {
        self.database.run_command(doc! { "ping": 1 }).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_パスにデータベース名があればそれを使う() {
        let client = create_client("mongodb://localhost:27017/feedback")
            .await
            .unwrap();

        assert_eq!(database(&client).name(), "feedback");
    }

    #[tokio::test]
    async fn test_データベース名がなければdefault_databaseを使う() {
        let client = create_client("mongodb://localhost:27017").await.unwrap();

        assert_eq!(database(&client).name(), DEFAULT_DATABASE);
    }

    #[tokio::test]
    async fn test_不正な接続文字列はエラーになる() {
        assert!(create_client("postgres://localhost/feedback").await.is_err());
    }

    #[test]
    fn トレイトはsendとsyncを実装している() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<MongoDatabaseProbe>();
    }
}
