//! # Feedback Service サーバー
//!
//! Web フォームからのフィードバックを受け付け、MongoDB に保存したうえで
//! SMTP でメール通知を送る HTTP サービス。
//!
//! ## 処理の流れ
//!
//! ```text
//! POST /api/feedback
//!     │
//!     ├─ 1. 必須フィールドの検証
//!     ├─ 2. MongoDB `feedbacks` コレクションへ保存 ── 失敗 → 500
//!     └─ 3. SMTP 通知（ベストエフォート、失敗してもログのみ）
//!     │
//!     ▼
//! 201 {"message": "Feedback submitted successfully"}
//! ```
//!
//! ## 環境変数
//!
//! | 変数名 | 必須 | 説明 |
//! |--------|------|------|
//! | `HOST` | No | バインドアドレス（デフォルト: `0.0.0.0`） |
//! | `PORT` | No | ポート番号（デフォルト: `5000`） |
//! | `MONGO_URI` | **Yes** | MongoDB 接続 URI |
//! | `SMTP_HOST` / `SMTP_PORT` / `SMTP_USER` / `SMTP_PASS` | No | 揃っていなければ通知をスキップ |
//! | `EMAIL_FROM` / `EMAIL_TO` | No | 送信元 / 宛先の上書き |
//! | `LOG_FORMAT` | No | `json` で JSON ログ（デフォルト: pretty） |
//! | `RUST_LOG` | No | ログフィルタ |
//!
//! ## 起動方法
//!
//! ```bash
//! MONGO_URI=mongodb://localhost:27017/feedback cargo run -p feedback-service
//! ```

use std::{net::SocketAddr, sync::Arc};

use anyhow::Context;
use feedback_domain::clock::SystemClock;
use feedback_infra::{
    DatabaseProbe,
    MongoDatabaseProbe,
    db,
    notification::SmtpTransportFactory,
    repository::MongoFeedbackRepository,
};
use feedback_service::{
    app_builder::build_app,
    config::FeedbackConfig,
    handler::{FeedbackState, ReadinessState},
    usecase::{FeedbackUseCaseImpl, NotificationDispatcher},
};
use feedback_shared::observability::{TracingConfig, init_tracing};
use tokio::net::TcpListener;

/// Feedback Service サーバーのエントリーポイント
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env ファイルを読み込む（存在する場合）
    dotenvy::dotenv().ok();

    init_tracing(TracingConfig::from_env("feedback-service"));

    let config = FeedbackConfig::from_env().context("設定の読み込みに失敗しました")?;

    tracing::info!(
        "Feedback Service サーバーを起動します: {}:{}",
        config.host,
        config.port
    );

    // MongoDB クライアントの作成は URI の解釈のみで、接続は遅延される
    let client = db::create_client(&config.mongo_uri)
        .await
        .context("MongoDB クライアントの作成に失敗しました")?;
    let database = db::database(&client);

    // 接続できなくても起動は継続する。保存は各リクエストで失敗し 500 になる
    let probe = Arc::new(MongoDatabaseProbe::new(database.clone()));
    match probe.ping().await {
        Ok(()) => tracing::info!(database = %database.name(), "MongoDB に接続しました"),
        Err(e) => tracing::error!(
            error = %e,
            "MongoDB への接続に失敗しました。起動は継続します"
        ),
    }

    // 依存コンポーネントを初期化
    let dispatcher = NotificationDispatcher::new(
        Arc::new(config.mail.clone()),
        Arc::new(SmtpTransportFactory),
    )
    .context("通知テンプレートの読み込みに失敗しました")?;
    let usecase = FeedbackUseCaseImpl::new(
        MongoFeedbackRepository::new(&database),
        dispatcher,
        Arc::new(SystemClock),
    );

    let app = build_app(
        Arc::new(FeedbackState {
            usecase: Arc::new(usecase),
        }),
        Arc::new(ReadinessState { database: probe }),
    );

    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .context("バインドアドレスが不正です")?;
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("{addr} へのバインドに失敗しました"))?;

    tracing::info!("Feedback Service サーバーが起動しました: {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Ctrl+C を受けたらグレースフルシャットダウンを開始する
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "シグナルハンドラの登録に失敗しました");
    }
    tracing::info!("シャットダウンします");
}
