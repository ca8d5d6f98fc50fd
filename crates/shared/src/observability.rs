//! # ログとリクエスト追跡
//!
//! - `LOG_FORMAT` で pretty（既定）と JSON を切り替える
//! - `RUST_LOG` が無ければ [`DEFAULT_LOG_FILTER`] を使う
//! - `X-Request-Id` が無いリクエストには UUID v7 を振り、リクエストスパンに載せる
//!
//! subscriber には `tracing_error::ErrorLayer` も積むので、インフラ層のエラーが
//! 取得する `SpanTrace` にはリクエストスパン（`request_id` 付き）が含まれる。

/// ログの出力形式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// 1 行 1 JSON。フィールドはイベント直下に平坦化する
    Json,
    #[default]
    Pretty,
}

impl LogFormat {
    /// `LOG_FORMAT` の値を解釈する
    ///
    /// 大文字小文字は区別しない。未知の値は pretty に倒し、その旨を stderr に出す
    /// （subscriber がまだ無いので tracing には出せない）。
    pub fn from_value(value: Option<&str>) -> Self {
        let Some(raw) = value.map(str::trim).filter(|v| !v.is_empty()) else {
            return Self::default();
        };

        if raw.eq_ignore_ascii_case("json") {
            Self::Json
        } else if raw.eq_ignore_ascii_case("pretty") {
            Self::Pretty
        } else {
            eprintln!("LOG_FORMAT={raw:?} は未対応のため pretty で出力します");
            Self::Pretty
        }
    }

    pub fn from_env() -> Self {
        Self::from_value(std::env::var("LOG_FORMAT").ok().as_deref())
    }
}

/// [`init_tracing`] への入力
#[derive(Debug, Clone)]
pub struct TracingConfig {
    pub service_name: String,
    pub log_format:   LogFormat,
}

impl TracingConfig {
    pub fn new(service_name: impl Into<String>, log_format: LogFormat) -> Self {
        Self {
            service_name: service_name.into(),
            log_format,
        }
    }

    pub fn from_env(service_name: impl Into<String>) -> Self {
        Self::new(service_name, LogFormat::from_env())
    }
}

pub const DEFAULT_LOG_FILTER: &str = "info,feedback_service=debug,feedback_infra=debug";

/// グローバル subscriber を登録する。プロセスで 1 度だけ呼ぶ
#[cfg(feature = "observability")]
pub fn init_tracing(config: TracingConfig) {
    use tracing_subscriber::{EnvFilter, Layer as _, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    let output = match config.log_format {
        LogFormat::Json => fmt::layer()
            .json()
            .flatten_event(true)
            .with_current_span(true)
            .with_span_list(false)
            .boxed(),
        LogFormat::Pretty => fmt::layer().with_target(false).boxed(),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(output)
        .with(tracing_error::ErrorLayer::default())
        .init();

    tracing::info!(
        service = %config.service_name,
        log_format = ?config.log_format,
        "ログ出力を開始しました"
    );
}

pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// `SetRequestIdLayer` 用の ID 生成器（UUID v7、時刻順に並ぶ）
///
/// クライアントが `X-Request-Id` を付けてきた場合は呼ばれず、その値が使われる。
#[cfg(feature = "observability")]
#[derive(Debug, Clone, Copy, Default)]
pub struct MakeRequestUuidV7;

#[cfg(feature = "observability")]
impl tower_http::request_id::MakeRequestId for MakeRequestUuidV7 {
    fn make_request_id<B>(
        &mut self,
        _request: &http::Request<B>,
    ) -> Option<tower_http::request_id::RequestId> {
        let id = uuid::Uuid::now_v7().hyphenated().to_string();
        http::HeaderValue::try_from(id)
            .ok()
            .map(tower_http::request_id::RequestId::new)
    }
}

/// `TraceLayer::make_span_with` に渡すリクエストスパン
///
/// `SetRequestIdLayer` より内側に置くこと。外側だと ID がまだ付いておらず `-` になる。
#[cfg(feature = "observability")]
pub fn make_request_span<B>(request: &http::Request<B>) -> tracing::Span {
    let request_id = request
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("-");

    tracing::info_span!(
        "http_request",
        http.method = %request.method(),
        http.path = %request.uri().path(),
        request_id = %request_id,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_formatはjsonとprettyを大文字小文字を問わず受け付ける() {
        assert_eq!(LogFormat::from_value(Some("json")), LogFormat::Json);
        assert_eq!(LogFormat::from_value(Some("JSON")), LogFormat::Json);
        assert_eq!(LogFormat::from_value(Some(" Pretty ")), LogFormat::Pretty);
    }

    #[test]
    fn test_log_format未設定や空文字はpretty() {
        assert_eq!(LogFormat::from_value(None), LogFormat::Pretty);
        assert_eq!(LogFormat::from_value(Some("")), LogFormat::Pretty);
    }

    #[test]
    fn test_log_formatの未知の値はprettyに倒す() {
        assert_eq!(LogFormat::from_value(Some("logfmt")), LogFormat::Pretty);
    }

    #[test]
    fn test_既定フィルタはサービスとインフラをdebugにする() {
        assert!(DEFAULT_LOG_FILTER.contains("feedback_service=debug"));
        assert!(DEFAULT_LOG_FILTER.contains("feedback_infra=debug"));
    }
}

#[cfg(all(test, feature = "observability"))]
mod request_id_tests {
    use tower_http::request_id::MakeRequestId as _;

    use super::*;

    #[test]
    fn test_採番されるidはuuid_v7() {
        let request = http::Request::builder().body(()).unwrap();

        let id = MakeRequestUuidV7.make_request_id(&request).unwrap();

        let uuid = uuid::Uuid::parse_str(id.header_value().to_str().unwrap()).unwrap();
        assert_eq!(uuid.get_version(), Some(uuid::Version::SortRand));
    }

    #[test]
    fn test_連続して採番したidは重複しない() {
        let request = http::Request::builder().body(()).unwrap();
        let mut make = MakeRequestUuidV7;

        let first = make.make_request_id(&request).unwrap();
        let second = make.make_request_id(&request).unwrap();

        assert_ne!(first.header_value(), second.header_value());
    }

    #[test]
    fn test_idヘッダーが無くてもスパンを作れる() {
        let request = http::Request::builder()
            .uri("/api/feedback?source=form")
            .body(())
            .unwrap();

        let _span = make_request_span(&request);
    }
}
