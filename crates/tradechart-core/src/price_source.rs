//! Daily price sources.
//!
//! | Source | Reads from |
//! |--------|------------|
//! | [`YahooSource`] | Yahoo history download endpoint over [`HttpClient`] |
//! | [`CsvDirectorySource`] | `<dir>/<SYMBOL>.csv` files on local disk |
//!
//! Both decode with [`decode_price_history`] and return a [`Series`] clipped
//! to the requested range.

use std::fmt::{Display, Formatter};
use std::future::Future;
use std::path::{Path, PathBuf};
use std::pin::Pin;
use std::sync::Arc;

use crate::feed::{decode_price_history, FeedError};
use crate::http_client::{HttpAuth, HttpClient, HttpRequest};
use crate::{DateRange, Series, Symbol};

/// Source-level error classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceErrorKind {
    InvalidRequest,
    Unavailable,
    NotFound,
    Decode,
    Internal,
}

/// Structured error returned by every [`PriceSource`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceError {
    kind: SourceErrorKind,
    message: String,
    retryable: bool,
}

impl SourceError {
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self {
            kind: SourceErrorKind::InvalidRequest,
            message: message.into(),
            retryable: false,
        }
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        Self {
            kind: SourceErrorKind::Unavailable,
            message: message.into(),
            retryable: true,
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            kind: SourceErrorKind::NotFound,
            message: message.into(),
            retryable: false,
        }
    }

    pub fn decode(message: impl Into<String>) -> Self {
        Self {
            kind: SourceErrorKind::Decode,
            message: message.into(),
            retryable: false,
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            kind: SourceErrorKind::Internal,
            message: message.into(),
            retryable: false,
        }
    }

    pub const fn kind(&self) -> SourceErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub const fn retryable(&self) -> bool {
        self.retryable
    }

    pub const fn code(&self) -> &'static str {
        match self.kind {
            SourceErrorKind::InvalidRequest => "source.invalid_request",
            SourceErrorKind::Unavailable => "source.unavailable",
            SourceErrorKind::NotFound => "source.not_found",
            SourceErrorKind::Decode => "source.decode",
            SourceErrorKind::Internal => "source.internal",
        }
    }
}

impl Display for SourceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.message, self.code())
    }
}

impl std::error::Error for SourceError {}

impl From<FeedError> for SourceError {
    fn from(error: FeedError) -> Self {
        Self::decode(format!("failed to decode daily history: {error}"))
    }
}

/// Daily history for one symbol over an inclusive date range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeriesRequest {
    pub symbol: Symbol,
    pub range: DateRange,
}

impl SeriesRequest {
    pub fn new(symbol: Symbol, range: DateRange) -> Self {
        Self { symbol, range }
    }
}

/// Boxed future returned by [`PriceSource`] methods.
pub type SourceFuture<'a> = Pin<Box<dyn Future<Output = Result<Series, SourceError>> + Send + 'a>>;

/// Provider of daily bars.
///
/// Implementations must be `Send + Sync`; the web server shares one source
/// across all request handlers.
pub trait PriceSource: Send + Sync {
    /// Short identifier used in logs.
    fn id(&self) -> &'static str;

    /// Fetch the daily series covering `req.range`.
    fn daily_series<'a>(&'a self, req: SeriesRequest) -> SourceFuture<'a>;
}

impl<S: PriceSource + ?Sized> PriceSource for Arc<S> {
    fn id(&self) -> &'static str {
        (**self).id()
    }

    fn daily_series<'a>(&'a self, req: SeriesRequest) -> SourceFuture<'a> {
        (**self).daily_series(req)
    }
}

pub const DEFAULT_YAHOO_BASE_URL: &str = "https://query1.finance.yahoo.com";

/// Yahoo history download (`/v7/finance/download/{SYMBOL}`).
pub struct YahooSource {
    http_client: Arc<dyn HttpClient>,
    base_url: String,
    timeout_ms: u64,
    auth: HttpAuth,
}

impl YahooSource {
    pub fn new(http_client: Arc<dyn HttpClient>) -> Self {
        Self {
            http_client,
            base_url: DEFAULT_YAHOO_BASE_URL.to_owned(),
            timeout_ms: 10_000,
            auth: HttpAuth::None,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_owned();
        self
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    pub fn with_auth(mut self, auth: HttpAuth) -> Self {
        self.auth = auth;
        self
    }

    /// Download URL for `req`; both period bounds are midnight UTC.
    pub fn history_url(&self, req: &SeriesRequest) -> String {
        format!(
            "{}/v7/finance/download/{}?events=history&interval=1d&period1={}&period2={}",
            self.base_url,
            req.symbol.path_escaped(),
            req.range.start().unix_timestamp(),
            req.range.end().unix_timestamp(),
        )
    }

    async fn fetch(&self, req: SeriesRequest) -> Result<Series, SourceError> {
        let url = self.history_url(&req);
        tracing::debug!(symbol = %req.symbol, %url, "fetching daily history");

        let request = HttpRequest::get(&url)
            .with_header("referer", "https://finance.yahoo.com/")
            .with_auth(&self.auth)
            .with_timeout_ms(self.timeout_ms);

        let response = self.http_client.execute(request).await.map_err(|e| {
            if e.retryable() {
                SourceError::unavailable(format!("yahoo transport error: {}", e.message()))
            } else {
                SourceError::internal(format!("yahoo transport error: {}", e.message()))
            }
        })?;

        if response.status == 404 {
            return Err(SourceError::not_found(format!(
                "yahoo has no history for '{}'",
                req.symbol
            )));
        }
        if !response.is_success() {
            return Err(SourceError::unavailable(format!(
                "yahoo returned status {}",
                response.status
            )));
        }

        let series = decode_price_history(response.body.as_bytes())?;
        tracing::debug!(symbol = %req.symbol, bars = series.len(), "decoded daily history");
        Ok(series.within(&req.range))
    }
}

impl PriceSource for YahooSource {
    fn id(&self) -> &'static str {
        "yahoo"
    }

    fn daily_series<'a>(&'a self, req: SeriesRequest) -> SourceFuture<'a> {
        Box::pin(self.fetch(req))
    }
}

/// Reads `<dir>/<SYMBOL>.csv` in the Yahoo history layout.
#[derive(Debug, Clone)]
pub struct CsvDirectorySource {
    dir: PathBuf,
}

impl CsvDirectorySource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, symbol: &Symbol) -> PathBuf {
        self.dir.join(format!("{}.csv", symbol.as_str()))
    }

    fn load(&self, req: &SeriesRequest) -> Result<Series, SourceError> {
        let path = self.path_for(&req.symbol);
        let file = std::fs::File::open(&path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                SourceError::not_found(format!("no history file at '{}'", path.display()))
            } else {
                SourceError::unavailable(format!("failed to open '{}': {e}", path.display()))
            }
        })?;
        let series = decode_price_history(std::io::BufReader::new(file))?;
        tracing::debug!(path = %path.display(), bars = series.len(), "loaded daily history");
        Ok(series.within(&req.range))
    }
}

impl PriceSource for CsvDirectorySource {
    fn id(&self) -> &'static str {
        "csv_dir"
    }

    fn daily_series<'a>(&'a self, req: SeriesRequest) -> SourceFuture<'a> {
        Box::pin(async move { self.load(&req) })
    }
}
