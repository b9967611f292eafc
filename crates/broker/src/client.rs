//! The Trading 212 API client.
//!
//! `BrokerDataClient` is the seam the tool layer depends on: typed fetch
//! operations returning canonical records. `Trading212Client` is the live
//! implementation speaking to `https://{demo|live}.trading212.com/api/v0`
//! with bounded 429 retries and cursor pagination. Retries beyond the 429
//! backoff are deliberately absent; callers see every other failure as a
//! single uniform upstream error.

use std::time::Duration;

use agentfolio_core::{
    AccountInfo, CashBalance, Dividend, DividendPage, Error, Exchange, Instrument, Order,
    PieSummary, Position, Result, Transaction, UpstreamError,
};
use async_trait::async_trait;
use log::{debug, warn};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{StatusCode, Url};
use serde::de::DeserializeOwned;
use tokio::sync::OnceCell;
use tokio::time::sleep;

use crate::config::Trading212Config;
use crate::mapping;
use crate::models::{
    AccountResponse, CashResponse, DividendItemResponse, ExchangeResponse,
    HistoricalOrderItem, InstrumentResponse, OpenOrderResponse, PagedResponse, PieResponse,
    PositionResponse, TransactionItemResponse,
};

/// Default number of records per history page.
pub const DEFAULT_PAGE_SIZE: usize = 20;

/// Hard per-page cap enforced by the API.
pub const MAX_PAGE_SIZE: usize = 50;

const MAX_RATE_LIMIT_RETRIES: u32 = 5;

/// Cursor/filter parameters for the history endpoints.
#[derive(Debug, Clone, Default)]
pub struct HistoryQuery {
    pub cursor: Option<i64>,
    pub ticker: Option<String>,
    pub limit: Option<usize>,
}

impl HistoryQuery {
    pub fn with_limit(limit: usize) -> Self {
        Self {
            limit: Some(limit),
            ..Self::default()
        }
    }

    /// Page size clamped to the API's accepted range.
    pub fn clamped_limit(&self) -> usize {
        self.limit.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE)
    }
}

/// Typed fetch operations against the brokerage account.
///
/// Every operation returns canonical records and fails with the uniform
/// upstream error (or `MalformedRecord` when the payload shape is broken).
#[async_trait]
pub trait BrokerDataClient: Send + Sync {
    async fn fetch_account(&self) -> Result<AccountInfo>;
    async fn fetch_cash(&self) -> Result<CashBalance>;
    async fn fetch_positions(&self) -> Result<Vec<Position>>;
    async fn fetch_position(&self, ticker: &str) -> Result<Position>;
    async fn fetch_open_orders(&self) -> Result<Vec<Order>>;
    async fn fetch_order_history(&self, query: &HistoryQuery) -> Result<Vec<Order>>;
    async fn fetch_dividends(&self, query: &HistoryQuery) -> Result<DividendPage>;
    async fn fetch_transactions(&self, query: &HistoryQuery) -> Result<Vec<Transaction>>;
    async fn fetch_instruments(&self) -> Result<Vec<Instrument>>;
    async fn fetch_exchanges(&self) -> Result<Vec<Exchange>>;
    async fn fetch_pies(&self) -> Result<Vec<PieSummary>>;

    /// Drains the dividend history by following page cursors, bounded by
    /// `max_pages` full pages.
    async fn fetch_all_dividends(&self, max_pages: usize) -> Result<Vec<Dividend>> {
        let mut all = Vec::new();
        let mut query = HistoryQuery::with_limit(MAX_PAGE_SIZE);
        for _ in 0..max_pages {
            let page = self.fetch_dividends(&query).await?;
            let next_cursor = page.next_cursor;
            all.extend(page.items);
            match next_cursor {
                Some(cursor) => query.cursor = Some(cursor),
                None => break,
            }
        }
        Ok(all)
    }
}

/// Live client for the Trading 212 REST API.
pub struct Trading212Client {
    http: reqwest::Client,
    base_url: String,
    // Account metadata never changes within a session; fetched once and
    // reused to stamp the account currency onto positions.
    account: OnceCell<AccountInfo>,
}

impl Trading212Client {
    pub fn new(config: &Trading212Config) -> Result<Self> {
        if config.api_key.trim().is_empty() {
            return Err(Error::Upstream(UpstreamError::new(
                "Authentication failed: API key is empty",
                false,
            )));
        }

        let mut headers = HeaderMap::new();
        let mut auth_value = HeaderValue::from_str(&config.api_key).map_err(|_| {
            Error::Upstream(UpstreamError::new(
                "Authentication failed: API key contains invalid characters",
                false,
            ))
        })?;
        auth_value.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth_value);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .build()
            .map_err(|e| transport_error("building HTTP client", e))?;

        Ok(Self {
            http,
            base_url: config.base_url(),
            account: OnceCell::new(),
        })
    }

    fn endpoint(&self, path: &str, params: &[(&str, String)]) -> Result<Url> {
        let raw = format!("{}{}", self.base_url, path);
        Url::parse_with_params(&raw, params).map_err(|e| {
            Error::Upstream(UpstreamError::new(
                format!("Invalid request URL {}: {}", raw, e),
                false,
            ))
        })
    }

    /// GET with bounded exponential backoff on 429 responses.
    async fn get_with_retry(&self, url: Url) -> Result<String> {
        let mut retries = 0;
        loop {
            debug!("GET {}", url);
            let response = self
                .http
                .get(url.clone())
                .send()
                .await
                .map_err(|e| transport_error(url.path(), e))?;

            if response.status() == StatusCode::TOO_MANY_REQUESTS {
                if retries >= MAX_RATE_LIMIT_RETRIES {
                    return Err(Error::Upstream(UpstreamError::new(
                        "Rate limited by Trading 212 after multiple retries",
                        true,
                    )));
                }
                let wait = 2u64.pow(retries) * 2000;
                debug!("429 on {}; retrying in {}ms", url.path(), wait);
                sleep(Duration::from_millis(wait)).await;
                retries += 1;
                continue;
            }

            return read_body(response).await;
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T> {
        let body = self.get_with_retry(url).await?;
        serde_json::from_str(&body)
            .map_err(|e| Error::malformed(format!("unexpected response shape: {}", e)))
    }

    async fn post_json<T: DeserializeOwned>(&self, url: Url, payload: serde_json::Value) -> Result<T> {
        debug!("POST {}", url);
        let response = self
            .http
            .post(url.clone())
            .json(&payload)
            .send()
            .await
            .map_err(|e| transport_error(url.path(), e))?;
        let body = read_body(response).await?;
        serde_json::from_str(&body)
            .map_err(|e| Error::malformed(format!("unexpected response shape: {}", e)))
    }

    async fn account_info(&self) -> Result<AccountInfo> {
        self.account
            .get_or_try_init(|| async {
                let raw: AccountResponse =
                    self.get_json(self.endpoint("/equity/account/info", &[])?).await?;
                mapping::map_account(raw)
            })
            .await
            .cloned()
    }

    fn history_params(query: &HistoryQuery) -> Vec<(&'static str, String)> {
        let mut params = vec![("limit", query.clamped_limit().to_string())];
        if let Some(cursor) = query.cursor {
            params.push(("cursor", cursor.to_string()));
        }
        if let Some(ticker) = &query.ticker {
            params.push(("ticker", ticker.clone()));
        }
        params
    }
}

async fn read_body(response: reqwest::Response) -> Result<String> {
    let status = response.status();
    let path = response.url().path().to_string();
    let body = response
        .text()
        .await
        .map_err(|e| transport_error(&path, e))?;

    if status == StatusCode::UNAUTHORIZED {
        return Err(Error::Upstream(UpstreamError::new(
            "Authentication failed. Check TRADING212_API_KEY in your environment.",
            false,
        )));
    }
    if !status.is_success() {
        return Err(Error::Upstream(UpstreamError::new(
            format!("Trading 212 API error {}: {}", status, body),
            status.is_server_error(),
        )));
    }
    Ok(body)
}

fn transport_error(context: &str, error: reqwest::Error) -> Error {
    let (message, retriable) = if error.is_timeout() {
        (format!("Trading 212 request to {} timed out", context), true)
    } else if error.is_connect() {
        ("Cannot connect to Trading 212".to_string(), true)
    } else {
        (format!("Trading 212 request to {} failed: {}", context, error), false)
    };
    Error::Upstream(UpstreamError::new(message, retriable))
}

/// Pulls the numeric cursor out of a `nextPagePath` value.
fn parse_next_cursor(next_page_path: Option<&str>) -> Option<i64> {
    next_page_path?
        .split("cursor=")
        .nth(1)?
        .split('&')
        .next()?
        .parse()
        .ok()
}

/// Maps a batch leniently: malformed records are logged and skipped, the
/// rest survive. Used for history and reference listings where one bad
/// record must not hide the others.
fn collect_lenient<R, T>(
    items: Vec<R>,
    what: &str,
    map: impl Fn(R) -> Result<T>,
) -> Vec<T> {
    items
        .into_iter()
        .filter_map(|raw| match map(raw) {
            Ok(record) => Some(record),
            Err(error) => {
                warn!("Skipping malformed {}: {}", what, error);
                None
            }
        })
        .collect()
}

#[async_trait]
impl BrokerDataClient for Trading212Client {
    async fn fetch_account(&self) -> Result<AccountInfo> {
        self.account_info().await
    }

    async fn fetch_cash(&self) -> Result<CashBalance> {
        let raw: CashResponse = self.get_json(self.endpoint("/equity/account/cash", &[])?).await?;
        Ok(mapping::map_cash(raw))
    }

    async fn fetch_positions(&self) -> Result<Vec<Position>> {
        let account = self.account_info().await?;
        let raw: Vec<PositionResponse> =
            self.get_json(self.endpoint("/equity/portfolio", &[])?).await?;
        // A broken position would silently skew every valuation figure,
        // so the whole fetch fails instead.
        raw.into_iter()
            .map(|position| mapping::map_position(position, &account.currency_code))
            .collect()
    }

    async fn fetch_position(&self, ticker: &str) -> Result<Position> {
        let account = self.account_info().await?;
        let raw: PositionResponse = self
            .post_json(
                self.endpoint("/equity/portfolio/ticker", &[])?,
                serde_json::json!({ "ticker": ticker }),
            )
            .await?;
        mapping::map_position(raw, &account.currency_code)
    }

    async fn fetch_open_orders(&self) -> Result<Vec<Order>> {
        let raw: Vec<OpenOrderResponse> =
            self.get_json(self.endpoint("/equity/orders", &[])?).await?;
        Ok(collect_lenient(raw, "open order", mapping::map_open_order))
    }

    async fn fetch_order_history(&self, query: &HistoryQuery) -> Result<Vec<Order>> {
        let raw: PagedResponse<HistoricalOrderItem> = self
            .get_json(self.endpoint("/equity/history/orders", &Self::history_params(query))?)
            .await?;
        Ok(collect_lenient(
            raw.items,
            "historical order",
            mapping::map_historical_order,
        ))
    }

    async fn fetch_dividends(&self, query: &HistoryQuery) -> Result<DividendPage> {
        let raw: PagedResponse<DividendItemResponse> = self
            .get_json(self.endpoint("/history/dividends", &Self::history_params(query))?)
            .await?;
        let next_cursor = parse_next_cursor(raw.next_page_path.as_deref());
        Ok(DividendPage {
            items: collect_lenient(raw.items, "dividend", mapping::map_dividend),
            next_cursor,
        })
    }

    async fn fetch_transactions(&self, query: &HistoryQuery) -> Result<Vec<Transaction>> {
        // The transactions endpoint paginates with an opaque string cursor;
        // only the page size is exposed here.
        let params = vec![("limit", query.clamped_limit().to_string())];
        let raw: PagedResponse<TransactionItemResponse> = self
            .get_json(self.endpoint("/equity/history/transactions", &params)?)
            .await?;
        Ok(collect_lenient(raw.items, "transaction", mapping::map_transaction))
    }

    async fn fetch_instruments(&self) -> Result<Vec<Instrument>> {
        let raw: Vec<InstrumentResponse> = self
            .get_json(self.endpoint("/equity/metadata/instruments", &[])?)
            .await?;
        Ok(collect_lenient(raw, "instrument", mapping::map_instrument))
    }

    async fn fetch_exchanges(&self) -> Result<Vec<Exchange>> {
        let raw: Vec<ExchangeResponse> = self
            .get_json(self.endpoint("/equity/metadata/exchanges", &[])?)
            .await?;
        Ok(collect_lenient(raw, "exchange", mapping::map_exchange))
    }

    async fn fetch_pies(&self) -> Result<Vec<PieSummary>> {
        let raw: Vec<PieResponse> = self.get_json(self.endpoint("/equity/pies", &[])?).await?;
        Ok(collect_lenient(raw, "pie", mapping::map_pie))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_cursor_from_next_page_path() {
        let path = "/api/v0/history/dividends?cursor=12345&limit=50";
        assert_eq!(parse_next_cursor(Some(path)), Some(12345));
    }

    #[test]
    fn test_parses_cursor_when_last_parameter() {
        let path = "/api/v0/history/dividends?limit=50&cursor=987";
        assert_eq!(parse_next_cursor(Some(path)), Some(987));
    }

    #[test]
    fn test_no_cursor_when_path_missing_or_garbled() {
        assert_eq!(parse_next_cursor(None), None);
        assert_eq!(parse_next_cursor(Some("/api/v0/history/dividends")), None);
        assert_eq!(
            parse_next_cursor(Some("/api/v0/history/dividends?cursor=abc")),
            None
        );
    }

    #[test]
    fn test_history_query_limit_is_clamped() {
        assert_eq!(HistoryQuery::default().clamped_limit(), DEFAULT_PAGE_SIZE);
        assert_eq!(HistoryQuery::with_limit(500).clamped_limit(), MAX_PAGE_SIZE);
        assert_eq!(HistoryQuery::with_limit(0).clamped_limit(), 1);
        assert_eq!(HistoryQuery::with_limit(35).clamped_limit(), 35);
    }

    #[test]
    fn test_collect_lenient_skips_bad_records() {
        let raws = vec![Some(1), None, Some(3)];
        let mapped = collect_lenient(raws, "number", |raw| {
            raw.ok_or_else(|| Error::malformed("missing"))
        });
        assert_eq!(mapped, vec![1, 3]);
    }
}
