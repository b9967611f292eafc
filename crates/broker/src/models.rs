//! Raw Trading 212 API response models.
//!
//! These mirror the wire format: camelCase names, most fields optional.
//! They exist only as a deserialization target; `mapping` turns them into
//! canonical records before anything else touches them. Unknown fields are
//! ignored by serde.

use rust_decimal::Decimal;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountResponse {
    pub id: Option<i64>,
    pub currency_code: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CashResponse {
    pub free: Option<Decimal>,
    pub invested: Option<Decimal>,
    pub total: Option<Decimal>,
    pub ppl: Option<Decimal>,
    pub blocked: Option<Decimal>,
    pub pie_cash: Option<Decimal>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionResponse {
    pub ticker: Option<String>,
    pub quantity: Option<Decimal>,
    pub average_price: Option<Decimal>,
    pub current_price: Option<Decimal>,
    pub ppl: Option<Decimal>,
    pub initial_fill_date: Option<String>,
}

/// An open order from `/equity/orders`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenOrderResponse {
    pub id: Option<i64>,
    pub ticker: Option<String>,
    #[serde(rename = "type")]
    pub order_type: Option<String>,
    pub status: Option<String>,
    pub quantity: Option<Decimal>,
    pub value: Option<Decimal>,
    pub limit_price: Option<Decimal>,
    pub stop_price: Option<Decimal>,
    pub creation_time: Option<String>,
}

/// One item of the order history listing. The endpoint nests the order
/// and its fill; mapping flattens the pair.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoricalOrderItem {
    pub order: Option<HistoricalOrderDetails>,
    pub fill: Option<HistoricalFillDetails>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoricalOrderDetails {
    pub id: Option<i64>,
    pub ticker: Option<String>,
    #[serde(rename = "type")]
    pub order_type: Option<String>,
    pub status: Option<String>,
    pub quantity: Option<Decimal>,
    pub value: Option<Decimal>,
    pub filled_value: Option<Decimal>,
    pub limit_price: Option<Decimal>,
    pub stop_price: Option<Decimal>,
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoricalFillDetails {
    pub id: Option<i64>,
    pub quantity: Option<Decimal>,
    pub price: Option<Decimal>,
    pub filled_at: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DividendItemResponse {
    pub ticker: Option<String>,
    pub amount: Option<Decimal>,
    pub paid_on: Option<String>,
    #[serde(rename = "type")]
    pub dividend_type: Option<String>,
    pub quantity: Option<Decimal>,
    pub gross_amount_per_share: Option<Decimal>,
    pub reference: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionItemResponse {
    pub amount: Option<Decimal>,
    #[serde(rename = "type")]
    pub transaction_type: Option<String>,
    pub date_time: Option<String>,
    pub reference: Option<String>,
}

/// Cursor-paginated listing wrapper shared by the history endpoints.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PagedResponse<T> {
    #[serde(default)]
    pub items: Vec<T>,
    pub next_page_path: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstrumentResponse {
    pub ticker: Option<String>,
    pub name: Option<String>,
    pub short_name: Option<String>,
    #[serde(rename = "type")]
    pub instrument_type: Option<String>,
    pub currency_code: Option<String>,
    pub isin: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExchangeResponse {
    pub id: Option<i64>,
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PieResultResponse {
    pub price_avg_invested_value: Option<Decimal>,
    pub price_avg_value: Option<Decimal>,
    pub price_avg_result: Option<Decimal>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PieResponse {
    pub id: Option<i64>,
    pub status: Option<String>,
    pub cash: Option<Decimal>,
    pub result: Option<PieResultResponse>,
}
