//! Normalization boundary: raw API models to canonical records.
//!
//! Every conversion is strict about required fields: a missing ticker, an
//! absent price, or an unparsable timestamp is a `MalformedRecord`. The
//! client decides per resource whether a malformed record fails the fetch
//! or is skipped (see `client`). Timestamps land in UTC.

use agentfolio_core::{
    AccountInfo, CashBalance, Dividend, Error, Exchange, Instrument, Order, OrderSide,
    OrderStatus, OrderType, PieSummary, Position, Result, Transaction, TransactionType,
};
use chrono::{DateTime, NaiveDateTime, Utc};
use rust_decimal::Decimal;

use crate::models::{
    AccountResponse, CashResponse, DividendItemResponse, ExchangeResponse,
    HistoricalOrderItem, InstrumentResponse, OpenOrderResponse, PieResponse, PositionResponse,
    TransactionItemResponse,
};

/// Parses an upstream timestamp into UTC. Accepts RFC 3339 and the naive
/// `YYYY-MM-DDTHH:MM:SS` variant some endpoints emit (taken as UTC).
fn parse_timestamp(value: &str, context: &str) -> Result<DateTime<Utc>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Ok(parsed.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f") {
        return Ok(naive.and_utc());
    }
    Err(Error::malformed(format!(
        "{}: unparsable timestamp '{}'",
        context, value
    )))
}

fn parse_optional_timestamp(value: &Option<String>, context: &str) -> Result<Option<DateTime<Utc>>> {
    match value {
        Some(raw) => parse_timestamp(raw, context).map(Some),
        None => Ok(None),
    }
}

fn require<T>(value: Option<T>, context: &str, field: &str) -> Result<T> {
    value.ok_or_else(|| Error::malformed(format!("{}: missing {}", context, field)))
}

fn require_ticker(value: Option<String>, context: &str) -> Result<String> {
    let ticker = require(value, context, "ticker")?;
    if ticker.trim().is_empty() {
        return Err(Error::malformed(format!("{}: empty ticker", context)));
    }
    Ok(ticker)
}

fn parse_order_type(value: Option<&str>, context: &str) -> Result<OrderType> {
    match value {
        Some("MARKET") => Ok(OrderType::Market),
        Some("LIMIT") => Ok(OrderType::Limit),
        Some("STOP") => Ok(OrderType::Stop),
        Some("STOP_LIMIT") => Ok(OrderType::StopLimit),
        Some(other) => Err(Error::malformed(format!(
            "{}: unknown order type '{}'",
            context, other
        ))),
        None => Err(Error::malformed(format!("{}: missing order type", context))),
    }
}

/// Collapses the venue's dozen lifecycle states onto the canonical four.
/// Anything not terminal is still pending from this layer's point of view.
fn parse_order_status(value: Option<&str>) -> OrderStatus {
    match value {
        Some("FILLED") => OrderStatus::Filled,
        Some("CANCELLED") => OrderStatus::Cancelled,
        Some("REJECTED") => OrderStatus::Rejected,
        _ => OrderStatus::Pending,
    }
}

/// Derives the side from the first signed figure the venue reported.
fn derive_side(signed: &[Option<Decimal>], context: &str) -> Result<OrderSide> {
    for value in signed.iter().flatten() {
        if value.is_sign_negative() {
            return Ok(OrderSide::Sell);
        }
        return Ok(OrderSide::Buy);
    }
    Err(Error::malformed(format!(
        "{}: no quantity or value to derive the side from",
        context
    )))
}

pub fn map_account(raw: AccountResponse) -> Result<AccountInfo> {
    let id = require(raw.id, "account", "id")?;
    let currency_code = require(raw.currency_code, "account", "currencyCode")?;
    Ok(AccountInfo { id, currency_code })
}

pub fn map_cash(raw: CashResponse) -> CashBalance {
    CashBalance {
        free: raw.free.unwrap_or_default(),
        invested: raw.invested.unwrap_or_default(),
        total: raw.total.unwrap_or_default(),
        ppl: raw.ppl.unwrap_or_default(),
        blocked: raw.blocked.unwrap_or_default(),
        pie_cash: raw.pie_cash.unwrap_or_default(),
    }
}

/// The positions payload carries no currency of its own; prices are
/// denominated in the account currency, which the caller passes in.
pub fn map_position(raw: PositionResponse, account_currency: &str) -> Result<Position> {
    let ticker = require_ticker(raw.ticker, "position")?;
    let context = format!("position {}", ticker);
    let quantity = require(raw.quantity, &context, "quantity")?;
    if quantity.is_sign_negative() {
        return Err(Error::malformed(format!(
            "{}: negative quantity {}",
            context, quantity
        )));
    }
    Ok(Position {
        quantity,
        average_price: require(raw.average_price, &context, "averagePrice")?,
        current_price: require(raw.current_price, &context, "currentPrice")?,
        currency: account_currency.to_string(),
        opened_at: parse_optional_timestamp(&raw.initial_fill_date, &context)?,
        ticker,
    })
}

pub fn map_open_order(raw: OpenOrderResponse) -> Result<Order> {
    let id = require(raw.id, "order", "id")?;
    let context = format!("order {}", id);
    let ticker = require_ticker(raw.ticker, &context)?;
    let side = derive_side(&[raw.quantity, raw.value], &context)?;
    Ok(Order {
        id,
        ticker,
        side,
        order_type: parse_order_type(raw.order_type.as_deref(), &context)?,
        status: parse_order_status(raw.status.as_deref()),
        quantity: raw.quantity.map(|quantity| quantity.abs()),
        value: raw.value.map(|value| value.abs()),
        fill_price: None,
        created_at: parse_optional_timestamp(&raw.creation_time, &context)?,
        executed_at: None,
    })
}

/// Flattens the nested `{ order, fill }` history item into one canonical
/// order. Fill figures win over ordered figures where both exist.
pub fn map_historical_order(raw: HistoricalOrderItem) -> Result<Order> {
    let order = require(raw.order, "historical order", "order")?;
    let fill = raw.fill.unwrap_or_default();

    let id = require(order.id, "historical order", "id")?;
    let context = format!("historical order {}", id);
    let ticker = require_ticker(order.ticker, &context)?;
    let side = derive_side(
        &[fill.quantity, order.quantity, order.filled_value, order.value],
        &context,
    )?;

    Ok(Order {
        id,
        ticker,
        side,
        order_type: parse_order_type(order.order_type.as_deref(), &context)?,
        status: parse_order_status(order.status.as_deref()),
        quantity: fill.quantity.or(order.quantity).map(|quantity| quantity.abs()),
        value: order.filled_value.or(order.value).map(|value| value.abs()),
        fill_price: fill.price,
        created_at: parse_optional_timestamp(&order.created_at, &context)?,
        executed_at: parse_optional_timestamp(&fill.filled_at, &context)?,
    })
}

pub fn map_dividend(raw: DividendItemResponse) -> Result<Dividend> {
    let ticker = require_ticker(raw.ticker, "dividend")?;
    let context = format!("dividend for {}", ticker);
    let amount = require(raw.amount, &context, "amount")?;
    let paid_on_raw = require(raw.paid_on, &context, "paidOn")?;
    Ok(Dividend {
        ticker,
        amount,
        paid_on: parse_timestamp(&paid_on_raw, &context)?,
        dividend_type: raw.dividend_type,
    })
}

pub fn map_transaction(raw: TransactionItemResponse) -> Result<Transaction> {
    let context = match &raw.reference {
        Some(reference) => format!("transaction {}", reference),
        None => "transaction".to_string(),
    };
    let transaction_type = match require(raw.transaction_type, &context, "type")?.as_str() {
        "DEPOSIT" => TransactionType::Deposit,
        "WITHDRAW" | "WITHDRAWAL" => TransactionType::Withdrawal,
        "TRANSFER" => TransactionType::Transfer,
        "FEE" => TransactionType::Fee,
        other => {
            return Err(Error::malformed(format!(
                "{}: unknown transaction type '{}'",
                context, other
            )))
        }
    };
    Ok(Transaction {
        transaction_type,
        amount: require(raw.amount, &context, "amount")?,
        timestamp: parse_optional_timestamp(&raw.date_time, &context)?,
        reference: raw.reference,
    })
}

pub fn map_instrument(raw: InstrumentResponse) -> Result<Instrument> {
    let ticker = require_ticker(raw.ticker, "instrument")?;
    let context = format!("instrument {}", ticker);
    let name = raw
        .name
        .or(raw.short_name)
        .ok_or_else(|| Error::malformed(format!("{}: missing name", context)))?;
    Ok(Instrument {
        ticker,
        name,
        instrument_type: raw.instrument_type,
        currency_code: raw.currency_code,
        isin: raw.isin,
    })
}

pub fn map_exchange(raw: ExchangeResponse) -> Result<Exchange> {
    let id = require(raw.id, "exchange", "id")?;
    let name = require(raw.name, &format!("exchange {}", id), "name")?;
    Ok(Exchange { id, name })
}

pub fn map_pie(raw: PieResponse) -> Result<PieSummary> {
    let id = require(raw.id, "pie", "id")?;
    let result = raw.result.unwrap_or_default();
    Ok(PieSummary {
        id,
        status: raw.status,
        cash: raw.cash,
        invested: result.price_avg_invested_value,
        value: result.price_avg_value,
        result: result.price_avg_result,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::HistoricalOrderDetails;
    use rust_decimal_macros::dec;

    fn position_response(ticker: Option<&str>) -> PositionResponse {
        PositionResponse {
            ticker: ticker.map(str::to_string),
            quantity: Some(dec!(10)),
            average_price: Some(dec!(100)),
            current_price: Some(dec!(150)),
            ppl: Some(dec!(500)),
            initial_fill_date: Some("2023-06-01T09:30:00Z".to_string()),
        }
    }

    #[test]
    fn test_maps_position_with_account_currency() {
        let position = map_position(position_response(Some("AAPL_US_EQ")), "EUR").unwrap();

        assert_eq!(position.ticker, "AAPL_US_EQ");
        assert_eq!(position.quantity, dec!(10));
        assert_eq!(position.average_price, dec!(100));
        assert_eq!(position.current_price, dec!(150));
        assert_eq!(position.currency, "EUR");
        assert!(position.opened_at.is_some());
    }

    #[test]
    fn test_position_without_ticker_is_malformed() {
        let err = map_position(position_response(None), "EUR").unwrap_err();
        assert!(matches!(err, Error::MalformedRecord(_)));
    }

    #[test]
    fn test_position_without_price_is_malformed() {
        let mut raw = position_response(Some("AAPL_US_EQ"));
        raw.current_price = None;
        let err = map_position(raw, "EUR").unwrap_err();
        assert!(matches!(err, Error::MalformedRecord(_)));
    }

    #[test]
    fn test_position_with_negative_quantity_is_malformed() {
        let mut raw = position_response(Some("AAPL_US_EQ"));
        raw.quantity = Some(dec!(-1));
        let err = map_position(raw, "EUR").unwrap_err();
        assert!(matches!(err, Error::MalformedRecord(_)));
    }

    #[test]
    fn test_naive_timestamps_are_taken_as_utc() {
        let parsed = parse_timestamp("2024-02-03T10:20:30", "test").unwrap();
        assert_eq!(parsed, "2024-02-03T10:20:30Z".parse::<DateTime<Utc>>().unwrap());
    }

    #[test]
    fn test_garbage_timestamp_is_malformed() {
        let err = parse_timestamp("yesterday", "test").unwrap_err();
        assert!(matches!(err, Error::MalformedRecord(_)));
    }

    #[test]
    fn test_maps_historical_sell_order_from_nested_item() {
        let raw = HistoricalOrderItem {
            order: Some(HistoricalOrderDetails {
                id: Some(41),
                ticker: Some("VOD_L_EQ".to_string()),
                order_type: Some("LIMIT".to_string()),
                status: Some("FILLED".to_string()),
                quantity: Some(dec!(-5)),
                value: None,
                filled_value: Some(dec!(-380)),
                limit_price: Some(dec!(76)),
                stop_price: None,
                created_at: Some("2024-03-01T08:00:00Z".to_string()),
            }),
            fill: Some(crate::models::HistoricalFillDetails {
                id: Some(7),
                quantity: Some(dec!(-5)),
                price: Some(dec!(76)),
                filled_at: Some("2024-03-01T08:00:05Z".to_string()),
            }),
        };

        let order = map_historical_order(raw).unwrap();
        assert_eq!(order.id, 41);
        assert_eq!(order.side, OrderSide::Sell);
        assert_eq!(order.order_type, OrderType::Limit);
        assert_eq!(order.status, OrderStatus::Filled);
        assert_eq!(order.quantity, Some(dec!(5)));
        assert_eq!(order.value, Some(dec!(380)));
        assert_eq!(order.fill_price, Some(dec!(76)));
        assert!(order.executed_at.is_some());
    }

    #[test]
    fn test_unknown_order_lifecycle_states_collapse_to_pending() {
        for status in ["NEW", "CONFIRMED", "CANCELLING", "REPLACED", "SOMETHING_ELSE"] {
            assert_eq!(parse_order_status(Some(status)), OrderStatus::Pending);
        }
        assert_eq!(parse_order_status(Some("FILLED")), OrderStatus::Filled);
        assert_eq!(parse_order_status(Some("CANCELLED")), OrderStatus::Cancelled);
        assert_eq!(parse_order_status(Some("REJECTED")), OrderStatus::Rejected);
    }

    #[test]
    fn test_maps_dividend() {
        let raw = DividendItemResponse {
            ticker: Some("AAPL_US_EQ".to_string()),
            amount: Some(dec!(1.52)),
            paid_on: Some("2024-01-10T00:00:00Z".to_string()),
            dividend_type: Some("ORDINARY".to_string()),
            quantity: Some(dec!(10)),
            gross_amount_per_share: Some(dec!(0.19)),
            reference: None,
        };

        let dividend = map_dividend(raw).unwrap();
        assert_eq!(dividend.ticker, "AAPL_US_EQ");
        assert_eq!(dividend.amount, dec!(1.52));
        assert_eq!(dividend.dividend_type.as_deref(), Some("ORDINARY"));
    }

    #[test]
    fn test_dividend_without_paid_date_is_malformed() {
        let raw = DividendItemResponse {
            ticker: Some("AAPL_US_EQ".to_string()),
            amount: Some(dec!(1.52)),
            paid_on: None,
            dividend_type: None,
            quantity: None,
            gross_amount_per_share: None,
            reference: None,
        };

        let err = map_dividend(raw).unwrap_err();
        assert!(matches!(err, Error::MalformedRecord(_)));
    }

    #[test]
    fn test_maps_transaction_type_variants() {
        for (wire, expected) in [
            ("DEPOSIT", TransactionType::Deposit),
            ("WITHDRAW", TransactionType::Withdrawal),
            ("TRANSFER", TransactionType::Transfer),
            ("FEE", TransactionType::Fee),
        ] {
            let raw = TransactionItemResponse {
                amount: Some(dec!(100)),
                transaction_type: Some(wire.to_string()),
                date_time: Some("2024-05-01T10:00:00Z".to_string()),
                reference: Some("ref".to_string()),
            };
            assert_eq!(map_transaction(raw).unwrap().transaction_type, expected);
        }
    }

    #[test]
    fn test_unknown_transaction_type_is_malformed() {
        let raw = TransactionItemResponse {
            amount: Some(dec!(100)),
            transaction_type: Some("AIRDROP".to_string()),
            date_time: None,
            reference: None,
        };
        let err = map_transaction(raw).unwrap_err();
        assert!(matches!(err, Error::MalformedRecord(_)));
    }

    #[test]
    fn test_cash_defaults_missing_fields_to_zero() {
        let cash = map_cash(CashResponse::default());
        assert_eq!(cash.free, Decimal::ZERO);
        assert_eq!(cash.total, Decimal::ZERO);
    }
}
