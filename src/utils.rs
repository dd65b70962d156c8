// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::error::{ExchangeError, Result};
use comfy_table::{presets::UTF8_FULL, Cell, Table};
use once_cell::sync::Lazy;
use regex::Regex;
use rusqlite::{params, Connection, OptionalExtension};
use rust_decimal::{Decimal, RoundingStrategy};

pub const DEFAULT_CROSS_CURRENCY: &str = "USD";
pub const MAX_NAME_LEN: usize = 30;
pub const MAX_SIGN_LEN: usize = 5;
/// NUMERIC(12,4): 8 integer digits, 4 fractional.
pub const RATE_SCALE: u32 = 4;
const RATE_MAX_INT_DIGITS: usize = 8;

static CODE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Z]{3}$").unwrap());

/// Round half away from zero to `dp` places.
pub fn round_half_up(d: Decimal, dp: u32) -> Decimal {
    d.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero)
}

/// Rounds to exactly `dp` places, or `None` when the mantissa cannot hold them.
pub fn quantize(d: Decimal, dp: u32) -> Option<Decimal> {
    let mut v = round_half_up(d, dp);
    v.rescale(dp);
    (v.scale() == dp).then_some(v)
}

/// Render with exactly `dp` fractional digits.
pub fn fixed(d: Decimal, dp: u32) -> String {
    let mut v = round_half_up(d, dp);
    v.rescale(dp);
    v.to_string()
}

pub fn parse_code(raw: &str) -> Result<String> {
    let code = raw.trim().to_uppercase();
    if code.is_empty() {
        return Err(ExchangeError::invalid("Currency code is missing"));
    }
    if !CODE_RE.is_match(&code) {
        return Err(ExchangeError::invalid(format!(
            "Invalid currency code '{}', expected 3 letters",
            raw.trim()
        )));
    }
    Ok(code)
}

/// Splits a 6-letter pair such as `USDRUB` into its base and target codes.
pub fn split_pair(raw: &str) -> Result<(String, String)> {
    let pair = raw.trim();
    if pair.is_empty() {
        return Err(ExchangeError::invalid("Currency pair is missing"));
    }
    if pair.len() != 6 || !pair.is_ascii() {
        return Err(ExchangeError::invalid(format!(
            "Invalid currency pair '{}', expected 6 letters like USDEUR",
            pair
        )));
    }
    let (base, target) = pair.split_at(3);
    Ok((parse_code(base)?, parse_code(target)?))
}

pub fn parse_decimal(s: &str) -> Result<Decimal> {
    let t = s.trim();
    if t.is_empty() {
        return Err(ExchangeError::invalid("Decimal value is missing"));
    }
    t.parse::<Decimal>()
        .map_err(|_| ExchangeError::invalid(format!("Invalid decimal '{}'", t)))
}

pub fn parse_amount(s: &str) -> Result<Decimal> {
    let amount = parse_decimal(s)?;
    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(ExchangeError::invalid(format!(
            "Amount must not be negative, got {}",
            amount
        )));
    }
    if quantize(amount, 2).is_none() {
        return Err(ExchangeError::invalid(format!(
            "Amount {} is too large, it must fit 2 decimal places",
            amount
        )));
    }
    Ok(amount)
}

/// Validates a rate for storage and brings it to the stored scale.
pub fn normalize_rate(rate: Decimal) -> Result<Decimal> {
    if rate <= Decimal::ZERO {
        return Err(ExchangeError::invalid(format!(
            "Rate must be positive, got {}",
            rate
        )));
    }
    let mut r = round_half_up(rate, RATE_SCALE);
    r.rescale(RATE_SCALE);
    if r.is_zero() {
        return Err(ExchangeError::invalid(format!(
            "Rate {} rounds to zero at {} decimal places",
            rate, RATE_SCALE
        )));
    }
    if r.trunc().to_string().len() > RATE_MAX_INT_DIGITS {
        return Err(ExchangeError::invalid(format!(
            "Rate {} exceeds {} integer digits",
            rate, RATE_MAX_INT_DIGITS
        )));
    }
    Ok(r)
}

pub fn parse_rate(s: &str) -> Result<Decimal> {
    normalize_rate(parse_decimal(s)?)
}

pub fn require_field<'a>(value: Option<&'a str>, field: &str, max_len: usize) -> Result<&'a str> {
    let v = value.map(str::trim).unwrap_or("");
    if v.is_empty() {
        return Err(ExchangeError::invalid(format!(
            "Required form field '{}' is missing",
            field
        )));
    }
    if v.chars().count() > max_len {
        return Err(ExchangeError::invalid(format!(
            "Field '{}' is longer than {} characters",
            field, max_len
        )));
    }
    Ok(v)
}

pub fn pretty_table(headers: &[&str], rows: Vec<Vec<String>>) -> Table {
    let mut t = Table::new();
    t.load_preset(UTF8_FULL);
    t.set_header(headers.iter().map(|h| Cell::new(*h)));
    for r in rows {
        t.add_row(r.into_iter().map(Cell::new));
    }
    t
}

pub fn maybe_print_json<T: serde::Serialize>(
    json_flag: bool,
    jsonl_flag: bool,
    v: &T,
) -> anyhow::Result<bool> {
    if json_flag {
        println!("{}", serde_json::to_string_pretty(v)?);
        return Ok(true);
    }
    if jsonl_flag {
        // If v is an array, stream each element; else stream single line
        let val = serde_json::to_value(v)?;
        if let Some(arr) = val.as_array() {
            for item in arr {
                println!("{}", serde_json::to_string(item)?);
            }
        } else {
            println!("{}", serde_json::to_string(&val)?);
        }
        return Ok(true);
    }
    Ok(false)
}

// Cross-rate hub settings
pub fn get_cross_currency(conn: &Connection) -> Result<String> {
    let v: Option<String> = conn
        .query_row(
            "SELECT value FROM settings WHERE key='cross_currency'",
            [],
            |r| r.get(0),
        )
        .optional()?;
    Ok(v.unwrap_or_else(|| DEFAULT_CROSS_CURRENCY.to_string()))
}

pub fn set_cross_currency(conn: &Connection, ccy: &str) -> Result<()> {
    let code = parse_code(ccy)?;
    conn.execute(
        "INSERT INTO settings(key, value) VALUES('cross_currency', ?1)
         ON CONFLICT(key) DO UPDATE SET value=excluded.value",
        params![code],
    )?;
    Ok(())
}
