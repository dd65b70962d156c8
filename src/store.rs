// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Currency and rate lookups over SQLite.
//!
//! Both stores are plain capability traits so the resolver can be driven by
//! anything that answers lookups; [`SqliteStore`] is the persistent one and
//! works on a bare `Connection` or on an open `Transaction`.

use crate::error::{ExchangeError, Result};
use crate::models::{Currency, ExchangeRate, NewCurrency};
use crate::utils::{normalize_rate, parse_code};
use rusqlite::{params, Connection, OptionalExtension, Row};
use rust_decimal::Decimal;

pub trait CurrencyStore {
    fn list_currencies(&self) -> Result<Vec<Currency>>;
    fn currency_by_code(&self, code: &str) -> Result<Currency>;
    fn currency_by_id(&self, id: i64) -> Result<Currency>;
    fn create_currency(&self, new: &NewCurrency) -> Result<Currency>;
    /// Removes the currency and, through the foreign keys, every rate using it.
    fn delete_currency(&self, code: &str) -> Result<Currency>;
}

pub trait RateStore {
    fn list_rates(&self) -> Result<Vec<ExchangeRate>>;
    fn rate_by_pair(&self, base: &str, target: &str) -> Result<ExchangeRate>;
    fn create_rate(&self, base: &str, target: &str, rate: Decimal) -> Result<ExchangeRate>;
    fn update_rate(&self, base: &str, target: &str, rate: Decimal) -> Result<ExchangeRate>;
    fn delete_rate(&self, base: &str, target: &str) -> Result<ExchangeRate>;
}

pub struct SqliteStore<'c> {
    conn: &'c Connection,
}

impl<'c> SqliteStore<'c> {
    pub fn new(conn: &'c Connection) -> Self {
        Self { conn }
    }
}

fn currency_from_row(r: &Row<'_>) -> rusqlite::Result<Currency> {
    Ok(Currency {
        id: r.get(0)?,
        code: r.get(1)?,
        full_name: r.get(2)?,
        sign: r.get(3)?,
    })
}

fn rate_from_row(r: &Row<'_>) -> rusqlite::Result<(i64, i64, i64, String)> {
    Ok((r.get(0)?, r.get(1)?, r.get(2)?, r.get(3)?))
}

fn into_rate((id, base, target, raw): (i64, i64, i64, String)) -> Result<ExchangeRate> {
    let rate = raw.parse::<Decimal>().map_err(|_| {
        ExchangeError::StoreUnavailable(rusqlite::Error::FromSqlConversionFailure(
            3,
            rusqlite::types::Type::Text,
            format!("invalid stored rate '{}' for row {}", raw, id).into(),
        ))
    })?;
    Ok(ExchangeRate {
        id,
        base_currency_id: base,
        target_currency_id: target,
        rate,
    })
}

const RATE_BY_PAIR_SQL: &str = "SELECT r.id, r.base_currency_id, r.target_currency_id, r.rate
     FROM exchange_rates r
     JOIN currencies b ON r.base_currency_id=b.id
     JOIN currencies t ON r.target_currency_id=t.id
     WHERE b.code=?1 AND t.code=?2";

impl CurrencyStore for SqliteStore<'_> {
    fn list_currencies(&self) -> Result<Vec<Currency>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, code, full_name, sign FROM currencies ORDER BY id")?;
        let rows = stmt.query_map([], currency_from_row)?;
        let mut out = Vec::new();
        for row in rows {
            out.push(row?);
        }
        Ok(out)
    }

    fn currency_by_code(&self, code: &str) -> Result<Currency> {
        let code = parse_code(code)?;
        self.conn
            .query_row(
                "SELECT id, code, full_name, sign FROM currencies WHERE code=?1",
                params![code],
                currency_from_row,
            )
            .optional()?
            .ok_or_else(|| ExchangeError::not_found(format!("Currency '{}' not found", code)))
    }

    fn currency_by_id(&self, id: i64) -> Result<Currency> {
        self.conn
            .query_row(
                "SELECT id, code, full_name, sign FROM currencies WHERE id=?1",
                params![id],
                currency_from_row,
            )
            .optional()?
            .ok_or_else(|| ExchangeError::not_found(format!("Currency with id {} not found", id)))
    }

    fn create_currency(&self, new: &NewCurrency) -> Result<Currency> {
        if new.full_name.trim().is_empty() || new.sign.trim().is_empty() {
            return Err(ExchangeError::invalid("Required form field is missing"));
        }
        let code = parse_code(&new.code)?;
        self.conn
            .execute(
                "INSERT INTO currencies(code, full_name, sign) VALUES (?1, ?2, ?3)",
                params![code, new.full_name.trim(), new.sign.trim()],
            )
            .map_err(|e| {
                ExchangeError::from_insert(
                    e,
                    format!("Currency with code '{}' already exists", code),
                )
            })?;
        let id = self.conn.last_insert_rowid();
        log::info!("created currency {} (id {})", code, id);
        self.currency_by_id(id)
    }

    fn delete_currency(&self, code: &str) -> Result<Currency> {
        let currency = self.currency_by_code(code)?;
        let dependents: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM exchange_rates WHERE base_currency_id=?1 OR target_currency_id=?1",
            params![currency.id],
            |r| r.get(0),
        )?;
        self.conn
            .execute("DELETE FROM currencies WHERE id=?1", params![currency.id])?;
        log::info!(
            "deleted currency {} with {} dependent rate(s)",
            currency.code,
            dependents
        );
        Ok(currency)
    }
}

impl RateStore for SqliteStore<'_> {
    fn list_rates(&self) -> Result<Vec<ExchangeRate>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, base_currency_id, target_currency_id, rate FROM exchange_rates ORDER BY id",
        )?;
        let rows = stmt.query_map([], rate_from_row)?;
        let mut out = Vec::new();
        for row in rows {
            out.push(into_rate(row?)?);
        }
        Ok(out)
    }

    fn rate_by_pair(&self, base: &str, target: &str) -> Result<ExchangeRate> {
        let base = parse_code(base)?;
        let target = parse_code(target)?;
        let row = self
            .conn
            .query_row(RATE_BY_PAIR_SQL, params![base, target], rate_from_row)
            .optional()?;
        match row {
            Some(r) => into_rate(r),
            None => Err(ExchangeError::not_found(format!(
                "Exchange rate {}-{} not found",
                base, target
            ))),
        }
    }

    fn create_rate(&self, base: &str, target: &str, rate: Decimal) -> Result<ExchangeRate> {
        let rate = normalize_rate(rate)?;
        let base_ccy = self.currency_by_code(base)?;
        let target_ccy = self.currency_by_code(target)?;
        self.conn
            .execute(
                "INSERT INTO exchange_rates(base_currency_id, target_currency_id, rate) VALUES (?1, ?2, ?3)",
                params![base_ccy.id, target_ccy.id, rate.to_string()],
            )
            .map_err(|e| {
                ExchangeError::from_insert(
                    e,
                    format!(
                        "Exchange rate {}-{} already exists",
                        base_ccy.code, target_ccy.code
                    ),
                )
            })?;
        log::info!("created rate {}->{} = {}", base_ccy.code, target_ccy.code, rate);
        Ok(ExchangeRate {
            id: self.conn.last_insert_rowid(),
            base_currency_id: base_ccy.id,
            target_currency_id: target_ccy.id,
            rate,
        })
    }

    fn update_rate(&self, base: &str, target: &str, rate: Decimal) -> Result<ExchangeRate> {
        let rate = normalize_rate(rate)?;
        let mut existing = self.rate_by_pair(base, target)?;
        self.conn.execute(
            "UPDATE exchange_rates SET rate=?1 WHERE id=?2",
            params![rate.to_string(), existing.id],
        )?;
        log::info!("updated rate #{} from {} to {}", existing.id, existing.rate, rate);
        existing.rate = rate;
        Ok(existing)
    }

    fn delete_rate(&self, base: &str, target: &str) -> Result<ExchangeRate> {
        let existing = self.rate_by_pair(base, target)?;
        self.conn
            .execute("DELETE FROM exchange_rates WHERE id=?1", params![existing.id])?;
        log::info!("deleted rate #{}", existing.id);
        Ok(existing)
    }
}
