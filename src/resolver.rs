// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Rate resolution for conversion queries.
//!
//! A pair is resolved by trying, in order, the stored direct rate, the
//! reciprocal of the stored reverse rate, and the ratio of two rates quoted
//! against the cross currency (USD unless configured otherwise). The first
//! tier that finds its rows wins; a miss at one tier only moves on to the next.
//!
//! All quantisation is half-up: reverse and cross rates to 6 places, converted
//! amounts to 2 places. The reverse and cross rates are rounded *before* they
//! are multiplied by the amount, so the converted amount is derived from the
//! same rate that is reported.

use crate::error::{ExchangeError, NotFoundExt, Result};
use crate::models::{Conversion, ExchangeRate, RateSource};
use crate::store::{CurrencyStore, RateStore};
use crate::utils::{parse_code, quantize, round_half_up, DEFAULT_CROSS_CURRENCY};
use rust_decimal::Decimal;

pub const DERIVED_RATE_DP: u32 = 6;
pub const AMOUNT_DP: u32 = 2;

pub struct RateResolver<'s, C: ?Sized, R: ?Sized> {
    currencies: &'s C,
    rates: &'s R,
    cross: String,
}

impl<'s, C, R> RateResolver<'s, C, R>
where
    C: CurrencyStore + ?Sized,
    R: RateStore + ?Sized,
{
    pub fn new(currencies: &'s C, rates: &'s R) -> Self {
        Self {
            currencies,
            rates,
            cross: DEFAULT_CROSS_CURRENCY.to_string(),
        }
    }

    pub fn with_cross_currency(mut self, code: impl Into<String>) -> Self {
        self.cross = code.into();
        self
    }

    pub fn cross_currency(&self) -> &str {
        &self.cross
    }

    pub fn convert(&self, from: &str, to: &str, amount: Decimal) -> Result<Conversion> {
        let from = parse_code(from)?;
        let to = parse_code(to)?;
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(ExchangeError::invalid(format!(
                "Amount must not be negative, got {}",
                amount
            )));
        }
        if quantize(amount, AMOUNT_DP).is_none() {
            return Err(ExchangeError::invalid(format!(
                "Amount {} is too large, it must fit {} decimal places",
                amount, AMOUNT_DP
            )));
        }

        if let Some(c) = self.direct_tier(&from, &to, amount)? {
            log::debug!("{}->{} resolved by direct rate", from, to);
            return Ok(c);
        }
        if let Some(c) = self.reverse_tier(&from, &to, amount)? {
            log::debug!("{}->{} resolved by reverse rate", from, to);
            return Ok(c);
        }
        if let Some(c) = self.cross_tier(&from, &to, amount)? {
            log::debug!("{}->{} resolved via {}", from, to, self.cross);
            return Ok(c);
        }

        log::info!("no rate path for {}->{}", from, to);
        Err(ExchangeError::not_found(format!(
            "Exchange rate {}-{} not found",
            from, to
        )))
    }

    fn lookup(&self, base: &str, target: &str) -> Result<Option<ExchangeRate>> {
        self.rates.rate_by_pair(base, target).found()
    }

    fn conversion(
        &self,
        base_id: i64,
        target_id: i64,
        rate: Decimal,
        amount: Decimal,
        source: RateSource,
    ) -> Result<Conversion> {
        let converted = rate
            .checked_mul(amount)
            .and_then(|v| quantize(v, AMOUNT_DP))
            .ok_or_else(|| {
                ExchangeError::invalid(format!("Amount {} is too large to convert", amount))
            })?;
        Ok(Conversion {
            base_currency: self.currencies.currency_by_id(base_id)?,
            target_currency: self.currencies.currency_by_id(target_id)?,
            rate,
            amount,
            converted_amount: converted,
            source,
        })
    }

    fn direct_tier(&self, from: &str, to: &str, amount: Decimal) -> Result<Option<Conversion>> {
        let Some(r) = self.lookup(from, to)? else {
            return Ok(None);
        };
        self.conversion(
            r.base_currency_id,
            r.target_currency_id,
            r.rate,
            amount,
            RateSource::Direct,
        )
        .map(Some)
    }

    fn reverse_tier(&self, from: &str, to: &str, amount: Decimal) -> Result<Option<Conversion>> {
        let Some(r) = self.lookup(to, from)? else {
            return Ok(None);
        };
        let Some(inverse) = Decimal::ONE.checked_div(r.rate) else {
            log::warn!("stored rate {}->{} is zero, skipping reverse", to, from);
            return Ok(None);
        };
        let rate = round_half_up(inverse, DERIVED_RATE_DP);
        // the stored row is to->from, so its target is the semantic base
        self.conversion(
            r.target_currency_id,
            r.base_currency_id,
            rate,
            amount,
            RateSource::Reverse,
        )
        .map(Some)
    }

    fn cross_tier(&self, from: &str, to: &str, amount: Decimal) -> Result<Option<Conversion>> {
        let Some(hub_from) = self.lookup(&self.cross, from)? else {
            return Ok(None);
        };
        let Some(hub_to) = self.lookup(&self.cross, to)? else {
            return Ok(None);
        };
        let Some(ratio) = hub_to.rate.checked_div(hub_from.rate) else {
            log::warn!("stored rate {}->{} is zero, skipping cross", self.cross, from);
            return Ok(None);
        };
        let rate = round_half_up(ratio, DERIVED_RATE_DP);
        self.conversion(
            hub_from.target_currency_id,
            hub_to.target_currency_id,
            rate,
            amount,
            RateSource::Cross,
        )
        .map(Some)
    }
}
