// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Response representations for currencies, rates and conversions.

use crate::error::Result;
use crate::models::{Conversion, Currency, ExchangeRate, RateSource};
use crate::resolver::{AMOUNT_DP, DERIVED_RATE_DP};
use crate::store::CurrencyStore;
use crate::utils::{fixed, RATE_SCALE};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CurrencyDto {
    pub id: i64,
    pub name: String,
    pub code: String,
    pub sign: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExchangeRateDto {
    pub id: i64,
    pub base_currency: CurrencyDto,
    pub target_currency: CurrencyDto,
    pub rate: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversionDto {
    pub base_currency: CurrencyDto,
    pub target_currency: CurrencyDto,
    pub rate: String,
    pub amount: String,
    pub converted_amount: String,
}

impl From<&Currency> for CurrencyDto {
    fn from(c: &Currency) -> Self {
        CurrencyDto {
            id: c.id,
            name: c.full_name.clone(),
            code: c.code.clone(),
            sign: c.sign.clone(),
        }
    }
}

/// Expands a stored rate with its currencies.
pub fn rate_dto<C: CurrencyStore + ?Sized>(store: &C, r: &ExchangeRate) -> Result<ExchangeRateDto> {
    let base = store.currency_by_id(r.base_currency_id)?;
    let target = store.currency_by_id(r.target_currency_id)?;
    Ok(ExchangeRateDto {
        id: r.id,
        base_currency: (&base).into(),
        target_currency: (&target).into(),
        rate: fixed(r.rate, RATE_SCALE),
    })
}

pub fn conversion_dto(c: &Conversion) -> ConversionDto {
    let rate_dp = match c.source {
        RateSource::Direct => RATE_SCALE,
        RateSource::Reverse | RateSource::Cross => DERIVED_RATE_DP,
    };
    ConversionDto {
        base_currency: (&c.base_currency).into(),
        target_currency: (&c.target_currency).into(),
        rate: fixed(c.rate, rate_dp),
        amount: fixed(c.amount, AMOUNT_DP),
        converted_amount: fixed(c.converted_amount, AMOUNT_DP),
    }
}
