// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Currency {
    pub id: i64,
    pub code: String,
    pub full_name: String,
    pub sign: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCurrency {
    pub code: String,
    pub full_name: String,
    pub sign: String,
}

/// A directional rate: 1 unit of base buys `rate` units of target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExchangeRate {
    pub id: i64,
    pub base_currency_id: i64,
    pub target_currency_id: i64,
    pub rate: Decimal,
}

/// Which lookup produced a conversion rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RateSource {
    Direct,
    Reverse,
    Cross,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conversion {
    pub base_currency: Currency,
    pub target_currency: Currency,
    pub rate: Decimal,
    pub amount: Decimal,
    pub converted_amount: Decimal,
    pub source: RateSource,
}
