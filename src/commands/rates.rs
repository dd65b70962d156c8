// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::error::{ExchangeError, Result as StoreResult};
use crate::format::{rate_dto, ExchangeRateDto};
use crate::store::{CurrencyStore, RateStore, SqliteStore};
use crate::utils::{maybe_print_json, parse_rate, pretty_table, require_field, split_pair};
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &mut Connection, m: &clap::ArgMatches) -> Result<()> {
    let (name, sub) = match m.subcommand() {
        Some(s) => s,
        None => return Ok(()),
    };
    let arg = |id: &str| sub.get_one::<String>(id).map(String::as_str);
    let tx = conn.transaction()?;
    let store = SqliteStore::new(&tx);
    let rows = match name {
        "list" => list(&store)?,
        "get" => vec![get(&store, arg("pair"))?],
        "add" => vec![add(&store, arg("base"), arg("target"), arg("rate"))?],
        "update" => vec![update(&store, arg("pair"), arg("rate"))?],
        "rm" => vec![remove(&store, arg("pair"))?],
        _ => Vec::new(),
    };
    tx.commit()?;

    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let printed = if name == "list" {
        maybe_print_json(json_flag, jsonl_flag, &rows)?
    } else if let Some(one) = rows.first() {
        maybe_print_json(json_flag, jsonl_flag, one)?
    } else {
        false
    };
    if !printed {
        let data = rows
            .iter()
            .map(|r| {
                vec![
                    r.id.to_string(),
                    r.base_currency.code.clone(),
                    r.target_currency.code.clone(),
                    r.rate.clone(),
                ]
            })
            .collect();
        println!("{}", pretty_table(&["ID", "Base", "Target", "Rate"], data));
    }
    Ok(())
}

pub fn list<S: CurrencyStore + RateStore + ?Sized>(store: &S) -> StoreResult<Vec<ExchangeRateDto>> {
    store
        .list_rates()?
        .iter()
        .map(|r| rate_dto(store, r))
        .collect()
}

pub fn get<S: CurrencyStore + RateStore + ?Sized>(
    store: &S,
    pair: Option<&str>,
) -> StoreResult<ExchangeRateDto> {
    let (base, target) = split_pair(pair.unwrap_or(""))?;
    rate_dto(store, &store.rate_by_pair(&base, &target)?)
}

pub fn add<S: CurrencyStore + RateStore + ?Sized>(
    store: &S,
    base: Option<&str>,
    target: Option<&str>,
    rate: Option<&str>,
) -> StoreResult<ExchangeRateDto> {
    let base = require_field(base, "baseCurrencyCode", 3)?;
    let target = require_field(target, "targetCurrencyCode", 3)?;
    let rate = parse_rate(require_field(rate, "rate", usize::MAX)?)?;
    let created = store.create_rate(base, target, rate)?;
    rate_dto(store, &created)
}

pub fn update<S: CurrencyStore + RateStore + ?Sized>(
    store: &S,
    pair: Option<&str>,
    rate: Option<&str>,
) -> StoreResult<ExchangeRateDto> {
    let (base, target) = split_pair(pair.unwrap_or(""))?;
    let rate = rate
        .filter(|r| !r.trim().is_empty())
        .ok_or_else(|| ExchangeError::invalid("Required form field 'rate' is missing"))?;
    let updated = store.update_rate(&base, &target, parse_rate(rate)?)?;
    rate_dto(store, &updated)
}

pub fn remove<S: CurrencyStore + RateStore + ?Sized>(
    store: &S,
    pair: Option<&str>,
) -> StoreResult<ExchangeRateDto> {
    let (base, target) = split_pair(pair.unwrap_or(""))?;
    let removed = store.delete_rate(&base, &target)?;
    rate_dto(store, &removed)
}
