// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::error::Result as StoreResult;
use crate::format::CurrencyDto;
use crate::models::NewCurrency;
use crate::store::{CurrencyStore, SqliteStore};
use crate::utils::{maybe_print_json, pretty_table, require_field, MAX_NAME_LEN, MAX_SIGN_LEN};
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &mut Connection, m: &clap::ArgMatches) -> Result<()> {
    let (name, sub) = match m.subcommand() {
        Some(s) => s,
        None => return Ok(()),
    };
    let tx = conn.transaction()?;
    let store = SqliteStore::new(&tx);
    let rows = match name {
        "list" => list(&store)?,
        "get" => vec![get(&store, sub.get_one::<String>("code").map(String::as_str))?],
        "add" => vec![add(
            &store,
            sub.get_one::<String>("name").map(String::as_str),
            sub.get_one::<String>("code").map(String::as_str),
            sub.get_one::<String>("sign").map(String::as_str),
        )?],
        "rm" => vec![remove(&store, sub.get_one::<String>("code").map(String::as_str))?],
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
        print_table(&rows);
    }
    Ok(())
}

pub fn list<C: CurrencyStore + ?Sized>(store: &C) -> StoreResult<Vec<CurrencyDto>> {
    Ok(store
        .list_currencies()?
        .iter()
        .map(CurrencyDto::from)
        .collect())
}

pub fn get<C: CurrencyStore + ?Sized>(store: &C, code: Option<&str>) -> StoreResult<CurrencyDto> {
    let c = store.currency_by_code(code.unwrap_or(""))?;
    Ok((&c).into())
}

pub fn add<C: CurrencyStore + ?Sized>(
    store: &C,
    name: Option<&str>,
    code: Option<&str>,
    sign: Option<&str>,
) -> StoreResult<CurrencyDto> {
    let full_name = require_field(name, "name", MAX_NAME_LEN)?;
    let code = require_field(code, "code", 3)?;
    let sign = require_field(sign, "sign", MAX_SIGN_LEN)?;
    let c = store.create_currency(&NewCurrency {
        code: code.to_string(),
        full_name: full_name.to_string(),
        sign: sign.to_string(),
    })?;
    Ok((&c).into())
}

pub fn remove<C: CurrencyStore + ?Sized>(
    store: &C,
    code: Option<&str>,
) -> StoreResult<CurrencyDto> {
    let c = store.delete_currency(code.unwrap_or(""))?;
    Ok((&c).into())
}

fn print_table(rows: &[CurrencyDto]) {
    let data = rows
        .iter()
        .map(|c| {
            vec![
                c.id.to_string(),
                c.code.clone(),
                c.name.clone(),
                c.sign.clone(),
            ]
        })
        .collect();
    println!("{}", pretty_table(&["ID", "Code", "Name", "Sign"], data));
}
