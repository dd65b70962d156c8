// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::error::Result as StoreResult;
use crate::format::{conversion_dto, ConversionDto};
use crate::resolver::RateResolver;
use crate::store::SqliteStore;
use crate::utils::{get_cross_currency, maybe_print_json, parse_amount, pretty_table};
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &mut Connection, m: &clap::ArgMatches) -> Result<()> {
    let from = m.get_one::<String>("from").unwrap();
    let to = m.get_one::<String>("to").unwrap();
    let amount = m.get_one::<String>("amount").unwrap();

    let tx = conn.transaction()?;
    let dto = convert(&tx, from, to, amount)?;
    tx.commit()?;

    if !maybe_print_json(m.get_flag("json"), m.get_flag("jsonl"), &dto)? {
        println!(
            "{}",
            pretty_table(
                &["From", "To", "Rate", "Amount", "Converted"],
                vec![vec![
                    dto.base_currency.code.clone(),
                    dto.target_currency.code.clone(),
                    dto.rate.clone(),
                    dto.amount.clone(),
                    dto.converted_amount.clone(),
                ]],
            )
        );
    }
    Ok(())
}

/// Runs a conversion against the database using the configured cross currency.
pub fn convert(conn: &Connection, from: &str, to: &str, amount: &str) -> StoreResult<ConversionDto> {
    let amount = parse_amount(amount)?;
    let store = SqliteStore::new(conn);
    let resolver = RateResolver::new(&store, &store).with_cross_currency(get_cross_currency(conn)?);
    let conversion = resolver.convert(from, to, amount)?;
    Ok(conversion_dto(&conversion))
}
