// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::utils::{get_cross_currency, set_cross_currency};
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &mut Connection, m: &clap::ArgMatches) -> Result<()> {
    if let Some(("cross-currency", sub)) = m.subcommand() {
        let tx = conn.transaction()?;
        let current = match sub.get_one::<String>("currency") {
            Some(ccy) => {
                set_cross_currency(&tx, ccy)?;
                let code = get_cross_currency(&tx)?;
                format!("Cross currency set to {}", code)
            }
            None => get_cross_currency(&tx)?,
        };
        tx.commit()?;
        println!("{}", current);
    }
    Ok(())
}
