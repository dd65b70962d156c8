// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use std::path::PathBuf;
use std::process::ExitCode;

use exchanger::error::ExchangeError;
use exchanger::{cli, commands, db};

fn run() -> Result<()> {
    let cli = cli::build_cli();
    let matches = cli.get_matches();
    exchanger::logging::init_logging(matches.get_flag("verbose"));

    let db_arg = matches.get_one::<PathBuf>("db").map(PathBuf::as_path);
    let mut conn = db::open_or_init(db_arg)?;

    match matches.subcommand() {
        Some(("init", _)) => {
            println!("Database initialized at {}", db::resolve_path(db_arg)?.display());
        }
        Some(("config", sub)) => commands::config::handle(&mut conn, sub)?,
        Some(("currencies", sub)) => commands::currencies::handle(&mut conn, sub)?,
        Some(("rates", sub)) => commands::rates::handle(&mut conn, sub)?,
        Some(("exchange", sub)) => commands::exchange::handle(&mut conn, sub)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => match err.downcast_ref::<ExchangeError>() {
            Some(e) => {
                let body = serde_json::to_string(&e.envelope())
                    .unwrap_or_else(|_| format!("{{\"message\":\"{}\"}}", e));
                eprintln!("{} {}", e.status(), body);
                ExitCode::from(e.exit_code() as u8)
            }
            None => {
                eprintln!("Error: {:#}", err);
                ExitCode::FAILURE
            }
        },
    }
}
