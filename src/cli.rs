// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, value_parser};
use std::path::PathBuf;

fn output_flags(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print as pretty JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .conflicts_with("json")
            .help("Print as JSON lines"),
    )
}

fn pair_arg() -> Arg {
    Arg::new("pair").help("Concatenated base and target codes, e.g. USDRUB")
}

pub fn build_cli() -> Command {
    Command::new("exchanger")
        .version(clap::crate_version!())
        .about("Currency catalog, exchange rates and conversions")
        .arg(
            Arg::new("db")
                .long("db")
                .global(true)
                .env(crate::db::DB_ENV)
                .value_parser(value_parser!(PathBuf))
                .help("SQLite database file (defaults to the platform data dir)"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Enable debug logging"),
        )
        .subcommand(Command::new("init").about("Create the database"))
        .subcommand(
            Command::new("config")
                .about("Show or change settings")
                .subcommand(
                    Command::new("cross-currency")
                        .about("Show or set the currency used for cross rates")
                        .arg(Arg::new("currency").help("3-letter code, e.g. USD")),
                ),
        )
        .subcommand(
            Command::new("currencies")
                .about("Manage the currency catalog")
                .subcommand_required(true)
                .subcommand(output_flags(Command::new("list").about("List all currencies")))
                .subcommand(output_flags(
                    Command::new("get")
                        .about("Show one currency")
                        .arg(Arg::new("code")),
                ))
                .subcommand(output_flags(
                    Command::new("add")
                        .about("Add a currency")
                        .arg(Arg::new("name").long("name").help("Full name, up to 30 chars"))
                        .arg(Arg::new("code").long("code").help("3-letter code"))
                        .arg(Arg::new("sign").long("sign").help("Sign, up to 5 chars")),
                ))
                .subcommand(output_flags(
                    Command::new("rm")
                        .about("Remove a currency and every rate that uses it")
                        .arg(Arg::new("code")),
                )),
        )
        .subcommand(
            Command::new("rates")
                .about("Manage exchange rates")
                .subcommand_required(true)
                .subcommand(output_flags(Command::new("list").about("List all rates")))
                .subcommand(output_flags(
                    Command::new("get").about("Show one rate").arg(pair_arg()),
                ))
                .subcommand(output_flags(
                    Command::new("add")
                        .about("Add a rate: 1 base = RATE target")
                        .arg(Arg::new("base").long("base"))
                        .arg(Arg::new("target").long("target"))
                        .arg(Arg::new("rate").long("rate").allow_hyphen_values(true)),
                ))
                .subcommand(output_flags(
                    Command::new("update")
                        .about("Change an existing rate")
                        .arg(pair_arg())
                        .arg(Arg::new("rate").long("rate").allow_hyphen_values(true)),
                ))
                .subcommand(output_flags(
                    Command::new("rm").about("Remove a rate").arg(pair_arg()),
                )),
        )
        .subcommand(output_flags(
            Command::new("exchange")
                .about("Convert an amount between two currencies")
                .arg(Arg::new("from").long("from").required(true))
                .arg(Arg::new("to").long("to").required(true))
                .arg(
                    Arg::new("amount")
                        .long("amount")
                        .required(true)
                        .allow_hyphen_values(true),
                ),
        ))
}
