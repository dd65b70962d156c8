// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use exchanger::error::ExchangeError;
use exchanger::{cli, commands::exchange, db, utils};
use rusqlite::{params, Connection};
use tempfile::tempdir;

fn setup() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    db::init_schema(&conn).unwrap();
    conn.execute_batch(
        r#"
        INSERT INTO currencies(id, code, full_name, sign) VALUES
            (1, 'USD', 'US Dollar', '$'),
            (2, 'RUB', 'Russian Ruble', '₽'),
            (3, 'EUR', 'Euro', '€'),
            (4, 'INR', 'Indian Rupee', '₹'),
            (5, 'GBP', 'Pound Sterling', '£');
        "#,
    )
    .unwrap();
    conn
}

fn rate(conn: &Connection, base: i64, target: i64, rate: &str) {
    conn.execute(
        "INSERT INTO exchange_rates(base_currency_id, target_currency_id, rate) VALUES (?1, ?2, ?3)",
        params![base, target, rate],
    )
    .unwrap();
}

#[test]
fn direct_usd_rub() {
    let conn = setup();
    rate(&conn, 1, 2, "90.5000");
    let dto = exchange::convert(&conn, "USD", "RUB", "10").unwrap();
    assert_eq!(dto.base_currency.code, "USD");
    assert_eq!(dto.target_currency.code, "RUB");
    assert_eq!(dto.rate, "90.5000");
    assert_eq!(dto.amount, "10.00");
    assert_eq!(dto.converted_amount, "905.00");
}

#[test]
fn reverse_rub_usd() {
    let conn = setup();
    rate(&conn, 1, 2, "90.5000");
    let dto = exchange::convert(&conn, "RUB", "USD", "905").unwrap();
    assert_eq!(dto.base_currency.code, "RUB");
    assert_eq!(dto.target_currency.code, "USD");
    assert_eq!(dto.rate, "0.011050");
    assert_eq!(dto.converted_amount, "10.00");
}

#[test]
fn direct_beats_reverse() {
    let conn = setup();
    rate(&conn, 1, 2, "90.5000");
    rate(&conn, 2, 1, "0.0120");
    let dto = exchange::convert(&conn, "RUB", "USD", "100").unwrap();
    assert_eq!(dto.rate, "0.0120");
    assert_eq!(dto.converted_amount, "1.20");
}

#[test]
fn cross_via_usd() {
    let conn = setup();
    rate(&conn, 1, 3, "0.9000");
    rate(&conn, 1, 4, "83.0000");
    let dto = exchange::convert(&conn, "EUR", "INR", "90").unwrap();
    assert_eq!(dto.base_currency.code, "EUR");
    assert_eq!(dto.target_currency.code, "INR");
    assert_eq!(dto.rate, "92.222222");
    assert_eq!(dto.converted_amount, "8300.00");
}

#[test]
fn cross_honours_configured_hub() {
    let conn = setup();
    rate(&conn, 3, 1, "1.1000");
    rate(&conn, 3, 5, "0.8800");
    assert!(exchange::convert(&conn, "USD", "GBP", "11").is_err());
    utils::set_cross_currency(&conn, "EUR").unwrap();
    let dto = exchange::convert(&conn, "USD", "GBP", "11").unwrap();
    assert_eq!(dto.rate, "0.800000");
    assert_eq!(dto.converted_amount, "8.80");
}

#[test]
fn unresolved_pair_names_both_codes() {
    let conn = setup();
    rate(&conn, 1, 3, "0.9000");
    let err = exchange::convert(&conn, "EUR", "GBP", "1").unwrap_err();
    assert_eq!(err.status(), 404);
    let msg = err.envelope().message;
    assert!(msg.contains("EUR") && msg.contains("GBP"), "{msg}");
}

#[test]
fn identity_pair_without_rate_is_not_found() {
    let conn = setup();
    rate(&conn, 1, 3, "0.9000");
    let err = exchange::convert(&conn, "RUB", "RUB", "3").unwrap_err();
    assert!(matches!(err, ExchangeError::NotFound(_)));
}

#[test]
fn invalid_input_fails_fast() {
    let conn = setup();
    rate(&conn, 1, 2, "90.5000");
    for (from, to, amount) in [
        ("", "RUB", "1"),
        ("USD", "RU", "1"),
        ("USD", "RUB", "-1"),
        ("USD", "RUB", "lots"),
    ] {
        let err = exchange::convert(&conn, from, to, amount).unwrap_err();
        assert_eq!(err.status(), 400, "{from}->{to} {amount}");
    }
    let zero = exchange::convert(&conn, "USD", "RUB", "0").unwrap();
    assert_eq!(zero.converted_amount, "0.00");
}

#[test]
fn cli_exchange_on_disk_db() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("rates.sqlite");
    let mut conn = db::open_or_init(Some(path.as_path())).unwrap();
    conn.execute_batch(
        "INSERT INTO currencies(code, full_name, sign) VALUES ('USD','US Dollar','$'), ('RUB','Russian Ruble','₽');
         INSERT INTO exchange_rates(base_currency_id, target_currency_id, rate) VALUES (1, 2, '90.5000');",
    )
    .unwrap();

    let matches = cli::build_cli().get_matches_from([
        "exchanger",
        "exchange",
        "--from",
        "usd",
        "--to",
        "rub",
        "--amount",
        "10",
        "--json",
    ]);
    if let Some(("exchange", sub)) = matches.subcommand() {
        exchange::handle(&mut conn, sub).unwrap();
    } else {
        panic!("no exchange subcommand");
    }
    drop(conn);

    let reopened = db::open_or_init(Some(path.as_path())).unwrap();
    let dto = exchange::convert(&reopened, "USD", "RUB", "10").unwrap();
    assert_eq!(dto.converted_amount, "905.00");
}
