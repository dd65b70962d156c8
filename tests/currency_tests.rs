// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use exchanger::error::ExchangeError;
use exchanger::models::NewCurrency;
use exchanger::store::{CurrencyStore, RateStore, SqliteStore};
use exchanger::{cli, commands::currencies, db};
use rusqlite::Connection;
use rust_decimal::Decimal;

fn setup() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    db::init_schema(&conn).unwrap();
    conn
}

fn new(code: &str, name: &str, sign: &str) -> NewCurrency {
    NewCurrency {
        code: code.into(),
        full_name: name.into(),
        sign: sign.into(),
    }
}

#[test]
fn create_and_find_currency() {
    let conn = setup();
    let store = SqliteStore::new(&conn);
    let usd = store.create_currency(&new("usd", "US Dollar", "$")).unwrap();
    assert_eq!(usd.code, "USD");
    assert_eq!(store.currency_by_code("USD").unwrap(), usd);
    assert_eq!(store.currency_by_id(usd.id).unwrap(), usd);
    assert_eq!(store.list_currencies().unwrap().len(), 1);
}

#[test]
fn duplicate_code_is_conflict() {
    let conn = setup();
    let store = SqliteStore::new(&conn);
    store.create_currency(&new("EUR", "Euro", "€")).unwrap();
    let err = store.create_currency(&new("EUR", "Euro again", "E")).unwrap_err();
    assert!(matches!(err, ExchangeError::Conflict(_)), "{err:?}");
    assert_eq!(err.status(), 409);
}

#[test]
fn lookups_distinguish_missing_and_malformed() {
    let conn = setup();
    let store = SqliteStore::new(&conn);
    assert!(matches!(
        store.currency_by_code("GBP"),
        Err(ExchangeError::NotFound(_))
    ));
    assert!(matches!(
        store.currency_by_code(""),
        Err(ExchangeError::InvalidInput(_))
    ));
    assert!(matches!(
        store.currency_by_id(42),
        Err(ExchangeError::NotFound(_))
    ));
}

#[test]
fn add_requires_every_field() {
    let conn = setup();
    let store = SqliteStore::new(&conn);
    let err = currencies::add(&store, Some("Euro"), Some("EUR"), None).unwrap_err();
    assert_eq!(err.status(), 400);
    let err = currencies::add(&store, Some(""), Some("EUR"), Some("€")).unwrap_err();
    assert_eq!(err.status(), 400);
    let long_name = "x".repeat(31);
    let err = currencies::add(&store, Some(&long_name), Some("EUR"), Some("€")).unwrap_err();
    assert_eq!(err.status(), 400);
    assert!(store.list_currencies().unwrap().is_empty());
}

#[test]
fn delete_cascades_to_rates() {
    let conn = setup();
    let store = SqliteStore::new(&conn);
    store.create_currency(&new("USD", "US Dollar", "$")).unwrap();
    store.create_currency(&new("RUB", "Russian Ruble", "₽")).unwrap();
    store.create_currency(&new("EUR", "Euro", "€")).unwrap();
    store
        .create_rate("USD", "RUB", Decimal::new(905, 1))
        .unwrap();
    store
        .create_rate("EUR", "USD", Decimal::new(11, 1))
        .unwrap();
    store
        .create_rate("EUR", "RUB", Decimal::new(99, 0))
        .unwrap();

    let gone = store.delete_currency("usd").unwrap();
    assert_eq!(gone.code, "USD");
    let left = store.list_rates().unwrap();
    assert_eq!(left.len(), 1);
    assert!(matches!(
        store.delete_currency("USD"),
        Err(ExchangeError::NotFound(_))
    ));
}

#[test]
fn cli_add_then_remove_commits() {
    let mut conn = setup();
    let matches = cli::build_cli().get_matches_from([
        "exchanger", "currencies", "add", "--name", "Japanese Yen", "--code", "JPY", "--sign",
        "¥", "--json",
    ]);
    if let Some(("currencies", sub)) = matches.subcommand() {
        currencies::handle(&mut conn, sub).unwrap();
    } else {
        panic!("no currencies subcommand");
    }
    let store = SqliteStore::new(&conn);
    assert_eq!(store.currency_by_code("JPY").unwrap().sign, "¥");

    let matches = cli::build_cli().get_matches_from(["exchanger", "currencies", "rm", "JPY"]);
    if let Some(("currencies", sub)) = matches.subcommand() {
        currencies::handle(&mut conn, sub).unwrap();
    } else {
        panic!("no currencies subcommand");
    }
    let store = SqliteStore::new(&conn);
    assert!(store.list_currencies().unwrap().is_empty());
}

#[test]
fn cli_failure_rolls_back() {
    let mut conn = setup();
    let matches =
        cli::build_cli().get_matches_from(["exchanger", "currencies", "add", "--code", "CHF"]);
    if let Some(("currencies", sub)) = matches.subcommand() {
        let err = currencies::handle(&mut conn, sub).unwrap_err();
        let typed = err.downcast_ref::<ExchangeError>().unwrap();
        assert_eq!(typed.status(), 400);
    } else {
        panic!("no currencies subcommand");
    }
    let store = SqliteStore::new(&conn);
    assert!(store.list_currencies().unwrap().is_empty());
}
