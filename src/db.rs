// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use directories::ProjectDirs;
use once_cell::sync::Lazy;
use rusqlite::Connection;
use std::fs;
use std::path::{Path, PathBuf};

static APP: Lazy<(&str, &str, &str)> =
    Lazy::new(|| ("com.alphavelocity", "Exchanger", "exchanger"));

pub const DB_ENV: &str = "EXCHANGER_DB";

pub fn db_path() -> Result<PathBuf> {
    let proj = ProjectDirs::from(APP.0, APP.1, APP.2)
        .context("Could not determine platform-specific data dir")?;
    let data_dir = proj.data_dir();
    fs::create_dir_all(data_dir).context("Failed to create data dir")?;
    Ok(data_dir.join("exchanger.sqlite"))
}

/// Resolves the database location: explicit path first, then the platform data dir.
pub fn resolve_path(explicit: Option<&Path>) -> Result<PathBuf> {
    match explicit {
        Some(p) => Ok(p.to_path_buf()),
        None => db_path(),
    }
}

pub fn open_or_init(explicit: Option<&Path>) -> Result<Connection> {
    let path = resolve_path(explicit)?;
    let conn =
        Connection::open(&path).with_context(|| format!("Open DB at {}", path.display()))?;
    init_schema(&conn)?;
    log::debug!("database ready at {}", path.display());
    Ok(conn)
}

pub fn init_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
    PRAGMA foreign_keys = ON;

    CREATE TABLE IF NOT EXISTS settings(
        key TEXT PRIMARY KEY,
        value TEXT NOT NULL
    );

    CREATE TABLE IF NOT EXISTS currencies(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        code TEXT NOT NULL UNIQUE,
        full_name TEXT NOT NULL,
        sign TEXT NOT NULL
    );

    -- 1 base = rate target, stored as decimal text at scale 4
    CREATE TABLE IF NOT EXISTS exchange_rates(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        base_currency_id INTEGER NOT NULL,
        target_currency_id INTEGER NOT NULL,
        rate TEXT NOT NULL,
        UNIQUE(base_currency_id, target_currency_id),
        FOREIGN KEY(base_currency_id) REFERENCES currencies(id) ON DELETE CASCADE,
        FOREIGN KEY(target_currency_id) REFERENCES currencies(id) ON DELETE CASCADE
    );
    "#,
    )?;
    Ok(())
}
