// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use env_logger::{Builder, Env};

/// `RUST_LOG` overrides the level picked from `verbose`.
pub fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    let _ = Builder::from_env(Env::default().default_filter_or(level))
        .format_timestamp(None)
        .try_init();
}
