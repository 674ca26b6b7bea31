//! Fuzz target for database configuration resolution.
//!
//! Arbitrary environment values either resolve or produce an error.

#![no_main]

use libfuzzer_sys::fuzz_target;
use pd_config::db::{ENV_DB_HOST, ENV_DB_NAME, ENV_DB_PORT, ENV_DB_USERNAME};
use pd_config::DbConfig;

fuzz_target!(|data: (Option<String>, Option<String>, Option<String>, Option<String>)| {
    let (username, host, port, database) = data;
    let lookup = |key: &str| match key {
        ENV_DB_USERNAME => username.clone(),
        ENV_DB_HOST => host.clone(),
        ENV_DB_PORT => port.clone(),
        ENV_DB_NAME => database.clone(),
        _ => None,
    };
    if let Ok(config) = DbConfig::from_lookup(lookup) {
        assert!(!config.database.trim().is_empty());
        let _ = config.redacted_url();
    }
});
