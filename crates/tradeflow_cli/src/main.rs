//! CLI smoke check.
//!
//! # Responsibility
//! - Verify `tradeflow_core` linkage and the configured storage backend.
//! - Print deterministic `key=value` lines for quick local sanity checks.

use log::info;
use std::process::ExitCode;
use tradeflow_core::{open_db, open_db_in_memory, open_workspace, AppConfig};

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("tradeflow_cli error={message}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), String> {
    println!("tradeflow_core ping={}", tradeflow_core::ping());
    println!("tradeflow_core version={}", tradeflow_core::core_version());

    let config = AppConfig::from_env()?;
    tradeflow_core::init_from_config(&config)?;

    let conn = match config.db_path.as_deref() {
        Some(path) => open_db(path),
        None => open_db_in_memory(),
    }
    .map_err(|err| err.to_string())?;

    let mut workspace = open_workspace(&conn, config.backend).map_err(|err| err.to_string())?;
    let customers = workspace
        .customers_mut()
        .entities()
        .map_err(|err| err.to_string())?
        .len();
    let vendors = workspace
        .vendors_mut()
        .entities()
        .map_err(|err| err.to_string())?
        .len();

    info!(
        "event=cli_smoke module=cli status=ok backend={} customers={} vendors={}",
        config.backend, customers, vendors
    );
    println!("tradeflow_core backend={}", config.backend);
    println!("tradeflow_core customers={customers}");
    println!("tradeflow_core vendors={vendors}");
    Ok(())
}
