use std::process;

use anyhow::Result;
use cfdb_application::Service;
use cfdb_db_sqlite::SqliteBackend;
use cfdb_entities::principal::Principal;
use clap::Parser;

mod cli;
mod config;

use self::{
    cli::{Action, Cli},
    config::Config,
};

fn main() {
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    match run(Cli::parse()) {
        Ok(true) => {}
        Ok(false) => process::exit(1),
        Err(err) => {
            log::error!("{err:#}");
            process::exit(1);
        }
    }
}

/// Executes a single command and reports whether it succeeded.
fn run(cli: Cli) -> Result<bool> {
    let Cli {
        config,
        db_url,
        caller,
        command,
    } = cli;
    let mut cfg = Config::try_load_from_file_or_default(config.as_ref())?;
    if let Some(db_url) = db_url {
        cfg.set_db_url(db_url);
    }
    let pool_size = cfg.db_pool_size();
    log::info!(
        "Connecting to SQLite database '{}' (pool size = {pool_size})",
        cfg.db.conn_sqlite
    );
    let backend = SqliteBackend::open(&cfg.db.conn_sqlite, pool_size)?;

    let Config { stores, policy, .. } = cfg;
    let service = Service::open(backend, stores.courses, stores.feedback, policy)?;
    let caller = caller.map(Principal::from);
    let response = match Action::from(command) {
        Action::Migrate => {
            log::info!("Database schema is up to date");
            return Ok(true);
        }
        Action::Request(request) => service.handle(request, caller.as_ref()),
        Action::RawRequest(request) => service.handle_json(&request, caller.as_ref()),
    };
    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(response.is_ok())
}
