use anyhow::Context;
use clap::Parser;
use std::path::Path;

mod cli;
mod core;
mod crypto;
mod db;
mod generators;
mod logging;
mod models;

use crate::cli::{handlers, Args, CliCommand};
use crate::core::accounts::AccountService;
use crate::core::config::Config;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        log::error!("{:#}", e);
        eprintln!("❌ {:#}", e);
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    // Load environment variables
    if Path::new(".env").exists() {
        dotenvy::dotenv().ok();
    }

    let args = Args::parse();

    let (mut config, warnings) = Config::load();
    if let Some(url) = &args.db {
        config.set_database_url(url);
    }

    logging::init(&config);
    for warning in &warnings {
        log::warn!("{}", warning);
    }
    // Debug output redacts the database password
    log::debug!("Loaded config: {:?}", config);

    // These never touch the credential store
    match &args.command {
        CliCommand::Generate { length, count } => {
            return handlers::handle_generate(&config, *length, *count, args.json);
        }
        CliCommand::Strength { password } => {
            return handlers::handle_strength(password, args.json);
        }
        _ => {}
    }

    let db_url = config.get_database_url();
    log::info!("Connecting to credential store");
    let db = crate::db::init_db(&db_url)
        .await
        .context("Could not open the credential store (check --db or DATABASE_URL)")?;

    let mut accounts = AccountService::new(db, config);

    match args.command {
        CliCommand::Provision { email, role, length, yes } => {
            handlers::handle_provision(&mut accounts, &email, role.as_deref(), length, yes, args.json).await
        }
        CliCommand::Verify { email } => handlers::handle_verify(&accounts, &email, args.json).await,
        CliCommand::List => handlers::handle_list(&accounts, args.json).await,
        CliCommand::Remove { email, yes } => handlers::handle_remove(&accounts, &email, yes, args.json).await,
        CliCommand::Generate { .. } | CliCommand::Strength { .. } => Ok(()),
    }
}
