//! # Demo Catalog Seeder
//!
//! Creates (or opens) a database, loads the demo bicycle catalog and runs a
//! sample resolution, price and validation against it.
//!
//! ## Usage
//! ```bash
//! # Seed ./velo.db (or $VELO_DB_PATH)
//! cargo run -p velo-db --bin seed
//!
//! # Specify database path
//! cargo run -p velo-db --bin seed -- --db ./data/velo.db
//!
//! # More logging
//! RUST_LOG=debug cargo run -p velo-db --bin seed
//! ```

use serde::Serialize;
use std::env;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

use velo_core::ValidationOutcome;
use velo_db::fixtures::{catalog_is_empty, load_demo_catalog, DEMO_PRODUCT_ID};
use velo_db::{Database, DbConfig};

const WHEELS: i64 = 3;
const DIAMOND: i64 = 102;
const COMPLETE: [i64; 5] = [102, 202, 301, 402, 501];
const MOUNTAIN_ON_DIAMOND: [i64; 5] = [102, 202, 302, 402, 501];
const BLUE_RIMS: [i64; 5] = [102, 202, 301, 403, 501];

#[derive(Serialize)]
struct Sample<'a> {
    selection: &'a [i64],
    outcome: ValidationOutcome,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,velo=debug,sqlx=warn"));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn print_help() {
    println!("Velo Demo Catalog Seeder");
    println!();
    println!("Usage: seed [OPTIONS]");
    println!();
    println!("Options:");
    println!("  -d, --db <PATH>    Database file path (default: $VELO_DB_PATH or ./velo.db)");
    println!("  -h, --help         Show this help message");
}

#[derive(Debug, PartialEq, Eq)]
enum Command {
    Help,
    Seed { db_path: Option<PathBuf> },
}

/// Parses the arguments after the program name.
fn parse_args(args: &[String]) -> Result<Command, String> {
    let mut db_path = None;
    let mut args = args.iter();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--db" | "-d" => {
                let path = args
                    .next()
                    .ok_or_else(|| format!("{arg} requires a path"))?;
                db_path = Some(PathBuf::from(path));
            }
            "--help" | "-h" => return Ok(Command::Help),
            other => return Err(format!("unknown argument: {other}")),
        }
    }

    Ok(Command::Seed { db_path })
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().skip(1).collect();

    let db_path = match parse_args(&args) {
        Ok(Command::Help) => {
            print_help();
            return Ok(());
        }
        Ok(Command::Seed { db_path }) => db_path,
        Err(message) => {
            eprintln!("{message}");
            eprintln!("Run with --help for usage.");
            return Err(message.into());
        }
    };

    let mut config = DbConfig::from_env()?;
    if let Some(path) = db_path {
        config.database_path = path;
    }

    init_tracing();

    info!(path = %config.database_path.display(), "Seeding demo catalog");
    let db = Database::new(config).await?;

    if catalog_is_empty(&db).await? {
        load_demo_catalog(&db).await?;
    } else {
        info!("Catalog already present, skipping load");
    }

    let engine = db.engine();

    let wheels = engine
        .available_options(DEMO_PRODUCT_ID, WHEELS, &[DIAMOND])
        .await?;
    println!("Wheels available with a diamond frame:");
    println!("{}", serde_json::to_string_pretty(&wheels)?);

    let price = engine
        .calculate_total_price(DEMO_PRODUCT_ID, &COMPLETE)
        .await?;
    println!("Price of {COMPLETE:?}: {}", price.total_price);
    println!("{}", serde_json::to_string_pretty(&price)?);

    let mut samples = Vec::new();
    for selection in [&COMPLETE[..], &MOUNTAIN_ON_DIAMOND[..], &BLUE_RIMS[..], &[DIAMOND][..]] {
        let outcome = engine
            .validate_configuration(DEMO_PRODUCT_ID, selection)
            .await?;
        samples.push(Sample { selection, outcome });
    }
    println!("Validation samples:");
    println!("{}", serde_json::to_string_pretty(&samples)?);

    db.close().await;
    Ok(())
}
