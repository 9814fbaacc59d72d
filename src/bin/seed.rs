//! Mock-data seeding tool
//!
//! Mints a user with fresh watcher links and mock workers so the dashboard
//! can be exercised locally. Each generated token is printed exactly once;
//! only its payload hash lands in the database.

use anyhow::Context;
use chrono::{Duration, Utc};
use clap::Parser;
use hashwatch_api::persistence::WorkerStatus;
use hashwatch_api::{token, Config};
use rand::Rng;
use rust_decimal::Decimal;
use sqlx::postgres::PgPoolOptions;
use std::path::PathBuf;
use uuid::Uuid;

const STATUS_CYCLE: [WorkerStatus; 3] = [
    WorkerStatus::Online,
    WorkerStatus::Offline,
    WorkerStatus::Inactive,
];

#[derive(Parser)]
#[command(name = "seed", about = "Seed mock watcher links and workers", version)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Number of watcher links to mint
    #[arg(long, default_value_t = 2)]
    tokens: u32,

    /// Number of mock workers to create
    #[arg(long, default_value_t = 5)]
    workers: u32,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let config = Config::load(args.config)?;

    let db = PgPoolOptions::new()
        .max_connections(1)
        .connect(&config.database.url)
        .await
        .context("connecting to database")?;

    sqlx::migrate!("./migrations").run(&db).await?;

    let mut rng = rand::thread_rng();
    let user_id = Uuid::new_v4();
    let mut tx = db.begin().await?;

    for index in 0..args.tokens {
        let mut payload = [0u8; token::PAYLOAD_LENGTH];
        rng.fill(&mut payload[..]);

        let printable = token::encode(&payload);
        let payload_hash = token::payload_hash(&payload);

        sqlx::query(
            r#"
            INSERT INTO watcher_links (user_id, payload_hash, expires_at)
            VALUES ($1, $2, $3)
            "#,
        )
        .bind(user_id)
        .bind(payload_hash.to_vec())
        .bind(Utc::now() + Duration::days(7))
        .execute(&mut *tx)
        .await?;

        println!("Token #{}: {printable} (user_id: {user_id})", index + 1);
    }

    for index in 0..args.workers {
        let status = STATUS_CYCLE[index as usize % STATUS_CYCLE.len()];
        let idle_minutes = rng.gen_range(0..120);
        let hashrate_mh = Decimal::from(rng.gen_range(50_000..5_000_000));

        sqlx::query(
            r#"
            INSERT INTO workers (user_id, name, status, last_seen_at, hashrate_mh)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(user_id)
        .bind(format!("Rig-{:02}", index + 1))
        .bind(status)
        .bind(Utc::now() - Duration::minutes(idle_minutes))
        .bind(hashrate_mh)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;
    println!("Seed complete.");

    Ok(())
}
