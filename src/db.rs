use std::path::Path;
use std::str::FromStr;
use anyhow::Context;
use rocket::fairing::{Fairing, Info, Kind};
use rocket::{Build, Rocket};
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};
use crate::AppConfig;

pub struct DbPool(pub SqlitePool);

pub struct DbPoolFairing();
#[rocket::async_trait]
impl Fairing for DbPoolFairing {
    fn info(&self) -> Info {
        Info {
            name: "SQLite Database Pool",
            kind: Kind::Ignite,
        }
    }

    async fn on_ignite(&self, rocket: Rocket<Build>) -> rocket::fairing::Result {
        let Some(database_url) = rocket.state::<AppConfig>().map(|cfg| cfg.database_url.clone()) else {
            error!("Application config is not managed, cannot open database");
            return Err(rocket);
        };
        info!("Opening database: {database_url}");
        match connect(&database_url).await {
            Ok(pool) => Ok(rocket.manage(DbPool(pool))),
            Err(err) => {
                error!("Database connection error: {:?}", err);
                Err(rocket)
            }
        }
    }
}

pub async fn connect(database_url: &str) -> anyhow::Result<SqlitePool> {
    if let Some(db_path) = database_url.strip_prefix("sqlite://") {
        let db_path = db_path.split('?').next().unwrap_or_default();
        if let Some(dir) = Path::new(db_path).parent().filter(|dir| !dir.as_os_str().is_empty()) {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create database directory {}", dir.display()))?;
        }
    }
    let opts = SqliteConnectOptions::from_str(database_url)
        .with_context(|| format!("Invalid database url: {database_url}"))?
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal); // use WAL for better concurrency
    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(opts)
        .await
        .with_context(|| format!("Failed to connect to database: {database_url}"))?;
    Ok(pool)
}
