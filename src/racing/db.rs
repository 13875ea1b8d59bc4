use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use crate::error::StoreError;
use crate::query::{build_get_query, build_list_query, ListFilter, OrderBy};
use crate::record::{StartTime, Status};
use crate::seed::{random_name, random_start_time, SeedOnce, DEMO_RECORD_COUNT};

pub type RaceId = i64;
pub type MeetingId = i64;

const RACES_LIST: &str = "SELECT id, meeting_id, name, number, visible, advertised_start_time FROM races";

#[derive(Serialize, Deserialize, PartialEq, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct Race {
    pub id: RaceId,
    pub meeting_id: MeetingId,
    pub name: String,
    pub number: i64,
    pub visible: bool,
    pub advertised_start_time: StartTime,
    pub status: Status,
}

/// Repository access to races.
#[rocket::async_trait]
pub trait RacesRepository: Send + Sync {
    /// Creates the races table and seeds demo races, once per repository.
    async fn init(&self) -> Result<(), StoreError>;
    async fn list(&self, filter: Option<&ListFilter>, order_by: &[OrderBy], now: DateTime<Utc>) -> Result<Vec<Race>, StoreError>;
    /// Fails with [`StoreError::NotFound`] when no race has this id.
    async fn get(&self, id: RaceId, now: DateTime<Utc>) -> Result<Race, StoreError>;
}

pub struct RacesRepo {
    pool: SqlitePool,
    seeded: SeedOnce,
}
impl RacesRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool, seeded: SeedOnce::new() }
    }
    async fn seed(&self) -> Result<(), StoreError> {
        create_races_table(&self.pool).await?;
        let now = Utc::now();
        for id in 1..=DEMO_RECORD_COUNT {
            let race = {
                let mut rng = rand::rng();
                RaceRow {
                    id,
                    meeting_id: rng.random_range(1..=10),
                    name: random_name(&mut rng, 2),
                    number: rng.random_range(1..=12),
                    visible: rng.random_bool(0.5),
                    advertised_start_time: random_start_time(&mut rng, now).to_iso_string(),
                }
            };
            insert_race(&self.pool, &race).await?;
        }
        Ok(())
    }
}

#[rocket::async_trait]
impl RacesRepository for RacesRepo {
    async fn init(&self) -> Result<(), StoreError> {
        self.seeded.run("races", || self.seed()).await
    }

    async fn list(&self, filter: Option<&ListFilter>, order_by: &[OrderBy], now: DateTime<Utc>) -> Result<Vec<Race>, StoreError> {
        let query = build_list_query(RACES_LIST, filter, order_by);
        debug!("List races: {}, args: {:?}", query.sql, query.args);
        let rows = query.fetch_all(&self.pool).await?;
        scan_races(&rows, now)
    }

    async fn get(&self, id: RaceId, now: DateTime<Utc>) -> Result<Race, StoreError> {
        let query = build_get_query(RACES_LIST, id);
        let rows = query.fetch_all(&self.pool).await?;
        scan_races(&rows, now)?
            .into_iter()
            .next()
            .ok_or(StoreError::NotFound(id))
    }
}

fn scan_races(rows: &[SqliteRow], now: DateTime<Utc>) -> Result<Vec<Race>, StoreError> {
    rows.iter().map(|row| {
        let advertised_start_time: StartTime = row.try_get(5)?;
        Ok(Race {
            id: row.try_get(0)?,
            meeting_id: row.try_get(1)?,
            name: row.try_get(2)?,
            number: row.try_get(3)?,
            visible: row.try_get(4)?,
            advertised_start_time,
            status: Status::at(advertised_start_time, now),
        })
    }).collect()
}

/// Races table row as it is written, start time kept in its stored text form.
pub(crate) struct RaceRow {
    pub id: RaceId,
    pub meeting_id: MeetingId,
    pub name: String,
    pub number: i64,
    pub visible: bool,
    pub advertised_start_time: String,
}

pub(crate) async fn create_races_table(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query("CREATE TABLE IF NOT EXISTS races (id INTEGER PRIMARY KEY, meeting_id INTEGER, name TEXT, number INTEGER, visible INTEGER, advertised_start_time DATETIME)")
        .execute(pool)
        .await?;
    Ok(())
}

pub(crate) async fn insert_race(pool: &SqlitePool, race: &RaceRow) -> Result<(), sqlx::Error> {
    sqlx::query("INSERT OR IGNORE INTO races(id, meeting_id, name, number, visible, advertised_start_time) VALUES (?, ?, ?, ?, ?, ?)")
        .bind(race.id)
        .bind(race.meeting_id)
        .bind(&race.name)
        .bind(race.number)
        .bind(race.visible)
        .bind(&race.advertised_start_time)
        .execute(pool)
        .await?;
    Ok(())
}
