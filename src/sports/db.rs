use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use crate::error::StoreError;
use crate::query::{build_get_query, build_list_query, ListFilter, OrderBy};
use crate::record::{StartTime, Status};
use crate::seed::{random_name, random_start_time, SeedOnce, DEMO_RECORD_COUNT};

pub type EventId = i64;
pub type MeetingId = i64;

const EVENTS_LIST: &str = "SELECT id, meeting_id, name, visible, advertised_start_time FROM events";

#[derive(Serialize, Deserialize, PartialEq, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: EventId,
    pub meeting_id: MeetingId,
    pub name: String,
    pub visible: bool,
    pub advertised_start_time: StartTime,
    pub status: Status,
}

/// Repository access to sport events.
#[rocket::async_trait]
pub trait EventsRepository: Send + Sync {
    async fn init(&self) -> Result<(), StoreError>;
    async fn list(&self, filter: Option<&ListFilter>, order_by: &[OrderBy], now: DateTime<Utc>) -> Result<Vec<Event>, StoreError>;
    async fn get(&self, id: EventId, now: DateTime<Utc>) -> Result<Event, StoreError>;
}

pub struct EventsRepo {
    pool: SqlitePool,
    seeded: SeedOnce,
}
impl EventsRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool, seeded: SeedOnce::new() }
    }
    async fn seed(&self) -> Result<(), StoreError> {
        create_events_table(&self.pool).await?;
        let now = Utc::now();
        for id in 1..=DEMO_RECORD_COUNT {
            let event = {
                let mut rng = rand::rng();
                EventRow {
                    id,
                    meeting_id: rng.random_range(1..=10),
                    name: random_name(&mut rng, 4),
                    visible: rng.random_bool(0.5),
                    advertised_start_time: random_start_time(&mut rng, now).to_iso_string(),
                }
            };
            insert_event(&self.pool, &event).await?;
        }
        Ok(())
    }
}

#[rocket::async_trait]
impl EventsRepository for EventsRepo {
    async fn init(&self) -> Result<(), StoreError> {
        self.seeded.run("events", || self.seed()).await
    }

    async fn list(&self, filter: Option<&ListFilter>, order_by: &[OrderBy], now: DateTime<Utc>) -> Result<Vec<Event>, StoreError> {
        let query = build_list_query(EVENTS_LIST, filter, order_by);
        debug!("List events: {}, args: {:?}", query.sql, query.args);
        let rows = query.fetch_all(&self.pool).await?;
        scan_events(&rows, now)
    }

    async fn get(&self, id: EventId, now: DateTime<Utc>) -> Result<Event, StoreError> {
        let query = build_get_query(EVENTS_LIST, id);
        let rows = query.fetch_all(&self.pool).await?;
        scan_events(&rows, now)?
            .into_iter()
            .next()
            .ok_or(StoreError::NotFound(id))
    }
}

fn scan_events(rows: &[SqliteRow], now: DateTime<Utc>) -> Result<Vec<Event>, StoreError> {
    rows.iter().map(|row| {
        let advertised_start_time: StartTime = row.try_get(4)?;
        Ok(Event {
            id: row.try_get(0)?,
            meeting_id: row.try_get(1)?,
            name: row.try_get(2)?,
            visible: row.try_get(3)?,
            advertised_start_time,
            status: Status::at(advertised_start_time, now),
        })
    }).collect()
}

pub(crate) struct EventRow {
    pub id: EventId,
    pub meeting_id: MeetingId,
    pub name: String,
    pub visible: bool,
    pub advertised_start_time: String,
}

pub(crate) async fn create_events_table(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query("CREATE TABLE IF NOT EXISTS events (id INTEGER PRIMARY KEY, meeting_id INTEGER, name TEXT, visible INTEGER, advertised_start_time DATETIME)")
        .execute(pool)
        .await?;
    Ok(())
}

pub(crate) async fn insert_event(pool: &SqlitePool, event: &EventRow) -> Result<(), sqlx::Error> {
    sqlx::query("INSERT OR IGNORE INTO events(id, meeting_id, name, visible, advertised_start_time) VALUES (?, ?, ?, ?, ?)")
        .bind(event.id)
        .bind(event.meeting_id)
        .bind(&event.name)
        .bind(event.visible)
        .bind(&event.advertised_start_time)
        .execute(pool)
        .await?;
    Ok(())
}
