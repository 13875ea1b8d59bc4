use std::future::Future;
use chrono::{DateTime, TimeDelta, Utc};
use log::{info, warn};
use rand::Rng;
use rocket::tokio::sync::OnceCell;
use crate::error::StoreError;
use crate::record::StartTime;

pub const DEMO_RECORD_COUNT: i64 = 100;

/// Runs a seed future at most once; every caller, including the ones that waited
/// on the first run, gets that run's outcome.
#[derive(Default)]
pub struct SeedOnce {
    outcome: OnceCell<Result<(), String>>,
}
impl SeedOnce {
    pub fn new() -> Self {
        Self::default()
    }
    pub async fn run<F, Fut>(&self, what: &str, seed: F) -> Result<(), StoreError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<(), StoreError>>,
    {
        let outcome = self.outcome.get_or_init(|| async {
            match seed().await {
                Ok(()) => {
                    info!("Demo {what} seeded");
                    Ok(())
                }
                Err(e) => {
                    warn!("Seeding demo {what} failed: {e}");
                    Err(e.to_string())
                }
            }
        }).await;
        outcome.clone().map_err(StoreError::Seed)
    }
}

pub fn random_name(rng: &mut impl Rng, words: usize) -> String {
    const WOWELS: &str = "aeiouy";
    const CONSONANTS: &str = "bcdfghjklmnprstvwz";
    (0..words)
        .map(|_| {
            let len = rng.random_range(3..=8);
            (0..len)
                .map(|n| {
                    let charset = (if n % 2 == 0 { CONSONANTS } else { WOWELS }).as_bytes();
                    let c = charset[rng.random_range(0..charset.len())] as char;
                    if n == 0 { c.to_ascii_uppercase() } else { c }
                })
                .collect::<String>()
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Uniformly between one day before and two days after `now`, whole seconds.
pub fn random_start_time(rng: &mut impl Rng, now: DateTime<Utc>) -> StartTime {
    let offset = rng.random_range(-TimeDelta::days(1).num_seconds()..=TimeDelta::days(2).num_seconds());
    let start = now + TimeDelta::seconds(offset);
    StartTime(start - TimeDelta::nanoseconds(start.timestamp_subsec_nanos() as i64))
}
