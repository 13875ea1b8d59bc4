#[macro_use] extern crate rocket;

use rocket::fairing::AdHoc;
use rocket::figment::Figment;
use rocket::{Build, Rocket};
use serde::Deserialize;
use crate::db::DbPoolFairing;

#[cfg(test)]
mod tests;
mod db;
mod error;
mod query;
mod racing;
mod record;
mod seed;
mod sports;

#[derive(Deserialize, Clone, Debug)]
#[serde(default)]
struct AppConfig {
    database_url: String,
    seed_demo_data: bool,
}
impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_url: "sqlite://db/racehttpd.db".to_string(),
            seed_demo_data: true,
        }
    }
}

fn build(figment: Figment) -> Rocket<Build> {
    let rocket = rocket::custom(figment)
        .attach(AdHoc::config::<AppConfig>())
        .attach(DbPoolFairing());
    let rocket = racing::extend(rocket);
    sports::extend(rocket)
}

#[launch]
fn rocket() -> _ {
    build(rocket::Config::figment())
}
