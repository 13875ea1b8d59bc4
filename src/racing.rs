use rocket::fairing::AdHoc;
use rocket::response::status::Custom;
use rocket::serde::json::Json;
use rocket::{Build, Rocket, State};
use crate::db::DbPool;
use crate::error::status_service_error;
use crate::racing::db::{RaceId, RacesRepo, RacesRepository};
use crate::racing::service::{GetRaceRequest, GetRaceResponse, ListRacesRequest, ListRacesResponse, RacingService};
use crate::AppConfig;

pub mod db;
pub mod service;

#[post("/v1/list-races", data = "<request>")]
async fn list_races(request: Json<ListRacesRequest>, racing: &State<RacingService>) -> Result<Json<ListRacesResponse>, Custom<String>> {
    let response = racing.list_races(request.into_inner()).await.map_err(status_service_error)?;
    Ok(Json(response))
}

#[get("/v1/races/<id>")]
async fn get_race(id: RaceId, racing: &State<RacingService>) -> Result<Json<GetRaceResponse>, Custom<String>> {
    let response = racing.get_race(GetRaceRequest { id }).await.map_err(status_service_error)?;
    Ok(Json(response))
}

async fn init_racing(rocket: Rocket<Build>) -> rocket::fairing::Result {
    let Some(pool) = rocket.state::<DbPool>().map(|db| db.0.clone()) else {
        error!("Database pool is not managed, racing service cannot start");
        return Err(rocket);
    };
    let seed_demo_data = rocket.state::<AppConfig>().is_some_and(|cfg| cfg.seed_demo_data);
    let races_repo = RacesRepo::new(pool);
    if seed_demo_data {
        if let Err(err) = races_repo.init().await {
            error!("Racing repository init error: {err}");
            return Err(rocket);
        }
    }
    Ok(rocket.manage(RacingService::new(races_repo)))
}

pub fn extend(rocket: Rocket<Build>) -> Rocket<Build> {
    rocket
        .attach(AdHoc::try_on_ignite("Racing Repository", init_racing))
        .mount("/", routes![
            list_races,
            get_race,
        ])
}
