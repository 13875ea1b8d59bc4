use rocket::fairing::AdHoc;
use rocket::response::status::Custom;
use rocket::serde::json::Json;
use rocket::{Build, Rocket, State};
use crate::db::DbPool;
use crate::error::status_service_error;
use crate::sports::db::{EventId, EventsRepo, EventsRepository};
use crate::sports::service::{GetEventRequest, GetEventResponse, ListEventsRequest, ListEventsResponse, SportsService};
use crate::AppConfig;

pub mod db;
pub mod service;

#[post("/v1/list-events", data = "<request>")]
async fn list_events(request: Json<ListEventsRequest>, sports: &State<SportsService>) -> Result<Json<ListEventsResponse>, Custom<String>> {
    let response = sports.list_events(request.into_inner()).await.map_err(status_service_error)?;
    Ok(Json(response))
}

#[get("/v1/events/<id>")]
async fn get_event(id: EventId, sports: &State<SportsService>) -> Result<Json<GetEventResponse>, Custom<String>> {
    let response = sports.get_event(GetEventRequest { id }).await.map_err(status_service_error)?;
    Ok(Json(response))
}

async fn init_sports(rocket: Rocket<Build>) -> rocket::fairing::Result {
    let Some(pool) = rocket.state::<DbPool>().map(|db| db.0.clone()) else {
        error!("Database pool is not managed, sports service cannot start");
        return Err(rocket);
    };
    let seed_demo_data = rocket.state::<AppConfig>().is_some_and(|cfg| cfg.seed_demo_data);
    let events_repo = EventsRepo::new(pool);
    if seed_demo_data {
        if let Err(err) = events_repo.init().await {
            error!("Sports repository init error: {err}");
            return Err(rocket);
        }
    }
    Ok(rocket.manage(SportsService::new(events_repo)))
}

pub fn extend(rocket: Rocket<Build>) -> Rocket<Build> {
    rocket
        .attach(AdHoc::try_on_ignite("Sports Repository", init_sports))
        .mount("/", routes![
            list_events,
            get_event,
        ])
}
