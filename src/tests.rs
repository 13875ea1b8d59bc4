use chrono::{TimeDelta, Utc};
use rocket::http::{ContentType, Status as HttpStatus};
use rocket::local::asynchronous::Client;
use serde_json::json;
use crate::db::DbPool;
use crate::racing::db::test::{fixture_races, seed_fixture_races};
use crate::racing::db::RaceRow;
use crate::racing::service::{GetRaceResponse, ListRacesResponse};
use crate::record::{StartTime, Status};
use crate::sports::db::test::{fixture_events, seed_fixture_events};
use crate::sports::service::{GetEventResponse, ListEventsResponse};

async fn create_test_server(seed_demo_data: bool) -> Client {
    let figment = rocket::Config::figment()
        .merge(("database_url", "sqlite::memory:"))
        .merge(("seed_demo_data", seed_demo_data));
    Client::tracked(super::build(figment)).await.unwrap()
}

async fn create_fixture_server() -> Client {
    let client = create_test_server(false).await;
    let pool = &client.rocket().state::<DbPool>().unwrap().0;
    let mut races = fixture_races();
    races.push(RaceRow {
        id: 4,
        meeting_id: 8,
        name: "Tomorrow cup".to_string(),
        number: 7,
        visible: true,
        advertised_start_time: StartTime(Utc::now() + TimeDelta::days(1)).to_iso_string(),
    });
    seed_fixture_races(pool, &races).await;
    seed_fixture_events(pool, &fixture_events()).await;
    client
}

#[rocket::async_test]
async fn list_races_with_filter_and_order() {
    let client = create_fixture_server().await;
    let resp = client.post("/v1/list-races")
        .json(&json!({
            "filter": { "meetingIds": [5, 8] },
            "orderBy": [{ "fieldName": "advertisedStartTime", "direction": "DESC" }],
        }))
        .dispatch().await;
    assert_eq!(resp.status(), HttpStatus::Ok);
    assert_eq!(resp.content_type(), Some(ContentType::JSON));
    let races = resp.into_json::<ListRacesResponse>().await.unwrap().races;
    assert_eq!(races.iter().map(|r| r.id).collect::<Vec<_>>(), vec![4, 3, 1]);
    assert_eq!(races[0].status, Status::Open);
    assert_eq!(races[1].status, Status::Closed);
    assert_eq!(races[2].status, Status::Closed);
}

#[rocket::async_test]
async fn list_races_with_empty_request() {
    let client = create_fixture_server().await;
    let resp = client.post("/v1/list-races")
        .json(&json!({}))
        .dispatch().await;
    assert_eq!(resp.status(), HttpStatus::Ok);
    let races = resp.into_json::<ListRacesResponse>().await.unwrap().races;
    assert_eq!(races.len(), 4);
}

#[rocket::async_test]
async fn list_races_hidden_only() {
    let client = create_fixture_server().await;
    let resp = client.post("/v1/list-races")
        .json(&json!({ "filter": { "visibilityStatus": "HIDDEN" } }))
        .dispatch().await;
    let races = resp.into_json::<ListRacesResponse>().await.unwrap().races;
    assert_eq!(races.iter().map(|r| r.id).collect::<Vec<_>>(), vec![1, 3]);
    assert!(races.iter().all(|r| !r.visible));
}

#[rocket::async_test]
async fn get_race() {
    let client = create_fixture_server().await;
    let resp = client.get("/v1/races/4").dispatch().await;
    assert_eq!(resp.status(), HttpStatus::Ok);
    let race = resp.into_json::<GetRaceResponse>().await.unwrap().race;
    assert_eq!(race.name, "Tomorrow cup");
    assert_eq!(race.status, Status::Open);

    let resp = client.get("/v1/races/999").dispatch().await;
    assert_eq!(resp.status(), HttpStatus::NotFound);
    assert_eq!(resp.into_string().await.unwrap(), "record not found for id=999");
}

#[rocket::async_test]
async fn list_and_get_events() {
    let client = create_fixture_server().await;
    let resp = client.post("/v1/list-events")
        .json(&json!({ "filter": { "meetingIds": [5, 1], "visibilityStatus": "VISIBLE" } }))
        .dispatch().await;
    assert_eq!(resp.status(), HttpStatus::Ok);
    let events = resp.into_json::<ListEventsResponse>().await.unwrap().events;
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].name, "Connecticut griffins");

    let resp = client.get("/v1/events/3").dispatch().await;
    assert_eq!(resp.status(), HttpStatus::Ok);
    let event = resp.into_json::<GetEventResponse>().await.unwrap().event;
    assert_eq!(event.meeting_id, 8);

    let resp = client.get("/v1/events/42").dispatch().await;
    assert_eq!(resp.status(), HttpStatus::NotFound);
    assert_eq!(resp.into_string().await.unwrap(), "record not found for id=42");
}

#[rocket::async_test]
async fn malformed_request_is_rejected() {
    let client = create_fixture_server().await;
    let resp = client.post("/v1/list-events")
        .header(ContentType::JSON)
        .body(r#"{"filter": {"visibilityStatus": "SOMETIMES"}}"#)
        .dispatch().await;
    assert_eq!(resp.status(), HttpStatus::UnprocessableEntity);
}

#[rocket::async_test]
async fn demo_data_is_seeded_at_ignite() {
    let client = create_test_server(true).await;
    let resp = client.post("/v1/list-races").json(&json!({})).dispatch().await;
    assert_eq!(resp.status(), HttpStatus::Ok);
    let races = resp.into_json::<ListRacesResponse>().await.unwrap().races;
    assert_eq!(races.len(), 100);
    let resp = client.post("/v1/list-events").json(&json!({})).dispatch().await;
    let events = resp.into_json::<ListEventsResponse>().await.unwrap().events;
    assert_eq!(events.len(), 100);
}
