use chrono::Utc;
use serde::{Deserialize, Serialize};
use crate::error::{ServiceError, StoreError};
use crate::query::{ListFilter, OrderBy};
use crate::racing::db::{Race, RaceId, RacesRepository};

#[derive(Serialize, Deserialize, Default, Clone, Debug)]
#[serde(default, rename_all = "camelCase")]
pub struct ListRacesRequest {
    pub filter: Option<ListFilter>,
    pub order_by: Vec<OrderBy>,
}
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ListRacesResponse {
    pub races: Vec<Race>,
}
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct GetRaceRequest {
    pub id: RaceId,
}
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct GetRaceResponse {
    pub race: Race,
}

pub struct RacingService {
    races_repo: Box<dyn RacesRepository>,
}
impl RacingService {
    pub fn new(races_repo: impl RacesRepository + 'static) -> Self {
        Self { races_repo: Box::new(races_repo) }
    }
    pub async fn list_races(&self, request: ListRacesRequest) -> Result<ListRacesResponse, ServiceError> {
        let races = self.races_repo.list(request.filter.as_ref(), &request.order_by, Utc::now()).await?;
        Ok(ListRacesResponse { races })
    }
    pub async fn get_race(&self, request: GetRaceRequest) -> Result<GetRaceResponse, ServiceError> {
        match self.races_repo.get(request.id, Utc::now()).await {
            Ok(race) => Ok(GetRaceResponse { race }),
            Err(StoreError::NotFound(id)) => Err(ServiceError::NotFound { id }),
            Err(err) => Err(err.into()),
        }
    }
}
