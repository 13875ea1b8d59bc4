use chrono::Utc;
use serde::{Deserialize, Serialize};
use crate::error::{ServiceError, StoreError};
use crate::query::{ListFilter, OrderBy};
use crate::sports::db::{Event, EventId, EventsRepository};

#[derive(Serialize, Deserialize, Default, Clone, Debug)]
#[serde(default, rename_all = "camelCase")]
pub struct ListEventsRequest {
    pub filter: Option<ListFilter>,
    pub order_by: Vec<OrderBy>,
}
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ListEventsResponse {
    pub events: Vec<Event>,
}
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct GetEventRequest {
    pub id: EventId,
}
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct GetEventResponse {
    pub event: Event,
}

pub struct SportsService {
    events_repo: Box<dyn EventsRepository>,
}
impl SportsService {
    pub fn new(events_repo: impl EventsRepository + 'static) -> Self {
        Self { events_repo: Box::new(events_repo) }
    }
    pub async fn list_events(&self, request: ListEventsRequest) -> Result<ListEventsResponse, ServiceError> {
        let events = self.events_repo.list(request.filter.as_ref(), &request.order_by, Utc::now()).await?;
        Ok(ListEventsResponse { events })
    }
    pub async fn get_event(&self, request: GetEventRequest) -> Result<GetEventResponse, ServiceError> {
        match self.events_repo.get(request.id, Utc::now()).await {
            Ok(event) => Ok(GetEventResponse { event }),
            Err(StoreError::NotFound(id)) => Err(ServiceError::NotFound { id }),
            Err(err) => Err(err.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, TimeDelta};
    use super::*;
    use crate::record::{StartTime, Status};

    /// Serves event 1; event 13 is stored with an undecodable start time.
    struct OneEventRepo {
        start: StartTime,
    }
    #[rocket::async_trait]
    impl EventsRepository for OneEventRepo {
        async fn init(&self) -> Result<(), StoreError> {
            Ok(())
        }
        async fn list(&self, filter: Option<&ListFilter>, _order_by: &[OrderBy], now: DateTime<Utc>) -> Result<Vec<Event>, StoreError> {
            let event = self.get(1, now).await?;
            match filter {
                Some(f) if !f.meeting_ids.is_empty() && !f.meeting_ids.contains(&event.meeting_id) => Ok(vec![]),
                _ => Ok(vec![event]),
            }
        }
        async fn get(&self, id: EventId, now: DateTime<Utc>) -> Result<Event, StoreError> {
            match id {
                1 => Ok(Event {
                    id,
                    meeting_id: 3,
                    name: "Grand final".to_string(),
                    visible: true,
                    advertised_start_time: self.start,
                    status: Status::at(self.start, now),
                }),
                13 => Err(StoreError::Decode(sqlx::Error::ColumnNotFound("advertised_start_time".to_string()))),
                _ => Err(StoreError::NotFound(id)),
            }
        }
    }
    fn service() -> SportsService {
        SportsService::new(OneEventRepo { start: StartTime(Utc::now() + TimeDelta::hours(1)) })
    }

    #[rocket::async_test]
    async fn test_get_event() {
        let resp = service().get_event(GetEventRequest { id: 1 }).await.unwrap();
        assert_eq!(resp.event.name, "Grand final");
        assert_eq!(resp.event.status, Status::Open);
    }

    #[rocket::async_test]
    async fn test_get_missing_event() {
        let err = service().get_event(GetEventRequest { id: 2 }).await.unwrap_err();
        assert_eq!(err.to_string(), "record not found for id=2");
    }

    #[rocket::async_test]
    async fn test_decode_error_is_not_translated() {
        let err = service().get_event(GetEventRequest { id: 13 }).await.unwrap_err();
        assert!(matches!(err, ServiceError::Store(StoreError::Decode(_))));
    }

    #[rocket::async_test]
    async fn test_list_events_passes_filter() {
        let service = service();
        let request = ListEventsRequest {
            filter: Some(ListFilter { meeting_ids: vec![4, 5], ..Default::default() }),
            order_by: vec![],
        };
        assert!(service.list_events(request).await.unwrap().events.is_empty());
        let resp = service.list_events(ListEventsRequest::default()).await.unwrap();
        assert_eq!(resp.events.len(), 1);
    }
}
