use std::backtrace::Backtrace;
use rocket::http::Status;
use rocket::response::status::Custom;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("no record with id={0}")]
    NotFound(i64),
    #[error("stored record cannot be decoded: {0}")]
    Decode(#[source] sqlx::Error),
    #[error("store error: {0}")]
    Store(#[source] sqlx::Error),
    #[error("seeding demo data failed: {0}")]
    Seed(String),
}
impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::ColumnDecode { .. } | sqlx::Error::Decode(_) | sqlx::Error::ColumnNotFound(_) => StoreError::Decode(err),
            _ => StoreError::Store(err),
        }
    }
}

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("record not found for id={id}")]
    NotFound { id: i64 },
    #[error(transparent)]
    Store(#[from] StoreError),
}

pub(crate) fn status_service_error(err: ServiceError) -> Custom<String> {
    match err {
        ServiceError::NotFound { .. } => {
            info!("{err}");
            Custom(Status::NotFound, err.to_string())
        }
        ServiceError::Store(_) => {
            error!("Error: {err}\nbacktrace: {}", Backtrace::capture());
            Custom(Status::InternalServerError, format!("Error: {err}"))
        }
    }
}
