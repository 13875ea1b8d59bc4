use chrono::{DateTime, NaiveDateTime, ParseResult, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// Advertised start of a race or event, always normalized to UTC.
#[derive(Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Debug, Clone, Copy)]
pub struct StartTime(pub DateTime<Utc>);
impl StartTime {
    pub fn to_iso_string(self) -> String {
        self.0.to_rfc3339_opts(SecondsFormat::Secs, true)
    }
    pub fn from_iso_string(datetime_str: &str) -> ParseResult<Self> {
        match DateTime::parse_from_rfc3339(datetime_str) {
            Ok(dt) => Ok(Self(dt.with_timezone(&Utc))),
            Err(err) => {
                // SQLite datetime() output carries no offset, it is UTC
                for format in ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"] {
                    if let Ok(dt) = NaiveDateTime::parse_from_str(datetime_str, format) {
                        return Ok(Self(dt.and_utc()));
                    }
                }
                Err(err)
            }
        }
    }
}
impl<DB: sqlx::Database> sqlx::Type<DB> for StartTime
where
    str: sqlx::Type<DB>,
{
    fn type_info() -> <DB as sqlx::Database>::TypeInfo {
        // TEXT columns only
        <&str as sqlx::Type<DB>>::type_info()
    }
    fn compatible(ty: &<DB as sqlx::Database>::TypeInfo) -> bool {
        <&str as sqlx::Type<DB>>::compatible(ty)
    }
}
impl<'r, DB: sqlx::Database> sqlx::Decode<'r, DB> for StartTime
where
    &'r str: sqlx::Decode<'r, DB>,
{
    fn decode(value: <DB as sqlx::Database>::ValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let value = <&str as sqlx::Decode<DB>>::decode(value)?;
        Ok(StartTime::from_iso_string(value)?)
    }
}

#[derive(Serialize, Deserialize, PartialEq, Eq, Debug, Clone, Copy)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Status {
    Open,
    Closed,
}
impl Status {
    /// Closed once the start lies strictly before `now`.
    pub fn at(start: StartTime, now: DateTime<Utc>) -> Self {
        if start.0 < now {
            Status::Closed
        } else {
            Status::Open
        }
    }
}
