//! SQL construction for list and lookup requests.
//!
//! Every value that arrives with a request is carried in [`SqlQuery::args`] and bound
//! positionally; the generated SQL text only ever contains placeholders and fixed
//! column names.

use serde::{Deserialize, Serialize};
use sqlx::sqlite::SqliteRow;
use sqlx::{Sqlite, SqlitePool};

/// Request field name that maps onto the `advertised_start_time` column.
pub const ADVERTISED_START_TIME_FIELD: &str = "advertisedStartTime";
/// Start times may be stored in any accepted text form, so they sort by their
/// parsed value rather than by text.
const ADVERTISED_START_TIME_KEY: &str = "julianday(advertised_start_time)";
/// Last sort key whenever an order is requested; ties keep table-scan order.
const TIEBREAK_KEY: &str = "id";

#[derive(Serialize, Deserialize, PartialEq, Eq, Default, Clone, Copy, Debug)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Visibility {
    #[default]
    Unspecified,
    Visible,
    Hidden,
}

#[derive(Serialize, Deserialize, PartialEq, Eq, Default, Clone, Copy, Debug)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderDirection {
    #[default]
    Asc,
    Desc,
}

#[derive(Serialize, Deserialize, PartialEq, Eq, Default, Clone, Debug)]
#[serde(default, rename_all = "camelCase")]
pub struct ListFilter {
    pub meeting_ids: Vec<i64>,
    #[serde(rename = "visibilityStatus")]
    pub visibility: Visibility,
}

#[derive(Serialize, Deserialize, PartialEq, Eq, Default, Clone, Debug)]
#[serde(default, rename_all = "camelCase")]
pub struct OrderBy {
    pub field_name: String,
    pub direction: OrderDirection,
}
impl OrderBy {
    #[cfg(test)]
    pub fn new(field_name: &str, direction: OrderDirection) -> Self {
        Self { field_name: field_name.to_string(), direction }
    }
    fn column(&self) -> Option<&'static str> {
        if self.field_name.eq_ignore_ascii_case(ADVERTISED_START_TIME_FIELD) {
            Some(ADVERTISED_START_TIME_KEY)
        } else {
            None
        }
    }
}

#[derive(PartialEq, Eq, Debug, Clone)]
pub struct SqlQuery {
    pub sql: String,
    pub args: Vec<i64>,
}
impl SqlQuery {
    pub async fn fetch_all(&self, pool: &SqlitePool) -> Result<Vec<SqliteRow>, sqlx::Error> {
        let mut query = sqlx::query::<Sqlite>(&self.sql);
        for arg in &self.args {
            query = query.bind(*arg);
        }
        query.fetch_all(pool).await
    }
}

pub fn build_list_query(base: &str, filter: Option<&ListFilter>, order_by: &[OrderBy]) -> SqlQuery {
    let mut query = SqlQuery { sql: base.trim_end().to_string(), args: vec![] };
    apply_filter(&mut query, filter);
    apply_order_by(&mut query, order_by);
    query
}

pub fn build_get_query(base: &str, id: i64) -> SqlQuery {
    SqlQuery {
        sql: format!("{} WHERE id = ?", base.trim_end()),
        args: vec![id],
    }
}

fn apply_filter(query: &mut SqlQuery, filter: Option<&ListFilter>) {
    let Some(filter) = filter else {
        return;
    };
    let mut clauses = vec![];
    if !filter.meeting_ids.is_empty() {
        let placeholders = vec!["?"; filter.meeting_ids.len()].join(", ");
        clauses.push(format!("meeting_id IN ({placeholders})"));
        query.args.extend_from_slice(&filter.meeting_ids);
    }
    match filter.visibility {
        Visibility::Visible => clauses.push("visible = 1".to_string()),
        Visibility::Hidden => clauses.push("visible = 0".to_string()),
        Visibility::Unspecified => {}
    }
    if !clauses.is_empty() {
        query.sql.push_str(" WHERE ");
        query.sql.push_str(&clauses.join(" AND "));
    }
}

fn apply_order_by(query: &mut SqlQuery, order_by: &[OrderBy]) {
    let mut clauses = order_by.iter()
        .filter_map(|ob| {
            let column = ob.column()?;
            Some(match ob.direction {
                OrderDirection::Desc => format!("{column} DESC"),
                OrderDirection::Asc => column.to_string(),
            })
        })
        .collect::<Vec<_>>();
    if !clauses.is_empty() {
        clauses.push(TIEBREAK_KEY.to_string());
        query.sql.push_str(" ORDER BY ");
        query.sql.push_str(&clauses.join(", "));
    }
}
