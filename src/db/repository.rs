use serde_json::{json, Map, Value};
use sqlx::mysql::MySqlRow;
use sqlx::{Column, ColumnIndex, Row};
use tracing::{debug, instrument};

use crate::db::schema::{StationColumn, TableVariant};
use crate::db::DbPool;
use crate::errors::ScheduleError;
use crate::models::TrainTime;

/// Upper bound on rows returned by a next-departures lookup.
const NEXT_DEPARTURES_LIMIT: u32 = 3;

/// Read access to the six schedule tables.
pub struct ScheduleRepository {
    pool: DbPool,
}

impl ScheduleRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Every row of the variant's table, one JSON object per row, keyed by
    /// column name. Row order is whatever the store returns.
    #[instrument(skip(self, variant), fields(table = %variant))]
    pub async fn fetch_all(
        &self,
        variant: TableVariant,
    ) -> Result<Vec<Map<String, Value>>, ScheduleError> {
        let query = format!("SELECT * FROM {}", variant.table_name());
        let rows = sqlx::query(&query).fetch_all(self.pool.pool()).await?;

        let horarios: Vec<Map<String, Value>> = rows.iter().map(row_to_object).collect();
        debug!(rows = horarios.len(), "Schedule table fetched");
        Ok(horarios)
    }

    /// Every row of the variant's table reduced to the train/time pair.
    /// `hora_estacion` is null when the table has no column of that name.
    #[instrument(skip(self, variant), fields(table = %variant))]
    pub async fn fetch_train_times(
        &self,
        variant: TableVariant,
    ) -> Result<Vec<TrainTime>, ScheduleError> {
        let query = format!("SELECT * FROM {}", variant.table_name());
        let rows = sqlx::query(&query).fetch_all(self.pool.pool()).await?;

        let horarios: Vec<TrainTime> = rows.iter().map(train_time).collect();
        debug!(rows = horarios.len(), "Train times fetched");
        Ok(horarios)
    }

    /// Up to three departures from `column` strictly after `after`,
    /// ascending. Parsing the stored `HH:MM` text and ordering by it are
    /// the store's job, not ours.
    #[instrument(skip(self, variant, column), fields(table = %variant, column = %column))]
    pub async fn next_departures(
        &self,
        variant: TableVariant,
        column: &StationColumn,
        after: &str,
    ) -> Result<Vec<TrainTime>, ScheduleError> {
        let query = next_departures_sql(variant, column);
        let rows = sqlx::query(&query)
            .bind(after)
            .fetch_all(self.pool.pool())
            .await?;

        let horarios: Vec<TrainTime> = rows.iter().map(train_time).collect();
        debug!(rows = horarios.len(), after, "Departures fetched");
        Ok(horarios)
    }
}

/// SQL for the next-departures lookup. The column identifier has been
/// validated against the schema catalog; the cutoff time is bound as a
/// parameter.
fn next_departures_sql(variant: TableVariant, column: &StationColumn) -> String {
    format!(
        "SELECT num_tren, `{col}` AS hora_estacion FROM {table} \
         WHERE STR_TO_DATE(`{col}`, '%H:%i') > ? \
         ORDER BY STR_TO_DATE(`{col}`, '%H:%i') ASC \
         LIMIT {limit}",
        col = column.as_str(),
        table = variant.table_name(),
        limit = NEXT_DEPARTURES_LIMIT,
    )
}

/// Convert a row to a JSON object keyed by column name.
fn row_to_object(row: &MySqlRow) -> Map<String, Value> {
    let mut object = Map::new();
    for (index, column) in row.columns().iter().enumerate() {
        object.insert(column.name().to_string(), value_at(row, index));
    }
    object
}

fn train_time(row: &MySqlRow) -> TrainTime {
    TrainTime {
        num_tren: value_at(row, "num_tren"),
        hora_estacion: row
            .try_get::<Option<String>, _>("hora_estacion")
            .ok()
            .flatten(),
    }
}

/// Decode a column without knowing its type up front: text first, then
/// integer, float and boolean. Anything else (or SQL NULL) becomes null.
fn value_at<I>(row: &MySqlRow, index: I) -> Value
where
    I: ColumnIndex<MySqlRow> + Copy,
{
    if let Ok(Some(v)) = row.try_get::<Option<String>, _>(index) {
        json!(v)
    } else if let Ok(Some(v)) = row.try_get::<Option<i64>, _>(index) {
        json!(v)
    } else if let Ok(Some(v)) = row.try_get::<Option<f64>, _>(index) {
        json!(v)
    } else if let Ok(Some(v)) = row.try_get::<Option<bool>, _>(index) {
        json!(v)
    } else {
        Value::Null
    }
}
