use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use sqlx::Row;
use tokio::sync::RwLock;
use tracing::{debug, instrument};

use crate::db::DbPool;
use crate::errors::ScheduleError;

/// One of the six schedule tables: a direction crossed with a day type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TableVariant {
    OutboundWeekday,
    OutboundSaturday,
    OutboundSunday,
    ReturnWeekday,
    ReturnSaturday,
    ReturnSunday,
}

impl TableVariant {
    pub const ALL: [TableVariant; 6] = [
        TableVariant::OutboundWeekday,
        TableVariant::OutboundSaturday,
        TableVariant::OutboundSunday,
        TableVariant::ReturnWeekday,
        TableVariant::ReturnSaturday,
        TableVariant::ReturnSunday,
    ];

    /// Name of the backing table. `fs` marks Saturday, `dom` Sunday.
    pub fn table_name(self) -> &'static str {
        match self {
            TableVariant::OutboundWeekday => "horarioida",
            TableVariant::OutboundSaturday => "horarioidafs",
            TableVariant::OutboundSunday => "horarioidadom",
            TableVariant::ReturnWeekday => "horariovuelta",
            TableVariant::ReturnSaturday => "horariovueltafs",
            TableVariant::ReturnSunday => "horariovueltadom",
        }
    }

    /// Base URL path for this table's dump and lookup routes.
    pub fn route_path(self) -> &'static str {
        match self {
            TableVariant::OutboundWeekday => "/horarios",
            TableVariant::OutboundSaturday => "/horariosfs",
            TableVariant::OutboundSunday => "/horariosdom",
            TableVariant::ReturnWeekday => "/horariosvuelta",
            TableVariant::ReturnSaturday => "/horariosvueltafs",
            TableVariant::ReturnSunday => "/horariosvueltadom",
        }
    }

    /// The weekday outbound dump keeps the reduced `num_tren`/`hora_estacion`
    /// shape its mobile client consumes; every other dump returns raw rows.
    pub fn dumps_train_times(self) -> bool {
        matches!(self, TableVariant::OutboundWeekday)
    }
}

impl fmt::Display for TableVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.table_name())
    }
}

/// Map a station display name to its column form: spaces become underscores.
pub fn station_to_column(station: &str) -> String {
    station.replace(' ', "_")
}

/// A station column identifier verified against the live schema.
///
/// Only the catalog mints these, so query builders never interpolate an
/// identifier that did not come out of `information_schema`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StationColumn(pub(crate) String);

impl StationColumn {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StationColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Allow-list of station columns per table, sourced from
/// `information_schema` and cached for the life of the process.
///
/// Lookups are case-insensitive and resolve to the canonical column name,
/// so `estacion central` and `Estacion Central` both hit `Estacion_Central`.
#[derive(Debug, Clone)]
pub struct StationCatalog {
    db: DbPool,
    columns: Arc<RwLock<HashMap<TableVariant, Arc<HashMap<String, String>>>>>,
}

impl StationCatalog {
    pub fn new(db: DbPool) -> Self {
        Self {
            db,
            columns: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Load the column sets of all six tables. Returns the total number of
    /// station columns found. A failure here is not fatal: variants that
    /// did not load fall back to on-demand loading at request time.
    #[instrument(skip(self))]
    pub async fn preload(&self) -> Result<usize, ScheduleError> {
        let mut total = 0;
        for variant in TableVariant::ALL {
            let loaded = self.load_columns(variant).await?;
            total += loaded.len();
            self.columns.write().await.insert(variant, Arc::new(loaded));
        }
        Ok(total)
    }

    /// Resolve a station display name to the canonical column identifier
    /// for `variant`, rejecting anything the schema does not know.
    #[instrument(skip(self, variant), fields(table = %variant))]
    pub async fn resolve(
        &self,
        variant: TableVariant,
        station: &str,
    ) -> Result<StationColumn, ScheduleError> {
        let key = station_to_column(station).to_lowercase();

        if let Some(columns) = self.cached(variant).await {
            return Self::lookup(&columns, &key, station, variant);
        }

        let loaded = Arc::new(self.load_columns(variant).await?);
        self.columns
            .write()
            .await
            .insert(variant, Arc::clone(&loaded));
        Self::lookup(&loaded, &key, station, variant)
    }

    /// Replace a variant's column set with a fixed one, bypassing the
    /// store. Canonical names are derived the same way `load_columns`
    /// derives them.
    pub async fn set_columns<I, S>(&self, variant: TableVariant, names: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let map: HashMap<String, String> = names
            .into_iter()
            .map(|name| {
                let name = name.into();
                (name.to_lowercase(), name)
            })
            .collect();
        self.columns.write().await.insert(variant, Arc::new(map));
    }

    async fn cached(&self, variant: TableVariant) -> Option<Arc<HashMap<String, String>>> {
        self.columns.read().await.get(&variant).cloned()
    }

    fn lookup(
        columns: &HashMap<String, String>,
        key: &str,
        station: &str,
        variant: TableVariant,
    ) -> Result<StationColumn, ScheduleError> {
        columns
            .get(key)
            .map(|canonical| StationColumn(canonical.clone()))
            .ok_or_else(|| ScheduleError::UnknownStation {
                station: station.to_string(),
                table: variant.table_name(),
            })
    }

    #[instrument(skip(self, variant), fields(table = %variant))]
    async fn load_columns(
        &self,
        variant: TableVariant,
    ) -> Result<HashMap<String, String>, ScheduleError> {
        let rows = sqlx::query(
            "SELECT column_name AS name FROM information_schema.columns \
             WHERE table_schema = DATABASE() AND table_name = ? AND column_name <> 'num_tren'",
        )
        .bind(variant.table_name())
        .fetch_all(self.db.pool())
        .await?;

        let mut columns = HashMap::with_capacity(rows.len());
        for row in rows {
            let name: String = row.try_get("name")?;
            columns.insert(name.to_lowercase(), name);
        }

        debug!(columns = columns.len(), "Station columns loaded");
        Ok(columns)
    }
}
