use thiserror::Error;

/// Failures a schedule request can run into.
#[derive(Error, Debug)]
pub enum ScheduleError {
    #[error("Unknown station '{station}' for table {table}")]
    UnknownStation {
        station: String,
        table: &'static str,
    },

    #[error("Database connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Database query failed: {0}")]
    QueryFailed(String),
}

impl From<sqlx::Error> for ScheduleError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Io(_)
            | sqlx::Error::Tls(_)
            | sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed => ScheduleError::ConnectionFailed(err.to_string()),
            sqlx::Error::Database(db_err) => {
                ScheduleError::QueryFailed(db_err.message().to_string())
            }
            _ => ScheduleError::QueryFailed(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pool_errors_map_to_connection_failed() {
        let err: ScheduleError = sqlx::Error::PoolTimedOut.into();
        assert!(matches!(err, ScheduleError::ConnectionFailed(_)));

        let err: ScheduleError = sqlx::Error::PoolClosed.into();
        assert!(matches!(err, ScheduleError::ConnectionFailed(_)));
    }

    #[test]
    fn test_row_errors_map_to_query_failed() {
        let err: ScheduleError = sqlx::Error::RowNotFound.into();
        assert!(matches!(err, ScheduleError::QueryFailed(_)));
    }

    #[test]
    fn test_unknown_station_names_the_table() {
        let err = ScheduleError::UnknownStation {
            station: "Estacion Fantasma".to_string(),
            table: "horarioida",
        };
        let message = err.to_string();
        assert!(message.contains("Estacion Fantasma"));
        assert!(message.contains("horarioida"));
    }
}
