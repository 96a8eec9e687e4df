use axum::extract::{Path, State};
use axum::response::{IntoResponse, Response};

use crate::db::{ScheduleRepository, TableVariant};
use crate::state::AppState;

use super::{ErrorResponse, HorariosResponse};

/// Full dump of one schedule table.
#[tracing::instrument(skip(state, variant), fields(table = %variant))]
pub async fn list_schedules(
    State(state): State<AppState>,
    variant: TableVariant,
) -> Result<Response, ErrorResponse> {
    let mode = state.config.run_mode;
    let repository = ScheduleRepository::new(state.db.clone());

    if variant.dumps_train_times() {
        let horarios = repository
            .fetch_train_times(variant)
            .await
            .map_err(|e| ErrorResponse::from_error(e, mode))?;
        Ok(HorariosResponse { horarios }.into_response())
    } else {
        let horarios = repository
            .fetch_all(variant)
            .await
            .map_err(|e| ErrorResponse::from_error(e, mode))?;
        Ok(HorariosResponse { horarios }.into_response())
    }
}

/// Up to three departures from a station strictly after the given time.
/// The station name is resolved against the schema catalog before any
/// query text is built.
#[tracing::instrument(skip(state, variant), fields(table = %variant))]
pub async fn next_departures(
    State(state): State<AppState>,
    Path((estacion, hora)): Path<(String, String)>,
    variant: TableVariant,
) -> Result<Response, ErrorResponse> {
    let mode = state.config.run_mode;

    let column = state
        .catalog
        .resolve(variant, &estacion)
        .await
        .map_err(|e| ErrorResponse::from_error(e, mode))?;

    let repository = ScheduleRepository::new(state.db.clone());
    let horarios = repository
        .next_departures(variant, &column, &hora)
        .await
        .map_err(|e| ErrorResponse::from_error(e, mode))?;

    Ok(HorariosResponse { horarios }.into_response())
}
