use axum::extract::{Path, State};
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::request::Parts;
use axum::http::{HeaderValue, Method};
use axum::routing::get;
use axum::Router;
use tower::ServiceBuilder;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::db::TableVariant;
use crate::handlers;
use crate::state::AppState;

/// Create the application router: landing and health routes, plus a dump
/// route and a station/time lookup route for each of the six tables.
#[tracing::instrument(skip(state))]
pub fn create_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config.cors.allowed_origins);

    let mut router = Router::new()
        .route("/", get(handlers::index::welcome))
        .route("/health", get(handlers::health::health_check));

    for variant in TableVariant::ALL {
        let lookup_path = format!("{}/:estacion/:hora", variant.route_path());
        router = router
            .route(
                variant.route_path(),
                get(move |state: State<AppState>| {
                    handlers::schedules::list_schedules(state, variant)
                }),
            )
            .route(
                &lookup_path,
                get(move |state: State<AppState>, path: Path<(String, String)>| {
                    handlers::schedules::next_departures(state, path, variant)
                }),
            );
    }

    router
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(state)
}

/// Origins are matched by prefix, so `http://localhost` admits any port.
fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let origins = allowed_origins.to_vec();

    CorsLayer::new()
        .allow_origin(AllowOrigin::predicate(
            move |origin: &HeaderValue, _parts: &Parts| {
                origins
                    .iter()
                    .any(|allowed| origin.as_bytes().starts_with(allowed.as_bytes()))
            },
        ))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
        .allow_credentials(true)
}
