//! REST API over the San Martin line timetable store.
//!
//! Six MySQL tables hold the schedules, one per direction and day type
//! (weekday, Saturday, Sunday). Each table gets a full-dump route and a
//! `/:estacion/:hora` lookup that returns the next three departures from
//! that station. Station names map to table columns, validated against
//! `information_schema` before any query is built.

pub mod config;
pub mod db;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod state;
