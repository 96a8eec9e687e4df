pub mod pool;
pub mod repository;
pub mod schema;

pub use pool::DbPool;
pub use repository::ScheduleRepository;
pub use schema::{StationCatalog, StationColumn, TableVariant};
