//! buzufba-db: Route persistence
//!
//! Provides the `RouteRepository` trait with a PostgreSQL implementation
//! backed by sqlx and an in-memory implementation, plus the UFBA timetable
//! used to seed an empty store.

pub mod error;
pub mod memory;
pub mod postgres;
pub mod seed;
pub mod traits;
pub mod types;

pub use error::DbError;
pub use memory::MemoryRouteRepository;
pub use postgres::{PgPoolConfig, PgRouteRepository};
pub use traits::RouteRepository;
pub use types::{DepartureRow, RouteNameRow, RouteRecord, RouteRow};
