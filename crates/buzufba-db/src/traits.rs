//! Route repository trait

use async_trait::async_trait;

use crate::error::DbError;
use crate::types::{RouteNameRow, RouteRecord};

/// Read access to stored routes and their departures
#[async_trait]
pub trait RouteRepository: Send + Sync {
    /// All routes ordered by id, each with its departures eagerly loaded
    async fn list_routes(&self) -> Result<Vec<RouteRecord>, DbError>;

    /// A single route with its departures, `None` if the id is unknown
    async fn find_route(&self, route_id: i32) -> Result<Option<RouteRecord>, DbError>;

    /// Id and name of every route ordered by id
    async fn list_route_names(&self) -> Result<Vec<RouteNameRow>, DbError>;

    /// Check that the store is reachable
    async fn ping(&self) -> Result<(), DbError>;

    /// Get backend name (for logging)
    fn backend(&self) -> &'static str;
}
