//! In-memory route store

use async_trait::async_trait;
use tracing::debug;

use crate::error::DbError;
use crate::traits::RouteRepository;
use crate::types::{RouteNameRow, RouteRecord};

/// Route repository serving a fixed set of records held in memory
#[derive(Debug, Clone, Default)]
pub struct MemoryRouteRepository {
    records: Vec<RouteRecord>,
}

impl MemoryRouteRepository {
    /// Create a repository holding `records`, ordered by route id
    #[must_use]
    pub fn new(mut records: Vec<RouteRecord>) -> Self {
        records.sort_by_key(|r| r.route.route_id);
        Self { records }
    }
}

#[async_trait]
impl RouteRepository for MemoryRouteRepository {
    async fn list_routes(&self) -> Result<Vec<RouteRecord>, DbError> {
        debug!(count = self.records.len(), "listing in-memory routes");
        Ok(self.records.clone())
    }

    async fn find_route(&self, route_id: i32) -> Result<Option<RouteRecord>, DbError> {
        Ok(self
            .records
            .iter()
            .find(|r| r.route.route_id == route_id)
            .cloned())
    }

    async fn list_route_names(&self) -> Result<Vec<RouteNameRow>, DbError> {
        Ok(self
            .records
            .iter()
            .map(|r| RouteNameRow {
                route_id: r.route.route_id,
                route_name: r.route.route_name.clone(),
            })
            .collect())
    }

    async fn ping(&self) -> Result<(), DbError> {
        Ok(())
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}
