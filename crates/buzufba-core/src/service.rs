//! Route read operations

use std::sync::Arc;

use buzufba_api::{Departure, Route, RouteName};
use buzufba_db::{DepartureRow, RouteRecord, RouteRepository};
use tracing::{debug, instrument};

use crate::error::{CoreError, NotFoundError};

/// Message returned when a route id is unknown
pub const ROUTE_NOT_FOUND: &str = "Route not found";

/// Read-only queries over the route store
#[derive(Clone)]
pub struct RouteService {
    repository: Arc<dyn RouteRepository>,
}

impl std::fmt::Debug for RouteService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RouteService")
            .field("backend", &self.repository.backend())
            .finish()
    }
}

impl RouteService {
    #[must_use]
    pub fn new(repository: Arc<dyn RouteRepository>) -> Self {
        Self { repository }
    }

    /// Every route with its departures, ordered by route id
    ///
    /// # Errors
    /// Returns `CoreError::Storage` if the store fails
    #[instrument(skip(self), level = "debug")]
    pub async fn list_routes(&self) -> Result<Vec<Route>, CoreError> {
        let records = self.repository.list_routes().await?;
        debug!(count = records.len(), "routes fetched");
        Ok(records.into_iter().map(route_response).collect())
    }

    /// A single route with its departures
    ///
    /// # Errors
    /// Returns `CoreError::NotFound` if no route has this id, or
    /// `CoreError::Storage` if the store fails
    #[instrument(skip(self), level = "debug")]
    pub async fn get_route(&self, route_id: i32) -> Result<Route, CoreError> {
        self.repository
            .find_route(route_id)
            .await?
            .map(route_response)
            .ok_or_else(|| NotFoundError::new(ROUTE_NOT_FOUND).into())
    }

    /// Id and name of every route
    ///
    /// # Errors
    /// Returns `CoreError::Storage` if the store fails
    pub async fn list_route_names(&self) -> Result<Vec<RouteName>, CoreError> {
        let names = self.repository.list_route_names().await?;
        Ok(names
            .into_iter()
            .map(|row| RouteName {
                route_id: row.route_id,
                route_name: row.route_name,
            })
            .collect())
    }

    /// Check that the store answers
    ///
    /// # Errors
    /// Returns `CoreError::Storage` if the store is unreachable
    pub async fn health(&self) -> Result<(), CoreError> {
        self.repository.ping().await?;
        Ok(())
    }

    #[must_use]
    pub fn backend(&self) -> &'static str {
        self.repository.backend()
    }
}

fn route_response(record: RouteRecord) -> Route {
    let RouteRecord { route, departures } = record;
    Route {
        route_id: route.route_id,
        route_name: route.route_name,
        trip_length: route.trip_length,
        departure_location: route.departure_location,
        arrival_location: route.arrival_location,
        status_cd: route.status_cd,
        created_at: route.created_at,
        updated_at: route.updated_at,
        departures: departures.into_iter().map(departure_response).collect(),
    }
}

fn departure_response(row: DepartureRow) -> Departure {
    Departure {
        departure_time: row.departure_time,
        obs: row.obs,
        status_cd: row.status_cd,
    }
}
