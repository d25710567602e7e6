//! Row types read from the route store

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// One row of the `routes` table
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct RouteRow {
    pub route_id: i32,
    pub route_name: String,
    pub trip_length: i32,
    pub departure_location: String,
    pub arrival_location: String,
    pub status_cd: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Departure columns selected alongside a route
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct DepartureRow {
    pub route_id: i32,
    pub departure_time: String,
    pub obs: Option<String>,
    pub status_cd: String,
}

#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct RouteNameRow {
    pub route_id: i32,
    pub route_name: String,
}

/// A route together with its departures, in departure order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteRecord {
    pub route: RouteRow,
    pub departures: Vec<DepartureRow>,
}

impl RouteRecord {
    #[must_use]
    pub fn new(route: RouteRow, departures: Vec<DepartureRow>) -> Self {
        Self { route, departures }
    }

    /// Attach departures to their routes, keeping both orders
    ///
    /// Departures whose route is not in `routes` are dropped.
    #[must_use]
    pub fn group(routes: Vec<RouteRow>, departures: Vec<DepartureRow>) -> Vec<Self> {
        let index: HashMap<i32, usize> = routes
            .iter()
            .enumerate()
            .map(|(i, route)| (route.route_id, i))
            .collect();
        let mut records: Vec<Self> = routes
            .into_iter()
            .map(|route| Self::new(route, Vec::new()))
            .collect();

        for departure in departures {
            if let Some(&i) = index.get(&departure.route_id) {
                records[i].departures.push(departure);
            }
        }

        records
    }
}
