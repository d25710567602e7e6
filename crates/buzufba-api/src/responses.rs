//! Response types for the API

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A bus route together with its departures
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Route {
    pub route_id: i32,
    pub route_name: String,
    /// Trip length in minutes
    pub trip_length: i32,
    pub departure_location: String,
    pub arrival_location: String,
    pub status_cd: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub departures: Vec<Departure>,
}

/// A scheduled departure of a route
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Departure {
    /// Departure time as printed on the timetable (e.g. `6h30`)
    pub departure_time: String,
    /// Free-form observation, if any
    pub obs: Option<String>,
    pub status_cd: String,
}

/// Route identifier and name only
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RouteName {
    pub route_id: i32,
    pub route_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
}
