//! buzufba-api: Shared API types and schemas
//!
//! Contains the response types, error bodies and OpenAPI schema definitions
//! served by the buzufba daemon.

pub mod errors;
pub mod responses;

pub use errors::{ErrorResponse, FieldErrors};
pub use responses::{Departure, HealthResponse, Route, RouteName};
