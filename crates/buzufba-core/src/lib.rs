//! buzufba-core: Domain errors, validation and route queries
//!
//! Defines the classifiable failure kinds, the schema validation layer that
//! produces field-level errors, and the `RouteService` read operations.

pub mod error;
pub mod service;
pub mod validation;

pub use error::{BadRequestError, CoreError, NotFoundError, ValidationError};
pub use service::RouteService;
pub use validation::{RawParams, RouteIdParams, Schema, raw_params};
