//! API route handlers

pub mod docs;
pub mod error;
pub mod extract;
pub mod routes;
pub mod system;
