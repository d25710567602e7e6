//! Extractors that validate path and query parameters against a [`Schema`]

use std::collections::HashMap;

use axum::{
    extract::{FromRequestParts, Path, Query, rejection::PathRejection},
    http::request::Parts,
};
use buzufba_api::FieldErrors;
use buzufba_core::{Schema, ValidationError, raw_params};

use crate::api::error::AppError;

/// Path parameters validated by `T`'s schema
#[derive(Debug, Clone, Copy)]
pub struct ValidPath<T>(pub T);

/// Query parameters validated by `T`'s schema
#[derive(Debug, Clone, Copy)]
pub struct ValidQuery<T>(pub T);

impl<S, T> FromRequestParts<S> for ValidPath<T>
where
    S: Send + Sync,
    T: Schema,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let raw = match Path::<HashMap<String, String>>::from_request_parts(parts, state).await {
            Ok(Path(raw)) => raw_params(raw),
            Err(PathRejection::FailedToDeserializePathParams(e)) => {
                return Err(field_error("params", e.body_text()));
            }
            Err(e) => return Err(AppError::unclassified(e)),
        };
        Ok(Self(T::parse(&raw)?))
    }
}

impl<S, T> FromRequestParts<S> for ValidQuery<T>
where
    S: Send + Sync,
    T: Schema,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        // Pairs rather than a map so repeated keys reach the schema
        let Query(pairs) = Query::<Vec<(String, String)>>::from_request_parts(parts, state)
            .await
            .map_err(|e| field_error("query", e.body_text()))?;
        Ok(Self(T::parse(&raw_params(pairs))?))
    }
}

fn field_error(field: &str, message: String) -> AppError {
    let mut errors = FieldErrors::new();
    errors.push(field, message);
    ValidationError::new(errors).into()
}
