//! Schema validation of inbound request parameters
//!
//! Path and query parameters arrive as strings. A [`Schema`] turns them into a
//! typed value or a [`ValidationError`] listing every violation per field.

use std::collections::HashMap;

use buzufba_api::FieldErrors;

use crate::error::ValidationError;

/// Raw parameters as received from the path or query string
///
/// A key repeated in the query string keeps every value in arrival order.
pub type RawParams = HashMap<String, Vec<String>>;

pub const REQUIRED: &str = "Required";
pub const EXPECTED_STRING: &str = "Expected string, received array";
pub const EXPECTED_NUMBER: &str = "Expected number, received string";
pub const EXPECTED_INTEGER: &str = "Expected integer, received float";
pub const NOT_POSITIVE: &str = "Number must be greater than 0";

/// Group key/value pairs into raw parameters
pub fn raw_params<I, K, V>(pairs: I) -> RawParams
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
{
    let mut raw = RawParams::new();
    for (key, value) in pairs {
        raw.entry(key.into()).or_default().push(value.into());
    }
    raw
}

/// A typed view of request parameters
pub trait Schema: Sized {
    /// Validate `raw` and build the typed value
    ///
    /// # Errors
    /// Returns `ValidationError` with every violation grouped by field
    fn parse(raw: &RawParams) -> Result<Self, ValidationError>;
}

/// Routes without input
impl Schema for () {
    fn parse(_raw: &RawParams) -> Result<Self, ValidationError> {
        Ok(())
    }
}

/// Reads fields out of raw parameters, collecting violations as it goes
#[derive(Debug)]
pub struct FieldReader<'a> {
    raw: &'a RawParams,
    errors: FieldErrors,
}

impl<'a> FieldReader<'a> {
    #[must_use]
    pub fn new(raw: &'a RawParams) -> Self {
        Self {
            raw,
            errors: FieldErrors::new(),
        }
    }

    /// A field that must be present exactly once
    pub fn required_str(&mut self, field: &str) -> Option<&'a str> {
        match self.raw.get(field).map(Vec::as_slice) {
            None | Some([]) => {
                self.errors.push(field, REQUIRED);
                None
            }
            Some([value]) => Some(value.as_str()),
            Some(_) => {
                self.errors.push(field, EXPECTED_STRING);
                None
            }
        }
    }

    /// A required integer greater than zero
    pub fn positive_int(&mut self, field: &str) -> Option<i32> {
        let raw = self.required_str(field)?;
        match check_positive_int(raw) {
            Ok(value) => Some(value),
            Err(messages) => {
                for message in messages {
                    self.errors.push(field, message);
                }
                None
            }
        }
    }

    /// Return `value` if no violation was recorded
    ///
    /// # Errors
    /// Returns `ValidationError` holding all recorded violations
    pub fn finish<T>(self, value: Option<T>) -> Result<T, ValidationError> {
        match value {
            Some(value) if self.errors.is_empty() => Ok(value),
            _ => Err(ValidationError::new(self.errors)),
        }
    }
}

fn check_positive_int(raw: &str) -> Result<i32, Vec<String>> {
    let trimmed = raw.trim();
    if let Ok(value) = trimmed.parse::<i64>() {
        if value <= 0 {
            return Err(vec![NOT_POSITIVE.to_string()]);
        }
        return i32::try_from(value).map_err(|_| vec![too_large()]);
    }

    match trimmed.parse::<f64>() {
        // Whole numbers in exponent or decimal form, or beyond the i64 range
        Ok(value) if value.is_finite() && value.fract() == 0.0 => {
            if value <= 0.0 {
                Err(vec![NOT_POSITIVE.to_string()])
            } else if value > f64::from(i32::MAX) {
                Err(vec![too_large()])
            } else {
                #[allow(clippy::cast_possible_truncation)]
                Ok(value as i32)
            }
        }
        Ok(value) if value.is_finite() => {
            let mut messages = vec![EXPECTED_INTEGER.to_string()];
            if value <= 0.0 {
                messages.push(NOT_POSITIVE.to_string());
            }
            Err(messages)
        }
        _ => Err(vec![EXPECTED_NUMBER.to_string()]),
    }
}

fn too_large() -> String {
    format!("Number must be less than or equal to {}", i32::MAX)
}

/// Path parameters of `/routes/{routeId}`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteIdParams {
    pub route_id: i32,
}

impl Schema for RouteIdParams {
    fn parse(raw: &RawParams) -> Result<Self, ValidationError> {
        let mut fields = FieldReader::new(raw);
        let route_id = fields.positive_int("routeId");
        fields.finish(route_id.map(|route_id| Self { route_id }))
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    fn params(pairs: &[(&str, &str)]) -> RawParams {
        raw_params(pairs.iter().copied())
    }

    #[test]
    fn test_empty_schema_accepts_anything() {
        assert!(<()>::parse(&RawParams::new()).is_ok());
        assert!(<()>::parse(&params(&[("x", "y")])).is_ok());
    }

    #[rstest]
    #[case("1", 1)]
    #[case("42", 42)]
    #[case(" 7 ", 7)]
    #[case("2147483647", i32::MAX)]
    #[case("1e3", 1000)]
    #[case("5.0", 5)]
    fn test_route_id_accepts_positive_integers(#[case] raw: &str, #[case] expected: i32) {
        let parsed = RouteIdParams::parse(&params(&[("routeId", raw)])).unwrap();
        assert_eq!(parsed.route_id, expected);
    }

    #[rstest]
    #[case("abc", &[EXPECTED_NUMBER])]
    #[case("", &[EXPECTED_NUMBER])]
    #[case("NaN", &[EXPECTED_NUMBER])]
    #[case("0", &[NOT_POSITIVE])]
    #[case("-3", &[NOT_POSITIVE])]
    #[case("1.5", &[EXPECTED_INTEGER])]
    #[case("-1.5", &[EXPECTED_INTEGER, NOT_POSITIVE])]
    #[case("2147483648", &["Number must be less than or equal to 2147483647"])]
    #[case("99999999999999999999", &["Number must be less than or equal to 2147483647"])]
    #[case("-99999999999999999999", &[NOT_POSITIVE])]
    fn test_route_id_violations(#[case] raw: &str, #[case] expected: &[&str]) {
        let error = RouteIdParams::parse(&params(&[("routeId", raw)])).unwrap_err();
        assert_eq!(error.errors().len(), 1);
        assert_eq!(error.errors().get("routeId").unwrap(), expected);
    }

    #[test]
    fn test_missing_route_id_is_required() {
        let error = RouteIdParams::parse(&RawParams::new()).unwrap_err();
        assert_eq!(error.errors().get("routeId").unwrap(), [REQUIRED]);
    }

    #[test]
    fn test_repeated_route_id_is_rejected() {
        let error = RouteIdParams::parse(&params(&[("routeId", "1"), ("routeId", "2")])).unwrap_err();
        assert_eq!(error.errors().get("routeId").unwrap(), [EXPECTED_STRING]);
    }

    #[test]
    fn test_raw_params_keep_repeated_values_in_order() {
        let raw = params(&[("a", "1"), ("b", "2"), ("a", "3")]);
        assert_eq!(raw["a"], ["1", "3"]);
        assert_eq!(raw["b"], ["2"]);
    }

    #[test]
    fn test_reader_collects_all_fields() {
        let raw = params(&[("a", "x")]);
        let mut fields = FieldReader::new(&raw);
        let a = fields.positive_int("a");
        let b = fields.required_str("b");

        let error = fields.finish(a.zip(b)).unwrap_err();
        assert_eq!(error.errors().len(), 2);
        assert_eq!(error.errors().get("a").unwrap(), [EXPECTED_NUMBER]);
        assert_eq!(error.errors().get("b").unwrap(), [REQUIRED]);
    }
}
