//! Stateless validators for raw request values.
//!
//! Checks are chained fluently and stop at the first violation:
//!
//! ```rust
//! use engine::validate::validate;
//! use serde_json::json;
//!
//! let trips = json!("Trips");
//! let name = validate(&trips).string()?.not_empty()?.value();
//! assert_eq!(name, "Trips");
//!
//! let err = validate(&json!(0)).integer()?.bigger_than(0).unwrap_err();
//! assert_eq!(err.to_string(), "must be bigger than 0");
//! # Ok::<(), engine::validate::ValidationError>(())
//! ```

use chrono::NaiveDate;
use serde_json::Value;
use thiserror::Error;

/// Human readable reason a value was rejected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct ValidationError(String);

impl ValidationError {
    pub(crate) fn new(reason: impl Into<String>) -> Self {
        Self(reason.into())
    }
}

/// Entry point of a validation chain.
#[derive(Clone, Copy, Debug)]
pub struct Validator<'a> {
    value: &'a Value,
}

pub fn validate(value: &Value) -> Validator<'_> {
    Validator { value }
}

impl<'a> Validator<'a> {
    pub fn string(self) -> Result<StringValidator<'a>, ValidationError> {
        self.value
            .as_str()
            .map(|value| StringValidator { value })
            .ok_or_else(|| ValidationError::new("must be a string"))
    }

    /// Accepts JSON integers only; `10.5` and `"10"` are rejected.
    pub fn integer(self) -> Result<IntegerValidator, ValidationError> {
        self.value
            .as_i64()
            .map(|value| IntegerValidator { value })
            .ok_or_else(|| ValidationError::new("must be an integer"))
    }

    /// A calendar day written as `YYYY-MM-DD`.
    pub fn day_string(self) -> Result<NaiveDate, ValidationError> {
        let value = self.string()?.value();
        let bytes = value.as_bytes();
        let shaped = bytes.len() == 10
            && bytes[4] == b'-'
            && bytes[7] == b'-'
            && bytes
                .iter()
                .enumerate()
                .all(|(i, b)| i == 4 || i == 7 || b.is_ascii_digit());
        if !shaped {
            return Err(ValidationError::new("must match YYYY-MM-DD"));
        }
        NaiveDate::parse_from_str(value, "%Y-%m-%d")
            .map_err(|_| ValidationError::new("must be a valid calendar day"))
    }
}

#[derive(Clone, Copy, Debug)]
pub struct StringValidator<'a> {
    value: &'a str,
}

impl<'a> StringValidator<'a> {
    pub fn not_empty(self) -> Result<Self, ValidationError> {
        if self.value.is_empty() {
            return Err(ValidationError::new("must not be empty"));
        }
        Ok(self)
    }

    pub fn value(self) -> &'a str {
        self.value
    }
}

#[derive(Clone, Copy, Debug)]
pub struct IntegerValidator {
    value: i64,
}

impl IntegerValidator {
    pub fn bigger_than(self, bound: i64) -> Result<Self, ValidationError> {
        if self.value <= bound {
            return Err(ValidationError::new(format!("must be bigger than {bound}")));
        }
        Ok(self)
    }

    pub fn bigger_or_equal_than(self, bound: i64) -> Result<Self, ValidationError> {
        if self.value < bound {
            return Err(ValidationError::new(format!(
                "must be bigger or equal than {bound}"
            )));
        }
        Ok(self)
    }

    pub fn smaller_or_equal_than(self, bound: i64) -> Result<Self, ValidationError> {
        if self.value > bound {
            return Err(ValidationError::new(format!(
                "must be smaller or equal than {bound}"
            )));
        }
        Ok(self)
    }

    pub fn value(self) -> i64 {
        self.value
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn string_checks() {
        assert_eq!(validate(&json!("a")).string().unwrap().value(), "a");
        assert_eq!(
            validate(&json!(123)).string().unwrap_err().to_string(),
            "must be a string"
        );
        assert_eq!(
            validate(&json!(""))
                .string()
                .unwrap()
                .not_empty()
                .unwrap_err()
                .to_string(),
            "must not be empty"
        );
        // Empty strings are still strings.
        assert!(validate(&json!("")).string().is_ok());
    }

    #[test]
    fn integer_checks() {
        assert_eq!(validate(&json!(5)).integer().unwrap().value(), 5);
        assert!(validate(&json!(10.75)).integer().is_err());
        assert!(validate(&json!("5")).integer().is_err());
        assert!(validate(&json!(null)).integer().is_err());

        let zero = validate(&json!(0)).integer().unwrap();
        assert!(zero.bigger_or_equal_than(0).is_ok());
        assert_eq!(
            zero.bigger_than(0).unwrap_err().to_string(),
            "must be bigger than 0"
        );
        assert_eq!(
            validate(&json!(-1))
                .integer()
                .unwrap()
                .bigger_or_equal_than(0)
                .unwrap_err()
                .to_string(),
            "must be bigger or equal than 0"
        );

        let ten = validate(&json!(10)).integer().unwrap();
        assert!(ten.smaller_or_equal_than(10).is_ok());
        assert_eq!(
            ten.smaller_or_equal_than(9).unwrap_err().to_string(),
            "must be smaller or equal than 9"
        );
    }

    #[test]
    fn chain_short_circuits_on_first_failure() {
        let err = validate(&json!(true))
            .integer()
            .and_then(|v| v.bigger_than(0))
            .unwrap_err();
        assert_eq!(err.to_string(), "must be an integer");
    }

    #[test]
    fn day_string_checks() {
        assert_eq!(
            validate(&json!("2020-06-01")).day_string().unwrap(),
            NaiveDate::from_ymd_opt(2020, 6, 1).unwrap()
        );
        for bad in ["2020-6-1", "2020/06/01", "20200601", "2020-06-01T00:00:00Z", ""] {
            assert_eq!(
                validate(&json!(bad)).day_string().unwrap_err().to_string(),
                "must match YYYY-MM-DD",
                "{bad}"
            );
        }
        assert!(validate(&json!("2021-02-30")).day_string().is_err());
        assert_eq!(
            validate(&json!(20200601)).day_string().unwrap_err().to_string(),
            "must be a string"
        );
    }
}
