use lazy_static::lazy_static;
use regex::Regex;

use crate::core::error::AppError;

lazy_static! {
    /// Regex for SQL identifiers accepted by the query builder
    /// Lowercase snake case, must not start with a digit
    /// - Valid: "tb_provinces", "name_english", "_id"
    /// - Invalid: "Name", "1col", "tb-cities", "id = 1"
    pub static ref IDENTIFIER_REGEX: Regex = Regex::new(r"^[a-z_][a-z0-9_]*$").unwrap();
}

/// Parse a base-10 integer path/query parameter.
///
/// Accepts the full 64-bit range; narrowing to a column type is up to the
/// caller.
pub fn int_param(name: &str, value: &str) -> Result<i64, AppError> {
    value.parse::<i64>().map_err(|_| {
        AppError::InvalidParameter(format!(
            "param: '{}' cannot be applied because the value is not a number",
            name
        ))
    })
}
