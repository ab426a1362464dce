pub mod sql;
pub mod test_helpers;
pub mod types;
pub mod validation;
