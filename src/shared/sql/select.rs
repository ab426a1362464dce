use thiserror::Error;

use crate::shared::validation::IDENTIFIER_REGEX;

/// Scalar value bound to a placeholder
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SqlArg {
    Int(i32),
    Text(String),
}

impl From<i32> for SqlArg {
    fn from(value: i32) -> Self {
        SqlArg::Int(value)
    }
}

impl From<&str> for SqlArg {
    fn from(value: &str) -> Self {
        SqlArg::Text(value.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError {
    #[error("select has no table")]
    MissingTable,

    #[error("select has no columns")]
    NoColumns,

    #[error("'{0}' is not a valid SQL identifier")]
    InvalidIdentifier(String),
}

/// Query text plus the arguments for its `$n` placeholders, in order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuiltQuery {
    pub sql: String,
    pub args: Vec<SqlArg>,
}

/// Builder for `SELECT <columns> FROM <table> [WHERE col = $n AND ...]`.
///
/// Columns are emitted in the order given and filters in the order added, so
/// the same inputs always produce the same text and argument order. Table and
/// column names are expected to be constants; they are checked against
/// [`IDENTIFIER_REGEX`] rather than quoted.
#[derive(Debug, Clone)]
pub struct Select<'a> {
    columns: &'a [&'a str],
    table: Option<&'a str>,
    filters: Vec<(&'a str, SqlArg)>,
}

impl<'a> Select<'a> {
    pub fn new(columns: &'a [&'a str]) -> Self {
        Self {
            columns,
            table: None,
            filters: Vec::new(),
        }
    }

    pub fn from(mut self, table: &'a str) -> Self {
        self.table = Some(table);
        self
    }

    /// Add an `column = $n` equality filter, ANDed with any previous ones
    pub fn where_eq(mut self, column: &'a str, value: impl Into<SqlArg>) -> Self {
        self.filters.push((column, value.into()));
        self
    }

    pub fn build(self) -> Result<BuiltQuery, BuildError> {
        let table = self.table.ok_or(BuildError::MissingTable)?;
        if self.columns.is_empty() {
            return Err(BuildError::NoColumns);
        }

        check_identifier(table)?;
        for column in self.columns {
            check_identifier(column)?;
        }
        for (column, _) in &self.filters {
            check_identifier(column)?;
        }

        let mut sql = format!("SELECT {} FROM {}", self.columns.join(", "), table);
        let mut args = Vec::with_capacity(self.filters.len());

        for (position, (column, value)) in self.filters.into_iter().enumerate() {
            let keyword = if position == 0 { "WHERE" } else { "AND" };
            sql.push_str(&format!(" {} {} = ${}", keyword, column, position + 1));
            args.push(value);
        }

        Ok(BuiltQuery { sql, args })
    }
}

fn check_identifier(name: &str) -> Result<(), BuildError> {
    if IDENTIFIER_REGEX.is_match(name) {
        Ok(())
    } else {
        Err(BuildError::InvalidIdentifier(name.to_string()))
    }
}
