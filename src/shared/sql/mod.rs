//! SQL text generation and row decoding shared by the store adapters.

mod row;
mod select;

pub use row::{decode_pg_row, RowDecode, RowReader};
pub use select::{BuildError, BuiltQuery, Select, SqlArg};

#[cfg(test)]
pub(crate) use row::fake::FakeRow;
