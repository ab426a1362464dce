//! Positional row decoding.
//!
//! Entities decode themselves from a [`RowReader`] one column at a time, in the
//! same order as their [`RowDecode::COLUMNS`] list. Queries select exactly that
//! list, so the column order is the only contract between the two sides.

use sqlx::{postgres::PgRow, Decode, Postgres, Row, Type};

/// A column value that can be read out of a Postgres row
pub trait ColumnValue: for<'r> Decode<'r, Postgres> + Type<Postgres> + Send + 'static {}

impl<T> ColumnValue for T where T: for<'r> Decode<'r, Postgres> + Type<Postgres> + Send + 'static {}

pub trait RowReader {
    /// Read the next column into a value of type `T`.
    fn read_next<T: ColumnValue>(&mut self) -> Result<T, sqlx::Error>;

    /// Fail if the row still has unread columns.
    fn finish(&self) -> Result<(), sqlx::Error>;
}

/// An entity that can be decoded from a row produced by selecting `COLUMNS`
pub trait RowDecode: Sized {
    const COLUMNS: &'static [&'static str];

    fn decode<R: RowReader>(reader: &mut R) -> Result<Self, sqlx::Error>;
}

/// Decode `T` and require that the row had exactly as many columns as it read
pub fn decode_exact<T: RowDecode, R: RowReader>(reader: &mut R) -> Result<T, sqlx::Error> {
    let value = T::decode(reader)?;
    reader.finish()?;
    Ok(value)
}

pub struct PgRowReader<'r> {
    row: &'r PgRow,
    index: usize,
}

impl<'r> PgRowReader<'r> {
    pub fn new(row: &'r PgRow) -> Self {
        Self { row, index: 0 }
    }
}

impl RowReader for PgRowReader<'_> {
    fn read_next<T: ColumnValue>(&mut self) -> Result<T, sqlx::Error> {
        let value = self.row.try_get::<T, _>(self.index)?;
        self.index += 1;
        Ok(value)
    }

    fn finish(&self) -> Result<(), sqlx::Error> {
        check_consumed(self.index, self.row.len())
    }
}

pub(crate) fn check_consumed(read: usize, len: usize) -> Result<(), sqlx::Error> {
    if read == len {
        Ok(())
    } else {
        Err(sqlx::Error::Decode(
            format!("row has {} columns but {} were decoded", len, read).into(),
        ))
    }
}

pub fn decode_pg_row<T: RowDecode>(row: &PgRow) -> Result<T, sqlx::Error> {
    decode_exact(&mut PgRowReader::new(row))
}


#[cfg(test)]
mod tests {
    use super::fake::FakeRow;
    use super::*;

    #[derive(Debug, PartialEq)]
    struct Pair {
        id: i32,
        label: String,
    }

    impl RowDecode for Pair {
        const COLUMNS: &'static [&'static str] = &["id", "label"];

        fn decode<R: RowReader>(reader: &mut R) -> Result<Self, sqlx::Error> {
            Ok(Self {
                id: reader.read_next()?,
                label: reader.read_next()?,
            })
        }
    }

    #[test]
    fn test_decodes_in_column_order() {
        let mut row = FakeRow::default().with(7_i32).with("seven".to_string());
        let pair: Pair = decode_exact(&mut row).unwrap();
        assert_eq!(
            pair,
            Pair {
                id: 7,
                label: "seven".to_string()
            }
        );
    }

    #[test]
    fn test_too_few_columns() {
        let mut row = FakeRow::default().with(7_i32);
        let err = decode_exact::<Pair, _>(&mut row).unwrap_err();
        assert!(matches!(
            err,
            sqlx::Error::ColumnIndexOutOfBounds { index: 1, len: 1 }
        ));
    }

    #[test]
    fn test_too_many_columns() {
        let mut row = FakeRow::default()
            .with(7_i32)
            .with("seven".to_string())
            .with("extra".to_string());
        let err = decode_exact::<Pair, _>(&mut row).unwrap_err();
        assert!(matches!(err, sqlx::Error::Decode(_)));
    }

    #[test]
    fn test_type_mismatch() {
        let mut row = FakeRow::default()
            .with("seven".to_string())
            .with("seven".to_string());
        let err = decode_exact::<Pair, _>(&mut row).unwrap_err();
        assert!(matches!(err, sqlx::Error::ColumnDecode { .. }));
    }
}
