use crate::shared::sql::{RowDecode, RowReader};

/// City or regency (kota/kabupaten) belonging to a province.
///
/// The owning province is implied by the query that produced it and is not
/// carried on the value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct City {
    pub id: i32,
    pub name: String,
    pub name_english: String,
}

impl RowDecode for City {
    const COLUMNS: &'static [&'static str] = &["id", "name", "name_english"];

    fn decode<R: RowReader>(reader: &mut R) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: reader.read_next()?,
            name: reader.read_next()?,
            name_english: reader.read_next()?,
        })
    }
}
