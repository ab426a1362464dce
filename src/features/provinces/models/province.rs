use crate::features::provinces::models::City;
use crate::shared::sql::{RowDecode, RowReader};

/// Province (provinsi), the parent level of the hierarchy
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Province {
    pub id: i32,
    pub code: String,
    pub name: String,
    pub name_english: String,
    /// `None` unless the cities were fetched for this province
    pub cities: Option<Vec<City>>,
}

impl RowDecode for Province {
    const COLUMNS: &'static [&'static str] = &["id", "name", "name_english", "code"];

    fn decode<R: RowReader>(reader: &mut R) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: reader.read_next()?,
            name: reader.read_next()?,
            name_english: reader.read_next()?,
            code: reader.read_next()?,
            cities: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::sql::FakeRow;

    #[test]
    fn test_decode_follows_column_order() {
        let mut row = FakeRow::default()
            .with(1_i32)
            .with("DKI Jakarta".to_string())
            .with("Jakarta".to_string())
            .with("JK".to_string());

        let province = Province::decode(&mut row).unwrap();

        assert_eq!(province.id, 1);
        assert_eq!(province.name, "DKI Jakarta");
        assert_eq!(province.name_english, "Jakarta");
        assert_eq!(province.code, "JK");
        assert_eq!(province.cities, None);
    }
}
