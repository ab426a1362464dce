use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::features::provinces::models::{City, Province};

/// Response DTO for city data
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CityResponseDto {
    #[schema(example = 11)]
    pub id: i32,
    #[schema(example = "Jakarta Selatan")]
    pub name: String,
    #[schema(example = "South Jakarta")]
    pub name_english: String,
}

impl From<City> for CityResponseDto {
    fn from(city: City) -> Self {
        Self {
            id: city.id,
            name: city.name,
            name_english: city.name_english,
        }
    }
}

/// Response DTO for province data
///
/// `cities` is omitted entirely on the list endpoint and always present on
/// the single-province endpoint (possibly empty). City order is whatever the
/// database returns.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProvinceResponseDto {
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = "JK")]
    pub code: String,
    #[schema(example = "DKI Jakarta")]
    pub name: String,
    #[schema(example = "Jakarta")]
    pub name_english: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cities: Option<Vec<CityResponseDto>>,
}

impl From<Province> for ProvinceResponseDto {
    fn from(province: Province) -> Self {
        Self {
            id: province.id,
            code: province.code,
            name: province.name,
            name_english: province.name_english,
            cities: province
                .cities
                .map(|cities| cities.into_iter().map(Into::into).collect()),
        }
    }
}
