use utoipa::{Modify, OpenApi};

use crate::features::provinces::{dtos as provinces_dtos, handlers as provinces_handlers};
use crate::shared::types::ErrorResponse;

#[derive(OpenApi)]
#[openapi(
    paths(
        // Provinces
        provinces_handlers::list_provinces,
        provinces_handlers::get_province,
    ),
    components(
        schemas(
            // Shared
            ErrorResponse,
            // Provinces
            provinces_dtos::ProvinceResponseDto,
            provinces_dtos::CityResponseDto,
        )
    ),
    tags(
        (name = "provinces", description = "Indonesian provinces and their cities"),
    ),
    info(
        title = "Provinsi API",
        version = "0.1.0",
        description = "Indonesian provinces and their cities",
    )
)]
pub struct ApiDoc;

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}
