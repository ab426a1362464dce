use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};

use crate::core::context::RequestContext;
use crate::core::error::{AppError, Result};
use crate::features::provinces::dtos::ProvinceResponseDto;
use crate::features::provinces::services::ProvinceService;
use crate::shared::types::ErrorResponse;
use crate::shared::validation::int_param;

/// List all provinces
///
/// Cities are not included in the listing.
#[utoipa::path(
    get,
    path = "/api/v1/provinces",
    responses(
        (status = 200, description = "List of provinces", body = Vec<ProvinceResponseDto>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "provinces"
)]
pub async fn list_provinces(
    ctx: RequestContext,
    State(service): State<Arc<ProvinceService>>,
) -> Result<Json<Vec<ProvinceResponseDto>>> {
    let provinces = service.get_provinces(&ctx).await?;
    Ok(Json(provinces.into_iter().map(Into::into).collect()))
}

/// Get a province by id, including its cities
#[utoipa::path(
    get,
    path = "/api/v1/provinces/{id}",
    params(
        ("id" = i32, Path, description = "Province id")
    ),
    responses(
        (status = 200, description = "Province with its cities", body = ProvinceResponseDto),
        (status = 400, description = "Id is not a number", body = ErrorResponse),
        (status = 404, description = "Province not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "provinces"
)]
pub async fn get_province(
    ctx: RequestContext,
    State(service): State<Arc<ProvinceService>>,
    Path(id): Path<String>,
) -> Result<Json<ProvinceResponseDto>> {
    let id = int_param("id", &id)?;
    // Ids past the column range cannot match any row
    let id = i32::try_from(id).map_err(|_| AppError::NotFound("unknown province".to_string()))?;
    let province = service.get_province_by_id(&ctx, id).await?;
    Ok(Json(province.into()))
}
