//! Indonesian provinces (provinsi) and the cities within them.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | GET | `/api/v1/provinces` | List all provinces, without cities |
//! | GET | `/api/v1/provinces/{id}` | Get a province with its cities |
//!
//! ## Storage
//!
//! Read-only over `tb_provinces` and `tb_cities` (`tb_cities.province_id`
//! references `tb_provinces.id`). The schema is owned outside this service.

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;

pub use repositories::PgProvinceStore;
pub use services::ProvinceService;
