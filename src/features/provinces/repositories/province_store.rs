use async_trait::async_trait;
use futures::TryStreamExt;
use sqlx::{postgres::PgArguments, query::Query, PgPool, Postgres};

use crate::core::context::RequestContext;
use crate::core::error::{AppError, Result};
use crate::features::provinces::models::{City, Province};
use crate::shared::sql::{decode_pg_row, BuildError, BuiltQuery, RowDecode, Select, SqlArg};

pub const PROVINCES_TABLE: &str = "tb_provinces";
pub const CITIES_TABLE: &str = "tb_cities";
/// Foreign key on `tb_cities` referencing `tb_provinces.id`
pub const CITY_PROVINCE_COLUMN: &str = "province_id";

/// Read access to provinces and their cities.
///
/// Every call runs under the caller's [`RequestContext`] and returns
/// [`AppError::Cancelled`] when the context finishes first.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProvinceStore: Send + Sync {
    /// All provinces, without cities. Empty table gives an empty vec.
    async fn list_all(&self, ctx: &RequestContext) -> Result<Vec<Province>>;

    /// One province without cities, or [`AppError::NotFound`].
    async fn get_by_id(&self, ctx: &RequestContext, id: i32) -> Result<Province>;

    /// Cities owned by `province_id` in store order. A province with no
    /// cities (or an unknown id) gives an empty vec.
    async fn list_children_of(&self, ctx: &RequestContext, province_id: i32) -> Result<Vec<City>>;
}

pub fn provinces_query() -> std::result::Result<BuiltQuery, BuildError> {
    Select::new(Province::COLUMNS).from(PROVINCES_TABLE).build()
}

pub fn province_by_id_query(id: i32) -> std::result::Result<BuiltQuery, BuildError> {
    Select::new(Province::COLUMNS)
        .from(PROVINCES_TABLE)
        .where_eq("id", id)
        .build()
}

pub fn cities_by_province_query(
    province_id: i32,
) -> std::result::Result<BuiltQuery, BuildError> {
    Select::new(City::COLUMNS)
        .from(CITIES_TABLE)
        .where_eq(CITY_PROVINCE_COLUMN, province_id)
        .build()
}

fn bind_args<'q>(
    mut query: Query<'q, Postgres, PgArguments>,
    args: &'q [SqlArg],
) -> Query<'q, Postgres, PgArguments> {
    for arg in args {
        query = match arg {
            SqlArg::Int(value) => query.bind(*value),
            SqlArg::Text(value) => query.bind(value.as_str()),
        };
    }
    query
}

/// Postgres-backed [`ProvinceStore`]
pub struct PgProvinceStore {
    pool: PgPool,
}

impl PgProvinceStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Stream the rows of `query`, decoding each one as it arrives.
    ///
    /// The row stream holds the pooled connection; it is dropped on every
    /// return path, including a decode error part way through.
    async fn fetch_all<T: RowDecode>(&self, query: &BuiltQuery) -> Result<Vec<T>> {
        let mut rows = bind_args(sqlx::query(&query.sql), &query.args).fetch(&self.pool);

        let mut items = Vec::new();
        while let Some(row) = rows.try_next().await? {
            items.push(decode_pg_row::<T>(&row)?);
        }
        Ok(items)
    }

    async fn fetch_optional<T: RowDecode>(&self, query: &BuiltQuery) -> Result<Option<T>> {
        let row = bind_args(sqlx::query(&query.sql), &query.args)
            .fetch_optional(&self.pool)
            .await?;

        match row {
            Some(row) => Ok(Some(decode_pg_row::<T>(&row)?)),
            None => Ok(None),
        }
    }
}

fn log_failure(what: &str, err: &AppError) {
    match err {
        AppError::Cancelled(reason) => tracing::debug!("{} aborted: {}", what, reason),
        other => tracing::error!("Failed to fetch {}: {:?}", what, other),
    }
}

#[async_trait]
impl ProvinceStore for PgProvinceStore {
    async fn list_all(&self, ctx: &RequestContext) -> Result<Vec<Province>> {
        let query = provinces_query()?;

        ctx.run(self.fetch_all::<Province>(&query))
            .await
            .inspect_err(|e| log_failure("provinces", e))
    }

    async fn get_by_id(&self, ctx: &RequestContext, id: i32) -> Result<Province> {
        let query = province_by_id_query(id)?;

        ctx.run(self.fetch_optional::<Province>(&query))
            .await
            .inspect_err(|e| log_failure("province by id", e))?
            .ok_or_else(|| AppError::NotFound("unknown province".to_string()))
    }

    async fn list_children_of(&self, ctx: &RequestContext, province_id: i32) -> Result<Vec<City>> {
        let query = cities_by_province_query(province_id)?;

        ctx.run(self.fetch_all::<City>(&query))
            .await
            .inspect_err(|e| log_failure("cities", e))
    }
}
