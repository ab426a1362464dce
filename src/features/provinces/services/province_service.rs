use std::sync::Arc;

use crate::core::context::RequestContext;
use crate::core::error::Result;
use crate::features::provinces::models::{City, Province};
use crate::features::provinces::repositories::ProvinceStore;

/// Read paths for provinces, composing a province with its cities on lookup
pub struct ProvinceService {
    store: Arc<dyn ProvinceStore>,
}

impl ProvinceService {
    pub fn new(store: Arc<dyn ProvinceStore>) -> Self {
        Self { store }
    }

    /// List all provinces. Cities are never loaded here.
    pub async fn get_provinces(&self, ctx: &RequestContext) -> Result<Vec<Province>> {
        self.store.list_all(ctx).await
    }

    /// Get one province together with its cities.
    ///
    /// The province and its cities are read with two separate queries and no
    /// shared snapshot, so a city changed in between may or may not show up.
    /// Cities are not fetched when the province lookup fails.
    pub async fn get_province_by_id(&self, ctx: &RequestContext, id: i32) -> Result<Province> {
        let province = self.store.get_by_id(ctx, id).await?;
        let cities = self.store.list_children_of(ctx, id).await?;

        Ok(assemble(province, cities))
    }
}

fn assemble(mut province: Province, cities: Vec<City>) -> Province {
    province.cities = Some(cities);
    province
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::context::Cancellation;
    use crate::core::error::AppError;
    use crate::features::provinces::repositories::MockProvinceStore;
    use crate::shared::test_helpers::{jakarta, south_jakarta, InMemoryProvinceStore};
    use mockall::predicate::{always, eq};
    use proptest::prelude::*;

    fn service(store: MockProvinceStore) -> ProvinceService {
        ProvinceService::new(Arc::new(store))
    }

    #[tokio::test]
    async fn test_get_province_by_id_assembles_cities() {
        let mut store = MockProvinceStore::new();
        store
            .expect_get_by_id()
            .with(always(), eq(1))
            .times(1)
            .returning(|_, _| Ok(jakarta()));
        store
            .expect_list_children_of()
            .with(always(), eq(1))
            .times(1)
            .returning(|_, _| Ok(vec![south_jakarta()]));

        let province = service(store)
            .get_province_by_id(&RequestContext::new(), 1)
            .await
            .unwrap();

        assert_eq!(province.code, "JK");
        assert_eq!(province.cities, Some(vec![south_jakarta()]));
    }

    #[tokio::test]
    async fn test_province_without_cities_gets_empty_list() {
        let mut store = MockProvinceStore::new();
        store.expect_get_by_id().returning(|_, _| Ok(jakarta()));
        store
            .expect_list_children_of()
            .returning(|_, _| Ok(Vec::new()));

        let province = service(store)
            .get_province_by_id(&RequestContext::new(), 1)
            .await
            .unwrap();

        assert_eq!(province.cities, Some(Vec::new()));
    }

    #[tokio::test]
    async fn test_unknown_province_skips_cities_query() {
        let mut store = MockProvinceStore::new();
        store
            .expect_get_by_id()
            .with(always(), eq(999))
            .times(1)
            .returning(|_, _| Err(AppError::NotFound("unknown province".to_string())));
        store.expect_list_children_of().never();

        let err = service(store)
            .get_province_by_id(&RequestContext::new(), 999)
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_cancelled_province_lookup_skips_cities_query() {
        let mut store = MockProvinceStore::new();
        store
            .expect_get_by_id()
            .times(1)
            .returning(|_, _| Err(AppError::Cancelled(Cancellation::Cancelled)));
        store.expect_list_children_of().never();

        let err = service(store)
            .get_province_by_id(&RequestContext::new(), 1)
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Cancelled(Cancellation::Cancelled)));
    }

    #[tokio::test]
    async fn test_cities_failure_is_propagated() {
        let mut store = MockProvinceStore::new();
        store.expect_get_by_id().returning(|_, _| Ok(jakarta()));
        store
            .expect_list_children_of()
            .times(1)
            .returning(|_, _| Err(AppError::Store(sqlx::Error::PoolTimedOut)));

        let err = service(store)
            .get_province_by_id(&RequestContext::new(), 1)
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Store(sqlx::Error::PoolTimedOut)));
    }

    #[tokio::test]
    async fn test_get_provinces_never_loads_cities() {
        let mut store = MockProvinceStore::new();
        store
            .expect_list_all()
            .times(1)
            .returning(|_| Ok(vec![jakarta()]));
        store.expect_list_children_of().never();

        let provinces = service(store)
            .get_provinces(&RequestContext::new())
            .await
            .unwrap();

        assert_eq!(provinces.len(), 1);
        assert!(provinces.iter().all(|p| p.cities.is_none()));
    }

    #[tokio::test]
    async fn test_cancelled_context_stops_before_cities_query() {
        let store = Arc::new(InMemoryProvinceStore::seeded());
        let service = ProvinceService::new(store.clone());

        let ctx = RequestContext::new();
        ctx.cancel();
        let err = service.get_province_by_id(&ctx, 1).await.unwrap_err();

        assert!(matches!(err, AppError::Cancelled(Cancellation::Cancelled)));
        assert_eq!(store.children_calls(), 0);
    }

    fn arb_store() -> impl Strategy<Value = InMemoryProvinceStore> {
        (1usize..6, prop::collection::vec((0usize..6, "[a-z]{1,8}"), 0..20)).prop_map(
            |(province_count, cities)| {
                let mut store = InMemoryProvinceStore::default();
                for n in 1..=province_count {
                    let id = n as i32;
                    store.add_province(Province {
                        id,
                        code: format!("P{}", id),
                        name: format!("Provinsi {}", id),
                        name_english: format!("Province {}", id),
                        cities: None,
                    });
                }
                for (index, (owner, name)) in cities.into_iter().enumerate() {
                    // Owners outside 1..=province_count have no province row
                    store.add_city(
                        owner as i32,
                        City {
                            id: 100 + index as i32,
                            name: name.clone(),
                            name_english: name,
                        },
                    );
                }
                store
            },
        )
    }

    proptest! {
        #[test]
        fn prop_lookup_returns_exactly_owned_cities(store in arb_store(), id in 0i32..8) {
            let runtime = tokio::runtime::Builder::new_current_thread().enable_all().build().unwrap();
            let expected_province = store.province(id);
            let expected_cities = store.cities_of(id);
            let store = Arc::new(store);
            let service = ProvinceService::new(store.clone());

            let result = runtime.block_on(service.get_province_by_id(&RequestContext::new(), id));

            match expected_province {
                Some(mut expected) => {
                    expected.cities = Some(expected_cities);
                    prop_assert_eq!(result.unwrap(), expected);
                    prop_assert_eq!(store.children_calls(), 1);
                }
                None => {
                    prop_assert!(matches!(result, Err(AppError::NotFound(_))));
                    prop_assert_eq!(store.children_calls(), 0);
                }
            }
        }

        #[test]
        fn prop_listing_never_populates_cities(store in arb_store()) {
            let runtime = tokio::runtime::Builder::new_current_thread().enable_all().build().unwrap();
            let service = ProvinceService::new(Arc::new(store));

            let provinces = runtime.block_on(service.get_provinces(&RequestContext::new())).unwrap();

            prop_assert!(provinces.iter().all(|p| p.cities.is_none()));
        }
    }
}
