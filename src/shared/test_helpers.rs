#[cfg(test)]
pub use in_memory::{jakarta, south_jakarta, InMemoryProvinceStore};

#[cfg(test)]
mod in_memory {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;

    use crate::core::context::RequestContext;
    use crate::core::error::{AppError, Result};
    use crate::features::provinces::models::{City, Province};
    use crate::features::provinces::repositories::ProvinceStore;

    pub fn jakarta() -> Province {
        Province {
            id: 1,
            code: "JK".to_string(),
            name: "DKI Jakarta".to_string(),
            name_english: "Jakarta".to_string(),
            cities: None,
        }
    }

    pub fn south_jakarta() -> City {
        City {
            id: 11,
            name: "Jakarta Selatan".to_string(),
            name_english: "South Jakarta".to_string(),
        }
    }

    /// Store fake backed by vectors, counting calls per operation
    #[derive(Debug, Default)]
    pub struct InMemoryProvinceStore {
        provinces: Vec<Province>,
        cities: Vec<(i32, City)>,
        list_calls: AtomicUsize,
        by_id_calls: AtomicUsize,
        children_calls: AtomicUsize,
    }

    impl InMemoryProvinceStore {
        /// DKI Jakarta with Jakarta Selatan, plus Bali with no cities
        pub fn seeded() -> Self {
            let mut store = Self::default();
            store.add_province(jakarta());
            store.add_province(Province {
                id: 2,
                code: "BA".to_string(),
                name: "Bali".to_string(),
                name_english: "Bali".to_string(),
                cities: None,
            });
            store.add_city(1, south_jakarta());
            store
        }

        pub fn add_province(&mut self, province: Province) {
            self.provinces.push(province);
        }

        pub fn add_city(&mut self, province_id: i32, city: City) {
            self.cities.push((province_id, city));
        }

        pub fn province(&self, id: i32) -> Option<Province> {
            self.provinces.iter().find(|p| p.id == id).cloned()
        }

        pub fn cities_of(&self, province_id: i32) -> Vec<City> {
            self.cities
                .iter()
                .filter(|(owner, _)| *owner == province_id)
                .map(|(_, city)| city.clone())
                .collect()
        }

        pub fn store_calls(&self) -> usize {
            self.list_calls.load(Ordering::SeqCst)
                + self.by_id_calls.load(Ordering::SeqCst)
                + self.children_calls.load(Ordering::SeqCst)
        }

        pub fn children_calls(&self) -> usize {
            self.children_calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl ProvinceStore for InMemoryProvinceStore {
        async fn list_all(&self, ctx: &RequestContext) -> Result<Vec<Province>> {
            self.list_calls.fetch_add(1, Ordering::SeqCst);
            ctx.run(async { Ok(self.provinces.clone()) }).await
        }

        async fn get_by_id(&self, ctx: &RequestContext, id: i32) -> Result<Province> {
            self.by_id_calls.fetch_add(1, Ordering::SeqCst);
            ctx.run(async {
                self.province(id)
                    .ok_or_else(|| AppError::NotFound("unknown province".to_string()))
            })
            .await
        }

        async fn list_children_of(
            &self,
            ctx: &RequestContext,
            province_id: i32,
        ) -> Result<Vec<City>> {
            self.children_calls.fetch_add(1, Ordering::SeqCst);
            ctx.run(async { Ok(self.cities_of(province_id)) }).await
        }
    }
}
