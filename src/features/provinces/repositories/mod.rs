mod province_store;

pub use province_store::{PgProvinceStore, ProvinceStore};

#[cfg(test)]
pub use province_store::MockProvinceStore;
