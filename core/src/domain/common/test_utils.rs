use chrono::Utc;

use crate::{
    domain::{
        common::{SearchConfig, services::Service},
        food::entities::FoodRecord,
    },
    infrastructure::memory::{
        InMemoryAuthClient, InMemoryFoodRepository, InMemoryPreferenceStore,
        InMemoryProfileRepository,
    },
};

pub(crate) type TestService = Service<
    InMemoryFoodRepository,
    InMemoryPreferenceStore,
    InMemoryAuthClient,
    InMemoryProfileRepository,
>;

pub(crate) fn build_service() -> TestService {
    build_service_with(SearchConfig::default())
}

pub(crate) fn build_service_with(search_config: SearchConfig) -> TestService {
    Service::new(
        InMemoryFoodRepository::default(),
        InMemoryPreferenceStore::default(),
        InMemoryAuthClient::default(),
        InMemoryProfileRepository::default(),
        search_config,
    )
}

/// A record with only the required fields set.
pub(crate) fn sample_record(id: &str, name: &str, calories: f64) -> FoodRecord {
    FoodRecord {
        id: id.to_string(),
        barcode: None,
        name: name.to_string(),
        brand: None,
        calories,
        protein: None,
        fat: None,
        saturated_fat: None,
        carbohydrates: None,
        sugar: None,
        fiber: None,
        sodium: None,
        vitamin_a: None,
        vitamin_c: None,
        calcium: None,
        iron: None,
        image_url: None,
        created_at: Utc::now(),
    }
}
