use std::collections::BTreeSet;

use crate::domain::food::{
    entities::FoodRecord,
    value_objects::{Nutrient, Preference},
};

/// Ids of the records holding the healthiest value for `nutrient_key`.
///
/// Empty when the key is unknown or has no direction, or when fewer than
/// two records are given. Records without a finite value for the nutrient
/// are left out. Every record tied at the extremum is included.
pub fn best_value_for(nutrient_key: &str, records: &[FoodRecord]) -> BTreeSet<String> {
    if records.len() < 2 {
        return BTreeSet::new();
    }
    let Some(nutrient) = Nutrient::from_key(nutrient_key) else {
        return BTreeSet::new();
    };
    let Some(preference) = nutrient.preference() else {
        return BTreeSet::new();
    };

    let values: Vec<(&str, f64)> = records
        .iter()
        .filter_map(|r| {
            r.nutrient(nutrient)
                .filter(|v| v.is_finite())
                .map(|v| (r.id.as_str(), v))
        })
        .collect();

    let best = values
        .iter()
        .map(|(_, v)| *v)
        .reduce(|a, b| match preference {
            Preference::LowerIsBetter => a.min(b),
            Preference::HigherIsBetter => a.max(b),
        });

    let Some(best) = best else {
        return BTreeSet::new();
    };

    values
        .into_iter()
        .filter(|(_, v)| *v == best)
        .map(|(id, _)| id.to_string())
        .collect()
}
