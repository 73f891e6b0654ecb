use serde::{Deserialize, Serialize};

use crate::domain::food::entities::FoodRecord;

/// Favorited records in the order they were added, unique by id.
///
/// Each entry is a full copy of the record, so it can lag behind the remote
/// store. Copies are replaced through [`FavoriteSet::refresh`] whenever a
/// fresher version of the same id is fetched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<FoodRecord>", into = "Vec<FoodRecord>")]
pub struct FavoriteSet {
    records: Vec<FoodRecord>,
}

impl FavoriteSet {
    pub fn records(&self) -> &[FoodRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.records.iter().any(|r| r.id == id)
    }

    /// Removes the record if present, appends it otherwise. Returns whether
    /// the record is a favorite afterwards.
    pub fn toggle(&mut self, record: FoodRecord) -> bool {
        match self.records.iter().position(|r| r.id == record.id) {
            Some(index) => {
                self.records.remove(index);
                false
            }
            None => {
                self.records.push(record);
                true
            }
        }
    }

    /// Replaces the cached copy with the same id, keeping its position.
    /// Returns whether anything changed.
    pub fn refresh(&mut self, fresh: &FoodRecord) -> bool {
        match self.records.iter_mut().find(|r| r.id == fresh.id) {
            Some(cached) if cached != fresh => {
                *cached = fresh.clone();
                true
            }
            _ => false,
        }
    }
}

impl From<Vec<FoodRecord>> for FavoriteSet {
    fn from(records: Vec<FoodRecord>) -> Self {
        let mut set = FavoriteSet::default();
        for record in records {
            if !set.contains(&record.id) {
                set.records.push(record);
            }
        }
        set
    }
}

impl From<FavoriteSet> for Vec<FoodRecord> {
    fn from(set: FavoriteSet) -> Self {
        set.records
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::common::test_utils::sample_record;

    #[test]
    fn test_toggle_parity() {
        let apple = sample_record("1", "Apple", 52.0);
        let mut set = FavoriteSet::from(vec![sample_record("2", "Banana", 89.0)]);
        let original = set.clone();

        for n in 1..=6 {
            set.toggle(apple.clone());
            assert_eq!(set.contains("1"), n % 2 == 1);
        }
        assert_eq!(set, original);
    }

    #[test]
    fn test_toggle_preserves_order_of_the_rest() {
        let mut set = FavoriteSet::from(vec![
            sample_record("1", "Apple", 52.0),
            sample_record("2", "Banana", 89.0),
            sample_record("3", "Cherry", 50.0),
        ]);

        set.toggle(sample_record("2", "Banana", 89.0));
        let ids: Vec<&str> = set.records().iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, ["1", "3"]);

        set.toggle(sample_record("2", "Banana", 89.0));
        let ids: Vec<&str> = set.records().iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, ["1", "3", "2"]);
    }

    #[test]
    fn test_duplicates_dropped_on_load() {
        let json = serde_json::to_string(&vec![
            sample_record("1", "Apple", 52.0),
            sample_record("1", "Apple (old)", 50.0),
        ])
        .unwrap();

        let set: FavoriteSet = serde_json::from_str(&json).unwrap();

        assert_eq!(set.len(), 1);
        assert_eq!(set.records()[0].name, "Apple");
    }

    #[test]
    fn test_refresh_replaces_stale_copy_only() {
        let apple = sample_record("1", "Apple", 52.0);
        let mut set = FavoriteSet::from(vec![apple.clone()]);

        assert!(!set.refresh(&apple));
        assert!(!set.refresh(&sample_record("9", "Kiwi", 61.0)));
        assert!(set.refresh(&FoodRecord {
            calories: 48.0,
            ..apple
        }));
        assert_eq!(set.records()[0].calories, 48.0);
    }
}
