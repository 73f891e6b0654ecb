use std::collections::BTreeSet;

use thiserror::Error;

use crate::domain::{comparison::services::best_value_for, food::entities::FoodRecord};

pub const MAX_COMPARED_FOODS: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ComparisonRejection {
    #[error("at most 3 foods can be compared")]
    LimitReached,

    #[error("food is already being compared")]
    Duplicate,
}

/// Foods picked for a side-by-side comparison. Never persisted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ComparisonSet {
    records: Vec<FoodRecord>,
}

impl ComparisonSet {
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

    /// The set is left untouched when the record is rejected.
    pub fn add(&mut self, record: FoodRecord) -> Result<(), ComparisonRejection> {
        if self.records.len() >= MAX_COMPARED_FOODS {
            return Err(ComparisonRejection::LimitReached);
        }
        if self.contains(&record.id) {
            return Err(ComparisonRejection::Duplicate);
        }

        self.records.push(record);
        Ok(())
    }

    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.records.len();
        self.records.retain(|r| r.id != id);
        self.records.len() != before
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }

    /// Ids holding the best value of `nutrient_key` among the members.
    pub fn highlights(&self, nutrient_key: &str) -> BTreeSet<String> {
        best_value_for(nutrient_key, &self.records)
    }
}
