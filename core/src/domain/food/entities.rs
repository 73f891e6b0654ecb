use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::food::value_objects::Nutrient;

/// Nutrition facts of one food item. Values are per the serving the record
/// was registered with; an absent nutrient is unknown, not zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodRecord {
    pub id: String,
    #[serde(default)]
    pub barcode: Option<String>,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    pub calories: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protein: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fat: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub saturated_fat: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub carbohydrates: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sugar: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fiber: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sodium: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vitamin_a: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vitamin_c: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calcium: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iron: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl FoodRecord {
    pub fn nutrient(&self, nutrient: Nutrient) -> Option<f64> {
        match nutrient {
            Nutrient::Calories => Some(self.calories),
            Nutrient::Protein => self.protein,
            Nutrient::Fat => self.fat,
            Nutrient::SaturatedFat => self.saturated_fat,
            Nutrient::Carbohydrates => self.carbohydrates,
            Nutrient::Sugar => self.sugar,
            Nutrient::Fiber => self.fiber,
            Nutrient::Sodium => self.sodium,
            Nutrient::VitaminA => self.vitamin_a,
            Nutrient::VitaminC => self.vitamin_c,
            Nutrient::Calcium => self.calcium,
            Nutrient::Iron => self.iron,
        }
    }
}

/// A record as submitted for creation; the store assigns `id` and
/// `created_at`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewFoodRecord {
    pub barcode: Option<String>,
    pub name: String,
    pub brand: Option<String>,
    pub calories: f64,
    pub protein: Option<f64>,
    pub fat: Option<f64>,
    pub carbohydrates: Option<f64>,
    pub sugar: Option<f64>,
    pub fiber: Option<f64>,
    pub sodium: Option<f64>,
    pub image_url: Option<String>,
}

impl NewFoodRecord {
    pub fn into_record(self, id: String, created_at: DateTime<Utc>) -> FoodRecord {
        FoodRecord {
            id,
            barcode: self.barcode,
            name: self.name,
            brand: self.brand,
            calories: self.calories,
            protein: self.protein,
            fat: self.fat,
            saturated_fat: None,
            carbohydrates: self.carbohydrates,
            sugar: self.sugar,
            fiber: self.fiber,
            sodium: self.sodium,
            vitamin_a: None,
            vitamin_c: None,
            calcium: None,
            iron: None,
            image_url: self.image_url,
            created_at,
        }
    }
}

/// Partial update: only the `Some` fields are written.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FoodRecordPatch {
    pub barcode: Option<String>,
    pub name: Option<String>,
    pub brand: Option<String>,
    pub calories: Option<f64>,
    pub protein: Option<f64>,
    pub fat: Option<f64>,
    pub carbohydrates: Option<f64>,
    pub sugar: Option<f64>,
    pub fiber: Option<f64>,
    pub sodium: Option<f64>,
    pub image_url: Option<String>,
}

impl FoodRecordPatch {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn apply_to(&self, record: &mut FoodRecord) {
        if let Some(barcode) = &self.barcode {
            record.barcode = Some(barcode.clone());
        }
        if let Some(name) = &self.name {
            record.name = name.clone();
        }
        if let Some(brand) = &self.brand {
            record.brand = Some(brand.clone());
        }
        if let Some(calories) = self.calories {
            record.calories = calories;
        }
        if self.protein.is_some() {
            record.protein = self.protein;
        }
        if self.fat.is_some() {
            record.fat = self.fat;
        }
        if self.carbohydrates.is_some() {
            record.carbohydrates = self.carbohydrates;
        }
        if self.sugar.is_some() {
            record.sugar = self.sugar;
        }
        if self.fiber.is_some() {
            record.fiber = self.fiber;
        }
        if self.sodium.is_some() {
            record.sodium = self.sodium;
        }
        if let Some(image_url) = &self.image_url {
            record.image_url = Some(image_url.clone());
        }
    }
}
