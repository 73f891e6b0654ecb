use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::{
    common::entities::app_errors::CoreError,
    food::entities::{FoodRecord, FoodRecordPatch, NewFoodRecord},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Nutrient {
    Calories,
    Protein,
    Fat,
    SaturatedFat,
    Carbohydrates,
    Sugar,
    Fiber,
    Sodium,
    VitaminA,
    VitaminC,
    Calcium,
    Iron,
}

/// Which end of the range counts as the healthier value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preference {
    LowerIsBetter,
    HigherIsBetter,
}

impl Nutrient {
    pub const ALL: [Nutrient; 12] = [
        Nutrient::Calories,
        Nutrient::Protein,
        Nutrient::Fat,
        Nutrient::SaturatedFat,
        Nutrient::Carbohydrates,
        Nutrient::Sugar,
        Nutrient::Fiber,
        Nutrient::Sodium,
        Nutrient::VitaminA,
        Nutrient::VitaminC,
        Nutrient::Calcium,
        Nutrient::Iron,
    ];

    /// Column name in the `alimentos` table.
    pub fn key(self) -> &'static str {
        match self {
            Nutrient::Calories => "calorias",
            Nutrient::Protein => "proteinas",
            Nutrient::Fat => "grasas",
            Nutrient::SaturatedFat => "grasas_saturadas",
            Nutrient::Carbohydrates => "carbohidratos",
            Nutrient::Sugar => "azucares",
            Nutrient::Fiber => "fibra",
            Nutrient::Sodium => "sodio",
            Nutrient::VitaminA => "vitamina_a",
            Nutrient::VitaminC => "vitamina_c",
            Nutrient::Calcium => "calcio",
            Nutrient::Iron => "hierro",
        }
    }

    /// Accepts the column name or the English snake_case name.
    pub fn from_key(key: &str) -> Option<Nutrient> {
        let key = key.trim();
        Nutrient::ALL.into_iter().find(|n| {
            n.key().eq_ignore_ascii_case(key) || n.english_key().eq_ignore_ascii_case(key)
        })
    }

    fn english_key(self) -> &'static str {
        match self {
            Nutrient::Calories => "calories",
            Nutrient::Protein => "protein",
            Nutrient::Fat => "fat",
            Nutrient::SaturatedFat => "saturated_fat",
            Nutrient::Carbohydrates => "carbohydrates",
            Nutrient::Sugar => "sugar",
            Nutrient::Fiber => "fiber",
            Nutrient::Sodium => "sodium",
            Nutrient::VitaminA => "vitamin_a",
            Nutrient::VitaminC => "vitamin_c",
            Nutrient::Calcium => "calcium",
            Nutrient::Iron => "iron",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Nutrient::Calories => "Calories",
            Nutrient::Protein => "Protein",
            Nutrient::Fat => "Fat",
            Nutrient::SaturatedFat => "Saturated fat",
            Nutrient::Carbohydrates => "Carbohydrates",
            Nutrient::Sugar => "Sugar",
            Nutrient::Fiber => "Fiber",
            Nutrient::Sodium => "Sodium",
            Nutrient::VitaminA => "Vitamin A",
            Nutrient::VitaminC => "Vitamin C",
            Nutrient::Calcium => "Calcium",
            Nutrient::Iron => "Iron",
        }
    }

    pub fn unit(self) -> &'static str {
        match self {
            Nutrient::Calories => "kcal",
            Nutrient::Sodium | Nutrient::Calcium | Nutrient::Iron | Nutrient::VitaminC => "mg",
            Nutrient::VitaminA => "µg",
            _ => "g",
        }
    }

    pub fn preference(self) -> Option<Preference> {
        match self {
            Nutrient::Calories
            | Nutrient::Fat
            | Nutrient::SaturatedFat
            | Nutrient::Sugar
            | Nutrient::Sodium => Some(Preference::LowerIsBetter),
            Nutrient::Protein
            | Nutrient::Fiber
            | Nutrient::VitaminA
            | Nutrient::VitaminC
            | Nutrient::Calcium
            | Nutrient::Iron => Some(Preference::HigherIsBetter),
            Nutrient::Carbohydrates => None,
        }
    }
}

/// Outcome of a catalogue search.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    Results(Vec<FoodRecord>),
    /// A later search started before this one settled; its response, if
    /// any, was discarded.
    Superseded,
}

/// The add-food form as typed by the user. Numbers arrive as text and are
/// parsed here so that a bad field is reported before anything is sent.
#[derive(Debug, Clone, Default, Validate, Serialize, Deserialize)]
pub struct AddFoodInput {
    #[validate(length(max = 200, message = "name is too long"))]
    pub name: String,
    #[serde(default)]
    pub brand: Option<String>,
    #[validate(length(max = 32, message = "barcode is too long"))]
    pub barcode: String,
    pub calories: String,
    pub protein: String,
    pub carbohydrates: String,
    pub fat: String,
    #[serde(default)]
    pub sugar: Option<String>,
    #[serde(default)]
    pub fiber: Option<String>,
    #[serde(default)]
    pub sodium: Option<String>,
    #[serde(default)]
    #[validate(url(message = "image_url must be a valid URL"))]
    pub image_url: Option<String>,
}

impl AddFoodInput {
    pub fn into_new_record(self) -> Result<NewFoodRecord, CoreError> {
        if self.name.trim().is_empty() || self.barcode.trim().is_empty() {
            return Err(CoreError::Validation(
                "name and barcode are required".to_string(),
            ));
        }
        self.validate()?;

        Ok(NewFoodRecord {
            barcode: Some(self.barcode.trim().to_string()),
            name: self.name.trim().to_string(),
            brand: self
                .brand
                .map(|b| b.trim().to_string())
                .filter(|b| !b.is_empty()),
            calories: parse_quantity("calories", &self.calories)?,
            protein: Some(parse_quantity("protein", &self.protein)?),
            fat: Some(parse_quantity("fat", &self.fat)?),
            carbohydrates: Some(parse_quantity("carbohydrates", &self.carbohydrates)?),
            sugar: parse_optional_quantity("sugar", self.sugar.as_deref())?,
            fiber: parse_optional_quantity("fiber", self.fiber.as_deref())?,
            sodium: parse_optional_quantity("sodium", self.sodium.as_deref())?,
            image_url: self.image_url,
        })
    }
}

impl FoodRecordPatch {
    pub fn validate(&self) -> Result<(), CoreError> {
        if let Some(name) = &self.name
            && name.trim().is_empty()
        {
            return Err(CoreError::Validation("name cannot be empty".to_string()));
        }
        if let Some(barcode) = &self.barcode
            && barcode.trim().is_empty()
        {
            return Err(CoreError::Validation("barcode cannot be empty".to_string()));
        }

        let quantities = [
            ("calories", self.calories),
            ("protein", self.protein),
            ("fat", self.fat),
            ("carbohydrates", self.carbohydrates),
            ("sugar", self.sugar),
            ("fiber", self.fiber),
            ("sodium", self.sodium),
        ];
        for (field, value) in quantities {
            if let Some(value) = value {
                check_quantity(field, value)?;
            }
        }

        Ok(())
    }
}

pub fn parse_quantity(field: &str, raw: &str) -> Result<f64, CoreError> {
    let value = raw.trim().parse::<f64>().map_err(|_| {
        CoreError::Validation(format!(
            "{} must be a valid number greater than or equal to 0",
            field
        ))
    })?;
    check_quantity(field, value)?;

    Ok(value)
}

fn parse_optional_quantity(field: &str, raw: Option<&str>) -> Result<Option<f64>, CoreError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(raw) => parse_quantity(field, raw).map(Some),
    }
}

fn check_quantity(field: &str, value: f64) -> Result<(), CoreError> {
    if !value.is_finite() || value < 0.0 {
        return Err(CoreError::Validation(format!(
            "{} must be a valid number greater than or equal to 0",
            field
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> AddFoodInput {
        AddFoodInput {
            name: " Greek yogurt ".to_string(),
            brand: Some("".to_string()),
            barcode: "7501055300075".to_string(),
            calories: "97".to_string(),
            protein: "9".to_string(),
            carbohydrates: "3.6".to_string(),
            fat: "5".to_string(),
            sugar: Some("3.6".to_string()),
            fiber: None,
            sodium: Some(" ".to_string()),
            image_url: None,
        }
    }

    #[test]
    fn test_form_is_trimmed_and_parsed() {
        let record = form().into_new_record().unwrap();
        assert_eq!(record.name, "Greek yogurt");
        assert_eq!(record.brand, None);
        assert_eq!(record.calories, 97.0);
        assert_eq!(record.carbohydrates, Some(3.6));
        assert_eq!(record.sugar, Some(3.6));
        assert_eq!(record.sodium, None);
    }

    #[test]
    fn test_form_requires_name_and_barcode() {
        let mut input = form();
        input.name = "   ".to_string();
        assert!(matches!(
            input.into_new_record(),
            Err(CoreError::Validation(_))
        ));

        let mut input = form();
        input.barcode = String::new();
        assert!(matches!(
            input.into_new_record(),
            Err(CoreError::Validation(_))
        ));
    }

    #[test]
    fn test_form_rejects_bad_numbers() {
        for bad in ["", "abc", "-1", "NaN", "inf"] {
            let mut input = form();
            input.protein = bad.to_string();
            let err = input.into_new_record().unwrap_err();
            assert_eq!(
                err,
                CoreError::Validation(
                    "protein must be a valid number greater than or equal to 0".to_string()
                )
            );
        }
    }

    #[test]
    fn test_form_rejects_bad_image_url() {
        let mut input = form();
        input.image_url = Some("not a url".to_string());
        assert!(matches!(
            input.into_new_record(),
            Err(CoreError::Validation(_))
        ));
    }

    #[test]
    fn test_patch_validation() {
        let patch = FoodRecordPatch {
            sodium: Some(-3.0),
            ..Default::default()
        };
        assert!(patch.validate().is_err());

        let patch = FoodRecordPatch {
            name: Some("".to_string()),
            ..Default::default()
        };
        assert!(patch.validate().is_err());

        let patch = FoodRecordPatch {
            calories: Some(120.0),
            ..Default::default()
        };
        assert!(patch.validate().is_ok());
    }

    #[test]
    fn test_nutrient_keys() {
        assert_eq!(Nutrient::from_key("calorias"), Some(Nutrient::Calories));
        assert_eq!(Nutrient::from_key("proteinas"), Some(Nutrient::Protein));
        assert_eq!(Nutrient::from_key("Saturated_Fat"), Some(Nutrient::SaturatedFat));
        assert_eq!(Nutrient::from_key("marca"), None);
        for nutrient in Nutrient::ALL {
            assert_eq!(Nutrient::from_key(nutrient.key()), Some(nutrient));
        }
    }

    #[test]
    fn test_nutrient_preferences() {
        assert_eq!(
            Nutrient::Sodium.preference(),
            Some(Preference::LowerIsBetter)
        );
        assert_eq!(Nutrient::Iron.preference(), Some(Preference::HigherIsBetter));
        assert_eq!(Nutrient::Carbohydrates.preference(), None);
    }
}
