use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::domain::{
    common::entities::app_errors::CoreError,
    food::entities::{FoodRecord, FoodRecordPatch, NewFoodRecord},
};

/// A row of the `alimentos` table as returned by PostgREST.
#[derive(Debug, Clone, Deserialize)]
pub struct AlimentoRow {
    #[serde(deserialize_with = "id_as_string")]
    pub id: String,
    #[serde(default)]
    pub codigo: Option<String>,
    pub nombre: String,
    #[serde(default)]
    pub marca: Option<String>,
    #[serde(default)]
    pub calorias: Option<f64>,
    #[serde(default)]
    pub proteinas: Option<f64>,
    #[serde(default)]
    pub grasas: Option<f64>,
    #[serde(default)]
    pub grasas_saturadas: Option<f64>,
    #[serde(default)]
    pub carbohidratos: Option<f64>,
    #[serde(default)]
    pub azucares: Option<f64>,
    #[serde(default)]
    pub fibra: Option<f64>,
    #[serde(default)]
    pub sodio: Option<f64>,
    #[serde(default)]
    pub vitamina_a: Option<f64>,
    #[serde(default)]
    pub vitamina_c: Option<f64>,
    #[serde(default)]
    pub calcio: Option<f64>,
    #[serde(default)]
    pub hierro: Option<f64>,
    #[serde(default)]
    pub imagen_url: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Body of an insert or a partial update. Unset columns are left out so
/// the database keeps its defaults or current values.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AlimentoPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub codigo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nombre: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub marca: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub calorias: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proteinas: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grasas: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub carbohidratos: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub azucares: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fibra: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sodio: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub imagen_url: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Integer(i64),
}

fn id_as_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(id) => id,
        RawId::Integer(id) => id.to_string(),
    })
}

/// Calories are mandatory for a food; a row without them would read as 0 kcal
/// and win every lower-is-better comparison, so it is rejected instead.
impl TryFrom<AlimentoRow> for FoodRecord {
    type Error = CoreError;

    fn try_from(row: AlimentoRow) -> Result<Self, Self::Error> {
        let calories = row.calorias.ok_or_else(|| {
            CoreError::ExternalServiceError(format!("alimento {} has no calorias", row.id))
        })?;

        Ok(Self {
            id: row.id,
            barcode: row.codigo,
            name: row.nombre,
            brand: row.marca,
            calories,
            protein: row.proteinas,
            fat: row.grasas,
            saturated_fat: row.grasas_saturadas,
            carbohydrates: row.carbohidratos,
            sugar: row.azucares,
            fiber: row.fibra,
            sodium: row.sodio,
            vitamin_a: row.vitamina_a,
            vitamin_c: row.vitamina_c,
            calcium: row.calcio,
            iron: row.hierro,
            image_url: row.imagen_url,
            created_at: row.created_at.unwrap_or_else(Utc::now),
        })
    }
}

impl From<NewFoodRecord> for AlimentoPayload {
    fn from(record: NewFoodRecord) -> Self {
        Self {
            codigo: record.barcode,
            nombre: Some(record.name),
            marca: record.brand,
            calorias: Some(record.calories),
            proteinas: record.protein,
            grasas: record.fat,
            carbohidratos: record.carbohydrates,
            azucares: record.sugar,
            fibra: record.fiber,
            sodio: record.sodium,
            imagen_url: record.image_url,
        }
    }
}

impl From<FoodRecordPatch> for AlimentoPayload {
    fn from(patch: FoodRecordPatch) -> Self {
        Self {
            codigo: patch.barcode,
            nombre: patch.name,
            marca: patch.brand,
            calorias: patch.calories,
            proteinas: patch.protein,
            grasas: patch.fat,
            carbohidratos: patch.carbohydrates,
            azucares: patch.sugar,
            fibra: patch.fiber,
            sodio: patch.sodium,
            imagen_url: patch.image_url,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_with_numeric_id_and_nulls() {
        let json = r#"{
            "id": 42,
            "codigo": "7501055300075",
            "nombre": "Yogur natural",
            "marca": null,
            "calorias": 61,
            "proteinas": 3.5,
            "azucares": null,
            "created_at": "2024-03-01T12:00:00+00:00"
        }"#;

        let row: AlimentoRow = serde_json::from_str(json).unwrap();
        let record = FoodRecord::try_from(row).unwrap();

        assert_eq!(record.id, "42");
        assert_eq!(record.barcode.as_deref(), Some("7501055300075"));
        assert_eq!(record.calories, 61.0);
        assert_eq!(record.protein, Some(3.5));
        assert_eq!(record.sugar, None);
        assert_eq!(record.brand, None);
    }

    #[test]
    fn test_row_without_calories_is_rejected() {
        let json = r#"{"id":7,"nombre":"Agua","calorias":null}"#;

        let row: AlimentoRow = serde_json::from_str(json).unwrap();

        assert!(matches!(
            FoodRecord::try_from(row),
            Err(CoreError::ExternalServiceError(_))
        ));
    }

    #[test]
    fn test_row_with_string_id() {
        let json = r#"{"id":"9b2c","nombre":"Pan","calorias":265}"#;

        let row: AlimentoRow = serde_json::from_str(json).unwrap();

        assert_eq!(row.id, "9b2c");
    }

    #[test]
    fn test_patch_payload_omits_unset_columns() {
        let patch = FoodRecordPatch {
            calories: Some(48.0),
            name: Some("Manzana".to_string()),
            ..Default::default()
        };

        let body = serde_json::to_value(AlimentoPayload::from(patch)).unwrap();

        assert_eq!(body, serde_json::json!({"nombre": "Manzana", "calorias": 48.0}));
    }
}
