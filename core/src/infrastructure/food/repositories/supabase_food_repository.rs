use reqwest::Method;
use tracing::{debug, instrument, warn};

use crate::{
    domain::{
        common::entities::app_errors::CoreError,
        food::{
            entities::{FoodRecord, FoodRecordPatch, NewFoodRecord},
            ports::FoodRepository,
        },
    },
    infrastructure::{
        food::mappers::{AlimentoPayload, AlimentoRow},
        supabase::{Endpoint, SupabaseClient},
    },
};

const TABLE: &str = "alimentos";

#[derive(Debug, Clone)]
pub struct SupabaseFoodRepository {
    client: SupabaseClient,
}

impl SupabaseFoodRepository {
    pub fn new(client: SupabaseClient) -> Self {
        Self { client }
    }
}

fn barcode_query(barcode: &str) -> Vec<(&'static str, String)> {
    vec![
        ("select", "*".to_string()),
        ("codigo", format!("eq.{}", barcode)),
        ("limit", "1".to_string()),
    ]
}

/// `*` is the PostgREST wildcard; the commas and parentheses it reserves
/// are stripped from the user's text.
fn search_query(text: &str, limit: u32) -> Vec<(&'static str, String)> {
    let text: String = text
        .chars()
        .filter(|c| !matches!(c, ',' | '(' | ')' | '*'))
        .collect();

    vec![
        ("select", "*".to_string()),
        ("nombre", format!("ilike.*{}*", text.trim())),
        ("order", "nombre.asc".to_string()),
        ("limit", limit.to_string()),
    ]
}

fn first_row(rows: Vec<AlimentoRow>) -> Result<FoodRecord, CoreError> {
    rows.into_iter()
        .next()
        .ok_or(CoreError::NotFound)
        .and_then(FoodRecord::try_from)
}

/// Rows that cannot be mapped are left out of a listing.
fn usable_rows(rows: Vec<AlimentoRow>) -> Vec<FoodRecord> {
    rows.into_iter()
        .filter_map(|row| {
            FoodRecord::try_from(row)
                .inspect_err(|e| warn!(error = %e, "skipping alimento row"))
                .ok()
        })
        .collect()
}

impl FoodRepository for SupabaseFoodRepository {
    #[instrument(skip(self))]
    async fn get_by_barcode(&self, barcode: &str) -> Result<Option<FoodRecord>, CoreError> {
        let request = self
            .client
            .request(Method::GET, &self.client.rest_url(TABLE), None)
            .query(&barcode_query(barcode));

        let rows: Vec<AlimentoRow> = self.client.send_json(request, Endpoint::Rest).await?;

        rows.into_iter().next().map(FoodRecord::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn search(&self, query: &str, limit: u32) -> Result<Vec<FoodRecord>, CoreError> {
        let request = self
            .client
            .request(Method::GET, &self.client.rest_url(TABLE), None)
            .query(&search_query(query, limit));

        let rows: Vec<AlimentoRow> = self.client.send_json(request, Endpoint::Rest).await?;
        debug!(count = rows.len(), "alimentos matched");

        Ok(usable_rows(rows))
    }

    #[instrument(skip(self, record))]
    async fn insert(&self, record: NewFoodRecord) -> Result<FoodRecord, CoreError> {
        let request = self
            .client
            .request(Method::POST, &self.client.rest_url(TABLE), None)
            .header("Prefer", "return=representation")
            .json(&AlimentoPayload::from(record));

        let rows: Vec<AlimentoRow> = self.client.send_json(request, Endpoint::Rest).await?;

        first_row(rows)
    }

    #[instrument(skip(self, patch))]
    async fn update(&self, id: &str, patch: FoodRecordPatch) -> Result<FoodRecord, CoreError> {
        let request = self
            .client
            .request(Method::PATCH, &self.client.rest_url(TABLE), None)
            .query(&[("id", format!("eq.{}", id))])
            .header("Prefer", "return=representation")
            .json(&AlimentoPayload::from(patch));

        // PostgREST answers an update matching no row with an empty array.
        let rows: Vec<AlimentoRow> = self.client.send_json(request, Endpoint::Rest).await?;

        first_row(rows)
    }
}
