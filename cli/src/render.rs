use std::fmt::Write as _;

use nutriscan_core::domain::{
    authentication::entities::Session,
    common::entities::{app_errors::CoreError, synced::Persistence},
    comparison::entities::ComparisonSet,
    food::{entities::FoodRecord, value_objects::Nutrient},
    profile::entities::Profile,
};

const MISSING: &str = "-";

fn quantity(value: Option<f64>, nutrient: Nutrient) -> String {
    match value {
        Some(value) => format!("{} {}", trim_number(value), nutrient.unit()),
        None => MISSING.to_string(),
    }
}

fn trim_number(value: f64) -> String {
    let text = format!("{:.2}", value);
    text.trim_end_matches('0').trim_end_matches('.').to_string()
}

/// One line per record: favorite marker, name, brand, calories, barcode.
pub fn food_line(record: &FoodRecord, favorite: bool) -> String {
    let marker = if favorite { "★" } else { " " };
    let brand = record
        .brand
        .as_deref()
        .map(|b| format!(" ({})", b))
        .unwrap_or_default();

    format!(
        "{} {}{}  {}  [{}]",
        marker,
        record.name,
        brand,
        quantity(Some(record.calories), Nutrient::Calories),
        record.barcode.as_deref().unwrap_or(MISSING)
    )
}

/// Every nutrient of a record, skipping the unknown ones.
pub fn food_detail(record: &FoodRecord, favorite: bool) -> String {
    let mut out = food_line(record, favorite);
    let _ = write!(out, "\n  id: {}", record.id);

    for nutrient in Nutrient::ALL {
        if let Some(value) = record.nutrient(nutrient) {
            let _ = write!(
                out,
                "\n  {:<14} {}",
                nutrient.label(),
                quantity(Some(value), nutrient)
            );
        }
    }
    if let Some(image_url) = &record.image_url {
        let _ = write!(out, "\n  image: {}", image_url);
    }

    out
}

/// Nutrient table with the healthiest value of each row marked with `*`.
pub fn comparison_table(set: &ComparisonSet) -> String {
    let records = set.records();
    let width = 16;
    let mut out = format!("{:<16}", "");
    for record in records {
        let _ = write!(out, "{:>width$}", truncate(&record.name, width - 1));
    }

    for nutrient in Nutrient::ALL {
        if records.iter().all(|r| r.nutrient(nutrient).is_none()) {
            continue;
        }
        let best = set.highlights(nutrient.key());

        let _ = write!(out, "\n{:<16}", nutrient.label());
        for record in records {
            let mut cell = quantity(record.nutrient(nutrient), nutrient);
            if best.contains(&record.id) {
                cell.push_str(" *");
            }
            let _ = write!(out, "{:>width$}", cell);
        }
    }

    out
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(max.saturating_sub(1)).collect();
    cut.push('…');
    cut
}

pub fn numbered(terms: &[String]) -> String {
    if terms.is_empty() {
        return "No recent searches.".to_string();
    }

    terms
        .iter()
        .enumerate()
        .map(|(i, term)| format!("{:>2}. {}", i + 1, term))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn session_line(session: &Session) -> String {
    match &session.user.name {
        Some(name) => format!("Signed in as {} <{}>", name, session.user.email),
        None => format!("Signed in as {}", session.user.email),
    }
}

pub fn profile_detail(profile: &Profile) -> String {
    format!(
        "name:   {}\navatar: {}\nupdated: {}",
        profile.name.as_deref().unwrap_or(MISSING),
        profile.avatar_url.as_deref().unwrap_or(MISSING),
        profile
            .updated_at
            .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_else(|| MISSING.to_string())
    )
}

/// Warning for a local change that could not be saved.
pub fn persistence_warning(persistence: &Persistence) -> Option<String> {
    match persistence {
        Persistence::Failed(e) => Some(format!(
            "warning: this change is not saved on this device ({})",
            e
        )),
        Persistence::Unchanged | Persistence::Committed => None,
    }
}

/// Message shown for an error that reached the command boundary.
pub fn notice(error: &anyhow::Error) -> String {
    match error.downcast_ref::<CoreError>() {
        Some(e) if e.is_transient() => format!("{:#}. Please try again.", error),
        Some(CoreError::Unauthenticated) => "You need to sign in first (nutriscan login <email>).".to_string(),
        Some(_) => format!("{:#}", error),
        None => format!("error: {:#}", error),
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    fn record(id: &str, name: &str, calories: f64) -> FoodRecord {
        FoodRecord {
            id: id.to_string(),
            barcode: Some(format!("75010553000{}", id)),
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

    #[test]
    fn test_food_line() {
        let mut apple = record("1", "Apple", 52.0);
        apple.brand = Some("Orchard".to_string());

        assert_eq!(food_line(&apple, true), "★ Apple (Orchard)  52 kcal  [750105530001]");
    }

    #[test]
    fn test_comparison_marks_best_values() {
        let mut set = ComparisonSet::default();
        set.add(record("1", "Apple", 52.0)).unwrap();
        set.add(record("2", "Banana", 89.0)).unwrap();

        let table = comparison_table(&set);
        let calories = table.lines().find(|l| l.starts_with("Calories")).unwrap();

        assert!(calories.contains("52 kcal *"));
        assert!(!calories.contains("89 kcal *"));
        assert!(!table.contains("Protein"));
    }

    #[test]
    fn test_notice_suggests_retry_for_transient_errors() {
        let outage = anyhow::Error::new(CoreError::ExternalServiceError("timeout".to_string()));
        let missing = anyhow::Error::new(CoreError::NotFound);

        assert!(notice(&outage).ends_with("Please try again."));
        assert_eq!(notice(&missing), "Not found");
    }

    #[test]
    fn test_numbered_terms() {
        assert_eq!(numbered(&[]), "No recent searches.");
        assert_eq!(
            numbered(&["kiwi".to_string(), "pan".to_string()]),
            " 1. kiwi\n 2. pan"
        );
    }
}
