//! Administrative divisions and issue categories, embedded at compile time
//! and parsed once on first use. Lookups are exact-match linear scans over
//! a few dozen entries.

use std::sync::LazyLock;

use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct Division {
    division: String,
    latitude: f64,
    longitude: f64,
    districts: Vec<District>,
}

#[derive(Debug, Deserialize)]
struct District {
    name: String,
    latitude: f64,
    longitude: f64,
}

#[derive(Debug, Deserialize)]
struct CategoryEntry {
    category: String,
    subcategories: Vec<String>,
}

static DIVISIONS: LazyLock<Vec<Division>> = LazyLock::new(|| {
    serde_json::from_str(include_str!("../data/divisions.json"))
        .expect("embedded division table is valid JSON")
});

static CATEGORIES: LazyLock<Vec<CategoryEntry>> = LazyLock::new(|| {
    serde_json::from_str(include_str!("../data/categories.json"))
        .expect("embedded category table is valid JSON")
});

/// All division names, in table order.
pub fn divisions() -> Vec<String> {
    DIVISIONS.iter().map(|d| d.division.clone()).collect()
}

/// District names within a division; empty when the division is unknown.
pub fn districts(division: &str) -> Vec<String> {
    DIVISIONS
        .iter()
        .find(|d| d.division == division)
        .map(|d| d.districts.iter().map(|x| x.name.clone()).collect())
        .unwrap_or_default()
}

/// Coordinates of a division's seat, or (None, None) when unknown.
pub fn division_coordinates(division: &str) -> (Option<f64>, Option<f64>) {
    match DIVISIONS.iter().find(|d| d.division == division) {
        Some(d) => (Some(d.latitude), Some(d.longitude)),
        None => (None, None),
    }
}

/// Coordinates of a district within a division, or (None, None) when
/// either half of the pair is unknown.
pub fn district_coordinates(division: &str, district: &str) -> (Option<f64>, Option<f64>) {
    let Some(div) = DIVISIONS.iter().find(|d| d.division == division) else {
        return (None, None);
    };
    match div.districts.iter().find(|d| d.name == district) {
        Some(d) => (Some(d.latitude), Some(d.longitude)),
        None => (None, None),
    }
}

/// Every district name across all divisions, sorted alphabetically.
pub fn all_districts() -> Vec<String> {
    let mut names: Vec<String> = DIVISIONS
        .iter()
        .flat_map(|d| d.districts.iter().map(|x| x.name.clone()))
        .collect();
    names.sort();
    names
}

/// All top-level category names, in table order.
pub fn categories() -> Vec<String> {
    CATEGORIES.iter().map(|c| c.category.clone()).collect()
}

/// Subcategories of a category; empty when the category is unknown.
pub fn subcategories(category: &str) -> Vec<String> {
    CATEGORIES
        .iter()
        .find(|c| c.category == category)
        .map(|c| c.subcategories.clone())
        .unwrap_or_default()
}

/// Every subcategory across all categories, flattened in table order.
pub fn all_subcategories() -> Vec<String> {
    CATEGORIES
        .iter()
        .flat_map(|c| c.subcategories.iter().cloned())
        .collect()
}
