use axum::Json;
use axum::extract::Path;

use nagar_store::reference;
use nagar_types::api::Coordinates;

// Thin read-only wrappers over the embedded lookup tables. Unknown names
// are not errors: lists come back empty and coordinates come back null,
// and the caller decides what to do with that.

/// GET /reference/divisions
pub async fn divisions() -> Json<Vec<String>> {
    Json(reference::divisions())
}

/// GET /reference/divisions/{division}/districts
pub async fn districts(Path(division): Path<String>) -> Json<Vec<String>> {
    Json(reference::districts(&division))
}

/// GET /reference/divisions/{division}/coordinates
pub async fn division_coordinates(Path(division): Path<String>) -> Json<Coordinates> {
    let (lat, lon) = reference::division_coordinates(&division);
    Json(Coordinates { lat, lon })
}

/// GET /reference/divisions/{division}/districts/{district}/coordinates
pub async fn district_coordinates(
    Path((division, district)): Path<(String, String)>,
) -> Json<Coordinates> {
    let (lat, lon) = reference::district_coordinates(&division, &district);
    Json(Coordinates { lat, lon })
}

/// GET /reference/districts
pub async fn all_districts() -> Json<Vec<String>> {
    Json(reference::all_districts())
}

/// GET /reference/categories
pub async fn categories() -> Json<Vec<String>> {
    Json(reference::categories())
}

/// GET /reference/categories/{category}/subcategories
pub async fn subcategories(Path(category): Path<String>) -> Json<Vec<String>> {
    Json(reference::subcategories(&category))
}

/// GET /reference/subcategories
pub async fn all_subcategories() -> Json<Vec<String>> {
    Json(reference::all_subcategories())
}
