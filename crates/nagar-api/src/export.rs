use axum::{
    Extension,
    extract::State,
    http::header,
    response::IntoResponse,
};
use chrono::Local;

use nagar_types::models::Identity;

use crate::auth::AppState;
use crate::error::ApiError;

/// GET /reports/export. The full report list as a downloadable CSV with a
/// trailing total row, for offline triage. Columns: id, title, category,
/// status, date.
pub async fn export_csv(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
) -> Result<impl IntoResponse, ApiError> {
    if !identity.is_admin() {
        return Err(ApiError::AdminOnly);
    }

    let reports = state.reports.list_all()?;
    let mut csv = String::from("id,title,category,status,date\n");
    for report in &reports {
        csv.push_str(&format!(
            "{},{},{},{},{}\n",
            report.id,
            escape_field(&report.title),
            escape_field(&report.category),
            report.status,
            report.date,
        ));
    }
    csv.push_str(&format!("\ntotal_reports,{}\n", reports.len()));

    let filename = format!("nagar_reports_{}.csv", Local::now().format("%Y%m%d"));
    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", filename),
            ),
        ],
        csv,
    ))
}

/// Quote a field when it contains a delimiter, quote or line break.
fn escape_field(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
