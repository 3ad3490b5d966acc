use axum::{
    Extension, Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use axum_extra::TypedHeader;
use axum_extra::headers::{Authorization, authorization::Bearer};
use serde::Deserialize;
use tracing::info;

use nagar_store::reports::NewReport;
use nagar_types::api::{
    CreateReportRequest, CreateReportResponse, MessageResponse, ReportSummary,
    UpdateStatusRequest,
};
use nagar_types::models::{Identity, Report, ReportStatus};

use crate::auth::{self, AppState};
use crate::error::ApiError;

/// Optional exact-match filters shared by the list and summary endpoints.
/// Absent fields match everything.
#[derive(Debug, Default, Deserialize)]
pub struct ReportFilter {
    pub division: Option<String>,
    pub district: Option<String>,
    pub category: Option<String>,
    pub status: Option<ReportStatus>,
}

impl ReportFilter {
    fn matches(&self, report: &Report) -> bool {
        self.division.as_deref().map_or(true, |d| report.division == d)
            && self.district.as_deref().map_or(true, |d| report.district == d)
            && self.category.as_deref().map_or(true, |c| report.category == c)
            && self.status.map_or(true, |s| report.status == s)
    }
}

/// GET /reports. The full working set in insertion order, optionally
/// narrowed by filters.
pub async fn list_reports(
    State(state): State<AppState>,
    Query(filter): Query<ReportFilter>,
) -> Result<Json<Vec<Report>>, ApiError> {
    let reports = state
        .reports
        .list_all()?
        .into_iter()
        .filter(|r| filter.matches(r))
        .collect();
    Ok(Json(reports))
}

/// GET /reports/summary. Status counts over the (optionally filtered)
/// working set, recomputed per request.
pub async fn summary(
    State(state): State<AppState>,
    Query(filter): Query<ReportFilter>,
) -> Result<Json<ReportSummary>, ApiError> {
    let mut out = ReportSummary::default();
    for report in state.reports.list_all()? {
        if !filter.matches(&report) {
            continue;
        }
        out.total += 1;
        match report.status {
            ReportStatus::Pending => out.pending += 1,
            ReportStatus::InProgress => out.in_progress += 1,
            ReportStatus::Resolved => out.resolved += 1,
            ReportStatus::Rejected => out.rejected += 1,
        }
    }
    Ok(Json(out))
}

/// POST /reports. Authentication is optional: a valid bearer token records
/// the submitter, anything else files anonymously.
pub async fn create_report(
    State(state): State<AppState>,
    bearer: Option<TypedHeader<Authorization<Bearer>>>,
    Json(req): Json<CreateReportRequest>,
) -> Result<impl IntoResponse, ApiError> {
    if req.title.is_empty()
        || req.description.is_empty()
        || req.division.is_empty()
        || req.district.is_empty()
        || req.category.is_empty()
    {
        return Err(ApiError::MissingReportFields);
    }

    let submitted_by = match &bearer {
        Some(TypedHeader(Authorization(b))) => {
            auth::resolve_identity(&state, b.token())?.map(|id| id.username().to_string())
        }
        None => None,
    };

    let id = state.reports.add(NewReport {
        title: req.title,
        description: req.description,
        category: req.category,
        subcategory: req.subcategory,
        division: req.division,
        district: req.district,
        lat: req.lat,
        lon: req.lon,
        submitted_by,
    })?;
    info!("Report #{} filed", id);

    Ok((
        StatusCode::CREATED,
        Json(CreateReportResponse {
            id,
            message: format!("Report #{} submitted successfully!", id),
        }),
    ))
}

/// GET /reports/mine. Reports filed by the authenticated caller, in
/// insertion order.
pub async fn my_reports(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
) -> Result<Json<Vec<Report>>, ApiError> {
    Ok(Json(state.reports.by_user(identity.username())?))
}

/// PUT /reports/{id}/status. Administrators move a report through its
/// lifecycle. Statuses outside the four recognized labels are rejected
/// at deserialization.
pub async fn update_status(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    Extension(identity): Extension<Identity>,
    Json(req): Json<UpdateStatusRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    if !identity.is_admin() {
        return Err(ApiError::AdminOnly);
    }
    if !state.reports.update_status(id, req.status)? {
        return Err(ApiError::ReportNotFound(id));
    }
    info!("Report #{} updated to {}", id, req.status);
    Ok(Json(MessageResponse {
        message: format!("Report #{} updated to {}", id, req.status),
    }))
}
