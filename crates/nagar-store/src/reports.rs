use std::path::{Path, PathBuf};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use anyhow::{Result, anyhow};
use chrono::{Local, NaiveDate};
use tracing::{error, info};

use nagar_types::models::{Report, ReportStatus};

use crate::persist;

pub const REPORTS_FILE: &str = "reports_db.json";

/// Caller-supplied fields for a new report. Everything else (id, status,
/// date) is assigned by the store.
#[derive(Debug, Clone)]
pub struct NewReport {
    pub title: String,
    pub description: String,
    pub category: String,
    pub subcategory: String,
    pub division: String,
    pub district: String,
    pub lat: f64,
    pub lon: f64,
    pub submitted_by: Option<String>,
}

/// All reports, kept as a JSON array in insertion order. A fresh
/// deployment starts from two sample rows so the dashboard is never blank;
/// the seed stays in memory only until the first mutation writes it out.
pub struct ReportStore {
    path: PathBuf,
    reports: RwLock<Vec<Report>>,
}

impl ReportStore {
    pub fn open(dir: &Path) -> Self {
        let path = dir.join(REPORTS_FILE);
        let reports: Vec<Report> = persist::load_or(&path, seed_reports());
        info!("Report store loaded from {} ({} reports)", path.display(), reports.len());
        Self {
            path,
            reports: RwLock::new(reports),
        }
    }

    /// The full working set, oldest first.
    pub fn list_all(&self) -> Result<Vec<Report>> {
        Ok(self.read()?.clone())
    }

    /// File a new report. The id is one past the current maximum (1 for an
    /// empty store), the status starts at Pending and the date is today.
    pub fn add(&self, new: NewReport) -> Result<u64> {
        let mut reports = self.write()?;
        let id = reports.iter().map(|r| r.id).max().unwrap_or(0) + 1;
        reports.push(Report {
            id,
            title: new.title,
            category: new.category,
            subcategory: new.subcategory,
            status: ReportStatus::Pending,
            division: new.division,
            district: new.district,
            lat: new.lat,
            lon: new.lon,
            date: Local::now().date_naive(),
            description: new.description,
            submitted_by: new.submitted_by,
        });
        if let Err(e) = persist::save(&self.path, &*reports) {
            error!("Failed to save report data: {}", e);
        }
        Ok(id)
    }

    /// Overwrite the status of report `id`. Returns false, with no side
    /// effects at all, when no such report exists.
    pub fn update_status(&self, id: u64, status: ReportStatus) -> Result<bool> {
        let mut reports = self.write()?;
        let Some(report) = reports.iter_mut().find(|r| r.id == id) else {
            return Ok(false);
        };
        report.status = status;
        if let Err(e) = persist::save(&self.path, &*reports) {
            error!("Failed to save report data: {}", e);
        }
        Ok(true)
    }

    /// Reports filed by `username`, in insertion order. An empty username
    /// matches nothing, anonymous rows included.
    pub fn by_user(&self, username: &str) -> Result<Vec<Report>> {
        if username.is_empty() {
            return Ok(Vec::new());
        }
        Ok(self
            .read()?
            .iter()
            .filter(|r| r.submitted_by.as_deref() == Some(username))
            .cloned()
            .collect())
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Vec<Report>>> {
        self.reports
            .read()
            .map_err(|e| anyhow!("report store lock poisoned: {}", e))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Vec<Report>>> {
        self.reports
            .write()
            .map_err(|e| anyhow!("report store lock poisoned: {}", e))
    }
}

/// The two sample rows a fresh deployment starts with.
fn seed_reports() -> Vec<Report> {
    vec![
        Report {
            id: 1,
            title: "Broken Road at GEC".to_string(),
            category: "Road & Infrastructure Issues".to_string(),
            subcategory: "Potholes".to_string(),
            status: ReportStatus::Pending,
            division: "Chittagong".to_string(),
            district: "Chittagong".to_string(),
            lat: 22.3569,
            lon: 91.8232,
            date: NaiveDate::from_ymd_opt(2025, 12, 18).unwrap(),
            description: "Large potholes near GEC circle causing traffic jams.".to_string(),
            submitted_by: None,
        },
        Report {
            id: 2,
            title: "Garbage Pile in Nasirabad".to_string(),
            category: "Garbage & Sanitation".to_string(),
            subcategory: "Overflowing garbage bins".to_string(),
            status: ReportStatus::Resolved,
            division: "Chittagong".to_string(),
            district: "Chittagong".to_string(),
            lat: 22.3650,
            lon: 91.8200,
            date: NaiveDate::from_ymd_opt(2025, 12, 19).unwrap(),
            description: "Garbage has not been collected for a week.".to_string(),
            submitted_by: None,
        },
    ]
}
