use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Lifecycle state of a report. Serialized with the human-readable labels
/// that appear in the JSON files and the API ("In Progress", not
/// "in_progress"), so anything else is rejected at the boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReportStatus {
    Pending,
    #[serde(rename = "In Progress")]
    InProgress,
    Resolved,
    Rejected,
}

impl ReportStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::InProgress => "In Progress",
            Self::Resolved => "Resolved",
            Self::Rejected => "Rejected",
        }
    }
}

impl std::fmt::Display for ReportStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A citizen-submitted issue report.
///
/// `submitted_by` is the submitting username, or `None` for anonymous
/// reports. Rows written before the field existed deserialize as `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub id: u64,
    pub title: String,
    pub category: String,
    pub subcategory: String,
    pub status: ReportStatus,
    pub division: String,
    pub district: String,
    pub lat: f64,
    pub lon: f64,
    pub date: NaiveDate,
    pub description: String,
    #[serde(default)]
    pub submitted_by: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    User,
    Admin,
}

/// A registered account as stored in the user file. The username is the
/// enclosing map key, not a field of the record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserRecord {
    pub password_hash: String,
    pub email: String,
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub role: Role,
    #[serde(default)]
    pub created_at: String,
}

/// One persisted login session, keyed by its opaque token in the session
/// file. Sessions never expire; they live until an explicit logout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionRecord {
    pub username: String,
    #[serde(default)]
    pub created_at: String,
}

/// The authenticated caller attached to a request once its token has been
/// verified.
///
/// The administrator is not a row in the user store. It is a dedicated
/// variant, rebuilt from the hardcoded credentials on every login and
/// session check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Identity {
    Admin,
    Registered {
        username: String,
        full_name: String,
        email: String,
        role: Role,
    },
}

impl Identity {
    pub fn username(&self) -> &str {
        match self {
            Self::Admin => "admin",
            Self::Registered { username, .. } => username,
        }
    }

    /// Name used in greetings: the full name when one was provided,
    /// otherwise the username.
    pub fn display_name(&self) -> &str {
        match self {
            Self::Admin => "Administrator",
            Self::Registered {
                full_name,
                username,
                ..
            } => {
                if full_name.is_empty() {
                    username
                } else {
                    full_name
                }
            }
        }
    }

    pub fn role(&self) -> Role {
        match self {
            Self::Admin => Role::Admin,
            Self::Registered { role, .. } => *role,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role() == Role::Admin
    }
}
