//! Lead entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use nurture_core::types::Timestamp;

/// A row from the `leads` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Lead {
    pub id: String,
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for upserting a lead. Fields left as `None` are not overwritten
/// on an existing row.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpsertLead {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

/// One row of the leads overview listing: the lead joined with its
/// latest invite and cached course state, plus a storage-side hot flag
/// computed from the same thresholds the evaluator uses.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct LeadOverviewRow {
    pub lead_id: String,
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub invite_sent_at: Option<Timestamp>,
    pub completion_pct: Option<f64>,
    pub current_section: Option<String>,
    pub last_activity_at: Option<Timestamp>,
    pub is_hot: bool,
}
