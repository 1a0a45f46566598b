use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::{Guideline, ProjectStatus, Technique};

/// An assay method under validation.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Project {
    pub id: String,
    pub method_name: String,
    pub product_name: String,
    pub technique: Technique,
    #[serde(default)]
    pub guideline: Guideline,
    #[serde(default)]
    pub status: ProjectStatus,
    pub created_by: String,
    pub reviewer: Option<String>,
    pub reviewer_comment: Option<String>,
    pub reviewed_at: Option<DateTime<Utc>>,
    pub qa_approver: Option<String>,
    pub approved_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub report_generated: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Project {
    /// A new project in `Draft`.
    pub fn draft(
        id: impl Into<String>,
        method_name: impl Into<String>,
        product_name: impl Into<String>,
        technique: Technique,
        created_by: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: id.into(),
            method_name: method_name.into(),
            product_name: product_name.into(),
            technique,
            guideline: Guideline::IchQ2,
            status: ProjectStatus::Draft,
            created_by: created_by.into(),
            reviewer: None,
            reviewer_comment: None,
            reviewed_at: None,
            qa_approver: None,
            approved_at: None,
            report_generated: false,
            created_at: now,
            updated_at: now,
        }
    }
}
