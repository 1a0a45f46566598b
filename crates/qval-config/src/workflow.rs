//! Workflow policy.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct WorkflowConfig {
    /// Let a failed stage be reset and resubmitted. Off by default: a failed
    /// stage blocks the project.
    #[serde(default)]
    pub allow_stage_reset: bool,
}
