//! One project's workflow state, step records and audit trail.
//!
//! The ledger is the contract between the pure core and whatever persists
//! projects: it is loaded from stored state with [`ProjectLedger::restore`],
//! mutated through the operations below, and its records and audit entries
//! are handed back for storage. Mutations take `&mut self`, so submissions to
//! one ledger are serialized; a shared store must still make the
//! "create record if absent" step atomic across ledgers.

use std::collections::BTreeMap;

use chrono::Utc;
use qval_core::audit_detail::{
    ProjectCreatedDetail, ReviewDetail, StageResetDetail, StatusChangedDetail,
    StepSubmittedDetail,
};
use qval_core::criteria::AcceptanceCriteria;
use qval_core::entities::{
    AccuracyData, Actor, AuditEntry, LinearityData, LodLoqData, MeasurementSet, PrecisionData,
    Project, ValidationStepRecord,
};
use qval_core::enums::{AuditAction, ProjectStatus, StageKind, WorkflowAction};
use qval_core::errors::CoreError;
use qval_core::responses::{ValidationReport, WorkflowStateResponse};
use qval_core::submissions::Submission;
use qval_rules::{EvaluationContext, EvaluationResult, evaluate_submission, keys};
use serde::Serialize;
use tracing::{info, warn};

use crate::machine;
use crate::report::assemble_report;

/// Policy knobs for a ledger.
#[derive(Debug, Clone, Default)]
pub struct LedgerSettings {
    pub criteria: AcceptanceCriteria,
    /// Permit `reset_stage` on a failed stage.
    pub allow_stage_reset: bool,
}

/// What a stage submission produced.
#[derive(Debug, Clone, Serialize)]
pub struct SubmissionOutcome {
    pub stage: StageKind,
    pub result: EvaluationResult,
    pub previous_status: ProjectStatus,
    pub status: ProjectStatus,
}

#[derive(Debug, Clone)]
pub struct ProjectLedger {
    project: Project,
    records: BTreeMap<StageKind, ValidationStepRecord>,
    /// Entries logged since the ledger was created or restored.
    audit: Vec<AuditEntry>,
    last_seq: u64,
    settings: LedgerSettings,
}

impl ProjectLedger {
    /// Register a newly created project and log its creation.
    #[must_use]
    pub fn create(project: Project, actor: &Actor, settings: LedgerSettings) -> Self {
        let mut ledger = Self {
            project,
            records: BTreeMap::new(),
            audit: Vec::new(),
            last_seq: 0,
            settings,
        };
        let detail = ProjectCreatedDetail {
            project_name: ledger.project.method_name.clone(),
            product_name: ledger.project.product_name.clone(),
            technique: ledger.project.technique,
            guideline: ledger.project.guideline,
        };
        ledger.log(actor, AuditAction::Create, Some(detail));
        info!(project = %ledger.project.id, "project created");
        ledger
    }

    /// Rebuild a ledger from stored state.
    ///
    /// `last_audit_seq` is the `seq` of the newest persisted audit entry for
    /// the project (0 if none); entries logged afterwards continue from it.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::DuplicateSubmission` if two records share a stage,
    /// or `CoreError::Validation` if a record belongs to another project, its
    /// measurements are for a different stage, or the records do not match
    /// the project's status (a stage behind the status without a passed
    /// record, or a record for a stage the project has not reached).
    pub fn restore(
        project: Project,
        records: impl IntoIterator<Item = ValidationStepRecord>,
        last_audit_seq: u64,
        settings: LedgerSettings,
    ) -> Result<Self, CoreError> {
        let mut by_stage = BTreeMap::new();
        for record in records {
            if record.project_id != project.id {
                return Err(CoreError::Validation(format!(
                    "record for project {} cannot be restored into {}",
                    record.project_id, project.id
                )));
            }
            if record.measurements.stage() != record.stage {
                return Err(CoreError::Validation(format!(
                    "{} record carries {} measurements",
                    record.stage,
                    record.measurements.stage()
                )));
            }
            if by_stage.contains_key(&record.stage) {
                return Err(CoreError::DuplicateSubmission {
                    project_id: project.id.clone(),
                    stage: record.stage,
                });
            }
            by_stage.insert(record.stage, record);
        }
        check_restored_progress(project.status, &by_stage)?;
        Ok(Self {
            project,
            records: by_stage,
            audit: Vec::new(),
            last_seq: last_audit_seq,
            settings,
        })
    }

    #[must_use]
    pub const fn project(&self) -> &Project {
        &self.project
    }

    #[must_use]
    pub const fn status(&self) -> ProjectStatus {
        self.project.status
    }

    #[must_use]
    pub fn record(&self, stage: StageKind) -> Option<&ValidationStepRecord> {
        self.records.get(&stage)
    }

    /// Step records in workflow order.
    pub fn records(&self) -> impl Iterator<Item = &ValidationStepRecord> {
        StageKind::in_order().filter_map(|stage| self.records.get(&stage))
    }

    #[must_use]
    pub fn audit_log(&self) -> &[AuditEntry] {
        &self.audit
    }

    /// Move a draft project into linearity.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidTransition` unless the project is in `Draft`.
    pub fn start_validation(&mut self, actor: &Actor) -> Result<ProjectStatus, CoreError> {
        let next = machine::start_validation(self.status()).inspect_err(|err| {
            warn!(project = %self.project.id, error = %err, "start_validation rejected");
        })?;
        self.set_status(actor, next, Some("Validation started".to_string()));
        Ok(next)
    }

    /// Evaluate a stage submission, record it, and advance the workflow.
    ///
    /// Checks run in order: duplicate record, cross-stage prerequisite, then
    /// the project's current status. Nothing is recorded if any fails.
    ///
    /// # Errors
    ///
    /// - `CoreError::DuplicateSubmission` if the stage already has a record.
    /// - `CoreError::PrerequisiteNotMet` for LOD/LOQ without a passed
    ///   linearity record carrying a slope.
    /// - `CoreError::InvalidTransition` if the project is not at this stage.
    pub fn submit(
        &mut self,
        submission: &Submission,
        actor: &Actor,
    ) -> Result<SubmissionOutcome, CoreError> {
        let stage = submission.stage();
        self.check_submission(stage).inspect_err(|err| {
            warn!(project = %self.project.id, %stage, error = %err, "submission rejected");
        })?;

        let mut ctx = EvaluationContext::new(&self.settings.criteria);
        if let Some(slope) = self.linearity_slope() {
            ctx = ctx.with_linearity_slope(slope);
        }
        let result = evaluate_submission(submission, &ctx)?;
        let passed = result.passed();
        let previous_status = self.status();
        let status = machine::advance(previous_status, stage, passed)?;

        let record = ValidationStepRecord {
            project_id: self.project.id.clone(),
            stage,
            completed: true,
            passed: Some(passed),
            measurements: measurement_set(submission, ctx.linearity_slope, &result),
            created_at: Utc::now(),
        };
        self.records.insert(stage, record);

        info!(
            project = %self.project.id,
            %stage,
            status = %result.status,
            "validation step recorded"
        );
        let detail = StepSubmittedDetail {
            project_name: self.project.method_name.clone(),
            validation_step: stage,
            status: result.status,
            justification: result.justification.clone(),
        };
        self.log(actor, AuditAction::Submit, Some(detail));

        if status != previous_status {
            self.set_status(actor, status, Some(format!("{} passed", stage.label())));
        }

        Ok(SubmissionOutcome {
            stage,
            result,
            previous_status,
            status,
        })
    }

    /// Discard the failed record of the current stage so it can be resubmitted.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidTransition` if resets are disabled, the
    /// project is not at `stage`, or the stage's record is not a failure.
    pub fn reset_stage(
        &mut self,
        stage: StageKind,
        actor: &Actor,
        reason: Option<String>,
    ) -> Result<(), CoreError> {
        let action = format!("reset {stage}");
        let failed = self.record(stage).is_some_and(ValidationStepRecord::is_failed);
        if !self.settings.allow_stage_reset || self.status() != stage.status() || !failed {
            let err = CoreError::invalid_transition(self.status(), action);
            warn!(project = %self.project.id, %stage, error = %err, "reset rejected");
            return Err(err);
        }

        self.records.remove(&stage);
        info!(project = %self.project.id, %stage, "failed stage reset");
        let detail = StageResetDetail {
            validation_step: stage,
            reason,
        };
        self.log(actor, AuditAction::Reset, Some(detail));
        self.touch();
        Ok(())
    }

    /// Record a reviewer's sign-off. The project stays in `Review`.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidTransition` unless the project is in `Review`.
    pub fn review(&mut self, actor: &Actor, comment: Option<String>) -> Result<(), CoreError> {
        if self.status() != ProjectStatus::Review {
            return Err(CoreError::invalid_transition(
                self.status(),
                WorkflowAction::ReviewProject.as_str(),
            ));
        }
        let now = Utc::now();
        self.project.reviewer = Some(actor.username.clone());
        self.project.reviewer_comment.clone_from(&comment);
        self.project.reviewed_at = Some(now);
        self.project.updated_at = now;

        info!(project = %self.project.id, reviewer = %actor.username, "project reviewed");
        let detail = ReviewDetail {
            project_name: self.project.method_name.clone(),
            project_status: self.project.status,
            comment,
        };
        self.log(actor, AuditAction::Review, Some(detail));
        Ok(())
    }

    /// QA approval of a reviewed project.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidTransition` unless the project is in
    /// `Review` with a recorded reviewer.
    pub fn approve(&mut self, actor: &Actor) -> Result<ProjectStatus, CoreError> {
        if self.project.reviewer.is_none() {
            return Err(CoreError::invalid_transition(
                self.status(),
                "approve_project (not reviewed yet)",
            ));
        }
        let next = machine::approve(self.status())?;
        let now = Utc::now();
        self.project.qa_approver = Some(actor.username.clone());
        self.project.approved_at = Some(now);

        let detail = ReviewDetail {
            project_name: self.project.method_name.clone(),
            project_status: next,
            comment: None,
        };
        self.log(actor, AuditAction::Approve, Some(detail));
        self.set_status(actor, next, Some("Project approved".to_string()));
        Ok(next)
    }

    /// Assemble the report of an approved project and mark it generated.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidTransition` unless the project is `Approved`.
    pub fn generate_report(&mut self, actor: &Actor) -> Result<ValidationReport, CoreError> {
        if self.status() != ProjectStatus::Approved {
            return Err(CoreError::invalid_transition(
                self.status(),
                WorkflowAction::GenerateReport.as_str(),
            ));
        }
        let report = assemble_report(&self.project, self.records());
        self.project.report_generated = true;
        self.touch();
        self.log::<()>(actor, AuditAction::Report, None);
        info!(project = %self.project.id, "report generated");
        Ok(report)
    }

    /// Current position, completed stages, next actions and locked steps.
    #[must_use]
    pub fn workflow_state(&self) -> WorkflowStateResponse {
        let current = self.status();
        let current_record = current.stage().and_then(|stage| self.record(stage));
        WorkflowStateResponse {
            current_step: current,
            completed_steps: self
                .records()
                .filter(|record| record.completed)
                .map(|record| record.stage)
                .collect(),
            allowed_next_actions: machine::allowed_actions(current, current_record),
            locked_steps: machine::locked_steps(current),
        }
    }

    fn check_submission(&self, stage: StageKind) -> Result<(), CoreError> {
        if self.records.contains_key(&stage) {
            return Err(CoreError::DuplicateSubmission {
                project_id: self.project.id.clone(),
                stage,
            });
        }
        if stage == StageKind::LodLoq && self.linearity_slope().is_none() {
            return Err(CoreError::prerequisite(
                stage,
                "Linearity must be completed and passed first",
            ));
        }
        if self.status() != stage.status() {
            return Err(CoreError::invalid_transition(
                self.status(),
                WorkflowAction::submit(stage).as_str(),
            ));
        }
        Ok(())
    }

    /// Slope of a passed linearity record.
    fn linearity_slope(&self) -> Option<f64> {
        self.record(StageKind::Linearity)
            .filter(|record| record.is_passed())
            .and_then(|record| record.measurements.slope())
    }

    fn set_status(&mut self, actor: &Actor, to: ProjectStatus, reason: Option<String>) {
        let from = self.project.status;
        self.project.status = to;
        self.touch();
        info!(project = %self.project.id, %from, %to, "status changed");
        self.log(
            actor,
            AuditAction::StatusChanged,
            Some(StatusChangedDetail { from, to, reason }),
        );
    }

    fn touch(&mut self) {
        self.project.updated_at = Utc::now();
    }

    fn log<T: Serialize>(&mut self, actor: &Actor, action: AuditAction, detail: Option<T>) {
        let detail = detail.and_then(|d| match serde_json::to_value(d) {
            Ok(value) => Some(value),
            Err(err) => {
                warn!(project = %self.project.id, %action, error = %err, "audit detail dropped");
                None
            }
        });
        self.last_seq += 1;
        self.audit.push(AuditEntry {
            seq: self.last_seq,
            project_id: self.project.id.clone(),
            actor: actor.username.clone(),
            action,
            detail,
            created_at: Utc::now(),
        });
    }
}

/// Every stage before `status` needs a passed record; none after it may have one.
fn check_restored_progress(
    status: ProjectStatus,
    records: &BTreeMap<StageKind, ValidationStepRecord>,
) -> Result<(), CoreError> {
    let current = status.order_index();
    for (position, stage) in StageKind::in_order().enumerate() {
        let record = records.get(&stage);
        let behind = current.is_some_and(|current| position < current);
        let ahead = current.is_none_or(|current| position > current);
        if behind && !record.is_some_and(ValidationStepRecord::is_passed) {
            return Err(CoreError::Validation(format!(
                "{status} project has no passed {stage} record"
            )));
        }
        if ahead && record.is_some() {
            return Err(CoreError::Validation(format!(
                "{stage} record cannot exist while the project is {status}"
            )));
        }
    }
    Ok(())
}

/// Stored measurements: the raw payload plus the derived metrics.
fn measurement_set(
    submission: &Submission,
    slope: Option<f64>,
    result: &EvaluationResult,
) -> MeasurementSet {
    match submission {
        Submission::Linearity(payload) => MeasurementSet::Linearity(LinearityData {
            concentrations: payload.concentrations.clone(),
            responses: payload.responses.clone(),
            slope: result.metric(keys::SLOPE),
            intercept: result.metric(keys::INTERCEPT),
            r_squared: result.metric(keys::R_SQUARED),
        }),
        Submission::Accuracy(payload) => MeasurementSet::Accuracy(AccuracyData {
            level: payload.level,
            measured_values: payload.measured_values.clone(),
            mean_recovery: result.metric(keys::MEAN_RECOVERY),
            rsd: result.metric(keys::RSD),
        }),
        Submission::Precision(payload) => MeasurementSet::Precision(PrecisionData {
            replicate_values: payload.replicate_values.clone(),
            mean: result.metric(keys::MEAN),
            rsd: result.metric(keys::RSD),
        }),
        Submission::LodLoq(payload) => MeasurementSet::LodLoq(LodLoqData {
            blank_responses: payload.blank_responses.clone(),
            slope: slope.unwrap_or_default(),
            lod: result.metric(keys::LOD),
            loq: result.metric(keys::LOQ),
        }),
    }
}
