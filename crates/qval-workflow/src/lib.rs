//! # qval-workflow
//!
//! Drives a project through the validation sequence.
//!
//! - [`machine`]: pure transitions (`start_validation`, `advance`, `approve`)
//!   and the derived `allowed_actions` / `locked_steps` views.
//! - [`ledger`]: [`ProjectLedger`], one project's state plus its single-shot
//!   step records and audit trail. It sequences submit → evaluate → record →
//!   advance and reports precondition violations as [`CoreError`] values.
//! - [`report`]: structured report content for approved projects.
//!
//! [`CoreError`]: qval_core::errors::CoreError

pub mod ledger;
pub mod machine;
pub mod report;

pub use ledger::{LedgerSettings, ProjectLedger, SubmissionOutcome};
pub use machine::{
    StageProgress, WORKFLOW_ORDER, advance, allowed_actions, approve, locked_steps, next_actions,
    start_validation,
};
pub use report::assemble_report;
