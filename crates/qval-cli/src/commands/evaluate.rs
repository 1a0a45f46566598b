use anyhow::{Context, bail};
use qval_config::QvalConfig;
use qval_core::enums::StageKind;
use qval_core::submissions::Submission;
use qval_rules::{EvaluationContext, evaluate_submission};
use serde_json::Value;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::EvaluateArgs;
use crate::commands::read_json;
use crate::output::output;

/// Handle `qval evaluate`.
pub fn handle(args: &EvaluateArgs, config: &QvalConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    let submission = parse_submission(args.stage, read_json(&args.input)?)?;

    let mut ctx = EvaluationContext::new(&config.criteria);
    if let Some(slope) = args.slope {
        ctx = ctx.with_linearity_slope(slope);
    }
    let result = evaluate_submission(&submission, &ctx)?;
    tracing::info!(stage = %args.stage, status = %result.status, "payload evaluated");

    output(&result, flags.format)
}

/// Accept either a bare payload or one already tagged with its stage.
fn parse_submission(stage: StageKind, value: Value) -> anyhow::Result<Submission> {
    let Value::Object(mut map) = value else {
        bail!("{stage} input must be a JSON object");
    };
    match map.get("stage").and_then(Value::as_str) {
        Some(tagged) if tagged != stage.as_str() => {
            bail!("input is tagged as a {tagged} payload, not {stage}")
        }
        Some(_) => {}
        None => {
            map.insert("stage".to_string(), Value::from(stage.as_str()));
        }
    }
    serde_json::from_value(Value::Object(map)).with_context(|| format!("invalid {stage} payload"))
}
