//! Stage evaluation through the public dispatch API, fed the JSON payloads
//! a caller would submit.

use pretty_assertions::assert_eq;
use qval_core::criteria::AcceptanceCriteria;
use qval_core::enums::EvaluationStatus;
use qval_core::submissions::Submission;
use qval_rules::{EvaluationContext, evaluate_submission, keys};
use rstest::rstest;

fn submission(json: serde_json::Value) -> Submission {
    serde_json::from_value(json).expect("valid submission payload")
}

fn evaluate(json: serde_json::Value) -> qval_rules::EvaluationResult {
    let criteria = AcceptanceCriteria::default();
    let ctx = EvaluationContext::new(&criteria).with_linearity_slope(100.0);
    evaluate_submission(&submission(json), &ctx).expect("dispatch succeeds")
}

#[test]
fn linearity_perfect_calibration_passes() {
    let result = evaluate(serde_json::json!({
        "stage": "linearity",
        "concentrations": [50.0, 75.0, 100.0, 125.0, 150.0],
        "responses": [5000.0, 7500.0, 10000.0, 12500.0, 15000.0]
    }));

    assert_eq!(result.status, EvaluationStatus::Pass);
    assert!((result.metric(keys::SLOPE).unwrap() - 100.0).abs() < 1e-9);
    assert!(result.metric(keys::INTERCEPT).unwrap().abs() < 1e-6);
    assert!((result.metric(keys::R_SQUARED).unwrap() - 1.0).abs() < 1e-12);
    assert_eq!(result.justification.matches("[PASS]").count(), 2);
    assert!(result.justification.contains("; "));
}

#[test]
fn linearity_large_intercept_fails_even_with_good_fit() {
    let result = evaluate(serde_json::json!({
        "stage": "linearity",
        "concentrations": [1.0, 2.0, 3.0, 4.0],
        "responses": [600.0, 700.0, 800.0, 900.0]
    }));

    assert_eq!(result.status, EvaluationStatus::Fail);
    assert!((result.metric(keys::INTERCEPT).unwrap() - 500.0).abs() < 1e-9);
    assert!(result.justification.contains("too high"));
    assert!(result.justification.ends_with("[FAIL]"));
}

#[test]
fn linearity_mismatched_lengths_is_calculation_error() {
    let result = evaluate(serde_json::json!({
        "stage": "linearity",
        "concentrations": [1.0, 2.0, 3.0],
        "responses": [10.0, 20.0]
    }));

    assert_eq!(result.status, EvaluationStatus::Fail);
    assert!(result.metrics.is_empty());
    assert_eq!(
        result.justification,
        "Error in calculation: Invalid data for regression"
    );
}

#[test]
fn accuracy_nominal_level_passes() {
    let result = evaluate(serde_json::json!({
        "stage": "accuracy",
        "level": "100",
        "measured_values": [98.5, 101.2, 99.8, 100.5, 102.1]
    }));

    assert_eq!(result.status, EvaluationStatus::Pass);
    assert!((result.metric(keys::MEAN_RECOVERY).unwrap() - 100.42).abs() < 1e-9);
    assert!((result.metric(keys::RSD).unwrap() - 1.3643).abs() < 1e-3);
    assert_eq!(result.series(keys::RECOVERIES).unwrap().len(), 5);
}

#[test]
fn accuracy_low_level_uses_its_own_nominal() {
    let result = evaluate(serde_json::json!({
        "stage": "accuracy",
        "level": "80",
        "measured_values": [79.0, 80.0, 81.0]
    }));

    assert_eq!(result.status, EvaluationStatus::Pass);
    assert!((result.metric(keys::MEAN_RECOVERY).unwrap() - 100.0).abs() < 1e-9);
}

#[test]
fn accuracy_low_recovery_fails() {
    let result = evaluate(serde_json::json!({
        "stage": "accuracy",
        "level": "120",
        "measured_values": [70.0, 71.0, 72.0]
    }));

    assert_eq!(result.status, EvaluationStatus::Fail);
    assert!(result.justification.contains("outside 80-120%"));
}

#[rstest]
#[case::three_replicates(vec![97.0, 100.0, 103.0], EvaluationStatus::Pass)]
#[case::six_replicates(vec![97.0, 100.0, 103.0, 97.0, 100.0, 103.0], EvaluationStatus::Fail)]
#[case::two_replicates(vec![92.0, 100.0], EvaluationStatus::Pass)]
fn precision_limit_follows_replicate_count(
    #[case] values: Vec<f64>,
    #[case] expected: EvaluationStatus,
) {
    let result = evaluate(serde_json::json!({
        "stage": "precision",
        "replicate_values": values
    }));
    assert_eq!(result.status, expected, "{}", result.justification);
}

#[test]
fn precision_single_value_has_zero_rsd() {
    let result = evaluate(serde_json::json!({
        "stage": "precision",
        "replicate_values": [10.0]
    }));

    assert_eq!(result.status, EvaluationStatus::Pass);
    assert!(result.metric(keys::RSD).unwrap().abs() < f64::EPSILON);
}

#[test]
fn lod_loq_from_blank_noise() {
    let result = evaluate(serde_json::json!({
        "stage": "lod_loq",
        "blank_responses": [1.0, 2.0, 3.0]
    }));

    assert_eq!(result.status, EvaluationStatus::Pass);
    assert!((result.metric(keys::LOD).unwrap() - 0.033).abs() < 1e-12);
    assert!((result.metric(keys::LOQ).unwrap() - 0.1).abs() < 1e-12);
}

#[test]
fn lod_loq_identical_blanks_fail() {
    let result = evaluate(serde_json::json!({
        "stage": "lod_loq",
        "blank_responses": [2.0, 2.0, 2.0]
    }));

    assert_eq!(result.status, EvaluationStatus::Fail);
    assert!(result.justification.contains("invalid"));
}

#[test]
fn custom_criteria_tighten_linearity() {
    let criteria = AcceptanceCriteria {
        r_squared_min: 0.9999,
        ..AcceptanceCriteria::default()
    };
    let payload = submission(serde_json::json!({
        "stage": "linearity",
        "concentrations": [1.0, 2.0, 3.0, 4.0, 5.0],
        "responses": [2.1, 3.9, 6.2, 7.8, 10.1]
    }));

    let default = AcceptanceCriteria::default();
    let lenient = evaluate_submission(&payload, &EvaluationContext::new(&default)).unwrap();
    let strict = evaluate_submission(&payload, &EvaluationContext::new(&criteria)).unwrap();

    assert_eq!(lenient.status, EvaluationStatus::Pass);
    assert_eq!(strict.status, EvaluationStatus::Fail);
}
