//! Report content for an approved project.

use qval_core::entities::{MeasurementSet, Project, ValidationStepRecord};
use qval_core::enums::EvaluationStatus;
use qval_core::responses::{ReportStageLine, ValidationReport};
use qval_rules::keys;

/// Build the report body: project identity, then one line per recorded stage
/// in workflow order with its verdict and derived metrics.
#[must_use]
pub fn assemble_report<'a>(
    project: &Project,
    records: impl IntoIterator<Item = &'a ValidationStepRecord>,
) -> ValidationReport {
    let mut stages: Vec<ReportStageLine> = records
        .into_iter()
        .map(|record| ReportStageLine {
            stage: record.stage,
            label: record.stage.label().to_string(),
            status: EvaluationStatus::from_passed(record.is_passed()),
            metrics: derived_metrics(&record.measurements),
        })
        .collect();
    stages.sort_by_key(|line| line.stage.status().order_index());

    ValidationReport {
        project_id: project.id.clone(),
        title: format!("Validation Report for {}", project.method_name),
        product_name: project.product_name.clone(),
        technique: project.technique,
        guideline: project.guideline,
        reviewer: project.reviewer.clone(),
        qa_approver: project.qa_approver.clone(),
        stages,
    }
}

fn derived_metrics(measurements: &MeasurementSet) -> Vec<(String, f64)> {
    let fields: Vec<(&str, Option<f64>)> = match measurements {
        MeasurementSet::Linearity(data) => vec![
            (keys::SLOPE, data.slope),
            (keys::INTERCEPT, data.intercept),
            (keys::R_SQUARED, data.r_squared),
        ],
        MeasurementSet::Accuracy(data) => {
            vec![(keys::MEAN_RECOVERY, data.mean_recovery), (keys::RSD, data.rsd)]
        }
        MeasurementSet::Precision(data) => vec![(keys::MEAN, data.mean), (keys::RSD, data.rsd)],
        MeasurementSet::LodLoq(data) => vec![
            (keys::SLOPE, Some(data.slope)),
            (keys::LOD, data.lod),
            (keys::LOQ, data.loq),
        ],
    };
    fields
        .into_iter()
        .filter_map(|(name, value)| value.map(|v| (name.to_string(), v)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use qval_core::entities::{LinearityData, PrecisionData};
    use qval_core::enums::{StageKind, Technique};

    fn record(measurements: MeasurementSet, passed: bool) -> ValidationStepRecord {
        ValidationStepRecord {
            project_id: "prj-1".into(),
            stage: measurements.stage(),
            completed: true,
            passed: Some(passed),
            measurements,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn lines_follow_workflow_order() {
        let project = Project::draft("prj-1", "Assay A", "Product A", Technique::Hplc, "ana");
        let precision = record(
            MeasurementSet::Precision(PrecisionData {
                replicate_values: vec![10.0, 10.1],
                mean: Some(10.05),
                rsd: Some(0.7),
            }),
            true,
        );
        let linearity = record(
            MeasurementSet::Linearity(LinearityData {
                concentrations: vec![1.0, 2.0],
                responses: vec![1.0, 2.0],
                slope: Some(1.0),
                intercept: Some(0.0),
                r_squared: None,
            }),
            false,
        );

        let report = assemble_report(&project, [&precision, &linearity]);
        assert_eq!(report.title, "Validation Report for Assay A");
        let stages: Vec<_> = report.stages.iter().map(|line| line.stage).collect();
        assert_eq!(stages, vec![StageKind::Linearity, StageKind::Precision]);
        assert_eq!(report.stages[0].status, EvaluationStatus::Fail);
        assert_eq!(report.stages[0].label, "Linearity");
        // r_squared was never derived
        assert_eq!(report.stages[0].metrics.len(), 2);
    }
}
