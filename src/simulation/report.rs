//! Plain-text rendering of experiment results

use crate::simulation::{
    CapacityEstimate, ExperimentFailure, ExperimentSummary, GrowthPlan, ValidationReport,
};
use crate::types::ExperimentKind;

/// Render the validation comparison table
pub fn render_validation_report(report: &ValidationReport) -> String {
    let mut out = String::new();

    out.push_str(&format!("=== {} ===\n", ExperimentKind::Validation));
    out.push_str(&format!("Observations per column: {}\n\n", report.sample_count));
    out.push_str(&format!(
        "{:<8} {:>16} {:>16} {:>16} {:>16} {:>14} {:>14}\n",
        "Metric", "Ref mean", "Sim mean", "Ref sd", "Sim sd", "|d mean|", "|d sd|"
    ));

    for c in &report.comparisons {
        out.push_str(&format!(
            "{:<8} {:>16.3} {:>16.3} {:>16.3} {:>16.3} {:>14.3} {:>14.3}\n",
            c.metric.code(),
            c.reference.mean,
            c.simulated.mean,
            c.reference.std_dev,
            c.simulated.std_dev,
            c.mean_difference,
            c.std_dev_difference,
        ));
    }

    out
}

/// Render one averaged capacity estimate
pub fn render_capacity_estimate(estimate: &CapacityEstimate) -> String {
    let mut out = String::new();

    out.push_str(&format!("=== {} ===\n", ExperimentKind::AnnualCapacity));
    out.push_str(&format!("Target output: {}\n", estimate.target));
    out.push_str(&format!("Search step: {} factories\n", estimate.step));
    for (index, run) in estimate.runs.iter().enumerate() {
        out.push_str(&format!(
            "  Run {:>2}: {} factories, {} units ({} iterations)\n",
            index + 1,
            run.factories,
            run.output,
            run.iterations
        ));
    }
    out.push_str(&format!(
        "Average over {} runs: {:.1} factories producing {:.0} units\n",
        estimate.runs.len(),
        estimate.mean_factories,
        estimate.mean_output
    ));

    out
}

/// Render the yearly growth plan
pub fn render_growth_plan(plan: &GrowthPlan) -> String {
    let mut out = String::new();

    out.push_str(&format!("=== {} ===\n", ExperimentKind::GrowthPlan));
    out.push_str(&format!(
        "Starting production: {} units, growth {:.2}% per year\n",
        plan.base_total,
        plan.growth_rate * 100.0
    ));

    for year in &plan.years {
        out.push_str(&format!(
            "  Year {}: {:.1} new factories for {} extra units (total {})\n",
            year.year, year.estimate.mean_factories, year.target, year.cumulative_total
        ));
    }
    out.push_str(&format!("Factories built over the plan: {:.1}\n", plan.total_factories()));

    out
}

/// Render the experiments that stopped on an error
pub fn render_failures(failures: &[ExperimentFailure]) -> String {
    let mut out = String::from("=== Failures ===\n");
    for failure in failures {
        out.push_str(&format!(
            "  {} [{}]: {}\n",
            failure.experiment, failure.category, failure.message
        ));
    }
    out
}

/// Render every result in the summary
pub fn render_summary(summary: &ExperimentSummary) -> String {
    let mut sections = Vec::new();

    if let Some(report) = &summary.validation {
        sections.push(render_validation_report(report));
    }
    if let Some(estimate) = &summary.annual_capacity {
        sections.push(render_capacity_estimate(estimate));
    }
    if let Some(plan) = &summary.growth_plan {
        sections.push(render_growth_plan(plan));
    }
    if !summary.failures.is_empty() {
        sections.push(render_failures(&summary.failures));
    }

    let mut out = sections.join("\n");
    out.push_str(&format!(
        "\nSeed: {}  Completed: {}  Elapsed: {:.2}s\n",
        summary.master_seed,
        summary.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
        summary.elapsed_seconds
    ));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::{ObservationSet, SearchConvergence};
    use chrono::Utc;

    #[test]
    fn test_validation_table_lists_every_metric() {
        let literature = ObservationSet::literature();
        let report = ValidationReport::from_observations(&literature, &literature).unwrap();
        let text = render_validation_report(&report);

        assert!(text.contains("Experiment 1"));
        for code in ["CTWB", "STDA", "Ttotal", "Om"] {
            assert!(text.contains(code), "missing {}", code);
        }
    }

    #[test]
    fn test_capacity_report_shows_average() {
        let estimate = CapacityEstimate {
            target: 100,
            step: 2,
            runs: vec![
                SearchConvergence { factories: 4, output: 110, iterations: 3 },
                SearchConvergence { factories: 6, output: 130, iterations: 4 },
            ],
            mean_factories: 5.0,
            mean_output: 120.0,
        };
        let text = render_capacity_estimate(&estimate);
        assert!(text.contains("Average over 2 runs: 5.0 factories producing 120 units"));
    }

    #[test]
    fn test_summary_lists_failures_after_results() {
        let literature = ObservationSet::literature();
        let report = ValidationReport::from_observations(&literature, &literature).unwrap();
        let summary = ExperimentSummary {
            generated_at: Utc::now(),
            master_seed: 7,
            experiments: vec![ExperimentKind::Validation, ExperimentKind::AnnualCapacity],
            validation: Some(report),
            annual_capacity: None,
            growth_plan: None,
            failures: vec![ExperimentFailure {
                experiment: ExperimentKind::AnnualCapacity,
                category: "Search",
                message: "No solution found within bounds".to_string(),
            }],
            elapsed_seconds: 0.5,
        };

        let text = render_summary(&summary);
        let table = text.find("Ttotal").unwrap();
        let failures = text.find("=== Failures ===").unwrap();
        assert!(table < failures);
        assert!(text.contains("[Search]: No solution found within bounds"));
        assert!(text.contains("Seed: 7"));
    }
}
