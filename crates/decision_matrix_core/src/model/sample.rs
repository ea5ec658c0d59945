//! Placeholder content for first-run sessions.

use crate::model::project::Project;

const SAMPLE_OPTIONS: &[&str] = &["Option A", "Option B", "Option C"];
const SAMPLE_CRITERIA: &[(&str, f64)] = &[("Cost", 5.0), ("Quality", 4.0), ("Convenience", 3.0)];
/// Row-major scores for `SAMPLE_OPTIONS` x `SAMPLE_CRITERIA`.
const SAMPLE_SCORES: &[[f64; 3]] = &[[4.0, 3.0, 5.0], [2.0, 5.0, 3.0], [3.0, 4.0, 2.0]];

/// Appends sample options, criteria and scores to `project`.
///
/// Existing content is kept; sample rows are appended after it.
pub fn populate_sample(project: &mut Project, neutral: f64) {
    let criterion_ids: Vec<String> = SAMPLE_CRITERIA
        .iter()
        .map(|(name, weight)| project.add_criterion(*name, *weight, neutral))
        .collect();

    for (name, scores) in SAMPLE_OPTIONS.iter().zip(SAMPLE_SCORES) {
        let option_id = project.add_option(*name, neutral);
        for (criterion_id, value) in criterion_ids.iter().zip(scores) {
            project.set_evaluation(&option_id, criterion_id, *value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::populate_sample;
    use crate::model::project::Project;

    #[test]
    fn sample_fills_every_cell() {
        let mut project = Project::new("sample");
        populate_sample(&mut project, 3.0);

        assert_eq!(project.options.len(), 3);
        assert_eq!(project.criteria.len(), 3);
        for option in &project.options {
            for criterion in &project.criteria {
                assert!(project.evaluation(&option.id, &criterion.id).is_some());
            }
        }
    }
}
