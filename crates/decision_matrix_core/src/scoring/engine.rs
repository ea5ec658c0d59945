//! Scoring engine.

use crate::model::project::{Criterion, EvaluationMatrix, OptionItem, Project};
use std::collections::BTreeMap;

/// Weighted result for one option.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OptionScore {
    /// Sum of every breakdown entry.
    pub total_score: f64,
    /// Criterion id -> `evaluation * weight`.
    pub breakdown: BTreeMap<String, f64>,
}

/// Option id -> weighted result.
pub type ScoreTable = BTreeMap<String, OptionScore>;

/// Computes `Σ evaluation(option, criterion) * weight(criterion)` per option.
///
/// Missing cells read as `neutral`.
pub fn compute_scores(
    options: &[OptionItem],
    criteria: &[Criterion],
    evaluations: &EvaluationMatrix,
    neutral: f64,
) -> ScoreTable {
    options
        .iter()
        .map(|option| {
            let row = evaluations.get(&option.id);
            let mut score = OptionScore::default();
            for criterion in criteria {
                let value = row
                    .and_then(|cells| cells.get(&criterion.id))
                    .copied()
                    .unwrap_or(neutral);
                let weighted = value * criterion.weight;
                score.breakdown.insert(criterion.id.clone(), weighted);
                score.total_score += weighted;
            }
            (option.id.clone(), score)
        })
        .collect()
}

/// Scores every option of `project`.
pub fn score_project(project: &Project, neutral: f64) -> ScoreTable {
    compute_scores(
        &project.options,
        &project.criteria,
        &project.evaluations,
        neutral,
    )
}

#[cfg(test)]
mod tests {
    use super::compute_scores;
    use crate::model::project::{Criterion, EvaluationMatrix, OptionItem};
    use crate::scoring::NEUTRAL_SCORE;

    fn option(id: &str) -> OptionItem {
        OptionItem {
            id: id.to_string(),
            name: id.to_uppercase(),
        }
    }

    fn criterion(id: &str, weight: f64) -> Criterion {
        Criterion {
            id: id.to_string(),
            name: id.to_string(),
            weight,
        }
    }

    #[test]
    fn missing_cells_score_as_neutral() {
        let scores = compute_scores(
            &[option("a")],
            &[criterion("c1", 4.0), criterion("c2", 0.5)],
            &EvaluationMatrix::new(),
            NEUTRAL_SCORE,
        );

        let a = &scores["a"];
        assert_eq!(a.breakdown["c1"], 12.0);
        assert_eq!(a.breakdown["c2"], 1.5);
        assert_eq!(a.total_score, 13.5);
    }

    #[test]
    fn total_is_linear_in_weights() {
        let mut evaluations = EvaluationMatrix::new();
        evaluations
            .entry("a".to_string())
            .or_default()
            .insert("c1".to_string(), 4.0);
        evaluations
            .entry("a".to_string())
            .or_default()
            .insert("c2".to_string(), 2.0);

        let scores = compute_scores(
            &[option("a")],
            &[criterion("c1", 5.0), criterion("c2", -2.0)],
            &evaluations,
            NEUTRAL_SCORE,
        );
        assert_eq!(scores["a"].total_score, 4.0 * 5.0 + 2.0 * -2.0);
    }

    #[test]
    fn no_criteria_yields_zero_totals() {
        let scores = compute_scores(
            &[option("a"), option("b")],
            &[],
            &EvaluationMatrix::new(),
            NEUTRAL_SCORE,
        );
        assert_eq!(scores.len(), 2);
        assert_eq!(scores["b"].total_score, 0.0);
        assert!(scores["b"].breakdown.is_empty());
    }
}
