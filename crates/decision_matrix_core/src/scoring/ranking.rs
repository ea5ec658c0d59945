//! Ranking engine.

use crate::model::project::OptionItem;
use crate::scoring::engine::ScoreTable;
use std::collections::BTreeMap;

/// Option annotated with its rounded score and weighted breakdown.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedOption {
    pub id: String,
    pub name: String,
    /// Total score rounded to the nearest integer, halves rounding up.
    pub score: f64,
    pub breakdown: BTreeMap<String, f64>,
}

/// Sorts options by rounded score, descending.
///
/// The sort is stable: options with equal rounded scores keep their input
/// order. Options absent from `scores` rank with score 0 and no breakdown.
pub fn rank_options(options: &[OptionItem], scores: &ScoreTable) -> Vec<RankedOption> {
    let mut ranked: Vec<RankedOption> = options
        .iter()
        .map(|option| {
            let (score, breakdown) = match scores.get(&option.id) {
                Some(result) => (round_half_up(result.total_score), result.breakdown.clone()),
                None => (0.0, BTreeMap::new()),
            };
            RankedOption {
                id: option.id.clone(),
                name: option.name.clone(),
                score,
                breakdown,
            }
        })
        .collect();

    ranked.sort_by(|left, right| right.score.total_cmp(&left.score));
    ranked
}

/// Nearest integer, halves toward positive infinity.
fn round_half_up(value: f64) -> f64 {
    let floor = value.floor();
    if value - floor >= 0.5 {
        floor + 1.0
    } else {
        floor
    }
}

#[cfg(test)]
mod tests {
    use super::{rank_options, round_half_up};
    use crate::model::project::OptionItem;
    use crate::scoring::engine::{OptionScore, ScoreTable};

    fn option(id: &str) -> OptionItem {
        OptionItem {
            id: id.to_string(),
            name: id.to_string(),
        }
    }

    fn table(entries: &[(&str, f64)]) -> ScoreTable {
        entries
            .iter()
            .map(|(id, total)| {
                (
                    id.to_string(),
                    OptionScore {
                        total_score: *total,
                        breakdown: Default::default(),
                    },
                )
            })
            .collect()
    }

    #[test]
    fn rounding_sends_halves_up_for_negative_values_too() {
        assert_eq!(round_half_up(2.5), 3.0);
        assert_eq!(round_half_up(2.4), 2.0);
        assert_eq!(round_half_up(-2.5), -2.0);
    }

    #[test]
    fn rounding_is_exact_at_float_edges() {
        assert_eq!(round_half_up(0.49999999999999994), 0.0);
        assert_eq!(round_half_up(4503599627370497.0), 4503599627370497.0);
        assert_eq!(round_half_up(-0.5000000000000001), -1.0);
    }

    #[test]
    fn equal_rounded_scores_keep_input_order() {
        let options = [option("a"), option("b"), option("c"), option("d")];
        let scores = table(&[("a", 10.2), ("b", 20.0), ("c", 9.6), ("d", 10.0)]);

        let ranked = rank_options(&options, &scores);
        let order: Vec<&str> = ranked.iter().map(|item| item.id.as_str()).collect();
        assert_eq!(order, vec!["b", "a", "c", "d"]);
        assert_eq!(ranked[1].score, 10.0);
    }

    #[test]
    fn unscored_options_rank_as_zero() {
        let ranked = rank_options(&[option("x"), option("y")], &table(&[("y", -1.0)]));
        assert_eq!(ranked[0].id, "x");
        assert_eq!(ranked[0].score, 0.0);
        assert!(ranked[0].breakdown.is_empty());
    }
}
