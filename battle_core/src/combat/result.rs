//! AttemptResult - outcome of an attack against a list of victims

use crate::damage::InteractionResult;
use serde::{Deserialize, Serialize};

/// Result of attempting damage on several victims
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AttemptResult {
    /// One entry per requested victim, in order; `None` for victims that
    /// were never processed
    pub results: Vec<Option<InteractionResult>>,

    // === Flags ===
    /// Index of the victim whose payback ended the attempt
    pub stopped_by: Option<usize>,
    /// A missed callback asked to stop
    pub stopped_on_miss: bool,
}

impl AttemptResult {
    /// Create an empty result sized for `victims` entries
    pub fn new(victims: usize) -> Self {
        AttemptResult {
            results: vec![None; victims],
            stopped_by: None,
            stopped_on_miss: false,
        }
    }

    /// Number of victims actually processed
    pub fn processed(&self) -> usize {
        self.results.iter().filter(|result| result.is_some()).count()
    }

    /// Total damage applied to victims
    pub fn total_victim_damage(&self) -> i32 {
        self.results
            .iter()
            .flatten()
            .filter(|result| result.victim_outcome.applies() && result.victim_outcome.hit)
            .map(|result| result.victim_outcome.damage)
            .sum()
    }

    /// Whether any victim hit the attacker back
    pub fn attacker_retaliated(&self) -> bool {
        self.stopped_by.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::damage::InteractionOutcome;

    #[test]
    fn test_new_is_unprocessed() {
        let result = AttemptResult::new(3);
        assert_eq!(result.results.len(), 3);
        assert_eq!(result.processed(), 0);
        assert!(!result.attacker_retaliated());
    }

    #[test]
    fn test_total_victim_damage_skips_gated() {
        let mut result = AttemptResult::new(2);
        let mut landed = InteractionResult::default();
        landed.victim_outcome = InteractionOutcome {
            damage: 3,
            hit: true,
            ..Default::default()
        };
        let mut gated = landed.clone();
        gated.victim_outcome.skip_damage = true;

        result.results[0] = Some(landed);
        result.results[1] = Some(gated);
        assert_eq!(result.total_victim_damage(), 3);
    }
}
