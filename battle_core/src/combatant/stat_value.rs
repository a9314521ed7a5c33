//! StatValue - A base value plus the flat modifiers stacked on it

use crate::types::StatKind;
use serde::{Deserialize, Serialize};

/// A battle stat: `base + flat`
///
/// - `base`: The combatant's own value
/// - `flat`: Sum of all modifiers currently applied (statuses, badges)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatValue {
    /// Base value
    pub base: i32,
    /// Sum of all flat modifiers
    #[serde(default)]
    pub flat: i32,
}

impl StatValue {
    /// Create a new StatValue with the given base
    pub fn with_base(base: i32) -> Self {
        StatValue { base, flat: 0 }
    }

    /// Calculate final value: base + flat
    pub fn compute(&self) -> i32 {
        self.base.saturating_add(self.flat)
    }

    /// Add a flat modifier (negative to lower the stat)
    pub fn add_flat(&mut self, value: i32) {
        self.flat = self.flat.saturating_add(value);
    }

    /// Remove a previously added flat modifier
    pub fn remove_flat(&mut self, value: i32) {
        self.flat = self.flat.saturating_sub(value);
    }

    /// Reset to just the base value
    pub fn reset_to_base(&mut self) {
        self.flat = 0;
    }
}

/// The stats the damage pipeline reads
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattleStats {
    pub attack: StatValue,
    pub defense: StatValue,
    /// Flat reduction of every hit; negative values increase damage
    pub damage_reduction: StatValue,
    /// Chance (percent) that this combatant's attacks connect
    pub accuracy: StatValue,
    /// Chance (percent) that this combatant dodges an attack
    pub evasion: StatValue,
}

impl BattleStats {
    pub fn new(attack: i32, defense: i32) -> Self {
        BattleStats {
            attack: StatValue::with_base(attack),
            defense: StatValue::with_base(defense),
            damage_reduction: StatValue::default(),
            accuracy: StatValue::with_base(100),
            evasion: StatValue::default(),
        }
    }

    pub fn get(&self, kind: StatKind) -> &StatValue {
        match kind {
            StatKind::Attack => &self.attack,
            StatKind::Defense => &self.defense,
            StatKind::DamageReduction => &self.damage_reduction,
            StatKind::Accuracy => &self.accuracy,
            StatKind::Evasion => &self.evasion,
        }
    }

    pub fn get_mut(&mut self, kind: StatKind) -> &mut StatValue {
        match kind {
            StatKind::Attack => &mut self.attack,
            StatKind::Defense => &mut self.defense,
            StatKind::DamageReduction => &mut self.damage_reduction,
            StatKind::Accuracy => &mut self.accuracy,
            StatKind::Evasion => &mut self.evasion,
        }
    }

    /// Total attack
    pub fn total_attack(&self) -> i32 {
        self.attack.compute()
    }

    /// Total defense
    pub fn total_defense(&self) -> i32 {
        self.defense.compute()
    }

    /// Clear every modifier
    pub fn reset_to_base(&mut self) {
        self.attack.reset_to_base();
        self.defense.reset_to_base();
        self.damage_reduction.reset_to_base();
        self.accuracy.reset_to_base();
        self.evasion.reset_to_base();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compute_basic() {
        let stat = StatValue::with_base(3);
        assert_eq!(stat.compute(), 3);
    }

    #[test]
    fn test_compute_with_flat() {
        let mut stat = StatValue::with_base(1);
        stat.add_flat(2);
        stat.add_flat(-1);
        assert_eq!(stat.compute(), 2);
    }

    #[test]
    fn test_remove_flat_restores() {
        let mut stat = StatValue::with_base(1);
        stat.add_flat(3);
        stat.remove_flat(3);
        assert_eq!(stat, StatValue::with_base(1));
    }

    #[test]
    fn test_compute_saturates() {
        let mut stat = StatValue::with_base(i32::MAX);
        stat.add_flat(10);
        assert_eq!(stat.compute(), i32::MAX);
    }

    #[test]
    fn test_stats_by_kind() {
        let mut stats = BattleStats::new(2, 1);
        stats.get_mut(StatKind::Defense).add_flat(1);
        assert_eq!(stats.total_defense(), 2);
        assert_eq!(stats.get(StatKind::Accuracy).compute(), 100);

        stats.reset_to_base();
        assert_eq!(stats.total_defense(), 1);
    }
}
