//! Status effects - afflictions with a turn-based lifecycle
//!
//! A [`StatusEffect`] is one engine parameterized by a [`StatusBehavior`].
//! The engine owns the lifecycle (binding, affliction, per-cycle
//! progression, reference-counted suppression, ending) and the behavior
//! owns what the status actually does to its combatant.

mod behavior;
mod catalog;
mod effect;
mod priority;
mod table;

pub use behavior::{BehaviorTick, DisabledCategory, StatShift, StatusBehavior};
pub use catalog::{StatusCatalog, StatusTemplate};
pub use effect::{StatusEffect, StatusPhase, StatusTick};
pub use priority::{ordered_by_priority, status_priority};
pub use table::{Infliction, StatusTable, StatusTickResult};

use serde::{Deserialize, Serialize};
use strum::{EnumIter, IntoEnumIterator};
use thiserror::Error;

/// Every kind of status a combatant can have
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, EnumIter,
    strum::Display,
)]
#[serde(rename_all = "snake_case")]
pub enum StatusKind {
    Allergic,
    Stone,
    Frozen,
    Stop,
    Sleep,
    Paralyzed,
    Immobilized,
    Dizzy,
    Confused,
    Tiny,
    Huge,
    Soft,
    PowerUp,
    PowerDown,
    DefenseUp,
    DefenseDown,
    WaterBlock,
    Dodgy,
    Invisible,
    Electrified,
    Payback,
    HoldFast,
    Charged,
    Fast,
    Slow,
    Poison,
    Burn,
    HpRegen,
    FpRegen,
    NoSkills,
    Lucky,
    Unlucky,
}

impl StatusKind {
    /// Get all status kinds
    pub fn all() -> impl Iterator<Item = StatusKind> {
        StatusKind::iter()
    }

    /// Whether the status helps or hurts its owner
    pub fn alignment(&self) -> StatusAlignment {
        use StatusKind::*;
        match self {
            Allergic | Confused => StatusAlignment::Neutral,
            Huge | PowerUp | DefenseUp | WaterBlock | Dodgy | Invisible | Electrified | Payback
            | HoldFast | Charged | Fast | HpRegen | FpRegen | Lucky => StatusAlignment::Positive,
            Stone | Frozen | Stop | Sleep | Paralyzed | Immobilized | Dizzy | Tiny | Soft
            | PowerDown | DefenseDown | Slow | Poison | Burn | NoSkills | Unlucky => {
                StatusAlignment::Negative
            }
        }
    }
}

/// Informational alignment of a status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusAlignment {
    Neutral,
    Positive,
    Negative,
}

/// Aspect of a status that can be suppressed independently
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, EnumIter)]
#[serde(rename_all = "snake_case")]
pub enum SuppressionKind {
    /// Turns stop counting down
    TurnCount,
    /// The behavior's effects on the combatant are lifted
    Effects,
    /// Visual effects are hidden
    Vfx,
    /// The status icon is hidden
    Icon,
}

impl SuppressionKind {
    pub fn all() -> impl Iterator<Item = SuppressionKind> {
        SuppressionKind::iter()
    }
}

/// A status paired with the percentage chance of inflicting it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusChance {
    /// Base infliction chance (0-100), scaled by the target's susceptibility
    pub chance: i32,
    pub status: StatusEffect,
}

impl StatusChance {
    pub fn new(chance: i32, status: StatusEffect) -> Self {
        StatusChance { chance, status }
    }

    /// Always inflicted unless the target is immune
    pub fn guaranteed(status: StatusEffect) -> Self {
        StatusChance::new(100, status)
    }
}

/// Status lifecycle invariant violations
///
/// These never abort anything; operations log them and leave the status
/// untouched.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StatusError {
    #[error("{0} is not bound to a combatant")]
    NotBound(StatusKind),
    #[error("{0} has already been afflicted")]
    AlreadyAfflicted(StatusKind),
    #[error("{0} is not active")]
    NotActive(StatusKind),
    #[error("{0} has already ended")]
    AlreadyEnded(StatusKind),
    #[error("{kind} is not suppressed by {suppression:?}")]
    NotSuppressed {
        kind: StatusKind,
        suppression: SuppressionKind,
    },
    #[error("{category:?} is already disabled by {kind}")]
    CategoryAlreadyDisabled {
        kind: StatusKind,
        category: crate::types::MoveCategory,
    },
    #[error("cannot refresh {existing} with {incoming}")]
    KindMismatch {
        existing: StatusKind,
        incoming: StatusKind,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_kind_has_alignment() {
        // Exhaustive match; this just exercises it
        let negative = StatusKind::all()
            .filter(|k| k.alignment() == StatusAlignment::Negative)
            .count();
        assert!(negative > 0);
        assert_eq!(StatusKind::Poison.alignment(), StatusAlignment::Negative);
        assert_eq!(StatusKind::Charged.alignment(), StatusAlignment::Positive);
        assert_eq!(StatusKind::Allergic.alignment(), StatusAlignment::Neutral);
    }

    #[test]
    fn test_error_messages() {
        let err = StatusError::NotSuppressed {
            kind: StatusKind::Poison,
            suppression: SuppressionKind::Effects,
        };
        assert_eq!(err.to_string(), "Poison is not suppressed by Effects");
    }
}
