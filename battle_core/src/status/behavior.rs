//! Status behaviors - what a status actually does to its combatant
//!
//! Every status kind is one of a handful of behaviors with parameters.
//! `apply` and `remove` are exact inverses: the lifecycle calls `apply`
//! on affliction and when effects are unsuppressed, and `remove` on end
//! and when effects are suppressed.

use crate::combatant::Combatant;
use crate::contact::PaybackDescriptor;
use crate::defense::Resistance;
use crate::types::{Element, MoveCategory, PhysicalAttribute, StatKind};
use serde::{Deserialize, Serialize};

use super::StatusKind;

/// A flat change to one battle stat
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatShift {
    pub stat: StatKind,
    pub amount: i32,
}

impl StatShift {
    pub fn new(stat: StatKind, amount: i32) -> Self {
        StatShift { stat, amount }
    }
}

/// A move category disabled for its own number of turns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisabledCategory {
    pub category: MoveCategory,
    pub duration: i32,
    #[serde(default)]
    pub turns_elapsed: i32,
}

impl DisabledCategory {
    pub fn new(category: MoveCategory, duration: i32) -> Self {
        DisabledCategory {
            category,
            duration,
            turns_elapsed: 0,
        }
    }

    pub fn is_expired(&self) -> bool {
        self.duration > 0 && self.turns_elapsed >= self.duration
    }
}

/// Parameterized effect of a status
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StatusBehavior {
    /// Flat stat changes (Power Up, Defense Down, Dodgy...)
    StatShift { shifts: Vec<StatShift> },
    /// Stat changes plus a resistance to one element (Water Block)
    ElementShield {
        #[serde(default)]
        shifts: Vec<StatShift>,
        element: Element,
        resistance: Resistance,
    },
    /// The combatant can't act
    Incapacitate {
        #[serde(default)]
        invincible: bool,
        #[serde(default)]
        attribute: Option<PhysicalAttribute>,
    },
    /// HP lost at the start of every phase cycle
    DamageOverTime { damage: i32, element: Element },
    /// HP/FP restored at the start of every phase cycle
    Regen {
        #[serde(default)]
        hp: i32,
        #[serde(default)]
        fp: i32,
    },
    /// A physical attribute and the payback it carries
    ///
    /// `PhysicalAttribute::None` adds the payback without an attribute.
    Retaliate {
        attribute: PhysicalAttribute,
        payback: PaybackDescriptor,
    },
    /// Immunity to every other status
    Immunity,
    /// Independently timed move categories that can't be used
    DisableMoves { categories: Vec<DisabledCategory> },
    /// Extra or fewer turns per phase cycle
    TurnShift { amount: i32 },
    /// No effect on the combatant's data; handled by other systems
    Marker,
}

/// HP/FP changes from one phase cycle of a behavior
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BehaviorTick {
    pub hp_lost: i32,
    pub hp_restored: i32,
    pub fp_restored: i32,
}

impl StatusBehavior {
    /// Apply this behavior's effects
    pub(crate) fn apply(&self, kind: StatusKind, combatant: &mut Combatant) {
        match self {
            StatusBehavior::StatShift { shifts } => apply_shifts(shifts, combatant),
            StatusBehavior::ElementShield {
                shifts,
                element,
                resistance,
            } => {
                apply_shifts(shifts, combatant);
                combatant.elements.add_resistance(*element, *resistance);
            }
            StatusBehavior::Incapacitate {
                invincible,
                attribute,
            } => {
                combatant.incapacitated += 1;
                if *invincible {
                    combatant.invincible += 1;
                }
                if let Some(attribute) = attribute {
                    combatant.attributes.add(*attribute);
                }
            }
            StatusBehavior::Retaliate { attribute, payback } => {
                if *attribute != PhysicalAttribute::None {
                    combatant.attributes.add(*attribute);
                }
                combatant.paybacks.push(payback.clone());
            }
            StatusBehavior::Immunity => {
                for other in StatusKind::all().filter(|other| *other != kind) {
                    combatant.status_property_mut(other).immunity += 1;
                }
            }
            StatusBehavior::DisableMoves { categories } => {
                for disabled in categories {
                    combatant.disable_category(disabled.category);
                }
            }
            StatusBehavior::TurnShift { amount } => {
                combatant.turn_modifier = combatant.turn_modifier.saturating_add(*amount);
            }
            StatusBehavior::DamageOverTime { .. } | StatusBehavior::Regen { .. } | StatusBehavior::Marker => {}
        }
    }

    /// Reverse [`apply`](Self::apply)
    pub(crate) fn remove(&self, kind: StatusKind, combatant: &mut Combatant) {
        match self {
            StatusBehavior::StatShift { shifts } => remove_shifts(shifts, combatant),
            StatusBehavior::ElementShield {
                shifts,
                element,
                resistance,
            } => {
                remove_shifts(shifts, combatant);
                combatant.elements.remove_resistance(*element, *resistance);
            }
            StatusBehavior::Incapacitate {
                invincible,
                attribute,
            } => {
                combatant.incapacitated -= 1;
                if *invincible {
                    combatant.invincible -= 1;
                }
                if let Some(attribute) = attribute {
                    combatant.attributes.remove(*attribute);
                }
            }
            StatusBehavior::Retaliate { attribute, payback } => {
                if *attribute != PhysicalAttribute::None {
                    combatant.attributes.remove(*attribute);
                }
                combatant.remove_payback(payback);
            }
            StatusBehavior::Immunity => {
                for other in StatusKind::all().filter(|other| *other != kind) {
                    combatant.status_property_mut(other).immunity -= 1;
                }
            }
            StatusBehavior::DisableMoves { categories } => {
                for disabled in categories {
                    combatant.enable_category(disabled.category);
                }
            }
            StatusBehavior::TurnShift { amount } => {
                combatant.turn_modifier = combatant.turn_modifier.saturating_sub(*amount);
            }
            StatusBehavior::DamageOverTime { .. } | StatusBehavior::Regen { .. } | StatusBehavior::Marker => {}
        }
    }

    /// Per-cycle effects
    pub(crate) fn phase_cycle(&self, combatant: &mut Combatant) -> BehaviorTick {
        match self {
            StatusBehavior::DamageOverTime { damage, .. } => BehaviorTick {
                hp_lost: combatant.lose_hp(*damage),
                ..Default::default()
            },
            StatusBehavior::Regen { hp, fp } => BehaviorTick {
                hp_restored: combatant.heal_hp(*hp),
                fp_restored: combatant.restore_fp(*fp),
                ..Default::default()
            },
            _ => BehaviorTick::default(),
        }
    }

    /// Advance behavior-owned turn counters
    ///
    /// Returns true once the behavior has nothing left to do. Only
    /// [`StatusBehavior::DisableMoves`] keeps its own counters: each
    /// category is re-enabled when its turns run out, and the status is
    /// finished once every category has expired.
    pub(crate) fn advance_turns(&mut self, combatant: &mut Combatant, effects_applied: bool) -> bool {
        let StatusBehavior::DisableMoves { categories } = self else {
            return false;
        };

        for disabled in categories.iter_mut() {
            if disabled.duration > 0 {
                disabled.turns_elapsed += 1;
            }
        }
        categories.retain(|disabled| {
            if disabled.is_expired() {
                if effects_applied {
                    combatant.enable_category(disabled.category);
                }
                tracing::debug!(category = ?disabled.category, "move category re-enabled");
                false
            } else {
                true
            }
        });
        categories.is_empty()
    }
}

fn apply_shifts(shifts: &[StatShift], combatant: &mut Combatant) {
    for shift in shifts {
        combatant.stats.get_mut(shift.stat).add_flat(shift.amount);
    }
}

fn remove_shifts(shifts: &[StatShift], combatant: &mut Combatant) {
    for shift in shifts {
        combatant.stats.get_mut(shift.stat).remove_flat(shift.amount);
    }
}
