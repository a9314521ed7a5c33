//! Defensive actions - Guard and Superguard
//!
//! Guard: damage - guard_reduction (floored at min damage), statuses
//! blocked, damage effects kept.
//! Superguard: damage becomes min damage, statuses and damage effects
//! cleared, and the attacker is hit back.

use crate::config::BattleConstants;
use crate::contact::{ContactVerdict, PaybackDescriptor, PaybackKind};
use crate::status::StatusChance;
use crate::types::{DamageEffects, DefensiveAction, DefensiveActions, Element, PhysicalAttribute};

/// What a successful defensive action leaves of the incoming hit
///
/// Both actions block every incoming status, so `statuses` is always
/// empty; it replaces the candidate list wholesale.
#[derive(Debug, Clone, PartialEq)]
pub struct DefensiveOutcome {
    pub action: DefensiveAction,
    pub damage: i32,
    pub statuses: Vec<StatusChance>,
    pub damage_effects: DamageEffects,
    /// Retaliation produced by the action
    pub payback: Option<PaybackDescriptor>,
}

/// Resolve the victim's defensive input against an incoming hit
///
/// Returns `None` when no action was performed or the attack forbids it.
pub fn resolve_defensive_action(
    input: Option<DefensiveAction>,
    disallowed: DefensiveActions,
    damage: i32,
    damage_effects: DamageEffects,
    constants: &BattleConstants,
) -> Option<DefensiveOutcome> {
    let action = input?;
    if disallowed.contains(DefensiveActions::from(action)) {
        tracing::trace!(action = ?action, "defensive action not allowed against this attack");
        return None;
    }

    let min = constants.damage.min;
    let outcome = match action {
        DefensiveAction::Guard => DefensiveOutcome {
            action,
            damage: damage.saturating_sub(constants.defense.guard_reduction).max(min),
            statuses: Vec::new(),
            damage_effects,
            payback: None,
        },
        DefensiveAction::Superguard => DefensiveOutcome {
            action,
            damage: min,
            statuses: Vec::new(),
            damage_effects: DamageEffects::empty(),
            payback: Some(superguard_payback(constants)),
        },
    };
    Some(outcome)
}

/// The retaliation a Superguard deals
pub fn superguard_payback(constants: &BattleConstants) -> PaybackDescriptor {
    PaybackDescriptor::new(
        PaybackKind::Constant,
        PhysicalAttribute::None,
        Element::Normal,
        ContactVerdict::Failure,
        ContactVerdict::Failure,
        constants.defense.superguard_payback,
    )
}
