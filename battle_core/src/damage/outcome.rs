//! Interaction outcomes - the per-side results the pipeline produces

use crate::contact::ContactOutcome;
use crate::status::StatusChance;
use crate::types::{
    CombatantId, ContactProperty, ContactType, DamageEffects, DefensiveActions, Element, ElementInteraction,
};
use serde::{Deserialize, Serialize};

/// Result for one side of an interaction
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InteractionOutcome {
    pub damage: i32,
    pub element: Element,
    pub interaction: ElementInteraction,
    pub contact_type: ContactType,
    pub contact_property: ContactProperty,
    pub piercing: bool,
    /// Statuses that survived their infliction rolls
    pub statuses: Vec<StatusChance>,
    pub hit: bool,
    pub damage_effects: DamageEffects,
    /// Defensive actions performed against this hit
    pub defensive_actions: DefensiveActions,
    /// This is retaliation damage
    pub is_payback: bool,
    /// Don't apply this side at all
    pub skip_damage: bool,
}

impl InteractionOutcome {
    /// Whether this side should be applied to its combatant
    pub fn applies(&self) -> bool {
        !self.skip_damage
    }
}

/// Both sides of a resolved interaction
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InteractionResult {
    pub attacker: CombatantId,
    pub victim: CombatantId,
    pub victim_outcome: InteractionOutcome,
    pub attacker_outcome: InteractionOutcome,
    pub contact: ContactOutcome,
}

impl InteractionResult {
    pub fn new(attacker: CombatantId, victim: CombatantId) -> Self {
        InteractionResult {
            attacker,
            victim,
            ..Default::default()
        }
    }
}
