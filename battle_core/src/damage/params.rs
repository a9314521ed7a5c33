//! InteractionParameters - the immutable description of one attack

use crate::status::StatusChance;
use crate::types::{
    CombatantId, ContactProperty, ContactType, DamageEffects, DefensiveActions, Element,
};
use serde::{Deserialize, Serialize};

/// Everything the pipeline needs to know about an attack
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InteractionParameters {
    pub attacker: CombatantId,
    pub victim: CombatantId,
    /// Damage before any modifier
    pub damage: i32,
    #[serde(default)]
    pub element: Element,
    /// Ignores the victim's defense
    #[serde(default)]
    pub piercing: bool,
    #[serde(default)]
    pub contact_type: ContactType,
    #[serde(default)]
    pub contact_property: ContactProperty,
    /// Statuses the attack tries to inflict
    #[serde(default)]
    pub statuses: Vec<StatusChance>,
    #[serde(default)]
    pub damage_effects: DamageEffects,
    #[serde(default)]
    pub cannot_miss: bool,
    /// Defensive actions that can't be performed against this attack
    #[serde(default)]
    pub defensive_overrides: DefensiveActions,
}

impl InteractionParameters {
    pub fn new(
        attacker: impl Into<CombatantId>,
        victim: impl Into<CombatantId>,
        damage: i32,
        element: Element,
        contact_type: ContactType,
    ) -> Self {
        InteractionParameters {
            attacker: attacker.into(),
            victim: victim.into(),
            damage,
            element,
            piercing: false,
            contact_type,
            contact_property: ContactProperty::None,
            statuses: Vec::new(),
            damage_effects: DamageEffects::empty(),
            cannot_miss: false,
            defensive_overrides: DefensiveActions::empty(),
        }
    }

    pub fn piercing(mut self) -> Self {
        self.piercing = true;
        self
    }

    pub fn cannot_miss(mut self) -> Self {
        self.cannot_miss = true;
        self
    }

    pub fn with_contact_property(mut self, property: ContactProperty) -> Self {
        self.contact_property = property;
        self
    }

    pub fn with_status(mut self, status: StatusChance) -> Self {
        self.statuses.push(status);
        self
    }

    pub fn with_damage_effects(mut self, effects: DamageEffects) -> Self {
        self.damage_effects = effects;
        self
    }

    pub fn with_defensive_overrides(mut self, overrides: DefensiveActions) -> Self {
        self.defensive_overrides = overrides;
        self
    }

    /// The same attack aimed at another victim
    pub fn for_victim(&self, victim: &CombatantId) -> Self {
        InteractionParameters {
            victim: victim.clone(),
            ..self.clone()
        }
    }
}
