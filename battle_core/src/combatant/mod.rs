//! Combatant - everything the damage pipeline and statuses read and modify
//!
//! A combatant is plain data plus bookkeeping helpers. Turn order, AI and
//! rendering live outside this crate.

mod properties;
mod stat_value;

pub use properties::{AttributeSet, ElementOverride, ElementTable, StatusProperty};
pub use stat_value::{BattleStats, StatValue};

use crate::config::HealthConstants;
use crate::contact::PaybackDescriptor;
use crate::damage::InteractionOutcome;
use crate::defense::ElementModifiers;
use crate::status::{
    Infliction, StatusEffect, StatusError, StatusKind, StatusTable, StatusTickResult, SuppressionKind,
};
use crate::types::{
    BattleModifier, CombatantId, ContactType, DefensiveAction, Element, ElementInteraction, HealthState,
    MoveCategory, PhysicalAttribute,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A participant in battle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Combatant {
    // === Identity ===
    pub id: CombatantId,
    pub name: String,
    /// Position in the battle lineup
    #[serde(default)]
    pub battle_index: i32,
    /// Vertical position, used to break lineup ties
    #[serde(default)]
    pub position_y: f32,

    // === Resources ===
    pub hp: i32,
    pub max_hp: i32,
    #[serde(default)]
    pub fp: i32,
    #[serde(default)]
    pub max_fp: i32,

    // === Stats ===
    pub stats: BattleStats,
    #[serde(default)]
    pub elements: ElementTable,

    // === Contact ===
    #[serde(default)]
    pub attributes: AttributeSet,
    /// Attributes whose paybacks this combatant ignores, per contact type
    #[serde(default)]
    pub contact_exceptions: HashMap<ContactType, Vec<PhysicalAttribute>>,
    /// Paybacks dealt to attackers, in priority order
    #[serde(default)]
    pub paybacks: Vec<PaybackDescriptor>,
    /// Element this combatant switches to against victims with an attribute
    #[serde(default)]
    pub element_overrides: HashMap<PhysicalAttribute, ElementOverride>,
    /// Flat attack bonus against victims with an attribute
    /// (`PhysicalAttribute::None` applies to every victim)
    #[serde(default)]
    pub strength_bonuses: HashMap<PhysicalAttribute, i32>,

    // === Status bookkeeping ===
    #[serde(default)]
    pub status_properties: HashMap<StatusKind, StatusProperty>,
    #[serde(default)]
    pub invincible: i32,
    #[serde(default)]
    pub incapacitated: i32,
    #[serde(default)]
    pub disabled_categories: HashMap<MoveCategory, i32>,
    /// Extra (or fewer) turns per phase cycle
    #[serde(default)]
    pub turn_modifier: i32,
    /// Stack counts of badge-derived modifiers
    #[serde(default)]
    pub modifiers: HashMap<BattleModifier, i32>,

    /// Defensive action timed for the incoming hit
    #[serde(default)]
    pub defensive_input: Option<DefensiveAction>,

    #[serde(default)]
    statuses: StatusTable,
}

/// What happened when an outcome was applied to a combatant
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DamageReport {
    pub hp_lost: i32,
    pub hp_restored: i32,
    pub killed: bool,
    /// Statuses afflicted or refreshed
    pub statuses: Vec<StatusKind>,
}

impl Combatant {
    /// Create a combatant at full health
    pub fn new(
        id: impl Into<CombatantId>,
        name: impl Into<String>,
        max_hp: i32,
        attack: i32,
        defense: i32,
    ) -> Self {
        Combatant {
            id: id.into(),
            name: name.into(),
            battle_index: 0,
            position_y: 0.0,
            hp: max_hp,
            max_hp,
            fp: 0,
            max_fp: 0,
            stats: BattleStats::new(attack, defense),
            elements: ElementTable::new(),
            attributes: AttributeSet::new(),
            contact_exceptions: HashMap::new(),
            paybacks: Vec::new(),
            element_overrides: HashMap::new(),
            strength_bonuses: HashMap::new(),
            status_properties: HashMap::new(),
            invincible: 0,
            incapacitated: 0,
            disabled_categories: HashMap::new(),
            turn_modifier: 0,
            modifiers: HashMap::new(),
            defensive_input: None,
            statuses: StatusTable::new(),
        }
    }

    /// Set the FP pool, starting full
    pub fn with_fp(mut self, max_fp: i32) -> Self {
        self.max_fp = max_fp;
        self.fp = max_fp;
        self
    }

    /// Set the lineup position
    pub fn at_position(mut self, battle_index: i32, position_y: f32) -> Self {
        self.battle_index = battle_index;
        self.position_y = position_y;
        self
    }

    // === Health ===

    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }

    pub fn health_state(&self, health: &HealthConstants) -> HealthState {
        if self.hp <= 0 {
            HealthState::Dead
        } else if self.hp <= health.peril_threshold {
            HealthState::Peril
        } else if self.hp <= health.danger_threshold {
            HealthState::Danger
        } else {
            HealthState::Normal
        }
    }

    /// Lose HP, returning how much was actually lost
    pub fn lose_hp(&mut self, amount: i32) -> i32 {
        let lost = amount.max(0).min(self.hp.max(0));
        self.hp -= lost;
        lost
    }

    /// Restore HP up to the maximum, returning how much was restored
    pub fn heal_hp(&mut self, amount: i32) -> i32 {
        let restored = amount.max(0).min((self.max_hp - self.hp).max(0));
        self.hp += restored;
        restored
    }

    /// Restore FP up to the maximum, returning how much was restored
    pub fn restore_fp(&mut self, amount: i32) -> i32 {
        let restored = amount.max(0).min((self.max_fp - self.fp).max(0));
        self.fp += restored;
        restored
    }

    /// Apply one side of an interaction result
    ///
    /// Gated outcomes and misses change nothing. Surviving combatants then
    /// receive the outcome's statuses.
    pub fn take_damage(&mut self, outcome: &InteractionOutcome) -> DamageReport {
        let mut report = DamageReport::default();
        if outcome.skip_damage || !outcome.hit {
            return report;
        }

        match outcome.interaction {
            ElementInteraction::Damage => report.hp_lost = self.lose_hp(outcome.damage),
            ElementInteraction::KO => report.hp_lost = self.lose_hp(self.hp),
            ElementInteraction::Heal => report.hp_restored = self.heal_hp(outcome.damage),
        }
        report.killed = report.hp_lost > 0 && !self.is_alive();

        if self.is_alive() {
            for chance in &outcome.statuses {
                let kind = chance.status.kind();
                if self.afflict_status(chance.status.clone()).is_ok() {
                    report.statuses.push(kind);
                }
            }
        }

        tracing::debug!(
            combatant = %self.id,
            hp_lost = report.hp_lost,
            hp_restored = report.hp_restored,
            hp = self.hp,
            "damage applied"
        );
        report
    }

    // === Counters ===

    pub fn is_invincible(&self) -> bool {
        self.invincible > 0
    }

    pub fn is_incapacitated(&self) -> bool {
        self.incapacitated > 0
    }

    pub fn modifier_count(&self, modifier: BattleModifier) -> i32 {
        self.modifiers.get(&modifier).copied().unwrap_or(0)
    }

    pub fn add_modifier(&mut self, modifier: BattleModifier, count: i32) {
        *self.modifiers.entry(modifier).or_insert(0) += count;
    }

    pub fn remove_modifier(&mut self, modifier: BattleModifier, count: i32) {
        if let Some(current) = self.modifiers.get_mut(&modifier) {
            *current -= count;
            if *current <= 0 {
                self.modifiers.remove(&modifier);
            }
        }
    }

    pub fn disable_category(&mut self, category: MoveCategory) {
        *self.disabled_categories.entry(category).or_insert(0) += 1;
    }

    pub fn enable_category(&mut self, category: MoveCategory) {
        match self.disabled_categories.get_mut(&category) {
            Some(count) if *count > 1 => *count -= 1,
            Some(_) => {
                self.disabled_categories.remove(&category);
            }
            None => tracing::warn!(combatant = %self.id, category = ?category, "enabling a category that isn't disabled"),
        }
    }

    pub fn is_category_disabled(&self, category: MoveCategory) -> bool {
        self.disabled_categories.contains_key(&category)
    }

    // === Elements ===

    pub fn element_modifiers(&self, element: Element) -> ElementModifiers {
        self.elements.modifiers(element)
    }

    /// Grant an element override against an attribute
    ///
    /// Granting the same element again stacks its count.
    pub fn add_element_override(&mut self, attribute: PhysicalAttribute, element: Element) {
        match self.element_overrides.get_mut(&attribute) {
            Some(existing) if existing.element == element => existing.count += 1,
            _ => {
                self.element_overrides
                    .insert(attribute, ElementOverride { element, count: 1 });
            }
        }
    }

    pub fn remove_element_override(&mut self, attribute: PhysicalAttribute) {
        if let Some(existing) = self.element_overrides.get_mut(&attribute) {
            existing.count -= 1;
            if existing.count <= 0 {
                self.element_overrides.remove(&attribute);
            }
        }
    }

    /// The override for the victim's highest priority matching attribute
    pub fn element_override_against(&self, victim_attributes: &[PhysicalAttribute]) -> Option<ElementOverride> {
        victim_attributes
            .iter()
            .find_map(|attribute| self.element_overrides.get(attribute).copied())
    }

    /// Total flat strength bonus against a victim's attributes
    pub fn strength_bonus_against(&self, victim_attributes: &[PhysicalAttribute]) -> i32 {
        let general = self
            .strength_bonuses
            .get(&PhysicalAttribute::None)
            .copied()
            .unwrap_or(0);
        victim_attributes
            .iter()
            .filter(|attribute| **attribute != PhysicalAttribute::None)
            .filter_map(|attribute| self.strength_bonuses.get(attribute))
            .fold(general, |total, bonus| total.saturating_add(*bonus))
    }

    // === Contact ===

    pub fn attribute_list(&self) -> Vec<PhysicalAttribute> {
        self.attributes.to_vec()
    }

    pub fn add_contact_exception(&mut self, contact: ContactType, attribute: PhysicalAttribute) {
        self.contact_exceptions.entry(contact).or_default().push(attribute);
    }

    pub fn contact_exceptions_for(&self, contact: ContactType) -> &[PhysicalAttribute] {
        self.contact_exceptions
            .get(&contact)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn add_payback(&mut self, payback: PaybackDescriptor) {
        self.paybacks.push(payback);
    }

    /// Remove the first payback equal to `payback`
    pub fn remove_payback(&mut self, payback: &PaybackDescriptor) -> bool {
        match self.paybacks.iter().position(|existing| existing == payback) {
            Some(index) => {
                self.paybacks.remove(index);
                true
            }
            None => {
                tracing::warn!(combatant = %self.id, "removing a payback that isn't present");
                false
            }
        }
    }

    // === Status properties ===

    pub fn status_property(&self, kind: StatusKind) -> StatusProperty {
        self.status_properties.get(&kind).copied().unwrap_or_default()
    }

    pub fn status_property_mut(&mut self, kind: StatusKind) -> &mut StatusProperty {
        self.status_properties.entry(kind).or_default()
    }

    /// Susceptibility percentage for a kind
    pub fn status_susceptibility(&self, kind: StatusKind, default: i32) -> i32 {
        self.status_property(kind).susceptibility.unwrap_or(default)
    }

    pub fn is_immune(&self, kind: StatusKind) -> bool {
        self.status_property(kind).is_immune()
    }

    // === Statuses ===
    //
    // The table is moved out while it runs so status behaviors can
    // modify the rest of the combatant.

    pub fn has_status(&self, kind: StatusKind) -> bool {
        self.statuses.contains(kind)
    }

    pub fn status(&self, kind: StatusKind) -> Option<&StatusEffect> {
        self.statuses.get(kind)
    }

    /// Active status kinds, highest priority first
    pub fn ordered_statuses(&self) -> Vec<StatusKind> {
        self.statuses.ordered_kinds()
    }

    pub fn afflict_status(&mut self, status: StatusEffect) -> Result<Infliction, StatusError> {
        let mut table = std::mem::take(&mut self.statuses);
        let result = table.afflict(status, self);
        self.statuses = table;
        result
    }

    pub fn remove_status(&mut self, kind: StatusKind) -> Option<StatusEffect> {
        let mut table = std::mem::take(&mut self.statuses);
        let removed = table.remove(kind, self);
        self.statuses = table;
        removed
    }

    pub fn suppress_status(&mut self, kind: StatusKind, suppression: SuppressionKind) -> Result<(), StatusError> {
        let mut table = std::mem::take(&mut self.statuses);
        let result = table.suppress(kind, suppression, self);
        self.statuses = table;
        result
    }

    pub fn unsuppress_status(&mut self, kind: StatusKind, suppression: SuppressionKind) -> Result<(), StatusError> {
        let mut table = std::mem::take(&mut self.statuses);
        let result = table.unsuppress(kind, suppression, self);
        self.statuses = table;
        result
    }

    /// Run one phase cycle of every status
    pub fn tick_statuses(&mut self) -> StatusTickResult {
        let mut table = std::mem::take(&mut self.statuses);
        let result = table.tick_all(self);
        self.statuses = table;
        result
    }

    /// End every status, e.g. when the battle is over
    pub fn end_all_statuses(&mut self) -> Vec<StatusKind> {
        let mut table = std::mem::take(&mut self.statuses);
        let ended = table.end_all(self);
        self.statuses = table;
        ended
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::status::{StatusCatalog, StatusChance};
    use crate::types::StatKind;

    fn goomba() -> Combatant {
        Combatant::new("goomba", "Goomba", 10, 1, 0)
    }

    #[test]
    fn test_health_state() {
        let health = HealthConstants::default();
        let mut goomba = goomba();
        assert_eq!(goomba.health_state(&health), HealthState::Normal);
        goomba.hp = 5;
        assert_eq!(goomba.health_state(&health), HealthState::Danger);
        goomba.hp = 1;
        assert_eq!(goomba.health_state(&health), HealthState::Peril);
        goomba.hp = 0;
        assert_eq!(goomba.health_state(&health), HealthState::Dead);
    }

    #[test]
    fn test_hp_bounds() {
        let mut goomba = goomba();
        assert_eq!(goomba.lose_hp(15), 10);
        assert_eq!(goomba.hp, 0);
        assert_eq!(goomba.heal_hp(25), 10);
        assert_eq!(goomba.hp, 10);
        assert_eq!(goomba.lose_hp(-3), 0);
    }

    #[test]
    fn test_take_damage_kinds() {
        let mut goomba = goomba();
        let mut outcome = InteractionOutcome {
            damage: 3,
            hit: true,
            ..Default::default()
        };
        assert_eq!(goomba.take_damage(&outcome).hp_lost, 3);

        outcome.interaction = ElementInteraction::Heal;
        assert_eq!(goomba.take_damage(&outcome).hp_restored, 3);

        outcome.interaction = ElementInteraction::KO;
        let report = goomba.take_damage(&outcome);
        assert!(report.killed);
        assert_eq!(goomba.hp, 0);
    }

    #[test]
    fn test_take_damage_gated_or_missed() {
        let mut goomba = goomba();
        let gated = InteractionOutcome {
            damage: 3,
            hit: true,
            skip_damage: true,
            ..Default::default()
        };
        assert_eq!(goomba.take_damage(&gated), DamageReport::default());

        let missed = InteractionOutcome {
            damage: 3,
            ..Default::default()
        };
        assert_eq!(goomba.take_damage(&missed), DamageReport::default());
        assert_eq!(goomba.hp, 10);
    }

    #[test]
    fn test_take_damage_afflicts_statuses() {
        let catalog = StatusCatalog::with_defaults();
        let mut goomba = goomba();
        let outcome = InteractionOutcome {
            damage: 1,
            hit: true,
            statuses: vec![StatusChance::guaranteed(catalog.create(StatusKind::Sleep).unwrap())],
            ..Default::default()
        };
        let report = goomba.take_damage(&outcome);
        assert_eq!(report.statuses, vec![StatusKind::Sleep]);
        assert!(goomba.has_status(StatusKind::Sleep));
        assert!(goomba.is_incapacitated());
    }

    #[test]
    fn test_element_override_stacks() {
        let mut mario = goomba();
        mario.add_element_override(PhysicalAttribute::Icy, Element::Fire);
        mario.add_element_override(PhysicalAttribute::Icy, Element::Fire);
        let found = mario
            .element_override_against(&[PhysicalAttribute::Flying, PhysicalAttribute::Icy])
            .unwrap();
        assert_eq!(found.element, Element::Fire);
        assert_eq!(found.count, 2);

        mario.remove_element_override(PhysicalAttribute::Icy);
        mario.remove_element_override(PhysicalAttribute::Icy);
        assert!(mario.element_override_against(&[PhysicalAttribute::Icy]).is_none());
    }

    #[test]
    fn test_strength_bonus_against() {
        let mut mario = goomba();
        mario.strength_bonuses.insert(PhysicalAttribute::None, 1);
        mario.strength_bonuses.insert(PhysicalAttribute::Flying, 2);
        assert_eq!(mario.strength_bonus_against(&[]), 1);
        assert_eq!(mario.strength_bonus_against(&[PhysicalAttribute::Flying]), 3);
    }

    #[test]
    fn test_modifier_counts() {
        let mut mario = goomba();
        mario.add_modifier(BattleModifier::DoublePain, 2);
        assert_eq!(mario.modifier_count(BattleModifier::DoublePain), 2);
        mario.remove_modifier(BattleModifier::DoublePain, 2);
        assert_eq!(mario.modifier_count(BattleModifier::DoublePain), 0);
    }

    #[test]
    fn test_status_round_trip_through_combatant() {
        let catalog = StatusCatalog::with_defaults();
        let mut mario = goomba();
        mario.afflict_status(catalog.create(StatusKind::DefenseUp).unwrap()).unwrap();
        assert_eq!(mario.stats.get(StatKind::Defense).compute(), 1);

        mario.suppress_status(StatusKind::DefenseUp, SuppressionKind::Effects).unwrap();
        assert_eq!(mario.stats.get(StatKind::Defense).compute(), 0);
        mario.unsuppress_status(StatusKind::DefenseUp, SuppressionKind::Effects).unwrap();
        assert_eq!(mario.stats.get(StatKind::Defense).compute(), 1);

        assert!(mario.remove_status(StatusKind::DefenseUp).is_some());
        assert_eq!(mario.stats.get(StatKind::Defense).compute(), 0);
        assert!(!mario.has_status(StatusKind::DefenseUp));
    }
}
