//! Core battle vocabulary shared by every subsystem

use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use std::fmt;
use strum::{EnumIter, IntoEnumIterator};

/// Identifier of a combatant within one battle
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CombatantId(pub String);

impl From<&str> for CombatantId {
    fn from(s: &str) -> Self {
        CombatantId(s.to_string())
    }
}

impl From<String> for CombatantId {
    fn from(s: String) -> Self {
        CombatantId(s)
    }
}

impl fmt::Display for CombatantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Damage element
///
/// Declaration order is priority order: when paybacks are combined the
/// later variant wins.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize, EnumIter,
)]
#[serde(rename_all = "snake_case")]
pub enum Element {
    #[default]
    Normal,
    Sharp,
    Water,
    Fire,
    Explosion,
    Electric,
    Ice,
    Poison,
    Star,
}

impl Element {
    /// Get all elements
    pub fn all() -> impl Iterator<Item = Element> {
        Element::iter()
    }
}

/// Physical attribute of a combatant's body
///
/// Declaration order is priority order (see [`Element`]).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize, EnumIter,
)]
#[serde(rename_all = "snake_case")]
pub enum PhysicalAttribute {
    #[default]
    None,
    Flying,
    Spiked,
    Poisonous,
    Fiery,
    Icy,
    Electrified,
    Explosive,
    Starry,
}

/// How an attack physically touches its target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, EnumIter)]
#[serde(rename_all = "snake_case")]
pub enum ContactType {
    /// No contact at all (projectiles, magic)
    #[default]
    None,
    /// Moves up to the target without touching it
    Approach,
    /// Lands on the target from above (jumps)
    TopDirect,
    /// Strikes the target from the side (hammers, tackles)
    SideDirect,
    /// Grabs onto the target
    Latch,
}

bitflags! {
    /// Set of [`ContactType`]s a payback responds to
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    pub struct ContactTypes: u8 {
        const NONE        = 1 << 0;
        const APPROACH    = 1 << 1;
        const TOP_DIRECT  = 1 << 2;
        const SIDE_DIRECT = 1 << 3;
        const LATCH       = 1 << 4;
    }
}

impl From<ContactType> for ContactTypes {
    fn from(contact: ContactType) -> Self {
        match contact {
            ContactType::None => ContactTypes::NONE,
            ContactType::Approach => ContactTypes::APPROACH,
            ContactType::TopDirect => ContactTypes::TOP_DIRECT,
            ContactType::SideDirect => ContactTypes::SIDE_DIRECT,
            ContactType::Latch => ContactTypes::LATCH,
        }
    }
}

impl ContactTypes {
    /// Direct contact from above or the side
    pub fn direct() -> Self {
        ContactTypes::TOP_DIRECT | ContactTypes::SIDE_DIRECT
    }

    /// Check whether a single contact type is in the set
    pub fn covers(&self, contact: ContactType) -> bool {
        self.contains(ContactTypes::from(contact))
    }
}

/// Qualifier on how contact is made
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, EnumIter)]
#[serde(rename_all = "snake_case")]
pub enum ContactProperty {
    #[default]
    None,
    /// Made from a distance
    Ranged,
    /// Made through a held weapon
    WeaponDirect,
    /// The attacker is shielded while touching
    Protected,
}

bitflags! {
    /// Extra effects an attack has on the victim's body
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    pub struct DamageEffects: u8 {
        const FLIPS_SHELLED   = 1 << 0;
        const REMOVES_WINGS   = 1 << 1;
        const REMOVES_SEGMENT = 1 << 2;
        const FLIPS_CLEFTS    = 1 << 3;
        const SPINS_OUT       = 1 << 4;
    }
}

/// How the victim's body reacted to an element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementInteraction {
    #[default]
    Damage,
    #[serde(rename = "ko")]
    KO,
    Heal,
}

/// Defensive action a victim can perform against an incoming hit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DefensiveAction {
    Guard,
    Superguard,
}

bitflags! {
    /// Mask of [`DefensiveAction`]s
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    pub struct DefensiveActions: u8 {
        const GUARD      = 1 << 0;
        const SUPERGUARD = 1 << 1;
    }
}

impl From<DefensiveAction> for DefensiveActions {
    fn from(action: DefensiveAction) -> Self {
        match action {
            DefensiveAction::Guard => DefensiveActions::GUARD,
            DefensiveAction::Superguard => DefensiveActions::SUPERGUARD,
        }
    }
}

/// Low-health state of a combatant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HealthState {
    #[default]
    Normal,
    Danger,
    Peril,
    Dead,
}

impl HealthState {
    /// Danger or Peril
    pub fn is_low(&self) -> bool {
        matches!(self, HealthState::Danger | HealthState::Peril)
    }
}

/// Stacking modifiers granted by equipped badges
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumIter)]
#[serde(rename_all = "snake_case")]
pub enum BattleModifier {
    /// Doubles incoming damage per stack
    DoublePain,
    /// Divides incoming damage while in Danger or Peril
    LastStand,
    /// Extra defense whenever a defensive action succeeds
    DamageDodge,
}

/// Category of moves that can be disabled independently
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, EnumIter)]
#[serde(rename_all = "snake_case")]
pub enum MoveCategory {
    Jump,
    Hammer,
    Item,
    Special,
    Tactics,
}

/// Battle stat touched by status effects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumIter)]
#[serde(rename_all = "snake_case")]
pub enum StatKind {
    Attack,
    Defense,
    DamageReduction,
    Accuracy,
    Evasion,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_element_priority_order() {
        assert!(Element::Star > Element::Fire);
        assert!(Element::Normal < Element::Sharp);
        assert_eq!(Element::all().count(), 9);
    }

    #[test]
    fn test_contact_types_cover() {
        let direct = ContactTypes::direct();
        assert!(direct.covers(ContactType::TopDirect));
        assert!(direct.covers(ContactType::SideDirect));
        assert!(!direct.covers(ContactType::None));
        assert!(!direct.covers(ContactType::Latch));
    }

    #[test]
    fn test_health_state_is_low() {
        assert!(HealthState::Danger.is_low());
        assert!(HealthState::Peril.is_low());
        assert!(!HealthState::Normal.is_low());
        assert!(!HealthState::Dead.is_low());
    }

    #[test]
    fn test_element_serialization() {
        let json = serde_json::to_string(&Element::Explosion).unwrap();
        assert_eq!(json, "\"explosion\"");
    }
}
