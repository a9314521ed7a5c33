//! Elemental weakness and resistance
//!
//! Each combatant can carry a weakness and a resistance per element. When
//! both are present for the same element they cancel out and the hit is
//! treated as plain damage.
//!
//! Rules:
//! - PlusDamage(n) weakness: damage + n
//! - KO weakness: classification becomes KO
//! - MinusDamage(n) resistance: damage - n
//! - NoDamage resistance: damage becomes the minimum damage constant
//! - Heal resistance: classification becomes Heal

use crate::types::ElementInteraction;
use serde::{Deserialize, Serialize};

/// Weakness to an element
///
/// Variants are ordered by strength so the strongest of several stacked
/// weaknesses is the `max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(tag = "type", content = "amount", rename_all = "snake_case")]
pub enum Weakness {
    #[default]
    None,
    PlusDamage(i32),
    #[serde(rename = "ko")]
    KO,
}

/// Resistance to an element, ordered by strength like [`Weakness`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(tag = "type", content = "amount", rename_all = "snake_case")]
pub enum Resistance {
    #[default]
    None,
    MinusDamage(i32),
    NoDamage,
    Heal,
}

/// The weakness/resistance pair a combatant has for one element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ElementModifiers {
    pub weakness: Weakness,
    pub resistance: Resistance,
}

/// Outcome of applying element modifiers to a damage value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ElementDamage {
    pub interaction: ElementInteraction,
    pub damage: i32,
}

impl ElementModifiers {
    pub fn new(weakness: Weakness, resistance: Resistance) -> Self {
        ElementModifiers {
            weakness,
            resistance,
        }
    }

    /// Whether the weakness and resistance cancel each other
    pub fn cancels(&self) -> bool {
        self.weakness != Weakness::None && self.resistance != Resistance::None
    }

    /// Whether the combatant is weak to the element (after cancellation)
    pub fn is_weak(&self) -> bool {
        self.weakness != Weakness::None && !self.cancels()
    }

    /// Apply these modifiers to an incoming damage amount
    pub fn resolve(&self, damage: i32, min_damage: i32) -> ElementDamage {
        resolve_element_damage(self, damage, min_damage)
    }
}

/// Apply a weakness/resistance pair to a damage amount
pub fn resolve_element_damage(
    modifiers: &ElementModifiers,
    damage: i32,
    min_damage: i32,
) -> ElementDamage {
    let mut result = ElementDamage {
        interaction: ElementInteraction::Damage,
        damage,
    };

    if modifiers.cancels() {
        return result;
    }

    match modifiers.weakness {
        Weakness::None => {}
        Weakness::PlusDamage(amount) => result.damage = result.damage.saturating_add(amount),
        Weakness::KO => result.interaction = ElementInteraction::KO,
    }

    match modifiers.resistance {
        Resistance::None => {}
        Resistance::MinusDamage(amount) => result.damage = result.damage.saturating_sub(amount),
        Resistance::NoDamage => result.damage = min_damage,
        Resistance::Heal => result.interaction = ElementInteraction::Heal,
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_modifiers() {
        let result = resolve_element_damage(&ElementModifiers::default(), 4, 0);
        assert_eq!(result.damage, 4);
        assert_eq!(result.interaction, ElementInteraction::Damage);
    }

    #[test]
    fn test_plus_damage_weakness() {
        let modifiers = ElementModifiers::new(Weakness::PlusDamage(2), Resistance::None);
        let result = modifiers.resolve(3, 0);
        assert_eq!(result.damage, 5);
        assert_eq!(result.interaction, ElementInteraction::Damage);
    }

    #[test]
    fn test_ko_weakness() {
        let modifiers = ElementModifiers::new(Weakness::KO, Resistance::None);
        let result = modifiers.resolve(1, 0);
        assert_eq!(result.damage, 1);
        assert_eq!(result.interaction, ElementInteraction::KO);
    }

    #[test]
    fn test_minus_damage_resistance() {
        let modifiers = ElementModifiers::new(Weakness::None, Resistance::MinusDamage(2));
        assert_eq!(modifiers.resolve(5, 0).damage, 3);
    }

    #[test]
    fn test_no_damage_resistance_zeroes_amount_only() {
        let modifiers = ElementModifiers::new(Weakness::None, Resistance::NoDamage);
        let result = modifiers.resolve(10, 0);
        assert_eq!(result.damage, 0);
        assert_eq!(result.interaction, ElementInteraction::Damage);
    }

    #[test]
    fn test_heal_resistance() {
        let modifiers = ElementModifiers::new(Weakness::None, Resistance::Heal);
        let result = modifiers.resolve(6, 0);
        assert_eq!(result.damage, 6);
        assert_eq!(result.interaction, ElementInteraction::Heal);
    }

    #[test]
    fn test_weakness_and_resistance_cancel() {
        let weaknesses = [Weakness::PlusDamage(3), Weakness::KO];
        let resistances = [
            Resistance::MinusDamage(1),
            Resistance::NoDamage,
            Resistance::Heal,
        ];

        for weakness in weaknesses {
            for resistance in resistances {
                let modifiers = ElementModifiers::new(weakness, resistance);
                let result = modifiers.resolve(7, 0);
                assert_eq!(result.damage, 7, "{weakness:?} / {resistance:?}");
                assert_eq!(result.interaction, ElementInteraction::Damage);
                assert!(!modifiers.is_weak());
            }
        }
    }

    #[test]
    fn test_strength_ordering() {
        assert!(Weakness::KO > Weakness::PlusDamage(50));
        assert!(Weakness::PlusDamage(2) > Weakness::PlusDamage(1));
        assert!(Resistance::Heal > Resistance::NoDamage);
        assert!(Resistance::NoDamage > Resistance::MinusDamage(9));
    }
}
