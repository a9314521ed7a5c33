//! Reference-counted combatant properties
//!
//! Statuses and badges add and remove these properties independently, so
//! every one of them is counted rather than stored as a flag.

use crate::defense::{ElementModifiers, Resistance, Weakness};
use crate::types::{Element, PhysicalAttribute};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Counted set of physical attributes
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeSet {
    counts: HashMap<PhysicalAttribute, u32>,
}

impl AttributeSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one reference to an attribute
    pub fn add(&mut self, attribute: PhysicalAttribute) {
        *self.counts.entry(attribute).or_insert(0) += 1;
    }

    /// Remove one reference to an attribute
    ///
    /// Returns false if the attribute wasn't present.
    pub fn remove(&mut self, attribute: PhysicalAttribute) -> bool {
        match self.counts.get_mut(&attribute) {
            Some(count) if *count > 1 => {
                *count -= 1;
                true
            }
            Some(_) => {
                self.counts.remove(&attribute);
                true
            }
            None => {
                tracing::warn!(attribute = ?attribute, "removing physical attribute that isn't present");
                false
            }
        }
    }

    pub fn contains(&self, attribute: PhysicalAttribute) -> bool {
        self.counts.contains_key(&attribute)
    }

    /// Distinct attributes, highest priority first
    pub fn to_vec(&self) -> Vec<PhysicalAttribute> {
        let mut attributes: Vec<PhysicalAttribute> = self.counts.keys().copied().collect();
        attributes.sort_by(|a, b| b.cmp(a));
        attributes
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

/// Stacked weaknesses and resistances per element
///
/// The effective modifier for an element is the strongest entry of each
/// stack.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementTable {
    #[serde(default)]
    weaknesses: HashMap<Element, Vec<Weakness>>,
    #[serde(default)]
    resistances: HashMap<Element, Vec<Resistance>>,
}

impl ElementTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_weakness(&mut self, element: Element, weakness: Weakness) {
        self.weaknesses.entry(element).or_default().push(weakness);
    }

    /// Remove one matching weakness entry
    pub fn remove_weakness(&mut self, element: Element, weakness: Weakness) -> bool {
        remove_entry(&mut self.weaknesses, element, &weakness)
    }

    pub fn add_resistance(&mut self, element: Element, resistance: Resistance) {
        self.resistances.entry(element).or_default().push(resistance);
    }

    /// Remove one matching resistance entry
    pub fn remove_resistance(&mut self, element: Element, resistance: Resistance) -> bool {
        remove_entry(&mut self.resistances, element, &resistance)
    }

    /// Effective weakness for an element
    pub fn weakness(&self, element: Element) -> Weakness {
        self.weaknesses
            .get(&element)
            .and_then(|stack| stack.iter().max().copied())
            .unwrap_or_default()
    }

    /// Effective resistance for an element
    pub fn resistance(&self, element: Element) -> Resistance {
        self.resistances
            .get(&element)
            .and_then(|stack| stack.iter().max().copied())
            .unwrap_or_default()
    }

    /// Weakness/resistance pair for an element
    pub fn modifiers(&self, element: Element) -> ElementModifiers {
        ElementModifiers::new(self.weakness(element), self.resistance(element))
    }
}

fn remove_entry<T: PartialEq>(table: &mut HashMap<Element, Vec<T>>, element: Element, value: &T) -> bool {
    let Some(stack) = table.get_mut(&element) else {
        return false;
    };
    let Some(index) = stack.iter().position(|entry| entry == value) else {
        return false;
    };
    stack.remove(index);
    if stack.is_empty() {
        table.remove(&element);
    }
    true
}

/// Element an attacker switches to against a physical attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementOverride {
    pub element: Element,
    /// How many sources grant this override
    pub count: i32,
}

/// Per-status-kind properties of a combatant
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusProperty {
    /// Susceptibility percentage; `None` falls back to the configured default
    #[serde(default)]
    pub susceptibility: Option<i32>,
    /// Extra turns added to statuses of this kind when inflicted
    #[serde(default)]
    pub additional_duration: i32,
    /// Number of sources granting immunity
    #[serde(default)]
    pub immunity: i32,
}

impl StatusProperty {
    pub fn is_immune(&self) -> bool {
        self.immunity > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attribute_reference_counting() {
        let mut attributes = AttributeSet::new();
        attributes.add(PhysicalAttribute::Electrified);
        attributes.add(PhysicalAttribute::Electrified);

        assert!(attributes.remove(PhysicalAttribute::Electrified));
        assert!(attributes.contains(PhysicalAttribute::Electrified));
        assert!(attributes.remove(PhysicalAttribute::Electrified));
        assert!(!attributes.contains(PhysicalAttribute::Electrified));
        assert!(!attributes.remove(PhysicalAttribute::Electrified));
    }

    #[test]
    fn test_attributes_sorted_by_priority() {
        let mut attributes = AttributeSet::new();
        attributes.add(PhysicalAttribute::Flying);
        attributes.add(PhysicalAttribute::Starry);
        attributes.add(PhysicalAttribute::Spiked);
        assert_eq!(
            attributes.to_vec(),
            vec![PhysicalAttribute::Starry, PhysicalAttribute::Spiked, PhysicalAttribute::Flying]
        );
    }

    #[test]
    fn test_strongest_weakness_wins() {
        let mut table = ElementTable::new();
        table.add_weakness(Element::Fire, Weakness::PlusDamage(1));
        table.add_weakness(Element::Fire, Weakness::PlusDamage(3));
        assert_eq!(table.weakness(Element::Fire), Weakness::PlusDamage(3));

        table.remove_weakness(Element::Fire, Weakness::PlusDamage(3));
        assert_eq!(table.weakness(Element::Fire), Weakness::PlusDamage(1));

        table.remove_weakness(Element::Fire, Weakness::PlusDamage(1));
        assert_eq!(table.weakness(Element::Fire), Weakness::None);
    }

    #[test]
    fn test_modifiers_pair() {
        let mut table = ElementTable::new();
        table.add_resistance(Element::Ice, Resistance::NoDamage);
        let modifiers = table.modifiers(Element::Ice);
        assert_eq!(modifiers.weakness, Weakness::None);
        assert_eq!(modifiers.resistance, Resistance::NoDamage);
        assert_eq!(table.modifiers(Element::Fire), ElementModifiers::default());
    }
}
