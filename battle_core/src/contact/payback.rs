//! Payback - retaliation dealt back to an attacker that makes bad contact

use super::ContactVerdict;
use crate::status::StatusChance;
use crate::types::{ContactProperty, ContactType, ContactTypes, Element, PhysicalAttribute};
use serde::{Deserialize, Serialize};

/// How much of the dealt damage comes back to the attacker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaybackKind {
    /// A fixed amount
    #[default]
    Constant,
    /// Half of the damage dealt, rounded down
    Half,
    /// All of the damage dealt (computed as two halves)
    Full,
}

impl PaybackKind {
    /// Merge two kinds: Full dominates, two Halves make a Full
    pub fn merge(self, other: PaybackKind) -> PaybackKind {
        match (self, other) {
            (PaybackKind::Full, _) | (_, PaybackKind::Full) => PaybackKind::Full,
            (PaybackKind::Half, PaybackKind::Half) => PaybackKind::Full,
            (PaybackKind::Half, _) | (_, PaybackKind::Half) => PaybackKind::Half,
            (PaybackKind::Constant, PaybackKind::Constant) => PaybackKind::Constant,
        }
    }
}

/// A retaliation effect carried by a combatant
///
/// `Default` is the neutral descriptor: combining it with any other
/// descriptor yields that descriptor unchanged.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PaybackDescriptor {
    #[serde(default)]
    pub kind: PaybackKind,
    /// Physical attribute this payback comes from (Spiked, Electrified...)
    #[serde(default)]
    pub attribute: PhysicalAttribute,
    /// Element of the retaliation damage
    #[serde(default)]
    pub element: Element,
    /// Contact types that trigger this payback
    #[serde(default)]
    pub contact_types: ContactTypes,
    /// Contact properties that trigger this payback (empty = any)
    #[serde(default)]
    pub contact_properties: Vec<ContactProperty>,
    /// Verdict when the attacker lacks the matching attribute
    #[serde(default)]
    pub verdict: ContactVerdict,
    /// Verdict when the attacker has the same attribute itself
    #[serde(default)]
    pub same_attribute_verdict: ContactVerdict,
    /// Flat damage; added on top of Half and Full paybacks
    #[serde(default)]
    pub damage: i32,
    /// Statuses inflicted on the attacker
    #[serde(default)]
    pub statuses: Vec<StatusChance>,
}

impl PaybackDescriptor {
    /// Create a payback for an attribute that responds to direct contact
    pub fn new(
        kind: PaybackKind,
        attribute: PhysicalAttribute,
        element: Element,
        verdict: ContactVerdict,
        same_attribute_verdict: ContactVerdict,
        damage: i32,
    ) -> Self {
        PaybackDescriptor {
            kind,
            attribute,
            element,
            contact_types: ContactTypes::direct(),
            contact_properties: Vec::new(),
            verdict,
            same_attribute_verdict,
            damage,
            statuses: Vec::new(),
        }
    }

    /// Restrict the contact types that trigger this payback
    pub fn with_contact_types(mut self, contact_types: ContactTypes) -> Self {
        self.contact_types = contact_types;
        self
    }

    /// Restrict the contact properties that trigger this payback
    pub fn with_contact_properties(mut self, properties: Vec<ContactProperty>) -> Self {
        self.contact_properties = properties;
        self
    }

    /// Add a status inflicted on the attacker
    pub fn with_status(mut self, status: StatusChance) -> Self {
        self.statuses.push(status);
        self
    }

    /// Whether this payback responds to a contact type
    pub fn covers_contact(&self, contact: ContactType) -> bool {
        self.contact_types.covers(contact)
    }

    /// Whether this payback responds to a contact property
    pub fn covers_property(&self, property: ContactProperty) -> bool {
        self.contact_properties.is_empty() || self.contact_properties.contains(&property)
    }

    /// Damage dealt back given the damage the attack dealt
    ///
    /// - Constant: `max(damage, min)`
    /// - Half: `max(floor(dealt / 2) + damage, min)`
    /// - Full: `max(floor(dealt / 2) * 2 + damage, min)`
    ///
    /// Full is computed from two halves, so odd values lose one point.
    pub fn payback_damage(&self, dealt: i32, min: i32) -> i32 {
        let half = dealt.div_euclid(2);
        let total = match self.kind {
            PaybackKind::Constant => self.damage,
            PaybackKind::Half => half.saturating_add(self.damage),
            PaybackKind::Full => half.saturating_mul(2).saturating_add(self.damage),
        };
        total.max(min)
    }

    /// Merge another payback into this one
    ///
    /// Kinds upgrade, element/attribute/verdicts take the higher priority,
    /// damage sums, contact sets union and statuses concatenate.
    pub fn combine(mut self, other: &PaybackDescriptor) -> PaybackDescriptor {
        self.kind = self.kind.merge(other.kind);
        self.attribute = self.attribute.max(other.attribute);
        self.element = self.element.max(other.element);
        self.contact_types |= other.contact_types;
        for property in &other.contact_properties {
            if !self.contact_properties.contains(property) {
                self.contact_properties.push(*property);
            }
        }
        self.verdict = self.verdict.max(other.verdict);
        self.same_attribute_verdict = self.same_attribute_verdict.max(other.same_attribute_verdict);
        self.damage = self.damage.saturating_add(other.damage);
        self.statuses.extend(other.statuses.iter().cloned());
        self
    }

    /// Reduce a list of paybacks into one
    ///
    /// Returns `None` for an empty list.
    pub fn combine_all<'a>(
        paybacks: impl IntoIterator<Item = &'a PaybackDescriptor>,
    ) -> Option<PaybackDescriptor> {
        let mut iter = paybacks.into_iter();
        let first = iter.next()?.clone();
        Some(iter.fold(first, |acc, payback| acc.combine(payback)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::status::{StatusCatalog, StatusKind};

    fn half(element: Element) -> PaybackDescriptor {
        PaybackDescriptor::new(
            PaybackKind::Half,
            PhysicalAttribute::None,
            element,
            ContactVerdict::PartialSuccess,
            ContactVerdict::PartialSuccess,
            0,
        )
    }

    #[test]
    fn test_constant_payback_damage() {
        let mut payback = half(Element::Normal);
        payback.kind = PaybackKind::Constant;
        payback.damage = 3;
        assert_eq!(payback.payback_damage(10, 1), 3);

        payback.damage = 0;
        assert_eq!(payback.payback_damage(10, 1), 1);
    }

    #[test]
    fn test_half_payback_damage() {
        let mut payback = half(Element::Normal);
        assert_eq!(payback.payback_damage(5, 1), 2);
        assert_eq!(payback.payback_damage(1, 1), 1);

        payback.damage = 2;
        assert_eq!(payback.payback_damage(6, 1), 5);
    }

    #[test]
    fn test_full_payback_rounds_down_odd_damage() {
        let mut payback = half(Element::Normal);
        payback.kind = PaybackKind::Full;
        assert_eq!(payback.payback_damage(5, 1), 4);
        assert_eq!(payback.payback_damage(6, 1), 6);
        assert_eq!(payback.payback_damage(0, 1), 1);
    }

    #[test]
    fn test_kind_merge() {
        use PaybackKind::*;
        assert_eq!(Half.merge(Half), Full);
        assert_eq!(Constant.merge(Half), Half);
        assert_eq!(Half.merge(Constant), Half);
        assert_eq!(Constant.merge(Constant), Constant);
        assert_eq!(Full.merge(Constant), Full);
        assert_eq!(Half.merge(Full), Full);
    }

    #[test]
    fn test_two_halves_combine_to_full() {
        let combined = PaybackDescriptor::combine_all([&half(Element::Fire), &half(Element::Ice)]).unwrap();
        assert_eq!(combined.kind, PaybackKind::Full);
        assert_eq!(combined.element, Element::Ice);
    }

    #[test]
    fn test_combine_sums_and_unions() {
        let catalog = StatusCatalog::with_defaults();
        let mut a = half(Element::Fire)
            .with_contact_types(ContactTypes::TOP_DIRECT)
            .with_contact_properties(vec![ContactProperty::None]);
        a.damage = 1;
        a.attribute = PhysicalAttribute::Fiery;
        if let Some(burn) = catalog.create(StatusKind::Burn) {
            a = a.with_status(StatusChance::new(100, burn));
        }

        let mut b = PaybackDescriptor::new(
            PaybackKind::Constant,
            PhysicalAttribute::Spiked,
            Element::Sharp,
            ContactVerdict::Failure,
            ContactVerdict::Success,
            2,
        )
        .with_contact_types(ContactTypes::SIDE_DIRECT)
        .with_contact_properties(vec![ContactProperty::WeaponDirect]);
        if let Some(poison) = catalog.create(StatusKind::Poison) {
            b = b.with_status(StatusChance::new(50, poison));
        }

        let combined = a.clone().combine(&b);
        assert_eq!(combined.kind, PaybackKind::Half);
        assert_eq!(combined.damage, 3);
        assert_eq!(combined.contact_types, ContactTypes::direct());
        assert_eq!(
            combined.contact_properties,
            vec![ContactProperty::None, ContactProperty::WeaponDirect]
        );
        assert_eq!(combined.attribute, PhysicalAttribute::Fiery);
        assert_eq!(combined.element, Element::Fire);
        assert_eq!(combined.verdict, ContactVerdict::Failure);
        assert_eq!(combined.same_attribute_verdict, ContactVerdict::PartialSuccess);
        assert_eq!(combined.statuses.len(), 2);
        assert_eq!(combined.statuses[0].status.kind(), StatusKind::Burn);
        assert_eq!(combined.statuses[1].status.kind(), StatusKind::Poison);
    }

    #[test]
    fn test_default_is_neutral() {
        let payback = half(Element::Water).with_contact_types(ContactTypes::LATCH);
        let combined = PaybackDescriptor::default().combine(&payback);
        assert_eq!(combined, payback);
    }

    #[test]
    fn test_combine_all_empty() {
        assert!(PaybackDescriptor::combine_all(std::iter::empty()).is_none());
    }

    #[test]
    fn test_property_filter() {
        let any = half(Element::Normal);
        assert!(any.covers_property(ContactProperty::Ranged));

        let weapon_only = any.with_contact_properties(vec![ContactProperty::WeaponDirect]);
        assert!(weapon_only.covers_property(ContactProperty::WeaponDirect));
        assert!(!weapon_only.covers_property(ContactProperty::None));
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn kind_strategy() -> impl Strategy<Value = PaybackKind> {
        prop_oneof![
            Just(PaybackKind::Constant),
            Just(PaybackKind::Half),
            Just(PaybackKind::Full),
        ]
    }

    proptest! {
        #[test]
        fn payback_damage_never_below_minimum(
            kind in kind_strategy(),
            dealt in -1000i32..1000,
            damage in -50i32..50,
        ) {
            let payback = PaybackDescriptor { kind, damage, ..Default::default() };
            prop_assert!(payback.payback_damage(dealt, 1) >= 1);
        }

        #[test]
        fn combined_damage_is_sum(damages in proptest::collection::vec(-20i32..20, 1..8)) {
            let paybacks: Vec<PaybackDescriptor> = damages
                .iter()
                .map(|d| PaybackDescriptor { damage: *d, ..Default::default() })
                .collect();
            let combined = PaybackDescriptor::combine_all(&paybacks).unwrap();
            prop_assert_eq!(combined.damage, damages.iter().sum::<i32>());
        }

        #[test]
        fn kind_merge_is_associative(a in kind_strategy(), b in kind_strategy(), c in kind_strategy()) {
            prop_assert_eq!(a.merge(b).merge(c), a.merge(b.merge(c)));
        }
    }
}
