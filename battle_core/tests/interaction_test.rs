//! Integration test: Build combatants -> Configure pipeline -> Attack victims
//!
//! This test validates the damage pipeline end to end through the public API.

use battle_core::combat::{CombatResolver, Roster};
use battle_core::combatant::Combatant;
use battle_core::config::BattleConstants;
use battle_core::contact::{ContactVerdict, PaybackDescriptor, PaybackKind};
use battle_core::damage::{steps, DamagePipeline, InteractionParameters};
use battle_core::defense::{Resistance, Weakness};
use battle_core::events::BattleEvent;
use battle_core::types::{BattleModifier, CombatantId, ContactType, Element, ElementInteraction, PhysicalAttribute};
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn mario() -> Combatant {
    Combatant::new("mario", "Mario", 10, 1, 0).at_position(0, 0.0)
}

fn enemy(id: &str, index: i32) -> Combatant {
    Combatant::new(id, id, 10, 1, 0).at_position(index, 0.0)
}

fn attack(victim: &str, damage: i32, element: Element) -> InteractionParameters {
    InteractionParameters::new("mario", victim, damage, element, ContactType::TopDirect)
}

fn spikes() -> PaybackDescriptor {
    PaybackDescriptor::new(
        PaybackKind::Constant,
        PhysicalAttribute::Spiked,
        Element::Sharp,
        ContactVerdict::Failure,
        ContactVerdict::Failure,
        1,
    )
}

#[test]
fn test_defense_reduces_damage() {
    let mut goomba = enemy("goomba", 1);
    goomba.stats.defense.base = 2;

    let resolver = CombatResolver::default();
    let mut rng = StdRng::seed_from_u64(1);
    let result = resolver.calculate(&attack("goomba", 5, Element::Normal), &mario(), &goomba, &mut rng);

    assert!(result.victim_outcome.hit);
    assert!(result.victim_outcome.applies());
    assert_eq!(result.victim_outcome.damage, 3);
    assert_eq!(result.victim_outcome.interaction, ElementInteraction::Damage);
    assert_eq!(result.contact.verdict, ContactVerdict::Success);
    assert!(!result.attacker_outcome.applies());
}

#[test]
fn test_no_damage_resistance() {
    let mut ember = enemy("ember", 1);
    ember.elements.add_resistance(Element::Fire, Resistance::NoDamage);

    let resolver = CombatResolver::default();
    let mut rng = StdRng::seed_from_u64(2);
    let result = resolver.calculate(&attack("ember", 10, Element::Fire), &mario(), &ember, &mut rng);

    assert_eq!(result.victim_outcome.damage, 0);
    assert_eq!(result.victim_outcome.interaction, ElementInteraction::Damage);
}

#[test]
fn test_weakness_and_resistance_cancel() {
    let mut ember = enemy("ember", 1);
    ember.elements.add_weakness(Element::Ice, Weakness::PlusDamage(3));
    ember.elements.add_resistance(Element::Ice, Resistance::Heal);

    let resolver = CombatResolver::default();
    let mut rng = StdRng::seed_from_u64(3);
    let result = resolver.calculate(&attack("ember", 4, Element::Ice), &mario(), &ember, &mut rng);

    assert_eq!(result.victim_outcome.damage, 4);
    assert_eq!(result.victim_outcome.interaction, ElementInteraction::Damage);
}

#[test]
fn test_double_pain_multiplies() {
    let mut goomba = enemy("goomba", 1);
    goomba.add_modifier(BattleModifier::DoublePain, 2);

    let resolver = CombatResolver::default();
    let mut rng = StdRng::seed_from_u64(4);
    let result = resolver.calculate(&attack("goomba", 3, Element::Normal), &mario(), &goomba, &mut rng);

    assert_eq!(result.victim_outcome.damage, 9);
}

#[test]
fn test_last_stand_rounds_up_in_danger() {
    let mut goomba = enemy("goomba", 1);
    goomba.add_modifier(BattleModifier::LastStand, 1);

    let resolver = CombatResolver::default();
    let mut rng = StdRng::seed_from_u64(5);

    // Full health: no effect
    let result = resolver.calculate(&attack("goomba", 5, Element::Normal), &mario(), &goomba, &mut rng);
    assert_eq!(result.victim_outcome.damage, 5);

    goomba.hp = 4;
    let result = resolver.calculate(&attack("goomba", 5, Element::Normal), &mario(), &goomba, &mut rng);
    assert_eq!(result.victim_outcome.damage, 3);
}

#[test]
fn test_removed_step_is_skipped() {
    let mut goomba = enemy("goomba", 1);
    goomba.add_modifier(BattleModifier::DoublePain, 1);

    let mut pipeline = DamagePipeline::default();
    assert!(pipeline.remove(steps::DOUBLE_PAIN));
    let resolver = CombatResolver::new(pipeline, BattleConstants::default());

    let mut rng = StdRng::seed_from_u64(6);
    let result = resolver.calculate(&attack("goomba", 3, Element::Normal), &mario(), &goomba, &mut rng);
    assert_eq!(result.victim_outcome.damage, 3);
}

#[test]
fn test_retaliation_stops_remaining_victims() {
    let mut spiny = enemy("spiny", 2);
    spiny.add_payback(spikes());

    let mut roster = Roster::with(vec![mario(), enemy("goomba", 1), spiny, enemy("koopa", 3)]);
    let victims: Vec<CombatantId> = vec!["goomba".into(), "spiny".into(), "koopa".into()];

    let resolver = CombatResolver::default();
    let mut events: Vec<BattleEvent> = Vec::new();
    let mut rng = StdRng::seed_from_u64(7);
    let attempt = resolver.attempt_damage_victims_with_rng(
        &mut roster,
        &attack("goomba", 2, Element::Normal),
        &victims,
        |_| true,
        &mut events,
        &mut rng,
    );

    assert!(attempt.results[0].is_some());
    assert!(attempt.results[1].is_some());
    assert!(attempt.results[2].is_none());
    assert_eq!(attempt.stopped_by, Some(1));

    let spiked = attempt.results[1].as_ref().unwrap();
    assert_eq!(spiked.contact.verdict, ContactVerdict::Failure);
    assert!(!spiked.victim_outcome.applies());
    assert!(spiked.attacker_outcome.is_payback);
    assert_eq!(spiked.attacker_outcome.damage, 1);

    assert_eq!(roster.get(&"mario".into()).unwrap().hp, 9);
    assert_eq!(roster.get(&"goomba".into()).unwrap().hp, 8);
    assert_eq!(roster.get(&"spiny".into()).unwrap().hp, 10);
    assert_eq!(roster.get(&"koopa".into()).unwrap().hp, 10);

    assert!(events.contains(&BattleEvent::AttackerRetaliated {
        attacker: "mario".into(),
        victim: "spiny".into(),
        damage: 1,
        killed: false,
    }));
}

#[test]
fn test_contact_exception_ignores_spikes() {
    let mut spiny = enemy("spiny", 1);
    spiny.add_payback(spikes());
    let mut attacker = mario();
    attacker.add_contact_exception(ContactType::TopDirect, PhysicalAttribute::Spiked);

    let resolver = CombatResolver::default();
    let mut rng = StdRng::seed_from_u64(8);
    let result = resolver.calculate(&attack("spiny", 2, Element::Normal), &attacker, &spiny, &mut rng);

    assert_eq!(result.contact.verdict, ContactVerdict::Success);
    assert!(result.victim_outcome.applies());
    assert!(!result.attacker_outcome.applies());
}

#[test]
fn test_missed_callback_decides() {
    let mut ghost = enemy("ghost", 1);
    ghost.stats.evasion.base = 100;
    let mut roster = Roster::with(vec![mario(), ghost, enemy("goomba", 2)]);
    let victims: Vec<CombatantId> = vec!["ghost".into(), "goomba".into()];
    let resolver = CombatResolver::default();

    // Keep going after the miss
    let mut rng = StdRng::seed_from_u64(9);
    let attempt = resolver.attempt_damage_victims_with_rng(
        &mut roster,
        &attack("ghost", 2, Element::Normal),
        &victims,
        |result| !result.victim_outcome.hit,
        &mut (),
        &mut rng,
    );
    assert_eq!(attempt.processed(), 2);
    assert!(!attempt.stopped_on_miss);
    assert_eq!(roster.get(&"goomba".into()).unwrap().hp, 8);

    // Stop on the miss
    let attempt = resolver.attempt_damage_victims_with_rng(
        &mut roster,
        &attack("ghost", 2, Element::Normal),
        &victims,
        |_| false,
        &mut (),
        &mut rng,
    );
    assert_eq!(attempt.processed(), 1);
    assert!(attempt.stopped_on_miss);
    assert_eq!(roster.get(&"goomba".into()).unwrap().hp, 8);
}

#[test]
fn test_constants_from_toml() {
    let constants = BattleConstants::parse(
        r#"
[damage]
min = 1
max = 5
"#,
    )
    .unwrap();
    assert_eq!(constants.payback.min_damage, 1);

    let resolver = CombatResolver::new(DamagePipeline::default(), constants);
    let mut goomba = enemy("goomba", 1);
    goomba.stats.defense.base = 10;

    let mut rng = StdRng::seed_from_u64(10);
    let result = resolver.calculate(&attack("goomba", 2, Element::Normal), &mario(), &goomba, &mut rng);
    assert_eq!(result.victim_outcome.damage, 1);

    let result = resolver.calculate(&attack("goomba", 50, Element::Normal).piercing(), &mario(), &goomba, &mut rng);
    assert_eq!(result.victim_outcome.damage, 5);
}

#[test]
fn test_invalid_constants_rejected() {
    let result = BattleConstants::parse(
        r#"
[damage]
min = 10
max = 5
"#,
    );
    assert!(result.is_err());
}

proptest! {
    #[test]
    fn prop_victim_damage_within_bounds(damage in -200i32..200, defense in -20i32..20, pain in 0i32..4) {
        let mut goomba = enemy("goomba", 1);
        goomba.stats.defense.base = defense;
        goomba.add_modifier(BattleModifier::DoublePain, pain);

        let resolver = CombatResolver::default();
        let mut rng = StdRng::seed_from_u64(11);
        let result = resolver.calculate(&attack("goomba", damage, Element::Normal), &mario(), &goomba, &mut rng);

        let bounds = &resolver.constants.damage;
        prop_assert!(result.victim_outcome.damage >= bounds.min);
        prop_assert!(result.victim_outcome.damage <= bounds.max);
    }
}

fn payback_kind() -> impl Strategy<Value = PaybackKind> {
    prop_oneof![
        Just(PaybackKind::Constant),
        Just(PaybackKind::Half),
        Just(PaybackKind::Full),
    ]
}

proptest! {
    #[test]
    fn prop_retaliation_damage_within_bounds(
        kind in payback_kind(),
        payback in -1_000i32..1_000_000,
        damage in -1_000i32..1_000_000,
        defense in -50i32..50,
    ) {
        let mut spiny = enemy("spiny", 1);
        spiny.stats.defense.base = defense;
        spiny.add_payback(PaybackDescriptor::new(
            kind,
            PhysicalAttribute::Spiked,
            Element::Sharp,
            ContactVerdict::Failure,
            ContactVerdict::Failure,
            payback,
        ));

        let resolver = CombatResolver::default();
        let mut rng = StdRng::seed_from_u64(12);
        let result = resolver.calculate(&attack("spiny", damage, Element::Normal), &mario(), &spiny, &mut rng);

        let bounds = &resolver.constants.damage;
        prop_assert!(result.attacker_outcome.applies());
        prop_assert!(result.attacker_outcome.damage >= bounds.min);
        prop_assert!(result.attacker_outcome.damage <= bounds.max);
    }
}
