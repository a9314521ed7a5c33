//! The default calculation steps
//!
//! Victim side, then attacker side:
//!
//! | # | Step | Effect |
//! |---|------|--------|
//! | 1 | init | copy parameters into the victim outcome |
//! | 2 | contact_resolve | match the attack against the victim's paybacks |
//! | 3 | element_override | attacker switches element against victim attributes |
//! | 4 | attacker_strength | + attacker strength bonus against the victim |
//! | 5 | element_damage | weakness/resistance |
//! | 6 | damage_reduction | - victim damage reduction |
//! | 7 | check_hit | accuracy vs evasion |
//! | 8 | defensive | Guard/Superguard, then - (defense + damage dodge) |
//! | 9 | double_pain | * (1 + Double Pain) |
//! | 10 | last_stand | ceil(/ (1 + Last Stand)) while in Danger/Peril |
//! | 11 | clamp_victim | clamp to [min, max] |
//! | 12 | victim_status_filter | roll statuses against the victim |
//! | 13 | victim_invincible | invincible victims take 0 |
//! | 14 | victim_contact_gate | Failure: the victim is untouched |
//! | 15 | attacker_payback | retaliation damage |
//! | 16 | clamp_attacker | clamp to [min, max] |
//! | 17 | attacker_status_filter | roll payback statuses against the attacker |
//! | 18 | attacker_invincible | invincible attackers take 0 |
//! | 19 | attacker_contact_gate | Success: no retaliation |

use super::filter::filter_statuses;
use super::outcome::InteractionOutcome;
use super::pipeline::{CalculationStep, InteractionWorking, StepContext};
use crate::contact::{resolve_contact, ContactOutcome, ContactRequest, ContactVerdict, PaybackKind};
use crate::defense::{attempt_hit, resolve_defensive_action};
use crate::types::{BattleModifier, ContactProperty, ContactType, DefensiveActions, ElementInteraction};
use std::sync::Arc;

pub const INIT: &str = "init";
pub const CONTACT_RESOLVE: &str = "contact_resolve";
pub const ELEMENT_OVERRIDE: &str = "element_override";
pub const ATTACKER_STRENGTH: &str = "attacker_strength";
pub const ELEMENT_DAMAGE: &str = "element_damage";
pub const DAMAGE_REDUCTION: &str = "damage_reduction";
pub const CHECK_HIT: &str = "check_hit";
pub const DEFENSIVE: &str = "defensive";
pub const DOUBLE_PAIN: &str = "double_pain";
pub const LAST_STAND: &str = "last_stand";
pub const CLAMP_VICTIM: &str = "clamp_victim";
pub const VICTIM_STATUS_FILTER: &str = "victim_status_filter";
pub const VICTIM_INVINCIBLE: &str = "victim_invincible";
pub const VICTIM_CONTACT_GATE: &str = "victim_contact_gate";
pub const ATTACKER_PAYBACK: &str = "attacker_payback";
pub const CLAMP_ATTACKER: &str = "clamp_attacker";
pub const ATTACKER_STATUS_FILTER: &str = "attacker_status_filter";
pub const ATTACKER_INVINCIBLE: &str = "attacker_invincible";
pub const ATTACKER_CONTACT_GATE: &str = "attacker_contact_gate";

/// The default step list
pub fn default_steps() -> Vec<Arc<dyn CalculationStep>> {
    vec![
        Arc::new(InitStep),
        Arc::new(ContactResolveStep),
        Arc::new(ElementOverrideStep),
        Arc::new(AttackerStrengthStep),
        Arc::new(ElementDamageStep),
        Arc::new(DamageReductionStep),
        Arc::new(CheckHitStep),
        Arc::new(DefensiveStep),
        Arc::new(DoublePainStep),
        Arc::new(LastStandStep),
        Arc::new(ClampVictimStep),
        Arc::new(VictimStatusFilterStep),
        Arc::new(VictimInvincibleStep),
        Arc::new(VictimContactGateStep),
        Arc::new(AttackerPaybackStep),
        Arc::new(ClampAttackerStep),
        Arc::new(AttackerStatusFilterStep),
        Arc::new(AttackerInvincibleStep),
        Arc::new(AttackerContactGateStep),
    ]
}

/// Contact resolution with the victim's paybacks plus any defensive payback
fn resolve_victim_contact(ctx: &StepContext<'_>, working: &InteractionWorking) -> ContactOutcome {
    let mut paybacks = ctx.victim.paybacks.clone();
    if let Some(defensive) = &working.defensive_payback {
        paybacks.push(defensive.clone());
    }
    let attributes = ctx.attacker.attribute_list();
    resolve_contact(&ContactRequest {
        attacker_attributes: &attributes,
        attacker_exceptions: ctx.attacker.contact_exceptions_for(ctx.params.contact_type),
        contact_type: ctx.params.contact_type,
        contact_property: ctx.params.contact_property,
        paybacks: &paybacks,
    })
}

/// `ceil(value / divisor)` for a positive divisor
fn ceil_div(value: i32, divisor: i32) -> i32 {
    value.saturating_add(divisor - 1).div_euclid(divisor)
}

// === Victim side ===

#[derive(Debug, Clone, Copy, Default)]
pub struct InitStep;

impl CalculationStep for InitStep {
    fn name(&self) -> &'static str {
        INIT
    }

    fn calculate(&self, ctx: &mut StepContext<'_>, mut working: InteractionWorking) -> InteractionWorking {
        let params = ctx.params;
        working.result.victim_outcome = InteractionOutcome {
            damage: params.damage,
            element: params.element,
            interaction: ElementInteraction::Damage,
            contact_type: params.contact_type,
            contact_property: params.contact_property,
            piercing: params.piercing,
            statuses: params.statuses.clone(),
            hit: false,
            damage_effects: params.damage_effects,
            defensive_actions: DefensiveActions::empty(),
            is_payback: false,
            skip_damage: false,
        };
        working.result.attacker_outcome = InteractionOutcome::default();
        working
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ContactResolveStep;

impl CalculationStep for ContactResolveStep {
    fn name(&self) -> &'static str {
        CONTACT_RESOLVE
    }

    fn calculate(&self, ctx: &mut StepContext<'_>, mut working: InteractionWorking) -> InteractionWorking {
        working.result.contact = resolve_victim_contact(ctx, &working);
        working
    }
}

/// Applies the attacker's element override for the victim's attributes
///
/// Overriding to the element the attack already had adds the override's
/// stack count when the victim is weak to it.
#[derive(Debug, Clone, Copy, Default)]
pub struct ElementOverrideStep;

impl CalculationStep for ElementOverrideStep {
    fn name(&self) -> &'static str {
        ELEMENT_OVERRIDE
    }

    fn calculate(&self, ctx: &mut StepContext<'_>, mut working: InteractionWorking) -> InteractionWorking {
        let attributes = ctx.victim.attribute_list();
        let Some(element_override) = ctx.attacker.element_override_against(&attributes) else {
            return working;
        };

        let victim = working.victim();
        let original = victim.element;
        victim.element = element_override.element;
        if element_override.element == original && ctx.victim.element_modifiers(original).is_weak() {
            victim.damage = victim.damage.saturating_add(element_override.count);
        }
        working
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct AttackerStrengthStep;

impl CalculationStep for AttackerStrengthStep {
    fn name(&self) -> &'static str {
        ATTACKER_STRENGTH
    }

    fn calculate(&self, ctx: &mut StepContext<'_>, mut working: InteractionWorking) -> InteractionWorking {
        let bonus = ctx.attacker.strength_bonus_against(&ctx.victim.attribute_list());
        let victim = working.victim();
        victim.damage = victim.damage.saturating_add(bonus);
        working
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ElementDamageStep;

impl CalculationStep for ElementDamageStep {
    fn name(&self) -> &'static str {
        ELEMENT_DAMAGE
    }

    fn calculate(&self, ctx: &mut StepContext<'_>, mut working: InteractionWorking) -> InteractionWorking {
        let victim = working.victim();
        let resolved = ctx
            .victim
            .element_modifiers(victim.element)
            .resolve(victim.damage, ctx.constants.damage.min);
        victim.damage = resolved.damage;
        victim.interaction = resolved.interaction;
        working
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct DamageReductionStep;

impl CalculationStep for DamageReductionStep {
    fn name(&self) -> &'static str {
        DAMAGE_REDUCTION
    }

    fn calculate(&self, ctx: &mut StepContext<'_>, mut working: InteractionWorking) -> InteractionWorking {
        let reduction = ctx.victim.stats.damage_reduction.compute();
        let victim = working.victim();
        victim.damage = victim.damage.saturating_sub(reduction);
        working
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct CheckHitStep;

impl CalculationStep for CheckHitStep {
    fn name(&self) -> &'static str {
        CHECK_HIT
    }

    fn calculate(&self, ctx: &mut StepContext<'_>, mut working: InteractionWorking) -> InteractionWorking {
        let hit = ctx.params.cannot_miss
            || attempt_hit(
                ctx.attacker.stats.accuracy.compute(),
                ctx.victim.stats.evasion.compute(),
                &mut *ctx.rng,
            );
        working.victim().hit = hit;
        working
    }
}

/// Defensive actions, then defense
///
/// A defensive payback is stashed and contact is resolved again with it,
/// so it takes part in the same first-failure-wins scan.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefensiveStep;

impl CalculationStep for DefensiveStep {
    fn name(&self) -> &'static str {
        DEFENSIVE
    }

    fn calculate(&self, ctx: &mut StepContext<'_>, mut working: InteractionWorking) -> InteractionWorking {
        let mut dodge_bonus = 0;

        if working.result.victim_outcome.hit {
            let victim = &working.result.victim_outcome;
            let defended = resolve_defensive_action(
                ctx.victim.defensive_input,
                ctx.params.defensive_overrides,
                victim.damage,
                victim.damage_effects,
                ctx.constants,
            );

            if let Some(defended) = defended {
                tracing::trace!(victim = %ctx.victim.id, action = ?defended.action, "defensive action");
                let victim = working.victim();
                victim.damage = defended.damage;
                victim.statuses = defended.statuses;
                victim.damage_effects = defended.damage_effects;
                victim.defensive_actions |= DefensiveActions::from(defended.action);
                dodge_bonus = ctx.victim.modifier_count(BattleModifier::DamageDodge);

                if let Some(payback) = defended.payback {
                    working.defensive_payback = Some(payback);
                    working.result.contact = resolve_victim_contact(ctx, &working);
                }
            }
        }

        let victim = working.victim();
        if !victim.piercing {
            let defense = ctx.victim.stats.total_defense().saturating_add(dodge_bonus);
            victim.damage = victim.damage.saturating_sub(defense);
        }
        working
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct DoublePainStep;

impl CalculationStep for DoublePainStep {
    fn name(&self) -> &'static str {
        DOUBLE_PAIN
    }

    fn calculate(&self, ctx: &mut StepContext<'_>, mut working: InteractionWorking) -> InteractionWorking {
        let count = ctx.victim.modifier_count(BattleModifier::DoublePain);
        if count > 0 {
            let victim = working.victim();
            victim.damage = victim.damage.saturating_mul(count.saturating_add(1));
        }
        working
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct LastStandStep;

impl CalculationStep for LastStandStep {
    fn name(&self) -> &'static str {
        LAST_STAND
    }

    fn calculate(&self, ctx: &mut StepContext<'_>, mut working: InteractionWorking) -> InteractionWorking {
        let count = ctx.victim.modifier_count(BattleModifier::LastStand);
        if count > 0 && ctx.victim.health_state(&ctx.constants.health).is_low() {
            let victim = working.victim();
            victim.damage = ceil_div(victim.damage, count.saturating_add(1));
        }
        working
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ClampVictimStep;

impl CalculationStep for ClampVictimStep {
    fn name(&self) -> &'static str {
        CLAMP_VICTIM
    }

    fn calculate(&self, ctx: &mut StepContext<'_>, mut working: InteractionWorking) -> InteractionWorking {
        let damage = ctx.constants.clamp_damage(working.result.victim_outcome.damage);
        working.victim().damage = damage;
        working.victim_damage_dealt = damage;
        working
    }
}

/// Rolls the victim's statuses; a miss inflicts nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct VictimStatusFilterStep;

impl CalculationStep for VictimStatusFilterStep {
    fn name(&self) -> &'static str {
        VICTIM_STATUS_FILTER
    }

    fn calculate(&self, ctx: &mut StepContext<'_>, mut working: InteractionWorking) -> InteractionWorking {
        let victim = working.victim();
        victim.statuses = if victim.hit {
            filter_statuses(ctx.victim, &victim.statuses, ctx.constants, &mut *ctx.rng)
        } else {
            Vec::new()
        };
        working
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct VictimInvincibleStep;

impl CalculationStep for VictimInvincibleStep {
    fn name(&self) -> &'static str {
        VICTIM_INVINCIBLE
    }

    fn calculate(&self, ctx: &mut StepContext<'_>, mut working: InteractionWorking) -> InteractionWorking {
        if ctx.victim.is_invincible() {
            let victim = working.victim();
            victim.damage = 0;
            victim.interaction = ElementInteraction::Damage;
        }
        working
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct VictimContactGateStep;

impl CalculationStep for VictimContactGateStep {
    fn name(&self) -> &'static str {
        VICTIM_CONTACT_GATE
    }

    fn calculate(&self, _ctx: &mut StepContext<'_>, mut working: InteractionWorking) -> InteractionWorking {
        if working.result.contact.verdict == ContactVerdict::Failure {
            working.victim().skip_damage = true;
        }
        working
    }
}

// === Attacker side ===

/// Retaliation damage from the resolved payback
///
/// Half and Full paybacks take the attacker's element modifiers against
/// the victim damage dealt and then round; Constant paybacks take them
/// against the constant itself.
#[derive(Debug, Clone, Copy, Default)]
pub struct AttackerPaybackStep;

impl CalculationStep for AttackerPaybackStep {
    fn name(&self) -> &'static str {
        ATTACKER_PAYBACK
    }

    fn calculate(&self, ctx: &mut StepContext<'_>, mut working: InteractionWorking) -> InteractionWorking {
        let Some(payback) = working.result.contact.payback.clone() else {
            return working;
        };

        let modifiers = ctx.attacker.element_modifiers(payback.element);
        let min = ctx.constants.damage.min;
        let payback_min = ctx.constants.payback.min_damage;

        let (damage, interaction) = match payback.kind {
            PaybackKind::Constant => {
                let resolved = modifiers.resolve(payback.damage, min);
                (resolved.damage.max(payback_min), resolved.interaction)
            }
            PaybackKind::Half | PaybackKind::Full => {
                let resolved = modifiers.resolve(working.victim_damage_dealt, min);
                (payback.payback_damage(resolved.damage, payback_min), resolved.interaction)
            }
        };

        *working.attacker() = InteractionOutcome {
            damage,
            element: payback.element,
            interaction,
            contact_type: ContactType::None,
            contact_property: ContactProperty::None,
            piercing: true,
            statuses: payback.statuses,
            hit: true,
            damage_effects: Default::default(),
            defensive_actions: DefensiveActions::empty(),
            is_payback: true,
            skip_damage: false,
        };
        working
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ClampAttackerStep;

impl CalculationStep for ClampAttackerStep {
    fn name(&self) -> &'static str {
        CLAMP_ATTACKER
    }

    fn calculate(&self, ctx: &mut StepContext<'_>, mut working: InteractionWorking) -> InteractionWorking {
        let attacker = working.attacker();
        attacker.damage = ctx.constants.clamp_damage(attacker.damage);
        working
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct AttackerStatusFilterStep;

impl CalculationStep for AttackerStatusFilterStep {
    fn name(&self) -> &'static str {
        ATTACKER_STATUS_FILTER
    }

    fn calculate(&self, ctx: &mut StepContext<'_>, mut working: InteractionWorking) -> InteractionWorking {
        let attacker = working.attacker();
        if !attacker.statuses.is_empty() {
            attacker.statuses = filter_statuses(ctx.attacker, &attacker.statuses, ctx.constants, &mut *ctx.rng);
        }
        working
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct AttackerInvincibleStep;

impl CalculationStep for AttackerInvincibleStep {
    fn name(&self) -> &'static str {
        ATTACKER_INVINCIBLE
    }

    fn calculate(&self, ctx: &mut StepContext<'_>, mut working: InteractionWorking) -> InteractionWorking {
        if ctx.attacker.is_invincible() {
            let attacker = working.attacker();
            attacker.damage = 0;
            attacker.interaction = ElementInteraction::Damage;
        }
        working
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct AttackerContactGateStep;

impl CalculationStep for AttackerContactGateStep {
    fn name(&self) -> &'static str {
        ATTACKER_CONTACT_GATE
    }

    fn calculate(&self, _ctx: &mut StepContext<'_>, mut working: InteractionWorking) -> InteractionWorking {
        if working.result.contact.verdict == ContactVerdict::Success {
            working.attacker().skip_damage = true;
        }
        working
    }
}
