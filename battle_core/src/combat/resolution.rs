//! Damage resolution - run the pipeline against each victim and apply it
//!
//! For each victim in order:
//! 1. Calculate the interaction
//! 2. If the victim side isn't gated: apply it on a hit, otherwise ask the
//!    missed callback whether to keep going
//! 3. If the attacker side isn't gated: apply the retaliation and stop;
//!    no further victims are processed

use super::result::AttemptResult;
use crate::combatant::Combatant;
use crate::config::BattleConstants;
use crate::damage::{DamagePipeline, InteractionParameters, InteractionResult};
use crate::events::{BattleEvent, EventSink};
use crate::ordering::sort_by_battle_index;
use crate::status::StatusTickResult;
use crate::types::CombatantId;
use rand::RngCore;
use thiserror::Error;

/// Invalid input to a damage attempt
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BattleError {
    #[error("unknown combatant {0}")]
    UnknownCombatant(CombatantId),
    #[error("{0} cannot attack itself")]
    SelfTarget(CombatantId),
    #[error("no victims to attack")]
    NoVictims,
}

/// The combatants taking part in a battle
#[derive(Debug, Clone, Default)]
pub struct Roster {
    combatants: Vec<Combatant>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(combatants: Vec<Combatant>) -> Self {
        Roster { combatants }
    }

    pub fn add(&mut self, combatant: Combatant) {
        self.combatants.push(combatant);
    }

    pub fn len(&self) -> usize {
        self.combatants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.combatants.is_empty()
    }

    pub fn index_of(&self, id: &CombatantId) -> Option<usize> {
        self.combatants.iter().position(|combatant| &combatant.id == id)
    }

    pub fn get(&self, id: &CombatantId) -> Option<&Combatant> {
        self.combatants.iter().find(|combatant| &combatant.id == id)
    }

    pub fn get_mut(&mut self, id: &CombatantId) -> Option<&mut Combatant> {
        self.combatants.iter_mut().find(|combatant| &combatant.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Combatant> {
        self.combatants.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Combatant> {
        self.combatants.iter_mut()
    }

    /// Borrow two different combatants mutably at once
    pub fn pair_mut(&mut self, first: usize, second: usize) -> Option<(&mut Combatant, &mut Combatant)> {
        if first == second || first >= self.combatants.len() || second >= self.combatants.len() {
            return None;
        }
        if first < second {
            let (left, right) = self.combatants.split_at_mut(second);
            Some((&mut left[first], &mut right[0]))
        } else {
            let (left, right) = self.combatants.split_at_mut(first);
            Some((&mut right[0], &mut left[second]))
        }
    }

    /// Ids in battle lineup order
    pub fn lineup(&self) -> Vec<CombatantId> {
        let mut combatants: Vec<&Combatant> = self.combatants.iter().collect();
        sort_by_battle_index(&mut combatants);
        combatants.into_iter().map(|combatant| combatant.id.clone()).collect()
    }

    /// Run one phase cycle of a combatant's statuses
    pub fn tick_statuses<E>(&mut self, id: &CombatantId, events: &mut E) -> Option<StatusTickResult>
    where
        E: EventSink + ?Sized,
    {
        let Some(combatant) = self.get_mut(id) else {
            tracing::warn!(error = %BattleError::UnknownCombatant(id.clone()), "status tick ignored");
            return None;
        };
        let result = combatant.tick_statuses();
        for kind in &result.expired {
            events.emit(BattleEvent::StatusEnded {
                target: id.clone(),
                kind: *kind,
            });
        }
        Some(result)
    }

    /// End every status on every combatant, e.g. when the battle is over
    pub fn end_all_statuses<E>(&mut self, events: &mut E)
    where
        E: EventSink + ?Sized,
    {
        for combatant in &mut self.combatants {
            for kind in combatant.end_all_statuses() {
                events.emit(BattleEvent::StatusEnded {
                    target: combatant.id.clone(),
                    kind,
                });
            }
        }
    }

    pub fn into_inner(self) -> Vec<Combatant> {
        self.combatants
    }
}

/// The pipeline and constants damage is resolved with
///
/// Owned by the battle; the pipeline may be edited between attempts.
#[derive(Debug, Clone, Default)]
pub struct CombatResolver {
    pub pipeline: DamagePipeline,
    pub constants: BattleConstants,
}

impl CombatResolver {
    pub fn new(pipeline: DamagePipeline, constants: BattleConstants) -> Self {
        CombatResolver { pipeline, constants }
    }

    /// Calculate one interaction without applying it
    pub fn calculate(
        &self,
        params: &InteractionParameters,
        attacker: &Combatant,
        victim: &Combatant,
        rng: &mut dyn RngCore,
    ) -> InteractionResult {
        self.pipeline.calculate(params, attacker, victim, &self.constants, rng)
    }

    /// Attack every victim in order, applying results to the roster
    pub fn attempt_damage_victims<F, E>(
        &self,
        roster: &mut Roster,
        params: &InteractionParameters,
        victims: &[CombatantId],
        on_missed: F,
        events: &mut E,
    ) -> AttemptResult
    where
        F: FnMut(&InteractionResult) -> bool,
        E: EventSink + ?Sized,
    {
        let mut rng = rand::thread_rng();
        self.attempt_damage_victims_with_rng(roster, params, victims, on_missed, events, &mut rng)
    }

    /// Attack every victim with a provided RNG (for deterministic testing)
    ///
    /// Invalid input is logged and skipped; a missing attacker or an empty
    /// victim list yields an empty result.
    pub fn attempt_damage_victims_with_rng<F, E>(
        &self,
        roster: &mut Roster,
        params: &InteractionParameters,
        victims: &[CombatantId],
        mut on_missed: F,
        events: &mut E,
        rng: &mut dyn RngCore,
    ) -> AttemptResult
    where
        F: FnMut(&InteractionResult) -> bool,
        E: EventSink + ?Sized,
    {
        let mut attempt = AttemptResult::new(victims.len());

        if victims.is_empty() {
            tracing::warn!(error = %BattleError::NoVictims, "damage attempt ignored");
            return attempt;
        }
        let Some(attacker_index) = roster.index_of(&params.attacker) else {
            let error = BattleError::UnknownCombatant(params.attacker.clone());
            tracing::warn!(%error, "damage attempt ignored");
            return attempt;
        };

        for (index, victim_id) in victims.iter().enumerate() {
            if *victim_id == params.attacker {
                tracing::warn!(error = %BattleError::SelfTarget(victim_id.clone()), "victim skipped");
                continue;
            }
            let Some(victim_index) = roster.index_of(victim_id) else {
                tracing::warn!(error = %BattleError::UnknownCombatant(victim_id.clone()), "victim skipped");
                continue;
            };
            let Some((attacker, victim)) = roster.pair_mut(attacker_index, victim_index) else {
                continue;
            };

            let victim_params = params.for_victim(victim_id);
            let result = self
                .pipeline
                .calculate(&victim_params, attacker, victim, &self.constants, &mut *rng);

            let outcome = &result.victim_outcome;
            if outcome.applies() {
                if outcome.hit {
                    let report = victim.take_damage(outcome);
                    events.emit(BattleEvent::VictimDamaged {
                        attacker: attacker.id.clone(),
                        victim: victim.id.clone(),
                        damage: outcome.damage,
                        interaction: outcome.interaction,
                        killed: report.killed,
                    });
                    for kind in report.statuses {
                        events.emit(BattleEvent::StatusInflicted {
                            target: victim.id.clone(),
                            kind,
                        });
                    }
                } else {
                    events.emit(BattleEvent::VictimMissed {
                        attacker: attacker.id.clone(),
                        victim: victim.id.clone(),
                    });
                    if !on_missed(&result) {
                        attempt.results[index] = Some(result);
                        attempt.stopped_on_miss = true;
                        break;
                    }
                }
            }

            let retaliation = &result.attacker_outcome;
            let retaliated = retaliation.applies();
            if retaliated {
                let report = attacker.take_damage(retaliation);
                events.emit(BattleEvent::AttackerRetaliated {
                    attacker: attacker.id.clone(),
                    victim: victim.id.clone(),
                    damage: retaliation.damage,
                    killed: report.killed,
                });
                for kind in report.statuses {
                    events.emit(BattleEvent::StatusInflicted {
                        target: attacker.id.clone(),
                        kind,
                    });
                }
            }

            attempt.results[index] = Some(result);
            if retaliated {
                tracing::debug!(attacker = %params.attacker, victim = %victim_id, "retaliation ends the attempt");
                attempt.stopped_by = Some(index);
                break;
            }
        }

        attempt
    }
}
