//! Damage pipeline - an ordered, editable list of calculation steps
//!
//! Each step reads the interaction parameters and both combatants and
//! returns an updated copy of the working state. The default order is
//! listed in [`steps`](super::steps); extensions can insert, remove or
//! replace steps between interactions.

use super::outcome::{InteractionOutcome, InteractionResult};
use super::params::InteractionParameters;
use super::steps;
use crate::combatant::Combatant;
use crate::config::BattleConstants;
use crate::contact::PaybackDescriptor;
use rand::RngCore;
use std::fmt;
use std::sync::Arc;

/// Read-only inputs shared by every step, plus the random source
pub struct StepContext<'a> {
    pub params: &'a InteractionParameters,
    pub attacker: &'a Combatant,
    pub victim: &'a Combatant,
    pub constants: &'a BattleConstants,
    pub rng: &'a mut dyn RngCore,
}

/// State threaded through the steps
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InteractionWorking {
    pub result: InteractionResult,
    /// Payback produced by the victim's defensive action
    pub defensive_payback: Option<PaybackDescriptor>,
    /// Victim damage after clamping, before invincibility
    pub victim_damage_dealt: i32,
}

impl InteractionWorking {
    pub fn victim(&mut self) -> &mut InteractionOutcome {
        &mut self.result.victim_outcome
    }

    pub fn attacker(&mut self) -> &mut InteractionOutcome {
        &mut self.result.attacker_outcome
    }
}

/// One stage of the damage calculation
pub trait CalculationStep: fmt::Debug + Send + Sync {
    /// Unique name used to find the step when editing a pipeline
    fn name(&self) -> &'static str;

    fn calculate(&self, ctx: &mut StepContext<'_>, working: InteractionWorking) -> InteractionWorking;
}

/// Ordered list of calculation steps
#[derive(Debug, Clone)]
pub struct DamagePipeline {
    steps: Vec<Arc<dyn CalculationStep>>,
}

impl Default for DamagePipeline {
    fn default() -> Self {
        DamagePipeline {
            steps: steps::default_steps(),
        }
    }
}

impl DamagePipeline {
    /// Create a pipeline from an explicit step list
    pub fn new(steps: Vec<Arc<dyn CalculationStep>>) -> Self {
        DamagePipeline { steps }
    }

    /// Names of the steps, in order
    pub fn step_names(&self) -> Vec<&'static str> {
        self.steps.iter().map(|step| step.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn push(&mut self, step: Arc<dyn CalculationStep>) {
        self.steps.push(step);
    }

    /// Insert a step before the named one; returns false if it isn't found
    pub fn insert_before(&mut self, name: &str, step: Arc<dyn CalculationStep>) -> bool {
        match self.position(name) {
            Some(index) => {
                self.steps.insert(index, step);
                true
            }
            None => false,
        }
    }

    /// Insert a step after the named one; returns false if it isn't found
    pub fn insert_after(&mut self, name: &str, step: Arc<dyn CalculationStep>) -> bool {
        match self.position(name) {
            Some(index) => {
                self.steps.insert(index + 1, step);
                true
            }
            None => false,
        }
    }

    /// Remove the named step; returns false if it isn't found
    pub fn remove(&mut self, name: &str) -> bool {
        match self.position(name) {
            Some(index) => {
                self.steps.remove(index);
                true
            }
            None => false,
        }
    }

    /// Replace the whole step list
    pub fn replace_all(&mut self, steps: Vec<Arc<dyn CalculationStep>>) {
        self.steps = steps;
    }

    /// Restore the default step list
    pub fn reset(&mut self) {
        self.steps = steps::default_steps();
    }

    fn position(&self, name: &str) -> Option<usize> {
        let index = self.steps.iter().position(|step| step.name() == name);
        if index.is_none() {
            tracing::warn!(step = name, "no such calculation step");
        }
        index
    }

    /// Run every step for one attacker/victim pair
    pub fn calculate(
        &self,
        params: &InteractionParameters,
        attacker: &Combatant,
        victim: &Combatant,
        constants: &BattleConstants,
        rng: &mut dyn RngCore,
    ) -> InteractionResult {
        let mut ctx = StepContext {
            params,
            attacker,
            victim,
            constants,
            rng,
        };

        let mut working = InteractionWorking {
            result: InteractionResult::new(params.attacker.clone(), params.victim.clone()),
            ..Default::default()
        };
        for step in &self.steps {
            working = step.calculate(&mut ctx, working);
            tracing::trace!(
                step = step.name(),
                victim_damage = working.result.victim_outcome.damage,
                attacker_damage = working.result.attacker_outcome.damage,
                "calculation step"
            );
        }

        let result = working.result;
        tracing::debug!(
            attacker = %result.attacker,
            victim = %result.victim,
            victim_damage = result.victim_outcome.damage,
            hit = result.victim_outcome.hit,
            verdict = ?result.contact.verdict,
            attacker_damage = result.attacker_outcome.damage,
            "interaction calculated"
        );
        result
    }
}
