//! StatusTable - the statuses a combatant currently has
//!
//! One instance per kind. Inflicting a kind that is already present
//! refreshes the existing instance instead of adding a second one.

use super::{ordered_by_priority, StatusEffect, StatusError, StatusKind, SuppressionKind};
use crate::combatant::Combatant;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Outcome of ticking every status once
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusTickResult {
    pub hp_lost: i32,
    pub hp_restored: i32,
    pub fp_restored: i32,
    /// Kinds that ran out and were removed, in tick order
    pub expired: Vec<StatusKind>,
}

/// How an infliction landed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Infliction {
    /// A new instance was afflicted
    Afflicted,
    /// An existing instance was refreshed
    Refreshed,
}

/// Active statuses keyed by kind
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatusTable {
    statuses: HashMap<StatusKind, StatusEffect>,
}

impl StatusTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.statuses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statuses.is_empty()
    }

    pub fn contains(&self, kind: StatusKind) -> bool {
        self.statuses.contains_key(&kind)
    }

    pub fn get(&self, kind: StatusKind) -> Option<&StatusEffect> {
        self.statuses.get(&kind)
    }

    /// Kinds present, highest priority first
    pub fn ordered_kinds(&self) -> Vec<StatusKind> {
        ordered_by_priority(self.statuses.keys().copied())
    }

    /// Statuses in priority order
    pub fn iter(&self) -> impl Iterator<Item = &StatusEffect> + '_ {
        self.ordered_kinds()
            .into_iter()
            .filter_map(move |kind| self.statuses.get(&kind))
    }

    /// Inflict a status on `combatant`
    ///
    /// New statuses are bound with the combatant's additional duration for
    /// their kind and then afflicted.
    pub fn afflict(&mut self, mut status: StatusEffect, combatant: &mut Combatant) -> Result<Infliction, StatusError> {
        let kind = status.kind();
        if let Some(existing) = self.statuses.get_mut(&kind) {
            existing.refresh(status, combatant)?;
            return Ok(Infliction::Refreshed);
        }

        let additional = combatant.status_property(kind).additional_duration;
        status.bind(additional)?;
        status.afflict(combatant)?;
        self.statuses.insert(kind, status);
        Ok(Infliction::Afflicted)
    }

    /// End and drop a status
    pub fn remove(&mut self, kind: StatusKind, combatant: &mut Combatant) -> Option<StatusEffect> {
        let mut status = self.statuses.remove(&kind)?;
        status.end(combatant);
        Some(status)
    }

    pub fn suppress(
        &mut self,
        kind: StatusKind,
        suppression: SuppressionKind,
        combatant: &mut Combatant,
    ) -> Result<(), StatusError> {
        self.active_mut(kind)?.suppress(suppression, combatant)
    }

    pub fn unsuppress(
        &mut self,
        kind: StatusKind,
        suppression: SuppressionKind,
        combatant: &mut Combatant,
    ) -> Result<(), StatusError> {
        self.active_mut(kind)?.unsuppress(suppression, combatant)
    }

    /// Tick every status once in priority order, removing expired ones
    pub fn tick_all(&mut self, combatant: &mut Combatant) -> StatusTickResult {
        let mut result = StatusTickResult::default();

        for kind in self.ordered_kinds() {
            let Some(status) = self.statuses.get_mut(&kind) else {
                continue;
            };
            let tick = match status.phase_cycle_tick(combatant) {
                Ok(tick) => tick,
                Err(_) => continue,
            };

            result.hp_lost += tick.hp_lost;
            result.hp_restored += tick.hp_restored;
            result.fp_restored += tick.fp_restored;

            if tick.expired {
                self.remove(kind, combatant);
                result.expired.push(kind);
            }
        }

        result
    }

    /// End every status (battle end)
    pub fn end_all(&mut self, combatant: &mut Combatant) -> Vec<StatusKind> {
        let kinds = self.ordered_kinds();
        for kind in &kinds {
            self.remove(*kind, combatant);
        }
        kinds
    }

    fn active_mut(&mut self, kind: StatusKind) -> Result<&mut StatusEffect, StatusError> {
        match self.statuses.get_mut(&kind) {
            Some(status) => Ok(status),
            None => {
                let error = StatusError::NotActive(kind);
                tracing::warn!(%error, "status not present");
                Err(error)
            }
        }
    }
}
