//! StatusEffect - the lifecycle engine shared by every status kind
//!
//! ```text
//! Unbound --bind--> Bound --afflict--> Active --end--> Ended
//!                                        |
//!                          suppress / unsuppress / tick
//! ```
//!
//! Suppression is counted per [`SuppressionKind`]. Side effects only run
//! when a counter goes 0 -> 1 (suppress) or 1 -> 0 (unsuppress).

use super::behavior::StatusBehavior;
use super::{status_priority, StatusAlignment, StatusError, StatusKind, SuppressionKind};
use crate::combatant::Combatant;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Lifecycle phase of a status instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusPhase {
    #[default]
    Unbound,
    /// Attached to a combatant, additional duration captured
    Bound,
    Active,
    Ended,
}

/// Result of one phase-cycle tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusTick {
    pub hp_lost: i32,
    pub hp_restored: i32,
    pub fp_restored: i32,
    /// The status ran out of turns and should be removed
    pub expired: bool,
}

/// A status effect instance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusEffect {
    kind: StatusKind,
    /// Base duration in phase cycles; 0 or less never expires
    duration: i32,
    #[serde(default)]
    additional_duration: i32,
    #[serde(default)]
    turns_elapsed: i32,
    #[serde(default)]
    suppressions: BTreeMap<SuppressionKind, u32>,
    #[serde(default)]
    phase: StatusPhase,
    behavior: StatusBehavior,
}

impl StatusEffect {
    pub fn new(kind: StatusKind, duration: i32, behavior: StatusBehavior) -> Self {
        StatusEffect {
            kind,
            duration,
            additional_duration: 0,
            turns_elapsed: 0,
            suppressions: BTreeMap::new(),
            phase: StatusPhase::Unbound,
            behavior,
        }
    }

    // === Accessors ===

    pub fn kind(&self) -> StatusKind {
        self.kind
    }

    pub fn alignment(&self) -> StatusAlignment {
        self.kind.alignment()
    }

    pub fn priority(&self) -> i32 {
        status_priority(self.kind)
    }

    pub fn duration(&self) -> i32 {
        self.duration
    }

    pub fn additional_duration(&self) -> i32 {
        self.additional_duration
    }

    /// Base plus additional duration
    pub fn total_duration(&self) -> i32 {
        self.duration.saturating_add(self.additional_duration)
    }

    pub fn turns_elapsed(&self) -> i32 {
        self.turns_elapsed
    }

    /// Turns left before expiry, `None` when infinite
    pub fn turns_remaining(&self) -> Option<i32> {
        if self.is_infinite() {
            None
        } else {
            Some((self.total_duration() - self.turns_elapsed).max(0))
        }
    }

    pub fn is_infinite(&self) -> bool {
        self.duration <= 0
    }

    pub fn phase(&self) -> StatusPhase {
        self.phase
    }

    pub fn is_active(&self) -> bool {
        self.phase == StatusPhase::Active
    }

    pub fn is_ended(&self) -> bool {
        self.phase == StatusPhase::Ended
    }

    pub fn behavior(&self) -> &StatusBehavior {
        &self.behavior
    }

    pub fn suppression_count(&self, suppression: SuppressionKind) -> u32 {
        self.suppressions.get(&suppression).copied().unwrap_or(0)
    }

    pub fn is_suppressed(&self, suppression: SuppressionKind) -> bool {
        self.suppression_count(suppression) > 0
    }

    // === Lifecycle ===

    /// Attach to a combatant, capturing its additional duration for this kind
    pub fn bind(&mut self, additional_duration: i32) -> Result<(), StatusError> {
        match self.phase {
            StatusPhase::Unbound | StatusPhase::Bound => {
                self.additional_duration = additional_duration;
                self.phase = StatusPhase::Bound;
                Ok(())
            }
            StatusPhase::Active => Err(self.report(StatusError::AlreadyAfflicted(self.kind))),
            StatusPhase::Ended => Err(self.report(StatusError::AlreadyEnded(self.kind))),
        }
    }

    /// Run the affliction side effects
    pub fn afflict(&mut self, combatant: &mut Combatant) -> Result<(), StatusError> {
        match self.phase {
            StatusPhase::Bound => {
                self.phase = StatusPhase::Active;
                self.behavior.apply(self.kind, combatant);
                tracing::debug!(
                    combatant = %combatant.id,
                    kind = ?self.kind,
                    duration = self.total_duration(),
                    "status afflicted"
                );
                Ok(())
            }
            StatusPhase::Unbound => Err(self.report(StatusError::NotBound(self.kind))),
            StatusPhase::Active => Err(self.report(StatusError::AlreadyAfflicted(self.kind))),
            StatusPhase::Ended => Err(self.report(StatusError::AlreadyEnded(self.kind))),
        }
    }

    /// Advance one phase cycle
    ///
    /// Per-cycle effects are skipped while effects are suppressed; turns
    /// don't count while the turn count is suppressed or the duration is
    /// infinite. The caller removes the status when the tick says it
    /// expired.
    pub fn phase_cycle_tick(&mut self, combatant: &mut Combatant) -> Result<StatusTick, StatusError> {
        self.ensure_active()?;

        let effects_applied = !self.is_suppressed(SuppressionKind::Effects);
        let mut tick = StatusTick::default();

        if effects_applied {
            let behavior_tick = self.behavior.phase_cycle(combatant);
            tick.hp_lost = behavior_tick.hp_lost;
            tick.hp_restored = behavior_tick.hp_restored;
            tick.fp_restored = behavior_tick.fp_restored;
        }

        if !self.is_suppressed(SuppressionKind::TurnCount) {
            let finished = self.behavior.advance_turns(combatant, effects_applied);
            if !self.is_infinite() {
                self.turns_elapsed += 1;
            }
            tick.expired = finished || (!self.is_infinite() && self.turns_elapsed >= self.total_duration());
        }

        tracing::trace!(kind = ?self.kind, turns_elapsed = self.turns_elapsed, expired = tick.expired, "status tick");
        Ok(tick)
    }

    /// Suppress one aspect of the status
    pub fn suppress(&mut self, suppression: SuppressionKind, combatant: &mut Combatant) -> Result<(), StatusError> {
        self.ensure_active()?;

        let count = self.suppressions.entry(suppression).or_insert(0);
        *count += 1;
        if *count == 1 {
            if suppression == SuppressionKind::Effects {
                self.behavior.remove(self.kind, combatant);
            }
            tracing::debug!(kind = ?self.kind, suppression = ?suppression, "status suppressed");
        }
        Ok(())
    }

    /// Lift one suppression of an aspect
    ///
    /// Unsuppressing an aspect that isn't suppressed changes nothing.
    pub fn unsuppress(&mut self, suppression: SuppressionKind, combatant: &mut Combatant) -> Result<(), StatusError> {
        self.ensure_active()?;

        let count = self.suppression_count(suppression);
        if count == 0 {
            return Err(self.report(StatusError::NotSuppressed {
                kind: self.kind,
                suppression,
            }));
        }

        if count == 1 {
            self.suppressions.remove(&suppression);
            if suppression == SuppressionKind::Effects {
                self.behavior.apply(self.kind, combatant);
            }
            tracing::debug!(kind = ?self.kind, suppression = ?suppression, "status unsuppressed");
        } else {
            self.suppressions.insert(suppression, count - 1);
        }
        Ok(())
    }

    /// End the status
    ///
    /// Every suppression is lifted first so the combatant is restored
    /// through the normal unsuppress path, then the end side effects run.
    /// Returns false if the status had already ended.
    pub fn end(&mut self, combatant: &mut Combatant) -> bool {
        if self.is_ended() {
            return false;
        }

        if self.is_active() {
            let suppressed: Vec<(SuppressionKind, u32)> =
                self.suppressions.iter().map(|(kind, count)| (*kind, *count)).collect();
            for (suppression, count) in suppressed {
                for _ in 0..count {
                    // Counts come from the map itself, so this can't fail
                    let _ = self.unsuppress(suppression, combatant);
                }
            }
        }

        let was_active = self.is_active();
        self.phase = StatusPhase::Ended;
        if was_active {
            self.behavior.remove(self.kind, combatant);
        }
        tracing::debug!(combatant = %combatant.id, kind = ?self.kind, "status ended");
        true
    }

    /// Merge a newly inflicted status of the same kind into this one
    ///
    /// By default the turn count restarts with the new duration. Move
    /// disabling instead adds the new categories, and rejects categories
    /// this status already disables.
    pub fn refresh(&mut self, incoming: StatusEffect, combatant: &mut Combatant) -> Result<(), StatusError> {
        if incoming.kind != self.kind {
            return Err(self.report(StatusError::KindMismatch {
                existing: self.kind,
                incoming: incoming.kind,
            }));
        }
        self.ensure_active()?;

        let effects_applied = !self.is_suppressed(SuppressionKind::Effects);
        match (&mut self.behavior, incoming.behavior) {
            (
                StatusBehavior::DisableMoves { categories },
                StatusBehavior::DisableMoves { categories: added },
            ) => {
                // Disabled here, or on the combatant through another source
                if let Some(duplicate) = added.iter().find(|new| {
                    categories.iter().any(|old| old.category == new.category)
                        || combatant.is_category_disabled(new.category)
                }) {
                    let error = StatusError::CategoryAlreadyDisabled {
                        kind: self.kind,
                        category: duplicate.category,
                    };
                    tracing::warn!(%error, "status refresh rejected");
                    return Err(error);
                }
                for disabled in added {
                    if effects_applied {
                        combatant.disable_category(disabled.category);
                    }
                    categories.push(disabled);
                }
            }
            _ => {
                self.turns_elapsed = 0;
                self.duration = incoming.duration;
            }
        }

        tracing::debug!(combatant = %combatant.id, kind = ?self.kind, duration = self.total_duration(), "status refreshed");
        Ok(())
    }

    fn ensure_active(&self) -> Result<(), StatusError> {
        match self.phase {
            StatusPhase::Active => Ok(()),
            StatusPhase::Ended => Err(self.report(StatusError::AlreadyEnded(self.kind))),
            StatusPhase::Unbound | StatusPhase::Bound => Err(self.report(StatusError::NotActive(self.kind))),
        }
    }

    fn report(&self, error: StatusError) -> StatusError {
        tracing::warn!(kind = ?self.kind, %error, "status lifecycle violation");
        error
    }
}
