//! Battle events - what happened during resolution, for outside observers
//!
//! The driver pushes events into an [`EventSink`] supplied by the caller.
//! `()` discards them and `Vec<BattleEvent>` collects them.

use crate::status::StatusKind;
use crate::types::{CombatantId, ElementInteraction};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum BattleEvent {
    VictimDamaged {
        attacker: CombatantId,
        victim: CombatantId,
        damage: i32,
        interaction: ElementInteraction,
        killed: bool,
    },
    VictimMissed {
        attacker: CombatantId,
        victim: CombatantId,
    },
    /// The attacker was hit by the victim's payback
    AttackerRetaliated {
        attacker: CombatantId,
        victim: CombatantId,
        damage: i32,
        killed: bool,
    },
    StatusInflicted {
        target: CombatantId,
        kind: StatusKind,
    },
    StatusEnded {
        target: CombatantId,
        kind: StatusKind,
    },
}

/// Receiver of battle events
pub trait EventSink {
    fn emit(&mut self, event: BattleEvent);
}

impl EventSink for () {
    fn emit(&mut self, _event: BattleEvent) {}
}

impl EventSink for Vec<BattleEvent> {
    fn emit(&mut self, event: BattleEvent) {
        self.push(event);
    }
}
