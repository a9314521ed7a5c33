//! Prelude module for convenient imports
//!
//! ```rust
//! use battle_core::prelude::*;
//! ```

// Core types
pub use crate::combatant::{BattleStats, Combatant, StatValue};
pub use crate::types::{
    BattleModifier, CombatantId, ContactProperty, ContactType, ContactTypes, DamageEffects, DefensiveAction,
    DefensiveActions, Element, ElementInteraction, MoveCategory, PhysicalAttribute, StatKind,
};

// Damage system
pub use crate::damage::{DamagePipeline, InteractionOutcome, InteractionParameters, InteractionResult};

// Contact
pub use crate::contact::{ContactVerdict, PaybackDescriptor, PaybackKind};

// Combat
pub use crate::combat::{AttemptResult, CombatResolver, Roster};
pub use crate::events::{BattleEvent, EventSink};

// Status system
pub use crate::status::{StatusCatalog, StatusChance, StatusEffect, StatusKind, SuppressionKind};

// Config
pub use crate::config::{default_status_catalog, BattleConstants};
