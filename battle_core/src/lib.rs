//! battle_core - Combat resolution core for turn-based battles
//!
//! This library provides:
//! - DamagePipeline: Ordered, reconfigurable calculation steps that turn
//!   InteractionParameters into an InteractionResult
//! - Contact resolution: Attack vs retaliation physical-attribute matching
//!   and payback combination
//! - StatusEffect: The affliction lifecycle with reference-counted
//!   suppression and priority ordering
//! - CombatResolver: Driving one attack across a list of victims

pub mod combat;
pub mod combatant;
pub mod config;
pub mod contact;
pub mod damage;
pub mod defense;
pub mod events;
pub mod ordering;
pub mod prelude;
pub mod status;
pub mod types;

// Re-export core types for convenience
pub use combat::{AttemptResult, BattleError, CombatResolver, Roster};
pub use combatant::{BattleStats, Combatant, DamageReport, StatValue};
pub use config::{default_status_catalog, BattleConstants, ConfigError};
pub use contact::{resolve_contact, ContactOutcome, ContactVerdict, PaybackDescriptor, PaybackKind};
pub use damage::{CalculationStep, DamagePipeline, InteractionOutcome, InteractionParameters, InteractionResult};
pub use events::{BattleEvent, EventSink};
pub use ordering::{entity_battle_index_order, sort_by_battle_index};
pub use status::{
    StatusBehavior, StatusCatalog, StatusChance, StatusEffect, StatusError, StatusKind, SuppressionKind,
};
pub use types::{
    CombatantId, ContactProperty, ContactType, ContactTypes, DefensiveAction, Element, ElementInteraction,
    PhysicalAttribute,
};
