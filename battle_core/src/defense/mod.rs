//! Defense system - Elements, Evasion, Defensive actions

mod element;
mod evasion;
mod guard;

pub use element::{resolve_element_damage, ElementDamage, ElementModifiers, Resistance, Weakness};
pub use evasion::{attempt_hit, roll_percent};
pub use guard::{resolve_defensive_action, superguard_payback, DefensiveOutcome};
