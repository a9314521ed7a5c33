//! Combat resolution - Attack a list of victims and apply the results

mod resolution;
mod result;

pub use resolution::{BattleError, CombatResolver, Roster};
pub use result::AttemptResult;
