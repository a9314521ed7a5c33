//! Status infliction filter
//!
//! Each candidate succeeds with `chance * susceptibility / 100` percent.
//! Immune or 0% susceptible targets always resist.

use crate::combatant::Combatant;
use crate::config::BattleConstants;
use crate::defense::roll_percent;
use crate::status::StatusChance;
use rand::Rng;

/// Keep the candidates that land on `target`, in order
pub fn filter_statuses<R: Rng + ?Sized>(
    target: &Combatant,
    candidates: &[StatusChance],
    constants: &BattleConstants,
    rng: &mut R,
) -> Vec<StatusChance> {
    candidates
        .iter()
        .filter(|candidate| try_inflict(target, candidate, constants, rng))
        .cloned()
        .collect()
}

fn try_inflict<R: Rng + ?Sized>(
    target: &Combatant,
    candidate: &StatusChance,
    constants: &BattleConstants,
    rng: &mut R,
) -> bool {
    let kind = candidate.status.kind();
    if target.is_immune(kind) {
        tracing::trace!(target = %target.id, kind = ?kind, "immune to status");
        return false;
    }

    let susceptibility = target.status_susceptibility(kind, constants.status.default_susceptibility);
    if susceptibility <= 0 {
        return false;
    }

    let chance = candidate.chance.saturating_mul(susceptibility) / 100;
    roll_percent(chance, rng)
}
