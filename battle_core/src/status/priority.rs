//! Status priority - the fixed order in which statuses act each phase cycle

use super::StatusKind;

/// Priority of a status kind; higher values act first
///
/// Every kind has a distinct value, so this is a total order.
pub fn status_priority(kind: StatusKind) -> i32 {
    use StatusKind::*;
    match kind {
        Allergic => 320,
        Stone => 310,
        Frozen => 300,
        Stop => 290,
        Sleep => 280,
        Paralyzed => 270,
        Immobilized => 260,
        NoSkills => 250,
        Confused => 240,
        Dizzy => 230,
        Payback => 220,
        HoldFast => 210,
        Electrified => 200,
        Invisible => 190,
        Dodgy => 180,
        Fast => 170,
        Slow => 160,
        Charged => 150,
        Huge => 140,
        Tiny => 130,
        PowerUp => 120,
        PowerDown => 110,
        WaterBlock => 100,
        DefenseUp => 90,
        DefenseDown => 80,
        Soft => 70,
        Lucky => 60,
        Unlucky => 50,
        HpRegen => 40,
        FpRegen => 30,
        Burn => 20,
        Poison => 10,
    }
}

/// Sort kinds so the highest priority comes first
pub fn ordered_by_priority(kinds: impl IntoIterator<Item = StatusKind>) -> Vec<StatusKind> {
    let mut kinds: Vec<StatusKind> = kinds.into_iter().collect();
    kinds.sort_by_key(|kind| std::cmp::Reverse(status_priority(*kind)));
    kinds
}
