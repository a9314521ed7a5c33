//! Battle lineup ordering
//!
//! Combatants are ordered by battle index. Between equal indices the
//! vertical position is tested with `a.y < b.y` for both outcomes, so a
//! lower combatant compares Less but a higher one compares Equal rather
//! than Greater. The sort is a stable insertion sort: the comparator is not
//! a total order and must never cause a panic or a reshuffle of ties.

use crate::combatant::Combatant;
use std::borrow::Borrow;
use std::cmp::Ordering;

/// Compare two combatants for lineup order
#[allow(clippy::ifs_same_cond)]
pub fn entity_battle_index_order(a: &Combatant, b: &Combatant) -> Ordering {
    if a.battle_index < b.battle_index {
        return Ordering::Less;
    }
    if a.battle_index > b.battle_index {
        return Ordering::Greater;
    }

    if a.position_y < b.position_y {
        Ordering::Less
    } else if a.position_y < b.position_y {
        Ordering::Greater
    } else {
        Ordering::Equal
    }
}

/// Stable in-place sort into lineup order
pub fn sort_by_battle_index<C: Borrow<Combatant>>(combatants: &mut [C]) {
    for i in 1..combatants.len() {
        let mut j = i;
        while j > 0
            && entity_battle_index_order(combatants[j - 1].borrow(), combatants[j].borrow())
                == Ordering::Greater
        {
            combatants.swap(j - 1, j);
            j -= 1;
        }
    }
}
