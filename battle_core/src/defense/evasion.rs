//! Hit or miss - attacker accuracy against victim evasion
//!
//! Both values are percentages. A hit lands when the accuracy roll
//! succeeds and the evasion roll fails:
//!
//! - 100 accuracy vs 0 evasion: always hits
//! - 100 accuracy vs 50 evasion: hits half the time
//! - 0 accuracy: never hits

use rand::Rng;

/// Roll a percentage chance
///
/// Chances at or below 0 never succeed and chances at or above 100 always
/// succeed without consuming randomness.
pub fn roll_percent<R: Rng + ?Sized>(chance: i32, rng: &mut R) -> bool {
    if chance <= 0 {
        return false;
    }
    if chance >= 100 {
        return true;
    }
    rng.gen_range(0..100) < chance
}

/// Decide whether an attack connects
pub fn attempt_hit<R: Rng + ?Sized>(accuracy: i32, evasion: i32, rng: &mut R) -> bool {
    roll_percent(accuracy, rng) && !roll_percent(evasion, rng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_certain_hit() {
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..50 {
            assert!(attempt_hit(100, 0, &mut rng));
        }
    }

    #[test]
    fn test_no_accuracy_never_hits() {
        let mut rng = StdRng::seed_from_u64(2);
        for _ in 0..50 {
            assert!(!attempt_hit(0, 0, &mut rng));
        }
    }

    #[test]
    fn test_full_evasion_never_hit() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..50 {
            assert!(!attempt_hit(100, 100, &mut rng));
        }
    }

    #[test]
    fn test_partial_evasion_is_random() {
        let mut rng = StdRng::seed_from_u64(4);
        let hits = (0..1000).filter(|_| attempt_hit(100, 50, &mut rng)).count();
        assert!(hits > 350 && hits < 650, "hits = {hits}");
    }
}
