//! Battle constants configuration

use super::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Tunable battle constants
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BattleConstants {
    #[serde(default)]
    pub damage: DamageConstants,
    #[serde(default)]
    pub payback: PaybackConstants,
    #[serde(default)]
    pub health: HealthConstants,
    #[serde(default)]
    pub defense: DefenseConstants,
    #[serde(default)]
    pub status: StatusConstants,
}

impl BattleConstants {
    /// Load constants from a TOML file and validate them
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let constants: BattleConstants = super::load_toml(path)?;
        constants.validate()?;
        Ok(constants)
    }

    /// Parse constants from a TOML string and validate them
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let constants: BattleConstants = super::parse_toml(content)?;
        constants.validate()?;
        Ok(constants)
    }

    /// Reject combinations the pipeline cannot honor
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.damage.min > self.damage.max {
            return Err(ConfigError::ValidationError(format!(
                "min damage {} exceeds max damage {}",
                self.damage.min, self.damage.max
            )));
        }
        if self.health.peril_threshold > self.health.danger_threshold {
            return Err(ConfigError::ValidationError(format!(
                "peril threshold {} exceeds danger threshold {}",
                self.health.peril_threshold, self.health.danger_threshold
            )));
        }
        if !(0..=100).contains(&self.status.default_susceptibility) {
            return Err(ConfigError::ValidationError(format!(
                "default susceptibility {} is not a percentage",
                self.status.default_susceptibility
            )));
        }
        Ok(())
    }

    /// Clamp a damage value into the configured bounds
    pub fn clamp_damage(&self, damage: i32) -> i32 {
        damage.clamp(self.damage.min, self.damage.max)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DamageConstants {
    /// Lowest damage any side of an interaction can end with
    #[serde(default = "default_min_damage")]
    pub min: i32,
    /// Highest damage any side of an interaction can end with
    #[serde(default = "default_max_damage")]
    pub max: i32,
}

impl Default for DamageConstants {
    fn default() -> Self {
        DamageConstants {
            min: default_min_damage(),
            max: default_max_damage(),
        }
    }
}

fn default_min_damage() -> i32 {
    0
}
fn default_max_damage() -> i32 {
    99
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaybackConstants {
    /// Retaliation never deals less than this
    #[serde(default = "default_payback_minimum")]
    pub min_damage: i32,
}

impl Default for PaybackConstants {
    fn default() -> Self {
        PaybackConstants {
            min_damage: default_payback_minimum(),
        }
    }
}

fn default_payback_minimum() -> i32 {
    1
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthConstants {
    /// HP at or below which a combatant is in Danger
    #[serde(default = "default_danger_threshold")]
    pub danger_threshold: i32,
    /// HP at or below which a combatant is in Peril
    #[serde(default = "default_peril_threshold")]
    pub peril_threshold: i32,
}

impl Default for HealthConstants {
    fn default() -> Self {
        HealthConstants {
            danger_threshold: default_danger_threshold(),
            peril_threshold: default_peril_threshold(),
        }
    }
}

fn default_danger_threshold() -> i32 {
    5
}
fn default_peril_threshold() -> i32 {
    1
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefenseConstants {
    /// Damage removed by a successful Guard
    #[serde(default = "default_guard_reduction")]
    pub guard_reduction: i32,
    /// Damage a Superguard deals back to the attacker
    #[serde(default = "default_superguard_payback")]
    pub superguard_payback: i32,
}

impl Default for DefenseConstants {
    fn default() -> Self {
        DefenseConstants {
            guard_reduction: default_guard_reduction(),
            superguard_payback: default_superguard_payback(),
        }
    }
}

fn default_guard_reduction() -> i32 {
    1
}
fn default_superguard_payback() -> i32 {
    1
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusConstants {
    /// Susceptibility percentage of a status kind with no explicit entry
    #[serde(default = "default_susceptibility")]
    pub default_susceptibility: i32,
}

impl Default for StatusConstants {
    fn default() -> Self {
        StatusConstants {
            default_susceptibility: default_susceptibility(),
        }
    }
}

fn default_susceptibility() -> i32 {
    100
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_constants() {
        let constants = BattleConstants::default();
        assert_eq!(constants.damage.min, 0);
        assert_eq!(constants.damage.max, 99);
        assert_eq!(constants.payback.min_damage, 1);
        assert_eq!(constants.health.danger_threshold, 5);
        assert!(constants.validate().is_ok());
    }

    #[test]
    fn test_parse_constants() {
        let toml = r#"
[damage]
min = 0
max = 999

[health]
danger_threshold = 10
peril_threshold = 3
"#;

        let constants = BattleConstants::parse(toml).unwrap();
        assert_eq!(constants.damage.max, 999);
        assert_eq!(constants.health.peril_threshold, 3);
        // Sections left out keep their defaults
        assert_eq!(constants.defense.guard_reduction, 1);
    }

    #[test]
    fn test_invalid_bounds_rejected() {
        let toml = r#"
[damage]
min = 10
max = 5
"#;

        let err = BattleConstants::parse(toml).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn test_clamp_damage() {
        let constants = BattleConstants::default();
        assert_eq!(constants.clamp_damage(-4), 0);
        assert_eq!(constants.clamp_damage(42), 42);
        assert_eq!(constants.clamp_damage(i32::MAX), 99);
    }
}
