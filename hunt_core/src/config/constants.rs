//! Engine constants configuration

use serde::{Deserialize, Serialize};

/// Tunable engine constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct EngineConstants {
    #[serde(default)]
    pub damage: DamageConstants,
    #[serde(default)]
    pub rewards: RewardConstants,
    #[serde(default)]
    pub matching: MatchingConstants,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DamageConstants {
    /// Share of hits landing on the weakest part in weak-part summaries
    #[serde(default = "default_weakpart_weight")]
    pub weakpart_weight: f64,
    /// Share of hits landing after a part is broken
    #[serde(default = "default_break_weight")]
    pub break_weight: f64,
    /// Share of hits landing while the monster is enraged
    #[serde(default = "default_rage_weight")]
    pub rage_weight: f64,
    /// Lance hits use max(cut, factor * impact)
    #[serde(default = "default_lance_impact_factor")]
    pub lance_impact_factor: f64,
    /// True raw multiplier applied by the anti-species skill
    #[serde(default = "default_anti_species_multiplier")]
    pub anti_species_multiplier: f64,
    /// Effective hitzone at which weakness exploit starts applying
    #[serde(default = "default_weakness_exploit_threshold")]
    pub weakness_exploit_threshold: f64,
    /// Affinity added per weakness exploit level (index 0 = no skill)
    #[serde(default = "default_weakness_exploit_affinity")]
    pub weakness_exploit_affinity: Vec<i32>,
}

impl Default for DamageConstants {
    fn default() -> Self {
        DamageConstants {
            weakpart_weight: default_weakpart_weight(),
            break_weight: default_break_weight(),
            rage_weight: default_rage_weight(),
            lance_impact_factor: default_lance_impact_factor(),
            anti_species_multiplier: default_anti_species_multiplier(),
            weakness_exploit_threshold: default_weakness_exploit_threshold(),
            weakness_exploit_affinity: default_weakness_exploit_affinity(),
        }
    }
}

fn default_weakpart_weight() -> f64 {
    0.5
}
fn default_break_weight() -> f64 {
    0.25
}
fn default_rage_weight() -> f64 {
    0.5
}
fn default_lance_impact_factor() -> f64 {
    0.72
}
fn default_anti_species_multiplier() -> f64 {
    1.05
}
fn default_weakness_exploit_threshold() -> f64 {
    45.0
}
fn default_weakness_exploit_affinity() -> Vec<i32> {
    vec![0, 15, 30, 50]
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RewardConstants {
    /// Gathers assumed per gathering site
    #[serde(default = "default_gathers_per_site")]
    pub gathers_per_site: f64,
    /// Area name of gathering sites only reachable with the explorer skill
    #[serde(default = "default_secret_area")]
    pub secret_area: String,
}

impl Default for RewardConstants {
    fn default() -> Self {
        RewardConstants {
            gathers_per_site: default_gathers_per_site(),
            secret_area: default_secret_area(),
        }
    }
}

fn default_gathers_per_site() -> f64 {
    3.0
}
fn default_secret_area() -> String {
    "Secret".to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchingConstants {
    /// Similarity needed to pair a hitzone part with a break reward
    #[serde(default = "default_break_cutoff")]
    pub break_cutoff: f64,
    /// Similarity needed to suggest a user-entered name
    #[serde(default = "default_name_cutoff")]
    pub name_cutoff: f64,
    /// Maximum number of suggestions returned on a lookup miss
    #[serde(default = "default_max_suggestions")]
    pub max_suggestions: usize,
}

impl Default for MatchingConstants {
    fn default() -> Self {
        MatchingConstants {
            break_cutoff: default_break_cutoff(),
            name_cutoff: default_name_cutoff(),
            max_suggestions: default_max_suggestions(),
        }
    }
}

fn default_break_cutoff() -> f64 {
    0.8
}
fn default_name_cutoff() -> f64 {
    0.5
}
fn default_max_suggestions() -> usize {
    3
}

/// Constants shipped with the crate
pub fn default_constants() -> EngineConstants {
    let toml = include_str!("../../config/engine.toml");
    super::parse_toml(toml).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_toml_uses_defaults() {
        let toml = r#"
[damage]
weakpart_weight = 0.6

[rewards]
gathers_per_site = 2.0
"#;
        let constants: EngineConstants = crate::config::parse_toml(toml).unwrap();
        assert!((constants.damage.weakpart_weight - 0.6).abs() < f64::EPSILON);
        assert!((constants.damage.break_weight - 0.25).abs() < f64::EPSILON);
        assert!((constants.rewards.gathers_per_site - 2.0).abs() < f64::EPSILON);
        assert_eq!(constants.rewards.secret_area, "Secret");
        assert!((constants.matching.break_cutoff - 0.8).abs() < f64::EPSILON);
    }

    #[test]
    fn test_embedded_constants_match_defaults() {
        assert_eq!(default_constants(), EngineConstants::default());
    }
}
