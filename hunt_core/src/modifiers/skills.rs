//! Player skill configuration and skill ladders

use super::SharpnessTable;
use crate::error::HuntError;
use crate::types::{GameVariant, SharpnessColor};
use serde::{Deserialize, Serialize};

/// Attack Up: true raw bonus per level
pub const ATTACK_UP: [f64; 5] = [0.0, 10.0, 15.0, 20.0, 25.0];

const CRITICAL_EYE_CLASSIC: &[i32] = &[0, 10, 15, 20, 30];
const CRITICAL_EYE_ALT: &[i32] = &[0, 5, 10, 15, 20, 25, 30, 40];

/// Flat element added by (element) Atk +1/+2/+3, in true element units
const ELEMENT_FLAT: [f64; 3] = [4.0, 6.0, 9.0];

/// Immutable modifier tables selected once per game variant
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModifierTables {
    pub variant: GameVariant,
    pub sharpness: SharpnessTable,
    pub critical_eye: &'static [i32],
}

impl ModifierTables {
    pub fn for_variant(variant: GameVariant) -> Self {
        match variant {
            GameVariant::Classic => ModifierTables {
                variant,
                sharpness: SharpnessTable::CLASSIC,
                critical_eye: CRITICAL_EYE_CLASSIC,
            },
            GameVariant::Generations | GameVariant::World | GameVariant::Rise => ModifierTables {
                variant,
                sharpness: SharpnessTable::ALT,
                critical_eye: CRITICAL_EYE_ALT,
            },
        }
    }

    pub fn critical_eye_delta(&self, level: u8) -> Result<i32, HuntError> {
        self.critical_eye
            .get(level as usize)
            .copied()
            .ok_or_else(|| {
                HuntError::InvalidConfig(format!(
                    "critical eye level {} exceeds {} for {}",
                    level,
                    self.critical_eye.len() - 1,
                    self.variant.name()
                ))
            })
    }
}

/// Player skills and query options for one damage computation
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SkillConfig {
    /// 0 = normal gauge, 1 = Sharpness +1, 2 = +2
    pub sharpness_plus: u8,
    /// Unlock the hidden (awakened) element
    pub awaken: bool,
    /// 0..=4: none, S, M, L, XL
    pub attack_up: u8,
    /// Index into the variant's critical-eye ladder
    pub critical_eye: u8,
    /// 0 none, 1..=3 (element) Atk +1..+3, 4 Element Attack Up, 5 both +3 and Element Attack Up
    pub element_up: u8,
    /// 0 none, 1 novice, 2 god
    pub artillery: u8,
    pub blunt_power: bool,
    /// Frenzy overcome bonus: 0, 15 or 30
    pub frenzy: u8,
    pub anti_species: bool,
    /// 0..=3, raises the critical bonus to 25 + 5 * level percent
    pub critical_boost: u8,
    /// 0..=3, resolved to an affinity delta through the engine constants
    pub weakness_exploit: u8,
    /// Charge blade shield charged
    pub shield_charged: bool,
    /// Override the variant's displayed/true attack interpretation
    pub true_attack: Option<bool>,
    /// Restrict computation to these parts
    pub parts: Option<Vec<String>>,
}

impl SkillConfig {
    pub fn validate(&self, tables: &ModifierTables) -> Result<(), HuntError> {
        if self.sharpness_plus > 2 {
            return Err(range_error("sharpness plus", self.sharpness_plus, 2));
        }
        if self.attack_up as usize >= ATTACK_UP.len() {
            return Err(range_error("attack up", self.attack_up, 4));
        }
        tables.critical_eye_delta(self.critical_eye)?;
        if self.element_up > 5 {
            return Err(range_error("element attack up", self.element_up, 5));
        }
        if self.artillery > 2 {
            return Err(range_error("artillery", self.artillery, 2));
        }
        if !matches!(self.frenzy, 0 | 15 | 30) {
            return Err(HuntError::InvalidConfig(format!(
                "frenzy bonus must be 0, 15 or 30, got {}",
                self.frenzy
            )));
        }
        if self.critical_boost > 3 {
            return Err(range_error("critical boost", self.critical_boost, 3));
        }
        if self.weakness_exploit > 3 {
            return Err(range_error("weakness exploit", self.weakness_exploit, 3));
        }
        Ok(())
    }

    /// Whether attack fields hold displayed values for this query
    pub fn displayed_attack(&self, variant: GameVariant) -> bool {
        match self.true_attack {
            Some(is_true) => !is_true,
            None => variant.uses_displayed_attack(),
        }
    }

    pub fn attack_bonus(&self) -> f64 {
        ATTACK_UP[(self.attack_up as usize).min(ATTACK_UP.len() - 1)]
    }

    /// Human readable list of active skills
    pub fn names(&self) -> Vec<String> {
        let mut names = Vec::new();
        if self.sharpness_plus > 0 {
            names.push(format!("Sharpness +{}", self.sharpness_plus));
        }
        if self.awaken {
            names.push("Awaken".to_string());
        }
        match self.attack_up {
            0 => {}
            1 => names.push("Attack Up (S)".to_string()),
            2 => names.push("Attack Up (M)".to_string()),
            3 => names.push("Attack Up (L)".to_string()),
            _ => names.push("Attack Up (XL)".to_string()),
        }
        if self.critical_eye > 0 {
            names.push(format!("Critical Eye {}", self.critical_eye));
        }
        match self.element_up {
            0 => {}
            1..=3 => names.push(format!("(element) Atk +{}", self.element_up)),
            4 => names.push("Element Attack Up".to_string()),
            _ => names.push("(element) Atk +3, Element Attack Up".to_string()),
        }
        match self.artillery {
            0 => {}
            1 => names.push("Artillery Novice".to_string()),
            _ => names.push("Artillery God".to_string()),
        }
        if self.blunt_power {
            names.push("Blunt Power".to_string());
        }
        if self.frenzy > 0 {
            names.push(format!("Frenzy +{}", self.frenzy));
        }
        if self.anti_species {
            names.push("Anti-species".to_string());
        }
        if self.critical_boost > 0 {
            names.push(format!("Critical Boost {}", self.critical_boost));
        }
        if self.weakness_exploit > 0 {
            names.push(format!("Weakness Exploit {}", self.weakness_exploit));
        }
        names
    }
}

fn range_error(skill: &str, level: u8, max: u8) -> HuntError {
    HuntError::InvalidConfig(format!("{} level {} outside 0..={}", skill, level, max))
}

/// Blunt Power raw bonus at the given sharpness
pub fn blunt_power_bonus(color: SharpnessColor) -> f64 {
    match color {
        SharpnessColor::Red | SharpnessColor::Orange => 30.0,
        SharpnessColor::Yellow => 25.0,
        SharpnessColor::Green => 15.0,
        _ => 0.0,
    }
}

/// Apply element attack up to a true element value
pub fn apply_element_up(element: f64, level: u8) -> f64 {
    match level {
        1..=3 => element * (1.0 + 0.05 * level as f64) + ELEMENT_FLAT[level as usize - 1],
        4 => element * 1.1,
        5 => (element * 1.15 + ELEMENT_FLAT[2]) * 1.1,
        _ => element,
    }
}

/// Expected per-hit multiplier from affinity
///
/// Positive crits add `25 + 5 * critical_boost` percent, negative crits
/// take 25 percent away. Affinity is clamped to [-100, 100].
pub fn affinity_multiplier(affinity: f64, critical_boost: u8) -> f64 {
    let affinity = affinity.clamp(-100.0, 100.0);
    if affinity >= 0.0 {
        let bonus = 25.0 + 5.0 * critical_boost as f64;
        1.0 + affinity * bonus / 10000.0
    } else {
        1.0 + affinity / 400.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ladders_by_variant() {
        let classic = ModifierTables::for_variant(GameVariant::Classic);
        assert_eq!(classic.critical_eye_delta(4).unwrap(), 30);
        assert!(classic.critical_eye_delta(5).is_err());
        let rise = ModifierTables::for_variant(GameVariant::Rise);
        assert_eq!(rise.critical_eye_delta(7).unwrap(), 40);
    }

    #[test]
    fn test_validate_ranges() {
        let tables = ModifierTables::for_variant(GameVariant::Classic);
        assert!(SkillConfig::default().validate(&tables).is_ok());
        let bad = [
            SkillConfig { sharpness_plus: 3, ..Default::default() },
            SkillConfig { attack_up: 5, ..Default::default() },
            SkillConfig { critical_eye: 7, ..Default::default() },
            SkillConfig { artillery: 3, ..Default::default() },
            SkillConfig { frenzy: 10, ..Default::default() },
            SkillConfig { critical_boost: 4, ..Default::default() },
        ];
        for config in bad {
            assert!(matches!(config.validate(&tables), Err(HuntError::InvalidConfig(_))));
        }
    }

    #[test]
    fn test_affinity_multiplier() {
        assert!((affinity_multiplier(0.0, 0) - 1.0).abs() < f64::EPSILON);
        assert!((affinity_multiplier(40.0, 0) - 1.1).abs() < 1e-12);
        assert!((affinity_multiplier(-25.0, 0) - (1.0 - 25.0 / 400.0)).abs() < 1e-12);
        // boost level 3: +40% crits
        assert!((affinity_multiplier(100.0, 3) - 1.4).abs() < 1e-12);
        assert!((affinity_multiplier(150.0, 0) - affinity_multiplier(100.0, 0)).abs() < f64::EPSILON);
    }

    #[test]
    fn test_blunt_and_element_up() {
        assert!((blunt_power_bonus(SharpnessColor::Orange) - 30.0).abs() < f64::EPSILON);
        assert!((blunt_power_bonus(SharpnessColor::Green) - 15.0).abs() < f64::EPSILON);
        assert!(blunt_power_bonus(SharpnessColor::Blue).abs() < f64::EPSILON);
        assert!((apply_element_up(20.0, 0) - 20.0).abs() < f64::EPSILON);
        assert!((apply_element_up(20.0, 1) - 25.0).abs() < 1e-12);
        assert!((apply_element_up(20.0, 4) - 22.0).abs() < 1e-12);
    }

    #[test]
    fn test_displayed_attack_override() {
        let config = SkillConfig::default();
        assert!(config.displayed_attack(GameVariant::Classic));
        assert!(!config.displayed_attack(GameVariant::World));
        let forced = SkillConfig { true_attack: Some(true), ..Default::default() };
        assert!(!forced.displayed_attack(GameVariant::Classic));
    }
}
