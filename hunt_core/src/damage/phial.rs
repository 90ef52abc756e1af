//! Charge blade phial bursts

use super::formula::raw_damage;
use super::part::PartDamageState;
use super::weapon::WeaponState;
use crate::error::{HuntError, HuntResult};
use crate::modifiers::SkillConfig;
use crate::types::WeaponClass;
use serde::Serialize;
use std::str::FromStr;

/// Burst levels: shield thrust, side chop, double swing, AED, super AED
pub const BURST_LEVELS: [u8; 5] = [0, 1, 2, 3, 5];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum PhialType {
    Impact,
    Element,
}

impl FromStr for PhialType {
    type Err = HuntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        if lower.starts_with("impact") {
            Ok(PhialType::Impact)
        } else if lower.starts_with("element") {
            Ok(PhialType::Element)
        } else {
            Err(HuntError::InvalidConfig(format!("unknown phial type '{}'", s)))
        }
    }
}

/// Damage of one burst attack on one part
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PhialDamage {
    pub level: u8,
    pub raw: f64,
    pub element: f64,
    /// Phial explosion; not floored
    pub burst: f64,
}

impl PhialDamage {
    pub fn total(&self) -> f64 {
        self.raw + self.element + self.burst
    }
}

/// Cut motions of the attack at a burst level
pub fn motions(level: u8, shield_charged: bool) -> HuntResult<&'static [f64]> {
    Ok(match (level, shield_charged) {
        (0, _) => &[8.0, 12.0],
        (1, true) => &[31.0],
        (1, false) => &[26.0],
        (2, true) => &[21.0, 96.0],
        (2, false) => &[18.0, 80.0],
        (3, true) => &[108.0],
        (3, false) => &[90.0],
        (5, _) => &[25.0, 99.0, 100.0],
        _ => {
            return Err(HuntError::InvalidConfig(format!(
                "phial burst level {} not one of 0, 1, 2, 3, 5",
                level
            )))
        }
    })
}

fn artillery_multiplier(artillery: u8) -> f64 {
    match artillery {
        1 => 1.3,
        2 => 1.4,
        _ => 1.0,
    }
}

/// Phial attack at `level` against one part state
///
/// `affinity_multiplier` is the per-part value, weakness exploit included.
pub fn phial_damage(
    weapon: &WeaponState,
    skills: &SkillConfig,
    state: &PartDamageState,
    affinity_multiplier: f64,
    level: u8,
) -> HuntResult<PhialDamage> {
    if weapon.class != WeaponClass::ChargeBlade {
        return Err(HuntError::PolicyConflict(format!(
            "phial damage requested for {} ({})",
            weapon.name, weapon.class
        )));
    }
    let phial = weapon
        .phial
        .ok_or_else(|| HuntError::InvalidConfig(format!("{} has no phial type", weapon.name)))?;
    let motions = motions(level, skills.shield_charged)?;

    let raw = motions
        .iter()
        .map(|&m| {
            raw_damage(
                weapon.true_raw,
                weapon.sharpness_raw,
                affinity_multiplier,
                m,
                state.hitzone,
            )
        })
        .sum();
    let element = motions.len() as f64 * state.element;

    let burst_level = match level {
        // a charged shield thrust fires one phial
        0 if skills.shield_charged => 1.0,
        level => level as f64,
    };
    let charged = skills.shield_charged && level != 5;
    let burst = match phial {
        PhialType::Impact => {
            let base = match level {
                5 => 0.33,
                3 => 0.10,
                _ => 0.05,
            };
            let shield = if charged { 1.3 } else { 1.0 };
            weapon.true_raw * base * artillery_multiplier(skills.artillery) * shield * burst_level
        }
        PhialType::Element => {
            let base = match level {
                5 => 13.5,
                3 => 4.5,
                _ => 3.0,
            };
            let shield = if charged { 1.35 } else { 1.0 };
            weapon
                .primary_element()
                .map(|e| e.attack * base * burst_level * state.element_hitzone / 100.0 * shield)
                .unwrap_or(0.0)
        }
    };

    Ok(PhialDamage {
        level,
        raw,
        element,
        burst,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{DamageType, Element};
    use crate::damage::weapon::ElementAttack;

    fn charge_blade(phial: PhialType, element: Option<ElementAttack>) -> WeaponState {
        WeaponState {
            name: "Elite Blade".to_string(),
            class: WeaponClass::ChargeBlade,
            damage_type: DamageType::Cut,
            true_raw: 200.0,
            affinity: 0,
            sharpness: None,
            sharpness_raw: 1.0,
            sharpness_element: 1.0,
            elements: element.into_iter().collect(),
            phial: Some(phial),
        }
    }

    fn part(hitzone: f64, element: f64, element_hitzone: f64) -> PartDamageState {
        PartDamageState {
            raw: 0.0,
            element,
            hitzone,
            element_hitzone,
        }
    }

    #[test]
    fn test_impact_super_aed_skips_shield_bonus() {
        let weapon = charge_blade(PhialType::Impact, None);
        let skills = SkillConfig {
            shield_charged: true,
            artillery: 2,
            ..Default::default()
        };
        let dmg = phial_damage(&weapon, &skills, &part(45.0, 0.0, 0.0), 1.0, 5).unwrap();
        assert!((dmg.burst - 462.0).abs() < 1e-9);
        // 25, 99, 100 at hitzone 45
        assert_eq!(dmg.raw, 22.0 + 89.0 + 90.0);
    }

    #[test]
    fn test_charged_shield_thrust_fires_one_phial() {
        let weapon = charge_blade(PhialType::Impact, None);
        let plain = phial_damage(&weapon, &SkillConfig::default(), &part(45.0, 0.0, 0.0), 1.0, 0).unwrap();
        assert_eq!(plain.burst, 0.0);
        let skills = SkillConfig {
            shield_charged: true,
            ..Default::default()
        };
        let charged = phial_damage(&weapon, &skills, &part(45.0, 0.0, 0.0), 1.0, 0).unwrap();
        assert!((charged.burst - 200.0 * 0.05 * 1.3).abs() < 1e-9);
    }

    #[test]
    fn test_element_phial() {
        let weapon = charge_blade(
            PhialType::Element,
            Some(ElementAttack {
                element: Element::Fire,
                attack: 30.0,
            }),
        );
        let dmg = phial_damage(&weapon, &SkillConfig::default(), &part(45.0, 6.0, 20.0), 1.0, 3).unwrap();
        assert!((dmg.burst - 30.0 * 4.5 * 3.0 * 0.2).abs() < 1e-9);
        assert_eq!(dmg.element, 6.0);
    }

    #[test]
    fn test_level_and_class_checks() {
        let weapon = charge_blade(PhialType::Impact, None);
        let state = part(45.0, 0.0, 0.0);
        assert!(matches!(
            phial_damage(&weapon, &SkillConfig::default(), &state, 1.0, 4),
            Err(HuntError::InvalidConfig(_))
        ));
        let mut sword = weapon.clone();
        sword.class = WeaponClass::GreatSword;
        assert!(matches!(
            phial_damage(&sword, &SkillConfig::default(), &state, 1.0, 1),
            Err(HuntError::PolicyConflict(_))
        ));
    }

    #[test]
    fn test_phial_type_parse() {
        assert_eq!("Impact Phial".parse::<PhialType>().unwrap(), PhialType::Impact);
        assert_eq!("Element".parse::<PhialType>().unwrap(), PhialType::Element);
        assert!("Power".parse::<PhialType>().is_err());
    }
}
