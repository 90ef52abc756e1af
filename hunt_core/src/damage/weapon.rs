//! Weapon state derived once per (weapon, skills) pair

use super::phial::PhialType;
use crate::config::DamageConstants;
use crate::error::{HuntError, HuntResult};
use crate::model::Weapon;
use crate::modifiers::{apply_element_up, blunt_power_bonus, ModifierTables, SkillConfig};
use crate::types::{DamageType, Element, SharpnessColor, WeaponClass};
use serde::Serialize;

/// One element the weapon deals, in true units after skills
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ElementAttack {
    pub element: Element,
    pub attack: f64,
}

/// Numbers every per-part computation starts from
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeaponState {
    pub name: String,
    pub class: WeaponClass,
    pub damage_type: DamageType,
    pub true_raw: f64,
    /// Affinity before weakness exploit, unclamped
    pub affinity: i32,
    /// `None` for weapons without a gauge (gunners)
    pub sharpness: Option<SharpnessColor>,
    pub sharpness_raw: f64,
    pub sharpness_element: f64,
    /// Empty for raw weapons; two entries for dual-element blades
    pub elements: Vec<ElementAttack>,
    pub phial: Option<PhialType>,
}

impl WeaponState {
    pub fn derive(
        weapon: &Weapon,
        skills: &SkillConfig,
        tables: &ModifierTables,
        constants: &DamageConstants,
    ) -> HuntResult<Self> {
        let class = weapon.class()?;
        let displayed = skills.displayed_attack(tables.variant);

        let sharpness = if class.is_gunner() {
            None
        } else {
            let gauge = weapon
                .sharpness()?
                .ok_or_else(|| HuntError::BadSharpness(format!("{} has no sharpness", weapon.name)))?;
            Some(gauge.level(skills.sharpness_plus)?)
        };
        let (sharpness_raw, sharpness_element) = match sharpness {
            Some(color) => (
                tables.sharpness.raw_modifier(color)?,
                tables.sharpness.element_modifier(color)?,
            ),
            None => (1.0, 1.0),
        };

        let mut true_raw = if displayed {
            weapon.attack / class.multiplier()
        } else {
            weapon.attack
        };
        true_raw += skills.attack_bonus();
        if skills.blunt_power {
            if let Some(color) = sharpness {
                true_raw += blunt_power_bonus(color);
            }
        }
        if skills.anti_species {
            true_raw *= constants.anti_species_multiplier;
        }

        let affinity = weapon.affinity(skills.frenzy > 0)?
            + skills.frenzy as i32
            + tables.critical_eye_delta(skills.critical_eye)?;

        let element_value = |attack: Option<u32>| {
            let attack = attack.unwrap_or(0) as f64;
            let attack = if displayed { attack / 10.0 } else { attack };
            apply_element_up(attack, skills.element_up)
        };
        let mut elements = Vec::new();
        match weapon.element()? {
            Some(element) => elements.push(ElementAttack {
                element,
                attack: element_value(weapon.element_attack),
            }),
            None if skills.awaken => {
                if let Some(element) = weapon.awaken_element()? {
                    elements.push(ElementAttack {
                        element,
                        attack: element_value(weapon.awaken_attack),
                    });
                }
            }
            None => {}
        }
        if let Some(element) = weapon.element_2()? {
            elements.push(ElementAttack {
                element,
                attack: element_value(weapon.element_2_attack),
            });
        }

        let phial = match (class, weapon.phial.as_deref()) {
            (WeaponClass::ChargeBlade, Some(text)) => Some(text.parse()?),
            _ => None,
        };

        Ok(WeaponState {
            name: weapon.name.clone(),
            class,
            damage_type: class.damage_type(),
            true_raw,
            affinity,
            sharpness,
            sharpness_raw,
            sharpness_element,
            elements,
            phial,
        })
    }

    /// Element damage is split evenly between two elements
    pub fn element_share(&self) -> f64 {
        if self.elements.len() > 1 {
            1.0 / self.elements.len() as f64
        } else {
            1.0
        }
    }

    pub fn primary_element(&self) -> Option<ElementAttack> {
        self.elements.first().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::GameVariant;

    fn weapon(value: serde_json::Value) -> Weapon {
        serde_json::from_value(value).unwrap()
    }

    fn derive(w: &Weapon, skills: &SkillConfig, variant: GameVariant) -> HuntResult<WeaponState> {
        WeaponState::derive(w, skills, &ModifierTables::for_variant(variant), &DamageConstants::default())
    }

    #[test]
    fn test_displayed_attack_converted() {
        let w = weapon(serde_json::json!({
            "id": 1, "name": "Buster Sword", "wtype": "Great Sword", "attack": 480.0,
            "affinity": "10", "element": "Fire", "element_attack": 200,
            "sharpness": "5.5.10.5.2.0 5.5.10.5.2.3"
        }));
        let state = derive(&w, &SkillConfig::default(), GameVariant::Classic).unwrap();
        assert!((state.true_raw - 100.0).abs() < 1e-9);
        assert_eq!(state.affinity, 10);
        assert_eq!(state.sharpness, Some(SharpnessColor::Blue));
        assert!((state.sharpness_raw - 1.25).abs() < f64::EPSILON);
        assert_eq!(state.elements.len(), 1);
        assert!((state.elements[0].attack - 20.0).abs() < 1e-9);
    }

    #[test]
    fn test_skills_raise_raw_and_affinity() {
        let w = weapon(serde_json::json!({
            "id": 1, "name": "Iron Hammer", "wtype": "Hammer", "attack": 200.0,
            "affinity": "-35/10", "sharpness": [5, 5, 10, 0, 0, 0, 0]
        }));
        let skills = SkillConfig {
            true_attack: Some(true),
            attack_up: 2,
            blunt_power: true,
            frenzy: 15,
            critical_eye: 1,
            ..Default::default()
        };
        let state = derive(&w, &skills, GameVariant::Classic).unwrap();
        // yellow sharpness: +25 blunt power
        assert!((state.true_raw - 240.0).abs() < 1e-9);
        assert_eq!(state.affinity, 45 + 15 + 10);
        assert_eq!(state.damage_type, DamageType::Impact);
    }

    #[test]
    fn test_chaotic_affinity_with_frenzy() {
        let w = weapon(serde_json::json!({
            "id": 1, "name": "Chaos Blade", "wtype": "Long Sword", "attack": 330.0,
            "affinity": "-35/10", "sharpness": [5, 5, 10, 0, 0, 0, 0]
        }));
        let plain = derive(&w, &SkillConfig::default(), GameVariant::Classic).unwrap();
        assert_eq!(plain.affinity, -25);
        let frenzy = SkillConfig { frenzy: 15, ..Default::default() };
        assert_eq!(derive(&w, &frenzy, GameVariant::Classic).unwrap().affinity, 60);
    }

    #[test]
    fn test_awaken_and_dual_elements() {
        let hidden = weapon(serde_json::json!({
            "id": 1, "name": "Hidden", "wtype": "Sword and Shield", "attack": 140.0,
            "awaken": "Ice", "awaken_attack": 250, "sharpness": [5, 5, 10, 5, 0, 0, 0]
        }));
        assert!(derive(&hidden, &SkillConfig::default(), GameVariant::Classic).unwrap().elements.is_empty());
        let awaken = SkillConfig { awaken: true, ..Default::default() };
        let state = derive(&hidden, &awaken, GameVariant::Classic).unwrap();
        assert_eq!(state.primary_element().unwrap().element, Element::Ice);

        let dual = weapon(serde_json::json!({
            "id": 2, "name": "Dual", "wtype": "Dual Blades", "attack": 140.0,
            "element": "Fire", "element_attack": 200, "element_2": "Ice", "element_2_attack": 180,
            "sharpness": [5, 5, 10, 5, 0, 0, 0]
        }));
        let state = derive(&dual, &SkillConfig::default(), GameVariant::Classic).unwrap();
        assert_eq!(state.elements.len(), 2);
        assert!((state.element_share() - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_gunner_has_neutral_sharpness() {
        let w = weapon(serde_json::json!({
            "id": 1, "name": "Hunter's Bow", "wtype": "Bow", "attack": 120.0
        }));
        let state = derive(&w, &SkillConfig::default(), GameVariant::Classic).unwrap();
        assert_eq!(state.sharpness, None);
        assert!((state.sharpness_raw - 1.0).abs() < f64::EPSILON);
        assert_eq!(state.damage_type, DamageType::Shot);
    }

    #[test]
    fn test_errors() {
        let purple = weapon(serde_json::json!({
            "id": 1, "name": "Purple", "wtype": "Long Sword", "attack": 330.0,
            "sharpness": [5, 5, 5, 5, 5, 5, 5]
        }));
        assert!(matches!(
            derive(&purple, &SkillConfig::default(), GameVariant::World),
            Err(HuntError::BadSharpness(_))
        ));
        assert!(derive(&purple, &SkillConfig::default(), GameVariant::Classic).is_ok());

        let bad_type = weapon(serde_json::json!({
            "id": 1, "name": "Odd", "wtype": "Tonfa", "attack": 100.0
        }));
        assert!(matches!(
            derive(&bad_type, &SkillConfig::default(), GameVariant::Classic),
            Err(HuntError::UnknownWeaponType(_))
        ));

        let bad_element = weapon(serde_json::json!({
            "id": 1, "name": "Odd", "wtype": "Great Sword", "attack": 100.0,
            "element": "Wind", "sharpness": [5, 5, 5, 0, 0, 0, 0]
        }));
        assert!(matches!(
            derive(&bad_element, &SkillConfig::default(), GameVariant::Classic),
            Err(HuntError::UnknownElement(_))
        ));
    }
}
