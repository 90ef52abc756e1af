//! DamageEngine - weapon against monster, part by part

use super::breaks::break_find;
use super::formula::{effective_hitzone, element_damage, raw_damage};
use super::part::{PartDamage, PartDamageState, PartState, StateWeights};
use super::phial::{phial_damage, PhialDamage, BURST_LEVELS};
use super::weapon::WeaponState;
use crate::config::{DamageConstants, EngineConstants};
use crate::error::{HuntError, HuntResult, Warning};
use crate::model::{Monster, MonsterDamageRow, Weapon};
use crate::modifiers::{affinity_multiplier, ModifierTables, SkillConfig};
use crate::types::{GameVariant, WeaponClass};
use indexmap::IndexMap;
use serde::Serialize;
use tracing::debug;

/// Scalar summaries over all parts
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct DamageSummary {
    pub uniform: f64,
    pub raw: f64,
    pub element: f64,
    pub weakpart_raw: f64,
    pub weakpart_element: f64,
    pub break_raw: f64,
    pub break_element: f64,
    pub break_only: f64,
}

impl DamageSummary {
    /// Named values in listing order
    pub fn entries(&self) -> [(&'static str, f64); 8] {
        [
            ("uniform", self.uniform),
            ("raw", self.raw),
            ("weakpart_raw", self.weakpart_raw),
            ("element", self.element),
            ("weakpart_element", self.weakpart_element),
            ("break_raw", self.break_raw),
            ("break_element", self.break_element),
            ("break_only", self.break_only),
        ]
    }
}

/// Damage of one weapon/motion/skills combination against one monster
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeaponMonsterDamage {
    pub weapon: WeaponState,
    pub monster: String,
    pub motion: f64,
    pub parts: IndexMap<String, PartDamage>,
    /// Burst attacks per part, charge blades only
    pub phials: IndexMap<String, Vec<PhialDamage>>,
    pub weak_raw_part: Option<String>,
    pub weak_element_part: Option<String>,
    pub summary: DamageSummary,
    pub warnings: Vec<Warning>,
    #[serde(skip)]
    weights: (StateWeights, f64),
}

impl WeaponMonsterDamage {
    pub fn get(&self, part: &str) -> Option<&PartDamage> {
        self.parts.get(part)
    }

    pub fn part_names(&self) -> impl Iterator<Item = &str> {
        self.parts.keys().map(String::as_str)
    }

    pub fn break_count(&self) -> usize {
        self.parts.values().filter(|p| p.is_breakable()).count()
    }

    /// Average of one part under the engine's state weights
    pub fn part_average(&self, part: &PartDamage) -> f64 {
        part.average(self.weights.0)
    }

    fn summarise(&mut self) {
        let weights = self.weights.0;
        let weakpart_weight = self.weights.1;
        let parts: Vec<&PartDamage> = self.parts.values().collect();
        if parts.is_empty() {
            self.summary = DamageSummary::default();
            return;
        }
        let n = parts.len() as f64;
        let averages: Vec<f64> = parts.iter().map(|p| p.average(weights)).collect();

        let weighted = |weight: &dyn Fn(&PartDamage) -> f64| {
            let total: f64 = parts.iter().map(|p| weight(*p)).sum();
            if total == 0.0 {
                return 0.0;
            }
            parts.iter().zip(&averages).map(|(p, a)| a * weight(*p)).sum::<f64>() / total
        };

        let weak_raw = weakest(&parts, PartDamage::hitzone);
        let weak_element = weakest(&parts, PartDamage::element_hitzone);

        let weakpart = |weak: usize| {
            if parts.len() == 1 {
                return averages[0];
            }
            let other = (1.0 - weakpart_weight) / (n - 1.0);
            averages
                .iter()
                .enumerate()
                .map(|(i, a)| if i == weak { a * weakpart_weight } else { a * other })
                .sum::<f64>()
        };

        let breakables = parts.iter().filter(|p| p.is_breakable()).count();
        let break_weakpart = |weak: usize| {
            if breakables == 0 {
                return 0.0;
            }
            let mut count = breakables + 1;
            let mut sum = 0.0;
            for (i, part) in parts.iter().enumerate() {
                if i == weak {
                    sum += averages[i];
                    if part.is_breakable() {
                        count -= 1;
                    }
                } else if part.is_breakable() {
                    sum += part.total_break();
                }
            }
            sum / count as f64
        };

        let break_only = if breakables == 0 {
            0.0
        } else {
            parts
                .iter()
                .filter(|p| p.is_breakable())
                .map(|p| p.total_break())
                .sum::<f64>()
                / breakables as f64
        };

        self.summary = DamageSummary {
            uniform: averages.iter().sum::<f64>() / n,
            raw: weighted(&PartDamage::hitzone),
            element: weighted(&PartDamage::element_hitzone),
            weakpart_raw: weakpart(weak_raw),
            weakpart_element: weakpart(weak_element),
            break_raw: break_weakpart(weak_raw),
            break_element: break_weakpart(weak_element),
            break_only,
        };
        self.weak_raw_part = Some(parts[weak_raw].name.clone());
        self.weak_element_part = Some(parts[weak_element].name.clone());
    }
}

/// Index of the part with the highest hitzone; first wins ties
fn weakest(parts: &[&PartDamage], hitzone: fn(&PartDamage) -> f64) -> usize {
    let mut best = 0;
    for i in 1..parts.len() {
        if hitzone(parts[i]) > hitzone(parts[best]) {
            best = i;
        }
    }
    best
}

/// Damage engine for one game variant
///
/// Modifier tables are chosen at construction and never change.
#[derive(Debug, Clone)]
pub struct DamageEngine {
    tables: ModifierTables,
    constants: DamageConstants,
    break_cutoff: f64,
}

impl DamageEngine {
    pub fn new(variant: GameVariant, constants: &EngineConstants) -> Self {
        DamageEngine {
            tables: ModifierTables::for_variant(variant),
            constants: constants.damage.clone(),
            break_cutoff: constants.matching.break_cutoff,
        }
    }

    pub fn variant(&self) -> GameVariant {
        self.tables.variant
    }

    pub fn tables(&self) -> &ModifierTables {
        &self.tables
    }

    pub fn weapon_state(&self, weapon: &Weapon, skills: &SkillConfig) -> HuntResult<WeaponState> {
        skills.validate(&self.tables)?;
        WeaponState::derive(weapon, skills, &self.tables, &self.constants)
    }

    fn weakness_exploit(&self, skills: &SkillConfig) -> HuntResult<i32> {
        self.constants
            .weakness_exploit_affinity
            .get(skills.weakness_exploit as usize)
            .copied()
            .ok_or_else(|| {
                HuntError::InvalidConfig(format!(
                    "no weakness exploit affinity configured for level {}",
                    skills.weakness_exploit
                ))
            })
    }

    /// Affinity multiplier on a part with the given effective hitzone
    fn part_affinity(&self, state: &WeaponState, skills: &SkillConfig, hitzone: f64, exploit: i32) -> f64 {
        let mut affinity = state.affinity;
        if hitzone >= self.constants.weakness_exploit_threshold {
            affinity += exploit;
        }
        affinity_multiplier(affinity as f64, skills.critical_boost)
    }

    /// Damage of one hitzone row
    ///
    /// Each element contribution is floored on its own and then scaled by
    /// the element share, so a dual-element part can land on a half point.
    fn state_damage(
        &self,
        state: &WeaponState,
        skills: &SkillConfig,
        row: &MonsterDamageRow,
        motion: f64,
        exploit: i32,
    ) -> PartDamageState {
        let hitzone = effective_hitzone(state.damage_type, row, self.constants.lance_impact_factor);
        let affinity = self.part_affinity(state, skills, hitzone, exploit);
        let raw = raw_damage(state.true_raw, state.sharpness_raw, affinity, motion, hitzone);

        let share = state.element_share();
        let element = state
            .elements
            .iter()
            .filter(|e| e.element.is_elemental())
            .map(|e| {
                share * element_damage(e.attack, state.sharpness_element, row.element_hitzone(e.element) as f64)
            })
            .sum();
        let element_hitzone = state
            .primary_element()
            .filter(|e| e.element.is_elemental())
            .map(|e| row.element_hitzone(e.element) as f64)
            .unwrap_or(0.0);

        PartDamageState {
            raw,
            element,
            hitzone,
            element_hitzone,
        }
    }

    /// Damage of `weapon` using a motion of power `motion` on every part of `monster`
    ///
    /// `breaks` are the part names of the monster's break rewards.
    pub fn compute(
        &self,
        weapon: &Weapon,
        monster: &Monster,
        rows: &[MonsterDamageRow],
        breaks: &[String],
        motion: f64,
        skills: &SkillConfig,
    ) -> HuntResult<WeaponMonsterDamage> {
        let state = self.weapon_state(weapon, skills)?;
        let exploit = self.weakness_exploit(skills)?;

        let mut states: IndexMap<String, IndexMap<PartState, PartDamageState>> = IndexMap::new();
        for row in rows.iter().filter(|r| r.cut != -1) {
            let (part, label) = row.part_and_state();
            let damage = self.state_damage(&state, skills, row, motion, exploit);
            states
                .entry(part.to_string())
                .or_default()
                .insert(PartState::parse(label), damage);
        }

        let part_names: Vec<String> = states.keys().cloned().collect();
        let mut parts = IndexMap::new();
        for (name, mut by_state) in states {
            let Some(default) = by_state.shift_remove(&PartState::Default) else {
                debug!(monster = %monster.name, part = %name, "dropping part without default state");
                continue;
            };
            let listed_break = break_find(&name, &part_names, breaks, self.break_cutoff).is_some();
            parts.insert(
                name.clone(),
                PartDamage {
                    name,
                    default,
                    states: by_state,
                    listed_break,
                },
            );
        }

        let mut warnings = Vec::new();
        if let Some(wanted) = &skills.parts {
            for name in wanted {
                if !parts.keys().any(|p| p.eq_ignore_ascii_case(name)) {
                    warnings.push(Warning::UnknownPart { part: name.clone() }.emit());
                }
            }
            parts.retain(|p, _| wanted.iter().any(|w| w.eq_ignore_ascii_case(p)));
        }

        let mut phials = IndexMap::new();
        if state.class == WeaponClass::ChargeBlade && state.phial.is_some() {
            for (name, part) in &parts {
                let affinity = self.part_affinity(&state, skills, part.hitzone(), exploit);
                let levels = BURST_LEVELS
                    .iter()
                    .map(|&level| phial_damage(&state, skills, &part.default, affinity, level))
                    .collect::<HuntResult<Vec<_>>>()?;
                phials.insert(name.clone(), levels);
            }
        }

        debug!(
            weapon = %state.name,
            monster = %monster.name,
            motion,
            parts = parts.len(),
            "computed weapon damage"
        );

        let mut result = WeaponMonsterDamage {
            weapon: state,
            monster: monster.name.clone(),
            motion,
            parts,
            phials,
            weak_raw_part: None,
            weak_element_part: None,
            summary: DamageSummary::default(),
            warnings,
            weights: (
                StateWeights {
                    break_weight: self.constants.break_weight,
                    rage_weight: self.constants.rage_weight,
                },
                self.constants.weakpart_weight,
            ),
        };
        result.summarise();
        Ok(result)
    }

    /// Burst attack on one part at one level; charge blades only
    pub fn phial(
        &self,
        damage: &WeaponMonsterDamage,
        part: &str,
        level: u8,
        skills: &SkillConfig,
    ) -> HuntResult<Option<PhialDamage>> {
        let Some(p) = damage.get(part) else {
            return Ok(None);
        };
        let exploit = self.weakness_exploit(skills)?;
        let affinity = self.part_affinity(&damage.weapon, skills, p.hitzone(), exploit);
        phial_damage(&damage.weapon, skills, &p.default, affinity, level).map(Some)
    }
}
