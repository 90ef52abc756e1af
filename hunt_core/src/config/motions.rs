//! Motion value catalog loading

use super::ConfigError;
use crate::fuzzy;
use crate::types::WeaponClass;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Deserialize)]
struct CatalogEntry {
    name: String,
    motions: Vec<MotionEntry>,
}

#[derive(Debug, Clone, Deserialize)]
struct MotionEntry {
    name: String,
    #[serde(rename = "type", default)]
    types: Vec<String>,
    power: Vec<u32>,
}

/// One attack motion of a weapon class
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MotionValue {
    pub name: String,
    /// Damage type tags (cut, impact, shot, fixed)
    pub types: Vec<String>,
    /// Power of every hit in the motion
    pub powers: Vec<u32>,
    /// Mean power per hit
    pub average: f64,
}

impl MotionValue {
    fn new(entry: MotionEntry) -> Self {
        let average = if entry.power.is_empty() {
            0.0
        } else {
            entry.power.iter().map(|&p| p as f64).sum::<f64>() / entry.power.len() as f64
        };
        MotionValue {
            name: entry.name,
            types: entry.types,
            powers: entry.power,
            average,
        }
    }

    pub fn has_type(&self, tag: &str) -> bool {
        self.types.iter().any(|t| t.eq_ignore_ascii_case(tag))
    }
}

/// All motions of one weapon class
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeaponMotions {
    pub weapon_class: WeaponClass,
    pub motions: IndexMap<String, MotionValue>,
    /// Mean of the per-motion averages
    pub average: f64,
}

impl WeaponMotions {
    pub fn get(&self, name: &str) -> Option<&MotionValue> {
        self.motions
            .values()
            .find(|m| m.name.eq_ignore_ascii_case(name))
    }

    /// Exact (case-insensitive) name match, else the closest name above `cutoff`
    pub fn find(&self, name: &str, cutoff: f64) -> Option<&MotionValue> {
        if let Some(motion) = self.get(name) {
            return Some(motion);
        }
        let names: Vec<&str> = self.motions.keys().map(String::as_str).collect();
        fuzzy::best_match(name, names.iter().copied(), cutoff)
            .and_then(|best| self.motions.get(best))
    }
}

/// Per-class motion value tables
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MotionValueDb {
    classes: IndexMap<WeaponClass, WeaponMotions>,
}

impl MotionValueDb {
    /// Load the catalog from a JSON file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let entries: Vec<CatalogEntry> = super::load_json(path)?;
        Self::from_entries(entries)
    }

    /// Parse the catalog from a JSON string
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let entries: Vec<CatalogEntry> = serde_json::from_str(content)?;
        Self::from_entries(entries)
    }

    /// Catalog shipped with the crate
    pub fn embedded() -> Result<Self, ConfigError> {
        Self::parse(include_str!("../../config/motion_values.json"))
    }

    fn from_entries(entries: Vec<CatalogEntry>) -> Result<Self, ConfigError> {
        let mut classes = IndexMap::new();
        for entry in entries {
            // "Sword" resolves to Sword and Shield in the class parser
            let weapon_class: WeaponClass = entry
                .name
                .parse()
                .map_err(|_| ConfigError::ValidationError(format!("unknown weapon class '{}'", entry.name)))?;
            let motions: IndexMap<String, MotionValue> = entry
                .motions
                .into_iter()
                .map(|m| (m.name.clone(), MotionValue::new(m)))
                .collect();
            let average = if motions.is_empty() {
                0.0
            } else {
                motions.values().map(|m| m.average).sum::<f64>() / motions.len() as f64
            };
            classes.insert(
                weapon_class,
                WeaponMotions {
                    weapon_class,
                    motions,
                    average,
                },
            );
        }
        Ok(MotionValueDb { classes })
    }

    pub fn get(&self, weapon_class: WeaponClass) -> Option<&WeaponMotions> {
        self.classes.get(&weapon_class)
    }

    pub fn average_power(&self, weapon_class: WeaponClass) -> Option<f64> {
        self.get(weapon_class).map(|m| m.average)
    }

    pub fn classes(&self) -> impl Iterator<Item = &WeaponMotions> {
        self.classes.values()
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CATALOG: &str = r#"[
        { "name": "Sword", "motions": [
            { "name": "Chop", "type": ["cut"], "power": [18] },
            { "name": "Shield Bash", "type": ["impact"], "power": [10, 20] }
        ]},
        { "name": "Great Sword", "motions": [
            { "name": "Draw Slash", "type": ["cut"], "power": [48] }
        ]}
    ]"#;

    #[test]
    fn test_sword_alias() {
        let db = MotionValueDb::parse(CATALOG).unwrap();
        let sns = db.get(WeaponClass::SwordAndShield).unwrap();
        assert_eq!(sns.motions.len(), 2);
        // (18 + 15) / 2
        assert!((sns.average - 16.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_find_motion() {
        let db = MotionValueDb::parse(CATALOG).unwrap();
        let sns = db.get(WeaponClass::SwordAndShield).unwrap();
        assert_eq!(sns.find("shield bash", 0.5).unwrap().name, "Shield Bash");
        assert_eq!(sns.find("Shield Bsh", 0.5).unwrap().name, "Shield Bash");
        assert!(sns.find("Helm Breaker", 0.8).is_none());
        assert!(sns.get("Shield Bash").unwrap().has_type("IMPACT"));
    }

    #[test]
    fn test_embedded_catalog_covers_all_classes() {
        let db = MotionValueDb::embedded().unwrap();
        for class in WeaponClass::all() {
            assert!(db.average_power(*class).unwrap() > 0.0, "{}", class);
        }
    }

    #[test]
    fn test_unknown_class_rejected() {
        let bad = r#"[{ "name": "Whip", "motions": [] }]"#;
        assert!(matches!(
            MotionValueDb::parse(bad),
            Err(ConfigError::ValidationError(_))
        ));
    }
}
