//! Choosing the weapons to compare

use crate::error::{HuntError, HuntResult};
use crate::fuzzy;
use crate::model::Weapon;
use crate::repo::{Repository, WeaponQuery};
use crate::types::{Hub, WeaponClass};
use crate::upgrade::weapon_star_level;

/// Weapons by explicit names, or by query
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WeaponFilter {
    /// Overrides every other field when non-empty
    pub names: Vec<String>,
    pub weapon_type: Option<WeaponClass>,
    /// Element name, or `Raw` for weapons without one
    pub element: Option<String>,
    pub final_only: bool,
    pub min_rarity: Option<u8>,
    pub max_rarity: Option<u8>,
    /// Only weapons whose materials come from quests of this hub at or
    /// below this star count
    pub stars: Option<(Hub, u8)>,
}

impl WeaponFilter {
    pub fn by_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        WeaponFilter {
            names: names.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }

    fn rarity_ok(&self, rarity: u8) -> bool {
        self.min_rarity.map(|r| rarity >= r).unwrap_or(true) && self.max_rarity.map(|r| rarity <= r).unwrap_or(true)
    }

    /// Weapons matching the filter, in repository order
    ///
    /// An unknown name fails with a `LookupMiss` carrying suggestions.
    pub fn select(&self, repo: &dyn Repository, name_cutoff: f64, max_suggestions: usize) -> HuntResult<Vec<Weapon>> {
        if !self.names.is_empty() {
            let mut weapons = Vec::with_capacity(self.names.len());
            for name in &self.names {
                match repo.get_weapon_by_name(name)? {
                    Some(weapon) => weapons.push(weapon),
                    None => {
                        let all = repo.get_weapons_by_query(&WeaponQuery::default())?;
                        let suggestions = fuzzy::close_matches(
                            name,
                            all.iter().map(|w| w.name.as_str()),
                            max_suggestions,
                            name_cutoff,
                        )
                        .into_iter()
                        .map(str::to_string)
                        .collect();
                        return Err(HuntError::lookup_miss("weapon", name, suggestions));
                    }
                }
            }
            return Ok(weapons);
        }

        let query = WeaponQuery {
            weapon_type: self.weapon_type.map(|c| c.name().to_string()),
            element: self.element.clone(),
            is_final: if self.final_only { Some(true) } else { None },
        };
        let mut weapons = Vec::new();
        for weapon in repo.get_weapons_by_query(&query)? {
            if !self.rarity_ok(weapon.rarity) {
                continue;
            }
            if let Some((hub, stars)) = self.stars {
                match weapon_star_level(repo, &weapon, hub)? {
                    Some(level) if level <= stars => {}
                    _ => continue,
                }
            }
            weapons.push(weapon);
        }
        Ok(weapons)
    }
}

/// Every weapon shares one class; comparisons across classes are rejected
pub fn common_class(weapons: &[Weapon]) -> HuntResult<Option<WeaponClass>> {
    let mut class = None;
    for weapon in weapons {
        let c = weapon.class()?;
        match class {
            None => class = Some(c),
            Some(first) if first != c => {
                return Err(HuntError::PolicyConflict(format!(
                    "weapon '{}' is a {}, expected {}",
                    weapon.name, c, first
                )))
            }
            Some(_) => {}
        }
    }
    Ok(class)
}
