//! Weapon crafting costs along the upgrade tree

use crate::error::{HuntError, HuntResult, Warning};
use crate::model::{Component, ItemMonster, Quest, Weapon};
use crate::repo::Repository;
use crate::types::{Hub, ItemId, ItemType};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt::Write;
use tracing::debug;

/// How the first weapon on a path is obtained
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CostKind {
    Buy,
    Create,
}

/// One way of making a weapon: obtain the first weapon on `path`, then
/// upgrade through the rest
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeaponCost {
    pub kind: CostKind,
    pub zenny: u64,
    /// Weapon names, first obtained first
    pub path: Vec<String>,
    pub components: BTreeMap<String, u32>,
}

impl WeaponCost {
    fn start(kind: CostKind, weapon: &Weapon, zenny: u64) -> Self {
        WeaponCost {
            kind,
            zenny,
            path: vec![weapon.name.clone()],
            components: BTreeMap::new(),
        }
    }

    fn add_components(&mut self, components: &[Component]) {
        for c in components {
            if c.item_type == Some(ItemType::Weapon) {
                continue;
            }
            *self.components.entry(c.name.clone()).or_insert(0) += c.quantity;
        }
    }
}

/// Every way of making one weapon
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeaponCosts {
    pub weapon: String,
    pub costs: Vec<WeaponCost>,
    pub warnings: Vec<Warning>,
}

impl WeaponCosts {
    pub fn cheapest(&self) -> Option<&WeaponCost> {
        self.costs.iter().min_by_key(|c| c.zenny)
    }

    /// `= path` header, zenny and one line per component
    pub fn render(&self) -> String {
        let mut out = String::new();
        for cost in &self.costs {
            let _ = writeln!(out, "= {}", cost.path.join(", "));
            let _ = writeln!(out, "  Zenny {}", cost.zenny);
            for (name, quantity) in &cost.components {
                let _ = writeln!(out, "{:>20} {:2}", name, quantity);
            }
            out.push('\n');
        }
        out
    }
}

fn parse_cost(value: Option<&str>) -> Option<u64> {
    match value.map(str::trim) {
        None | Some("") => Some(0),
        Some(text) => text.parse().ok(),
    }
}

fn cost_or_warn(weapon: &Weapon, value: Option<&str>, warnings: &mut Vec<Warning>) -> u64 {
    parse_cost(value).unwrap_or_else(|| {
        warnings.push(
            Warning::BadCost {
                weapon: weapon.name.clone(),
                value: value.unwrap_or_default().to_string(),
            }
            .emit(),
        );
        0
    })
}

/// Buy, create and upgrade paths for `weapon`, buy first
///
/// A parent chain that loops back on itself fails with `CyclicUpgradeTree`.
/// Unparseable cost strings are warned about and counted as 0.
pub fn weapon_costs(repo: &dyn Repository, weapon: &Weapon) -> HuntResult<WeaponCosts> {
    let mut warnings = Vec::new();
    let mut visiting = Vec::new();
    let costs = walk(repo, weapon, &mut visiting, &mut warnings)?;
    Ok(WeaponCosts {
        weapon: weapon.name.clone(),
        costs,
        warnings,
    })
}

fn walk(
    repo: &dyn Repository,
    weapon: &Weapon,
    visiting: &mut Vec<ItemId>,
    warnings: &mut Vec<Warning>,
) -> HuntResult<Vec<WeaponCost>> {
    if visiting.contains(&weapon.id) {
        return Err(HuntError::CyclicUpgradeTree(weapon.id));
    }
    visiting.push(weapon.id);

    let mut create_cost = weapon.creation_cost.as_deref();
    let mut upgrade_cost = weapon.upgrade_cost.as_deref();
    let mut create_components = weapon.create_components.as_slice();
    let mut upgrade_components = weapon.upgrade_components.as_slice();

    let mut costs = Vec::new();
    if let Some(parent_id) = weapon.parent_id {
        // Some records list an upgrade under the create columns
        if upgrade_cost.map(str::trim).unwrap_or_default().is_empty() {
            if upgrade_components.is_empty() && !create_components.is_empty() {
                upgrade_components = create_components;
                create_components = &[];
            }
            upgrade_cost = create_cost;
            create_cost = None;
        }
        let zenny = cost_or_warn(weapon, upgrade_cost, warnings);
        match repo.get_weapon(parent_id)? {
            Some(parent) => {
                for mut cost in walk(repo, &parent, visiting, warnings)? {
                    cost.zenny += zenny;
                    cost.path.push(weapon.name.clone());
                    cost.add_components(upgrade_components);
                    costs.push(cost);
                }
            }
            None => debug!("parent {} of '{}' not found", parent_id, weapon.name),
        }
    }

    if !create_components.is_empty() {
        let zenny = match parse_cost(create_cost) {
            Some(z) => z,
            None => {
                warnings.push(
                    Warning::BadCost {
                        weapon: weapon.name.clone(),
                        value: create_cost.unwrap_or_default().to_string(),
                    }
                    .emit(),
                );
                parse_cost(upgrade_cost).unwrap_or(0)
            }
        };
        let mut cost = WeaponCost::start(CostKind::Create, weapon, zenny);
        cost.add_components(create_components);
        costs.insert(0, cost);
    }

    if let Some(price) = weapon.buy.filter(|p| *p > 0) {
        costs.insert(0, WeaponCost::start(CostKind::Buy, weapon, price as u64));
    }

    visiting.pop();
    Ok(costs)
}

fn drops_in_quest(repo: &dyn Repository, quest: &Quest, drops: &[ItemMonster]) -> HuntResult<bool> {
    if !drops.iter().any(|d| d.rank == quest.rank) {
        return Ok(false);
    }
    let monsters = repo.get_quest_monsters(quest.id)?;
    Ok(drops
        .iter()
        .any(|d| d.rank == quest.rank && monsters.iter().any(|m| m.monster_id == d.monster_id)))
}

/// Lowest star count among the `hub` quests that yield the item
///
/// A quest yields the item through its reward table, through gathering at
/// its location and rank, or through a monster it contains that drops the
/// item at that rank. Zero-star training quests are ignored.
pub fn item_star_level(repo: &dyn Repository, item_id: ItemId, hub: Hub) -> HuntResult<Option<u8>> {
    let mut levels: Vec<u8> = repo
        .get_item_quest_objects(item_id)?
        .iter()
        .filter(|q| q.hub == hub)
        .map(|q| q.stars)
        .collect();

    let gathering = repo.get_item_gathering(item_id)?;
    let drops = repo.get_item_monsters(item_id)?;
    if !gathering.is_empty() || !drops.is_empty() {
        for quest in repo.get_quests()?.iter().filter(|q| q.hub == hub) {
            let gathered = gathering
                .iter()
                .any(|g| g.location_id == quest.location_id && g.rank == quest.rank);
            if gathered || drops_in_quest(repo, quest, &drops)? {
                levels.push(quest.stars);
            }
        }
    }
    Ok(levels.into_iter().filter(|s| *s > 0).min())
}

/// Star level in `hub` from which `weapon` can be made
///
/// A path needs every material it lists, so its level is the highest
/// material level; a path with a material no `hub` quest yields is
/// impossible. Paths without materials are skipped: shops only stock a
/// weapon once it is craftable. `None` when every path is impossible.
pub fn weapon_star_level(repo: &dyn Repository, weapon: &Weapon, hub: Hub) -> HuntResult<Option<u8>> {
    let costs = weapon_costs(repo, weapon)?;
    let mut known: BTreeMap<&str, Option<u8>> = BTreeMap::new();
    let mut best: Option<u8> = None;
    for cost in costs.costs.iter().filter(|c| !c.components.is_empty()) {
        let mut level = Some(0);
        for name in cost.components.keys() {
            let item_level = match known.get(name.as_str()).copied() {
                Some(l) => l,
                None => {
                    let l = match repo.get_item_by_name(name)? {
                        Some(item) => item_star_level(repo, item.id, hub)?,
                        None => None,
                    };
                    known.insert(name.as_str(), l);
                    l
                }
            };
            level = level.zip(item_level).map(|(a, b)| a.max(b));
            if level.is_none() {
                break;
            }
        }
        if let Some(level) = level {
            best = Some(best.map_or(level, |b| b.min(level)));
        }
    }
    debug!("'{}' needs {} {:?}", weapon.name, hub, best);
    Ok(best)
}
