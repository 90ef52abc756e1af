//! In-memory repository loaded from a JSON dump of the game database

use super::{ArmorQuery, RepoError, RepoResult, Repository, WeaponQuery};
use crate::model::{
    Armor, Decoration, GatheringRow, HornMelody, HuntingRewardRow, Item, ItemMonster, ItemSkill,
    Location, Monster, MonsterDamageRow, Quest, QuestMonster, QuestRewardRow, Skill, SkillTree,
    Weapon, WyporiumTrade,
};
use crate::types::{
    HunterType, ItemId, ItemType, LocationId, MonsterClass, MonsterId, QuestId, Rank, SkillTreeId,
};
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;
use tracing::info;

/// Every table of the database dump
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Dataset {
    /// Data version, used for cache validators
    pub version: String,
    pub items: Vec<Item>,
    pub monsters: Vec<Monster>,
    pub monster_damage: Vec<MonsterDamageRow>,
    pub hunting_rewards: Vec<HuntingRewardRow>,
    pub quests: Vec<Quest>,
    pub quest_rewards: Vec<QuestRewardRow>,
    pub monster_to_quest: Vec<QuestMonster>,
    pub gathering: Vec<GatheringRow>,
    pub locations: Vec<Location>,
    pub weapons: Vec<Weapon>,
    pub armor: Vec<Armor>,
    pub decorations: Vec<Decoration>,
    pub item_to_skill_tree: Vec<ItemSkill>,
    pub skill_trees: Vec<SkillTree>,
    pub skills: Vec<Skill>,
    pub wyporium: Vec<WyporiumTrade>,
    pub horn_melodies: Vec<HornMelody>,
}

/// Immutable after load, so one instance can be shared across threads
#[derive(Debug, Clone)]
pub struct MemoryRepository {
    data: Dataset,
    item_by_id: HashMap<ItemId, usize>,
    item_by_name: HashMap<String, usize>,
    monster_by_id: HashMap<MonsterId, usize>,
    monster_by_name: HashMap<String, usize>,
    damage_by_monster: HashMap<MonsterId, Vec<usize>>,
    rewards_by_monster: HashMap<MonsterId, Vec<usize>>,
    monsters_by_item: HashMap<ItemId, IndexSet<(MonsterId, Rank)>>,
    quest_by_id: HashMap<QuestId, usize>,
    quest_rewards_by_quest: HashMap<QuestId, Vec<usize>>,
    quests_by_item: HashMap<ItemId, IndexSet<QuestId>>,
    quest_monsters: HashMap<QuestId, Vec<usize>>,
    gathering_by_item: HashMap<ItemId, Vec<usize>>,
    location_by_id: HashMap<LocationId, usize>,
    weapon_by_id: HashMap<ItemId, usize>,
    weapon_by_name: HashMap<String, usize>,
    weapons_by_parent: HashMap<ItemId, Vec<usize>>,
    skills_by_item: HashMap<ItemId, Vec<usize>>,
    trade_by_input: HashMap<ItemId, usize>,
}

fn key(name: &str) -> String {
    name.trim().to_lowercase()
}

fn index_by<K, T, F>(rows: &[T], f: F) -> HashMap<K, usize>
where
    K: std::hash::Hash + Eq,
    F: Fn(&T) -> K,
{
    rows.iter().enumerate().map(|(i, row)| (f(row), i)).collect()
}

fn group_by<K, T, F>(rows: &[T], f: F) -> HashMap<K, Vec<usize>>
where
    K: std::hash::Hash + Eq,
    F: Fn(&T) -> K,
{
    let mut map: HashMap<K, Vec<usize>> = HashMap::new();
    for (i, row) in rows.iter().enumerate() {
        map.entry(f(row)).or_default().push(i);
    }
    map
}

impl MemoryRepository {
    pub fn load(path: &Path) -> RepoResult<Self> {
        let content = fs::read_to_string(path)?;
        let repo = Self::from_json(&content)?;
        info!(
            path = %path.display(),
            items = repo.data.items.len(),
            monsters = repo.data.monsters.len(),
            quests = repo.data.quests.len(),
            "loaded game database"
        );
        Ok(repo)
    }

    pub fn from_json(content: &str) -> RepoResult<Self> {
        let data: Dataset = serde_json::from_str(content)?;
        Self::from_dataset(data)
    }

    pub fn from_dataset(mut data: Dataset) -> RepoResult<Self> {
        check_references(&data)?;

        // Attach skill points to armor and decorations
        let mut points: HashMap<ItemId, Vec<(SkillTreeId, i32)>> = HashMap::new();
        for skill in &data.item_to_skill_tree {
            points
                .entry(skill.item_id)
                .or_default()
                .push((skill.skill_tree_id, skill.point_value));
        }
        for armor in &mut data.armor {
            if let Some(list) = points.get(&armor.id) {
                armor.skills.extend(list.iter().copied());
            }
        }
        for decoration in &mut data.decorations {
            if let Some(list) = points.get(&decoration.id) {
                decoration.skills.extend(list.iter().copied());
            }
        }

        let mut monsters_by_item: HashMap<ItemId, IndexSet<(MonsterId, Rank)>> = HashMap::new();
        for row in &data.hunting_rewards {
            monsters_by_item
                .entry(row.item_id)
                .or_default()
                .insert((row.monster_id, row.rank));
        }
        let mut quests_by_item: HashMap<ItemId, IndexSet<QuestId>> = HashMap::new();
        for row in &data.quest_rewards {
            quests_by_item.entry(row.item_id).or_default().insert(row.quest_id);
        }
        let mut weapons_by_parent: HashMap<ItemId, Vec<usize>> = HashMap::new();
        for (i, weapon) in data.weapons.iter().enumerate() {
            if let Some(parent) = weapon.parent_id {
                weapons_by_parent.entry(parent).or_default().push(i);
            }
        }

        Ok(MemoryRepository {
            item_by_id: index_by(&data.items, |r| r.id),
            item_by_name: index_by(&data.items, |r| key(&r.name)),
            monster_by_id: index_by(&data.monsters, |r| r.id),
            monster_by_name: index_by(&data.monsters, |r| key(&r.name)),
            damage_by_monster: group_by(&data.monster_damage, |r| r.monster_id),
            rewards_by_monster: group_by(&data.hunting_rewards, |r| r.monster_id),
            monsters_by_item,
            quest_by_id: index_by(&data.quests, |r| r.id),
            quest_rewards_by_quest: group_by(&data.quest_rewards, |r| r.quest_id),
            quests_by_item,
            quest_monsters: group_by(&data.monster_to_quest, |r| r.quest_id),
            gathering_by_item: group_by(&data.gathering, |r| r.item_id),
            location_by_id: index_by(&data.locations, |r| r.id),
            weapon_by_id: index_by(&data.weapons, |r| r.id),
            weapon_by_name: index_by(&data.weapons, |r| key(&r.name)),
            weapons_by_parent,
            skills_by_item: group_by(&data.item_to_skill_tree, |r| r.item_id),
            trade_by_input: index_by(&data.wyporium, |r| r.item_in_id),
            data,
        })
    }

    pub fn version(&self) -> &str {
        &self.data.version
    }

    pub fn dataset(&self) -> &Dataset {
        &self.data
    }

    fn pick<T: Clone>(rows: &[T], indexes: Option<&Vec<usize>>) -> Vec<T> {
        indexes
            .map(|list| list.iter().map(|&i| rows[i].clone()).collect())
            .unwrap_or_default()
    }
}

fn check_references(data: &Dataset) -> RepoResult<()> {
    let monsters: HashSet<MonsterId> = data.monsters.iter().map(|m| m.id).collect();
    let quests: HashSet<QuestId> = data.quests.iter().map(|q| q.id).collect();
    if let Some(row) = data.monster_damage.iter().find(|r| !monsters.contains(&r.monster_id)) {
        return Err(RepoError::DanglingReference(format!(
            "monster_damage row '{}' refers to unknown monster {}",
            row.body_part, row.monster_id
        )));
    }
    if let Some(row) = data.quest_rewards.iter().find(|r| !quests.contains(&r.quest_id)) {
        return Err(RepoError::DanglingReference(format!(
            "quest reward refers to unknown quest {}",
            row.quest_id
        )));
    }
    if let Some(row) = data.monster_to_quest.iter().find(|r| !quests.contains(&r.quest_id)) {
        return Err(RepoError::DanglingReference(format!(
            "monster_to_quest refers to unknown quest {}",
            row.quest_id
        )));
    }
    Ok(())
}

impl Repository for MemoryRepository {
    fn get_item(&self, id: ItemId) -> RepoResult<Option<Item>> {
        Ok(self.item_by_id.get(&id).map(|&i| self.data.items[i].clone()))
    }

    fn get_item_by_name(&self, name: &str) -> RepoResult<Option<Item>> {
        Ok(self.item_by_name.get(&key(name)).map(|&i| self.data.items[i].clone()))
    }

    fn search_item_name(&self, term: &str, item_types: &[ItemType]) -> RepoResult<Vec<Item>> {
        let term = key(term);
        Ok(self
            .data
            .items
            .iter()
            .filter(|item| item.name.to_lowercase().contains(&term))
            .filter(|item| item_types.is_empty() || item_types.contains(&item.item_type))
            .cloned()
            .collect())
    }

    fn get_items(&self) -> RepoResult<Vec<Item>> {
        Ok(self.data.items.clone())
    }

    fn get_wyporium_trade(&self, item_id: ItemId) -> RepoResult<Option<WyporiumTrade>> {
        Ok(self.trade_by_input.get(&item_id).map(|&i| self.data.wyporium[i].clone()))
    }

    fn get_monster(&self, id: MonsterId) -> RepoResult<Option<Monster>> {
        Ok(self.monster_by_id.get(&id).map(|&i| self.data.monsters[i].clone()))
    }

    fn get_monster_by_name(&self, name: &str) -> RepoResult<Option<Monster>> {
        Ok(self.monster_by_name.get(&key(name)).map(|&i| self.data.monsters[i].clone()))
    }

    fn get_monsters(&self, class: Option<MonsterClass>) -> RepoResult<Vec<Monster>> {
        Ok(self
            .data
            .monsters
            .iter()
            .filter(|m| class.map(|c| m.class == c).unwrap_or(true))
            .cloned()
            .collect())
    }

    fn get_monster_damage(&self, monster_id: MonsterId) -> RepoResult<Vec<MonsterDamageRow>> {
        Ok(Self::pick(&self.data.monster_damage, self.damage_by_monster.get(&monster_id)))
    }

    fn get_monster_breaks(&self, monster_id: MonsterId) -> RepoResult<Vec<String>> {
        let mut breaks: IndexSet<String> = IndexSet::new();
        for &i in self.rewards_by_monster.get(&monster_id).into_iter().flatten() {
            if let Some(part) = self.data.hunting_rewards[i].condition.break_part() {
                breaks.insert(part.to_string());
            }
        }
        Ok(breaks.into_iter().collect())
    }

    fn get_monster_rewards(&self, monster_id: MonsterId, rank: Option<Rank>) -> RepoResult<Vec<HuntingRewardRow>> {
        let rows = Self::pick(&self.data.hunting_rewards, self.rewards_by_monster.get(&monster_id));
        Ok(rows
            .into_iter()
            .filter(|r| rank.map(|rank| r.rank == rank).unwrap_or(true))
            .collect())
    }

    fn get_item_monsters(&self, item_id: ItemId) -> RepoResult<Vec<ItemMonster>> {
        Ok(self
            .monsters_by_item
            .get(&item_id)
            .map(|set| {
                set.iter()
                    .map(|&(monster_id, rank)| ItemMonster { monster_id, rank })
                    .collect()
            })
            .unwrap_or_default())
    }

    fn get_weapon(&self, id: ItemId) -> RepoResult<Option<Weapon>> {
        Ok(self.weapon_by_id.get(&id).map(|&i| self.data.weapons[i].clone()))
    }

    fn get_weapon_by_name(&self, name: &str) -> RepoResult<Option<Weapon>> {
        Ok(self.weapon_by_name.get(&key(name)).map(|&i| self.data.weapons[i].clone()))
    }

    fn get_weapons_by_query(&self, query: &WeaponQuery) -> RepoResult<Vec<Weapon>> {
        Ok(self
            .data
            .weapons
            .iter()
            .filter(|w| {
                query
                    .weapon_type
                    .as_deref()
                    .map(|t| w.weapon_type.eq_ignore_ascii_case(t))
                    .unwrap_or(true)
            })
            .filter(|w| query.element.as_deref().map(|e| w.matches_element(e)).unwrap_or(true))
            .filter(|w| query.is_final.map(|f| w.is_final == f).unwrap_or(true))
            .cloned()
            .collect())
    }

    fn get_weapons_by_parent(&self, parent_id: ItemId) -> RepoResult<Vec<Weapon>> {
        Ok(Self::pick(&self.data.weapons, self.weapons_by_parent.get(&parent_id)))
    }

    fn get_weapon_types(&self) -> RepoResult<Vec<String>> {
        let types: IndexSet<String> = self.data.weapons.iter().map(|w| w.weapon_type.clone()).collect();
        Ok(types.into_iter().collect())
    }

    fn get_armors(&self, query: &ArmorQuery) -> RepoResult<Vec<Armor>> {
        Ok(self
            .data
            .armor
            .iter()
            .filter(|a| query.slot.map(|s| a.slot == s).unwrap_or(true))
            .filter(|a| query.hunter_type.map(|h| a.hunter_type.fits(h)).unwrap_or(true))
            .filter(|a| query.min_rarity.map(|r| a.rarity >= r).unwrap_or(true))
            .cloned()
            .collect())
    }

    fn get_armors_by_skills(&self, skill_tree_ids: &[SkillTreeId], hunter_type: HunterType) -> RepoResult<Vec<Armor>> {
        Ok(self
            .data
            .armor
            .iter()
            .filter(|a| a.hunter_type.fits(hunter_type))
            .filter(|a| skill_tree_ids.iter().any(|id| a.skills.get(id).copied().unwrap_or(0) > 0))
            .cloned()
            .collect())
    }

    fn get_decorations_by_skills(&self, skill_tree_ids: &[SkillTreeId]) -> RepoResult<Vec<Decoration>> {
        Ok(self
            .data
            .decorations
            .iter()
            .filter(|d| skill_tree_ids.iter().any(|id| d.skills.get(id).copied().unwrap_or(0) > 0))
            .cloned()
            .collect())
    }

    fn get_item_skills(&self, item_id: ItemId) -> RepoResult<Vec<ItemSkill>> {
        Ok(Self::pick(&self.data.item_to_skill_tree, self.skills_by_item.get(&item_id)))
    }

    fn get_skill_trees(&self) -> RepoResult<Vec<SkillTree>> {
        Ok(self.data.skill_trees.clone())
    }

    fn get_skills(&self) -> RepoResult<Vec<Skill>> {
        Ok(self.data.skills.clone())
    }

    fn get_horn_melodies(&self, notes: Option<&str>) -> RepoResult<Vec<HornMelody>> {
        Ok(self
            .data
            .horn_melodies
            .iter()
            .filter(|m| notes.map(|n| m.notes == n).unwrap_or(true))
            .cloned()
            .collect())
    }

    fn get_quests(&self) -> RepoResult<Vec<Quest>> {
        Ok(self.data.quests.clone())
    }

    fn get_quest(&self, id: QuestId) -> RepoResult<Option<Quest>> {
        Ok(self.quest_by_id.get(&id).map(|&i| self.data.quests[i].clone()))
    }

    fn get_quest_rewards(&self, quest_id: QuestId) -> RepoResult<Vec<QuestRewardRow>> {
        Ok(Self::pick(&self.data.quest_rewards, self.quest_rewards_by_quest.get(&quest_id)))
    }

    fn get_quest_monsters(&self, quest_id: QuestId) -> RepoResult<Vec<QuestMonster>> {
        Ok(Self::pick(&self.data.monster_to_quest, self.quest_monsters.get(&quest_id)))
    }

    fn get_item_quest_objects(&self, item_id: ItemId) -> RepoResult<Vec<Quest>> {
        Ok(self
            .quests_by_item
            .get(&item_id)
            .map(|ids| {
                ids.iter()
                    .filter_map(|id| self.quest_by_id.get(id))
                    .map(|&i| self.data.quests[i].clone())
                    .collect()
            })
            .unwrap_or_default())
    }

    fn get_item_gathering(&self, item_id: ItemId) -> RepoResult<Vec<GatheringRow>> {
        Ok(Self::pick(&self.data.gathering, self.gathering_by_item.get(&item_id)))
    }

    fn get_locations(&self) -> RepoResult<Vec<Location>> {
        Ok(self.data.locations.clone())
    }

    fn get_location(&self, id: LocationId) -> RepoResult<Option<Location>> {
        Ok(self.location_by_id.get(&id).map(|&i| self.data.locations[i].clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::RewardCondition;

    const DB: &str = r#"{
        "version": "test-1",
        "items": [
            { "id": 1, "name": "Rathalos Ruby", "type": "Flesh" },
            { "id": 2, "name": "Rathalos Scale", "type": "Flesh" },
            { "id": 3, "name": "Iron Ore", "type": "Ore" }
        ],
        "monsters": [ { "id": 10, "name": "Rathalos", "class": "Boss" } ],
        "hunting_rewards": [
            { "monster_id": 10, "rank": "HR", "condition": "Tail Carve", "item_id": 1, "percentage": 5, "stack_size": 1 },
            { "monster_id": 10, "rank": "HR", "condition": "Break Head", "item_id": 2, "percentage": 30, "stack_size": 1 },
            { "monster_id": 10, "rank": "HR", "condition": "Break Head", "item_id": 1, "percentage": 3, "stack_size": 1 },
            { "monster_id": 10, "rank": "G", "condition": "Capture", "item_id": 1, "percentage": 2, "stack_size": 1 }
        ]
    }"#;

    #[test]
    fn test_lookup_is_case_insensitive() {
        let repo = MemoryRepository::from_json(DB).unwrap();
        assert_eq!(repo.version(), "test-1");
        assert_eq!(repo.get_item_by_name("rathalos ruby").unwrap().unwrap().id, ItemId(1));
        assert!(repo.get_item_by_name("Rathalos Rubi").unwrap().is_none());
        assert_eq!(repo.get_monster_by_name("RATHALOS").unwrap().unwrap().id, MonsterId(10));
    }

    #[test]
    fn test_breaks_include_tail_carve() {
        let repo = MemoryRepository::from_json(DB).unwrap();
        assert_eq!(repo.get_monster_breaks(MonsterId(10)).unwrap(), vec!["Tail", "Head"]);
        let rows = repo.get_monster_rewards(MonsterId(10), Some(Rank::High)).unwrap();
        assert_eq!(rows.len(), 3);
    }

    #[test]
    fn test_item_monsters_distinct() {
        let repo = MemoryRepository::from_json(DB).unwrap();
        let pairs = repo.get_item_monsters(ItemId(1)).unwrap();
        assert_eq!(pairs.len(), 2);
        assert_eq!(pairs[0].rank, Rank::High);
        assert_eq!(pairs[1].rank, Rank::G);
    }

    #[test]
    fn test_search_item_name_filters_types() {
        let repo = MemoryRepository::from_json(DB).unwrap();
        assert_eq!(repo.search_item_name("rathalos", &[]).unwrap().len(), 2);
        assert_eq!(repo.search_item_name("o", &[ItemType::Ore]).unwrap().len(), 1);
    }

    #[test]
    fn test_dangling_reference_rejected() {
        let bad = r#"{ "quest_rewards": [ { "quest_id": 5, "reward_slot": "A", "item_id": 1, "percentage": 10 } ] }"#;
        assert!(matches!(
            MemoryRepository::from_json(bad),
            Err(RepoError::DanglingReference(_))
        ));
    }

    #[test]
    fn test_unknown_condition_fails_load() {
        let bad = r#"{ "monsters": [ { "id": 1, "name": "Kelbi", "class": "Minion" } ],
            "hunting_rewards": [ { "monster_id": 1, "rank": "LR", "condition": "Fishing", "item_id": 1, "percentage": 10 } ] }"#;
        assert!(matches!(MemoryRepository::from_json(bad), Err(RepoError::Decode(_))));
    }
}
