//! Repository - the read-only query surface the engines consume

mod memory;

pub use memory::{Dataset, MemoryRepository};

use crate::model::{
    Armor, Decoration, GatheringRow, HornMelody, HuntingRewardRow, Item, ItemMonster, ItemSkill,
    Location, Monster, MonsterDamageRow, Quest, QuestMonster, QuestRewardRow, Skill, SkillTree,
    Weapon, WyporiumTrade,
};
use crate::types::{
    ArmorSlot, HunterType, ItemId, ItemType, LocationId, MonsterClass, MonsterId, QuestId, Rank,
    SkillTreeId,
};
use thiserror::Error;

pub type RepoResult<T> = Result<T, RepoError>;

/// Data layer failure
#[derive(Error, Debug)]
pub enum RepoError {
    #[error("Failed to read database: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to decode database: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("Dangling reference: {0}")]
    DanglingReference(String),
}

/// Filter for weapon selection. `element = "Raw"` selects element-less weapons.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WeaponQuery {
    pub weapon_type: Option<String>,
    pub element: Option<String>,
    pub is_final: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ArmorQuery {
    pub slot: Option<ArmorSlot>,
    pub hunter_type: Option<HunterType>,
    pub min_rarity: Option<u8>,
}

/// Read-only access to the game database
///
/// Implementations may memoise. Every method must be callable from
/// several threads at once.
pub trait Repository: Send + Sync {
    // === Items ===
    fn get_item(&self, id: ItemId) -> RepoResult<Option<Item>>;
    fn get_item_by_name(&self, name: &str) -> RepoResult<Option<Item>>;
    /// Items whose name contains `term` (case-insensitive), restricted to
    /// `item_types` unless it is empty
    fn search_item_name(&self, term: &str, item_types: &[ItemType]) -> RepoResult<Vec<Item>>;
    fn get_items(&self) -> RepoResult<Vec<Item>>;
    fn get_wyporium_trade(&self, item_id: ItemId) -> RepoResult<Option<WyporiumTrade>>;

    // === Monsters ===
    fn get_monster(&self, id: MonsterId) -> RepoResult<Option<Monster>>;
    fn get_monster_by_name(&self, name: &str) -> RepoResult<Option<Monster>>;
    fn get_monsters(&self, class: Option<MonsterClass>) -> RepoResult<Vec<Monster>>;
    fn get_monster_damage(&self, monster_id: MonsterId) -> RepoResult<Vec<MonsterDamageRow>>;
    /// Part names breakable for reward purposes
    fn get_monster_breaks(&self, monster_id: MonsterId) -> RepoResult<Vec<String>>;
    fn get_monster_rewards(&self, monster_id: MonsterId, rank: Option<Rank>) -> RepoResult<Vec<HuntingRewardRow>>;
    fn get_item_monsters(&self, item_id: ItemId) -> RepoResult<Vec<ItemMonster>>;

    // === Weapons ===
    fn get_weapon(&self, id: ItemId) -> RepoResult<Option<Weapon>>;
    fn get_weapon_by_name(&self, name: &str) -> RepoResult<Option<Weapon>>;
    fn get_weapons_by_query(&self, query: &WeaponQuery) -> RepoResult<Vec<Weapon>>;
    fn get_weapons_by_parent(&self, parent_id: ItemId) -> RepoResult<Vec<Weapon>>;
    fn get_weapon_types(&self) -> RepoResult<Vec<String>>;

    // === Armor and skills ===
    fn get_armors(&self, query: &ArmorQuery) -> RepoResult<Vec<Armor>>;
    fn get_armors_by_skills(&self, skill_tree_ids: &[SkillTreeId], hunter_type: HunterType) -> RepoResult<Vec<Armor>>;
    fn get_decorations_by_skills(&self, skill_tree_ids: &[SkillTreeId]) -> RepoResult<Vec<Decoration>>;
    fn get_item_skills(&self, item_id: ItemId) -> RepoResult<Vec<ItemSkill>>;
    fn get_skill_trees(&self) -> RepoResult<Vec<SkillTree>>;
    fn get_skills(&self) -> RepoResult<Vec<Skill>>;
    fn get_horn_melodies(&self, notes: Option<&str>) -> RepoResult<Vec<HornMelody>>;

    // === Quests and gathering ===
    fn get_quests(&self) -> RepoResult<Vec<Quest>>;
    fn get_quest(&self, id: QuestId) -> RepoResult<Option<Quest>>;
    fn get_quest_rewards(&self, quest_id: QuestId) -> RepoResult<Vec<QuestRewardRow>>;
    fn get_quest_monsters(&self, quest_id: QuestId) -> RepoResult<Vec<QuestMonster>>;
    /// Quests whose reward table lists the item
    fn get_item_quest_objects(&self, item_id: ItemId) -> RepoResult<Vec<Quest>>;
    fn get_item_gathering(&self, item_id: ItemId) -> RepoResult<Vec<GatheringRow>>;
    fn get_locations(&self) -> RepoResult<Vec<Location>>;
    fn get_location(&self, id: LocationId) -> RepoResult<Option<Location>>;
}
