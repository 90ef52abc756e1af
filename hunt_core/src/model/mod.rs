//! Typed records supplied by the repository

mod condition;

pub use condition::{CarveSite, ConditionRules, CountSkill, RewardCondition};

use crate::error::{HuntError, HuntResult};
use crate::modifiers::{SharpnessDescriptor, WeaponSharpness};
use crate::types::{
    ArmorSlot, Element, Gender, Hub, HunterType, ItemId, ItemType, LocationId, MonsterClass,
    MonsterId, QuestId, QuestSlot, Rank, SkillTreeId, WeaponClass,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub name: String,
    #[serde(rename = "type")]
    pub item_type: ItemType,
    #[serde(default)]
    pub sell: u32,
    #[serde(default)]
    pub rarity: u8,
}

/// An NPC trade swapping one item for another once a quest is cleared
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WyporiumTrade {
    pub item_in_id: ItemId,
    pub item_out_id: ItemId,
    pub unlock_quest_id: Option<QuestId>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Monster {
    pub id: MonsterId,
    pub name: String,
    pub class: MonsterClass,
}

/// One hitzone row. `-1` marks an absent value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonsterDamageRow {
    pub monster_id: MonsterId,
    /// `"<part>"` or `"<part> (<state>)"`
    pub body_part: String,
    pub cut: i32,
    #[serde(default)]
    pub impact: i32,
    #[serde(default)]
    pub shot: i32,
    #[serde(default)]
    pub ko: i32,
    #[serde(default)]
    pub fire: i32,
    #[serde(default)]
    pub water: i32,
    #[serde(default)]
    pub ice: i32,
    #[serde(default)]
    pub thunder: i32,
    #[serde(default)]
    pub dragon: i32,
}

impl MonsterDamageRow {
    /// Elemental hitzone; statuses have none
    pub fn element_hitzone(&self, element: Element) -> i32 {
        match element {
            Element::Fire => self.fire,
            Element::Water => self.water,
            Element::Ice => self.ice,
            Element::Thunder => self.thunder,
            Element::Dragon => self.dragon,
            _ => 0,
        }
    }

    /// Split `body_part` into (part, state)
    pub fn part_and_state(&self) -> (&str, Option<&str>) {
        let text = self.body_part.trim();
        if let Some(stripped) = text.strip_suffix(')') {
            if let Some(open) = stripped.rfind(" (") {
                let part = stripped[..open].trim();
                let state = stripped[open + 2..].trim();
                if !part.is_empty() && !state.is_empty() {
                    return (part, Some(state));
                }
            }
        }
        (text, None)
    }
}

/// Hunting reward row for a monster at a rank
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HuntingRewardRow {
    pub monster_id: MonsterId,
    pub rank: Rank,
    pub condition: RewardCondition,
    pub item_id: ItemId,
    pub percentage: u32,
    #[serde(default = "default_stack")]
    pub stack_size: u32,
}

fn default_stack() -> u32 {
    1
}

/// A (monster, rank) pair whose reward table lists an item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemMonster {
    pub monster_id: MonsterId,
    pub rank: Rank,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quest {
    pub id: QuestId,
    pub name: String,
    pub hub: Hub,
    pub stars: u8,
    #[serde(default)]
    pub goal: String,
    #[serde(default)]
    pub sub_goal: String,
    pub rank: Rank,
    pub location_id: LocationId,
    #[serde(default)]
    pub reward: u32,
    #[serde(default)]
    pub fee: u32,
}

impl Quest {
    /// `"<name> (<hub> <stars>* <rank>)"`
    pub fn one_line(&self) -> String {
        format!("{} ({} {}* {})", self.name, self.hub, self.stars, self.rank)
    }
}

impl fmt::Display for Quest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.one_line())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestRewardRow {
    pub quest_id: QuestId,
    #[serde(rename = "reward_slot")]
    pub slot: QuestSlot,
    pub item_id: ItemId,
    /// 100 marks a fixed reward
    pub percentage: i32,
    #[serde(default = "default_stack")]
    pub stack_size: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestMonster {
    pub quest_id: QuestId,
    pub monster_id: MonsterId,
    /// Appears in the quest but is not a stable objective
    #[serde(default)]
    pub unstable: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub id: LocationId,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GatheringRow {
    pub item_id: ItemId,
    pub location_id: LocationId,
    pub rank: Rank,
    pub area: String,
    #[serde(default)]
    pub site: String,
    #[serde(default = "default_stack")]
    pub stack_size: u32,
    pub percentage: u32,
}

/// A component line in a crafting recipe
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Component {
    pub name: String,
    pub quantity: u32,
    #[serde(rename = "type", default)]
    pub item_type: Option<ItemType>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Weapon {
    pub id: ItemId,
    pub name: String,
    #[serde(rename = "wtype")]
    pub weapon_type: String,
    pub attack: f64,
    /// Integer percent, or chaotic `"a/b"`
    #[serde(default)]
    pub affinity: String,
    #[serde(default)]
    pub element: Option<String>,
    #[serde(default)]
    pub element_attack: Option<u32>,
    #[serde(default)]
    pub element_2: Option<String>,
    #[serde(default)]
    pub element_2_attack: Option<u32>,
    #[serde(default)]
    pub awaken: Option<String>,
    #[serde(default)]
    pub awaken_attack: Option<u32>,
    #[serde(default)]
    pub sharpness: Option<SharpnessDescriptor>,
    // === Class-specific attributes ===
    #[serde(default)]
    pub phial: Option<String>,
    #[serde(default)]
    pub shelling_type: Option<String>,
    #[serde(default)]
    pub horn_notes: Option<String>,
    #[serde(default)]
    pub charges: Option<String>,
    #[serde(default)]
    pub coatings: Option<String>,
    #[serde(default)]
    pub kinsect: Option<String>,
    // === Crafting ===
    #[serde(default)]
    pub num_slots: u8,
    #[serde(default)]
    pub rarity: u8,
    #[serde(default)]
    pub parent_id: Option<ItemId>,
    #[serde(rename = "final", default)]
    pub is_final: bool,
    #[serde(default)]
    pub creation_cost: Option<String>,
    #[serde(default)]
    pub upgrade_cost: Option<String>,
    #[serde(default)]
    pub buy: Option<u32>,
    #[serde(default)]
    pub create_components: Vec<Component>,
    #[serde(default)]
    pub upgrade_components: Vec<Component>,
}

impl Weapon {
    pub fn class(&self) -> HuntResult<WeaponClass> {
        self.weapon_type.parse()
    }

    pub fn element(&self) -> HuntResult<Option<Element>> {
        Element::parse_field(self.element.as_deref())
    }

    pub fn element_2(&self) -> HuntResult<Option<Element>> {
        Element::parse_field(self.element_2.as_deref())
    }

    pub fn awaken_element(&self) -> HuntResult<Option<Element>> {
        Element::parse_field(self.awaken.as_deref())
    }

    /// Parsed gauges; `None` for gunner weapons without sharpness
    pub fn sharpness(&self) -> HuntResult<Option<WeaponSharpness>> {
        self.sharpness.as_ref().map(WeaponSharpness::parse).transpose()
    }

    /// Base affinity. Chaotic `a/b` sums to |a|+|b| when frenzy is overcome.
    pub fn affinity(&self, frenzy_overcome: bool) -> HuntResult<i32> {
        let text = self.affinity.trim();
        if text.is_empty() {
            return Ok(0);
        }
        let parse = |s: &str| {
            s.trim()
                .trim_end_matches('%')
                .parse::<i32>()
                .map_err(|_| HuntError::InvalidConfig(format!("bad affinity '{}' on {}", text, self.name)))
        };
        match text.split_once('/') {
            Some((a, b)) => {
                let (a, b) = (parse(a)?, parse(b)?);
                if frenzy_overcome {
                    Ok(a.abs() + b.abs())
                } else {
                    Ok(a + b)
                }
            }
            None => parse(text),
        }
    }

    /// Whether the weapon has (or can awaken) the element; `Raw` matches element-less weapons
    pub fn matches_element(&self, element: &str) -> bool {
        let has = |field: &Option<String>| {
            field
                .as_deref()
                .map(|e| e.eq_ignore_ascii_case(element))
                .unwrap_or(false)
        };
        if element.eq_ignore_ascii_case("Raw") {
            return self.element.as_deref().map(str::is_empty).unwrap_or(true);
        }
        has(&self.element) || has(&self.element_2) || has(&self.awaken)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Armor {
    pub id: ItemId,
    pub name: String,
    pub slot: ArmorSlot,
    pub defense: u32,
    pub max_defense: u32,
    #[serde(default)]
    pub num_slots: u8,
    #[serde(default)]
    pub gender: Gender,
    pub hunter_type: HunterType,
    #[serde(default)]
    pub rarity: u8,
    #[serde(default)]
    pub fire_res: i32,
    #[serde(default)]
    pub water_res: i32,
    #[serde(default)]
    pub ice_res: i32,
    #[serde(default)]
    pub thunder_res: i32,
    #[serde(default)]
    pub dragon_res: i32,
    /// Points per skill tree, filled in by the repository
    #[serde(default)]
    pub skills: BTreeMap<SkillTreeId, i32>,
}

impl Armor {
    pub fn one_line(&self) -> String {
        format!(
            "{} ({:?}) Def {}-{} Slot {}",
            self.name, self.slot, self.defense, self.max_defense, self.num_slots
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Decoration {
    pub id: ItemId,
    pub name: String,
    pub num_slots: u8,
    #[serde(default)]
    pub skills: BTreeMap<SkillTreeId, i32>,
}

/// Skill points an item grants in one tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemSkill {
    pub item_id: ItemId,
    pub skill_tree_id: SkillTreeId,
    pub point_value: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillTree {
    pub id: SkillTreeId,
    pub name: String,
}

/// A skill activated once tree points cross `required_points`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Skill {
    pub skill_tree_id: SkillTreeId,
    pub name: String,
    pub required_points: i32,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HornMelody {
    pub notes: String,
    pub song: String,
    pub effect1: String,
    #[serde(default)]
    pub effect2: String,
    #[serde(default)]
    pub duration: String,
    #[serde(default)]
    pub extension: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn weapon(affinity: &str) -> Weapon {
        serde_json::from_value(serde_json::json!({
            "id": 1, "name": "Test", "wtype": "Great Sword", "attack": 912.0,
            "affinity": affinity
        }))
        .unwrap()
    }

    #[test]
    fn test_chaotic_affinity() {
        let w = weapon("-35/10");
        assert_eq!(w.affinity(false).unwrap(), -25);
        assert_eq!(w.affinity(true).unwrap(), 45);
        assert_eq!(weapon("").affinity(false).unwrap(), 0);
        assert_eq!(weapon("-20").affinity(true).unwrap(), -20);
        assert!(weapon("abc").affinity(false).is_err());
    }

    #[test]
    fn test_part_and_state() {
        let row = |s: &str| MonsterDamageRow {
            monster_id: MonsterId(1),
            body_part: s.to_string(),
            cut: 10,
            impact: 0,
            shot: 0,
            ko: 0,
            fire: 0,
            water: 0,
            ice: 0,
            thunder: 0,
            dragon: 0,
        };
        assert_eq!(row("Head").part_and_state(), ("Head", None));
        assert_eq!(row("Head (Enraged)").part_and_state(), ("Head", Some("Enraged")));
        assert_eq!(row("Neck/Tail (Without Hide)").part_and_state(), ("Neck/Tail", Some("Without Hide")));
    }

    #[test]
    fn test_quest_one_line() {
        let quest = Quest {
            id: QuestId(1),
            name: "Sleeping Beauty".into(),
            hub: Hub::Guild,
            stars: 7,
            goal: String::new(),
            sub_goal: String::new(),
            rank: Rank::G,
            location_id: LocationId(3),
            reward: 0,
            fee: 0,
        };
        assert_eq!(quest.one_line(), "Sleeping Beauty (Guild 7* G)");
    }

    #[test]
    fn test_matches_element() {
        let mut w = weapon("0");
        assert!(w.matches_element("Raw"));
        w.awaken = Some("Ice".into());
        assert!(w.matches_element("ice"));
        w.element = Some("Fire".into());
        assert!(!w.matches_element("Raw"));
        assert!(w.matches_element("Fire"));
    }
}
