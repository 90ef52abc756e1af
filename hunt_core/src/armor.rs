//! Armor and decoration inputs for skill searches

use crate::error::{HuntError, HuntResult};
use crate::fuzzy;
use crate::model::{Armor, Decoration, Skill, SkillTree};
use crate::repo::Repository;
use crate::types::{ArmorSlot, HunterType, ItemId, SkillTreeId};
use serde::Serialize;
use std::collections::BTreeMap;

/// Largest decoration size
pub const MAX_DECORATION_SLOTS: usize = 3;

/// Best decoration for each slot size, index 0 = one slot
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DecorationValues {
    pub ids: [Option<ItemId>; MAX_DECORATION_SLOTS],
    pub values: [i32; MAX_DECORATION_SLOTS],
}

/// Best points in `tree` per decoration size. Equal points keep the first decoration.
pub fn decoration_values(tree: SkillTreeId, decorations: &[Decoration]) -> DecorationValues {
    let mut best = DecorationValues::default();
    for d in decorations {
        let size = d.num_slots as usize;
        if size == 0 || size > MAX_DECORATION_SLOTS {
            continue;
        }
        let points = d.skills.get(&tree).copied().unwrap_or(0);
        if points > best.values[size - 1] {
            best.values[size - 1] = points;
            best.ids[size - 1] = Some(d.id);
        }
    }
    best
}

impl Armor {
    /// Native points in `tree`
    pub fn skill(&self, tree: SkillTreeId) -> i32 {
        self.skills.get(&tree).copied().unwrap_or(0)
    }

    /// Native points plus decorations packed greedily, largest size first
    ///
    /// `decoration_values[n]` is the points an `n + 1` slot decoration
    /// gives; zero means no decoration of that size.
    pub fn skill_points(&self, tree: SkillTreeId, decoration_values: &[i32]) -> i32 {
        let mut total = self.skill(tree);
        let mut slots_left = self.num_slots as usize;
        for size in (1..=decoration_values.len()).rev() {
            if slots_left == 0 {
                break;
            }
            let value = decoration_values[size - 1];
            if value == 0 {
                continue;
            }
            while size <= slots_left {
                total += value;
                slots_left -= size;
            }
        }
        total
    }
}

/// An armor piece scored against the wanted skill trees
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArmorCandidate {
    pub armor: Armor,
    /// Points per wanted tree with decorations
    pub points: BTreeMap<SkillTreeId, i32>,
    pub total: i32,
}

/// Armor pieces granting any wanted skill tree, best first within each slot
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArmorSearch {
    pub trees: Vec<SkillTree>,
    pub decorations: BTreeMap<SkillTreeId, DecorationValues>,
    pub by_slot: BTreeMap<String, Vec<ArmorCandidate>>,
}

fn slot_name(slot: ArmorSlot) -> String {
    format!("{:?}", slot)
}

/// Skill trees by name, or a `LookupMiss` with suggestions
pub fn resolve_trees(
    repo: &dyn Repository,
    names: &[String],
    cutoff: f64,
    max_suggestions: usize,
) -> HuntResult<Vec<SkillTree>> {
    let all = repo.get_skill_trees()?;
    let mut trees = Vec::with_capacity(names.len());
    for name in names {
        match all.iter().find(|t| t.name.eq_ignore_ascii_case(name.trim())) {
            Some(tree) => trees.push(tree.clone()),
            None => {
                let suggestions = fuzzy::close_matches(name, all.iter().map(|t| t.name.as_str()), max_suggestions, cutoff)
                    .into_iter()
                    .map(str::to_string)
                    .collect();
                return Err(HuntError::lookup_miss("skill tree", name, suggestions));
            }
        }
    }
    Ok(trees)
}

/// Score every armor piece granting one of `trees`
pub fn search_armor(repo: &dyn Repository, trees: Vec<SkillTree>, hunter_type: HunterType) -> HuntResult<ArmorSearch> {
    let ids: Vec<SkillTreeId> = trees.iter().map(|t| t.id).collect();
    let decorations = repo.get_decorations_by_skills(&ids)?;
    let values: BTreeMap<SkillTreeId, DecorationValues> =
        ids.iter().map(|&id| (id, decoration_values(id, &decorations))).collect();

    let mut by_slot: BTreeMap<String, Vec<ArmorCandidate>> = BTreeMap::new();
    for armor in repo.get_armors_by_skills(&ids, hunter_type)? {
        let points: BTreeMap<SkillTreeId, i32> = ids
            .iter()
            .map(|&id| {
                let deco = values.get(&id).map(|v| v.values).unwrap_or_default();
                (id, armor.skill_points(id, &deco))
            })
            .collect();
        let total = points.values().sum();
        by_slot.entry(slot_name(armor.slot)).or_default().push(ArmorCandidate { armor, points, total });
    }
    for candidates in by_slot.values_mut() {
        candidates.sort_by(|a, b| b.total.cmp(&a.total));
    }

    Ok(ArmorSearch {
        trees,
        decorations: values,
        by_slot,
    })
}

/// Skills of `tree` a point total activates; negative totals activate penalties
pub fn active_skills<'a>(skills: &'a [Skill], tree: SkillTreeId, points: i32) -> Vec<&'a Skill> {
    skills
        .iter()
        .filter(|s| s.skill_tree_id == tree)
        .filter(|s| {
            if s.required_points >= 0 {
                points >= s.required_points
            } else {
                points <= s.required_points
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repo::MemoryRepository;

    const DB: &str = r#"{
        "skill_trees": [ { "id": 1, "name": "Attack" }, { "id": 2, "name": "Expert" } ],
        "skills": [
            { "skill_tree_id": 1, "name": "Attack Up (S)", "required_points": 10 },
            { "skill_tree_id": 1, "name": "Attack Up (M)", "required_points": 15 },
            { "skill_tree_id": 1, "name": "Attack Down (S)", "required_points": -10 }
        ],
        "armor": [
            { "id": 10, "name": "Rathalos Helm", "slot": "Head", "defense": 40, "max_defense": 80,
              "num_slots": 3, "hunter_type": "blade" },
            { "id": 11, "name": "Bone Helm", "slot": "Head", "defense": 10, "max_defense": 30,
              "num_slots": 0, "hunter_type": "both" },
            { "id": 12, "name": "Hunter Mail", "slot": "Body", "defense": 10, "max_defense": 30,
              "num_slots": 1, "hunter_type": "gunner" }
        ],
        "decorations": [
            { "id": 20, "name": "Attack Jewel", "num_slots": 1 },
            { "id": 21, "name": "Attack Jewel+", "num_slots": 2 },
            { "id": 22, "name": "Mighty Jewel", "num_slots": 2 }
        ],
        "item_to_skill_tree": [
            { "item_id": 10, "skill_tree_id": 1, "point_value": 3 },
            { "item_id": 11, "skill_tree_id": 1, "point_value": 2 },
            { "item_id": 12, "skill_tree_id": 1, "point_value": 1 },
            { "item_id": 20, "skill_tree_id": 1, "point_value": 1 },
            { "item_id": 21, "skill_tree_id": 1, "point_value": 3 },
            { "item_id": 22, "skill_tree_id": 1, "point_value": 2 }
        ]
    }"#;

    #[test]
    fn test_decoration_values_prefers_best() {
        let repo = MemoryRepository::from_json(DB).unwrap();
        let decorations = repo.get_decorations_by_skills(&[SkillTreeId(1)]).unwrap();
        let values = decoration_values(SkillTreeId(1), &decorations);
        assert_eq!(values.values, [1, 3, 0]);
        assert_eq!(values.ids, [Some(ItemId(20)), Some(ItemId(21)), None]);
    }

    #[test]
    fn test_greedy_packing() {
        let repo = MemoryRepository::from_json(DB).unwrap();
        let helm = repo
            .get_armors(&Default::default())
            .unwrap()
            .into_iter()
            .find(|a| a.id == ItemId(10))
            .unwrap();
        assert_eq!(helm.skill_points(SkillTreeId(1), &[]), 3);
        // one 2-slot and one 1-slot decoration
        assert_eq!(helm.skill_points(SkillTreeId(1), &[1, 3]), 7);
        assert_eq!(helm.skill_points(SkillTreeId(1), &[1, 0, 4]), 7);
        assert_eq!(helm.skill_points(SkillTreeId(1), &[0, 3]), 6);
    }

    #[test]
    fn test_search_by_hunter_type() {
        let repo = MemoryRepository::from_json(DB).unwrap();
        let trees = resolve_trees(&repo, &["attack".to_string()], 0.5, 3).unwrap();
        let search = search_armor(&repo, trees, HunterType::Blade).unwrap();
        let heads = &search.by_slot["Head"];
        assert_eq!(heads[0].armor.name, "Rathalos Helm");
        assert_eq!(heads[0].total, 7);
        assert_eq!(heads[1].total, 2);
        assert!(!search.by_slot.contains_key("Body"));
    }

    #[test]
    fn test_unknown_tree_and_activation() {
        let repo = MemoryRepository::from_json(DB).unwrap();
        assert!(matches!(
            resolve_trees(&repo, &["Atack".to_string()], 0.5, 3),
            Err(HuntError::LookupMiss { .. })
        ));
        let skills = repo.get_skills().unwrap();
        let names: Vec<_> = active_skills(&skills, SkillTreeId(1), 16).iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Attack Up (S)", "Attack Up (M)"]);
        assert_eq!(active_skills(&skills, SkillTreeId(1), -12)[0].name, "Attack Down (S)");
    }
}
