//! Damage engine against the fixture database

use hunt_core::damage::{comparison_table, WeaponFilter};
use hunt_core::prelude::*;
use hunt_core::types::Hub;
use std::path::Path;

fn repo() -> MemoryRepository {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/mini_db.json");
    MemoryRepository::load(&path).unwrap()
}

fn engine() -> DamageEngine {
    DamageEngine::new(GameVariant::Classic, &default_constants())
}

fn damage(repo: &MemoryRepository, weapon: &str, motion: f64, skills: &SkillConfig) -> WeaponMonsterDamage {
    let weapon = repo.get_weapon_by_name(weapon).unwrap().unwrap();
    let monster = repo.get_monster_by_name("Rathalos").unwrap().unwrap();
    let rows = repo.get_monster_damage(monster.id).unwrap();
    let breaks = repo.get_monster_breaks(monster.id).unwrap();
    engine()
        .compute(&weapon, &monster, &rows, &breaks, motion, skills)
        .unwrap()
}

#[test]
fn test_great_sword_blue_sharpness() {
    let repo = repo();
    let result = damage(&repo, "Bone Blade", 48.0, &SkillConfig::default());

    assert!((result.weapon.true_raw - 190.0).abs() < 1e-9);
    assert_eq!(result.weapon.sharpness, Some(SharpnessColor::Blue));
    // floor(190 * 1.25 * 1 * 0.48 * 0.45)
    assert_eq!(result.get("Head").unwrap().raw(), 51.0);
    assert_eq!(result.get("Head").unwrap().element(), 0.0);
}

#[test]
fn test_parts_breaks_and_rage() {
    let repo = repo();
    let result = damage(&repo, "Bone Blade", 48.0, &SkillConfig::default());

    let names: Vec<&str> = result.part_names().collect();
    assert_eq!(names, vec!["Head", "Wing", "Body", "Tail"]);
    let head = result.get("Head").unwrap();
    assert!(head.listed_break);
    assert!(head.is_breakable());
    assert!(!result.get("Body").unwrap().is_breakable());

    // a tail carve implies a tail break
    let tail = result.get("Tail").unwrap();
    assert!(tail.listed_break);
    let expected = 0.5 * tail.total_rage() + 0.5 * tail.total();
    assert!((result.part_average(tail) - expected).abs() < 1e-9);
    assert_eq!(result.weak_raw_part.as_deref(), Some("Head"));
}

#[test]
fn test_lance_uses_scaled_impact() {
    let repo = repo();
    let result = damage(&repo, "Knight Lance", 27.0, &SkillConfig::default());
    let wing = result.get("Wing").unwrap();
    assert!((wing.hitzone() - 36.0).abs() < 1e-9);
    // cut wins where it is higher than 0.72 * impact
    assert!((result.get("Head").unwrap().hitzone() - 45.0).abs() < 1e-9);
}

#[test]
fn test_dual_elements_are_halved() {
    let repo = repo();
    let result = damage(&repo, "Twin Flames", 17.0, &SkillConfig::default());
    assert_eq!(result.weapon.elements.len(), 2);
    // floor(20 * 1.0625 * 0.25) / 2 + floor(18 * 1.0625 * 0.10) / 2
    assert_eq!(result.get("Head").unwrap().element(), 3.0);
    assert_eq!(result.get("Head").unwrap().element_hitzone(), 25.0);
}

#[test]
fn test_chaotic_affinity_and_frenzy() {
    let repo = repo();
    let weapon = repo.get_weapon_by_name("Red Wing").unwrap().unwrap();
    let engine = engine();

    let plain = engine.weapon_state(&weapon, &SkillConfig::default()).unwrap();
    assert_eq!(plain.affinity, -25);

    let frenzy = SkillConfig {
        frenzy: 15,
        ..Default::default()
    };
    let overcome = engine.weapon_state(&weapon, &frenzy).unwrap();
    assert_eq!(overcome.affinity, 60);
}

#[test]
fn test_impact_phial_super_burst() {
    let repo = repo();
    let skills = SkillConfig {
        shield_charged: true,
        artillery: 2,
        ..Default::default()
    };
    let result = damage(&repo, "Elite Blade", 30.0, &skills);
    let burst = engine().phial(&result, "Head", 5, &skills).unwrap().unwrap();
    // 200 * 0.33 * 1.4 * 5, no shield bonus at level 5
    assert!((burst.burst - 462.0).abs() < 1e-6);
    assert_eq!(result.phials["Head"].len(), 5);
}

#[test]
fn test_gunner_has_no_sharpness() {
    let repo = repo();
    let result = damage(&repo, "Hunter's Bow", 12.0, &SkillConfig::default());
    assert_eq!(result.weapon.sharpness, None);
    assert_eq!(result.weapon.sharpness_raw, 1.0);
}

#[test]
fn test_filter_and_table() {
    let repo = repo();
    let filter = WeaponFilter {
        weapon_type: Some(WeaponClass::GreatSword),
        ..Default::default()
    };
    let weapons = filter.select(&repo, 0.5, 3).unwrap();
    assert_eq!(weapons.len(), 3);

    let finals = WeaponFilter {
        final_only: true,
        ..filter
    };
    assert_eq!(finals.select(&repo, 0.5, 3).unwrap().len(), 1);

    let results: Vec<_> = ["Bone Blade", "Bone Blade+"]
        .iter()
        .map(|name| damage(&repo, name, 48.0, &SkillConfig::default()))
        .collect();
    let table = comparison_table(&results);
    let lines: Vec<&str> = table.lines().collect();
    assert!(lines[1].starts_with("| Rathalos"));
    assert!(lines[1].contains("Head"));
    assert!(lines[3].starts_with("| Bone Blade "));
}

#[test]
fn test_quest_star_filter() {
    let repo = repo();
    let names = |hub, stars| -> Vec<String> {
        let filter = WeaponFilter {
            weapon_type: Some(WeaponClass::GreatSword),
            stars: Some((hub, stars)),
            ..Default::default()
        };
        filter.select(&repo, 0.5, 3).unwrap().into_iter().map(|w| w.name).collect()
    };
    // iron ore and scales both come from the 3 star caravan quest
    assert_eq!(names(Hub::Caravan, 3), vec!["Bone Blade", "Bone Blade+", "Red Wing"]);
    assert!(names(Hub::Caravan, 2).is_empty());
    // no guild quest yields iron ore
    assert!(names(Hub::Guild, 6).is_empty());

    let lances = WeaponFilter {
        weapon_type: Some(WeaponClass::Lance),
        stars: Some((Hub::Guild, 10)),
        ..Default::default()
    };
    // nothing is known about how the lance is made
    assert!(lances.select(&repo, 0.5, 3).unwrap().is_empty());
}

#[test]
fn test_unknown_weapon_suggests() {
    let repo = repo();
    let err = WeaponFilter::by_names(["Bone Blad"]).select(&repo, 0.5, 3).unwrap_err();
    match err {
        HuntError::LookupMiss { suggestions, .. } => assert!(suggestions.contains(&"Bone Blade".to_string())),
        other => panic!("unexpected error {:?}", other),
    }
}
