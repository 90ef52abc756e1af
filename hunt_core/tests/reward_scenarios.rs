//! Reward EV engine against the fixture database

use hunt_core::model::QuestRewardRow;
use hunt_core::prelude::*;
use hunt_core::rewards::prob::{reward_count_p, reward_expected_c, slot_draws};
use hunt_core::rewards::{render, QuestItemEV, StrategyKind, Strategy};
use hunt_core::types::{ItemId, QuestId, QuestSlot};
use std::path::Path;

fn repo() -> MemoryRepository {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/mini_db.json");
    MemoryRepository::load(&path).unwrap()
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn test_a_slot_draw_distribution() {
    let (min, max) = slot_draws(QuestSlot::A);
    assert_eq!((min, max), (4, 8));
    let extend = 22.0 / 32.0;
    assert!(close(reward_count_p(4, min, max, extend), 10.0 / 32.0));
    assert!(close(reward_count_p(8, min, max, extend), extend.powi(4)));
    let expected = 4.0 + extend * (1.0 + extend * (1.0 + extend * (1.0 + extend)));
    assert!(close(reward_expected_c(min, max, extend), expected));
}

#[test]
fn test_capture_god_two_rows() {
    let repo = repo();
    let constants = default_constants();
    let rewards = RewardEngine::new(&repo, &constants).item_rewards("Wyvern Gem").unwrap();

    let rathalos = rewards.hunts.iter().find(|h| h.monster.name == "Rathalos").unwrap();
    let capture: f64 = rathalos
        .rewards
        .iter()
        .filter(|r| r.condition.to_string() == "Capture")
        .map(|r| r.expected_value(Strategy::Cap, CaptureSkill::God, CarvingSkill::None))
        .sum();
    assert!(close(capture, 120.0));
    // the head break adds 5 under both strategies
    assert!(close(rathalos.cap_range().1, 125.0));
    assert_eq!(rathalos.kill_range(), (5.0, 5.0));
    assert!(close(rathalos.shiny(), 10.0));
}

#[test]
fn test_quest_with_fixed_reward_in_slot() {
    let repo = repo();
    let constants = default_constants();
    let rewards = RewardEngine::new(&repo, &constants).item_rewards("Wyvern Gem").unwrap();
    let quest = &rewards.quests[0];
    assert_eq!(quest.rewards.quest.name, "Sky King");
    // the unstable jaggi is not a stable objective
    assert_eq!(quest.hunts.len(), 1);

    let extend = 22.0 / 32.0;
    let a = 4.0 * reward_expected_c(4, 8, extend);
    // the fixed flame sac takes one B draw
    let b = 10.0 * (reward_expected_c(2, 8, extend) - 1.0);
    assert!(close(quest.rewards.expected_value(LuckSkill::None), a + b));
    assert!(quest.rewards.warnings.is_empty());
}

#[test]
fn test_fixed_target_and_zero_row() {
    let repo = repo();
    let constants = default_constants();
    let rewards = RewardEngine::new(&repo, &constants).item_rewards("rathalos scale").unwrap();
    let scale_run = rewards
        .quests
        .iter()
        .find(|q| q.rewards.quest.name == "Scale Run")
        .unwrap();
    for luck in LuckSkill::ALL {
        assert!(close(scale_run.rewards.expected_value(luck), 300.0));
    }
    assert!(matches!(
        scale_run.rewards.warnings.as_slice(),
        [Warning::ZeroPercentage { .. }]
    ));
    assert!(scale_run.rewards.is_sub());
}

#[test]
fn test_renormalised_slot_warns() {
    let repo = repo();
    let quest = repo.get_quest(QuestId(101)).unwrap().unwrap();
    let row = |item: u32, percentage: i32| QuestRewardRow {
        quest_id: quest.id,
        slot: QuestSlot::A,
        item_id: ItemId(item),
        percentage,
        stack_size: 1,
    };
    let rows = vec![row(5, 30), row(6, 30)];
    let ev = QuestItemEV::new(ItemId(5), &quest, &rows).unwrap();
    assert!(close(ev.rewards[0].effective_percentage, 50.0));
    assert!(matches!(ev.warnings.as_slice(), [Warning::Renormalised { total: 60, .. }]));

    let negative = vec![row(5, -30), row(6, 10)];
    assert!(matches!(
        QuestItemEV::new(ItemId(5), &quest, &negative),
        Err(HuntError::NegativeRenormalisation { .. })
    ));
}

#[test]
fn test_explorer_reaches_secret_sites() {
    let repo = repo();
    let constants = default_constants();
    let rewards = RewardEngine::new(&repo, &constants).item_rewards("Firecell Stone").unwrap();
    assert_eq!(rewards.gathers.len(), 1);
    let volcano = &rewards.gathers[0];
    assert!(close(volcano.expected_value(false), 60.0));
    assert!(close(volcano.expected_value(true), 180.0));

    let explorer = rewards
        .recommendations
        .iter()
        .find(|r| r.rank == Rank::High && r.profile == SkillProfile::EXPLORER)
        .and_then(|r| r.best.as_ref())
        .unwrap();
    assert_eq!(explorer.kind, StrategyKind::Gather);
    assert!(close(explorer.ev, 180.0));

    let text = render(&rewards);
    assert!(text.contains("(GATHER) Volcano HR"));
    assert!(text.contains("Gather  0.60 to  1.80 / 100"));
}

#[test]
fn test_best_quest_beats_hunt_under_capture_god() {
    let repo = repo();
    let constants = default_constants();
    let rewards = RewardEngine::new(&repo, &constants).item_rewards("Wyvern Gem").unwrap();
    let best = rewards
        .recommendations
        .iter()
        .find(|r| r.rank == Rank::High && r.profile == SkillProfile::CAPTURE_GOD)
        .and_then(|r| r.best.clone())
        .unwrap();
    assert_eq!(best.source.label(), "QUEST");
    assert_eq!(best.kind, StrategyKind::Cap);
    assert!(best.ev > 125.0);

    // nothing in low rank rewards the gem
    assert!(rewards
        .recommendations
        .iter()
        .filter(|r| r.rank == Rank::Low)
        .all(|r| r.best_ev() == 0.0));
}

#[test]
fn test_wyporium_trade_report() {
    let repo = repo();
    let constants = default_constants();
    let rewards = RewardEngine::new(&repo, &constants).item_rewards("Old Gem").unwrap();
    assert_eq!(rewards.name(), "Wyvern Gem");
    let text = render(&rewards);
    assert!(text.starts_with("Wyporium trade: Old Gem -> Wyvern Gem (unlocked by Sky King (Guild 6* HR))"));
    assert!(text.contains("*** Poogie Recommends ***"));
}

#[test]
fn test_unknown_item_suggestions() {
    let repo = repo();
    let constants = default_constants();
    let rewards = RewardEngine::new(&repo, &constants).item_rewards("Wyvern Jem").unwrap();
    assert!(!rewards.is_found());
    assert_eq!(rewards.suggestions.first().map(String::as_str), Some("Wyvern Gem"));
    assert!(render(&rewards).starts_with("Item 'Wyvern Jem' not found. Listing partial matches:\nWyvern Gem\n"));
}

#[test]
fn test_unmatched_name_is_an_empty_result() {
    let repo = repo();
    let constants = default_constants();
    let rewards = RewardEngine::new(&repo, &constants).item_rewards("Nonexistant Gem").unwrap();
    assert!(rewards.is_empty());
    assert!(rewards.trade.is_none());
    assert!(rewards.recommendations.iter().all(|r| r.best_ev() == 0.0));
    assert!(rewards.suggestions.contains(&"Wyvern Gem".to_string()));
    assert!(rewards.suggestions.contains(&"Old Gem".to_string()));
}
