//! Expected yield of an item from hunting a monster

use super::prob::{CaptureSkill, CarvingSkill};
use crate::error::Warning;
use crate::model::{ConditionRules, CountSkill, HuntingRewardRow, Monster, RewardCondition};
use crate::types::{ItemId, Rank};
use serde::Serialize;
use std::fmt;

/// How a hunt ends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Strategy {
    Kill,
    Cap,
    Shiny,
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Strategy::Kill => "kill",
            Strategy::Cap => "cap",
            Strategy::Shiny => "shiny",
        };
        f.write_str(name)
    }
}

/// One hunting reward row of the target item
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HuntReward {
    pub condition: RewardCondition,
    pub stack_size: u32,
    pub percentage: u32,
}

impl HuntReward {
    pub fn from_row(row: &HuntingRewardRow) -> Self {
        HuntReward {
            condition: row.condition.clone(),
            stack_size: row.stack_size,
            percentage: row.percentage,
        }
    }

    pub fn rules(&self) -> ConditionRules {
        self.condition.rules()
    }

    /// Expected number of rewards this row draws
    pub fn expected_count(&self, capture: CaptureSkill, carving: CarvingSkill) -> f64 {
        let rules = self.rules();
        match rules.count_skill {
            CountSkill::Fixed => rules.base_count,
            CountSkill::Carving => rules.base_count + carving.delta(),
            CountSkill::Capture => capture.expected_count(),
        }
    }

    /// Whether the row pays out under `strategy`
    pub fn applies(&self, strategy: Strategy) -> bool {
        let rules = self.rules();
        match strategy {
            Strategy::Kill => rules.kill,
            Strategy::Cap => rules.capture,
            Strategy::Shiny => rules.shiny,
        }
    }

    pub fn expected_value(&self, strategy: Strategy, capture: CaptureSkill, carving: CarvingSkill) -> f64 {
        if !self.applies(strategy) {
            return 0.0;
        }
        self.expected_count(capture, carving) * self.stack_size as f64 * self.percentage as f64
    }

    /// EV along the ladder of the skill governing this row, lowest first.
    /// A single value when no skill applies.
    pub fn ev_ladder(&self) -> Vec<f64> {
        let per_draw = self.stack_size as f64 * self.percentage as f64;
        match self.rules().count_skill {
            CountSkill::Fixed => vec![self.rules().base_count * per_draw],
            CountSkill::Carving => CarvingSkill::ALL
                .iter()
                .filter(|c| **c != CarvingSkill::None)
                .map(|c| self.expected_count(CaptureSkill::None, *c) * per_draw)
                .collect(),
            CountSkill::Capture => CaptureSkill::ALL
                .iter()
                .map(|c| self.expected_count(*c, CarvingSkill::None) * per_draw)
                .collect(),
        }
    }
}

/// Expected yield of one item from a monster at a rank
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HuntItemEV {
    pub monster: Monster,
    pub rank: Rank,
    pub item_id: ItemId,
    pub rewards: Vec<HuntReward>,
    pub warnings: Vec<Warning>,
}

impl HuntItemEV {
    /// Keep the rows of `rows` that reward `item_id`
    pub fn new(item_id: ItemId, monster: &Monster, rank: Rank, rows: &[HuntingRewardRow]) -> Self {
        let mut warnings = Vec::new();
        let rewards = rows
            .iter()
            .filter(|r| r.item_id == item_id && r.rank == rank)
            .inspect(|r| {
                if r.percentage == 0 {
                    warnings.push(
                        Warning::ZeroPercentage {
                            context: format!("{} {} {}", monster.name, rank, r.condition),
                            item_id,
                        }
                        .emit(),
                    );
                }
            })
            .map(HuntReward::from_row)
            .collect();
        HuntItemEV {
            monster: monster.clone(),
            rank,
            item_id,
            rewards,
            warnings,
        }
    }

    pub fn expected_value(&self, strategy: Strategy, capture: CaptureSkill, carving: CarvingSkill) -> f64 {
        self.rewards
            .iter()
            .map(|r| r.expected_value(strategy, capture, carving))
            .sum()
    }

    /// Kill EV from no skill to carving god
    pub fn kill_range(&self) -> (f64, f64) {
        (
            self.expected_value(Strategy::Kill, CaptureSkill::None, CarvingSkill::None),
            self.expected_value(Strategy::Kill, CaptureSkill::None, CarvingSkill::God),
        )
    }

    /// Capture EV from no skill to capture god; carves stay unboosted
    pub fn cap_range(&self) -> (f64, f64) {
        (
            self.expected_value(Strategy::Cap, CaptureSkill::None, CarvingSkill::None),
            self.expected_value(Strategy::Cap, CaptureSkill::God, CarvingSkill::None),
        )
    }

    pub fn shiny(&self) -> f64 {
        self.expected_value(Strategy::Shiny, CaptureSkill::None, CarvingSkill::None)
    }

    pub fn is_empty(&self) -> bool {
        self.rewards.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::CarveSite;
    use crate::types::{MonsterClass, MonsterId};

    fn monster() -> Monster {
        Monster {
            id: MonsterId(3),
            name: "Rathalos".to_string(),
            class: MonsterClass::Boss,
        }
    }

    fn row(condition: RewardCondition, item: u32, percentage: u32) -> HuntingRewardRow {
        HuntingRewardRow {
            monster_id: MonsterId(3),
            rank: Rank::High,
            condition,
            item_id: ItemId(item),
            percentage,
            stack_size: 1,
        }
    }

    #[test]
    fn test_capture_god_two_rows() {
        let rows = vec![
            row(RewardCondition::Capture, 1, 15),
            row(RewardCondition::Capture, 1, 15),
            row(RewardCondition::Capture, 2, 70),
        ];
        let hunt = HuntItemEV::new(ItemId(1), &monster(), Rank::High, &rows);
        assert_eq!(hunt.rewards.len(), 2);
        let ev = hunt.expected_value(Strategy::Cap, CaptureSkill::God, CarvingSkill::None);
        assert!((ev - 120.0).abs() < 1e-9);
        assert_eq!(hunt.expected_value(Strategy::Kill, CaptureSkill::God, CarvingSkill::God), 0.0);
    }

    #[test]
    fn test_strategy_dispatch() {
        let rows = vec![
            row(RewardCondition::BodyCarve(CarveSite::Body), 1, 10),
            row(RewardCondition::TailCarve, 1, 20),
            row(RewardCondition::Shiny("Drop".to_string()), 1, 50),
            row(RewardCondition::Break("Head".to_string()), 1, 40),
        ];
        let hunt = HuntItemEV::new(ItemId(1), &monster(), Rank::High, &rows);
        let (kill_low, kill_high) = hunt.kill_range();
        assert!((kill_low - (30.0 + 20.0 + 40.0)).abs() < 1e-9);
        let god = CarvingSkill::God.delta();
        assert!((kill_high - ((3.0 + god) * 10.0 + (1.0 + god) * 20.0 + 40.0)).abs() < 1e-9);
        let (cap_low, cap_high) = hunt.cap_range();
        assert!((cap_low - 60.0).abs() < 1e-9);
        assert_eq!(cap_low, cap_high);
        assert!((hunt.shiny() - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_ev_ladder_lengths() {
        let carve = HuntReward::from_row(&row(RewardCondition::TailCarve, 1, 10));
        assert_eq!(carve.ev_ladder().len(), 5);
        let cap = HuntReward::from_row(&row(RewardCondition::Capture, 1, 10));
        let expected = [10.0 * (2.0 + 22.0 / 32.0), 30.0, 10.0 * (3.0 + 22.0 / 32.0), 40.0];
        for (got, want) in cap.ev_ladder().iter().zip(expected) {
            assert!((got - want).abs() < 1e-9);
        }
        let virus = HuntReward::from_row(&row(RewardCondition::VirusReward, 1, 10));
        assert_eq!(virus.ev_ladder(), vec![10.0]);
    }

    #[test]
    fn test_zero_percentage_warns() {
        let hunt = HuntItemEV::new(ItemId(1), &monster(), Rank::High, &[row(RewardCondition::Capture, 1, 0)]);
        assert_eq!(hunt.warnings.len(), 1);
        assert_eq!(hunt.cap_range(), (0.0, 0.0));
    }
}
