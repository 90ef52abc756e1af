//! Expected yield of an item from quest reward slots

use super::prob::{quest_slot_expected_c, LuckSkill};
use crate::error::{HuntError, HuntResult, Warning};
use crate::model::{Quest, QuestRewardRow};
use crate::types::{ItemId, QuestSlot};
use serde::Serialize;
use std::collections::BTreeMap;

/// Percentage marking a reward that always appears
pub const FIXED_PERCENTAGE: i32 = 100;

/// One reward row of the target item
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuestReward {
    pub slot: QuestSlot,
    pub stack_size: u32,
    /// Percentage as stored
    pub percentage: i32,
    /// Percentage after renormalisation of the slot
    pub effective_percentage: f64,
    pub fixed: bool,
    /// EV per luck skill, indexed by `LuckSkill::index`
    pub evs: [f64; 4],
}

impl QuestReward {
    pub fn expected_value(&self, luck: LuckSkill) -> f64 {
        self.evs[luck.index()]
    }

    /// Whether luck skills change this row
    pub fn has_skill_delta(&self) -> bool {
        self.evs[3] != self.evs[0]
    }
}

/// Fixed and variable totals of one slot
#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct SlotTotals {
    fixed_others: u32,
    variable_total: i64,
    variable_rows: usize,
}

/// Expected yield of one item over every reward slot of a quest
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuestItemEV {
    pub quest: Quest,
    pub item_id: ItemId,
    pub rewards: Vec<QuestReward>,
    /// `[none, good, great, amazing]`
    pub totals: [f64; 4],
    pub warnings: Vec<Warning>,
}

impl QuestItemEV {
    /// Build from every reward row of `quest`
    ///
    /// Fixed rewards of other items use up draws. A slot whose variable
    /// percentages do not total 100 is rescaled with a warning; a negative
    /// total is rejected.
    pub fn new(item_id: ItemId, quest: &Quest, rows: &[QuestRewardRow]) -> HuntResult<Self> {
        let context = quest.one_line();
        let mut slots: BTreeMap<QuestSlot, SlotTotals> = BTreeMap::new();
        for row in rows {
            let totals = slots.entry(row.slot).or_default();
            if row.percentage == FIXED_PERCENTAGE {
                if row.item_id != item_id {
                    totals.fixed_others += 1;
                }
            } else {
                totals.variable_total += row.percentage as i64;
                totals.variable_rows += 1;
            }
        }

        let mut warnings = Vec::new();
        let mut factors: BTreeMap<QuestSlot, f64> = BTreeMap::new();
        for (slot, totals) in &slots {
            let factor = match totals.variable_total {
                _ if totals.variable_rows == 0 => 1.0,
                total if total < 0 => {
                    return Err(HuntError::NegativeRenormalisation {
                        quest: context,
                        slot: slot.to_string(),
                        total,
                    })
                }
                // Only zero-percent rows; nothing to rescale
                0 => 1.0,
                100 => 1.0,
                total => {
                    warnings.push(
                        Warning::Renormalised {
                            context: context.clone(),
                            slot: slot.to_string(),
                            total,
                        }
                        .emit(),
                    );
                    100.0 / total as f64
                }
            };
            factors.insert(*slot, factor);
        }

        let mut rewards = Vec::new();
        let mut clamped: Vec<QuestSlot> = Vec::new();
        for row in rows.iter().filter(|r| r.item_id == item_id) {
            if row.percentage == 0 {
                warnings.push(
                    Warning::ZeroPercentage {
                        context: context.clone(),
                        item_id,
                    }
                    .emit(),
                );
            }
            let stack = row.stack_size as f64;
            let fixed = row.percentage == FIXED_PERCENTAGE;
            let (effective, evs) = if fixed {
                let ev = FIXED_PERCENTAGE as f64 * stack;
                (FIXED_PERCENTAGE as f64, [ev; 4])
            } else {
                let factor = factors.get(&row.slot).copied().unwrap_or(1.0);
                let pct = row.percentage as f64 * factor;
                let fixed_others = slots.get(&row.slot).map(|t| t.fixed_others).unwrap_or(0) as f64;
                let mut evs = [0.0; 4];
                for luck in LuckSkill::ALL {
                    let draws = quest_slot_expected_c(row.slot, luck) - fixed_others;
                    if draws < 0.0 && !clamped.contains(&row.slot) {
                        clamped.push(row.slot);
                        warnings.push(
                            Warning::FixedExceedsDraws {
                                context: context.clone(),
                                slot: row.slot.to_string(),
                            }
                            .emit(),
                        );
                    }
                    evs[luck.index()] = draws.max(0.0) * stack * pct;
                }
                (pct, evs)
            };
            rewards.push(QuestReward {
                slot: row.slot,
                stack_size: row.stack_size,
                percentage: row.percentage,
                effective_percentage: effective,
                fixed,
                evs,
            });
        }

        let mut totals = [0.0; 4];
        for reward in &rewards {
            for (total, ev) in totals.iter_mut().zip(reward.evs) {
                *total += ev;
            }
        }

        Ok(QuestItemEV {
            quest: quest.clone(),
            item_id,
            rewards,
            totals,
            warnings,
        })
    }

    pub fn expected_value(&self, luck: LuckSkill) -> f64 {
        self.totals[luck.index()]
    }

    /// Item comes from the sub quest
    pub fn is_sub(&self) -> bool {
        self.rewards.iter().any(|r| r.slot == QuestSlot::Sub)
    }

    /// Item comes from the main quest
    pub fn is_main(&self) -> bool {
        self.rewards.iter().any(|r| matches!(r.slot, QuestSlot::A | QuestSlot::B))
    }
}
