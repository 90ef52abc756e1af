//! Probability primitives for reward draws

use crate::error::{HuntError, HuntResult};
use crate::types::QuestSlot;
use serde::Serialize;
use std::fmt;
use std::fmt::Write;
use std::str::FromStr;

/// Extend chance out of 32 with no luck skill; sub slots always use it
pub const BASE_EXTEND_32: u32 = 22;

/// Probability of at least one copy across `count` independent draws at `percent`
pub fn reward_p(percent: f64, count: u32) -> f64 {
    1.0 - (1.0 - percent / 100.0).powi(count as i32)
}

/// Probability of exactly `count` draws
///
/// At least `min` draws happen; each further draw happens with probability
/// `extend`, capped at `max`.
pub fn reward_count_p(count: u32, min: u32, max: u32, extend: f64) -> f64 {
    if count < min || count > max {
        return 0.0;
    }
    if count == max {
        return extend.powi((max - min) as i32);
    }
    if count == min {
        return 1.0 - extend;
    }
    extend.powi((count - min) as i32) * (1.0 - extend)
}

/// `E[C]` of the draw-count distribution
pub fn reward_expected_c(min: u32, max: u32, extend: f64) -> f64 {
    (min..=max)
        .map(|k| k as f64 * reward_count_p(k, min, max, extend))
        .sum()
}

/// Probability of at least one copy of an item at `percent` over the draw distribution
pub fn quest_reward_p(percent: f64, min: u32, max: u32, extend: f64) -> f64 {
    (min..=max)
        .map(|k| reward_count_p(k, min, max, extend) * reward_p(percent, k))
        .sum()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum LuckSkill {
    None,
    Good,
    Great,
    Amazing,
}

impl LuckSkill {
    pub const ALL: [LuckSkill; 4] = [LuckSkill::None, LuckSkill::Good, LuckSkill::Great, LuckSkill::Amazing];

    /// Chance out of 32 of one more quest reward draw
    pub fn extend_32(self) -> u32 {
        match self {
            LuckSkill::None => BASE_EXTEND_32,
            LuckSkill::Good => 25,
            LuckSkill::Great => 28,
            LuckSkill::Amazing => 31,
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            LuckSkill::None => "none",
            LuckSkill::Good => "Good Luck",
            LuckSkill::Great => "Great Luck",
            LuckSkill::Amazing => "Amazing Luck",
        }
    }
}

impl FromStr for LuckSkill {
    type Err = HuntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "" | "none" => Ok(LuckSkill::None),
            "good" => Ok(LuckSkill::Good),
            "great" => Ok(LuckSkill::Great),
            "amazing" | "magnificent" => Ok(LuckSkill::Amazing),
            other => Err(HuntError::InvalidConfig(format!("unknown luck skill '{}'", other))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum CaptureSkill {
    None,
    Expert,
    Master,
    God,
}

impl CaptureSkill {
    pub const ALL: [CaptureSkill; 4] = [
        CaptureSkill::None,
        CaptureSkill::Expert,
        CaptureSkill::Master,
        CaptureSkill::God,
    ];

    /// Expected number of capture rewards
    pub fn expected_count(self) -> f64 {
        let extend = BASE_EXTEND_32 as f64 / 32.0;
        match self {
            CaptureSkill::None => reward_expected_c(2, 3, extend),
            CaptureSkill::Expert => 3.0,
            CaptureSkill::Master => reward_expected_c(3, 4, extend),
            CaptureSkill::God => 4.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum CarvingSkill {
    None,
    /// Prevents knockbacks only
    Pro,
    FelyneLow,
    FelyneHigh,
    Celebrity,
    God,
}

impl CarvingSkill {
    pub const ALL: [CarvingSkill; 6] = [
        CarvingSkill::None,
        CarvingSkill::Pro,
        CarvingSkill::FelyneLow,
        CarvingSkill::FelyneHigh,
        CarvingSkill::Celebrity,
        CarvingSkill::God,
    ];

    /// Expected extra carves over the base count
    pub fn delta(self) -> f64 {
        match self {
            CarvingSkill::None | CarvingSkill::Pro => 0.0,
            CarvingSkill::FelyneLow => reward_expected_c(0, 1, 0.25),
            CarvingSkill::FelyneHigh => reward_expected_c(0, 1, 0.50),
            CarvingSkill::Celebrity => 1.0,
            CarvingSkill::God => reward_expected_c(1, 2, 25.0 / 32.0),
        }
    }
}

/// Guaranteed and maximum draws of a quest reward slot
pub fn slot_draws(slot: QuestSlot) -> (u32, u32) {
    match slot {
        QuestSlot::A => (4, 8),
        QuestSlot::B => (2, 8),
        QuestSlot::Sub => (1, 4),
        QuestSlot::C | QuestSlot::D => (1, 1),
    }
}

/// Expected draws from a quest slot; sub slots ignore luck
pub fn quest_slot_expected_c(slot: QuestSlot, luck: LuckSkill) -> f64 {
    let (min, max) = slot_draws(slot);
    let extend_32 = match slot {
        QuestSlot::Sub => BASE_EXTEND_32,
        _ => luck.extend_32(),
    };
    reward_expected_c(min, max, extend_32 as f64 / 32.0)
}

/// One reward line: the draws that could be the wanted item
///
/// Fixed rewards that are not the item take draws away from it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RewardLine {
    pub percent: f64,
    pub fixed_rewards: u32,
    pub guaranteed_rewards: u32,
    pub max_rewards: u32,
    pub extend_percent: f64,
}

impl RewardLine {
    pub fn new(percent: f64, fixed_rewards: u32, guaranteed_rewards: u32, extend_percent: f64) -> HuntResult<Self> {
        if fixed_rewards > guaranteed_rewards {
            return Err(HuntError::InvalidConfig(format!(
                "fixed rewards ({}) must be less than or equal to guaranteed rewards ({})",
                fixed_rewards, guaranteed_rewards
            )));
        }
        if !(0.0..=100.0).contains(&percent) || !(0.0..=100.0).contains(&extend_percent) {
            return Err(HuntError::InvalidConfig("percentages must be within 0..=100".to_string()));
        }
        Ok(RewardLine {
            percent,
            fixed_rewards,
            guaranteed_rewards,
            max_rewards: 8,
            extend_percent,
        })
    }

    pub fn min_draws(&self) -> u32 {
        self.guaranteed_rewards - self.fixed_rewards
    }

    pub fn max_draws(&self) -> u32 {
        self.max_rewards.saturating_sub(self.fixed_rewards).max(self.min_draws())
    }

    fn extend(&self) -> f64 {
        self.extend_percent / 100.0
    }

    /// `(k, P(C = k))` for every possible draw count
    pub fn count_distribution(&self) -> Vec<(u32, f64)> {
        let (min, max) = (self.min_draws(), self.max_draws());
        (min..=max).map(|k| (k, reward_count_p(k, min, max, self.extend()))).collect()
    }

    pub fn expected_draws(&self) -> f64 {
        reward_expected_c(self.min_draws(), self.max_draws(), self.extend())
    }

    /// Probability of at least one copy, 0..=1
    pub fn p_at_least_one(&self) -> f64 {
        quest_reward_p(self.percent, self.min_draws(), self.max_draws(), self.extend())
    }

    pub fn expected_copies(&self) -> f64 {
        self.expected_draws() * self.percent / 100.0
    }
}

impl fmt::Display for RewardLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = String::new();
        for (k, p) in self.count_distribution() {
            let _ = writeln!(out, "P(C = {}) = {:.4}", k, p);
        }
        let _ = writeln!(out, "E(C)     = {:.2}", self.expected_draws());
        let _ = writeln!(out, "P(N > 0) = {:.2}%", self.p_at_least_one() * 100.0);
        let _ = write!(out, "E(N)     = {:.4}", self.expected_copies());
        f.write_str(&out)
    }
}
