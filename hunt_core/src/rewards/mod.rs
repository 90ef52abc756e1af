//! Reward system - expected yields of an item from hunts, quests and gathering

mod engine;
mod gather;
mod hunt;
mod lookup;
pub mod prob;
mod quest;
mod report;
mod strategy;

pub use engine::{recommend, ItemRewards, RewardEngine, TradeRedirect};
pub use gather::{GatherLocation, GatherReward};
pub use hunt::{HuntItemEV, HuntReward, Strategy};
pub use lookup::find_item;
pub use prob::{CaptureSkill, CarvingSkill, LuckSkill, RewardLine};
pub use quest::{QuestItemEV, QuestReward, FIXED_PERCENTAGE};
pub use report::{format_range, render};
pub use strategy::{ItemStrategy, QuestOption, RankAndSkills, SkillProfile, StrategyKind, StrategySource};
