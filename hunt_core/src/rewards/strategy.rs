//! Best-strategy search over skill profiles

use super::gather::GatherLocation;
use super::hunt::{HuntItemEV, Strategy};
use super::prob::{CaptureSkill, CarvingSkill, LuckSkill};
use super::quest::QuestItemEV;
use crate::error::{HuntError, HuntResult};
use crate::types::Rank;
use serde::Serialize;
use std::fmt;

/// Strategy reported for an option
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum StrategyKind {
    Kill,
    Cap,
    Shiny,
    /// Kill and capture yield the same
    CapOrKill,
    Gather,
    /// Nothing in the option rewards the item
    None,
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StrategyKind::Kill => "kill",
            StrategyKind::Cap => "cap",
            StrategyKind::Shiny => "shiny",
            StrategyKind::CapOrKill => "cap-or-kill",
            StrategyKind::Gather => "gather",
            StrategyKind::None => "none",
        };
        f.write_str(name)
    }
}

/// Where an option comes from
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum StrategySource {
    Hunt { monster: String, rank: Rank },
    Quest { quest: String },
    Gather { location: String, rank: Rank },
}

impl StrategySource {
    pub fn label(&self) -> &'static str {
        match self {
            StrategySource::Hunt { .. } => "HUNT",
            StrategySource::Quest { .. } => "QUEST",
            StrategySource::Gather { .. } => "GATHER",
        }
    }

    pub fn subject(&self) -> String {
        match self {
            StrategySource::Hunt { monster, rank } => format!("{} {}", monster, rank),
            StrategySource::Quest { quest } => quest.clone(),
            StrategySource::Gather { location, rank } => format!("{} {}", location, rank),
        }
    }
}

/// One concrete way to obtain an item
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItemStrategy {
    pub source: StrategySource,
    pub kind: StrategyKind,
    /// Expected copies per hundred runs
    pub ev: f64,
}

impl ItemStrategy {
    /// Pick between kill and capture totals; shiny only counts when both are 0
    pub fn from_totals(source: StrategySource, kill: f64, cap: f64, shiny: f64) -> ItemStrategy {
        let (kind, ev) = if kill == 0.0 && cap == 0.0 && shiny == 0.0 {
            (StrategyKind::None, 0.0)
        } else if kill == 0.0 && cap == 0.0 {
            (StrategyKind::Shiny, shiny)
        } else if kill == cap {
            (StrategyKind::CapOrKill, kill)
        } else if kill > cap {
            (StrategyKind::Kill, kill)
        } else {
            (StrategyKind::Cap, cap)
        };
        ItemStrategy { source, kind, ev }
    }
}

/// A fixed set of active skills
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SkillProfile {
    pub label: &'static str,
    pub luck: LuckSkill,
    pub capture: CaptureSkill,
    pub carving: CarvingSkill,
    pub explorer: bool,
}

impl SkillProfile {
    pub const NONE: SkillProfile = SkillProfile {
        label: "No skills",
        luck: LuckSkill::None,
        capture: CaptureSkill::None,
        carving: CarvingSkill::None,
        explorer: false,
    };
    pub const CAPTURE_GOD: SkillProfile = SkillProfile {
        label: "Capture God",
        capture: CaptureSkill::God,
        ..SkillProfile::NONE
    };
    pub const CARVING_GOD: SkillProfile = SkillProfile {
        label: "Carving God",
        carving: CarvingSkill::God,
        ..SkillProfile::NONE
    };
    pub const MAGNIFICENT_LUCK: SkillProfile = SkillProfile {
        label: "Magnificent Luck",
        luck: LuckSkill::Amazing,
        ..SkillProfile::NONE
    };
    pub const EXPLORER: SkillProfile = SkillProfile {
        label: "Explorer",
        explorer: true,
        ..SkillProfile::NONE
    };

    /// Profiles presented under a rank policy; explorer is not offered in low rank
    pub fn for_rank(rank: Rank) -> Vec<SkillProfile> {
        let mut profiles = vec![
            SkillProfile::NONE,
            SkillProfile::CAPTURE_GOD,
            SkillProfile::CARVING_GOD,
            SkillProfile::MAGNIFICENT_LUCK,
        ];
        if rank != Rank::Low {
            profiles.push(SkillProfile::EXPLORER);
        }
        profiles
    }
}

/// A quest that rewards the item, with its monsters and gathering
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuestOption {
    pub rewards: QuestItemEV,
    /// Stable objectives that reward the item
    pub hunts: Vec<HuntItemEV>,
    /// Gathering at the quest location and rank
    pub gather: Option<GatherLocation>,
}

impl QuestOption {
    pub fn rank(&self) -> Rank {
        self.rewards.quest.rank
    }

    /// (kill, cap, shiny) totals under `profile`
    pub fn totals(&self, profile: &SkillProfile) -> (f64, f64, f64) {
        let quest = self.rewards.expected_value(profile.luck);
        let gather = self
            .gather
            .as_ref()
            .map(|g| g.expected_value(profile.explorer))
            .unwrap_or(0.0);
        let hunt = |strategy| {
            self.hunts
                .iter()
                .map(|h| h.expected_value(strategy, profile.capture, profile.carving))
                .sum::<f64>()
        };
        (
            quest + gather + hunt(Strategy::Kill),
            quest + gather + hunt(Strategy::Cap),
            hunt(Strategy::Shiny),
        )
    }
}

/// A policy profile: a rank cap plus a skill profile, with the best option found
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankAndSkills {
    pub rank: Rank,
    pub profile: SkillProfile,
    pub best: Option<ItemStrategy>,
}

impl RankAndSkills {
    pub fn new(rank: Rank, profile: SkillProfile) -> HuntResult<Self> {
        if profile.explorer && rank == Rank::Low {
            return Err(HuntError::PolicyConflict(
                "explorer is not available in low rank".to_string(),
            ));
        }
        Ok(RankAndSkills {
            rank,
            profile,
            best: None,
        })
    }

    /// Ranks at or below the policy rank are permitted
    pub fn permits(&self, rank: Rank) -> bool {
        rank <= self.rank
    }

    /// Keep `candidate` when it beats the current best; ties keep the earlier option
    pub fn consider(&mut self, candidate: ItemStrategy) {
        let better = match &self.best {
            None => true,
            Some(best) => candidate.ev > best.ev,
        };
        if better {
            self.best = Some(candidate);
        }
    }

    pub fn consider_hunt(&mut self, hunt: &HuntItemEV) {
        if !self.permits(hunt.rank) {
            return;
        }
        let p = &self.profile;
        let candidate = ItemStrategy::from_totals(
            StrategySource::Hunt {
                monster: hunt.monster.name.clone(),
                rank: hunt.rank,
            },
            hunt.expected_value(Strategy::Kill, p.capture, p.carving),
            hunt.expected_value(Strategy::Cap, p.capture, p.carving),
            hunt.expected_value(Strategy::Shiny, p.capture, p.carving),
        );
        self.consider(candidate);
    }

    pub fn consider_gather(&mut self, gather: &GatherLocation) {
        if !self.permits(gather.rank) {
            return;
        }
        self.consider(ItemStrategy {
            source: StrategySource::Gather {
                location: gather.location.name.clone(),
                rank: gather.rank,
            },
            kind: StrategyKind::Gather,
            ev: gather.expected_value(self.profile.explorer),
        });
    }

    pub fn consider_quest(&mut self, quest: &QuestOption) {
        if !self.permits(quest.rank()) {
            return;
        }
        let (kill, cap, shiny) = quest.totals(&self.profile);
        let source = StrategySource::Quest {
            quest: quest.rewards.quest.one_line(),
        };
        self.consider(ItemStrategy::from_totals(source, kill, cap, shiny));
    }

    pub fn best_ev(&self) -> f64 {
        self.best.as_ref().map(|b| b.ev).unwrap_or(0.0)
    }
}
