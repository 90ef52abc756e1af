//! Reward conditions, parsed once at ingestion

use crate::error::HuntError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Where a body carve happens on monsters with more than one carve spot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CarveSite {
    Body,
    FourCarves,
    Back,
    Head,
    Mouth,
    Upper,
    Lower,
}

impl CarveSite {
    const TABLE: &'static [(&'static str, CarveSite)] = &[
        ("Body Carve", CarveSite::Body),
        ("Body Carve (4 Carves)", CarveSite::FourCarves),
        ("Body Carve (Back)", CarveSite::Back),
        ("Body Carve (Head)", CarveSite::Head),
        ("Body Carve (Mouth)", CarveSite::Mouth),
        ("Body Carve (Upper)", CarveSite::Upper),
        ("Body Carve (Lower)", CarveSite::Lower),
    ];

    fn label(self) -> &'static str {
        CarveSite::TABLE
            .iter()
            .find(|(_, site)| *site == self)
            .map(|(label, _)| *label)
            .unwrap_or("Body Carve")
    }
}

/// The action that produces a hunting reward
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum RewardCondition {
    BodyCarve(CarveSite),
    TailCarve,
    /// Carve while the monster plays dead (gypceros)
    ApparentDeath,
    /// Carve after a knock-out (kelbi); keeps the full label
    KoCarve(String),
    Capture,
    VirusReward,
    /// Shiny drop; keeps the label suffix
    Shiny(String),
    /// Break of the named part
    Break(String),
    BugCatchingBack,
    MiningBack,
    MiningOre,
    MiningScale,
}

/// Which skill scales the number of rewards a condition yields
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountSkill {
    Fixed,
    Carving,
    Capture,
}

/// Strategies a reward is obtainable under
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConditionRules {
    pub kill: bool,
    pub capture: bool,
    pub shiny: bool,
    pub count_skill: CountSkill,
    /// Draws before skill bonuses
    pub base_count: f64,
}

impl RewardCondition {
    pub fn parse(condition: &str) -> Result<Self, HuntError> {
        let condition = condition.trim();
        if let Some((_, site)) = CarveSite::TABLE.iter().find(|(label, _)| *label == condition) {
            return Ok(RewardCondition::BodyCarve(*site));
        }
        match condition {
            "Body Carve (Apparent Death)" => return Ok(RewardCondition::ApparentDeath),
            "Tail Carve" => return Ok(RewardCondition::TailCarve),
            "Capture" => return Ok(RewardCondition::Capture),
            "Virus Reward" => return Ok(RewardCondition::VirusReward),
            "Bug-Catching Back" => return Ok(RewardCondition::BugCatchingBack),
            "Mining Back" => return Ok(RewardCondition::MiningBack),
            "Mining Ore" => return Ok(RewardCondition::MiningOre),
            "Mining Scale" => return Ok(RewardCondition::MiningScale),
            _ => {}
        }
        if condition.starts_with("Body Carve (KO") {
            return Ok(RewardCondition::KoCarve(condition.to_string()));
        }
        if let Some(rest) = condition.strip_prefix("Shiny") {
            return Ok(RewardCondition::Shiny(rest.trim().to_string()));
        }
        if let Some(part) = condition.strip_prefix("Break ") {
            let part = part.trim();
            if !part.is_empty() {
                return Ok(RewardCondition::Break(part.to_string()));
            }
        }
        Err(HuntError::UnknownCondition(condition.to_string()))
    }

    pub fn rules(&self) -> ConditionRules {
        let fixed = |kill, capture| ConditionRules {
            kill,
            capture,
            shiny: false,
            count_skill: CountSkill::Fixed,
            base_count: 1.0,
        };
        match self {
            RewardCondition::BodyCarve(_) => ConditionRules {
                kill: true,
                capture: false,
                shiny: false,
                count_skill: CountSkill::Carving,
                base_count: 3.0,
            },
            RewardCondition::TailCarve | RewardCondition::KoCarve(_) => ConditionRules {
                kill: true,
                capture: true,
                shiny: false,
                count_skill: CountSkill::Carving,
                base_count: 1.0,
            },
            RewardCondition::Capture => ConditionRules {
                kill: false,
                capture: true,
                shiny: false,
                count_skill: CountSkill::Capture,
                base_count: 0.0,
            },
            RewardCondition::Shiny(_) => ConditionRules {
                kill: false,
                capture: false,
                shiny: true,
                count_skill: CountSkill::Fixed,
                base_count: 1.0,
            },
            RewardCondition::ApparentDeath
            | RewardCondition::VirusReward
            | RewardCondition::Break(_)
            | RewardCondition::BugCatchingBack
            | RewardCondition::MiningBack
            | RewardCondition::MiningOre
            | RewardCondition::MiningScale => fixed(true, true),
        }
    }

    /// Part name for break-type conditions; tail carves imply a tail break
    pub fn break_part(&self) -> Option<&str> {
        match self {
            RewardCondition::Break(part) => Some(part),
            RewardCondition::TailCarve => Some("Tail"),
            _ => None,
        }
    }
}

impl fmt::Display for RewardCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RewardCondition::BodyCarve(site) => f.write_str(site.label()),
            RewardCondition::TailCarve => f.write_str("Tail Carve"),
            RewardCondition::ApparentDeath => f.write_str("Body Carve (Apparent Death)"),
            RewardCondition::KoCarve(label) => f.write_str(label),
            RewardCondition::Capture => f.write_str("Capture"),
            RewardCondition::VirusReward => f.write_str("Virus Reward"),
            RewardCondition::Shiny(rest) if rest.is_empty() => f.write_str("Shiny"),
            RewardCondition::Shiny(rest) => write!(f, "Shiny {}", rest),
            RewardCondition::Break(part) => write!(f, "Break {}", part),
            RewardCondition::BugCatchingBack => f.write_str("Bug-Catching Back"),
            RewardCondition::MiningBack => f.write_str("Mining Back"),
            RewardCondition::MiningOre => f.write_str("Mining Ore"),
            RewardCondition::MiningScale => f.write_str("Mining Scale"),
        }
    }
}

impl FromStr for RewardCondition {
    type Err = HuntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RewardCondition::parse(s)
    }
}

impl TryFrom<String> for RewardCondition {
    type Error = HuntError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        RewardCondition::parse(&value)
    }
}

impl From<RewardCondition> for String {
    fn from(condition: RewardCondition) -> Self {
        condition.to_string()
    }
}
