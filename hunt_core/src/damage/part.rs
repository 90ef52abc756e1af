//! Per-part damage across monster states

use indexmap::IndexMap;
use serde::Serialize;
use std::fmt;

/// Monster state a hitzone row applies to
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub enum PartState {
    Default,
    /// `Break Part`, or `Without Hide`
    Broken,
    Enraged,
    Other(String),
}

impl PartState {
    pub fn parse(state: Option<&str>) -> Self {
        match state {
            None => PartState::Default,
            Some("Break Part") | Some("Without Hide") => PartState::Broken,
            Some("Enraged") => PartState::Enraged,
            Some(other) => PartState::Other(other.to_string()),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            PartState::Default => "Default",
            PartState::Broken => "Break Part",
            PartState::Enraged => "Enraged",
            PartState::Other(label) => label,
        }
    }
}

impl fmt::Display for PartState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Damage of one hit on a part in one state
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PartDamageState {
    pub raw: f64,
    pub element: f64,
    /// Hitzone the weapon's damage type sees
    pub hitzone: f64,
    /// Hitzone of the weapon's (first) element; 0 for statuses
    pub element_hitzone: f64,
}

impl PartDamageState {
    pub fn total(&self) -> f64 {
        self.raw + self.element
    }
}

/// How averages weight broken and enraged states
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StateWeights {
    pub break_weight: f64,
    pub rage_weight: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PartDamage {
    pub name: String,
    pub default: PartDamageState,
    /// Non-default states in row order
    pub states: IndexMap<PartState, PartDamageState>,
    /// Listed as a break reward
    pub listed_break: bool,
}

impl PartDamage {
    pub fn state(&self, state: &PartState) -> Option<&PartDamageState> {
        match state {
            PartState::Default => Some(&self.default),
            other => self.states.get(other),
        }
    }

    pub fn raw(&self) -> f64 {
        self.default.raw
    }

    pub fn element(&self) -> f64 {
        self.default.element
    }

    pub fn hitzone(&self) -> f64 {
        self.default.hitzone
    }

    pub fn element_hitzone(&self) -> f64 {
        self.default.element_hitzone
    }

    pub fn total(&self) -> f64 {
        self.default.total()
    }

    pub fn total_break(&self) -> f64 {
        self.states
            .get(&PartState::Broken)
            .map(PartDamageState::total)
            .unwrap_or_else(|| self.total())
    }

    pub fn total_rage(&self) -> f64 {
        self.states
            .get(&PartState::Enraged)
            .map(PartDamageState::total)
            .unwrap_or_else(|| self.total())
    }

    pub fn break_diff(&self) -> f64 {
        self.total_break() - self.total()
    }

    pub fn rage_diff(&self) -> f64 {
        self.total_rage() - self.total()
    }

    /// Listed as a break, or takes more damage once broken
    pub fn is_breakable(&self) -> bool {
        self.listed_break || self.break_diff() > 0.0
    }

    pub fn average_break(&self, break_weight: f64) -> f64 {
        self.total_break() * break_weight + self.total() * (1.0 - break_weight)
    }

    pub fn average_rage(&self, rage_weight: f64) -> f64 {
        self.total_rage() * rage_weight + self.total() * (1.0 - rage_weight)
    }

    pub fn average(&self, weights: StateWeights) -> f64 {
        let has_break = self.states.contains_key(&PartState::Broken);
        let has_rage = self.states.contains_key(&PartState::Enraged);
        match (has_break, has_rage) {
            (true, true) => {
                (self.average_break(weights.break_weight) + self.average_rage(weights.rage_weight)) / 2.0
            }
            (true, false) => self.average_break(weights.break_weight),
            (false, true) => self.average_rage(weights.rage_weight),
            (false, false) => self.total(),
        }
    }
}
