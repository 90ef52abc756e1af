//! Engine error types and soft warnings

use crate::config::ConfigError;
use crate::repo::RepoError;
use crate::types::ItemId;
use serde::Serialize;
use std::fmt;
use thiserror::Error;

pub type HuntResult<T> = Result<T, HuntError>;

/// Errors raised by the damage and reward engines
#[derive(Error, Debug)]
pub enum HuntError {
    #[error("unknown weapon type '{0}'")]
    UnknownWeaponType(String),
    #[error("bad sharpness value '{0}'")]
    BadSharpness(String),
    #[error("unknown element '{0}'")]
    UnknownElement(String),
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("unknown reward condition '{0}'")]
    UnknownCondition(String),
    #[error("negative renormalisation total {total} in quest '{quest}' slot {slot}")]
    NegativeRenormalisation {
        quest: String,
        slot: String,
        total: i64,
    },
    #[error("cyclic upgrade tree at weapon {0}")]
    CyclicUpgradeTree(ItemId),
    #[error("policy conflict: {0}")]
    PolicyConflict(String),
    #[error("{kind} '{name}' not found")]
    LookupMiss {
        kind: &'static str,
        name: String,
        suggestions: Vec<String>,
    },
    #[error(transparent)]
    Repository(#[from] RepoError),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Error kinds callers branch on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Unknown name; non-fatal, carries suggestions
    LookupMiss,
    /// Bad data in the source database
    MalformedSource,
    /// Query asked for something the rules forbid; fatal for the query
    PolicyConflict,
    /// Propagated from the data layer unchanged
    Repository,
}

impl HuntError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            HuntError::LookupMiss { .. } => ErrorCategory::LookupMiss,
            HuntError::UnknownWeaponType(_)
            | HuntError::BadSharpness(_)
            | HuntError::UnknownElement(_)
            | HuntError::UnknownCondition(_)
            | HuntError::NegativeRenormalisation { .. }
            | HuntError::CyclicUpgradeTree(_) => ErrorCategory::MalformedSource,
            HuntError::InvalidConfig(_) | HuntError::PolicyConflict(_) => {
                ErrorCategory::PolicyConflict
            }
            HuntError::Repository(_) | HuntError::Config(_) => ErrorCategory::Repository,
        }
    }

    pub fn lookup_miss(kind: &'static str, name: &str, suggestions: Vec<String>) -> Self {
        HuntError::LookupMiss {
            kind,
            name: name.to_string(),
            suggestions,
        }
    }
}

/// A non-fatal data problem noticed during computation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Warning {
    ZeroPercentage { context: String, item_id: ItemId },
    Renormalised { context: String, slot: String, total: i64 },
    FixedExceedsDraws { context: String, slot: String },
    BadCost { weapon: String, value: String },
    UnknownPart { part: String },
}

impl Warning {
    /// Emit through the log and hand the warning back for collection
    pub fn emit(self) -> Self {
        tracing::warn!("{}", self);
        self
    }
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Warning::ZeroPercentage { context, item_id } => {
                write!(f, "{}: reward for item {} has percentage 0", context, item_id)
            }
            Warning::Renormalised { context, slot, total } => {
                write!(f, "{}: bad total p for {} = {}, renormalising to 100", context, slot, total)
            }
            Warning::FixedExceedsDraws { context, slot } => {
                write!(f, "{}: fixed rewards in {} exceed expected draws", context, slot)
            }
            Warning::BadCost { weapon, value } => {
                write!(f, "bad cost for '{}': '{}'", weapon, value)
            }
            Warning::UnknownPart { part } => write!(f, "no such part '{}'", part),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_categories() {
        assert_eq!(
            HuntError::BadSharpness("x".into()).category(),
            ErrorCategory::MalformedSource
        );
        assert_eq!(
            HuntError::PolicyConflict("explorer in LR".into()).category(),
            ErrorCategory::PolicyConflict
        );
        assert_eq!(
            HuntError::lookup_miss("item", "Rathalos Rubi", vec!["Rathalos Ruby".into()]).category(),
            ErrorCategory::LookupMiss
        );
    }

    #[test]
    fn test_warning_display() {
        let w = Warning::Renormalised {
            context: "Quest X".into(),
            slot: "A".into(),
            total: 90,
        };
        assert_eq!(w.to_string(), "Quest X: bad total p for A = 90, renormalising to 100");
    }
}
