//! hunt_core - Damage and reward engines for hunting game companion tools
//!
//! This library provides:
//! - DamageEngine: Per-part weapon damage against a monster's hitzones
//! - RewardEngine: Expected item yields from hunts, quests and gathering
//! - Repository: Read-only access to the game database
//! - Weapon upgrade costs and armor skill inputs

pub mod armor;
pub mod config;
pub mod damage;
pub mod error;
pub mod fuzzy;
pub mod model;
pub mod modifiers;
pub mod prelude;
pub mod repo;
pub mod rewards;
pub mod types;
pub mod upgrade;

// Re-export core types for convenience
pub use config::{default_constants, EngineConstants, HuntConfig, MotionValueDb};
pub use damage::{DamageEngine, DamageSummary, WeaponFilter, WeaponMonsterDamage};
pub use error::{ErrorCategory, HuntError, HuntResult, Warning};
pub use modifiers::SkillConfig;
pub use repo::{MemoryRepository, Repository};
pub use rewards::{find_item, render, ItemRewards, RewardEngine, RewardLine};
pub use types::{GameVariant, Rank, WeaponClass};
pub use upgrade::{weapon_costs, WeaponCosts};
