//! Prelude module for convenient imports
//!
//! ```rust
//! use hunt_core::prelude::*;
//! ```

// Core types
pub use crate::types::{DamageType, Element, GameVariant, Rank, SharpnessColor, WeaponClass};
pub use crate::error::{HuntError, HuntResult, Warning};

// Damage system
pub use crate::damage::{DamageEngine, PartDamage, WeaponMonsterDamage};
pub use crate::modifiers::SkillConfig;

// Reward system
pub use crate::rewards::{CaptureSkill, CarvingSkill, LuckSkill, RewardEngine, SkillProfile};

// Data
pub use crate::model::{Item, Monster, Quest, Weapon};
pub use crate::repo::{MemoryRepository, Repository};

// Config
pub use crate::config::{default_constants, EngineConstants};
