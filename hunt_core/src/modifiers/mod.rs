//! Sharpness tables, skill ladders and their numeric effects

mod sharpness;
mod skills;

pub use sharpness::{SharpnessDescriptor, SharpnessTable, WeaponSharpness, BUCKETS};
pub use skills::{
    affinity_multiplier, apply_element_up, blunt_power_bonus, ModifierTables, SkillConfig,
    ATTACK_UP,
};
