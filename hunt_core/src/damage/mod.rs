//! Damage system - weapon state, per-part damage and summaries

mod breaks;
mod engine;
mod formula;
mod part;
mod phial;
mod selection;
mod table;
mod weapon;

pub use breaks::break_find;
pub use engine::{DamageEngine, DamageSummary, WeaponMonsterDamage};
pub use formula::{effective_hitzone, element_damage, raw_damage};
pub use part::{PartDamage, PartDamageState, PartState, StateWeights};
pub use phial::{motions as phial_motions, phial_damage, PhialDamage, PhialType, BURST_LEVELS};
pub use selection::{common_class, WeaponFilter};
pub use table::{change_listing, comparison_table, part_code, percent_change, weapon_line};
pub use weapon::{ElementAttack, WeaponState};
