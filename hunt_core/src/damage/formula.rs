//! Per-hit damage formulas

use crate::model::MonsterDamageRow;
use crate::types::DamageType;

/// Physical damage of one hit, floored once
pub fn raw_damage(
    true_raw: f64,
    sharpness_raw: f64,
    affinity_multiplier: f64,
    motion: f64,
    hitzone: f64,
) -> f64 {
    (true_raw * sharpness_raw * affinity_multiplier * motion / 100.0 * hitzone / 100.0).floor()
}

/// Element damage of one hit, floored once. Independent of the motion value.
pub fn element_damage(element: f64, sharpness_element: f64, element_hitzone: f64) -> f64 {
    (element * sharpness_element * element_hitzone / 100.0).floor()
}

/// Hitzone a damage type sees on a row
pub fn effective_hitzone(damage_type: DamageType, row: &MonsterDamageRow, lance_impact_factor: f64) -> f64 {
    match damage_type {
        DamageType::Cut => row.cut as f64,
        DamageType::Impact => row.impact as f64,
        DamageType::Mixed => (row.cut as f64).max(lance_impact_factor * row.impact as f64),
        DamageType::Shot => row.shot as f64,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::MonsterId;

    fn row(cut: i32, impact: i32, shot: i32) -> MonsterDamageRow {
        MonsterDamageRow {
            monster_id: MonsterId(1),
            body_part: "Head".to_string(),
            cut,
            impact,
            shot,
            ko: 0,
            fire: 0,
            water: 0,
            ice: 0,
            thunder: 0,
            dragon: 0,
        }
    }

    #[test]
    fn test_raw_damage_floors_once() {
        // 190 * 1.25 * 0.48 * 0.45 = 51.3
        assert_eq!(raw_damage(190.0, 1.25, 1.0, 48.0, 45.0), 51.0);
        assert_eq!(raw_damage(190.0, 1.25, 1.0, 48.0, 0.0), 0.0);
    }

    #[test]
    fn test_element_damage() {
        assert_eq!(element_damage(30.0, 1.0625, 30.0), 9.0);
        assert_eq!(element_damage(30.0, 1.0625, 0.0), 0.0);
    }

    #[test]
    fn test_lance_uses_best_of_cut_and_impact() {
        let r = row(30, 50, 20);
        assert!((effective_hitzone(DamageType::Mixed, &r, 0.72) - 36.0).abs() < 1e-9);
        assert!((effective_hitzone(DamageType::Mixed, &row(45, 50, 0), 0.72) - 45.0).abs() < 1e-9);
        assert_eq!(effective_hitzone(DamageType::Impact, &r, 0.72), 50.0);
        assert_eq!(effective_hitzone(DamageType::Shot, &r, 0.72), 20.0);
    }
}
