//! Text rendering of damage comparisons

use super::engine::WeaponMonsterDamage;
use super::part::PartDamage;
use std::fmt::Write;

/// Four-character column code for a part name
pub fn part_code(part: &str) -> String {
    let code: String = part.chars().filter(|c| c.is_alphanumeric()).take(4).collect();
    format!("{:<4}", code)
}

/// Relative change from `a` to `b` in percent; `b` itself when `a` is 0
pub fn percent_change(a: f64, b: f64) -> f64 {
    if a == 0.0 {
        b
    } else {
        100.0 * (b - a) / a
    }
}

/// One line describing a weapon's derived state
pub fn weapon_line(damage: &WeaponMonsterDamage) -> String {
    let w = &damage.weapon;
    let mut line = format!("{:<20}: {:4.0} {:2}%", w.name, w.true_raw, w.affinity);
    for element in &w.elements {
        let _ = write!(line, " ({:4.0} {})", element.attack, element.element);
    }
    if let Some(color) = w.sharpness {
        let _ = write!(line, " {}", color);
    }
    line
}

/// Bordered table: monster name heads the first column, one column per
/// part code, one row per weapon holding the part averages.
pub fn comparison_table(damages: &[WeaponMonsterDamage]) -> String {
    let Some(first) = damages.first() else {
        return String::new();
    };
    let parts: Vec<&str> = first.part_names().collect();

    let mut header = vec![first.monster.clone()];
    header.extend(parts.iter().map(|p| part_code(p)));
    let mut rows = vec![header];
    for damage in damages {
        let mut row = vec![damage.weapon.name.clone()];
        for part in &parts {
            let cell = damage
                .get(part)
                .map(|p| format!("{:.0}", damage.part_average(p)))
                .unwrap_or_else(|| "-".to_string());
            row.push(cell);
        }
        rows.push(row);
    }

    let widths: Vec<usize> = (0..rows[0].len())
        .map(|col| rows.iter().map(|r| r[col].chars().count()).max().unwrap_or(0))
        .collect();
    let border = {
        let mut line = String::from("+");
        for w in &widths {
            line.push_str(&"-".repeat(w + 2));
            line.push('+');
        }
        line
    };

    let mut out = String::new();
    let _ = writeln!(out, "{}", border);
    for (i, row) in rows.iter().enumerate() {
        out.push('|');
        for (col, cell) in row.iter().enumerate() {
            if col == 0 {
                let _ = write!(out, " {:<width$} |", cell, width = widths[col]);
            } else {
                let _ = write!(out, " {:>width$} |", cell, width = widths[col]);
            }
        }
        out.push('\n');
        if i == 0 {
            let _ = writeln!(out, "{}", border);
        }
    }
    let _ = writeln!(out, "{}", border);
    out
}

fn diff_list(values: impl Iterator<Item = f64>) -> String {
    values.map(|v| format!("{:+.1}%", v)).collect::<Vec<_>>().join(",")
}

/// Per-part and summary listing of `base` with percent changes for `others`
///
/// Breakable parts are starred. Parts missing from another weapon's
/// result count as zero damage.
pub fn change_listing(base: &WeaponMonsterDamage, others: &[WeaponMonsterDamage]) -> String {
    let mut out = String::new();
    for (name, part) in &base.parts {
        let other = |f: fn(&PartDamage) -> f64| {
            others
                .iter()
                .map(move |o| o.get(name).map(f).unwrap_or(0.0))
                .collect::<Vec<_>>()
        };
        let totals = diff_list(other(PartDamage::total).into_iter().map(|b| percent_change(part.total(), b)));
        let elements =
            diff_list(other(PartDamage::element).into_iter().map(|b| percent_change(part.element(), b)));
        let breaks = diff_list(
            other(PartDamage::break_diff)
                .into_iter()
                .map(|b| percent_change(part.break_diff(), b)),
        );
        let _ = writeln!(
            out,
            "{:>22}{} h{:02} {:.2} ({}) h{:02} {:.2} ({}) {:+.2} ({})",
            name,
            if part.is_breakable() { "*" } else { " " },
            part.hitzone() as i64,
            part.total(),
            totals,
            part.element_hitzone() as i64,
            part.element(),
            elements,
            part.break_diff(),
            breaks,
        );
    }
    let _ = writeln!(out, "            --------------------");
    let other_summaries: Vec<_> = others.iter().map(|o| o.summary.entries()).collect();
    for (i, (label, value)) in base.summary.entries().iter().enumerate() {
        let diffs = diff_list(other_summaries.iter().map(|entries| percent_change(*value, entries[i].1)));
        let _ = writeln!(out, "{:>22} {:.2} ({})", label, value, diffs);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineConstants;
    use crate::damage::DamageEngine;
    use crate::model::{Monster, MonsterDamageRow, Weapon};
    use crate::modifiers::SkillConfig;
    use crate::types::{GameVariant, MonsterClass, MonsterId};

    fn damage(name: &str, attack: f64) -> WeaponMonsterDamage {
        let weapon: Weapon = serde_json::from_value(serde_json::json!({
            "id": 1, "name": name, "wtype": "Great Sword", "attack": attack,
            "sharpness": [5, 5, 10, 5, 5, 0, 0]
        }))
        .unwrap();
        let monster = Monster {
            id: MonsterId(1),
            name: "Rathian".to_string(),
            class: MonsterClass::Boss,
        };
        let rows: Vec<MonsterDamageRow> = ["Head", "Neck/Tail"]
            .iter()
            .map(|part| MonsterDamageRow {
                monster_id: MonsterId(1),
                body_part: part.to_string(),
                cut: 50,
                impact: 50,
                shot: 50,
                ko: 0,
                fire: 0,
                water: 0,
                ice: 0,
                thunder: 0,
                dragon: 0,
            })
            .collect();
        DamageEngine::new(GameVariant::Classic, &EngineConstants::default())
            .compute(&weapon, &monster, &rows, &["Head".to_string()], 50.0, &SkillConfig::default())
            .unwrap()
    }

    #[test]
    fn test_part_code() {
        assert_eq!(part_code("Head"), "Head");
        assert_eq!(part_code("Neck/Tail"), "Neck");
        assert_eq!(part_code("Leg"), "Leg ");
    }

    #[test]
    fn test_percent_change() {
        assert!((percent_change(50.0, 60.0) - 20.0).abs() < 1e-9);
        assert!((percent_change(0.0, 7.0) - 7.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_comparison_table_is_bordered() {
        let table = comparison_table(&[damage("Bone Blade", 480.0), damage("Flame Blade", 960.0)]);
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 6);
        assert!(lines[0].starts_with("+-") && lines[0].ends_with('+'));
        assert!(lines[1].starts_with("| Rathian"));
        assert!(lines[1].contains("Head") && lines[1].contains("Neck"));
        assert!(lines[3].starts_with("| Bone Blade"));
        assert!(lines.iter().all(|l| l.chars().count() == lines[0].chars().count()));
    }

    #[test]
    fn test_change_listing() {
        let listing = change_listing(&damage("Bone Blade", 480.0), &[damage("Flame Blade", 960.0)]);
        let head = listing.lines().next().unwrap();
        assert!(head.trim_start().starts_with("Head*"));
        assert!(head.contains("h50"));
        assert!(listing.contains("--------------------"));
        assert!(listing.lines().any(|l| l.trim_start().starts_with("break_only")));
    }
}
