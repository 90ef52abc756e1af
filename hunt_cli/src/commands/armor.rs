//! `hunt armor` - armor pieces and decorations for skill trees

use super::report_miss;
use crate::context::{Context, GlobalArgs};
use anyhow::Result;
use clap::Parser;
use hunt_core::armor::{active_skills, resolve_trees, search_armor, ArmorSearch};
use hunt_core::model::{Decoration, Skill};
use hunt_core::types::{HunterType, SkillTreeId};
use hunt_core::Repository;
use std::collections::BTreeMap;
use std::fmt::Write;

#[derive(Parser, Debug)]
pub struct ArmorCommand {
    /// Skill tree names; quote names with spaces
    #[arg(required = true)]
    pub trees: Vec<String>,

    /// blade, gunner or both
    #[arg(long, default_value = "both")]
    pub hunter_type: HunterType,

    /// Pieces listed per slot
    #[arg(short = 'n', long, default_value_t = 5)]
    pub limit: usize,
}

impl ArmorCommand {
    pub fn execute(self, global: &GlobalArgs) -> Result<()> {
        let ctx = global.load()?;
        if let Some(text) = self.run(&ctx)? {
            print!("{}", text);
        }
        Ok(())
    }

    fn run(&self, ctx: &Context) -> Result<Option<String>> {
        let matching = &ctx.config.constants.matching;
        let Some(trees) = report_miss(resolve_trees(&ctx.repo, &self.trees, matching.name_cutoff, matching.max_suggestions))?
        else {
            return Ok(None);
        };
        let ids: Vec<SkillTreeId> = trees.iter().map(|t| t.id).collect();
        let decorations = ctx.repo.get_decorations_by_skills(&ids)?;
        let skills = ctx.repo.get_skills()?;
        let search = search_armor(&ctx.repo, trees, self.hunter_type)?;
        Ok(Some(render(&search, &decorations, &skills, self.limit)))
    }
}

fn render(search: &ArmorSearch, decorations: &[Decoration], skills: &[Skill], limit: usize) -> String {
    let tree_name = |id: SkillTreeId| {
        search
            .trees
            .iter()
            .find(|t| t.id == id)
            .map(|t| t.name.as_str())
            .unwrap_or("?")
    };
    let mut out = String::new();

    for (id, values) in &search.decorations {
        let best: Vec<String> = values
            .ids
            .iter()
            .zip(values.values)
            .enumerate()
            .filter_map(|(i, (deco, points))| {
                let name = decorations.iter().find(|d| Some(d.id) == *deco)?.name.as_str();
                Some(format!("{} slot {} +{}", i + 1, name, points))
            })
            .collect();
        if best.is_empty() {
            let _ = writeln!(out, "{}: no decorations", tree_name(*id));
        } else {
            let _ = writeln!(out, "{}: {}", tree_name(*id), best.join(", "));
        }
    }

    // top piece of every slot, summed per tree
    let mut best_totals: BTreeMap<SkillTreeId, i32> = BTreeMap::new();
    for (slot, candidates) in &search.by_slot {
        let _ = writeln!(out, "= {}", slot);
        for c in candidates.iter().take(limit) {
            let points: Vec<String> = c
                .points
                .iter()
                .map(|(id, p)| format!("{} {:+}", tree_name(*id), p))
                .collect();
            let _ = writeln!(
                out,
                "  {:<24} {:>3}  slots {}  def {}-{}  ({})",
                c.armor.name,
                c.total,
                c.armor.num_slots,
                c.armor.defense,
                c.armor.max_defense,
                points.join(", ")
            );
        }
        if let Some(top) = candidates.first() {
            for (id, p) in &top.points {
                *best_totals.entry(*id).or_insert(0) += p;
            }
        }
    }

    for (id, total) in &best_totals {
        let active: Vec<&str> = active_skills(skills, *id, *total).iter().map(|s| s.name.as_str()).collect();
        let _ = writeln!(
            out,
            "Best pieces: {} {} -> {}",
            tree_name(*id),
            total,
            if active.is_empty() { "nothing".to_string() } else { active.join(", ") }
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use hunt_core::{HuntConfig, MemoryRepository, MotionValueDb};
    use std::path::Path;

    fn context() -> Context {
        let data = Path::new(env!("CARGO_MANIFEST_DIR")).join("../hunt_core/tests/fixtures/mini_db.json");
        Context {
            config: HuntConfig::default(),
            repo: MemoryRepository::load(&data).unwrap(),
            motions: MotionValueDb::default(),
        }
    }

    #[test]
    fn test_blade_search_listing() {
        let cmd = ArmorCommand::try_parse_from(["armor", "attack", "--hunter-type", "blade"]).unwrap();
        let text = cmd.run(&context()).unwrap().unwrap();
        assert!(text.contains("Attack: 1 slot Attack Jewel +1, 2 slot Attack Jewel+ +3"));
        assert!(text.contains("= Head\n  Rathalos Helm"));
        assert!(text.contains("Best pieces: Attack 12 -> Attack Up (S)"));
    }

    #[test]
    fn test_unknown_tree_is_a_miss() {
        let cmd = ArmorCommand::try_parse_from(["armor", "Atack"]).unwrap();
        assert!(cmd.run(&context()).unwrap().is_none());
    }
}
