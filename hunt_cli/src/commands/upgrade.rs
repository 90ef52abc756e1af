//! `hunt upgrade` - crafting paths for a weapon

use super::report_miss;
use crate::context::GlobalArgs;
use anyhow::Result;
use clap::Parser;
use hunt_core::{weapon_costs, WeaponFilter};

#[derive(Parser, Debug)]
pub struct UpgradeCommand {
    /// Weapon name, words may be given unquoted
    #[arg(required = true, num_args = 1..)]
    pub name: Vec<String>,

    /// Only the path with the lowest zenny cost
    #[arg(long)]
    pub cheapest: bool,
}

impl UpgradeCommand {
    pub fn execute(self, global: &GlobalArgs) -> Result<()> {
        let ctx = global.load()?;
        let matching = &ctx.config.constants.matching;
        let filter = WeaponFilter::by_names([self.name.join(" ")]);
        let Some(weapons) = report_miss(filter.select(&ctx.repo, matching.name_cutoff, matching.max_suggestions))?
        else {
            return Ok(());
        };
        for weapon in &weapons {
            let mut costs = weapon_costs(&ctx.repo, weapon)?;
            if self.cheapest {
                costs.costs = costs.cheapest().cloned().into_iter().collect();
            }
            if costs.costs.is_empty() {
                println!("No known way to make {}", costs.weapon);
            }
            print!("{}", costs.render());
        }
        Ok(())
    }
}
