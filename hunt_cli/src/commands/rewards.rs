//! `hunt rewards` - where to farm an item

use crate::context::GlobalArgs;
use anyhow::Result;
use clap::Parser;
use hunt_core::{render, RewardEngine};

#[derive(Parser, Debug)]
pub struct RewardsCommand {
    /// Item name, words may be given unquoted
    #[arg(required = true, num_args = 1..)]
    pub name: Vec<String>,
}

impl RewardsCommand {
    pub fn item_name(&self) -> String {
        self.name.join(" ")
    }

    pub fn execute(self, global: &GlobalArgs) -> Result<()> {
        let ctx = global.load()?;
        let engine = RewardEngine::new(&ctx.repo, &ctx.config.constants);
        let rewards = engine.item_rewards(&self.item_name())?;
        print!("{}", render(&rewards));
        Ok(())
    }
}
