//! `hunt prob` - odds of one quest reward line

use anyhow::Result;
use clap::Parser;
use hunt_core::RewardLine;

#[derive(Parser, Debug)]
pub struct ProbCommand {
    /// Chance of the item on each draw, in percent
    pub percent: f64,

    /// Fixed rewards in the line
    #[arg(default_value_t = 1)]
    pub fixed: u32,

    /// Draws the line always gives, fixed rewards included
    #[arg(default_value_t = 3)]
    pub guaranteed: u32,

    /// Chance of each extra draw, in percent
    #[arg(default_value_t = 69.0)]
    pub extend: f64,
}

impl ProbCommand {
    pub fn line(&self) -> Result<RewardLine> {
        Ok(RewardLine::new(self.percent, self.fixed, self.guaranteed, self.extend)?)
    }

    pub fn execute(self) -> Result<()> {
        println!("{}", self.line()?);
        Ok(())
    }
}
