//! Expected yield of an item from gathering sites

use crate::config::RewardConstants;
use crate::model::{GatheringRow, Location};
use crate::types::{LocationId, Rank};
use indexmap::IndexMap;
use serde::Serialize;

/// One gathering row of the target item
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GatherReward {
    pub area: String,
    pub site: String,
    pub stack_size: u32,
    pub percentage: u32,
    /// Only reachable with the explorer skill
    pub secret: bool,
}

impl GatherReward {
    /// Stack size is ignored; a site is assumed to be gathered `gathers_per_site` times
    pub fn expected_value(&self, gathers_per_site: f64) -> f64 {
        gathers_per_site * self.percentage as f64
    }
}

/// Every gathering row of the item at one location and rank
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GatherLocation {
    pub location: Location,
    pub rank: Rank,
    pub rewards: Vec<GatherReward>,
    pub gathers_per_site: f64,
}

impl GatherLocation {
    /// Group rows by (location, rank) in first-seen order.
    /// Rows at unknown locations are dropped.
    pub fn group(rows: &[GatheringRow], locations: &[Location], constants: &RewardConstants) -> Vec<GatherLocation> {
        let mut groups: IndexMap<(LocationId, Rank), GatherLocation> = IndexMap::new();
        for row in rows {
            let Some(location) = locations.iter().find(|l| l.id == row.location_id) else {
                tracing::debug!("gathering row at unknown location {}", row.location_id);
                continue;
            };
            let group = groups
                .entry((row.location_id, row.rank))
                .or_insert_with(|| GatherLocation {
                    location: location.clone(),
                    rank: row.rank,
                    rewards: Vec::new(),
                    gathers_per_site: constants.gathers_per_site,
                });
            group.rewards.push(GatherReward {
                area: row.area.clone(),
                site: row.site.clone(),
                stack_size: row.stack_size,
                percentage: row.percentage,
                secret: row.area.eq_ignore_ascii_case(&constants.secret_area),
            });
        }
        groups.into_values().collect()
    }

    pub fn expected_value(&self, explorer: bool) -> f64 {
        self.rewards
            .iter()
            .filter(|r| explorer || !r.secret)
            .map(|r| r.expected_value(self.gathers_per_site))
            .sum()
    }
}
