//! Reward EV engine: every way to obtain an item, and the best per profile

use super::gather::GatherLocation;
use super::hunt::HuntItemEV;
use super::lookup::find_item;
use super::quest::QuestItemEV;
use super::strategy::{QuestOption, RankAndSkills, SkillProfile};
use crate::config::EngineConstants;
use crate::error::{HuntError, HuntResult, Warning};
use crate::model::{Item, Quest};
use crate::repo::Repository;
use crate::types::{ItemId, Rank};
use serde::Serialize;
use tracing::debug;

/// The item actually rewarded when the requested one comes from a wyporium trade
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TradeRedirect {
    pub requested: Item,
    pub unlock_quest: Option<Quest>,
}

/// Every acquisition path of one item plus the recommendations
///
/// An unknown name yields no item, no options and the close names in
/// `suggestions`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItemRewards {
    /// Name as asked for
    pub query: String,
    pub item: Option<Item>,
    pub suggestions: Vec<String>,
    pub trade: Option<TradeRedirect>,
    pub hunts: Vec<HuntItemEV>,
    pub quests: Vec<QuestOption>,
    pub gathers: Vec<GatherLocation>,
    /// One entry per (rank policy, skill profile), ranks ascending
    pub recommendations: Vec<RankAndSkills>,
}

impl ItemRewards {
    /// Result for a name that matched no item
    pub fn not_found(query: &str, suggestions: Vec<String>) -> HuntResult<Self> {
        Ok(ItemRewards {
            query: query.to_string(),
            item: None,
            suggestions,
            trade: None,
            hunts: Vec::new(),
            quests: Vec::new(),
            gathers: Vec::new(),
            recommendations: recommend(&[], &[], &[])?,
        })
    }

    pub fn is_found(&self) -> bool {
        self.item.is_some()
    }

    /// Rewarded item name, or the query when nothing matched
    pub fn name(&self) -> &str {
        self.item.as_ref().map_or(self.query.as_str(), |i| i.name.as_str())
    }

    /// Warnings from every quest and hunt, in report order
    pub fn warnings(&self) -> Vec<&Warning> {
        self.hunts
            .iter()
            .flat_map(|h| h.warnings.iter())
            .chain(self.quests.iter().flat_map(|q| {
                q.rewards
                    .warnings
                    .iter()
                    .chain(q.hunts.iter().flat_map(|h| h.warnings.iter()))
            }))
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.hunts.is_empty() && self.quests.is_empty() && self.gathers.is_empty()
    }
}

/// Per-query reward engine over a read-only repository
pub struct RewardEngine<'a> {
    repo: &'a dyn Repository,
    constants: &'a EngineConstants,
}

impl<'a> RewardEngine<'a> {
    pub fn new(repo: &'a dyn Repository, constants: &'a EngineConstants) -> Self {
        RewardEngine { repo, constants }
    }

    /// Look up `name` and build its rewards
    ///
    /// An unknown name is not an error: the result is empty and lists
    /// suggestions.
    pub fn item_rewards(&self, name: &str) -> HuntResult<ItemRewards> {
        match find_item(self.repo, name, &self.constants.matching) {
            Ok(item) => self.rewards_for(item),
            Err(HuntError::LookupMiss { suggestions, .. }) => ItemRewards::not_found(name, suggestions),
            Err(err) => Err(err),
        }
    }

    /// Build the rewards for `item`, following a wyporium trade if it is the trade input
    pub fn rewards_for(&self, item: Item) -> HuntResult<ItemRewards> {
        let query = item.name.clone();
        let (item, trade) = self.redirect(item)?;
        debug!("computing rewards for '{}' ({})", item.name, item.id);

        let hunts = self.hunt_options(item.id)?;
        let quests = self.quest_options(item.id)?;
        let gathers = self.gather_options(item.id)?;
        let recommendations = recommend(&hunts, &quests, &gathers)?;

        Ok(ItemRewards {
            query,
            item: Some(item),
            suggestions: Vec::new(),
            trade,
            hunts,
            quests,
            gathers,
            recommendations,
        })
    }

    fn redirect(&self, item: Item) -> HuntResult<(Item, Option<TradeRedirect>)> {
        let Some(trade) = self.repo.get_wyporium_trade(item.id)? else {
            return Ok((item, None));
        };
        let Some(output) = self.repo.get_item(trade.item_out_id)? else {
            debug!("wyporium output {} missing, keeping '{}'", trade.item_out_id, item.name);
            return Ok((item, None));
        };
        let unlock_quest = match trade.unlock_quest_id {
            Some(id) => self.repo.get_quest(id)?,
            None => None,
        };
        debug!("'{}' is traded for '{}' at the wyporium", item.name, output.name);
        Ok((
            output,
            Some(TradeRedirect {
                requested: item,
                unlock_quest,
            }),
        ))
    }

    /// One entry per (monster, rank) whose reward table lists the item
    pub fn hunt_options(&self, item_id: ItemId) -> HuntResult<Vec<HuntItemEV>> {
        let mut hunts = Vec::new();
        for pair in self.repo.get_item_monsters(item_id)? {
            let Some(monster) = self.repo.get_monster(pair.monster_id)? else {
                continue;
            };
            let rows = self.repo.get_monster_rewards(pair.monster_id, Some(pair.rank))?;
            let hunt = HuntItemEV::new(item_id, &monster, pair.rank, &rows);
            if !hunt.is_empty() {
                hunts.push(hunt);
            }
        }
        Ok(hunts)
    }

    /// One entry per quest listing the item
    ///
    /// Unstable monsters are skipped when the quest has more than one monster.
    pub fn quest_options(&self, item_id: ItemId) -> HuntResult<Vec<QuestOption>> {
        let gathering = self.repo.get_item_gathering(item_id)?;
        let locations = self.repo.get_locations()?;
        let mut options = Vec::new();
        for quest in self.repo.get_item_quest_objects(item_id)? {
            let rows = self.repo.get_quest_rewards(quest.id)?;
            let rewards = QuestItemEV::new(item_id, &quest, &rows)?;

            let monsters = self.repo.get_quest_monsters(quest.id)?;
            let multi = monsters.len() > 1;
            let mut hunts = Vec::new();
            for qm in monsters.iter().filter(|m| !(multi && m.unstable)) {
                let Some(monster) = self.repo.get_monster(qm.monster_id)? else {
                    continue;
                };
                let hunt_rows = self.repo.get_monster_rewards(qm.monster_id, Some(quest.rank))?;
                let hunt = HuntItemEV::new(item_id, &monster, quest.rank, &hunt_rows);
                if !hunt.is_empty() {
                    hunts.push(hunt);
                }
            }

            let local: Vec<_> = gathering
                .iter()
                .filter(|g| g.location_id == quest.location_id && g.rank == quest.rank)
                .cloned()
                .collect();
            let gather = GatherLocation::group(&local, &locations, &self.constants.rewards)
                .into_iter()
                .next();

            options.push(QuestOption { rewards, hunts, gather });
        }
        Ok(options)
    }

    /// One entry per (location, rank) where the item can be gathered
    pub fn gather_options(&self, item_id: ItemId) -> HuntResult<Vec<GatherLocation>> {
        let rows = self.repo.get_item_gathering(item_id)?;
        let locations = self.repo.get_locations()?;
        Ok(GatherLocation::group(&rows, &locations, &self.constants.rewards))
    }
}

/// Best option per (rank policy, skill profile)
///
/// Options are considered hunts first, then gathers, then quests; ties keep
/// the earliest.
pub fn recommend(
    hunts: &[HuntItemEV],
    quests: &[QuestOption],
    gathers: &[GatherLocation],
) -> HuntResult<Vec<RankAndSkills>> {
    let mut policies = Vec::new();
    for &rank in Rank::all() {
        for profile in SkillProfile::for_rank(rank) {
            let mut policy = RankAndSkills::new(rank, profile)?;
            for hunt in hunts {
                policy.consider_hunt(hunt);
            }
            for gather in gathers {
                policy.consider_gather(gather);
            }
            for quest in quests {
                policy.consider_quest(quest);
            }
            policies.push(policy);
        }
    }
    Ok(policies)
}
