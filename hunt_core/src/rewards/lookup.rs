//! Item lookup by user-entered name

use crate::config::MatchingConstants;
use crate::error::{HuntError, HuntResult};
use crate::fuzzy;
use crate::model::Item;
use crate::repo::Repository;

/// Terms shorter than this match too many items to be useful
const MIN_TERM_LEN: usize = 2;

/// The named item, or a `LookupMiss` listing close names followed by
/// items containing any word of the name
pub fn find_item(repo: &dyn Repository, name: &str, matching: &MatchingConstants) -> HuntResult<Item> {
    if let Some(item) = repo.get_item_by_name(name)? {
        return Ok(item);
    }

    let items = repo.get_items()?;
    let mut suggestions: Vec<String> = fuzzy::close_matches(
        name,
        items.iter().map(|i| i.name.as_str()),
        matching.max_suggestions,
        matching.name_cutoff,
    )
    .into_iter()
    .map(str::to_string)
    .collect();

    for term in name.split_whitespace().filter(|t| t.chars().count() >= MIN_TERM_LEN) {
        for item in repo.search_item_name(term, &[])? {
            if !suggestions.contains(&item.name) {
                suggestions.push(item.name);
            }
        }
    }
    tracing::debug!("item '{}' not found, {} suggestions", name, suggestions.len());
    Err(HuntError::lookup_miss("item", name, suggestions))
}
