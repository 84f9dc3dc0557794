//! Heuristic reduction of a position pool.
//!
//! Within a price bracket only the best scorers are worth buying, since the
//! squad never needs more of one position than the retention limit. This
//! ignores the team cap: a higher scorer may turn out ineligible while a
//! culled cheaper alternative would not have been, so pruning can lose the
//! true optimum.

use std::cmp::Reverse;
use std::collections::BTreeMap;

use crate::model::entity::{Cost, Player, Score};

/// Keeps at most `retain` top scorers at each exact cost.
///
/// Ties keep input order. The result is grouped by cost, most expensive first.
pub fn cull_price_brackets(pool: Vec<Player>, retain: usize) -> Vec<Player> {
    let mut brackets: BTreeMap<Cost, Vec<Player>> = BTreeMap::new();
    for player in pool {
        brackets.entry(player.cost).or_default().push(player);
    }
    brackets
        .into_values()
        .rev()
        .flat_map(|mut bracket| {
            bracket.sort_by_key(|p| Reverse(p.score));
            bracket.truncate(retain);
            bracket
        })
        .collect()
}

/// Drops every player scoring below `min_score`, preserving order.
pub fn cull_score_below(pool: Vec<Player>, min_score: Score) -> Vec<Player> {
    pool.into_iter().filter(|p| p.score >= min_score).collect()
}

/// Bracket cull followed by the optional score floor.
pub fn prune(pool: Vec<Player>, retain: usize, min_score: Option<Score>) -> Vec<Player> {
    let culled = cull_price_brackets(pool, retain);
    match min_score {
        Some(floor) => cull_score_below(culled, floor),
        None => culled,
    }
}
