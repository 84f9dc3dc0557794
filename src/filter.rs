use crate::combination::{total_cost, Combination};
use crate::model::entity::{Cost, Player};

pub fn contains_all(combination: &[&Player], required: &[Player]) -> bool {
    required.iter().all(|r| combination.iter().any(|p| *p == r))
}

/// Keeps only combinations holding every required player.
///
/// An empty requirement list keeps everything; unsatisfiable requirements
/// leave nothing.
pub fn require<'a>(
    mut combinations: Vec<Combination<'a>>,
    required: &[Player],
) -> Vec<Combination<'a>> {
    if !required.is_empty() {
        combinations.retain(|c| contains_all(c, required));
    }
    combinations
}

/// Keeps only combinations whose total cost is at most `ceiling`.
pub fn within_budget(
    mut combinations: Vec<Combination<'_>>,
    ceiling: Cost,
) -> Vec<Combination<'_>> {
    combinations.retain(|c| total_cost(c) <= ceiling);
    combinations
}
