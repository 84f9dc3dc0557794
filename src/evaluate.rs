use std::collections::HashMap;
use std::ops::Add;

use thiserror::Error;

use crate::combination::Combination;
use crate::model::entity::{Cost, Player, Team};
use crate::model::squad::Squad;

pub const DEFAULT_TEAM_CAP: usize = 3;

/// Squad-wide limits every candidate must satisfy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rules {
    /// Inclusive ceiling on the squad's total cost.
    pub budget: Cost,
    /// Most members allowed from one real-world team.
    pub team_cap: usize,
}

impl Default for Rules {
    fn default() -> Self {
        Rules { budget: Cost::from_tenths(1000), team_cap: DEFAULT_TEAM_CAP }
    }
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum Rejection {
    #[error("cost {cost} exceeds budget {budget}")]
    OverBudget { cost: Cost, budget: Cost },
    #[error("{count} players from {team}, at most {cap} allowed")]
    TeamCap { team: Team, count: usize, cap: usize },
}

/// Members per real-world team.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TeamTally(HashMap<Team, usize>);

impl TeamTally {
    pub fn count(&self, team: &Team) -> usize {
        self.0.get(team).copied().unwrap_or(0)
    }

    /// The team furthest over `cap`, if any. Ties go to the smaller code.
    pub fn worst_violation(&self, cap: usize) -> Option<(Team, usize)> {
        self.0
            .iter()
            .filter(|(_, count)| **count > cap)
            .map(|(team, count)| (*team, *count))
            .max_by(|a, b| a.1.cmp(&b.1).then(b.0.cmp(&a.0)))
    }
}

impl<'a> FromIterator<&'a Player> for TeamTally {
    fn from_iter<I: IntoIterator<Item = &'a Player>>(iter: I) -> Self {
        let mut counter = HashMap::new();
        for player in iter {
            *counter.entry(player.team).or_insert(0) += 1;
        }
        TeamTally(counter)
    }
}

impl Add for TeamTally {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        let mut counter = self.0;
        for (team, count) in rhs.0 {
            *counter.entry(team).or_insert(0) += count;
        }
        TeamTally(counter)
    }
}

/// Checks a complete squad against `rules`.
///
/// The whole squad is tallied before the cap is tested, so a single team
/// over the cap always rejects it.
pub fn check<'a>(squad: Squad<'a>, rules: &Rules) -> Result<Squad<'a>, Rejection> {
    if squad.cost() > rules.budget {
        return Err(Rejection::OverBudget { cost: squad.cost(), budget: rules.budget });
    }
    let tally: TeamTally = squad.members().iter().copied().collect();
    if let Some((team, count)) = tally.worst_violation(rules.team_cap) {
        return Err(Rejection::TeamCap { team, count, cap: rules.team_cap });
    }
    Ok(squad)
}

/// Builds a squad from `candidate` and returns it if it satisfies `rules`.
pub fn evaluate<'a>(candidate: Vec<&'a Player>, rules: &Rules) -> Option<Squad<'a>> {
    check(Squad::new(candidate), rules).ok()
}

/// Best qualifying squad of one batch, plus how many candidates it scored.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchResult<'a> {
    pub best: Option<Squad<'a>>,
    pub evaluated: usize,
}

/// Evaluates `fixed` joined with each of `options` and keeps the best.
///
/// Only a strictly higher score displaces the current best, so the earliest
/// of equally scoring squads wins.
pub fn best_of_batch<'a>(
    fixed: &[&'a Player],
    options: &[Combination<'a>],
    rules: &Rules,
) -> BatchResult<'a> {
    let mut best: Option<Squad<'a>> = None;
    for option in options {
        let squad: Squad<'a> = fixed.iter().chain(option.iter()).copied().collect();
        if best.as_ref().is_some_and(|b| squad.score() <= b.score()) {
            continue;
        }
        if let Ok(squad) = check(squad, rules) {
            best = Some(squad);
        }
    }
    BatchResult { best, evaluated: options.len() }
}
