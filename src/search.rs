use log::{debug, info};
use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuildError, ThreadPoolBuilder};
use thiserror::Error;

use crate::combination::Combination;
use crate::evaluate::{best_of_batch, BatchResult, Rules};
use crate::model::entity::Player;
use crate::model::squad::Squad;

#[derive(Debug, Error)]
pub enum SearchError {
    #[error("failed to build worker pool: {0}")]
    WorkerPool(#[from] ThreadPoolBuildError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Execution {
    Sequential,
    /// One batch per midfielder combination, spread over `workers` threads.
    Parallel { workers: usize },
}

/// Filtered combinations for every position, ready to enumerate.
#[derive(Debug, Clone, Default)]
pub struct SearchSpace<'a> {
    pub keepers: Vec<Combination<'a>>,
    pub defenders: Vec<Combination<'a>>,
    pub midfielders: Vec<Combination<'a>>,
    pub forwards: Vec<Combination<'a>>,
}

impl<'a> SearchSpace<'a> {
    pub fn rounds(&self) -> usize {
        self.keepers.len() * self.forwards.len()
    }

    /// Number of complete squads the search will score.
    pub fn candidates(&self) -> u128 {
        [&self.keepers, &self.forwards, &self.midfielders, &self.defenders]
            .iter()
            .map(|c| c.len() as u128)
            .product()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SearchOutcome<'a> {
    pub best: Option<Squad<'a>>,
    pub rounds: usize,
    pub evaluated: u64,
}

struct State<'a> {
    best: Option<Squad<'a>>,
    evaluated: u64,
}

impl<'a> State<'a> {
    fn offer(&mut self, result: BatchResult<'a>) {
        self.evaluated += result.evaluated as u64;
        let Some(squad) = result.best else { return };
        if self.best.as_ref().is_some_and(|best| squad.score() <= best.score()) {
            return;
        }
        info!("New best squad. Cost {}, points {}", squad.cost(), squad.score());
        debug!("{}", squad);
        self.best = Some(squad);
    }
}

enum Dispatcher {
    Sequential,
    Pool(ThreadPool),
}

impl Dispatcher {
    fn new(execution: Execution) -> Result<Dispatcher, SearchError> {
        match execution {
            Execution::Sequential => Ok(Dispatcher::Sequential),
            Execution::Parallel { workers } => {
                let pool = ThreadPoolBuilder::new().num_threads(workers).build()?;
                Ok(Dispatcher::Pool(pool))
            }
        }
    }

    /// Results come back in midfielder order whatever the execution mode.
    fn round<'a>(
        &self,
        fixed: &[&'a Player],
        midfielders: &[Combination<'a>],
        defenders: &[Combination<'a>],
        rules: &Rules,
    ) -> Vec<BatchResult<'a>> {
        let batch = |midfield: &Combination<'a>| {
            let mut members = fixed.to_vec();
            members.extend(midfield.iter().copied());
            best_of_batch(&members, defenders, rules)
        };
        match self {
            Dispatcher::Sequential => midfielders.iter().map(batch).collect(),
            Dispatcher::Pool(pool) => pool.install(|| midfielders.par_iter().map(batch).collect()),
        }
    }
}

/// Enumerates keeper, forward, midfielder and defender combinations in that
/// nesting order and returns the highest scoring squad that passes `rules`.
///
/// Equal scores resolve to the squad met first in that order, for both
/// execution modes.
pub fn search<'a>(
    space: &SearchSpace<'a>,
    rules: &Rules,
    execution: Execution,
) -> Result<SearchOutcome<'a>, SearchError> {
    let dispatcher = Dispatcher::new(execution)?;
    let total = space.rounds();
    let mut state = State { best: None, evaluated: 0 };
    let mut round = 0;

    for keepers in &space.keepers {
        for forwards in &space.forwards {
            round += 1;
            info!("Round {}/{}", round, total);
            let fixed: Vec<&'a Player> = forwards.iter().chain(keepers.iter()).copied().collect();
            let results = dispatcher.round(&fixed, &space.midfielders, &space.defenders, rules);
            for result in results {
                state.offer(result);
            }
        }
    }

    Ok(SearchOutcome { best: state.best, rounds: round, evaluated: state.evaluated })
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::combination::generate;
    use crate::model::entity::Cost;

    fn player(name: &str, team: &str, tenths: u32, score: u32) -> Player {
        Player::new(name, team.parse().unwrap(), Cost::from_tenths(tenths), score)
    }

    fn rules(budget: u32) -> Rules {
        Rules { budget: Cost::from_tenths(budget), ..Rules::default() }
    }

    #[test]
    fn picks_best_affordable_squad() {
        let keepers = vec![player("k", "SOU", 40, 10)];
        let defenders = vec![player("d1", "ARS", 50, 30), player("d2", "CHE", 20, 20)];
        let midfielders = vec![player("m1", "LIV", 90, 90), player("m2", "MUN", 30, 40)];
        let forwards = vec![player("f1", "EVE", 40, 50)];
        let space = SearchSpace {
            keepers: generate(&keepers, 1),
            defenders: generate(&defenders, 1),
            midfielders: generate(&midfielders, 1),
            forwards: generate(&forwards, 1),
        };
        let outcome = search(&space, &rules(160), Execution::Sequential).unwrap();
        let best = outcome.best.unwrap();
        assert_eq!(best.score(), 10 + 50 + 40 + 30);
        assert_eq!(best.cost(), Cost::from_tenths(160));
        assert_eq!(outcome.rounds, 1);
        assert_eq!(outcome.evaluated, 4);
    }

    #[test]
    fn empty_position_yields_no_squad() {
        let forwards = vec![player("f1", "EVE", 40, 50)];
        let space = SearchSpace {
            keepers: vec![Vec::new()],
            defenders: Vec::new(),
            midfielders: vec![Vec::new()],
            forwards: generate(&forwards, 1),
        };
        let outcome = search(&space, &rules(1000), Execution::Sequential).unwrap();
        assert_eq!(outcome.best, None);
        assert_eq!(outcome.evaluated, 0);
        assert_eq!(space.candidates(), 0);
    }

    #[test]
    fn later_equal_score_does_not_replace() {
        let a = player("a", "ARS", 10, 5);
        let b = player("b", "CHE", 10, 5);
        let mut state = State { best: None, evaluated: 0 };
        state.offer(BatchResult { best: Some(Squad::new(vec![&a])), evaluated: 3 });
        state.offer(BatchResult { best: Some(Squad::new(vec![&b])), evaluated: 2 });
        state.offer(BatchResult { best: None, evaluated: 1 });
        assert!(state.best.unwrap().contains(&a));
        assert_eq!(state.evaluated, 6);
    }

    #[test]
    fn zero_score_squad_still_counts() {
        let k = player("k", "SOU", 10, 0);
        let space = SearchSpace {
            keepers: vec![vec![&k]],
            defenders: vec![Vec::new()],
            midfielders: vec![Vec::new()],
            forwards: vec![Vec::new()],
        };
        let outcome = search(&space, &rules(10), Execution::Parallel { workers: 2 }).unwrap();
        assert_eq!(outcome.best.map(|s| s.len()), Some(1));
    }
}
