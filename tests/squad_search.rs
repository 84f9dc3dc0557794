use std::collections::HashSet;

use squad_search::catalog::{parse_record, Pools};
use squad_search::config::{Config, PositionConfig};
use squad_search::model::entity::{Cost, Player, Team};
use squad_search::model::position::PerPosition;
use squad_search::pipeline::select;
use squad_search::search::Execution;

fn players(records: &[&str]) -> Vec<Player> {
    records.iter().map(|r| parse_record(r).unwrap()).collect()
}

fn pools() -> Pools {
    PerPosition::new(
        Vec::new(),
        players(&[
            "D1 ARS 8.5 150",
            "D2 CHE 7.5 140",
            "D3 LIV 7.0 120",
            "D4 MCI 6.5 110",
            "D5 ARS 6.0 95",
            "D6 TOT 4.5 70",
        ]),
        players(&[
            "M1 ARS 7.0 220",
            "M2 MCI 6.5 200",
            "M3 CHE 5.5 170",
            "M4 LIV 5.0 150",
            "M5 EVE 4.5 100",
            "M6 ARS 4.5 90",
        ]),
        players(&[
            "F1 ARS 11.5 210",
            "F2 MUN 10.0 190",
            "F3 CHE 9.0 170",
            "F4 LIV 7.5 120",
        ]),
    )
}

fn config() -> Config {
    Config {
        budget: Cost::from_tenths(1000),
        team_cap: 3,
        workers: 4,
        goalkeepers: PositionConfig {
            seeded: Some(players(&["Mignolet LIV 5.5 123", "Boruc SOU 4.5 63"])),
            ..PositionConfig::new(2)
        },
        defenders: PositionConfig {
            max_cost: Some(Cost::from_tenths(350)),
            ..PositionConfig::new(5)
        },
        midfielders: PositionConfig::new(5),
        forwards: PositionConfig {
            max_cost: Some(Cost::from_tenths(300)),
            ..PositionConfig::new(3)
        },
    }
}

fn names(squad: &squad_search::model::squad::Squad<'_>) -> HashSet<String> {
    squad.members().iter().map(|p| p.name.clone()).collect()
}

fn expected(list: &[&str]) -> HashSet<String> {
    list.iter().map(|s| s.to_string()).collect()
}

#[test]
fn finds_best_squad_under_every_constraint() {
    let pools = pools();
    let config = config();
    let outcome = select(&pools, &config, Execution::Sequential).unwrap();
    let best = outcome.best.unwrap();
    assert_eq!(best.score(), 2071);
    assert_eq!(best.cost(), Cost::from_tenths(980));
    assert_eq!(best.len(), 15);
    assert_eq!(
        names(&best),
        expected(&[
            "F2", "F3", "F4", "Mignolet", "Boruc", "M1", "M2", "M3", "M4", "M5", "D1", "D2", "D4",
            "D5", "D6",
        ])
    );
}

#[test]
fn team_cap_excludes_higher_scoring_squad() {
    let pools = pools();
    let mut config = config();
    config.team_cap = 15;
    let best = select(&pools, &config, Execution::Sequential).unwrap().best.unwrap();
    // Four ARS players and exactly on budget.
    assert_eq!(best.score(), 2101);
    assert_eq!(best.cost(), Cost::from_tenths(1000));
    assert!(names(&best).contains("F1"));
}

#[test]
fn tighter_budget_changes_the_pick() {
    let pools = pools();
    let mut config = config();
    config.budget = Cost::from_tenths(979);
    let best = select(&pools, &config, Execution::Sequential).unwrap().best.unwrap();
    assert_eq!(best.score(), 1981);
    assert_eq!(best.cost(), Cost::from_tenths(960));
}

#[test]
fn parallel_matches_sequential() {
    let pools = pools();
    let config = config();
    let sequential = select(&pools, &config, Execution::Sequential).unwrap();
    for workers in [1, 2, 4] {
        let parallel = select(&pools, &config, Execution::Parallel { workers }).unwrap();
        assert_eq!(parallel, sequential);
    }
    assert_eq!(sequential.rounds, 3);
}

#[test]
fn unaffordable_pools_yield_none() {
    let pools = pools();
    let mut config = config();
    config.goalkeepers.seeded = Some(players(&["Dear LIV 30.0 123", "Dearer SOU 30.0 63"]));
    let outcome = select(&pools, &config, Execution::Parallel { workers: 2 }).unwrap();
    assert!(outcome.best.is_none());
    assert!(outcome.evaluated > 0);
}

#[test]
fn single_club_pools_yield_none() {
    let one_club = |squad: Vec<Player>| -> Vec<Player> {
        let team: Team = "ARS".parse().unwrap();
        squad.into_iter().map(|p| Player { team, ..p }).collect()
    };
    let source = pools();
    let pools = PerPosition::new(
        Vec::new(),
        one_club(source.defenders),
        one_club(source.midfielders),
        one_club(source.forwards),
    );
    let mut config = config();
    let keepers = players(&["Mignolet LIV 5.5 123", "Boruc SOU 4.5 63"]);
    config.goalkeepers.seeded = Some(one_club(keepers));
    let outcome = select(&pools, &config, Execution::Sequential).unwrap();
    assert!(outcome.best.is_none());
}

#[test]
fn unsatisfiable_requirement_yields_none() {
    let pools = pools();
    let mut config = config();
    config.forwards.required = players(&["Van Persie MUN 14.0 262"]);
    let outcome = select(&pools, &config, Execution::Sequential).unwrap();
    assert!(outcome.best.is_none());
    assert_eq!(outcome.rounds, 0);
}

#[test]
fn required_player_is_always_included() {
    let pools = pools();
    let mut config = config();
    config.midfielders.required = players(&["M6 ARS 4.5 90"]);
    let best = select(&pools, &config, Execution::Parallel { workers: 3 }).unwrap().best.unwrap();
    assert!(names(&best).contains("M6"));
    assert!(best.score() < 2071);
}

#[test]
fn equal_scores_resolve_to_first_enumerated() {
    let pools: Pools = PerPosition::new(
        Vec::new(),
        players(&["DA ARS 5.0 50", "DB CHE 5.0 50"]),
        players(&["MA LIV 5.0 60", "MB MUN 5.0 60"]),
        players(&["FA TOT 5.0 70", "FB EVE 5.0 70"]),
    );
    let config = Config {
        budget: Cost::from_tenths(1000),
        team_cap: 3,
        workers: 2,
        goalkeepers: PositionConfig {
            seeded: Some(players(&["K SOU 4.0 10"])),
            ..PositionConfig::new(1)
        },
        defenders: PositionConfig::new(1),
        midfielders: PositionConfig::new(1),
        forwards: PositionConfig::new(1),
    };
    let first = expected(&["K", "FA", "MA", "DA"]);
    for _ in 0..5 {
        for execution in [Execution::Sequential, Execution::Parallel { workers: 2 }] {
            let best = select(&pools, &config, execution).unwrap().best.unwrap();
            assert_eq!(best.score(), 190);
            assert_eq!(names(&best), first);
        }
    }
}
