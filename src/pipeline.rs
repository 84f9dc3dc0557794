use log::{info, warn};

use crate::catalog::Pools;
use crate::combination::{binomial, generate, Combination};
use crate::config::Config;
use crate::filter::{require, within_budget};
use crate::model::position::Position;
use crate::prune::{cull_price_brackets, cull_score_below};
use crate::search::{search, Execution, SearchError, SearchOutcome, SearchSpace};

/// Above this many subsets for one position the run is likely to be slow.
const LARGE_POSITION: u128 = 10_000_000;

fn total(pools: &Pools) -> usize {
    Position::ALL.iter().map(|p| pools.get(*p).len()).sum()
}

/// Keeps each position's top scorers per price.
pub fn cull_pools(pools: Pools, config: &Config) -> Pools {
    info!("Culling low scorers at the same price");
    let original = total(&pools);
    let culled = pools.map(|position, pool| {
        let before = pool.len();
        let kept = cull_price_brackets(pool, config.position(position).retention());
        info!("Stripped {} {}s", before - kept.len(), position);
        kept
    });
    info!("Retained {} total players of original {}", total(&culled), original);
    culled
}

/// Drops players under each position's score floor.
pub fn floor_pools(pools: Pools, config: &Config) -> Pools {
    info!("Culling scorers below threshold");
    let floored = pools.map(|position, pool| match config.position(position).min_score {
        Some(floor) => cull_score_below(pool, floor),
        None => pool,
    });
    info!("Retained {} total players", total(&floored));
    floored
}

/// Applies each position's price-bracket retention, then its score floor.
pub fn prune_pools(pools: Pools, config: &Config) -> Pools {
    floor_pools(cull_pools(pools, config), config)
}

/// Generates and filters one position's combinations.
///
/// A seeded position contributes its seeded players as the only candidate.
pub fn position_combinations<'a>(
    pools: &'a Pools,
    config: &'a Config,
    position: Position,
) -> Vec<Combination<'a>> {
    let cfg = config.position(position);
    let generated: Vec<Combination<'a>> = match &cfg.seeded {
        Some(seeded) => vec![seeded.iter().collect()],
        None => {
            let pool = pools.get(position);
            match binomial(pool.len(), cfg.count) {
                Some(n) if n <= LARGE_POSITION => {}
                _ => warn!(
                    "{} {} players from {} is a very large enumeration",
                    position,
                    cfg.count,
                    pool.len()
                ),
            }
            generate(pool, cfg.count)
        }
    };
    let generated_count = generated.len();
    let required = require(generated, &cfg.required);
    let required_count = required.len();
    let priced = match cfg.max_cost {
        Some(ceiling) => within_budget(required, ceiling),
        None => required,
    };
    info!(
        "{} combinations: {} generated, {} with required players, {} within price",
        position,
        generated_count,
        required_count,
        priced.len()
    );
    priced
}

pub fn build_space<'a>(pools: &'a Pools, config: &'a Config) -> SearchSpace<'a> {
    SearchSpace {
        keepers: position_combinations(pools, config, Position::Goalkeeper),
        defenders: position_combinations(pools, config, Position::Defender),
        midfielders: position_combinations(pools, config, Position::Midfielder),
        forwards: position_combinations(pools, config, Position::Forward),
    }
}

/// Searches already pruned pools under `config`.
pub fn select<'a>(
    pools: &'a Pools,
    config: &'a Config,
    execution: Execution,
) -> Result<SearchOutcome<'a>, SearchError> {
    let space = build_space(pools, config);
    info!(
        "Picking from {} keeper, {} defender, {} midfielder and {} forward choices ({} squads)",
        space.keepers.len(),
        space.defenders.len(),
        space.midfielders.len(),
        space.forwards.len(),
        space.candidates()
    );
    search(&space, &config.rules(), execution)
}
