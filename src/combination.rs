use std::slice::Iter;

use itertools::{Combinations, Itertools};

use crate::model::entity::{Cost, Player, Points};

/// An unordered selection of distinct players from one position pool.
pub type Combination<'a> = Vec<&'a Player>;

/// Lazily yields every `k`-subset of `items` in lexicographic index order.
///
/// Calling it again with the same slice restarts the same sequence. `k == 0`
/// yields a single empty subset, `k > items.len()` yields nothing.
pub fn combinations<T>(items: &[T], k: usize) -> Combinations<Iter<'_, T>> {
    items.iter().combinations(k)
}

/// Materialises all `k`-subsets of a pool for repeated read-only use.
pub fn generate(pool: &[Player], k: usize) -> Vec<Combination<'_>> {
    combinations(pool, k).collect()
}

/// C(n, k), or `None` when it does not fit in a `u128`.
pub fn binomial(n: usize, k: usize) -> Option<u128> {
    if k > n {
        return Some(0);
    }
    let k = k.min(n - k);
    (0..k).try_fold(1u128, |acc, i| {
        acc.checked_mul((n - i) as u128).map(|v| v / (i as u128 + 1))
    })
}

pub fn total_cost(combination: &[&Player]) -> Cost {
    combination.iter().map(|p| p.cost).sum()
}

pub fn total_score(combination: &[&Player]) -> Points {
    combination.iter().map(|p| Points::from(p.score)).sum()
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn yields_every_subset_once() {
        let items = [1, 2, 3, 4];
        let subsets: Vec<Vec<i32>> = combinations(&items, 2)
            .map(|c| c.into_iter().copied().collect())
            .collect();
        assert_eq!(
            subsets,
            vec![vec![1, 2], vec![1, 3], vec![1, 4], vec![2, 3], vec![2, 4], vec![3, 4]]
        );
    }

    #[test]
    fn zero_size_yields_one_empty_subset() {
        let items = [1, 2, 3];
        let subsets: Vec<_> = combinations(&items, 0).collect();
        assert_eq!(subsets.len(), 1);
        assert!(subsets[0].is_empty());
    }

    #[test]
    fn oversize_yields_nothing() {
        let items = [1, 2, 3];
        assert_eq!(combinations(&items, 4).count(), 0);
    }

    #[test]
    fn restarts_identically() {
        let items = ["a", "b", "c", "d", "e"];
        let first: Vec<_> = combinations(&items, 3).collect();
        let second: Vec<_> = combinations(&items, 3).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn binomial_matches_known_values() {
        assert_eq!(binomial(6, 5), Some(6));
        assert_eq!(binomial(10, 0), Some(1));
        assert_eq!(binomial(52, 5), Some(2_598_960));
        assert_eq!(binomial(3, 4), Some(0));
    }

    #[test]
    fn totals_sum_members() {
        let pool = vec![
            Player::new("A", "ARS".parse().unwrap(), Cost::from_tenths(55), 10),
            Player::new("B", "CHE".parse().unwrap(), Cost::from_tenths(45), 20),
        ];
        let all = generate(&pool, 2);
        assert_eq!(all.len(), 1);
        assert_eq!(total_cost(&all[0]), Cost::from_tenths(100));
        assert_eq!(total_score(&all[0]), 30);
    }
}
