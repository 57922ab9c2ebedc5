//! Ranking and windowing.
//!
//! [`rank_by`] assigns standard competition ranks (`RANK()`): items with
//! equal scores share a rank, and the next distinct score is ranked one past
//! the number of items ahead of it. Scores `[9, 7, 7, 4]` descending rank as
//! `[1, 2, 2, 4]`.
//!
//! How a ranked list is cut down is a separate decision, expressed by
//! [`Cutoff`]. The two policies are not interchangeable:
//!
//! - [`Cutoff::RowLimit`] behaves like `LIMIT n` and may split a tie group.
//! - [`Cutoff::RankOne`] keeps every row ranked first, however many there are.

use std::cmp::Ordering;

use serde::Serialize;

/// Which end of the scale ranks first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Rank 1 is the smallest score.
    Ascending,
    /// Rank 1 is the largest score.
    Descending,
}

impl Direction {
    fn compare<K: Ord>(self, a: &K, b: &K) -> Ordering {
        match self {
            Self::Ascending => a.cmp(b),
            Self::Descending => b.cmp(a),
        }
    }
}

/// An item paired with its competition rank (1-based).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Ranked<T> {
    pub rank: usize,
    pub item: T,
}

/// Sort `items` by `score` in `direction` and assign competition ranks.
///
/// The sort is stable: items with equal scores keep their input order.
pub fn rank_by<T, K, F>(
    items: impl IntoIterator<Item = T>,
    direction: Direction,
    mut score: F,
) -> Vec<Ranked<T>>
where
    K: Ord,
    F: FnMut(&T) -> K,
{
    let mut keyed: Vec<(K, T)> = items.into_iter().map(|item| (score(&item), item)).collect();
    keyed.sort_by(|(a, _), (b, _)| direction.compare(a, b));

    let mut ranked = Vec::with_capacity(keyed.len());
    let mut previous: Option<K> = None;
    let mut rank = 0;
    for (position, (key, item)) in keyed.into_iter().enumerate() {
        if previous.as_ref() != Some(&key) {
            rank = position + 1;
        }
        previous = Some(key);
        ranked.push(Ranked { rank, item });
    }
    ranked
}

/// How many ranked rows a report keeps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cutoff {
    /// The first `n` rows, ties at the boundary notwithstanding.
    RowLimit(usize),
    /// Every row with rank 1.
    RankOne,
}

impl Cutoff {
    #[must_use]
    pub fn apply<T>(self, ranked: Vec<Ranked<T>>) -> Vec<Ranked<T>> {
        match self {
            Self::RowLimit(n) => ranked.into_iter().take(n).collect(),
            Self::RankOne => ranked.into_iter().take_while(|r| r.rank == 1).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ranks<T>(ranked: &[Ranked<T>]) -> Vec<usize> {
        ranked.iter().map(|r| r.rank).collect()
    }

    fn items<T: Copy>(ranked: &[Ranked<T>]) -> Vec<T> {
        ranked.iter().map(|r| r.item).collect()
    }

    #[test]
    fn test_descending_competition_ranks() {
        let ranked = rank_by([4, 9, 7, 7], Direction::Descending, |x| *x);
        assert_eq!(items(&ranked), vec![9, 7, 7, 4]);
        assert_eq!(ranks(&ranked), vec![1, 2, 2, 4]);
    }

    #[test]
    fn test_ascending_competition_ranks() {
        let ranked = rank_by([3, 1, 1, 1, 2], Direction::Ascending, |x| *x);
        assert_eq!(ranks(&ranked), vec![1, 1, 1, 4, 5]);
    }

    #[test]
    fn test_ties_keep_input_order() {
        let rows = [("a", 2), ("b", 5), ("c", 2), ("d", 5)];
        let ranked = rank_by(rows, Direction::Descending, |(_, score)| *score);
        let names: Vec<&str> = ranked.iter().map(|r| r.item.0).collect();
        assert_eq!(names, vec!["b", "d", "a", "c"]);
        assert_eq!(ranks(&ranked), vec![1, 1, 3, 3]);
    }

    #[test]
    fn test_empty_input() {
        let ranked = rank_by(Vec::<i32>::new(), Direction::Ascending, |x| *x);
        assert!(ranked.is_empty());
        assert!(Cutoff::RankOne.apply(ranked).is_empty());
    }

    #[test]
    fn test_row_limit_splits_ties() {
        let ranked = rank_by([5, 5, 5, 1], Direction::Descending, |x| *x);
        let kept = Cutoff::RowLimit(2).apply(ranked);
        assert_eq!(ranks(&kept), vec![1, 1]);
    }

    #[test]
    fn test_row_limit_larger_than_input() {
        let ranked = rank_by([1, 2], Direction::Descending, |x| *x);
        assert_eq!(Cutoff::RowLimit(10).apply(ranked).len(), 2);
    }

    #[test]
    fn test_rank_one_keeps_every_tied_leader() {
        let ranked = rank_by([5, 5, 5, 1], Direction::Descending, |x| *x);
        let kept = Cutoff::RankOne.apply(ranked);
        assert_eq!(items(&kept), vec![5, 5, 5]);

        let ranked = rank_by([5, 3, 1], Direction::Ascending, |x| *x);
        assert_eq!(items(&Cutoff::RankOne.apply(ranked)), vec![1]);
    }
}
