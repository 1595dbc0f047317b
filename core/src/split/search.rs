//! Exhaustive split search.
//!
//! The search keeps the near-square band arrangement of the rectangular
//! split but treats everything else as a degree of freedom: the order in
//! which (band work, column count) pairs are laid out, and the traversal
//! orientation at both the band and the column level. Every candidate is
//! scored by the communication objective and the best one wins; ties keep
//! the candidate found first, so results are deterministic.
//!
//! A band's subsets exchange halo data only with blocks outside that band
//! or with each other, never depending on how the *other* bands are cut.
//! Both objectives decompose over bands because of this, so each band's
//! column split can be optimized on its own.

use std::fmt;
use std::str::FromStr;

use log::debug;

use crate::error::{BalanceError, BalanceResult};
use crate::set::Set;

use super::{check, even_split, subset_counts, weighted_split, zigzag, Orientation};

/// Objective minimized when scoring candidate splits.
///
/// Both orders compare lexicographically on `(primary, secondary)`.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum CommObjective {
    /// Total communication over all subsets, with the largest single
    /// subset as tie-breaker.
    SumThenMax,
    /// Largest single subset's communication, with the total as
    /// tie-breaker.
    MaxThenSum,
}

impl CommObjective {
    /// Canonical lowercase name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::SumThenMax => "sum",
            Self::MaxThenSum => "max",
        }
    }

    fn score(self, sets: &[Set]) -> (u64, u64) {
        let mut sum = 0;
        let mut max = 0;
        for s in sets {
            let c = s.communication();
            sum += c;
            max = max.max(c);
        }
        match self {
            Self::SumThenMax => (sum, max),
            Self::MaxThenSum => (max, sum),
        }
    }
}

impl Default for CommObjective {
    fn default() -> Self {
        Self::SumThenMax
    }
}

impl fmt::Display for CommObjective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for CommObjective {
    type Err = BalanceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("sum") {
            Ok(Self::SumThenMax)
        } else if s.eq_ignore_ascii_case("max") {
            Ok(Self::MaxThenSum)
        } else {
            Err(BalanceError::UnknownObjective(s.to_owned()))
        }
    }
}

const TRAVERSALS: [(Orientation, bool); 4] = [
    (Orientation::Horizontal, false),
    (Orientation::Horizontal, true),
    (Orientation::Vertical, false),
    (Orientation::Vertical, true),
];

/// Splits `set` into `subsets` subsets, searching all band orderings and
/// traversal orientations for the lowest-scoring candidate.
pub(super) fn split(
    set: &Set,
    subsets: usize,
    objective: CommObjective,
) -> BalanceResult<Vec<Set>> {
    check(set, subsets)?;

    let counts = subset_counts(subsets);
    let band_work = weighted_split(set.len(), &counts, subsets);
    let pairs: Vec<(usize, usize)> = band_work
        .into_iter()
        .zip(counts.into_iter())
        .collect();

    let mut best: Option<((u64, u64), Vec<Set>)> = None;
    for perm in DistinctPermutations::new(pairs) {
        let targets: Vec<usize> = perm.iter().map(|&(work, _)| work).collect();
        for &(orientation, reverse) in &TRAVERSALS {
            let bands = zigzag(set, &targets, orientation, reverse);
            let mut candidate = Vec::with_capacity(subsets);
            for (band, &(_, count)) in bands.iter().zip(&perm) {
                candidate.extend(best_band_split(band, count, objective));
            }
            let score = objective.score(&candidate);
            if best.as_ref().map_or(true, |(s, _)| score < *s) {
                best = Some((score, candidate));
            }
        }
    }

    match best {
        Some((score, candidate)) => {
            debug!(
                "search over {} subsets settled on {} score {:?}",
                subsets, objective, score
            );
            Ok(candidate)
        }
        None => unreachable!("search evaluated no candidates"),
    }
}

/// Best split of one band into `count` columns, over all work orderings
/// and traversal orientations.
fn best_band_split(band: &Set, count: usize, objective: CommObjective) -> Vec<Set> {
    let work = even_split(band.len(), count);

    let mut best: Option<((u64, u64), Vec<Set>)> = None;
    for perm in DistinctPermutations::new(work) {
        for &(orientation, reverse) in &TRAVERSALS {
            let candidate = zigzag(band, &perm, orientation, reverse);
            let score = objective.score(&candidate);
            if best.as_ref().map_or(true, |(s, _)| score < *s) {
                best = Some((score, candidate));
            }
        }
    }

    match best {
        Some((_, candidate)) => candidate,
        None => unreachable!("band split evaluated no candidates"),
    }
}

/// Iterator over the distinct permutations of a multiset, in lexicographic
/// order.
///
/// Equal elements are not distinguished, so a vector with repeats yields
/// far fewer permutations than `n!`.
struct DistinctPermutations<T> {
    items: Vec<T>,
    started: bool,
    done: bool,
}

impl<T: Ord + Clone> DistinctPermutations<T> {
    fn new(mut items: Vec<T>) -> Self {
        items.sort();
        Self {
            items,
            started: false,
            done: false,
        }
    }
}

impl<T: Ord + Clone> Iterator for DistinctPermutations<T> {
    type Item = Vec<T>;

    fn next(&mut self) -> Option<Vec<T>> {
        if self.done {
            return None;
        }
        if !self.started {
            self.started = true;
            return Some(self.items.clone());
        }

        let n = self.items.len();
        if n < 2 {
            self.done = true;
            return None;
        }
        // Longest non-increasing suffix; the element before it is the
        // pivot to advance.
        let mut i = n - 1;
        while i > 0 && self.items[i - 1] >= self.items[i] {
            i -= 1;
        }
        if i == 0 {
            self.done = true;
            return None;
        }
        let mut j = n - 1;
        while self.items[j] <= self.items[i - 1] {
            j -= 1;
        }
        self.items.swap(i - 1, j);
        self.items[i..].reverse();
        Some(self.items.clone())
    }
}
