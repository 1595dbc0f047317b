//! Strategies for subdividing a set of blocks.
//!
//! Every strategy takes a set and a subset count `k` and produces exactly
//! `k` sets whose union is the input and whose sizes differ by at most one
//! block (`⌊n/k⌋` or `⌈n/k⌉`). They differ in the shape of the subsets and
//! in how hard they try to reduce the halo traffic across subset borders.

use std::fmt;
use std::str::FromStr;

use crate::block::Block;
use crate::error::{BalanceError, BalanceResult};
use crate::set::Set;

mod rect;
mod search;
mod simple;

pub use self::search::CommObjective;

/// Strategy used to subdivide a set of blocks.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SplitMethod {
    /// A single zigzag slicing pass along the set's shorter dimension.
    /// Fast, but produces long thin subsets.
    Simple,
    /// A near-square arrangement of bands and columns.
    RoughlyRectangular,
    /// Like [`SplitMethod::RoughlyRectangular`], but searches all band
    /// orderings and traversal orientations for the candidate that
    /// minimizes the given communication objective.
    Search(CommObjective),
}

impl SplitMethod {
    /// Subdivides `set` into exactly `subsets` sets.
    ///
    /// Fails if `subsets` is zero or exceeds the number of blocks.
    pub fn split(self, set: &Set, subsets: usize) -> BalanceResult<Vec<Set>> {
        match self {
            SplitMethod::Simple => simple::split(set, subsets),
            SplitMethod::RoughlyRectangular => rect::split(set, subsets),
            SplitMethod::Search(objective) => search::split(set, subsets, objective),
        }
    }

    /// Canonical lowercase name.
    pub const fn name(self) -> &'static str {
        match self {
            SplitMethod::Simple => "simple",
            SplitMethod::RoughlyRectangular => "roughlyrect",
            SplitMethod::Search(_) => "search",
        }
    }
}

impl fmt::Display for SplitMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for SplitMethod {
    type Err = BalanceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("simple") {
            Ok(SplitMethod::Simple)
        } else if s.eq_ignore_ascii_case("roughlyrect") {
            Ok(SplitMethod::RoughlyRectangular)
        } else if s.eq_ignore_ascii_case("search") {
            Ok(SplitMethod::Search(CommObjective::default()))
        } else {
            Err(BalanceError::UnknownSplitMethod(s.to_owned()))
        }
    }
}

/// Axis along which a zigzag traversal advances band by band.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) enum Orientation {
    /// Row by row, sweeping x within each row.
    Horizontal,
    /// Column by column, sweeping y within each column.
    Vertical,
}

/// Rejects subset counts the set cannot satisfy.
pub(crate) fn check(set: &Set, subsets: usize) -> BalanceResult<()> {
    if subsets == 0 || set.len() < subsets {
        return Err(BalanceError::InvalidSubsetCount {
            blocks: set.len(),
            subsets,
        });
    }
    Ok(())
}

/// Splits `work` into `parts` sizes differing by at most one; the first
/// `work % parts` entries take the extra block.
pub(crate) fn even_split(work: usize, parts: usize) -> Vec<usize> {
    let div = work / parts;
    let rem = work % parts;
    (0..parts).map(|i| div + usize::from(i < rem)).collect()
}

/// Splits `work` into one size per slice, proportional to the slice's
/// share of `total_parts`. The remainder is handed out greedily from the
/// first slice on, at most one unit per part.
pub(crate) fn weighted_split(work: usize, slices: &[usize], total_parts: usize) -> Vec<usize> {
    let div = work / total_parts;
    let mut rem = work % total_parts;
    let mut result: Vec<usize> = slices.iter().map(|&s| div * s).collect();
    for (r, &s) in result.iter_mut().zip(slices) {
        if rem == 0 {
            break;
        }
        let add = s.min(rem);
        *r += add;
        rem -= add;
    }
    result
}

/// Per-band subset counts forming a near-square arrangement for `parts`
/// subsets.
///
/// `⌊√parts⌋` bands of `⌊√parts⌋` when `parts` is a perfect square,
/// otherwise `⌈√parts⌉` bands whose counts sum to `parts`, trimmed from
/// the last band backwards.
pub(crate) fn subset_counts(parts: usize) -> Vec<usize> {
    let root = (parts as f64).sqrt();
    let low = root.floor() as usize;
    let high = root.ceil() as usize;

    if low == high {
        vec![low; low]
    } else if parts == low * high {
        vec![low; high]
    } else if parts < low * high {
        let mut counts = vec![low; high];
        for c in counts.iter_mut().rev().take(low * high - parts) {
            *c -= 1;
        }
        counts
    } else {
        let mut counts = vec![high; high];
        for c in counts.iter_mut().rev().take(high * high - parts) {
            *c -= 1;
        }
        counts
    }
}

/// Cuts `set` into consecutive runs of `target` blocks along a zigzag
/// traversal.
///
/// A horizontal traversal walks rows south to north, alternating the x
/// sweep per row; a vertical traversal walks columns west to east,
/// alternating the y sweep per column. The alternation parity comes from
/// the absolute row or column coordinate, so a sub-traversal of a larger
/// set snakes the same way the full traversal would. `reverse` flips the
/// parity.
///
/// Panics if `target` does not exactly cover the set.
pub(crate) fn zigzag(
    set: &Set,
    target: &[usize],
    orientation: Orientation,
    reverse: bool,
) -> Vec<Set> {
    let order = traversal_order(set, orientation, reverse);
    assert_eq!(
        order.len(),
        target.iter().sum::<usize>(),
        "split targets must cover the set exactly",
    );

    let mut result = Vec::with_capacity(target.len());
    let mut start = 0;
    for &want in target {
        let blocks: Vec<Block> = order[start..start + want].iter().map(|&b| b.clone()).collect();
        result.push(Set::new(blocks));
        start += want;
    }
    result
}

fn traversal_order<'a>(set: &'a Set, orientation: Orientation, reverse: bool) -> Vec<&'a Block> {
    let direction = i32::from(reverse);
    let mut order = Vec::with_capacity(set.len());
    match orientation {
        Orientation::Horizontal => {
            for y in set.min_y()..=set.max_y() {
                if y % 2 == direction {
                    for x in set.min_x()..=set.max_x() {
                        order.extend(set.get(x, y));
                    }
                } else {
                    for x in (set.min_x()..=set.max_x()).rev() {
                        order.extend(set.get(x, y));
                    }
                }
            }
        }
        Orientation::Vertical => {
            for x in set.min_x()..=set.max_x() {
                if x % 2 == direction {
                    for y in set.min_y()..=set.max_y() {
                        order.extend(set.get(x, y));
                    }
                } else {
                    for y in (set.min_y()..=set.max_y()).rev() {
                        order.extend(set.get(x, y));
                    }
                }
            }
        }
    }
    order
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coordinate::Coordinate;
    use proptest::prelude::*;

    fn square_set(side: i32) -> Set {
        let mut blocks = Vec::new();
        for y in 0..side {
            for x in 0..side {
                blocks.push(Block::land(Coordinate::new(x, y)));
            }
        }
        Set::new(blocks)
    }

    #[test]
    fn test_even_split() {
        assert_eq!(even_split(10, 2), vec![5, 5]);
        assert_eq!(even_split(11, 3), vec![4, 4, 3]);
        assert_eq!(even_split(3, 3), vec![1, 1, 1]);
    }

    #[test]
    fn test_weighted_split() {
        // 103 blocks over two bands of 2 + 2 columns.
        assert_eq!(weighted_split(103, &[2, 2], 4), vec![52, 51]);
        // Remainder never hands a band more than its column count extra.
        assert_eq!(weighted_split(23, &[3, 2], 5), vec![15, 8]);
        assert_eq!(weighted_split(20, &[3, 2], 5), vec![12, 8]);
    }

    #[test]
    fn test_subset_counts() {
        assert_eq!(subset_counts(1), vec![1]);
        assert_eq!(subset_counts(2), vec![1, 1]);
        assert_eq!(subset_counts(3), vec![2, 1]);
        assert_eq!(subset_counts(4), vec![2, 2]);
        assert_eq!(subset_counts(5), vec![2, 2, 1]);
        assert_eq!(subset_counts(6), vec![2, 2, 2]);
        assert_eq!(subset_counts(7), vec![3, 2, 2]);
        assert_eq!(subset_counts(8), vec![3, 3, 2]);
        assert_eq!(subset_counts(9), vec![3, 3, 3]);
        assert_eq!(subset_counts(10), vec![3, 3, 2, 2]);
        assert_eq!(subset_counts(12), vec![3, 3, 3, 3]);
    }

    #[test]
    fn test_zigzag_snakes_through_rows() {
        let set = square_set(3);
        let parts = zigzag(&set, &[4, 5], Orientation::Horizontal, false);

        let first: Vec<_> = parts[0].blocks().iter().map(Block::coordinate).collect();
        // Row 0 left to right, then the first block of row 1 coming back.
        assert_eq!(
            first,
            vec![
                Coordinate::new(0, 0),
                Coordinate::new(1, 0),
                Coordinate::new(2, 0),
                Coordinate::new(2, 1),
            ],
        );
        assert_eq!(parts[1].len(), 5);
    }

    #[test]
    fn test_zigzag_parity_is_absolute() {
        // A band whose first row is odd sweeps right to left first.
        let mut blocks = Vec::new();
        for y in 1..3 {
            for x in 0..3 {
                blocks.push(Block::land(Coordinate::new(x, y)));
            }
        }
        let band = Set::new(blocks);
        let parts = zigzag(&band, &[2, 4], Orientation::Horizontal, false);
        let first: Vec<_> = parts[0].blocks().iter().map(Block::coordinate).collect();
        assert_eq!(first, vec![Coordinate::new(1, 1), Coordinate::new(2, 1)]);
    }

    #[test]
    fn test_zigzag_reverse_flips_parity() {
        let set = square_set(2);
        let parts = zigzag(&set, &[1, 3], Orientation::Vertical, true);
        // Column 0 is swept north to south when reversed, so the single
        // block of the first cut is the top of that column.
        assert_eq!(parts[0].len(), 1);
        assert_eq!(parts[0].blocks()[0].coordinate(), Coordinate::new(0, 1));
    }

    proptest! {
        #[test]
        fn test_even_split_is_balanced(work in 1usize..500, parts in 1usize..50) {
            let parts = parts.min(work);
            let sizes = even_split(work, parts);
            prop_assert_eq!(sizes.len(), parts);
            prop_assert_eq!(sizes.iter().sum::<usize>(), work);
            let min = sizes.iter().min().unwrap();
            let max = sizes.iter().max().unwrap();
            prop_assert!(max - min <= 1);
        }

        #[test]
        fn test_weighted_split_conserves_work(work in 5usize..500, parts in 1usize..20) {
            let parts = parts.min(work);
            let counts = subset_counts(parts);
            prop_assert_eq!(counts.iter().sum::<usize>(), parts);
            let sizes = weighted_split(work, &counts, parts);
            prop_assert_eq!(sizes.iter().sum::<usize>(), work);
            // Each band can still hand every column at least one block.
            for (size, count) in sizes.iter().zip(&counts) {
                prop_assert!(size >= count);
            }
        }
    }
}
