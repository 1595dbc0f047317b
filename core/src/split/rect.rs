//! Near-square band split.

use log::debug;

use crate::error::BalanceResult;
use crate::set::Set;

use super::{check, even_split, subset_counts, weighted_split, zigzag, Orientation};

/// Splits `set` into a near-square arrangement of `subsets` subsets.
///
/// The set is first cut into bands along its shorter dimension, one band
/// per entry of the subset-count vector and weighted by it, then each band
/// is cut into its assigned number of subsets along the orthogonal axis.
pub(super) fn split(set: &Set, subsets: usize) -> BalanceResult<Vec<Set>> {
    check(set, subsets)?;

    let counts = subset_counts(subsets);
    let band_work = weighted_split(set.len(), &counts, subsets);
    debug!(
        "splitting set of {} blocks into bands {:?} with work {:?}",
        set.len(),
        counts,
        band_work
    );

    let (outer, inner) = if set.width() < set.height() {
        (Orientation::Horizontal, Orientation::Vertical)
    } else {
        (Orientation::Vertical, Orientation::Horizontal)
    };

    let bands = zigzag(set, &band_work, outer, false);
    let mut result = Vec::with_capacity(subsets);
    for (band, &count) in bands.iter().zip(&counts) {
        let part_work = even_split(band.len(), count);
        result.extend(zigzag(band, &part_work, inner, false));
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::Block;
    use crate::coordinate::Coordinate;

    fn rectangle(width: i32, height: i32) -> Set {
        let mut blocks = Vec::new();
        for y in 0..height {
            for x in 0..width {
                blocks.push(Block::land(Coordinate::new(x, y)));
            }
        }
        Set::new(blocks)
    }

    #[test]
    fn test_four_way_split_is_two_by_two() {
        let set = rectangle(4, 4);
        let parts = split(&set, 4).unwrap();
        assert_eq!(parts.len(), 4);
        for part in &parts {
            assert_eq!(part.len(), 4);
            assert_eq!(part.width(), 2);
            assert_eq!(part.height(), 2);
        }
    }

    #[test]
    fn test_sizes_stay_within_one_block() {
        let set = rectangle(7, 9);
        for subsets in 1..=9 {
            let parts = split(&set, subsets).unwrap();
            assert_eq!(parts.len(), subsets);
            assert_eq!(parts.iter().map(Set::len).sum::<usize>(), 63);
            let min = parts.iter().map(Set::len).min().unwrap();
            let max = parts.iter().map(Set::len).max().unwrap();
            assert!(max - min <= 1, "subsets {}: {}..{}", subsets, min, max);
        }
    }

    #[test]
    fn test_every_block_lands_in_exactly_one_part() {
        let set = rectangle(6, 5);
        let parts = split(&set, 5).unwrap();
        let mut seen = std::collections::HashSet::new();
        for part in &parts {
            for b in part.blocks() {
                assert!(seen.insert(b.coordinate()), "block assigned twice");
            }
        }
        assert_eq!(seen.len(), 30);
    }

    #[test]
    fn test_single_subset_returns_whole_set() {
        let set = rectangle(3, 2);
        let parts = split(&set, 1).unwrap();
        assert_eq!(parts.len(), 1);
        assert_eq!(parts[0].len(), 6);
    }
}
