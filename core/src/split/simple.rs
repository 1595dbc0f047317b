//! Single-pass zigzag split.

use crate::error::BalanceResult;
use crate::set::Set;

use super::{check, even_split, zigzag, Orientation};

/// Slices `set` into `subsets` consecutive runs of one zigzag traversal
/// along its shorter dimension.
pub(super) fn split(set: &Set, subsets: usize) -> BalanceResult<Vec<Set>> {
    check(set, subsets)?;
    let target = even_split(set.len(), subsets);
    let orientation = if set.width() < set.height() {
        Orientation::Horizontal
    } else {
        Orientation::Vertical
    };
    Ok(zigzag(set, &target, orientation, false))
}
