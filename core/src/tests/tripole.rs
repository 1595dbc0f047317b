//! Halo traffic across the tripole fold at the northern boundary.

use crate::prelude::*;

fn open_water(width: i32, height: i32) -> Topography {
    Topography::new(width, height, vec![1; (width * height) as usize]).unwrap()
}

fn set_of(grid: &Grid, coordinates: &[(i32, i32)]) -> Set {
    Set::new(
        coordinates
            .iter()
            .map(|&(x, y)| grid.get(x, y).unwrap().clone())
            .collect(),
    )
}

#[test]
fn test_fold_reverses_the_top_row() {
    let topography = open_water(8, 3);
    let model = Neighbours::new(&topography, 1, 1, BoundaryX::Cyclic, BoundaryY::Tripole).unwrap();
    for x in 0..8 {
        let above = model
            .neighbour(Coordinate::new(x, 2), Direction::North)
            .unwrap();
        let mirrored = BlockId::from_coordinate(Coordinate::new(7 - x, 2), 8);
        assert_eq!(above, mirrored);
    }
}

#[test]
fn test_fold_exchanges_reciprocate_northward() {
    // Away from the fold a northward exchange is answered southward; across
    // the fold both partners face north, and the transfer has the same size
    // in both directions.
    let topography = open_water(6, 4);
    let model = Neighbours::new(&topography, 1, 1, BoundaryX::Cyclic, BoundaryY::Tripole).unwrap();
    for x in 0..6 {
        let a = Coordinate::new(x, 3);
        let b = Coordinate::new(5 - x, 3);
        assert_eq!(
            model.neighbour(a, Direction::North),
            Some(BlockId::from_coordinate(b, 6))
        );
        assert_eq!(
            model.neighbour(b, Direction::North),
            Some(BlockId::from_coordinate(a, 6))
        );
        assert_eq!(
            model.message_size(a, Direction::North),
            model.message_size(b, Direction::North)
        );
        assert_eq!(model.message_size(a, Direction::North), 3);
    }
}

#[test]
fn test_fold_traffic_counts_only_across_the_cut() {
    let topography = open_water(4, 2);
    let folded =
        Neighbours::new(&topography, 1, 1, BoundaryX::Cyclic, BoundaryY::Tripole).unwrap();
    let closed =
        Neighbours::new(&topography, 1, 1, BoundaryX::Cyclic, BoundaryY::Closed).unwrap();
    let folded_grid = Grid::new(&folded);
    let closed_grid = Grid::new(&closed);

    // The western half of the top row folds onto the eastern half, so its
    // northward halos all leave the set: per block one north exchange of
    // width*(HALO_WIDTH+1) points and one folded diagonal, on top of the
    // ordinary southward and sideways traffic.
    let half_row = [(0, 1), (1, 1)];
    assert_eq!(set_of(&folded_grid, &half_row).communication(), 36);
    assert_eq!(set_of(&closed_grid, &half_row).communication(), 24);

    // A set spanning the whole fold line keeps the folded exchanges
    // internal and costs exactly what it would against a closed wall.
    let top_row = [(0, 1), (1, 1), (2, 1), (3, 1)];
    let folded_row = set_of(&folded_grid, &top_row);
    let closed_row = set_of(&closed_grid, &top_row);
    assert_eq!(folded_row.communication(), closed_row.communication());
    assert_eq!(folded_row.communication(), 40);
}

#[test]
fn test_closed_x_blocks_the_folded_corners() {
    let topography = open_water(4, 2);
    let model =
        Neighbours::new(&topography, 1, 1, BoundaryX::Closed, BoundaryY::Tripole).unwrap();

    // The north neighbour still folds.
    assert_eq!(
        model.neighbour(Coordinate::new(0, 1), Direction::North),
        Some(BlockId::from_coordinate(Coordinate::new(3, 1), 4))
    );
    // The diagonals leave through the closed western wall first.
    assert_eq!(
        model.neighbour(Coordinate::new(0, 1), Direction::NorthWest),
        None
    );
    assert_eq!(model.message_size(Coordinate::new(0, 1), Direction::NorthWest), 0);
}
