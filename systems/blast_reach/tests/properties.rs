use hypersonic_core::{CellKind, Grid, Position};
use hypersonic_system_blast_reach::{blast_reach, Exclusions};

const KINDS: [CellKind; 6] = [
    CellKind::Floor,
    CellKind::Box,
    CellKind::BoxWithExtraRange,
    CellKind::BoxWithExtraBomb,
    CellKind::ExtraRangeItem,
    CellKind::ExtraBombItem,
];

fn next_random(state: u64) -> u64 {
    state.wrapping_mul(636_413_622_384_679_3005).wrapping_add(1)
}

fn scattered_grid(width: usize, height: usize, seed: u64) -> Grid {
    let mut state = seed;
    let mut rows = Vec::with_capacity(height);
    for _ in 0..height {
        let mut row = Vec::with_capacity(width);
        for _ in 0..width {
            state = next_random(state);
            let roll = (state >> 33) % 10;
            let kind = if roll < 5 {
                CellKind::Floor
            } else {
                KINDS[usize::try_from(roll % 6).expect("small index")]
            };
            row.push(kind);
        }
        rows.push(row);
    }
    Grid::from_rows(&rows).expect("rectangular rows")
}

#[test]
fn reach_never_exceeds_four_boxes_or_reports_excluded_cells() {
    let grid = scattered_grid(13, 11, 0x5eed_1234);
    let excluded: Exclusions = grid
        .iter()
        .map(|cell| cell.position())
        .filter(|position| (position.x() + position.y()) % 3 == 0)
        .collect();

    for cell in grid.iter() {
        for range in -1..6 {
            for exclusions in [None, Some(&excluded)] {
                let reach = blast_reach(&grid, cell.position(), range, exclusions);
                assert!(reach.len() <= 4);
                for hit in reach.iter() {
                    assert!(hit.kind().is_box(), "{hit:?} is not a box");
                    if let Some(exclusions) = exclusions {
                        assert!(!exclusions.contains(&hit.position()));
                    }
                }
            }
        }
    }
}

#[test]
fn adjacent_bonus_blocks_boxes_further_along_the_ray() {
    let rows = vec![vec![
        CellKind::Floor,
        CellKind::ExtraBombItem,
        CellKind::Floor,
        CellKind::Box,
        CellKind::Floor,
        CellKind::ExtraRangeItem,
        CellKind::Floor,
    ]];
    let grid = Grid::from_rows(&rows).expect("rectangular rows");

    let from_left = blast_reach(&grid, Position::new(0, 0), 6, None);
    assert!(!from_left.contains(Position::new(3, 0)));

    let from_right = blast_reach(&grid, Position::new(6, 0), 6, None);
    assert!(from_right.is_empty());

    let between = blast_reach(&grid, Position::new(4, 0), 6, None);
    assert_eq!(between.positions().collect::<Vec<_>>(), vec![Position::new(3, 0)]);
}
