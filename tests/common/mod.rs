#![allow(dead_code)]

use grid_util::point::Point;
use terrain_pathfinding::Grid;

/// Places a source and targets on a fresh grid.
pub fn grid_with(width: usize, height: usize, source: (i32, i32), targets: &[(i32, i32)]) -> Grid {
    let mut grid = Grid::new(width, height);
    grid.cell_mut(source.0, source.1).unwrap().set_source();
    for &(x, y) in targets {
        grid.cell_mut(x, y).unwrap().set_target();
    }
    grid
}

fn adjacent(a: Point, b: Point, allow_diagonal: bool) -> bool {
    let (dx, dy) = ((a.x - b.x).abs(), (a.y - b.y).abs());
    if allow_diagonal {
        dx.max(dy) == 1
    } else {
        dx + dy == 1
    }
}

/// Checks that `source, path.., target` is a chain of legal single moves and that
/// exactly the path cells are flagged on the grid.
pub fn assert_valid_path(grid: &Grid, target: Point, path: &[Point], allow_diagonal: bool) {
    let source = grid.source().expect("grid has a source");
    let chain: Vec<Point> = std::iter::once(source)
        .chain(path.iter().copied())
        .chain(std::iter::once(target))
        .collect();
    for pair in chain.windows(2) {
        assert!(
            adjacent(pair[0], pair[1], allow_diagonal) && grid.can_move_to(pair[1], pair[0]),
            "illegal move from {} to {}\n{}",
            pair[0],
            pair[1],
            grid
        );
    }
    assert!(grid.get_cell_point(target).unwrap().is_target());
    let flagged: Vec<Point> = grid.cells().filter(|c| c.is_path()).map(|c| c.point()).collect();
    assert_eq!(flagged.len(), path.len());
    assert!(flagged.iter().all(|p| path.contains(p)));
}
