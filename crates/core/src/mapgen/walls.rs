//! Wall derivation and cleanup passes run after all structures are carved.

use crate::state::Grid;
use crate::types::{Pos, TileKind};

pub fn place_walls(grid: &mut Grid) {
    let floors: Vec<Pos> = grid.positions_of(TileKind::Floor).collect();
    for pos in floors {
        encircle(grid, pos);
    }
}

/// Turns every void cell in the 3x3 block around `center` into wall.
pub fn encircle(grid: &mut Grid, center: Pos) {
    for dx in -1..=1 {
        for dy in -1..=1 {
            let pos = center.offset(dx, dy);
            if grid.in_bounds(pos) && grid.tile_at(pos) == TileKind::Empty {
                grid.set_tile(pos, TileKind::Wall);
            }
        }
    }
}

/// Opens one-tile walls left between two structures. Sweeps until a pass
/// converts nothing, so running it again is a no-op. Returns the number of
/// walls opened.
pub fn clean_seams(grid: &mut Grid) -> usize {
    let width = grid.width() as i32;
    let height = grid.height() as i32;
    let is_floor = |grid: &Grid, x: i32, y: i32| grid.tile_at(Pos { y, x }) == TileKind::Floor;

    let mut opened = 0;
    loop {
        let mut changed = false;
        for x in 1..width - 1 {
            for y in 1..height - 1 {
                if grid.tile_at(Pos { y, x }) != TileKind::Wall {
                    continue;
                }
                let horizontal = is_floor(grid, x - 1, y) && is_floor(grid, x + 1, y);
                let vertical = is_floor(grid, x, y - 1) && is_floor(grid, x, y + 1);
                if horizontal || vertical {
                    grid.set_tile(Pos { y, x }, TileKind::Floor);
                    opened += 1;
                    changed = true;
                }
            }
        }
        if !changed {
            return opened;
        }
    }
}

pub fn fill_void(grid: &mut Grid) {
    let void: Vec<Pos> = grid.positions_of(TileKind::Empty).collect();
    for pos in void {
        grid.set_tile(pos, TileKind::Wall);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid_from(rows: &[&str]) -> Grid {
        Grid::from_rows(rows[0].len(), rows).expect("fixture rows should parse")
    }

    #[test]
    fn walls_wrap_floor_without_touching_markers() {
        let mut grid = grid_from(&[
            "      ",
            "  .H  ",
            "  @.  ",
            "      ",
        ]);
        place_walls(&mut grid);
        assert_eq!(
            grid.to_rows(),
            vec![" ###  ", " #.H# ", " #@.# ", "  ### "],
        );
    }

    #[test]
    fn seam_between_two_rooms_is_opened() {
        let mut grid = grid_from(&[
            "#########",
            "#..#....#",
            "#..#....#",
            "#########",
        ]);
        let opened = clean_seams(&mut grid);
        assert_eq!(opened, 2);
        assert_eq!(grid.to_rows()[1], "#.......#");
        assert_eq!(grid.to_rows()[0], "#########", "border row must stay intact");
    }

    #[test]
    fn seam_cleanup_reaches_a_fixed_point() {
        // The left wall only qualifies after the wall to its right, which the
        // sweep visits later, has been opened.
        let mut grid = grid_from(&[
            "#####",
            "###.#",
            "#.###",
            "###.#",
            "#####",
        ]);
        assert_eq!(clean_seams(&mut grid), 2);
        assert_eq!(grid.to_rows()[2], "#...#");
        let once = grid.clone();
        assert_eq!(clean_seams(&mut grid), 0);
        assert_eq!(grid, once);
    }

    #[test]
    fn fill_void_leaves_no_empty_cells() {
        let mut grid = grid_from(&["  . ", " ## "]);
        fill_void(&mut grid);
        assert_eq!(grid.count(TileKind::Empty), 0);
        assert_eq!(grid.count(TileKind::Floor), 1);
    }
}
