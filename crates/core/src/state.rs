use thiserror::Error;

use crate::types::{Pos, TileKind};

/// Fixed-size tile matrix, row-major with `y = 0` as the bottom row.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    tiles: Vec<TileKind>,
}

impl Grid {
    pub fn new(width: usize, height: usize) -> Self {
        Self::filled(width, height, TileKind::Empty)
    }

    pub fn filled(width: usize, height: usize, tile: TileKind) -> Self {
        Self { width, height, tiles: vec![tile; width * height] }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn tiles(&self) -> &[TileKind] {
        &self.tiles
    }

    pub fn in_bounds(&self, pos: Pos) -> bool {
        pos.x >= 0 && pos.y >= 0 && (pos.x as usize) < self.width && (pos.y as usize) < self.height
    }

    /// Cells outside the grid read as `Wall`.
    pub fn tile_at(&self, pos: Pos) -> TileKind {
        if !self.in_bounds(pos) {
            return TileKind::Wall;
        }
        self.tiles[self.index(pos)]
    }

    pub fn set_tile(&mut self, pos: Pos, tile: TileKind) {
        if !self.in_bounds(pos) {
            return;
        }
        let idx = self.index(pos);
        self.tiles[idx] = tile;
    }

    pub fn count(&self, tile: TileKind) -> usize {
        self.tiles.iter().filter(|&&t| t == tile).count()
    }

    pub fn positions_of(&self, tile: TileKind) -> impl Iterator<Item = Pos> + '_ {
        self.positions().filter(move |&pos| self.tile_at(pos) == tile)
    }

    pub fn positions(&self) -> impl Iterator<Item = Pos> + use<> {
        let (width, height) = (self.width as i32, self.height as i32);
        (0..height).flat_map(move |y| (0..width).map(move |x| Pos { y, x }))
    }

    pub fn is_border(&self, pos: Pos) -> bool {
        pos.x == 0
            || pos.y == 0
            || pos.x == self.width as i32 - 1
            || pos.y == self.height as i32 - 1
    }

    /// Rows as tile-code strings, top row (highest `y`) first.
    pub fn to_rows(&self) -> Vec<String> {
        (0..self.height)
            .rev()
            .map(|y| {
                self.tiles[y * self.width..(y + 1) * self.width]
                    .iter()
                    .map(|tile| tile.code())
                    .collect()
            })
            .collect()
    }

    /// Inverse of [`Grid::to_rows`]. Every row must hold exactly `width` codes.
    pub fn from_rows<S: AsRef<str>>(width: usize, rows: &[S]) -> Result<Self, RowsError> {
        let height = rows.len();
        let mut grid = Self::new(width, height);
        for (row_index, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            let length = row.chars().count();
            if length != width {
                return Err(RowsError::RaggedRow { row: row_index, length, width });
            }
            let y = height - 1 - row_index;
            for (x, code) in row.chars().enumerate() {
                let tile = TileKind::from_code(code).ok_or(RowsError::InvalidTile {
                    row: row_index,
                    column: x,
                    code,
                })?;
                grid.set_tile(Pos { y: y as i32, x: x as i32 }, tile);
            }
        }
        Ok(grid)
    }

    fn index(&self, pos: Pos) -> usize {
        (pos.y as usize) * self.width + (pos.x as usize)
    }
}

/// Why a set of tile-code rows could not become a [`Grid`]. Rows count from
/// the top.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum RowsError {
    #[error("row {row} holds {length} tiles, expected {width}")]
    RaggedRow { row: usize, length: usize, width: usize },
    #[error("row {row} has invalid tile code {code:?} at column {column}")]
    InvalidTile { row: usize, column: usize, code: char },
}

/// One dungeon layer: its grid, the seed it was generated from and its ladder.
///
/// `player` is where the player stands on this layer. On the inactive layer
/// no Player tile is drawn and it equals `ladder`, the arrival point.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct World {
    pub seed: u64,
    pub grid: Grid,
    pub ladder: Pos,
    pub player: Pos,
}
