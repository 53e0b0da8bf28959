//! Room and corridor placement: validation, carving and the connectivity rule
//! that keeps every accepted structure attached to existing carved space.

use rand_chacha::ChaCha8Rng;

use super::seed::{coin, uniform};
use super::shapes::{random_hall, random_room};
use crate::config::GameConfig;
use crate::state::Grid;
use crate::types::{Pos, ShapeVector, Structure, StructureKind, TileKind};

/// Inclusive cell bounds of a structure. Empty when `min > max` on an axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Bounds {
    pub(crate) min_x: i32,
    pub(crate) max_x: i32,
    pub(crate) min_y: i32,
    pub(crate) max_y: i32,
}

impl Bounds {
    pub(crate) fn of(structure: &Structure) -> Self {
        let (min_x, max_x) = axis_span(structure.anchor.x, structure.shape.dx);
        let (min_y, max_y) = axis_span(structure.anchor.y, structure.shape.dy);
        Self { min_x, max_x, min_y, max_y }
    }

    fn padded(self, margin: i32) -> Self {
        Self {
            min_x: self.min_x - margin,
            max_x: self.max_x + margin,
            min_y: self.min_y - margin,
            max_y: self.max_y + margin,
        }
    }

    fn is_empty(self) -> bool {
        self.min_x > self.max_x || self.min_y > self.max_y
    }

    fn cells(self) -> impl Iterator<Item = Pos> {
        (self.min_x..=self.max_x)
            .flat_map(move |x| (self.min_y..=self.max_y).map(move |y| Pos { y, x }))
    }
}

fn axis_span(origin: i32, extent: i32) -> (i32, i32) {
    if extent > 0 { (origin, origin + extent - 1) } else { (origin + extent + 1, origin) }
}

/// Offset from the anchor to the structure's far cell on each axis.
pub fn inner_span(shape: ShapeVector) -> (i32, i32) {
    let span = |extent: i32| if extent > 0 { extent - 1 } else { extent + 1 };
    (span(shape.dx), span(shape.dy))
}

/// The padded footprint must sit inside the one-tile reserved border, and a
/// room may not cover any existing floor. Corridors may run over floor.
pub fn is_placeable(grid: &Grid, structure: &Structure) -> bool {
    let bounds = Bounds::of(structure);
    if bounds.is_empty() {
        return false;
    }
    let padded = bounds.padded(1);
    let max_x = grid.width() as i32 - 2;
    let max_y = grid.height() as i32 - 2;
    if padded.min_x < 1 || padded.min_y < 1 || padded.max_x > max_x || padded.max_y > max_y {
        return false;
    }
    match structure.kind {
        StructureKind::Room => bounds.cells().all(|pos| grid.tile_at(pos) != TileKind::Floor),
        StructureKind::Hallway => true,
    }
}

/// Writes floor over every cell the structure spans, stepping away from the
/// anchor in the direction of each axis's sign.
pub fn carve(grid: &mut Grid, structure: &Structure) {
    let ShapeVector { dx, dy } = structure.shape;
    let (step_x, step_y) = (dx.signum(), dy.signum());
    for i in 0..dx.abs() {
        for j in 0..dy.abs() {
            grid.set_tile(structure.anchor.offset(i * step_x, j * step_y), TileKind::Floor);
        }
    }
}

/// A carved tile that touches the void on any of its eight sides.
pub fn is_border_tile(grid: &Grid, pos: Pos) -> bool {
    if !grid.in_bounds(pos) || grid.tile_at(pos) == TileKind::Empty {
        return false;
    }
    (-1..=1).any(|dx| {
        (-1..=1).any(|dy| {
            let neighbor = pos.offset(dx, dy);
            grid.in_bounds(neighbor) && grid.tile_at(neighbor) == TileKind::Empty
        })
    })
}

/// True when the cell just past the structure's far end, along its length,
/// is a border tile of the existing map.
pub fn is_connected(grid: &Grid, structure: &Structure) -> bool {
    let (span_x, span_y) = inner_span(structure.shape);
    let beyond = |extent: i32| if extent.abs() > 1 { extent.signum() } else { 0 };
    let ShapeVector { dx, dy } = structure.shape;
    let target = structure.anchor.offset(span_x + beyond(dx), span_y + beyond(dy));
    is_border_tile(grid, target)
}

/// Attaches the corridor to one of the two room sides facing its length axis.
/// The corridor starts on the cell just outside the room and grows away from it.
pub(crate) fn pick_hallway_anchor(
    rng: &mut ChaCha8Rng,
    room: &Structure,
    hall_shape: ShapeVector,
) -> Structure {
    let bounds = Bounds::of(room);
    let high_side = coin(rng);
    let (shape, anchor) = if hall_shape.dx.abs() == 1 {
        let length = hall_shape.dy.abs();
        let x = uniform(rng, bounds.min_x, bounds.max_x + 1);
        if high_side {
            (ShapeVector { dx: 1, dy: length }, Pos { y: bounds.max_y + 1, x })
        } else {
            (ShapeVector { dx: 1, dy: -length }, Pos { y: bounds.min_y - 1, x })
        }
    } else {
        let length = hall_shape.dx.abs();
        let y = uniform(rng, bounds.min_y, bounds.max_y + 1);
        if high_side {
            (ShapeVector { dx: length, dy: 1 }, Pos { y, x: bounds.max_x + 1 })
        } else {
            (ShapeVector { dx: -length, dy: 1 }, Pos { y, x: bounds.min_x - 1 })
        }
    };
    Structure { kind: StructureKind::Hallway, shape, anchor }
}

/// Places the first room somewhere in the upper-right quadrant of the anchor
/// space. Retries until it fits; `GameConfig::validate` guarantees a fit exists.
pub(crate) fn place_seed_room(
    grid: &mut Grid,
    rng: &mut ChaCha8Rng,
    config: &GameConfig,
) -> Structure {
    let width = grid.width() as i32;
    let height = grid.height() as i32;
    loop {
        let shape = random_room(rng, config.seed_room_max_extent);
        let x = uniform(rng, width / 2, width);
        let y = uniform(rng, height / 2, height);
        let room = Structure { kind: StructureKind::Room, shape, anchor: Pos { y, x } };
        if is_placeable(grid, &room) {
            carve(grid, &room);
            return room;
        }
    }
}

/// One room/corridor attempt. Nothing is written unless the room and the
/// corridor both fit and the corridor's far end meets the existing map.
pub(crate) fn place_system(grid: &mut Grid, rng: &mut ChaCha8Rng, config: &GameConfig) -> bool {
    let hall_shape = random_hall(rng, config);
    let room_shape = random_room(rng, config.room_max_extent);

    let x = uniform(rng, 1, grid.width() as i32);
    let y = uniform(rng, 1, grid.height() as i32);
    let room = Structure { kind: StructureKind::Room, shape: room_shape, anchor: Pos { y, x } };
    let hall = pick_hallway_anchor(rng, &room, hall_shape);

    if is_placeable(grid, &room) && is_placeable(grid, &hall) && is_connected(grid, &hall) {
        carve(grid, &room);
        carve(grid, &hall);
        true
    } else {
        false
    }
}
