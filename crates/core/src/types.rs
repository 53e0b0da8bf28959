use serde::{Deserialize, Serialize};

/// Grid coordinate. `y` grows upward, so `Direction::Up` increments it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Pos {
    pub y: i32,
    pub x: i32,
}

impl Pos {
    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Self { y: self.y + dy, x: self.x + dx }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TileKind {
    Empty,
    Floor,
    Wall,
    Player,
    Ladder,
}

impl TileKind {
    pub const ALL: [TileKind; 5] =
        [TileKind::Empty, TileKind::Floor, TileKind::Wall, TileKind::Player, TileKind::Ladder];

    /// Single-character code used by snapshots and text dumps.
    pub fn code(self) -> char {
        match self {
            TileKind::Empty => ' ',
            TileKind::Floor => '.',
            TileKind::Wall => '#',
            TileKind::Player => '@',
            TileKind::Ladder => 'H',
        }
    }

    pub fn from_code(code: char) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.code() == code)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Left,
    Down,
    Right,
}

impl Direction {
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Down => (0, -1),
            Direction::Right => (1, 0),
        }
    }

    pub fn from_key(key: char) -> Option<Self> {
        match key.to_ascii_lowercase() {
            'w' => Some(Direction::Up),
            'a' => Some(Direction::Left),
            's' => Some(Direction::Down),
            'd' => Some(Direction::Right),
            _ => None,
        }
    }
}

/// Signed structure extent. The sign of each axis is the carve direction from
/// the anchor, the magnitude is the number of cells along that axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ShapeVector {
    pub dx: i32,
    pub dy: i32,
}

impl ShapeVector {
    pub fn is_corridor(self) -> bool {
        (self.dx.abs() == 1) != (self.dy.abs() == 1)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StructureKind {
    Room,
    Hallway,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Structure {
    pub kind: StructureKind,
    pub shape: ShapeVector,
    pub anchor: Pos,
}

/// The two dungeon layers linked by a ladder pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Layer {
    Floor,
    Overworld,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LadderState {
    Exploring,
    Armed,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveOutcome {
    Moved { from: Pos, to: Pos },
    Blocked,
}
