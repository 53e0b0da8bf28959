//! Display metadata for each tile kind. Renderers key off `TileKind`; the
//! simulation never reads anything in here.

use crate::types::TileKind;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TileInfo {
    pub glyph: char,
    pub color: Rgb,
    pub description: &'static str,
}

pub fn tile_info(kind: TileKind) -> TileInfo {
    match kind {
        TileKind::Empty => TileInfo {
            glyph: ' ',
            color: Rgb { r: 0, g: 0, b: 0 },
            description: "nothing",
        },
        TileKind::Floor => TileInfo {
            glyph: '·',
            color: Rgb { r: 128, g: 192, b: 128 },
            description: "floor",
        },
        TileKind::Wall => TileInfo {
            glyph: '#',
            color: Rgb { r: 216, g: 128, b: 128 },
            description: "wall",
        },
        TileKind::Player => TileInfo {
            glyph: '@',
            color: Rgb { r: 255, g: 255, b: 255 },
            description: "you",
        },
        TileKind::Ladder => TileInfo {
            glyph: 'H',
            color: Rgb { r: 210, g: 180, b: 140 },
            description: "ladder",
        },
    }
}
