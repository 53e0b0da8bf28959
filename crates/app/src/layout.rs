//! Screen placement of the map. Rows are drawn top-down while world `y`
//! grows upward, so every conversion here flips the vertical axis.

use abyss_core::Pos;

pub const HUD_HEIGHT: f32 = 64.0;
const MARGIN: f32 = 12.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PanelRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl PanelRect {
    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.x && y >= self.y && x < self.x + self.width && y < self.y + self.height
    }
}

pub struct FrameLayout {
    pub map: PanelRect,
    pub hud: PanelRect,
}

/// Map on top, HUD strip along the bottom edge.
pub fn frame_layout(screen_width: f32, screen_height: f32) -> FrameLayout {
    let inner_width = (screen_width - 2.0 * MARGIN).max(0.0);
    let map_height = (screen_height - HUD_HEIGHT - 3.0 * MARGIN).max(0.0);
    FrameLayout {
        map: PanelRect { x: MARGIN, y: MARGIN, width: inner_width, height: map_height },
        hud: PanelRect {
            x: MARGIN,
            y: 2.0 * MARGIN + map_height,
            width: inner_width,
            height: HUD_HEIGHT,
        },
    }
}

/// Square cells sized to fit a `columns` x `rows` grid inside a panel,
/// centred horizontally.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MapLayout {
    pub origin_x: f32,
    pub origin_y: f32,
    pub cell: f32,
    pub columns: usize,
    pub rows: usize,
}

impl MapLayout {
    pub fn fit(panel: PanelRect, columns: usize, rows: usize) -> Self {
        let by_width = panel.width / columns.max(1) as f32;
        let by_height = panel.height / rows.max(1) as f32;
        let cell = by_width.min(by_height).floor().max(1.0);
        let used_width = cell * columns as f32;
        Self {
            origin_x: panel.x + ((panel.width - used_width) / 2.0).max(0.0).floor(),
            origin_y: panel.y,
            cell,
            columns,
            rows,
        }
    }

    /// Top-left corner of the cell showing `pos`.
    pub fn cell_origin(&self, pos: Pos) -> (f32, f32) {
        let screen_row = self.rows as i32 - 1 - pos.y;
        (self.origin_x + pos.x as f32 * self.cell, self.origin_y + screen_row as f32 * self.cell)
    }

    /// The grid position under a screen point, if any.
    pub fn tile_under(&self, screen_x: f32, screen_y: f32) -> Option<Pos> {
        let column = ((screen_x - self.origin_x) / self.cell).floor();
        let row = ((screen_y - self.origin_y) / self.cell).floor();
        if column < 0.0 || row < 0.0 || column >= self.columns as f32 || row >= self.rows as f32 {
            return None;
        }
        Some(Pos { x: column as i32, y: self.rows as i32 - 1 - row as i32 })
    }
}
