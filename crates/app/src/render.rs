//! Draws the active layer and the HUD. Glyphs and colours come from the core
//! content table so the map reads the same here as in text dumps.

use abyss_core::content::{Rgb, tile_info};
use abyss_core::{Game, Pos};
use app::app_loop::{AppMode, AppState};
use app::layout::{MapLayout, PanelRect, frame_layout};
use app::{format_seed, format_snapshot_hash};
use macroquad::prelude::{
    BLACK, Color, DARKGRAY, LIGHTGRAY, WHITE, clear_background, draw_rectangle, draw_text,
    measure_text, screen_height, screen_width,
};

const HUD_FONT: f32 = 22.0;

fn color(rgb: Rgb) -> Color {
    Color::from_rgba(rgb.r, rgb.g, rgb.b, 255)
}

pub fn draw_frame(app: &AppState, game: Option<&Game>, mouse: (f32, f32)) {
    clear_background(BLACK);
    let frame = frame_layout(screen_width(), screen_height());

    let hovered = match game {
        Some(game) if matches!(app.mode, AppMode::Playing { .. }) => {
            let grid = &game.current().grid;
            let map = MapLayout::fit(frame.map, grid.width(), grid.height());
            draw_map(game, &map);
            map.tile_under(mouse.0, mouse.1)
        }
        _ => {
            draw_menu(app, frame.map);
            None
        }
    };
    draw_hud(app, game, hovered, frame.hud);
}

fn draw_map(game: &Game, map: &MapLayout) {
    let grid = &game.current().grid;
    let font_size = map.cell * 1.2;
    for pos in grid.positions() {
        let info = tile_info(grid.tile_at(pos));
        if info.glyph == ' ' {
            continue;
        }
        let (x, y) = map.cell_origin(pos);
        let glyph = info.glyph.to_string();
        let size = measure_text(&glyph, None, font_size as u16, 1.0);
        draw_text(
            &glyph,
            x + (map.cell - size.width) / 2.0,
            y + (map.cell + size.offset_y) / 2.0,
            font_size,
            color(info.color),
        );
    }
}

fn draw_menu(app: &AppState, panel: PanelRect) {
    let lines: Vec<String> = match &app.mode {
        AppMode::SeedEntry { digits } => vec![
            "Type a seed, then press S".to_string(),
            format!("Seed: {digits}_"),
            "Backspace deletes, Esc returns to the menu".to_string(),
        ],
        _ => vec![
            "ABYSS".to_string(),
            "N  new game".to_string(),
            "L  load saved game".to_string(),
            "Q  quit".to_string(),
        ],
    };
    let mut y = panel.y + panel.height / 3.0;
    for line in &lines {
        let size = measure_text(line, None, 32, 1.0);
        draw_text(line, panel.x + (panel.width - size.width) / 2.0, y, 32.0, WHITE);
        y += 44.0;
    }
}

fn draw_hud(app: &AppState, game: Option<&Game>, hovered: Option<Pos>, panel: PanelRect) {
    draw_rectangle(panel.x, panel.y, panel.width, panel.height, Color::new(0.1, 0.1, 0.1, 1.0));

    let mut summary = match game {
        Some(game) => format!(
            "Seed {}   Hash {}   WASD move   :q save and quit",
            format_seed(game.seed()),
            format_snapshot_hash(game.snapshot_hash())
        ),
        None => "No game".to_string(),
    };
    if let Some(game) = game
        && let Some(pos) = hovered
        && game.current().grid.in_bounds(pos)
    {
        let info = tile_info(game.current().grid.tile_at(pos));
        summary.push_str(&format!("   ({}, {}) {}", pos.x, pos.y, info.description));
    }
    draw_text(&summary, panel.x + 8.0, panel.y + 24.0, HUD_FONT, LIGHTGRAY);

    if let AppMode::Playing { awaiting_quit: true } = app.mode {
        draw_text(":", panel.x + 8.0, panel.y + 52.0, HUD_FONT, WHITE);
    } else if let Some(status) = &app.status {
        draw_text(status, panel.x + 8.0, panel.y + 52.0, HUD_FONT, DARKGRAY);
    }
}
