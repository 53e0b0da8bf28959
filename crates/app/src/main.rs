mod frame_input;
mod render;

use std::env;
use std::process;

use abyss_core::{Driver, GameConfig, SaveFile};
use app::app_loop::AppState;
use app::save_path::resolve_save_path;
use app::seed::{fallback_seed_from_args, generate_runtime_seed};
use app::{APP_NAME, format_seed};
use frame_input::capture_frame_input;
use macroquad::prelude::{Conf, next_frame};

fn window_conf() -> Conf {
    Conf {
        window_title: APP_NAME.to_string(),
        window_width: 1280,
        window_height: 640,
        ..Default::default()
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    let args: Vec<String> = env::args().collect();
    let fallback = match fallback_seed_from_args(&args, generate_runtime_seed()) {
        Ok(fallback) => fallback,
        Err(message) => {
            eprintln!("{message}");
            process::exit(2);
        }
    };
    let save_path = resolve_save_path();
    eprintln!(
        "save file: {}, fallback seed: {}",
        save_path.display(),
        format_seed(fallback.value())
    );

    let mut driver = match Driver::new(GameConfig::default(), SaveFile::new(&save_path)) {
        Ok(driver) => driver.with_fallback_seed(fallback.value()),
        Err(err) => {
            eprintln!("invalid generation settings: {err}");
            process::exit(2);
        }
    };
    let mut app = AppState::new();

    while !app.has_quit() {
        let input = capture_frame_input();
        app.tick(&mut driver, &input.keys_pressed);
        render::draw_frame(&app, driver.game(), input.mouse);
        next_frame().await;
    }
}
