use std::cell::RefCell;
use wasm_bindgen::prelude::*;

pub mod game;
use game::config::{ConfigOverrides, GameConfig};
use game::geometry::Point;
use game::input::{InputEvent, Key, MouseButton};
use game::persistence::SaveStore;
use game::system::galaxy_json as render_galaxy_json;
use game::Game;

thread_local! {
    static GAME: RefCell<Option<Game>> = RefCell::new(None);
}

fn with_game_mut<R>(f: impl FnOnce(&mut Game) -> R) -> Result<R, &'static str> {
    GAME.with(|cell| {
        let mut opt = cell.borrow_mut();
        match opt.as_mut() {
            Some(game) => Ok(f(game)),
            None => Err("game not initialized"),
        }
    })
}

fn or_message(result: Result<String, &'static str>) -> String {
    match result {
        Ok(v) => v,
        Err(e) => e.to_string(),
    }
}

#[cfg(target_arch = "wasm32")]
mod console {
    use log::{LevelFilter, Log, Metadata, Record};
    use wasm_bindgen::JsValue;

    struct ConsoleLogger;

    impl Log for ConsoleLogger {
        fn enabled(&self, _: &Metadata) -> bool {
            true
        }

        fn log(&self, record: &Record) {
            let line = JsValue::from_str(&format!("[{}] {}", record.level(), record.args()));
            match record.level() {
                log::Level::Error => web_sys::console::error_1(&line),
                log::Level::Warn => web_sys::console::warn_1(&line),
                _ => web_sys::console::log_1(&line),
            }
        }

        fn flush(&self) {}
    }

    static LOGGER: ConsoleLogger = ConsoleLogger;

    pub fn init(level: LevelFilter) {
        #[cfg(feature = "console_error_panic_hook")]
        console_error_panic_hook::set_once();
        // A second init keeps the first logger.
        if log::set_logger(&LOGGER).is_ok() {
            log::set_max_level(level);
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn init_logging(config: &GameConfig) {
    if let Ok(level) = config.level_filter() {
        console::init(level);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn init_logging(_: &GameConfig) {}

#[wasm_bindgen]
pub fn init_game(seed: u64, width: u32, height: u32) -> String {
    let mut config = GameConfig::default();
    config.apply(&ConfigOverrides {
        screen_width: Some(width),
        screen_height: Some(height),
        ..ConfigOverrides::default()
    });
    if let Err(e) = config.validate() {
        return e.to_string();
    }

    init_logging(&config);
    let game = Game::new(seed, config, SaveStore::default());
    let state = game.state().name().to_string();
    GAME.with(|g| {
        *g.borrow_mut() = Some(game);
    });
    state
}

/// Feeds a DOM `KeyboardEvent.key` value; returns the resulting state.
#[wasm_bindgen]
pub fn key_down(key: &str) -> String {
    or_message(with_game_mut(|game| {
        game.handle_event(InputEvent::KeyDown(Key::from_name(key)));
        game.state().name().to_string()
    }))
}

/// `button` uses DOM numbering (0 left, 1 middle, 2 right).
#[wasm_bindgen]
pub fn mouse_down(x: f64, y: f64, button: i16) -> String {
    let Some(button) = MouseButton::from_dom(button) else {
        return "unsupported mouse button".to_string();
    };
    or_message(with_game_mut(|game| {
        game.handle_event(InputEvent::MouseDown {
            button,
            pos: Point::new(x, y),
        });
        game.state().name().to_string()
    }))
}

#[wasm_bindgen]
pub fn mouse_move(x: f64, y: f64) -> String {
    or_message(with_game_mut(|game| {
        let pos = Point::new(x, y);
        game.handle_event(InputEvent::MouseMove(pos));
        game.update(0, pos);
        game.state().name().to_string()
    }))
}

#[wasm_bindgen]
pub fn current_state() -> String {
    or_message(with_game_mut(|game| game.state().name().to_string()))
}

#[wasm_bindgen]
pub fn galaxy_json() -> String {
    or_message(with_game_mut(|game| render_galaxy_json(game.galaxy())))
}

#[wasm_bindgen]
pub fn export_save() -> String {
    or_message(with_game_mut(|game| {
        game.save_snapshot()
            .to_json()
            .unwrap_or_else(|e| e.to_string())
    }))
}

/// Returns the new state name; a rejected save leaves the game unchanged.
#[wasm_bindgen]
pub fn import_save(json: &str) -> String {
    or_message(with_game_mut(|game| {
        if !game.import_save(json) {
            return "invalid save".to_string();
        }
        game.state().name().to_string()
    }))
}
