//! Test suite for the Web and headless browsers.

#![cfg(target_arch = "wasm32")]

extern crate wasm_bindgen_test;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

#[wasm_bindgen_test]
fn new_game_through_exports() {
    assert_eq!(galaxy_conquest::init_game(11, 1200, 800), "STARTUP_MENU");
    assert_eq!(galaxy_conquest::key_down("Enter"), "GALAXY");
    assert_eq!(galaxy_conquest::mouse_down(10.0, 10.0, 2), "GALAXY_MENU");
    assert_eq!(galaxy_conquest::current_state(), "GALAXY_MENU");

    let save = galaxy_conquest::export_save();
    assert_eq!(galaxy_conquest::import_save(&save), "GALAXY");
}
