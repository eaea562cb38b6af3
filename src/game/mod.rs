pub mod background;
pub mod config;
pub mod enums;
pub mod error;
pub mod geometry;
pub mod input;
pub mod menu;
pub mod naming;
pub mod overlay;
pub mod persistence;
pub mod planet;
pub mod properties;
pub mod render;
pub mod system;
pub mod views;

use background::Background;
use config::GameConfig;
use enums::GameState;
use error::SaveError;
use geometry::{Point, Rect};
use input::{InputEvent, Key, MouseButton};
use log::{debug, error, info, warn};
use menu::{Menu, MenuAction};
use overlay::{DebugOverlay, Fade, NotificationKind, Notifications};
use persistence::{timestamp_now, LoadedGame, SaveFile, SaveStore};
use planet::{layout_planets, Planet};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use render::{Platform, Renderer};
use std::path::PathBuf;
use system::{Galaxy, GalaxyConfig, GalaxyGenerator, StarSystem};
use views::ViewLayout;

pub const GALAXY_MARGIN: i32 = 100;
pub const PLACEMENT_ATTEMPTS: usize = 1000;

/// Base gameplay scene. Pause menus are an overlay on top of one of these.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Scene {
    StartupMenu,
    Galaxy,
    System,
    Planet,
}

pub struct Game {
    config: GameConfig,
    rng: ChaCha8Rng,
    store: SaveStore,
    layout: ViewLayout,
    scene: Scene,
    menu_open: bool,
    startup_menu: Menu,
    galaxy_menu: Menu,
    system_menu: Menu,
    galaxy: Galaxy,
    selected_system: Option<usize>,
    selected_planet: Option<usize>,
    hovered_system: Option<usize>,
    hovered_planet: Option<usize>,
    background: Background,
    notifications: Notifications,
    fade: Fade,
    debug: DebugOverlay,
    now_ms: u64,
    running: bool,
}

impl Game {
    pub fn new(seed: u64, config: GameConfig, store: SaveStore) -> Self {
        info!("Initializing game (seed {})", seed);
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let layout = ViewLayout::new(config.screen_width as f64, config.screen_height as f64);
        let background = Background::generate(
            &mut rng,
            config.screen_width,
            config.screen_height,
            config.num_background_stars,
            config.num_nebulae,
        );
        let startup_menu = Menu::startup(store.exists());

        Self {
            debug: DebugOverlay::new(config.debug_enabled),
            config,
            rng,
            store,
            layout,
            scene: Scene::StartupMenu,
            menu_open: false,
            startup_menu,
            galaxy_menu: Menu::galaxy_pause(),
            system_menu: Menu::system_pause(),
            galaxy: Galaxy::default(),
            selected_system: None,
            selected_planet: None,
            hovered_system: None,
            hovered_planet: None,
            background,
            notifications: Notifications::default(),
            fade: Fade::default(),
            now_ms: 0,
            running: true,
        }
    }

    pub fn state(&self) -> GameState {
        match (self.scene, self.menu_open) {
            (Scene::StartupMenu, _) => GameState::StartupMenu,
            (Scene::Galaxy, false) => GameState::Galaxy,
            (Scene::Galaxy, true) => GameState::GalaxyMenu,
            (Scene::System, false) => GameState::System,
            (Scene::System, true) => GameState::SystemMenu,
            (Scene::Planet, _) => GameState::Planet,
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn store(&self) -> &SaveStore {
        &self.store
    }

    pub fn galaxy(&self) -> &Galaxy {
        &self.galaxy
    }

    pub fn systems(&self) -> &[StarSystem] {
        &self.galaxy.systems
    }

    pub fn selected_system(&self) -> Option<&StarSystem> {
        self.selected_system.and_then(|i| self.galaxy.systems.get(i))
    }

    pub fn selected_planet(&self) -> Option<&Planet> {
        let system = self.selected_system()?;
        self.selected_planet.and_then(|i| system.planets.get(i))
    }

    pub fn hovered_system(&self) -> Option<&StarSystem> {
        self.hovered_system.and_then(|i| self.galaxy.systems.get(i))
    }

    pub fn hovered_planet(&self) -> Option<&Planet> {
        let system = self.selected_system()?;
        self.hovered_planet.and_then(|i| system.planets.get(i))
    }

    pub fn debug_overlay(&self) -> &DebugOverlay {
        &self.debug
    }

    pub fn active_notification(&self) -> Option<NotificationKind> {
        self.notifications.active(self.now_ms)
    }

    /// Menu receiving input in the current state, if any.
    pub fn active_menu(&self) -> Option<&Menu> {
        match self.state() {
            GameState::StartupMenu => Some(&self.startup_menu),
            GameState::GalaxyMenu => Some(&self.galaxy_menu),
            GameState::SystemMenu => Some(&self.system_menu),
            _ => None,
        }
    }

    fn active_menu_mut(&mut self) -> Option<&mut Menu> {
        match self.state() {
            GameState::StartupMenu => Some(&mut self.startup_menu),
            GameState::GalaxyMenu => Some(&mut self.galaxy_menu),
            GameState::SystemMenu => Some(&mut self.system_menu),
            _ => None,
        }
    }

    pub fn new_game(&mut self) {
        info!("Starting new game");
        let config = GalaxyConfig {
            systems: self.config.num_star_systems,
            area: self.layout.galaxy_rect(),
            margin: GALAXY_MARGIN,
            max_attempts: PLACEMENT_ATTEMPTS,
        };
        self.galaxy = GalaxyGenerator::with_config(&mut self.rng, config).generate();
        self.regenerate_background();
        self.selected_system = None;
        self.selected_planet = None;
        self.set_scene(Scene::Galaxy);
    }

    fn regenerate_background(&mut self) {
        self.background = Background::generate(
            &mut self.rng,
            self.config.screen_width,
            self.config.screen_height,
            self.config.num_background_stars,
            self.config.num_nebulae,
        );
    }

    pub fn save_snapshot(&self) -> SaveFile {
        SaveFile::capture(
            &self.galaxy.systems,
            self.selected_system(),
            timestamp_now(),
        )
    }

    /// Writes the save file and raises the matching banner either way.
    pub fn save_game(&mut self) -> Result<PathBuf, SaveError> {
        info!("Saving game state");
        let result = self.store.save(&self.save_snapshot());
        match &result {
            Ok(_) => self.notifications.show(NotificationKind::Saved, self.now_ms),
            Err(e) => {
                error!("Failed to save game: {}", e);
                self.notifications
                    .show(NotificationKind::SaveFailed, self.now_ms);
            }
        }
        result
    }

    /// Loads the save file; on any failure the current game is left as it was.
    pub fn load_game(&mut self) -> bool {
        info!("Loading game state from {}", self.store.path().display());
        let loaded = self
            .store
            .load()
            .and_then(|save| save.restore(&mut self.rng));
        self.apply_loaded(loaded)
    }

    /// Same as [`Game::load_game`] but from save-file JSON already in memory.
    pub fn import_save(&mut self, json: &str) -> bool {
        let loaded = SaveFile::from_json(json).and_then(|save| save.restore(&mut self.rng));
        self.apply_loaded(loaded)
    }

    fn apply_loaded(&mut self, loaded: Result<LoadedGame, SaveError>) -> bool {
        match loaded {
            Ok(loaded) => {
                info!("Loaded {} star systems", loaded.systems.len());
                self.galaxy = Galaxy {
                    systems: loaded.systems,
                    attempts: 0,
                };
                self.selected_system = loaded.selected_system;
                self.selected_planet = None;
                self.regenerate_background();
                self.set_scene(Scene::Galaxy);
                true
            }
            Err(e) => {
                warn!("Error loading save file: {}", e);
                false
            }
        }
    }

    fn set_scene(&mut self, scene: Scene) {
        debug!("Transitioning from {:?} to {:?}", self.scene, scene);
        if scene != self.scene {
            self.fade.start(self.now_ms);
        }
        self.scene = scene;
        self.menu_open = false;
        self.hovered_system = None;
        self.hovered_planet = None;
        match scene {
            Scene::StartupMenu => {
                self.selected_system = None;
                self.selected_planet = None;
                self.startup_menu = Menu::startup(self.store.exists());
            }
            Scene::Galaxy | Scene::System => self.selected_planet = None,
            Scene::Planet => {}
        }
    }

    fn open_menu(&mut self) {
        if !matches!(self.scene, Scene::Galaxy | Scene::System) {
            return;
        }
        info!("Opening in-game menu");
        self.menu_open = true;
        self.hovered_system = None;
        self.hovered_planet = None;
        if let Some(menu) = self.active_menu_mut() {
            menu.reset_selection();
        }
    }

    fn close_menu(&mut self) {
        debug!("Returning to game");
        self.menu_open = false;
    }

    pub fn handle_event(&mut self, event: InputEvent) {
        match event {
            InputEvent::Quit => {
                info!("Quit requested");
                self.running = false;
            }
            InputEvent::KeyDown(key) => self.handle_key(key),
            InputEvent::MouseDown { button, pos } => self.handle_mouse_down(button, pos),
            InputEvent::MouseMove(pos) => {
                let width = self.layout.width;
                if let Some(menu) = self.active_menu_mut() {
                    menu.handle_mouse_move(pos, width);
                }
            }
        }
    }

    fn handle_key(&mut self, key: Key) {
        let state = self.state();
        match key {
            Key::F5 if !state.is_menu() => {
                // Failures are surfaced through the banner.
                let _ = self.save_game();
                return;
            }
            Key::F4 => {
                self.debug.toggle();
                return;
            }
            _ => {}
        }

        if let Some(menu) = self.active_menu_mut() {
            if let Some(action) = menu.handle_key(key) {
                self.perform(action);
            }
            return;
        }

        match (self.scene, key) {
            (Scene::Galaxy | Scene::System, Key::Escape) => self.open_menu(),
            (Scene::Planet, Key::Escape) => {
                info!("Leaving planet view");
                self.set_scene(Scene::System);
            }
            _ => debug!("Unhandled key {:?} in {:?}", key, state),
        }
    }

    fn handle_mouse_down(&mut self, button: MouseButton, pos: Point) {
        let width = self.layout.width;
        if let Some(menu) = self.active_menu_mut() {
            if button == MouseButton::Left {
                if let Some(action) = menu.handle_click(pos, width) {
                    self.perform(action);
                }
            }
            return;
        }

        let area = self.layout.galaxy_rect();
        match (self.scene, button) {
            (Scene::Galaxy, MouseButton::Left) => {
                if !area.contains(pos) {
                    debug!("Click outside galaxy view area");
                    return;
                }
                if let Some(index) = views::find_hovered(pos, area, &self.galaxy.systems, views::system_hit) {
                    info!("Selected star system: {}", self.galaxy.systems[index].name);
                    self.selected_system = Some(index);
                    self.set_scene(Scene::System);
                }
            }
            (Scene::Galaxy, MouseButton::Right) => {
                if area.contains(pos) {
                    self.open_menu();
                }
            }
            (Scene::System, MouseButton::Left) => {
                self.ensure_layout();
                let Some(system) = self.selected_system() else {
                    return;
                };
                if let Some(index) = views::find_hovered(pos, area, &system.planets, views::planet_hit) {
                    info!("Selected planet: {}", system.planets[index].name);
                    self.set_scene(Scene::Planet);
                    self.selected_planet = Some(index);
                }
            }
            (Scene::System, MouseButton::Right) => self.open_menu(),
            (Scene::Planet, MouseButton::Left) => {
                if area.contains(pos) {
                    self.set_scene(Scene::System);
                } else {
                    debug!("Click in info panel area, ignoring");
                }
            }
            (Scene::Planet, MouseButton::Right) => self.set_scene(Scene::System),
            _ => {}
        }
    }

    fn perform(&mut self, action: MenuAction) {
        debug!("Menu action {:?}", action);
        match action {
            MenuAction::NewGame => self.new_game(),
            MenuAction::LoadGame => {
                if !self.load_game() {
                    warn!("Failed to load game");
                }
            }
            MenuAction::Save => {
                let _ = self.save_game();
                self.close_menu();
            }
            MenuAction::Resume => self.close_menu(),
            MenuAction::MainMenu => {
                info!("Quitting to main menu");
                self.set_scene(Scene::StartupMenu);
            }
            MenuAction::Quit => {
                info!("Quitting game");
                self.running = false;
            }
        }
    }

    /// Caches planet screen positions for the selected system.
    fn ensure_layout(&mut self) {
        let center = self.layout.system_center();
        if let Some(system) = self
            .selected_system
            .and_then(|i| self.galaxy.systems.get_mut(i))
        {
            layout_planets(&mut system.planets, center);
        }
    }

    /// Per-frame update: clock, hover state and debug lines.
    pub fn update(&mut self, now_ms: u64, mouse: Point) {
        self.now_ms = now_ms;
        self.debug.clear();
        self.hovered_system = None;
        self.hovered_planet = None;

        let area = self.layout.galaxy_rect();
        match self.state() {
            GameState::Galaxy => {
                self.hovered_system =
                    views::find_hovered(mouse, area, &self.galaxy.systems, views::system_hit);
                let hovering = self
                    .hovered_system()
                    .map(|s| format!("Hovering: {} at {}, {}", s.name, s.x, s.y));
                if let Some(line) = hovering {
                    self.debug.add(line);
                }
                self.debug.add(format!("Systems: {}", self.galaxy.systems.len()));
            }
            GameState::System => {
                self.ensure_layout();
                self.hovered_planet = self.selected_system().and_then(|system| {
                    views::find_hovered(mouse, area, &system.planets, views::planet_hit)
                });
                let hovering = self
                    .hovered_planet()
                    .map(|p| format!("Hovering: {}", p.name));
                if let Some(line) = hovering {
                    self.debug.add(line);
                }
            }
            _ => {}
        }
        self.debug
            .add(format!("Mouse: ({:.0}, {:.0})", mouse.x, mouse.y));
    }

    pub fn render(&mut self, r: &mut dyn Renderer) {
        if self.scene == Scene::System {
            self.ensure_layout();
        }
        let fade = self.fade.alpha(self.now_ms);
        self.draw(r, fade);
    }

    /// Drives the frame loop until a quit is requested.
    pub fn run<P: Platform>(&mut self, platform: &mut P) {
        info!("Starting game loop");
        let frame_ms = self.config.frame_millis();
        while self.running {
            let frame_start = platform.now_ms();
            self.now_ms = frame_start;
            for event in platform.poll_events() {
                self.handle_event(event);
            }
            self.update(platform.now_ms(), platform.mouse_pos());
            self.render(platform);
            platform.present();

            let elapsed = platform.now_ms().saturating_sub(frame_start);
            if elapsed < frame_ms {
                platform.sleep_ms(frame_ms - elapsed);
            }
        }
        info!("Game loop finished");
    }

    pub fn galaxy_rect(&self) -> Rect {
        self.layout.galaxy_rect()
    }
}
