use crate::game::geometry::{Point, Rect};
use crate::game::input::Key;

pub const MENU_WIDTH: f64 = 400.0;
pub const MENU_TOP: f64 = 50.0;
pub const ITEM_WIDTH: f64 = 200.0;
pub const ITEM_SPACING: f64 = 60.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MenuAction {
    NewGame,
    LoadGame,
    Save,
    Resume,
    MainMenu,
    Quit,
}

#[derive(Clone, Debug, PartialEq)]
pub struct MenuItem {
    pub label: &'static str,
    pub action: MenuAction,
    pub enabled: bool,
}

impl MenuItem {
    fn new(label: &'static str, action: MenuAction) -> Self {
        Self {
            label,
            action,
            enabled: true,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Menu {
    pub title: &'static str,
    pub items: Vec<MenuItem>,
    pub selected: usize,
}

impl Menu {
    pub fn startup(has_save: bool) -> Self {
        let mut menu = Self::new(
            "Galaxy Conquest",
            vec![
                MenuItem::new("New Game", MenuAction::NewGame),
                MenuItem::new("Load Game", MenuAction::LoadGame),
                MenuItem::new("Exit", MenuAction::Quit),
            ],
        );
        menu.set_enabled(MenuAction::LoadGame, has_save);
        menu
    }

    pub fn galaxy_pause() -> Self {
        Self::new(
            "Pause",
            vec![
                MenuItem::new("New Game", MenuAction::NewGame),
                MenuItem::new("Save", MenuAction::Save),
                MenuItem::new("Resume Game", MenuAction::Resume),
                MenuItem::new("Main Menu", MenuAction::MainMenu),
                MenuItem::new("Quit to Desktop", MenuAction::Quit),
            ],
        )
    }

    pub fn system_pause() -> Self {
        Self::new(
            "Pause",
            vec![
                MenuItem::new("Save", MenuAction::Save),
                MenuItem::new("Resume", MenuAction::Resume),
                MenuItem::new("Main Menu", MenuAction::MainMenu),
                MenuItem::new("Quit to Desktop", MenuAction::Quit),
            ],
        )
    }

    fn new(title: &'static str, items: Vec<MenuItem>) -> Self {
        Self {
            title,
            items,
            selected: 0,
        }
    }

    pub fn set_enabled(&mut self, action: MenuAction, enabled: bool) {
        for item in self.items.iter_mut().filter(|i| i.action == action) {
            item.enabled = enabled;
        }
    }

    pub fn reset_selection(&mut self) {
        self.selected = 0;
    }

    /// Background panel behind the items, centred horizontally.
    pub fn panel_rect(&self, screen_width: f64) -> Rect {
        let height = self.items.len() as f64 * ITEM_SPACING + 150.0;
        Rect::new((screen_width - MENU_WIDTH) / 2.0, MENU_TOP, MENU_WIDTH, height)
    }

    pub fn item_rect(&self, index: usize, screen_width: f64) -> Rect {
        Rect::new(
            screen_width / 2.0 - ITEM_WIDTH / 2.0,
            MENU_TOP + 100.0 + index as f64 * ITEM_SPACING,
            ITEM_WIDTH,
            ITEM_SPACING,
        )
    }

    fn item_at(&self, pos: Point, screen_width: f64) -> Option<usize> {
        (0..self.items.len()).find(|i| self.item_rect(*i, screen_width).contains(pos))
    }

    /// Up and Down wrap around; Enter activates the selected item if enabled.
    pub fn handle_key(&mut self, key: Key) -> Option<MenuAction> {
        let count = self.items.len();
        if count == 0 {
            return None;
        }
        match key {
            Key::Up => {
                self.selected = (self.selected + count - 1) % count;
                None
            }
            Key::Down => {
                self.selected = (self.selected + 1) % count;
                None
            }
            Key::Enter => {
                let item = &self.items[self.selected];
                item.enabled.then_some(item.action)
            }
            _ => None,
        }
    }

    pub fn handle_mouse_move(&mut self, pos: Point, screen_width: f64) {
        if let Some(index) = self.item_at(pos, screen_width) {
            self.selected = index;
        }
    }

    pub fn handle_click(&mut self, pos: Point, screen_width: f64) -> Option<MenuAction> {
        let index = self.item_at(pos, screen_width)?;
        let item = &self.items[index];
        if !item.enabled {
            return None;
        }
        self.selected = index;
        Some(item.action)
    }
}
