//! Screen layout, hit testing and per-scene drawing.

use crate::game::geometry::{circle_contains, Point, Rect};
use crate::game::menu::Menu;
use crate::game::planet::Planet;
use crate::game::properties::{Rgb, BLACK, GRAY, LIGHT_BLUE, ORBIT_GRAY, WHITE, YELLOW};
use crate::game::render::{Renderer, TextAlign};
use crate::game::system::StarSystem;
use crate::game::{Game, Scene};

pub const PANEL_WIDTH: f64 = 300.0;
const PANEL_BG: Rgb = [20, 20, 30];
const PANEL_PADDING: f64 = 20.0;
const LINE_HEIGHT: f64 = 28.0;
const MENU_DIM: [u8; 4] = [0, 0, 0, 160];
const DETAIL_PLANET_SCALE: f64 = 4.0;
const RESOURCE_BAR_WIDTH: f64 = 200.0;

/// Splits the screen into the map area and the right-hand info panel.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewLayout {
    pub width: f64,
    pub height: f64,
}

impl ViewLayout {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn galaxy_rect(&self) -> Rect {
        Rect::new(0.0, 0.0, (self.width - PANEL_WIDTH).max(0.0), self.height)
    }

    pub fn panel_rect(&self) -> Rect {
        let area = self.galaxy_rect();
        Rect::new(area.right(), 0.0, self.width - area.right(), self.height)
    }

    /// Star position in system view, centred on the map area.
    pub fn system_center(&self) -> Point {
        let area = self.galaxy_rect();
        Point::new((area.width / 2.0).floor(), (self.height / 2.0).floor())
    }
}

/// First item under `pos`, only considered while `pos` lies inside `area`.
pub fn find_hovered<T>(
    pos: Point,
    area: Rect,
    items: &[T],
    hit: impl Fn(&T, Point) -> bool,
) -> Option<usize> {
    if !area.contains(pos) {
        return None;
    }
    items.iter().position(|item| hit(item, pos))
}

/// Cheap bounding-box test first, exact circle second.
pub fn system_hit(system: &StarSystem, pos: Point) -> bool {
    system.contains_point(pos) && system.circle_contains(pos)
}

pub fn planet_hit(planet: &Planet, pos: Point) -> bool {
    match planet.position {
        Some(center) => {
            let radius = planet.size as f64;
            Rect::around(center, radius).contains(pos) && circle_contains(center, radius, pos)
        }
        None => false,
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct PanelLine {
    pub text: String,
    pub size: u32,
    pub color: Rgb,
}

impl PanelLine {
    fn title(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            size: 32,
            color: YELLOW,
        }
    }

    fn body(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            size: 22,
            color: WHITE,
        }
    }

    fn dim(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            size: 20,
            color: GRAY,
        }
    }
}

pub fn galaxy_panel(systems: &[StarSystem], hovered: Option<&StarSystem>) -> Vec<PanelLine> {
    let mut lines = vec![
        PanelLine::title("Galaxy"),
        PanelLine::body(format!("Star systems: {}", systems.len())),
    ];
    match hovered {
        Some(system) => {
            lines.push(PanelLine::title(system.name.clone()));
            lines.push(PanelLine::body(format!("Star: {}", system.star_type)));
            lines.push(PanelLine::body(format!("Size: {}", system.size)));
            lines.push(PanelLine::body(format!("Planets: {}", system.planets.len())));
        }
        None => lines.push(PanelLine::dim("Hover over a system for details")),
    }
    lines
}

pub fn system_panel(system: &StarSystem, hovered: Option<&Planet>) -> Vec<PanelLine> {
    let mut lines = vec![
        PanelLine::title(system.name.clone()),
        PanelLine::body(format!("Star type: {}", system.star_type)),
        PanelLine::body(format!("Star size: {}", system.size)),
        PanelLine::body(format!("Planets: {}", system.planets.len())),
    ];
    for planet in &system.planets {
        let line = format!("{} ({})", planet.name, planet.kind);
        if hovered.map_or(false, |h| h.name == planet.name) {
            lines.push(PanelLine {
                text: line,
                size: 22,
                color: YELLOW,
            });
        } else {
            lines.push(PanelLine::dim(line));
        }
    }
    lines.push(PanelLine::dim("Esc or right click for menu"));
    lines
}

pub fn planet_panel(planet: &Planet) -> Vec<PanelLine> {
    let mut lines = vec![
        PanelLine::title(planet.name.clone()),
        PanelLine::body(format!("Type: {}", planet.kind)),
        PanelLine::body(format!("Size: {}", planet.size)),
        PanelLine::body(format!("Orbit: {}", planet.orbit_number)),
        PanelLine::title("Resources"),
    ];
    if planet.resources.is_empty() {
        lines.push(PanelLine::dim("None"));
    }
    for (kind, amount) in &planet.resources {
        lines.push(PanelLine::body(format!("{}: {}", kind, amount)));
    }
    lines
}

fn draw_panel(r: &mut dyn Renderer, layout: &ViewLayout, lines: &[PanelLine]) {
    let panel = layout.panel_rect();
    r.rect(panel, PANEL_BG, true);
    r.line(
        Point::new(panel.x, 0.0),
        Point::new(panel.x, panel.bottom()),
        GRAY,
        1,
    );
    let mut y = PANEL_PADDING;
    for line in lines {
        r.text(
            &line.text,
            line.size,
            line.color,
            Point::new(panel.x + PANEL_PADDING, y),
            TextAlign::Left,
        );
        y += LINE_HEIGHT;
    }
}

fn draw_menu(r: &mut dyn Renderer, menu: &Menu, screen_width: f64, dimmed: bool) {
    if dimmed {
        r.overlay(MENU_DIM);
    }
    r.rect(menu.panel_rect(screen_width), PANEL_BG, true);
    r.text(
        menu.title,
        48,
        WHITE,
        Point::new(screen_width / 2.0, 100.0),
        TextAlign::Center,
    );
    for (i, item) in menu.items.iter().enumerate() {
        let rect = menu.item_rect(i, screen_width);
        let color = if !item.enabled {
            GRAY
        } else if i == menu.selected {
            YELLOW
        } else {
            WHITE
        };
        r.text(
            item.label,
            36,
            color,
            Point::new(rect.x + rect.width / 2.0, rect.y + rect.height / 2.0),
            TextAlign::Center,
        );
    }
}

impl Game {
    pub(crate) fn draw(&self, r: &mut dyn Renderer, fade: Option<u8>) {
        r.fill(BLACK);
        self.draw_stars(r);

        match self.scene {
            Scene::StartupMenu => draw_menu(r, &self.startup_menu, self.layout.width, false),
            Scene::Galaxy => self.draw_galaxy(r),
            Scene::System => self.draw_system(r),
            Scene::Planet => self.draw_planet(r),
        }

        if self.menu_open {
            if let Some(menu) = self.active_menu() {
                draw_menu(r, menu, self.layout.width, true);
            }
        }

        if let Some(kind) = self.notifications.active(self.now_ms) {
            r.text(
                kind.text(),
                36,
                WHITE,
                Point::new(self.layout.width / 2.0, 50.0),
                TextAlign::Center,
            );
        }

        if let Some(alpha) = fade {
            r.overlay([0, 0, 0, alpha]);
        }

        for (i, line) in self.debug.lines().iter().enumerate() {
            r.text(
                line,
                18,
                GRAY,
                Point::new(10.0, self.layout.height - 20.0 * (i as f64 + 1.0)),
                TextAlign::Left,
            );
        }
    }

    fn draw_stars(&self, r: &mut dyn Renderer) {
        if self.scene == Scene::Galaxy {
            for nebula in &self.background.nebulae {
                for particle in &nebula.particles {
                    r.blend_circle(particle.pos, particle.size as f64, nebula.color);
                }
            }
        }
        for star in &self.background.stars {
            let level = star.brightness_at(self.now_ms);
            r.circle(star.pos, star.size as f64, [level, level, level], 0);
        }
    }

    fn draw_galaxy(&self, r: &mut dyn Renderer) {
        for (i, system) in self.galaxy.systems.iter().enumerate() {
            r.circle(system.center(), system.size as f64, system.color, 0);
            if self.hovered_system == Some(i) || self.selected_system == Some(i) {
                r.circle(system.center(), system.size as f64 + 4.0, WHITE, 1);
            }
            r.text(
                &system.name,
                18,
                LIGHT_BLUE,
                Point::new(system.x as f64, system.y as f64 + system.size as f64 + 12.0),
                TextAlign::Center,
            );
        }
        let lines = galaxy_panel(&self.galaxy.systems, self.hovered_system());
        draw_panel(r, &self.layout, &lines);
    }

    fn draw_system(&self, r: &mut dyn Renderer) {
        let Some(system) = self.selected_system() else {
            return;
        };
        let center = self.layout.system_center();
        r.circle(center, system.size as f64, system.color, 0);
        for (i, planet) in system.planets.iter().enumerate() {
            r.circle(center, planet.orbit_radius(), ORBIT_GRAY, 1);
            let Some(pos) = planet.position else {
                continue;
            };
            r.circle(pos, planet.size as f64, planet.color(), 0);
            if self.hovered_planet == Some(i) {
                r.circle(pos, planet.size as f64 + 4.0, WHITE, 1);
            }
        }
        let lines = system_panel(system, self.hovered_planet());
        draw_panel(r, &self.layout, &lines);
    }

    fn draw_planet(&self, r: &mut dyn Renderer) {
        let Some(planet) = self.selected_planet() else {
            return;
        };
        let center = self.layout.system_center();
        r.circle(center, planet.size as f64 * DETAIL_PLANET_SCALE, planet.color(), 0);
        r.text(
            &planet.name,
            48,
            WHITE,
            Point::new(center.x, 60.0),
            TextAlign::Center,
        );

        let left = center.x - RESOURCE_BAR_WIDTH / 2.0;
        let mut y = self.layout.height - 40.0 * (planet.resources.len() as f64 + 1.0);
        for (kind, amount) in &planet.resources {
            r.text(kind.label(), 20, WHITE, Point::new(left, y), TextAlign::Left);
            let fill = RESOURCE_BAR_WIDTH * (*amount as f64 / 100.0);
            r.rect(Rect::new(left, y + 20.0, RESOURCE_BAR_WIDTH, 10.0), GRAY, false);
            r.rect(Rect::new(left, y + 20.0, fill, 10.0), planet.color(), true);
            y += 40.0;
        }

        let lines = planet_panel(planet);
        draw_panel(r, &self.layout, &lines);
    }
}
