//! Drawing and platform seams.
//!
//! The game never talks to a graphics or windowing library directly; it
//! composes frames through [`Renderer`] and pulls input and time through
//! [`Platform`].

use crate::game::geometry::{Point, Rect};
use crate::game::input::InputEvent;
use crate::game::properties::Rgb;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Center,
}

pub trait Renderer {
    fn fill(&mut self, color: Rgb);
    /// `width == 0` draws a filled disc.
    fn circle(&mut self, center: Point, radius: f64, color: Rgb, width: u32);
    /// Filled disc alpha-blended over what is already drawn.
    fn blend_circle(&mut self, center: Point, radius: f64, rgba: [u8; 4]);
    fn line(&mut self, from: Point, to: Point, color: Rgb, width: u32);
    fn rect(&mut self, rect: Rect, color: Rgb, filled: bool);
    fn text(&mut self, text: &str, size: u32, color: Rgb, anchor: Point, align: TextAlign);
    /// Alpha-blends `rgba` over the whole frame.
    fn overlay(&mut self, rgba: [u8; 4]);
}

/// Everything the frame loop needs from the host besides drawing.
pub trait Platform: Renderer {
    fn poll_events(&mut self) -> Vec<InputEvent>;
    /// Monotonic milliseconds.
    fn now_ms(&self) -> u64;
    fn mouse_pos(&self) -> Point;
    fn present(&mut self);
    fn sleep_ms(&mut self, ms: u64);
}

#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    Fill(Rgb),
    Circle {
        center: Point,
        radius: f64,
        color: Rgb,
        width: u32,
    },
    BlendCircle {
        center: Point,
        radius: f64,
        rgba: [u8; 4],
    },
    Line {
        from: Point,
        to: Point,
        color: Rgb,
        width: u32,
    },
    Rect {
        rect: Rect,
        color: Rgb,
        filled: bool,
    },
    Text {
        text: String,
        size: u32,
        color: Rgb,
        anchor: Point,
        align: TextAlign,
    },
    Overlay([u8; 4]),
}

/// Renderer that records commands instead of drawing them.
#[derive(Clone, Debug, Default)]
pub struct DrawList {
    pub commands: Vec<DrawCommand>,
}

impl DrawList {
    pub fn clear(&mut self) {
        self.commands.clear();
    }

    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    pub fn has_text(&self, needle: &str) -> bool {
        self.texts().any(|t| t == needle)
    }

    pub fn overlays(&self) -> impl Iterator<Item = [u8; 4]> + '_ {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Overlay(rgba) => Some(*rgba),
            _ => None,
        })
    }
}

impl Renderer for DrawList {
    fn fill(&mut self, color: Rgb) {
        self.commands.push(DrawCommand::Fill(color));
    }

    fn circle(&mut self, center: Point, radius: f64, color: Rgb, width: u32) {
        self.commands.push(DrawCommand::Circle {
            center,
            radius,
            color,
            width,
        });
    }

    fn blend_circle(&mut self, center: Point, radius: f64, rgba: [u8; 4]) {
        self.commands.push(DrawCommand::BlendCircle {
            center,
            radius,
            rgba,
        });
    }

    fn line(&mut self, from: Point, to: Point, color: Rgb, width: u32) {
        self.commands.push(DrawCommand::Line {
            from,
            to,
            color,
            width,
        });
    }

    fn rect(&mut self, rect: Rect, color: Rgb, filled: bool) {
        self.commands.push(DrawCommand::Rect {
            rect,
            color,
            filled,
        });
    }

    fn text(&mut self, text: &str, size: u32, color: Rgb, anchor: Point, align: TextAlign) {
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            size,
            color,
            anchor,
            align,
        });
    }

    fn overlay(&mut self, rgba: [u8; 4]) {
        self.commands.push(DrawCommand::Overlay(rgba));
    }
}
