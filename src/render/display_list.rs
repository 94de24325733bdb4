//! Backend-agnostic draw commands.
//!
//! Layers record what they want drawn into a [`DisplayList`]; backends replay
//! the lists in paint order. A list is either in world space (moves with the
//! grid) or screen space (fixed to the canvas). Stroke widths and dash
//! lengths are always screen pixels so lines stay crisp at every zoom.

use crate::layout::ViewportTransform;
use crate::types::{Rect, SpecialSprite};

use super::colors::Rgb;

/// Coordinate space a display list is recorded in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Space {
    World,
    Screen,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

/// Dash pattern in screen pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dash {
    pub on: f64,
    pub off: f64,
    pub offset: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    FillRect {
        rect: Rect,
        color: Rgb,
        alpha: f64,
    },
    StrokeRect {
        rect: Rect,
        color: Rgb,
        alpha: f64,
        width: f64,
        dash: Option<Dash>,
    },
    Line {
        from: (f64, f64),
        to: (f64, f64),
        color: Rgb,
        alpha: f64,
        width: f64,
    },
    /// `y` is the text's vertical middle.
    Text {
        x: f64,
        y: f64,
        text: String,
        color: Rgb,
        font_px: f64,
        bold: bool,
        align: TextAlign,
    },
    Sprite {
        rect: Rect,
        sprite: SpecialSprite,
        alpha: f64,
    },
}

impl DrawCommand {
    /// This command with world coordinates mapped to screen pixels.
    pub fn to_screen(&self, transform: &ViewportTransform) -> DrawCommand {
        let rect = |r: &Rect| {
            let (x, y) = transform.world_to_screen(r.x, r.y);
            Rect::new(x, y, r.width * transform.scale, r.height * transform.scale)
        };
        let point = |(x, y): (f64, f64)| transform.world_to_screen(x, y);
        match self {
            Self::FillRect { rect: r, color, alpha } => Self::FillRect {
                rect: rect(r),
                color: *color,
                alpha: *alpha,
            },
            Self::StrokeRect {
                rect: r,
                color,
                alpha,
                width,
                dash,
            } => Self::StrokeRect {
                rect: rect(r),
                color: *color,
                alpha: *alpha,
                width: *width,
                dash: *dash,
            },
            Self::Line {
                from,
                to,
                color,
                alpha,
                width,
            } => Self::Line {
                from: point(*from),
                to: point(*to),
                color: *color,
                alpha: *alpha,
                width: *width,
            },
            Self::Text {
                x,
                y,
                text,
                color,
                font_px,
                bold,
                align,
            } => {
                let (sx, sy) = transform.world_to_screen(*x, *y);
                Self::Text {
                    x: sx,
                    y: sy,
                    text: text.clone(),
                    color: *color,
                    font_px: font_px * transform.scale,
                    bold: *bold,
                    align: *align,
                }
            }
            Self::Sprite {
                rect: r,
                sprite,
                alpha,
            } => Self::Sprite {
                rect: rect(r),
                sprite: *sprite,
                alpha: *alpha,
            },
        }
    }
}

/// Commands recorded by one layer for one paint pass.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayList {
    space: Space,
    commands: Vec<DrawCommand>,
}

impl DisplayList {
    pub fn new(space: Space) -> Self {
        Self {
            space,
            commands: Vec::new(),
        }
    }

    pub fn space(&self) -> Space {
        self.space
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    pub fn push(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn fill_rect(&mut self, rect: Rect, color: Rgb, alpha: f64) {
        if rect.width > 0.0 && rect.height > 0.0 && alpha > 0.0 {
            self.push(DrawCommand::FillRect { rect, color, alpha });
        }
    }

    pub fn stroke_rect(&mut self, rect: Rect, color: Rgb, width: f64) {
        self.push(DrawCommand::StrokeRect {
            rect,
            color,
            alpha: 1.0,
            width,
            dash: None,
        });
    }

    pub fn line(&mut self, from: (f64, f64), to: (f64, f64), color: Rgb, alpha: f64, width: f64) {
        if alpha > 0.0 {
            self.push(DrawCommand::Line {
                from,
                to,
                color,
                alpha,
                width,
            });
        }
    }

    /// Commands mapped to screen space regardless of the list's space.
    pub fn resolved(&self, transform: &ViewportTransform) -> Vec<DrawCommand> {
        match self.space {
            Space::Screen => self.commands.clone(),
            Space::World => self
                .commands
                .iter()
                .map(|c| c.to_screen(transform))
                .collect(),
        }
    }
}
