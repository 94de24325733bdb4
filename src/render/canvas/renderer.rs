//! Canvas 2D rendering backend.
//!
//! Implements the RenderBackend trait using HTML Canvas 2D API via web-sys.
//! World-space lists are mapped to screen pixels before drawing, so the
//! context only ever carries the device pixel ratio transform.

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::error::{GridViewError, Result};
use crate::render::backend::{Frame, RenderBackend};
use crate::render::colors::palette;
use crate::render::display_list::{Dash, DrawCommand, TextAlign};
use crate::types::{Rect, SpecialSprite};

const FONT_FAMILY: &str = "system-ui, -apple-system, sans-serif";

/// Canvas 2D renderer implementing the RenderBackend trait
pub struct CanvasRenderer {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    width: f64,
    height: f64,
    dpr: f64,
}

impl CanvasRenderer {
    /// Create a new Canvas renderer from an HtmlCanvasElement
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self> {
        let ctx = canvas
            .get_context("2d")
            .map_err(|_| "Failed to get 2d context")?
            .ok_or("No 2d context available")?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| "Failed to cast to CanvasRenderingContext2d")?;

        let width = f64::from(canvas.width());
        let height = f64::from(canvas.height());

        Ok(Self {
            canvas,
            ctx,
            width,
            height,
            dpr: 1.0,
        })
    }

    /// Helper to get crisp pixel position for 1px lines
    fn crisp(x: f64) -> f64 {
        x.floor() + 0.5
    }

    fn draw(&self, command: &DrawCommand) -> Result<()> {
        match command {
            DrawCommand::FillRect { rect, color, alpha } => {
                self.ctx.set_fill_style_str(&color.to_css(*alpha));
                self.ctx.fill_rect(rect.x, rect.y, rect.width, rect.height);
            }
            DrawCommand::StrokeRect {
                rect,
                color,
                alpha,
                width,
                dash,
            } => {
                self.set_dash(dash.as_ref())?;
                self.ctx.set_stroke_style_str(&color.to_css(*alpha));
                self.ctx.set_line_width(*width);
                self.ctx.stroke_rect(
                    Self::crisp(rect.x),
                    Self::crisp(rect.y),
                    rect.width.round(),
                    rect.height.round(),
                );
                if dash.is_some() {
                    self.set_dash(None)?;
                }
            }
            DrawCommand::Line {
                from,
                to,
                color,
                alpha,
                width,
            } => {
                self.ctx.begin_path();
                self.ctx.set_stroke_style_str(&color.to_css(*alpha));
                self.ctx.set_line_width(*width);
                self.ctx.move_to(Self::crisp(from.0), Self::crisp(from.1));
                self.ctx.line_to(Self::crisp(to.0), Self::crisp(to.1));
                self.ctx.stroke();
            }
            DrawCommand::Text {
                x,
                y,
                text,
                color,
                font_px,
                bold,
                align,
            } => {
                let weight = if *bold { "bold " } else { "" };
                self.ctx
                    .set_font(&format!("{weight}{font_px:.1}px {FONT_FAMILY}"));
                self.ctx.set_text_align(match align {
                    TextAlign::Left => "left",
                    TextAlign::Center => "center",
                    TextAlign::Right => "right",
                });
                self.ctx.set_text_baseline("middle");
                self.ctx.set_fill_style_str(&color.to_hex());
                self.ctx.fill_text(text, *x, *y).map_err(js_err)?;
            }
            DrawCommand::Sprite {
                rect,
                sprite,
                alpha,
            } => self.draw_sprite(rect, *sprite, *alpha),
        }
        Ok(())
    }

    fn draw_sprite(&self, rect: &Rect, sprite: SpecialSprite, alpha: f64) {
        let color = palette::SPRITE.to_css(alpha);
        match sprite {
            SpecialSprite::Checkbox { checked } => {
                self.ctx.set_stroke_style_str(&color);
                self.ctx.set_line_width(1.0);
                self.ctx.stroke_rect(
                    Self::crisp(rect.x),
                    Self::crisp(rect.y),
                    rect.width.round(),
                    rect.height.round(),
                );
                if checked {
                    self.ctx.set_line_width(1.5);
                    self.ctx.begin_path();
                    self.ctx
                        .move_to(rect.x + rect.width * 0.2, rect.y + rect.height * 0.5);
                    self.ctx
                        .line_to(rect.x + rect.width * 0.45, rect.y + rect.height * 0.75);
                    self.ctx
                        .line_to(rect.x + rect.width * 0.8, rect.y + rect.height * 0.25);
                    self.ctx.stroke();
                }
            }
            SpecialSprite::Dropdown => {
                self.ctx.set_fill_style_str(&color);
                self.ctx.begin_path();
                self.ctx
                    .move_to(rect.x + rect.width * 0.2, rect.y + rect.height * 0.35);
                self.ctx
                    .line_to(rect.x + rect.width * 0.8, rect.y + rect.height * 0.35);
                self.ctx
                    .line_to(rect.x + rect.width * 0.5, rect.y + rect.height * 0.7);
                self.ctx.close_path();
                self.ctx.fill();
            }
        }
    }

    fn set_dash(&self, dash: Option<&Dash>) -> Result<()> {
        let segments = js_sys::Array::new();
        if let Some(dash) = dash {
            segments.push(&JsValue::from_f64(dash.on));
            segments.push(&JsValue::from_f64(dash.off));
            self.ctx.set_line_dash_offset(dash.offset);
        } else {
            self.ctx.set_line_dash_offset(0.0);
        }
        self.ctx.set_line_dash(&segments).map_err(js_err)
    }
}

fn js_err(e: JsValue) -> GridViewError {
    GridViewError::Render(e.as_string().unwrap_or_else(|| format!("{e:?}")))
}

impl RenderBackend for CanvasRenderer {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn resize(&mut self, width: f64, height: f64, dpr: f64) {
        self.width = width.max(0.0);
        self.height = height.max(0.0);
        self.dpr = if dpr > 0.0 { dpr } else { 1.0 };
        // Backing store in device pixels; values are clamped non-negative above.
        self.canvas.set_width((self.width * self.dpr).round() as u32);
        self.canvas.set_height((self.height * self.dpr).round() as u32);
        let style = self.canvas.style();
        let _ = style.set_property("width", &format!("{}px", self.width));
        let _ = style.set_property("height", &format!("{}px", self.height));
    }

    fn render(&mut self, frame: &Frame<'_>) -> Result<()> {
        self.ctx
            .set_transform(self.dpr, 0.0, 0.0, self.dpr, 0.0, 0.0)
            .map_err(js_err)?;
        self.ctx.set_fill_style_str(&palette::WHITE.to_hex());
        self.ctx.fill_rect(0.0, 0.0, frame.width, frame.height);

        for (_, list) in &frame.passes {
            for command in list.resolved(&frame.transform) {
                self.draw(&command)?;
            }
        }
        Ok(())
    }
}
