//! `CanvasRenderingContext2d` adapter for the sphere renderer.

use std::f64::consts::TAU;

use foundation::color::Rgba;
use foundation::math::Vec2;
use render::{ColorStop, Paint, Shadow, Surface, SurfaceError};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement};

pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self, JsValue> {
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d context not available"))?
            .dyn_into::<CanvasRenderingContext2d>()?;
        Ok(Self { canvas, ctx })
    }

    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }

    /// Match the backing store to `width` x `height` pixels.
    ///
    /// Assigning canvas dimensions wipes its state, so unchanged sizes are
    /// left alone.
    pub fn resize(&self, width: u32, height: u32) {
        if self.canvas.width() != width {
            self.canvas.set_width(width);
        }
        if self.canvas.height() != height {
            self.canvas.set_height(height);
        }
    }

    fn paint_value(&self, paint: &Paint) -> JsValue {
        match paint {
            Paint::Solid { color } => JsValue::from_str(&color.to_css()),
            Paint::Radial {
                inner,
                inner_radius,
                outer,
                outer_radius,
                stops,
            } => match self.ctx.create_radial_gradient(
                inner.x,
                inner.y,
                *inner_radius,
                outer.x,
                outer.y,
                *outer_radius,
            ) {
                Ok(gradient) => {
                    add_stops(&gradient, stops);
                    gradient.into()
                }
                // Degenerate radii; draw the outermost color flat.
                Err(_) => JsValue::from_str(&last_stop_css(stops)),
            },
            Paint::Linear { from, to, stops } => {
                let gradient = self.ctx.create_linear_gradient(from.x, from.y, to.x, to.y);
                add_stops(&gradient, stops);
                gradient.into()
            }
        }
    }

    fn set_fill(&self, paint: &Paint) {
        ctx_set_style(&self.ctx, "fillStyle", &self.paint_value(paint));
    }

    fn set_stroke(&self, paint: &Paint) {
        ctx_set_style(&self.ctx, "strokeStyle", &self.paint_value(paint));
    }

    fn circle_path(&self, center: Vec2, radius: f64) {
        self.ctx.begin_path();
        let _ = self.ctx.arc(center.x, center.y, radius.max(0.0), 0.0, TAU);
    }
}

impl Surface for CanvasSurface {
    type Image = HtmlImageElement;

    fn size(&self) -> Vec2 {
        Vec2::new(self.canvas.width() as f64, self.canvas.height() as f64)
    }

    fn clear(&mut self) {
        let size = self.size();
        self.ctx.clear_rect(0.0, 0.0, size.x, size.y);
    }

    fn save(&mut self) {
        self.ctx.save();
    }

    fn restore(&mut self) {
        self.ctx.restore();
    }

    fn set_shadow(&mut self, shadow: Option<Shadow>) {
        match shadow {
            Some(s) => {
                self.ctx.set_shadow_color(&s.color.to_css());
                self.ctx.set_shadow_blur(s.blur_px);
                self.ctx.set_shadow_offset_x(s.offset_px.x);
                self.ctx.set_shadow_offset_y(s.offset_px.y);
            }
            None => {
                self.ctx.set_shadow_color("transparent");
                self.ctx.set_shadow_blur(0.0);
                self.ctx.set_shadow_offset_x(0.0);
                self.ctx.set_shadow_offset_y(0.0);
            }
        }
    }

    fn line(&mut self, from: Vec2, to: Vec2, width_px: f64, paint: &Paint) {
        self.ctx.begin_path();
        self.ctx.move_to(from.x, from.y);
        self.ctx.line_to(to.x, to.y);
        self.ctx.set_line_width(width_px);
        self.set_stroke(paint);
        self.ctx.stroke();
    }

    fn fill_circle(&mut self, center: Vec2, radius: f64, paint: &Paint) {
        self.circle_path(center, radius);
        self.set_fill(paint);
        self.ctx.fill();
    }

    fn stroke_circle(&mut self, center: Vec2, radius: f64, width_px: f64, paint: &Paint) {
        self.circle_path(center, radius);
        self.ctx.set_line_width(width_px);
        self.set_stroke(paint);
        self.ctx.stroke();
    }

    fn fill_ellipse(&mut self, center: Vec2, radii: Vec2, paint: &Paint) {
        self.ctx.begin_path();
        let _ = self.ctx.ellipse(
            center.x,
            center.y,
            radii.x.max(0.0),
            radii.y.max(0.0),
            0.0,
            0.0,
            TAU,
        );
        self.set_fill(paint);
        self.ctx.fill();
    }

    fn clip_circle(&mut self, center: Vec2, radius: f64) {
        self.circle_path(center, radius);
        self.ctx.clip();
    }

    fn draw_image(
        &mut self,
        image: &HtmlImageElement,
        origin: Vec2,
        size: Vec2,
    ) -> Result<(), SurfaceError> {
        if !image.complete() || image.natural_width() == 0 {
            return Err(SurfaceError::ImageNotDecoded);
        }
        self.ctx
            .draw_image_with_html_image_element_and_dw_and_dh(
                image, origin.x, origin.y, size.x, size.y,
            )
            .map_err(|e| SurfaceError::Host(format!("{e:?}")))
    }

    fn fill_text(&mut self, text: &str, anchor: Vec2, font: &str, color: Rgba) {
        self.ctx.set_font(font);
        self.ctx.set_text_align("center");
        self.ctx.set_text_baseline("top");
        ctx_set_style(&self.ctx, "fillStyle", &JsValue::from_str(&color.to_css()));
        let _ = self.ctx.fill_text(text, anchor.x, anchor.y);
    }
}

fn add_stops(gradient: &web_sys::CanvasGradient, stops: &[ColorStop]) {
    for stop in stops {
        let _ = gradient.add_color_stop(stop.offset.clamp(0.0, 1.0), &stop.color.to_css());
    }
}

fn last_stop_css(stops: &[ColorStop]) -> String {
    stops
        .last()
        .map(|s| s.color)
        .unwrap_or(Rgba::TRANSPARENT)
        .to_css()
}

fn ctx_set_style(ctx: &CanvasRenderingContext2d, property: &str, value: &JsValue) {
    let _ = js_sys::Reflect::set(ctx.as_ref(), &JsValue::from_str(property), value);
}
