//! Canvas 2D surface

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement};

use super::{Sprite, Surface};
use crate::sim::Rect;

/// Draws car sprites onto a `<canvas>`
pub struct CanvasSurface {
    ctx: CanvasRenderingContext2d,
    width: f64,
    height: f64,
    player_img: HtmlImageElement,
    obstacle_img: HtmlImageElement,
}

impl CanvasSurface {
    pub fn new(
        canvas: &HtmlCanvasElement,
        player_img: HtmlImageElement,
        obstacle_img: HtmlImageElement,
    ) -> Result<Self, JsValue> {
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
            .dyn_into::<CanvasRenderingContext2d>()?;

        Ok(Self {
            ctx,
            width: canvas.width() as f64,
            height: canvas.height() as f64,
            player_img,
            obstacle_img,
        })
    }

    fn image(&self, sprite: Sprite) -> &HtmlImageElement {
        match sprite {
            Sprite::PlayerCar => &self.player_img,
            Sprite::ObstacleCar => &self.obstacle_img,
        }
    }
}

impl Surface for CanvasSurface {
    fn clear(&mut self) {
        self.ctx.clear_rect(0.0, 0.0, self.width, self.height);
    }

    fn draw_sprite(&mut self, sprite: Sprite, rect: Rect, angle: f32) {
        let center = rect.center();
        let (w, h) = (rect.size.x as f64, rect.size.y as f64);

        self.ctx.save();
        let drawn = self
            .ctx
            .translate(center.x as f64, center.y as f64)
            .and_then(|_| self.ctx.rotate(angle as f64))
            .and_then(|_| {
                self.ctx.draw_image_with_html_image_element_and_dw_and_dh(
                    self.image(sprite),
                    -w / 2.0,
                    -h / 2.0,
                    w,
                    h,
                )
            });
        self.ctx.restore();

        if let Err(e) = drawn {
            log::warn!("Failed to draw {:?}: {:?}", sprite, e);
        }
    }
}
