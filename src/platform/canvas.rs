//! 2D canvas render sink
//!
//! Keeps a display list in creation order and redraws it on every
//! `present_frame`, the way a retained-mode stage would.

use std::f64::consts::TAU;

use glam::Vec2;
use web_sys::CanvasRenderingContext2d;

use crate::render::{Color, DisplayList, EntityKind, RenderSink, VisualHandle};

pub struct CanvasSink {
    ctx: CanvasRenderingContext2d,
    width: f64,
    height: f64,
    visuals: DisplayList,
}

impl CanvasSink {
    pub fn new(ctx: CanvasRenderingContext2d, width: f64, height: f64) -> Self {
        Self {
            ctx,
            width,
            height,
            visuals: DisplayList::default(),
        }
    }
}

impl RenderSink for CanvasSink {
    fn create_visual(&mut self, kind: EntityKind, radius: f32, color: Color) -> VisualHandle {
        self.visuals.insert(kind, radius, color)
    }

    fn set_position(&mut self, handle: VisualHandle, pos: Vec2) {
        self.visuals.set_position(handle, pos);
    }

    fn remove_visual(&mut self, handle: VisualHandle) {
        self.visuals.remove(handle);
    }

    fn present_frame(&mut self) {
        self.ctx.clear_rect(0.0, 0.0, self.width, self.height);
        for visual in self.visuals.values() {
            self.ctx.begin_path();
            if let Err(e) = self.ctx.arc(
                visual.pos.x as f64,
                visual.pos.y as f64,
                visual.radius as f64,
                0.0,
                TAU,
            ) {
                log::warn!("Canvas arc failed: {:?}", e);
                continue;
            }
            self.ctx.set_fill_style_str(&visual.color.to_css());
            self.ctx.fill();
        }
    }
}
