//! Render sink seam
//!
//! The simulation never draws. A [`Session`](crate::Session) pushes visual
//! creation, position updates, removals and frame presentation into whatever
//! implements [`RenderSink`].

use std::collections::BTreeMap;

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// What a visual represents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    Player,
    Projectile,
    Enemy,
}

impl EntityKind {
    /// Fill color for this kind
    pub fn color(&self) -> Color {
        match self {
            EntityKind::Player => Color::WHITE,
            EntityKind::Projectile => Color::BLUE,
            EntityKind::Enemy => Color::RED,
        }
    }
}

/// An opaque sRGB fill color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const BLUE: Color = Color::rgb(0, 0, 255);
    pub const RED: Color = Color::rgb(255, 0, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// CSS hex form, e.g. `#ff0000`
    pub fn to_css(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Handle to a visual owned by a render sink
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VisualHandle(pub u32);

/// Something that can draw circles
pub trait RenderSink {
    /// Create a circle visual centered on its position
    fn create_visual(&mut self, kind: EntityKind, radius: f32, color: Color) -> VisualHandle;
    fn set_position(&mut self, handle: VisualHandle, pos: Vec2);
    fn remove_visual(&mut self, handle: VisualHandle);
    /// Called once per tick after all positions are set
    fn present_frame(&mut self);
}

/// Bookkeeping for one visual in the in-memory sinks
#[derive(Debug, Clone, PartialEq)]
pub struct Visual {
    pub kind: EntityKind,
    pub radius: f32,
    pub color: Color,
    pub pos: Vec2,
}

/// Live visuals keyed by handle
///
/// Handles increase monotonically, so iteration order is also creation
/// (and draw) order. Shared by every sink that needs to remember what it
/// has been asked to draw.
#[derive(Debug, Default)]
pub struct DisplayList {
    next_handle: u32,
    visuals: BTreeMap<VisualHandle, Visual>,
}

impl DisplayList {
    pub fn insert(&mut self, kind: EntityKind, radius: f32, color: Color) -> VisualHandle {
        self.next_handle = self.next_handle.wrapping_add(1);
        let handle = VisualHandle(self.next_handle);
        self.visuals.insert(
            handle,
            Visual {
                kind,
                radius,
                color,
                pos: Vec2::ZERO,
            },
        );
        handle
    }

    /// Unknown handles are ignored
    pub fn set_position(&mut self, handle: VisualHandle, pos: Vec2) {
        if let Some(visual) = self.visuals.get_mut(&handle) {
            visual.pos = pos;
        }
    }

    pub fn remove(&mut self, handle: VisualHandle) -> Option<Visual> {
        self.visuals.remove(&handle)
    }

    pub fn get(&self, handle: VisualHandle) -> Option<&Visual> {
        self.visuals.get(&handle)
    }

    pub fn len(&self) -> usize {
        self.visuals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.visuals.is_empty()
    }

    /// Visuals in draw order
    pub fn iter(&self) -> impl Iterator<Item = (VisualHandle, &Visual)> {
        self.visuals.iter().map(|(handle, visual)| (*handle, visual))
    }

    pub fn values(&self) -> impl Iterator<Item = &Visual> {
        self.visuals.values()
    }
}

/// Keeps a display list in memory and logs frames. Used for headless runs.
#[derive(Debug, Default)]
pub struct LogSink {
    visuals: DisplayList,
    frames: u64,
}

impl LogSink {
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn visual_count(&self) -> usize {
        self.visuals.len()
    }
}

impl RenderSink for LogSink {
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
        self.frames += 1;
        log::trace!("Frame {}: {} visuals", self.frames, self.visuals.len());
    }
}

/// One call made against a [`RecordingSink`]
#[derive(Debug, Clone, PartialEq)]
pub enum RenderOp {
    Create {
        handle: VisualHandle,
        kind: EntityKind,
        radius: f32,
        color: Color,
    },
    SetPosition {
        handle: VisualHandle,
        pos: Vec2,
    },
    Remove {
        handle: VisualHandle,
    },
    Present,
}

/// Records every call and tracks the live display list. Handy in tests.
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub ops: Vec<RenderOp>,
    live: DisplayList,
}

impl RecordingSink {
    pub fn live(&self) -> &DisplayList {
        &self.live
    }

    /// Live visuals of one kind
    pub fn live_of(&self, kind: EntityKind) -> Vec<&Visual> {
        self.live.values().filter(|v| v.kind == kind).collect()
    }

    pub fn frames(&self) -> usize {
        self.ops.iter().filter(|op| **op == RenderOp::Present).count()
    }

    pub fn removals(&self) -> usize {
        self.ops
            .iter()
            .filter(|op| matches!(op, RenderOp::Remove { .. }))
            .count()
    }
}

impl RenderSink for RecordingSink {
    fn create_visual(&mut self, kind: EntityKind, radius: f32, color: Color) -> VisualHandle {
        let handle = self.live.insert(kind, radius, color);
        self.ops.push(RenderOp::Create {
            handle,
            kind,
            radius,
            color,
        });
        handle
    }

    fn set_position(&mut self, handle: VisualHandle, pos: Vec2) {
        self.live.set_position(handle, pos);
        self.ops.push(RenderOp::SetPosition { handle, pos });
    }

    fn remove_visual(&mut self, handle: VisualHandle) {
        self.live.remove(handle);
        self.ops.push(RenderOp::Remove { handle });
    }

    fn present_frame(&mut self) {
        self.ops.push(RenderOp::Present);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_colors() {
        assert_eq!(EntityKind::Player.color().to_css(), "#ffffff");
        assert_eq!(EntityKind::Projectile.color().to_css(), "#0000ff");
        assert_eq!(EntityKind::Enemy.color().to_css(), "#ff0000");
    }

    #[test]
    fn test_display_list_keeps_creation_order() {
        let mut list = DisplayList::default();
        let a = list.insert(EntityKind::Player, 30.0, Color::WHITE);
        let b = list.insert(EntityKind::Enemy, 15.0, Color::RED);
        let c = list.insert(EntityKind::Projectile, 5.0, Color::BLUE);
        assert!(a < b && b < c);

        list.set_position(b, Vec2::new(1.0, 2.0));
        assert_eq!(list.get(b).unwrap().pos, Vec2::new(1.0, 2.0));
        assert_eq!(list.get(c).unwrap().pos, Vec2::ZERO);

        assert_eq!(list.remove(a).map(|v| v.kind), Some(EntityKind::Player));
        assert!(list.remove(a).is_none());
        // Stale handles are ignored
        list.set_position(a, Vec2::new(9.0, 9.0));
        assert!(list.get(a).is_none());

        let order: Vec<_> = list.iter().map(|(h, _)| h).collect();
        assert_eq!(order, vec![b, c]);
        assert_eq!(list.len(), 2);

        // A fresh handle never reuses a removed one
        let d = list.insert(EntityKind::Enemy, 15.0, Color::RED);
        assert!(d > c);
    }

    #[test]
    fn test_recording_sink_tracks_live_visuals() {
        let mut sink = RecordingSink::default();
        let a = sink.create_visual(EntityKind::Enemy, 15.0, Color::RED);
        let b = sink.create_visual(EntityKind::Projectile, 5.0, Color::BLUE);
        assert_ne!(a, b);

        sink.set_position(a, Vec2::new(3.0, 4.0));
        sink.remove_visual(b);
        sink.present_frame();

        assert_eq!(sink.live().len(), 1);
        assert_eq!(sink.live().get(a).unwrap().pos, Vec2::new(3.0, 4.0));
        assert_eq!(sink.frames(), 1);
        assert_eq!(sink.removals(), 1);
    }

    #[test]
    fn test_log_sink_counts_frames() {
        let mut sink = LogSink::default();
        let h = sink.create_visual(EntityKind::Player, 30.0, Color::WHITE);
        sink.present_frame();
        sink.present_frame();
        assert_eq!(sink.frames(), 2);
        assert_eq!(sink.visual_count(), 1);
        sink.remove_visual(h);
        assert_eq!(sink.visual_count(), 0);
    }
}
