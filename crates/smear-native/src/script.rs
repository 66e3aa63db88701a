//! Scripted pointer input standing in for a finger on the screen.

use glam::Vec2;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PointerEvent {
    Down(Vec2),
    Move(Vec2),
    Up,
}

/// A single drag: press near the left edge, sweep right along a shallow
/// wave, release, then leave idle frames so the effect can be seen clearing.
pub struct DragScript {
    viewport: Vec2,
    press_frame: u32,
    release_frame: u32,
}

impl DragScript {
    pub fn new(viewport: Vec2, frames: u32) -> Self {
        let press_frame = (frames / 10).max(1).min(frames.saturating_sub(1));
        let release_frame = (frames * 3 / 4).max(press_frame + 1);
        Self {
            viewport,
            press_frame,
            release_frame,
        }
    }

    fn position(&self, frame: u32) -> Vec2 {
        let span = (self.release_frame - self.press_frame).max(1) as f32;
        let t = ((frame.saturating_sub(self.press_frame)) as f32 / span).clamp(0.0, 1.0);
        // Ease in-out so speed peaks mid-drag.
        let e = t * t * (3.0 - 2.0 * t);
        let x = self.viewport.x * (0.15 + 0.7 * e);
        let y = self.viewport.y * (0.5 + 0.12 * (t * std::f32::consts::TAU).sin());
        Vec2::new(x, y)
    }

    /// Pointer events delivered during `frame`, in order.
    pub fn events(&self, frame: u32) -> Vec<PointerEvent> {
        if frame == self.press_frame {
            vec![PointerEvent::Down(self.position(frame))]
        } else if frame > self.press_frame && frame < self.release_frame {
            vec![PointerEvent::Move(self.position(frame))]
        } else if frame == self.release_frame {
            vec![PointerEvent::Move(self.position(frame)), PointerEvent::Up]
        } else {
            Vec::new()
        }
    }
}
