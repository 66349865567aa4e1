//! Where hand positions come from.
//!
//! The game only needs two points per frame, so any tracker that can find a
//! player's hands plugs in through [`PoseSource`]. The terminal build drives
//! the hands from the mouse with [`SimulatedPose`].

use crate::geom::Point;
use anyhow::anyhow;
use crossterm::event::{MouseEvent, MouseEventKind};
use std::collections::VecDeque;

/// Hand positions for one frame, in canvas units.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PoseFrame {
    /// Whether a body was found at all.
    pub detected: bool,
    pub left: Option<Point>,
    pub right: Option<Point>,
}

impl PoseFrame {
    pub fn undetected() -> Self {
        Self::default()
    }

    pub fn hands(left: Point, right: Point) -> Self {
        Self {
            detected: true,
            left: Some(left),
            right: Some(right),
        }
    }
}

pub trait PoseSource {
    /// Grabs the next frame. An error means the frame was lost; the caller
    /// skips it and tries again next tick.
    fn capture(&mut self) -> anyhow::Result<PoseFrame>;
}

// ── Mouse-driven hands ──────────────────────────────────────────────────────

/// The pointer is the left hand; the right hand mirrors it across the
/// vertical center line, so a swipe through the middle uses both.
pub struct SimulatedPose {
    canvas: (f32, f32),
    cells: (u16, u16),
    pointer: Option<Point>,
}

impl SimulatedPose {
    pub fn new(canvas_w: u32, canvas_h: u32, cols: u16, rows: u16) -> Self {
        Self {
            canvas: (canvas_w as f32, canvas_h as f32),
            cells: (cols.max(1), rows.max(1)),
            pointer: None,
        }
    }

    pub fn resize(&mut self, cols: u16, rows: u16) {
        self.cells = (cols.max(1), rows.max(1));
    }

    pub fn handle_mouse(&mut self, ev: &MouseEvent) {
        match ev.kind {
            MouseEventKind::Moved | MouseEventKind::Drag(_) | MouseEventKind::Down(_) => {
                self.pointer = Some(self.to_canvas(ev.column, ev.row));
            }
            _ => {}
        }
    }

    fn to_canvas(&self, col: u16, row: u16) -> Point {
        Point::new(
            (col as f32 + 0.5) * self.canvas.0 / self.cells.0 as f32,
            (row as f32 + 0.5) * self.canvas.1 / self.cells.1 as f32,
        )
    }
}

impl PoseSource for SimulatedPose {
    fn capture(&mut self) -> anyhow::Result<PoseFrame> {
        Ok(match self.pointer {
            Some(p) => PoseFrame::hands(p, Point::new(self.canvas.0 - p.x, p.y)),
            None => PoseFrame::undetected(),
        })
    }
}

// ── Scripted frames ─────────────────────────────────────────────────────────

/// Replays a fixed list of frames; `None` entries are dropped frames. Once
/// the list runs out nobody is in view.
#[derive(Default)]
pub struct ScriptedPose {
    frames: VecDeque<Option<PoseFrame>>,
}

impl ScriptedPose {
    pub fn new(frames: impl IntoIterator<Item = Option<PoseFrame>>) -> Self {
        Self {
            frames: frames.into_iter().collect(),
        }
    }

    pub fn push(&mut self, frame: Option<PoseFrame>) {
        self.frames.push_back(frame);
    }
}

impl PoseSource for ScriptedPose {
    fn capture(&mut self) -> anyhow::Result<PoseFrame> {
        match self.frames.pop_front() {
            Some(Some(frame)) => Ok(frame),
            Some(None) => Err(anyhow!("camera frame dropped")),
            None => Ok(PoseFrame::undetected()),
        }
    }
}
