// Copyright 2025 the Kintree Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drag state helper: movement deltas and total offsets from position changes.
//!
//! 1) Call [`DragState::start`] on press.
//! 2) Call [`DragState::update`] on each move to get the delta since the last position.
//! 3) Use [`DragState::moved_past`] to decide whether the press became a drag.
//! 4) Call [`DragState::end`] on release.

use kurbo::{Point, Vec2};

/// Tracks one pointer from press to release.
#[derive(Debug, Clone, Default, Copy, PartialEq)]
pub struct DragState {
    /// Position of the press.
    pub start_pos: Option<Point>,
    /// Last recorded position during the press.
    pub last_pos: Option<Point>,
}

impl DragState {
    /// Starts tracking a new press at `pos`.
    pub fn start(&mut self, pos: Point) {
        self.start_pos = Some(pos);
        self.last_pos = Some(pos);
    }

    /// Records `pos`, returning the movement since the previous position.
    pub fn update(&mut self, pos: Point) -> Option<Vec2> {
        self.start_pos?;
        let delta = self.last_pos.map(|last| pos - last);
        self.last_pos = Some(pos);
        delta
    }

    /// Offset of `current_pos` from the press position.
    pub fn total_offset(&self, current_pos: Point) -> Option<Vec2> {
        self.start_pos.map(|start| current_pos - start)
    }

    /// Returns `true` if `pos` lies strictly farther than `threshold` from the press.
    pub fn moved_past(&self, pos: Point, threshold: f64) -> bool {
        self.total_offset(pos)
            .is_some_and(|offset| offset.hypot() > threshold)
    }

    /// Stops tracking.
    pub fn end(&mut self) {
        self.start_pos = None;
        self.last_pos = None;
    }

    /// Returns `true` between [`DragState::start`] and [`DragState::end`].
    pub fn is_active(&self) -> bool {
        self.start_pos.is_some()
    }
}
