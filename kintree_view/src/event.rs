// Copyright 2025 the Kintree Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::Point;
use smallvec::SmallVec;

/// Active touch contacts, in view coordinates.
///
/// Two inline slots cover the pan and pinch cases without allocating.
pub type Contacts = SmallVec<[Point; 2]>;

/// Phase of a multi-touch event.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum TouchPhase {
    /// One or more contacts were added.
    Start,
    /// One or more contacts moved.
    Move,
    /// One or more contacts were lifted.
    End,
    /// The platform aborted the touches (no tap is reported).
    Cancel,
}

/// A device-independent input event, positions in view coordinates.
///
/// Hosts translate their native mouse, wheel, and touch events into these
/// and feed them to [`TreeViewController::handle`](crate::TreeViewController::handle).
#[derive(Clone, Debug, PartialEq)]
pub enum InputEvent {
    /// Primary button pressed.
    PointerDown {
        /// Pointer position.
        position: Point,
    },
    /// Pointer moved, with or without a button held.
    PointerMove {
        /// Pointer position.
        position: Point,
    },
    /// Primary button released.
    PointerUp {
        /// Pointer position.
        position: Point,
    },
    /// Pointer left the view.
    PointerLeave,
    /// Wheel scrolled over the view. Negative `delta_y` zooms in.
    Wheel {
        /// Cursor position, used as the zoom anchor.
        position: Point,
        /// Vertical scroll delta; only its sign matters.
        delta_y: f64,
    },
    /// Primary button double-clicked.
    DoubleClick {
        /// Pointer position.
        position: Point,
    },
    /// Touch contacts changed.
    ///
    /// `contacts` lists every contact still on the surface after the change,
    /// in a stable order, like the DOM's `TouchEvent.touches`.
    Touch {
        /// What changed.
        phase: TouchPhase,
        /// Contacts still down.
        contacts: Contacts,
    },
}
