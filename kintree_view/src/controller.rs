// Copyright 2025 the Kintree Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Affine, Point, Rect, Size, Vec2};

use crate::config::ViewConfig;
use crate::drag::DragState;
use crate::event::{InputEvent, TouchPhase};
use crate::viewport::ViewportState;

/// Coarse state of the gesture state machine.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum GesturePhase {
    /// No contact is down.
    Idle,
    /// One contact is down and drags the content with it.
    Panning,
    /// Two contacts are down and scale the content about their midpoint.
    Pinching,
}

#[derive(Copy, Clone, Debug, PartialEq)]
enum Gesture {
    Idle,
    /// `anchor` is `contact - translate` at the time the pan was anchored.
    Panning { anchor: Vec2 },
    Pinching {
        initial_distance: f64,
        initial_scale: f64,
    },
}

/// What an input event did.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Response {
    /// The transform changed and the enclosing group should be updated.
    pub transform_changed: bool,
    /// A press was released without dragging; the position (view space) of the tap.
    pub tap: Option<Point>,
}

/// Stateful pan / zoom / pinch controller for a tree view.
///
/// The controller owns exactly one [`ViewportState`] and mutates it in
/// response to [`InputEvent`]s. Each call to [`handle`](Self::handle) runs
/// to completion and starts from the last committed state.
///
/// Transitions:
/// - `Idle` + one contact down → `Panning`, anchored so the content under the
///   contact follows it exactly.
/// - `Panning` + move → translate follows the contact. Moving farther than
///   [`ViewConfig::drag_threshold`] latches the drag flag.
/// - `Panning` + release → `Idle`, reporting a tap unless the drag flag was latched.
/// - Any + two contacts → `Pinching`: scale is `initial_scale * distance / initial_distance`
///   about the contacts' midpoint.
/// - `Pinching` + contacts drop to one → `Panning`, re-anchored at the remaining contact.
/// - Any + wheel → zoom by `exp(±zoom_intensity)` about the cursor, state unchanged.
/// - Any + double click → `Idle`, back to the home view.
#[derive(Clone, Debug)]
pub struct TreeViewController {
    config: ViewConfig,
    viewport: ViewportState,
    home: Option<ViewportState>,
    gesture: Gesture,
    drag: DragState,
    dragged: bool,
    contacts: usize,
}

impl Default for TreeViewController {
    fn default() -> Self {
        Self::new(ViewConfig::default())
    }
}

impl TreeViewController {
    /// Creates an idle controller at the identity transform.
    #[must_use]
    pub fn new(config: ViewConfig) -> Self {
        Self {
            config,
            viewport: ViewportState::IDENTITY,
            home: None,
            gesture: Gesture::Idle,
            drag: DragState::default(),
            dragged: false,
            contacts: 0,
        }
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &ViewConfig {
        &self.config
    }

    /// Current translate and scale.
    #[must_use]
    pub fn viewport(&self) -> ViewportState {
        self.viewport
    }

    /// Current content → view transform.
    #[must_use]
    pub fn transform(&self) -> Affine {
        self.viewport.transform()
    }

    /// The view double click returns to, if one was set.
    #[must_use]
    pub fn home(&self) -> Option<ViewportState> {
        self.home
    }

    /// Current gesture phase.
    #[must_use]
    pub fn phase(&self) -> GesturePhase {
        match self.gesture {
            Gesture::Idle => GesturePhase::Idle,
            Gesture::Panning { .. } => GesturePhase::Panning,
            Gesture::Pinching { .. } => GesturePhase::Pinching,
        }
    }

    /// Whether the current (or last) press has moved past the drag threshold.
    #[must_use]
    pub fn was_drag(&self) -> bool {
        self.dragged
    }

    /// Number of contacts currently down.
    #[must_use]
    pub fn active_contacts(&self) -> usize {
        self.contacts
    }

    /// Replaces the viewport state, with its scale clamped to the configured range.
    pub fn set_viewport(&mut self, viewport: ViewportState) {
        let scale = self.config.clamp_scale(viewport.scale);
        self.viewport = ViewportState::new(viewport.translate, scale);
        self.rebase_gesture();
    }

    /// Centers `bounds` horizontally at scale `1`, `top_padding` below the top of
    /// a `view_size` view, and remembers the result as the home view.
    pub fn center_on(&mut self, bounds: Rect, view_size: Size) {
        let home = ViewportState::centered_on(bounds, view_size, 1.0, self.config.top_padding);
        log::debug!("centering {bounds:?} in {view_size:?}: {home:?}");
        self.home = Some(home);
        self.set_viewport(home);
    }

    /// Converts a view-space point into content space under the current transform.
    #[must_use]
    pub fn view_to_content(&self, pt: Point) -> Point {
        self.viewport.view_to_content(pt)
    }

    /// Applies one input event.
    pub fn handle(&mut self, event: &InputEvent) -> Response {
        match event {
            InputEvent::PointerDown { position } => {
                self.contacts = 1;
                self.begin_pan(*position);
                Response::default()
            }
            InputEvent::PointerMove { position } => self.pan_to(*position),
            InputEvent::PointerUp { position } => {
                self.contacts = 0;
                self.end_pan(Some(*position))
            }
            InputEvent::PointerLeave => {
                self.contacts = 0;
                self.end_pan(None)
            }
            InputEvent::Wheel { position, delta_y } => self.wheel(*position, *delta_y),
            InputEvent::DoubleClick { .. } => self.reset(),
            InputEvent::Touch { phase, contacts } => self.touch(*phase, contacts),
        }
    }

    fn set_gesture(&mut self, next: Gesture) {
        let from = self.phase();
        self.gesture = next;
        let to = self.phase();
        if from != to {
            log::trace!("gesture {from:?} -> {to:?}");
        }
    }

    fn begin_pan(&mut self, position: Point) {
        self.dragged = false;
        self.anchor_pan(position);
    }

    /// Anchors a pan at `position` without touching the drag flag.
    fn anchor_pan(&mut self, position: Point) {
        self.drag.start(position);
        self.set_gesture(Gesture::Panning {
            anchor: position.to_vec2() - self.viewport.translate,
        });
    }

    fn pan_to(&mut self, position: Point) -> Response {
        let Gesture::Panning { anchor } = self.gesture else {
            return Response::default();
        };
        if !self.dragged && self.drag.moved_past(position, self.config.drag_threshold) {
            self.dragged = true;
            log::trace!("press at {:?} became a drag", self.drag.start_pos);
        }
        self.drag.update(position);
        let translate = position.to_vec2() - anchor;
        let changed = translate != self.viewport.translate;
        self.viewport.translate = translate;
        Response {
            transform_changed: changed,
            tap: None,
        }
    }

    fn end_pan(&mut self, release: Option<Point>) -> Response {
        if !matches!(self.gesture, Gesture::Panning { .. }) {
            return Response::default();
        }
        if let Some(pos) = release
            && self.drag.moved_past(pos, self.config.drag_threshold)
        {
            self.dragged = true;
        }
        let tap = release.filter(|_| !self.dragged);
        self.drag.end();
        self.set_gesture(Gesture::Idle);
        Response {
            transform_changed: false,
            tap,
        }
    }

    fn begin_pinch(&mut self, a: Point, b: Point) {
        let distance = (b - a).hypot();
        if !(distance > 0.0 && distance.is_finite()) {
            return;
        }
        // A pinch never ends in a tap, even if one finger stays down afterwards.
        self.dragged = true;
        self.drag.end();
        self.set_gesture(Gesture::Pinching {
            initial_distance: distance,
            initial_scale: self.viewport.scale,
        });
    }

    fn pinch_to(&mut self, a: Point, b: Point) -> Response {
        let Gesture::Pinching {
            initial_distance,
            initial_scale,
        } = self.gesture
        else {
            return Response::default();
        };
        let distance = (b - a).hypot();
        let target = self.config.clamp_scale(initial_scale * (distance / initial_distance));
        Response {
            transform_changed: self.viewport.zoom_to(a.midpoint(b), target),
            tap: None,
        }
    }

    fn touch(&mut self, phase: TouchPhase, contacts: &[Point]) -> Response {
        self.contacts = contacts.len();
        let lifted = matches!(phase, TouchPhase::End | TouchPhase::Cancel);
        match contacts {
            [] if lifted => match self.gesture {
                Gesture::Panning { .. } => {
                    let release = match phase {
                        TouchPhase::End => self.drag.last_pos,
                        _ => None,
                    };
                    self.end_pan(release)
                }
                _ => {
                    self.drag.end();
                    self.set_gesture(Gesture::Idle);
                    Response::default()
                }
            },
            [] => Response::default(),
            [only] if lifted => {
                // Re-anchor at the remaining contact so the next move does not jump.
                if !matches!(self.gesture, Gesture::Idle) {
                    self.anchor_pan(*only);
                }
                Response::default()
            }
            [only] => match phase {
                TouchPhase::Start => {
                    self.begin_pan(*only);
                    Response::default()
                }
                _ => self.pan_to(*only),
            },
            [a, b, ..] => {
                if phase == TouchPhase::Move && matches!(self.gesture, Gesture::Pinching { .. }) {
                    self.pinch_to(*a, *b)
                } else {
                    // New or changed contact set: restart from the current scale.
                    self.begin_pinch(*a, *b);
                    Response::default()
                }
            }
        }
    }

    fn wheel(&mut self, position: Point, delta_y: f64) -> Response {
        if delta_y == 0.0 || !delta_y.is_finite() {
            return Response::default();
        }
        let direction = if delta_y < 0.0 { 1.0 } else { -1.0 };
        let factor = libm::exp(direction * self.config.zoom_intensity);
        let old_scale = self.viewport.scale;
        let target = self.config.clamp_scale(old_scale * factor);
        let changed = self.viewport.zoom_to(position, target);
        if changed {
            if let Gesture::Pinching {
                initial_distance,
                initial_scale,
            } = self.gesture
            {
                self.gesture = Gesture::Pinching {
                    initial_distance,
                    initial_scale: initial_scale * (self.viewport.scale / old_scale),
                };
            }
            self.rebase_gesture();
        }
        Response {
            transform_changed: changed,
            tap: None,
        }
    }

    /// Keeps an in-progress pan consistent after the transform changed underneath it.
    fn rebase_gesture(&mut self) {
        if let (Gesture::Panning { .. }, Some(last)) = (self.gesture, self.drag.last_pos) {
            self.gesture = Gesture::Panning {
                anchor: last.to_vec2() - self.viewport.translate,
            };
        }
    }

    fn reset(&mut self) -> Response {
        let before = self.viewport;
        match self.home {
            Some(home) => self.viewport = home,
            None => {
                self.viewport.zoom_to(Point::ORIGIN, self.config.clamp_scale(1.0));
            }
        }
        self.drag.end();
        self.set_gesture(Gesture::Idle);
        Response {
            transform_changed: self.viewport != before,
            tap: None,
        }
    }
}
