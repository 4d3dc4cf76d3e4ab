// Copyright 2025 the Kintree Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Kintree View: pan, zoom, and pinch control over a laid-out family tree.
//!
//! This crate is a headless model of the tree view's camera. It tracks one
//! translate + uniform scale ([`ViewportState`]) and updates it from a
//! device-independent stream of [`InputEvent`]s, so the whole interaction
//! layer can be driven by synthetic event sequences in tests.
//!
//! - [`TreeViewController`] is the gesture state machine (`Idle`, `Panning`,
//!   `Pinching`). It also tells a press that became a drag apart from a tap,
//!   so releasing a pan over a card does not open that card's profile.
//! - Wheel and pinch zoom keep the content under the cursor (or the pinch
//!   midpoint) fixed: `translate = anchor - (anchor - translate) * (new / old)`.
//! - [`ViewportState::transform`] is the single transform the host writes to
//!   the group enclosing the drawn tree. Changing it never re-runs layout.
//!
//! ```rust
//! use kurbo::Point;
//! use kintree_view::{InputEvent, TreeViewController, ViewConfig};
//!
//! let mut view = TreeViewController::new(ViewConfig::default());
//! let cursor = Point::new(400.0, 300.0);
//! let before = view.view_to_content(cursor);
//!
//! let response = view.handle(&InputEvent::Wheel { position: cursor, delta_y: -120.0 });
//! assert!(response.transform_changed);
//! assert!(view.viewport().scale > 1.0);
//!
//! let after = view.view_to_content(cursor);
//! assert!((after - before).hypot() < 1e-9);
//! ```
//!
//! ## Design notes
//!
//! - Scale is uniform; there is no independent X/Y zoom and no rotation.
//! - Scale is clamped to [`ViewConfig::min_scale`]..=[`ViewConfig::max_scale`];
//!   translation is always derived from the clamped scale, so anchors stay put.
//! - Double click returns to the home view set by
//!   [`TreeViewController::center_on`], resetting scale and centering together.
//!
//! This crate is `no_std`.

#![no_std]

mod config;
mod controller;
pub mod drag;
mod event;
mod viewport;

pub use config::ViewConfig;
pub use controller::{GesturePhase, Response, TreeViewController};
pub use event::{Contacts, InputEvent, TouchPhase};
pub use viewport::ViewportState;
