// Copyright 2025 the Kintree Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Kintree App: an interactive family tree, end to end.
//!
//! [`App`] ties the pieces together:
//!
//! 1. a validated [`PersonNode`](kintree_record::PersonNode) record
//!    ([`load_record`], or the bundled [`demo_record`]),
//! 2. its layout ([`kintree_layout::compute_layout`]), computed once,
//! 3. the drawn scene ([`kintree_scene::Scene`]), built once,
//! 4. the camera ([`kintree_view::TreeViewController`]), centered on the tree,
//! 5. the profile popup ([`kintree_scene::ProfilePanel`]).
//!
//! Hosts feed [`InputEvent`](kintree_view::InputEvent)s to [`App::handle`] and
//! apply the returned [`AppEffects`]: rewrite the viewport group's transform,
//! and refresh the popup. A tap (a press released without dragging) on any
//! part of a card opens that person's profile.
//!
//! ```rust
//! use kintree_app::{App, AppConfig, demo_record};
//! use kintree_record::BirthDate;
//! use kintree_view::InputEvent;
//! use kurbo::{Point, Size};
//!
//! let record = demo_record().unwrap();
//! let today = BirthDate::new(2025, 6, 1).unwrap();
//! let mut app = App::new(record, &AppConfig::default(), Size::new(1200.0, 800.0), today);
//!
//! let effects = app.handle(&InputEvent::Wheel { position: Point::new(600.0, 400.0), delta_y: -1.0 });
//! assert!(effects.transform.is_some());
//! assert!(app.to_svg().contains("id=\"viewport\""));
//! ```
//!
//! On `wasm32` the `web` module mounts the demo record into the page. The
//! `kintree-render` binary (feature `cli`) writes a record as SVG.

mod app;
mod load;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use app::{App, AppConfig, AppEffects};
pub use load::{LoadError, demo_record, load_record};
