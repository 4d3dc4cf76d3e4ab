// Copyright 2025 the Kintree Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Kintree Scene: the drawing substrate for a laid-out family tree.
//!
//! [`Scene::build`] turns a [`Layout`](kintree_layout::Layout) into a flat list
//! of [`Element`]s in draw order:
//!
//! - parent → child [`Connector::Elbow`] paths, dropping from the bottom center
//!   of the parent's card, running across, and dropping to the top center of
//!   the child's card,
//! - dashed [`Connector::Partner`] lines between a blood relative and their partner,
//! - one [`Card`] group per blood relative and per partner, followed by its
//!   parts: an optional family label, the rounded background, the avatar
//!   (portrait or initials), and the name label with the age when known.
//!
//! Every part records its card as its parent. A tap is resolved with
//! [`Scene::hit_test`] (topmost part under the point) and
//! [`Scene::resolve_card`] (nearest enclosing card), which together replace
//! DOM event delegation.
//!
//! [`Scene::to_svg`] writes the scene as an SVG document whose content sits in a
//! single `<g id="viewport">`; panning and zooming only ever rewrite that
//! group's `transform`. [`ProfilePanel`] models the popup opened by a tap.
//!
//! ```rust
//! use kintree_layout::{LayoutConfig, compute_layout};
//! use kintree_record::{BirthDate, PersonNode};
//! use kintree_scene::{Scene, SceneConfig};
//! use kurbo::{Affine, Point};
//!
//! let tree = PersonNode::new("felix", "Felix");
//! let layout = compute_layout(&tree, &LayoutConfig::default());
//! let today = BirthDate::new(2025, 1, 1).unwrap();
//! let scene = Scene::build(&layout, &SceneConfig::default(), today);
//!
//! let card = scene.card_at(Point::new(75.0, 100.0)).unwrap();
//! assert_eq!(card.name, "Felix");
//!
//! let svg = scene.to_svg(800, 600, Affine::IDENTITY);
//! assert!(svg.contains("<g id=\"viewport\" transform=\"translate(0, 0) scale(1)\">"));
//! ```
//!
//! This crate is `no_std`.

#![no_std]

extern crate alloc;

mod config;
mod element;
mod profile;
mod scene;
mod svg;

pub use config::SceneConfig;
pub use element::{
    Avatar, Card, Connector, Element, ElementFlags, ElementId, ElementKind, LabelRole,
};
pub use profile::{ProfilePanel, ProfileView};
pub use scene::{CardInfo, Scene};
pub use svg::transform_attr;
