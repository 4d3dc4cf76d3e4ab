// Copyright 2025 the Kintree Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Kintree Layout: non-overlapping 2D coordinates for an arbitrary-arity family tree.
//!
//! The layout is a pure function of the tree's shape, its sibling order, and a
//! [`LayoutConfig`]. It runs in two passes:
//!
//! 1. [`compute_subtree_widths`] (post-order): each node's `content_width` is
//!    one card, plus `partner_gap` and a second card when there is a partner.
//!    Its `subtree_width` is the larger of that and the width of its children
//!    laid side by side with `sibling_gap` between them.
//! 2. [`assign_positions`] (pre-order): each node's cards are centered inside
//!    the interval its parent allotted to it, the children block is centered
//!    under that interval, and every generation sits one `level_height` lower.
//!
//! [`compute_layout`] runs both and derives the bounding box of every card,
//! blood relative and partner alike. [`compute_forest`] does the same for
//! several roots side by side and falls back to [`DEFAULT_BOUNDS`] when there
//! is nothing to lay out.
//!
//! ```rust
//! use kintree_layout::{LayoutConfig, compute_layout};
//! use kintree_record::PersonNode;
//!
//! let tree = PersonNode::new("wai_lin", "Wai Lin")
//!     .with_partner("Alan")
//!     .with_child(PersonNode::new("anthony", "Anthony"))
//!     .with_child(PersonNode::new("agnes", "Agnes").with_partner("Bayani"));
//!
//! let config = LayoutConfig::default();
//! let layout = compute_layout(&tree, &config);
//!
//! // Children: 150 + 50 + 330 = 530 wide, wider than the 330 couple.
//! assert_eq!(layout.root.subtree_width, 530.0);
//! // Every generation is one level lower.
//! assert_eq!(layout.root.children[1].position.y, 50.0 + 200.0);
//! ```
//!
//! The tree is assumed to be acyclic and single-parent. Use
//! [`kintree_record::validate`] when loading a record to enforce that.
//!
//! This crate is `no_std`.

#![no_std]

extern crate alloc;

mod config;
mod tree;

pub use config::LayoutConfig;
pub use tree::{
    CardKind, CardSlot, DEFAULT_BOUNDS, Forest, Layout, LayoutNode, assign_positions, bounds_of,
    compute_forest, compute_layout, compute_subtree_widths,
};
