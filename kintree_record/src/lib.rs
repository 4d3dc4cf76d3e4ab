// Copyright 2025 the Kintree Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Kintree Record: the hand-authored family record consumed by the layout engine.
//!
//! A record is a single rooted tree of [`PersonNode`] values. Each node is a
//! blood relative with an optional partner, an optional birthday, optional
//! portrait references, and an ordered list of children. The record is static
//! configuration: nothing here mutates it after loading.
//!
//! Besides the model, this crate provides the small pieces of presentation
//! logic that depend only on the record:
//! - [`BirthDate`] parsing and whole-year [`BirthDate::age_on`].
//! - [`PersonNode::display_label`] (`"Name (age)"`) and [`initials`].
//! - [`FamilyGroupId::label`] for sub-family headings.
//! - [`validate`], which enforces the single-parent tree shape at load time.
//!
//! ## Example
//!
//! ```rust
//! use kintree_record::{BirthDate, PersonNode, validate};
//!
//! let root = PersonNode::new("agnes", "Agnes")
//!     .with_partner("Bayani")
//!     .with_child(
//!         PersonNode::new("alana", "Alana").with_birth_date("1/16/2015".parse().unwrap()),
//!     );
//! assert_eq!(validate(&root), Ok(2));
//!
//! let today = BirthDate::new(2025, 1, 15).unwrap();
//! assert_eq!(root.children[0].display_label(today), "Alana (9)");
//! ```
//!
//! ## Features
//!
//! - `serde` (default): `Deserialize`/`Serialize` for the record types, using
//!   the key names of the hand-authored JSON record.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod date;
mod person;
mod text;
mod validate;

pub use date::{BirthDate, ParseDateError};
pub use person::{FamilyGroupId, Iter, PersonNode};
pub use text::initials;
pub use validate::{RecordError, validate};
