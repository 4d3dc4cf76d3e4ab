// Copyright 2025 the Kintree Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Load-time validation of the tree-shape precondition.

use alloc::string::String;
use core::fmt;

use hashbrown::HashSet;

use crate::person::PersonNode;

/// Error returned when a record violates the tree-shape precondition.
#[derive(Clone, PartialEq, Eq)]
pub enum RecordError {
    /// A node has an empty (or whitespace-only) identifier.
    EmptyId {
        /// Display name of the offending node, to help locate it.
        name: String,
    },
    /// Two nodes share an identifier.
    ///
    /// This is also how a person listed under two parents shows up, which
    /// would double-count their subtree width.
    DuplicateId {
        /// The repeated identifier.
        id: String,
    },
    /// A person's id equals the card id derived for someone else's partner.
    PartnerIdTaken {
        /// The contested identifier, `<owner>_partner`.
        id: String,
    },
}

impl fmt::Debug for RecordError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyId { name } => write!(f, "RecordError::EmptyId {{ name: {name:?} }}"),
            Self::DuplicateId { id } => write!(f, "RecordError::DuplicateId {{ id: {id:?} }}"),
            Self::PartnerIdTaken { id } => {
                write!(f, "RecordError::PartnerIdTaken {{ id: {id:?} }}")
            }
        }
    }
}

impl fmt::Display for RecordError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyId { name } => write!(f, "person {name:?} has an empty id"),
            Self::DuplicateId { id } => {
                write!(f, "id {id:?} appears more than once in the tree")
            }
            Self::PartnerIdTaken { id } => {
                write!(f, "id {id:?} is already used by a partner card")
            }
        }
    }
}

impl core::error::Error for RecordError {}

/// Checks that `root` describes a proper single-parent tree.
///
/// Every id must be non-empty and unique, and no id may equal the card id of
/// someone's partner slot (see [`PersonNode::partner_card_id`]). Returns the
/// number of people (blood relatives, not counting partners) on success.
///
/// # Errors
///
/// - [`RecordError::EmptyId`] for the first node, in pre-order, with a blank id.
/// - [`RecordError::DuplicateId`] for the first id seen twice, in pre-order.
/// - [`RecordError::PartnerIdTaken`] for the first partner, in pre-order, whose
///   card id is also a person's id.
pub fn validate(root: &PersonNode) -> Result<usize, RecordError> {
    let mut seen: HashSet<&str> = HashSet::new();
    for node in root {
        let id = node.id.trim();
        if id.is_empty() {
            return Err(RecordError::EmptyId {
                name: node.name.clone(),
            });
        }
        if !seen.insert(id) {
            return Err(RecordError::DuplicateId { id: id.into() });
        }
    }
    if let Some(id) = root
        .iter()
        .filter_map(PersonNode::partner_card_id)
        .find(|id| seen.contains(id.trim()))
    {
        return Err(RecordError::PartnerIdTaken { id });
    }
    log::debug!("validated family record: {} people", seen.len());
    Ok(seen.len())
}
