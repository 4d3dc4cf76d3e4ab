// Copyright 2025 the Kintree Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Loading a family record from JSON.

use core::fmt;

use kintree_record::{PersonNode, RecordError, validate};

/// The record bundled with the application.
const DEMO_RECORD: &str = include_str!("../data/family.json");

/// Error returned when a record cannot be loaded.
#[derive(Debug)]
pub enum LoadError {
    /// The text is not a well-formed record (bad JSON, missing fields, bad birthday).
    Json(serde_json::Error),
    /// The record parsed but is not a proper tree.
    Record(RecordError),
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json(err) => write!(f, "malformed family record: {err}"),
            Self::Record(err) => write!(f, "invalid family record: {err}"),
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Json(err) => Some(err),
            Self::Record(err) => Some(err),
        }
    }
}

impl From<serde_json::Error> for LoadError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err)
    }
}

impl From<RecordError> for LoadError {
    fn from(err: RecordError) -> Self {
        Self::Record(err)
    }
}

/// Parses and validates a record.
///
/// # Errors
///
/// [`LoadError::Json`] when `json` does not describe a record,
/// [`LoadError::Record`] when ids are blank or repeated.
pub fn load_record(json: &str) -> Result<PersonNode, LoadError> {
    let root: PersonNode = serde_json::from_str(json)?;
    let count = validate(&root)?;
    log::info!("loaded family record rooted at {:?} with {count} people", root.id);
    Ok(root)
}

/// Loads the bundled demo record.
///
/// # Errors
///
/// Only if the bundled data is corrupt; see [`load_record`].
pub fn demo_record() -> Result<PersonNode, LoadError> {
    load_record(DEMO_RECORD)
}
