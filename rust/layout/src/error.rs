// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for layout generation.
//!
//! The geometric variants are recoverable: the stage that owns each one
//! substitutes a fallback and logs it, so a layout run only fails on bad
//! input or configuration.

/// Result type alias for layout operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during layout generation.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// An inset of the parcel left nothing.
    #[error("inset by {offset:.2} m produced an empty region")]
    DegenerateRegion { offset: f64 },

    /// An axis-aligned strip missed the polygon being split.
    #[error("band {index} of {count} is empty")]
    EmptyBand { index: usize, count: usize },

    /// Two regions expected to touch share no usable boundary.
    #[error("no shared boundary between {0} and {1}")]
    NoSharedBoundary(String, String),

    /// No zone qualifies as the building entry.
    #[error("no entry zone found")]
    NoEntryZone,

    /// The driveway rectangle does not survive clipping.
    #[error("access polygon is empty after clipping to the parcel")]
    NoValidAccessIntersection,

    /// An undersized zone has nothing to merge into.
    #[error("no merge candidate for zone {0}")]
    NoMergeCandidate(String),

    #[error("geometry error: {0}")]
    Geometry(#[from] floorgen_geometry::Error),

    #[error("unknown building archetype: {0}")]
    UnknownArchetype(String),

    #[error("unknown parcel shape: {0}")]
    UnknownShape(String),

    #[error("configuration error: {0}")]
    Config(String),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Config(format!("JSON error: {}", err))
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Config(format!("I/O error: {}", err))
    }
}
