// Copyright 2024 the Textpath Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// List of all errors.
#[derive(Debug)]
pub enum Error {
    /// A path contains non-finite coordinates, coordinates outside of
    /// the `f32` range or is too long to be measured.
    ///
    /// Such a path cannot be measured, so it is rejected before any
    /// glyph is placed on it.
    InvalidGeometry,

    /// Failed to parse SVG path data.
    InvalidPathData(svgtypes::Error),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match *self {
            Error::InvalidGeometry => {
                write!(f, "path contains non-finite coordinates")
            }
            Error::InvalidPathData(ref e) => {
                write!(f, "path data parsing failed cause {}", e)
            }
        }
    }
}

impl std::error::Error for Error {}

impl From<svgtypes::Error> for Error {
    fn from(e: svgtypes::Error) -> Self {
        Error::InvalidPathData(e)
    }
}
