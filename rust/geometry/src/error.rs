// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use thiserror::Error;

/// Result type for region operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during 2D region processing
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Invalid contour: {0}")]
    InvalidContour(String),

    #[error("Non-finite coordinate ({x}, {y})")]
    NonFiniteCoordinate { x: f64, y: f64 },

    #[error("Coordinate extent {0} exceeds the clipper range")]
    CoordinateOutOfRange(f64),
}
