// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! AreaFill Geometry
//!
//! 2D region processing for area plans: even-odd regions with boolean set
//! operations backed by i_overlay, bottleneck splitting of narrow contours,
//! and interior point search that favors the widest part of a shape.

pub mod bottleneck;
pub mod contour;
pub mod error;
pub mod interior;
pub mod region;

// Re-export nalgebra types for convenience
pub use nalgebra::{Point2, Vector2};

pub use bottleneck::{find_bottleneck_points, split_at_bottlenecks, SplitOptions};
pub use contour::{clean_contour, Contour, TOLERANCE};
pub use error::{Error, Result};
pub use interior::{estimate_clearance, find_interior_point};
pub use region::{BoundingBox, Region, Shape};
