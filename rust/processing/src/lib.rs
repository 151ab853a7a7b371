// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! AreaFill Processing
//!
//! Finds the regions of an area plan that no area covers, so new areas can be
//! placed there. Several detection modes share one configuration:
//!
//! - [`find_gap_regions`]: subtract simple boundaries from a padded frame
//! - [`find_gap_regions_in_areas`]: the same for areas with inner loops
//! - [`find_enclosed_gaps`]: holes of the union of all areas
//! - [`find_island_gaps`]: holes inside donut-shaped areas only
//! - [`find_gap_regions_batch`]: many independent plans in parallel
//!
//! ```no_run
//! use areafill_geometry::Point2;
//! use areafill_processing::{find_gap_regions, GapConfig, GapReport};
//!
//! let boundaries = vec![vec![
//!     Point2::new(0.0, 0.0),
//!     Point2::new(10.0, 0.0),
//!     Point2::new(10.0, 10.0),
//!     Point2::new(0.0, 10.0),
//! ]];
//! let gaps = find_gap_regions(&boundaries, &GapConfig::from_env());
//! let report = GapReport::from_records(gaps);
//! println!("{}", report.to_json().unwrap());
//! ```

pub mod batch;
pub mod config;
pub mod gaps;
pub mod islands;
pub mod report;
pub mod types;

pub use batch::find_gap_regions_batch;
pub use config::GapConfig;
pub use gaps::{find_enclosed_gaps, find_gap_regions, find_gap_regions_in_areas};
pub use islands::find_island_gaps;
pub use report::GapReport;
pub use types::{AreaBoundary, GapRecord};
