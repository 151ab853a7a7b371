// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Summary of a gap detection run.

use crate::types::GapRecord;
use serde::{Deserialize, Serialize};

/// Gap detection summary.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GapReport {
    /// Number of gaps found.
    pub gap_count: usize,
    /// Sum of all gap areas.
    pub total_area: f64,
    /// The gaps, largest first.
    pub gaps: Vec<GapRecord>,
}

impl GapReport {
    pub fn from_records(gaps: Vec<GapRecord>) -> Self {
        Self {
            gap_count: gaps.len(),
            total_area: gaps.iter().map(|g| g.area).sum(),
            gaps,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.gaps.is_empty()
    }

    /// Serialize to a JSON string.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

impl From<Vec<GapRecord>> for GapReport {
    fn from(gaps: Vec<GapRecord>) -> Self {
        Self::from_records(gaps)
    }
}
