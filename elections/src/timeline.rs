// Copyright 2025 Andrew Conway.
// This file is part of MassElectionStats.
// MassElectionStats is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// MassElectionStats is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with MassElectionStats.  If not, see <https://www.gnu.org/licenses/>.


//! Group contests by district and order each group chronologically, so that
//! "the previous contest in this district" is an index away.

use std::collections::HashMap;
use serde::{Serialize,Deserialize};
use crate::contest::ElectionSummary;

/// The contests of a single district, ordered ascending by date. Ties keep the
/// order the service returned them in. An ephemeral grouping view; built fresh
/// per query and discarded after incumbency resolution.
#[derive(Clone,Debug,Serialize,Deserialize)]
pub struct DistrictTimeline {
    pub district : String,
    pub contests : Vec<ElectionSummary>,
}

impl DistrictTimeline {
    pub fn len(&self) -> usize { self.contests.len() }
    pub fn is_empty(&self) -> bool { self.contests.is_empty() }
}

/// Partition summaries into one timeline per distinct district value and sort each by
/// (date, district). Grouping is exact string match; no district name normalization
/// happens here. Deterministic: identical input produces identical timelines, with
/// timelines in first-seen district order.
pub fn build_timelines(summaries:Vec<ElectionSummary>) -> Vec<DistrictTimeline> {
    let mut district_order : Vec<String> = vec![];
    let mut by_district : HashMap<String,Vec<ElectionSummary>> = HashMap::new();
    for summary in summaries {
        if !by_district.contains_key(&summary.district) { district_order.push(summary.district.clone()); }
        by_district.entry(summary.district.clone()).or_default().push(summary);
    }
    let mut res = vec![];
    for district in district_order {
        let mut contests = by_district.remove(&district).unwrap();
        // district is constant within a timeline, so this is a stable sort by date.
        contests.sort_by(|a,b|(a.date,a.district.as_str()).cmp(&(b.date,b.district.as_str())));
        res.push(DistrictTimeline{district,contests});
    }
    res
}
