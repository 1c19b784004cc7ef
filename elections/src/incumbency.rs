// Copyright 2025 Andrew Conway.
// This file is part of MassElectionStats.
// MassElectionStats is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// MassElectionStats is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with MassElectionStats.  If not, see <https://www.gnu.org/licenses/>.


//! Derive incumbency purely from historical ordering: the incumbent going into a
//! contest is whoever won the previous contest in the same district, however many
//! years back that was.

use crate::contest::{Incumbency, IncumbentStatus};
use crate::timeline::DistrictTimeline;

/// Fill in the incumbency fields for every contest in a timeline except the earliest,
/// which has no predecessor to look back to and stays structurally unresolved.
///
/// The incumbent is credited strictly by matching the prior winner's name against the
/// current candidate list. An incumbent who re-files under a different ballot line
/// therefore gets `incumbent_party` of None and a status of "No incumbent" even though
/// the person is nominally an incumbent; the service's own records do the same for
/// contests 131567 and 131541, so this stays as is.
pub fn resolve_incumbency(timeline:&mut DistrictTimeline) {
    for i in 1..timeline.contests.len() {
        let incumbent = timeline.contests[i-1].winner.clone();
        let prev_party = timeline.contests[i-1].winning_party.clone();
        let current = &mut timeline.contests[i];
        let incumbent_party = match &incumbent {
            Some(name) => current.candidate_named(name).and_then(|c|c.party.clone()),
            None => None,
        };
        // literal membership test: a contest with no known incumbent is open too.
        let open_race = match &incumbent {
            Some(name) => !current.has_candidate_named(name),
            None => true,
        };
        current.incumbency = Some(Incumbency{
            incumbent,
            prev_party,
            incumbent_party: incumbent_party.clone(),
            incumbent_status: IncumbentStatus::from_incumbent_party(incumbent_party.as_deref()),
            open_race,
        });
    }
}

pub fn resolve_all(timelines:&mut [DistrictTimeline]) {
    for timeline in timelines { resolve_incumbency(timeline); }
}
