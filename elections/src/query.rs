// Copyright 2025 Andrew Conway.
// This file is part of MassElectionStats.
// MassElectionStats is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// MassElectionStats is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with MassElectionStats.  If not, see <https://www.gnu.org/licenses/>.


//! Drive a raw record source across a year range and assemble the output table.
//!
//! Each target year is fetched with one extra election cycle of history in front of
//! it, so that every district's previous contest is present for incumbency
//! resolution; those lookback rows are dropped from the output afterwards.

use anyhow::Context;
use crate::contest::{ElectionSummary, Office, Stage};
use crate::datasource::RawContestSource;
use crate::extract::extract_summary;
use crate::incumbency::resolve_all;
use crate::timeline::build_timelines;

/// What to do with a contest record whose mandatory fields will not coerce.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum MalformedRecordPolicy {
    /// abort the whole query on the first bad record.
    #[default]
    Fail,
    /// drop the bad record and keep going.
    Skip,
}

#[derive(Clone, Copy, Debug, Default)]
pub struct QueryOptions {
    /// keep contests with zero candidates (default false).
    pub include_no_candidate_contests : bool,
    /// keep special elections (default false).
    pub include_special_elections : bool,
    pub malformed : MalformedRecordPolicy,
}

/// Read a summary of election results: one row per contest, incumbency resolved,
/// sorted by (date, district), covering every year in `year_from..=year_to`.
///
/// A year with nothing qualifying contributes no rows. A fetch failure aborts the
/// whole range; there is no partial result.
pub fn query_elections<S:RawContestSource+?Sized>(source:&S,year_from:u16,year_to:u16,office:Office,stage:Stage,options:&QueryOptions) -> anyhow::Result<Vec<ElectionSummary>> {
    let mut rows : Vec<ElectionSummary> = vec![];
    for year in year_from..=year_to {
        rows.extend(query_elections_for_year(source,year,office,stage,options)?);
    }
    rows.sort_by(|a,b|(a.date,a.district.as_str()).cmp(&(b.date,b.district.as_str())));
    Ok(rows)
}

/// One target year: fetch the year plus its lookback window, run the full
/// extract / group / resolve pipeline over the window, then keep only the target
/// year's rows and apply the candidate-count and specials filters.
fn query_elections_for_year<S:RawContestSource+?Sized>(source:&S,year:u16,office:Office,stage:Stage,options:&QueryOptions) -> anyhow::Result<Vec<ElectionSummary>> {
    let lookback_year = year.saturating_sub(office.cycle_years());
    let raw = source.search_contests(lookback_year,year,office,stage)
        .with_context(||format!("searching {} for {} {} contests {}-{}",source.name(),office,stage,lookback_year,year))?;
    let mut summaries : Vec<ElectionSummary> = vec![];
    for record in &raw {
        match extract_summary(record) {
            Ok(summary) => summaries.push(summary),
            Err(e) => match options.malformed {
                MalformedRecordPolicy::Fail => {
                    return Err(anyhow::Error::new(e).context(format!("extracting a {} {} contest record for {}",office,stage,year)));
                }
                MalformedRecordPolicy::Skip => {
                    println!("Skipping malformed contest record: {}",e);
                }
            }
        }
    }
    let mut timelines = build_timelines(summaries);
    resolve_all(&mut timelines);
    let mut rows : Vec<ElectionSummary> = timelines.into_iter().flat_map(|t|t.contests).filter(|s|s.year==year).collect();
    if !options.include_no_candidate_contests { rows.retain(|s|s.num_candidates!=0); }
    if !options.include_special_elections { rows.retain(|s|!s.is_special); }
    Ok(rows)
}
