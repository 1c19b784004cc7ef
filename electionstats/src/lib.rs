// Copyright 2025 Andrew Conway.
// This file is part of MassElectionStats.
// MassElectionStats is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// MassElectionStats is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with MassElectionStats.  If not, see <https://www.gnu.org/licenses/>.

//! Client for PD43+, the Massachusetts Secretary of the Commonwealth's election
//! statistics service at [http://electionstats.state.ma.us]. It answers search
//! queries with JSON contest records and serves per-contest CSV downloads of
//! town and precinct counts.

use std::borrow::Cow;
use std::path::Path;
use anyhow::anyhow;
use elections::contest::{ElectionId, Office, Stage};
use elections::datasource::RawContestSource;
use elections::download::CacheDir;
use crate::precincts::{parse_precinct_table, PrecinctResults};

pub mod precincts;
mod test_electionstats;

pub const BASE_URL : &str = "http://electionstats.state.ma.us/elections/";

/// The office_id values the search API uses. Most are small and sequential; the
/// Governor's Council was added to the service much later.
pub fn office_id(office:Office) -> u32 {
    match office {
        Office::President => 1,
        Office::USHouse => 5,
        Office::USSenate => 6,
        Office::StateRep => 8,
        Office::StateSenate => 9,
        Office::GovCouncil => 529,
    }
}

/// A loader for the live service, downloading through a local mirror directory so
/// that repeated queries do not hammer the service.
pub struct ElectionStatsSource {
    cache : CacheDir,
}

impl ElectionStatsSource {
    pub fn new<P:AsRef<Path>>(cache_dir:P) -> Self {
        ElectionStatsSource{ cache: CacheDir::new(cache_dir) }
    }

    pub fn search_url(year_from:u16,year_to:u16,office:Office,stage:Stage) -> String {
        format!("{}search/year_from:{}/year_to:{}/office_id:{}/stage:{}",BASE_URL,year_from,year_to,office_id(office),stage.as_str())
    }

    pub fn download_url(election_id:&ElectionId,precincts_include:bool) -> String {
        format!("{}download/{}/precincts_include:{}/",BASE_URL,election_id,if precincts_include {1} else {0})
    }

    /// Read the town-by-town (or precinct-by-precinct) counts for one contest.
    /// This joins to summaries by election id only; nothing here feeds the
    /// incumbency derivation.
    pub fn read_election(&self,election_id:&ElectionId,precincts_include:bool) -> anyhow::Result<PrecinctResults> {
        let url = Self::download_url(election_id,precincts_include);
        let table = self.cache.get_or_download_string(&url)?;
        parse_precinct_table(election_id.clone(),&table,precincts_include)
    }
}

impl RawContestSource for ElectionStatsSource {
    fn name(&self) -> Cow<'static, str> { "PD43+: Massachusetts Election Statistics".into() }
    fn service_url(&self) -> Cow<'static, str> { BASE_URL.into() }
    fn search_contests(&self,year_from:u16,year_to:u16,office:Office,stage:Stage) -> anyhow::Result<Vec<serde_json::Value>> {
        let url = Self::search_url(year_from,year_to,office,stage);
        let json = self.cache.get_or_download_json(&url)?;
        let output = json.get("output").and_then(|v|v.as_array()).ok_or_else(||anyhow!("Search result from {} is JSON but has no output array",url))?;
        Ok(output.clone())
    }
}
