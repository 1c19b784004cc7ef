// Copyright 2025 Andrew Conway.
// This file is part of MassElectionStats.
// MassElectionStats is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// MassElectionStats is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with MassElectionStats.  If not, see <https://www.gnu.org/licenses/>.


//! Reading the per-precinct (or per-town) vote table for one contest.
//!
//! The download is a CSV whose first line names the columns, whose second line is a
//! decorative sub-header, and whose last line is a statewide totals row; the
//! geographic key columns are "City/Town" and, at precinct granularity, "Ward" and
//! "Pct". Counts are printed with comma thousands separators.

use anyhow::anyhow;
use serde::{Serialize,Deserialize};
use elections::contest::ElectionId;

/// The counts of one contest broken down by geographic unit, one row per unit.
#[derive(Clone,Debug,Serialize,Deserialize)]
pub struct PrecinctResults {
    pub election_id : ElectionId,
    /// names of the count columns, in file order.
    pub columns : Vec<String>,
    pub rows : Vec<PrecinctRow>,
}

#[derive(Clone,Debug,Serialize,Deserialize)]
pub struct PrecinctRow {
    pub city_town : String,
    /// None at town granularity.
    pub ward : Option<String>,
    /// None at town granularity.
    pub pct : Option<String>,
    /// aligned with [`PrecinctResults::columns`].
    pub counts : Vec<u64>,
}

/// Parse a downloaded table. `precincts_include` must match the granularity the
/// table was downloaded at: at town granularity the Ward/Pct columns (present but
/// meaningless) are dropped, as are any unnamed columns.
pub fn parse_precinct_table(election_id:ElectionId,table:&str,precincts_include:bool) -> anyhow::Result<PrecinctResults> {
    let mut reader = csv::ReaderBuilder::new().has_headers(false).flexible(true).from_reader(table.as_bytes());
    let mut records : Vec<csv::StringRecord> = vec![];
    for record in reader.records() { records.push(record?); }
    if records.is_empty() { return Err(anyhow!("Downloaded table for election {} is empty",election_id)); }
    let header = &records[0];
    let mut city_town_column : Option<usize> = None;
    let mut ward_column : Option<usize> = None;
    let mut pct_column : Option<usize> = None;
    let mut count_columns : Vec<(usize,String)> = vec![];
    for (index,name) in header.iter().enumerate() {
        let name = name.trim();
        match name {
            "City/Town" => { city_town_column = Some(index); }
            "Ward" => { ward_column = Some(index); }
            "Pct" => { pct_column = Some(index); }
            "" => {} // unnamed filler column
            _ => { count_columns.push((index,name.to_string())); }
        }
    }
    let city_town_column = city_town_column.ok_or_else(||anyhow!("Downloaded table for election {} has no City/Town column",election_id))?;
    let mut rows = vec![];
    // line 2 is a sub-header and the last line is a totals row; neither is data.
    if records.len()>3 {
        for record in &records[2..records.len()-1] {
            let field = |index:usize| record.get(index).unwrap_or("").trim();
            let mut counts = vec![];
            for (index,name) in &count_columns {
                counts.push(parse_count(field(*index)).ok_or_else(||anyhow!("Election {} column {} has non-numeric count {}",election_id,name,field(*index)))?);
            }
            rows.push(PrecinctRow{
                city_town: field(city_town_column).to_string(),
                ward: if precincts_include { ward_column.map(|i|field(i).to_string()) } else { None },
                pct: if precincts_include { pct_column.map(|i|field(i).to_string()) } else { None },
                counts,
            });
        }
    }
    Ok(PrecinctResults{
        election_id,
        columns: count_columns.into_iter().map(|(_,name)|name).collect(),
        rows,
    })
}

/// a count, possibly with comma thousands separators. A blank cell is zero.
fn parse_count(s:&str) -> Option<u64> {
    let cleaned : String = s.chars().filter(|&c|c!=',').collect();
    if cleaned.is_empty() { Some(0) } else { cleaned.parse::<u64>().ok() }
}
