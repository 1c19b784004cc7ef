// Copyright 2025 Andrew Conway.
// This file is part of MassElectionStats.
// MassElectionStats is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// MassElectionStats is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with MassElectionStats.  If not, see <https://www.gnu.org/licenses/>.


//! Turn one raw contest record from the search API into an [`ElectionSummary`].
//!
//! A record is a JSON object with nested `Election`, `Office`, `District` and
//! `Candidate` sub-records. The extractor is the only code that looks inside
//! one. Missing optional data (no major-party candidate, no declared winner)
//! degrades to None; a mandatory field that will not coerce is an error for
//! that one record, which the orchestrator may skip or fail on.

use chrono::NaiveDate;
use serde_json::Value;
use thiserror::Error;
use crate::contest::{CandidateRecord, ElectionId, ElectionSummary, Office};

#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("contest record is not a JSON object")]
    NotAnObject,
    #[error("contest record has no {0} sub-record")]
    MissingSubRecord(&'static str),
    #[error("field {0} is missing or not a string")]
    MissingField(&'static str),
    #[error("field {0} value {1} does not coerce to an integer")]
    NotAnInteger(&'static str, String),
    #[error("field date value {0} is not a yyyy-mm-dd date")]
    NotADate(String),
    #[error("unrecognised office name {0}")]
    UnknownOffice(String),
}

/// Produce exactly one summary from one raw contest record.
pub fn extract_summary(raw:&Value) -> Result<ElectionSummary,ExtractError> {
    let record = raw.as_object().ok_or(ExtractError::NotAnObject)?;
    let election = record.get("Election").and_then(|v|v.as_object()).ok_or(ExtractError::MissingSubRecord("Election"))?;
    let office_record = record.get("Office").and_then(|v|v.as_object()).ok_or(ExtractError::MissingSubRecord("Office"))?;
    let office_name = string_field(office_record,"name")?;
    let office = Office::from_name(&office_name).ok_or(ExtractError::UnknownOffice(office_name))?;
    let election_id = ElectionId(identifier_field(election,"id")?);
    let year = integer_field(election,"year")?;
    let year = u16::try_from(year).map_err(|_|ExtractError::NotAnInteger("year",year.to_string()))?;
    let date_str = string_field(election,"date")?;
    let date = NaiveDate::parse_from_str(&date_str,"%Y-%m-%d").map_err(|_|ExtractError::NotADate(date_str))?;
    let is_special = truthy(election.get("is_special"));
    let party_primary = optional_string_field(election,"party_primary");
    let district = match office.statewide_district() {
        Some(label) => label.to_string(),
        None => {
            let district_record = record.get("District").and_then(|v|v.as_object()).ok_or(ExtractError::MissingSubRecord("District"))?;
            string_field(district_record,"display_name")?
        }
    };
    let mut candidates : Vec<CandidateRecord> = vec![];
    if let Some(list) = record.get("Candidate").and_then(|v|v.as_array()) {
        for c in list { candidates.push(extract_candidate(c)?); }
    }
    let total_votes = integer_field(election,"n_total_votes")?;
    let other_votes = integer_field(election,"n_all_other_votes")?;
    let blank_votes = integer_field(election,"n_blank_votes")?;
    // first flagged candidate wins, should the service ever flag two.
    let winning_candidate = candidates.iter().find(|c|c.is_winner);
    let (winner,winner_votes,winner_pct,winning_party) = match winning_candidate {
        Some(c) => {
            let pct = if total_votes>0 { Some(c.votes as f64/total_votes as f64) } else { None };
            let party = party_primary.clone().or_else(||c.party.clone());
            (Some(c.display_name.clone()),Some(c.votes),pct,party)
        }
        None => (None,None,None,None),
    };
    let first_of_party = |party:&str| candidates.iter().find(|c|c.party.as_deref()==Some(party));
    let dem = first_of_party("Democratic");
    let gop = first_of_party("Republican");
    let dem_candidate = dem.map(|c|c.display_name.clone());
    let dem_votes = dem.map(|c|c.votes);
    let gop_candidate = gop.map(|c|c.display_name.clone());
    let gop_votes = gop.map(|c|c.votes);
    let other_candidates = candidates.iter()
        .filter(|c|c.party.as_deref()!=Some("Democratic")&&c.party.as_deref()!=Some("Republican"))
        .map(|c|c.display_name.as_str()).collect::<Vec<_>>().join(",");
    let dem_percent = match (dem_votes,gop_votes) {
        (Some(d),Some(g)) if d+g>0 => Some(d as f64/(d+g) as f64),
        _ => None,
    };
    Ok(ElectionSummary{
        election_id,
        year,
        date,
        office,
        district,
        is_special,
        party_primary,
        num_candidates: candidates.len(),
        candidates,
        dem_candidate,
        gop_candidate,
        other_candidates,
        dem_votes,
        gop_votes,
        total_votes,
        other_votes,
        blank_votes,
        winner,
        winner_votes,
        winner_pct,
        winning_party,
        dem_percent,
        incumbency: None,
    })
}

fn extract_candidate(raw:&Value) -> Result<CandidateRecord,ExtractError> {
    let record = raw.as_object().ok_or(ExtractError::MissingSubRecord("Candidate"))?;
    let ballot_line = record.get("CandidateToElection").and_then(|v|v.as_object()).ok_or(ExtractError::MissingSubRecord("CandidateToElection"))?;
    // the name is duplicated on both levels of the record; either will do.
    let display_name = optional_string_field(record,"display_name")
        .or_else(||optional_string_field(ballot_line,"display_name"))
        .ok_or(ExtractError::MissingField("display_name"))?;
    Ok(CandidateRecord{
        display_name,
        party: optional_string_field(ballot_line,"party"),
        votes: integer_field(ballot_line,"n_votes")?,
        is_winner: truthy(ballot_line.get("is_winner")),
    })
}

/// The service represents flags variously as booleans, 0/1 numbers and "0"/"1" strings.
fn truthy(value:Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().map(|f|f!=0.0).unwrap_or(false),
        Some(Value::String(s)) => !(s.is_empty()||s=="0"||s=="false"),
        Some(_) => true,
    }
}

fn string_field(record:&serde_json::Map<String,Value>,key:&'static str) -> Result<String,ExtractError> {
    record.get(key).and_then(|v|v.as_str()).map(|s|s.to_string()).ok_or(ExtractError::MissingField(key))
}

/// a string field that may be absent, null or empty, all meaning "not there".
fn optional_string_field(record:&serde_json::Map<String,Value>,key:&str) -> Option<String> {
    match record.get(key).and_then(|v|v.as_str()) {
        Some(s) if !s.is_empty() => Some(s.to_string()),
        _ => None,
    }
}

/// an id may come through as a number or a string; keep it opaque either way.
fn identifier_field(record:&serde_json::Map<String,Value>,key:&'static str) -> Result<String,ExtractError> {
    match record.get(key) {
        Some(Value::String(s)) if !s.is_empty() => Ok(s.clone()),
        Some(Value::Number(n)) => Ok(n.to_string()),
        _ => Err(ExtractError::MissingField(key)),
    }
}

/// Coerce a count to an integer. The service mostly sends numbers but sometimes
/// strings, occasionally with comma thousands separators.
fn integer_field(record:&serde_json::Map<String,Value>,key:&'static str) -> Result<u64,ExtractError> {
    match record.get(key) {
        Some(Value::Number(n)) => n.as_u64().ok_or_else(||ExtractError::NotAnInteger(key,n.to_string())),
        Some(Value::String(s)) => {
            let cleaned : String = s.trim().chars().filter(|&c|c!=',').collect();
            cleaned.parse::<u64>().map_err(|_|ExtractError::NotAnInteger(key,s.clone()))
        }
        Some(other) => Err(ExtractError::NotAnInteger(key,other.to_string())),
        None => Err(ExtractError::MissingField(key)),
    }
}
