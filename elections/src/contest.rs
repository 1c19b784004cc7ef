//! Information about one contest: the office, the district, the candidates, and the summary row derived from them.

use chrono::NaiveDate;
use serde::{Serialize,Deserialize};
use std::fmt;

/// the opaque identifier the data service assigns to one contest
#[derive(Clone, PartialEq, Eq, Hash,Serialize,Deserialize)]
pub struct ElectionId(pub String);
// type alias really, don't want long display
impl fmt::Display for ElectionId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result { write!(f, "{}", self.0) }
}
// type alias really, don't want long display
impl fmt::Debug for ElectionId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result { write!(f, "#{}", self.0) }
}

/// The offices the service tracks. One fixed taxonomy for one jurisdiction.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug,Serialize,Deserialize)]
pub enum Office {
    President,
    #[serde(rename = "US House")]
    USHouse,
    #[serde(rename = "US Senate")]
    USSenate,
    #[serde(rename = "State Rep")]
    StateRep,
    #[serde(rename = "State Senate")]
    StateSenate,
    #[serde(rename = "Governor's Council")]
    GovCouncil,
}

impl Office {
    /// Years between regularly scheduled elections for the office. The previous
    /// contest in a district is this many years back at most.
    pub fn cycle_years(self) -> u16 {
        match self {
            Office::President => 4,
            Office::USHouse => 2,
            Office::USSenate => 6,
            Office::StateRep => 2,
            Office::StateSenate => 2,
            Office::GovCouncil => 2,
        }
    }
    pub fn name(self) -> &'static str {
        match self {
            Office::President => "President",
            Office::USHouse => "US House",
            Office::USSenate => "US Senate",
            Office::StateRep => "State Rep",
            Office::StateSenate => "State Senate",
            Office::GovCouncil => "Governor's Council",
        }
    }
    /// The service is not consistent about office naming between search queries and
    /// record payloads; accept the variants seen in the wild.
    pub fn from_name(name:&str) -> Option<Office> {
        match name {
            "President" => Some(Office::President),
            "US House" | "U.S. House" | "U.S. House of Representatives" => Some(Office::USHouse),
            "US Senate" | "U.S. Senate" => Some(Office::USSenate),
            "State Rep" | "State Representative" => Some(Office::StateRep),
            "State Senate" | "State Senator" => Some(Office::StateSenate),
            "Gov Council" | "Governor's Council" | "Governors Council" => Some(Office::GovCouncil),
            _ => None,
        }
    }
    /// Contests for these offices are not districted within the state; they get a fixed
    /// district label instead of whatever the district record says.
    pub fn statewide_district(self) -> Option<&'static str> {
        match self {
            Office::President => Some("United States"),
            Office::USSenate => Some("Massachusetts"),
            _ => None,
        }
    }
}

impl fmt::Display for Office {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result { f.write_str(self.name()) }
}

/// Which phase of the election process a search covers.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug,Serialize,Deserialize)]
pub enum Stage {
    General,
    Primaries,
    Democratic,
    Republican,
}

impl Stage {
    /// the form used in search urls
    pub fn as_str(self) -> &'static str {
        match self {
            Stage::General => "General",
            Stage::Primaries => "Primaries",
            Stage::Democratic => "Democratic",
            Stage::Republican => "Republican",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result { f.write_str(self.as_str()) }
}

/// One candidate's line in one contest, as received.
#[derive(Clone,Debug,Serialize,Deserialize)]
pub struct CandidateRecord {
    pub display_name : String,
    /// the ballot line the candidate ran under, if any.
    pub party : Option<String>,
    pub votes : u64,
    /// the service is expected to flag at most one winner per contest.
    pub is_winner : bool,
}

/// The normalized one-row-per-contest record. Built once per query, read only afterwards.
#[derive(Clone,Debug,Serialize,Deserialize)]
pub struct ElectionSummary {
    pub election_id : ElectionId,
    pub year : u16,
    pub date : NaiveDate,
    pub office : Office,
    /// "United States" for President, "Massachusetts" for US Senate, otherwise the
    /// district display name from the record.
    pub district : String,
    pub is_special : bool,
    /// set when the contest is a single party's primary.
    pub party_primary : Option<String>,
    /// in the order the service returned them.
    pub candidates : Vec<CandidateRecord>,
    pub num_candidates : usize,
    pub dem_candidate : Option<String>,
    pub gop_candidate : Option<String>,
    /// comma joined names of candidates running under neither major party. Empty if none.
    pub other_candidates : String,
    pub dem_votes : Option<u64>,
    pub gop_votes : Option<u64>,
    /// totals from the election record itself, independent of per-candidate sums.
    pub total_votes : u64,
    pub other_votes : u64,
    pub blank_votes : u64,
    pub winner : Option<String>,
    pub winner_votes : Option<u64>,
    /// winner_votes / total_votes, in [0,1] whenever present.
    pub winner_pct : Option<f64>,
    pub winning_party : Option<String>,
    /// dem_votes / (dem_votes + gop_votes), in [0,1] whenever present.
    pub dem_percent : Option<f64>,
    /// None until resolved, and permanently None for the earliest contest in a district.
    #[serde(skip_serializing_if = "Option::is_none",default)]
    pub incumbency : Option<Incumbency>,
}

impl ElectionSummary {
    pub fn candidate_named(&self,name:&str) -> Option<&CandidateRecord> {
        self.candidates.iter().find(|c|c.display_name==name)
    }
    pub fn has_candidate_named(&self,name:&str) -> bool {
        self.candidates.iter().any(|c|c.display_name==name)
    }
}

/// What the previous contest in the district implies about this one.
#[derive(Clone,Debug,Serialize,Deserialize)]
pub struct Incumbency {
    /// winner of the immediately preceding contest in the district, however long ago.
    pub incumbent : Option<String>,
    /// the party that won the preceding contest.
    pub prev_party : Option<String>,
    /// the ballot line the incumbent runs under this time, if they appear at all.
    /// An incumbent who changed party or did not re-file resolves to None.
    pub incumbent_party : Option<String>,
    pub incumbent_status : IncumbentStatus,
    /// the incumbent's name is not among this contest's candidates.
    pub open_race : bool,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug,Serialize,Deserialize)]
pub enum IncumbentStatus {
    #[serde(rename = "Dem incumbent")]
    DemIncumbent,
    #[serde(rename = "GOP incumbent")]
    GopIncumbent,
    #[serde(rename = "No incumbent")]
    NoIncumbent,
}

impl IncumbentStatus {
    /// Classify by the party the incumbent is running under *now*. An incumbent running
    /// under a different ballot line counts as no incumbent. This matches the service's
    /// historical records (e.g. contests 131567 and 131541) and is deliberate.
    pub fn from_incumbent_party(party:Option<&str>) -> IncumbentStatus {
        match party {
            Some("Democratic") => IncumbentStatus::DemIncumbent,
            Some("Republican") => IncumbentStatus::GopIncumbent,
            _ => IncumbentStatus::NoIncumbent,
        }
    }
    pub fn as_str(self) -> &'static str {
        match self {
            IncumbentStatus::DemIncumbent => "Dem incumbent",
            IncumbentStatus::GopIncumbent => "GOP incumbent",
            IncumbentStatus::NoIncumbent => "No incumbent",
        }
    }
}

impl fmt::Display for IncumbentStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result { f.write_str(self.as_str()) }
}
