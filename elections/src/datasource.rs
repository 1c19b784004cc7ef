// Copyright 2025 Andrew Conway.
// This file is part of MassElectionStats.
// MassElectionStats is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// MassElectionStats is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with MassElectionStats.  If not, see <https://www.gnu.org/licenses/>.


//! A description of where raw contest records come from.

use std::borrow::Cow;
use crate::contest::{Office, Stage};

/// Something that can run a (year range, office, stage) search and return the raw
/// contest records, one JSON object per contest, in the order the service lists them.
///
/// Implementations do no validation; the extractor is the sole consumer of the
/// records and is responsible for coercing them. Fetch failures surface as errors
/// and are not retried here; callers wanting timeouts or retries wrap the source.
pub trait RawContestSource {
    /// the name of the election data service, e.g. "PD43+"
    fn name(&self) -> Cow<'static, str>;
    /// the url of the service the records come from.
    fn service_url(&self) -> Cow<'static, str>;
    /// Run one search. An empty result is a valid answer, not an error.
    fn search_contests(&self,year_from:u16,year_to:u16,office:Office,stage:Stage) -> anyhow::Result<Vec<serde_json::Value>>;
}
