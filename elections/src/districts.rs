// Copyright 2025 Andrew Conway.
// This file is part of MassElectionStats.
// MassElectionStats is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// MassElectionStats is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with MassElectionStats.  If not, see <https://www.gnu.org/licenses/>.


//! Converting legislative district labels between their word form ("First Middlesex")
//! and numeric ordinal form ("1st Middlesex"). Different publications use different
//! forms; this is display and lookup only, never consulted when grouping contests.

use std::collections::HashMap;
use once_cell::sync::Lazy;

/// word forms by rank; rank 1 is index 0. Massachusetts district numbering tops out at 37.
static WORD_FORMS : [&str; 37] = [
    "First", "Second", "Third", "Fourth", "Fifth", "Sixth", "Seventh", "Eighth",
    "Ninth", "Tenth", "Eleventh", "Twelfth", "Thirteenth", "Fourteenth", "Fifteenth",
    "Sixteenth", "Seventeenth", "Eighteenth", "Nineteenth", "Twentieth",
    "Twenty-First", "Twenty-Second", "Twenty-Third", "Twenty-Fourth", "Twenty-Fifth",
    "Twenty-Sixth", "Twenty-Seventh", "Twenty-Eighth", "Twenty-Ninth", "Thirtieth",
    "Thirty-First", "Thirty-Second", "Thirty-Third", "Thirty-Fourth", "Thirty-Fifth",
    "Thirty-Sixth", "Thirty-Seventh",
];

static WORD_TO_RANK : Lazy<HashMap<&'static str,usize>> = Lazy::new(||WORD_FORMS.iter().enumerate().map(|(i,&w)|(w,i+1)).collect());
static ORDINAL_TO_RANK : Lazy<HashMap<String,usize>> = Lazy::new(||(1..=WORD_FORMS.len()).map(|rank|(ordinal_form(rank),rank)).collect());

/// "1st", "2nd", "3rd", "4th", ... "21st", ...
fn ordinal_form(rank:usize) -> String {
    let suffix = match rank%100 {
        11|12|13 => "th",
        _ => match rank%10 { 1 => "st", 2 => "nd", 3 => "rd", _ => "th" },
    };
    format!("{}{}",rank,suffix)
}

/// Convert the first word of a legislative district name from word form to ordinal
/// form. Names whose first word is not an ordinal word pass through unchanged.
/// ```
/// use elections::districts::word_to_ordinal;
/// assert_eq!(word_to_ordinal("First Middlesex"),"1st Middlesex");
/// assert_eq!(word_to_ordinal("Twenty-Second Middlesex"),"22nd Middlesex");
/// assert_eq!(word_to_ordinal("Cape and Islands"),"Cape and Islands");
/// ```
pub fn word_to_ordinal(name:&str) -> String {
    match name.split_once(' ') {
        Some((first,rest)) => match WORD_TO_RANK.get(first) {
            Some(&rank) => format!("{} {}",ordinal_form(rank),rest),
            None => name.to_string(),
        }
        None => name.to_string(),
    }
}

/// Convert the first word of a legislative district name from ordinal form back to
/// word form. Names whose first word is not an ordinal pass through unchanged.
/// ```
/// use elections::districts::ordinal_to_word;
/// assert_eq!(ordinal_to_word("1st Middlesex"),"First Middlesex");
/// assert_eq!(ordinal_to_word("Barnstable, Dukes and Nantucket"),"Barnstable, Dukes and Nantucket");
/// ```
pub fn ordinal_to_word(name:&str) -> String {
    match name.split_once(' ') {
        Some((first,rest)) => match ORDINAL_TO_RANK.get(first) {
            Some(&rank) => format!("{} {}",WORD_FORMS[rank-1],rest),
            None => name.to_string(),
        }
        None => name.to_string(),
    }
}
