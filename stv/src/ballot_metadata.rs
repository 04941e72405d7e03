// Copyright 2021-2026 Andrew Conway.
// This file is part of ConcreteSTV.
// ConcreteSTV is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// ConcreteSTV is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with ConcreteSTV.  If not, see <https://www.gnu.org/licenses/>.

//! Information about the contest, such as candidates.

use serde::{Serialize,Deserialize};
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;
use crate::tie_resolution::TieBreakPolicy;

/// a candidate, referred to by registration position, 0 being first
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CandidateIndex(pub usize);
// type alias really, don't want long display
impl fmt::Display for CandidateIndex {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result { write!(f, "{}", self.0) }
}
// type alias really, don't want long display
impl fmt::Debug for CandidateIndex {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result { write!(f, "#{}", self.0) }
}

impl FromStr for CandidateIndex {
    type Err = ParseIntError;
    fn from_str(s: &str) -> Result<Self, Self::Err> { Ok(CandidateIndex(s.parse()?)) }
}

/// A number of candidates, typically the number of vacancies.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NumberOfCandidates(pub usize);

impl fmt::Display for NumberOfCandidates {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result { write!(f, "{}", self.0) }
}

/// Information about the election
#[derive(Debug,Serialize,Deserialize,Clone)]
pub struct ElectionMetadata {
    /// A human readable description of the contest. May be empty.
    #[serde(default)]
    pub name : String,
    /// In registration order. The position in this list is the CandidateIndex.
    pub candidates : Vec<Candidate>,
    /// The number of seats to fill, if known.
    #[serde(skip_serializing_if = "Option::is_none",default)]
    pub vacancies : Option<NumberOfCandidates>,
    /// How to resolve equal tallies.
    #[serde(default)]
    pub tie_resolution : TieBreakPolicy,
}

impl ElectionMetadata {
    pub fn candidate(&self,index:CandidateIndex) -> &Candidate { &self.candidates[index.0] }
    pub fn num_candidates(&self) -> usize { self.candidates.len() }
    pub fn candidate_by_name(&self,name:&str) -> Option<CandidateIndex> {
        self.candidates.iter().position(|c|c.name==name).map(CandidateIndex)
    }
    /// Comma separated names, useful for logging.
    pub fn names(&self,candidates:&[CandidateIndex]) -> String {
        candidates.iter().map(|&c|self.candidate(c).name.as_str()).collect::<Vec<_>>().join(",")
    }
}

/// information about a candidate in the contest.
#[derive(Debug,Serialize,Deserialize,Clone,PartialEq,Eq)]
pub struct Candidate {
    /// The identifier used on ballots. Unique within an election.
    pub name : String,
}

impl Candidate {
    pub fn from_name(name:impl Into<String>) -> Self { Candidate{ name: name.into() } }
}
