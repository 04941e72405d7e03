// Copyright 2026 Andrew Conway.
// This file is part of ConcreteSTV.
// ConcreteSTV is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// ConcreteSTV is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with ConcreteSTV.  If not, see <https://www.gnu.org/licenses/>.

//! Things that can stop an election being set up or counted.

use thiserror::Error;
use crate::candidate_registry::StatusTransitionError;

/// Something wrong with the ballots themselves.
#[derive(Error,Debug,Clone,PartialEq,Eq)]
pub enum ValidationError {
    #[error("Ballot {ballot} lists candidate {candidate} more than once")]
    RepeatedCandidate{ballot:usize,candidate:String},
    #[error("Ballot {ballot} refers to candidate #{index} but there are only {num_candidates} candidates")]
    UnknownCandidate{ballot:usize,index:usize,num_candidates:usize},
    #[error("Candidate name {0} is used more than once")]
    RepeatedCandidateName(String),
    #[error("The total number of papers is too large to count")]
    TooManyPapers,
}

/// Something wrong with how the election was set up.
#[derive(Error,Debug,Clone,PartialEq,Eq)]
pub enum ConfigError {
    #[error("There must be at least one seat to fill")]
    NoSeats,
    #[error("There are {seats} seats but only {candidates} candidates")]
    TooManySeats{seats:usize,candidates:usize},
    #[error("The number of seats was not specified")]
    MissingVacancies,
    #[error("Input of {records} ballot records and {candidates} candidates exceeds the limit of {limit}")]
    InputTooLarge{records:usize,candidates:usize,limit:usize},
    #[error("Tie resolution order mentions {0} who is not a candidate")]
    UnknownTieBreakCandidate(String),
    #[error("Tie resolution order mentions {0} more than once")]
    RepeatedTieBreakCandidate(String),
}

#[derive(Error,Debug,Clone,PartialEq,Eq)]
pub enum ArithmeticError {
    #[error("There are no valid votes, so no quota can be computed")]
    NoValidVotes,
}

#[derive(Error,Debug,Clone,PartialEq,Eq)]
pub enum ElectionError {
    #[error("Invalid ballot : {0}")]
    Validation(#[from] ValidationError),
    #[error("Invalid election configuration : {0}")]
    Config(#[from] ConfigError),
    #[error("Arithmetic error : {0}")]
    Arithmetic(#[from] ArithmeticError),
    #[error("Internal error : {0}")]
    Status(#[from] StatusTransitionError),
}
