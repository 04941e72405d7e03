// Copyright 2021-2026 Andrew Conway.
// This file is part of ConcreteSTV.
// ConcreteSTV is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// ConcreteSTV is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with ConcreteSTV.  If not, see <https://www.gnu.org/licenses/>.

//! Store the history of the distribution of preferences


use crate::ballot_pile::BallotPaperCount;
use crate::ballot_metadata::{CandidateIndex, ElectionMetadata, NumberOfCandidates};
use crate::candidate_registry::CandidateStatus;
use crate::tie_resolution::TieResolutionDecision;
use crate::transfer_value::{TransferValue, Votes};
use serde::{Serialize,Deserialize};
use std::fmt;


/// The number of a round, as a human would count it. 1 means the first.
#[derive(Copy,Clone,Debug,Ord, PartialOrd, Eq, PartialEq,Hash,Serialize,Deserialize)]
#[serde(transparent)]
pub struct RoundNumber(pub usize);

impl fmt::Display for RoundNumber {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result { write!(f, "{}", self.0) }
}

/// A continuing candidate's position at the start of a round.
#[derive(Clone,Debug,Serialize,Deserialize,PartialEq,Eq)]
pub struct CandidateTally {
    pub candidate : CandidateIndex,
    pub votes : Votes,
    pub papers : BallotPaperCount,
}

#[derive(Copy,Clone,Debug,Serialize,Deserialize,PartialEq,Eq)]
pub enum ElectionReason {
    ReachedQuota,
    /// There were no more continuing candidates than unfilled seats.
    AllRemainingMustBeElected,
}

#[derive(Clone,Debug,Serialize,Deserialize,PartialEq,Eq)]
pub struct CandidateElected {
    pub who : CandidateIndex,
    pub why : ElectionReason,
    /// tally at the time of election
    pub votes : Votes,
    /// the amount above the quota, zero if at or below it.
    pub surplus : Votes,
    /// The ratio applied to the candidate's ballots if a surplus was transferred.
    #[serde(skip_serializing_if = "Option::is_none",default)]
    pub transfer_value : Option<TransferValue>,
}

impl CandidateElected {
    /// What stays with the candidate after the surplus has gone.
    pub fn retained(&self) -> Votes { &self.votes-&self.surplus }
}

/// The one thing done in a round.
#[derive(Clone,Debug,Serialize,Deserialize,PartialEq,Eq)]
pub enum RoundAction {
    /// One or more candidates reached the quota and had their surplus transferred.
    ElectedByQuota,
    Eliminated(CandidateIndex),
    /// Everyone continuing was elected without reaching the quota.
    ElectedAllRemaining,
}

/// Value moved from one candidate to another (or to the exhausted pile if to is None).
#[derive(Clone,Debug,Serialize,Deserialize,PartialEq,Eq)]
pub struct Transfer {
    pub from : CandidateIndex,
    #[serde(skip_serializing_if = "Option::is_none",default)]
    pub to : Option<CandidateIndex>,
    pub papers : BallotPaperCount,
    pub votes : Votes,
}

impl Transfer {
    pub fn is_exhausted(&self) -> bool { self.to.is_none() }
}

/// Record the status of the count at the end of a round.
#[derive(Clone,Debug,Serialize,Deserialize,PartialEq,Eq)]
pub struct EndRoundStatus {
    /// For each candidate : the tally if continuing, the retained value if elected, zero if eliminated.
    pub held : Vec<Votes>,
    pub candidate_status : Vec<CandidateStatus>,
    /// Total value of votes that could not go to anyone.
    pub exhausted : Votes,
    pub exhausted_papers : BallotPaperCount,
}

impl EndRoundStatus {
    /// Should always be the total number of valid votes.
    pub fn total(&self) -> Votes { self.held.iter().sum::<Votes>()+self.exhausted.clone() }
}

#[derive(Clone,Debug,Serialize,Deserialize,PartialEq,Eq)]
pub struct RoundRecord {
    pub round : RoundNumber,
    /// Tallies of the continuing candidates at the start of the round, in registration order.
    pub tallies : Vec<CandidateTally>,
    pub action : RoundAction,
    /// Who, if anyone, was elected in this round, in order of election.
    #[serde(skip_serializing_if = "Vec::is_empty",default)]
    pub elected : Vec<CandidateElected>,
    #[serde(skip_serializing_if = "Vec::is_empty",default)]
    pub transfers : Vec<Transfer>,
    /// Any ties that had to be resolved.
    #[serde(skip_serializing_if = "Vec::is_empty",default)]
    pub decisions : Vec<TieResolutionDecision>,
    /// status at end of round.
    pub status : EndRoundStatus,
}

impl RoundRecord {
    pub fn tally_of(&self,candidate:CandidateIndex) -> Option<&Votes> {
        self.tallies.iter().find(|t|t.candidate==candidate).map(|t|&t.votes)
    }
    pub fn elected_candidates(&self) -> Vec<CandidateIndex> { self.elected.iter().map(|e|e.who).collect() }
}

#[derive(Clone,Debug,Serialize,Deserialize,PartialEq,Eq)]
pub struct QuotaInfo {
    /// Formal papers. Informal ones are not included.
    pub papers : BallotPaperCount,
    pub informal : BallotPaperCount,
    /// The total value of formal papers, which is the value conserved throughout the count.
    pub total_votes : Votes,
    pub vacancies : NumberOfCandidates,
    pub quota : Votes,
}

/// The result of a count, with enough information to check every step.
#[derive(Clone,Debug,Serialize,Deserialize,PartialEq,Eq)]
pub struct Transcript {
    pub quota : QuotaInfo,
    pub rounds : Vec<RoundRecord>,
    /// In order of election.
    pub elected : Vec<CandidateIndex>,
}

impl Transcript {
    /// The first preference tallies, which are the tallies at the start of the first round.
    pub fn first_preferences(&self) -> &[CandidateTally] {
        self.rounds.first().map(|r|r.tallies.as_slice()).unwrap_or(&[])
    }
}

#[derive(Clone,Debug,Serialize,Deserialize)]
pub struct TranscriptWithMetadata {
    pub metadata : ElectionMetadata,
    pub transcript : Transcript,
}

impl TranscriptWithMetadata {
    pub fn elected_names(&self) -> Vec<String> {
        self.transcript.elected.iter().map(|&c|self.metadata.candidate(c).name.clone()).collect()
    }
}
