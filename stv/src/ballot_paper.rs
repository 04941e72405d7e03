// Copyright 2021-2026 Andrew Conway.
// This file is part of ConcreteSTV.
// ConcreteSTV is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// ConcreteSTV is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with ConcreteSTV.  If not, see <https://www.gnu.org/licenses/>.


//! Information about a vote as cast. That is, a ranking of candidates.

use crate::ballot_metadata::CandidateIndex;
use serde::{Deserialize,Serialize};
use std::collections::HashMap;
use std::collections::HashSet;

/// A ranked vote.
#[derive(Clone,Debug,Serialize,Deserialize,PartialEq,Eq)]
pub struct RankedVote {
    /// Candidate ids, in preference order
    pub candidates : Vec<CandidateIndex>,
    /// Number of people who voted in this way.
    pub n : usize,
}

impl RankedVote {
    /// A vote with no preferences (or representing no papers) can't go to anyone.
    pub fn is_informal(&self) -> bool { self.candidates.is_empty() || self.n==0 }

    /// The first candidate mentioned more than once, if any. Such a vote is malformed.
    pub fn find_repeated_candidate(&self) -> Option<CandidateIndex> {
        let mut seen = HashSet::new();
        self.candidates.iter().copied().find(|c|!seen.insert(*c))
    }
}

/// A utility for building up a vote list, merging identical rankings.
/// Votes are kept in the order their ranking was first seen, so the result does not depend on hashing.
#[derive(Default)]
pub struct UniqueVoteBuilder {
    position : HashMap<Vec<CandidateIndex>,usize>,
    votes : Vec<RankedVote>,
}

impl UniqueVoteBuilder {
    /// Add a vote with a given preference list
    pub fn add(&mut self,prefs:Vec<CandidateIndex>) {
        self.add_vote(RankedVote{candidates:prefs,n:1})
    }
    pub fn add_vote(&mut self,vote:RankedVote) {
        match self.position.get(&vote.candidates) {
            Some(&i) => self.votes[i].n+=vote.n,
            None => {
                self.position.insert(vote.candidates.clone(),self.votes.len());
                self.votes.push(vote);
            }
        }
    }
    /// Convert to a list of votes.
    pub fn to_votes(self) -> Vec<RankedVote> { self.votes }
}

#[cfg(test)]
mod tests {
    use crate::ballot_metadata::CandidateIndex;
    use crate::ballot_paper::{RankedVote, UniqueVoteBuilder};

    #[test]
    fn test_repeated_candidate_detected() {
        let ok = RankedVote{ candidates: vec![CandidateIndex(0),CandidateIndex(2),CandidateIndex(1)], n: 1 };
        assert_eq!(None,ok.find_repeated_candidate());
        let bad = RankedVote{ candidates: vec![CandidateIndex(0),CandidateIndex(2),CandidateIndex(0)], n: 1 };
        assert_eq!(Some(CandidateIndex(0)),bad.find_repeated_candidate());
        assert!(RankedVote{ candidates: vec![], n: 5 }.is_informal());
        assert!(RankedVote{ candidates: vec![CandidateIndex(1)], n: 0 }.is_informal());
    }

    #[test]
    fn test_builder_merges_identical_rankings_in_first_seen_order() {
        let mut builder = UniqueVoteBuilder::default();
        builder.add(vec![CandidateIndex(1),CandidateIndex(0)]);
        builder.add(vec![CandidateIndex(0)]);
        builder.add_vote(RankedVote{ candidates: vec![CandidateIndex(1),CandidateIndex(0)], n: 3 });
        let votes = builder.to_votes();
        assert_eq!(2,votes.len());
        assert_eq!(vec![CandidateIndex(1),CandidateIndex(0)],votes[0].candidates);
        assert_eq!(4,votes[0].n);
        assert_eq!(1,votes[1].n);
    }
}
