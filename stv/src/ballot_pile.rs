// Copyright 2021-2026 Andrew Conway.
// This file is part of ConcreteSTV.
// ConcreteSTV is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// ConcreteSTV is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with ConcreteSTV.  If not, see <https://www.gnu.org/licenses/>.


//! Things to do with piles of ballots.

use crate::ballot_metadata::CandidateIndex;
use crate::ballot_paper::RankedVote;
use crate::candidate_registry::CandidateRegistry;
use crate::transfer_value::{TransferValue, Votes};
use num::Zero;
use std::ops::{AddAssign, Sub, Add, SubAssign};
use serde::Deserialize;
use serde::Serialize;
use std::fmt;
use std::fmt::{Debug, Display};
use std::iter::Sum;

/// A number representing a count of pieces of paper.
/// This is distinct from votes which may be fractional in the presence of weights.
#[derive(Copy,Clone,Eq, PartialEq,Serialize,Deserialize,Ord, PartialOrd,Hash,Default)]
#[serde(transparent)]
pub struct BallotPaperCount(pub usize);

impl AddAssign for BallotPaperCount {
    fn add_assign(&mut self, rhs: Self) { self.0+=rhs.0; }
}
impl SubAssign for BallotPaperCount {
    fn sub_assign(&mut self, rhs: Self) { self.0-=rhs.0; }
}

impl Sub for BallotPaperCount {
    type Output = BallotPaperCount;
    fn sub(self, rhs: Self) -> Self::Output { BallotPaperCount(self.0-rhs.0) }
}

impl Add for BallotPaperCount {
    type Output = BallotPaperCount;
    fn add(self, rhs: Self) -> Self::Output { BallotPaperCount(self.0+rhs.0) }
}
// type alias really, don't want long display
impl Display for BallotPaperCount {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result { write!(f, "{}", self.0) }
}
// type alias really, don't want long display
impl Debug for BallotPaperCount {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result { write!(f, "{}", self.0) }
}
impl Zero for BallotPaperCount {
    fn zero() -> Self { BallotPaperCount(0) }
    fn is_zero(&self) -> bool { self.0 == 0 }
}
impl Sum for BallotPaperCount {
    fn sum<I: Iterator<Item=Self>>(iter: I) -> Self {
        BallotPaperCount(usize::sum(iter.map(|b|b.0)))
    }
}

/// A vote that is somewhere through being distributed.
/// Ignore preferences with index less than upto.
/// May consist of multiple independent identical votes, all with the same transfer value.
#[derive(Clone,Debug)]
pub struct PartiallyDistributedVote<'a> {
    pub(crate) upto : usize,
    /// The number of voters
    pub n : BallotPaperCount,
    /// Preferred candidates, with index 0 being the most favoured candidate.
    pub prefs : &'a[CandidateIndex],
    /// The weight of each of the n papers.
    pub transfer_value : TransferValue,
}

impl<'a>  PartiallyDistributedVote<'a> {
    pub fn new(vote:&'a RankedVote) -> Self {
        PartiallyDistributedVote{
            upto: 0,
            n: BallotPaperCount(vote.n),
            prefs: &vote.candidates,
            transfer_value: TransferValue::one(),
        }
    }
    /// true if the cursor has gone past the last preference. Such a vote counts for no-one.
    pub fn exhausted(&self) -> bool { self.upto>=self.prefs.len() }
    /// The candidate currently holding this vote, if any.
    pub fn candidate(&self) -> Option<CandidateIndex> { self.prefs.get(self.upto).copied() }
    /// The total value of the vote, transfer value times number of papers.
    pub fn votes(&self) -> Votes { self.transfer_value.mul(self.n) }
    /// The position of the cursor in the preference list.
    pub fn cursor(&self) -> usize { self.upto }

    /// Move the cursor forward to the next continuing candidate, which is returned.
    /// If there is none, the vote becomes exhausted and None is returned.
    pub fn advance(&mut self,candidates:&CandidateRegistry) -> Option<CandidateIndex> {
        while self.upto<self.prefs.len() && !candidates.is_continuing(self.prefs[self.upto]) { self.upto+=1; }
        self.candidate()
    }

    /// Keep the vote permanently with whoever currently has it. Used when an elected candidate has no surplus.
    pub fn retire(&mut self) {
        self.transfer_value=TransferValue::zero();
        self.upto=self.prefs.len();
    }
}

/// All the formal votes in a count, with the current position and weight of each.
#[derive(Clone,Debug)]
pub struct BallotStore<'a> {
    votes : Vec<PartiallyDistributedVote<'a>>,
    num_candidates : usize,
}

impl <'a> BallotStore<'a> {
    /// Informal votes are left out entirely.
    pub fn new(votes:&'a [RankedVote],num_candidates:usize) -> Self {
        BallotStore {
            votes: votes.iter().filter(|v|!v.is_informal()).map(PartiallyDistributedVote::new).collect(),
            num_candidates,
        }
    }

    pub fn votes(&self) -> &[PartiallyDistributedVote<'a>] { &self.votes }

    /// Total papers, counting multiplicity.
    pub fn num_papers(&self) -> BallotPaperCount { self.votes.iter().map(|v|v.n).sum() }

    /// The sum of the value of every vote, whether with a candidate or not.
    pub fn total_votes(&self) -> Votes { self.votes.iter().map(|v|v.votes()).sum() }

    /// Sum of the weights of votes whose cursor currently points at the candidate.
    pub fn tally(&self,candidate:CandidateIndex) -> Votes {
        self.votes.iter().filter(|v|v.candidate()==Some(candidate)).map(|v|v.votes()).sum()
    }

    /// Tally for every candidate in one pass, indexed by CandidateIndex.
    pub fn tallies(&self) -> Vec<Votes> {
        let mut res = vec![Votes::zero();self.num_candidates];
        for v in &self.votes {
            if let Some(c) = v.candidate() { res[c.0]+=v.votes(); }
        }
        res
    }

    /// Number of papers currently with the candidate.
    pub fn papers(&self,candidate:CandidateIndex) -> BallotPaperCount {
        self.votes.iter().filter(|v|v.candidate()==Some(candidate)).map(|v|v.n).sum()
    }

    /// The votes currently with the candidate, for transferring.
    pub fn held_by_mut(&mut self,candidate:CandidateIndex) -> impl Iterator<Item=&mut PartiallyDistributedVote<'a>> {
        self.votes.iter_mut().filter(move |v|v.candidate()==Some(candidate))
    }
}

#[cfg(test)]
mod tests {
    use crate::ballot_metadata::CandidateIndex;
    use crate::ballot_paper::RankedVote;
    use crate::ballot_pile::{BallotPaperCount, BallotStore};
    use crate::candidate_registry::CandidateRegistry;
    use crate::transfer_value::Votes;

    fn votes() -> Vec<RankedVote> {
        vec![
            RankedVote{ candidates: vec![CandidateIndex(0),CandidateIndex(1),CandidateIndex(2)], n: 1 },
            RankedVote{ candidates: vec![CandidateIndex(1),CandidateIndex(2)], n: 1 },
            RankedVote{ candidates: vec![CandidateIndex(0),CandidateIndex(3)], n: 1 },
            RankedVote{ candidates: vec![CandidateIndex(2),CandidateIndex(1),CandidateIndex(0)], n: 1 },
            RankedVote{ candidates: vec![], n: 4 },
        ]
    }

    #[test]
    fn test_first_preference_tallies() {
        let votes = votes();
        let store = BallotStore::new(&votes,4);
        assert_eq!(4,store.votes().len());
        assert_eq!(BallotPaperCount(4),store.num_papers());
        assert_eq!(vec![Votes::from(2),Votes::from(1),Votes::from(1),Votes::from(0)],store.tallies());
        assert_eq!(Votes::from(2),store.tally(CandidateIndex(0)));
        assert_eq!(BallotPaperCount(0),store.papers(CandidateIndex(3)));
    }

    #[test]
    fn test_cursor_skips_candidates_no_longer_continuing() {
        let votes = votes();
        let mut store = BallotStore::new(&votes,4);
        let mut registry = CandidateRegistry::new(4);
        registry.mark_eliminated(CandidateIndex(1)).unwrap();
        registry.mark_elected(CandidateIndex(0)).unwrap();
        let mut destinations = vec![];
        for v in store.held_by_mut(CandidateIndex(0)) {
            let before = v.cursor();
            destinations.push(v.advance(&registry));
            assert!(v.cursor()>before);
        }
        assert_eq!(vec![Some(CandidateIndex(2)),Some(CandidateIndex(3))],destinations);
        assert_eq!(Votes::from(2),store.tally(CandidateIndex(2)));
        for v in store.held_by_mut(CandidateIndex(1)) {
            assert_eq!(Some(CandidateIndex(2)),v.advance(&registry));
        }
        assert_eq!(Votes::from(3),store.tally(CandidateIndex(2)));
        assert_eq!(Votes::from(4),store.total_votes());
    }
}
