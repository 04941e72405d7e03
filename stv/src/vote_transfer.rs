// Copyright 2026 Andrew Conway.
// This file is part of ConcreteSTV.
// ConcreteSTV is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// ConcreteSTV is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with ConcreteSTV.  If not, see <https://www.gnu.org/licenses/>.

//! Moving votes from an elected or eliminated candidate to the next continuing preference.
//! In both cases the source candidate must already have been marked as no longer continuing,
//! and only ballots currently with that candidate are touched.

use num::Zero;
use crate::ballot_metadata::CandidateIndex;
use crate::ballot_pile::{BallotPaperCount, BallotStore};
use crate::candidate_registry::CandidateRegistry;
use crate::distribution_of_preferences_transcript::Transfer;
use crate::transfer_value::{TransferValue, Votes};

#[derive(Clone,Debug,Default)]
pub struct TransferOutcome {
    /// Aggregated per destination, in registration order, with exhausted last.
    pub transfers : Vec<Transfer>,
    pub exhausted_votes : Votes,
    pub exhausted_papers : BallotPaperCount,
}

#[derive(Clone,Debug)]
pub struct SurplusDistribution {
    pub surplus : Votes,
    /// surplus/tally. None if there was no surplus, in which case nothing moved.
    pub transfer_value : Option<TransferValue>,
    pub outcome : TransferOutcome,
}

/// Sums up papers and votes going to each destination.
struct TransferAccumulator {
    from : CandidateIndex,
    to_candidate : Vec<Option<(BallotPaperCount,Votes)>>,
    exhausted : Option<(BallotPaperCount,Votes)>,
}

impl TransferAccumulator {
    fn new(from:CandidateIndex,num_candidates:usize) -> Self {
        TransferAccumulator{ from, to_candidate: vec![None;num_candidates], exhausted: None }
    }
    fn add(&mut self,to:Option<CandidateIndex>,papers:BallotPaperCount,votes:Votes) {
        let entry = match to {
            Some(c) => &mut self.to_candidate[c.0],
            None => &mut self.exhausted,
        };
        let (p,v) = entry.get_or_insert_with(||(BallotPaperCount(0),Votes::zero()));
        *p+=papers;
        *v+=votes;
    }
    fn finish(self) -> TransferOutcome {
        let from = self.from;
        let (exhausted_papers,exhausted_votes) = self.exhausted.clone().unwrap_or_else(||(BallotPaperCount(0),Votes::zero()));
        let transfers = self.to_candidate.into_iter().enumerate()
            .filter_map(|(i,t)|t.map(|(papers,votes)|Transfer{from,to:Some(CandidateIndex(i)),papers,votes}))
            .chain(self.exhausted.map(|(papers,votes)|Transfer{from,to:None,papers,votes}))
            .collect();
        TransferOutcome{ transfers, exhausted_votes, exhausted_papers }
    }
}

/// Transfer the surplus of an elected candidate, Gregory style. All ballots with the candidate
/// have their transfer value multiplied by surplus/tally and move on to their next continuing preference.
///
/// If the tally does not exceed the quota there is no surplus. The ballots then stay with the candidate
/// permanently (with zero weight, so they are not counted again) and no transfers are recorded.
pub fn distribute_surplus(ballots:&mut BallotStore,candidates:&CandidateRegistry,from:CandidateIndex,tally:&Votes,quota:&Votes) -> SurplusDistribution {
    let surplus = if tally>quota { tally-quota } else { Votes::zero() };
    match TransferValue::from_surplus(&surplus,tally).filter(|ratio|!ratio.is_zero()) {
        None => {
            for vote in ballots.held_by_mut(from) { vote.retire(); }
            SurplusDistribution{ surplus, transfer_value: None, outcome: TransferOutcome::default() }
        }
        Some(ratio) => {
            let mut accumulator = TransferAccumulator::new(from,candidates.num_candidates());
            for vote in ballots.held_by_mut(from) {
                vote.transfer_value=vote.transfer_value.scale(&ratio);
                let to = vote.advance(candidates);
                accumulator.add(to,vote.n,vote.votes());
            }
            SurplusDistribution{ surplus, transfer_value: Some(ratio), outcome: accumulator.finish() }
        }
    }
}

/// Transfer all of an eliminated candidate's ballots at their current value.
pub fn transfer_eliminated(ballots:&mut BallotStore,candidates:&CandidateRegistry,from:CandidateIndex) -> TransferOutcome {
    let mut accumulator = TransferAccumulator::new(from,candidates.num_candidates());
    for vote in ballots.held_by_mut(from) {
        let to = vote.advance(candidates);
        accumulator.add(to,vote.n,vote.votes());
    }
    accumulator.finish()
}
