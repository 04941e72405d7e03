// Copyright 2021-2026 Andrew Conway.
// This file is part of ConcreteSTV.
// ConcreteSTV is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// ConcreteSTV is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with ConcreteSTV.  If not, see <https://www.gnu.org/licenses/>.

//! The round by round distribution of preferences.
//!
//! Each round does exactly one of the following
//! * If anyone continuing has at least a quota at the start of the round, elect them one at a time,
//!   highest current tally first, transferring each surplus before choosing the next.
//! * Otherwise, if there are no more continuing candidates than unfilled seats, elect them all.
//! * Otherwise exclude the lowest candidate and transfer their votes at their current value.
//!
//! The count stops when all seats are filled or there is no one left continuing.

use num::Zero;
use tracing::{debug, info, warn};
use crate::ballot_metadata::{CandidateIndex, ElectionMetadata, NumberOfCandidates};
use crate::ballot_paper::RankedVote;
use crate::ballot_pile::{BallotPaperCount, BallotStore};
use crate::candidate_registry::{CandidateRegistry, CandidateStatus};
use crate::distribution_of_preferences_transcript::{CandidateElected, CandidateTally, ElectionReason, EndRoundStatus, QuotaInfo, RoundAction, RoundNumber, RoundRecord, Transcript, Transfer};
use crate::error::ElectionError;
use crate::tie_resolution::{TieBreaker, TieResolutionDecision};
use crate::transfer_value::Votes;
use crate::vote_transfer::{distribute_surplus, transfer_eliminated, TransferOutcome};

#[derive(Copy,Clone,Debug,PartialEq,Eq)]
enum CountState {
    Counting,
    Completed,
}

/// Things that happened in the round currently being done.
#[derive(Default)]
struct InThisRound {
    elected : Vec<CandidateElected>,
    transfers : Vec<Transfer>,
    decisions : Vec<TieResolutionDecision>,
}

/// Working state for one count. Created fresh for each count, so an election can be counted any number of times.
pub struct PreferenceDistributor<'a> {
    metadata : &'a ElectionMetadata,
    ballots : BallotStore<'a>,
    candidates : CandidateRegistry,
    tie_breaker : &'a TieBreaker,
    quota : Votes,
    vacancies : NumberOfCandidates,
    /// For elected candidates, the value kept after any surplus was transferred.
    retained : Vec<Votes>,
    exhausted : Votes,
    exhausted_papers : BallotPaperCount,
    /// Tallies of all candidates at the start of each round so far, oldest first. Used for countback.
    history : Vec<Vec<Votes>>,
    transcript : Transcript,
    state : CountState,
}

impl <'a> PreferenceDistributor<'a> {
    pub fn new(metadata:&'a ElectionMetadata,votes:&'a [RankedVote],tie_breaker:&'a TieBreaker,quota:QuotaInfo) -> Self {
        let num_candidates = metadata.num_candidates();
        PreferenceDistributor {
            metadata,
            ballots: BallotStore::new(votes,num_candidates),
            candidates: CandidateRegistry::new(num_candidates),
            tie_breaker,
            quota: quota.quota.clone(),
            vacancies: quota.vacancies,
            retained: vec![Votes::zero();num_candidates],
            exhausted: Votes::zero(),
            exhausted_papers: BallotPaperCount(0),
            history: vec![],
            transcript: Transcript{ quota, rounds: vec![], elected: vec![] },
            state: CountState::Counting,
        }
    }

    fn name(&self,candidate:CandidateIndex) -> &str { &self.metadata.candidate(candidate).name }

    pub fn remaining_to_elect(&self) -> usize { self.vacancies.0-self.candidates.elected().len() }

    /// Run rounds until the count is complete.
    pub fn go(mut self) -> Result<Transcript,ElectionError> {
        info!(quota=%self.quota,vacancies=self.vacancies.0,papers=self.transcript.quota.papers.0,"Starting count");
        while self.state==CountState::Counting {
            self.run_round()?;
        }
        info!(elected=%self.metadata.names(self.candidates.elected()),rounds=self.transcript.rounds.len(),"Count complete");
        Ok(self.transcript)
    }

    fn run_round(&mut self) -> Result<(),ElectionError> {
        let round = RoundNumber(self.transcript.rounds.len()+1);
        let tallies = self.ballots.tallies();
        self.history.push(tallies.clone());
        let continuing = self.candidates.continuing();
        let start_tallies : Vec<CandidateTally> = continuing.iter().map(|&candidate|CandidateTally{
            candidate,
            votes: tallies[candidate.0].clone(),
            papers: self.ballots.papers(candidate),
        }).collect();
        debug!(round=round.0,tallies=%start_tallies.iter().map(|t|format!("{}={}",self.name(t.candidate),t.votes)).collect::<Vec<_>>().join(" "),"Start of round");
        let mut in_round = InThisRound::default();
        let reached_quota : Vec<CandidateIndex> = continuing.iter().copied().filter(|c|tallies[c.0]>=self.quota).collect();
        let action = if !reached_quota.is_empty() {
            self.elect_by_quota(reached_quota,&mut in_round)?;
            RoundAction::ElectedByQuota
        } else {
            match self.tie_breaker.lowest(&continuing,&tallies,&self.history) {
                Some((lowest,decision)) if continuing.len()>self.remaining_to_elect() => {
                    self.exclude(lowest,decision,&tallies,&mut in_round)?;
                    RoundAction::Eliminated(lowest)
                }
                _ => {
                    self.elect_all_remaining(&continuing,&tallies,&mut in_round)?;
                    RoundAction::ElectedAllRemaining
                }
            }
        };
        self.end_of_round(round,start_tallies,action,in_round);
        Ok(())
    }

    /// Elect the candidates who had a quota at the start of the round, highest current tally first,
    /// transferring each surplus before choosing the next.
    fn elect_by_quota(&mut self,mut pending:Vec<CandidateIndex>,in_round:&mut InThisRound) -> Result<(),ElectionError> {
        while self.remaining_to_elect()>0 {
            let tallies = self.ballots.tallies();
            let Some((who,decision)) = self.tie_breaker.highest(&pending,&tallies,&self.history) else { break; };
            if let Some(decision) = decision {
                warn!(decision=%decision.describe(self.metadata),"Tie in order of election");
                in_round.decisions.push(decision);
            }
            pending.retain(|&c|c!=who);
            let votes = tallies[who.0].clone();
            self.declare_elected(who,ElectionReason::ReachedQuota)?;
            let distribution = distribute_surplus(&mut self.ballots,&self.candidates,who,&votes,&self.quota);
            info!(candidate=self.name(who),votes=%votes,surplus=%distribution.surplus,"Elected by quota");
            if let Some(ratio) = &distribution.transfer_value { debug!(candidate=self.name(who),transfer_value=%ratio,"Transferring surplus"); }
            self.retained[who.0] = &votes-&distribution.surplus;
            in_round.elected.push(CandidateElected{
                who,
                why: ElectionReason::ReachedQuota,
                votes,
                surplus: distribution.surplus,
                transfer_value: distribution.transfer_value,
            });
            self.absorb(distribution.outcome,in_round);
        }
        Ok(())
    }

    /// Everyone left gets a seat, in decreasing order of tally.
    fn elect_all_remaining(&mut self,continuing:&[CandidateIndex],tallies:&[Votes],in_round:&mut InThisRound) -> Result<(),ElectionError> {
        let (order,decisions) = self.tie_breaker.order_elected(continuing,tallies,&self.history);
        for decision in decisions {
            warn!(decision=%decision.describe(self.metadata),"Tie in order of election");
            in_round.decisions.push(decision);
        }
        for who in order {
            let votes = tallies[who.0].clone();
            self.declare_elected(who,ElectionReason::AllRemainingMustBeElected)?;
            info!(candidate=self.name(who),votes=%votes,"Elected as all remaining candidates must be elected");
            self.retained[who.0] = votes.clone();
            in_round.elected.push(CandidateElected{
                who,
                why: ElectionReason::AllRemainingMustBeElected,
                votes,
                surplus: Votes::zero(),
                transfer_value: None,
            });
        }
        Ok(())
    }

    fn exclude(&mut self,who:CandidateIndex,decision:Option<TieResolutionDecision>,tallies:&[Votes],in_round:&mut InThisRound) -> Result<(),ElectionError> {
        if let Some(decision) = decision {
            warn!(decision=%decision.describe(self.metadata),"Tie for exclusion");
            in_round.decisions.push(decision);
        }
        self.candidates.mark_eliminated(who)?;
        info!(candidate=self.name(who),votes=%tallies[who.0],"Excluded");
        let outcome = transfer_eliminated(&mut self.ballots,&self.candidates,who);
        self.absorb(outcome,in_round);
        Ok(())
    }

    fn declare_elected(&mut self,who:CandidateIndex,why:ElectionReason) -> Result<(),ElectionError> {
        self.candidates.mark_elected(who)?;
        debug!(candidate=self.name(who),reason=?why,"Declared elected");
        self.transcript.elected.push(who);
        Ok(())
    }

    fn absorb(&mut self,outcome:TransferOutcome,in_round:&mut InThisRound) {
        for transfer in &outcome.transfers {
            debug!(from=self.name(transfer.from),to=transfer.to.map(|c|self.name(c)).unwrap_or("exhausted"),papers=transfer.papers.0,votes=%transfer.votes,"Transfer");
        }
        self.exhausted+=outcome.exhausted_votes;
        self.exhausted_papers+=outcome.exhausted_papers;
        in_round.transfers.extend(outcome.transfers);
    }

    fn end_of_round(&mut self,round:RoundNumber,tallies:Vec<CandidateTally>,action:RoundAction,in_round:InThisRound) {
        let current = self.ballots.tallies();
        let held : Vec<Votes> = self.candidates.statuses().iter().enumerate().map(|(i,status)|match status {
            CandidateStatus::Continuing => current[i].clone(),
            CandidateStatus::Elected => self.retained[i].clone(),
            CandidateStatus::Eliminated => Votes::zero(),
        }).collect();
        let status = EndRoundStatus{
            held,
            candidate_status: self.candidates.statuses().to_vec(),
            exhausted: self.exhausted.clone(),
            exhausted_papers: self.exhausted_papers,
        };
        debug_assert_eq!(status.total(),self.transcript.quota.total_votes,"Votes not conserved in round {}",round);
        debug!(round=round.0,exhausted=%self.exhausted,"End of round");
        self.transcript.rounds.push(RoundRecord{
            round,
            tallies,
            action,
            elected: in_round.elected,
            transfers: in_round.transfers,
            decisions: in_round.decisions,
            status,
        });
        if self.remaining_to_elect()==0 || self.candidates.num_continuing()==0 {
            self.state=CountState::Completed;
        }
    }
}
