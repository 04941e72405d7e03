// Copyright 2021-2026 Andrew Conway.
// This file is part of ConcreteSTV.
// ConcreteSTV is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// ConcreteSTV is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with ConcreteSTV.  If not, see <https://www.gnu.org/licenses/>.


//! Resolving equal tallies. This is never random; the same election always resolves the same way.

use crate::ballot_metadata::{CandidateIndex, ElectionMetadata};
use crate::error::ConfigError;
use crate::transfer_value::Votes;
use std::collections::{BTreeMap, HashSet};
use serde::{Serialize,Deserialize};

/// How ties are to be resolved, as configured for an election.
#[derive(Serialize,Deserialize,Debug,Clone,PartialEq,Eq)]
pub struct TieBreakPolicy {
    /// If true, first look back through the tallies at the start of prior rounds (most recent first),
    /// and disfavour a candidate who had fewer votes at the most recent round where the tied candidates differed.
    #[serde(default="default_countback")]
    pub countback : bool,
    /// What to do if the countback is off or doesn't separate the candidates.
    #[serde(default)]
    pub order : CandidateOrder,
}

fn default_countback() -> bool { true }

impl Default for TieBreakPolicy {
    fn default() -> Self { TieBreakPolicy{ countback: true, order: CandidateOrder::default() } }
}

/// A fixed order of candidates used as the last resort for ties.
#[derive(Serialize,Deserialize,Debug,Clone,PartialEq,Eq,Default)]
pub enum CandidateOrder {
    /// Candidate i is favoured over j iff i>j. So the earliest registered of tied candidates is excluded first.
    #[default]
    ReverseDonkeyVote,
    /// Candidate i is favoured over j iff i<j.
    DonkeyVote,
    /// Candidate names in increasing favour. Candidates not mentioned are less favoured than all those mentioned,
    /// and are ordered amongst themselves by reverse donkey vote.
    Explicit(Vec<String>),
}

#[derive(Serialize,Deserialize,Debug,Clone,Copy,Eq,PartialEq)]
pub enum TieResolutionUsage {
    Exclusion,
    OrderElected,
}

/// Which part of the policy ended up separating the candidates.
#[derive(Serialize,Deserialize,Debug,Clone,Copy,Eq,PartialEq)]
pub enum TieResolutionMethod {
    Countback,
    CandidateOrder,
}

/// A record of a tie that had to be resolved.
#[derive(Serialize,Deserialize,Debug,Clone,Eq,PartialEq)]
pub struct TieResolutionDecision {
    /// increasing_favour[0] is the candidate that got the worst result.
    pub increasing_favour : Vec<CandidateIndex>,
    pub usage : TieResolutionUsage,
    pub method : TieResolutionMethod,
}

impl TieResolutionDecision {
    /// Human readable, with candidate names, e.g. "a < c by CandidateOrder for Exclusion".
    pub fn describe(&self,metadata:&ElectionMetadata) -> String {
        let order : Vec<&str> = self.increasing_favour.iter().map(|&c|metadata.candidate(c).name.as_str()).collect();
        format!("{} by {:?} for {:?}",order.join(" < "),self.method,self.usage)
    }
}

/// A [TieBreakPolicy] applied to a particular list of candidates.
#[derive(Debug,Clone)]
pub struct TieBreaker {
    countback : bool,
    /// favour[candidate]. Higher is more favoured. All different.
    favour : Vec<usize>,
}

impl TieBreaker {
    pub fn new(policy:&TieBreakPolicy,metadata:&ElectionMetadata) -> Result<Self,ConfigError> {
        let n = metadata.num_candidates();
        let favour = match &policy.order {
            CandidateOrder::ReverseDonkeyVote => (0..n).collect(),
            CandidateOrder::DonkeyVote => (0..n).map(|i|n-1-i).collect(),
            CandidateOrder::Explicit(names) => {
                let mut favour : Vec<usize> = (0..n).collect();
                let mut seen = HashSet::new();
                for (position,name) in names.iter().enumerate() {
                    let candidate = metadata.candidate_by_name(name).ok_or_else(||ConfigError::UnknownTieBreakCandidate(name.clone()))?;
                    if !seen.insert(candidate) { return Err(ConfigError::RepeatedTieBreakCandidate(name.clone())); }
                    favour[candidate.0]=n+position;
                }
                favour
            }
        };
        Ok(TieBreaker{ countback: policy.countback, favour })
    }

    /// Sort tied candidates into increasing favour.
    /// history contains the tallies of all candidates at the start of each round so far, oldest first.
    pub fn sort_increasing_favour(&self,tied:&mut [CandidateIndex],history:&[Vec<Votes>]) -> TieResolutionMethod {
        if self.countback && self.resolve_by_countback(tied,history) { TieResolutionMethod::Countback }
        else {
            if !self.countback { self.sort_by_candidate_order(tied); }
            TieResolutionMethod::CandidateOrder
        }
    }

    pub fn resolve(&self,tied:&mut [CandidateIndex],history:&[Vec<Votes>],usage:TieResolutionUsage) -> TieResolutionDecision {
        let method = self.sort_increasing_favour(tied,history);
        TieResolutionDecision{ increasing_favour: tied.to_vec(), usage, method }
    }

    /// The candidate with the lowest tally, or None if there are no candidates.
    /// If there was a tie, the decision is also returned.
    pub fn lowest(&self,candidates:&[CandidateIndex],tallies:&[Votes],history:&[Vec<Votes>]) -> Option<(CandidateIndex,Option<TieResolutionDecision>)> {
        let min = candidates.iter().map(|c|&tallies[c.0]).min()?;
        let mut tied : Vec<CandidateIndex> = candidates.iter().copied().filter(|c|&tallies[c.0]==min).collect();
        if tied.len()==1 { Some((tied[0],None)) }
        else {
            let decision = self.resolve(&mut tied,history,TieResolutionUsage::Exclusion);
            Some((tied[0],Some(decision)))
        }
    }

    /// The candidate with the highest tally, or None if there are no candidates.
    /// If there was a tie, the decision is also returned.
    pub fn highest(&self,candidates:&[CandidateIndex],tallies:&[Votes],history:&[Vec<Votes>]) -> Option<(CandidateIndex,Option<TieResolutionDecision>)> {
        let max = candidates.iter().map(|c|&tallies[c.0]).max()?;
        let mut tied : Vec<CandidateIndex> = candidates.iter().copied().filter(|c|&tallies[c.0]==max).collect();
        if tied.len()==1 { Some((tied[0],None)) }
        else {
            let decision = self.resolve(&mut tied,history,TieResolutionUsage::OrderElected);
            Some((tied[tied.len()-1],Some(decision)))
        }
    }

    /// Sort candidates by decreasing tally, resolving equal tallies, for an order of election.
    pub fn order_elected(&self,candidates:&[CandidateIndex],tallies:&[Votes],history:&[Vec<Votes>]) -> (Vec<CandidateIndex>,Vec<TieResolutionDecision>) {
        let mut by_tally : BTreeMap<&Votes,Vec<CandidateIndex>> = BTreeMap::new();
        for &c in candidates { by_tally.entry(&tallies[c.0]).or_default().push(c); }
        let mut order = vec![];
        let mut decisions = vec![];
        for (_,mut group) in by_tally.into_iter().rev() {
            if group.len()>1 { decisions.push(self.resolve(&mut group,history,TieResolutionUsage::OrderElected)); }
            order.extend(group.into_iter().rev());
        }
        (order,decisions)
    }

    fn sort_by_candidate_order(&self,tied:&mut [CandidateIndex]) {
        tied.sort_by_key(|c|self.favour[c.0]);
    }

    /// Sort candidates low to high based on the most recent round where there was any difference,
    /// resolving remaining equal groups by earlier rounds and finally by candidate order.
    /// Return true iff the countback alone separated everyone.
    fn resolve_by_countback(&self,tied:&mut [CandidateIndex],history:&[Vec<Votes>]) -> bool {
        for (round,tallies) in history.iter().enumerate().rev() {
            let mut observed : BTreeMap<&Votes,Vec<CandidateIndex>> = BTreeMap::new();
            for candidate in tied.iter() {
                observed.entry(&tallies[candidate.0]).or_default().push(*candidate);
            }
            if observed.len()>1 { // at least 1 different.
                let mut ok = true;
                let mut upto : usize = 0;
                for (_,mut who) in observed {
                    // later rounds were all equal, so only earlier rounds can help.
                    if who.len()>1 { ok = self.resolve_by_countback(&mut who,&history[..round]) && ok; }
                    tied[upto..upto+who.len()].copy_from_slice(&who);
                    upto+=who.len();
                }
                return ok;
            }
        }
        self.sort_by_candidate_order(tied);
        false
    }
}
