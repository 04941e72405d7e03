// Copyright 2021-2026 Andrew Conway.
// This file is part of ConcreteSTV.
// ConcreteSTV is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// ConcreteSTV is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with ConcreteSTV.  If not, see <https://www.gnu.org/licenses/>.


use std::collections::{BTreeSet, HashMap, HashSet};
use std::fs::File;
use std::path::Path;
use anyhow::Context;
use serde::{Deserialize,Serialize};
use tracing::info;
use crate::ballot_metadata::{Candidate, CandidateIndex, ElectionMetadata};
use crate::ballot_paper::{RankedVote, UniqueVoteBuilder};
use crate::error::ValidationError;

/// The votes for an election, with the candidates they refer to. This is what is stored in a .stv file.
#[derive(Debug,Serialize,Deserialize,Clone)]
pub struct ElectionData {
    pub metadata : ElectionMetadata,
    pub ballots : Vec<RankedVote>,
    /// number of informal votes not included in ballots.
    #[serde(default)]
    pub informal : usize,
}

impl ElectionData {
    /// Number of formal papers. Saturates rather than overflowing; [ElectionData::validate] rejects totals that don't fit.
    pub fn num_votes(&self) -> usize {
        self.ballots.iter().filter(|v|!v.is_informal()).fold(0,|acc,v|acc.saturating_add(v.n))
    }
    /// Number of informal papers, whether in ballots or just counted.
    pub fn num_informal(&self) -> usize {
        self.ballots.iter().filter(|v|v.is_informal()).fold(self.informal,|acc,v|acc.saturating_add(v.n))
    }

    pub fn log_summary(&self) {
        info!(name=%self.metadata.name,candidates=self.metadata.num_candidates(),formal=self.num_votes(),informal=self.num_informal(),unique=self.ballots.len(),"Election data");
    }

    /// Check that candidate names are distinct, that every ballot refers only to real candidates, each at most once,
    /// and that the total number of papers can be counted.
    pub fn validate(&self) -> Result<(),ValidationError> {
        let num_candidates = self.metadata.num_candidates();
        let mut names = HashSet::new();
        if let Some(repeated) = self.metadata.candidates.iter().find(|c|!names.insert(c.name.as_str())) {
            return Err(ValidationError::RepeatedCandidateName(repeated.name.clone()));
        }
        let mut papers = self.informal;
        for (i,vote) in self.ballots.iter().enumerate() {
            papers = papers.checked_add(vote.n).ok_or(ValidationError::TooManyPapers)?;
            if let Some(bad) = vote.candidates.iter().find(|c|c.0>=num_candidates) {
                return Err(ValidationError::UnknownCandidate{ballot:i+1,index:bad.0,num_candidates});
            }
            if let Some(repeated) = vote.find_repeated_candidate() {
                return Err(ValidationError::RepeatedCandidate{ballot:i+1,candidate:self.metadata.candidate(repeated).name.clone()});
            }
        }
        Ok(())
    }

    /// Make election data from ballots listing candidate names in preference order.
    /// Candidates are registered in lexicographic order of name, so the result does not depend on the order of the ballots.
    /// Each ballot becomes one paper. A ballot with no preferences is counted as informal.
    pub fn from_named_votes<B,S>(ballots:impl IntoIterator<Item=B>) -> Result<Self,ValidationError>
    where B:IntoIterator<Item=S>, S:AsRef<str> {
        Self::from_weighted_named_votes(ballots.into_iter().map(|b|(b,1)))
    }

    /// Like [ElectionData::from_named_votes], but each ballot stands for the given number of identical papers.
    pub fn from_weighted_named_votes<B,S>(ballots:impl IntoIterator<Item=(B,usize)>) -> Result<Self,ValidationError>
    where B:IntoIterator<Item=S>, S:AsRef<str> {
        let ballots : Vec<(Vec<S>,usize)> = ballots.into_iter().map(|(b,n)|(b.into_iter().collect(),n)).collect();
        let names : BTreeSet<&str> = ballots.iter().flat_map(|(b,_)|b.iter()).map(|s|s.as_ref()).collect();
        let index : HashMap<&str,CandidateIndex> = names.iter().enumerate().map(|(i,&name)|(name,CandidateIndex(i))).collect();
        let mut votes = vec![];
        let mut informal = 0;
        for (i,(ballot,n)) in ballots.iter().enumerate() {
            if ballot.is_empty() { informal=n.saturating_add(informal); continue; }
            let vote = RankedVote{ candidates: ballot.iter().map(|s|index[s.as_ref()]).collect(), n: *n };
            if let Some(repeated) = vote.find_repeated_candidate() {
                return Err(ValidationError::RepeatedCandidate{ballot:i+1,candidate:names.iter().nth(repeated.0).map(|s|s.to_string()).unwrap_or_default()});
            }
            votes.push(vote);
        }
        Ok(ElectionData{
            metadata: ElectionMetadata{
                name: String::new(),
                candidates: names.into_iter().map(Candidate::from_name).collect(),
                vacancies: None,
                tie_resolution: Default::default(),
            },
            ballots: votes,
            informal,
        })
    }

    /// Combine ballots with identical preferences into one record. Doesn't change the result of a count.
    pub fn merge_identical_ballots(&mut self) {
        let mut builder = UniqueVoteBuilder::default();
        for vote in self.ballots.drain(..) { builder.add_vote(vote); }
        self.ballots=builder.to_votes();
    }

    /// Read a .stv file, which is JSON.
    pub fn load(path:&Path) -> anyhow::Result<Self> {
        let file = File::open(path).with_context(||format!("Could not open {}",path.display()))?;
        let data : ElectionData = serde_json::from_reader(std::io::BufReader::new(file)).with_context(||format!("Could not parse {} as a .stv file",path.display()))?;
        Ok(data)
    }

    pub fn save(&self,path:&Path) -> anyhow::Result<()> {
        let file = File::create(path).with_context(||format!("Could not create {}",path.display()))?;
        serde_json::to_writer(file,&self)?;
        Ok(())
    }
}
