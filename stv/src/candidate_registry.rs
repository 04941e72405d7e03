// Copyright 2026 Andrew Conway.
// This file is part of ConcreteSTV.
// ConcreteSTV is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// ConcreteSTV is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with ConcreteSTV.  If not, see <https://www.gnu.org/licenses/>.

//! The mutable status of each candidate during a count.
//! The identities themselves live in [crate::ballot_metadata::ElectionMetadata] and never change.

use serde::{Serialize,Deserialize};
use thiserror::Error;
use crate::ballot_metadata::CandidateIndex;

#[derive(Copy,Clone,Debug,PartialEq,Eq,Hash,Serialize,Deserialize)]
pub enum CandidateStatus {
    Continuing,
    Elected,
    Eliminated,
}

/// Statuses only ever move away from Continuing.
#[derive(Error,Debug,Clone,PartialEq,Eq)]
#[error("Candidate {candidate:?} can not become {attempted:?} as it is already {current:?}")]
pub struct StatusTransitionError {
    pub candidate : CandidateIndex,
    pub current : CandidateStatus,
    pub attempted : CandidateStatus,
}

#[derive(Clone,Debug)]
pub struct CandidateRegistry {
    status : Vec<CandidateStatus>,
    /// in order of election.
    elected : Vec<CandidateIndex>,
    /// in order of elimination.
    eliminated : Vec<CandidateIndex>,
}

impl CandidateRegistry {
    /// All candidates start off continuing.
    pub fn new(num_candidates:usize) -> Self {
        CandidateRegistry {
            status: vec![CandidateStatus::Continuing;num_candidates],
            elected: vec![],
            eliminated: vec![],
        }
    }

    pub fn num_candidates(&self) -> usize { self.status.len() }
    pub fn status(&self,candidate:CandidateIndex) -> CandidateStatus { self.status[candidate.0] }
    pub fn is_continuing(&self,candidate:CandidateIndex) -> bool { self.status[candidate.0]==CandidateStatus::Continuing }
    pub fn statuses(&self) -> &[CandidateStatus] { &self.status }

    /// Continuing candidates, in registration order.
    pub fn continuing(&self) -> Vec<CandidateIndex> {
        (0..self.status.len()).map(CandidateIndex).filter(|&c|self.is_continuing(c)).collect()
    }
    pub fn num_continuing(&self) -> usize { self.status.len()-self.elected.len()-self.eliminated.len() }

    pub fn elected(&self) -> &[CandidateIndex] { &self.elected }
    pub fn eliminated(&self) -> &[CandidateIndex] { &self.eliminated }

    pub fn mark_elected(&mut self,candidate:CandidateIndex) -> Result<(),StatusTransitionError> {
        self.transition(candidate,CandidateStatus::Elected)?;
        self.elected.push(candidate);
        Ok(())
    }
    pub fn mark_eliminated(&mut self,candidate:CandidateIndex) -> Result<(),StatusTransitionError> {
        self.transition(candidate,CandidateStatus::Eliminated)?;
        self.eliminated.push(candidate);
        Ok(())
    }

    fn transition(&mut self,candidate:CandidateIndex,attempted:CandidateStatus) -> Result<(),StatusTransitionError> {
        let current = self.status[candidate.0];
        if current!=CandidateStatus::Continuing { return Err(StatusTransitionError{candidate,current,attempted}); }
        self.status[candidate.0]=attempted;
        Ok(())
    }
}
