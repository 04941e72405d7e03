// Copyright 2026 Andrew Conway.
// This file is part of ConcreteSTV.
// ConcreteSTV is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// ConcreteSTV is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with ConcreteSTV.  If not, see <https://www.gnu.org/licenses/>.

//! A validated election, ready to be counted.
//!
//! ```
//! use stv::election::Election;
//! let election = Election::from_votes(["ab","ab","ab","ab","ba"].iter().map(|b|b.chars().map(String::from)),2).unwrap();
//! let transcript = election.run_count().unwrap();
//! assert_eq!(election.names(&transcript.elected),vec!["a","b"]);
//! assert_eq!(transcript.rounds.len(),2);
//! ```

use serde::{Deserialize, Serialize};
use crate::ballot_metadata::{CandidateIndex, ElectionMetadata, NumberOfCandidates};
use crate::ballot_pile::BallotPaperCount;
use crate::distribution_of_preferences_transcript::{QuotaInfo, Transcript, TranscriptWithMetadata};
use crate::election_data::ElectionData;
use crate::error::{ConfigError, ElectionError};
use crate::preference_distribution::PreferenceDistributor;
use crate::quota::{check_vacancies, droop_quota};
use crate::tie_resolution::{TieBreakPolicy, TieBreaker};
use crate::transfer_value::Votes;

/// Things that override or limit what is in the election data.
#[derive(Clone,Debug,Default,Serialize,Deserialize)]
pub struct ElectionOptions {
    /// Number of seats, if not taken from the metadata.
    #[serde(skip_serializing_if = "Option::is_none",default)]
    pub vacancies : Option<NumberOfCandidates>,
    #[serde(skip_serializing_if = "Option::is_none",default)]
    pub tie_resolution : Option<TieBreakPolicy>,
    /// Refuse elections where the number of ballot records times the number of candidates exceeds this.
    #[serde(skip_serializing_if = "Option::is_none",default)]
    pub max_input_size : Option<usize>,
}

/// An election that has passed all checks. It never changes; each count works on its own copy of the state.
#[derive(Debug,Clone)]
pub struct Election {
    data : ElectionData,
    tie_breaker : TieBreaker,
    quota : QuotaInfo,
}

impl Election {
    /// Check the data and compute the quota. The candidates keep the order they have in the data.
    pub fn new(mut data:ElectionData,options:&ElectionOptions) -> Result<Self,ElectionError> {
        let num_candidates = data.metadata.num_candidates();
        let vacancies = options.vacancies.or(data.metadata.vacancies).ok_or(ConfigError::MissingVacancies)?;
        check_vacancies(vacancies,num_candidates)?;
        if let Some(limit) = options.max_input_size {
            let records = data.ballots.len();
            if records.saturating_mul(num_candidates)>limit {
                return Err(ConfigError::InputTooLarge{records,candidates:num_candidates,limit}.into());
            }
        }
        data.validate()?;
        data.metadata.vacancies=Some(vacancies);
        if let Some(policy) = &options.tie_resolution { data.metadata.tie_resolution=policy.clone(); }
        let tie_breaker = TieBreaker::new(&data.metadata.tie_resolution,&data.metadata)?;
        let papers = BallotPaperCount(data.num_votes());
        let total_votes = Votes::from(papers);
        let quota = droop_quota(&total_votes,vacancies,num_candidates)?;
        Ok(Election{
            quota: QuotaInfo{ papers, informal: BallotPaperCount(data.num_informal()), total_votes, vacancies, quota },
            data,
            tie_breaker,
        })
    }

    /// Make an election from ballots, each listing candidate names in preference order.
    /// Candidates are registered in lexicographic order of name.
    pub fn from_votes<B,S>(ballots:impl IntoIterator<Item=B>,num_seats:usize) -> Result<Self,ElectionError>
    where B:IntoIterator<Item=S>, S:AsRef<str> {
        Self::from_votes_with_options(ballots,num_seats,&ElectionOptions::default())
    }

    /// Like [Election::from_votes], with a tie resolution policy or size limit.
    /// The number of seats given here overrides any in the options.
    pub fn from_votes_with_options<B,S>(ballots:impl IntoIterator<Item=B>,num_seats:usize,options:&ElectionOptions) -> Result<Self,ElectionError>
    where B:IntoIterator<Item=S>, S:AsRef<str> {
        let data = ElectionData::from_named_votes(ballots)?;
        let options = ElectionOptions{ vacancies: Some(NumberOfCandidates(num_seats)), ..options.clone() };
        Self::new(data,&options)
    }

    pub fn metadata(&self) -> &ElectionMetadata { &self.data.metadata }
    pub fn data(&self) -> &ElectionData { &self.data }
    pub fn quota(&self) -> &QuotaInfo { &self.quota }
    pub fn vacancies(&self) -> NumberOfCandidates { self.quota.vacancies }
    pub fn tie_resolution(&self) -> &TieBreakPolicy { &self.data.metadata.tie_resolution }

    /// Do the count. This can be called any number of times, and always gives the same answer.
    pub fn run_count(&self) -> Result<Transcript,ElectionError> {
        PreferenceDistributor::new(&self.data.metadata,&self.data.ballots,&self.tie_breaker,self.quota.clone()).go()
    }

    /// Do the count, and attach the metadata so the result can be understood on its own.
    pub fn run_count_with_metadata(&self) -> Result<TranscriptWithMetadata,ElectionError> {
        Ok(TranscriptWithMetadata{ metadata: self.data.metadata.clone(), transcript: self.run_count()? })
    }

    pub fn names(&self,candidates:&[CandidateIndex]) -> Vec<String> {
        candidates.iter().map(|&c|self.data.metadata.candidate(c).name.clone()).collect()
    }
}
