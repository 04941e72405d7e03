// Copyright 2021-2026 Andrew Conway.
// This file is part of ConcreteSTV.
// ConcreteSTV is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// ConcreteSTV is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with ConcreteSTV.  If not, see <https://www.gnu.org/licenses/>.

//! This crate provides what the command line programs need beyond the count itself:
//! reading votes files in either format, setting up logging, and presenting the result.
//! It also contains the main binaries.

use std::path::Path;
use clap::ValueEnum;
use stv::election_data::ElectionData;
use stv::parse_votes::{parse_votes_file, to_election_data};
use stv::tie_resolution::{CandidateOrder, TieBreakPolicy};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

pub mod report;

/// Used by the command line if no --max-input-size is given. Ballot records times candidates.
pub const DEFAULT_MAX_INPUT_SIZE : usize = 1_000_000_000;

/// Send tracing events to stderr. RUST_LOG, if set, takes priority over the verbose flag.
pub fn init_logging(verbose:bool) {
    let filter = if verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()))
        .with(tracing_subscriber::fmt::layer().without_time().with_writer(std::io::stderr))
        .init();
}

/// Load votes from a .stv file (JSON), or from anything else treated as the plain text format.
/// Text files are named after the file stem.
pub fn load_election_data(path:&Path) -> anyhow::Result<ElectionData> {
    if path.extension().is_some_and(|e|e=="stv") {
        ElectionData::load(path)
    } else {
        let ballots = parse_votes_file(path)?;
        let name = path.file_stem().map(|s|s.to_string_lossy().to_string()).unwrap_or_default();
        to_election_data(&ballots,&name)
    }
}

/// The fixed orders that can be chosen from the command line.
#[derive(Copy,Clone,Debug,PartialEq,Eq,ValueEnum)]
pub enum TieBreakOrder {
    /// Earlier registered candidates lose ties.
    ReverseDonkey,
    /// Later registered candidates lose ties.
    Donkey,
}

/// Work out the tie resolution policy from command line flags, starting from the one in the election file.
/// Returns None if no flag changes anything. A non-empty favour list takes priority over order.
pub fn tie_break_override(base:&TieBreakPolicy,order:Option<TieBreakOrder>,favour:&[String],no_countback:bool) -> Option<TieBreakPolicy> {
    if order.is_none() && favour.is_empty() && !no_countback { return None; }
    let mut policy = base.clone();
    if no_countback { policy.countback=false; }
    if !favour.is_empty() {
        policy.order=CandidateOrder::Explicit(favour.to_vec());
    } else if let Some(order) = order {
        policy.order = match order {
            TieBreakOrder::ReverseDonkey => CandidateOrder::ReverseDonkeyVote,
            TieBreakOrder::Donkey => CandidateOrder::DonkeyVote,
        };
    }
    Some(policy)
}
