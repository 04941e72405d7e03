// Copyright 2021-2026 Andrew Conway.
// This file is part of ConcreteSTV.
// ConcreteSTV is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// ConcreteSTV is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with ConcreteSTV.  If not, see <https://www.gnu.org/licenses/>.


use clap::Parser;
use std::path::PathBuf;
use std::fs::File;
use anyhow::Context;
use tracing::info;
use stv::ballot_metadata::NumberOfCandidates;
use stv::election::{Election, ElectionOptions};
use main_app::{init_logging, load_election_data, tie_break_override, TieBreakOrder, DEFAULT_MAX_INPUT_SIZE};
use main_app::report::{format_table, round_table, write_csv};

#[derive(Parser)]
#[clap(version = "0.2", author = "Andrew Conway", name="ConcreteSTV")]
/// Count an STV election with the Droop quota and exact fractional transfer values.
struct Opts {
    /// The votes file. A .stv file is JSON election data; anything else is read as
    /// plain text with one ballot per line.
    votes : PathBuf,

    /// The number of people to elect. If used, overrides the value in the .stv file.
    #[clap(short, long)]
    seats : Option<usize>,

    /// The fixed candidate order used for ties that the countback doesn't resolve.
    /// If used, overrides the value in the .stv file.
    #[clap(long,value_enum)]
    tie_break : Option<TieBreakOrder>,

    /// Candidate names in increasing order of favour for resolving ties, e.g. --favour=c,a,b
    /// means c loses a tie against anyone, and b wins against anyone. Unlisted candidates lose to listed ones.
    /// Overrides --tie-break.
    #[clap(long,value_delimiter=',')]
    favour : Vec<String>,

    /// Don't look at previous rounds to resolve ties; go straight to the candidate order.
    #[clap(long)]
    no_countback : bool,

    /// An optional file to store the full transcript in, as JSON.
    #[clap(short, long)]
    transcript : Option<PathBuf>,

    /// An optional file to store the round table in, as CSV.
    #[clap(long)]
    csv : Option<PathBuf>,

    /// Refuse to count if the number of distinct ballots times the number of candidates is larger than this.
    #[clap(long,default_value_t=DEFAULT_MAX_INPUT_SIZE)]
    max_input_size : usize,

    /// Log each tally and transfer, not just elections and exclusions.
    #[clap(long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let opt : Opts = Opts::parse();
    init_logging(opt.verbose);

    let data = load_election_data(&opt.votes)?;
    data.log_summary();
    let options = ElectionOptions{
        vacancies: opt.seats.map(NumberOfCandidates),
        tie_resolution: tie_break_override(&data.metadata.tie_resolution,opt.tie_break,&opt.favour,opt.no_countback),
        max_input_size: Some(opt.max_input_size),
    };
    let election = Election::new(data,&options).with_context(||format!("Could not set up election from {}",opt.votes.display()))?;
    let result = election.run_count_with_metadata()?;

    let rows = round_table(&result);
    print!("{}",format_table(&rows));
    println!("Elected : {}",result.elected_names().join(", "));

    if let Some(path) = &opt.csv {
        write_csv(&rows,path)?;
        info!("Wrote round table to {}",path.display());
    }
    if let Some(path) = &opt.transcript {
        if let Some(parent) = path.parent() { std::fs::create_dir_all(parent)? }
        serde_json::to_writer_pretty(File::create(path).with_context(||format!("Could not create {}",path.display()))?,&result)?;
        info!("Wrote transcript to {}",path.display());
    }
    Ok(())
}
