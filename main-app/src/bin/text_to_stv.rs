// Copyright 2026 Andrew Conway.
// This file is part of ConcreteSTV.
// ConcreteSTV is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// ConcreteSTV is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with ConcreteSTV.  If not, see <https://www.gnu.org/licenses/>.


//! Convert a plain text list of votes into a .stv file.

use clap::Parser;
use main_app::init_logging;
use std::path::PathBuf;
use std::fs::File;
use std::io::stdout;
use stv::ballot_metadata::NumberOfCandidates;
use stv::parse_votes::{parse_votes_file, to_election_data};

#[derive(Parser)]
#[clap(version = "0.2", author = "Andrew Conway", name="ConcreteSTV")]
/// Produce a .stv file from a text file with one ballot per line, most preferred first.
struct Opts {
    /// The text file to read.
    votes : PathBuf,

    /// The number of people to elect.
    #[clap(short, long)]
    seats : usize,

    /// An optional output file. If not specified, stdout is used.
    #[clap(short, long)]
    out : Option<PathBuf>,
}


fn main() -> anyhow::Result<()> {
    let opt: Opts = Opts::parse();
    init_logging(false);
    let ballots = parse_votes_file(&opt.votes)?;
    let name = opt.votes.file_stem().map(|s|s.to_string_lossy().to_string()).unwrap_or_default();
    let mut data = to_election_data(&ballots,&name)?;
    data.metadata.vacancies=Some(NumberOfCandidates(opt.seats));
    data.log_summary();
    let out : Box<dyn std::io::Write> = match &opt.out {
        None => Box::new(stdout()),
        Some(path) => Box::new(File::create(path)?),
    };
    serde_json::to_writer(out,&data)?;
    Ok(())
}
