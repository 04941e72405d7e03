// Copyright 2026 Andrew Conway.
// This file is part of ConcreteSTV.
// ConcreteSTV is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// ConcreteSTV is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with ConcreteSTV.  If not, see <https://www.gnu.org/licenses/>.


//! Parse a human readable list of votes.
//! This is a text file with one ballot per line, most preferred candidate first.
//! * Blank lines, and lines starting with #, are ignored.
//! * If a line contains whitespace or commas, the candidates are the tokens separated by them.
//!   Otherwise each character is a candidate, so `abc` means a then b then c.
//! * A line may start with a number and a colon, such as `12: ab`, meaning that many identical papers.
//!   A colon not preceded by just digits is an ordinary character, so `a:b` is a ballot for a then : then b.
//!
//! ```
//! use stv::parse_votes::parse_votes;
//! let ballots = parse_votes("# example\nab\n\n3: Alice, Bob\n").unwrap();
//! assert_eq!(ballots.len(),2);
//! assert_eq!(ballots[0].preferences,vec!["a","b"]);
//! assert_eq!(ballots[1].preferences,vec!["Alice","Bob"]);
//! assert_eq!(ballots[1].n,3);
//! assert_eq!(ballots[1].line,4);
//! ```

use std::collections::HashSet;
use std::path::Path;
use anyhow::Context;
use thiserror::Error;
use crate::election_data::ElectionData;

/// One line of the file.
#[derive(Clone,Debug,PartialEq,Eq)]
pub struct ParsedBallot {
    pub preferences : Vec<String>,
    /// number of identical papers.
    pub n : usize,
    /// 1 is the first line in the file.
    pub line : usize,
}

#[derive(Error,Debug,Clone,PartialEq,Eq)]
pub enum ParseVotesError {
    #[error("Line {line} : could not understand paper count {text}")]
    BadMultiplicity{line:usize,text:String},
    #[error("Line {line} : paper count must be at least 1")]
    ZeroMultiplicity{line:usize},
    #[error("Line {line} : candidate {candidate} is listed more than once")]
    RepeatedCandidate{line:usize,candidate:String},
}

/// Split `12: ab` into `12` and ` ab`. None if there is no colon or it is not preceded by just digits.
fn count_prefix(line:&str) -> Option<(&str,&str)> {
    let (count,body) = line.split_once(':')?;
    let count = count.trim();
    if !count.is_empty() && count.bytes().all(|b|b.is_ascii_digit()) { Some((count,body)) } else { None }
}

/// Parse the text of a votes file.
pub fn parse_votes(text:&str) -> Result<Vec<ParsedBallot>,ParseVotesError> {
    let mut res = vec![];
    for (i,raw) in text.lines().enumerate() {
        let line = i+1;
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') { continue; }
        let (n,body) = match count_prefix(trimmed) {
            Some((count,body)) => {
                let n : usize = count.parse().map_err(|_|ParseVotesError::BadMultiplicity{line,text:count.to_string()})?;
                if n==0 { return Err(ParseVotesError::ZeroMultiplicity{line}); }
                (n,body.trim())
            }
            None => (1,trimmed),
        };
        let preferences : Vec<String> = if body.contains(|c:char|c.is_whitespace()||c==',') {
            body.split(|c:char|c.is_whitespace()||c==',').filter(|s|!s.is_empty()).map(|s|s.to_string()).collect()
        } else {
            body.chars().map(String::from).collect()
        };
        let mut seen = HashSet::new();
        if let Some(repeated) = preferences.iter().find(|p|!seen.insert(p.as_str())) {
            return Err(ParseVotesError::RepeatedCandidate{line,candidate:repeated.clone()});
        }
        res.push(ParsedBallot{preferences,n,line});
    }
    Ok(res)
}

/// Parse a votes file.
pub fn parse_votes_file(path:&Path) -> anyhow::Result<Vec<ParsedBallot>> {
    let text = std::fs::read_to_string(path).with_context(||format!("Could not read {}",path.display()))?;
    Ok(parse_votes(&text).with_context(||format!("Could not parse {}",path.display()))?)
}

/// Turn parsed ballots into election data, with candidates in lexicographic order and identical ballots merged.
pub fn to_election_data(ballots:&[ParsedBallot],name:&str) -> anyhow::Result<ElectionData> {
    let mut data = ElectionData::from_weighted_named_votes(ballots.iter().map(|b|(b.preferences.iter(),b.n)))?;
    data.metadata.name=name.to_string();
    data.merge_identical_ballots();
    Ok(data)
}

#[cfg(test)]
mod tests {
    use crate::parse_votes::{parse_votes, to_election_data, ParseVotesError};

    #[test]
    fn test_tokens_and_characters() {
        let ballots = parse_votes("abc\n  b a \nx,y\n#comment\n\n2:ca").unwrap();
        assert_eq!(4,ballots.len());
        assert_eq!(vec!["a","b","c"],ballots[0].preferences);
        assert_eq!(vec!["b","a"],ballots[1].preferences);
        assert_eq!(vec!["x","y"],ballots[2].preferences);
        assert_eq!(vec!["c","a"],ballots[3].preferences);
        assert_eq!(2,ballots[3].n);
        assert_eq!(6,ballots[3].line);
    }

    #[test]
    fn test_errors_have_line_numbers() {
        assert_eq!(Err(ParseVotesError::RepeatedCandidate{line:2,candidate:"a".to_string()}),parse_votes("ab\naba"));
        assert_eq!(Err(ParseVotesError::BadMultiplicity{line:1,text:"99999999999999999999999".to_string()}),parse_votes("99999999999999999999999: ab"));
        assert_eq!(Err(ParseVotesError::ZeroMultiplicity{line:3}),parse_votes("a\n\n0:b"));
    }

    #[test]
    fn test_colon_only_counts_after_digits() {
        let ballots = parse_votes("a:b\n 3 :cd\nx: y").unwrap();
        assert_eq!(vec!["a",":","b"],ballots[0].preferences);
        assert_eq!(1,ballots[0].n);
        assert_eq!(vec!["c","d"],ballots[1].preferences);
        assert_eq!(3,ballots[1].n);
        assert_eq!(vec!["x:","y"],ballots[2].preferences);
    }

    #[test]
    fn test_conversion_to_election_data() {
        let ballots = parse_votes("ab\nba\nab\n3:\n").unwrap();
        let data = to_election_data(&ballots,"test").unwrap();
        assert_eq!("test",data.metadata.name);
        assert_eq!(2,data.ballots.len());
        assert_eq!(2,data.ballots[0].n);
        assert_eq!(3,data.num_votes());
        assert_eq!(3,data.num_informal());
    }
}
