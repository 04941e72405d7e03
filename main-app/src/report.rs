// Copyright 2026 Andrew Conway.
// This file is part of ConcreteSTV.
// ConcreteSTV is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// ConcreteSTV is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with ConcreteSTV.  If not, see <https://www.gnu.org/licenses/>.

//! Human readable presentation of a transcript, as a table on the terminal or a CSV file.
//! This is the only place fractional votes get rounded, and only for display.

use std::path::Path;
use anyhow::Context;
use stv::ballot_metadata::ElectionMetadata;
use stv::candidate_registry::CandidateStatus;
use stv::distribution_of_preferences_transcript::{RoundAction, RoundRecord, TranscriptWithMetadata};

/// Decimal places shown for vote values.
pub const DISPLAY_DIGITS : usize = 3;

/// One line for what happened in a round.
pub fn describe_action(round:&RoundRecord,metadata:&ElectionMetadata) -> String {
    match round.action {
        RoundAction::ElectedByQuota => format!("Elected {} by quota",metadata.names(&round.elected_candidates())),
        RoundAction::Eliminated(who) => format!("Excluded {}",metadata.candidate(who).name),
        RoundAction::ElectedAllRemaining => format!("Elected {} as all remaining",metadata.names(&round.elected_candidates())),
    }
}

/// A table with a header row, then a row of first preferences, then one row per round of the values held at the end of that round.
/// Eliminated candidates show as blank.
pub fn round_table(result:&TranscriptWithMetadata) -> Vec<Vec<String>> {
    let metadata = &result.metadata;
    let transcript = &result.transcript;
    let mut header = vec!["Round".to_string()];
    header.extend(metadata.candidates.iter().map(|c|c.name.clone()));
    header.push("Exhausted".to_string());
    header.push("Action".to_string());
    let mut rows = vec![header];
    let mut first = vec!["First preferences".to_string()];
    for i in 0..metadata.num_candidates() {
        first.push(transcript.first_preferences().iter().find(|t|t.candidate.0==i).map(|t|t.votes.to_decimal_string(DISPLAY_DIGITS)).unwrap_or_default());
    }
    first.push(String::new());
    first.push(format!("Quota {}",transcript.quota.quota.to_decimal_string(0)));
    rows.push(first);
    for round in &transcript.rounds {
        let mut row = vec![round.round.to_string()];
        for (held,status) in round.status.held.iter().zip(round.status.candidate_status.iter()) {
            row.push(match status {
                CandidateStatus::Eliminated => String::new(),
                CandidateStatus::Elected => held.to_decimal_string(DISPLAY_DIGITS)+"*",
                CandidateStatus::Continuing => held.to_decimal_string(DISPLAY_DIGITS),
            });
        }
        row.push(round.status.exhausted.to_decimal_string(DISPLAY_DIGITS));
        row.push(describe_action(round,metadata));
        rows.push(row);
    }
    rows
}

/// Lay out the table with columns padded to a common width.
pub fn format_table(rows:&[Vec<String>]) -> String {
    let num_columns = rows.iter().map(|r|r.len()).max().unwrap_or(0);
    let widths : Vec<usize> = (0..num_columns).map(|c|rows.iter().filter_map(|r|r.get(c)).map(|s|s.chars().count()).max().unwrap_or(0)).collect();
    let mut res = String::new();
    for row in rows {
        let line : Vec<String> = row.iter().enumerate().map(|(c,s)|format!("{:<width$}",s,width=widths[c])).collect();
        res.push_str(line.join(" | ").trim_end());
        res.push('\n');
    }
    res
}

pub fn write_csv(rows:&[Vec<String>],path:&Path) -> anyhow::Result<()> {
    let mut writer = csv::Writer::from_path(path).with_context(||format!("Could not create {}",path.display()))?;
    for row in rows { writer.write_record(row)?; }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use stv::election::Election;
    use crate::report::{format_table, round_table, write_csv};

    #[test]
    fn test_round_table() -> anyhow::Result<()> {
        let election = Election::from_votes(["ab","ab","ab","ab","ba"].iter().map(|b|b.chars().map(String::from)),2)?;
        let rows = round_table(&election.run_count_with_metadata()?);
        assert_eq!(vec!["Round","a","b","Exhausted","Action"],rows[0]);
        assert_eq!(vec!["First preferences","4.000","1.000","","Quota 2"],rows[1]);
        assert_eq!(vec!["1","2.000*","3.000","0.000","Elected a by quota"],rows[2]);
        assert_eq!(vec!["2","2.000*","2.000*","1.000","Elected b by quota"],rows[3]);
        assert_eq!(4,rows.len());
        let text = format_table(&rows);
        assert!(text.lines().nth(3).unwrap().starts_with("2     "));
        Ok(())
    }

    #[test]
    fn test_csv() -> anyhow::Result<()> {
        let path = std::env::temp_dir().join(format!("concrete_stv_csv_test_{}.csv",std::process::id()));
        let rows = vec![vec!["Round".to_string(),"a, b".to_string()],vec!["1".to_string(),"7".to_string()]];
        write_csv(&rows,&path)?;
        let text = std::fs::read_to_string(&path)?;
        assert_eq!("Round,\"a, b\"\n1,7\n",text);
        std::fs::remove_file(&path)?;
        Ok(())
    }
}
