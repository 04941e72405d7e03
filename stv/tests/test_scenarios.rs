// Copyright 2026 Andrew Conway.
// This file is part of ConcreteSTV.
// ConcreteSTV is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// ConcreteSTV is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with ConcreteSTV.  If not, see <https://www.gnu.org/licenses/>.


//! Small elections where the whole count can be checked by hand.


#[cfg(test)]
mod tests {
    use stv::ballot_metadata::CandidateIndex;
    use stv::ballot_pile::BallotPaperCount;
    use stv::distribution_of_preferences_transcript::{ElectionReason, RoundAction, Transcript};
    use stv::election::{Election, ElectionOptions};
    use stv::election_data::ElectionData;
    use stv::error::{ArithmeticError, ConfigError, ElectionError, ValidationError};
    use stv::tie_resolution::{CandidateOrder, TieBreakPolicy, TieResolutionMethod, TieResolutionUsage};
    use stv::transfer_value::Votes;

    /// Each string is a ballot, each character a candidate.
    fn chars(ballots:&[&str]) -> Vec<Vec<String>> {
        ballots.iter().map(|b|b.chars().map(String::from).collect()).collect()
    }

    fn votes(s:&str) -> Votes { s.parse().unwrap() }

    fn with_order(order:CandidateOrder) -> ElectionOptions {
        ElectionOptions{ tie_resolution: Some(TieBreakPolicy{ countback: true, order }), ..Default::default() }
    }

    fn run(ballots:&[&str],seats:usize,options:&ElectionOptions) -> anyhow::Result<(Election,Transcript)> {
        let election = Election::from_votes_with_options(chars(ballots),seats,options)?;
        let transcript = election.run_count()?;
        Ok((election,transcript))
    }

    #[test]
    fn exact_quota_means_no_transfer() -> anyhow::Result<()> {
        let (election,transcript) = run(&["a","a","a","b","b"],1,&ElectionOptions::default())?;
        assert_eq!(Votes::from(3),transcript.quota.quota);
        assert_eq!(BallotPaperCount(5),transcript.quota.papers);
        assert_eq!(vec!["a"],election.names(&transcript.elected));
        assert_eq!(1,transcript.rounds.len());
        let round = &transcript.rounds[0];
        assert_eq!(Some(&Votes::from(3)),round.tally_of(CandidateIndex(0)));
        assert_eq!(Some(&Votes::from(2)),round.tally_of(CandidateIndex(1)));
        assert_eq!(RoundAction::ElectedByQuota,round.action);
        assert_eq!(Votes::from(0),round.elected[0].surplus);
        assert!(round.elected[0].transfer_value.is_none());
        assert!(round.transfers.is_empty());
        assert_eq!(vec![Votes::from(3),Votes::from(2)],round.status.held);
        Ok(())
    }

    #[test]
    fn surplus_transfers_exact_half_votes() -> anyhow::Result<()> {
        let (election,transcript) = run(&["ab","ab","ab","ab","ba"],2,&ElectionOptions::default())?;
        assert_eq!(Votes::from(2),transcript.quota.quota);
        assert_eq!(vec!["a","b"],election.names(&transcript.elected));
        assert_eq!(2,transcript.rounds.len());
        let first = &transcript.rounds[0];
        assert_eq!(Some(&Votes::from(4)),first.tally_of(CandidateIndex(0)));
        assert_eq!(Some(&Votes::from(1)),first.tally_of(CandidateIndex(1)));
        assert_eq!(Votes::from(2),first.elected[0].surplus);
        assert_eq!("1/2",first.elected[0].transfer_value.as_ref().unwrap().to_string());
        assert_eq!(1,first.transfers.len());
        assert_eq!(Some(CandidateIndex(1)),first.transfers[0].to);
        assert_eq!(BallotPaperCount(4),first.transfers[0].papers);
        assert_eq!(Votes::from(2),first.transfers[0].votes);
        let second = &transcript.rounds[1];
        assert_eq!(Some(&Votes::from(3)),second.tally_of(CandidateIndex(1)));
        assert_eq!(RoundAction::ElectedByQuota,second.action);
        assert_eq!(ElectionReason::ReachedQuota,second.elected[0].why);
        // b's surplus of 1 has nowhere to go.
        assert_eq!(1,second.transfers.len());
        assert!(second.transfers[0].is_exhausted());
        assert_eq!(BallotPaperCount(5),second.transfers[0].papers);
        assert_eq!(Votes::from(1),second.status.exhausted);
        assert_eq!(vec![Votes::from(2),Votes::from(2)],second.status.held);
        Ok(())
    }

    #[test]
    fn elimination_with_tie_then_fill_remaining() -> anyhow::Result<()> {
        let (election,transcript) = run(&["a","b","b","c"],1,&ElectionOptions::default())?;
        assert_eq!(Votes::from(3),transcript.quota.quota);
        assert_eq!(3,transcript.rounds.len());
        let first = &transcript.rounds[0];
        assert_eq!(RoundAction::Eliminated(CandidateIndex(0)),first.action);
        assert_eq!(1,first.decisions.len());
        assert_eq!(vec![CandidateIndex(0),CandidateIndex(2)],first.decisions[0].increasing_favour);
        assert_eq!(TieResolutionUsage::Exclusion,first.decisions[0].usage);
        assert_eq!(TieResolutionMethod::CandidateOrder,first.decisions[0].method);
        assert!(first.transfers[0].is_exhausted());
        let second = &transcript.rounds[1];
        assert_eq!(Some(&Votes::from(2)),second.tally_of(CandidateIndex(1)));
        assert_eq!(Some(&Votes::from(1)),second.tally_of(CandidateIndex(2)));
        assert_eq!(RoundAction::Eliminated(CandidateIndex(2)),second.action);
        assert!(second.decisions.is_empty());
        let third = &transcript.rounds[2];
        assert_eq!(RoundAction::ElectedAllRemaining,third.action);
        assert_eq!(ElectionReason::AllRemainingMustBeElected,third.elected[0].why);
        assert_eq!(vec!["b"],election.names(&transcript.elected));
        assert_eq!(Votes::from(2),third.status.exhausted);
        assert_eq!(BallotPaperCount(2),third.status.exhausted_papers);
        Ok(())
    }

    #[test]
    fn explicit_order_changes_who_is_excluded() -> anyhow::Result<()> {
        let options = with_order(CandidateOrder::Explicit(vec!["c".to_string(),"a".to_string()]));
        let (election,transcript) = run(&["a","b","b","c"],1,&options)?;
        assert_eq!(RoundAction::Eliminated(CandidateIndex(2)),transcript.rounds[0].action);
        assert_eq!(RoundAction::Eliminated(CandidateIndex(0)),transcript.rounds[1].action);
        assert_eq!(vec!["b"],election.names(&transcript.elected));
        Ok(())
    }

    #[test]
    fn two_leaders_elected_in_first_round() -> anyhow::Result<()> {
        let (election,transcript) = run(&["AC","BC","CB","AB","BAC"],2,&ElectionOptions::default())?;
        assert_eq!(Votes::from(2),transcript.quota.quota);
        assert_eq!(1,transcript.rounds.len());
        // equal tallies, so the later registered candidate goes first.
        assert_eq!(vec!["B","A"],election.names(&transcript.elected));
        assert_eq!(TieResolutionUsage::OrderElected,transcript.rounds[0].decisions[0].usage);
        Ok(())
    }

    #[test]
    fn sequential_surpluses_in_one_round() -> anyhow::Result<()> {
        let ballots = ["AB","ABD","AC","ACD","B","BC","BCA","BD"];
        let (election,transcript) = run(&ballots,3,&with_order(CandidateOrder::DonkeyVote))?;
        assert_eq!(Votes::from(3),transcript.quota.quota);
        let first = &transcript.rounds[0];
        assert_eq!(RoundAction::ElectedByQuota,first.action);
        assert_eq!(2,first.elected.len());
        assert_eq!(CandidateIndex(0),first.elected[0].who);
        assert_eq!("1/4",first.elected[0].transfer_value.as_ref().unwrap().to_string());
        // B picks up A's surplus before its own is transferred.
        assert_eq!(CandidateIndex(1),first.elected[1].who);
        assert_eq!(votes("9/2"),first.elected[1].votes);
        assert_eq!(votes("3/2"),first.elected[1].surplus);
        assert_eq!("1/3",first.elected[1].transfer_value.as_ref().unwrap().to_string());
        assert_eq!(votes("5/12"),first.status.exhausted);
        let second = &transcript.rounds[1];
        assert_eq!(Some(&votes("7/6")),second.tally_of(CandidateIndex(2)));
        assert_eq!(Some(&votes("5/12")),second.tally_of(CandidateIndex(3)));
        assert_eq!(RoundAction::Eliminated(CandidateIndex(3)),second.action);
        assert_eq!(RoundAction::ElectedAllRemaining,transcript.rounds[2].action);
        assert_eq!(vec!["A","B","C"],election.names(&transcript.elected));
        Ok(())
    }

    #[test]
    fn too_many_to_eliminate() -> anyhow::Result<()> {
        let ballots = ["BC","BC","BC","CA","CB","CD","DA","DB","DC","AC","AC","AC"];
        let (election,transcript) = run(&ballots,2,&with_order(CandidateOrder::DonkeyVote))?;
        assert_eq!(Votes::from(5),transcript.quota.quota);
        assert_eq!(3,transcript.rounds.len());
        assert_eq!(RoundAction::Eliminated(CandidateIndex(3)),transcript.rounds[0].action);
        assert_eq!(RoundAction::Eliminated(CandidateIndex(2)),transcript.rounds[1].action);
        assert_eq!(vec!["A","B"],election.names(&transcript.elected));
        let (election,transcript) = run(&ballots,2,&ElectionOptions::default())?;
        assert_eq!(4,transcript.rounds.len());
        assert_eq!(vec!["C","D"],election.names(&transcript.elected));
        Ok(())
    }

    #[test]
    fn readme_example() -> anyhow::Result<()> {
        let ballots = ["ab","abc","ace","b","b","bca","bcade","cde","ce","ced"];
        let (election,transcript) = run(&ballots,2,&with_order(CandidateOrder::DonkeyVote))?;
        assert_eq!(Votes::from(4),transcript.quota.quota);
        assert_eq!(5,transcript.rounds.len());
        assert_eq!(vec!["b","a"],election.names(&transcript.elected));
        let (election,transcript) = run(&ballots,2,&ElectionOptions::default())?;
        assert_eq!(vec!["b","c"],election.names(&transcript.elected));
        assert_eq!(RoundAction::ElectedByQuota,transcript.rounds[4].action);
        Ok(())
    }

    #[test]
    fn countback_looks_at_earlier_rounds() -> anyhow::Result<()> {
        let ballots = ["a","a","a","a","a","b","b","b","cb","cb","dcb"];
        let (election,transcript) = run(&ballots,1,&ElectionOptions::default())?;
        assert_eq!(Votes::from(6),transcript.quota.quota);
        // b and c are tied on 3, but c had fewer at the start of the first round.
        let second = &transcript.rounds[1];
        assert_eq!(RoundAction::Eliminated(CandidateIndex(2)),second.action);
        assert_eq!(TieResolutionMethod::Countback,second.decisions[0].method);
        assert_eq!(vec!["b"],election.names(&transcript.elected));
        let options = ElectionOptions{ tie_resolution: Some(TieBreakPolicy{ countback: false, order: CandidateOrder::ReverseDonkeyVote }), ..Default::default() };
        let (election,transcript) = run(&ballots,1,&options)?;
        assert_eq!(RoundAction::Eliminated(CandidateIndex(1)),transcript.rounds[1].action);
        assert_eq!(vec!["a"],election.names(&transcript.elected));
        assert_eq!(4,transcript.rounds.len());
        Ok(())
    }

    #[test]
    fn public_example_with_sixty_thousand_papers() -> anyhow::Result<()> {
        let ballots = [("A",7500),("AB",1500),("AG",500),("B",5800),("BE",5000),("C",9200),("D",2000),("DC",4000),("DCG",1000),("E",6800),
            ("F",3000),("FA",3200),("FB",3000),("FC",800),("FD",200),("FE",1800),("GA",3000),("GABEF",1700)];
        let data = ElectionData::from_weighted_named_votes(ballots.iter().map(|(prefs,n)|(prefs.chars().map(String::from),*n)))?;
        let election = Election::new(data,&ElectionOptions{ vacancies: Some(stv::ballot_metadata::NumberOfCandidates(5)), ..Default::default() })?;
        let transcript = election.run_count()?;
        assert_eq!(BallotPaperCount(60000),transcript.quota.papers);
        assert_eq!(Votes::from(10001),transcript.quota.quota);
        assert_eq!(vec!["F","B","A","C","E"],election.names(&transcript.elected));
        assert_eq!(6,transcript.rounds.len());
        let first = &transcript.rounds[0];
        assert_eq!(Votes::from(12000),first.elected[0].votes);
        assert_eq!(votes("45199/4"),first.elected[1].votes);
        assert_eq!(RoundAction::Eliminated(CandidateIndex(6)),transcript.rounds[2].action);
        assert_eq!(RoundAction::Eliminated(CandidateIndex(3)),transcript.rounds[3].action);
        for round in &transcript.rounds {
            for elected in &round.elected {
                if elected.why==ElectionReason::ReachedQuota { assert_eq!(Votes::from(10001),elected.retained()); }
            }
        }
        Ok(())
    }

    #[test]
    fn ballot_order_does_not_matter() -> anyhow::Result<()> {
        let ballots = ["ab","abc","ace","b","b","bca","bcade","cde","ce","ced"];
        let mut reversed = ballots;
        reversed.reverse();
        let (_,forwards) = run(&ballots,2,&ElectionOptions::default())?;
        let (_,backwards) = run(&reversed,2,&ElectionOptions::default())?;
        assert_eq!(forwards,backwards);
        Ok(())
    }

    #[test]
    fn run_count_is_idempotent() -> anyhow::Result<()> {
        let election = Election::from_votes(chars(&["AB","ABD","AC","ACD","B","BC","BCA","BD"]),3)?;
        let once = election.run_count()?;
        let twice = election.run_count()?;
        assert_eq!(once,twice);
        let fresh = Election::from_votes(chars(&["AB","ABD","AC","ACD","B","BC","BCA","BD"]),3)?;
        assert_eq!(once,fresh.run_count()?);
        Ok(())
    }

    #[test]
    fn transcript_serializes_exact_values() -> anyhow::Result<()> {
        let (election,transcript) = run(&["AB","ABD","AC","ACD","B","BC","BCA","BD"],3,&with_order(CandidateOrder::DonkeyVote))?;
        let json = serde_json::to_string(&election.run_count_with_metadata()?)?;
        assert!(json.contains("\"7/6\""));
        let back : stv::distribution_of_preferences_transcript::TranscriptWithMetadata = serde_json::from_str(&json)?;
        assert_eq!(transcript,back.transcript);
        assert_eq!(vec!["A","B","C"],back.elected_names());
        Ok(())
    }

    #[test]
    fn multiplicity_is_the_same_as_separate_papers() -> anyhow::Result<()> {
        let separate = ElectionData::from_named_votes(chars(&["ab","ab","ab","ab","ba"]))?;
        let mut merged = separate.clone();
        merged.merge_identical_ballots();
        assert_eq!(2,merged.ballots.len());
        let options = ElectionOptions{ vacancies: Some(stv::ballot_metadata::NumberOfCandidates(2)), ..Default::default() };
        let separate = Election::new(separate,&options)?.run_count()?;
        let merged = Election::new(merged,&options)?.run_count()?;
        assert_eq!(separate,merged);
        Ok(())
    }

    #[test]
    fn errors_are_reported_at_construction() -> anyhow::Result<()> {
        let ballots = chars(&["ab","ba"]);
        assert_eq!(ElectionError::Config(ConfigError::NoSeats),Election::from_votes(ballots.clone(),0).unwrap_err());
        assert_eq!(ElectionError::Config(ConfigError::TooManySeats{seats:3,candidates:2}),Election::from_votes(ballots.clone(),3).unwrap_err());
        let small = ElectionOptions{ max_input_size: Some(3), ..Default::default() };
        assert_eq!(ElectionError::Config(ConfigError::InputTooLarge{records:2,candidates:2,limit:3}),Election::from_votes_with_options(ballots.clone(),1,&small).unwrap_err());
        let big_enough = ElectionOptions{ max_input_size: Some(4), ..Default::default() };
        Election::from_votes_with_options(ballots.clone(),1,&big_enough)?;
        assert_eq!(ElectionError::Validation(ValidationError::RepeatedCandidate{ballot:2,candidate:"a".to_string()}),Election::from_votes(chars(&["ab","aba"]),1).unwrap_err());
        let no_seats_given = ElectionData::from_named_votes(ballots)?;
        assert_eq!(ElectionError::Config(ConfigError::MissingVacancies),Election::new(no_seats_given,&ElectionOptions::default()).unwrap_err());
        let only_blank : ElectionData = serde_json::from_str(r#"{"metadata":{"candidates":[{"name":"a"}],"vacancies":1},"ballots":[{"candidates":[],"n":2}]}"#)?;
        assert_eq!(ElectionError::Arithmetic(ArithmeticError::NoValidVotes),Election::new(only_blank,&ElectionOptions::default()).unwrap_err());
        let favour_stranger = ElectionOptions{ tie_resolution: Some(TieBreakPolicy{ countback: true, order: CandidateOrder::Explicit(vec!["z".to_string()]) }), ..Default::default() };
        assert_eq!(ElectionError::Config(ConfigError::UnknownTieBreakCandidate("z".to_string())),Election::from_votes_with_options(chars(&["ab"]),1,&favour_stranger).unwrap_err());
        Ok(())
    }

    #[test]
    fn same_name_twice_is_not_two_candidates() -> anyhow::Result<()> {
        let data : ElectionData = serde_json::from_str(r#"{"metadata":{"candidates":[{"name":"a"},{"name":"a"},{"name":"b"}],"vacancies":1},
            "ballots":[{"candidates":[0],"n":2},{"candidates":[1],"n":2},{"candidates":[2],"n":3}]}"#)?;
        assert_eq!(ElectionError::Validation(ValidationError::RepeatedCandidateName("a".to_string())),Election::new(data,&ElectionOptions::default()).unwrap_err());
        Ok(())
    }

    #[test]
    fn huge_paper_counts_are_an_error_not_a_panic() -> anyhow::Result<()> {
        let data = ElectionData::from_weighted_named_votes(vec![(vec!["a"],usize::MAX),(vec!["b"],2)])?;
        let options = ElectionOptions{ vacancies: Some(stv::ballot_metadata::NumberOfCandidates(1)), ..Default::default() };
        assert_eq!(ElectionError::Validation(ValidationError::TooManyPapers),Election::new(data,&options).unwrap_err());
        Ok(())
    }
}
