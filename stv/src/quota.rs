// Copyright 2026 Andrew Conway.
// This file is part of ConcreteSTV.
// ConcreteSTV is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// ConcreteSTV is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with ConcreteSTV.  If not, see <https://www.gnu.org/licenses/>.

use num::{BigInt, BigRational, Zero};
use crate::ballot_metadata::NumberOfCandidates;
use crate::error::{ArithmeticError, ConfigError, ElectionError};
use crate::transfer_value::Votes;

/// Check that the number of seats makes sense for the number of candidates.
pub fn check_vacancies(vacancies:NumberOfCandidates,num_candidates:usize) -> Result<(),ConfigError> {
    if vacancies.0==0 { Err(ConfigError::NoSeats) }
    else if vacancies.0>num_candidates { Err(ConfigError::TooManySeats{seats:vacancies.0,candidates:num_candidates}) }
    else { Ok(()) }
}

/// The Droop quota, floor(total/(vacancies+1))+1.
///
/// The total may be fractional in principle, in which case the floor is of the exact quotient.
/// ```
/// use stv::quota::droop_quota;
/// use stv::transfer_value::Votes;
/// use stv::ballot_metadata::NumberOfCandidates;
/// assert_eq!(droop_quota(&Votes::from(5),NumberOfCandidates(1),2).unwrap(),Votes::from(3));
/// assert_eq!(droop_quota(&Votes::from(60000),NumberOfCandidates(5),6).unwrap(),Votes::from(10001));
/// assert!(droop_quota(&Votes::from(0),NumberOfCandidates(1),2).is_err());
/// ```
pub fn droop_quota(total:&Votes,vacancies:NumberOfCandidates,num_candidates:usize) -> Result<Votes,ElectionError> {
    check_vacancies(vacancies,num_candidates)?;
    if total.is_zero() { return Err(ArithmeticError::NoValidVotes.into()); }
    let divisor = BigRational::from_integer(BigInt::from(vacancies.0+1));
    let quotient = (&total.0/divisor).floor();
    Ok(Votes(quotient+BigRational::from_integer(BigInt::from(1))))
}

#[cfg(test)]
mod tests {
    use crate::ballot_metadata::NumberOfCandidates;
    use crate::error::{ArithmeticError, ConfigError, ElectionError};
    use crate::quota::droop_quota;
    use crate::transfer_value::Votes;

    #[test]
    fn test_droop_quota() {
        assert_eq!(Votes::from(2),droop_quota(&Votes::from(5),NumberOfCandidates(2),2).unwrap());
        assert_eq!(Votes::from(4),droop_quota(&Votes::from(10),NumberOfCandidates(2),5).unwrap());
        assert_eq!(Votes::from(3),droop_quota(&Votes::from(4),NumberOfCandidates(1),3).unwrap());
        let fractional : Votes = "13/2".parse().unwrap();
        assert_eq!(Votes::from(4),droop_quota(&fractional,NumberOfCandidates(1),3).unwrap());
    }

    #[test]
    fn test_bad_quota_inputs() {
        assert_eq!(Err(ElectionError::Config(ConfigError::NoSeats)),droop_quota(&Votes::from(5),NumberOfCandidates(0),2));
        assert_eq!(Err(ElectionError::Config(ConfigError::TooManySeats{seats:3,candidates:2})),droop_quota(&Votes::from(5),NumberOfCandidates(3),2));
        assert_eq!(Err(ElectionError::Arithmetic(ArithmeticError::NoValidVotes)),droop_quota(&Votes::from(0),NumberOfCandidates(1),2));
    }
}
