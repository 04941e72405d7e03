// Copyright 2021-2026 Andrew Conway.
// This file is part of ConcreteSTV.
// ConcreteSTV is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// ConcreteSTV is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with ConcreteSTV.  If not, see <https://www.gnu.org/licenses/>.

//! Exact rational values used for ballot weights and tallies.
//! Nothing in the count is ever held as a float.

use serde::Serialize;
use serde::Deserialize;
use num::{One, Zero, BigRational, BigInt, Signed};
use crate::ballot_pile::BallotPaperCount;
use std::fmt::{Display, Formatter};
use std::convert::TryFrom;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Sub, SubAssign};
use std::str::FromStr;
use num::rational::{ParseRatioError, Ratio};

/// The weight of each paper in a ballot record. Starts at 1 and is only ever multiplied by a surplus ratio.
#[derive(Clone,Debug,Serialize,Deserialize,Ord, PartialOrd, Eq, PartialEq,Hash)]
#[serde(into = "String")]
#[serde(try_from = "String")]
pub struct TransferValue(pub num::rational::BigRational);

impl TransferValue {
    pub fn one() -> Self { TransferValue(BigRational::one())}
    pub fn zero() -> Self { TransferValue(BigRational::zero())}
    /// The Gregory ratio surplus/votes. None if votes is zero, as there is nothing to transfer.
    pub fn from_surplus(surplus:&Votes,votes:&Votes) -> Option<Self> {
        if votes.is_zero() { None } else { Some(TransferValue(&surplus.0/&votes.0)) }
    }
    pub fn is_zero(&self) -> bool { self.0.is_zero() }

    /// The number of votes represented by this many papers at this transfer value.
    pub fn mul(&self,papers:BallotPaperCount) -> Votes {
        Votes(&self.0*BigRational::from_integer(BigInt::from(papers.0)))
    }

    /// Compose with a further ratio, as happens when a surplus is passed on.
    pub fn scale(&self,ratio:&TransferValue) -> TransferValue { TransferValue(&self.0*&ratio.0) }
}

impl Display for TransferValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f,"{}",self.0)
    }
}

impl From<TransferValue> for String {
    fn from(t: TransferValue) -> Self { t.0.to_string() }
}

impl FromStr for TransferValue {
    type Err = ParseRatioError;
    fn from_str(s: &str) -> Result<Self, Self::Err> { Ok(TransferValue(Ratio::from_str(s)?)) }
}

impl TryFrom<String> for TransferValue {
    type Error = ParseRatioError;
    fn try_from(s: String) -> Result<Self, Self::Error> { Ok(TransferValue(Ratio::from_str(&s)?)) }
}

/// A number of votes, possibly fractional. Serialized as a string such as "7/6" so that no precision is lost.
#[derive(Clone,Debug,Serialize,Deserialize,Ord, PartialOrd, Eq, PartialEq,Hash)]
#[serde(into = "String")]
#[serde(try_from = "String")]
pub struct Votes(pub num::rational::BigRational);

impl Votes {
    /// Display rounded down to the given number of decimal places. Only for human consumption.
    /// ```
    /// use stv::transfer_value::Votes;
    /// let v : Votes = "7/6".parse().unwrap();
    /// assert_eq!(v.to_decimal_string(3),"1.166");
    /// assert_eq!(Votes::from(3).to_decimal_string(2),"3.00");
    /// assert_eq!(Votes::from(3).to_decimal_string(0),"3");
    /// ```
    pub fn to_decimal_string(&self,digits:usize) -> String {
        let scale : BigInt = num::pow(BigInt::from(10),digits);
        let scaled = (&self.0*BigRational::from_integer(scale.clone())).floor().to_integer();
        let sign = if scaled.is_negative() { "-" } else { "" };
        let scaled = scaled.abs();
        let whole = &scaled/&scale;
        if digits==0 { format!("{}{}",sign,whole) }
        else {
            let fraction = &scaled%&scale;
            format!("{}{}.{:0>width$}",sign,whole,fraction.to_string(),width=digits)
        }
    }
}

impl From<usize> for Votes {
    fn from(n: usize) -> Self { Votes(BigRational::from_integer(BigInt::from(n))) }
}

impl From<BallotPaperCount> for Votes {
    fn from(n: BallotPaperCount) -> Self { Votes::from(n.0) }
}

impl Default for Votes {
    fn default() -> Self { Votes::zero() }
}

impl Zero for Votes {
    fn zero() -> Self { Votes(BigRational::zero()) }
    fn is_zero(&self) -> bool { self.0.is_zero() }
}

impl Add for Votes {
    type Output = Votes;
    fn add(self, rhs: Self) -> Self::Output { Votes(self.0+rhs.0) }
}
impl <'a> Add<&'a Votes> for &'a Votes {
    type Output = Votes;
    fn add(self, rhs: &'a Votes) -> Self::Output { Votes(&self.0+&rhs.0) }
}
impl Sub for Votes {
    type Output = Votes;
    fn sub(self, rhs: Self) -> Self::Output { Votes(self.0-rhs.0) }
}
impl <'a> Sub<&'a Votes> for &'a Votes {
    type Output = Votes;
    fn sub(self, rhs: &'a Votes) -> Self::Output { Votes(&self.0-&rhs.0) }
}
impl AddAssign for Votes {
    fn add_assign(&mut self, rhs: Self) { self.0+=rhs.0; }
}
impl <'a> AddAssign<&'a Votes> for Votes {
    fn add_assign(&mut self, rhs: &'a Votes) { self.0+=&rhs.0; }
}
impl SubAssign for Votes {
    fn sub_assign(&mut self, rhs: Self) { self.0-=rhs.0; }
}
impl Sum for Votes {
    fn sum<I: Iterator<Item=Self>>(iter: I) -> Self { iter.fold(Votes::zero(),|a,b|a+b) }
}
impl <'a> Sum<&'a Votes> for Votes {
    fn sum<I: Iterator<Item=&'a Votes>>(iter: I) -> Self {
        let mut res = Votes::zero();
        for v in iter { res+=v; }
        res
    }
}

impl Display for Votes {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f,"{}",self.0)
    }
}

impl From<Votes> for String {
    fn from(t: Votes) -> Self { t.0.to_string() }
}

impl FromStr for Votes {
    type Err = ParseRatioError;
    fn from_str(s: &str) -> Result<Self, Self::Err> { Ok(Votes(Ratio::from_str(s)?)) }
}

impl TryFrom<String> for Votes {
    type Error = ParseRatioError;
    fn try_from(s: String) -> Result<Self, Self::Error> { Ok(Votes(Ratio::from_str(&s)?)) }
}
