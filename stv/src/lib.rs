// Copyright 2021-2026 Andrew Conway.
// This file is part of ConcreteSTV.
// ConcreteSTV is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// ConcreteSTV is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with ConcreteSTV.  If not, see <https://www.gnu.org/licenses/>.


pub mod ballot_paper;
pub mod ballot_metadata;
pub mod candidate_registry;
pub mod election_data;
pub mod election;
pub mod error;
pub mod ballot_pile;
pub mod transfer_value;
pub mod quota;
pub mod vote_transfer;
pub mod preference_distribution;
pub mod distribution_of_preferences_transcript;
pub mod tie_resolution;
pub mod parse_votes;
