// Copyright 2015-2020 Parity Technologies (UK) Ltd.
// This file is part of OpenEthereum.

// OpenEthereum is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.

// OpenEthereum is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.

// You should have received a copy of the GNU General Public License
// along with OpenEthereum.  If not, see <http://www.gnu.org/licenses/>.

//! Precompiled contracts: a named external collaborator.
//!
//! The engine only dispatches to precompiles by address; it never
//! implements one. `ecrecover`, the hash functions, the pairing checks, and
//! so on all live outside this crate.

use crate::data_word::DataWord;

/// A precompiled contract: a pure function of its input.
pub trait Precompile {
    /// Run the precompile, returning its output and the gas it consumed.
    /// `gas_available` lets implementations that are priced per-input-size
    /// (e.g. the hash precompiles) fail fast rather than compute and then
    /// discard the result.
    fn execute(&self, input: &[u8], gas_available: u64) -> PrecompileResult;
}

/// Outcome of running a precompile.
pub enum PrecompileResult {
    Success { output: Vec<u8>, gas_used: u64 },
    Failure,
}

/// Looks up the precompile registered at `address`, if any.
pub trait PrecompileRegistry {
    fn contract_for_address(&self, address: &DataWord) -> Option<&dyn Precompile>;
}
