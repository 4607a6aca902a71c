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

//! The immutable per-call execution environment.

use crate::data_word::DataWord;
use ethereum_types::Address;

/// Everything a `Program` needs to know about the call it is executing,
/// fixed for the lifetime of that call. Constructed by the transaction
/// processor (top-level) or by `Program` itself (sub-calls/creates).
#[derive(Debug, Clone)]
pub struct ProgramInvoke {
    /// Address of the account whose storage this call reads/writes.
    pub owner_address: Address,
    /// Transaction initiator.
    pub origin: Address,
    /// Immediate caller (may differ from `origin` in a nested call).
    pub caller: Address,
    /// Value attached to this call.
    pub call_value: DataWord,
    /// Calldata.
    pub data: Vec<u8>,
    /// Gas price of the enclosing transaction.
    pub gas_price: DataWord,
    /// Gas available to this frame.
    pub gas: DataWord,
    /// Block coinbase.
    pub coinbase: Address,
    /// Block timestamp.
    pub timestamp: u64,
    /// Block number.
    pub number: u64,
    /// Block difficulty.
    pub difficulty: DataWord,
    /// Block gas limit.
    pub gas_limit: DataWord,
    /// Chain id, for `CHAINID`.
    pub chain_id: u64,
    /// Nesting depth; 0 for the top-level transaction frame.
    pub call_depth: usize,
    /// True only for the top-level entry from the transaction processor.
    pub by_transaction: bool,
    /// True when invoked by a conformance-test harness that pre-seeds state
    /// and wants `play` to charge the transaction intrinsic cost but not
    /// actually run the code.
    pub by_testing_suite: bool,
    /// True inside a `STATICCALL` frame (or any of its descendants): state
    /// mutation is forbidden.
    pub static_flag: bool,
}

impl ProgramInvoke {
    /// Build the invoke for a fresh sub-call, inheriting block context and
    /// incrementing depth.
    pub fn for_sub_call(
        &self,
        owner_address: Address,
        caller: Address,
        call_value: DataWord,
        gas: DataWord,
        data: Vec<u8>,
        static_flag: bool,
    ) -> ProgramInvoke {
        ProgramInvoke {
            owner_address,
            origin: self.origin,
            caller,
            call_value,
            data,
            gas_price: self.gas_price,
            gas,
            coinbase: self.coinbase,
            timestamp: self.timestamp,
            number: self.number,
            difficulty: self.difficulty,
            gas_limit: self.gas_limit,
            chain_id: self.chain_id,
            call_depth: self.call_depth + 1,
            by_transaction: false,
            by_testing_suite: false,
            static_flag: static_flag || self.static_flag,
        }
    }
}
