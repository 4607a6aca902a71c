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

//! Cost schedule and other parameterisations for the EVM.
//!
//! A `Schedule` is a plain data record, constructed explicitly by the host
//! and passed by reference into every place gas is computed. There is no
//! global/ambient schedule anywhere in this crate.

/// Definition of the cost schedule and other parameterisations for the EVM.
#[derive(Debug, Clone)]
pub struct Schedule {
    /// Does it have `DELEGATECALL`.
    pub have_delegate_call: bool,
    /// Does it have `CREATE2`.
    pub have_create2: bool,
    /// Does it have `REVERT`.
    pub have_revert: bool,
    /// Does it have `STATICCALL`.
    pub have_static_call: bool,
    /// Does it have `RETURNDATASIZE`/`RETURNDATACOPY`.
    pub have_return_data: bool,
    /// Does it have `SHL`/`SHR`/`SAR`.
    pub have_bitwise_shifting: bool,
    /// Does it have `EXTCODEHASH`.
    pub have_extcodehash: bool,
    /// Does it have `CHAINID`.
    pub have_chain_id: bool,
    /// Does it have `SELFBALANCE`.
    pub have_selfbalance: bool,
    /// VM stack limit.
    pub stack_limit: usize,
    /// Max number of nested calls/creates.
    pub max_depth: usize,
    /// Default per-step gas cost.
    pub step_gas: usize,
    /// Gas price for `EXP`.
    pub exp_gas: usize,
    /// Additional gas for `EXP` per byte of exponent.
    pub exp_byte_gas: usize,
    /// Gas price for `SHA3`.
    pub sha3_gas: usize,
    /// Additional gas for `SHA3` per word of hashed memory.
    pub sha3_word_gas: usize,
    /// Gas price for `SLOAD`.
    pub sload_gas: usize,
    /// Gas price for `SSTORE` when `storage == 0, new != 0`.
    pub sstore_set_gas: usize,
    /// Gas price for `SSTORE` when altering a non-zero value.
    pub sstore_reset_gas: usize,
    /// Gas refund for `SSTORE` clearing (`storage != 0, new == 0`).
    pub sstore_refund_gas: usize,
    /// Gas price for `LOGn`.
    pub log_gas: usize,
    /// Additional gas for `LOGn` data, per byte.
    pub log_data_gas: usize,
    /// Additional gas for `LOGn`, per topic.
    pub log_topic_gas: usize,
    /// Gas price for `CREATE`/`CREATE2`.
    pub create_gas: usize,
    /// Gas price for `*CALL*` opcodes.
    pub call_gas: usize,
    /// Stipend added to a `CALL`/`CALLCODE` forwarding a non-zero value.
    pub call_stipend: usize,
    /// Additional gas for value transfer (`CALL`/`CALLCODE`).
    pub call_value_transfer_gas: usize,
    /// Additional gas for creating a new account (`CALL`/`CALLCODE`).
    pub call_new_account_gas: usize,
    /// Refund for `SUICIDE`.
    pub suicide_refund_gas: usize,
    /// Gas for used memory (linear term).
    pub memory_gas: usize,
    /// Coefficient used to convert memory size to the quadratic gas term.
    pub quad_coeff_div: usize,
    /// Gas price for copying memory, per word.
    pub copy_gas: usize,
    /// Price of `EXTCODESIZE`.
    pub extcodesize_gas: usize,
    /// Base price of `EXTCODECOPY`.
    pub extcodecopy_base_gas: usize,
    /// Price of `BALANCE`.
    pub balance_gas: usize,
    /// Price of `EXTCODEHASH`.
    pub extcodehash_gas: usize,
    /// Price of `SUICIDE`.
    pub suicide_gas: usize,
    /// Additional gas to pay when `SUICIDE` credits a non-existent account.
    pub suicide_to_new_account_cost: usize,
    /// Transaction base cost.
    pub tx_gas: usize,
    /// `CREATE` transaction cost.
    pub tx_create_gas: usize,
    /// Additional cost per zero byte of transaction data.
    pub tx_data_zero_gas: usize,
    /// Additional cost per non-zero byte of transaction data.
    pub tx_data_non_zero_gas: usize,
    /// `BLOCKHASH` gas cost.
    pub blockhash_gas: usize,
    /// If `Some(x)`: a `CALL`'s forwarded gas is capped at `gas - gas / x`
    /// (EIP-150's 63/64ths rule). If `None`, the full requested amount is
    /// forwarded, or the call fails out-of-gas if more than available is
    /// requested.
    pub sub_gas_cap_divisor: Option<usize>,
    /// Maximum refund as a fraction of gas actually spent (gas_used / x).
    pub max_refund_quotient: usize,
}

impl Schedule {
    /// The schedule used by default: a post-Istanbul constant set without
    /// EIP-2929/2930 warm/cold access-list accounting (see DESIGN.md).
    pub fn istanbul() -> Schedule {
        Schedule {
            have_delegate_call: true,
            have_create2: true,
            have_revert: true,
            have_static_call: true,
            have_return_data: true,
            have_bitwise_shifting: true,
            have_extcodehash: true,
            have_chain_id: true,
            have_selfbalance: true,
            stack_limit: 1024,
            max_depth: 1024,
            step_gas: 3,
            exp_gas: 10,
            exp_byte_gas: 50,
            sha3_gas: 30,
            sha3_word_gas: 6,
            sload_gas: 800,
            sstore_set_gas: 20000,
            sstore_reset_gas: 5000,
            sstore_refund_gas: 15000,
            log_gas: 375,
            log_data_gas: 8,
            log_topic_gas: 375,
            create_gas: 32000,
            call_gas: 700,
            call_stipend: 2300,
            call_value_transfer_gas: 9000,
            call_new_account_gas: 25000,
            suicide_refund_gas: 24000,
            memory_gas: 3,
            quad_coeff_div: 512,
            copy_gas: 3,
            extcodesize_gas: 700,
            extcodecopy_base_gas: 700,
            balance_gas: 700,
            extcodehash_gas: 700,
            suicide_gas: 5000,
            suicide_to_new_account_cost: 25000,
            tx_gas: 21000,
            tx_create_gas: 53000,
            tx_data_zero_gas: 4,
            tx_data_non_zero_gas: 16,
            blockhash_gas: 20,
            sub_gas_cap_divisor: Some(64),
            max_refund_quotient: 2,
        }
    }

    /// The Frontier-era schedule: no `DELEGATECALL`, no `REVERT`, no
    /// `CREATE2`, flat-rate `SLOAD`/`BALANCE`. Kept mainly so tests and
    /// hosts can exercise fork-gating (`DisabledInstruction`).
    pub fn frontier() -> Schedule {
        Schedule {
            have_delegate_call: false,
            have_create2: false,
            have_revert: false,
            have_static_call: false,
            have_return_data: false,
            have_bitwise_shifting: false,
            have_extcodehash: false,
            have_chain_id: false,
            have_selfbalance: false,
            sload_gas: 50,
            balance_gas: 20,
            extcodesize_gas: 20,
            extcodecopy_base_gas: 20,
            extcodehash_gas: 400,
            exp_byte_gas: 10,
            suicide_gas: 0,
            suicide_to_new_account_cost: 0,
            suicide_refund_gas: 24000,
            tx_data_non_zero_gas: 68,
            sub_gas_cap_divisor: None,
            ..Schedule::istanbul()
        }
    }
}

impl Default for Schedule {
    fn default() -> Self {
        Schedule::istanbul()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quad_coeff_div_matches_reference_evm() {
        assert_eq!(Schedule::default().quad_coeff_div, 512);
        assert_eq!(Schedule::frontier().quad_coeff_div, 512);
    }

    #[test]
    fn frontier_disables_later_opcodes() {
        let schedule = Schedule::frontier();
        assert!(!schedule.have_delegate_call);
        assert!(!schedule.have_create2);
        assert!(Schedule::istanbul().have_delegate_call);
    }
}
