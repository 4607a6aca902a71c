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

//! Per-step gas accounting.
//!
//! Costs are computed in `u128` rather than the schedule's native `usize`
//! so that the quadratic memory term can never silently wrap, even when
//! pricing memory up to the protocol word limit.

use crate::memory::mem_needed;
use crate::stack::Stack;
use vm::{Error, OpCode, Result, Schedule};

fn ceil_words(bytes: usize) -> u128 {
    ((bytes + 31) / 32) as u128
}

/// What one instruction costs before it runs, split by the accounting rule
/// that produced each part (§4.2-§4.4).
#[derive(Debug, Clone, Copy, Default)]
pub struct GasRequirements {
    /// Base cost: schedule constant plus any peek-only variable component
    /// (`SHA3`/`EXP`/`LOGn` sizes, which are known before the opcode pops
    /// its operands).
    pub base_cost: u128,
    /// Bytes memory must cover after this instruction, `0` if untouched.
    pub memory_required: usize,
    /// Bytes copied by a copy-class opcode, for the per-word copy charge.
    pub copy_size: usize,
}

/// Tracks remaining gas for one `Program` frame.
#[derive(Debug, Clone)]
pub struct Gasometer {
    current_gas: u128,
}

impl Gasometer {
    pub fn new(gas: u128) -> Self {
        Gasometer { current_gas: gas }
    }

    pub fn current_gas(&self) -> u128 {
        self.current_gas
    }

    /// Deduct `cost`, raising `OutOfGas` (and zeroing the counter, per
    /// §4.3's "spends all remaining gas" rule) if it would go negative.
    pub fn spend(&mut self, cost: u128) -> Result<()> {
        if cost > self.current_gas {
            self.current_gas = 0;
            return Err(Error::OutOfGas);
        }
        self.current_gas -= cost;
        Ok(())
    }

    /// Credit gas back, e.g. a sub-call's unused allowance.
    pub fn credit(&mut self, amount: u128) {
        self.current_gas += amount;
    }

    /// Zero the counter outright, used when a fatal error halts the frame.
    pub fn exhaust(&mut self) {
        self.current_gas = 0;
    }

    /// Gas owed for growing memory from `old_size` to `new_size` bytes.
    pub fn memory_expansion_cost(old_size: usize, new_size: usize, schedule: &Schedule) -> u128 {
        let old_words = ceil_words(old_size);
        let new_words = ceil_words(new_size);
        if new_words <= old_words {
            return 0;
        }
        let linear = (schedule.memory_gas as u128) * (new_words - old_words);
        let quad = (new_words * new_words - old_words * old_words) / (schedule.quad_coeff_div as u128);
        linear + quad
    }

    /// Gas owed for copying `size` bytes, charged per whole word.
    pub fn copy_cost(size: usize, schedule: &Schedule) -> u128 {
        (schedule.copy_gas as u128) * ceil_words(size)
    }

    /// Gas forwarded to a sub-call/create after EIP-150's 63/64ths cap.
    pub fn capped_call_gas(requested: u128, gas_left_after_base: u128, schedule: &Schedule) -> u128 {
        match schedule.sub_gas_cap_divisor {
            Some(divisor) => {
                let cap = gas_left_after_base - gas_left_after_base / (divisor as u128);
                requested.min(cap)
            }
            None => requested,
        }
    }

    /// Base cost and any memory/copy sizing for `op`, computed by peeking
    /// the stack (nothing is popped). Opcodes whose true cost depends on
    /// repository state (`SSTORE`, value-bearing `CALL*`, `SUICIDE` to a
    /// fresh account) return only their flat component here; `Program`
    /// charges the remainder once it has consulted the repository.
    pub fn requirements(op: OpCode, schedule: &Schedule, stack: &Stack) -> Result<GasRequirements> {
        use OpCode::*;
        let mut req = GasRequirements::default();
        req.base_cost = match op {
            STOP | RETURN | REVERT | JUMPDEST => 0,
            SUICIDE => schedule.suicide_gas as u128,
            SLOAD => schedule.sload_gas as u128,
            BALANCE => schedule.balance_gas as u128,
            EXTCODESIZE => schedule.extcodesize_gas as u128,
            EXTCODEHASH => schedule.extcodehash_gas as u128,
            BLOCKHASH => schedule.blockhash_gas as u128,
            CREATE | CREATE2 => {
                // stack: value, offset, size[, salt] (top to bottom); the
                // init code's own window is the only memory this op touches.
                let offset = stack.peek(1).low_usize();
                let size = stack.peek(2).low_usize();
                req.memory_required = mem_needed(offset, size);
                schedule.create_gas as u128
            }
            CALL | CALLCODE => {
                // stack: gas, address, value, inOffset, inLen, outOffset, outLen.
                let in_window = mem_needed(stack.peek(3).low_usize(), stack.peek(4).low_usize());
                let out_window = mem_needed(stack.peek(5).low_usize(), stack.peek(6).low_usize());
                req.memory_required = in_window.max(out_window);
                schedule.call_gas as u128
            }
            DELEGATECALL | STATICCALL => {
                // stack: gas, address, inOffset, inLen, outOffset, outLen (no value).
                let in_window = mem_needed(stack.peek(2).low_usize(), stack.peek(3).low_usize());
                let out_window = mem_needed(stack.peek(4).low_usize(), stack.peek(5).low_usize());
                req.memory_required = in_window.max(out_window);
                schedule.call_gas as u128
            }
            SHA3 => {
                let len = stack.peek(1).low_usize();
                req.memory_required = mem_needed(stack.peek(0).low_usize(), len);
                (schedule.sha3_gas as u128) + (schedule.sha3_word_gas as u128) * ceil_words(len)
            }
            EXP => {
                let exponent = stack.peek(1);
                (schedule.exp_gas as u128) + (schedule.exp_byte_gas as u128) * (exponent.byte_len() as u128)
            }
            LOG0 | LOG1 | LOG2 | LOG3 | LOG4 => {
                let topics = op.log_topics().expect("log opcode has topic count") as u128;
                let len = stack.peek(1).low_usize();
                req.memory_required = mem_needed(stack.peek(0).low_usize(), len);
                (schedule.log_gas as u128)
                    + (schedule.log_topic_gas as u128) * topics
                    + (schedule.log_data_gas as u128) * (len as u128)
            }
            MLOAD => {
                req.memory_required = mem_needed(stack.peek(0).low_usize(), 32);
                schedule.step_gas as u128
            }
            MSTORE => {
                req.memory_required = mem_needed(stack.peek(0).low_usize(), 32);
                schedule.step_gas as u128
            }
            MSTORE8 => {
                req.memory_required = mem_needed(stack.peek(0).low_usize(), 1);
                schedule.step_gas as u128
            }
            CALLDATACOPY | CODECOPY | RETURNDATACOPY => {
                let len = stack.peek(2).low_usize();
                req.memory_required = mem_needed(stack.peek(0).low_usize(), len);
                req.copy_size = len;
                schedule.step_gas as u128
            }
            EXTCODECOPY => {
                let len = stack.peek(3).low_usize();
                req.memory_required = mem_needed(stack.peek(1).low_usize(), len);
                req.copy_size = len;
                schedule.extcodecopy_base_gas as u128
            }
            _ => schedule.step_gas as u128,
        };
        Ok(req)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vm::DataWord;

    #[test]
    fn spend_more_than_available_zeroes_the_counter() {
        let mut gasometer = Gasometer::new(5);
        assert_eq!(gasometer.spend(10), Err(Error::OutOfGas));
        assert_eq!(gasometer.current_gas(), 0);
    }

    #[test]
    fn memory_cost_is_zero_when_not_growing() {
        let schedule = Schedule::default();
        assert_eq!(Gasometer::memory_expansion_cost(64, 64, &schedule), 0);
        assert_eq!(Gasometer::memory_expansion_cost(64, 32, &schedule), 0);
    }

    #[test]
    fn memory_cost_grows_quadratically() {
        let schedule = Schedule::default();
        let small = Gasometer::memory_expansion_cost(0, 32, &schedule);
        let large = Gasometer::memory_expansion_cost(0, 32 * 1000, &schedule);
        assert!(large > small * 1000);
    }

    #[test]
    fn sha3_requirement_reads_length_from_stack() {
        let schedule = Schedule::default();
        let mut stack = Stack::new();
        stack.push(DataWord::from_u64(64)); // length (peek(1))
        stack.push(DataWord::from_u64(0)); // offset (peek(0))
        let req = Gasometer::requirements(OpCode::SHA3, &schedule, &stack).unwrap();
        assert_eq!(req.memory_required, 64);
        assert_eq!(
            req.base_cost,
            (schedule.sha3_gas as u128) + (schedule.sha3_word_gas as u128) * 2
        );
    }

    #[test]
    fn call_gas_cap_applies_63_64_rule() {
        let schedule = Schedule::default();
        let capped = Gasometer::capped_call_gas(1_000_000, 640, &schedule);
        assert_eq!(capped, 640 - 640 / 64);
    }
}
