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

//! End-to-end scenarios against the public `Vm`/`Program` API.

mod common;

use rustc_hex::FromHex;
use vm::Error;

fn code(hex: &str) -> Vec<u8> {
    hex.from_hex().expect("valid hex literal")
}

#[test]
fn empty_halt() {
    let result = common::run(code("00"), 10); // STOP
    assert!(result.failure.is_none());
    assert!(!result.reverted);
    assert!(result.return_data.is_empty());
    assert_eq!(result.gas_left, 10); // STOP itself is free.
}

#[test]
fn add_and_return() {
    // PUSH1 03, PUSH1 05, ADD, PUSH1 00, MSTORE, PUSH1 20, PUSH1 00, RETURN
    let result = common::run(code("600360050160005260206000f3"), 100_000);
    assert!(result.failure.is_none());
    assert!(!result.reverted);
    let mut expected = [0u8; 32];
    expected[31] = 8;
    assert_eq!(result.return_data, expected.to_vec());
}

#[test]
fn jump_to_jumpdest_returns_value() {
    // PUSH1 04, JUMP, STOP, JUMPDEST, PUSH1 2A, PUSH1 00, MSTORE, PUSH1 20, PUSH1 00, RETURN
    let result = common::run(code("600456005b602a60005260206000f3"), 100_000);
    assert!(result.failure.is_none());
    assert!(!result.reverted);
    let mut expected = [0u8; 32];
    expected[31] = 0x2a;
    assert_eq!(result.return_data, expected.to_vec());
}

#[test]
fn jump_to_non_jumpdest_fails() {
    // PUSH1 02, JUMP, STOP -- jumps straight at the STOP, not a JUMPDEST.
    let result = common::run(code("60025600"), 100_000);
    assert_eq!(result.failure, Some(Error::BadJumpDestination { destination: 2 }));
    assert_eq!(result.gas_left, 0);
}

#[test]
fn out_of_gas_on_first_opcode() {
    // ADDRESS costs a flat STEP (3); one gas short halts immediately.
    let result = common::run(code("30"), 2);
    assert_eq!(result.failure, Some(Error::OutOfGas));
    assert_eq!(result.gas_left, 0);
}

#[test]
fn storage_set_then_clear_refunds() {
    // PUSH1 01, PUSH1 00, SSTORE ; PUSH1 00, PUSH1 00, SSTORE
    let result = common::run(code("60016000556000600055"), 100_000);
    assert!(result.failure.is_none());
    assert_eq!(result.refund, 15000);
}

#[test]
fn log0_records_memory_region() {
    // PUSH1 ff, PUSH1 00, MSTORE, PUSH1 20, PUSH1 00, LOG0
    let result = common::run(code("60ff60005260206000a0"), 100_000);
    assert!(result.failure.is_none());
    assert_eq!(result.logs.len(), 1);
    let entry = &result.logs[0];
    assert!(entry.topics.is_empty());
    let mut expected = [0u8; 32];
    expected[31] = 0xff;
    assert_eq!(entry.data, expected.to_vec());
}

#[test]
fn dup_then_pop_is_a_stack_no_op() {
    // PUSH1 07, DUP1, POP, PUSH1 00, MSTORE, PUSH1 20, PUSH1 00, RETURN
    let result = common::run(code("6007805060005260206000f3"), 100_000);
    assert!(result.failure.is_none());
    let mut expected = [0u8; 32];
    expected[31] = 7;
    assert_eq!(result.return_data, expected.to_vec());
}

#[test]
fn revert_discards_state_but_returns_data() {
    // PUSH1 2A, PUSH1 00, MSTORE, PUSH1 20, PUSH1 00, REVERT
    let result = common::run(code("602a60005260206000fd"), 100_000);
    assert!(result.reverted);
    assert!(result.failure.is_none());
    let mut expected = [0u8; 32];
    expected[31] = 0x2a;
    assert_eq!(result.return_data, expected.to_vec());
}

#[test]
fn mload_past_current_size_reads_zero_and_expands() {
    // PUSH1 20, MLOAD, PUSH1 00, MSTORE, PUSH1 20, PUSH1 00, RETURN
    let result = common::run(code("60205160005260206000f3"), 100_000);
    assert!(result.failure.is_none());
    assert_eq!(result.return_data, vec![0u8; 32]);
}

#[test]
fn swap_is_involutive() {
    // PUSH1 01, PUSH1 02, SWAP1, SWAP1, PUSH1 00, MSTORE, PUSH1 20, PUSH1 00, RETURN
    let result = common::run(code("60016002909060005260206000f3"), 100_000);
    assert!(result.failure.is_none());
    let mut expected = [0u8; 32];
    expected[31] = 1;
    assert_eq!(result.return_data, expected.to_vec());
}
