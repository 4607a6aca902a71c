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

//! VM errors module.

use std::fmt;

/// VM errors. All variants are uniformly fatal to the current frame except
/// that `Reverted` is never constructed by the engine itself — `REVERT` is a
/// normal halt, reported through `ProgramResult`, not through this type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Gas counter would have gone negative.
    OutOfGas,
    /// Execution tried to move to a position that wasn't marked with `JUMPDEST`,
    /// or that lies inside a `PUSHn` immediate.
    BadJumpDestination { destination: usize },
    /// Unrecognised opcode byte.
    BadInstruction { instruction: u8 },
    /// An opcode gated behind a fork flag was used before that fork.
    DisabledInstruction { instruction: u8 },
    /// Not enough stack elements to satisfy the opcode's declared arity.
    StackUnderflow {
        instruction: &'static str,
        wanted: usize,
        on_stack: usize,
    },
    /// Executing the opcode would push the stack past the schedule's limit.
    OutOfStack {
        instruction: &'static str,
        wanted: usize,
        limit: usize,
    },
    /// A memory/calldata offset or length could not be represented safely.
    BadOperand { instruction: &'static str },
    /// A state-mutating opcode was reached inside a `STATICCALL` frame.
    MutableCallInStaticContext,
    /// `RETURNDATACOPY` read past `RETURNDATASIZE`.
    OutOfBounds,
    /// Execution has been reverted with `REVERT`. Distinct from the five
    /// fatal kinds: it is a normal halt carrying return data, not a failure,
    /// but like a failure it discards this frame's state changes.
    Reverted,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use Error::*;
        match *self {
            OutOfGas => write!(f, "out of gas"),
            BadJumpDestination { destination } => {
                write!(f, "bad jump destination {destination:x}")
            }
            BadInstruction { instruction } => write!(f, "bad instruction {instruction:#04x}"),
            DisabledInstruction { instruction } => {
                write!(f, "instruction {instruction:#04x} not enabled by schedule")
            }
            StackUnderflow {
                instruction,
                wanted,
                on_stack,
            } => write!(f, "stack underflow {instruction} {wanted}/{on_stack}"),
            OutOfStack {
                instruction,
                wanted,
                limit,
            } => write!(f, "out of stack {instruction} {wanted}/{limit}"),
            BadOperand { instruction } => write!(f, "bad operand for {instruction}"),
            MutableCallInStaticContext => write!(f, "mutable call in static context"),
            OutOfBounds => write!(f, "out of bounds"),
            Reverted => write!(f, "reverted"),
        }
    }
}

impl std::error::Error for Error {}

pub type Result<T> = std::result::Result<T, Error>;
