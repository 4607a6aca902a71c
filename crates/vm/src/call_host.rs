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

//! Sub-call dispatch: the `CallHost` contract named in spec §6.
//!
//! `evm::Program` supplies the default implementation of this trait by
//! constructing a fresh `Program`/`Vm` frame and running it recursively
//! (spec §9: recursion is acceptable as long as depth is bounded by
//! `Schedule::max_depth`). A host embedding this engine in a larger node
//! could substitute a different `CallHost`, e.g. one that special-cases
//! some addresses without going through byte-code execution at all.

use crate::data_word::DataWord;
use crate::program_result::ProgramResult;
use ethereum_types::Address;

/// The four ways a `MessageCall` can run relative to storage/sender/value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallKind {
    /// `CALL`: own storage, own sender context, value transferred.
    Call,
    /// `CALLCODE`: caller's storage, caller's sender context, value transferred.
    CallCode,
    /// `DELEGATECALL`: caller's storage, caller's sender *and value*, no transfer.
    DelegateCall,
    /// `STATICCALL`: own storage, read-only, value forced to zero.
    StaticCall,
}

/// A request to run another contract's code.
#[derive(Debug, Clone)]
pub struct MessageCall {
    pub kind: CallKind,
    /// Gas forwarded to the callee (already EIP-150-capped by the caller).
    pub gas: DataWord,
    /// Account whose code is executed.
    pub code_address: Address,
    /// Account whose storage the callee reads/writes (differs from
    /// `code_address` for `CALLCODE`/`DELEGATECALL`).
    pub storage_address: Address,
    /// Effective sender observed by the callee.
    pub sender: Address,
    /// Value observed by the callee (`None` only for `DELEGATECALL`, which
    /// reuses the parent's apparent value instead of transferring one).
    pub value: Option<DataWord>,
    pub input: Vec<u8>,
}

/// Result of dispatching a `MessageCall`.
pub enum CallOutcome {
    Success {
        gas_left: DataWord,
        output: Vec<u8>,
        result: ProgramResult,
    },
    Reverted {
        gas_left: DataWord,
        output: Vec<u8>,
    },
    Failed,
}

/// How a `CREATE`/`CREATE2`'s new address is derived.
#[derive(Debug, Clone, Copy)]
pub enum CreateScheme {
    /// `CREATE`: `keccak256(rlp(sender, nonce))[12..]`.
    FromSenderAndNonce,
    /// `CREATE2`: `keccak256(0xff ++ sender ++ salt ++ keccak256(init_code))[12..]`.
    FromSenderSaltAndCodeHash { salt: DataWord },
}

/// A request to deploy a new contract.
#[derive(Debug, Clone)]
pub struct CreateMessage {
    pub sender: Address,
    pub value: DataWord,
    pub init_code: Vec<u8>,
    pub gas: DataWord,
    pub scheme: CreateScheme,
}

/// Result of dispatching a `CreateMessage`.
pub enum CreateOutcome {
    Created {
        address: Address,
        gas_left: DataWord,
        result: ProgramResult,
    },
    Reverted {
        gas_left: DataWord,
        output: Vec<u8>,
    },
    Failed,
}

/// Executes `MessageCall`/`CreateMessage` requests on behalf of a `Program`.
pub trait CallHost {
    fn call(&mut self, message: MessageCall) -> CallOutcome;
    fn create(&mut self, message: CreateMessage) -> CreateOutcome;
}
