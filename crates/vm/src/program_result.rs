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

//! The mutable, per-call output of a `Program`.

use crate::error::Error;
use crate::log_entry::LogEntry;
use crate::program_invoke::ProgramInvoke;
use ethereum_types::Address;

/// A `SUICIDE addr` record: the account being deleted and the beneficiary
/// that receives its remaining balance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuicideRecord {
    pub address: Address,
    pub beneficiary: Address,
}

/// A successfully deployed child contract, kept for merge-up bookkeeping
/// and tracing; the code itself already lives in the repository.
#[derive(Debug, Clone)]
pub struct CreatedContract {
    pub address: Address,
    pub invoke: ProgramInvoke,
}

/// Everything a `Program` produces, beyond the state changes it applies
/// directly to the repository. Merged upward on a normal return, discarded
/// entirely on an exceptional one (see §4 of the design spec).
#[derive(Debug, Clone, Default)]
pub struct ProgramResult {
    /// Bytes returned by `RETURN`/`REVERT`, or the precompile/call output.
    pub return_data: Vec<u8>,
    /// Logs emitted by `LOGn`, in emission order.
    pub logs: Vec<LogEntry>,
    /// Gas scheduled for refund at transaction end (`SSTORE` clears, `SUICIDE`).
    pub refund: u64,
    /// Accounts scheduled for deletion by `SUICIDE`.
    pub deleted_accounts: Vec<SuicideRecord>,
    /// Contracts created by `CREATE`/`CREATE2` during this frame.
    pub created_contracts: Vec<CreatedContract>,
    /// Set when the frame halted exceptionally; `None` for `STOP`/`RETURN`/
    /// `REVERT`/`SUICIDE`. `REVERT` sets `reverted = true` below instead.
    pub failure: Option<Error>,
    /// Set by `REVERT`: a normal halt that still discards this frame's
    /// state changes (EIP-140). Mutually exclusive with `failure`.
    pub reverted: bool,
    /// Gas left in this frame when it halted; `0` for any fatal kind
    /// (which burns the whole budget), the true remainder otherwise,
    /// including on `REVERT`. Read by a caller crediting a sub-call's
    /// unused gas back to its own counter.
    pub gas_left: u128,
}

impl ProgramResult {
    pub fn new() -> Self {
        ProgramResult::default()
    }

    /// True iff this frame's state changes must be discarded: either an
    /// exceptional halt or an explicit `REVERT`.
    pub fn should_revert(&self) -> bool {
        self.failure.is_some() || self.reverted
    }

    /// Merge a successful sub-call/create's side effects into this result.
    /// Only called when the child itself did not need to revert.
    pub fn merge_child(&mut self, mut child: ProgramResult) {
        self.logs.append(&mut child.logs);
        self.refund = self.refund.saturating_add(child.refund);
        self.deleted_accounts.append(&mut child.deleted_accounts);
        self.created_contracts.append(&mut child.created_contracts);
    }
}
