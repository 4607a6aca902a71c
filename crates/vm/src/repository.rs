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

//! The storage/account backing store the engine reads and writes through.
//!
//! `Repository` is a named external collaborator (spec §6): this crate
//! fixes its contract but never implements it. A host provides an
//! implementation backed by whatever persistent store it uses (a trie, a
//! key-value database, an in-memory map for tests).

use crate::data_word::DataWord;
use crate::error::Result;
use ethereum_types::Address;

/// Read/write access to one contract's persistent storage and to account
/// metadata (balance, code) across the whole world state.
pub trait Repository {
    /// Read a storage slot, scoped to `address`. A missing key reads as zero.
    fn storage_at(&self, address: &Address, key: &DataWord) -> Result<DataWord>;

    /// The value `key` held at the start of the enclosing transaction, used
    /// by EIP-1283-style refund accounting. Implementations that don't track
    /// this may simply return the same value as `storage_at`.
    fn original_storage_at(&self, address: &Address, key: &DataWord) -> Result<DataWord>;

    /// Write a storage slot.
    fn set_storage(&mut self, address: &Address, key: DataWord, value: DataWord) -> Result<()>;

    /// Read an account's balance (zero for a non-existent account).
    fn balance(&self, address: &Address) -> Result<DataWord>;

    /// Move `value` from `from` to `to`, used by `CALL`/`CREATE`/`SUICIDE`.
    fn transfer_balance(&mut self, from: &Address, to: &Address, value: DataWord) -> Result<()>;

    /// Read account code, `None` if the account has no code.
    fn code_at(&self, address: &Address) -> Result<Option<Vec<u8>>>;

    /// Code length without materialising the code itself, used by `EXTCODESIZE`.
    fn code_size_at(&self, address: &Address) -> Result<usize>;

    /// Keccak256 of the account's code, used by `EXTCODEHASH`. `None` for an
    /// account with no code (distinguished from an empty-code account by the
    /// host's own account-existence bookkeeping).
    fn code_hash_at(&self, address: &Address) -> Result<Option<DataWord>>;

    /// Account's current nonce, used to derive `CREATE`'s address.
    fn nonce(&self, address: &Address) -> Result<u64>;

    /// Install freshly-deployed code at `address`, used by `CREATE`/`CREATE2`
    /// on success.
    fn set_code(&mut self, address: &Address, code: Vec<u8>) -> Result<()>;

    /// Hash of a recent block, for `BLOCKHASH`. `DataWord::ZERO` if `number`
    /// is out of the retained window.
    fn blockhash(&self, number: DataWord) -> DataWord;
}
