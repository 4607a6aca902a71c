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

//! A minimal in-memory `Repository`/`PrecompileRegistry` pair, just enough
//! to drive `Vm::play` end to end in the integration tests.

use std::collections::HashMap;
use std::sync::Arc;

use ethereum_types::Address;
use evm::{SharedCache, Vm};
use vm::{DataWord, Precompile, PrecompileRegistry, ProgramInvoke, ProgramResult, Repository, Result, Schedule, VmConfig};

#[derive(Default)]
pub struct MemoryRepository {
    storage: HashMap<(Address, DataWord), DataWord>,
    balances: HashMap<Address, DataWord>,
    code: HashMap<Address, Vec<u8>>,
    nonces: HashMap<Address, u64>,
}

impl MemoryRepository {
    pub fn new() -> Self {
        MemoryRepository::default()
    }

    pub fn set_balance(&mut self, address: Address, value: DataWord) {
        self.balances.insert(address, value);
    }
}

impl Repository for MemoryRepository {
    fn storage_at(&self, address: &Address, key: &DataWord) -> Result<DataWord> {
        Ok(self.storage.get(&(*address, *key)).copied().unwrap_or(DataWord::ZERO))
    }

    fn original_storage_at(&self, address: &Address, key: &DataWord) -> Result<DataWord> {
        self.storage_at(address, key)
    }

    fn set_storage(&mut self, address: &Address, key: DataWord, value: DataWord) -> Result<()> {
        self.storage.insert((*address, key), value);
        Ok(())
    }

    fn balance(&self, address: &Address) -> Result<DataWord> {
        Ok(self.balances.get(address).copied().unwrap_or(DataWord::ZERO))
    }

    fn transfer_balance(&mut self, from: &Address, to: &Address, value: DataWord) -> Result<()> {
        let from_balance = self.balance(from)?;
        let to_balance = self.balance(to)?;
        self.balances.insert(*from, from_balance.wrapping_sub(value));
        self.balances.insert(*to, to_balance.wrapping_add(value));
        Ok(())
    }

    fn code_at(&self, address: &Address) -> Result<Option<Vec<u8>>> {
        Ok(self.code.get(address).cloned())
    }

    fn code_size_at(&self, address: &Address) -> Result<usize> {
        Ok(self.code.get(address).map(Vec::len).unwrap_or(0))
    }

    fn code_hash_at(&self, address: &Address) -> Result<Option<DataWord>> {
        Ok(self.code.get(address).map(|code| DataWord::from_h256(keccak_hash::keccak(code))))
    }

    fn nonce(&self, address: &Address) -> Result<u64> {
        Ok(self.nonces.get(address).copied().unwrap_or(0))
    }

    fn set_code(&mut self, address: &Address, code: Vec<u8>) -> Result<()> {
        self.code.insert(*address, code);
        Ok(())
    }

    fn blockhash(&self, _number: DataWord) -> DataWord {
        DataWord::ZERO
    }
}

/// No precompiles registered; every address misses.
pub struct NoPrecompiles;

impl PrecompileRegistry for NoPrecompiles {
    fn contract_for_address(&self, _address: &DataWord) -> Option<&dyn Precompile> {
        None
    }
}

/// Build a top-level-transaction invoke with plenty of headroom for block
/// context fields the scenario tests below don't care about.
pub fn invoke(gas: u128, data: Vec<u8>) -> ProgramInvoke {
    ProgramInvoke {
        owner_address: Address::from_low_u64_be(0x1000),
        origin: Address::from_low_u64_be(0x2000),
        caller: Address::from_low_u64_be(0x2000),
        call_value: DataWord::ZERO,
        data,
        gas_price: DataWord::from_u64(1),
        gas: DataWord::from_u128(gas),
        coinbase: Address::from_low_u64_be(0x3000),
        timestamp: 0,
        number: 0,
        difficulty: DataWord::ZERO,
        gas_limit: DataWord::from_u64(30_000_000),
        chain_id: 1,
        call_depth: 0,
        by_transaction: true,
        by_testing_suite: false,
        static_flag: false,
    }
}

/// Run `code` against a fresh, empty repository with `gas` available,
/// skipping the transaction's intrinsic-gas deduction so the scenario's
/// own gas budget in §8 applies to the code alone.
pub fn run(code: Vec<u8>, gas: u128) -> ProgramResult {
    let schedule = Schedule::istanbul();
    let config = VmConfig::default();
    let jump_cache = SharedCache::new();
    let mut repository = MemoryRepository::new();
    let precompiles = NoPrecompiles;
    let mut call_invoke = invoke(gas, Vec::new());
    call_invoke.by_transaction = false;
    Vm::play(
        &schedule,
        &config,
        &mut repository,
        &precompiles,
        &jump_cache,
        call_invoke,
        Arc::new(code),
        DataWord::from_u64(1),
        0,
    )
}
