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

//! Times the fetch/execute loop over a representative contract: a chain of
//! pushes and additions folded down to a single word and returned,
//! exercising the stack, the arithmetic dispatch, and memory accounting.

use std::collections::HashMap;
use std::sync::Arc;

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use ethereum_types::Address;
use evm::{SharedCache, Vm};
use vm::{DataWord, Precompile, PrecompileRegistry, ProgramInvoke, Repository, Result, Schedule, VmConfig};

#[derive(Default)]
struct EmptyRepository {
    storage: HashMap<(Address, DataWord), DataWord>,
}

impl Repository for EmptyRepository {
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
    fn balance(&self, _address: &Address) -> Result<DataWord> {
        Ok(DataWord::ZERO)
    }
    fn transfer_balance(&mut self, _from: &Address, _to: &Address, _value: DataWord) -> Result<()> {
        Ok(())
    }
    fn code_at(&self, _address: &Address) -> Result<Option<Vec<u8>>> {
        Ok(None)
    }
    fn code_size_at(&self, _address: &Address) -> Result<usize> {
        Ok(0)
    }
    fn code_hash_at(&self, _address: &Address) -> Result<Option<DataWord>> {
        Ok(None)
    }
    fn nonce(&self, _address: &Address) -> Result<u64> {
        Ok(0)
    }
    fn set_code(&mut self, _address: &Address, _code: Vec<u8>) -> Result<()> {
        Ok(())
    }
    fn blockhash(&self, _number: DataWord) -> DataWord {
        DataWord::ZERO
    }
}

struct NoPrecompiles;

impl PrecompileRegistry for NoPrecompiles {
    fn contract_for_address(&self, _address: &DataWord) -> Option<&dyn Precompile> {
        None
    }
}

fn invoke(gas: u128) -> ProgramInvoke {
    ProgramInvoke {
        owner_address: Address::from_low_u64_be(1),
        origin: Address::from_low_u64_be(2),
        caller: Address::from_low_u64_be(2),
        call_value: DataWord::ZERO,
        data: Vec::new(),
        gas_price: DataWord::from_u64(1),
        gas: DataWord::from_u128(gas),
        coinbase: Address::from_low_u64_be(3),
        timestamp: 0,
        number: 0,
        difficulty: DataWord::ZERO,
        gas_limit: DataWord::from_u64(30_000_000),
        chain_id: 1,
        call_depth: 0,
        by_transaction: false,
        by_testing_suite: false,
        static_flag: false,
    }
}

/// `PUSH1 01` repeated `n` times, folded with `n - 1` `ADD`s, then written to
/// memory and returned: straight-line code (no jumps) that still exercises
/// the stack, the arithmetic dispatch, and memory expansion/copy pricing.
fn sum_of_ones(n: usize) -> Vec<u8> {
    let mut code = Vec::with_capacity(n * 2 + 16);
    for _ in 0..n {
        code.extend_from_slice(&[0x60, 0x01]); // PUSH1 0x01
    }
    for _ in 0..n.saturating_sub(1) {
        code.push(0x01); // ADD
    }
    code.extend_from_slice(&[0x60, 0x00, 0x52]); // PUSH1 00, MSTORE
    code.extend_from_slice(&[0x60, 0x20, 0x60, 0x00, 0xf3]); // PUSH1 20, PUSH1 00, RETURN
    code
}

fn bench_loop(c: &mut Criterion) {
    let code = sum_of_ones(256);

    c.bench_function("sum_of_ones", |b| {
        b.iter(|| {
            let schedule = Schedule::istanbul();
            let config = VmConfig::default();
            let jump_cache = SharedCache::new();
            let mut repository = EmptyRepository::default();
            let precompiles = NoPrecompiles;
            let result = Vm::play(
                &schedule,
                &config,
                &mut repository,
                &precompiles,
                &jump_cache,
                invoke(1_000_000),
                Arc::new(black_box(code.clone())),
                DataWord::from_u64(1),
                0,
            );
            black_box(result)
        })
    });
}

criterion_group!(benches, bench_loop);
criterion_main!(benches);
