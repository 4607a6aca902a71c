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

//! The outer fetch/decode/meter/execute loop.

use crate::informant::Informant;
use crate::jump_cache::SharedCache;
use crate::program::Program;
use std::sync::Arc;
use vm::{DataWord, Error, PrecompileRegistry, ProgramInvoke, ProgramResult, Repository, Schedule, VmConfig};

/// Entry point run for both the top-level transaction and every nested
/// `CALL`/`CREATE` frame (`Program::exec_call`/`exec_create` recurse back
/// into this function for their child frame).
pub struct Vm;

impl Vm {
    pub fn play(
        schedule: &Schedule,
        config: &VmConfig,
        repository: &mut dyn Repository,
        precompiles: &dyn PrecompileRegistry,
        jump_cache: &SharedCache,
        invoke: ProgramInvoke,
        code: Arc<Vec<u8>>,
        code_hash: DataWord,
        block_number: u64,
    ) -> ProgramResult {
        let by_transaction = invoke.by_transaction;
        let by_testing_suite = invoke.by_testing_suite;
        let data = invoke.data.clone();
        let mut program = Program::new(code, code_hash, invoke, schedule, repository, precompiles, jump_cache);

        if by_transaction {
            if let Err(error) = charge_intrinsic_gas(&mut program, &data, schedule) {
                return finish_with_failure(program, error);
            }
        }

        if by_testing_suite {
            return program.into_result();
        }

        let mut informant = Informant::new(config);
        while !program.is_stopped() {
            if let Err(error) = program.step(config, &mut informant, block_number) {
                return finish_with_failure(program, error);
            }
        }
        program.into_result()
    }
}

/// Deduct the transaction's base cost (§4.12): `TRANSACTION` base cost plus
/// a per-byte charge for calldata.
fn charge_intrinsic_gas(program: &mut Program, data: &[u8], schedule: &Schedule) -> Result<(), Error> {
    let data_cost: u128 = data
        .iter()
        .map(|&b| if b == 0 { schedule.tx_data_zero_gas } else { schedule.tx_data_non_zero_gas } as u128)
        .sum();
    program.charge_gas(schedule.tx_gas as u128 + data_cost)
}

fn finish_with_failure(program: Program, error: Error) -> ProgramResult {
    let mut result = program.into_result();
    result.gas_left = 0;
    result.failure = Some(error);
    result
}
