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

//! Collects `vmTrace` records and `dumpStyle` dumps. A no-op when neither
//! is configured, so a production run pays nothing for tracing it didn't ask for.

use vm::{DumpRecord, DumpStyle, TraceStep, VmConfig};

/// Per-frame trace/dump collector, owned by `Vm::play` for the duration of
/// one call.
#[derive(Debug, Default)]
pub struct Informant {
    trace: bool,
    dump_block: Option<u64>,
    dump_style: DumpStyle,
    pub steps: Vec<TraceStep>,
    pub dumps: Vec<DumpRecord>,
}

impl Informant {
    pub fn new(config: &VmConfig) -> Self {
        Informant {
            trace: config.vm_trace,
            dump_block: config.dump_block,
            dump_style: config.dump_style,
            steps: Vec::new(),
            dumps: Vec::new(),
        }
    }

    pub fn is_tracing(&self) -> bool {
        self.trace
    }

    fn dumping(&self, block_number: u64) -> bool {
        self.dump_block == Some(block_number)
    }

    /// Called after an instruction executes successfully.
    pub fn after_instruction(&mut self, step: TraceStep, block_number: u64, op_name: &'static str, memory_size: usize) {
        if self.trace {
            log::trace!(
                target: "evm",
                "depth={} pc={} op={} gas_cost={} gas_remaining={}",
                step.depth, step.pc, op_name, step.gas_cost, step.gas_remaining
            );
        }
        if self.dumping(block_number) {
            self.dumps.push(DumpRecord {
                pc: step.pc,
                op_name,
                gas_remaining: step.gas_remaining,
                stack_after: step.stack_after.clone(),
                memory_size,
                depth: step.depth,
            });
        }
        if self.trace {
            self.steps.push(step);
        }
    }

    pub fn warn_bad_instruction(&self, instruction: u8) {
        log::warn!(target: "evm", "bad instruction {instruction:#04x}");
    }

    pub fn warn_bad_jump(&self, destination: usize) {
        log::warn!(target: "evm", "bad jump destination {destination:#x}");
    }

    pub fn dump_style(&self) -> DumpStyle {
        self.dump_style
    }
}
