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

//! Trace records produced when `VmConfig::vm_trace` is set.

use crate::data_word::DataWord;

/// One executed instruction, as handed to whatever sink `Informant` wraps.
#[derive(Debug, Clone)]
pub struct TraceStep {
    pub pc: usize,
    pub instruction: u8,
    pub gas_cost: u64,
    pub gas_remaining: u64,
    pub depth: usize,
    /// Stack contents after the instruction ran, top last.
    pub stack_after: Vec<DataWord>,
}

/// A `dump_block`/`dump_style` record: the same information as a
/// `TraceStep` but shaped for the standard-json-plus / pretty dump formats
/// rather than the lighter-weight live trace.
#[derive(Debug, Clone)]
pub struct DumpRecord {
    pub pc: usize,
    pub op_name: &'static str,
    pub gas_remaining: u64,
    pub stack_after: Vec<DataWord>,
    pub memory_size: usize,
    pub depth: usize,
}
