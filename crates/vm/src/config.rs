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

//! Run-time configuration: what a caller asks the engine to record while
//! it executes, separate from `Schedule` (which governs gas/semantics).

use serde::Deserialize;

/// How a per-block instruction dump should be formatted, mirroring the
/// `--vmtrace` / `--dump-style` CLI surface this engine is embedded behind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DumpStyle {
    /// One JSON object per line, go-ethereum's `statediff`-style format.
    StandardPlus,
    /// Indented, human-readable JSON.
    Pretty,
}

impl Default for DumpStyle {
    fn default() -> Self {
        DumpStyle::StandardPlus
    }
}

/// Tracing/dumping knobs threaded through `Vm::play` independent of the
/// gas schedule in force.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct VmConfig {
    /// Collect a `TraceStep` per executed instruction.
    pub vm_trace: bool,
    /// If set, dump every instruction executed while processing this block
    /// number to the informant's sink.
    pub dump_block: Option<u64>,
    #[serde(default)]
    pub dump_style: DumpStyle,
}
