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

//! A deterministic, gas-metered, stack-based bytecode interpreter for the
//! `vm` crate's instruction set. `Vm::play` is the entry point: it drives a
//! `Program` frame through fetch/decode/meter/execute until it halts,
//! recursing through `Program::exec_call`/`exec_create` for sub-calls.

pub mod code_reader;
pub mod gasometer;
pub mod informant;
pub mod jump_cache;
pub mod memory;
pub mod program;
pub mod stack;

#[path = "vm.rs"]
mod driver;

pub use code_reader::CodeReader;
pub use driver::Vm;
pub use gasometer::{GasRequirements, Gasometer};
pub use informant::Informant;
pub use jump_cache::{JumpDestinations, SharedCache};
pub use memory::Memory;
pub use program::Program;
pub use stack::Stack;
