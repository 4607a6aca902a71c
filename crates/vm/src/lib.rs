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

//! Types shared between the engine (`evm`) and whatever embeds it: the
//! 256-bit word, the opcode table, the gas schedule, errors, and the
//! external-collaborator traits (`Repository`, `Precompile`, `CallHost`)
//! the engine is written against but never implements.

pub mod call_host;
pub mod config;
pub mod data_word;
pub mod error;
pub mod log_entry;
pub mod opcode;
pub mod precompile;
pub mod program_invoke;
pub mod program_result;
pub mod repository;
pub mod schedule;
pub mod trace;

pub use call_host::{CallHost, CallKind, CallOutcome, CreateMessage, CreateOutcome, CreateScheme, MessageCall};
pub use config::{DumpStyle, VmConfig};
pub use data_word::DataWord;
pub use error::{Error, Result};
pub use log_entry::LogEntry;
pub use opcode::{Category, OpCode, OpCodeInfo};
pub use precompile::{Precompile, PrecompileRegistry, PrecompileResult};
pub use program_invoke::ProgramInvoke;
pub use program_result::{CreatedContract, ProgramResult, SuicideRecord};
pub use repository::Repository;
pub use schedule::Schedule;
pub use trace::{DumpRecord, TraceStep};
