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

//! Mutable per-call execution state and the opcode service routines that
//! manipulate it: memory/storage I/O, jump validation, sub-call dispatch,
//! gas spending. `Program::step` executes exactly one instruction;
//! `crate::vm::Vm::play` drives the loop and owns sub-call recursion is
//! reached through `Program::exec_call`/`exec_create` calling back into
//! `Vm::play` for the child frame.

use crate::code_reader::CodeReader;
use crate::gasometer::Gasometer;
use crate::informant::Informant;
use crate::jump_cache::SharedCache;
use crate::memory::Memory;
use crate::stack::Stack;
use crate::driver::Vm;
use ethereum_types::Address;
use std::sync::Arc;
use vm::{
    CallKind, CreatedContract, DataWord, Error, LogEntry, OpCode, PrecompileRegistry,
    PrecompileResult, ProgramInvoke, ProgramResult, Repository, Result, Schedule, SuicideRecord,
    TraceStep, VmConfig,
};

/// One contract invocation's interpreter state.
pub struct Program<'a> {
    reader: CodeReader,
    code_hash: DataWord,
    stack: Stack,
    memory: Memory,
    gasometer: Gasometer,
    invoke: ProgramInvoke,
    result: ProgramResult,
    /// Output of the most recent sub-call, read by `RETURNDATASIZE`/`RETURNDATACOPY`.
    return_data: Vec<u8>,
    stopped: bool,
    schedule: &'a Schedule,
    repository: &'a mut dyn Repository,
    precompiles: &'a dyn PrecompileRegistry,
    jump_cache: &'a SharedCache,
}

impl<'a> Program<'a> {
    pub fn new(
        code: Arc<Vec<u8>>,
        code_hash: DataWord,
        invoke: ProgramInvoke,
        schedule: &'a Schedule,
        repository: &'a mut dyn Repository,
        precompiles: &'a dyn PrecompileRegistry,
        jump_cache: &'a SharedCache,
    ) -> Self {
        let gas = invoke.gas.to_u128();
        Program {
            reader: CodeReader::new(code),
            code_hash,
            stack: Stack::new(),
            memory: Memory::new(),
            gasometer: Gasometer::new(gas),
            invoke,
            result: ProgramResult::new(),
            return_data: Vec::new(),
            stopped: false,
            schedule,
            repository,
            precompiles,
            jump_cache,
        }
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    pub fn gas_left(&self) -> u128 {
        self.gasometer.current_gas()
    }

    /// Deduct a cost computed outside the normal per-instruction path, e.g.
    /// the transaction's intrinsic gas, charged once before the first `step`.
    pub fn charge_gas(&mut self, cost: u128) -> Result<()> {
        self.gasometer.spend(cost)
    }

    /// Consumes the frame, stamping the final gas counter onto the result
    /// and returning it.
    pub fn into_result(mut self) -> ProgramResult {
        self.result.gas_left = self.gasometer.current_gas();
        self.result
    }

    fn fail(&mut self, error: Error) {
        self.gasometer.exhaust();
        self.result.failure = Some(error);
        self.stopped = true;
    }

    fn finish_return(&mut self, data: Vec<u8>) {
        self.result.return_data = data;
        self.stopped = true;
    }

    fn finish_revert(&mut self, data: Vec<u8>) {
        self.result.return_data = data;
        self.result.reverted = true;
        self.stopped = true;
    }

    /// Execute exactly one instruction, charging gas and mutating state.
    /// On any fatal condition, the frame is marked stopped and the error
    /// returned; `Vm::play` stores it on the result.
    pub fn step(&mut self, config: &VmConfig, informant: &mut Informant, block_number: u64) -> Result<()> {
        let pc = self.reader.position;
        let byte = match self.reader.current() {
            Some(b) => b,
            None => {
                self.finish_return(Vec::new());
                return Ok(());
            }
        };
        let op = match OpCode::from_u8(byte) {
            Some(op) => op,
            None => {
                informant.warn_bad_instruction(byte);
                let err = Error::BadInstruction { instruction: byte };
                self.fail(err.clone());
                return Err(err);
            }
        };
        if !self.opcode_enabled(op) {
            let err = Error::DisabledInstruction { instruction: byte };
            self.fail(err.clone());
            return Err(err);
        }

        let info = op.info();
        if !self.stack.has(info.args) {
            let err = Error::StackUnderflow {
                instruction: info.name,
                wanted: info.args,
                on_stack: self.stack.size(),
            };
            self.fail(err.clone());
            return Err(err);
        }
        let projected = self.stack.size() - info.args + info.ret;
        if projected > self.schedule.stack_limit {
            let err = Error::OutOfStack {
                instruction: info.name,
                wanted: info.ret,
                limit: self.schedule.stack_limit,
            };
            self.fail(err.clone());
            return Err(err);
        }

        let gas_before = self.gasometer.current_gas();
        if let Err(err) = self.charge(op) {
            self.fail(err.clone());
            return Err(err);
        }

        if let Err(err) = self.exec(op, config, block_number) {
            if let Error::BadJumpDestination { destination } = err {
                informant.warn_bad_jump(destination);
            }
            self.fail(err.clone());
            return Err(err);
        }

        if config.vm_trace || config.dump_block == Some(block_number) {
            let step = TraceStep {
                pc,
                instruction: byte,
                gas_cost: (gas_before - self.gasometer.current_gas()) as u64,
                gas_remaining: self.gasometer.current_gas() as u64,
                depth: self.invoke.call_depth,
                stack_after: self.snapshot_stack(),
            };
            informant.after_instruction(step, block_number, info.name, self.memory.size());
        }
        Ok(())
    }

    fn snapshot_stack(&self) -> Vec<DataWord> {
        (0..self.stack.size()).rev().map(|i| self.stack.peek(i)).collect()
    }

    fn opcode_enabled(&self, op: OpCode) -> bool {
        use OpCode::*;
        match op {
            DELEGATECALL => self.schedule.have_delegate_call,
            CREATE2 => self.schedule.have_create2,
            REVERT => self.schedule.have_revert,
            STATICCALL => self.schedule.have_static_call,
            RETURNDATASIZE | RETURNDATACOPY => self.schedule.have_return_data,
            SHL | SHR | SAR => self.schedule.have_bitwise_shifting,
            EXTCODEHASH => self.schedule.have_extcodehash,
            CHAINID => self.schedule.have_chain_id,
            SELFBALANCE => self.schedule.have_selfbalance,
            _ => true,
        }
    }

    fn require_not_static(&self) -> Result<()> {
        if self.invoke.static_flag {
            Err(Error::MutableCallInStaticContext)
        } else {
            Ok(())
        }
    }

    /// Base/memory/copy gas for `op`, charged before its semantic action runs.
    fn charge(&mut self, op: OpCode) -> Result<()> {
        let req = Gasometer::requirements(op, self.schedule, &self.stack)?;
        self.gasometer.spend(req.base_cost)?;
        if req.memory_required > self.memory.size() {
            let cost = Gasometer::memory_expansion_cost(self.memory.size(), req.memory_required, self.schedule);
            self.gasometer.spend(cost)?;
            self.memory.expand(req.memory_required);
        }
        if req.copy_size > 0 {
            self.gasometer.spend(Gasometer::copy_cost(req.copy_size, self.schedule))?;
        }
        Ok(())
    }

    fn is_valid_jump(&self, destination: usize) -> bool {
        if destination >= self.reader.len() {
            return false;
        }
        self.jump_cache
            .jump_destinations(&self.code_hash, self.reader.code_slice())
            .is_valid(destination)
    }

    fn exec(&mut self, op: OpCode, config: &VmConfig, block_number: u64) -> Result<()> {
        use OpCode::*;
        match op {
            STOP => self.finish_return(Vec::new()),

            ADD => self.binary(|a, b| a.wrapping_add(b)),
            MUL => self.binary(|a, b| a.wrapping_mul(b)),
            SUB => self.binary(|a, b| a.wrapping_sub(b)),
            DIV => self.binary(DataWord::div),
            SDIV => self.binary(DataWord::sdiv),
            MOD => self.binary(DataWord::rem),
            SMOD => self.binary(DataWord::smod),
            EXP => self.binary(DataWord::pow),
            SIGNEXTEND => self.binary(|k, x| x.sign_extend(k)),
            ADDMOD => self.ternary(DataWord::addmod),
            MULMOD => self.ternary(DataWord::mulmod),

            LT => self.binary(|a, b| DataWord::bool_word(a.lt(b))),
            GT => self.binary(|a, b| DataWord::bool_word(a.gt(b))),
            SLT => self.binary(|a, b| DataWord::bool_word(a.slt(b))),
            SGT => self.binary(|a, b| DataWord::bool_word(a.sgt(b))),
            EQ => self.binary(|a, b| DataWord::bool_word(a == b)),
            ISZERO => self.unary(|a| DataWord::bool_word(a.is_zero())),
            AND => self.binary(DataWord::bitand),
            OR => self.binary(DataWord::bitor),
            XOR => self.binary(DataWord::bitxor),
            NOT => self.unary(DataWord::bitnot),
            BYTE => self.binary(|i, x| x.byte(i)),
            SHL => self.binary(|shift, value| value.shl(shift)),
            SHR => self.binary(|shift, value| value.shr(shift)),
            SAR => self.binary(|shift, value| value.sar(shift)),

            SHA3 => {
                let offset = self.stack.pop_back().low_usize();
                let len = self.stack.pop_back().low_usize();
                let bytes = self.memory.read_slice(offset, len).to_vec();
                self.stack.push(DataWord::from_h256(keccak_hash::keccak(&bytes)));
            }

            ADDRESS => self.stack.push(DataWord::from_address(self.invoke.owner_address)),
            BALANCE => {
                let address = self.stack.pop_back().as_address();
                let balance = self.repository.balance(&address)?;
                self.stack.push(balance);
            }
            ORIGIN => self.stack.push(DataWord::from_address(self.invoke.origin)),
            CALLER => self.stack.push(DataWord::from_address(self.invoke.caller)),
            CALLVALUE => self.stack.push(self.invoke.call_value),
            CALLDATALOAD => {
                let offset = self.stack.pop_back().low_usize();
                self.stack.push(DataWord::from_push_bytes(&read_padded(&self.invoke.data, offset, 32)));
            }
            CALLDATASIZE => self.stack.push(DataWord::from_u64(self.invoke.data.len() as u64)),
            CALLDATACOPY => {
                let dst = self.stack.pop_back().low_usize();
                let src = self.stack.pop_back().low_usize();
                let len = self.stack.pop_back().low_usize();
                let bytes = read_padded(&self.invoke.data, src, len);
                self.memory.write_padded(dst, len, &bytes);
            }
            CODESIZE => self.stack.push(DataWord::from_u64(self.reader.len() as u64)),
            CODECOPY => {
                let dst = self.stack.pop_back().low_usize();
                let src = self.stack.pop_back().low_usize();
                let len = self.stack.pop_back().low_usize();
                let bytes = read_padded(self.reader.code_slice(), src, len);
                self.memory.write_padded(dst, len, &bytes);
            }
            GASPRICE => self.stack.push(self.invoke.gas_price),
            EXTCODESIZE => {
                let address = self.stack.pop_back().as_address();
                let size = self.repository.code_size_at(&address)?;
                self.stack.push(DataWord::from_u64(size as u64));
            }
            EXTCODECOPY => {
                let address = self.stack.pop_back().as_address();
                let dst = self.stack.pop_back().low_usize();
                let src = self.stack.pop_back().low_usize();
                let len = self.stack.pop_back().low_usize();
                let code = self.repository.code_at(&address)?.unwrap_or_default();
                let bytes = read_padded(&code, src, len);
                self.memory.write_padded(dst, len, &bytes);
            }
            RETURNDATASIZE => self.stack.push(DataWord::from_u64(self.return_data.len() as u64)),
            RETURNDATACOPY => {
                let dst = self.stack.pop_back().low_usize();
                let src = self.stack.pop_back().low_usize();
                let len = self.stack.pop_back().low_usize();
                if src.saturating_add(len) > self.return_data.len() {
                    return Err(Error::OutOfBounds);
                }
                let bytes = self.return_data[src..src + len].to_vec();
                self.memory.write_padded(dst, len, &bytes);
            }
            EXTCODEHASH => {
                let address = self.stack.pop_back().as_address();
                let hash = self.repository.code_hash_at(&address)?;
                self.stack.push(hash.unwrap_or(DataWord::ZERO));
            }

            BLOCKHASH => {
                let number = self.stack.pop_back();
                let hash = self.repository.blockhash(number);
                self.stack.push(hash);
            }
            COINBASE => self.stack.push(DataWord::from_address(self.invoke.coinbase)),
            TIMESTAMP => self.stack.push(DataWord::from_u64(self.invoke.timestamp)),
            NUMBER => self.stack.push(DataWord::from_u64(self.invoke.number)),
            DIFFICULTY => self.stack.push(self.invoke.difficulty),
            GASLIMIT => self.stack.push(self.invoke.gas_limit),
            CHAINID => self.stack.push(DataWord::from_u64(self.invoke.chain_id)),
            SELFBALANCE => {
                let balance = self.repository.balance(&self.invoke.owner_address)?;
                self.stack.push(balance);
            }

            POP => {
                self.stack.pop_back();
            }
            MLOAD => {
                let offset = self.stack.pop_back().low_usize();
                let word = self.memory.read_word(offset);
                self.stack.push(DataWord::from_big_endian(&word));
            }
            MSTORE => {
                let offset = self.stack.pop_back().low_usize();
                let value = self.stack.pop_back();
                self.memory.write_word(offset, &value.to_be_bytes());
            }
            MSTORE8 => {
                let offset = self.stack.pop_back().low_usize();
                let value = self.stack.pop_back();
                self.memory.write_byte(offset, value.low_byte());
            }
            SLOAD => {
                let key = self.stack.pop_back();
                let value = self.repository.storage_at(&self.invoke.owner_address, &key)?;
                self.stack.push(value);
            }
            SSTORE => {
                self.require_not_static()?;
                let key = self.stack.pop_back();
                let new_value = self.stack.pop_back();
                let current = self.repository.storage_at(&self.invoke.owner_address, &key)?;
                let cost = if current.is_zero() && !new_value.is_zero() {
                    self.schedule.sstore_set_gas
                } else if !current.is_zero() && new_value.is_zero() {
                    self.result.refund = self.result.refund.saturating_add(self.schedule.sstore_refund_gas as u64);
                    0
                } else {
                    self.schedule.sstore_reset_gas
                };
                self.gasometer.spend(cost as u128)?;
                self.repository.set_storage(&self.invoke.owner_address, key, new_value)?;
            }
            JUMP => {
                let destination = self.stack.pop_back().low_usize();
                if !self.is_valid_jump(destination) {
                    return Err(Error::BadJumpDestination { destination });
                }
                self.reader.position = destination;
                return Ok(());
            }
            JUMPI => {
                let destination = self.stack.pop_back().low_usize();
                let condition = self.stack.pop_back();
                if !condition.is_zero() {
                    if !self.is_valid_jump(destination) {
                        return Err(Error::BadJumpDestination { destination });
                    }
                    self.reader.position = destination;
                    return Ok(());
                }
            }
            PC => self.stack.push(DataWord::from_u64(self.reader.position as u64)),
            MSIZE => self.stack.push(DataWord::from_u64(self.memory.size() as u64)),
            GAS => self.stack.push(DataWord::from_u64(self.gasometer.current_gas() as u64)),
            JUMPDEST => {}

            PUSH1 | PUSH2 | PUSH3 | PUSH4 | PUSH5 | PUSH6 | PUSH7 | PUSH8 | PUSH9 | PUSH10 | PUSH11 | PUSH12
            | PUSH13 | PUSH14 | PUSH15 | PUSH16 | PUSH17 | PUSH18 | PUSH19 | PUSH20 | PUSH21 | PUSH22 | PUSH23
            | PUSH24 | PUSH25 | PUSH26 | PUSH27 | PUSH28 | PUSH29 | PUSH30 | PUSH31 | PUSH32 => {
                let n = op.push_bytes().expect("push opcode carries its immediate length");
                let bytes = self.reader.read(n);
                self.stack.push(DataWord::from_push_bytes(&bytes));
                self.reader.position += 1;
                return Ok(());
            }

            DUP1 | DUP2 | DUP3 | DUP4 | DUP5 | DUP6 | DUP7 | DUP8 | DUP9 | DUP10 | DUP11 | DUP12 | DUP13 | DUP14
            | DUP15 | DUP16 => {
                let depth = op.dup_position().expect("dup opcode carries its depth") - 1;
                self.stack.dup(depth);
            }
            SWAP1 | SWAP2 | SWAP3 | SWAP4 | SWAP5 | SWAP6 | SWAP7 | SWAP8 | SWAP9 | SWAP10 | SWAP11 | SWAP12
            | SWAP13 | SWAP14 | SWAP15 | SWAP16 => {
                let depth = op.swap_position().expect("swap opcode carries its depth");
                self.stack.swap_with_top(depth);
            }

            LOG0 | LOG1 | LOG2 | LOG3 | LOG4 => {
                self.require_not_static()?;
                let n = op.log_topics().expect("log opcode carries its topic count");
                let offset = self.stack.pop_back().low_usize();
                let len = self.stack.pop_back().low_usize();
                let mut topics = Vec::with_capacity(n);
                for _ in 0..n {
                    topics.push(self.stack.pop_back());
                }
                let data = self.memory.read_slice(offset, len).to_vec();
                self.result.logs.push(LogEntry {
                    address: self.invoke.owner_address,
                    topics,
                    data,
                });
            }

            CREATE | CREATE2 => {
                self.require_not_static()?;
                self.exec_create(op, config, block_number)?;
            }
            CALL | CALLCODE | DELEGATECALL | STATICCALL => {
                self.exec_call(op, config, block_number)?;
            }
            RETURN => {
                let offset = self.stack.pop_back().low_usize();
                let len = self.stack.pop_back().low_usize();
                let data = self.memory.read_slice(offset, len).to_vec();
                self.finish_return(data);
            }
            REVERT => {
                let offset = self.stack.pop_back().low_usize();
                let len = self.stack.pop_back().low_usize();
                let data = self.memory.read_slice(offset, len).to_vec();
                self.finish_revert(data);
            }
            INVALID => return Err(Error::BadInstruction { instruction: op.to_u8() }),
            SUICIDE => {
                self.require_not_static()?;
                let beneficiary = self.stack.pop_back().as_address();
                let balance = self.repository.balance(&self.invoke.owner_address)?;
                self.repository.transfer_balance(&self.invoke.owner_address, &beneficiary, balance)?;
                self.result.refund = self.result.refund.saturating_add(self.schedule.suicide_refund_gas as u64);
                self.result.deleted_accounts.push(SuicideRecord {
                    address: self.invoke.owner_address,
                    beneficiary,
                });
                self.finish_return(Vec::new());
            }
        }
        self.reader.position += 1;
        Ok(())
    }

    fn unary(&mut self, f: impl Fn(DataWord) -> DataWord) {
        let a = self.stack.pop_back();
        self.stack.push(f(a));
    }

    fn binary(&mut self, f: impl Fn(DataWord, DataWord) -> DataWord) {
        let a = self.stack.pop_back();
        let b = self.stack.pop_back();
        self.stack.push(f(a, b));
    }

    fn ternary(&mut self, f: impl Fn(DataWord, DataWord, DataWord) -> DataWord) {
        let a = self.stack.pop_back();
        let b = self.stack.pop_back();
        let c = self.stack.pop_back();
        self.stack.push(f(a, b, c));
    }

    /// Apply the EIP-150 63/64ths cap to a requested forward-gas amount.
    fn forwardable_gas(&self, requested: DataWord) -> u128 {
        let remaining = self.gasometer.current_gas();
        Gasometer::capped_call_gas(requested.to_u128(), remaining, self.schedule)
    }

    fn exec_call(&mut self, op: OpCode, config: &VmConfig, block_number: u64) -> Result<()> {
        use OpCode::*;
        let kind = match op {
            CALL => CallKind::Call,
            CALLCODE => CallKind::CallCode,
            DELEGATECALL => CallKind::DelegateCall,
            STATICCALL => CallKind::StaticCall,
            _ => unreachable!("exec_call only dispatched for the four *CALL* opcodes"),
        };
        let requested_gas = self.stack.pop_back();
        let code_address = self.stack.pop_back().as_address();
        let value = if matches!(kind, CallKind::DelegateCall | CallKind::StaticCall) {
            None
        } else {
            Some(self.stack.pop_back())
        };
        let in_offset = self.stack.pop_back().low_usize();
        let in_len = self.stack.pop_back().low_usize();
        let out_offset = self.stack.pop_back().low_usize();
        let out_len = self.stack.pop_back().low_usize();

        if matches!(kind, CallKind::Call) && self.invoke.static_flag && value.map(|v| !v.is_zero()).unwrap_or(false) {
            return Err(Error::MutableCallInStaticContext);
        }

        let input = self.memory.read_slice(in_offset, in_len).to_vec();
        let gas = self.forwardable_gas(requested_gas);
        self.gasometer.spend(gas)?;

        let (storage_address, sender, call_value) = match kind {
            CallKind::Call => (code_address, self.invoke.owner_address, value.unwrap_or(DataWord::ZERO)),
            CallKind::CallCode => (self.invoke.owner_address, self.invoke.owner_address, value.unwrap_or(DataWord::ZERO)),
            CallKind::DelegateCall => (self.invoke.owner_address, self.invoke.caller, self.invoke.call_value),
            CallKind::StaticCall => (code_address, self.invoke.owner_address, DataWord::ZERO),
        };
        let static_flag = self.invoke.static_flag || matches!(kind, CallKind::StaticCall);

        // The stipend is granted to the callee without being drawn from the
        // caller's own counter; conservation is deliberately not exact here,
        // matching the reference EVM's CALL-value stipend.
        let stipend = if matches!(kind, CallKind::Call | CallKind::CallCode) && !call_value.is_zero() {
            self.schedule.call_stipend as u128
        } else {
            0
        };
        let callee_gas = gas + stipend;

        if matches!(kind, CallKind::Call) && !call_value.is_zero() {
            self.repository.transfer_balance(&self.invoke.owner_address, &code_address, call_value)?;
        }

        if let Some(precompile) = self.precompiles.contract_for_address(&DataWord::from_address(code_address)) {
            match precompile.execute(&input, callee_gas as u64) {
                PrecompileResult::Success { output, gas_used } => {
                    self.gasometer.credit(callee_gas.saturating_sub(gas_used as u128));
                    self.return_data = output.clone();
                    self.memory.write_padded(out_offset, out_len, &output);
                    self.stack.push(DataWord::ONE);
                }
                PrecompileResult::Failure => {
                    self.gasometer.credit(callee_gas);
                    self.return_data = Vec::new();
                    self.stack.push(DataWord::ZERO);
                }
            }
            return Ok(());
        }

        let child_invoke = self.invoke.for_sub_call(
            storage_address,
            sender,
            call_value,
            DataWord::from_u128(callee_gas),
            input,
            static_flag,
        );
        if child_invoke.call_depth > self.schedule.max_depth {
            self.gasometer.credit(callee_gas);
            self.return_data = Vec::new();
            self.stack.push(DataWord::ZERO);
            return Ok(());
        }

        let code = self.repository.code_at(&code_address)?.unwrap_or_default();
        let code_hash = self.repository.code_hash_at(&code_address)?.unwrap_or(DataWord::ZERO);
        let child = Vm::play(
            self.schedule,
            config,
            &mut *self.repository,
            self.precompiles,
            self.jump_cache,
            child_invoke,
            Arc::new(code),
            code_hash,
            block_number,
        );

        self.gasometer.credit(child.gas_left);
        self.return_data = child.return_data.clone();
        self.memory.write_padded(out_offset, out_len, &child.return_data);
        if child.should_revert() {
            self.stack.push(DataWord::ZERO);
        } else {
            self.stack.push(DataWord::ONE);
            self.result.merge_child(child);
        }
        Ok(())
    }

    fn exec_create(&mut self, op: OpCode, config: &VmConfig, block_number: u64) -> Result<()> {
        let value = self.stack.pop_back();
        let in_offset = self.stack.pop_back().low_usize();
        let in_size = self.stack.pop_back().low_usize();
        let salt = if op == OpCode::CREATE2 { Some(self.stack.pop_back()) } else { None };
        let init_code = self.memory.read_slice(in_offset, in_size).to_vec();

        let new_address = match salt {
            Some(salt) => create2_address(self.invoke.owner_address, salt, &init_code),
            None => {
                let nonce = self.repository.nonce(&self.invoke.owner_address)?;
                create_address(self.invoke.owner_address, nonce)
            }
        };

        let available = self.gasometer.current_gas();
        let forwarded_gas = match self.schedule.sub_gas_cap_divisor {
            Some(divisor) => available - available / (divisor as u128),
            None => available,
        };
        self.gasometer.spend(forwarded_gas)?;

        if !value.is_zero() {
            self.repository.transfer_balance(&self.invoke.owner_address, &new_address, value)?;
        }

        let init_code_hash = DataWord::from_h256(keccak_hash::keccak(&init_code));
        let child_invoke = self.invoke.for_sub_call(
            new_address,
            self.invoke.owner_address,
            value,
            DataWord::from_u128(forwarded_gas),
            Vec::new(),
            self.invoke.static_flag,
        );
        if child_invoke.call_depth > self.schedule.max_depth {
            self.gasometer.credit(forwarded_gas);
            self.stack.push(DataWord::ZERO);
            return Ok(());
        }

        let child = Vm::play(
            self.schedule,
            config,
            &mut *self.repository,
            self.precompiles,
            self.jump_cache,
            child_invoke.clone(),
            Arc::new(init_code),
            init_code_hash,
            block_number,
        );

        self.gasometer.credit(child.gas_left);
        if child.should_revert() {
            self.return_data = child.return_data.clone();
            self.stack.push(DataWord::ZERO);
        } else {
            self.repository.set_code(&new_address, child.return_data.clone())?;
            self.result.created_contracts.push(CreatedContract {
                address: new_address,
                invoke: child_invoke,
            });
            self.result.merge_child(child);
            self.stack.push(DataWord::from_address(new_address));
        }
        Ok(())
    }
}

fn read_padded(source: &[u8], offset: usize, len: usize) -> Vec<u8> {
    if len == 0 {
        return Vec::new();
    }
    let mut out = vec![0u8; len];
    if offset < source.len() {
        let available = (source.len() - offset).min(len);
        out[..available].copy_from_slice(&source[offset..offset + available]);
    }
    out
}

/// `CREATE`'s address: `keccak256(sender ++ nonce)[12..]`. RLP encoding is a
/// named external collaborator this crate doesn't depend on, so the
/// preimage is this engine's own simplified (non-protocol-exact) encoding
/// of sender and nonce rather than `rlp([sender, nonce])`.
fn create_address(sender: Address, nonce: u64) -> Address {
    let mut preimage = sender.as_bytes().to_vec();
    preimage.extend_from_slice(&nonce.to_be_bytes());
    let hash = keccak_hash::keccak(&preimage);
    Address::from_slice(&hash.as_bytes()[12..])
}

/// `CREATE2`'s address per EIP-1014: `keccak256(0xff ++ sender ++ salt ++ keccak256(init_code))[12..]`.
fn create2_address(sender: Address, salt: DataWord, init_code: &[u8]) -> Address {
    let mut preimage = Vec::with_capacity(1 + 20 + 32 + 32);
    preimage.push(0xff);
    preimage.extend_from_slice(sender.as_bytes());
    preimage.extend_from_slice(&salt.to_be_bytes());
    preimage.extend_from_slice(keccak_hash::keccak(init_code).as_bytes());
    let hash = keccak_hash::keccak(&preimage);
    Address::from_slice(&hash.as_bytes()[12..])
}
