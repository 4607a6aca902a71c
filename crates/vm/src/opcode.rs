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

//! One-byte opcode encoding, stack requirements, and logging categories.

/// Category of an opcode, used for logging/trace grouping only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Stop,
    Arithmetic,
    Comparison,
    Bitwise,
    Sha3,
    Environment,
    Block,
    Stack,
    Memory,
    Storage,
    Flow,
    Push,
    Dup,
    Swap,
    Log,
    Call,
    Create,
    Halt,
}

/// Static metadata for one opcode: how many words it pops (`args`) and
/// pushes (`ret`), plus its logging category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpCodeInfo {
    pub name: &'static str,
    pub args: usize,
    pub ret: usize,
    pub category: Category,
}

macro_rules! opcodes {
    ($( $byte:literal => $variant:ident ( $name:literal, $args:expr, $ret:expr, $category:expr ) ),* $(,)?) => {
        /// The fixed EVM opcode enumeration, one-byte encoded.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        #[repr(u8)]
        pub enum OpCode {
            $( $variant = $byte ),*
        }

        impl OpCode {
            /// Decode a raw byte into an opcode. `None` is an invalid instruction.
            pub fn from_u8(byte: u8) -> Option<OpCode> {
                match byte {
                    $( $byte => Some(OpCode::$variant), )*
                    _ => None,
                }
            }

            pub fn to_u8(self) -> u8 {
                self as u8
            }

            pub fn info(self) -> OpCodeInfo {
                match self {
                    $( OpCode::$variant => OpCodeInfo { name: $name, args: $args, ret: $ret, category: $category }, )*
                }
            }
        }
    };
}

use Category::*;

opcodes! {
    0x00 => STOP("STOP", 0, 0, Stop),
    0x01 => ADD("ADD", 2, 1, Arithmetic),
    0x02 => MUL("MUL", 2, 1, Arithmetic),
    0x03 => SUB("SUB", 2, 1, Arithmetic),
    0x04 => DIV("DIV", 2, 1, Arithmetic),
    0x05 => SDIV("SDIV", 2, 1, Arithmetic),
    0x06 => MOD("MOD", 2, 1, Arithmetic),
    0x07 => SMOD("SMOD", 2, 1, Arithmetic),
    0x08 => ADDMOD("ADDMOD", 3, 1, Arithmetic),
    0x09 => MULMOD("MULMOD", 3, 1, Arithmetic),
    0x0a => EXP("EXP", 2, 1, Arithmetic),
    0x0b => SIGNEXTEND("SIGNEXTEND", 2, 1, Arithmetic),

    0x10 => LT("LT", 2, 1, Comparison),
    0x11 => GT("GT", 2, 1, Comparison),
    0x12 => SLT("SLT", 2, 1, Comparison),
    0x13 => SGT("SGT", 2, 1, Comparison),
    0x14 => EQ("EQ", 2, 1, Comparison),
    0x15 => ISZERO("ISZERO", 1, 1, Comparison),
    0x16 => AND("AND", 2, 1, Bitwise),
    0x17 => OR("OR", 2, 1, Bitwise),
    0x18 => XOR("XOR", 2, 1, Bitwise),
    0x19 => NOT("NOT", 1, 1, Bitwise),
    0x1a => BYTE("BYTE", 2, 1, Bitwise),
    0x1b => SHL("SHL", 2, 1, Bitwise),
    0x1c => SHR("SHR", 2, 1, Bitwise),
    0x1d => SAR("SAR", 2, 1, Bitwise),

    0x20 => SHA3("SHA3", 2, 1, Sha3),

    0x30 => ADDRESS("ADDRESS", 0, 1, Environment),
    0x31 => BALANCE("BALANCE", 1, 1, Environment),
    0x32 => ORIGIN("ORIGIN", 0, 1, Environment),
    0x33 => CALLER("CALLER", 0, 1, Environment),
    0x34 => CALLVALUE("CALLVALUE", 0, 1, Environment),
    0x35 => CALLDATALOAD("CALLDATALOAD", 1, 1, Environment),
    0x36 => CALLDATASIZE("CALLDATASIZE", 0, 1, Environment),
    0x37 => CALLDATACOPY("CALLDATACOPY", 3, 0, Environment),
    0x38 => CODESIZE("CODESIZE", 0, 1, Environment),
    0x39 => CODECOPY("CODECOPY", 3, 0, Environment),
    0x3a => GASPRICE("GASPRICE", 0, 1, Environment),
    0x3b => EXTCODESIZE("EXTCODESIZE", 1, 1, Environment),
    0x3c => EXTCODECOPY("EXTCODECOPY", 4, 0, Environment),
    0x3d => RETURNDATASIZE("RETURNDATASIZE", 0, 1, Environment),
    0x3e => RETURNDATACOPY("RETURNDATACOPY", 3, 0, Environment),
    0x3f => EXTCODEHASH("EXTCODEHASH", 1, 1, Environment),

    0x40 => BLOCKHASH("BLOCKHASH", 1, 1, Block),
    0x41 => COINBASE("COINBASE", 0, 1, Block),
    0x42 => TIMESTAMP("TIMESTAMP", 0, 1, Block),
    0x43 => NUMBER("NUMBER", 0, 1, Block),
    0x44 => DIFFICULTY("DIFFICULTY", 0, 1, Block),
    0x45 => GASLIMIT("GASLIMIT", 0, 1, Block),
    0x46 => CHAINID("CHAINID", 0, 1, Block),
    0x47 => SELFBALANCE("SELFBALANCE", 0, 1, Block),

    0x50 => POP("POP", 1, 0, Stack),
    0x51 => MLOAD("MLOAD", 1, 1, Memory),
    0x52 => MSTORE("MSTORE", 2, 0, Memory),
    0x53 => MSTORE8("MSTORE8", 2, 0, Memory),
    0x54 => SLOAD("SLOAD", 1, 1, Storage),
    0x55 => SSTORE("SSTORE", 2, 0, Storage),
    0x56 => JUMP("JUMP", 1, 0, Flow),
    0x57 => JUMPI("JUMPI", 2, 0, Flow),
    0x58 => PC("PC", 0, 1, Flow),
    0x59 => MSIZE("MSIZE", 0, 1, Memory),
    0x5a => GAS("GAS", 0, 1, Flow),
    0x5b => JUMPDEST("JUMPDEST", 0, 0, Flow),

    0x60 => PUSH1("PUSH1", 0, 1, Push),
    0x61 => PUSH2("PUSH2", 0, 1, Push),
    0x62 => PUSH3("PUSH3", 0, 1, Push),
    0x63 => PUSH4("PUSH4", 0, 1, Push),
    0x64 => PUSH5("PUSH5", 0, 1, Push),
    0x65 => PUSH6("PUSH6", 0, 1, Push),
    0x66 => PUSH7("PUSH7", 0, 1, Push),
    0x67 => PUSH8("PUSH8", 0, 1, Push),
    0x68 => PUSH9("PUSH9", 0, 1, Push),
    0x69 => PUSH10("PUSH10", 0, 1, Push),
    0x6a => PUSH11("PUSH11", 0, 1, Push),
    0x6b => PUSH12("PUSH12", 0, 1, Push),
    0x6c => PUSH13("PUSH13", 0, 1, Push),
    0x6d => PUSH14("PUSH14", 0, 1, Push),
    0x6e => PUSH15("PUSH15", 0, 1, Push),
    0x6f => PUSH16("PUSH16", 0, 1, Push),
    0x70 => PUSH17("PUSH17", 0, 1, Push),
    0x71 => PUSH18("PUSH18", 0, 1, Push),
    0x72 => PUSH19("PUSH19", 0, 1, Push),
    0x73 => PUSH20("PUSH20", 0, 1, Push),
    0x74 => PUSH21("PUSH21", 0, 1, Push),
    0x75 => PUSH22("PUSH22", 0, 1, Push),
    0x76 => PUSH23("PUSH23", 0, 1, Push),
    0x77 => PUSH24("PUSH24", 0, 1, Push),
    0x78 => PUSH25("PUSH25", 0, 1, Push),
    0x79 => PUSH26("PUSH26", 0, 1, Push),
    0x7a => PUSH27("PUSH27", 0, 1, Push),
    0x7b => PUSH28("PUSH28", 0, 1, Push),
    0x7c => PUSH29("PUSH29", 0, 1, Push),
    0x7d => PUSH30("PUSH30", 0, 1, Push),
    0x7e => PUSH31("PUSH31", 0, 1, Push),
    0x7f => PUSH32("PUSH32", 0, 1, Push),

    0x80 => DUP1("DUP1", 1, 2, Dup),
    0x81 => DUP2("DUP2", 2, 3, Dup),
    0x82 => DUP3("DUP3", 3, 4, Dup),
    0x83 => DUP4("DUP4", 4, 5, Dup),
    0x84 => DUP5("DUP5", 5, 6, Dup),
    0x85 => DUP6("DUP6", 6, 7, Dup),
    0x86 => DUP7("DUP7", 7, 8, Dup),
    0x87 => DUP8("DUP8", 8, 9, Dup),
    0x88 => DUP9("DUP9", 9, 10, Dup),
    0x89 => DUP10("DUP10", 10, 11, Dup),
    0x8a => DUP11("DUP11", 11, 12, Dup),
    0x8b => DUP12("DUP12", 12, 13, Dup),
    0x8c => DUP13("DUP13", 13, 14, Dup),
    0x8d => DUP14("DUP14", 14, 15, Dup),
    0x8e => DUP15("DUP15", 15, 16, Dup),
    0x8f => DUP16("DUP16", 16, 17, Dup),

    0x90 => SWAP1("SWAP1", 2, 2, Swap),
    0x91 => SWAP2("SWAP2", 3, 3, Swap),
    0x92 => SWAP3("SWAP3", 4, 4, Swap),
    0x93 => SWAP4("SWAP4", 5, 5, Swap),
    0x94 => SWAP5("SWAP5", 6, 6, Swap),
    0x95 => SWAP6("SWAP6", 7, 7, Swap),
    0x96 => SWAP7("SWAP7", 8, 8, Swap),
    0x97 => SWAP8("SWAP8", 9, 9, Swap),
    0x98 => SWAP9("SWAP9", 10, 10, Swap),
    0x99 => SWAP10("SWAP10", 11, 11, Swap),
    0x9a => SWAP11("SWAP11", 12, 12, Swap),
    0x9b => SWAP12("SWAP12", 13, 13, Swap),
    0x9c => SWAP13("SWAP13", 14, 14, Swap),
    0x9d => SWAP14("SWAP14", 15, 15, Swap),
    0x9e => SWAP15("SWAP15", 16, 16, Swap),
    0x9f => SWAP16("SWAP16", 17, 17, Swap),

    0xa0 => LOG0("LOG0", 2, 0, Log),
    0xa1 => LOG1("LOG1", 3, 0, Log),
    0xa2 => LOG2("LOG2", 4, 0, Log),
    0xa3 => LOG3("LOG3", 5, 0, Log),
    0xa4 => LOG4("LOG4", 6, 0, Log),

    0xf0 => CREATE("CREATE", 3, 1, Create),
    0xf1 => CALL("CALL", 7, 1, Call),
    0xf2 => CALLCODE("CALLCODE", 7, 1, Call),
    0xf3 => RETURN("RETURN", 2, 0, Halt),
    0xf4 => DELEGATECALL("DELEGATECALL", 6, 1, Call),
    0xf5 => CREATE2("CREATE2", 4, 1, Create),
    0xfa => STATICCALL("STATICCALL", 6, 1, Call),
    0xfd => REVERT("REVERT", 2, 0, Halt),
    0xfe => INVALID("INVALID", 0, 0, Halt),
    0xff => SUICIDE("SUICIDE", 1, 0, Halt),
}

impl OpCode {
    /// Immediate-operand length for `PUSH1..PUSH32`, else `None`.
    pub fn push_bytes(self) -> Option<usize> {
        let byte = self.to_u8();
        if (0x60..=0x7f).contains(&byte) {
            Some((byte - 0x5f) as usize)
        } else {
            None
        }
    }

    /// 1-indexed depth for `DUP1..DUP16`, else `None`.
    pub fn dup_position(self) -> Option<usize> {
        let byte = self.to_u8();
        if (0x80..=0x8f).contains(&byte) {
            Some((byte - 0x7f) as usize)
        } else {
            None
        }
    }

    /// 1-indexed depth for `SWAP1..SWAP16`, else `None`.
    pub fn swap_position(self) -> Option<usize> {
        let byte = self.to_u8();
        if (0x90..=0x9f).contains(&byte) {
            Some((byte - 0x8f) as usize)
        } else {
            None
        }
    }

    /// Topic count for `LOG0..LOG4`, else `None`.
    pub fn log_topics(self) -> Option<usize> {
        let byte = self.to_u8();
        if (0xa0..=0xa4).contains(&byte) {
            Some((byte - 0xa0) as usize)
        } else {
            None
        }
    }

    pub fn name(self) -> &'static str {
        self.info().name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_byte_is_invalid_instruction() {
        assert_eq!(OpCode::from_u8(0x0c), None);
        assert_eq!(OpCode::from_u8(0xb0), None);
    }

    #[test]
    fn push_bytes_covers_the_full_range() {
        assert_eq!(OpCode::PUSH1.push_bytes(), Some(1));
        assert_eq!(OpCode::PUSH32.push_bytes(), Some(32));
        assert_eq!(OpCode::ADD.push_bytes(), None);
    }

    #[test]
    fn dup_and_swap_positions_are_1_indexed() {
        assert_eq!(OpCode::DUP1.dup_position(), Some(1));
        assert_eq!(OpCode::DUP16.dup_position(), Some(16));
        assert_eq!(OpCode::SWAP1.swap_position(), Some(1));
        assert_eq!(OpCode::SWAP16.swap_position(), Some(16));
    }

    #[test]
    fn log_topic_counts() {
        assert_eq!(OpCode::LOG0.log_topics(), Some(0));
        assert_eq!(OpCode::LOG4.log_topics(), Some(4));
        assert_eq!(OpCode::ADD.log_topics(), None);
    }

    #[test]
    fn arity_matches_the_reference_evm() {
        assert_eq!(OpCode::ADD.info().args, 2);
        assert_eq!(OpCode::ADD.info().ret, 1);
        assert_eq!(OpCode::SWAP1.info().args, 2);
        assert_eq!(OpCode::DUP1.info().ret, 2);
    }
}
