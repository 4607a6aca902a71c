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

//! PC cursor over a contract's code buffer.

use std::sync::Arc;

/// Cursor over the executing contract's code. `position` is the engine's
/// program counter; `read` advances it and is used both to fetch opcodes
/// and to pull `PUSHn` immediates.
#[derive(Debug, Clone)]
pub struct CodeReader {
    code: Arc<Vec<u8>>,
    pub position: usize,
}

impl CodeReader {
    pub fn new(code: Arc<Vec<u8>>) -> Self {
        CodeReader { code, position: 0 }
    }

    pub fn len(&self) -> usize {
        self.code.len()
    }

    pub fn is_empty(&self) -> bool {
        self.code.is_empty()
    }

    pub fn code_slice(&self) -> &[u8] {
        &self.code
    }

    /// Byte at the current position, or `None` past the end (a fetch past
    /// the end of code is treated as an implicit `STOP`, per the reference EVM).
    pub fn current(&self) -> Option<u8> {
        self.code.get(self.position).copied()
    }

    /// Read `n` bytes starting just past the current position, advancing
    /// past them, zero-padding on the right if code runs out (`PUSHn` at
    /// the tail of code).
    pub fn read(&mut self, n: usize) -> Vec<u8> {
        let start = self.position + 1;
        let end = (start + n).min(self.code.len());
        let mut bytes = if start < self.code.len() {
            self.code[start..end].to_vec()
        } else {
            Vec::new()
        };
        bytes.resize(n, 0);
        self.position += n;
        bytes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_advances_past_the_immediate() {
        let code = Arc::new(vec![0x60, 0x2a, 0x00]);
        let mut reader = CodeReader::new(code);
        assert_eq!(reader.current(), Some(0x60));
        let bytes = reader.read(1);
        assert_eq!(bytes, vec![0x2a]);
        assert_eq!(reader.position, 1);
    }

    #[test]
    fn read_past_end_zero_pads() {
        let code = Arc::new(vec![0x60]);
        let mut reader = CodeReader::new(code);
        let bytes = reader.read(1);
        assert_eq!(bytes, vec![0]);
    }
}
