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

//! Cache of valid `JUMPDEST` positions, keyed by code hash and shared
//! across every frame executing the same contract.

use bit_set::BitSet;
use lru::LruCache;
use parking_lot::RwLock;
use std::num::NonZeroUsize;
use std::sync::Arc;
use vm::DataWord;
use vm::OpCode;

const DEFAULT_CAPACITY: usize = 4096;

/// Set of byte positions in one contract's code that are valid jump
/// targets: a `JUMPDEST` opcode not lying inside any `PUSHn` immediate.
#[derive(Debug)]
pub struct JumpDestinations {
    bits: BitSet,
}

impl JumpDestinations {
    fn build(code: &[u8]) -> Self {
        let mut bits = BitSet::with_capacity(code.len());
        let mut pc = 0;
        while pc < code.len() {
            match OpCode::from_u8(code[pc]) {
                Some(OpCode::JUMPDEST) => {
                    bits.insert(pc);
                    pc += 1;
                }
                Some(op) => {
                    pc += 1 + op.push_bytes().unwrap_or(0);
                }
                None => pc += 1,
            }
        }
        JumpDestinations { bits }
    }

    pub fn is_valid(&self, position: usize) -> bool {
        self.bits.contains(position)
    }
}

/// Thread-safe, bounded cache from code hash to its `JumpDestinations`.
/// Construction is lazy: the first frame executing a given contract builds
/// the set, later frames (possibly on other threads) reuse it.
pub struct SharedCache {
    cache: RwLock<LruCache<DataWord, Arc<JumpDestinations>>>,
}

impl SharedCache {
    pub fn new() -> Self {
        SharedCache::with_capacity(DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity.max(1)).expect("capacity.max(1) is nonzero");
        SharedCache {
            cache: RwLock::new(LruCache::new(capacity)),
        }
    }

    /// Valid jump destinations for `code`, identified by `code_hash`.
    /// Built once per code hash and reused thereafter.
    pub fn jump_destinations(&self, code_hash: &DataWord, code: &[u8]) -> Arc<JumpDestinations> {
        if let Some(hit) = self.cache.write().get(code_hash) {
            return hit.clone();
        }
        let built = Arc::new(JumpDestinations::build(code));
        self.cache.write().put(*code_hash, built.clone());
        built
    }
}

impl Default for SharedCache {
    fn default() -> Self {
        SharedCache::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn jumpdest_inside_push_immediate_is_invalid() {
        // PUSH1 0x5b ; JUMPDEST -- the 0x5b byte is data, not a destination.
        let code = vec![0x60, 0x5b, 0x5b];
        let dests = JumpDestinations::build(&code);
        assert!(!dests.is_valid(1));
        assert!(dests.is_valid(2));
    }

    #[test]
    fn cache_returns_the_same_set_on_repeat_lookup() {
        let cache = SharedCache::new();
        let hash = DataWord::from_u64(1);
        let code = vec![0x5b];
        let first = cache.jump_destinations(&hash, &code);
        let second = cache.jump_destinations(&hash, &code);
        assert!(Arc::ptr_eq(&first, &second));
    }
}
