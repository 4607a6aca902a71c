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

//! The EVM's only value type: a 256-bit word with wrapping unsigned and
//! two's-complement signed arithmetic.

use ethereum_types::{Address, BigEndianHash, H256, U256};
use num_bigint::BigUint;
use std::fmt;

/// A 256-bit machine word.
///
/// `DataWord` has value semantics: every arithmetic operation returns a new
/// word rather than mutating in place, so `DUP` can copy a stack slot by
/// plain `Copy` without any risk of aliasing the original.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct DataWord(pub U256);

const SIGN_BIT: usize = 255;

impl DataWord {
    pub const ZERO: DataWord = DataWord(U256::zero());
    pub const ONE: DataWord = DataWord(U256([1, 0, 0, 0]));

    pub fn from_u256(v: U256) -> Self {
        DataWord(v)
    }

    pub fn from_u64(v: u64) -> Self {
        DataWord(U256::from(v))
    }

    pub fn from_big_endian(bytes: &[u8]) -> Self {
        DataWord(U256::from_big_endian(bytes))
    }

    /// Zero-extend a big-endian byte slice shorter than 32 bytes, as `PUSHn` does.
    pub fn from_push_bytes(bytes: &[u8]) -> Self {
        DataWord(U256::from(bytes))
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    pub fn as_u256(&self) -> U256 {
        self.0
    }

    /// Truncating view as `u128`, used for gas accounting (real gas values
    /// never approach the full 256-bit range).
    pub fn to_u128(&self) -> u128 {
        let bytes = self.to_be_bytes();
        let mut low = [0u8; 16];
        low.copy_from_slice(&bytes[16..]);
        u128::from_be_bytes(low)
    }

    pub fn from_u128(v: u128) -> Self {
        let mut bytes = [0u8; 32];
        bytes[16..].copy_from_slice(&v.to_be_bytes());
        DataWord::from_big_endian(&bytes)
    }

    /// The 32-byte big-endian encoding, as used by `MSTORE`/`RETURN`/log data.
    pub fn to_be_bytes(&self) -> [u8; 32] {
        let mut out = [0u8; 32];
        self.0.to_big_endian(&mut out);
        out
    }

    /// The low byte only, as used by `MSTORE8`.
    pub fn low_byte(&self) -> u8 {
        self.0.low_u32() as u8
    }

    /// Saturating view as `usize`, used for offsets/lengths that callers must
    /// bounds-check themselves (the spec's "bad instruction operand" case is
    /// raised by the caller when this saturates a value that mattered).
    pub fn low_usize(&self) -> usize {
        self.0.low_u64() as usize
    }

    /// 20-byte suffix, the address view.
    pub fn as_address(&self) -> Address {
        let hash: H256 = BigEndianHash::from_uint(&self.0);
        Address::from(hash)
    }

    pub fn from_address(address: Address) -> Self {
        DataWord(H256::from(address).into_uint())
    }

    pub fn from_h256(hash: H256) -> Self {
        DataWord(hash.into_uint())
    }

    pub fn as_h256(&self) -> H256 {
        BigEndianHash::from_uint(&self.0)
    }

    /// True iff bit 255 (the sign bit under two's complement) is set.
    pub fn is_negative(&self) -> bool {
        self.0.bit(SIGN_BIT)
    }

    /// Returns the sign-stripped magnitude and whether the original was negative.
    fn unsign(self) -> (U256, bool) {
        let negative = self.is_negative();
        if negative {
            (DataWord(!self.0).wrapping_add(DataWord::ONE).0, true)
        } else {
            (self.0, false)
        }
    }

    fn resign(magnitude: U256, negative: bool) -> DataWord {
        if negative {
            DataWord((!magnitude).overflowing_add(U256::one()).0)
        } else {
            DataWord(magnitude)
        }
    }

    pub fn wrapping_add(self, other: DataWord) -> DataWord {
        DataWord(self.0.overflowing_add(other.0).0)
    }

    pub fn wrapping_sub(self, other: DataWord) -> DataWord {
        DataWord(self.0.overflowing_sub(other.0).0)
    }

    pub fn wrapping_mul(self, other: DataWord) -> DataWord {
        DataWord(self.0.overflowing_mul(other.0).0)
    }

    /// Unsigned division; `DIV x 0 == 0` per the EVM spec.
    pub fn div(self, other: DataWord) -> DataWord {
        if other.is_zero() {
            DataWord::ZERO
        } else {
            DataWord(self.0 / other.0)
        }
    }

    /// Unsigned modulo; `MOD x 0 == 0`.
    pub fn rem(self, other: DataWord) -> DataWord {
        if other.is_zero() {
            DataWord::ZERO
        } else {
            DataWord(self.0 % other.0)
        }
    }

    /// Signed division. `INT_MIN / -1 == INT_MIN` (two's-complement wrap,
    /// the one case where the naive unsign/divide/resign dance would overflow).
    pub fn sdiv(self, other: DataWord) -> DataWord {
        let (a, neg_a) = self.unsign();
        let (b, neg_b) = other.unsign();
        let int_min = (U256::one() << SIGN_BIT) - U256::one();
        if b.is_zero() {
            DataWord::ZERO
        } else if a == int_min && b == U256::max_value() {
            DataWord(int_min)
        } else {
            DataWord::resign(a / b, neg_a ^ neg_b)
        }
    }

    /// Signed modulo; the result takes the sign of the dividend.
    pub fn smod(self, other: DataWord) -> DataWord {
        let (a, neg_a) = self.unsign();
        let (b, _) = other.unsign();
        if b.is_zero() {
            DataWord::ZERO
        } else {
            DataWord::resign(a % b, neg_a)
        }
    }

    pub fn pow(self, exponent: DataWord) -> DataWord {
        DataWord(self.0.overflowing_pow(exponent.0).0)
    }

    /// Number of non-zero bytes the exponent occupies, for `EXP_BYTE_GAS` pricing.
    pub fn byte_len(&self) -> usize {
        let bytes = self.to_be_bytes();
        32 - bytes.iter().take_while(|b| **b == 0).count()
    }

    pub fn addmod(self, other: DataWord, modulus: DataWord) -> DataWord {
        if modulus.is_zero() {
            DataWord::ZERO
        } else {
            let sum = to_biguint(self.0) + to_biguint(other.0);
            DataWord(from_biguint(sum % to_biguint(modulus.0)))
        }
    }

    pub fn mulmod(self, other: DataWord, modulus: DataWord) -> DataWord {
        if modulus.is_zero() {
            DataWord::ZERO
        } else {
            let product = to_biguint(self.0) * to_biguint(other.0);
            DataWord(from_biguint(product % to_biguint(modulus.0)))
        }
    }

    pub fn bitand(self, other: DataWord) -> DataWord {
        DataWord(self.0 & other.0)
    }

    pub fn bitor(self, other: DataWord) -> DataWord {
        DataWord(self.0 | other.0)
    }

    pub fn bitxor(self, other: DataWord) -> DataWord {
        DataWord(self.0 ^ other.0)
    }

    pub fn bitnot(self) -> DataWord {
        DataWord(!self.0)
    }

    pub fn lt(self, other: DataWord) -> bool {
        self.0 < other.0
    }

    pub fn gt(self, other: DataWord) -> bool {
        self.0 > other.0
    }

    pub fn slt(self, other: DataWord) -> bool {
        let (a, neg_a) = self.unsign();
        let (b, neg_b) = other.unsign();
        (a < b && !(neg_a || neg_b)) || (a > b && (neg_a && neg_b)) || (neg_a && !neg_b)
    }

    pub fn sgt(self, other: DataWord) -> bool {
        other.slt(self)
    }

    /// `BYTE(i, x)`: the `i`-th most-significant byte of `x`, or zero if `i >= 32`.
    pub fn byte(self, index: DataWord) -> DataWord {
        if index.0 < U256::from(32) {
            let shift = 8 * (31 - index.low_usize());
            DataWord((self.0 >> shift) & U256::from(0xffu64))
        } else {
            DataWord::ZERO
        }
    }

    /// `SIGNEXTEND(k, x)`: replicate the sign bit at byte `k` across all
    /// higher bytes; `x` unchanged when `k >= 32`.
    pub fn sign_extend(self, k: DataWord) -> DataWord {
        if k.0 >= U256::from(32) {
            return self;
        }
        let bit_position = (k.low_usize() * 8 + 7) as usize;
        let negative = self.0.bit(bit_position);
        let mask = (U256::one() << bit_position) - U256::one();
        if negative {
            DataWord(self.0 | !mask)
        } else {
            DataWord(self.0 & mask)
        }
    }

    pub fn shl(self, shift: DataWord) -> DataWord {
        if shift.0 >= U256::from(256) {
            DataWord::ZERO
        } else {
            DataWord(self.0 << shift.low_usize())
        }
    }

    pub fn shr(self, shift: DataWord) -> DataWord {
        if shift.0 >= U256::from(256) {
            DataWord::ZERO
        } else {
            DataWord(self.0 >> shift.low_usize())
        }
    }

    /// Arithmetic right shift: sign-extends rather than zero-fills.
    pub fn sar(self, shift: DataWord) -> DataWord {
        let negative = self.is_negative();
        if shift.0 >= U256::from(256) {
            return if negative {
                DataWord(U256::max_value())
            } else {
                DataWord::ZERO
            };
        }
        let shift = shift.low_usize();
        let mut shifted = self.0 >> shift;
        if negative {
            shifted |= U256::max_value() << (256 - shift);
        }
        DataWord(shifted)
    }

    pub fn bool_word(value: bool) -> DataWord {
        if value {
            DataWord::ONE
        } else {
            DataWord::ZERO
        }
    }
}

fn to_biguint(x: U256) -> BigUint {
    let mut bytes = [0u8; 32];
    x.to_little_endian(&mut bytes);
    BigUint::from_bytes_le(&bytes)
}

fn from_biguint(x: BigUint) -> U256 {
    let bytes = x.to_bytes_le();
    U256::from_little_endian(&bytes)
}

impl From<U256> for DataWord {
    fn from(v: U256) -> Self {
        DataWord(v)
    }
}

impl From<u64> for DataWord {
    fn from(v: u64) -> Self {
        DataWord::from_u64(v)
    }
}

impl fmt::Display for DataWord {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl fmt::LowerHex for DataWord {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::LowerHex::fmt(&self.0, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn div_by_zero_is_zero() {
        assert_eq!(DataWord::from_u64(5).div(DataWord::ZERO), DataWord::ZERO);
        assert_eq!(DataWord::from_u64(5).rem(DataWord::ZERO), DataWord::ZERO);
    }

    #[test]
    fn sdiv_int_min_by_minus_one_wraps() {
        let int_min = DataWord(U256::one() << 255);
        let minus_one = DataWord(U256::max_value());
        assert_eq!(int_min.sdiv(minus_one), int_min);
    }

    #[test]
    fn exp_zero_exponent_is_one() {
        assert_eq!(DataWord::from_u64(7).pow(DataWord::ZERO), DataWord::ONE);
        assert_eq!(DataWord::ZERO.pow(DataWord::ZERO), DataWord::ONE);
    }

    #[test]
    fn signextend_boundary_is_identity() {
        let x = DataWord::from_u64(0xff);
        assert_eq!(x.sign_extend(DataWord::from_u64(31)), x);
        assert_eq!(x.sign_extend(DataWord::from_u64(32)), x);
    }

    #[test]
    fn signextend_replicates_sign_bit() {
        // byte 0 of 0xff is negative in a single-byte view; extending should yield all-ones.
        let x = DataWord::from_u64(0xff);
        assert_eq!(x.sign_extend(DataWord::ZERO), DataWord(U256::max_value()));
    }

    #[test]
    fn byte_extracts_most_significant_first() {
        let x = DataWord::from_u64(0x0102);
        assert_eq!(x.byte(DataWord::from_u64(31)), DataWord::from_u64(0x02));
        assert_eq!(x.byte(DataWord::from_u64(30)), DataWord::from_u64(0x01));
        assert_eq!(x.byte(DataWord::from_u64(32)), DataWord::ZERO);
    }

    #[test]
    fn shift_by_256_or_more_saturates() {
        let x = DataWord::from_u64(1);
        assert_eq!(x.shl(DataWord::from_u64(256)), DataWord::ZERO);
        assert_eq!(x.shr(DataWord::from_u64(256)), DataWord::ZERO);
    }

    #[test]
    fn sar_sign_extends_negative_values() {
        let negative_one = DataWord(U256::max_value());
        assert_eq!(negative_one.sar(DataWord::from_u64(4)), negative_one);
        assert_eq!(
            negative_one.sar(DataWord::from_u64(256)),
            DataWord(U256::max_value())
        );
    }

    #[test]
    fn addmod_mulmod_match_reference() {
        let a = DataWord::from_u64(10);
        let b = DataWord::from_u64(10);
        let m = DataWord::from_u64(8);
        assert_eq!(a.addmod(b, m), DataWord::from_u64(4));
        assert_eq!(a.mulmod(b, m), DataWord::from_u64(4));
        assert_eq!(a.addmod(b, DataWord::ZERO), DataWord::ZERO);
    }

    #[test]
    fn address_round_trips() {
        let address = Address::from_low_u64_be(0x1234);
        let word = DataWord::from_address(address);
        assert_eq!(word.as_address(), address);
    }

    #[test]
    fn comparisons_handle_sign() {
        let neg_one = DataWord(U256::max_value());
        let one = DataWord::ONE;
        assert!(neg_one.slt(one));
        assert!(one.sgt(neg_one));
        // unsigned: max_value is the largest word, so GT disagrees with SGT here.
        assert!(!one.gt(neg_one));
    }
}
