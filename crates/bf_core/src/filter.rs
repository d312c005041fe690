//! Fixed-size Bloom filter with pluggable 64-bit hash functions.
//!
//! Every operation is total: empty input, a zero-length bit array and an
//! empty hasher list are all accepted. Digests are computed before the lock
//! is taken; the lock only guards the bit array.
use crate::bits::BitArray;
use crate::consts::HasherSet;
use crate::hashers::{default_hashers, xxh3_set, BoxedHashFn};
use crate::utils::round_up_to_byte;
use parking_lot::RwLock;
use serde::Serialize;
use std::fmt;

pub struct Filter {
    bits: RwLock<BitArray>,
    hashers: Vec<BoxedHashFn>,
    hasher_set: HasherSet,
}

/// Point-in-time view of a filter's occupancy.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FilterStats {
    pub bit_len: usize,
    pub hasher_count: usize,
    pub bits_set: usize,
    pub fill_ratio: f64,
}

impl Filter {
    /// `size` bits rounded up to a multiple of 8, default hash functions.
    pub fn new_default(size: usize) -> Self {
        Self::from_parts(BitArray::zeroed(round_up_to_byte(size)), default_hashers(), HasherSet::Default)
    }

    /// `size` bits rounded up to a multiple of 8, `k` xxh3 hash functions seeded 0..k.
    pub fn new_xxh3(size: usize, k: usize) -> Self {
        Self::from_parts(BitArray::zeroed(round_up_to_byte(size)), xxh3_set(k), HasherSet::Xxh3)
    }

    /// `size` bits rounded up to a multiple of 8, caller-supplied hash functions.
    /// With no hash functions nothing is ever reported present.
    pub fn new_custom(size: usize, hashers: Vec<BoxedHashFn>) -> Self {
        Self::from_parts(BitArray::zeroed(round_up_to_byte(size)), hashers, HasherSet::Custom)
    }

    /// Rebuild a filter from `marshal_binary` output with caller-supplied hash functions.
    pub fn from_binary(data: &[u8], hashers: Vec<BoxedHashFn>) -> Self {
        Self::from_parts(BitArray::from_bytes(data.to_vec()), hashers, HasherSet::Custom)
    }

    /// `hashers` must be the family `hasher_set` names, unless it is `Custom`.
    pub(crate) fn from_parts(bits: BitArray, hashers: Vec<BoxedHashFn>, hasher_set: HasherSet) -> Self {
        Self { bits: RwLock::new(bits), hashers, hasher_set }
    }

    fn sums(&self, data: &[u8]) -> Vec<u64> {
        self.hashers.iter().map(|h| h.digest(data)).collect()
    }

    #[inline]
    fn index(sum: u64, len: usize) -> usize {
        (sum % len as u64) as usize
    }

    pub fn insert(&self, data: &[u8]) {
        let sums = self.sums(data);
        let mut bits = self.bits.write();
        let len = bits.len();
        if len == 0 { return; }
        for sum in sums {
            bits.set(Self::index(sum, len));
        }
    }

    /// `false` means definitely absent; `true` means possibly present.
    pub fn search(&self, data: &[u8]) -> bool {
        if self.hashers.is_empty() { return false; }
        let sums = self.sums(data);
        let bits = self.bits.read();
        let len = bits.len();
        if len == 0 { return false; }
        sums.iter().all(|&sum| bits.get(Self::index(sum, len)))
    }

    /// One '0'/'1' per bit, in index order.
    pub fn to_bit_string(&self) -> String {
        self.bits.read().to_bit_string()
    }

    /// Bits packed MSB-first, `len() / 8` bytes.
    pub fn marshal_binary(&self) -> Vec<u8> {
        self.bits.read().as_bytes().to_vec()
    }

    /// Replaces the bit array with `data.len() * 8` bits. Hash functions are kept.
    pub fn unmarshal_binary(&self, data: &[u8]) {
        *self.bits.write() = BitArray::from_bytes(data.to_vec());
    }

    /// Bit-array length.
    pub fn len(&self) -> usize { self.bits.read().len() }

    pub fn is_empty(&self) -> bool { self.bits.read().is_empty() }

    pub fn hasher_count(&self) -> usize { self.hashers.len() }

    /// Which hash-function family this filter was built with.
    pub fn hasher_set(&self) -> HasherSet { self.hasher_set }

    pub fn stats(&self) -> FilterStats {
        let bits = self.bits.read();
        let bit_len = bits.len();
        let bits_set = bits.count_ones();
        let fill_ratio = if bit_len > 0 { bits_set as f64 / bit_len as f64 } else { 0.0 };
        FilterStats { bit_len, hasher_count: self.hashers.len(), bits_set, fill_ratio }
    }

    /// Chance that a never-inserted item tests positive right now.
    pub fn estimated_fpp(&self) -> f64 {
        if self.hashers.is_empty() { return 0.0; }
        let s = self.stats();
        s.fill_ratio.powi(s.hasher_count as i32)
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_bit_string())
    }
}

impl fmt::Debug for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = self.stats();
        f.debug_struct("Filter")
            .field("bit_len", &s.bit_len)
            .field("hasher_set", &self.hasher_set)
            .field("hasher_count", &s.hasher_count)
            .field("bits_set", &s.bits_set)
            .finish()
    }
}
