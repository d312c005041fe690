//! Pluggable 64-bit hash functions.
//!
//! A hash function is anything that turns a byte slice into a 64-bit digest
//! without keeping state between calls. Every `BuildHasher` qualifies:
//! `build_hasher` yields a fresh zero-state hasher, `write` accumulates the
//! input and `finish` extracts the digest.
//!
//! The default set matches the classic four-function layout (FNV-1, FNV-1a,
//! CRC-64/ISO, CRC-64/ECMA) so bit positions stay stable across releases.

use crc::{Crc, CRC_64_GO_ISO, CRC_64_XZ};
use std::hash::{BuildHasher, BuildHasherDefault, Hasher};

pub trait HashFn: Send + Sync {
    fn digest(&self, data: &[u8]) -> u64;
}

impl<B> HashFn for B
where
    B: BuildHasher + Send + Sync,
{
    #[inline]
    fn digest(&self, data: &[u8]) -> u64 {
        let mut h = self.build_hasher();
        h.write(data);
        h.finish()
    }
}

pub type BoxedHashFn = Box<dyn HashFn>;

const FNV_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

/// FNV-1 (multiply, then xor). The `fnv` crate only ships FNV-1a.
#[derive(Clone, Copy, Debug)]
pub struct Fnv1Hasher(u64);

impl Default for Fnv1Hasher {
    fn default() -> Self { Self(FNV_OFFSET) }
}

impl Hasher for Fnv1Hasher {
    #[inline]
    fn write(&mut self, bytes: &[u8]) {
        for &b in bytes {
            self.0 = self.0.wrapping_mul(FNV_PRIME);
            self.0 ^= b as u64;
        }
    }
    #[inline]
    fn finish(&self) -> u64 { self.0 }
}

pub type Fnv1 = BuildHasherDefault<Fnv1Hasher>;
pub type Fnv1a = fnv::FnvBuildHasher;

static CRC64_ISO: Crc<u64> = Crc::<u64>::new(&CRC_64_GO_ISO);
static CRC64_ECMA: Crc<u64> = Crc::<u64>::new(&CRC_64_XZ);

/// Reflected CRC-64 with all-ones init and xor-out.
#[derive(Clone, Copy)]
pub struct Crc64 {
    algo: &'static Crc<u64>,
}

impl Crc64 {
    pub fn iso() -> Self { Self { algo: &CRC64_ISO } }
    pub fn ecma() -> Self { Self { algo: &CRC64_ECMA } }
}

impl HashFn for Crc64 {
    #[inline]
    fn digest(&self, data: &[u8]) -> u64 { self.algo.checksum(data) }
}

/// xxh3-64 with a fixed seed; distinct seeds give independent functions.
#[derive(Clone, Copy, Debug)]
pub struct Xxh3Seeded {
    seed: u64,
}

impl Xxh3Seeded {
    pub fn new(seed: u64) -> Self { Self { seed } }
}

impl HashFn for Xxh3Seeded {
    #[inline]
    fn digest(&self, data: &[u8]) -> u64 {
        xxhash_rust::xxh3::xxh3_64_with_seed(data, self.seed)
    }
}

/// First 8 bytes (LE) of the blake3 digest.
#[derive(Clone, Copy, Debug, Default)]
pub struct Blake3Hash;

impl HashFn for Blake3Hash {
    fn digest(&self, data: &[u8]) -> u64 {
        let h = blake3::hash(data);
        let mut lo = [0u8; 8];
        lo.copy_from_slice(&h.as_bytes()[..8]);
        u64::from_le_bytes(lo)
    }
}

/// FNV-1, FNV-1a, CRC-64/ISO, CRC-64/ECMA, in that order.
pub fn default_hashers() -> Vec<BoxedHashFn> {
    vec![
        Box::new(Fnv1::default()) as BoxedHashFn,
        Box::new(Fnv1a::default()),
        Box::new(Crc64::iso()),
        Box::new(Crc64::ecma()),
    ]
}

/// `k` xxh3 functions seeded `0..k`.
pub fn xxh3_set(k: usize) -> Vec<BoxedHashFn> {
    (0..k as u64)
        .map(|seed| Box::new(Xxh3Seeded::new(seed)) as BoxedHashFn)
        .collect()
}
