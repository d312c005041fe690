// crates/bf_core/src/consts.rs

use core::mem::size_of;

pub const MAGIC_SNAP: &[u8;4] = b"BFSN";
pub const VERSION: u16 = 1;

pub const HDR_SIZE: usize = 32;

/// Hash function family a snapshot was written with.
#[repr(u16)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HasherSet {
    Custom  = 0, // caller-supplied, cannot be rebuilt from the file alone
    Default = 1, // fnv1, fnv1a, crc64-iso, crc64-ecma
    Xxh3    = 2, // xxh3 seeded 0..k
}

impl HasherSet {
    pub fn from_u16(tag: u16) -> Option<Self> {
        match tag {
            0 => Some(Self::Custom),
            1 => Some(Self::Default),
            2 => Some(Self::Xxh3),
            _ => None,
        }
    }
}

const _: () = { assert!(size_of::<[u8;4]>() + 2 + 2 + 4 + 8 + 4 + 4 + 4 == HDR_SIZE); };
