//! Packed bit array, 8 bits per byte, most-significant bit first.
//!
//! Bit `i` lives in byte `i / 8` under mask `0x80 >> (i % 8)`, which is
//! exactly the wire layout of `Filter::marshal_binary`.

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BitArray {
    bytes: Vec<u8>,
}

impl BitArray {
    /// All-zero array of `len_bits` bits; `len_bits` must be a multiple of 8.
    pub fn zeroed(len_bits: usize) -> Self {
        debug_assert_eq!(len_bits % 8, 0);
        Self { bytes: vec![0u8; len_bits / 8] }
    }

    pub fn from_bytes(bytes: Vec<u8>) -> Self { Self { bytes } }

    #[inline]
    pub fn len(&self) -> usize { self.bytes.len() * 8 }

    #[inline]
    pub fn is_empty(&self) -> bool { self.bytes.is_empty() }

    #[inline]
    fn mask(i: usize) -> u8 { 0x80u8 >> (i % 8) }

    #[inline]
    pub fn get(&self, i: usize) -> bool {
        self.bytes[i / 8] & Self::mask(i) != 0
    }

    #[inline]
    pub fn set(&mut self, i: usize) {
        self.bytes[i / 8] |= Self::mask(i);
    }

    pub fn count_ones(&self) -> usize {
        self.bytes.iter().map(|b| b.count_ones() as usize).sum()
    }

    pub fn as_bytes(&self) -> &[u8] { &self.bytes }

    pub fn to_bit_string(&self) -> String {
        let mut s = String::with_capacity(self.len());
        for b in &self.bytes {
            for j in 0..8 {
                s.push(if (b << j) & 0x80 == 0x80 { '1' } else { '0' });
            }
        }
        s
    }
}
