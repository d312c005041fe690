use byteorder::{LittleEndian as LE, ReadBytesExt, WriteBytesExt};
use std::io::{self, Read, Write};

pub fn crc32(data: &[u8]) -> u32 { crc32fast::hash(data) }

/// Smallest multiple of 8 that is >= `bits` (0 stays 0).
#[inline]
pub fn round_up_to_byte(bits: usize) -> usize { bits.div_ceil(8) * 8 }

pub fn write_u64<W: Write>(w: &mut W, v: u64) -> io::Result<()> { w.write_u64::<LE>(v) }
pub fn write_u32<W: Write>(w: &mut W, v: u32) -> io::Result<()> { w.write_u32::<LE>(v) }
pub fn write_u16<W: Write>(w: &mut W, v: u16) -> io::Result<()> { w.write_u16::<LE>(v) }
pub fn read_u64<R: Read>(r: &mut R) -> io::Result<u64> { r.read_u64::<LE>() }
pub fn read_u32<R: Read>(r: &mut R) -> io::Result<u32> { r.read_u32::<LE>() }
pub fn read_u16<R: Read>(r: &mut R) -> io::Result<u16> { r.read_u16::<LE>() }

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounds_to_whole_bytes() {
        assert_eq!(round_up_to_byte(0), 0);
        assert_eq!(round_up_to_byte(1), 8);
        assert_eq!(round_up_to_byte(10), 16);
        assert_eq!(round_up_to_byte(100), 104);
        assert_eq!(round_up_to_byte(104), 104);
    }

    #[test]
    fn le_helpers_roundtrip() {
        let mut buf = Vec::new();
        write_u16(&mut buf, 0xBEEF).unwrap();
        write_u32(&mut buf, 7).unwrap();
        write_u64(&mut buf, u64::MAX - 1).unwrap();
        assert_eq!(&buf[..2], &[0xEF, 0xBE]);
        let mut cur = &buf[..];
        assert_eq!(read_u16(&mut cur).unwrap(), 0xBEEF);
        assert_eq!(read_u32(&mut cur).unwrap(), 7);
        assert_eq!(read_u64(&mut cur).unwrap(), u64::MAX - 1);
        assert!(read_u16(&mut cur).is_err());
    }
}
