//! Snapshot file format & IO
//!
//! Header (LE, 32 bytes):
//!   magic[4]       = "BFSN"
//!   version[2]     = 1
//!   hasher_set[2]  = HasherSet (0=custom, 1=default, 2=xxh3)
//!   hasher_cnt[4]  = number of hash functions the bits were built with
//!   bit_len[8]     = N (always payload_len * 8)
//!   payload_len[4] = N / 8
//!   payload_crc[4] = crc32(payload)
//!   rsv[4]         = 0
//!
//! Payload: `Filter::marshal_binary()` bytes, MSB-first.

use crate::bits::BitArray;
use crate::consts::{HasherSet, HDR_SIZE, MAGIC_SNAP, VERSION};
use crate::errors::{BfError, Result};
use crate::filter::Filter;
use crate::hashers::{default_hashers, xxh3_set, BoxedHashFn};
use crate::utils::{crc32, read_u16, read_u32, read_u64, write_u16, write_u32, write_u64};
use memmap2::Mmap;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

fn parent_dir(path: &Path) -> &Path {
    match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    }
}

#[cfg(unix)]
fn fsync_dir(path: &Path) -> std::io::Result<()> {
    use std::os::unix::fs::OpenOptionsExt;
    let f = std::fs::OpenOptions::new().read(true).custom_flags(libc::O_DIRECTORY).open(parent_dir(path))?;
    f.sync_all()
}
#[cfg(not(unix))]
fn fsync_dir(_path: &Path) -> std::io::Result<()> { Ok(()) }

fn encode_header(set: HasherSet, hasher_count: usize, payload: &[u8]) -> Result<Vec<u8>> {
    let payload_len = u32::try_from(payload.len()).map_err(|_| BfError::TooLarge(payload.len() as u64))?;
    let hasher_count = u32::try_from(hasher_count).map_err(|_| BfError::TooLarge(hasher_count as u64))?;
    let mut hdr = Vec::with_capacity(HDR_SIZE);
    hdr.extend_from_slice(MAGIC_SNAP);
    write_u16(&mut hdr, VERSION)?;
    write_u16(&mut hdr, set as u16)?;
    write_u32(&mut hdr, hasher_count)?;
    write_u64(&mut hdr, payload.len() as u64 * 8)?;
    write_u32(&mut hdr, payload_len)?;
    write_u32(&mut hdr, crc32(payload))?;
    write_u32(&mut hdr, 0)?;
    Ok(hdr)
}

/// Write `filter` to `path`: temp file in the same directory, fsync, then atomic rename.
/// The header records the filter's own hasher set.
pub fn write_snapshot(path: impl AsRef<Path>, filter: &Filter) -> Result<PathBuf> {
    let path_final = path.as_ref().to_path_buf();
    let set = filter.hasher_set();
    let payload = filter.marshal_binary();
    let hdr = encode_header(set, filter.hasher_count(), &payload)?;

    let mut tmp = tempfile::Builder::new().prefix("bf_snap_").tempfile_in(parent_dir(&path_final))?;
    {
        let f = tmp.as_file_mut();
        f.write_all(&hdr)?;
        f.write_all(&payload)?;
        f.sync_all()?;
    }
    tmp.persist(&path_final)?;
    let _ = fsync_dir(&path_final);
    tracing::debug!(
        path = %path_final.display(),
        bits = payload.len() * 8,
        hashers = filter.hasher_count(),
        ?set,
        "snapshot written"
    );
    Ok(path_final)
}

/// Validated, memory-mapped snapshot.
pub struct SnapshotReader {
    _f: File,
    mmap: Mmap,
    hasher_set: HasherSet,
    hasher_count: u32,
    bit_len: u64,
}

impl SnapshotReader {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let f = File::open(path)?;
        let have = file_len(f.metadata()?.len())?;
        if have < HDR_SIZE {
            tracing::warn!(path = %path.display(), have, "snapshot shorter than header");
            return Err(BfError::Truncated { need: HDR_SIZE, have });
        }
        let mmap = unsafe { Mmap::map(&f)? };
        if &mmap[0..4] != MAGIC_SNAP {
            tracing::warn!(path = %path.display(), "bad snapshot magic");
            return Err(BfError::BadHeader);
        }
        let mut cur = &mmap[4..HDR_SIZE];
        let ver = read_u16(&mut cur)?;
        if ver != VERSION { return Err(BfError::BadHeader); }
        let tag = read_u16(&mut cur)?;
        let hasher_set = HasherSet::from_u16(tag).ok_or(BfError::Unsupported(tag))?;
        let hasher_count = read_u32(&mut cur)?;
        let bit_len = read_u64(&mut cur)?;
        let payload_len = read_u32(&mut cur)? as usize;
        let want_crc = read_u32(&mut cur)?;
        if bit_len != payload_len as u64 * 8 { return Err(BfError::BadHeader); }

        let need = HDR_SIZE + payload_len;
        if mmap.len() < need {
            tracing::warn!(path = %path.display(), need, have = mmap.len(), "snapshot payload truncated");
            return Err(BfError::Truncated { need, have: mmap.len() });
        }
        if crc32(&mmap[HDR_SIZE..need]) != want_crc {
            tracing::warn!(path = %path.display(), "snapshot checksum mismatch");
            return Err(BfError::Corrupt);
        }
        tracing::debug!(path = %path.display(), bit_len, hasher_count, ?hasher_set, "snapshot opened");
        Ok(Self { _f: f, mmap, hasher_set, hasher_count, bit_len })
    }

    pub fn hasher_set(&self) -> HasherSet { self.hasher_set }
    pub fn hasher_count(&self) -> u32 { self.hasher_count }
    pub fn bit_len(&self) -> u64 { self.bit_len }

    /// Packed bits, exactly as `Filter::marshal_binary` produced them.
    pub fn payload(&self) -> &[u8] {
        &self.mmap[HDR_SIZE..HDR_SIZE + (self.bit_len / 8) as usize]
    }

    /// Rebuild the filter with the hash functions named in the header.
    pub fn into_filter(self) -> Result<Filter> {
        let hashers = match self.hasher_set {
            HasherSet::Default => default_hashers(),
            HasherSet::Xxh3 => xxh3_set(self.hasher_count as usize),
            HasherSet::Custom => return Err(BfError::CustomHashers),
        };
        self.check_count(&hashers)?;
        let bits = BitArray::from_bytes(self.payload().to_vec());
        Ok(Filter::from_parts(bits, hashers, self.hasher_set))
    }

    /// Rebuild the filter with caller-supplied hash functions (same count and order as at write time).
    /// The result is a custom-set filter whatever the header says.
    pub fn into_filter_with(self, hashers: Vec<BoxedHashFn>) -> Result<Filter> {
        self.check_count(&hashers)?;
        Ok(Filter::from_binary(self.payload(), hashers))
    }

    fn check_count(&self, hashers: &[BoxedHashFn]) -> Result<()> {
        if hashers.len() != self.hasher_count as usize {
            return Err(BfError::HasherCount { expected: self.hasher_count, actual: hashers.len() });
        }
        Ok(())
    }
}

fn file_len(len: u64) -> Result<usize> {
    usize::try_from(len).map_err(|_| BfError::TooLarge(len))
}

/// Open `path` and rebuild its filter; fails for custom hasher sets.
pub fn load_snapshot(path: impl AsRef<Path>) -> Result<Filter> {
    SnapshotReader::open(path)?.into_filter()
}
