//! Bag-of-cells reader for wallet contract code.
//!
//! Only what published wallet code needs: one root, ordinary level-0 cells,
//! optional index and CRC32C trailer. Returns the root's hash and depth.

use thiserror::Error;

use super::cell::{Cell, CellRef};

const MAGIC: [u8; 4] = [0xb5, 0xee, 0x9c, 0x72];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BocError {
    #[error("not a bag of cells (bad magic)")]
    BadMagic,
    #[error("bag of cells is truncated")]
    Truncated,
    #[error("unsupported size fields: ref size {size}, offset size {off_size}")]
    BadHeader { size: usize, off_size: usize },
    #[error("expected exactly one root, found {0}")]
    RootCount(usize),
    #[error("cell #{0} is exotic, carries levels or stored hashes")]
    UnsupportedCell(usize),
    #[error("cell #{0} has malformed data or descriptors")]
    MalformedCell(usize),
    #[error("cell #{cell} references #{target}, which is not a later cell")]
    BadReference { cell: usize, target: usize },
    #[error("crc32c mismatch: stored {stored:#010x}, computed {computed:#010x}")]
    BadCrc { stored: u32, computed: u32 },
}

struct Reader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    fn take(&mut self, n: usize) -> Result<&'a [u8], BocError> {
        let end = self.pos.checked_add(n).ok_or(BocError::Truncated)?;
        let out = self.buf.get(self.pos..end).ok_or(BocError::Truncated)?;
        self.pos = end;
        Ok(out)
    }

    fn remaining(&self) -> usize {
        self.buf.len().saturating_sub(self.pos)
    }

    fn byte(&mut self) -> Result<u8, BocError> {
        Ok(self.take(1)?[0])
    }

    fn uint(&mut self, n: usize) -> Result<usize, BocError> {
        Ok(self
            .take(n)?
            .iter()
            .fold(0usize, |acc, b| (acc << 8) | usize::from(*b)))
    }
}

/// Parses a serialized bag of cells and returns its root cell's hash/depth.
pub fn root_ref(boc: &[u8]) -> Result<CellRef, BocError> {
    let mut r = Reader { buf: boc, pos: 0 };
    if r.take(4)? != MAGIC {
        return Err(BocError::BadMagic);
    }
    let flags = r.byte()?;
    let has_idx = flags & 0x80 != 0;
    let has_crc = flags & 0x40 != 0;
    let size = usize::from(flags & 0x07);
    let off_size = usize::from(r.byte()?);
    if !(1..=4).contains(&size) || !(1..=8).contains(&off_size) {
        return Err(BocError::BadHeader { size, off_size });
    }

    let cell_count = r.uint(size)?;
    let root_count = r.uint(size)?;
    let _absent = r.uint(size)?;
    let _total_cells_size = r.uint(off_size)?;
    if root_count != 1 {
        return Err(BocError::RootCount(root_count));
    }
    let root = r.uint(size)?;
    // every cell carries at least its two descriptor bytes
    if cell_count > r.remaining() / 2 {
        return Err(BocError::Truncated);
    }
    if has_idx {
        r.take(cell_count.checked_mul(off_size).ok_or(BocError::Truncated)?)?;
    }

    let mut raw = Vec::with_capacity(cell_count);
    for i in 0..cell_count {
        let d1 = r.byte()?;
        let d2 = r.byte()?;
        // exotic (8), stored hashes (16), level mask (32..)
        if d1 & 0xf8 != 0 {
            return Err(BocError::UnsupportedCell(i));
        }
        let ref_count = usize::from(d1 & 0x07);
        let data = r.take((usize::from(d2) + 1) / 2)?.to_vec();
        let mut refs = Vec::with_capacity(ref_count);
        for _ in 0..ref_count {
            let target = r.uint(size)?;
            if target <= i || target >= cell_count {
                return Err(BocError::BadReference { cell: i, target });
            }
            refs.push(target);
        }
        raw.push((d2, data, refs));
    }

    if has_crc {
        let body_end = r.pos;
        let stored = r.take(4)?;
        let stored = u32::from_le_bytes([stored[0], stored[1], stored[2], stored[3]]);
        let computed = crc32c(&boc[..body_end]);
        if stored != computed {
            return Err(BocError::BadCrc { stored, computed });
        }
    }

    // refs always point forward, so hash back to front
    let mut done: Vec<Option<CellRef>> = vec![None; cell_count];
    for (i, (d2, data, refs)) in raw.into_iter().enumerate().rev() {
        let children = refs
            .iter()
            .map(|t| done[*t].ok_or(BocError::BadReference { cell: i, target: *t }))
            .collect::<Result<Vec<_>, _>>()?;
        let cell = Cell::from_padded(data, d2, children).ok_or(BocError::MalformedCell(i))?;
        done[i] = Some(cell.to_ref());
    }
    done.get(root)
        .copied()
        .flatten()
        .ok_or(BocError::BadReference { cell: root, target: root })
}

/// CRC-32C (Castagnoli), reflected, as used by the BOC trailer.
fn crc32c(data: &[u8]) -> u32 {
    let mut crc = !0u32;
    for byte in data {
        crc ^= u32::from(*byte);
        for _ in 0..8 {
            crc = if crc & 1 != 0 { (crc >> 1) ^ 0x82f6_3b78 } else { crc >> 1 };
        }
    }
    !crc
}
