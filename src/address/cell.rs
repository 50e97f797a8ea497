//! Just enough of the TON cell model to hash a wallet StateInit: ordinary
//! (level 0) cells, their bit strings, and their representation hashes.

use sha2::{Digest, Sha256};

pub const MAX_BITS: usize = 1023;
pub const MAX_REFS: usize = 4;

/// A child as its parent sees it: representation hash and depth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellRef {
    pub hash: [u8; 32],
    pub depth: u16,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    /// Bit string, MSB first; bits past `bit_len` are zero.
    data: Vec<u8>,
    bit_len: usize,
    refs: Vec<CellRef>,
}

impl Cell {
    pub fn empty() -> Self {
        Self {
            data: Vec::new(),
            bit_len: 0,
            refs: Vec::new(),
        }
    }

    /// Rebuilds a cell from serialized (completion-tagged) data, as found in
    /// a bag of cells. `d2` is the second descriptor byte.
    pub fn from_padded(mut data: Vec<u8>, d2: u8, refs: Vec<CellRef>) -> Option<Self> {
        let full = d2 % 2 == 0;
        if data.len() != (usize::from(d2) + 1) / 2 || refs.len() > MAX_REFS {
            return None;
        }
        let bit_len = if full {
            data.len() * 8
        } else {
            let last = data.last_mut()?;
            if *last == 0 {
                return None;
            }
            let tz = last.trailing_zeros() as usize;
            *last &= !(1u8 << tz);
            (data.len() - 1) * 8 + (7 - tz)
        };
        if bit_len > MAX_BITS {
            return None;
        }
        Some(Self {
            data,
            bit_len,
            refs,
        })
    }

    pub fn bit_len(&self) -> usize {
        self.bit_len
    }

    pub fn refs(&self) -> &[CellRef] {
        &self.refs
    }

    fn descriptors(&self) -> [u8; 2] {
        let d1 = self.refs.len() as u8;
        let d2 = (self.bit_len / 8 + (self.bit_len + 7) / 8) as u8;
        [d1, d2]
    }

    fn padded_data(&self) -> Vec<u8> {
        let mut out = self.data.clone();
        if self.bit_len % 8 != 0 {
            out[self.bit_len / 8] |= 0x80 >> (self.bit_len % 8);
        }
        out
    }

    pub fn depth(&self) -> u16 {
        self.refs
            .iter()
            .map(|r| r.depth + 1)
            .max()
            .unwrap_or(0)
    }

    /// sha256(d1 ‖ d2 ‖ padded data ‖ child depths ‖ child hashes)
    pub fn hash(&self) -> [u8; 32] {
        let mut h = Sha256::new();
        h.update(self.descriptors());
        h.update(self.padded_data());
        for r in &self.refs {
            h.update(r.depth.to_be_bytes());
        }
        for r in &self.refs {
            h.update(r.hash);
        }
        h.finalize().into()
    }

    pub fn to_ref(&self) -> CellRef {
        CellRef {
            hash: self.hash(),
            depth: self.depth(),
        }
    }
}

/// Append-only bit writer. Layouts used here are fixed and far below the
/// cell limits; overflow is a programming error.
#[derive(Debug, Default)]
pub struct CellBuilder {
    data: Vec<u8>,
    bit_len: usize,
    refs: Vec<CellRef>,
}

impl CellBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn store_bit(&mut self, bit: bool) -> &mut Self {
        debug_assert!(self.bit_len < MAX_BITS, "cell overflow");
        if self.bit_len % 8 == 0 {
            self.data.push(0);
        }
        if bit {
            self.data[self.bit_len / 8] |= 0x80 >> (self.bit_len % 8);
        }
        self.bit_len += 1;
        self
    }

    pub fn store_bits(&mut self, bits: &[bool]) -> &mut Self {
        for b in bits {
            self.store_bit(*b);
        }
        self
    }

    pub fn store_u32(&mut self, v: u32) -> &mut Self {
        self.store_bytes(&v.to_be_bytes())
    }

    pub fn store_bytes(&mut self, bytes: &[u8]) -> &mut Self {
        for byte in bytes {
            for i in (0..8).rev() {
                self.store_bit((byte >> i) & 1 == 1);
            }
        }
        self
    }

    pub fn store_ref(&mut self, r: CellRef) -> &mut Self {
        debug_assert!(self.refs.len() < MAX_REFS, "too many refs");
        self.refs.push(r);
        self
    }

    pub fn build(&self) -> Cell {
        Cell {
            data: self.data.clone(),
            bit_len: self.bit_len,
            refs: self.refs.clone(),
        }
    }
}
