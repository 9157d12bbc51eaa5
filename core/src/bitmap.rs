//! Fixed-width document bitmaps. Bit `i` stands for document id `i + 1`.

use bit_vec::BitVec;
use std::fmt;
use std::ops::{BitAnd, BitOr, Not};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Bitmap {
    bits: BitVec,
}

impl Bitmap {
    pub fn zeros(width: usize) -> Self {
        Self { bits: BitVec::from_elem(width, false) }
    }

    pub fn from_bits(bits: &[bool]) -> Self {
        bits.iter().copied().collect()
    }

    pub fn width(&self) -> usize {
        self.bits.len()
    }

    /// Out-of-range positions read as unset.
    pub fn get(&self, pos: usize) -> bool {
        self.bits.get(pos).unwrap_or(false)
    }

    /// Panics if `pos >= width`.
    pub fn set(&mut self, pos: usize, value: bool) {
        self.bits.set(pos, value);
    }

    pub fn count_ones(&self) -> usize {
        self.ones().count()
    }

    pub fn none(&self) -> bool {
        self.bits.none()
    }

    /// Set positions, low to high.
    pub fn ones(&self) -> impl Iterator<Item = usize> + '_ {
        self.bits.iter().enumerate().filter_map(|(pos, bit)| bit.then_some(pos))
    }

    pub fn and(&self, other: &Bitmap) -> Bitmap {
        debug_assert_eq!(self.width(), other.width(), "bitmap widths differ");
        let mut bits = self.bits.clone();
        bits.and(&other.bits);
        Bitmap { bits }
    }

    pub fn or(&self, other: &Bitmap) -> Bitmap {
        debug_assert_eq!(self.width(), other.width(), "bitmap widths differ");
        let mut bits = self.bits.clone();
        bits.or(&other.bits);
        Bitmap { bits }
    }

    pub fn negate(&self) -> Bitmap {
        self.bits.iter().map(|bit| !bit).collect()
    }
}

impl FromIterator<bool> for Bitmap {
    fn from_iter<I: IntoIterator<Item = bool>>(iter: I) -> Self {
        Self { bits: iter.into_iter().collect() }
    }
}

impl BitAnd for &Bitmap {
    type Output = Bitmap;

    fn bitand(self, rhs: &Bitmap) -> Bitmap {
        self.and(rhs)
    }
}

impl BitOr for &Bitmap {
    type Output = Bitmap;

    fn bitor(self, rhs: &Bitmap) -> Bitmap {
        self.or(rhs)
    }
}

impl Not for &Bitmap {
    type Output = Bitmap;

    fn not(self) -> Bitmap {
        self.negate()
    }
}

impl Not for Bitmap {
    type Output = Bitmap;

    fn not(self) -> Bitmap {
        self.negate()
    }
}

impl fmt::Display for Bitmap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Bitmap[")?;
        for (pos, bit) in self.bits.iter().enumerate() {
            if pos > 0 {
                f.write_str(", ")?;
            }
            f.write_str(if bit { "1" } else { "0" })?;
        }
        f.write_str("]")
    }
}
