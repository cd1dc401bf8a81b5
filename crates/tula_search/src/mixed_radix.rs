//! Mixed-radix Cartesian-product indexing.
//!
//! Maps a flat index in `0..len` to one digit per position, the first
//! position most significant. Any number of positions is supported, so the
//! product is never written as nested loops.

/// Digit decoder for a fixed list of radices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MixedRadix {
    radices: Vec<usize>,
    len: usize,
}

impl MixedRadix {
    /// `None` if any radix is zero or the product overflows `usize`.
    ///
    /// An empty radix list has exactly one (empty) combination.
    pub fn new(radices: Vec<usize>) -> Option<Self> {
        let mut len = 1usize;
        for &r in &radices {
            if r == 0 {
                return None;
            }
            len = len.checked_mul(r)?;
        }
        Some(Self { radices, len })
    }

    /// Uniform radix over `positions` positions.
    pub fn uniform(radix: usize, positions: usize) -> Option<Self> {
        Self::new(vec![radix; positions])
    }

    /// Number of combinations.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn radices(&self) -> &[usize] {
        &self.radices
    }

    /// Write the digits of `index` into `out`, first position most significant.
    ///
    /// Returns `false` (leaving `out` untouched) if `index` is out of range
    /// or `out` has the wrong length.
    pub fn decode_into(&self, index: usize, out: &mut [usize]) -> bool {
        if index >= self.len || out.len() != self.radices.len() {
            return false;
        }
        let mut rest = index;
        for (slot, &radix) in out.iter_mut().zip(&self.radices).rev() {
            *slot = rest % radix;
            rest /= radix;
        }
        true
    }

    /// Digits of `index`, or `None` if out of range.
    pub fn decode(&self, index: usize) -> Option<Vec<usize>> {
        let mut out = vec![0; self.radices.len()];
        self.decode_into(index, &mut out).then_some(out)
    }

    /// Inverse of [`decode`](Self::decode).
    pub fn encode(&self, digits: &[usize]) -> Option<usize> {
        if digits.len() != self.radices.len() {
            return None;
        }
        let mut index = 0usize;
        for (&d, &radix) in digits.iter().zip(&self.radices) {
            if d >= radix {
                return None;
            }
            index = index * radix + d;
        }
        Some(index)
    }
}
