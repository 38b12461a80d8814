//! Fixed-capacity dense bit vector backed by 64-bit words.

use std::fmt;
use std::hash::{Hash, Hasher};

use crate::container::SetContainer;
use crate::error::BitSetError;
use crate::parallel::ParallelExecutor;

/// Width of one storage word in bits.
pub const WORD_BITS: u64 = u64::BITS as u64;

/// A dense vector of `word_count * 64` bits. Never resized after construction.
///
/// Bit `i` lives in word `i / 64` at position `i % 64`.
#[derive(Debug, Clone)]
pub struct WordVector {
    words: Box<[u64]>,
    exec: ParallelExecutor,
}

impl Default for WordVector {
    /// A single-word (64-bit) vector.
    fn default() -> Self {
        Self::new(1)
    }
}

impl WordVector {
    pub fn new(word_count: usize) -> Self {
        Self {
            words: vec![0u64; word_count].into_boxed_slice(),
            exec: ParallelExecutor::default(),
        }
    }

    /// Copy `words` into a new vector; the slice is not retained.
    pub fn from_words(words: &[u64]) -> Self {
        Self {
            words: words.into(),
            exec: ParallelExecutor::default(),
        }
    }

    /// Use `exec` for word-level work on this vector and on vectors derived from it.
    pub fn with_executor(mut self, exec: ParallelExecutor) -> Self {
        self.set_executor(exec);
        self
    }

    pub fn set_executor(&mut self, exec: ParallelExecutor) {
        self.exec = exec;
    }

    pub fn words(&self) -> &[u64] {
        &self.words
    }

    /// True iff every word is zero.
    pub fn all_zero(&self) -> bool {
        self.exec.find(self.words.iter(), |w| **w != 0).is_none()
    }

    pub fn try_get(&self, index: u64) -> Result<bool, BitSetError> {
        self.check_index(index)?;
        Ok(self.get(index))
    }

    pub fn try_set(&mut self, index: u64, value: bool) -> Result<(), BitSetError> {
        self.check_index(index)?;
        self.set(index, value);
        Ok(())
    }

    fn check_index(&self, index: u64) -> Result<(), BitSetError> {
        if index < self.size() {
            Ok(())
        } else {
            Err(BitSetError::IndexOutOfRange {
                index,
                size: self.size(),
            })
        }
    }

    #[inline]
    fn locate(&self, index: u64) -> (usize, u64) {
        assert!(
            index < self.size(),
            "bit index {index} out of range for a {}-bit vector",
            self.size()
        );
        ((index / WORD_BITS) as usize, 1u64 << (index % WORD_BITS))
    }

    fn check_shape(&self, other: &Self) -> Result<(), BitSetError> {
        if self.words.len() == other.words.len() {
            Ok(())
        } else {
            Err(BitSetError::SizeMismatch {
                left: self.size(),
                right: other.size(),
            })
        }
    }

    /// Word-wise `op` of both operands into a fresh vector.
    fn combine<F>(&self, other: &Self, op: F) -> Result<Self, BitSetError>
    where
        F: Fn(u64, u64) -> u64 + Send + Sync,
    {
        self.check_shape(other)?;
        let mut holder = vec![0u64; self.words.len()].into_boxed_slice();
        self.exec.for_each(
            holder.iter_mut().zip(self.words.iter().zip(other.words.iter())),
            |(out, (a, b))| *out = op(*a, *b),
        );
        Ok(Self {
            words: holder,
            exec: self.exec,
        })
    }

    /// Word-wise `op` of both operands written back into `self`.
    fn combine_in_place<F>(&mut self, other: &Self, op: F) -> Result<(), BitSetError>
    where
        F: Fn(u64, u64) -> u64 + Send + Sync,
    {
        self.check_shape(other)?;
        let exec = self.exec;
        exec.for_each(self.words.iter_mut().zip(other.words.iter()), |(a, b)| {
            *a = op(*a, *b)
        });
        Ok(())
    }
}

impl SetContainer for WordVector {
    const KIND: &'static str = "dense";

    /// Panics if `index >= self.size()`.
    fn get(&self, index: u64) -> bool {
        let (word, mask) = self.locate(index);
        self.words[word] & mask != 0
    }

    /// Panics if `index >= self.size()`.
    fn set(&mut self, index: u64, value: bool) {
        let (word, mask) = self.locate(index);
        if value {
            self.words[word] |= mask;
        } else {
            self.words[word] &= !mask;
        }
    }

    fn union(&self, other: &Self) -> Result<Self, BitSetError> {
        self.combine(other, |a, b| a | b)
    }

    fn intersection(&self, other: &Self) -> Result<Self, BitSetError> {
        self.combine(other, |a, b| a & b)
    }

    fn minus(&self, other: &Self) -> Result<Self, BitSetError> {
        self.combine(other, |a, b| a & !b)
    }

    fn union_in_place(&mut self, other: &Self) -> Result<(), BitSetError> {
        self.combine_in_place(other, |a, b| a | b)
    }

    fn intersection_in_place(&mut self, other: &Self) -> Result<(), BitSetError> {
        self.combine_in_place(other, |a, b| a & b)
    }

    fn minus_in_place(&mut self, other: &Self) -> Result<(), BitSetError> {
        self.combine_in_place(other, |a, b| a & !b)
    }

    /// `false` for operands of a different size.
    fn is_superset_of(&self, other: &Self) -> bool {
        if self.words.len() != other.words.len() {
            return false;
        }
        self.exec
            .find(self.words.iter().zip(other.words.iter()), |&(a, b)| a & b != *b)
            .is_none()
    }

    fn clear_all(&mut self) {
        self.words.fill(0);
    }

    fn size(&self) -> u64 {
        self.words.len() as u64 * WORD_BITS
    }

    fn count_ones(&self) -> u64 {
        self.words.iter().map(|w| u64::from(w.count_ones())).sum()
    }

    fn ones(&self) -> impl Iterator<Item = u64> + '_ {
        self.words
            .iter()
            .enumerate()
            .filter(|(_, w)| **w != 0)
            .flat_map(|(i, &w)| {
                let base = i as u64 * WORD_BITS;
                SetBits(w).map(move |bit| base + bit)
            })
    }
}

impl PartialEq for WordVector {
    fn eq(&self, other: &Self) -> bool {
        if std::ptr::eq(self, other) {
            return true;
        }
        self.words.len() == other.words.len()
            && self
                .exec
                .find(self.words.iter().zip(other.words.iter()), |&(a, b)| a != b)
                .is_none()
    }
}

impl Eq for WordVector {}

impl Hash for WordVector {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.words.hash(state);
    }
}

/// Words rendered in binary, most significant bit first, lowest word first.
impl fmt::Display for WordVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for w in self.words.iter() {
            write!(f, "{w:064b}")?;
        }
        Ok(())
    }
}

/// Positions of set bits within one word, lowest first.
struct SetBits(u64);

impl Iterator for SetBits {
    type Item = u64;

    #[inline]
    fn next(&mut self) -> Option<u64> {
        if self.0 == 0 {
            return None;
        }
        let bit = u64::from(self.0.trailing_zeros());
        self.0 &= self.0 - 1;
        Some(bit)
    }
}
