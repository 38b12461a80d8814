//! The set contract shared by dense and paged containers.

use crate::error::BitSetError;
use crate::paged::PagedBitSet;
use crate::word_vector::WordVector;

/// A set of non-negative integers with in-memory set algebra.
///
/// Combining operands of incompatible shape is an error; the subset and
/// superset predicates are total and answer `false` instead.
pub trait SetContainer: Sized + PartialEq {
    /// Short name used in [`BitSetError::KindMismatch`].
    const KIND: &'static str;

    fn get(&self, index: u64) -> bool;
    fn set(&mut self, index: u64, value: bool);

    fn union(&self, other: &Self) -> Result<Self, BitSetError>;
    fn intersection(&self, other: &Self) -> Result<Self, BitSetError>;
    /// `self − other`.
    fn minus(&self, other: &Self) -> Result<Self, BitSetError>;

    fn union_in_place(&mut self, other: &Self) -> Result<(), BitSetError>;
    fn intersection_in_place(&mut self, other: &Self) -> Result<(), BitSetError>;
    fn minus_in_place(&mut self, other: &Self) -> Result<(), BitSetError>;

    /// Every bit set in `other` is also set in `self`.
    fn is_superset_of(&self, other: &Self) -> bool;

    fn is_subset_of(&self, other: &Self) -> bool {
        other.is_superset_of(self)
    }

    fn clear_all(&mut self);

    /// Capacity for dense vectors; an upper-bound estimate for paged sets.
    fn size(&self) -> u64;

    fn count_ones(&self) -> u64;

    /// Set bits in ascending order.
    fn ones(&self) -> impl Iterator<Item = u64> + '_;
}

/// Either container kind behind one type, checked at run time.
#[derive(Debug, Clone, PartialEq)]
pub enum AnySet {
    Dense(WordVector),
    Paged(PagedBitSet),
}

impl From<WordVector> for AnySet {
    fn from(v: WordVector) -> Self {
        AnySet::Dense(v)
    }
}

impl From<PagedBitSet> for AnySet {
    fn from(s: PagedBitSet) -> Self {
        AnySet::Paged(s)
    }
}

impl AnySet {
    pub fn kind(&self) -> &'static str {
        match self {
            AnySet::Dense(_) => WordVector::KIND,
            AnySet::Paged(_) => PagedBitSet::KIND,
        }
    }

    fn mismatch(&self, other: &Self) -> BitSetError {
        BitSetError::KindMismatch {
            left: self.kind(),
            right: other.kind(),
        }
    }
}

macro_rules! dispatch_binary {
    ($name:ident) => {
        fn $name(&self, other: &Self) -> Result<Self, BitSetError> {
            match (self, other) {
                (AnySet::Dense(a), AnySet::Dense(b)) => a.$name(b).map(AnySet::Dense),
                (AnySet::Paged(a), AnySet::Paged(b)) => a.$name(b).map(AnySet::Paged),
                _ => Err(self.mismatch(other)),
            }
        }
    };
}

macro_rules! dispatch_in_place {
    ($name:ident) => {
        fn $name(&mut self, other: &Self) -> Result<(), BitSetError> {
            let (left, right) = (self.kind(), other.kind());
            match (self, other) {
                (AnySet::Dense(a), AnySet::Dense(b)) => a.$name(b),
                (AnySet::Paged(a), AnySet::Paged(b)) => a.$name(b),
                _ => Err(BitSetError::KindMismatch { left, right }),
            }
        }
    };
}

impl SetContainer for AnySet {
    const KIND: &'static str = "any";

    fn get(&self, index: u64) -> bool {
        match self {
            AnySet::Dense(v) => v.get(index),
            AnySet::Paged(s) => s.get(index),
        }
    }

    fn set(&mut self, index: u64, value: bool) {
        match self {
            AnySet::Dense(v) => v.set(index, value),
            AnySet::Paged(s) => s.set(index, value),
        }
    }

    dispatch_binary!(union);
    dispatch_binary!(intersection);
    dispatch_binary!(minus);
    dispatch_in_place!(union_in_place);
    dispatch_in_place!(intersection_in_place);
    dispatch_in_place!(minus_in_place);

    fn is_superset_of(&self, other: &Self) -> bool {
        match (self, other) {
            (AnySet::Dense(a), AnySet::Dense(b)) => a.is_superset_of(b),
            (AnySet::Paged(a), AnySet::Paged(b)) => a.is_superset_of(b),
            _ => false,
        }
    }

    fn clear_all(&mut self) {
        match self {
            AnySet::Dense(v) => v.clear_all(),
            AnySet::Paged(s) => s.clear_all(),
        }
    }

    fn size(&self) -> u64 {
        match self {
            AnySet::Dense(v) => v.size(),
            AnySet::Paged(s) => s.size(),
        }
    }

    fn count_ones(&self) -> u64 {
        match self {
            AnySet::Dense(v) => v.count_ones(),
            AnySet::Paged(s) => s.count_ones(),
        }
    }

    fn ones(&self) -> impl Iterator<Item = u64> + '_ {
        let ones: Box<dyn Iterator<Item = u64> + '_> = match self {
            AnySet::Dense(v) => Box::new(v.ones()),
            AnySet::Paged(s) => Box::new(s.ones()),
        };
        ones
    }
}
