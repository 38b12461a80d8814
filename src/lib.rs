//! sparse_bitset — dense word vectors and sparse paged bit sets.
//!
//! - [`WordVector`]: fixed-capacity dense bits with word-level algebra.
//! - [`PagedBitSet`]: `u64`-indexed sparse set of 4096-bit pages, allocated on
//!   first set and reclaimed in the background once empty.
//! - Union, intersection and difference (pure and in place) fan out over words
//!   or pages through a [`ParallelExecutor`].
//! - [`AnySet`] puts both kinds behind one type with run-time kind checks.

mod config;
mod container;
mod error;
mod paged;
mod parallel;
mod word_vector;

pub use config::ExecutorConfig;
pub use container::{AnySet, SetContainer};
pub use error::BitSetError;
pub use paged::{PAGE_BITS, PAGE_WORDS, PagedBitSet};
pub use parallel::ParallelExecutor;
pub use word_vector::{WORD_BITS, WordVector};
