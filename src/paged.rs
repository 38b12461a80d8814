//! Sparse bit set built from lazily allocated [`WordVector`] pages.
//!
//! Pages are created on the first bit set inside them and reclaimed in the
//! background once they read all-zero. The page table (pages plus the
//! highest-page tracker) sits behind one mutex per container. Cleared pages
//! are queued and drained by at most one reclamation thread per container,
//! which holds only a weak handle.
//!
//! Page-wise algebra fans out over pages with the container's
//! [`ParallelExecutor`]. Pages cover disjoint index ranges, so dispatch order
//! never affects the result.

use std::mem;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Weak};
use std::thread;

use ahash::RandomState;
use hashbrown::{HashMap, HashSet};
use parking_lot::{Mutex, MutexGuard};
use tracing::{debug, trace, warn};

use crate::container::SetContainer;
use crate::error::BitSetError;
use crate::parallel::ParallelExecutor;
use crate::word_vector::{WORD_BITS, WordVector};

/// Words per page.
pub const PAGE_WORDS: usize = 64;
/// Bits per page (4096).
pub const PAGE_BITS: u64 = PAGE_WORDS as u64 * WORD_BITS;

type PageMap = HashMap<u64, WordVector, RandomState>;

#[derive(Debug, Default)]
struct PageTable {
    pages: PageMap,
    max_page: u64,
    /// Pages with a word cleared since the last drain.
    pending: HashSet<u64, RandomState>,
}

impl PageTable {
    /// Build a table from arbitrary pages, dropping the all-zero ones.
    fn from_pages(mut pages: PageMap) -> Self {
        let before = pages.len();
        pages.retain(|_, page| !page.all_zero());
        if pages.len() < before {
            trace!(dropped = before - pages.len(), "dropped empty pages");
        }
        let mut table = Self {
            pages,
            ..Self::default()
        };
        table.recompute_max();
        table
    }

    fn recompute_max(&mut self) {
        self.max_page = self.pages.keys().copied().max().unwrap_or(0);
    }

    /// Remove `page_index` if it is present and all-zero.
    fn reclaim(&mut self, page_index: u64) -> bool {
        if !self.pages.get(&page_index).is_some_and(WordVector::all_zero) {
            return false;
        }
        self.pages.remove(&page_index);
        if page_index == self.max_page {
            self.recompute_max();
        }
        true
    }
}

#[derive(Debug, Default)]
struct Shared {
    table: Mutex<PageTable>,
    reclaimer_active: AtomicBool,
}

impl Shared {
    /// Reclaim every queued page that still reads all-zero.
    fn drain_pending(&self) {
        let mut table = self.table.lock();
        let pending = mem::take(&mut table.pending);
        let mut reclaimed = 0usize;
        for page_index in pending {
            if table.reclaim(page_index) {
                debug!(page_index, "reclaimed empty page");
                reclaimed += 1;
            }
        }
        if reclaimed > 1 {
            trace!(reclaimed, "drained reclamation queue");
        }
    }

    fn has_pending(&self) -> bool {
        !self.table.lock().pending.is_empty()
    }
}

/// Body of the reclamation thread. Drains until the queue stays empty after
/// the active flag is released, then exits.
fn run_reclaimer(shared: Weak<Shared>) {
    loop {
        let Some(strong) = shared.upgrade() else {
            return;
        };
        strong.drain_pending();
        strong.reclaimer_active.store(false, Ordering::SeqCst);
        // A clear may have queued a page between the drain and the store.
        if !strong.has_pending() || strong.reclaimer_active.swap(true, Ordering::SeqCst) {
            return;
        }
    }
}

/// A sparse set of `u64` indices stored as 4096-bit pages.
#[derive(Debug)]
pub struct PagedBitSet {
    shared: Arc<Shared>,
    exec: ParallelExecutor,
}

impl Default for PagedBitSet {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for PagedBitSet {
    /// Deep copy into an independent container.
    fn clone(&self) -> Self {
        let pages = self.lock().pages.clone();
        Self::from_parts(pages, self.exec)
    }
}

impl PagedBitSet {
    pub fn new() -> Self {
        Self {
            shared: Arc::default(),
            exec: ParallelExecutor::default(),
        }
    }

    /// Build from existing `(page index, page)` pairs.
    ///
    /// Every page must be exactly [`PAGE_BITS`] wide. All-zero pages are
    /// dropped and the highest-page tracker is derived from what remains.
    pub fn from_pages<I>(pages: I) -> Result<Self, BitSetError>
    where
        I: IntoIterator<Item = (u64, WordVector)>,
    {
        let exec = ParallelExecutor::default();
        let mut map = PageMap::default();
        for (page_index, page) in pages {
            if page.size() != PAGE_BITS {
                return Err(BitSetError::SizeMismatch {
                    left: PAGE_BITS,
                    right: page.size(),
                });
            }
            map.insert(page_index, page.with_executor(exec));
        }
        Ok(Self::from_parts(map, exec))
    }

    /// Use `exec` for page-level work; existing and future pages use it for word-level work.
    pub fn with_executor(mut self, exec: ParallelExecutor) -> Self {
        self.exec = exec;
        for page in self.lock().pages.values_mut() {
            page.set_executor(exec);
        }
        self
    }

    /// Number of pages currently held, including any awaiting reclamation.
    pub fn page_count(&self) -> usize {
        self.lock().pages.len()
    }

    pub fn contains_page(&self, page_index: u64) -> bool {
        self.lock().pages.contains_key(&page_index)
    }

    pub fn max_page_index(&self) -> u64 {
        self.lock().max_page
    }

    pub fn is_empty(&self) -> bool {
        self.lock().pages.values().all(WordVector::all_zero)
    }

    /// Synchronously reclaim every all-zero page. Returns how many were removed.
    pub fn reclaim_empty_pages(&self) -> usize {
        let mut table = self.lock();
        let before = table.pages.len();
        table.pages.retain(|_, page| !page.all_zero());
        table.pending.clear();
        let reclaimed = before - table.pages.len();
        if reclaimed > 0 {
            table.recompute_max();
            debug!(reclaimed, "swept empty pages");
        }
        reclaimed
    }

    fn from_parts(pages: PageMap, exec: ParallelExecutor) -> Self {
        Self {
            shared: Arc::new(Shared {
                table: Mutex::new(PageTable::from_pages(pages)),
                reclaimer_active: AtomicBool::new(false),
            }),
            exec,
        }
    }

    fn lock(&self) -> MutexGuard<'_, PageTable> {
        self.shared.table.lock()
    }

    fn is_same(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.shared, &other.shared)
    }

    /// Lock both tables in address order so opposing calls cannot deadlock.
    /// Returns `(self, other)` guards. The operands must be distinct.
    fn lock_pair<'a>(
        &'a self,
        other: &'a Self,
    ) -> (MutexGuard<'a, PageTable>, MutexGuard<'a, PageTable>) {
        debug_assert!(!self.is_same(other));
        if Arc::as_ptr(&self.shared) < Arc::as_ptr(&other.shared) {
            let mine = self.lock();
            let theirs = other.lock();
            (mine, theirs)
        } else {
            let theirs = other.lock();
            let mine = self.lock();
            (mine, theirs)
        }
    }

    fn fresh_page(&self) -> WordVector {
        WordVector::new(PAGE_WORDS).with_executor(self.exec)
    }

    /// Start the reclamation thread unless one is already draining the queue.
    fn wake_reclaimer(&self) {
        if self.shared.reclaimer_active.swap(true, Ordering::SeqCst) {
            return;
        }
        let shared = Arc::downgrade(&self.shared);
        let spawned = thread::Builder::new()
            .name("bitset-gc".into())
            .spawn(move || run_reclaimer(shared));
        if let Err(err) = spawned {
            warn!(%err, "reclamation thread unavailable, reclaiming inline");
            self.shared.drain_pending();
            self.shared.reclaimer_active.store(false, Ordering::SeqCst);
        }
    }

    fn derive(&self, pages: PageMap) -> Self {
        Self::from_parts(pages, self.exec)
    }
}

/// `holder ∪= theirs`, page by page.
fn union_pages(
    exec: &ParallelExecutor,
    holder: &mut PageMap,
    theirs: &PageMap,
) -> Result<(), BitSetError> {
    let current = &*holder;
    let merged = exec.map(
        theirs.iter(),
        |(&page_index, page)| -> Result<Option<(u64, WordVector)>, BitSetError> {
            // Their page may be awaiting reclamation; it adds nothing.
            if page.all_zero() {
                return Ok(None);
            }
            let merged = match current.get(&page_index) {
                Some(mine) => mine.union(page)?,
                None => page.clone().with_executor(*exec),
            };
            Ok(Some((page_index, merged)))
        },
    );
    for item in merged {
        if let Some((page_index, page)) = item? {
            holder.insert(page_index, page);
        }
    }
    Ok(())
}

/// `holder ∩= theirs`. Returns the number of pages dropped.
fn intersection_pages(
    exec: &ParallelExecutor,
    holder: &mut PageMap,
    theirs: &PageMap,
) -> Result<usize, BitSetError> {
    let current = &*holder;
    let kept = exec.map(
        theirs.iter(),
        |(&page_index, page)| -> Result<Option<(u64, WordVector)>, BitSetError> {
            let Some(mine) = current.get(&page_index) else {
                return Ok(None);
            };
            let common = mine.intersection(page)?;
            Ok((!common.all_zero()).then_some((page_index, common)))
        },
    );
    let mut survivors = PageMap::default();
    for item in kept {
        if let Some((page_index, page)) = item? {
            survivors.insert(page_index, page);
        }
    }
    let dropped = holder.len() - survivors.len();
    *holder = survivors;
    Ok(dropped)
}

/// `holder −= theirs`. Returns the number of pages dropped.
fn minus_pages(
    exec: &ParallelExecutor,
    holder: &mut PageMap,
    theirs: &PageMap,
) -> Result<usize, BitSetError> {
    let current = &*holder;
    let updates = exec.map(
        theirs.iter(),
        |(&page_index, page)| -> Result<Option<(u64, Option<WordVector>)>, BitSetError> {
            let Some(mine) = current.get(&page_index) else {
                return Ok(None);
            };
            let rest = mine.minus(page)?;
            Ok(Some((page_index, (!rest.all_zero()).then_some(rest))))
        },
    );
    let mut dropped = 0;
    for update in updates {
        match update? {
            Some((page_index, Some(page))) => {
                holder.insert(page_index, page);
            }
            Some((page_index, None)) => {
                holder.remove(&page_index);
                dropped += 1;
            }
            None => {}
        }
    }
    Ok(dropped)
}

impl SetContainer for PagedBitSet {
    const KIND: &'static str = "paged";

    fn get(&self, index: u64) -> bool {
        self.lock()
            .pages
            .get(&(index / PAGE_BITS))
            .is_some_and(|page| page.get(index % PAGE_BITS))
    }

    fn set(&mut self, index: u64, value: bool) {
        let page_index = index / PAGE_BITS;
        let offset = index % PAGE_BITS;
        let mut table = self.lock();
        if value {
            table
                .pages
                .entry(page_index)
                .or_insert_with(|| {
                    trace!(page_index, "allocating page");
                    self.fresh_page()
                })
                .set(offset, true);
            if page_index > table.max_page {
                table.max_page = page_index;
            }
            return;
        }
        let Some(page) = table.pages.get_mut(&page_index) else {
            return;
        };
        let was_set = page.get(offset);
        page.set(offset, false);
        // A non-zero word means the page is still live.
        let word_cleared = was_set && page.words()[(offset / WORD_BITS) as usize] == 0;
        if word_cleared {
            table.pending.insert(page_index);
        }
        drop(table);
        if word_cleared {
            self.wake_reclaimer();
        }
    }

    fn union(&self, other: &Self) -> Result<Self, BitSetError> {
        if self.is_same(other) {
            return Ok(self.clone());
        }
        let (mine, theirs) = self.lock_pair(other);
        let mut holder = mine.pages.clone();
        drop(mine);
        union_pages(&self.exec, &mut holder, &theirs.pages)?;
        drop(theirs);
        Ok(self.derive(holder))
    }

    fn intersection(&self, other: &Self) -> Result<Self, BitSetError> {
        if self.is_same(other) {
            return Ok(self.clone());
        }
        let (mine, theirs) = self.lock_pair(other);
        let mut holder = mine.pages.clone();
        drop(mine);
        let dropped = intersection_pages(&self.exec, &mut holder, &theirs.pages)?;
        drop(theirs);
        trace!(dropped, "intersection pruned pages");
        Ok(self.derive(holder))
    }

    fn minus(&self, other: &Self) -> Result<Self, BitSetError> {
        if self.is_same(other) {
            return Ok(self.derive(PageMap::default()));
        }
        let (mine, theirs) = self.lock_pair(other);
        let mut holder = mine.pages.clone();
        drop(mine);
        let dropped = minus_pages(&self.exec, &mut holder, &theirs.pages)?;
        drop(theirs);
        trace!(dropped, "difference pruned pages");
        Ok(self.derive(holder))
    }

    fn union_in_place(&mut self, other: &Self) -> Result<(), BitSetError> {
        let (mut mine, theirs) = self.lock_pair(other);
        union_pages(&self.exec, &mut mine.pages, &theirs.pages)?;
        mine.recompute_max();
        Ok(())
    }

    fn intersection_in_place(&mut self, other: &Self) -> Result<(), BitSetError> {
        let (mut mine, theirs) = self.lock_pair(other);
        let dropped = intersection_pages(&self.exec, &mut mine.pages, &theirs.pages)?;
        mine.recompute_max();
        trace!(dropped, "in-place intersection pruned pages");
        Ok(())
    }

    fn minus_in_place(&mut self, other: &Self) -> Result<(), BitSetError> {
        let (mut mine, theirs) = self.lock_pair(other);
        let dropped = minus_pages(&self.exec, &mut mine.pages, &theirs.pages)?;
        mine.recompute_max();
        trace!(dropped, "in-place difference pruned pages");
        Ok(())
    }

    /// An absent page on our side fails unless their page is awaiting
    /// reclamation (all-zero).
    fn is_superset_of(&self, other: &Self) -> bool {
        if self.is_same(other) {
            return true;
        }
        let (mine, theirs) = self.lock_pair(other);
        let ours = &mine.pages;
        self.exec
            .find(theirs.pages.iter(), |&(page_index, page)| {
                match ours.get(page_index) {
                    Some(mine_page) => !mine_page.is_superset_of(page),
                    None => !page.all_zero(),
                }
            })
            .is_none()
    }

    /// Drops every page. Serialised with reclamation through the table lock.
    fn clear_all(&mut self) {
        let mut table = self.lock();
        table.pages.clear();
        table.pending.clear();
        table.max_page = 0;
    }

    /// `max_page_index * PAGE_BITS * 64`, saturating. An estimate, not a count.
    fn size(&self) -> u64 {
        self.lock()
            .max_page
            .saturating_mul(PAGE_BITS)
            .saturating_mul(WORD_BITS)
    }

    fn count_ones(&self) -> u64 {
        self.lock().pages.values().map(WordVector::count_ones).sum()
    }

    fn ones(&self) -> impl Iterator<Item = u64> + '_ {
        let table = self.lock();
        let mut page_indices: Vec<u64> = table.pages.keys().copied().collect();
        page_indices.sort_unstable();
        let ones: Vec<u64> = page_indices
            .into_iter()
            .flat_map(|page_index| {
                let base = page_index * PAGE_BITS;
                table.pages[&page_index].ones().map(move |bit| base + bit)
            })
            .collect();
        ones.into_iter()
    }
}

impl PartialEq for PagedBitSet {
    /// Logical equality; pages awaiting reclamation count as absent.
    fn eq(&self, other: &Self) -> bool {
        if self.is_same(other) {
            return true;
        }
        let (mine, theirs) = self.lock_pair(other);
        let differs = |a: &PageMap, b: &PageMap| {
            self.exec
                .find(a.iter(), |&(page_index, page)| match b.get(page_index) {
                    Some(other_page) => page != other_page,
                    None => !page.all_zero(),
                })
                .is_some()
        };
        !differs(&mine.pages, &theirs.pages) && !differs(&theirs.pages, &mine.pages)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ExecutorConfig;
    use std::time::{Duration, Instant};

    fn wait_until(mut cond: impl FnMut() -> bool) -> bool {
        let deadline = Instant::now() + Duration::from_secs(5);
        while Instant::now() < deadline {
            if cond() {
                return true;
            }
            thread::sleep(Duration::from_millis(5));
        }
        cond()
    }

    #[test]
    fn page_geometry() {
        assert_eq!(PAGE_BITS, 4096);
        assert_eq!(WordVector::new(PAGE_WORDS).size(), PAGE_BITS);
    }

    #[test]
    fn set_true_allocates_and_tracks_max() {
        let mut s = PagedBitSet::new();
        s.set(3 * PAGE_BITS + 17, true);
        assert!(s.contains_page(3));
        assert_eq!(s.max_page_index(), 3);
        assert_eq!(s.size(), 3 * PAGE_BITS * WORD_BITS);
        s.set(1, true);
        assert_eq!(s.max_page_index(), 3);
        assert_eq!(s.page_count(), 2);
    }

    #[test]
    fn clearing_absent_page_allocates_nothing() {
        let mut s = PagedBitSet::new();
        s.set(99_999, false);
        assert_eq!(s.page_count(), 0);
        assert!(!s.get(99_999));
    }

    #[test]
    fn cleared_page_is_reclaimed_and_max_recomputed() {
        let mut s = PagedBitSet::new();
        s.set(5, true);
        s.set(10 * PAGE_BITS, true);
        s.set(10 * PAGE_BITS, false);
        assert!(!s.get(10 * PAGE_BITS));
        assert!(wait_until(|| !s.contains_page(10)));
        assert_eq!(s.max_page_index(), 0);
        assert!(s.contains_page(0));
    }

    #[test]
    fn live_page_survives_reclamation_race() {
        let mut s = PagedBitSet::new();
        for _ in 0..200 {
            s.set(7, false);
            s.set(7, true);
        }
        thread::sleep(Duration::from_millis(50));
        assert!(s.get(7));
        assert!(s.contains_page(0));
    }

    #[test]
    fn sweep_reclaims_synchronously() {
        let mut s = PagedBitSet::new();
        s.set(PAGE_BITS * 2 + 1, true);
        s.set(PAGE_BITS * 2 + 1, false);
        // Either the background check or the sweep removes it; never both.
        let swept = s.reclaim_empty_pages();
        assert!(swept <= 1);
        assert!(wait_until(|| s.page_count() == 0));
        assert!(s.is_empty());
    }

    #[test]
    fn from_pages_validates_and_prunes() {
        let mut live = WordVector::new(PAGE_WORDS);
        live.set(4095, true);
        let s = PagedBitSet::from_pages([(7, live), (9, WordVector::new(PAGE_WORDS))])
            .unwrap();
        assert_eq!(s.page_count(), 1);
        assert_eq!(s.max_page_index(), 7);
        assert!(s.get(7 * PAGE_BITS + 4095));

        let err = PagedBitSet::from_pages([(0, WordVector::new(1))]).unwrap_err();
        assert_eq!(
            err,
            BitSetError::SizeMismatch {
                left: PAGE_BITS,
                right: 64
            }
        );
    }

    #[test]
    fn self_operands() {
        let mut s = PagedBitSet::new();
        s.set(1, true);
        s.set(PAGE_BITS * 4, true);
        assert_eq!(s.union(&s).unwrap(), s);
        assert_eq!(s.intersection(&s).unwrap(), s);
        assert_eq!(s.minus(&s).unwrap().page_count(), 0);
        assert!(s.is_superset_of(&s));
    }

    #[test]
    fn intersection_prunes_disjoint_pages() {
        let mut a = PagedBitSet::new();
        let mut b = PagedBitSet::new();
        a.set(1, true);
        b.set(2, true);
        a.set(PAGE_BITS * 8, true);
        b.set(PAGE_BITS * 8, true);
        let c = a.intersection(&b).unwrap();
        assert_eq!(c.page_count(), 1);
        assert_eq!(c.max_page_index(), 8);

        a.intersection_in_place(&PagedBitSet::new()).unwrap();
        assert_eq!(a.page_count(), 0);
        assert_eq!(a.max_page_index(), 0);
    }

    #[test]
    fn minus_prunes_emptied_pages() {
        let mut a = PagedBitSet::new();
        let mut b = PagedBitSet::new();
        a.set(PAGE_BITS * 3, true);
        b.set(PAGE_BITS * 3, true);
        a.set(10, true);
        b.set(PAGE_BITS * 50, true);
        a.minus_in_place(&b).unwrap();
        assert_eq!(a.page_count(), 1);
        assert_eq!(a.max_page_index(), 0);
        assert!(a.get(10));
    }

    #[test]
    fn pending_zero_page_does_not_affect_logic() {
        let zero = PageMap::from_iter([(4, WordVector::new(PAGE_WORDS))]);
        let mut a = PagedBitSet::new();
        a.set(1, true);
        let b = a.clone();
        // Plant a zero page as if reclamation had not run yet.
        a.lock().pages.extend(zero);
        assert_eq!(a, b);
        assert!(b.is_superset_of(&a));
        assert_eq!(a.union(&PagedBitSet::new()).unwrap().page_count(), 1);
        assert_eq!(a.clone().page_count(), 1);
    }

    #[test]
    fn union_in_place_skips_their_zero_pages() {
        let mut a = PagedBitSet::new();
        let mut b = PagedBitSet::new();
        a.set(1, true);
        b.set(2 * PAGE_BITS, true);
        // Zero pages on their side, one new to us and one we already hold.
        b.lock().pages.extend([
            (9, WordVector::new(PAGE_WORDS)),
            (0, WordVector::new(PAGE_WORDS)),
        ]);
        a.union_in_place(&b).unwrap();
        assert_eq!(a.page_count(), 2);
        assert!(!a.contains_page(9));
        assert_eq!(a.max_page_index(), 2);
        assert!(a.get(1) && a.get(2 * PAGE_BITS));

        let u = PagedBitSet::new().union(&b).unwrap();
        assert_eq!(u.page_count(), 1);
        assert_eq!(u.max_page_index(), 2);
    }

    #[test]
    fn clears_queue_onto_running_reclaimer() {
        let mut s = PagedBitSet::new();
        for page in 0..32u64 {
            s.set(page * PAGE_BITS, true);
        }
        // While a reclaimer is marked active, clears only enqueue.
        s.shared.reclaimer_active.store(true, Ordering::SeqCst);
        for page in 0..32u64 {
            s.set(page * PAGE_BITS, false);
        }
        thread::sleep(Duration::from_millis(20));
        assert_eq!(s.page_count(), 32);
        assert_eq!(s.lock().pending.len(), 32);

        run_reclaimer(Arc::downgrade(&s.shared));
        assert_eq!(s.page_count(), 0);
        assert_eq!(s.max_page_index(), 0);
        assert!(s.lock().pending.is_empty());
        assert!(!s.shared.reclaimer_active.load(Ordering::SeqCst));
    }

    #[test]
    fn reclaimer_goes_idle_after_bulk_clear() {
        let mut s = PagedBitSet::new();
        for page in 0..256u64 {
            s.set(page * PAGE_BITS + 63, true);
        }
        for page in 0..256u64 {
            s.set(page * PAGE_BITS + 63, false);
        }
        assert!(wait_until(|| s.page_count() == 0));
        assert!(wait_until(|| !s.shared.reclaimer_active.load(Ordering::SeqCst)));
        s.set(5, true);
        s.set(5, false);
        assert!(wait_until(|| s.page_count() == 0));
    }

    #[test]
    fn reclaimer_does_not_keep_set_alive() {
        let mut s = PagedBitSet::new();
        s.set(PAGE_BITS, true);
        s.set(PAGE_BITS, false);
        let weak = Arc::downgrade(&s.shared);
        drop(s);
        // The thread upgrades only while draining.
        assert!(wait_until(|| weak.upgrade().is_none()));
        run_reclaimer(weak);
    }

    #[test]
    fn clear_all_resets_tracker() {
        let mut s = PagedBitSet::new();
        s.set(PAGE_BITS * 100, true);
        s.clear_all();
        assert_eq!(s.page_count(), 0);
        assert_eq!(s.size(), 0);
    }

    #[test]
    fn parallel_pages_match_sequential() {
        let eager = ParallelExecutor::new(ExecutorConfig::default().with_min_parallel_items(0));
        let mut a = PagedBitSet::new().with_executor(eager);
        let mut b = PagedBitSet::new().with_executor(eager);
        for i in 0..60u64 {
            a.set(i * PAGE_BITS + i, true);
            if i % 3 == 0 {
                b.set(i * PAGE_BITS + i, true);
            }
            b.set(i * PAGE_BITS + 4000, true);
        }
        let seq_a = a.clone().with_executor(ParallelExecutor::sequential());
        let seq_b = b.clone().with_executor(ParallelExecutor::sequential());
        assert_eq!(a.intersection(&b).unwrap(), seq_a.intersection(&seq_b).unwrap());
        assert_eq!(a.minus(&b).unwrap(), seq_a.minus(&seq_b).unwrap());
        assert_eq!(a.union(&b).unwrap(), seq_a.union(&seq_b).unwrap());
        assert_eq!(a.intersection(&b).unwrap().count_ones(), 20);
    }

    #[test]
    fn size_saturates_for_huge_indices() {
        let mut s = PagedBitSet::new();
        s.set(u64::MAX, true);
        assert!(s.get(u64::MAX));
        assert_eq!(s.size(), u64::MAX);
    }
}
