//---------------------------------------------------------
// process-wide intern store for sparsity patterns.
//
// The table maps a structural hash to the patterns created
// with that hash.  Only weak references are held, so a
// pattern is freed as soon as its last owning handle is
// dropped.  Stale entries are swept whenever the table grows.
//---------------------------------------------------------

use super::core::{Sparsity, SparsityData};
use lazy_static::lazy_static;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

#[derive(Default)]
struct SparsityCache {
    table: HashMap<u64, Vec<Weak<SparsityData>>>,
}

impl SparsityCache {
    // drop every weak reference whose pattern has been freed
    fn sweep(&mut self) {
        let before = self.len();
        self.table.retain(|_, bucket| {
            bucket.retain(|w| w.strong_count() > 0);
            !bucket.is_empty()
        });
        log::debug!(
            "sparsity cache sweep: {} entries before, {} after",
            before,
            self.len()
        );
    }

    // weak references held, stale ones included
    fn len(&self) -> usize {
        self.table.values().map(|b| b.len()).sum()
    }

    fn live(&self) -> usize {
        self.table
            .values()
            .flat_map(|b| b.iter())
            .filter(|w| w.strong_count() > 0)
            .count()
    }

    fn insert(
        &mut self,
        hash: u64,
        nrow: usize,
        ncol: usize,
        colind: Vec<usize>,
        row: Vec<usize>,
    ) -> Sparsity {
        if let Some(bucket) = self.table.get_mut(&hash) {
            if let Some(found) = bucket
                .iter()
                .filter_map(Weak::upgrade)
                .find(|data| data.matches(nrow, ncol, &colind, &row))
            {
                return Sparsity { inner: found };
            }

            // every live entry is a collision; reuse the slots of dead ones
            bucket.retain(|w| w.strong_count() > 0);
            let sp = singleton(nrow, ncol, colind, row);
            bucket.push(Arc::downgrade(&sp.inner));
            return sp;
        }

        let sp = singleton(nrow, ncol, colind, row);
        let capacity_before = self.table.capacity();
        self.table.insert(hash, vec![Arc::downgrade(&sp.inner)]);
        if self.table.capacity() != capacity_before {
            self.sweep();
        }
        sp
    }
}

lazy_static! {
    static ref CACHE: Mutex<SparsityCache> = Mutex::new(SparsityCache::default());
    static ref EMPTY: Sparsity = singleton(0, 0, vec![0], vec![]);
    static ref SCALAR: Sparsity = singleton(1, 1, vec![0, 1], vec![0]);
    static ref SCALAR_SPARSE: Sparsity = singleton(1, 1, vec![0, 0], vec![]);
}

fn singleton(nrow: usize, ncol: usize, colind: Vec<usize>, row: Vec<usize>) -> Sparsity {
    let hash = hash_sparsity(nrow, ncol, &colind, &row);
    Sparsity {
        inner: Arc::new(SparsityData {
            nrow,
            ncol,
            colind,
            row,
            hash,
        }),
    }
}

fn lock_cache() -> MutexGuard<'static, SparsityCache> {
    // the table holds no invariant that a panic elsewhere could break
    CACHE.lock().unwrap_or_else(PoisonError::into_inner)
}

#[inline]
fn hash_combine(seed: &mut u64, v: u64) {
    *seed ^= v
        .wrapping_add(0x9e37_79b9)
        .wrapping_add(*seed << 6)
        .wrapping_add(*seed >> 2);
}

/// Deterministic structural hash of compressed column data.
pub(crate) fn hash_sparsity(nrow: usize, ncol: usize, colind: &[usize], row: &[usize]) -> u64 {
    let mut seed = 0u64;
    hash_combine(&mut seed, nrow as u64);
    hash_combine(&mut seed, ncol as u64);
    colind.iter().for_each(|&c| hash_combine(&mut seed, c as u64));
    row.iter().for_each(|&r| hash_combine(&mut seed, r as u64));
    seed
}

pub(crate) fn intern(nrow: usize, ncol: usize, colind: Vec<usize>, row: Vec<usize>) -> Sparsity {
    if let Some(sp) = lookup_singleton(nrow, ncol, &colind) {
        return sp;
    }
    let hash = hash_sparsity(nrow, ncol, &colind, &row);
    intern_with_hash(hash, nrow, ncol, colind, row)
}

fn lookup_singleton(nrow: usize, ncol: usize, colind: &[usize]) -> Option<Sparsity> {
    match (nrow, ncol) {
        (0, 0) => Some(EMPTY.clone()),
        (1, 1) if colind[1] == 0 => Some(SCALAR_SPARSE.clone()),
        (1, 1) => Some(SCALAR.clone()),
        _ => None,
    }
}

/// Intern under an explicitly supplied hash.
///
/// Structurally different patterns sharing `hash` are kept apart by a
/// full comparison against every live entry in the bucket.
pub(crate) fn intern_with_hash(
    hash: u64,
    nrow: usize,
    ncol: usize,
    colind: Vec<usize>,
    row: Vec<usize>,
) -> Sparsity {
    lock_cache().insert(hash, nrow, ncol, colind, row)
}

/// Number of live patterns currently registered in the intern store.
pub fn cached_pattern_count() -> usize {
    lock_cache().live()
}

impl Sparsity {
    /// Canonical `0 x 0` pattern.
    pub fn empty() -> Self {
        EMPTY.clone()
    }

    /// Canonical `1 x 1` pattern, structurally nonzero if `dense` is set.
    pub fn scalar(dense: bool) -> Self {
        if dense {
            SCALAR.clone()
        } else {
            SCALAR_SPARSE.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_singletons() {
        let a = Sparsity::new(0, 0, vec![0], vec![]);
        let b = Sparsity::zeros(0, 0);
        assert!(a.is_same(&b));
        assert!(a.is_same(&Sparsity::empty()));

        assert!(Sparsity::dense(1, 1).is_same(&Sparsity::scalar(true)));
        assert!(Sparsity::zeros(1, 1).is_same(&Sparsity::scalar(false)));
        assert!(!Sparsity::scalar(true).is_same(&Sparsity::scalar(false)));
    }

    #[test]
    fn test_interning_shares_instances() {
        let a = Sparsity::new(4, 3, vec![0, 1, 1, 3], vec![2, 0, 3]);
        let b = Sparsity::new(4, 3, vec![0, 1, 1, 3], vec![2, 0, 3]);
        assert!(a.is_same(&b));
        assert_eq!(a.hash_value(), b.hash_value());
    }

    #[test]
    fn test_hash_collision() {
        // force two different patterns under the same key
        let hash = 0xdead_beef_u64;
        let a = intern_with_hash(hash, 5, 2, vec![0, 1, 2], vec![1, 4]);
        let b = intern_with_hash(hash, 5, 2, vec![0, 2, 2], vec![1, 4]);
        assert!(!a.is_same(&b));
        assert_ne!(a.colind(), b.colind());

        // both remain retrievable
        let a2 = intern_with_hash(hash, 5, 2, vec![0, 1, 2], vec![1, 4]);
        let b2 = intern_with_hash(hash, 5, 2, vec![0, 2, 2], vec![1, 4]);
        assert!(a.is_same(&a2));
        assert!(b.is_same(&b2));
    }

    #[test]
    fn test_dropped_pattern_is_recreated() {
        let hash = 0x0123_4567_u64;
        let a = intern_with_hash(hash, 7, 1, vec![0, 1], vec![6]);
        let weak = Arc::downgrade(&a.inner);
        drop(a);
        assert!(weak.upgrade().is_none());

        let b = intern_with_hash(hash, 7, 1, vec![0, 1], vec![6]);
        assert_eq!(b.row(), &[6]);
    }

    #[test]
    fn test_sweep_on_growth() {
        let mut cache = SparsityCache::default();

        // two patterns stay alive throughout
        let keep: Vec<Sparsity> = (0..2)
            .map(|k| cache.insert(k, 3, 1, vec![0, 1], vec![k as usize]))
            .collect();
        assert_eq!(cache.len(), 2);

        // register short-lived patterns until the table grows
        let mut swept = false;
        for k in 2..4096u64 {
            let before = cache.len();
            let capacity = cache.table.capacity();
            drop(cache.insert(k, 1, 2, vec![0, 0, 1], vec![0]));
            if cache.table.capacity() != capacity {
                // only the kept patterns and the one just inserted survive
                assert_eq!(cache.len(), keep.len() + 1);
                if before > keep.len() + 1 {
                    assert!(cache.len() < before);
                    swept = true;
                    break;
                }
                continue;
            }
            assert_eq!(cache.len(), before + 1);
        }
        assert!(swept);
        assert_eq!(cache.live(), keep.len());
    }

    #[test]
    fn test_live_count() {
        let mut cache = SparsityCache::default();
        let a = cache.insert(11, 4, 1, vec![0, 2], vec![1, 3]);
        let b = cache.insert(12, 4, 1, vec![0, 1], vec![2]);
        assert_eq!(cache.live(), 2);
        drop(a);
        assert_eq!(cache.live(), 1);
        assert_eq!(cache.len(), 2);
        drop(b);
        assert_eq!(cache.live(), 0);

        // the global store counts at least the patterns held here
        let held = Sparsity::banded(9, 3);
        assert!(cached_pattern_count() >= 1);
        assert_eq!(held.nnz(), 9 + 2 * (8 + 7 + 6));
    }

    #[test]
    fn test_hash_is_deterministic() {
        let h1 = hash_sparsity(2, 2, &[0, 1, 2], &[0, 1]);
        let h2 = hash_sparsity(2, 2, &[0, 1, 2], &[0, 1]);
        let h3 = hash_sparsity(2, 2, &[0, 1, 2], &[1, 0]);
        assert_eq!(h1, h2);
        assert_ne!(h1, h3);
    }
}
