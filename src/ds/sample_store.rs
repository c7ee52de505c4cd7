//! Policy-driven sample storage with in-place linearization.
//!
//! `SampleStore` owns one backing region of `f64` samples and applies one of
//! three retention policies on overflow: grow (`Open`), drop (`Fixed`), or
//! overwrite-oldest (`Circular`). Consumers read the *logical* sequence —
//! oldest to newest in arrival order — regardless of physical layout.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────────┐
//! │                         SampleStore Layout                                  │
//! │                                                                             │
//! │   Open / Fixed: always linear from index 0                                  │
//! │                                                                             │
//! │     mem:  ┌────┬────┬────┬────┬────┐                                        │
//! │           │ s0 │ s1 │ s2 │    │    │    len = 3, cap = 5                    │
//! │           └────┴────┴────┴────┴────┘                                        │
//! │                                                                             │
//! │   Circular (full): may wrap at `tail`; region carries cap/2 scratch         │
//! │                                                                             │
//! │     mem:  ┌────┬────┬────┬────┬────╥────┬────┐                              │
//! │           │ s3 │ s4 │ s0 │ s1 │ s2 ║ (scratch) │   len = cap = 5            │
//! │           └────┴────┴────┴────┴────╨────┴────┘                              │
//! │                     ▲                                                       │
//! │                     tail = 2 (next write / oldest sample)                   │
//! │                                                                             │
//! │     logical order:  s0 s1 s2 s3 s4   via  (tail + i) % cap                  │
//! │                                                                             │
//! │   Linearization (three block moves, scratch bound = min(tail, len-tail)):   │
//! │                                                                             │
//! │     1. stash the shorter wrap segment into the scratch area                 │
//! │     2. shift the longer segment into place                                  │
//! │     3. copy the stash back                                                  │
//! │                                                                             │
//! │     result:  ┌────┬────┬────┬────┬────┐  tail = 0, order preserved          │
//! │              │ s0 │ s1 │ s2 │ s3 │ s4 │                                     │
//! │              └────┴────┴────┴────┴────┘                                     │
//! └─────────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Operations
//!
//! | Operation           | Description                                | Complexity      |
//! |---------------------|--------------------------------------------|-----------------|
//! | [`push`]            | Append one sample per policy               | O(1) amort.     |
//! | [`push_batch`]      | Bulk append, at most two block copies      | O(n)            |
//! | [`get`]             | Logical index read, no linearization       | O(1)            |
//! | [`as_contiguous`]   | Linearized oldest→newest slice             | O(len) once     |
//! | [`replace`]         | Reset contents from an external sequence   | O(n)            |
//! | [`set_capacity`]    | Reshape region, truncating if needed       | O(len)          |
//! | [`set_policy`]      | Linearize, then reshape for the new policy | O(len)          |
//! | [`min`]/[`max`]/[`mean`]/[`std`] | Cached single-pass statistics | O(len) on miss  |
//!
//! [`push`]: SampleStore::push
//! [`push_batch`]: SampleStore::push_batch
//! [`get`]: SampleStore::get
//! [`as_contiguous`]: SampleStore::as_contiguous
//! [`replace`]: SampleStore::replace
//! [`set_capacity`]: SampleStore::set_capacity
//! [`set_policy`]: SampleStore::set_policy
//! [`min`]: SampleStore::min
//! [`max`]: SampleStore::max
//! [`mean`]: SampleStore::mean
//! [`std`]: SampleStore::std
//!
//! ## Thread Safety
//!
//! `SampleStore` is not thread-safe and performs no internal locking. The
//! owning collaborator (typically an acquisition channel loop) must serialize
//! writer access. Statistics are cached in a `Cell`, so even reads require
//! external synchronization before the type could ever be shared.
//!
//! ## Implementation Notes
//!
//! - Circular stores reserve `capacity / 2` extra slots so linearization can
//!   rotate in place with auxiliary space bounded by the shorter wrap segment.
//! - Statistics use the dirty-flag pattern: every mutation clears the cached
//!   [`StatsSnapshot`]; the next statistic read recomputes it in one pass.
//! - `debug_validate_invariants()` is available in debug/test builds.

use std::cell::Cell;

use crate::error::BufferError;
use crate::policy::RetentionPolicy;
use crate::stats::StatsSnapshot;

/// Bounded sample storage with policy-driven overflow handling.
///
/// # Example
///
/// ```
/// use samplekit::ds::SampleStore;
/// use samplekit::policy::RetentionPolicy;
///
/// let mut store = SampleStore::with_policy(3, RetentionPolicy::Circular);
/// for v in [1.0, 2.0, 3.0, 4.0, 5.0] {
///     store.push(v);
/// }
///
/// // Oldest two samples were overwritten.
/// assert_eq!(store.as_contiguous(), &[3.0, 4.0, 5.0]);
/// assert_eq!(store.min(), 3.0);
/// assert_eq!(store.max(), 5.0);
/// ```
#[derive(Debug, Clone)]
pub struct SampleStore {
    /// Backing region; `capacity + capacity/2` slots under `Circular`,
    /// exactly `capacity` otherwise.
    mem: Vec<f64>,
    /// Logical number of retained samples.
    len: usize,
    /// Nominal capacity (not the backing region length).
    cap: usize,
    policy: RetentionPolicy,
    /// Next physical write position; meaningful only under `Circular`.
    tail: usize,
    /// Cached statistics; `None` after any mutation.
    stats: Cell<Option<StatsSnapshot>>,
}

impl SampleStore {
    /// Creates a store with the given nominal capacity and the default
    /// `Fixed` policy. Capacity may be zero.
    ///
    /// # Example
    ///
    /// ```
    /// use samplekit::ds::SampleStore;
    /// use samplekit::policy::RetentionPolicy;
    ///
    /// let store = SampleStore::new(8);
    /// assert_eq!(store.capacity(), 8);
    /// assert_eq!(store.policy(), RetentionPolicy::Fixed);
    /// assert!(store.is_empty());
    /// ```
    pub fn new(capacity: usize) -> Self {
        Self::with_policy(capacity, RetentionPolicy::default())
    }

    /// Creates a store with an explicit retention policy.
    pub fn with_policy(capacity: usize, policy: RetentionPolicy) -> Self {
        Self {
            mem: vec![0.0; Self::region_len(policy, capacity)],
            len: 0,
            cap: capacity,
            policy,
            tail: 0,
            stats: Cell::new(None),
        }
    }

    /// Backing region length for a given policy and nominal capacity.
    fn region_len(policy: RetentionPolicy, capacity: usize) -> usize {
        match policy {
            RetentionPolicy::Circular => capacity + capacity / 2,
            RetentionPolicy::Open | RetentionPolicy::Fixed => capacity,
        }
    }

    /// Returns the logical number of retained samples.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if no samples are retained.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the nominal capacity.
    pub fn capacity(&self) -> usize {
        self.cap
    }

    /// Returns the active retention policy.
    pub fn policy(&self) -> RetentionPolicy {
        self.policy
    }

    /// Switches the retention policy, preserving current contents.
    ///
    /// Any wrapped circular layout is linearized first, then the backing
    /// region is reshaped: entering `Circular` reserves the rotation scratch,
    /// leaving it releases the scratch.
    pub fn set_policy(&mut self, policy: RetentionPolicy) {
        if policy == self.policy {
            return;
        }

        self.linearize();
        self.mem.resize(Self::region_len(policy, self.cap), 0.0);

        // Layout is linear here. Under Circular the tail must point at the
        // next overwrite position: the append slot while filling, the oldest
        // sample (index 0) once full.
        self.tail = match policy {
            RetentionPolicy::Circular if self.len < self.cap => self.len,
            _ => 0,
        };
        self.policy = policy;
    }

    /// Reshapes the store to a new nominal capacity.
    ///
    /// - `Open`/`Fixed`: the region is resized to `c`; if the logical size
    ///   exceeds `c` it is truncated to the oldest `c` samples.
    /// - `Circular`: the region is resized to `c + c/2`. Growing preserves
    ///   every retained sample; shrinking below the logical size keeps the
    ///   most recent `c` samples and resets the wrap bookkeeping.
    ///
    /// Truncation is intentional data loss, not an error.
    ///
    /// # Example
    ///
    /// ```
    /// use samplekit::ds::SampleStore;
    /// use samplekit::policy::RetentionPolicy;
    ///
    /// let mut store = SampleStore::with_policy(4, RetentionPolicy::Circular);
    /// for v in [1.0, 2.0, 3.0, 4.0] {
    ///     store.push(v);
    /// }
    ///
    /// store.set_capacity(2);
    /// assert_eq!(store.as_contiguous(), &[3.0, 4.0]);
    /// ```
    pub fn set_capacity(&mut self, c: usize) {
        if c == self.cap {
            return;
        }

        self.linearize();

        match self.policy {
            RetentionPolicy::Open | RetentionPolicy::Fixed => {
                self.mem.resize(c, 0.0);
                if self.len > c {
                    self.len = c;
                    self.stats.set(None);
                }
            },
            RetentionPolicy::Circular => {
                if self.len > c {
                    // Keep the most recent `c` samples; layout is linear
                    // oldest-first, so they sit at the end of the run.
                    self.mem.copy_within(self.len - c..self.len, 0);
                    self.len = c;
                    self.stats.set(None);
                }
                self.mem.resize(Self::region_len(RetentionPolicy::Circular, c), 0.0);
                self.tail = if self.len < c { self.len } else { 0 };
            },
        }
        self.cap = c;
    }

    /// Drops all samples, keeping capacity and policy.
    pub fn clear(&mut self) {
        self.len = 0;
        self.tail = 0;
        self.stats.set(None);
    }

    /// Appends one sample according to the retention policy.
    ///
    /// - `Open`: capacity grows as needed; nothing is dropped.
    /// - `Fixed`: dropped silently once the window is full.
    /// - `Circular`: overwrites the oldest sample once full; with capacity 0
    ///   the push is a degenerate no-op.
    pub fn push(&mut self, v: f64) {
        match self.policy {
            RetentionPolicy::Open => {
                if self.len == self.cap {
                    self.cap += 1;
                    self.mem.resize(self.cap, 0.0);
                }
                self.mem[self.len] = v;
                self.len += 1;
            },
            RetentionPolicy::Fixed => {
                if self.len == self.cap {
                    return;
                }
                self.mem[self.len] = v;
                self.len += 1;
            },
            RetentionPolicy::Circular => {
                if self.cap == 0 {
                    debug_assert!(self.len == 0, "zero-capacity store holds samples");
                    return;
                }
                self.mem[self.tail] = v;
                self.tail += 1;
                if self.len < self.cap {
                    self.len += 1;
                }
                if self.len == self.cap {
                    self.tail %= self.cap;
                }
            },
        }
        self.stats.set(None);
    }

    /// Bulk push with the same per-policy semantics as repeated [`push`],
    /// applied in at most two contiguous block copies.
    ///
    /// Returns the number of supplied samples present in the store after the
    /// call: all of them under `Open`, the part that fit under `Fixed`, and
    /// at most `capacity` (the newest ones) under `Circular`.
    ///
    /// [`push`]: SampleStore::push
    ///
    /// # Example
    ///
    /// ```
    /// use samplekit::ds::SampleStore;
    ///
    /// let mut store = SampleStore::new(2); // Fixed
    /// assert_eq!(store.push_batch(&[10.0, 20.0, 30.0]), 2);
    /// assert_eq!(store.as_contiguous(), &[10.0, 20.0]);
    /// ```
    pub fn push_batch(&mut self, values: &[f64]) -> usize {
        let n = values.len();
        if n == 0 {
            return 0;
        }

        let retained = match self.policy {
            RetentionPolicy::Open => {
                if self.len + n > self.cap {
                    self.cap = self.len + n;
                    self.mem.resize(self.cap, 0.0);
                }
                self.mem[self.len..self.len + n].copy_from_slice(values);
                self.len += n;
                n
            },
            RetentionPolicy::Fixed => {
                let m = n.min(self.cap - self.len);
                self.mem[self.len..self.len + m].copy_from_slice(&values[..m]);
                self.len += m;
                m
            },
            RetentionPolicy::Circular => {
                if self.cap == 0 {
                    return 0;
                }
                if n >= self.cap {
                    // Only the newest `cap` values survive; one block copy.
                    self.mem[..self.cap].copy_from_slice(&values[n - self.cap..]);
                    self.tail = 0;
                    self.len = self.cap;
                    self.cap
                } else if n <= self.cap - self.tail {
                    self.mem[self.tail..self.tail + n].copy_from_slice(values);
                    self.tail += n;
                    if self.len < self.cap {
                        self.len += n;
                    }
                    if self.len == self.cap {
                        self.tail %= self.cap;
                    }
                    n
                } else {
                    // Wraps: split into the run up to the region end plus the
                    // remainder at the front.
                    let m = self.cap - self.tail;
                    self.mem[self.tail..self.cap].copy_from_slice(&values[..m]);
                    self.mem[..n - m].copy_from_slice(&values[m..]);
                    self.tail = n - m;
                    self.len = self.cap;
                    n
                }
            },
        };
        self.stats.set(None);
        retained
    }

    /// Maps a logical index to its physical position.
    fn physical(&self, i: usize) -> usize {
        if self.policy == RetentionPolicy::Circular && self.len > 0 && self.len == self.cap {
            (self.tail + i) % self.len
        } else {
            i
        }
    }

    /// Returns the `i`-th sample in logical (oldest→newest) order without
    /// linearizing.
    ///
    /// # Errors
    ///
    /// [`BufferError::IndexOutOfRange`] if `i` is outside `[0, len)`.
    pub fn get(&self, i: usize) -> Result<f64, BufferError> {
        if i >= self.len {
            return Err(BufferError::IndexOutOfRange { index: i, len: self.len });
        }
        Ok(self.mem[self.physical(i)])
    }

    /// Iterates the logical sequence, oldest to newest, without mutating the
    /// physical layout.
    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        (0..self.len).map(move |i| self.mem[self.physical(i)])
    }

    /// Returns the logical sequence as one contiguous slice, linearizing a
    /// wrapped circular layout in place first.
    ///
    /// The rotation stashes the shorter wrap segment in the reserved scratch
    /// area, shifts the longer segment, and copies the stash back, so the
    /// auxiliary space is bounded by `min(tail, len - tail)` rather than a
    /// full copy. Repeated calls without intervening mutation are no-ops.
    ///
    /// The returned slice is invalidated by any subsequent mutation.
    pub fn as_contiguous(&mut self) -> &[f64] {
        self.linearize();
        &self.mem[..self.len]
    }

    /// Collects the logical sequence into an owned `Vec`, leaving the
    /// physical layout untouched.
    pub fn to_vec(&self) -> Vec<f64> {
        self.iter().collect()
    }

    /// Resets the contents to exactly `values` (the persistence restore
    /// path). Logical size and nominal capacity both become `values.len()`;
    /// prior contents and wrap state are discarded.
    pub fn replace(&mut self, values: &[f64]) {
        self.mem = values.to_vec();
        self.len = values.len();
        self.cap = values.len();
        self.tail = 0;
        if self.policy == RetentionPolicy::Circular {
            self.mem.resize(Self::region_len(RetentionPolicy::Circular, self.cap), 0.0);
        }
        self.stats.set(None);
    }

    /// Compares logical contents element-wise with another store.
    pub fn content_eq(&self, other: &SampleStore) -> bool {
        self.len == other.len && self.iter().zip(other.iter()).all(|(a, b)| a == b)
    }

    fn snapshot(&self) -> StatsSnapshot {
        if let Some(snap) = self.stats.get() {
            return snap;
        }
        let snap = StatsSnapshot::compute(self.iter());
        self.stats.set(Some(snap));
        snap
    }

    /// Smallest retained sample; `0.0` when empty.
    pub fn min(&self) -> f64 {
        self.snapshot().min
    }

    /// Largest retained sample; `0.0` when empty.
    pub fn max(&self) -> f64 {
        self.snapshot().max
    }

    /// Arithmetic mean of the retained samples; `0.0` when empty.
    pub fn mean(&self) -> f64 {
        self.snapshot().mean
    }

    /// Population standard deviation; `0.0` when empty, never negative.
    pub fn std(&self) -> f64 {
        self.snapshot().std
    }

    /// In-place rotation of a wrapped circular layout into a linear run.
    ///
    /// Only a full circular store can wrap: while filling, writes land at
    /// `tail == len`, so the run is already linear.
    fn linearize(&mut self) {
        if self.policy != RetentionPolicy::Circular
            || self.len == 0
            || self.len < self.cap
            || self.tail == 0
        {
            return;
        }

        let len = self.len;
        let tail = self.tail;
        let head = len - tail;
        // Scratch area starts right after the logical region.
        if tail <= len / 2 {
            self.mem.copy_within(0..tail, len);
            self.mem.copy_within(tail..len, 0);
            self.mem.copy_within(len..len + tail, head);
        } else {
            self.mem.copy_within(tail..len, len);
            self.mem.copy_within(0..tail, head);
            self.mem.copy_within(len..len + head, 0);
        }
        self.tail = 0;
    }

    #[cfg(any(test, debug_assertions))]
    pub fn debug_validate_invariants(&self) {
        assert!(self.len <= self.cap, "len {} exceeds capacity {}", self.len, self.cap);
        assert_eq!(
            self.mem.len(),
            Self::region_len(self.policy, self.cap),
            "backing region does not match policy/capacity"
        );
        match self.policy {
            RetentionPolicy::Circular => {
                if self.len < self.cap {
                    assert_eq!(self.tail, self.len, "filling circular store must stay linear");
                } else if self.cap > 0 {
                    assert!(self.tail < self.cap, "tail {} outside capacity {}", self.tail, self.cap);
                } else {
                    assert_eq!(self.tail, 0);
                }
            },
            RetentionPolicy::Open | RetentionPolicy::Fixed => {
                assert_eq!(self.tail, 0, "tail is only used by the circular policy");
            },
        }
    }
}

impl Default for SampleStore {
    /// An empty `Fixed` store with capacity 0.
    fn default() -> Self {
        Self::new(0)
    }
}
