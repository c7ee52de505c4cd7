//! Shared, reference-counted handle over one sample store.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────────┐
//! │                       Shared Ownership Model                                │
//! │                                                                             │
//! │   SampleBuffer A ──┐                                                        │
//! │                    ├──► Rc<RefCell<SampleStore>>   (one mutable cell)       │
//! │   SampleBuffer B ──┘                ▲                                       │
//! │        │                            │                                       │
//! │        │ clone()                    │ push via A is visible via B           │
//! │        ▼                            │                                       │
//! │   SampleBuffer B'  ─────────────────┘   (still the same cell)               │
//! │                                                                             │
//! │   detach() is the only way out of aliasing:                                 │
//! │                                                                             │
//! │   SampleBuffer C = A.detach() ──► Rc<RefCell<SampleStore>>  (private copy)  │
//! │                                                                             │
//! │   push via A  ──►  C unaffected                                             │
//! └─────────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! `Clone` shares the cell on purpose — there is no copy-on-write. A producer
//! (acquisition channel) and any number of consumers (plot, export,
//! statistics) hold handles to the same store and observe each other's
//! mutations immediately. The store is released when the last handle drops.
//!
//! ## Thread Safety
//!
//! `SampleBuffer` is `!Send` and `!Sync` by construction (`Rc` + `RefCell`):
//! the buffer core is single-threaded and cooperative, with writer
//! serialization delegated to the owning channel. The `RefCell` additionally
//! enforces at runtime that no consumer retains a borrowed view across a
//! mutating call.

use std::cell::{Ref, RefCell};
use std::rc::Rc;

use crate::ds::SampleStore;
use crate::error::BufferError;
use crate::policy::RetentionPolicy;
use crate::stats::StatsSnapshot;

/// Reference-counted handle to a [`SampleStore`].
///
/// # Example
///
/// ```
/// use samplekit::handle::SampleBuffer;
/// use samplekit::policy::RetentionPolicy;
///
/// let producer = SampleBuffer::with_policy(3, RetentionPolicy::Circular);
/// let consumer = producer.clone(); // aliases the same store
///
/// producer.push(1.0);
/// producer.push(2.0);
/// assert_eq!(consumer.to_vec(), vec![1.0, 2.0]);
///
/// let frozen = consumer.detach(); // private copy, no further aliasing
/// producer.push(3.0);
/// assert_eq!(consumer.len(), 3);
/// assert_eq!(frozen.len(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct SampleBuffer {
    cell: Rc<RefCell<SampleStore>>,
}

impl SampleBuffer {
    /// Creates a buffer with the given nominal capacity and the default
    /// `Fixed` policy.
    pub fn new(capacity: usize) -> Self {
        Self::from_store(SampleStore::new(capacity))
    }

    /// Creates a buffer with an explicit retention policy.
    pub fn with_policy(capacity: usize, policy: RetentionPolicy) -> Self {
        Self::from_store(SampleStore::with_policy(capacity, policy))
    }

    /// Wraps an existing store in a fresh handle.
    pub fn from_store(store: SampleStore) -> Self {
        Self {
            cell: Rc::new(RefCell::new(store)),
        }
    }

    /// Materializes an independent private copy of the current contents,
    /// capacity and policy. The returned handle does not alias `self`.
    pub fn detach(&self) -> Self {
        Self::from_store(self.cell.borrow().clone())
    }

    /// Returns `true` if both handles reference the same underlying store.
    pub fn aliases(&self, other: &SampleBuffer) -> bool {
        Rc::ptr_eq(&self.cell, &other.cell)
    }

    /// Logical number of retained samples.
    pub fn len(&self) -> usize {
        self.cell.borrow().len()
    }

    /// Returns `true` if no samples are retained.
    pub fn is_empty(&self) -> bool {
        self.cell.borrow().is_empty()
    }

    /// Nominal capacity.
    pub fn capacity(&self) -> usize {
        self.cell.borrow().capacity()
    }

    /// Reshapes the store to a new nominal capacity (see
    /// [`SampleStore::set_capacity`]).
    pub fn set_capacity(&self, capacity: usize) {
        self.cell.borrow_mut().set_capacity(capacity);
    }

    /// Active retention policy.
    pub fn policy(&self) -> RetentionPolicy {
        self.cell.borrow().policy()
    }

    /// Switches the retention policy (see [`SampleStore::set_policy`]).
    pub fn set_policy(&self, policy: RetentionPolicy) {
        self.cell.borrow_mut().set_policy(policy);
    }

    /// Drops all samples, keeping capacity and policy.
    pub fn clear(&self) {
        self.cell.borrow_mut().clear();
    }

    /// Appends one sample according to the retention policy.
    pub fn push(&self, v: f64) {
        self.cell.borrow_mut().push(v);
    }

    /// Bulk push; returns the number of supplied samples retained (see
    /// [`SampleStore::push_batch`]).
    pub fn push_batch(&self, values: &[f64]) -> usize {
        self.cell.borrow_mut().push_batch(values)
    }

    /// Resets the contents to exactly `values` (persistence restore path).
    pub fn replace(&self, values: &[f64]) {
        self.cell.borrow_mut().replace(values);
    }

    /// Returns the `i`-th sample in logical (oldest→newest) order.
    ///
    /// # Errors
    ///
    /// [`BufferError::IndexOutOfRange`] if `i` is outside `[0, len)`.
    pub fn get(&self, i: usize) -> Result<f64, BufferError> {
        self.cell.borrow().get(i)
    }

    /// Calls `f` with the contiguous oldest→newest view and returns its
    /// result. The store is borrowed for the duration of the call, so the
    /// closure cannot mutate the buffer through any aliasing handle — the
    /// zero-copy read contract ("do not retain the view across a mutation")
    /// is enforced at runtime by the `RefCell`.
    ///
    /// # Panics
    ///
    /// Panics if the buffer is already mutably borrowed (re-entrant use).
    ///
    /// # Example
    ///
    /// ```
    /// use samplekit::handle::SampleBuffer;
    /// use samplekit::policy::RetentionPolicy;
    ///
    /// let buf = SampleBuffer::with_policy(3, RetentionPolicy::Circular);
    /// buf.push_batch(&[1.0, 2.0, 3.0, 4.0]);
    ///
    /// let sum: f64 = buf.with_contiguous(|view| view.iter().sum());
    /// assert_eq!(sum, 9.0);
    /// ```
    pub fn with_contiguous<R>(&self, f: impl FnOnce(&[f64]) -> R) -> R {
        let mut store = self.cell.borrow_mut();
        f(store.as_contiguous())
    }

    /// Collects the logical sequence into an owned `Vec` (export path).
    pub fn to_vec(&self) -> Vec<f64> {
        self.cell.borrow().to_vec()
    }

    /// Smallest retained sample; `0.0` when empty.
    pub fn min(&self) -> f64 {
        self.cell.borrow().min()
    }

    /// Largest retained sample; `0.0` when empty.
    pub fn max(&self) -> f64 {
        self.cell.borrow().max()
    }

    /// Arithmetic mean of the retained samples; `0.0` when empty.
    pub fn mean(&self) -> f64 {
        self.cell.borrow().mean()
    }

    /// Population standard deviation; `0.0` when empty, never negative.
    pub fn std(&self) -> f64 {
        self.cell.borrow().std()
    }

    /// All four statistics in one cached snapshot.
    pub fn stats(&self) -> StatsSnapshot {
        let store = self.cell.borrow();
        StatsSnapshot {
            min: store.min(),
            max: store.max(),
            mean: store.mean(),
            std: store.std(),
        }
    }

    /// Borrows the underlying store for read access.
    ///
    /// Intended for collaborators that drive the store surface directly; the
    /// borrow must be dropped before any mutating call.
    pub fn store(&self) -> Ref<'_, SampleStore> {
        self.cell.borrow()
    }
}

/// Logical content equality: same length and element-wise equal samples, in
/// arrival order. Identity (aliasing) is irrelevant; compare with
/// [`aliases`](SampleBuffer::aliases) for that.
impl PartialEq for SampleBuffer {
    fn eq(&self, other: &SampleBuffer) -> bool {
        if Rc::ptr_eq(&self.cell, &other.cell) {
            return true;
        }
        self.cell.borrow().content_eq(&other.cell.borrow())
    }
}
