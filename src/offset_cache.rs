use alloc::sync::Arc;
use alloc::vec;
use alloc::vec::Vec;
use core::cmp;

use crate::prefix_sum::IndexedPrefixSum;
use crate::{Margin, Measurement, OnChangeCallback};

/// An indexed offset cache for a windowing renderer.
///
/// The cache tracks, per item, a measured or estimated pixel height plus
/// adjoining margins, derives each item's *effective size* (height plus the
/// CSS-style collapsed margin shared with its predecessor), and feeds the
/// effective sizes into an [`IndexedPrefixSum`]. That lets it answer the two
/// inverse queries a virtualized list needs in `O(log n)`:
///
/// - [`Self::offset_of`]: the cumulative pixel offset of item `i`, and
/// - [`Self::index_at_offset`]: the item occupying pixel offset `o`.
///
/// The cache measures nothing itself. The renderer lays out an item, calls
/// [`Self::report`] with the result, and re-queries offsets when the change
/// callback fires. The callback runs synchronously inside `report` (and the
/// structural edits) and fires only when a stored effective size actually
/// changed; it must not call back into the cache.
///
/// Capacity is always a power of two (requested sizes round up), so repeated
/// [`Self::grow`] calls amortize to `O(log n)` per appended item even though
/// each growth rebuilds the offsets wholesale.
#[derive(Clone)]
pub struct OffsetCache {
    capacity: usize,
    estimate: u32,
    settled: Vec<bool>,
    margins: Vec<Margin>,
    heights: Vec<u32>,
    offsets: IndexedPrefixSum,
    last_set: usize, // exclusive upper bound of the reported region
    on_change: Option<OnChangeCallback>,
}

impl OffsetCache {
    /// Creates a cache for at least `size` items, using `estimate` as the
    /// placeholder height for items that have never been measured.
    ///
    /// # Panics
    ///
    /// Panics if `size` is 0.
    pub fn new(size: usize, estimate: u32) -> Self {
        assert!(size > 0, "size must be positive");
        let capacity = size.next_power_of_two();
        ocdebug!(requested = size, capacity, estimate, "OffsetCache::new");
        let mut cache = Self {
            capacity,
            estimate,
            settled: vec![false; capacity],
            margins: vec![Margin::default(); capacity],
            heights: vec![estimate; capacity],
            offsets: IndexedPrefixSum::from_weights(&[]),
            last_set: 0,
            on_change: None,
        };
        cache.rebuild_offsets();
        cache
    }

    /// Installs the change callback.
    ///
    /// The callback is an injected dependency of the cache, not ambient
    /// state: one logical owner sets it once and receives every subsequent
    /// notification.
    pub fn set_on_change(&mut self, on_change: Option<impl Fn() + Send + Sync + 'static>) {
        self.on_change = on_change.map(|f| Arc::new(f) as _);
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn estimate(&self) -> u32 {
        self.estimate
    }

    /// Grows the cache to hold at least `size` items.
    ///
    /// New slots start unsettled with the estimate height and zero margins.
    /// No-op when `size` does not exceed the current capacity.
    pub fn grow(&mut self, size: usize) {
        if size <= self.capacity {
            return;
        }
        let capacity = size.next_power_of_two();
        ocdebug!(from = self.capacity, to = capacity, "grow");
        self.settled.resize(capacity, false);
        self.margins.resize(capacity, Margin::default());
        self.heights.resize(capacity, self.estimate);
        self.capacity = capacity;
        self.rebuild_offsets();
    }

    /// Restores every slot to the unsettled/estimate/zero-margin state.
    pub fn reset(&mut self) {
        ocdebug!(capacity = self.capacity, "reset");
        self.settled.fill(false);
        self.margins.fill(Margin::default());
        self.heights.fill(self.estimate);
        self.last_set = 0;
        self.rebuild_offsets();
    }

    /// Invalidates a single slot without removing it, so a remeasure/report
    /// cycle can be scheduled for content that went stale.
    ///
    /// Equivalent to reporting an unsettled estimate with zero margins.
    pub fn unset(&mut self, index: usize) {
        let estimate = self.estimate;
        self.report(
            index,
            Measurement {
                settled: false,
                height: estimate,
                margin_top: 0,
                margin_bottom: 0,
            },
        );
    }

    /// Removes the first `n` logical entries, shifting all slots left and
    /// backfilling the vacated tail with defaults.
    ///
    /// Used to bound memory when old history is evicted. `n` is clamped to
    /// the capacity.
    pub fn prune(&mut self, n: usize) {
        let n = cmp::min(n, self.capacity);
        if n == 0 {
            return;
        }
        ocdebug!(n, capacity = self.capacity, "prune");
        let tail = self.capacity - n;
        self.settled.copy_within(n.., 0);
        self.settled[tail..].fill(false);
        self.margins.copy_within(n.., 0);
        self.margins[tail..].fill(Margin::default());
        self.heights.copy_within(n.., 0);
        self.heights[tail..].fill(self.estimate);
        self.last_set = self.last_set.saturating_sub(n);
        self.rebuild_offsets();
    }

    /// Records a measurement for `index`.
    ///
    /// Recomputes the collapsed effective size for `index` and for
    /// `index + 1` (whose effective size depends on this item's bottom
    /// margin) and fires the change callback iff at least one stored value
    /// changed. Idempotent: repeating a call with identical arguments
    /// notifies on the first call only.
    ///
    /// # Panics
    ///
    /// Panics if `index >= capacity()`, or if the collapsed margins would
    /// drive an effective size negative.
    pub fn report(&mut self, index: usize, measurement: Measurement) {
        assert!(
            index < self.capacity,
            "index out of range (index={index}, capacity={})",
            self.capacity
        );
        octrace!(
            index,
            settled = measurement.settled,
            height = measurement.height,
            margin_top = measurement.margin_top,
            margin_bottom = measurement.margin_bottom,
            "report"
        );
        self.settled[index] = measurement.settled;
        self.margins[index] = Margin {
            top: measurement.margin_top,
            bottom: measurement.margin_bottom,
        };
        self.heights[index] = measurement.height;
        self.last_set = cmp::max(self.last_set, index + 1);

        let changed = self.sync_offset(index);
        let next_changed = index + 1 < self.capacity && self.sync_offset(index + 1);
        if changed || next_changed {
            self.notify();
        }
    }

    /// Removes `n` entries starting at `index` from the reported region,
    /// shifting the remainder of the region down and backfilling defaults at
    /// its end.
    ///
    /// `n` is clamped to the reported region; a call at or past the region
    /// is ignored. Fires the change callback iff any effective size changed.
    pub fn remove(&mut self, index: usize, n: usize) {
        assert!(
            index < self.capacity,
            "index out of range (index={index}, capacity={})",
            self.capacity
        );
        if index >= self.last_set {
            ocwarn!(index, last_set = self.last_set, "remove past the reported region");
            return;
        }
        let n = cmp::min(n, self.last_set - index);
        if n == 0 {
            return;
        }
        octrace!(index, n, "remove");

        let old_last_set = self.last_set;
        self.settled.copy_within(index + n..old_last_set, index);
        self.settled[old_last_set - n..old_last_set].fill(false);
        self.margins.copy_within(index + n..old_last_set, index);
        self.margins[old_last_set - n..old_last_set].fill(Margin::default());
        self.heights.copy_within(index + n..old_last_set, index);
        self.heights[old_last_set - n..old_last_set].fill(self.estimate);
        self.last_set = old_last_set - n;

        // One past the shifted region: its collapsed margin depends on the
        // (now backfilled) predecessor's bottom margin.
        let mut changed = false;
        for i in index..cmp::min(old_last_set + 1, self.capacity) {
            changed |= self.sync_offset(i);
        }
        if changed {
            self.notify();
        }
    }

    /// Inserts `n` unsettled default slots at `index`, shifting the reported
    /// region up. Entries pushed past the capacity fall off the end.
    ///
    /// A call at or past the reported region is ignored. Fires the change
    /// callback iff any effective size changed.
    pub fn insert(&mut self, index: usize, n: usize) {
        assert!(
            index < self.capacity,
            "index out of range (index={index}, capacity={})",
            self.capacity
        );
        if index >= self.last_set {
            ocwarn!(index, last_set = self.last_set, "insert past the reported region");
            return;
        }
        if n == 0 {
            return;
        }
        octrace!(index, n, "insert");

        let src_end = cmp::min(self.last_set, self.capacity.saturating_sub(n));
        if index < src_end {
            self.settled.copy_within(index..src_end, index + n);
            self.margins.copy_within(index..src_end, index + n);
            self.heights.copy_within(index..src_end, index + n);
        }
        let fill_end = cmp::min(index + n, self.capacity);
        self.settled[index..fill_end].fill(false);
        self.margins[index..fill_end].fill(Margin::default());
        self.heights[index..fill_end].fill(self.estimate);
        self.last_set = cmp::min(self.last_set + n, self.capacity);

        let mut changed = false;
        for i in index..cmp::min(self.last_set + 1, self.capacity) {
            changed |= self.sync_offset(i);
        }
        if changed {
            self.notify();
        }
    }

    /// Whether the stored height at `index` is an authoritative measurement.
    ///
    /// `false` means a placeholder estimate: the renderer may still draw at
    /// the predicted offset but should schedule a remeasure/report cycle.
    pub fn is_settled(&self, index: usize) -> bool {
        self.settled[index]
    }

    pub fn height(&self, index: usize) -> u32 {
        self.heights[index]
    }

    pub fn margin(&self, index: usize) -> Margin {
        self.margins[index]
    }

    /// Cumulative pixel offset of the top edge of item `index`.
    ///
    /// `offset_of(capacity())` is the total content height.
    pub fn offset_of(&self, index: usize) -> u64 {
        self.offsets.prefix_sum(index)
    }

    /// Index of the item occupying pixel offset `offset`.
    ///
    /// Returns `capacity()` when `offset` is past the end of the content;
    /// callers clamp to their item count.
    pub fn index_at_offset(&self, offset: u64) -> usize {
        self.offsets.rank(offset)
    }

    /// Total of all effective sizes (the content height).
    pub fn total_size(&self) -> u64 {
        self.offsets.total()
    }

    fn rebuild_offsets(&mut self) {
        let mut weights = Vec::with_capacity(self.capacity);
        for i in 0..self.capacity {
            weights.push(self.effective_size(i));
        }
        self.offsets.build(&weights);
    }

    /// Height plus the margin collapsed with the predecessor. Index 0 has no
    /// predecessor; its previous bottom margin is taken as 0.
    fn effective_size(&self, index: usize) -> u64 {
        let prev_bottom = if index == 0 {
            0
        } else {
            self.margins[index - 1].bottom
        };
        let margin = collapse_margins(prev_bottom, self.margins[index].top);
        let size = i64::from(self.heights[index]) + i64::from(margin);
        assert!(
            size >= 0,
            "effective size must be non-negative (index={index}, height={}, margin={margin})",
            self.heights[index]
        );
        size as u64
    }

    fn sync_offset(&mut self, index: usize) -> bool {
        let size = self.effective_size(index);
        if self.offsets.get(index) == size {
            return false;
        }
        self.offsets.set(index, size);
        true
    }

    fn notify(&self) {
        if let Some(cb) = &self.on_change {
            cb();
        }
    }
}

impl core::fmt::Debug for OffsetCache {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("OffsetCache")
            .field("capacity", &self.capacity)
            .field("estimate", &self.estimate)
            .field("last_set", &self.last_set)
            .field("total_size", &self.offsets.total())
            .finish_non_exhaustive()
    }
}

/// Collapses two adjoining margins into one effective gap, the way CSS
/// collapses adjoining block margins: the most negative wins when both are
/// negative, the largest wins when both are non-negative, mixed signs sum.
pub(crate) fn collapse_margins(a: i32, b: i32) -> i32 {
    if a < 0 && b < 0 {
        cmp::min(a, b)
    } else if a >= 0 && b >= 0 {
        cmp::max(a, b)
    } else {
        a + b
    }
}
