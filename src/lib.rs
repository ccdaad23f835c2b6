//! An indexed offset cache for virtualized message lists.
//!
//! This crate virtualizes the layout math of a long, append-mostly sequence
//! of variably-sized items (chat messages and similar): it tracks a measured
//! or estimated pixel height plus adjoining margins per item and answers the
//! two inverse queries a windowing renderer needs in `O(log n)`:
//!
//! - the cumulative offset of item `i` ([`OffsetCache::offset_of`]), and
//! - which item occupies pixel offset `o` ([`OffsetCache::index_at_offset`]).
//!
//! It is UI-agnostic and measures nothing itself. A rendering layer is
//! expected to:
//! - lay out items and feed measurements back via [`OffsetCache::report`],
//! - re-query offsets when the change callback fires, and
//! - decide visibility by pairing the two queries over its viewport.
//!
//! Effective sizes reproduce CSS adjoining-margin collapse, so the cache's
//! pixel predictions match what the layout engine actually draws.
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod offset_cache;
mod prefix_sum;
mod types;


pub use offset_cache::OffsetCache;
pub use prefix_sum::IndexedPrefixSum;
pub use types::{Margin, Measurement, OnChangeCallback};
