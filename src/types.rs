use alloc::sync::Arc;

/// A callback fired when a stored effective size changes.
///
/// The cache does not report *which* index changed: any invocation means some
/// offset downstream may have shifted, so the consumer should re-query
/// [`crate::OffsetCache::offset_of`] / [`crate::OffsetCache::index_at_offset`]
/// and re-derive its visible window conservatively.
pub type OnChangeCallback = Arc<dyn Fn() + Send + Sync>;

/// Top and bottom margins adjoining an item, in pixels.
///
/// Margins may be negative, as in CSS.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Margin {
    pub top: i32,
    pub bottom: i32,
}

/// A layout measurement reported for a single item.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Measurement {
    /// Whether `height` comes from real layout (authoritative) rather than a
    /// placeholder estimate.
    pub settled: bool,
    /// The item's own height in pixels, excluding margins.
    pub height: u32,
    pub margin_top: i32,
    pub margin_bottom: i32,
}

impl Measurement {
    /// A settled (authoritative) measurement.
    pub fn settled(height: u32, margin_top: i32, margin_bottom: i32) -> Self {
        Self {
            settled: true,
            height,
            margin_top,
            margin_bottom,
        }
    }
}
