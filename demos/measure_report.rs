// Example: change notification and invalidation.
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use offset_cache::{Measurement, OffsetCache};

fn main() {
    let mut cache = OffsetCache::new(16, 20);
    let changes = Arc::new(AtomicUsize::new(0));
    let hook = Arc::clone(&changes);
    cache.set_on_change(Some(move || {
        hook.fetch_add(1, Ordering::Relaxed);
    }));

    cache.report(3, Measurement::settled(44, 8, 8));
    cache.report(3, Measurement::settled(44, 8, 8)); // identical: notified once
    println!("changes={}", changes.load(Ordering::Relaxed));
    println!(
        "offset_of(4)={} settled={}",
        cache.offset_of(4),
        cache.is_settled(3)
    );

    // the message got edited; its height is stale until remeasured
    cache.unset(3);
    println!(
        "after unset: changes={} offset_of(4)={} settled={}",
        changes.load(Ordering::Relaxed),
        cache.offset_of(4),
        cache.is_settled(3)
    );
}
