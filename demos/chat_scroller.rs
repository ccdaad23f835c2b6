// Example: a windowing renderer driving the cache while messages stream in.
use offset_cache::{Measurement, OffsetCache};

fn main() {
    let mut cache = OffsetCache::new(64, 24);

    let mut count = 0usize;
    for batch in 0..4 {
        // messages stream in; the renderer grows the cache ahead of layout
        count += 200;
        cache.grow(count);

        // lay out the items around the viewport and report what was measured
        let scroll_top = (batch * 1000) as u64;
        let viewport = 480u64;
        let start = cache.index_at_offset(scroll_top);
        let end = cache.index_at_offset(scroll_top + viewport).min(count - 1) + 1;
        for i in start..end {
            let measured = 18 + ((i * 13) % 48) as u32;
            cache.report(i, Measurement::settled(measured, 8, 8));
        }
        println!(
            "batch={batch} window={start}..{end} total_height={}",
            cache.total_size()
        );
    }

    // old history is evicted to bound memory
    cache.prune(400);
    println!("after prune: total_height={}", cache.total_size());
    println!("offset_of(10)={}", cache.offset_of(10));
    println!("index_at_offset(500)={}", cache.index_at_offset(500));
}
