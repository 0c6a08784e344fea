use std::cell::Cell;

use tether_core::remember;

/// Number of passes this call-site has been part of, the current one included.
pub fn use_render_count() -> u64 {
    let count = remember(|| Cell::new(0u64));
    count.set(count.get() + 1);
    count.get()
}
