//! Least Recently Used (LRU) Victim Selection.
//!
//! Each line records the value of the cache-wide access clock at its last hit
//! or fill. The victim is the line with the smallest stamp in its set.
//!
//! # Tie-breaking
//!
//! The scan runs from way 0 upward and only replaces the current candidate on a
//! strictly smaller stamp, so among equal stamps the lowest way wins.
//!
//! # Performance
//!
//! - **Time Complexity:** O(E) per victim selection
//! - **Space Complexity:** one `u64` stamp per line, stored in the line itself

use super::set::Line;

/// Returns the way index of the least recently used line in `lines`.
///
/// Returns 0 for an empty slice; sets are never empty once a geometry is validated.
///
/// # Arguments
///
/// * `lines` - The lines of one set, in way order.
pub fn select_victim(lines: &[Line]) -> usize {
    let mut victim = 0;
    let mut oldest = u64::MAX;

    for (way, line) in lines.iter().enumerate() {
        if way == 0 || line.last_used() < oldest {
            oldest = line.last_used();
            victim = way;
        }
    }

    victim
}
