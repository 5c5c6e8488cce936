//! Position resolution
//!
//! Maps a virtual position (seconds since the start of the play order) to
//! the item it falls in. Pure functions over a duration list and a play
//! order, so the session, the shuffle engine and tests share one walk.

/// Item a position resolves to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolved {
    /// Index into the play order
    pub order_index: usize,

    /// Index into the source's linear item list
    pub item_index: usize,

    /// Position at which this item starts in the play order
    pub start: u64,

    /// Item duration
    pub duration: u64,

    /// Seconds elapsed inside the item
    pub elapsed: u64,
}

impl Resolved {
    /// Seconds left in the item
    pub fn remaining(&self) -> u64 {
        self.duration.saturating_sub(self.elapsed)
    }

    /// Position at which the item ends
    pub fn end(&self) -> u64 {
        self.start + self.duration
    }
}

/// Find the item containing `position`, taken modulo the total duration
///
/// Zero-length items never match. Returns `None` when the total duration
/// is zero.
pub fn resolve(durations: &[u64], order: &[usize], position: u64) -> Option<Resolved> {
    let total: u64 = durations.iter().sum();
    if total == 0 {
        return None;
    }

    let position = position % total;
    let mut start = 0;

    for (order_index, &item_index) in order.iter().enumerate() {
        let duration = durations[item_index];
        if start + duration > position {
            return Some(Resolved {
                order_index,
                item_index,
                start,
                duration,
                elapsed: position - start,
            });
        }
        start += duration;
    }

    None
}

/// Resolve the item at `order_index` with the clock at its very end
pub fn resolve_at_end(durations: &[u64], order: &[usize], order_index: usize) -> Option<Resolved> {
    let item_index = *order.get(order_index)?;
    let duration = durations[item_index];

    Some(Resolved {
        order_index,
        item_index,
        start: played_duration_before(durations, order, order_index),
        duration,
        elapsed: duration,
    })
}

/// Sum of the durations of items preceding `order_index` in the play order
pub fn played_duration_before(durations: &[u64], order: &[usize], order_index: usize) -> u64 {
    order
        .iter()
        .take(order_index)
        .map(|&item| durations[item])
        .sum()
}
