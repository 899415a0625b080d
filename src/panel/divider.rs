//! Divider geometry and drag resolution between two adjacent slots
//!
//! Divider `index` (1-based over slot boundaries) sits between slot
//! `index - 1` ("before") and slot `index` ("after"). Dividers hold no state
//! of their own; the drag record lives in the "after" slot.

use crate::geometry::{Orientation, Rect};

/// Hit region of one divider along the container's axis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DividerSpan {
    pub start: i32,
    pub len: i32,
}

impl DividerSpan {
    /// Hit region for a divider whose "after" slot starts at `after_start`
    ///
    /// The region reaches `thickness` back into the "before" slot and up to
    /// `thickness` into the "after" slot, never more than half of it unless
    /// it is the last slot.
    pub fn new(after_start: i32, after_size: i32, is_last: bool, thickness: i32) -> Self {
        let extra = if is_last {
            thickness
        } else {
            (after_size / 2).min(thickness)
        };
        Self {
            start: after_start - thickness,
            len: thickness + extra,
        }
    }

    /// Region as a rectangle spanning the full cross axis
    pub fn to_rect(self, orientation: Orientation, cross: i32) -> Rect {
        orientation.rect(self.start, self.len, 0, cross)
    }
}

/// Allowed range of the "before" slot's growth for divider `index`
///
/// The first divider keeps the first slot at `min_panel` or more and the
/// last divider keeps the last slot at `min_panel` or more; interior slots
/// may collapse to zero.
pub fn drag_bounds(
    index: usize,
    last_index: usize,
    before: i32,
    after: i32,
    min_panel: i32,
) -> (i32, i32) {
    let low = if index == 1 { min_panel - before } else { -before };
    let high = if index == last_index {
        after - min_panel
    } else {
        after
    };
    (low, high)
}

/// Move the boundary by as much of `delta` as the bounds allow
///
/// Returns the amount applied; the caller keeps the rest pending. When the
/// bounds cross (the pair is too small to honor the minimum) nothing moves.
pub fn apply_drag(
    index: usize,
    last_index: usize,
    before: &mut i32,
    after: &mut i32,
    delta: i32,
    min_panel: i32,
) -> i32 {
    let (low, high) = drag_bounds(index, last_index, *before, *after, min_panel);
    if low > high {
        return 0;
    }
    let applied = delta.clamp(low, high);
    *before += applied;
    *after -= applied;
    applied
}
