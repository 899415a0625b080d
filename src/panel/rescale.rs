//! Proportional rescale of a run of sizes to a new total
//!
//! Each size is turned into a boundary (the running prefix sum), every
//! boundary is scaled and rounded independently, and the new sizes are the
//! differences between consecutive rounded boundaries. The last boundary is
//! exactly the new total, so rounding never leaves a remainder and repeated
//! rescales do not drift.

/// `numerator / denominator` rounded half away from zero
///
/// `denominator` must be positive.
pub fn div_round(numerator: i64, denominator: i64) -> i64 {
    debug_assert!(denominator > 0);
    if numerator >= 0 {
        (2 * numerator + denominator) / (2 * denominator)
    } else {
        -((-2 * numerator + denominator) / (2 * denominator))
    }
}

/// Scale `value` by `new_total / old_total`, rounded; `old_total` must be positive
pub fn scale(value: i32, old_total: i32, new_total: i32) -> i32 {
    div_round(value as i64 * new_total as i64, old_total as i64) as i32
}

/// Rescale `sizes` (currently summing to `old_total`) so they sum to `new_total`
///
/// No-op when the totals match. A zero `old_total` has no proportions to
/// preserve; the new total is then split evenly, the remainder going to the
/// leading entries.
pub fn rescale<'a>(
    sizes: impl IntoIterator<Item = &'a mut i32>,
    old_total: i32,
    new_total: i32,
) {
    if old_total == new_total {
        return;
    }

    let mut sizes: Vec<&mut i32> = sizes.into_iter().collect();
    if sizes.is_empty() {
        return;
    }

    let new_total = new_total.max(0);
    if old_total <= 0 {
        split_evenly(&mut sizes, new_total);
        return;
    }

    let mut old_cursor: i64 = 0;
    let mut new_cursor: i64 = 0;
    for size in sizes.iter_mut() {
        old_cursor += **size as i64;
        let boundary = div_round(old_cursor * new_total as i64, old_total as i64);
        **size = (boundary - new_cursor) as i32;
        new_cursor = boundary;
    }
}

/// Sizes of `(size, measured_at)` entries laid out for `target`
///
/// Each entry scales by `target / measured_at` and the results go through the
/// same rounded prefix sums as [`rescale`]. Entries whose `measured_at` is 0
/// keep their size. Scaling always starts from the given sizes, so shrinking
/// and regrowing returns the original layout.
pub fn rescale_from(entries: impl IntoIterator<Item = (i32, i32)>, target: i32) -> Vec<i32> {
    let target = target.max(0) as i128;
    // Running boundary, kept exact as numerator / denominator
    let mut numerator: i128 = 0;
    let mut denominator: i128 = 1;
    let mut previous: i128 = 0;

    entries
        .into_iter()
        .map(|(size, measured_at)| {
            let size = size.max(0) as i128;
            let (scaled, over) = if measured_at > 0 {
                (size * target, measured_at as i128)
            } else {
                (size, 1)
            };
            numerator = numerator * over + scaled * denominator;
            denominator *= over;
            let divisor = gcd(numerator, denominator);
            numerator /= divisor;
            denominator /= divisor;

            let boundary = (2 * numerator + denominator) / (2 * denominator);
            let size = boundary - previous;
            previous = boundary;
            size as i32
        })
        .collect()
}

fn gcd(mut a: i128, mut b: i128) -> i128 {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

fn split_evenly(sizes: &mut [&mut i32], total: i32) {
    let count = sizes.len() as i32;
    let base = total / count;
    let remainder = total % count;
    for (i, size) in sizes.iter_mut().enumerate() {
        **size = base + i32::from((i as i32) < remainder);
    }
}
