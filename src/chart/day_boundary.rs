use crate::chart::time_format::DisplayZone;

pub const MILLIS_PER_DAY: i64 = 86_400_000;

/// Local-midnight markers strictly inside `[min_ms, max_ms]`.
///
/// Starts from the midnight after the day containing `min_ms` and steps a
/// fixed 24 h until passing `max_ms`, so a boundary equal to `min_ms` is never
/// produced.
#[must_use]
pub fn boundaries(zone: DisplayZone, min_ms: i64, max_ms: i64) -> Vec<i64> {
    let Some(first_midnight) = zone.start_of_day_ms(min_ms) else {
        return Vec::new();
    };

    let mut out = Vec::new();
    let mut candidate = first_midnight + MILLIS_PER_DAY;
    // A 25 h DST day can leave the first candidate at or before min_ms.
    while candidate <= min_ms {
        candidate += MILLIS_PER_DAY;
    }
    while candidate <= max_ms {
        out.push(candidate);
        candidate += MILLIS_PER_DAY;
    }
    out
}

/// Day boundaries for an arbitrary set of millisecond timestamps.
///
/// Returns an empty list when `timestamps` is empty.
pub fn boundaries_for<I>(zone: DisplayZone, timestamps: I) -> Vec<i64>
where
    I: IntoIterator<Item = i64>,
{
    let range = timestamps
        .into_iter()
        .fold(None, |acc: Option<(i64, i64)>, ts| match acc {
            None => Some((ts, ts)),
            Some((lo, hi)) => Some((lo.min(ts), hi.max(ts))),
        });

    match range {
        Some((min_ms, max_ms)) => boundaries(zone, min_ms, max_ms),
        None => Vec::new(),
    }
}
