//! Groups flat lifecycle timelines by object.

use crate::overlay::lifecycle::LifecycleRecord;

/// Split `records` into one sub-sequence per selected object.
///
/// The result is parallel to `selected_ids`. Each entry keeps the records'
/// fetch order; ids without records map to an empty sequence.
pub fn group_by_object<'a, S: AsRef<str>>(
    records: &'a [LifecycleRecord],
    selected_ids: &[S],
) -> Vec<Vec<&'a LifecycleRecord>> {
    selected_ids
        .iter()
        .map(|id| {
            let id = id.as_ref();
            records.iter().filter(|r| r.source_id == id).collect()
        })
        .collect()
}

/// Slack added to every tolerance comparison. Timestamps arrive as decimal
/// seconds, so `99.99 - 100.0` is not exactly `-0.01`.
const TIME_EPSILON: f64 = 1e-9;

/// Whether a signed time difference `delta` is at most `tolerance`.
#[inline]
pub fn within_tolerance(delta: f64, tolerance: f64) -> bool {
    delta <= tolerance + TIME_EPSILON
}

/// Time-ascending copy of `records`. Equal timestamps keep their order.
pub fn sorted_by_time<'a>(records: &[&'a LifecycleRecord]) -> Vec<&'a LifecycleRecord> {
    let mut sorted = records.to_vec();
    sorted.sort_by(|a, b| a.timestamp.total_cmp(&b.timestamp));
    sorted
}
