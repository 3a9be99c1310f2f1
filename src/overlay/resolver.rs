//! Derives an object's zones and boxes at the playback time.

use crate::overlay::lifecycle::LifecycleRecord;
use crate::overlay::rect::Rect;
use crate::overlay::timeline::within_tolerance;

/// Boxes shown for an object at the playback time.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CurrentBoxes {
    pub bbox: Option<Rect>,
    pub attribute_box: Option<Rect>,
}

/// Zones of the latest record at or before `effective_time`.
pub fn current_zones(
    records: &[&LifecycleRecord],
    effective_time: f64,
    tolerance: f64,
) -> Vec<String> {
    records
        .iter()
        .filter(|r| within_tolerance(r.timestamp - effective_time, tolerance))
        // max_by keeps the last of equal maxima; later fetch order wins ties
        .max_by(|a, b| a.timestamp.total_cmp(&b.timestamp))
        .map(|r| r.zones().to_vec())
        .unwrap_or_default()
}

/// Boxes of the box-bearing record nearest to `effective_time`.
///
/// The nearest record is chosen first and only then checked against the
/// tolerance, so a box is never borrowed from a farther record. On equal
/// distance the earlier record in `records` wins.
pub fn current_boxes(
    records: &[&LifecycleRecord],
    effective_time: f64,
    tolerance: f64,
) -> CurrentBoxes {
    let mut nearest: Option<(&LifecycleRecord, f64)> = None;
    for record in records.iter().copied().filter(|r| r.bbox().is_some()) {
        let distance = (record.timestamp - effective_time).abs();
        match nearest {
            Some((_, best)) if best <= distance => {}
            _ => nearest = Some((record, distance)),
        }
    }

    match nearest {
        Some((record, distance)) if within_tolerance(distance, tolerance) => CurrentBoxes {
            bbox: record.bbox(),
            attribute_box: record.attribute_box(),
        },
        _ => CurrentBoxes::default(),
    }
}
