//! Merges the coarse persisted path and the lifecycle-derived path of one
//! object into a single time-ordered, progressively revealed sequence.

use nalgebra::Point2;

use crate::overlay::lifecycle::LifecycleRecord;
use crate::overlay::timeline::within_tolerance;

/// A single spatial sample on an object's path.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathPoint<'a> {
    /// Normalized position in the unit square
    pub position: Point2<f64>,
    /// Seconds, detect stream time base
    pub timestamp: f64,
    /// Originating lifecycle record; `None` for coarse-path samples
    pub lifecycle_item: Option<&'a LifecycleRecord>,
}

impl<'a> PathPoint<'a> {
    pub fn coarse(position: Point2<f64>, timestamp: f64) -> Self {
        Self {
            position,
            timestamp,
            lifecycle_item: None,
        }
    }

    /// Point at the bottom center of the record's box, if it has one.
    pub fn from_record(record: &'a LifecycleRecord) -> Option<Self> {
        let bbox = record.bbox()?;
        Some(Self {
            position: bbox.bottom_center(),
            timestamp: record.timestamp,
            lifecycle_item: Some(record),
        })
    }
}

/// Reconstruct the revealed path of one object.
///
/// `records` may be in any order; records without a box contribute nothing.
/// Nothing is revealed before the object's `start_time`, or at all when the
/// start time is unknown. After that, every point up to
/// `effective_time + tolerance` is kept.
pub fn reconstruct_path<'a, I>(
    coarse_path: I,
    records: &[&'a LifecycleRecord],
    start_time: Option<f64>,
    effective_time: f64,
    tolerance: f64,
) -> Vec<PathPoint<'a>>
where
    I: IntoIterator<Item = (Point2<f64>, f64)>,
{
    let Some(start_time) = start_time else {
        return Vec::new();
    };
    if start_time > effective_time {
        return Vec::new();
    }

    let mut points: Vec<PathPoint<'a>> = coarse_path
        .into_iter()
        .map(|(position, timestamp)| PathPoint::coarse(position, timestamp))
        .chain(records.iter().copied().filter_map(PathPoint::from_record))
        .collect();

    // stable: coarse samples stay ahead of lifecycle points on ties
    points.sort_by(|a, b| a.timestamp.total_cmp(&b.timestamp));
    points.retain(|p| within_tolerance(p.timestamp - effective_time, tolerance));
    points
}
