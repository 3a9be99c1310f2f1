//! Per-object event metadata returned by the batch event lookup.

use nalgebra::Point2;
use serde::{Deserialize, Serialize};

/// Label reported for objects whose metadata has not arrived.
pub const UNKNOWN_LABEL: &str = "unknown";

/// One sample of the coarse persisted path: `[[x, y], timestamp]`.
pub type CoarseSample = ([f64; 2], f64);

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EventData {
    /// Coarse path persisted with the event, normalized coordinates
    pub path_data: Vec<CoarseSample>,
}

/// Metadata for one tracked object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventMetadata {
    pub id: String,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub camera: Option<String>,
    #[serde(default)]
    pub start_time: Option<f64>,
    #[serde(default)]
    pub end_time: Option<f64>,
    #[serde(default)]
    pub data: EventData,
}

impl EventMetadata {
    /// Create an event with a label and start time and no path.
    pub fn new(id: impl Into<String>, label: impl Into<String>, start_time: f64) -> Self {
        Self {
            id: id.into(),
            label: Some(label.into()),
            camera: None,
            start_time: Some(start_time),
            end_time: None,
            data: EventData::default(),
        }
    }

    /// Set the coarse path samples.
    pub fn with_path(mut self, path_data: Vec<CoarseSample>) -> Self {
        self.data.path_data = path_data;
        self
    }

    /// Label, or `"unknown"` when the event has none.
    pub fn label(&self) -> &str {
        self.label.as_deref().unwrap_or(UNKNOWN_LABEL)
    }

    /// Coarse path samples as `(position, timestamp)` pairs.
    pub fn coarse_path(&self) -> impl Iterator<Item = (Point2<f64>, f64)> + '_ {
        self.data
            .path_data
            .iter()
            .map(|([x, y], timestamp)| (Point2::new(*x, *y), *timestamp))
    }
}

/// Find the metadata for `id` in a batch lookup result.
pub fn find_event<'a>(events: &'a [EventMetadata], id: &str) -> Option<&'a EventMetadata> {
    events.iter().find(|e| e.id == id)
}
