//! Keys for the three read-only resources the overlay consumes.

/// A fetch the overlay needs from its data source.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum OverlayRequest {
    /// Batch event metadata lookup
    Events { ids: Vec<String> },
    /// Lifecycle records for the given objects
    Timeline { source_ids: Vec<String>, limit: usize },
    /// Global configuration
    Config,
}

impl OverlayRequest {
    /// Event lookup for `ids`, or `None` when nothing is selected.
    pub fn events(ids: &[String]) -> Option<Self> {
        (!ids.is_empty()).then(|| OverlayRequest::Events { ids: ids.to_vec() })
    }

    /// Timeline lookup for `ids`, or `None` when nothing is selected.
    pub fn timeline(ids: &[String], limit: usize) -> Option<Self> {
        (!ids.is_empty()).then(|| OverlayRequest::Timeline {
            source_ids: ids.to_vec(),
            limit,
        })
    }

    /// Relative API path, usable as a cache key.
    pub fn path(&self) -> String {
        match self {
            OverlayRequest::Events { ids } => format!("events?ids={}", ids.join(",")),
            OverlayRequest::Timeline { source_ids, limit } => {
                format!("timeline?source_id={}&limit={limit}", source_ids.join(","))
            }
            OverlayRequest::Config => "config".to_string(),
        }
    }

    /// Resource name used in log and error messages.
    pub fn resource(&self) -> &'static str {
        match self {
            OverlayRequest::Events { .. } => "events",
            OverlayRequest::Timeline { .. } => "timeline",
            OverlayRequest::Config => "config",
        }
    }
}
