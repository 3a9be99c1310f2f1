//! Error type shared by the decoding and pipeline layers.

use thiserror::Error;

/// Errors raised while decoding fetched data or dispatching interactions.
///
/// Scene computation itself never fails; callers that hit one of these
/// degrade to an empty overlay.
#[derive(Debug, Error)]
pub enum OverlayError {
    /// A fetched payload did not match the expected shape.
    #[error("failed to decode {resource} payload: {source}")]
    Decode {
        resource: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// Zone coordinates could not be parsed into vertices.
    #[error("invalid coordinates for zone {zone}: {reason}")]
    InvalidCoordinates { zone: String, reason: String },

    /// A click referenced a marker the scene does not contain.
    #[error("no marker at index {0}")]
    UnknownMarker(usize),
}

impl OverlayError {
    pub fn decode(resource: &'static str, source: serde_json::Error) -> Self {
        Self::Decode { resource, source }
    }

    pub fn invalid_coordinates(zone: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidCoordinates {
            zone: zone.into(),
            reason: reason.into(),
        }
    }
}
