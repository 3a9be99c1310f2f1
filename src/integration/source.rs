//! Injected fetch capability and payload decoding.

use crate::error::OverlayError;
use crate::integration::request::OverlayRequest;
use crate::overlay::{EventMetadata, GlobalConfig, LifecycleRecord};

/// Trait for the data-fetching collaborator.
///
/// Implement this to connect the overlay to an HTTP client, a cache, or
/// fixtures. Caching, deduplication and cancellation belong to the
/// implementation.
///
/// # Example
///
/// ```ignore
/// use track_overlay::{DataSource, OverlayRequest};
///
/// struct Fixtures;
///
/// impl DataSource for Fixtures {
///     type Error = std::io::Error;
///
///     fn fetch(&mut self, request: &OverlayRequest) -> Result<Option<String>, Self::Error> {
///         std::fs::read_to_string(format!("fixtures/{}.json", request.resource())).map(Some)
///     }
/// }
/// ```
pub trait DataSource {
    /// Error type for transport failures.
    type Error;

    /// Fetch the raw JSON body for `request`.
    ///
    /// # Returns
    /// `Ok(None)` while the response is still pending.
    fn fetch(&mut self, request: &OverlayRequest) -> Result<Option<String>, Self::Error>;
}

impl<F, E> DataSource for F
where
    F: FnMut(&OverlayRequest) -> Result<Option<String>, E>,
{
    type Error = E;

    fn fetch(&mut self, request: &OverlayRequest) -> Result<Option<String>, Self::Error> {
        self(request)
    }
}

/// Decode an `events` response body.
pub fn decode_events(body: &str) -> Result<Vec<EventMetadata>, OverlayError> {
    serde_json::from_str(body).map_err(|e| OverlayError::decode("events", e))
}

/// Decode a `timeline` response body.
pub fn decode_timeline(body: &str) -> Result<Vec<LifecycleRecord>, OverlayError> {
    serde_json::from_str(body).map_err(|e| OverlayError::decode("timeline", e))
}

/// Decode a `config` response body.
pub fn decode_config(body: &str) -> Result<GlobalConfig, OverlayError> {
    serde_json::from_str(body).map_err(|e| OverlayError::decode("config", e))
}
