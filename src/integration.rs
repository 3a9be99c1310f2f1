//! Integration module for connecting the overlay to its data source and
//! video player.
//!
//! This module provides the fetch capability trait, the request keys for the
//! three consumed resources, and a pipeline that ties fetching, scene
//! computation and rendering together.

mod pipeline;
mod request;
mod source;

pub use pipeline::{OverlayData, OverlayPipeline, PlaybackView};
pub use request::OverlayRequest;
pub use source::{DataSource, decode_config, decode_events, decode_timeline};
