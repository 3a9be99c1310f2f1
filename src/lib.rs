//! Object-track overlay engine.
//!
//! Reconstructs, for a set of selected tracked objects, their trajectory,
//! zones and bounding boxes as of a playback timestamp, and renders them as
//! an interactive vector overlay aligned to the video frame.
//!
//! The core is [`compute_scene`], a pure function of the selection, the
//! playback time and the fetched data. [`render`] projects the scene into
//! pixel space, and [`OverlayPipeline`] wires both to a [`DataSource`].

pub mod error;
pub mod integration;
pub mod overlay;

pub use error::OverlayError;
pub use integration::{DataSource, OverlayData, OverlayPipeline, OverlayRequest, PlaybackView};
pub use overlay::{
    ClassType, Color, EventMetadata, GlobalConfig, LifecycleRecord, OverlaySettings, PathPoint,
    Rect, RenderedOverlay, Scene, SceneInput, SeekHandler, SeekRequest, Shape, TrackedObject,
    color_from_id, compute_scene, render,
};
