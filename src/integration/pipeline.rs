//! OverlayPipeline for combining a data source with scene computation.

use std::fmt::Display;

use tracing::{debug, warn};

use crate::error::OverlayError;
use crate::integration::request::OverlayRequest;
use crate::integration::source::{DataSource, decode_config, decode_events, decode_timeline};
use crate::overlay::{
    EventMetadata, GlobalConfig, LifecycleRecord, OverlaySettings, RenderedOverlay, Scene,
    SceneInput, SeekHandler, compute_scene, render,
};

/// Latest fetch results. `None` means pending or failed.
#[derive(Debug, Clone, Default)]
pub struct OverlayData {
    pub events: Option<Vec<EventMetadata>>,
    pub timeline: Option<Vec<LifecycleRecord>>,
    pub config: Option<GlobalConfig>,
}

/// Player-side state the overlay is drawn for.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaybackView {
    /// Seconds
    pub current_time: f64,
    pub video_width: f64,
    pub video_height: f64,
    pub show_bounding_boxes: bool,
}

/// Bundles a `DataSource` with scene computation and rendering.
///
/// Fetch failures never propagate: they are logged and the affected data
/// set is treated as missing until the next successful fetch.
pub struct OverlayPipeline<S: DataSource> {
    source: S,
    camera: String,
    settings: OverlaySettings,
    annotation_offset: Option<f64>,
    selected_ids: Vec<String>,
    data: OverlayData,
}

impl<S> OverlayPipeline<S>
where
    S: DataSource,
    S::Error: Display,
{
    /// Create a new pipeline for `camera`.
    pub fn new(source: S, camera: impl Into<String>, settings: OverlaySettings) -> Self {
        Self {
            source,
            camera: camera.into(),
            settings,
            annotation_offset: None,
            selected_ids: Vec::new(),
            data: OverlayData::default(),
        }
    }

    /// Create a new pipeline with default settings.
    pub fn with_default_settings(source: S, camera: impl Into<String>) -> Self {
        Self::new(source, camera, OverlaySettings::default())
    }

    /// Use a fixed annotation offset (seconds) instead of the camera's
    /// configured one.
    pub fn with_annotation_offset(mut self, offset: f64) -> Self {
        self.annotation_offset = Some(offset);
        self
    }

    /// Replace the selected objects.
    ///
    /// A new selection refetches its events and timeline. Reselecting the
    /// same ids only retries the resources still pending or failed.
    pub fn select(&mut self, ids: Vec<String>) {
        if ids != self.selected_ids {
            self.selected_ids = ids;
            self.data.events = None;
            self.data.timeline = None;
        }
        if self.data.events.is_none() {
            self.refresh_events();
        }
        if self.data.timeline.is_none() {
            self.refresh_timeline();
        }
        if self.data.config.is_none() {
            self.refresh_config();
        }
    }

    /// Refetch all three resources.
    pub fn refresh(&mut self) {
        self.refresh_config();
        self.refresh_objects();
    }

    fn refresh_config(&mut self) {
        self.data.config = self.load(&OverlayRequest::Config, decode_config);
    }

    fn refresh_objects(&mut self) {
        self.refresh_events();
        self.refresh_timeline();
    }

    fn refresh_events(&mut self) {
        self.data.events = OverlayRequest::events(&self.selected_ids)
            .and_then(|request| self.load(&request, decode_events));
    }

    fn refresh_timeline(&mut self) {
        self.data.timeline =
            OverlayRequest::timeline(&self.selected_ids, self.settings.timeline_limit)
                .and_then(|request| self.load(&request, decode_timeline));
    }

    fn load<T>(
        &mut self,
        request: &OverlayRequest,
        decode: fn(&str) -> Result<T, OverlayError>,
    ) -> Option<T> {
        match self.source.fetch(request) {
            Ok(Some(body)) => match decode(&body) {
                Ok(value) => Some(value),
                Err(e) => {
                    warn!(path = %request.path(), error = %e, "discarding undecodable payload");
                    None
                }
            },
            Ok(None) => {
                debug!(path = %request.path(), "fetch pending");
                None
            }
            Err(e) => {
                warn!(path = %request.path(), error = %e, "fetch failed");
                None
            }
        }
    }

    /// Offset in effect: the override, else the camera's configured offset.
    pub fn annotation_offset(&self) -> f64 {
        self.annotation_offset.unwrap_or_else(|| {
            self.data
                .config
                .as_ref()
                .and_then(|c| c.camera(&self.camera))
                .map_or(0.0, |c| c.annotation_offset_secs())
        })
    }

    /// Compute the scene for `view` from the latest fetch results.
    pub fn scene(&self, view: &PlaybackView) -> Scene<'_> {
        let input = SceneInput {
            camera: &self.camera,
            selected_ids: &self.selected_ids,
            current_time: view.current_time,
            video_width: view.video_width,
            video_height: view.video_height,
            show_bounding_boxes: view.show_bounding_boxes,
            annotation_offset: self.annotation_offset(),
            events: self.data.events.as_deref(),
            timeline: self.data.timeline.as_deref(),
            config: self.data.config.as_ref(),
        };
        compute_scene(&input, &self.settings)
    }

    /// Compute and render the overlay for `view`.
    pub fn render(&self, view: &PlaybackView) -> RenderedOverlay {
        render(&self.scene(view))
    }

    /// Forward a marker click on `overlay` to the player.
    pub fn click<H: SeekHandler + ?Sized>(
        &self,
        overlay: &RenderedOverlay,
        marker_index: usize,
        player: &mut H,
    ) -> Result<(), OverlayError> {
        overlay.click(marker_index, player)
    }

    pub fn selected_ids(&self) -> &[String] {
        &self.selected_ids
    }

    pub fn data(&self) -> &OverlayData {
        &self.data
    }

    pub fn settings(&self) -> &OverlaySettings {
        &self.settings
    }

    /// Get a reference to the underlying data source.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Get a mutable reference to the underlying data source.
    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }
}
