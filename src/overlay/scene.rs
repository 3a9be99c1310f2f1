//! Pure derivation of the overlay scene from fetched data and playback state.

use nalgebra::Point2;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::OverlayError;
use crate::overlay::camera::GlobalConfig;
use crate::overlay::color::{Color, object_color, zone_color};
use crate::overlay::event::{EventMetadata, UNKNOWN_LABEL, find_event};
use crate::overlay::lifecycle::LifecycleRecord;
use crate::overlay::path::{PathPoint, reconstruct_path};
use crate::overlay::rect::Rect;
use crate::overlay::resolver::{current_boxes, current_zones};
use crate::overlay::scale::ScaleFactors;
use crate::overlay::timeline::{group_by_object, sorted_by_time};

/// Configuration for scene computation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlaySettings {
    /// Seconds of slack when matching records to the playback time
    pub tolerance: f64,
    pub reference_width: f64,
    pub reference_height: f64,
    /// Record limit passed to the timeline lookup
    pub timeline_limit: usize,
}

impl Default for OverlaySettings {
    fn default() -> Self {
        Self {
            tolerance: 0.010,
            reference_width: 1280.0,
            reference_height: 720.0,
            timeline_limit: 1000,
        }
    }
}

impl OverlaySettings {
    /// Load settings from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, OverlayError> {
        serde_json::from_str(json).map_err(|e| OverlayError::decode("settings", e))
    }

    pub fn reference_resolution(&self) -> (f64, f64) {
        (self.reference_width, self.reference_height)
    }
}

/// Everything a scene is computed from.
///
/// Fetched data sets are `None` while pending or after a failed fetch.
#[derive(Debug, Clone, Copy)]
pub struct SceneInput<'a> {
    pub camera: &'a str,
    pub selected_ids: &'a [String],
    /// Playback position, seconds
    pub current_time: f64,
    pub video_width: f64,
    pub video_height: f64,
    pub show_bounding_boxes: bool,
    /// Seconds subtracted from the playback time before matching records,
    /// and added back to seek targets
    pub annotation_offset: f64,
    pub events: Option<&'a [EventMetadata]>,
    pub timeline: Option<&'a [LifecycleRecord]>,
    pub config: Option<&'a GlobalConfig>,
}

impl<'a> SceneInput<'a> {
    /// Playback time translated into the detect stream's time base.
    pub fn effective_time(&self) -> f64 {
        self.current_time - self.annotation_offset
    }
}

/// One selected object as it appears at the playback time.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackedObject<'a> {
    pub object_id: &'a str,
    pub label: &'a str,
    pub color: Color,
    /// Revealed points, ascending by timestamp, never empty
    pub path_points: Vec<PathPoint<'a>>,
    pub current_zones: Vec<String>,
    pub current_box: Option<Rect>,
    pub current_attribute_box: Option<Rect>,
}

/// A zone polygon referenced by at least one visible object.
#[derive(Debug, Clone, PartialEq)]
pub struct ZoneShape {
    pub name: String,
    pub color: Color,
    /// Normalized vertices
    pub vertices: Vec<Point2<f64>>,
}

/// Derived overlay state in normalized coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct Scene<'a> {
    pub width: f64,
    pub height: f64,
    pub scale: ScaleFactors,
    pub annotation_offset: f64,
    pub show_bounding_boxes: bool,
    pub objects: Vec<TrackedObject<'a>>,
    pub zones: Vec<ZoneShape>,
}

impl<'a> Scene<'a> {
    fn empty(input: &SceneInput<'a>, settings: &OverlaySettings) -> Self {
        Self {
            width: input.video_width,
            height: input.video_height,
            scale: ScaleFactors::for_video(
                input.video_width,
                input.video_height,
                settings.reference_resolution(),
            ),
            annotation_offset: input.annotation_offset,
            show_bounding_boxes: input.show_bounding_boxes,
            objects: Vec::new(),
            zones: Vec::new(),
        }
    }

    /// Whether there is nothing to draw.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn object(&self, object_id: &str) -> Option<&TrackedObject<'a>> {
        self.objects.iter().find(|o| o.object_id == object_id)
    }
}

/// Compute the overlay scene.
///
/// The result is empty when the configuration or event metadata has not
/// arrived, when the camera is autotracking, or when no selected object has
/// a revealed point. A missing timeline is treated as an empty one.
pub fn compute_scene<'a>(input: &SceneInput<'a>, settings: &OverlaySettings) -> Scene<'a> {
    let mut scene = Scene::empty(input, settings);

    let (Some(config), Some(events)) = (input.config, input.events) else {
        return scene;
    };
    let camera = config.camera(input.camera);
    if camera.is_some_and(|c| c.autotracking_enabled()) {
        debug!(camera = input.camera, "autotracking enabled, overlay suppressed");
        return scene;
    }

    let effective_time = input.effective_time();
    let timeline = input.timeline.unwrap_or(&[]);
    let grouped = group_by_object(timeline, input.selected_ids);

    for (object_id, records) in input.selected_ids.iter().zip(grouped) {
        let event = find_event(events, object_id);
        let records = sorted_by_time(&records);
        let boxed: Vec<&LifecycleRecord> =
            records.iter().copied().filter(|r| r.bbox().is_some()).collect();

        let path_points = reconstruct_path(
            event.into_iter().flat_map(|e| e.coarse_path()),
            &boxed,
            event.and_then(|e| e.start_time),
            effective_time,
            settings.tolerance,
        );
        if path_points.is_empty() {
            continue;
        }

        let label = event.map_or(UNKNOWN_LABEL, |e| e.label());
        let boxes = current_boxes(&records, effective_time, settings.tolerance);

        scene.objects.push(TrackedObject {
            object_id: object_id.as_str(),
            label,
            color: object_color(label, object_id, &config.model.colormap),
            path_points,
            current_zones: current_zones(&records, effective_time, settings.tolerance),
            current_box: boxes.bbox,
            current_attribute_box: boxes.attribute_box,
        });
    }

    if let Some(camera) = camera {
        let mut seen: Vec<&str> = Vec::new();
        let referenced = scene.objects.iter().flat_map(|o| o.current_zones.iter());
        for name in referenced {
            if seen.contains(&name.as_str()) {
                continue;
            }
            seen.push(name);

            let Some(zone) = camera.zones.get(name) else {
                continue;
            };
            match zone.vertices(name) {
                Ok(vertices) => scene.zones.push(ZoneShape {
                    name: name.clone(),
                    color: zone_color(zone.color),
                    vertices,
                }),
                Err(e) => warn!(camera = input.camera, error = %e, "skipping zone"),
            }
        }
    }

    debug!(
        camera = input.camera,
        time = input.current_time,
        objects = scene.objects.len(),
        zones = scene.zones.len(),
        "computed overlay scene"
    );
    scene
}
