mod camera;
mod color;
mod event;
mod lifecycle;
mod path;
mod rect;
mod render;
mod resolver;
mod scale;
mod scene;
mod timeline;

pub use camera::{
    AutotrackingConfig, CameraConfig, DetectConfig, GlobalConfig, ModelConfig, OnvifConfig,
    ZoneConfig, ZoneCoordinates,
};
pub use color::{
    Color, DEFAULT_ZONE_COLOR, GOLDEN_ANGLE, class_color, color_from_id, object_color,
    point_color, zone_color,
};
pub use event::{CoarseSample, EventData, EventMetadata, UNKNOWN_LABEL, find_event};
pub use lifecycle::{ClassType, LifecycleData, LifecycleRecord, describe};
pub use path::{PathPoint, reconstruct_path};
pub use rect::Rect;
pub use render::{BoxKind, Marker, RenderedOverlay, SeekHandler, SeekRequest, Shape, project, render};
pub use resolver::{CurrentBoxes, current_boxes, current_zones};
pub use scale::ScaleFactors;
pub use scene::{OverlaySettings, Scene, SceneInput, TrackedObject, ZoneShape, compute_scene};
pub use timeline::{group_by_object, sorted_by_time, within_tolerance};
