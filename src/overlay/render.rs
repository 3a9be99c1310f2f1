//! Projects a scene into pixel space and emits drawable shapes and SVG.

use chrono::{DateTime, Utc};
use nalgebra::Point2;
use ndarray::{Array2, arr1};

use crate::error::OverlayError;
use crate::overlay::color::{Color, point_color};
use crate::overlay::lifecycle::describe;
use crate::overlay::path::PathPoint;
use crate::overlay::rect::Rect;
use crate::overlay::scene::Scene;

/// Request sent to the video player when a marker is clicked.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeekRequest {
    /// Seconds, recording time base
    pub timestamp: f64,
    pub auto_play: bool,
}

/// Receiver of seek requests, typically the embedding video player.
///
/// Seeks are fire-and-forget: there is no acknowledgement.
pub trait SeekHandler {
    fn seek(&mut self, timestamp: f64, auto_play: bool);
}

impl<F: FnMut(f64, bool)> SeekHandler for F {
    fn seek(&mut self, timestamp: f64, auto_play: bool) {
        self(timestamp, auto_play)
    }
}

/// An interactive point marker.
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub object_id: String,
    /// Pixel coordinates
    pub center: Point2<f64>,
    pub radius: f64,
    pub fill: Color,
    pub stroke_width: f64,
    pub tooltip: String,
    /// `None` for markers that are not clickable
    pub seek: Option<SeekRequest>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoxKind {
    Object,
    Attribute,
}

/// A drawable element in pixel space.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Zone {
        name: String,
        points: Vec<Point2<f64>>,
        color: Color,
        stroke_width: f64,
    },
    Path {
        object_id: String,
        points: Vec<Point2<f64>>,
        color: Color,
        stroke_width: f64,
    },
    Marker(Marker),
    Box {
        object_id: String,
        kind: BoxKind,
        rect: Rect,
        color: Color,
        stroke_width: f64,
    },
}

/// Rendered overlay, sized to the video's pixel dimensions.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RenderedOverlay {
    pub width: f64,
    pub height: f64,
    pub shapes: Vec<Shape>,
}

impl RenderedOverlay {
    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// All markers in drawing order.
    pub fn markers(&self) -> impl Iterator<Item = &Marker> {
        self.shapes.iter().filter_map(|s| match s {
            Shape::Marker(m) => Some(m),
            _ => None,
        })
    }

    /// Forward a click on the `index`-th marker to `handler`.
    ///
    /// Clicking a non-interactive marker does nothing.
    pub fn click<H: SeekHandler + ?Sized>(
        &self,
        index: usize,
        handler: &mut H,
    ) -> Result<(), OverlayError> {
        let marker = self
            .markers()
            .nth(index)
            .ok_or(OverlayError::UnknownMarker(index))?;
        if let Some(request) = marker.seek {
            handler.seek(request.timestamp, request.auto_play);
        }
        Ok(())
    }

    /// SVG document for the overlay; empty when there is nothing to draw.
    ///
    /// The document declares its own `viewBox`, so it scales with whatever
    /// size its container gives it.
    pub fn to_svg(&self) -> String {
        if self.is_empty() {
            return String::new();
        }

        let mut svg = format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {} {}" width="100%" height="100%" preserveAspectRatio="xMidYMid meet">
"#,
            self.width, self.height
        );

        for shape in &self.shapes {
            let line = match shape {
                Shape::Zone {
                    name,
                    points,
                    color,
                    stroke_width,
                } => format!(
                    r#"  <polygon class="zone" data-zone="{}" points="{}" fill="{color}" fill-opacity="0.2" stroke="{color}" stroke-width="{stroke_width}"/>"#,
                    escape(name),
                    points_attr(points),
                ),
                Shape::Path {
                    object_id,
                    points,
                    color,
                    stroke_width,
                } => format!(
                    r#"  <polyline class="track-path" data-object-id="{}" points="{}" fill="none" stroke="{color}" stroke-width="{stroke_width}" stroke-linecap="round" stroke-linejoin="round"/>"#,
                    escape(object_id),
                    points_attr(points),
                ),
                Shape::Marker(marker) => {
                    let seek = marker
                        .seek
                        .map(|s| format!(r#" data-seek="{}" style="cursor: pointer""#, s.timestamp))
                        .unwrap_or_default();
                    format!(
                        r#"  <circle class="track-point" data-object-id="{}" cx="{}" cy="{}" r="{}" fill="{}" stroke="white" stroke-width="{}"{seek}><title>{}</title></circle>"#,
                        escape(&marker.object_id),
                        marker.center.x,
                        marker.center.y,
                        marker.radius,
                        marker.fill,
                        marker.stroke_width,
                        escape(&marker.tooltip),
                    )
                }
                Shape::Box {
                    object_id,
                    kind,
                    rect,
                    color,
                    stroke_width,
                } => format!(
                    r#"  <rect class="{}" data-object-id="{}" x="{}" y="{}" width="{}" height="{}" fill="none" stroke="{color}" stroke-width="{stroke_width}"/>"#,
                    match kind {
                        BoxKind::Object => "object-box",
                        BoxKind::Attribute => "attribute-box",
                    },
                    escape(object_id),
                    rect.x,
                    rect.y,
                    rect.width,
                    rect.height,
                ),
            };
            svg.push_str(&line);
            svg.push('\n');
        }

        svg.push_str("</svg>\n");
        svg
    }
}

/// Project normalized points onto a `width` x `height` frame.
pub fn project(points: &[Point2<f64>], width: f64, height: f64) -> Vec<Point2<f64>> {
    let normalized = Array2::from_shape_fn((points.len(), 2), |(i, j)| points[i][j]);
    let pixels = &normalized * &arr1(&[width, height]);
    pixels
        .rows()
        .into_iter()
        .map(|row| Point2::new(row[0], row[1]))
        .collect()
}

/// Render a scene into pixel-space shapes.
///
/// Zones come first, then each object's path, its markers and, when enabled,
/// its current boxes.
pub fn render(scene: &Scene<'_>) -> RenderedOverlay {
    let mut overlay = RenderedOverlay {
        width: scene.width,
        height: scene.height,
        shapes: Vec::new(),
    };
    if scene.is_empty() {
        return overlay;
    }

    let (w, h) = (scene.width, scene.height);
    let scale = scene.scale;

    for zone in &scene.zones {
        overlay.shapes.push(Shape::Zone {
            name: zone.name.clone(),
            points: project(&zone.vertices, w, h),
            color: zone.color,
            stroke_width: scale.zone_stroke,
        });
    }

    for object in &scene.objects {
        let positions: Vec<Point2<f64>> = object.path_points.iter().map(|p| p.position).collect();
        let pixels = project(&positions, w, h);

        if pixels.len() >= 2 {
            overlay.shapes.push(Shape::Path {
                object_id: object.object_id.to_string(),
                points: pixels.clone(),
                color: object.color,
                stroke_width: scale.path_stroke,
            });
        }

        for (point, center) in object.path_points.iter().zip(pixels) {
            overlay.shapes.push(Shape::Marker(Marker {
                object_id: object.object_id.to_string(),
                center,
                radius: scale.point_radius,
                fill: point_color(object.color, point.lifecycle_item.map(|r| r.class_type)),
                stroke_width: scale.point_stroke,
                tooltip: tooltip(point),
                seek: Some(SeekRequest {
                    timestamp: point.timestamp + scene.annotation_offset,
                    auto_play: false,
                }),
            }));
        }

        if !scene.show_bounding_boxes {
            continue;
        }
        if let Some(bbox) = object.current_box {
            overlay.shapes.push(Shape::Box {
                object_id: object.object_id.to_string(),
                kind: BoxKind::Object,
                rect: bbox.to_pixels(w, h),
                color: object.color,
                stroke_width: scale.box_stroke,
            });
            let anchor = bbox.bottom_center();
            overlay.shapes.push(Shape::Marker(Marker {
                object_id: object.object_id.to_string(),
                center: Point2::new(anchor.x * w, anchor.y * h),
                radius: scale.highlight_radius,
                fill: object.color,
                stroke_width: scale.point_stroke,
                tooltip: format!("{} (current position)", object.label),
                seek: None,
            }));
        }
        if let Some(attribute_box) = object.current_attribute_box {
            overlay.shapes.push(Shape::Box {
                object_id: object.object_id.to_string(),
                kind: BoxKind::Attribute,
                rect: attribute_box.to_pixels(w, h),
                color: object.color,
                stroke_width: scale.box_stroke,
            });
        }
    }

    overlay
}

fn tooltip(point: &PathPoint<'_>) -> String {
    let time = format_time(point.timestamp);
    match point.lifecycle_item {
        Some(record) => format!("{} at {time}", describe(record)),
        None => format!("Tracked point at {time}"),
    }
}

fn format_time(timestamp: f64) -> String {
    DateTime::<Utc>::from_timestamp_millis((timestamp * 1000.0).round() as i64)
        .map(|t| t.format("%Y-%m-%d %H:%M:%S%.3f").to_string())
        .unwrap_or_else(|| format!("{timestamp:.3}s"))
}

fn points_attr(points: &[Point2<f64>]) -> String {
    points
        .iter()
        .map(|p| format!("{},{}", p.x, p.y))
        .collect::<Vec<_>>()
        .join(" ")
}

fn escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::overlay::lifecycle::{ClassType, LifecycleRecord};
    use crate::overlay::scale::ScaleFactors;
    use crate::overlay::scene::TrackedObject;

    fn scene<'a>(record: &'a LifecycleRecord, show_boxes: bool) -> Scene<'a> {
        Scene {
            width: 1000.0,
            height: 500.0,
            scale: ScaleFactors::for_video(1000.0, 500.0, (1280.0, 720.0)),
            annotation_offset: 0.25,
            show_bounding_boxes: show_boxes,
            objects: vec![TrackedObject {
                object_id: "obj-1",
                label: "person",
                color: Color::Rgb(100, 100, 100),
                path_points: vec![
                    PathPoint::coarse(Point2::new(0.5, 0.5), 100.2),
                    PathPoint::from_record(record).unwrap(),
                ],
                current_zones: Vec::new(),
                current_box: record.bbox(),
                current_attribute_box: None,
            }],
            zones: Vec::new(),
        }
    }

    fn record() -> LifecycleRecord {
        LifecycleRecord::new("obj-1", 100.5, ClassType::Visible)
            .with_label("person")
            .with_box(Rect::new(0.4, 0.4, 0.1, 0.2))
    }

    #[test]
    fn test_project() {
        let pts = project(&[Point2::new(0.5, 0.25), Point2::new(1.0, 1.0)], 200.0, 100.0);
        assert_eq!(pts, vec![Point2::new(100.0, 25.0), Point2::new(200.0, 100.0)]);
        assert!(project(&[], 200.0, 100.0).is_empty());
    }

    #[test]
    fn test_render_shapes() {
        let record = record();
        let overlay = render(&scene(&record, true));

        assert!(matches!(overlay.shapes[0], Shape::Path { .. }));
        let markers: Vec<&Marker> = overlay.markers().collect();
        assert_eq!(markers.len(), 3);

        assert_eq!(markers[0].fill, Color::Rgb(90, 90, 90));
        assert!(markers[0].tooltip.starts_with("Tracked point at"));
        assert_eq!(markers[1].fill, Color::Rgb(0, 255, 0));
        assert!(markers[1].tooltip.starts_with("Person detected at"));
        assert!((markers[1].center.x - 450.0).abs() < 1e-9);
        assert!((markers[1].center.y - 300.0).abs() < 1e-9);

        // highlight marker at the current box's bottom center
        assert!(markers[2].seek.is_none());
        assert!(overlay.shapes.iter().any(|s| matches!(s, Shape::Box { kind: BoxKind::Object, .. })));
    }

    #[test]
    fn test_boxes_hidden_when_disabled() {
        let record = record();
        let overlay = render(&scene(&record, false));
        assert_eq!(overlay.markers().count(), 2);
        assert!(!overlay.shapes.iter().any(|s| matches!(s, Shape::Box { .. })));
    }

    #[test]
    fn test_click_seeks_with_offset() {
        let record = record();
        let overlay = render(&scene(&record, true));

        let mut seeks = Vec::new();
        overlay.click(1, &mut |ts: f64, play: bool| seeks.push((ts, play))).unwrap();
        assert_eq!(seeks.len(), 1);
        assert!((seeks[0].0 - 100.75).abs() < 1e-9);
        assert!(!seeks[0].1);

        // highlight marker is inert
        overlay.click(2, &mut |ts: f64, play: bool| seeks.push((ts, play))).unwrap();
        assert_eq!(seeks.len(), 1);

        assert!(matches!(
            overlay.click(9, &mut |_: f64, _: bool| {}),
            Err(OverlayError::UnknownMarker(9))
        ));
    }

    #[test]
    fn test_svg_output() {
        let record = record();
        let overlay = render(&scene(&record, true));
        let svg = overlay.to_svg();
        assert!(svg.starts_with("<svg"));
        // one line per shape between the open and close tags
        assert_eq!(svg.lines().count(), overlay.shapes.len() + 2);
        assert!(svg.ends_with("</svg>\n"));
        assert!(svg.contains(r#"viewBox="0 0 1000 500""#));
        assert!(svg.contains("<polyline"));
        assert_eq!(svg.matches("<circle").count(), 3);
        assert!(svg.contains(r#"data-seek="100.75""#));
        assert!(svg.contains("<title>Person detected at"));

        assert_eq!(RenderedOverlay::default().to_svg(), "");
    }

    #[test]
    fn test_format_time() {
        assert_eq!(format_time(0.0), "1970-01-01 00:00:00.000");
        assert_eq!(format_time(100.5), "1970-01-01 00:01:40.500");
    }
}
