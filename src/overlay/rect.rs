use nalgebra::Point2;
use serde::{Deserialize, Serialize};

/// Normalized bounding box in the unit interval.
///
/// Stored in TLWH order, matching the `[x, y, width, height]` arrays the
/// timeline API emits:
/// - x: left edge, 0.0 at the left of the frame
/// - y: top edge, 0.0 at the top of the frame
/// - width, height: fraction of the frame dimensions
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 4]", into = "[f64; 4]")]
pub struct Rect {
    /// Top-left x coordinate
    pub x: f64,
    /// Top-left y coordinate
    pub y: f64,
    /// Width of the bounding box
    pub width: f64,
    /// Height of the bounding box
    pub height: f64,
}

impl Rect {
    /// Create a new Rect from top-left coordinates and dimensions (TLWH format).
    #[inline]
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Create a Rect from a `[left, top, width, height]` array.
    #[inline]
    pub fn from_tlwh(tlwh: [f64; 4]) -> Self {
        Self::new(tlwh[0], tlwh[1], tlwh[2], tlwh[3])
    }

    /// Convert to TLWH format: (x, y, width, height).
    #[inline]
    pub fn to_tlwh(&self) -> [f64; 4] {
        [self.x, self.y, self.width, self.height]
    }

    /// Get the center point of the bounding box.
    #[inline]
    pub fn center(&self) -> Point2<f64> {
        Point2::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Horizontal center of the bottom edge.
    ///
    /// This is where the object touches the ground, which moves far less
    /// frame to frame than the box center does.
    #[inline]
    pub fn bottom_center(&self) -> Point2<f64> {
        Point2::new(self.x + self.width / 2.0, self.y + self.height)
    }

    /// Get the area of the bounding box.
    #[inline]
    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    /// Project onto a frame of `frame_width` x `frame_height` pixels.
    pub fn to_pixels(&self, frame_width: f64, frame_height: f64) -> Rect {
        Rect {
            x: self.x * frame_width,
            y: self.y * frame_height,
            width: self.width * frame_width,
            height: self.height * frame_height,
        }
    }
}

impl From<[f64; 4]> for Rect {
    fn from(tlwh: [f64; 4]) -> Self {
        Self::from_tlwh(tlwh)
    }
}

impl From<Rect> for [f64; 4] {
    fn from(rect: Rect) -> Self {
        rect.to_tlwh()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_conversions() {
        let rect = Rect::new(0.1, 0.2, 0.3, 0.4);
        assert_eq!(rect.to_tlwh(), [0.1, 0.2, 0.3, 0.4]);
        assert_eq!(Rect::from_tlwh([0.1, 0.2, 0.3, 0.4]), rect);
    }

    #[test]
    fn test_bottom_center() {
        let rect = Rect::new(0.4, 0.4, 0.1, 0.2);
        let p = rect.bottom_center();
        assert!((p.x - 0.45).abs() < 1e-9);
        assert!((p.y - 0.6).abs() < 1e-9);
    }

    #[test]
    fn test_center_and_area() {
        let rect = Rect::new(0.0, 0.0, 0.5, 0.25);
        let c = rect.center();
        assert!((c.x - 0.25).abs() < 1e-9);
        assert!((c.y - 0.125).abs() < 1e-9);
        assert!((rect.area() - 0.125).abs() < 1e-9);
    }

    #[test]
    fn test_to_pixels() {
        let rect = Rect::new(0.25, 0.5, 0.5, 0.25);
        assert_eq!(rect.to_pixels(1280.0, 720.0).to_tlwh(), [320.0, 360.0, 640.0, 180.0]);
    }

    #[test]
    fn test_deserialize_from_array() {
        let rect: Rect = serde_json::from_str("[0.4, 0.4, 0.1, 0.2]").unwrap();
        assert_eq!(rect, Rect::new(0.4, 0.4, 0.1, 0.2));
    }
}
