//! Color assignment for objects, zones and path points.

use std::collections::HashMap;
use std::fmt;

use crate::overlay::lifecycle::ClassType;

/// Golden angle in degrees; consecutive hues land far apart on the wheel.
pub const GOLDEN_ANGLE: f64 = 137.508;

/// Fallback stroke color for zones without a configured color.
pub const DEFAULT_ZONE_COLOR: Color = Color::Rgb(255, 0, 0);

/// A CSS color, either RGB or HSL.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Color {
    Rgb(u8, u8, u8),
    Hsl {
        /// Degrees in [0, 360)
        hue: f64,
        /// Percent
        saturation: f64,
        /// Percent
        lightness: f64,
    },
}

impl Color {
    /// Build an RGB color from a BGR triple as stored in the configuration.
    pub fn from_bgr(bgr: [u8; 3]) -> Self {
        let [b, g, r] = bgr;
        Color::Rgb(r, g, b)
    }

    /// Convert to 8-bit RGB channels.
    pub fn to_rgb(&self) -> (u8, u8, u8) {
        match *self {
            Color::Rgb(r, g, b) => (r, g, b),
            Color::Hsl {
                hue,
                saturation,
                lightness,
            } => hsl_to_rgb(hue, saturation / 100.0, lightness / 100.0),
        }
    }

    /// Each channel reduced by `amount`, floored at zero.
    pub fn darken(&self, amount: u8) -> Self {
        let (r, g, b) = self.to_rgb();
        Color::Rgb(
            r.saturating_sub(amount),
            g.saturating_sub(amount),
            b.saturating_sub(amount),
        )
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Rgb(r, g, b) => write!(f, "rgb({r}, {g}, {b})"),
            Color::Hsl {
                hue,
                saturation,
                lightness,
            } => write!(f, "hsl({hue}, {saturation}%, {lightness}%)"),
        }
    }
}

fn hsl_to_rgb(hue: f64, s: f64, l: f64) -> (u8, u8, u8) {
    let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
    let h = hue.rem_euclid(360.0) / 60.0;
    let x = c * (1.0 - (h % 2.0 - 1.0).abs());
    let (r1, g1, b1) = match h as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };
    let m = l - c / 2.0;
    let channel = |v: f64| ((v + m) * 255.0).round().clamp(0.0, 255.0) as u8;
    (channel(r1), channel(g1), channel(b1))
}

/// Deterministic color for an object id.
///
/// The hue is the sum of the id's UTF-16 code units times the golden angle,
/// wrapped to 360 degrees, at 70% saturation and 50% lightness.
pub fn color_from_id(id: &str) -> Color {
    let sum: u64 = id.encode_utf16().map(u64::from).sum();
    Color::Hsl {
        hue: (sum as f64 * GOLDEN_ANGLE) % 360.0,
        saturation: 70.0,
        lightness: 50.0,
    }
}

/// Base color of an object: the label's configured color if any, else the
/// id-derived fallback.
pub fn object_color(label: &str, object_id: &str, colormap: &HashMap<String, [u8; 3]>) -> Color {
    colormap
        .get(label)
        .map(|bgr| Color::from_bgr(*bgr))
        .unwrap_or_else(|| color_from_id(object_id))
}

/// Stroke color of a zone.
pub fn zone_color(configured_bgr: Option<[u8; 3]>) -> Color {
    configured_bgr
        .map(Color::from_bgr)
        .unwrap_or(DEFAULT_ZONE_COLOR)
}

/// Fixed color of a known lifecycle classification.
pub fn class_color(class_type: ClassType) -> Option<Color> {
    let color = match class_type {
        ClassType::Visible => Color::Rgb(0, 255, 0),
        ClassType::Gone => Color::Rgb(255, 0, 0),
        ClassType::EnteredZone => Color::Rgb(255, 165, 0),
        ClassType::Attribute => Color::Rgb(128, 0, 128),
        ClassType::Active => Color::Rgb(255, 255, 0),
        ClassType::Stationary => Color::Rgb(128, 128, 128),
        ClassType::Heard => Color::Rgb(0, 255, 255),
        ClassType::External => Color::Rgb(165, 42, 42),
        ClassType::Unknown => return None,
    };
    Some(color)
}

/// Fill color of a path point marker.
///
/// Tagged points take their classification color; plain samples use a
/// slightly darker shade of the object's base color.
pub fn point_color(base: Color, class_type: Option<ClassType>) -> Color {
    class_type
        .and_then(class_color)
        .unwrap_or_else(|| base.darken(10))
}
