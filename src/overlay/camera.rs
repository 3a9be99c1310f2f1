//! The subset of the global configuration the overlay reads.

use std::collections::HashMap;

use nalgebra::Point2;
use serde::{Deserialize, Serialize};

use crate::error::OverlayError;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GlobalConfig {
    pub model: ModelConfig,
    pub cameras: HashMap<String, CameraConfig>,
}

impl GlobalConfig {
    pub fn camera(&self, name: &str) -> Option<&CameraConfig> {
        self.cameras.get(name)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    /// Label -> BGR color
    pub colormap: HashMap<String, [u8; 3]>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub zones: HashMap<String, ZoneConfig>,
    pub onvif: OnvifConfig,
    pub detect: DetectConfig,
}

impl CameraConfig {
    /// Autotracking moves the camera, so stored trajectories no longer line
    /// up with the frame.
    pub fn autotracking_enabled(&self) -> bool {
        self.onvif.autotracking.enabled || self.onvif.autotracking.enabled_in_config
    }

    /// Offset between detect-stream and recording timestamps, in seconds.
    pub fn annotation_offset_secs(&self) -> f64 {
        self.detect.annotation_offset as f64 / 1000.0
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OnvifConfig {
    pub autotracking: AutotrackingConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AutotrackingConfig {
    pub enabled: bool,
    pub enabled_in_config: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectConfig {
    /// Milliseconds
    pub annotation_offset: i64,
}

/// Zone polygon coordinates as they appear in the configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ZoneCoordinates {
    /// `"x1,y1,x2,y2,..."`
    Flat(String),
    /// `["x1,y1", "x2,y2", ...]`
    Pairs(Vec<String>),
    /// `[[x1, y1], [x2, y2], ...]`
    Points(Vec<[f64; 2]>),
}

impl Default for ZoneCoordinates {
    fn default() -> Self {
        ZoneCoordinates::Points(Vec::new())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZoneConfig {
    pub coordinates: ZoneCoordinates,
    /// BGR
    pub color: Option<[u8; 3]>,
}

impl ZoneConfig {
    /// Polygon vertices in normalized coordinates, in configuration order.
    pub fn vertices(&self, zone: &str) -> Result<Vec<Point2<f64>>, OverlayError> {
        let values: Vec<f64> = match &self.coordinates {
            ZoneCoordinates::Points(points) => {
                return Ok(points.iter().map(|[x, y]| Point2::new(*x, *y)).collect());
            }
            ZoneCoordinates::Flat(flat) => parse_numbers(zone, flat.split(','))?,
            ZoneCoordinates::Pairs(pairs) => {
                parse_numbers(zone, pairs.iter().flat_map(|p| p.split(',')))?
            }
        };

        if values.len() % 2 != 0 {
            return Err(OverlayError::invalid_coordinates(
                zone,
                format!("odd number of values ({})", values.len()),
            ));
        }

        Ok(values
            .chunks_exact(2)
            .map(|xy| Point2::new(xy[0], xy[1]))
            .collect())
    }
}

fn parse_numbers<'a, I>(zone: &str, parts: I) -> Result<Vec<f64>, OverlayError>
where
    I: Iterator<Item = &'a str>,
{
    parts
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<f64>()
                .map_err(|e| OverlayError::invalid_coordinates(zone, format!("{s:?}: {e}")))
        })
        .collect()
}
