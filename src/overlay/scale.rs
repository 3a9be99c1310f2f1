//! Resolution-adaptive stroke widths and marker radii.

/// Stroke and radius values for one video resolution, in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaleFactors {
    /// `sqrt(w * h) / sqrt(ref_w * ref_h)`
    pub factor: f64,
    pub path_stroke: f64,
    pub point_radius: f64,
    pub point_stroke: f64,
    pub highlight_radius: f64,
    pub zone_stroke: f64,
    pub box_stroke: f64,
}

impl ScaleFactors {
    /// Scale for a `video_width` x `video_height` frame relative to the
    /// reference resolution.
    pub fn for_video(video_width: f64, video_height: f64, reference: (f64, f64)) -> Self {
        let (ref_w, ref_h) = reference;
        let reference_area = ref_w * ref_h;
        let factor = if reference_area > 0.0 {
            ((video_width * video_height).max(0.0) / reference_area).sqrt()
        } else {
            1.0
        };

        Self {
            factor,
            path_stroke: (3.0 * factor).max(1.0),
            point_radius: (4.0 * factor).max(2.0),
            point_stroke: factor.max(1.0),
            highlight_radius: (6.0 * factor).max(3.0),
            zone_stroke: (2.0 * factor).max(1.0),
            box_stroke: (2.0 * factor).max(1.0),
        }
    }
}
