use std::f64::consts::TAU;

use super::{Point, TextAnchor, TextPlacement};

/// How far the label guide path reaches; a full turn would collapse its
/// start and end points onto each other.
pub const LABEL_PATH_SWEEP: f64 = 1.9999 * std::f64::consts::PI;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabelStyle {
    pub font_size: f64,
    /// Estimated glyph advance as a fraction of `font_size`.
    pub char_width_ratio: f64,
    /// Radius of the guide path used for horizontal placement.
    pub path_radius: f64,
    /// Radius where rotated labels start.
    pub radial_radius: f64,
    pub allow_horizontal: bool,
}

/// Rough label width. Glyph metrics depend on the renderer's font, so this
/// only has to be good enough to decide between the two placements.
pub fn estimated_text_width(text: &str, font_size: f64, char_width_ratio: f64) -> f64 {
    text.chars().count() as f64 * font_size * char_width_ratio
}

/// Places `text` centered between two angles along the guide path, falling
/// back to a radial label when it would not fit.
pub fn place_label(
    text: &str,
    angle_start: f64,
    angle_end: f64,
    center: Point,
    style: &LabelStyle,
) -> TextPlacement {
    let mid = angle_start + (angle_end - angle_start) / 2.0;
    let available = (angle_end - angle_start).abs() * style.path_radius;
    let needed = estimated_text_width(text, style.font_size, style.char_width_ratio);
    let on_guide = (0.0..LABEL_PATH_SWEEP).contains(&mid);

    if style.allow_horizontal && on_guide && needed < available {
        return TextPlacement::AlongPath {
            start_offset: mid * style.path_radius,
        };
    }
    radial_label(mid, style.radial_radius, center, style.font_size)
}

/// A label rotated to point away from `center` at `angle`, kept upright.
pub fn radial_label(angle: f64, radius: f64, center: Point, font_size: f64) -> TextPlacement {
    let degrees = angle.rem_euclid(TAU).to_degrees();
    let (rotation, anchor, x) = if flips_upright(degrees) {
        (degrees - 180.0, TextAnchor::End, center.x - radius)
    } else {
        (degrees, TextAnchor::Start, center.x + radius)
    };
    TextPlacement::Radial {
        x,
        y: center.y + font_size / 4.0,
        anchor,
        rotation,
        origin: center,
    }
}

/// Labels on the left half of the circle would read upside down.
pub fn flips_upright(degrees: f64) -> bool {
    degrees > 90.0 && degrees < 270.0
}
