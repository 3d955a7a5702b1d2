//! Geometry module - dial layout and angle/value conversions
//!
//! Provides pure functions for computing the circular draw region, mapping
//! between screen points, display angles and scale values, and producing the
//! render-ready tick/wedge/arrow geometry consumed by the drawing module.

use nannou::prelude::*;

/// Outer padding of the draw region; leaves room for the scale labels.
pub const PADDING: f32 = 40.0;
/// Length of a scale tick protruding past the circle rim.
pub const SCALE_PADDING: f32 = 5.0;
/// Rotation placing the scale's zero point at the top of the circle.
pub const STANDARD_OFFSET: f32 = 90.0;
/// Distance from a tick tip to the center of its label.
const LABEL_OFFSET: f32 = 20.0;

/// A single scale graduation: the tick line and its label.
#[derive(Debug, Clone)]
pub struct ScaleTick {
    /// Tick line start (the dial center; the filled circle covers the inner span)
    pub start: Point2,
    /// Tick line end, just past the circle rim
    pub end: Point2,
    /// Center point for the label text
    pub label_anchor: Point2,
    /// Decorated label text
    pub label: String,
}

/// A forbidden arc expressed in display angles, ready to paint as a pie wedge.
#[derive(Debug, Clone, Copy)]
pub struct SectorWedge {
    /// Display angle of the arc's start, in degrees
    pub start_angle: f32,
    /// Signed sweep in degrees; the sign follows the scale direction
    pub span_angle: f32,
}

/// Compute the square draw region centered in the viewport.
///
/// Side length is the smaller viewport dimension minus both paddings on each
/// side. Degenerate viewports clamp to a zero-size square.
pub fn compute_draw_rect(viewport: Rect) -> Rect {
    let side = (viewport.w().min(viewport.h()) - 2.0 * (PADDING + SCALE_PADDING)).max(0.0);
    Rect::from_x_y_w_h(viewport.x(), viewport.y(), side, side)
}

/// Map a value in `[minimum, maximum]` to a scale angle in `[0, 360]`.
pub fn angle_from_value(value: f32, minimum: f32, maximum: f32) -> f32 {
    (value - minimum) * 360.0 / (maximum - minimum)
}

/// Inverse of [`angle_from_value`].
pub fn value_from_angle(angle: f32, minimum: f32, maximum: f32) -> f32 {
    angle / 360.0 * (maximum - minimum) + minimum
}

/// Resolve a screen point to the scale value under it.
///
/// Takes the angle of the ray from the draw-region center to the point,
/// removes the configured offset and the standard top-of-circle rotation,
/// applies the direction sign and reduces into `[0, 360)` before converting
/// to a value.
pub fn value_at_point(
    point: Point2,
    draw_rect: Rect,
    direction_sign: f32,
    offset: f32,
    minimum: f32,
    maximum: f32,
) -> f32 {
    let ray = point - draw_rect.xy();
    let screen_angle = ray.y.atan2(ray.x).to_degrees();
    let scale_angle = ((screen_angle - offset - STANDARD_OFFSET) * direction_sign).rem_euclid(360.0);
    value_from_angle(scale_angle, minimum, maximum)
}

/// Display angle (in screen degrees) at which a value is drawn.
pub fn display_angle(
    value: f32,
    minimum: f32,
    maximum: f32,
    direction_sign: f32,
    offset: f32,
) -> f32 {
    direction_sign * angle_from_value(value, minimum, maximum) + offset + STANDARD_OFFSET
}

/// Unit direction at `angle_deg` scaled by `radius`.
pub fn polar(angle_deg: f32, radius: f32) -> Vec2 {
    let radians = angle_deg.to_radians();
    vec2(radians.cos(), radians.sin()) * radius
}

/// Compute the tick lines and labels of the dial scale.
///
/// Ticks start at the configured offset (rotated so zero sits at the top) and
/// step `360 / tick_count` degrees in the scale direction; labels step
/// `range / tick_count` in value terms.
#[allow(clippy::too_many_arguments)]
pub fn compute_scale(
    draw_rect: Rect,
    minimum: f32,
    maximum: f32,
    direction_sign: f32,
    offset: f32,
    tick_count: u32,
    prefix: &str,
    suffix: &str,
) -> Vec<ScaleTick> {
    let center = draw_rect.xy();
    let tick_radius = draw_rect.w() / 2.0 + SCALE_PADDING;
    let label_radius = tick_radius + LABEL_OFFSET;
    let angle_step = 360.0 / tick_count as f32 * direction_sign;
    let value_step = (maximum - minimum) / tick_count as f32;

    (0..tick_count)
        .map(|i| {
            let angle = offset + STANDARD_OFFSET + angle_step * i as f32;
            let value = minimum + value_step * i as f32;
            ScaleTick {
                start: center,
                end: center + polar(angle, tick_radius),
                label_anchor: center + polar(angle, label_radius),
                label: format!("{}{}{}", prefix, format_value(value), suffix),
            }
        })
        .collect()
}

/// Display-angle wedge for a forbidden arc from `first` to `second`.
///
/// The span always sweeps the arc from `first` to `second` walked in
/// increasing-value direction, so wrapping arcs resolve to the short way
/// around through the domain boundary.
pub fn sector_wedge(
    first: f32,
    second: f32,
    minimum: f32,
    maximum: f32,
    direction_sign: f32,
    offset: f32,
) -> SectorWedge {
    let first_angle = angle_from_value(first, minimum, maximum);
    let second_angle = angle_from_value(second, minimum, maximum);
    SectorWedge {
        start_angle: first_angle * direction_sign + offset + STANDARD_OFFSET,
        span_angle: (second_angle - first_angle + 360.0).rem_euclid(360.0) * direction_sign,
    }
}

/// Indicator line from the draw-region center to the circle rim.
pub fn arrow_line(
    draw_rect: Rect,
    value: f32,
    minimum: f32,
    maximum: f32,
    direction_sign: f32,
    offset: f32,
) -> (Point2, Point2) {
    let center = draw_rect.xy();
    let angle = display_angle(value, minimum, maximum, direction_sign, offset);
    (center, center + polar(angle, draw_rect.w() / 2.0))
}

/// Format a value for scale and indicator labels, dropping a trailing `.0`.
pub fn format_value(value: f32) -> String {
    if (value - value.round()).abs() < 1e-4 {
        format!("{}", value.round() as i64)
    } else {
        format!("{:.1}", value)
    }
}
