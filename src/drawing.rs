//! Drawing module - dial scale, forbidden sectors and indicator rendering
//!
//! Renders the dial from the control's current state using nannou's Draw API:
//! tick scale and labels first, then the base circle over the inner tick
//! spans, then the forbidden-arc wedges, then the indicator arrow on top.

use nannou::prelude::*;

use crate::control::DialControl;
use crate::geometry::{self, SectorWedge};

/// Default palette, matching the dialog's classic look.
pub mod colors {
    use nannou::prelude::*;

    pub const BACKGROUND: Srgb<u8> = Srgb {
        red: 255,
        green: 255,
        blue: 255,
        standard: std::marker::PhantomData,
    };
    pub const CIRCLE_FILL: Srgb<u8> = Srgb {
        red: 255,
        green: 255,
        blue: 255,
        standard: std::marker::PhantomData,
    };
    pub const CIRCLE_OUTLINE: Srgb<u8> = Srgb {
        red: 0,
        green: 0,
        blue: 0,
        standard: std::marker::PhantomData,
    };
    pub const SECTOR_FILL: Srgb<u8> = Srgb {
        red: 220,
        green: 40,
        blue: 30,
        standard: std::marker::PhantomData,
    };
    pub const SECTOR_OUTLINE: Srgb<u8> = Srgb {
        red: 120,
        green: 20,
        blue: 15,
        standard: std::marker::PhantomData,
    };
    pub const SCALE: Srgb<u8> = Srgb {
        red: 0,
        green: 0,
        blue: 0,
        standard: std::marker::PhantomData,
    };
    pub const ARROW: Srgb<u8> = Srgb {
        red: 0,
        green: 170,
        blue: 60,
        standard: std::marker::PhantomData,
    };
    pub const TEXT: Srgb<u8> = Srgb {
        red: 20,
        green: 20,
        blue: 20,
        standard: std::marker::PhantomData,
    };
}

/// Brush/pen configuration for the dial. Every field repaints on the next
/// frame when mutated.
#[derive(Debug, Clone)]
pub struct DialStyle {
    pub background: Srgb<u8>,
    pub circle_fill: Srgb<u8>,
    pub circle_outline: Srgb<u8>,
    pub sector_fill: Srgb<u8>,
    pub sector_outline: Srgb<u8>,
    pub sector_outline_weight: f32,
    pub scale_color: Srgb<u8>,
    pub scale_weight: f32,
    pub arrow_color: Srgb<u8>,
    pub arrow_weight: f32,
    pub text_color: Srgb<u8>,
}

impl Default for DialStyle {
    fn default() -> Self {
        Self {
            background: colors::BACKGROUND,
            circle_fill: colors::CIRCLE_FILL,
            circle_outline: colors::CIRCLE_OUTLINE,
            sector_fill: colors::SECTOR_FILL,
            sector_outline: colors::SECTOR_OUTLINE,
            sector_outline_weight: 1.0,
            scale_color: colors::SCALE,
            scale_weight: 2.0,
            arrow_color: colors::ARROW,
            arrow_weight: 2.0,
            text_color: colors::TEXT,
        }
    }
}

/// Full dial redraw. The caller clears the background and computes the draw
/// region; everything else happens here, always in the same order.
pub fn draw_dial(draw: &Draw, control: &DialControl, style: &DialStyle, draw_rect: Rect) {
    if draw_rect.w() <= 0.0 {
        return;
    }
    draw_scale(draw, control, style, draw_rect);
    draw_sectors(draw, control, style, draw_rect);
    draw_arrow(draw, control, style, draw_rect);
    draw_value_readout(draw, control, style, draw_rect);
}

/// Tick scale, labels and the base circle. Tick lines run from the center
/// past the rim; the filled circle painted after them leaves only the
/// protruding marks visible.
fn draw_scale(draw: &Draw, control: &DialControl, style: &DialStyle, draw_rect: Rect) {
    let ticks = geometry::compute_scale(
        draw_rect,
        control.minimum(),
        control.maximum(),
        control.direction().sign(),
        control.offset(),
        control.tick_count(),
        control.prefix(),
        control.suffix(),
    );

    for tick in &ticks {
        draw.line()
            .start(tick.start)
            .end(tick.end)
            .weight(style.scale_weight)
            .color(style.scale_color);
        draw.text(&tick.label)
            .xy(tick.label_anchor)
            .color(style.text_color)
            .font_size(14)
            .w(80.0);
    }

    draw.ellipse()
        .xy(draw_rect.xy())
        .radius(draw_rect.w() / 2.0)
        .color(style.circle_fill)
        .stroke(style.circle_outline)
        .stroke_weight(1.0);
}

/// Forbidden arcs as filled pie wedges over the circle.
fn draw_sectors(draw: &Draw, control: &DialControl, style: &DialStyle, draw_rect: Rect) {
    let center = draw_rect.xy();
    let radius = draw_rect.w() / 2.0;

    for sector in control.sectors() {
        let wedge = geometry::sector_wedge(
            sector.first,
            sector.second,
            control.minimum(),
            control.maximum(),
            control.direction().sign(),
            control.offset(),
        );
        draw.polygon()
            .color(style.sector_fill)
            .stroke(style.sector_outline)
            .stroke_weight(style.sector_outline_weight)
            .points(wedge_points(center, radius, &wedge));
    }
}

/// Sample a pie wedge as a fan polygon: the center plus points along the arc.
fn wedge_points(center: Point2, radius: f32, wedge: &SectorWedge) -> Vec<Point2> {
    let steps = 64;
    let mut points = Vec::with_capacity(steps + 2);
    points.push(center);
    for i in 0..=steps {
        let angle = wedge.start_angle + wedge.span_angle * (i as f32 / steps as f32);
        points.push(center + geometry::polar(angle, radius));
    }
    points
}

/// Indicator arrow and its tracking label. During a drag the arrow follows
/// the snapped preview; otherwise it rests on the committed value.
fn draw_arrow(draw: &Draw, control: &DialControl, style: &DialStyle, draw_rect: Rect) {
    let value = control.indicator_value();
    let (start, end) = geometry::arrow_line(
        draw_rect,
        value,
        control.minimum(),
        control.maximum(),
        control.direction().sign(),
        control.offset(),
    );

    draw.line()
        .start(start)
        .end(end)
        .weight(style.arrow_weight)
        .color(style.arrow_color);
    draw.text(&control.decorated(value))
        .xy(end)
        .color(style.text_color)
        .font_size(14)
        .w(90.0);
}

/// Committed-value readout anchored at the draw region's bottom-right corner.
/// Unlike the arrow label it never follows the drag preview.
fn draw_value_readout(draw: &Draw, control: &DialControl, style: &DialStyle, draw_rect: Rect) {
    let corner = pt2(draw_rect.right(), draw_rect.bottom());
    draw.text(&control.decorated(control.value()))
        .xy(corner)
        .color(style.text_color)
        .font_size(16)
        .w(120.0);
}
