//! Bearing Dial
//!
//! A circular value-selection dialog: drag or click around the dial scale to
//! pick a bearing, with a configurable scale direction/offset and forbidden
//! arcs the indicator may not rest on. The spin control below the dial
//! mirrors the committed value; Accept prints it to stdout and closes.

mod config;
mod control;
mod drawing;
mod geometry;
mod sector;
mod ui;

use nannou::prelude::*;
use nannou_egui::{self, Egui};
use serde::{Deserialize, Serialize};
use std::sync::mpsc;

use crate::control::{DialControl, PointerEvent};
use crate::drawing::DialStyle;
use crate::ui::PanelState;

const APP_NAME: &str = "bearing_dial";

/// Forbidden arcs seeded on startup so the dial demonstrates sector snapping.
const DEMO_SECTORS: [(f32, f32); 2] = [(45.0, 135.0), (225.0, 315.0)];

fn main() {
    nannou::app(model).update(update).run();
}

/// Persisted scale settings
#[derive(Debug, Clone, Serialize, Deserialize)]
struct DialConfig {
    clockwise: bool,
    offset: f32,
    tick_count: u32,
    prefix: String,
    suffix: String,
}

impl Default for DialConfig {
    fn default() -> Self {
        Self {
            clockwise: true,
            offset: 0.0,
            tick_count: control::DEFAULT_TICK_COUNT,
            prefix: String::new(),
            suffix: "°".to_string(),
        }
    }
}

/// Application state
struct Model {
    /// The dial control itself
    control: DialControl,
    /// Brush/pen configuration
    style: DialStyle,
    /// Local state of the settings widgets
    panel_state: PanelState,
    /// Committed-value notifications, drained each frame
    committed_rx: mpsc::Receiver<f32>,
    /// egui integration
    egui: Egui,
}

fn save_settings(control: &DialControl) {
    let config = DialConfig {
        clockwise: control.direction().is_clockwise(),
        // The control stores the offset direction-relative; save the plain one
        offset: control.offset() * control.direction().sign(),
        tick_count: control.tick_count(),
        prefix: control.prefix().to_string(),
        suffix: control.suffix().to_string(),
    };
    if let Err(e) = config::save_config(APP_NAME, &config) {
        eprintln!("Failed to save config: {}", e);
    }
}

fn model(app: &App) -> Model {
    let window_id = app
        .new_window()
        .title("Bearing choice")
        .size(480, 540)
        .min_size(300, 300)
        .view(view)
        .mouse_pressed(mouse_pressed)
        .mouse_released(mouse_released)
        .mouse_moved(mouse_moved)
        .raw_event(raw_window_event)
        .build()
        .unwrap();

    let window = app.window(window_id).unwrap();
    let egui = Egui::from_window(&window);

    // Load persisted scale settings
    let config: DialConfig = config::load_config(APP_NAME)
        .ok()
        .flatten()
        .unwrap_or_default();

    let mut control = DialControl::new(0.0, 360.0);
    control.set_scale_parameters(config.offset, config.clockwise);
    control.set_tick_count(config.tick_count);
    control.set_prefix(&config.prefix);
    control.set_suffix(&config.suffix);
    for (first, second) in DEMO_SECTORS {
        control.add_sector(first, second);
    }

    let (tx, rx) = mpsc::channel();
    control.on_value_changed(move |value| {
        let _ = tx.send(value);
    });

    Model {
        control,
        style: DialStyle::default(),
        panel_state: PanelState::default(),
        committed_rx: rx,
        egui,
    }
}

fn update(app: &App, model: &mut Model, update: Update) {
    // Reflect the latest commit in the window title
    let mut committed = None;
    while let Ok(value) = model.committed_rx.try_recv() {
        committed = Some(value);
    }
    if let Some(value) = committed {
        app.main_window()
            .set_title(&format!("Bearing choice - {}", model.control.decorated(value)));
    }

    // Begin egui frame
    model.egui.set_elapsed_time(update.since_start);
    let ctx = model.egui.begin_frame();
    let result = ui::draw_control_panel(&ctx, &model.control, &mut model.panel_state);
    drop(ctx);

    if let Some(value) = result.form_value {
        model.control.submit_form_value(value);
    }
    if let Some(clockwise) = result.direction_clockwise {
        model.control.set_direction(clockwise);
        save_settings(&model.control);
    }
    if let Some(offset) = result.offset {
        model.control.set_offset(offset);
        save_settings(&model.control);
    }
    if let Some(minimum) = result.minimum {
        if minimum < model.control.maximum() {
            model.control.set_minimum(minimum);
        }
    }
    if let Some(maximum) = result.maximum {
        if maximum > model.control.minimum() {
            model.control.set_maximum(maximum);
        }
    }
    if let Some((first, second)) = result.add_sector {
        model.control.add_sector(first, second);
    }
    if result.clear_sectors {
        model.control.clear_sectors();
    }

    if result.accepted {
        println!("{}", model.control.value());
        app.quit();
    } else if result.cancelled {
        app.quit();
    }
}

/// The dial's viewport: the window area above the control strip.
fn dial_viewport(window_rect: Rect) -> Rect {
    Rect::from_x_y_w_h(
        window_rect.x(),
        window_rect.y() + ui::CONTROL_PANEL_HEIGHT / 2.0,
        window_rect.w(),
        (window_rect.h() - ui::CONTROL_PANEL_HEIGHT).max(0.0),
    )
}

fn view(app: &App, model: &Model, frame: Frame) {
    let draw = app.draw();
    draw.background().color(model.style.background);

    let viewport = dial_viewport(app.window_rect());
    let draw_rect = geometry::compute_draw_rect(viewport);
    drawing::draw_dial(&draw, &model.control, &model.style, draw_rect);

    draw.to_frame(app, &frame).unwrap();
    model.egui.draw_to_frame(&frame).unwrap();
}

fn mouse_pressed(app: &App, model: &mut Model, button: MouseButton) {
    let position = app.mouse.position();
    let viewport = dial_viewport(app.window_rect());
    // Presses on the control strip belong to the form widgets
    if !viewport.contains(position) {
        return;
    }
    let draw_rect = geometry::compute_draw_rect(viewport);
    model
        .control
        .handle_pointer(PointerEvent::Press { position, button }, draw_rect);
}

fn mouse_moved(app: &App, model: &mut Model, position: Point2) {
    let draw_rect = geometry::compute_draw_rect(dial_viewport(app.window_rect()));
    model
        .control
        .handle_pointer(PointerEvent::Move { position }, draw_rect);
}

fn mouse_released(app: &App, model: &mut Model, button: MouseButton) {
    let position = app.mouse.position();
    let draw_rect = geometry::compute_draw_rect(dial_viewport(app.window_rect()));
    model
        .control
        .handle_pointer(PointerEvent::Release { position, button }, draw_rect);
}

fn raw_window_event(_app: &App, model: &mut Model, event: &nannou::winit::event::WindowEvent) {
    model.egui.handle_raw_event(event);
}
