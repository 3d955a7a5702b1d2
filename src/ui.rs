//! UI module - spin-control mirror, scale settings and dialog buttons
//!
//! The nannou_egui strip below the dial: a numeric spin control kept in
//! two-way sync with the committed value, Accept/Cancel, and the scale
//! settings (direction, offset, sector editing). Widgets report back through
//! a plain result struct the update loop applies to the control.

use nannou_egui::egui;

use crate::control::DialControl;

/// Height of the control strip reserved below the dial viewport.
pub const CONTROL_PANEL_HEIGHT: f32 = 110.0;

/// Local widget state for the sector editor fields.
#[derive(Default)]
pub struct PanelState {
    pub sector_first: f32,
    pub sector_second: f32,
}

/// What the user did this frame.
#[derive(Default)]
pub struct UiResult {
    /// A new value typed/dragged into the spin control
    pub form_value: Option<f32>,
    /// Direction toggle changed
    pub direction_clockwise: Option<bool>,
    /// Offset field changed
    pub offset: Option<f32>,
    /// Domain minimum field changed
    pub minimum: Option<f32>,
    /// Domain maximum field changed
    pub maximum: Option<f32>,
    /// A sector to add, as (first, second)
    pub add_sector: Option<(f32, f32)>,
    /// Remove all sectors
    pub clear_sectors: bool,
    pub accepted: bool,
    pub cancelled: bool,
}

/// Draw the bottom control strip and collect the frame's interactions.
pub fn draw_control_panel(
    ctx: &egui::Context,
    control: &DialControl,
    state: &mut PanelState,
) -> UiResult {
    let mut result = UiResult::default();

    egui::TopBottomPanel::bottom("dial_controls")
        .resizable(false)
        .min_height(CONTROL_PANEL_HEIGHT)
        .show(ctx, |ui| {
            ui.add_space(4.0);
            ui.horizontal(|ui| {
                let mut value = control.value();
                let spin = egui::DragValue::new(&mut value)
                    .clamp_range(control.minimum()..=control.maximum())
                    .speed(0.1)
                    .fixed_decimals(1)
                    .prefix(control.prefix())
                    .suffix(control.suffix());
                if ui.add(spin).changed() {
                    result.form_value = Some(value);
                }

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button("Cancel").clicked() {
                        result.cancelled = true;
                    }
                    if ui.button("Accept").clicked() {
                        result.accepted = true;
                    }
                });
            });

            ui.separator();

            ui.horizontal(|ui| {
                let mut clockwise = control.direction().is_clockwise();
                if ui.checkbox(&mut clockwise, "Clockwise").changed() {
                    result.direction_clockwise = Some(clockwise);
                }

                ui.label("Offset:");
                let mut offset = control.offset();
                if ui
                    .add(egui::DragValue::new(&mut offset).speed(1.0).suffix("°"))
                    .changed()
                {
                    result.offset = Some(offset);
                }

                ui.separator();

                ui.label("Range:");
                let mut minimum = control.minimum();
                if ui.add(egui::DragValue::new(&mut minimum).speed(1.0)).changed() {
                    result.minimum = Some(minimum);
                }
                let mut maximum = control.maximum();
                if ui.add(egui::DragValue::new(&mut maximum).speed(1.0)).changed() {
                    result.maximum = Some(maximum);
                }
            });

            ui.horizontal(|ui| {
                ui.label("Forbidden arc:");
                ui.add(egui::DragValue::new(&mut state.sector_first).speed(1.0));
                ui.add(egui::DragValue::new(&mut state.sector_second).speed(1.0));
                if ui.button("Add").clicked() {
                    result.add_sector = Some((state.sector_first, state.sector_second));
                }
                if ui.button("Clear all").clicked() {
                    result.clear_sectors = true;
                }
                ui.label(format!("{} active", control.sectors().len()));
            });
        });

    result
}
