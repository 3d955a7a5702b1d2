//! Control module - dial state and pointer interaction
//!
//! `DialControl` owns the value domain, the scale configuration, the sector
//! set and the committed value, and resolves pointer input into permitted
//! values: a press arms only when it lands on a permitted value, moves
//! preview the snapped value without committing, and a release commits
//! through the single `set_value` path, which notifies registered observers.

use nannou::prelude::*;

use crate::geometry;
use crate::sector::{self, Sector};

/// Scale graduations drawn by default.
pub const DEFAULT_TICK_COUNT: u32 = 8;

/// Rotation sense of increasing values on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Clockwise,
    CounterClockwise,
}

impl Direction {
    pub fn from_clockwise(clockwise: bool) -> Self {
        if clockwise {
            Direction::Clockwise
        } else {
            Direction::CounterClockwise
        }
    }

    /// Sign multiplier applied to scale angles.
    pub fn sign(self) -> f32 {
        match self {
            Direction::Clockwise => -1.0,
            Direction::CounterClockwise => 1.0,
        }
    }

    pub fn is_clockwise(self) -> bool {
        self == Direction::Clockwise
    }
}

/// Raw pointer input forwarded by the hosting window.
#[derive(Debug, Clone, Copy)]
pub enum PointerEvent {
    Press { position: Point2, button: MouseButton },
    Move { position: Point2 },
    Release { position: Point2, button: MouseButton },
}

/// The dial control: value domain, scale configuration, sectors, committed
/// value and transient drag state.
pub struct DialControl {
    minimum: f32,
    maximum: f32,
    direction: Direction,
    offset: f32,
    tick_count: u32,
    sectors: Vec<Sector>,
    value: f32,
    preview: Option<f32>,
    pressed: Option<MouseButton>,
    prefix: String,
    suffix: String,
    observers: Vec<Box<dyn FnMut(f32)>>,
}

impl DialControl {
    pub fn new(minimum: f32, maximum: f32) -> Self {
        let value = if minimum <= 0.0 && 0.0 <= maximum {
            0.0
        } else {
            minimum
        };
        Self {
            minimum,
            maximum,
            direction: Direction::Clockwise,
            offset: 0.0,
            tick_count: DEFAULT_TICK_COUNT,
            sectors: Vec::new(),
            value,
            preview: None,
            pressed: None,
            prefix: String::new(),
            suffix: String::new(),
            observers: Vec::new(),
        }
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn minimum(&self) -> f32 {
        self.minimum
    }

    pub fn maximum(&self) -> f32 {
        self.maximum
    }

    pub fn range(&self) -> f32 {
        self.maximum - self.minimum
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn offset(&self) -> f32 {
        self.offset
    }

    pub fn tick_count(&self) -> u32 {
        self.tick_count
    }

    pub fn sectors(&self) -> &[Sector] {
        &self.sectors
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn suffix(&self) -> &str {
        &self.suffix
    }

    /// The value the indicator arrow points at: the drag preview while a drag
    /// is in progress, the committed value otherwise.
    pub fn indicator_value(&self) -> f32 {
        self.preview.unwrap_or(self.value)
    }

    /// Decorate a value with the configured prefix/suffix for display.
    pub fn decorated(&self, value: f32) -> String {
        format!("{}{}{}", self.prefix, geometry::format_value(value), self.suffix)
    }

    /// Register an observer for committed-value changes. Fired exactly once
    /// per commit with the final (clamped and snapped) value.
    pub fn on_value_changed(&mut self, observer: impl FnMut(f32) + 'static) {
        self.observers.push(Box::new(observer));
    }

    fn notify(&mut self, value: f32) {
        for observer in &mut self.observers {
            observer(value);
        }
    }

    /// Commit a value: out-of-range input collapses to `minimum` (from either
    /// side), the result is snapped out of any forbidden arc, the drag
    /// preview is cleared and observers are notified.
    pub fn set_value(&mut self, value: f32) {
        let value = if value < self.minimum || value > self.maximum {
            self.minimum
        } else {
            value
        };
        let value = sector::nearest_permitted(&self.sectors, value, self.range());
        self.value = value;
        self.preview = None;
        self.notify(value);
    }

    /// A candidate value typed into the external form control. Accepted only
    /// when currently permitted; edits into a forbidden arc are ignored
    /// rather than snapped, so the control never fights typed input.
    pub fn submit_form_value(&mut self, value: f32) {
        if sector::value_permitted(&self.sectors, value) {
            self.set_value(value);
        }
    }

    pub fn set_range(&mut self, minimum: f32, maximum: f32) {
        self.minimum = minimum;
        self.maximum = maximum;
        self.prune_invalid_sectors();
        let value = self.value;
        self.set_value(value);
    }

    pub fn set_minimum(&mut self, minimum: f32) {
        self.set_range(minimum, self.maximum);
    }

    pub fn set_maximum(&mut self, maximum: f32) {
        self.set_range(self.minimum, maximum);
    }

    /// Sectors can outlive the domain they were added under; drop the ones
    /// the current range no longer admits.
    fn prune_invalid_sectors(&mut self) {
        let (minimum, maximum) = (self.minimum, self.maximum);
        self.sectors.retain(|sector| sector.is_valid(minimum, maximum));
    }

    /// The stored offset is direction-relative: changing direction flips it.
    pub fn set_direction(&mut self, clockwise: bool) {
        self.direction = Direction::from_clockwise(clockwise);
        self.offset *= self.direction.sign();
    }

    pub fn set_offset(&mut self, offset: f32) {
        self.offset = offset;
    }

    pub fn set_scale_parameters(&mut self, offset: f32, clockwise: bool) {
        self.direction = Direction::from_clockwise(clockwise);
        self.offset = offset * self.direction.sign();
    }

    pub fn set_tick_count(&mut self, tick_count: u32) {
        if tick_count > 0 {
            self.tick_count = tick_count;
        }
    }

    pub fn set_prefix(&mut self, prefix: &str) {
        self.prefix = prefix.to_string();
    }

    pub fn set_suffix(&mut self, suffix: &str) {
        self.suffix = suffix.to_string();
    }

    /// Append a forbidden arc; degenerate or out-of-domain pairs are dropped
    /// without signal.
    pub fn add_sector(&mut self, first: f32, second: f32) {
        let sector = Sector::new(first, second);
        if sector.is_valid(self.minimum, self.maximum) {
            self.sectors.push(sector);
        }
    }

    pub fn clear_sectors(&mut self) {
        self.sectors.clear();
    }

    /// The scale value under a screen point.
    pub fn value_at(&self, position: Point2, draw_rect: Rect) -> f32 {
        geometry::value_at_point(
            position,
            draw_rect,
            self.direction.sign(),
            self.offset,
            self.minimum,
            self.maximum,
        )
    }

    /// Drive the press/move/release state machine.
    pub fn handle_pointer(&mut self, event: PointerEvent, draw_rect: Rect) {
        match event {
            PointerEvent::Press { position, button } => {
                let value = self.value_at(position, draw_rect);
                self.pressed = sector::value_permitted(&self.sectors, value).then_some(button);
            }
            PointerEvent::Move { position } => {
                if self.pressed == Some(MouseButton::Left) {
                    let value = self.value_at(position, draw_rect);
                    self.preview =
                        Some(sector::nearest_permitted(&self.sectors, value, self.range()));
                }
            }
            PointerEvent::Release { position, button: _ } => {
                if self.pressed == Some(MouseButton::Left) {
                    let value = self.value_at(position, draw_rect);
                    self.set_value(value);
                }
                self.pressed = None;
            }
        }
    }
}

impl Default for DialControl {
    /// The bare-angle configuration: domain `[0, 360)`, no decoration.
    fn default() -> Self {
        Self::new(0.0, 360.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn test_rect() -> Rect {
        Rect::from_x_y_w_h(0.0, 0.0, 200.0, 200.0)
    }

    /// Screen point at the circle edge for a given value.
    fn point_for_value(control: &DialControl, value: f32, draw_rect: Rect) -> Point2 {
        let angle = geometry::display_angle(
            value,
            control.minimum(),
            control.maximum(),
            control.direction().sign(),
            control.offset(),
        );
        draw_rect.xy() + geometry::polar(angle, draw_rect.w() / 2.0)
    }

    fn recording_observer(control: &mut DialControl) -> Rc<RefCell<Vec<f32>>> {
        let committed = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&committed);
        control.on_value_changed(move |value| sink.borrow_mut().push(value));
        committed
    }

    #[test]
    fn test_invalid_sectors_rejected() {
        let mut control = DialControl::new(0.0, 100.0);
        control.add_sector(20.0, 20.0);
        assert!(control.sectors().is_empty());
        control.add_sector(-5.0, 10.0);
        assert!(control.sectors().is_empty());
        control.add_sector(20.0, 30.0);
        assert_eq!(control.sectors().len(), 1);
    }

    #[test]
    fn test_out_of_range_commit_collapses_to_minimum() {
        let mut control = DialControl::default();
        control.set_range(0.0, 300.0);
        control.set_value(400.0);
        assert_eq!(control.value(), 0.0);
        // Below the minimum collapses the same way.
        control.set_value(150.0);
        control.set_value(-1.0);
        assert_eq!(control.value(), 0.0);
    }

    #[test]
    fn test_commit_snaps_out_of_sector() {
        let mut control = DialControl::default();
        control.add_sector(40.0, 60.0);
        control.set_value(42.0);
        assert_eq!(control.value(), 40.0);
        control.set_value(58.0);
        assert_eq!(control.value(), 60.0);
    }

    #[test]
    fn test_range_change_revalidates_value_and_sectors() {
        let mut control = DialControl::new(0.0, 360.0);
        control.add_sector(200.0, 220.0);
        control.set_value(250.0);
        control.set_range(0.0, 100.0);
        // The old value is out of range and collapses to the minimum; the
        // sector no longer fits the domain and is dropped.
        assert_eq!(control.value(), 0.0);
        assert!(control.sectors().is_empty());
    }

    #[test]
    fn test_minimum_maximum_setters() {
        let mut control = DialControl::new(0.0, 360.0);
        control.set_value(200.0);
        control.set_maximum(100.0);
        // The old value no longer fits and collapses to the minimum.
        assert_eq!(control.value(), 0.0);
        control.set_value(50.0);
        control.set_minimum(20.0);
        assert_eq!(control.value(), 50.0);
    }

    #[test]
    fn test_press_in_sector_does_not_arm() {
        let draw_rect = test_rect();
        let mut control = DialControl::new(-20.0, 300.0);
        control.add_sector(20.0, 30.0);
        let committed = recording_observer(&mut control);

        let press = point_for_value(&control, 25.0, draw_rect);
        control.handle_pointer(
            PointerEvent::Press { position: press, button: MouseButton::Left },
            draw_rect,
        );
        let release = point_for_value(&control, 25.0, draw_rect);
        control.handle_pointer(
            PointerEvent::Release { position: release, button: MouseButton::Left },
            draw_rect,
        );

        assert!(committed.borrow().is_empty());
        assert_eq!(control.value(), 0.0);
    }

    #[test]
    fn test_drag_commits_once_on_release() {
        let draw_rect = test_rect();
        let mut control = DialControl::new(-20.0, 300.0);
        control.add_sector(20.0, 30.0);
        let committed = recording_observer(&mut control);

        let press = point_for_value(&control, 100.0, draw_rect);
        control.handle_pointer(
            PointerEvent::Press { position: press, button: MouseButton::Left },
            draw_rect,
        );
        let release = point_for_value(&control, 110.0, draw_rect);
        control.handle_pointer(
            PointerEvent::Release { position: release, button: MouseButton::Left },
            draw_rect,
        );

        let committed = committed.borrow();
        assert_eq!(committed.len(), 1);
        assert!((committed[0] - 110.0).abs() < 0.05);
        assert!((control.value() - 110.0).abs() < 0.05);
    }

    #[test]
    fn test_move_previews_without_committing() {
        let draw_rect = test_rect();
        let mut control = DialControl::default();
        control.add_sector(40.0, 60.0);
        let committed = recording_observer(&mut control);

        let press = point_for_value(&control, 100.0, draw_rect);
        control.handle_pointer(
            PointerEvent::Press { position: press, button: MouseButton::Left },
            draw_rect,
        );
        let hover = point_for_value(&control, 45.0, draw_rect);
        control.handle_pointer(PointerEvent::Move { position: hover }, draw_rect);

        // The arrow previews the snapped value; nothing is committed yet.
        assert!((control.indicator_value() - 40.0).abs() < 0.05);
        assert_eq!(control.value(), 0.0);
        assert!(committed.borrow().is_empty());
    }

    #[test]
    fn test_move_ignored_without_primary_press() {
        let draw_rect = test_rect();
        let mut control = DialControl::default();

        let press = point_for_value(&control, 100.0, draw_rect);
        control.handle_pointer(
            PointerEvent::Press { position: press, button: MouseButton::Right },
            draw_rect,
        );
        let hover = point_for_value(&control, 200.0, draw_rect);
        control.handle_pointer(PointerEvent::Move { position: hover }, draw_rect);

        assert_eq!(control.indicator_value(), 0.0);
        control.handle_pointer(
            PointerEvent::Release { position: hover, button: MouseButton::Right },
            draw_rect,
        );
        assert_eq!(control.value(), 0.0);
    }

    #[test]
    fn test_form_edit_into_sector_rejected() {
        let mut control = DialControl::default();
        control.add_sector(20.0, 30.0);
        let committed = recording_observer(&mut control);

        control.submit_form_value(25.0);
        assert_eq!(control.value(), 0.0);
        assert!(committed.borrow().is_empty());

        control.submit_form_value(50.0);
        assert_eq!(control.value(), 50.0);
        assert_eq!(committed.borrow().len(), 1);
    }

    #[test]
    fn test_direction_relative_offset() {
        let mut control = DialControl::default();
        control.set_offset(30.0);
        control.set_direction(true);
        assert_eq!(control.offset(), -30.0);

        control.set_scale_parameters(45.0, true);
        assert_eq!(control.offset(), -45.0);
        control.set_scale_parameters(45.0, false);
        assert_eq!(control.offset(), 45.0);
    }

    #[test]
    fn test_tick_count_guard() {
        let mut control = DialControl::default();
        control.set_tick_count(0);
        assert_eq!(control.tick_count(), DEFAULT_TICK_COUNT);
        control.set_tick_count(12);
        assert_eq!(control.tick_count(), 12);
    }

    #[test]
    fn test_decorated_value() {
        let mut control = DialControl::default();
        control.set_prefix("~");
        control.set_suffix("°");
        assert_eq!(control.decorated(45.0), "~45°");
    }
}
