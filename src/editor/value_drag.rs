//! Turn pointer and touch drags into clamped, stepped scalar values.
//!
//! A [`ValueDrag`] is idle until a drag starts. While dragging, every move
//! computes `start_value + delta` along the enabled axes, clamps it to the
//! range and snaps it to a multiple of `step`. A value is only reported when it
//! differs from the last reported one, so callers can feed each result straight
//! into a history `set` without creating an entry per pixel.
//!
//! Horizontal movement to the right increases the value; vertical movement
//! *up* increases it.
//!
//! # Usage
//!
//! ```rust
//! use pagecraft::editor::value_drag::{DragDirection, DragRange, ValueDrag};
//!
//! let mut drag = ValueDrag::new(DragRange::new(0.0, 60.0, 2.0), DragDirection::Horizontal);
//! drag.pointer_down(100.0, 100.0, 10.0);
//! assert_eq!(drag.pointer_move(107.0, 100.0), Some(18.0));
//! assert_eq!(drag.pointer_move(107.4, 100.0), None);
//! drag.pointer_up();
//! assert!(!drag.is_dragging());
//! ```

use serde::{Deserialize, Serialize};
use tracing::trace;

/// Which pointer axes feed the value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DragDirection {
    Horizontal,
    Vertical,
    Both,
}

/// Allowed range and granularity of a dragged value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DragRange {
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

impl DragRange {
    pub fn new(min: f64, max: f64, step: f64) -> Self {
        Self { min, max, step }
    }

    fn bounds(&self) -> (f64, f64) {
        if self.min <= self.max {
            (self.min, self.max)
        } else {
            (self.max, self.min)
        }
    }

    /// Clamp `raw` into the range and round it to the nearest multiple of
    /// `step` that still lies inside the range. NaN maps to the minimum.
    pub fn normalize(&self, raw: f64) -> f64 {
        let (lo, hi) = self.bounds();
        let value = if raw.is_nan() { lo } else { raw.max(lo).min(hi) };
        if !(self.step.is_finite() && self.step > 0.0) {
            return value;
        }
        let mut snapped = (value / self.step).round() * self.step;
        if snapped > hi {
            snapped -= self.step;
        }
        if snapped < lo {
            snapped += self.step;
        }
        snapped.max(lo).min(hi)
    }
}

/// One active touch point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchPoint {
    pub id: u64,
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum DragInput {
    Pointer,
    Touch(u64),
}

#[derive(Debug, Clone, Copy)]
struct ActiveDrag {
    input: DragInput,
    start_x: f64,
    start_y: f64,
    start_value: f64,
    last_emitted: f64,
}

/// Direct-manipulation value binder.
#[derive(Debug, Clone)]
pub struct ValueDrag {
    range: DragRange,
    direction: DragDirection,
    active: Option<ActiveDrag>,
}

impl ValueDrag {
    pub fn new(range: DragRange, direction: DragDirection) -> Self {
        Self {
            range,
            direction,
            active: None,
        }
    }

    pub fn range(&self) -> DragRange {
        self.range
    }

    pub fn direction(&self) -> DragDirection {
        self.direction
    }

    pub fn is_dragging(&self) -> bool {
        self.active.is_some()
    }

    fn start(&mut self, input: DragInput, x: f64, y: f64, value: f64) -> bool {
        if self.active.is_some() {
            trace!("value drag: already active, ignoring start");
            return false;
        }
        let start_value = self.range.normalize(value);
        self.active = Some(ActiveDrag {
            input,
            start_x: x,
            start_y: y,
            start_value,
            last_emitted: start_value,
        });
        true
    }

    /// Begin a mouse/pen drag at `(x, y)` from the current `value`.
    /// Ignored while another drag is active.
    pub fn pointer_down(&mut self, x: f64, y: f64, value: f64) -> bool {
        self.start(DragInput::Pointer, x, y, value)
    }

    /// Begin a touch drag. Only a single-finger touch starts a drag.
    pub fn touch_start(&mut self, touches: &[TouchPoint], value: f64) -> bool {
        match touches {
            [touch] => self.start(DragInput::Touch(touch.id), touch.x, touch.y, value),
            _ => false,
        }
    }

    fn track(&mut self, x: f64, y: f64) -> Option<f64> {
        let direction = self.direction;
        let range = self.range;
        let active = self.active.as_mut()?;
        let dx = x - active.start_x;
        let dy = y - active.start_y;
        let delta = match direction {
            DragDirection::Horizontal => dx,
            DragDirection::Vertical => -dy,
            DragDirection::Both => dx - dy,
        };
        let next = range.normalize(active.start_value + delta);
        if next == active.last_emitted {
            return None;
        }
        active.last_emitted = next;
        Some(next)
    }

    /// Pointer moved. Returns the new value when it changed.
    pub fn pointer_move(&mut self, x: f64, y: f64) -> Option<f64> {
        match self.active {
            Some(ActiveDrag {
                input: DragInput::Pointer,
                ..
            }) => self.track(x, y),
            _ => None,
        }
    }

    /// Touches moved. Any event with more than one touch point is ignored
    /// entirely, as is one that does not carry the touch that started the drag.
    pub fn touch_move(&mut self, touches: &[TouchPoint]) -> Option<f64> {
        let Some(ActiveDrag {
            input: DragInput::Touch(id),
            ..
        }) = self.active
        else {
            return None;
        };
        match touches {
            [touch] if touch.id == id => self.track(touch.x, touch.y),
            _ => None,
        }
    }

    /// Release the pointer. Ends a pointer drag.
    pub fn pointer_up(&mut self) -> bool {
        if matches!(
            self.active,
            Some(ActiveDrag {
                input: DragInput::Pointer,
                ..
            })
        ) {
            self.active = None;
            return true;
        }
        false
    }

    /// A touch was lifted; `remaining` are the touches still down. Ends the
    /// drag once the touch that started it is gone.
    pub fn touch_end(&mut self, remaining: &[TouchPoint]) -> bool {
        let Some(ActiveDrag {
            input: DragInput::Touch(id),
            ..
        }) = self.active
        else {
            return false;
        };
        if remaining.iter().any(|t| t.id == id) {
            return false;
        }
        self.active = None;
        true
    }

    /// The last value reported during the current drag.
    pub fn current_value(&self) -> Option<f64> {
        self.active.map(|a| a.last_emitted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gap_drag() -> ValueDrag {
        ValueDrag::new(DragRange::new(0.0, 60.0, 2.0), DragDirection::Horizontal)
    }

    fn touch(id: u64, x: f64, y: f64) -> TouchPoint {
        TouchPoint { id, x, y }
    }

    #[test]
    fn test_clamp_high_and_low() {
        let mut d = gap_drag();
        d.pointer_down(0.0, 0.0, 20.0);
        assert_eq!(d.pointer_move(113.0, 0.0), Some(60.0));
        assert_eq!(d.pointer_move(-25.0, 0.0), Some(0.0));
    }

    #[test]
    fn test_emitted_values_are_step_multiples() {
        let mut d = gap_drag();
        d.pointer_down(0.0, 0.0, 10.0);
        for x in -20..60 {
            if let Some(v) = d.pointer_move(x as f64 * 0.7, 0.0) {
                assert_eq!(v % 2.0, 0.0);
                assert!((0.0..=60.0).contains(&v));
            }
        }
    }

    #[test]
    fn test_no_repeat_emission() {
        let mut d = gap_drag();
        d.pointer_down(0.0, 0.0, 10.0);
        assert_eq!(d.pointer_move(0.4, 0.0), None);
        assert_eq!(d.pointer_move(2.0, 0.0), Some(12.0));
        assert_eq!(d.pointer_move(2.2, 0.0), None);
    }

    #[test]
    fn test_vertical_up_increases() {
        let mut d = ValueDrag::new(DragRange::new(0.0, 100.0, 1.0), DragDirection::Vertical);
        d.pointer_down(0.0, 50.0, 10.0);
        assert_eq!(d.pointer_move(30.0, 40.0), Some(20.0));
        assert_eq!(d.pointer_move(0.0, 55.0), Some(5.0));
    }

    #[test]
    fn test_both_axes() {
        let mut d = ValueDrag::new(DragRange::new(0.0, 100.0, 1.0), DragDirection::Both);
        d.pointer_down(0.0, 0.0, 10.0);
        assert_eq!(d.pointer_move(5.0, -5.0), Some(20.0));
    }

    #[test]
    fn test_single_active_gesture() {
        let mut d = gap_drag();
        assert!(d.pointer_down(0.0, 0.0, 10.0));
        assert!(!d.pointer_down(50.0, 0.0, 40.0));
        assert!(!d.touch_start(&[touch(1, 0.0, 0.0)], 0.0));
        assert_eq!(d.pointer_move(4.0, 0.0), Some(14.0));
        assert!(d.pointer_up());
        assert!(!d.pointer_up());
    }

    #[test]
    fn test_multi_touch_start_ignored() {
        let mut d = gap_drag();
        assert!(!d.touch_start(&[touch(1, 0.0, 0.0), touch(2, 5.0, 5.0)], 10.0));
        assert!(!d.is_dragging());
    }

    #[test]
    fn test_second_finger_does_not_alter_drag() {
        let mut d = gap_drag();
        assert!(d.touch_start(&[touch(7, 0.0, 0.0)], 10.0));
        assert_eq!(d.touch_move(&[touch(7, 4.0, 0.0)]), Some(14.0));
        assert_eq!(
            d.touch_move(&[touch(7, 30.0, 0.0), touch(8, 200.0, 0.0)]),
            None
        );
        assert_eq!(d.current_value(), Some(14.0));
        assert!(!d.touch_end(&[touch(7, 30.0, 0.0)]));
        assert_eq!(d.touch_move(&[touch(7, 6.0, 0.0)]), Some(16.0));
        assert!(d.touch_end(&[]));
        assert!(!d.is_dragging());
    }

    #[test]
    fn test_degenerate_input_clamped() {
        let range = DragRange::new(0.0, 60.0, 2.0);
        assert_eq!(range.normalize(f64::NAN), 0.0);
        assert_eq!(range.normalize(f64::INFINITY), 60.0);
        assert_eq!(range.normalize(f64::NEG_INFINITY), 0.0);
        assert_eq!(range.normalize(133.0), 60.0);
        assert_eq!(range.normalize(-5.0), 0.0);
        assert_eq!(range.normalize(7.0), 8.0);

        let odd = DragRange::new(0.0, 61.0, 2.0);
        assert_eq!(odd.normalize(61.0), 60.0);
    }

    #[test]
    fn test_pointer_move_ignored_when_idle() {
        let mut d = gap_drag();
        assert_eq!(d.pointer_move(10.0, 10.0), None);
        assert_eq!(d.touch_move(&[touch(1, 10.0, 10.0)]), None);
    }
}
