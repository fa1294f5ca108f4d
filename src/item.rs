//! Numeric display items.
//!
//! A [`NumericItem`] is the model half of one number on a regulation screen:
//! either an editable setpoint or a read-only mirror of a live measurement.
//! The rendering framework owns layout and fonts; it reads the descriptor
//! fields here (digits, decimals, unit, focusability) and drains the redraw
//! flag each frame instead of being called back.

use crate::codec::Unit;

/// One numeric value on a regulation screen.
#[derive(Debug, Clone)]
pub struct NumericItem {
    value: i32,
    /// Lower bound, always 0 in the shipped configurations.
    pub min: i32,
    /// Upper bound. For voltage items this is recomputed every tick from the
    /// measured input supply voltage.
    pub max: i32,
    /// Integer digits shown on screen.
    pub num_digits: u8,
    /// Decimal digits shown on screen. Two decimals means the value is kept
    /// in centivolts, three means milliamps.
    pub num_decimals: u8,
    pub unit: Unit,
    /// Mirror items are not focusable and can never be edited.
    pub can_focus: bool,
    /// Digit the edit cursor starts on when the item gains focus.
    pub edit_digit: u8,
    needs_redraw: bool,
}

impl NumericItem {
    pub fn new(unit: Unit, num_digits: u8, num_decimals: u8, can_focus: bool) -> Self {
        Self {
            value: 0,
            min: 0,
            max: 0,
            num_digits,
            num_decimals,
            unit,
            can_focus,
            edit_digit: 0,
            // A fresh item has never been painted.
            needs_redraw: true,
        }
    }

    pub fn value(&self) -> i32 {
        self.value
    }

    /// Overwrite the value and mark the item for redraw.
    pub fn set_value(&mut self, value: i32) {
        self.value = value;
        self.needs_redraw = true;
    }

    /// Adopt a new measurement, redrawing only if it actually changed.
    ///
    /// Returns whether the displayed value moved.
    pub fn refresh(&mut self, value: i32) -> bool {
        if value == self.value {
            return false;
        }
        self.value = value;
        self.needs_redraw = true;
        true
    }

    /// Drain the redraw flag. The rendering framework polls this once per
    /// frame and repaints the item when it returns true.
    pub fn take_redraw(&mut self) -> bool {
        core::mem::replace(&mut self.needs_redraw, false)
    }
}
