//! Conversion between wire values and the internal fixed-point representation.
//!
//! Remote callers always speak SI milli-units (millivolts, milliamps).
//! Internally voltage is kept in centivolts so that a two-decimal display
//! item maps 1:1 onto the stored value, while current is kept in milliamps.
//! Setpoint bounds are stored in the internal scale, so validation widens
//! them to wire scale before comparing.

use crate::error::{Error, Result};
use strum_macros::EnumIter;

/// Quantity displayed by a numeric item, fixing its wire scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter)]
pub enum Unit {
    /// Internal representation is centivolts, wire values are millivolts.
    Volt,
    /// Internal representation is milliamps, wire values are milliamps.
    Ampere,
}

impl Unit {
    /// Wire units per internal unit.
    pub const fn wire_scale(&self) -> i32 {
        match self {
            Unit::Volt => 10,
            Unit::Ampere => 1,
        }
    }

    /// Convert a wire value to the internal representation.
    ///
    /// The millivolt to centivolt division truncates: wire values that are
    /// not multiples of 10 lose their last digit.
    pub const fn decode(&self, wire: i32) -> i32 {
        wire / self.wire_scale()
    }

    /// Convert an internal value back to wire units.
    pub const fn encode(&self, internal: i32) -> i32 {
        internal * self.wire_scale()
    }
}

/// Check a wire-scale value against internal-scale bounds.
///
/// Bounds are widened to wire scale first so that a millivolt request is
/// never compared against a centivolt ceiling.
pub fn validate(wire: i32, min: i32, max: i32, unit: Unit) -> Result<()> {
    let scale = unit.wire_scale();
    if wire < min * scale || wire > max * scale {
        return Err(Error::Range);
    }
    Ok(())
}

/// Parse a decimal ASCII wire value.
///
/// Anything that is not a plain decimal integer counts as a range error.
pub fn parse_wire(text: &str) -> Result<i32> {
    text.parse().map_err(|_| Error::Range)
}
