//! The two regulation screens.
//!
//! A [`RegulationMode`] owns two editable setpoints and two read-only mirror
//! values. In the voltage-primary (constant voltage) variant the output
//! holds the voltage setpoint and the current setpoint acts as a protective
//! ceiling; the current-primary (constant current) variant swaps the roles.
//! While the output is enabled the mirrors keep tracking the measured output
//! so the operator can ramp one value and watch the other respond.
//!
//! Everything here runs single-threaded and tick-driven: `enable`,
//! `set_parameter`, `get_parameter` and the edit hooks complete
//! synchronously, and [`tick`](RegulationMode::tick) is called once per
//! display refresh period by an external scheduler.

use core::fmt::Write;

use crate::codec::{self, Unit};
use crate::error::{Error, Result};
use crate::hw::{MeasurementSource, PowerActuator};
use crate::item::NumericItem;
use crate::store::{SettingsStore, StorageKey};

/// Hardware current ceiling in milliamps (DPS5005 class output stage).
pub const MAX_CURRENT_MA: i32 = 5_000;
/// Hardware voltage ceiling in millivolts.
pub const MAX_VOLTAGE_MV: i32 = 50_000;
/// Display refresh period the external scheduler is expected to call
/// [`RegulationMode::tick`] at.
pub const TICK_INTERVAL: fugit::MillisDurationU32 = fugit::MillisDurationU32::millis(100);

/// Store slot of the voltage setpoint, on either screen.
const SLOT_VOLTAGE: u32 = 0;

/// Which quantity the mode actively regulates toward. The other quantity
/// becomes the protective limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Primary {
    Voltage,
    Current,
}

impl Primary {
    /// Persistent screen id, the high byte of every store key.
    pub const fn screen_id(&self) -> u8 {
        match self {
            Primary::Voltage => 1,
            Primary::Current => 2,
        }
    }

    /// Store slot of the current setpoint. The current-primary screen has
    /// always kept its current record in slot 0, sharing the key with its
    /// voltage record; the screen byte keeps the families apart.
    const fn current_slot(&self) -> u32 {
        match self {
            Primary::Voltage => 1,
            Primary::Current => 0,
        }
    }
}

/// One regulation screen with injected hardware dependencies.
pub struct RegulationMode<A, M> {
    primary: Primary,
    enabled: bool,
    /// Editable voltage setpoint, in centivolts.
    pub voltage: NumericItem,
    /// Editable current setpoint, in milliamps.
    pub current: NumericItem,
    /// Mirror of the measured output voltage, in centivolts.
    pub voltage_monitor: NumericItem,
    /// Mirror of the measured output current, in milliamps.
    pub current_monitor: NumericItem,
    actuator: A,
    measurement: M,
}

impl<A: PowerActuator, M: MeasurementSource> RegulationMode<A, M> {
    /// Create the constant voltage screen.
    ///
    /// Setpoints start at zero; [`restore`](Self::restore) is expected to
    /// fill in the last saved values afterwards.
    pub fn voltage_primary(actuator: A, measurement: M) -> Self {
        let mut mode = Self::new(Primary::Voltage, actuator, measurement);
        // Start editing at the second significant digit so a stray keypress
        // cannot crank the setting up by 10 V or more.
        mode.voltage.edit_digit = 2;
        mode
    }

    /// Create the constant current screen.
    ///
    /// Unlike the constant voltage screen this one seeds its setpoints from
    /// the actuator's live configuration.
    pub fn current_primary(actuator: A, measurement: M) -> Self {
        let mut mode = Self::new(Primary::Current, actuator, measurement);
        let millivolts = mode.actuator.output_voltage_mv();
        mode.voltage.set_value(Unit::Volt.decode(millivolts as i32));
        let milliamps = mode.actuator.output_current_ma();
        mode.current.set_value(milliamps as i32);
        mode
    }

    fn new(primary: Primary, actuator: A, mut measurement: M) -> Self {
        let mut voltage = NumericItem::new(Unit::Volt, 2, 2, true);
        let mut current = NumericItem::new(Unit::Ampere, 1, 3, true);
        current.max = MAX_CURRENT_MA;
        let voltage_monitor = NumericItem::new(Unit::Volt, 2, 2, false);
        let mut current_monitor = NumericItem::new(Unit::Ampere, 1, 3, false);
        current_monitor.max = MAX_CURRENT_MA;

        // One sample up front so the voltage ceiling is valid before the
        // first tick arrives.
        let sample = measurement.sample();
        voltage.max = Unit::Volt.decode(measurement.calc_vin(sample.v_in_raw) as i32);

        Self {
            primary,
            enabled: false,
            voltage,
            current,
            voltage_monitor,
            current_monitor,
            actuator,
            measurement,
        }
    }

    /// Which quantity this screen regulates.
    pub fn primary(&self) -> Primary {
        self.primary
    }

    /// Short screen name used for navigation and logging.
    pub fn name(&self) -> &'static str {
        match self.primary {
            Primary::Voltage => "cv",
            Primary::Current => "cc",
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Set a named parameter from its decimal wire-unit representation.
    ///
    /// Recognized names are `voltage`/`u` and `current`/`i`, case-sensitive.
    /// On success the setpoint is updated, the actuator is commanded with
    /// the new target right away and the item is marked for redraw. Valid
    /// whether or not the output is enabled.
    pub fn set_parameter(&mut self, name: &str, value: &str) -> Result<()> {
        match name {
            "voltage" | "u" => {
                let wire = codec::parse_wire(value)?;
                codec::validate(wire, self.voltage.min, self.voltage.max, Unit::Volt)?;
                self.voltage.set_value(Unit::Volt.decode(wire));
                self.push_voltage();
                Ok(())
            }
            "current" | "i" => {
                let wire = codec::parse_wire(value)?;
                codec::validate(wire, self.current.min, self.current.max, Unit::Ampere)?;
                self.current.set_value(wire);
                self.push_current();
                Ok(())
            }
            _ => Err(Error::UnknownParameter),
        }
    }

    /// Write a named setpoint (not the live measurement) into `buf` as a
    /// NUL-terminated decimal string in wire units.
    ///
    /// Returns the number of bytes written, excluding the terminator. The
    /// string is truncated when `buf` is too short; a zero-length buffer is
    /// left untouched.
    pub fn get_parameter(&self, name: &str, buf: &mut [u8]) -> Result<usize> {
        let (item, unit) = match name {
            "voltage" | "u" => (&self.voltage, Unit::Volt),
            "current" | "i" => (&self.current, Unit::Ampere),
            _ => return Err(Error::UnknownParameter),
        };
        if buf.is_empty() {
            return Ok(0);
        }
        let mut text: heapless::String<12> = heapless::String::new();
        // A 12 byte buffer always holds a decimal i32.
        let _ = write!(text, "{}", unit.encode(item.value()));
        let len = text.len().min(buf.len() - 1);
        buf[..len].copy_from_slice(&text.as_bytes()[..len]);
        buf[len] = 0;
        Ok(len)
    }

    /// Enable or disable the output.
    ///
    /// Enabling writes the protective limit before the output goes live so
    /// the enable transition can never overshoot the intended ceiling.
    /// Disabling switches the output off and leaves both setpoints in place,
    /// so re-enabling resumes at the same targets.
    pub fn enable(&mut self, enable: bool) {
        if enable {
            match self.primary {
                Primary::Voltage => {
                    self.push_voltage();
                    self.actuator.set_output_current_limit(MAX_CURRENT_MA as u32);
                    self.push_current();
                }
                Primary::Current => {
                    self.push_current();
                    self.actuator.set_output_voltage_limit(MAX_VOLTAGE_MV as u32);
                    self.push_voltage();
                }
            }
            self.actuator.enable_output(true);
        } else {
            self.actuator.enable_output(false);
        }
        self.enabled = enable;
    }

    /// Periodic display refresh.
    ///
    /// Recomputes the voltage ceiling from the measured input supply (the
    /// device cannot regulate above what it is fed) and reconciles the two
    /// mirrors with the latest measurement. Editable setpoints are never
    /// touched here, so an in-progress edit cannot be clobbered.
    pub fn tick(&mut self) {
        let sample = self.measurement.sample();

        self.voltage.max = Unit::Volt.decode(self.measurement.calc_vin(sample.v_in_raw) as i32);

        let new_u = Unit::Volt.decode(self.measurement.calc_vout(sample.v_out_raw) as i32);
        self.voltage_monitor.refresh(new_u);

        let new_i = self.measurement.calc_iout(sample.i_out_raw) as i32;
        self.current_monitor.refresh(new_i);
    }

    /// Interactive edit hook for the voltage setpoint, in centivolts.
    ///
    /// Called by the numeric-entry widget, which already clamps to the
    /// item's bounds during entry, so no validation happens here.
    pub fn voltage_edited(&mut self, centivolts: i32) {
        self.voltage.set_value(centivolts);
        self.push_voltage();
    }

    /// Interactive edit hook for the current setpoint, in milliamps.
    pub fn current_edited(&mut self, milliamps: i32) {
        self.current.set_value(milliamps);
        self.push_current();
    }

    /// Persist both setpoints as 4-byte records.
    pub fn save<S: SettingsStore>(&self, store: &mut S) -> Result<()> {
        let screen = self.primary.screen_id();
        let voltage = self.voltage.value().to_le_bytes();
        if !store.write(StorageKey::pack(screen, SLOT_VOLTAGE), &voltage) {
            return Err(Error::Persistence);
        }
        let current = self.current.value().to_le_bytes();
        if !store.write(StorageKey::pack(screen, self.primary.current_slot()), &current) {
            return Err(Error::Persistence);
        }
        Ok(())
    }

    /// Restore setpoints saved by [`save`](Self::save).
    ///
    /// Absent records leave the current value in place. Restored values are
    /// not re-validated against the present bounds; the next edit or
    /// tick-driven ceiling recompute constrains them again.
    pub fn restore<S: SettingsStore>(&mut self, store: &mut S) {
        let screen = self.primary.screen_id();
        let mut raw = [0u8; 4];
        if store.read(StorageKey::pack(screen, SLOT_VOLTAGE), &mut raw) == Some(4) {
            self.voltage.set_value(i32::from_le_bytes(raw));
        }
        if store.read(StorageKey::pack(screen, self.primary.current_slot()), &mut raw) == Some(4) {
            self.current.set_value(i32::from_le_bytes(raw));
        }
    }

    fn push_voltage(&mut self) {
        self.actuator
            .set_output_voltage(Unit::Volt.encode(self.voltage.value()) as u32);
    }

    fn push_current(&mut self) {
        self.actuator.set_output_current(self.current.value() as u32);
    }
}
