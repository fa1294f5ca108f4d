//! Hardware seams of the regulation core.
//!
//! The regulation modes never touch DACs or ADCs directly. They talk to an
//! injected [`PowerActuator`] that owns the output stage and an injected
//! [`MeasurementSource`] that owns ADC sampling and calibration. This keeps
//! the modes unit-testable without hardware.

/// One set of raw ADC samples, taken together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AdcSample {
    pub i_out_raw: u16,
    pub v_in_raw: u16,
    pub v_out_raw: u16,
}

/// Output stage of the power supply.
///
/// Targets and limits take effect immediately; whether a value is actually
/// driven onto the output while disabled is the actuator's business. Calls
/// are synchronous and are not retried by this crate.
pub trait PowerActuator {
    /// Set the output voltage target in millivolts.
    fn set_output_voltage(&mut self, millivolts: u32);
    /// Set the output current target in milliamps.
    fn set_output_current(&mut self, milliamps: u32);
    /// Set the protective current ceiling in milliamps.
    fn set_output_current_limit(&mut self, milliamps: u32);
    /// Set the protective voltage ceiling in millivolts.
    fn set_output_voltage_limit(&mut self, millivolts: u32);
    /// Switch the output stage on or off.
    fn enable_output(&mut self, enable: bool);

    /// Read back the live voltage target in millivolts.
    fn output_voltage_mv(&self) -> u32;
    /// Read back the live current target in milliamps.
    fn output_current_ma(&self) -> u32;
}

/// ADC sampling plus the calibrated conversions belonging to it.
pub trait MeasurementSource {
    /// Take one set of raw samples.
    fn sample(&mut self) -> AdcSample;
    /// Calibrated input supply voltage in millivolts for a raw sample.
    fn calc_vin(&self, raw: u16) -> u32;
    /// Calibrated output voltage in millivolts for a raw sample.
    fn calc_vout(&self, raw: u16) -> u32;
    /// Calibrated output current in milliamps for a raw sample.
    fn calc_iout(&self, raw: u16) -> u32;
}
