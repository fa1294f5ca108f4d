//! We use this mocking module in unit tests to emulate the output stage,
//! the ADC path and the settings store.

use crate::hw::{AdcSample, MeasurementSource, PowerActuator};
use crate::store::SettingsStore;

/// One recorded actuator invocation, in call order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActuatorCall {
    SetVoltage(u32),
    SetCurrent(u32),
    SetCurrentLimit(u32),
    SetVoltageLimit(u32),
    Enable(bool),
}

/// Mock output stage recording every call it receives.
pub struct MockActuator {
    pub calls: heapless::Vec<ActuatorCall, 16>,
    /// Live voltage target reported by the read-back accessor.
    pub voltage_mv: u32,
    /// Live current target reported by the read-back accessor.
    pub current_ma: u32,
    pub enabled: bool,
}

impl MockActuator {
    pub fn new() -> Self {
        Self {
            calls: heapless::Vec::new(),
            voltage_mv: 0,
            current_ma: 0,
            enabled: false,
        }
    }

    fn record(&mut self, call: ActuatorCall) {
        self.calls.push(call).expect("mock call log full");
    }
}

impl PowerActuator for MockActuator {
    fn set_output_voltage(&mut self, millivolts: u32) {
        self.voltage_mv = millivolts;
        self.record(ActuatorCall::SetVoltage(millivolts));
    }

    fn set_output_current(&mut self, milliamps: u32) {
        self.current_ma = milliamps;
        self.record(ActuatorCall::SetCurrent(milliamps));
    }

    fn set_output_current_limit(&mut self, milliamps: u32) {
        self.record(ActuatorCall::SetCurrentLimit(milliamps));
    }

    fn set_output_voltage_limit(&mut self, millivolts: u32) {
        self.record(ActuatorCall::SetVoltageLimit(millivolts));
    }

    fn enable_output(&mut self, enable: bool) {
        self.enabled = enable;
        self.record(ActuatorCall::Enable(enable));
    }

    fn output_voltage_mv(&self) -> u32 {
        self.voltage_mv
    }

    fn output_current_ma(&self) -> u32 {
        self.current_ma
    }
}

/// Mock ADC path with a trivial linear calibration: voltage raws count in
/// units of 10 mV, current raws count milliamps directly.
pub struct MockMeasurement {
    pub raw: AdcSample,
}

impl MockMeasurement {
    pub fn new(v_in_raw: u16) -> Self {
        Self {
            raw: AdcSample {
                i_out_raw: 0,
                v_in_raw,
                v_out_raw: 0,
            },
        }
    }
}

impl MeasurementSource for MockMeasurement {
    fn sample(&mut self) -> AdcSample {
        self.raw
    }

    fn calc_vin(&self, raw: u16) -> u32 {
        raw as u32 * 10
    }

    fn calc_vout(&self, raw: u16) -> u32 {
        raw as u32 * 10
    }

    fn calc_iout(&self, raw: u16) -> u32 {
        raw as u32
    }
}

/// In-memory settings store holding 4-byte records.
pub struct MockStore {
    records: heapless::Vec<(u32, [u8; 4]), 8>,
    /// Flag to simulate flash write failures.
    pub fail_writes: bool,
}

impl MockStore {
    pub fn new() -> Self {
        Self {
            records: heapless::Vec::new(),
            fail_writes: false,
        }
    }

    pub fn contains(&self, key: u32) -> bool {
        self.records.iter().any(|(k, _)| *k == key)
    }
}

impl SettingsStore for MockStore {
    fn write(&mut self, key: u32, data: &[u8]) -> bool {
        if self.fail_writes || data.len() != 4 {
            return false;
        }
        let mut record = [0u8; 4];
        record.copy_from_slice(data);
        if let Some(slot) = self.records.iter_mut().find(|(k, _)| *k == key) {
            slot.1 = record;
            return true;
        }
        self.records.push((key, record)).is_ok()
    }

    fn read(&mut self, key: u32, buf: &mut [u8]) -> Option<usize> {
        let record = self.records.iter().find(|(k, _)| *k == key).map(|(_, r)| r)?;
        let len = record.len().min(buf.len());
        buf[..len].copy_from_slice(&record[..len]);
        Some(len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn actuator_records_calls_in_order() {
        let mut actuator = MockActuator::new();
        actuator.set_output_voltage(5000);
        actuator.enable_output(true);
        assert_eq!(
            actuator.calls.as_slice(),
            &[ActuatorCall::SetVoltage(5000), ActuatorCall::Enable(true)]
        );
        assert_eq!(actuator.output_voltage_mv(), 5000);
        assert!(actuator.enabled);
    }

    #[test]
    fn store_round_trip_and_absence() {
        let mut store = MockStore::new();
        assert!(store.write(0x0100_0000, &42i32.to_le_bytes()));
        let mut buf = [0u8; 4];
        assert_eq!(store.read(0x0100_0000, &mut buf), Some(4));
        assert_eq!(i32::from_le_bytes(buf), 42);
        assert_eq!(store.read(0x0100_0001, &mut buf), None);
    }

    #[test]
    fn store_write_failure() {
        let mut store = MockStore::new();
        store.fail_writes = true;
        assert!(!store.write(0x0100_0000, &[0u8; 4]));
        assert!(!store.contains(0x0100_0000));
    }
}
