//! Regulation-mode logic for a DPS-class programmable bench power supply.
//!
//! This crate implements the two regulation screens of the control firmware:
//! * constant voltage ([`mode::Primary::Voltage`]): the output holds the
//!   voltage setpoint while the current setpoint acts as a protective ceiling
//! * constant current ([`mode::Primary::Current`]): the output holds the
//!   current setpoint while the voltage setpoint acts as the ceiling
//!
//! A mode instance validates setpoint edits against live supply conditions,
//! commands the output stage through the [`hw::PowerActuator`] seam, keeps
//! its display mirrors reconciled with the measured output once per tick,
//! and persists its setpoints through a [`store::SettingsStore`].
//!
//! Hardware never appears directly: the ADC path, the DAC/PWM output stage
//! and the flash key/value engine are injected, so the whole core runs in
//! host unit tests.
//!
//! It supports `no-std` environments by use of the `no_std` feature flag.

#![cfg_attr(feature = "no_std", no_std)]

pub mod codec;
pub mod error;
pub mod hw;
pub mod item;
pub mod mode;
pub mod store;

#[cfg(test)]
mod mock_hw;
