//! Keyed settings persistence.
//!
//! Setpoints survive power cycles as 4-byte records in a flash-backed
//! key/value store. The store engine itself lives outside this crate; we
//! only define the trait seam and the packed 32-bit key layout, where the
//! high byte names the screen and the low 24 bits name a slot within it.

use modular_bitfield::prelude::*;

/// Flash-backed key/value storage surviving power loss.
pub trait SettingsStore {
    /// Write a record, replacing any previous one under the same key.
    /// Returns false if the store rejected the write.
    fn write(&mut self, key: u32, data: &[u8]) -> bool;
    /// Read a record into `buf`, returning the record length, or `None`
    /// when no record exists under the key.
    fn read(&mut self, key: u32, buf: &mut [u8]) -> Option<usize>;
}

/// Packed record key: `(screen_id << 24) | slot_id`.
///
/// Slots are per-screen, not globally unique; the screen byte already
/// disambiguates.
#[bitfield]
pub struct StorageKey {
    slot: B24,
    screen: B8,
}

impl StorageKey {
    /// Pack a screen id and slot id into the 32-bit store key.
    pub fn pack(screen: u8, slot: u32) -> u32 {
        let key = Self::new().with_screen(screen).with_slot(slot);
        u32::from_le_bytes(key.into_bytes())
    }
}
