//! Recording fakes for the hardware interfaces, used by correctness tests
//! and the host simulator. None of these ever block.

use alloc::vec::Vec;

use crate::{IndicatorPin, SerialTx, StatusRegister};

/// Serial port that appends everything it is asked to send.
#[derive(Debug, Default)]
pub struct MockSerial {
    pub sent: Vec<u8>,
}

impl MockSerial {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything sent so far, as UTF-8 for assertions on line content.
    pub fn as_str(&self) -> &str {
        core::str::from_utf8(&self.sent).unwrap_or("<non-utf8>")
    }
}

impl SerialTx for MockSerial {
    fn tx_ready(&self) -> bool {
        true
    }

    fn send(&mut self, bytes: &[u8]) {
        self.sent.extend_from_slice(bytes);
    }
}

/// Indicator pin that records its level after every operation.
#[derive(Debug, Default)]
pub struct MockPin {
    pub level: bool,
    pub history: Vec<bool>,
}

impl MockPin {
    pub fn new() -> Self {
        Self::default()
    }
}

impl IndicatorPin for MockPin {
    fn set(&mut self, on: bool) {
        self.level = on;
        self.history.push(on);
    }

    fn toggle(&mut self) {
        self.level = !self.level;
        self.history.push(self.level);
    }
}

/// Status register with write-one-to-clear semantics, like the real CCMSR.
#[derive(Debug, Default)]
pub struct MockStatusRegister {
    pub value: u32,
    pub writes: Vec<u32>,
}

impl MockStatusRegister {
    pub fn with_value(value: u32) -> Self {
        Self {
            value,
            writes: Vec::new(),
        }
    }
}

impl StatusRegister for MockStatusRegister {
    fn read(&self) -> u32 {
        self.value
    }

    fn write(&mut self, mask: u32) {
        self.writes.push(mask);
        self.value &= !mask;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serial_records_bytes() {
        let mut serial = MockSerial::new();
        serial.send_blocking(b"hello\r\n");
        assert_eq!(serial.as_str(), "hello\r\n");
    }

    #[test]
    fn pin_toggle_alternates_level() {
        let mut pin = MockPin::new();
        pin.toggle();
        pin.toggle();
        pin.set(false);
        assert_eq!(pin.history, [true, false, false]);
    }

    #[test]
    fn register_write_clears_masked_bits() {
        let mut reg = MockStatusRegister::with_value(0x0001_0004);
        reg.write(1 << 16);
        assert_eq!(reg.value, 0x4);
        assert_eq!(reg.writes, [1 << 16]);
    }
}
