use core::fmt::{self, Write};

use hal::{IndicatorPin, SerialTx};
use memtest::ScanResult;

/// Capacity of the line buffer. Generous headroom over the longest
/// diagnostic line.
const LINE_CAPACITY: usize = 200;

/// Fixed-capacity buffer for building one serial line without allocating.
/// Overflow truncates; diagnostic lines are far below capacity.
struct LineBuf {
    buf: [u8; LINE_CAPACITY],
    len: usize,
}

impl LineBuf {
    const fn new() -> Self {
        Self {
            buf: [0; LINE_CAPACITY],
            len: 0,
        }
    }

    fn as_bytes(&self) -> &[u8] {
        &self.buf[..self.len]
    }
}

impl fmt::Write for LineBuf {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        let avail = LINE_CAPACITY - self.len;
        let take = s.len().min(avail);
        self.buf[self.len..self.len + take].copy_from_slice(&s.as_bytes()[..take]);
        self.len += take;
        Ok(())
    }
}

/// Renders diagnostic outcomes over serial and drives the two indicator
/// LEDs.
///
/// Indicator discipline, shared by both diagnostics: on a good result the
/// error LED is forced off and the success LED toggled; on a bad result the
/// success LED is forced off and the error LED toggled. Toggling rather
/// than setting makes the active LED blink at the loop's cadence, so at
/// most one LED is ever blinking.
pub struct Reporter<S, P> {
    serial: S,
    success_pin: P,
    error_pin: P,
}

impl<S: SerialTx, P: IndicatorPin> Reporter<S, P> {
    pub fn new(serial: S, success_pin: P, error_pin: P) -> Self {
        Self {
            serial,
            success_pin,
            error_pin,
        }
    }

    /// Releases the serial port and both pins, in (serial, success, error)
    /// order. Lets tests inspect what was recorded.
    pub fn into_parts(self) -> (S, P, P) {
        (self.serial, self.success_pin, self.error_pin)
    }

    /// Emits a good-outcome line and blinks the success LED.
    pub fn success(&mut self, line: &str) {
        self.serial.send_blocking(line.as_bytes());
        self.error_pin.set(false);
        self.success_pin.toggle();
    }

    /// Emits a bad-outcome line and blinks the error LED.
    pub fn failure(&mut self, line: &str) {
        self.serial.send_blocking(line.as_bytes());
        self.success_pin.set(false);
        self.error_pin.toggle();
    }

    /// Renders one scan outcome. Called synchronously every iteration; no
    /// result is dropped or batched.
    pub fn report(&mut self, result: &ScanResult) {
        if result.is_clean() {
            self.success("\rChecksum matches. No bit flip was detected!\r\n");
        } else {
            let mut line = LineBuf::new();
            let _ = write!(
                line,
                "\rChecksum mismatch! {} bit flips were detected and corrected.\r\n",
                result.bit_flips
            );
            self.serial.send_blocking(line.as_bytes());
            self.success_pin.set(false);
            self.error_pin.toggle();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_buf_truncates_at_capacity() {
        let mut line = LineBuf::new();
        for _ in 0..10 {
            line.write_str("0123456789012345678901234").unwrap();
        }
        assert_eq!(line.as_bytes().len(), LINE_CAPACITY);
    }
}
