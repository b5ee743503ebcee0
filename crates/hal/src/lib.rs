#![no_std]

#[cfg(feature = "mock")]
extern crate alloc;

pub mod tms570;

#[cfg(feature = "mock")]
pub mod mock;

/// Transmit side of a serial port.
///
/// The diagnostic loops only ever write; reception is handled by whatever
/// listens on the other end of the cable.
pub trait SerialTx {
    /// True when the transmitter can accept more data.
    fn tx_ready(&self) -> bool;

    /// Queues `bytes` for transmission. Callers are expected to have
    /// observed `tx_ready()` first.
    fn send(&mut self, bytes: &[u8]);

    /// Busy-waits for the transmitter, then sends.
    fn send_blocking(&mut self, bytes: &[u8]) {
        while !self.tx_ready() {
            core::hint::spin_loop();
        }
        self.send(bytes);
    }
}

/// A single binary indicator (an LED on the flight hardware).
pub trait IndicatorPin {
    fn set(&mut self, on: bool);
    fn toggle(&mut self);
}

/// A hardware status register with write-one-to-clear semantics.
///
/// The core logic never touches raw addresses; it sees only this narrow
/// interface, so tests can substitute a fake register.
pub trait StatusRegister {
    fn read(&self) -> u32;

    /// Writes `mask` back to the register. On the real hardware this
    /// clears the flagged bits.
    fn write(&mut self, mask: u32);
}

/// Inter-iteration pacing. Spin counts, not wall-clock time.
pub trait Delay {
    fn delay(&mut self, count: u32);
}

/// Delay implementation that actually spins.
pub struct SpinDelay;

impl Delay for SpinDelay {
    fn delay(&mut self, count: u32) {
        for _ in 0..count {
            core::hint::spin_loop();
        }
    }
}

/// Delay implementation that returns immediately. Correctness tests and the
/// host simulator use this so they never burn cycles.
pub struct NoDelay;

impl Delay for NoDelay {
    fn delay(&mut self, _count: u32) {}
}
