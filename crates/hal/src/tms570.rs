//! Register map and MMIO-backed peripheral access for the TMS570 target.
//!
//! Only the handful of registers the diagnostics touch are modelled. The
//! SCI and GIO blocks are brought up by the vendor init code before any of
//! this runs; these types assume working peripherals and provide raw,
//! volatile access behind the narrow traits in the crate root.

use crate::{IndicatorPin, SerialTx, StatusRegister};

/// SCI/LIN module used for diagnostic output.
pub const SCILIN_BASE: usize = 0xFFF7_E400;
/// Flags register offset within the SCI block.
pub const SCI_FLR_OFFSET: usize = 0x1C;
/// Transmit-ready flag in SCIFLR.
pub const SCI_TX_READY: u32 = 1 << 8;
/// Transmit data buffer offset within the SCI block.
pub const SCI_TD_OFFSET: usize = 0x38;

/// GIO port B, where both indicator LEDs live.
pub const GIO_PORTB_BASE: usize = 0xFFF7_BC54;
/// Data-direction register offset within a GIO port.
pub const GIO_DIR_OFFSET: usize = 0x00;
/// Data-out register offset within a GIO port.
pub const GIO_DOUT_OFFSET: usize = 0x08;
/// Output-set register offset within a GIO port.
pub const GIO_DSET_OFFSET: usize = 0x0C;
/// Output-clear register offset within a GIO port.
pub const GIO_DCLR_OFFSET: usize = 0x10;

/// Port B pin driving the success LED.
pub const LED_PIN_SUCCESS: u32 = 1;
/// Port B pin driving the error LED.
pub const LED_PIN_ERROR: u32 = 2;

/// CCM-R4F lockstep comparator module.
pub const CCM_BASE: usize = 0xFFFF_F600;
/// Status register offset within the CCM block.
pub const CCM_SR_OFFSET: usize = 0x00;
/// Key register offset within the CCM block.
pub const CCM_KEYR_OFFSET: usize = 0x04;
/// Key value selecting lockstep mode.
pub const CCM_KEY_LOCKSTEP: u32 = 0x0;
/// Compare-error flag in CCMSR.
pub const CCM_COMPARE_ERROR: u32 = 1 << 16;

#[inline(always)]
unsafe fn reg_read(addr: usize) -> u32 {
    unsafe { core::ptr::read_volatile(addr as *const u32) }
}

#[inline(always)]
unsafe fn reg_write(addr: usize, value: u32) {
    unsafe { core::ptr::write_volatile(addr as *mut u32, value) }
}

/// Polling transmitter over one SCI block.
pub struct MmioSerial {
    base: usize,
}

impl MmioSerial {
    /// # Safety
    /// `base` must be the address of an initialized SCI register block, and
    /// no other code may drive the same transmitter.
    pub const unsafe fn new(base: usize) -> Self {
        Self { base }
    }
}

impl SerialTx for MmioSerial {
    fn tx_ready(&self) -> bool {
        unsafe { reg_read(self.base + SCI_FLR_OFFSET) & SCI_TX_READY != 0 }
    }

    fn send(&mut self, bytes: &[u8]) {
        for &b in bytes {
            while !self.tx_ready() {
                core::hint::spin_loop();
            }
            unsafe { reg_write(self.base + SCI_TD_OFFSET, u32::from(b)) };
        }
    }
}

/// One output pin of a GIO port, driven through the set/clear registers so
/// neighbouring pins are never disturbed.
pub struct MmioPin {
    port: usize,
    pin: u32,
}

impl MmioPin {
    /// # Safety
    /// `port` must be the address of an initialized GIO port register block
    /// and `pin` must be configured as an output (see [`set_direction`]).
    pub const unsafe fn new(port: usize, pin: u32) -> Self {
        Self { port, pin }
    }
}

impl IndicatorPin for MmioPin {
    fn set(&mut self, on: bool) {
        let offset = if on { GIO_DSET_OFFSET } else { GIO_DCLR_OFFSET };
        unsafe { reg_write(self.port + offset, 1 << self.pin) };
    }

    fn toggle(&mut self) {
        unsafe {
            let dout = reg_read(self.port + GIO_DOUT_OFFSET);
            reg_write(self.port + GIO_DOUT_OFFSET, dout ^ (1 << self.pin));
        }
    }
}

/// A single memory-mapped status register.
pub struct MmioStatusRegister {
    addr: usize,
}

impl MmioStatusRegister {
    /// # Safety
    /// `addr` must be the address of a readable/writable 32-bit register.
    pub const unsafe fn new(addr: usize) -> Self {
        Self { addr }
    }
}

impl StatusRegister for MmioStatusRegister {
    fn read(&self) -> u32 {
        unsafe { reg_read(self.addr) }
    }

    fn write(&mut self, mask: u32) {
        unsafe { reg_write(self.addr, mask) };
    }
}

/// Configures the masked pins of a GIO port as outputs.
///
/// # Safety
/// `port` must be the address of an initialized GIO port register block.
pub unsafe fn set_direction(port: usize, mask: u32) {
    unsafe { reg_write(port + GIO_DIR_OFFSET, mask) };
}

/// Puts the CCM-R4F into lockstep mode.
///
/// # Safety
/// Must run on the target before the lockstep monitor starts polling.
pub unsafe fn enter_lockstep_mode() {
    unsafe { reg_write(CCM_BASE + CCM_KEYR_OFFSET, CCM_KEY_LOCKSTEP) };
}

/// Enables IRQs on the target so the peripheral drivers can be serviced.
/// The diagnostic loops themselves never depend on an interrupt.
pub fn enable_irq() {
    #[cfg(target_arch = "arm")]
    unsafe {
        core::arch::asm!("cpsie i");
    }
}
