//! Lockstep-comparator diagnostic image. Puts the CCM-R4F into lockstep
//! mode, then polls the compare-error flag forever.

#![no_std]
#![no_main]

// Linked for its panic handler.
use firmware as _;
use hal::tms570::{
    self, MmioPin, MmioSerial, MmioStatusRegister, CCM_BASE, CCM_SR_OFFSET, GIO_PORTB_BASE,
    LED_PIN_ERROR, LED_PIN_SUCCESS, SCILIN_BASE,
};
use hal::SpinDelay;
use memtest::SCAN_DELAY_COUNT;
use monitor::{LockstepMonitor, Reporter};

#[unsafe(no_mangle)]
pub extern "C" fn _start() -> ! {
    unsafe {
        tms570::set_direction(
            GIO_PORTB_BASE,
            (1 << LED_PIN_SUCCESS) | (1 << LED_PIN_ERROR),
        );
    }
    tms570::enable_irq();
    unsafe { tms570::enter_lockstep_mode() };

    let serial = unsafe { MmioSerial::new(SCILIN_BASE) };
    let success = unsafe { MmioPin::new(GIO_PORTB_BASE, LED_PIN_SUCCESS) };
    let error = unsafe { MmioPin::new(GIO_PORTB_BASE, LED_PIN_ERROR) };
    let status = unsafe { MmioStatusRegister::new(CCM_BASE + CCM_SR_OFFSET) };

    let reporter = Reporter::new(serial, success, error);
    let mut monitor = LockstepMonitor::new(status, reporter, SpinDelay, SCAN_DELAY_COUNT);
    monitor.run()
}
