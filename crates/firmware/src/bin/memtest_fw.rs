//! Memory-integrity diagnostic image. Fabricates the PRBS test pattern
//! into the irradiated region, then scans and self-heals forever.

#![no_std]
#![no_main]

use firmware::{halt, take_regions};
use hal::tms570::{
    self, MmioPin, MmioSerial, GIO_PORTB_BASE, LED_PIN_ERROR, LED_PIN_SUCCESS, SCILIN_BASE,
};
use hal::SpinDelay;
use memtest::MemoryTest;
use monitor::{MemoryMonitor, Reporter};

#[unsafe(no_mangle)]
pub extern "C" fn _start() -> ! {
    // Serial and GIO blocks themselves are brought up by the vendor init
    // code that runs before _start; only the pin directions are ours.
    unsafe {
        tms570::set_direction(
            GIO_PORTB_BASE,
            (1 << LED_PIN_SUCCESS) | (1 << LED_PIN_ERROR),
        );
    }
    tms570::enable_irq();

    let serial = unsafe { MmioSerial::new(SCILIN_BASE) };
    let success = unsafe { MmioPin::new(GIO_PORTB_BASE, LED_PIN_SUCCESS) };
    let error = unsafe { MmioPin::new(GIO_PORTB_BASE, LED_PIN_ERROR) };

    let (working, golden) = unsafe { take_regions() };
    let test = match MemoryTest::new(working, golden) {
        Ok(test) => test,
        // Unreachable with the congruent statics, but never panic over it.
        Err(_) => halt(),
    };

    let reporter = Reporter::new(serial, success, error);
    let mut monitor = MemoryMonitor::new(test, reporter, SpinDelay);
    monitor.run()
}
