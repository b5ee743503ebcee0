use hal::tms570::CCM_COMPARE_ERROR;
use hal::{Delay, IndicatorPin, SerialTx, StatusRegister};
use log::debug;

use crate::reporter::Reporter;

/// The lockstep-comparator diagnostic: poll the CCM status register for the
/// compare-error flag, report, clear, delay, forever.
///
/// The comparator runs two redundant CPU lanes in hardware; all this loop
/// does is surface (and acknowledge) the divergence flag.
pub struct LockstepMonitor<R, S, P, D> {
    status: R,
    reporter: Reporter<S, P>,
    delay: D,
    delay_count: u32,
}

impl<R, S, P, D> LockstepMonitor<R, S, P, D>
where
    R: StatusRegister,
    S: SerialTx,
    P: IndicatorPin,
    D: Delay,
{
    pub fn new(status: R, reporter: Reporter<S, P>, delay: D, delay_count: u32) -> Self {
        Self {
            status,
            reporter,
            delay,
            delay_count,
        }
    }

    /// One poll of the comparator flag. Returns true when a compare error
    /// was seen (and acknowledged by writing the mask back).
    pub fn poll_once(&mut self) -> bool {
        if self.status.read() & CCM_COMPARE_ERROR != 0 {
            self.reporter
                .failure("\rCCM-R4F Lockstep Mode: Error Detected!\r\n");
            self.status.write(CCM_COMPARE_ERROR);
            true
        } else {
            self.reporter
                .success("\rCCM-R4F Lockstep Mode: No Error Detected\r\n");
            false
        }
    }

    /// The non-returning diagnostic loop. Runs until power-off.
    pub fn run(&mut self) -> ! {
        debug!("lockstep monitor: polling CCMSR");
        loop {
            self.poll_once();
            self.delay.delay(self.delay_count);
        }
    }

    /// Releases the register and reporter so tests can inspect them.
    pub fn into_parts(self) -> (R, Reporter<S, P>) {
        (self.status, self.reporter)
    }
}
