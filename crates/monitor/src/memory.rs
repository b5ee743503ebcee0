use hal::{Delay, IndicatorPin, SerialTx};
use log::debug;
use memtest::{MemoryTest, ScanResult, SCAN_DELAY_COUNT};

use crate::reporter::Reporter;

/// The memory-integrity diagnostic: fabricate once, then scan, report and
/// delay forever.
pub struct MemoryMonitor<'a, S, P, D> {
    test: MemoryTest<'a>,
    reporter: Reporter<S, P>,
    delay: D,
    delay_count: u32,
}

impl<'a, S: SerialTx, P: IndicatorPin, D: Delay> MemoryMonitor<'a, S, P, D> {
    pub fn new(test: MemoryTest<'a>, reporter: Reporter<S, P>, delay: D) -> Self {
        Self::with_delay_count(test, reporter, delay, SCAN_DELAY_COUNT)
    }

    pub fn with_delay_count(
        test: MemoryTest<'a>,
        reporter: Reporter<S, P>,
        delay: D,
        delay_count: u32,
    ) -> Self {
        Self {
            test,
            reporter,
            delay,
            delay_count,
        }
    }

    /// One loop iteration: scan, then report synchronously.
    pub fn run_once(&mut self) -> ScanResult {
        let result = self.test.scan();
        self.reporter.report(&result);
        result
    }

    /// The non-returning diagnostic loop. Runs until power-off.
    pub fn run(&mut self) -> ! {
        debug!("memory monitor: fabricating {} words", self.test.words());
        self.test.fabricate();
        loop {
            self.run_once();
            self.delay.delay(self.delay_count);
        }
    }

    /// The test context, for fault injection by host-side harnesses.
    pub fn test_mut(&mut self) -> &mut MemoryTest<'a> {
        &mut self.test
    }

    /// Releases the reporter so tests can inspect what it emitted.
    pub fn into_reporter(self) -> Reporter<S, P> {
        self.reporter
    }
}
