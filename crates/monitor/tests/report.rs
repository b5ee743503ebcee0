use hal::mock::{MockPin, MockSerial, MockStatusRegister};
use hal::tms570::CCM_COMPARE_ERROR;
use hal::NoDelay;
use memtest::{MemoryTest, ScanResult};
use monitor::{LockstepMonitor, MemoryMonitor, Reporter};
use once_cell::sync::Lazy;

struct ReportCase {
    name: &'static str,
    result: ScanResult,
    expected_line: &'static str,
    expect_success_blink: bool,
}

static REPORT_CASES: Lazy<Vec<ReportCase>> = Lazy::new(|| {
    vec![
        ReportCase {
            name: "clean scan",
            result: ScanResult {
                calculated_checksum: 10,
                checksum_ok: true,
                bit_flips: 0,
            },
            expected_line: "\rChecksum matches. No bit flip was detected!\r\n",
            expect_success_blink: true,
        },
        ReportCase {
            name: "one flip",
            result: ScanResult {
                calculated_checksum: 14,
                checksum_ok: false,
                bit_flips: 1,
            },
            expected_line: "\rChecksum mismatch! 1 bit flips were detected and corrected.\r\n",
            expect_success_blink: false,
        },
        ReportCase {
            name: "many flips",
            result: ScanResult {
                calculated_checksum: 0,
                checksum_ok: false,
                bit_flips: 512,
            },
            expected_line: "\rChecksum mismatch! 512 bit flips were detected and corrected.\r\n",
            expect_success_blink: false,
        },
        ReportCase {
            name: "cancelling flips fail despite matching checksum",
            result: ScanResult {
                calculated_checksum: 8,
                checksum_ok: true,
                bit_flips: 2,
            },
            expected_line: "\rChecksum mismatch! 2 bit flips were detected and corrected.\r\n",
            expect_success_blink: false,
        },
    ]
});

#[test]
fn report_lines_and_indicators() {
    for case in REPORT_CASES.iter() {
        let mut reporter = Reporter::new(MockSerial::new(), MockPin::new(), MockPin::new());
        reporter.report(&case.result);

        let (serial, success, error) = reporter.into_parts();
        assert_eq!(serial.as_str(), case.expected_line, "{}", case.name);
        if case.expect_success_blink {
            assert_eq!(success.history, [true], "{}", case.name);
            assert_eq!(error.history, [false], "{}", case.name);
        } else {
            assert_eq!(success.history, [false], "{}", case.name);
            assert_eq!(error.history, [true], "{}", case.name);
        }
    }
}

#[test]
fn active_indicator_blinks_across_iterations() {
    let mut reporter = Reporter::new(MockSerial::new(), MockPin::new(), MockPin::new());
    let clean = ScanResult {
        calculated_checksum: 0,
        checksum_ok: true,
        bit_flips: 0,
    };
    reporter.report(&clean);
    reporter.report(&clean);
    reporter.report(&clean);

    let (_, success, error) = reporter.into_parts();
    // Toggled on/off/on: a visible blink at the loop's cadence.
    assert_eq!(success.history, [true, false, true]);
    // The inactive indicator is forced off every iteration.
    assert!(error.history.iter().all(|&level| !level));
}

#[test]
fn memory_monitor_reports_every_iteration() {
    let mut working = [0u64; 16];
    let mut golden = [0u64; 16];
    let test = MemoryTest::new(&mut working, &mut golden).unwrap();
    let reporter = Reporter::new(MockSerial::new(), MockPin::new(), MockPin::new());
    let mut monitor = MemoryMonitor::new(test, reporter, NoDelay);

    monitor.test_mut().fabricate();
    monitor.test_mut().flip_bits(3, 0b11);

    let dirty = monitor.run_once();
    assert_eq!(dirty.bit_flips, 2);

    let clean = monitor.run_once();
    assert!(clean.is_clean());

    let output = monitor.into_reporter().into_parts().0;
    assert_eq!(
        output.as_str(),
        "\rChecksum mismatch! 2 bit flips were detected and corrected.\r\n\
         \rChecksum matches. No bit flip was detected!\r\n"
    );
}

#[test]
fn lockstep_monitor_acknowledges_compare_errors() {
    let status = MockStatusRegister::with_value(CCM_COMPARE_ERROR);
    let reporter = Reporter::new(MockSerial::new(), MockPin::new(), MockPin::new());
    let mut monitor = LockstepMonitor::new(status, reporter, NoDelay, 0);

    assert!(monitor.poll_once());
    // Second poll sees the flag cleared by the write-back.
    assert!(!monitor.poll_once());

    let (status, reporter) = monitor.into_parts();
    assert_eq!(status.writes, [CCM_COMPARE_ERROR]);
    assert_eq!(status.value, 0);

    let (serial, success, error) = reporter.into_parts();
    assert_eq!(
        serial.as_str(),
        "\rCCM-R4F Lockstep Mode: Error Detected!\r\n\
         \rCCM-R4F Lockstep Mode: No Error Detected\r\n"
    );
    assert_eq!(success.history, [false, true]);
    assert_eq!(error.history, [true, false]);
}
