//! Host-side stand-in for the irradiation bench: runs the scan loop over a
//! heap-backed region pair, plays the role of the particle beam by flipping
//! bits between scans, and prints the serial lines a terminal would log.

use std::io::{self, Write};

use clap::Parser;
use hal::mock::MockPin;
use hal::{NoDelay, SerialTx};
use log::info;
use memtest::{MemTestError, MemoryTest};
use monitor::{MemoryMonitor, Reporter};
use prbs::Prbs7;

#[derive(Parser, Debug)]
#[command(about = "Run the memory-integrity scan loop with injected faults")]
struct Args {
    /// Words per region.
    #[arg(long, default_value_t = 256)]
    words: usize,

    /// Scan iterations to run.
    #[arg(long, default_value_t = 16)]
    iterations: u32,

    /// Single-bit faults injected before each scan.
    #[arg(long, default_value_t = 1)]
    flips_per_iteration: u32,

    /// Seed for the fault-injection sequence (non-zero, 7-bit).
    #[arg(long, default_value_t = 0x55, value_parser = clap::value_parser!(u8).range(1..=127))]
    fault_seed: u8,
}

/// Serial port writing straight to stdout, carriage returns and all.
struct StdoutSerial;

impl SerialTx for StdoutSerial {
    fn tx_ready(&self) -> bool {
        true
    }

    fn send(&mut self, bytes: &[u8]) {
        let mut out = io::stdout();
        let _ = out.write_all(bytes);
        let _ = out.flush();
    }
}

/// Draws a word index from two generator bytes (14 bits), reduced mod the
/// region length.
fn draw_word_index(generator: &mut Prbs7, words: usize) -> usize {
    let hi = usize::from(generator.next_byte());
    let lo = usize::from(generator.next_byte());
    ((hi << 7) | lo) % words
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn word_index_stays_in_range() {
        let mut generator = Prbs7::with_seed(0x55);
        for _ in 0..1000 {
            assert!(draw_word_index(&mut generator, 7) < 7);
        }
    }
}

fn main() -> Result<(), MemTestError> {
    env_logger::init();
    let args = Args::parse();

    let mut working = vec![0u64; args.words];
    let mut golden = vec![0u64; args.words];
    let test = MemoryTest::new(&mut working, &mut golden)?;
    let reporter = Reporter::new(StdoutSerial, MockPin::new(), MockPin::new());
    let mut monitor = MemoryMonitor::new(test, reporter, NoDelay);

    monitor.test_mut().fabricate();
    info!(
        "fabricated {} words, expected checksum {:#018x}",
        args.words,
        monitor.test_mut().expected_checksum()
    );

    let mut beam = Prbs7::with_seed(args.fault_seed);
    let mut injected = 0u64;
    let mut corrected = 0u64;

    for _ in 0..args.iterations {
        for _ in 0..args.flips_per_iteration {
            let word = draw_word_index(&mut beam, args.words);
            let bit = u64::from(beam.next_byte()) % 64;
            monitor.test_mut().flip_bits(word, 1 << bit);
            injected += 1;
        }
        corrected += monitor.run_once().bit_flips;
    }

    // Two injections hitting the same bit in one iteration cancel each
    // other, so corrected can trail injected.
    info!("injected {injected} single-bit faults, corrected {corrected}");

    let (_, success, error) = monitor.into_reporter().into_parts();
    info!(
        "indicator transitions: success {}, error {}",
        success.history.len(),
        error.history.len()
    );
    Ok(())
}
