use log::{debug, warn};
use prbs::Prbs7;

use crate::result::{Corruption, MemTestError, ScanResult};

/// Context for one memory-integrity test.
///
/// Design at a glance:
/// - The working region is the memory under irradiation. Anything may flip
///   its bits between scans; every scan treats it as possibly stale the
///   moment it starts reading.
/// - The golden region is the ground truth: written at fabrication, read
///   thereafter. It backs both detection (XOR diff) and repair.
/// - `expected_checksum` is the wrapping sum of the golden words, kept in
///   step with the golden region at all times.
/// - The PRBS generator is owned here so two contexts never share state and
///   tests can construct independent instances.
///
/// After any `scan` call returns, the working region bit-equals the golden
/// region again, whatever was flipped in between.
#[derive(Debug)]
pub struct MemoryTest<'a> {
    working: &'a mut [u64],
    golden: &'a mut [u64],
    expected_checksum: u64,
    generator: Prbs7,
}

impl<'a> MemoryTest<'a> {
    /// Wraps two congruent regions. The expected checksum is taken from the
    /// golden slice as given, so a context built over pre-seeded regions is
    /// immediately scannable; `fabricate` overwrites both.
    pub fn new(working: &'a mut [u64], golden: &'a mut [u64]) -> Result<Self, MemTestError> {
        if working.len() != golden.len() {
            return Err(MemTestError::RegionMismatch {
                working: working.len(),
                golden: golden.len(),
            });
        }
        let expected_checksum = golden
            .iter()
            .fold(0u64, |sum, &word| sum.wrapping_add(word));
        Ok(Self {
            working,
            golden,
            expected_checksum,
            generator: Prbs7::new(),
        })
    }

    /// Fills both regions with the PRBS test pattern and computes the
    /// expected checksum. Runs once, before the scan loop starts.
    ///
    /// Each 64-bit word packs eight successive generator outputs, byte 0 at
    /// bit offset 0 up through byte 7 at offset 56.
    pub fn fabricate(&mut self) {
        self.expected_checksum = 0;
        for i in 0..self.working.len() {
            let mut word = 0u64;
            for offset in (0..64).step_by(8) {
                word |= u64::from(self.generator.next_byte()) << offset;
            }
            self.working[i] = word;
            self.golden[i] = word;
            self.expected_checksum = self.expected_checksum.wrapping_add(word);
        }
        debug!(
            "fabricated {} words, expected checksum {:#018x}",
            self.working.len(),
            self.expected_checksum
        );
    }

    /// One pass over the working region: recompute the checksum, repair
    /// every word that differs from the golden copy, and account for the
    /// flipped bits.
    ///
    /// The checksum is accumulated from the words as read, so a corrupted
    /// pass reports the corrupted sum even though the region is healed by
    /// the time this returns. Never aborts; a flip is reported, not fatal.
    pub fn scan(&mut self) -> ScanResult {
        let mut calculated_checksum = 0u64;
        let mut bit_flips = 0u64;

        for i in 0..self.working.len() {
            let word = self.working[i];
            calculated_checksum = calculated_checksum.wrapping_add(word);

            let diff = word ^ self.golden[i];
            if diff != 0 {
                self.working[i] = self.golden[i];
                bit_flips += u64::from(diff.count_ones());
                warn!("{}", Corruption { word: i, diff });
            }
        }

        ScanResult {
            calculated_checksum,
            checksum_ok: calculated_checksum == self.expected_checksum,
            bit_flips,
        }
    }

    /// Flips the masked bits of one working-region word, emulating the
    /// external corruption the scanner exists to catch. Test and simulator
    /// hook; panics if `word` is out of range.
    pub fn flip_bits(&mut self, word: usize, mask: u64) {
        self.working[word] ^= mask;
    }

    pub fn expected_checksum(&self) -> u64 {
        self.expected_checksum
    }

    pub fn words(&self) -> usize {
        self.working.len()
    }

    pub fn working(&self) -> &[u64] {
        self.working
    }

    pub fn golden(&self) -> &[u64] {
        self.golden
    }
}
