use thiserror::Error;

/// Outcome of a single integrity scan. Built fresh every iteration and
/// handed straight to the reporter; never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanResult {
    /// Wrapping sum of the working region as it was read this pass,
    /// before any corrections were written back.
    pub calculated_checksum: u64,
    /// Whether the calculated checksum matched the expected one.
    pub checksum_ok: bool,
    /// Total bits that differed from the golden copy this pass.
    pub bit_flips: u64,
}

impl ScanResult {
    /// A scan is clean only when the checksum matched *and* no bit
    /// differences were seen. A pathological pair of flips can cancel in
    /// the wrapping sum, so the flip count is the authoritative signal and
    /// the checksum a corroborating fast path.
    pub fn is_clean(&self) -> bool {
        self.checksum_ok && self.bit_flips == 0
    }
}

/// A detected mismatch between the working and golden copies at one word.
/// Always repaired in place before the scan returns; surfaced only through
/// the log facade and the aggregate flip count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("corruption at word {word}: {} bit(s) flipped, diff mask {diff:#018x}", .diff.count_ones())]
pub struct Corruption {
    /// Index of the affected word.
    pub word: usize,
    /// XOR of the working word against its golden counterpart.
    pub diff: u64,
}

/// Construction-time failures. The scan loop itself has no fatal modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MemTestError {
    #[error("working and golden regions differ in length ({working} vs {golden} words)")]
    RegionMismatch { working: usize, golden: usize },
}
