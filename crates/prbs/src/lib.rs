#![no_std]

/// Seed loaded into the shift register at reset. Any non-zero 7-bit value
/// works; the all-ones state matches the flight build.
pub const SEED: u8 = 0x7F;

/// Number of outputs before the sequence repeats. A maximal-length 7-bit
/// LFSR walks every non-zero state exactly once.
pub const PERIOD: usize = 127;

/// Maximal-length PRBS-7 generator (polynomial x^7 + x^6 + 1).
///
/// A 7-bit shift register advanced one step per call: the feedback bit is
/// the XOR of bits 6 and 5, shifted in at the low end. The all-zero state
/// is a fixed point of the recurrence, so the register is never allowed to
/// start there and can never reach it from a non-zero seed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Prbs7 {
    state: u8,
}

impl Prbs7 {
    /// Generator seeded with [`SEED`].
    pub const fn new() -> Self {
        Self::with_seed(SEED)
    }

    /// Generator with an explicit seed. Panics if `seed` is zero or wider
    /// than 7 bits.
    pub const fn with_seed(seed: u8) -> Self {
        assert!(seed != 0 && seed <= 0x7F, "seed must be a non-zero 7-bit value");
        Self { state: seed }
    }

    /// Advances the register one step and returns the new state.
    pub fn next_byte(&mut self) -> u8 {
        let feedback = ((self.state >> 6) ^ (self.state >> 5)) & 1;
        self.state = ((self.state << 1) | feedback) & 0x7F;
        self.state
    }

    /// Current register contents without advancing.
    pub fn state(&self) -> u8 {
        self.state
    }
}

impl Default for Prbs7 {
    fn default() -> Self {
        Self::new()
    }
}

impl Iterator for Prbs7 {
    type Item = u8;

    fn next(&mut self) -> Option<u8> {
        Some(self.next_byte())
    }
}
