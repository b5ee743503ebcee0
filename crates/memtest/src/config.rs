/// Size in bytes of each memory region on the flight build.
pub const REGION_SIZE_BYTES: usize = 0x174FC;

/// Words per region. Integer division, matching how the regions are carved
/// out of the linker sections.
pub const REGION_WORDS: usize = REGION_SIZE_BYTES / core::mem::size_of::<u64>();

/// Spin count between scan iterations, chosen to keep the serial terminal
/// readable rather than to hit a wall-clock rate.
pub const SCAN_DELAY_COUNT: u32 = 10_000_000;
