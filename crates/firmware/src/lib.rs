//! Freestanding support for the two diagnostic images: the statically
//! placed memory regions, the panic strategy, and the halt primitive. The
//! images themselves live under `src/bin/` and are built only with the
//! `bare_metal` feature, against the embedded target.

#![no_std]

use core::ptr::addr_of_mut;

use memtest::REGION_WORDS;

/// The region under irradiation. Placed by the linker script at the
/// dedicated RAM window.
#[unsafe(link_section = ".custom_data_section")]
static mut WORKING_REGION: [u64; REGION_WORDS] = [0; REGION_WORDS];

/// The golden copy, in its own non-overlapping window.
#[unsafe(link_section = ".data_store_section")]
static mut GOLDEN_REGION: [u64; REGION_WORDS] = [0; REGION_WORDS];

/// Hands out the two region statics.
///
/// # Safety
/// Must be called at most once per power cycle; the returned borrows are
/// exclusive for the lifetime of the process.
pub unsafe fn take_regions() -> (&'static mut [u64], &'static mut [u64]) {
    unsafe {
        (
            &mut *addr_of_mut!(WORKING_REGION),
            &mut *addr_of_mut!(GOLDEN_REGION),
        )
    }
}

/// Parks the CPU. Nothing restarts a diagnostic image; recovery is an
/// external power cycle.
#[inline(never)]
pub fn halt() -> ! {
    loop {
        #[cfg(target_arch = "arm")]
        unsafe {
            core::arch::asm!("wfi");
        }
        core::hint::spin_loop();
    }
}

#[cfg(target_os = "none")]
#[panic_handler]
fn panic(_info: &core::panic::PanicInfo) -> ! {
    halt()
}
