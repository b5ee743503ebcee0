#![no_std]

pub mod reporter;
pub use reporter::Reporter;

pub mod memory;
pub use memory::MemoryMonitor;

pub mod lockstep;
pub use lockstep::LockstepMonitor;
