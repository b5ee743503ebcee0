#![no_std]

pub mod config;
pub use config::*;

pub mod result;
pub use result::{Corruption, MemTestError, ScanResult};

pub mod memtest;
pub use memtest::MemoryTest;
